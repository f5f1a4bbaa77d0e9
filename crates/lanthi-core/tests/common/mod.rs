#![allow(dead_code)]

use lanthipred::core::models::record::{CdsFeature, Cluster, Location, Record, Strand};
use lanthipred::core::models::roles::EnzymeRole;
use lanthipred::engine::config::EngineConfig;
use lanthipred::engine::progress::ProgressReporter;
use lanthipred::engine::refiner::{BoundaryScore, BoundaryScorer, ToolError};
use lanthipred::workflows::predict::Predictor;
use lanthipred::workflows::results::LanthiResults;

pub const NISIN_A: &str = "MSTKDFNLDLVSVSKKDSGASPRITSISLCTPGCKTGALMGCNMKTATCHCSIHVSK";
pub const EPIDERMIN_A: &str = "MEAVKEKNDLFNLDVKVNAKESNDSGAEPRIASKFICTPGCAKTGSFNSYCC";
pub const MICROBISPORICIN_A: &str = "MPADILETRTSETEDLLDLDLSIGVEEITAGPAVTSWSLCTPGCTSPGGGSNCSFCC";
pub const EPICIDIN_A: &str = "MENKKDLFDLEIKKDNMENNNELEAQSLGPAIKATRQVCPKATRFVTVSCKKSDCQ";
pub const LACTOCIN_S_A: &str =
    "MKTEKKVLDELSLHASAKMGARDVESSMNADSTPVLASVAVSMELLPTASVLYSDVAGCFKYSAKHHC";
pub const LABYRINTHOPEPTIN_A1: &str = "MASILELQNLDVEHARGENRSDWSLWECCSTGSLFACC";
pub const LABYRINTHOPEPTIN_A2: &str = "MASILELQDLEVERASSAADSNASVWECCSTGSWVPFTCC";
pub const LANL_SUBSTRATE_A: &str = "MSEQTLDLSAFEGVEQLGDAELDAIAGGITNPWTTACSCTCTIGSCSRTTCLPGC";

/// Gene layout used to assemble a test record.
pub struct Gene<'a> {
    pub tag: &'a str,
    pub translation: Option<&'a str>,
    pub domains: &'a [&'a str],
    pub roles: &'a [EnzymeRole],
    pub precursor: bool,
}

pub fn precursor<'a>(tag: &'a str, translation: &'a str) -> Gene<'a> {
    Gene {
        tag,
        translation: Some(translation),
        domains: &[],
        roles: &[],
        precursor: true,
    }
}

/// Short open reading frame not flagged by upstream analysis.
pub fn orf<'a>(tag: &'a str, translation: &'a str) -> Gene<'a> {
    Gene {
        tag,
        translation: Some(translation),
        domains: &[],
        roles: &[],
        precursor: false,
    }
}

pub fn enzyme<'a>(tag: &'a str, domains: &'a [&'a str]) -> Gene<'a> {
    Gene {
        tag,
        translation: None,
        domains,
        roles: &[],
        precursor: false,
    }
}

pub fn enzyme_with_roles<'a>(tag: &'a str, roles: &'a [EnzymeRole]) -> Gene<'a> {
    Gene {
        tag,
        translation: None,
        domains: &[],
        roles,
        precursor: false,
    }
}

/// Builds a record with all genes laid out 1 kb apart in one lanthipeptide
/// cluster numbered 1.
pub fn single_cluster_record(id: &str, genes: &[Gene]) -> Record {
    let mut record = Record::new(id);
    for (i, gene) in genes.iter().enumerate() {
        let start = i as u64 * 1000;
        let location = Location::new(start, start + 900, Strand::Forward).unwrap();
        let mut cds = CdsFeature::new(gene.tag, location)
            .with_domains(gene.domains)
            .with_roles(gene.roles);
        if let Some(translation) = gene.translation {
            cds = cds.with_translation(translation);
        }
        if gene.precursor {
            cds = cds.as_precursor_candidate();
        }
        record.add_cds_feature(cds).unwrap();
    }
    let loci: Vec<&str> = genes.iter().map(|g| g.tag).collect();
    record
        .add_cluster(Cluster::new(1, &["lanthipeptide"], &loci))
        .unwrap();
    record
}

pub fn nisin_record() -> Record {
    single_cluster_record(
        "nisin",
        &[
            precursor("nisA", NISIN_A),
            enzyme("nisB", &["Lant_dehydr_N", "Lant_dehydr_C"]),
            enzyme("nisT", &["ABC_tran"]),
            enzyme("nisC", &["LANC_like"]),
            enzyme("nisP", &["Peptidase_S8"]),
        ],
    )
}

pub fn epidermin_record() -> Record {
    single_cluster_record(
        "epidermin",
        &[
            precursor("epiA", EPIDERMIN_A),
            enzyme("epiB", &["Lant_dehydr_N", "Lant_dehyd_C"]),
            enzyme("epiC", &["LANC_like"]),
            enzyme("epiD", &["Flavoprotein"]),
        ],
    )
}

pub fn microbisporicin_record() -> Record {
    single_cluster_record(
        "microbisporicin",
        &[
            precursor("mibA", MICROBISPORICIN_A),
            enzyme("mibB", &["Lant_dehydr_N", "Lant_dehydr_C"]),
            enzyme("mibC", &["LANC_like"]),
            enzyme("mibD", &["Flavoprotein"]),
            enzyme("mibH", &["Trp_halogenase"]),
            enzyme("mibO", &["p450"]),
        ],
    )
}

pub fn epicidin_record() -> Record {
    single_cluster_record(
        "epicidin_280",
        &[
            precursor("elxA", EPICIDIN_A),
            enzyme("elxB", &["Lant_dehydr_N", "Lant_dehydr_C"]),
            enzyme("elxC", &["LANC_like"]),
            enzyme("elxO", &["adh_short"]),
            enzyme("elxP", &["Peptidase_S8"]),
        ],
    )
}

pub fn lactocin_s_record() -> Record {
    single_cluster_record(
        "lactocin_s",
        &[
            precursor("lasA", LACTOCIN_S_A),
            enzyme("lasM", &["DUF4135", "LANC_like"]),
            enzyme("lasT", &["ABC_tran"]),
        ],
    )
}

pub fn labyrinthopeptin_record() -> Record {
    single_cluster_record(
        "labyrinthopeptin",
        &[
            precursor("labA1", LABYRINTHOPEPTIN_A1),
            precursor("labA2", LABYRINTHOPEPTIN_A2),
            enzyme_with_roles("labKC", &[EnzymeRole::KinaseCyclase]),
            enzyme("labT1", &["ABC_tran"]),
        ],
    )
}

/// Class IV cluster whose synthetase is recognised only from its kinase and
/// LanC-like domains.
pub fn lanl_record() -> Record {
    single_cluster_record(
        "lanl",
        &[
            precursor("venA", LANL_SUBSTRATE_A),
            enzyme("venL", &["Pkinase", "LANC_like"]),
            enzyme("venT", &["ABC_tran"]),
        ],
    )
}

/// Refiner stand-in that always proposes the same boundary.
pub struct FixedBoundary {
    pub position: usize,
    pub confidence: f64,
}

impl BoundaryScorer for FixedBoundary {
    fn name(&self) -> &'static str {
        "fixed-boundary"
    }

    fn score_leader_core_boundary(&self, sequence: &str) -> Result<Option<BoundaryScore>, ToolError> {
        Ok((self.position < sequence.len()).then_some(BoundaryScore {
            position: self.position,
            confidence: self.confidence,
            bridge_hint: None,
        }))
    }
}

pub fn scoring_enabled() -> EngineConfig {
    EngineConfig {
        motif_scoring_enabled: true,
        ..EngineConfig::default()
    }
}

pub fn run_without_tool(record: &Record) -> LanthiResults {
    Predictor::new(EngineConfig::default())
        .run(record, &ProgressReporter::new())
        .unwrap()
}

pub fn run_with_boundary(record: &Record, position: usize) -> LanthiResults {
    let scorer = FixedBoundary {
        position,
        confidence: 10.0,
    };
    Predictor::with_scorer(scoring_enabled(), Box::new(scorer))
        .run(record, &ProgressReporter::new())
        .unwrap()
}

pub fn gather_all_motifs(results: &LanthiResults) -> Vec<&lanthipred::core::models::peptide::Prepeptide> {
    results
        .clusters()
        .values()
        .flat_map(|loci| loci.iter())
        .flat_map(|locus| results.motifs_for(locus))
        .collect()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} +/- {tolerance}, got {actual}"
    );
}
