use super::peptide::Prepeptide;
use super::roles::{EnzymeRole, is_precursor_domain, roles_from_domains};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

pub const PRODUCT_LANTHIPEPTIDE: &str = "lanthipeptide";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RecordError {
    #[error("Duplicate CDS locus tag: {0}")]
    DuplicateLocus(String),

    #[error("Locus not found in record: {0}")]
    UnknownLocus(String),

    #[error("Duplicate cluster number: {0}")]
    DuplicateCluster(u32),

    #[error("CDS {locus} has no translation")]
    MissingTranslation { locus: String },

    #[error("Invalid location {start}..{end}: start must not exceed end")]
    InvalidLocation { start: u64, end: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

/// Half-open nucleotide interval on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
}

impl Location {
    pub fn new(start: u64, end: u64, strand: Strand) -> Result<Self, RecordError> {
        if start > end {
            return Err(RecordError::InvalidLocation { start, end });
        }
        Ok(Self { start, end, strand })
    }

    /// Gap in nucleotides between two locations, zero when they overlap.
    pub fn distance_to(&self, other: &Location) -> u64 {
        if self.end <= other.start {
            other.start - self.end
        } else if other.end <= self.start {
            self.start - other.end
        } else {
            0
        }
    }
}

/// An annotation attached to a CDS by an analysis module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsMotif {
    pub tool: String,
    /// Locus that produced the annotation, e.g. the modifying enzyme gene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_locus: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepeptide: Option<Prepeptide>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsFeature {
    pub locus_tag: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Profile-domain hits reported by upstream cluster detection.
    #[serde(default)]
    pub domains: Vec<String>,
    /// Roles already resolved upstream; merged with those implied by `domains`.
    #[serde(default)]
    pub roles: BTreeSet<EnzymeRole>,
    #[serde(default)]
    pub precursor_candidate: bool,
    #[serde(default)]
    motifs: Vec<CdsMotif>,
}

impl CdsFeature {
    pub fn new(locus_tag: &str, location: Location) -> Self {
        Self {
            locus_tag: locus_tag.to_string(),
            location,
            translation: None,
            domains: Vec::new(),
            roles: BTreeSet::new(),
            precursor_candidate: false,
            motifs: Vec::new(),
        }
    }

    pub fn with_translation(mut self, translation: &str) -> Self {
        self.translation = Some(translation.to_string());
        self
    }

    pub fn with_domains(mut self, domains: &[&str]) -> Self {
        self.domains = domains.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_roles(mut self, roles: &[EnzymeRole]) -> Self {
        self.roles = roles.iter().copied().collect();
        self
    }

    pub fn as_precursor_candidate(mut self) -> Self {
        self.precursor_candidate = true;
        self
    }

    pub fn translation(&self) -> Result<&str, RecordError> {
        self.translation
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RecordError::MissingTranslation {
                locus: self.locus_tag.clone(),
            })
    }

    pub fn resolved_roles(&self) -> BTreeSet<EnzymeRole> {
        let mut roles = self.roles.clone();
        roles.extend(roles_from_domains(self.domains.iter().map(String::as_str)));
        roles
    }

    pub fn has_core_modifier_role(&self) -> bool {
        self.resolved_roles().iter().any(|r| r.is_core_modifier())
    }

    /// Whether upstream analysis flagged this CDS, directly or through a
    /// precursor profile hit.
    pub fn is_flagged_precursor(&self) -> bool {
        self.precursor_candidate || self.domains.iter().any(|d| is_precursor_domain(d))
    }

    pub fn motifs(&self) -> &[CdsMotif] {
        &self.motifs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub number: u32,
    #[serde(default)]
    pub products: Vec<String>,
    /// Locus tags of the CDS features inside the cluster, in record order.
    pub loci: Vec<String>,
}

impl Cluster {
    pub fn new(number: u32, products: &[&str], loci: &[&str]) -> Self {
        Self {
            number,
            products: products.iter().map(|p| p.to_string()).collect(),
            loci: loci.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn has_product(&self, product: &str) -> bool {
        self.products.iter().any(|p| p == product)
    }
}

/// An annotated genomic record: CDS features grouped into gene clusters.
///
/// Analyses borrow the record read-only; annotations are attached only
/// through [`Record::add_cds_motif`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordData")]
pub struct Record {
    id: String,
    cds_features: Vec<CdsFeature>,
    clusters: Vec<Cluster>,
    #[serde(skip)]
    locus_index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct RecordData {
    id: String,
    #[serde(default)]
    cds_features: Vec<CdsFeature>,
    #[serde(default)]
    clusters: Vec<Cluster>,
}

impl TryFrom<RecordData> for Record {
    type Error = RecordError;

    fn try_from(data: RecordData) -> Result<Self, Self::Error> {
        let mut record = Record::new(&data.id);
        for cds in data.cds_features {
            record.add_cds_feature(cds)?;
        }
        for cluster in data.clusters {
            record.add_cluster(cluster)?;
        }
        Ok(record)
    }
}

impl Record {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            cds_features: Vec::new(),
            clusters: Vec::new(),
            locus_index: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn add_cds_feature(&mut self, cds: CdsFeature) -> Result<(), RecordError> {
        if self.locus_index.contains_key(&cds.locus_tag) {
            return Err(RecordError::DuplicateLocus(cds.locus_tag));
        }
        self.locus_index
            .insert(cds.locus_tag.clone(), self.cds_features.len());
        self.cds_features.push(cds);
        Ok(())
    }

    /// Adds a cluster; every locus it names must already be a CDS feature.
    pub fn add_cluster(&mut self, cluster: Cluster) -> Result<(), RecordError> {
        if self.clusters.iter().any(|c| c.number == cluster.number) {
            return Err(RecordError::DuplicateCluster(cluster.number));
        }
        if let Some(missing) = cluster
            .loci
            .iter()
            .find(|l| !self.locus_index.contains_key(l.as_str()))
        {
            return Err(RecordError::UnknownLocus(missing.clone()));
        }
        self.clusters.push(cluster);
        Ok(())
    }

    pub fn cds_features(&self) -> &[CdsFeature] {
        &self.cds_features
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cds(&self, locus_tag: &str) -> Option<&CdsFeature> {
        self.locus_index
            .get(locus_tag)
            .map(|&idx| &self.cds_features[idx])
    }

    pub fn cluster_cds<'a>(
        &'a self,
        cluster: &'a Cluster,
    ) -> impl Iterator<Item = Result<&'a CdsFeature, RecordError>> + 'a {
        cluster.loci.iter().map(move |locus| {
            self.cds(locus)
                .ok_or_else(|| RecordError::UnknownLocus(locus.clone()))
        })
    }

    pub fn add_cds_motif(&mut self, locus_tag: &str, motif: CdsMotif) -> Result<(), RecordError> {
        let idx = *self
            .locus_index
            .get(locus_tag)
            .ok_or_else(|| RecordError::UnknownLocus(locus_tag.to_string()))?;
        self.cds_features[idx].motifs.push(motif);
        Ok(())
    }

    /// All CDS motif annotations in the record, in feature order.
    pub fn cds_motifs(&self) -> Vec<&CdsMotif> {
        self.cds_features
            .iter()
            .flat_map(|cds| cds.motifs.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(start: u64, end: u64) -> Location {
        Location::new(start, end, Strand::Forward).unwrap()
    }

    fn sample_record() -> Record {
        let mut record = Record::new("rec1");
        record
            .add_cds_feature(
                CdsFeature::new("lanA", loc(0, 171))
                    .with_translation("MSTKDFNLDLVSVSKKDSGASPRITSISLC")
                    .as_precursor_candidate(),
            )
            .unwrap();
        record
            .add_cds_feature(
                CdsFeature::new("lanB", loc(200, 3200)).with_domains(&["Lant_dehydr_N"]),
            )
            .unwrap();
        record
            .add_cluster(Cluster::new(1, &[PRODUCT_LANTHIPEPTIDE], &["lanA", "lanB"]))
            .unwrap();
        record
    }

    #[test]
    fn location_distance_is_zero_for_overlaps() {
        assert_eq!(loc(0, 100).distance_to(&loc(150, 200)), 50);
        assert_eq!(loc(150, 200).distance_to(&loc(0, 100)), 50);
        assert_eq!(loc(0, 100).distance_to(&loc(50, 200)), 0);
    }

    #[test]
    fn location_rejects_inverted_bounds() {
        assert_eq!(
            Location::new(10, 5, Strand::Reverse),
            Err(RecordError::InvalidLocation { start: 10, end: 5 })
        );
    }

    #[test]
    fn duplicate_locus_tags_are_rejected() {
        let mut record = sample_record();
        let result = record.add_cds_feature(CdsFeature::new("lanA", loc(0, 10)));
        assert_eq!(result, Err(RecordError::DuplicateLocus("lanA".into())));
    }

    #[test]
    fn cluster_with_unknown_locus_is_rejected() {
        let mut record = sample_record();
        let result = record.add_cluster(Cluster::new(2, &[], &["missing"]));
        assert_eq!(result, Err(RecordError::UnknownLocus("missing".into())));
    }

    #[test]
    fn resolved_roles_merge_domains_and_explicit_roles() {
        let cds = CdsFeature::new("x", loc(0, 10))
            .with_domains(&["Trp_halogenase", "unrelated"])
            .with_roles(&[EnzymeRole::Cyclase]);
        let roles = cds.resolved_roles();
        assert!(roles.contains(&EnzymeRole::Halogenase));
        assert!(roles.contains(&EnzymeRole::Cyclase));
        assert_eq!(roles.len(), 2);
        assert!(!cds.has_core_modifier_role());
    }

    #[test]
    fn missing_translation_is_reported() {
        let record = sample_record();
        let err = record.cds("lanB").unwrap().translation().unwrap_err();
        assert_eq!(err, RecordError::MissingTranslation { locus: "lanB".into() });
    }

    #[test]
    fn add_cds_motif_grows_annotation_count() {
        let mut record = sample_record();
        assert!(record.cds_motifs().is_empty());
        let motif = CdsMotif {
            tool: "test".into(),
            source_locus: None,
            notes: vec![],
            prepeptide: None,
        };
        record.add_cds_motif("lanA", motif.clone()).unwrap();
        record.add_cds_motif("lanA", motif.clone()).unwrap();
        assert_eq!(record.cds_motifs().len(), 2);
        assert!(record.add_cds_motif("nope", motif).is_err());
    }

    #[test]
    fn deserialization_rebuilds_the_locus_index() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let restored: Record = serde_json::from_str(&json).unwrap();
        assert!(restored.cds("lanB").is_some());
        assert_eq!(restored, record);
    }

    #[test]
    fn deserialization_rejects_duplicate_loci() {
        let json = r#"{
            "id": "r",
            "cds_features": [
                {"locus_tag": "a", "location": {"start": 0, "end": 3, "strand": "+"}},
                {"locus_tag": "a", "location": {"start": 5, "end": 9, "strand": "-"}}
            ]
        }"#;
        assert!(serde_json::from_str::<Record>(json).is_err());
    }
}
