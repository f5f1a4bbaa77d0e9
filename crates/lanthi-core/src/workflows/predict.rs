use crate::core::chemistry::masses::residue_mass;
use crate::core::models::peptide::{PeptideClass, Prepeptide, PrepeptideParts};
use crate::core::models::record::{CdsFeature, Cluster, PRODUCT_LANTHIPEPTIDE, Record};
use crate::core::models::roles::EnzymeRole;
use crate::engine::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::refiner::{BoundaryScore, BoundaryScorer, FimoScorer, NullScorer};
use crate::engine::tasks::{classification, cleavage, modification};
use crate::workflows::results::LanthiResults;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, instrument, warn};

/// Runs the prediction workflow on one record with a scorer chosen from
/// `config`.
pub fn run(
    record: &Record,
    config: &EngineConfig,
    reporter: &ProgressReporter,
) -> Result<LanthiResults, EngineError> {
    Predictor::new(config.clone()).run(record, reporter)
}

/// Drives leader/core splitting, modification enumeration and classification
/// for every precursor in a record's lanthipeptide clusters.
///
/// A predictor holds no per-run state, so one instance can analyse many
/// records, including from several threads.
pub struct Predictor {
    config: EngineConfig,
    scorer: Box<dyn BoundaryScorer>,
    /// Scoring was requested but the tool could not be located.
    tool_missing: bool,
}

impl Predictor {
    /// Creates a predictor that consults FIMO when motif scoring is enabled
    /// and the executable can be found, and the fixed rules otherwise.
    pub fn new(config: EngineConfig) -> Self {
        let mut tool_missing = false;
        let scorer: Box<dyn BoundaryScorer> = match &config.scoring_tool {
            Some(tool) if config.motif_scoring_enabled => {
                let fimo = FimoScorer::from_config(tool);
                if fimo.is_available() {
                    Box::new(fimo)
                } else {
                    warn!(
                        executable = %tool.executable.display(),
                        "Motif-scoring tool not found; using fixed-rule leader/core splits."
                    );
                    tool_missing = true;
                    Box::new(NullScorer)
                }
            }
            _ => Box::new(NullScorer),
        };
        Self {
            config,
            scorer,
            tool_missing,
        }
    }

    /// Creates a predictor with an explicit scorer. The scorer is replaced by
    /// [`NullScorer`] when motif scoring is disabled in `config`.
    pub fn with_scorer(config: EngineConfig, scorer: Box<dyn BoundaryScorer>) -> Self {
        let scorer = if config.motif_scoring_enabled {
            scorer
        } else {
            Box::new(NullScorer)
        };
        Self {
            config,
            scorer,
            tool_missing: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    #[instrument(skip_all, name = "lanthipeptide_prediction", fields(record = record.id()))]
    pub fn run(
        &self,
        record: &Record,
        reporter: &ProgressReporter,
    ) -> Result<LanthiResults, EngineError> {
        reporter.report(Progress::PhaseStart {
            name: "Locating lanthipeptide clusters",
        });
        let clusters: Vec<&Cluster> = record
            .clusters()
            .iter()
            .filter(|c| c.has_product(PRODUCT_LANTHIPEPTIDE))
            .collect();
        info!(
            clusters = clusters.len(),
            scorer = self.scorer.name(),
            "Starting lanthipeptide prediction."
        );
        if self.tool_missing {
            reporter.report(Progress::Message(
                "Motif-scoring tool not found; leader/core splits use fixed rules.".to_string(),
            ));
        }
        reporter.report(Progress::PhaseFinish);

        reporter.report(Progress::PhaseStart {
            name: "Predicting prepeptides",
        });
        reporter.report(Progress::TaskStart {
            total_steps: clusters.len() as u64,
        });

        let mut results = LanthiResults::new(record.id());
        for cluster in clusters {
            reporter.report(Progress::ClusterStart {
                number: cluster.number,
            });
            self.process_cluster(record, cluster, &mut results, reporter)?;
            reporter.report(Progress::TaskIncrement);
        }

        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);

        info!(
            loci = results.motifs_by_locus().len(),
            motifs = results.motif_count(),
            "Lanthipeptide prediction complete."
        );
        Ok(results)
    }

    fn process_cluster(
        &self,
        record: &Record,
        cluster: &Cluster,
        results: &mut LanthiResults,
        reporter: &ProgressReporter,
    ) -> Result<(), EngineError> {
        let members: Vec<&CdsFeature> =
            record.cluster_cds(cluster).collect::<Result<_, _>>()?;
        let tailoring: BTreeSet<EnzymeRole> = members
            .iter()
            .flat_map(|cds| cds.resolved_roles())
            .filter(|role| !role.is_core_modifier())
            .collect();

        let enzymes: Vec<&CdsFeature> = members
            .iter()
            .copied()
            .filter(|cds| cds.has_core_modifier_role())
            .collect();
        if enzymes.is_empty() {
            debug!(
                cluster = cluster.number,
                "No core modifying enzyme in cluster; skipping."
            );
            return Ok(());
        }

        let mut predicted: HashSet<&str> = HashSet::new();
        for enzyme in enzymes {
            if let Some(owner) = results.cluster_of(&enzyme.locus_tag) {
                if owner != cluster.number {
                    debug!(
                        locus = %enzyme.locus_tag,
                        owner,
                        "Enzyme already assigned to an earlier cluster; skipping."
                    );
                    continue;
                }
            }

            let mut precursors = Vec::new();
            for cds in &members {
                if cds.locus_tag == enzyme.locus_tag || predicted.contains(cds.locus_tag.as_str()) {
                    continue;
                }
                if self.is_precursor_candidate(cds, enzyme)? {
                    precursors.push(*cds);
                }
            }
            if precursors.is_empty() {
                debug!(locus = %enzyme.locus_tag, "No precursor candidates near enzyme.");
                continue;
            }

            results
                .register_locus(cluster.number, &enzyme.locus_tag)
                .map_err(|e| EngineError::Internal(e.to_string()))?;

            let mut roles = enzyme.resolved_roles();
            roles.extend(tailoring.iter().copied());
            let assignment = classification::classify(&roles);
            if assignment.approximated {
                warn!(
                    locus = %enzyme.locus_tag,
                    class = %assignment.class,
                    "No classification rule matched; class is approximated."
                );
            }

            for precursor in precursors {
                predicted.insert(precursor.locus_tag.as_str());
                let prediction =
                    self.predict_precursor(precursor, assignment.class, &roles, reporter)?;
                if let Some(prepeptide) = prediction {
                    results
                        .add_motif(&enzyme.locus_tag, prepeptide)
                        .map_err(|e| EngineError::Internal(e.to_string()))?;
                }
            }
        }
        Ok(())
    }

    /// A CDS is a precursor candidate for `enzyme` when upstream analysis
    /// flagged it, it lies within the neighbourhood range and its translation
    /// is no longer than the configured maximum.
    fn is_precursor_candidate(
        &self,
        cds: &CdsFeature,
        enzyme: &CdsFeature,
    ) -> Result<bool, EngineError> {
        if !cds.is_flagged_precursor()
            || cds.location.distance_to(&enzyme.location) > self.config.neighbourhood_range
        {
            return Ok(false);
        }
        let length = normalized_length(cds.translation()?);
        if length > self.config.max_precursor_length {
            debug!(
                locus = %cds.locus_tag,
                length,
                "Flagged precursor exceeds the maximum precursor length; skipping."
            );
            return Ok(false);
        }
        Ok(true)
    }

    fn predict_precursor(
        &self,
        precursor: &CdsFeature,
        class: PeptideClass,
        roles: &BTreeSet<EnzymeRole>,
        reporter: &ProgressReporter,
    ) -> Result<Option<Prepeptide>, EngineError> {
        let locus = precursor.locus_tag.as_str();
        let sequence = normalize_translation(locus, precursor.translation()?)?;

        let refined = self.refine_boundary(locus, &sequence, reporter);
        let Some(split) = cleavage::split_precursor(
            &sequence,
            class,
            refined.as_ref(),
            self.config.min_boundary_confidence,
        ) else {
            debug!(locus, length = sequence.len(), "No viable leader/core split.");
            return Ok(None);
        };

        let bridge_hint = match split.source {
            cleavage::SplitSource::MotifRefiner => refined.and_then(|score| score.bridge_hint),
            _ => None,
        };
        let prediction = modification::enumerate(&split.core, roles, bridge_hint)?;
        debug!(
            locus,
            source = ?split.source,
            bridges = prediction.lan_bridges,
            weight = prediction.molecular_weight,
            "Predicted prepeptide."
        );

        Ok(Some(Prepeptide::from_parts(PrepeptideParts {
            precursor_locus: locus.to_string(),
            leader: split.leader,
            core: split.core,
            peptide_subclass: class,
            lan_bridges: prediction.lan_bridges,
            modifications: prediction.modifications,
            monoisotopic_mass: prediction.monoisotopic_mass,
            molecular_weight: prediction.molecular_weight,
            alternative_weights: prediction.alternative_weights,
        })))
    }

    fn refine_boundary(
        &self,
        locus: &str,
        sequence: &str,
        reporter: &ProgressReporter,
    ) -> Option<BoundaryScore> {
        match self.scorer.score_leader_core_boundary(sequence) {
            Ok(score) => score,
            Err(err) => {
                warn!(
                    locus,
                    tool = self.scorer.name(),
                    error = %err,
                    "Motif scoring failed; using fixed-rule split."
                );
                reporter.report(Progress::Message(format!(
                    "{locus}: motif scoring failed ({err}); using fixed-rule split"
                )));
                None
            }
        }
    }
}

fn normalized_length(translation: &str) -> usize {
    translation.trim().trim_end_matches('*').len()
}

/// Uppercases a translation and drops a trailing stop. Residues without a
/// mass entry are rejected here so that mass calculation only sees valid
/// codes.
fn normalize_translation(locus: &str, translation: &str) -> Result<String, EngineError> {
    let sequence = translation.trim().trim_end_matches('*').to_ascii_uppercase();
    if let Some(residue) = sequence.chars().find(|&c| residue_mass(c).is_err()) {
        return Err(EngineError::InvalidTranslation {
            locus: locus.to_string(),
            residue,
        });
    }
    Ok(sequence)
}
