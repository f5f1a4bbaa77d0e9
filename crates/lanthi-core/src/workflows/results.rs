use crate::core::models::peptide::Prepeptide;
use crate::core::models::record::{CdsMotif, Record, RecordError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Version of the serialized results layout.
pub const SCHEMA_VERSION: u32 = 1;
/// Tool name recorded on every annotation attached to a record.
pub const TOOL_NAME: &str = "lanthipeptides";

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("Unsupported results schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },

    #[error("Results were computed for record '{found}', not '{expected}'")]
    RecordMismatch { expected: String, found: String },

    #[error("Locus '{0}' is not present in the record")]
    UnknownLocus(String),

    #[error("Precursor locus '{0}' is not present in the record")]
    UnknownPrecursorLocus(String),

    #[error("Locus '{0}' is not registered under any cluster")]
    UnregisteredLocus(String),

    #[error("Locus '{locus}' is registered under clusters {first} and {second}")]
    LocusInMultipleClusters { locus: String, first: u32, second: u32 },

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Malformed results data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Lanthipeptide predictions for one record, grouped by cluster and by the
/// modifying-enzyme locus that produced them.
///
/// Every key of `motifs_by_locus` belongs to exactly one cluster's locus set.
/// Loci keep their insertion order and motifs keep their discovery order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LanthiResults {
    record_id: String,
    clusters: BTreeMap<u32, BTreeSet<String>>,
    motifs_by_locus: IndexMap<String, Vec<Prepeptide>>,
}

#[derive(Serialize)]
struct ResultsDataRef<'a> {
    schema_version: u32,
    record_id: &'a str,
    clusters: &'a BTreeMap<u32, BTreeSet<String>>,
    motifs_by_locus: &'a IndexMap<String, Vec<Prepeptide>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ResultsData {
    schema_version: u32,
    record_id: String,
    clusters: BTreeMap<u32, BTreeSet<String>>,
    motifs_by_locus: IndexMap<String, Vec<Prepeptide>>,
}

impl LanthiResults {
    pub fn new(record_id: &str) -> Self {
        Self {
            record_id: record_id.to_string(),
            ..Self::default()
        }
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    pub fn clusters(&self) -> &BTreeMap<u32, BTreeSet<String>> {
        &self.clusters
    }

    pub fn motifs_by_locus(&self) -> &IndexMap<String, Vec<Prepeptide>> {
        &self.motifs_by_locus
    }

    pub fn motifs_for(&self, locus: &str) -> &[Prepeptide] {
        self.motifs_by_locus
            .get(locus)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of motifs across all loci.
    pub fn motif_count(&self) -> usize {
        self.motifs_by_locus.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.motif_count() == 0
    }

    /// Cluster number a locus is registered under, if any.
    pub fn cluster_of(&self, locus: &str) -> Option<u32> {
        self.clusters
            .iter()
            .find(|(_, loci)| loci.contains(locus))
            .map(|(&number, _)| number)
    }

    /// Registers a locus under a cluster and opens its (possibly empty)
    /// motif list.
    pub fn register_locus(&mut self, cluster: u32, locus: &str) -> Result<(), ResultsError> {
        if let Some(existing) = self.cluster_of(locus) {
            if existing != cluster {
                return Err(ResultsError::LocusInMultipleClusters {
                    locus: locus.to_string(),
                    first: existing,
                    second: cluster,
                });
            }
        }
        self.clusters
            .entry(cluster)
            .or_default()
            .insert(locus.to_string());
        self.motifs_by_locus.entry(locus.to_string()).or_default();
        Ok(())
    }

    pub fn add_motif(&mut self, locus: &str, motif: Prepeptide) -> Result<(), ResultsError> {
        let motifs = self
            .motifs_by_locus
            .get_mut(locus)
            .ok_or_else(|| ResultsError::UnregisteredLocus(locus.to_string()))?;
        motifs.push(motif);
        Ok(())
    }

    /// Attaches one annotation per motif to the precursor CDS it describes
    /// and returns the number attached.
    ///
    /// Not idempotent: every call attaches a fresh copy of each annotation,
    /// so callers must merge a given result into a record at most once.
    pub fn add_to_record(&self, record: &mut Record) -> Result<usize, ResultsError> {
        if record.id() != self.record_id {
            return Err(ResultsError::RecordMismatch {
                expected: record.id().to_string(),
                found: self.record_id.clone(),
            });
        }
        // the record is left untouched unless every motif can be attached
        if let Some(missing) = self
            .motifs()
            .map(|(_, motif)| motif.precursor_locus())
            .find(|locus| record.cds(locus).is_none())
        {
            return Err(ResultsError::UnknownPrecursorLocus(missing.to_string()));
        }

        let mut added = 0;
        for (locus, motif) in self.motifs() {
            let annotation = CdsMotif {
                tool: TOOL_NAME.to_string(),
                source_locus: Some(locus.to_string()),
                notes: motif.notes(),
                prepeptide: Some(motif.clone()),
            };
            record.add_cds_motif(motif.precursor_locus(), annotation)?;
            added += 1;
        }
        Ok(added)
    }

    fn motifs(&self) -> impl Iterator<Item = (&str, &Prepeptide)> {
        self.motifs_by_locus
            .iter()
            .flat_map(|(locus, motifs)| motifs.iter().map(move |m| (locus.as_str(), m)))
    }

    /// Serializes the results into an order-preserving JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value, ResultsError> {
        let data = ResultsDataRef {
            schema_version: SCHEMA_VERSION,
            record_id: &self.record_id,
            clusters: &self.clusters,
            motifs_by_locus: &self.motifs_by_locus,
        };
        Ok(serde_json::to_value(data)?)
    }

    /// Restores results produced by [`LanthiResults::to_json`] for the given
    /// record, validating every referenced locus against it.
    pub fn from_json(data: &serde_json::Value, record: &Record) -> Result<Self, ResultsError> {
        let data = ResultsData::deserialize(data)?;
        if data.schema_version != SCHEMA_VERSION {
            return Err(ResultsError::SchemaVersion {
                found: data.schema_version,
                expected: SCHEMA_VERSION,
            });
        }
        if data.record_id != record.id() {
            return Err(ResultsError::RecordMismatch {
                expected: record.id().to_string(),
                found: data.record_id,
            });
        }

        let mut results = LanthiResults::new(&data.record_id);
        for (number, loci) in &data.clusters {
            for locus in loci {
                if record.cds(locus).is_none() {
                    return Err(ResultsError::UnknownLocus(locus.clone()));
                }
                results.register_locus(*number, locus)?;
            }
        }
        // re-key in serialized order so locus order survives the round trip
        let mut ordered = IndexMap::with_capacity(data.motifs_by_locus.len());
        for (locus, motifs) in data.motifs_by_locus {
            if results.cluster_of(&locus).is_none() {
                return Err(ResultsError::UnregisteredLocus(locus));
            }
            if let Some(missing) = motifs
                .iter()
                .find(|m| record.cds(m.precursor_locus()).is_none())
            {
                return Err(ResultsError::UnknownPrecursorLocus(
                    missing.precursor_locus().to_string(),
                ));
            }
            ordered.insert(locus, motifs);
        }
        for locus in results.motifs_by_locus.keys() {
            if !ordered.contains_key(locus) {
                ordered.insert(locus.clone(), Vec::new());
            }
        }
        results.motifs_by_locus = ordered;
        Ok(results)
    }
}
