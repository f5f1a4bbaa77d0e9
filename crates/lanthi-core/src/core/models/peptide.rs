use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PeptideClass {
    #[serde(rename = "Class I")]
    ClassI, // LanB dehydratase + LanC cyclase
    #[serde(rename = "Class II")]
    ClassII, // bifunctional LanM synthetase
    #[serde(rename = "Class III")]
    ClassIII, // LanKC kinase/lyase/cyclase
    #[serde(rename = "Class IV")]
    ClassIV, // LanL kinase/lyase/cyclase with zinc ligands
}

impl PeptideClass {
    pub fn label(&self) -> &'static str {
        match self {
            PeptideClass::ClassI => "Class I",
            PeptideClass::ClassII => "Class II",
            PeptideClass::ClassIII => "Class III",
            PeptideClass::ClassIV => "Class IV",
        }
    }
}

impl fmt::Display for PeptideClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tailoring modifications applied to a core peptide on top of dehydration
/// and lanthionine ring formation.
///
/// Declaration order is the order in which modifications are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modification {
    /// S-[(Z)-2-aminovinyl]-cysteine from oxidative decarboxylation of the
    /// C-terminal cysteine.
    #[serde(rename = "AviCys")]
    AviCys,
    /// N-terminal lactate from a reduced dehydroalanine.
    #[serde(rename = "Lac")]
    Lactate,
    #[serde(rename = "Cl")]
    Chlorination,
    #[serde(rename = "OH")]
    Hydroxylation,
}

impl Modification {
    pub fn label(&self) -> &'static str {
        match self {
            Modification::AviCys => "AviCys",
            Modification::Lactate => "Lac",
            Modification::Chlorination => "Cl",
            Modification::Hydroxylation => "OH",
        }
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown modification label: '{0}'")]
pub struct ParseModificationError(pub String);

impl FromStr for Modification {
    type Err = ParseModificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AviCys" => Ok(Modification::AviCys),
            "Lac" => Ok(Modification::Lactate),
            "Cl" => Ok(Modification::Chlorination),
            "OH" => Ok(Modification::Hydroxylation),
            _ => Err(ParseModificationError(s.to_string())),
        }
    }
}

/// A predicted lanthipeptide: the leader/core split of one precursor together
/// with its modification and mass predictions.
///
/// Instances are created by the prediction workflow and never modified
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Prepeptide {
    precursor_locus: String,
    leader: String,
    core: String,
    peptide_subclass: PeptideClass,
    lan_bridges: usize,
    modifications: Vec<Modification>,
    monoisotopic_mass: f64,
    molecular_weight: f64,
    alternative_weights: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PrepeptideParts {
    pub precursor_locus: String,
    pub leader: String,
    pub core: String,
    pub peptide_subclass: PeptideClass,
    pub lan_bridges: usize,
    pub modifications: Vec<Modification>,
    pub monoisotopic_mass: f64,
    pub molecular_weight: f64,
    pub alternative_weights: Vec<f64>,
}

impl Prepeptide {
    pub(crate) fn from_parts(parts: PrepeptideParts) -> Self {
        Self {
            precursor_locus: parts.precursor_locus,
            leader: parts.leader,
            core: parts.core,
            peptide_subclass: parts.peptide_subclass,
            lan_bridges: parts.lan_bridges,
            modifications: parts.modifications,
            monoisotopic_mass: parts.monoisotopic_mass,
            molecular_weight: parts.molecular_weight,
            alternative_weights: parts.alternative_weights,
        }
    }

    /// Locus tag of the CDS encoding the precursor.
    pub fn precursor_locus(&self) -> &str {
        &self.precursor_locus
    }

    pub fn leader(&self) -> &str {
        &self.leader
    }

    pub fn core(&self) -> &str {
        &self.core
    }

    pub fn peptide_subclass(&self) -> PeptideClass {
        self.peptide_subclass
    }

    pub fn lan_bridges(&self) -> usize {
        self.lan_bridges
    }

    pub fn modifications(&self) -> &[Modification] {
        &self.modifications
    }

    pub fn monoisotopic_mass(&self) -> f64 {
        self.monoisotopic_mass
    }

    pub fn molecular_weight(&self) -> f64 {
        self.molecular_weight
    }

    /// Average masses under fewer dehydrations, strictly increasing.
    pub fn alternative_weights(&self) -> &[f64] {
        &self.alternative_weights
    }

    /// Human-readable annotation notes for attaching to a record feature.
    pub fn notes(&self) -> Vec<String> {
        let mut notes = vec![
            format!("leader: {}", self.leader),
            format!("core: {}", self.core),
            format!("predicted class: {}", self.peptide_subclass),
            format!("number of bridges: {}", self.lan_bridges),
            format!("monoisotopic mass: {:.1}", self.monoisotopic_mass),
            format!("molecular weight: {:.1}", self.molecular_weight),
        ];
        if !self.alternative_weights.is_empty() {
            let weights: Vec<String> = self
                .alternative_weights
                .iter()
                .map(|w| format!("{w:.1}"))
                .collect();
            notes.push(format!("alternative weights: {}", weights.join("; ")));
        }
        if !self.modifications.is_empty() {
            let labels: Vec<&str> = self.modifications.iter().map(|m| m.label()).collect();
            notes.push(format!("additional modifications: {}", labels.join(", ")));
        }
        notes
    }
}
