use crate::core::models::peptide::Modification;
use phf::{Map, phf_map};
use std::str::FromStr;
use thiserror::Error;

pub const WATER_MONOISOTOPIC: f64 = 18.010565;
pub const WATER_AVERAGE: f64 = 18.01528;

/// Mass removed by dehydrating one serine or threonine.
///
/// These are the calibrated values the reference lanthipeptide masses were
/// computed with, not the exact mass of water.
pub const DEHYDRATION_MONOISOTOPIC: f64 = 18.0;
pub const DEHYDRATION_AVERAGE: f64 = 18.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassKind {
    Monoisotopic,
    Average,
}

/// Mass of a residue inside a peptide chain (free amino acid minus water).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueMass {
    pub monoisotopic: f64,
    pub average: f64,
}

impl ResidueMass {
    pub fn get(&self, kind: MassKind) -> f64 {
        match kind {
            MassKind::Monoisotopic => self.monoisotopic,
            MassKind::Average => self.average,
        }
    }
}

static RESIDUE_MASSES: Map<char, ResidueMass> = phf_map! {
    'A' => ResidueMass { monoisotopic: 71.037113, average: 71.07792 },
    'C' => ResidueMass { monoisotopic: 103.009184, average: 103.14292 },
    'D' => ResidueMass { monoisotopic: 115.026943, average: 115.08742 },
    'E' => ResidueMass { monoisotopic: 129.042593, average: 129.11402 },
    'F' => ResidueMass { monoisotopic: 147.068414, average: 147.17382 },
    'G' => ResidueMass { monoisotopic: 57.021463, average: 57.05132 },
    'H' => ResidueMass { monoisotopic: 137.058912, average: 137.13932 },
    'I' => ResidueMass { monoisotopic: 113.084064, average: 113.15762 },
    'K' => ResidueMass { monoisotopic: 128.094963, average: 128.17232 },
    'L' => ResidueMass { monoisotopic: 113.084064, average: 113.15762 },
    'M' => ResidueMass { monoisotopic: 131.040484, average: 131.19602 },
    'N' => ResidueMass { monoisotopic: 114.042927, average: 114.10262 },
    'O' => ResidueMass { monoisotopic: 237.147727, average: 237.29812 },
    'P' => ResidueMass { monoisotopic: 97.052764, average: 97.11522 },
    'Q' => ResidueMass { monoisotopic: 128.058577, average: 128.12922 },
    'R' => ResidueMass { monoisotopic: 156.101111, average: 156.18572 },
    'S' => ResidueMass { monoisotopic: 87.032028, average: 87.07732 },
    'T' => ResidueMass { monoisotopic: 101.047678, average: 101.10392 },
    'U' => ResidueMass { monoisotopic: 150.953638, average: 150.03792 },
    'V' => ResidueMass { monoisotopic: 99.068414, average: 99.13102 },
    'W' => ResidueMass { monoisotopic: 186.079313, average: 186.20992 },
    'Y' => ResidueMass { monoisotopic: 163.063328, average: 163.17322 },
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown residue or modification code '{code}'")]
pub struct UnknownResidueError {
    pub code: String,
}

impl UnknownResidueError {
    fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

pub fn residue_mass(code: char) -> Result<ResidueMass, UnknownResidueError> {
    RESIDUE_MASSES
        .get(&code)
        .copied()
        .ok_or_else(|| UnknownResidueError::new(code))
}

/// Signed mass change caused by a tailoring modification.
pub fn modification_delta(modification: Modification, kind: MassKind) -> f64 {
    match (modification, kind) {
        // oxidative decarboxylation: loss of CO2 and H2
        (Modification::AviCys, MassKind::Monoisotopic) => -46.005479,
        (Modification::AviCys, MassKind::Average) => -46.02538,
        (Modification::Lactate, MassKind::Monoisotopic) => 2.015650,
        (Modification::Lactate, MassKind::Average) => 2.01588,
        // H replaced by Cl
        (Modification::Chlorination, MassKind::Monoisotopic) => 33.961028,
        (Modification::Chlorination, MassKind::Average) => 34.44506,
        (Modification::Hydroxylation, MassKind::Monoisotopic) => 15.994915,
        (Modification::Hydroxylation, MassKind::Average) => 15.9994,
    }
}

pub fn dehydration_delta(kind: MassKind) -> f64 {
    match kind {
        MassKind::Monoisotopic => -DEHYDRATION_MONOISOTOPIC,
        MassKind::Average => -DEHYDRATION_AVERAGE,
    }
}

fn delta(code: &str, kind: MassKind) -> Result<f64, UnknownResidueError> {
    let mut chars = code.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Ok(mass) = residue_mass(c) {
            return Ok(mass.get(kind));
        }
    }
    Modification::from_str(code)
        .map(|m| modification_delta(m, kind))
        .map_err(|_| UnknownResidueError::new(code))
}

/// Monoisotopic mass contribution of a one-letter residue code or a
/// modification label such as `AviCys`.
pub fn monoisotopic_delta(code: &str) -> Result<f64, UnknownResidueError> {
    delta(code, MassKind::Monoisotopic)
}

/// Average mass contribution of a one-letter residue code or a modification
/// label such as `AviCys`.
pub fn average_delta(code: &str) -> Result<f64, UnknownResidueError> {
    delta(code, MassKind::Average)
}

/// Mass of the unmodified linear peptide: residue masses plus one water.
pub fn peptide_mass(sequence: &str, kind: MassKind) -> Result<f64, UnknownResidueError> {
    if sequence.is_empty() {
        return Ok(0.0);
    }
    let water = match kind {
        MassKind::Monoisotopic => WATER_MONOISOTOPIC,
        MassKind::Average => WATER_AVERAGE,
    };
    sequence
        .chars()
        .try_fold(water, |acc, c| Ok(acc + residue_mass(c)?.get(kind)))
}
