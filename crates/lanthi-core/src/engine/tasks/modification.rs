use crate::core::chemistry::masses::{
    DEHYDRATION_AVERAGE, MassKind, UnknownResidueError, dehydration_delta, modification_delta,
    peptide_mass,
};
use crate::core::models::peptide::Modification;
use crate::core::models::roles::EnzymeRole;
use std::collections::BTreeSet;

/// Upper bound on the number of reported alternative weights.
pub const MAX_ALTERNATIVE_WEIGHTS: usize = 4;

/// A thioether ring closure between a dehydrated Ser/Thr and a Cys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    pub dehydrated: usize,
    pub cysteine: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModificationPrediction {
    pub lan_bridges: usize,
    pub modifications: Vec<Modification>,
    pub monoisotopic_mass: f64,
    pub molecular_weight: f64,
    pub alternative_weights: Vec<f64>,
}

fn is_dehydratable(residue: u8) -> bool {
    matches!(residue, b'S' | b'T')
}

/// Pairs every cysteine with the nearest still-unpaired Ser/Thr, walking
/// cysteines N- to C-terminally. Equidistant partners resolve upstream.
pub fn pair_bridges(core: &str) -> Vec<Bridge> {
    let residues = core.as_bytes();
    let mut available: Vec<usize> = residues
        .iter()
        .enumerate()
        .filter(|(_, r)| is_dehydratable(**r))
        .map(|(i, _)| i)
        .collect();

    let mut bridges = Vec::new();
    for (cysteine, _) in residues.iter().enumerate().filter(|(_, r)| **r == b'C') {
        let nearest = available
            .iter()
            .enumerate()
            .min_by_key(|(_, pos)| (pos.abs_diff(cysteine), **pos > cysteine))
            .map(|(slot, _)| slot);
        let Some(slot) = nearest else { break };
        bridges.push(Bridge {
            dehydrated: available.remove(slot),
            cysteine,
        });
    }
    bridges
}

/// A C-terminal cysteine in a ring-forming core is decarboxylated to AviCys.
pub fn has_aminovinyl_cysteine(core: &str, bridges: &[Bridge]) -> bool {
    core.ends_with('C') && !bridges.is_empty()
}

/// Tailoring modifications implied by the core sequence and the enzymes in
/// the cluster, in reporting order.
pub fn detect_modifications(
    core: &str,
    bridges: &[Bridge],
    roles: &BTreeSet<EnzymeRole>,
) -> Vec<Modification> {
    let mut modifications = Vec::new();
    if has_aminovinyl_cysteine(core, bridges) {
        modifications.push(Modification::AviCys);
    }
    if core.starts_with('S') && roles.contains(&EnzymeRole::Dehydrogenase) {
        modifications.push(Modification::Lactate);
    }
    if roles.contains(&EnzymeRole::Halogenase) {
        modifications.push(Modification::Chlorination);
    }
    if roles.contains(&EnzymeRole::Hydroxylase) {
        modifications.push(Modification::Hydroxylation);
    }
    modifications
}

fn modified_mass(
    core: &str,
    dehydrations: usize,
    modifications: &[Modification],
    kind: MassKind,
) -> Result<f64, UnknownResidueError> {
    let base = peptide_mass(core, kind)?;
    let tailoring: f64 = modifications
        .iter()
        .map(|m| modification_delta(*m, kind))
        .sum();
    Ok(base + dehydrations as f64 * dehydration_delta(kind) + tailoring)
}

/// Predicts ring closures, tailoring modifications and masses for a core
/// peptide.
///
/// The primary masses assume every Ser/Thr is dehydrated. Each alternative
/// weight restores one more water for a Ser/Thr that is not needed for a
/// ring, up to [`MAX_ALTERNATIVE_WEIGHTS`]. A `bridge_hint` caps the
/// reported ring count.
pub fn enumerate(
    core: &str,
    roles: &BTreeSet<EnzymeRole>,
    bridge_hint: Option<usize>,
) -> Result<ModificationPrediction, UnknownResidueError> {
    let bridges = pair_bridges(core);
    let modifications = detect_modifications(core, &bridges, roles);
    let dehydratable = core.bytes().filter(|r| is_dehydratable(*r)).count();

    let monoisotopic_mass =
        modified_mass(core, dehydratable, &modifications, MassKind::Monoisotopic)?;
    let molecular_weight = modified_mass(core, dehydratable, &modifications, MassKind::Average)?;

    let mut lan_bridges = bridges.len();
    if modifications.contains(&Modification::AviCys) {
        lan_bridges -= 1;
    }
    if let Some(hint) = bridge_hint {
        lan_bridges = lan_bridges.min(hint);
    }

    let alternative_weights = if bridges.is_empty() {
        Vec::new()
    } else {
        let unbridged = (dehydratable - bridges.len()).min(MAX_ALTERNATIVE_WEIGHTS);
        (1..=unbridged)
            .map(|restored| molecular_weight + restored as f64 * DEHYDRATION_AVERAGE)
            .collect()
    };

    Ok(ModificationPrediction {
        lan_bridges,
        modifications,
        monoisotopic_mass,
        molecular_weight,
        alternative_weights,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NISIN_CORE: &str = "ITSISLCTPGCKTGALMGCNMKTATCHCSIHVSK";
    const EPIDERMIN_CORE: &str = "IASKFICTPGCAKTGSFNSYCC";
    const MICROBISPORICIN_CORE: &str = "VTSWSLCTPGCTSPGGGSNCSFCC";
    const EPICIDIN_CORE: &str = "SLGPAIKATRQVCPKATRFVTVSCKKSDCQ";

    fn roles(list: &[EnzymeRole]) -> BTreeSet<EnzymeRole> {
        list.iter().copied().collect()
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} +/- {tolerance}, got {actual}"
        );
    }

    #[test]
    fn pairing_prefers_nearest_partner() {
        let bridges = pair_bridges("TAACAS");
        assert_eq!(
            bridges,
            vec![Bridge {
                dehydrated: 5,
                cysteine: 3
            }]
        );
    }

    #[test]
    fn pairing_breaks_ties_upstream() {
        let bridges = pair_bridges("SACAT");
        assert_eq!(bridges[0].dehydrated, 0);
    }

    #[test]
    fn pairing_stops_when_partners_run_out() {
        let bridges = pair_bridges("CSCC");
        assert_eq!(bridges.len(), 1);
        assert!(pair_bridges("AAGG").is_empty());
    }

    #[test]
    fn nisin_core_has_five_bridges_and_four_alternatives() {
        let prediction = enumerate(NISIN_CORE, &roles(&[EnzymeRole::Dehydratase]), None).unwrap();
        assert_eq!(prediction.lan_bridges, 5);
        assert!(prediction.modifications.is_empty());
        assert_close(prediction.monoisotopic_mass, 3333.6, 0.05);
        assert_close(prediction.molecular_weight, 3336.0, 0.05);
        let expected = [3354.0, 3372.1, 3390.1, 3408.1];
        assert_eq!(prediction.alternative_weights.len(), expected.len());
        for (calculated, expected) in prediction.alternative_weights.iter().zip(expected) {
            assert_close(*calculated, expected, 0.05);
        }
    }

    #[test]
    fn terminal_cysteine_becomes_avicys_and_consumes_a_bridge() {
        let prediction = enumerate(EPIDERMIN_CORE, &BTreeSet::new(), None).unwrap();
        assert_eq!(prediction.modifications, vec![Modification::AviCys]);
        assert_eq!(prediction.lan_bridges, 3);
        assert_close(prediction.monoisotopic_mass, 2164.0, 0.5);
        assert_close(prediction.molecular_weight, 2165.6, 0.5);
        assert_eq!(prediction.alternative_weights.len(), 1);
    }

    #[test]
    fn tailoring_enzymes_add_chlorination_and_hydroxylation() {
        let cluster_roles = roles(&[
            EnzymeRole::Dehydratase,
            EnzymeRole::Halogenase,
            EnzymeRole::Hydroxylase,
        ]);
        let prediction = enumerate(MICROBISPORICIN_CORE, &cluster_roles, None).unwrap();
        assert_eq!(
            prediction.modifications,
            vec![
                Modification::AviCys,
                Modification::Chlorination,
                Modification::Hydroxylation
            ]
        );
        assert_eq!(prediction.lan_bridges, 4);
        assert_close(prediction.monoisotopic_mass, 2212.9, 0.5);
        assert_close(prediction.molecular_weight, 2214.5, 0.5);
    }

    #[test]
    fn lactate_needs_serine_start_and_dehydrogenase() {
        let with_enzyme =
            enumerate(EPICIDIN_CORE, &roles(&[EnzymeRole::Dehydrogenase]), None).unwrap();
        assert_eq!(with_enzyme.modifications, vec![Modification::Lactate]);
        assert_eq!(with_enzyme.lan_bridges, 3);
        assert_close(with_enzyme.monoisotopic_mass, 3115.7, 0.5);
        assert_close(with_enzyme.molecular_weight, 3117.7, 0.5);
        for (calculated, expected) in with_enzyme
            .alternative_weights
            .iter()
            .zip([3135.7, 3153.7, 3171.7])
        {
            assert_close(*calculated, expected, 0.05);
        }

        let without_enzyme = enumerate(EPICIDIN_CORE, &BTreeSet::new(), None).unwrap();
        assert!(without_enzyme.modifications.is_empty());
        assert_close(
            with_enzyme.molecular_weight - without_enzyme.molecular_weight,
            2.016,
            1e-3,
        );
    }

    #[test]
    fn core_without_cysteine_has_no_ambiguity() {
        let prediction = enumerate("ASTGSTVLK", &BTreeSet::new(), None).unwrap();
        assert_eq!(prediction.lan_bridges, 0);
        assert!(prediction.alternative_weights.is_empty());
        assert!(prediction.modifications.is_empty());
    }

    #[test]
    fn alternative_weights_are_bounded_and_increasing() {
        let prediction = enumerate("STSTSTSTSTCAAC", &BTreeSet::new(), None).unwrap();
        assert_eq!(prediction.alternative_weights.len(), MAX_ALTERNATIVE_WEIGHTS);
        assert!(
            prediction
                .alternative_weights
                .windows(2)
                .all(|w| w[0] < w[1])
        );
        assert!(prediction.alternative_weights[0] > prediction.molecular_weight);
    }

    #[test]
    fn bridge_hint_caps_ring_count() {
        let prediction = enumerate(NISIN_CORE, &BTreeSet::new(), Some(3)).unwrap();
        assert_eq!(prediction.lan_bridges, 3);
    }

    #[test]
    fn unknown_residue_is_propagated() {
        let err = enumerate("ACXS", &BTreeSet::new(), None).unwrap_err();
        assert_eq!(err.code, "X");
    }
}
