use crate::core::models::peptide::PeptideClass;
use crate::core::models::roles::EnzymeRole;
use std::collections::BTreeSet;

/// Core modifying enzymes and the class each one defines, in precedence
/// order.
const CLASS_RULES: [(EnzymeRole, PeptideClass); 4] = [
    (EnzymeRole::Dehydratase, PeptideClass::ClassI),
    (EnzymeRole::Synthetase, PeptideClass::ClassII),
    (EnzymeRole::KinaseCyclase, PeptideClass::ClassIII),
    (EnzymeRole::LyaseKinaseCyclase, PeptideClass::ClassIV),
];

/// Class assigned when no rule matches.
pub const FALLBACK_CLASS: PeptideClass = PeptideClass::ClassI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassAssignment {
    pub class: PeptideClass,
    /// Set when no rule matched and [`FALLBACK_CLASS`] was used.
    pub approximated: bool,
}

pub fn classify(roles: &BTreeSet<EnzymeRole>) -> ClassAssignment {
    CLASS_RULES
        .iter()
        .find(|(role, _)| roles.contains(role))
        .map(|&(_, class)| ClassAssignment {
            class,
            approximated: false,
        })
        .unwrap_or(ClassAssignment {
            class: FALLBACK_CLASS,
            approximated: true,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(list: &[EnzymeRole]) -> BTreeSet<EnzymeRole> {
        list.iter().copied().collect()
    }

    #[test]
    fn each_core_modifier_defines_its_class() {
        let cases = [
            (EnzymeRole::Dehydratase, PeptideClass::ClassI),
            (EnzymeRole::Synthetase, PeptideClass::ClassII),
            (EnzymeRole::KinaseCyclase, PeptideClass::ClassIII),
            (EnzymeRole::LyaseKinaseCyclase, PeptideClass::ClassIV),
        ];
        for (role, expected) in cases {
            let assignment = classify(&roles(&[role, EnzymeRole::Transporter]));
            assert_eq!(assignment.class, expected);
            assert!(!assignment.approximated);
        }
    }

    #[test]
    fn dehydratase_takes_precedence() {
        let assignment = classify(&roles(&[EnzymeRole::Synthetase, EnzymeRole::Dehydratase]));
        assert_eq!(assignment.class, PeptideClass::ClassI);
    }

    #[test]
    fn unmatched_roles_fall_back_with_flag() {
        let assignment = classify(&roles(&[EnzymeRole::Cyclase, EnzymeRole::Protease]));
        assert_eq!(assignment.class, FALLBACK_CLASS);
        assert!(assignment.approximated);
        assert!(classify(&BTreeSet::new()).approximated);
    }
}
