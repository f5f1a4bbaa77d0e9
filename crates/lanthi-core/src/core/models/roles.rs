use phf::{Map, Set, phf_map, phf_set};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Functional role of a gene product in lanthipeptide biosynthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnzymeRole {
    // --- Core modifying enzymes ---
    Dehydratase,        // LanB
    Synthetase,         // LanM
    KinaseCyclase,      // LanKC
    LyaseKinaseCyclase, // LanL

    // --- Ring formation ---
    Cyclase, // LanC

    // --- Tailoring ---
    Decarboxylase, // LanD
    Halogenase,
    Hydroxylase,   // cytochrome P450
    Dehydrogenase, // LanJ (short-chain)

    // --- Processing and export ---
    Protease,    // LanP
    Transporter, // LanT
}

static DOMAIN_ROLES: Map<&'static str, EnzymeRole> = phf_map! {
    "Lant_dehydr_N" => EnzymeRole::Dehydratase,
    "Lant_dehydr_C" => EnzymeRole::Dehydratase,
    "Lant_dehyd_C" => EnzymeRole::Dehydratase,
    "DUF4135" => EnzymeRole::Synthetase,
    "Pkinase" => EnzymeRole::KinaseCyclase,
    "LANC_like" => EnzymeRole::Cyclase,
    "Flavoprotein" => EnzymeRole::Decarboxylase,
    "Trp_halogenase" => EnzymeRole::Halogenase,
    "p450" => EnzymeRole::Hydroxylase,
    "adh_short" => EnzymeRole::Dehydrogenase,
    "adh_short_C2" => EnzymeRole::Dehydrogenase,
    "Peptidase_S8" => EnzymeRole::Protease,
    "ABC_tran" => EnzymeRole::Transporter,
};

/// Profile names whose hits mark a CDS as a likely precursor peptide.
static PRECURSOR_DOMAINS: Set<&'static str> = phf_set! {
    "Antimicrobial18", "Gallidermin", "L_biotic_typeA", "lacticin_l",
    "leader_d", "leader_abc", "leader_eh", "mature_a", "mature_b", "mature_d",
    "mature_ha", "mature_ha_t", "lacticin_mat", "LD_lanti_pre", "strep_PEQAXS",
};

impl EnzymeRole {
    /// Resolves a profile-domain name to the role it indicates, if any.
    pub fn from_domain(domain: &str) -> Option<Self> {
        DOMAIN_ROLES.get(domain.trim()).copied()
    }

    /// Roles that install dehydrations and thioether rings themselves and
    /// therefore anchor a biosynthetic locus.
    pub fn is_core_modifier(&self) -> bool {
        matches!(
            self,
            EnzymeRole::Dehydratase
                | EnzymeRole::Synthetase
                | EnzymeRole::KinaseCyclase
                | EnzymeRole::LyaseKinaseCyclase
        )
    }

    pub fn gene_family(&self) -> &'static str {
        match self {
            EnzymeRole::Dehydratase => "LanB",
            EnzymeRole::Synthetase => "LanM",
            EnzymeRole::KinaseCyclase => "LanKC",
            EnzymeRole::LyaseKinaseCyclase => "LanL",
            EnzymeRole::Cyclase => "LanC",
            EnzymeRole::Decarboxylase => "LanD",
            EnzymeRole::Halogenase => "LanH",
            EnzymeRole::Hydroxylase => "LanO",
            EnzymeRole::Dehydrogenase => "LanJ",
            EnzymeRole::Protease => "LanP",
            EnzymeRole::Transporter => "LanT",
        }
    }
}

/// Resolves the roles implied by all profile hits of one gene.
///
/// A kinase domain alone marks a LanKC. Together with a LanC-like cyclase
/// domain on the same gene it marks a LanL, whose cyclase domain keeps the
/// zinc ligands that LanKC lacks.
pub fn roles_from_domains<'a>(domains: impl IntoIterator<Item = &'a str>) -> BTreeSet<EnzymeRole> {
    let mut roles: BTreeSet<EnzymeRole> = domains
        .into_iter()
        .filter_map(EnzymeRole::from_domain)
        .collect();
    if roles.contains(&EnzymeRole::Cyclase) && roles.remove(&EnzymeRole::KinaseCyclase) {
        roles.insert(EnzymeRole::LyaseKinaseCyclase);
    }
    roles
}

pub fn is_precursor_domain(domain: &str) -> bool {
    PRECURSOR_DOMAINS.contains(domain.trim())
}

impl fmt::Display for EnzymeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gene_family())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown enzyme role: '{0}'")]
pub struct ParseRoleError(pub String);

impl FromStr for EnzymeRole {
    type Err = ParseRoleError;

    /// Accepts either the gene-family name (`LanB`) or the descriptive name
    /// (`dehydratase`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let role = match s.trim().to_ascii_lowercase().as_str() {
            "lanb" | "dehydratase" => EnzymeRole::Dehydratase,
            "lanm" | "synthetase" => EnzymeRole::Synthetase,
            "lankc" | "kinase-cyclase" => EnzymeRole::KinaseCyclase,
            "lanl" | "lyase-kinase-cyclase" => EnzymeRole::LyaseKinaseCyclase,
            "lanc" | "cyclase" => EnzymeRole::Cyclase,
            "land" | "decarboxylase" => EnzymeRole::Decarboxylase,
            "lanh" | "halogenase" => EnzymeRole::Halogenase,
            "lano" | "hydroxylase" => EnzymeRole::Hydroxylase,
            "lanj" | "dehydrogenase" => EnzymeRole::Dehydrogenase,
            "lanp" | "protease" => EnzymeRole::Protease,
            "lant" | "transporter" => EnzymeRole::Transporter,
            _ => return Err(ParseRoleError(s.to_string())),
        };
        Ok(role)
    }
}
