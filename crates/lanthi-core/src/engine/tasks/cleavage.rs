use crate::core::models::peptide::PeptideClass;
use crate::engine::refiner::BoundaryScore;
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_LEADER_LENGTH: usize = 10;
pub const MIN_CORE_LENGTH: usize = 8;
/// Cores longer than this rule out a cleavage-site match.
pub const MAX_SITE_CORE_LENGTH: usize = 40;
/// Core length assumed when no cleavage site is recognised.
pub const FALLBACK_CORE_LENGTH: usize = 25;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

// Tried in order; the first pattern with an acceptable match wins.
static CLASS_I_SITES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        // LanP-type, e.g. ...GASPR|ITS
        "[AG].P[ARQ]",
        // Pep5/epicidin-type, e.g. ...ELEAQ|SLG
        "[DE][AP]Q",
    ])
});
static CLASS_II_SITES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        // double-glycine type processed by the LanT protease domain
        "G[GAS]",
        // lactocin S-type, e.g. ...MNADS|TPV
        "A[DE]S",
    ])
});

/// End of the first class-specific cleavage site that leaves a leader and a
/// core of plausible length, if any.
pub fn find_cleavage_site(sequence: &str, class: PeptideClass) -> Option<usize> {
    let sites: &[Regex] = match class {
        PeptideClass::ClassI => CLASS_I_SITES.as_slice(),
        PeptideClass::ClassII => CLASS_II_SITES.as_slice(),
        PeptideClass::ClassIII | PeptideClass::ClassIV => &[],
    };
    let len = sequence.len();
    sites.iter().find_map(|site| {
        site.find_iter(sequence).map(|m| m.end()).find(|&end| {
            let core = len - end;
            end >= MIN_LEADER_LENGTH && (MIN_CORE_LENGTH..=MAX_SITE_CORE_LENGTH).contains(&core)
        })
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSource {
    MotifRefiner,
    CleavageSite,
    FixedOffset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub leader: String,
    pub core: String,
    pub source: SplitSource,
}

impl Split {
    fn at(sequence: &str, position: usize, source: SplitSource) -> Self {
        let (leader, core) = sequence.split_at(position);
        Self {
            leader: leader.to_string(),
            core: core.to_string(),
            source,
        }
    }
}

/// Splits a precursor into leader and core using the class-specific
/// cleavage site, falling back to a fixed offset from the C-terminus.
///
/// Returns `None` when the sequence is too short to hold both a leader and a
/// core of minimal length.
pub fn fixed_rule_split(sequence: &str, class: PeptideClass) -> Option<Split> {
    let len = sequence.len();
    if len < MIN_LEADER_LENGTH + MIN_CORE_LENGTH {
        return None;
    }

    if let Some(end) = find_cleavage_site(sequence, class) {
        return Some(Split::at(sequence, end, SplitSource::CleavageSite));
    }

    let position = len.saturating_sub(FALLBACK_CORE_LENGTH).max(MIN_LEADER_LENGTH);
    Some(Split::at(sequence, position, SplitSource::FixedOffset))
}

/// Uses the refiner's boundary when it is confident enough and leaves a
/// non-empty leader and core; otherwise applies [`fixed_rule_split`].
pub fn split_precursor(
    sequence: &str,
    class: PeptideClass,
    refined: Option<&BoundaryScore>,
    min_confidence: f64,
) -> Option<Split> {
    if let Some(score) = refined {
        if score.confidence >= min_confidence && score.position > 0 && score.position < sequence.len()
        {
            return Some(Split::at(sequence, score.position, SplitSource::MotifRefiner));
        }
    }
    fixed_rule_split(sequence, class)
}
