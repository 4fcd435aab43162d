//! Coverage classification
//!
//! Proposal forms send the policy type as free text ("Comprehensive",
//! "Third Party Only", "Standalone OD"). The label is matched against
//! keyword lists to decide which premium components apply.

use serde::{Deserialize, Serialize};
use std::fmt;

const THIRD_PARTY_KEYWORDS: &[&str] = &["tp", "third-party", "third party", "comprehensive"];
const OWN_DAMAGE_KEYWORDS: &[&str] = &["od", "own damage", "comprehensive", "standalone", "stand-alone"];

/// The kind of cover a policy provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoverageKind {
    /// Third-party liability only
    ThirdParty,
    /// Own damage only, when bought on top of an existing TP policy
    StandaloneOwnDamage,
    /// Third-party and own damage
    Comprehensive,
}

impl CoverageKind {
    pub fn includes_third_party(&self) -> bool {
        matches!(self, CoverageKind::ThirdParty | CoverageKind::Comprehensive)
    }

    pub fn includes_own_damage(&self) -> bool {
        matches!(self, CoverageKind::StandaloneOwnDamage | CoverageKind::Comprehensive)
    }
}

impl fmt::Display for CoverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CoverageKind::ThirdParty => "Third Party",
            CoverageKind::StandaloneOwnDamage => "Standalone Own Damage",
            CoverageKind::Comprehensive => "Comprehensive",
        };
        f.write_str(label)
    }
}

/// Outcome of classifying a policy type label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageClassification {
    pub kind: CoverageKind,
    /// True when the label matched nothing and comprehensive was assumed
    pub defaulted: bool,
}

impl CoverageClassification {
    pub fn third_party(&self) -> bool {
        self.kind.includes_third_party()
    }

    pub fn own_damage(&self) -> bool {
        self.kind.includes_own_damage()
    }
}

/// Classifies a policy type label by case-insensitive keyword match
///
/// A label may match both lists. An empty or unrecognised label is treated
/// as comprehensive with `defaulted` set.
pub fn classify_coverage(label: &str) -> CoverageClassification {
    let label = label.to_lowercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|k| label.contains(k));

    let kind = match (has_any(THIRD_PARTY_KEYWORDS), has_any(OWN_DAMAGE_KEYWORDS)) {
        (true, true) => CoverageKind::Comprehensive,
        (true, false) => CoverageKind::ThirdParty,
        (false, true) => CoverageKind::StandaloneOwnDamage,
        (false, false) => {
            return CoverageClassification {
                kind: CoverageKind::Comprehensive,
                defaulted: true,
            }
        }
    };

    CoverageClassification { kind, defaulted: false }
}
