//! # Complexity Rating
//!
//! An ordinal judgment of the operational burden of a composed architecture.
//!
//! ## Decision Table
//!
//! Rules are evaluated top to bottom; the first match wins. Durability
//! mechanisms dominate volume, which dominates topology.
//!
//! | # | Condition                                                        | Rating    |
//! |---|------------------------------------------------------------------|-----------|
//! | 1 | kafka + sampling, or either of them at high volume               | Very High |
//! | 1 | kafka or sampling                                                | High      |
//! | 2 | gateway at high volume                                           | High      |
//! | 3 | gateway at medium volume, or with persistent queue or 2+ edges   | Medium    |
//! | 4 | gateway with daemonset or sidecar                                | Medium    |
//! | 5 | gateway                                                          | Low       |
//! | 6 | no gateway, 2+ edges or sidecar                                  | Medium    |
//! | 6 | anything else                                                    | Low       |

use serde::{Deserialize, Serialize};

use crate::volume::VolumeTier;

/// Complexity rating. Ordered: `Low < Medium < High < VeryHigh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Complexity {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "Low",
            Complexity::Medium => "Medium",
            Complexity::High => "High",
            Complexity::VeryHigh => "Very High",
        }
    }

    /// Numeric rank, 0 for `Low` through 3 for `VeryHigh`.
    #[must_use]
    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The presence flags the decision table reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplexityFactors {
    pub gateway: bool,
    pub sampling: bool,
    pub kafka: bool,
    pub persistent_queue: bool,
    pub daemonset: bool,
    pub sidecar: bool,
    pub multiple_edge: bool,
    pub tier: VolumeTier,
}

/// Rate a set of factors. See the module docs for the table.
#[must_use]
// The escalation condition is kept in the table's literal pairwise form.
#[allow(clippy::nonminimal_bool)]
pub fn assess(f: &ComplexityFactors) -> Complexity {
    let high_volume = f.tier == VolumeTier::High;

    if f.kafka || f.sampling {
        if (f.kafka && f.sampling) || (f.kafka && high_volume) || (f.sampling && high_volume) {
            return Complexity::VeryHigh;
        }
        return Complexity::High;
    }

    if f.gateway && high_volume {
        return Complexity::High;
    }

    if f.gateway {
        if f.tier == VolumeTier::Medium || f.persistent_queue || f.multiple_edge {
            return Complexity::Medium;
        }
        if f.daemonset || f.sidecar {
            return Complexity::Medium;
        }
        return Complexity::Low;
    }

    if f.multiple_edge || f.sidecar {
        return Complexity::Medium;
    }
    Complexity::Low
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(tier: VolumeTier) -> ComplexityFactors {
        ComplexityFactors {
            tier,
            ..ComplexityFactors::default()
        }
    }

    #[test]
    fn complexity_ordering() {
        assert!(Complexity::Low < Complexity::Medium);
        assert!(Complexity::Medium < Complexity::High);
        assert!(Complexity::High < Complexity::VeryHigh);
        assert_eq!(Complexity::VeryHigh.rank(), 3);
    }

    #[test]
    fn kafka_alone_is_high() {
        let f = ComplexityFactors {
            kafka: true,
            gateway: true,
            ..factors(VolumeTier::Low)
        };
        assert_eq!(assess(&f), Complexity::High);
    }

    #[test]
    fn kafka_and_sampling_escalate() {
        let f = ComplexityFactors {
            kafka: true,
            sampling: true,
            ..factors(VolumeTier::Low)
        };
        assert_eq!(assess(&f), Complexity::VeryHigh);
    }

    #[test]
    fn sampling_at_high_volume_escalates() {
        let f = ComplexityFactors {
            sampling: true,
            ..factors(VolumeTier::High)
        };
        assert_eq!(assess(&f), Complexity::VeryHigh);

        let f = ComplexityFactors {
            sampling: true,
            ..factors(VolumeTier::Medium)
        };
        assert_eq!(assess(&f), Complexity::High);
    }

    #[test]
    fn gateway_rules_by_precedence() {
        let gw = |tier| ComplexityFactors {
            gateway: true,
            ..factors(tier)
        };

        assert_eq!(assess(&gw(VolumeTier::High)), Complexity::High);
        assert_eq!(assess(&gw(VolumeTier::Medium)), Complexity::Medium);
        assert_eq!(assess(&gw(VolumeTier::Low)), Complexity::Low);

        let wal = ComplexityFactors {
            persistent_queue: true,
            ..gw(VolumeTier::Low)
        };
        assert_eq!(assess(&wal), Complexity::Medium);

        let daemonset = ComplexityFactors {
            daemonset: true,
            ..gw(VolumeTier::Low)
        };
        assert_eq!(assess(&daemonset), Complexity::Medium);
    }

    #[test]
    fn edge_only_rules() {
        assert_eq!(assess(&factors(VolumeTier::Low)), Complexity::Low);

        let daemonset = ComplexityFactors {
            daemonset: true,
            ..factors(VolumeTier::Low)
        };
        assert_eq!(assess(&daemonset), Complexity::Low);

        let sidecar = ComplexityFactors {
            sidecar: true,
            ..factors(VolumeTier::Low)
        };
        assert_eq!(assess(&sidecar), Complexity::Medium);
    }

    #[test]
    fn display_matches_badge_text() {
        assert_eq!(Complexity::VeryHigh.to_string(), "Very High");
    }
}
