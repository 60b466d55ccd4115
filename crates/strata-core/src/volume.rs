//! # Volume Profiles
//!
//! Coarse classification of expected telemetry throughput.
//!
//! | Tier   | `data_volume` | Gateway replicas | Placement                                      |
//! |--------|---------------|------------------|------------------------------------------------|
//! | low    | `< 50`        | 2                | Same cluster as applications                   |
//! | medium | `50..100`     | 3-5              | Same cluster, dedicated node pool              |
//! | high   | `>= 100`      | 5-20+            | Dedicated node pool or separate gateway cluster|
//!
//! The input is a tier signal, not a measurement: only the two thresholds
//! matter, and anything at or above the high threshold is the high tier.

use serde::{Deserialize, Serialize};

use crate::primitives::{HIGH_VOLUME_THRESHOLD, MEDIUM_VOLUME_THRESHOLD};

/// Throughput tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum VolumeTier {
    /// Under 1K events/sec.
    #[default]
    Low,
    /// 1K-50K events/sec.
    Medium,
    /// Over 50K events/sec.
    High,
}

impl VolumeTier {
    /// Classify a `data_volume` value.
    #[must_use]
    pub fn from_volume(data_volume: u8) -> Self {
        if data_volume >= HIGH_VOLUME_THRESHOLD {
            VolumeTier::High
        } else if data_volume >= MEDIUM_VOLUME_THRESHOLD {
            VolumeTier::Medium
        } else {
            VolumeTier::Low
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeTier::Low => "low",
            VolumeTier::Medium => "medium",
            VolumeTier::High => "high",
        }
    }

    /// Gateway sizing and placement advice for this tier.
    #[must_use]
    pub fn gateway_recommendation(&self) -> &'static str {
        match self {
            VolumeTier::Low => {
                "2 gateway replicas co-located with application workloads. \
                 Standard Kubernetes Service provides load balancing."
            }
            VolumeTier::Medium => {
                "3-5 gateway replicas on a dedicated node pool. \
                 Use node affinity and taints to isolate collector workloads from application pods."
            }
            VolumeTier::High => {
                "5-20+ gateway replicas on a dedicated node pool or separate gateway cluster. \
                 Use an L7 load balancer (NGINX, Envoy) for advanced traffic management and backpressure handling. \
                 Consider head sampling at the SDK or agent tier to reduce load before gateway processing."
            }
        }
    }
}

impl std::fmt::Display for VolumeTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier plus the human-readable guidance that goes with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeProfile {
    pub tier: VolumeTier,
    pub replicas: String,
    pub placement: String,
    pub load_balancer_type: String,
}

impl VolumeProfile {
    /// Compute the profile for a `data_volume` value.
    #[must_use]
    pub fn from_volume(data_volume: u8) -> Self {
        Self::for_tier(VolumeTier::from_volume(data_volume))
    }

    /// The fixed profile of a tier.
    #[must_use]
    pub fn for_tier(tier: VolumeTier) -> Self {
        let (replicas, placement, load_balancer_type) = match tier {
            VolumeTier::High => (
                "5-20+",
                "Dedicated node pool or separate gateway cluster",
                "L7 load balancer (NGINX/Envoy)",
            ),
            VolumeTier::Medium => (
                "3-5",
                "Same cluster, dedicated node pool",
                "Standard K8s Service",
            ),
            VolumeTier::Low => ("2", "Same cluster as applications", "Standard K8s Service"),
        };

        Self {
            tier,
            replicas: replicas.to_string(),
            placement: placement.to_string(),
            load_balancer_type: load_balancer_type.to_string(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
