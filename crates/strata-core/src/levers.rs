//! # Decision Levers
//!
//! The option sets a front end offers for editing [`Requirements`].
//!
//! Three shapes exist:
//! - [`ThreePositionLever`]: a discrete slider (data volume, data-loss policy)
//! - [`CapabilityLever`]: a toggle for one telemetry or processing need
//! - [`ConstraintLever`]: a toggle for an environment restriction
//!
//! Every toggle id maps to exactly one boolean field of `Requirements`; see
//! [`Requirements::set_capability`].

use serde::Serialize;

use crate::{DataLossPolicy, Requirements, StrataError};

// =============================================================================
// THREE-POSITION LEVERS
// =============================================================================

/// The value a slider position stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LeverValue {
    Number(u8),
    Text(&'static str),
}

impl std::fmt::Display for LeverValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeverValue::Number(n) => write!(f, "{}", n),
            LeverValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeverPosition {
    pub value: LeverValue,
    pub label: &'static str,
    pub description: &'static str,
}

/// Requirements field a slider edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SliderField {
    DataVolume,
    DataLossPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThreePositionLever {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub positions: [LeverPosition; 3],
    #[serde(skip)]
    field: SliderField,
}

pub static DATA_VOLUME_LEVER: ThreePositionLever = ThreePositionLever {
    id: "data-volume",
    name: "Data Volume",
    description: "Expected telemetry throughput",
    icon: "Activity",
    positions: [
        LeverPosition {
            value: LeverValue::Number(0),
            label: "Low",
            description: "<1K events/sec",
        },
        LeverPosition {
            value: LeverValue::Number(50),
            label: "Medium",
            description: "1K-50K events/sec",
        },
        LeverPosition {
            value: LeverValue::Number(100),
            label: "High",
            description: ">50K events/sec",
        },
    ],
    field: SliderField::DataVolume,
};

pub static DATA_LOSS_LEVER: ThreePositionLever = ThreePositionLever {
    id: "data-loss-policy",
    name: "Data Resilience",
    description: "How important is preventing data loss?",
    icon: "Shield",
    positions: [
        LeverPosition {
            value: LeverValue::Text("acceptable"),
            label: "Some Loss OK",
            description: "Dev/test environments",
        },
        LeverPosition {
            value: LeverValue::Text("minimize"),
            label: "Minimize Loss",
            description: "Production workloads",
        },
        LeverPosition {
            value: LeverValue::Text("zero"),
            label: "Zero Loss",
            description: "Compliance/audit",
        },
    ],
    field: SliderField::DataLossPolicy,
};

/// All sliders, in display order.
pub static SLIDER_LEVERS: [&ThreePositionLever; 2] = [&DATA_VOLUME_LEVER, &DATA_LOSS_LEVER];

impl ThreePositionLever {
    /// The value this lever currently reads from `req`.
    #[must_use]
    pub fn current(&self, req: &Requirements) -> LeverValue {
        match self.field {
            SliderField::DataVolume => LeverValue::Number(req.data_volume),
            SliderField::DataLossPolicy => LeverValue::Text(req.data_loss_policy.as_str()),
        }
    }

    /// Move `req` to the position at `index`.
    ///
    /// Out-of-range indices select the first position.
    pub fn apply(&self, req: &mut Requirements, index: usize) -> Result<(), StrataError> {
        match (self.field, value_from_index(self, index)) {
            (SliderField::DataVolume, LeverValue::Number(n)) => req.data_volume = n,
            (SliderField::DataLossPolicy, LeverValue::Text(s)) => {
                req.data_loss_policy = s.parse::<DataLossPolicy>()?;
            }
            (_, value) => {
                return Err(StrataError::InvalidRequirements(format!(
                    "lever {} has no field for value {}",
                    self.id, value
                )));
            }
        }
        Ok(())
    }
}

/// Index of the position holding `value`, or 0 when none does.
#[must_use]
pub fn position_index(lever: &ThreePositionLever, value: LeverValue) -> usize {
    lever
        .positions
        .iter()
        .position(|p| p.value == value)
        .unwrap_or(0)
}

/// Value at `index`, or the first position's value when out of range.
#[must_use]
pub fn value_from_index(lever: &ThreePositionLever, index: usize) -> LeverValue {
    lever
        .positions
        .get(index)
        .unwrap_or(&lever.positions[0])
        .value
}

// =============================================================================
// CAPABILITY LEVERS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityCategory {
    AppCollection,
    InfraCollection,
    Processing,
    Routing,
}

impl CapabilityCategory {
    pub const ALL: [CapabilityCategory; 4] = [
        CapabilityCategory::AppCollection,
        CapabilityCategory::InfraCollection,
        CapabilityCategory::Processing,
        CapabilityCategory::Routing,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityCategory::AppCollection => "app-collection",
            CapabilityCategory::InfraCollection => "infra-collection",
            CapabilityCategory::Processing => "processing",
            CapabilityCategory::Routing => "routing",
        }
    }
}

impl std::fmt::Display for CapabilityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityLever {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
    pub icon: &'static str,
    pub category: CapabilityCategory,
    /// True when satisfying this need puts a collector in the pipeline.
    pub is_collector: bool,
}

pub static CAPABILITY_LEVERS: [CapabilityLever; 8] = [
    CapabilityLever {
        id: "app-logs",
        name: "Application Logs",
        description: "Collect logs emitted by your applications via OTLP",
        impact: "Applications send logs directly via SDK or through collector",
        icon: "FileText",
        category: CapabilityCategory::AppCollection,
        is_collector: false,
    },
    CapabilityLever {
        id: "app-traces",
        name: "Application Traces",
        description: "Collect distributed traces from your applications",
        impact: "Applications send traces via SDK - enables end-to-end request tracking",
        icon: "GitCommit",
        category: CapabilityCategory::AppCollection,
        is_collector: false,
    },
    CapabilityLever {
        id: "app-metrics",
        name: "Application Metrics",
        description: "Collect custom metrics from your applications",
        impact: "Applications emit metrics via SDK for business and performance insights",
        icon: "BarChart2",
        category: CapabilityCategory::AppCollection,
        is_collector: false,
    },
    CapabilityLever {
        id: "infra-logs",
        name: "Infrastructure Logs",
        description: "Collect logs from disk (container logs, system logs)",
        impact: "Requires DaemonSet agent with filelog receiver (not available on serverless K8s)",
        icon: "HardDrive",
        category: CapabilityCategory::InfraCollection,
        is_collector: true,
    },
    CapabilityLever {
        id: "infra-metrics",
        name: "Infrastructure Metrics",
        description: "Collect CPU, memory, disk, and network metrics from nodes",
        impact: "Requires DaemonSet agent with hostmetrics receiver (not available on serverless K8s)",
        icon: "Cpu",
        category: CapabilityCategory::InfraCollection,
        is_collector: true,
    },
    CapabilityLever {
        id: "central-policy",
        name: "Central Policy",
        description: "Apply consistent filtering, transformation, and PII redaction",
        impact: "Adds Gateway pool for centralized processing",
        icon: "Shield",
        category: CapabilityCategory::Processing,
        is_collector: true,
    },
    CapabilityLever {
        id: "tail-sampling",
        name: "Tail Sampling",
        description: "Intelligent sampling that keeps errors, slow traces, and samples the rest",
        impact: "Adds Sampling Tier (StatefulSet) with load-balancing exporter for trace routing",
        icon: "GitBranch",
        category: CapabilityCategory::Processing,
        is_collector: true,
    },
    CapabilityLever {
        id: "multi-backend",
        name: "Multiple Backends",
        description: "Send telemetry to more than one destination",
        impact: "Adds Gateway for centralized routing to multiple exporters",
        icon: "Share2",
        category: CapabilityCategory::Routing,
        is_collector: true,
    },
];

/// Capability lever ids, in display order.
pub fn capability_ids() -> impl Iterator<Item = &'static str> {
    CAPABILITY_LEVERS.iter().map(|l| l.id)
}

/// Capability levers of one category, in display order.
pub fn capabilities_by_category(
    category: CapabilityCategory,
) -> impl Iterator<Item = &'static CapabilityLever> {
    CAPABILITY_LEVERS
        .iter()
        .filter(move |l| l.category == category)
}

// =============================================================================
// CONSTRAINT LEVERS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstraintLever {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub impact: &'static str,
    pub icon: &'static str,
}

pub static CONSTRAINT_LEVERS: [ConstraintLever; 2] = [
    ConstraintLever {
        id: "serverless-kubernetes",
        name: "Serverless Kubernetes",
        description: "Running on Fargate, Cloud Run, or similar (no DaemonSets)",
        impact: "DaemonSet agents unavailable - must use Sidecar or Gateway-only patterns",
        icon: "Cloud",
    },
    ConstraintLever {
        id: "per-service-isolation",
        name: "Per-Service Isolation",
        description: "Each service has its own collector with custom config",
        impact: "Adds Sidecar agent per pod - higher resource overhead but better isolation",
        icon: "Box",
    },
];

// =============================================================================
// TOGGLES ON REQUIREMENTS
// =============================================================================

impl Requirements {
    /// Read a toggle by capability or constraint lever id.
    pub fn capability(&self, id: &str) -> Result<bool, StrataError> {
        let value = match id {
            "app-logs" => self.needs_app_logs,
            "app-traces" => self.needs_app_traces,
            "app-metrics" => self.needs_app_metrics,
            "infra-logs" => self.needs_infra_logs,
            "infra-metrics" => self.needs_infra_metrics,
            "central-policy" => self.needs_central_policy,
            "tail-sampling" => self.needs_tail_sampling,
            "multi-backend" => self.needs_multi_backend,
            "serverless-kubernetes" => self.serverless_kubernetes,
            "per-service-isolation" => self.needs_per_service_isolation,
            other => return Err(StrataError::UnknownCapability(other.to_string())),
        };
        Ok(value)
    }

    /// Set a toggle by capability or constraint lever id.
    pub fn set_capability(&mut self, id: &str, enabled: bool) -> Result<(), StrataError> {
        let field = match id {
            "app-logs" => &mut self.needs_app_logs,
            "app-traces" => &mut self.needs_app_traces,
            "app-metrics" => &mut self.needs_app_metrics,
            "infra-logs" => &mut self.needs_infra_logs,
            "infra-metrics" => &mut self.needs_infra_metrics,
            "central-policy" => &mut self.needs_central_policy,
            "tail-sampling" => &mut self.needs_tail_sampling,
            "multi-backend" => &mut self.needs_multi_backend,
            "serverless-kubernetes" => &mut self.serverless_kubernetes,
            "per-service-isolation" => &mut self.needs_per_service_isolation,
            other => return Err(StrataError::UnknownCapability(other.to_string())),
        };
        *field = enabled;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_lookup_falls_back_to_first() {
        assert_eq!(
            position_index(&DATA_VOLUME_LEVER, LeverValue::Number(50)),
            1
        );
        assert_eq!(
            position_index(&DATA_VOLUME_LEVER, LeverValue::Number(42)),
            0
        );
        assert_eq!(
            position_index(&DATA_LOSS_LEVER, LeverValue::Text("zero")),
            2
        );

        assert_eq!(
            value_from_index(&DATA_LOSS_LEVER, 1),
            LeverValue::Text("minimize")
        );
        assert_eq!(
            value_from_index(&DATA_VOLUME_LEVER, 7),
            LeverValue::Number(0)
        );
    }

    #[test]
    fn sliders_read_and_write_requirements() {
        let mut req = Requirements::default();

        DATA_VOLUME_LEVER.apply(&mut req, 2).expect("apply volume");
        DATA_LOSS_LEVER.apply(&mut req, 1).expect("apply policy");

        assert_eq!(req.data_volume, 100);
        assert_eq!(req.data_loss_policy, DataLossPolicy::Minimize);
        assert_eq!(DATA_LOSS_LEVER.current(&req), LeverValue::Text("minimize"));
        assert_eq!(
            position_index(&DATA_VOLUME_LEVER, DATA_VOLUME_LEVER.current(&req)),
            2
        );
    }

    #[test]
    fn every_capability_lever_maps_to_a_field() {
        let mut req = Requirements::default();
        for id in capability_ids() {
            req.set_capability(id, true).expect("known id");
            assert!(req.capability(id).expect("known id"));
            req.set_capability(id, false).expect("known id");
            assert!(!req.capability(id).expect("known id"));
        }
        for lever in &CONSTRAINT_LEVERS {
            req.set_capability(lever.id, true).expect("known id");
            assert!(req.capability(lever.id).expect("known id"));
        }
        assert!(req.serverless_kubernetes && req.needs_per_service_isolation);
    }

    #[test]
    fn unknown_capability_is_rejected() {
        let mut req = Requirements::default();
        let err = req.set_capability("multi-region", true);
        assert!(matches!(err, Err(StrataError::UnknownCapability(ref id)) if id == "multi-region"));
        assert!(req.capability("").is_err());
    }

    #[test]
    fn categories_partition_levers() {
        let total: usize = CapabilityCategory::ALL
            .iter()
            .map(|c| capabilities_by_category(*c).count())
            .sum();
        assert_eq!(total, CAPABILITY_LEVERS.len());

        let infra: Vec<_> = capabilities_by_category(CapabilityCategory::InfraCollection)
            .map(|l| l.id)
            .collect();
        assert_eq!(infra, vec!["infra-logs", "infra-metrics"]);
        assert!(
            capabilities_by_category(CapabilityCategory::AppCollection).all(|l| !l.is_collector)
        );
    }
}
