//! # Core Type Definitions
//!
//! This module contains all core types for the Strata composition engine:
//! - Requirement inputs (`Requirements`, `EnvironmentType`, `DataLossPolicy`)
//! - Catalog entries (`Layer`, `LayerType`, `Resources`)
//! - Diagram fragments (`DiagramNode`, `DiagramEdge`, `NodeKind`)
//! - Configuration fragments (`ConfigSnippets`, `SnippetKind`)
//! - Error types (`StrataError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Are plain values; equality is structural
//! - Use closed enums for every discriminant the rule tables branch on

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::primitives::MAX_DATA_VOLUME;

// =============================================================================
// REQUIREMENT ENUMS
// =============================================================================

/// Where the instrumented workloads run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentType {
    #[default]
    Kubernetes,
    /// Bare-metal hosts or virtual machines.
    Host,
}

impl EnvironmentType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentType::Kubernetes => "kubernetes",
            EnvironmentType::Host => "host",
        }
    }
}

impl std::fmt::Display for EnvironmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EnvironmentType {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kubernetes" | "k8s" => Ok(EnvironmentType::Kubernetes),
            "host" | "vm" => Ok(EnvironmentType::Host),
            other => Err(StrataError::InvalidRequirements(format!(
                "unknown environment type '{}' (expected kubernetes or host)",
                other
            ))),
        }
    }
}

/// How much telemetry loss is tolerable.
///
/// Variants are ordered from least to most durable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum DataLossPolicy {
    /// Some loss is fine (dev/test).
    #[default]
    Acceptable,
    /// Survive collector restarts (production).
    Minimize,
    /// Survive extended backend outages (compliance/audit).
    Zero,
}

impl DataLossPolicy {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DataLossPolicy::Acceptable => "acceptable",
            DataLossPolicy::Minimize => "minimize",
            DataLossPolicy::Zero => "zero",
        }
    }
}

impl std::fmt::Display for DataLossPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DataLossPolicy {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "acceptable" => Ok(DataLossPolicy::Acceptable),
            "minimize" => Ok(DataLossPolicy::Minimize),
            "zero" => Ok(DataLossPolicy::Zero),
            other => Err(StrataError::InvalidRequirements(format!(
                "unknown data loss policy '{}' (expected acceptable, minimize or zero)",
                other
            ))),
        }
    }
}

// =============================================================================
// REQUIREMENTS
// =============================================================================

/// The full set of user-selected requirements for one composition.
///
/// A flat record of independent fields. Every field is always present;
/// partially specified inputs are completed from [`Requirements::default`]
/// at deserialization time, never inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Requirements {
    pub environment_type: EnvironmentType,
    /// Coarse throughput signal in `0..=100`. Thresholds at 50 and 100 are
    /// tier boundaries, not a continuous scale.
    pub data_volume: u8,

    pub needs_app_logs: bool,
    pub needs_app_traces: bool,
    pub needs_app_metrics: bool,

    pub needs_infra_logs: bool,
    pub needs_infra_metrics: bool,

    pub needs_central_policy: bool,
    pub needs_multi_backend: bool,
    pub needs_tail_sampling: bool,

    pub data_loss_policy: DataLossPolicy,

    /// Fargate, Cloud Run and similar: no DaemonSets.
    pub serverless_kubernetes: bool,
    pub needs_per_service_isolation: bool,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            environment_type: EnvironmentType::Kubernetes,
            data_volume: 0,
            needs_app_logs: true,
            needs_app_traces: true,
            needs_app_metrics: true,
            needs_infra_logs: false,
            needs_infra_metrics: false,
            needs_central_policy: false,
            needs_multi_backend: false,
            needs_tail_sampling: false,
            data_loss_policy: DataLossPolicy::Acceptable,
            serverless_kubernetes: false,
            needs_per_service_isolation: false,
        }
    }
}

impl Requirements {
    /// True when either infrastructure signal (node logs, host metrics) is requested.
    #[must_use]
    pub fn needs_infra_collection(&self) -> bool {
        self.needs_infra_logs || self.needs_infra_metrics
    }

    /// Check the requirements against the declared input domain.
    ///
    /// The engine accepts any value and treats volumes above the maximum as
    /// the high tier; boundaries (config files, CLI flags) call this to reject
    /// them instead.
    pub fn validate(&self) -> Result<(), StrataError> {
        if self.data_volume > MAX_DATA_VOLUME {
            return Err(StrataError::InvalidRequirements(format!(
                "data_volume {} exceeds maximum {}",
                self.data_volume, MAX_DATA_VOLUME
            )));
        }
        Ok(())
    }
}

// =============================================================================
// LAYER
// =============================================================================

/// The three groups of the layer catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    /// How telemetry enters the pipeline.
    Edge,
    /// Central processing, routing and sampling.
    Processing,
    /// Resilience and data durability.
    Buffering,
}

impl LayerType {
    /// All layer types in catalog order.
    pub const ALL: [LayerType; 3] = [LayerType::Edge, LayerType::Processing, LayerType::Buffering];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerType::Edge => "edge",
            LayerType::Processing => "processing",
            LayerType::Buffering => "buffering",
        }
    }
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LayerType {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edge" => Ok(LayerType::Edge),
            "processing" => Ok(LayerType::Processing),
            "buffering" => Ok(LayerType::Buffering),
            other => Err(StrataError::InvalidRequirements(format!(
                "unknown layer type '{}'",
                other
            ))),
        }
    }
}

/// Semantic type of a diagram node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    App,
    Agent,
    Gateway,
    #[serde(rename = "loadbalancer")]
    LoadBalancer,
    Kafka,
    Backend,
    Sidecar,
}

impl NodeKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::App => "app",
            NodeKind::Agent => "agent",
            NodeKind::Gateway => "gateway",
            NodeKind::LoadBalancer => "loadbalancer",
            NodeKind::Kafka => "kafka",
            NodeKind::Backend => "backend",
            NodeKind::Sidecar => "sidecar",
        }
    }
}

/// A node of a layer's diagram fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
}

impl DiagramNode {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
        }
    }
}

/// A directed edge of a diagram fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl DiagramEdge {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
        }
    }

    #[must_use]
    pub fn labeled(from: impl Into<String>, to: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: Some(label.into()),
        }
    }
}

/// The three kinds of configuration text a layer may contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnippetKind {
    /// Agent-side collector or SDK configuration.
    Agent,
    /// Gateway-side collector configuration.
    Gateway,
    /// Deployment manifest (Kubernetes objects or a systemd unit).
    Deployment,
}

impl SnippetKind {
    pub const ALL: [SnippetKind; 3] = [SnippetKind::Agent, SnippetKind::Gateway, SnippetKind::Deployment];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SnippetKind::Agent => "agent",
            SnippetKind::Gateway => "gateway",
            SnippetKind::Deployment => "deployment",
        }
    }
}

impl std::str::FromStr for SnippetKind {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agent" => Ok(SnippetKind::Agent),
            "gateway" => Ok(SnippetKind::Gateway),
            "deployment" | "kubernetes" => Ok(SnippetKind::Deployment),
            other => Err(StrataError::InvalidRequirements(format!(
                "unknown snippet kind '{}' (expected agent, gateway or deployment)",
                other
            ))),
        }
    }
}

/// Opaque configuration text blocks, keyed by kind.
///
/// The engine never parses or validates the contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSnippets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(alias = "kubernetes", skip_serializing_if = "Option::is_none")]
    pub deployment: Option<String>,
}

impl ConfigSnippets {
    /// Get the snippet of the given kind.
    #[must_use]
    pub fn get(&self, kind: SnippetKind) -> Option<&str> {
        match kind {
            SnippetKind::Agent => self.agent.as_deref(),
            SnippetKind::Gateway => self.gateway.as_deref(),
            SnippetKind::Deployment => self.deployment.as_deref(),
        }
    }

    /// Check if no snippet of any kind is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        SnippetKind::ALL.iter().all(|k| self.get(*k).is_none())
    }
}

/// Resource sizing hint. Display only; never used by the rule tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub cpu: String,
    pub memory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
}

/// A reusable building block of a telemetry pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    /// Capability tags that must be satisfied externally.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Capability tags this layer grants.
    #[serde(default)]
    pub provides: Vec<String>,
    /// Capability tags that must not be present elsewhere.
    #[serde(default)]
    pub incompatible_with: Vec<String>,
    #[serde(default)]
    pub diagram_nodes: Vec<DiagramNode>,
    #[serde(default)]
    pub diagram_edges: Vec<DiagramEdge>,
    #[serde(default)]
    pub config_snippets: ConfigSnippets,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
}

impl Layer {
    /// Start a layer with an id, type and display name. Everything else is empty.
    #[must_use]
    pub fn new(id: impl Into<String>, layer_type: LayerType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layer_type,
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            requires: Vec::new(),
            provides: Vec::new(),
            incompatible_with: Vec::new(),
            diagram_nodes: Vec::new(),
            diagram_edges: Vec::new(),
            config_snippets: ConfigSnippets::default(),
            resources: None,
        }
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>, icon: impl Into<String>) -> Self {
        self.description = description.into();
        self.icon = icon.into();
        self
    }

    #[must_use]
    pub fn requiring(mut self, tags: &[&str]) -> Self {
        self.requires = tags.iter().map(|t| (*t).to_string()).collect();
        self
    }

    #[must_use]
    pub fn providing(mut self, tags: &[&str]) -> Self {
        self.provides = tags.iter().map(|t| (*t).to_string()).collect();
        self
    }

    #[must_use]
    pub fn incompatible(mut self, tags: &[&str]) -> Self {
        self.incompatible_with = tags.iter().map(|t| (*t).to_string()).collect();
        self
    }

    #[must_use]
    pub fn node(mut self, id: &str, kind: NodeKind, label: &str) -> Self {
        self.diagram_nodes.push(DiagramNode::new(id, kind, label));
        self
    }

    #[must_use]
    pub fn edge(mut self, from: &str, to: &str, label: Option<&str>) -> Self {
        self.diagram_edges.push(DiagramEdge {
            from: from.to_string(),
            to: to.to_string(),
            label: label.map(str::to_string),
        });
        self
    }

    #[must_use]
    pub fn snippet(mut self, kind: SnippetKind, text: &str) -> Self {
        let slot = match kind {
            SnippetKind::Agent => &mut self.config_snippets.agent,
            SnippetKind::Gateway => &mut self.config_snippets.gateway,
            SnippetKind::Deployment => &mut self.config_snippets.deployment,
        };
        *slot = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn sized(mut self, cpu: &str, memory: &str, replicas: Option<u32>) -> Self {
        self.resources = Some(Resources {
            cpu: cpu.to_string(),
            memory: memory.to_string(),
            replicas,
        });
        self
    }

    /// Capability tags this layer needs from its surroundings.
    #[must_use]
    pub fn requires(&self) -> &[String] {
        &self.requires
    }

    /// Capability tags this layer grants.
    #[must_use]
    pub fn provides(&self) -> &[String] {
        &self.provides
    }

    /// Check if a single capability is granted.
    #[must_use]
    pub fn provides_capability(&self, capability: &str) -> bool {
        self.provides.iter().any(|p| p == capability)
    }

    /// A layer is compatible unless one of its `incompatible_with` tags
    /// appears among the given constraints.
    #[must_use]
    pub fn is_compatible<S: AsRef<str>>(&self, constraints: &[S]) -> bool {
        !self
            .incompatible_with
            .iter()
            .any(|inc| constraints.iter().any(|c| c.as_ref() == inc))
    }

    /// The last node of the diagram fragment, where downstream layers attach.
    #[must_use]
    pub fn terminal_node(&self) -> Option<&DiagramNode> {
        self.diagram_nodes.last()
    }

    /// The first node of the diagram fragment, where upstream layers attach.
    #[must_use]
    pub fn entry_node(&self) -> Option<&DiagramNode> {
        self.diagram_nodes.first()
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Strata system.
///
/// Composition itself is total; these arise only at the boundaries
/// (catalog construction, input validation, encoding, file I/O).
#[derive(Debug, Error)]
pub enum StrataError {
    /// Two catalog entries share an id.
    #[error("Duplicate layer id: {0}")]
    DuplicateLayer(String),

    /// A layer the composer selects by id is absent from the catalog.
    #[error("Missing required layer: {0}")]
    MissingLayer(String),

    /// A layer is declared in a group other than its own type.
    #[error("Layer {id} is declared as {actual} but placed in the {expected} group")]
    MisplacedLayer {
        id: String,
        expected: LayerType,
        actual: LayerType,
    },

    /// The requirements fall outside the declared input domain.
    #[error("Invalid requirements: {0}")]
    InvalidRequirements(String),

    /// A capability toggle id does not name any requirement flag.
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requirements_collect_app_signals_only() {
        let req = Requirements::default();
        assert!(req.needs_app_logs && req.needs_app_traces && req.needs_app_metrics);
        assert!(!req.needs_infra_collection());
        assert_eq!(req.environment_type, EnvironmentType::Kubernetes);
        assert_eq!(req.data_loss_policy, DataLossPolicy::Acceptable);
    }

    #[test]
    fn validate_rejects_volume_above_maximum() {
        let req = Requirements {
            data_volume: 101,
            ..Requirements::default()
        };
        assert!(matches!(
            req.validate(),
            Err(StrataError::InvalidRequirements(_))
        ));

        let req = Requirements {
            data_volume: 100,
            ..Requirements::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn data_loss_policy_ordering() {
        assert!(DataLossPolicy::Acceptable < DataLossPolicy::Minimize);
        assert!(DataLossPolicy::Minimize < DataLossPolicy::Zero);
    }

    #[test]
    fn enum_parsing() {
        assert_eq!("host".parse::<EnvironmentType>().ok(), Some(EnvironmentType::Host));
        assert_eq!("zero".parse::<DataLossPolicy>().ok(), Some(DataLossPolicy::Zero));
        assert_eq!(
            "kubernetes".parse::<SnippetKind>().ok(),
            Some(SnippetKind::Deployment)
        );
        assert!("lambda".parse::<EnvironmentType>().is_err());
    }

    #[test]
    fn layer_compatibility() {
        let layer = Layer::new("none", LayerType::Processing, "No Central Processing")
            .incompatible(&["tail-sampling", "multi-backend"]);

        assert!(layer.is_compatible(&["central-policy"]));
        assert!(!layer.is_compatible(&["multi-backend"]));
        assert!(layer.is_compatible::<&str>(&[]));
    }

    #[test]
    fn config_snippets_lookup() {
        let layer = Layer::new("x", LayerType::Edge, "X").snippet(SnippetKind::Gateway, "g");
        assert_eq!(layer.config_snippets.get(SnippetKind::Gateway), Some("g"));
        assert_eq!(layer.config_snippets.get(SnippetKind::Agent), None);
        assert!(!layer.config_snippets.is_empty());
        assert!(ConfigSnippets::default().is_empty());
    }

    #[test]
    fn layer_builder_tracks_fragment_ends() {
        let layer = Layer::new("daemonset-agent", LayerType::Edge, "DaemonSet Agent")
            .node("app", NodeKind::App, "Application")
            .node("daemonset", NodeKind::Agent, "DaemonSet\nAgent")
            .edge("app", "daemonset", Some("localhost"));

        assert_eq!(layer.entry_node().map(|n| n.id.as_str()), Some("app"));
        assert_eq!(layer.terminal_node().map(|n| n.id.as_str()), Some("daemonset"));
        assert_eq!(layer.diagram_edges[0].label.as_deref(), Some("localhost"));
        assert_eq!(NodeKind::LoadBalancer.as_str(), "loadbalancer");
    }
}
