//! # Composer
//!
//! Maps a [`Requirements`] record to a [`ComposedArchitecture`].
//!
//! Composition is a single synchronous pass of seven ordered stages:
//!
//! 1. Edge layer selection (environment, serverless, isolation, infra needs)
//! 2. Processing layer selection (gateway, tail sampling)
//! 3. Buffering layer selection (data-loss policy)
//! 4. Volume recommendations (gateway only)
//! 5. Complexity rating
//! 6. Diagram assembly
//! 7. Config snippet merge
//!
//! The composer is total: every `Requirements` value composes. Warnings and
//! recommendations are appended in stage order and never deduplicated.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::{Catalog, KnownLayer};
use crate::complexity::{self, Complexity, ComplexityFactors};
use crate::diagram::DiagramGraph;
use crate::primitives::{
    DAEMONSET_AGENT, GATEWAY_POOL, KAFKA_BUFFER, MEDIUM_VOLUME_THRESHOLD, MEMORY_QUEUE,
    PERSISTENT_QUEUE, SAMPLING_TIER, SIDECAR_AGENT,
};
use crate::snippets;
use crate::volume::VolumeProfile;
use crate::{ConfigSnippets, DataLossPolicy, EnvironmentType, Layer, Requirements};

// =============================================================================
// COMPOSED ARCHITECTURE
// =============================================================================

/// The result of one composition.
///
/// Layers are borrowed from the catalog the composer was built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedArchitecture<'c> {
    /// Never empty.
    pub edge: Vec<&'c Layer>,
    /// Active processing layers only; empty when no central processing is needed.
    pub processing: Vec<&'c Layer>,
    pub buffering: &'c Layer,
    pub requirements: Requirements,
    pub needs_load_balancer: bool,
    pub volume_profile: VolumeProfile,
    pub diagram: DiagramGraph,
    pub config_snippets: ConfigSnippets,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub complexity: Complexity,
    #[serde(skip)]
    no_processing: &'c Layer,
}

impl<'c> ComposedArchitecture<'c> {
    /// Processing layers for display: the active ones, or the catalog's
    /// `none` layer when there are none.
    #[must_use]
    pub fn processing_or_none(&self) -> &[&'c Layer] {
        if self.processing.is_empty() {
            std::slice::from_ref(&self.no_processing)
        } else {
            &self.processing
        }
    }

    /// Every selected layer: edge, processing (or `none`), buffering.
    pub fn layers(&self) -> impl Iterator<Item = &'c Layer> + '_ {
        self.edge
            .iter()
            .chain(self.processing_or_none())
            .copied()
            .chain(std::iter::once(self.buffering))
    }

    /// Check if an edge layer with this id was selected.
    #[must_use]
    pub fn has_edge(&self, id: &str) -> bool {
        self.edge.iter().any(|l| l.id == id)
    }

    /// Check if an active processing layer with this id was selected.
    #[must_use]
    pub fn has_processing(&self, id: &str) -> bool {
        self.processing.iter().any(|l| l.id == id)
    }

    /// One-line description, e.g.
    /// `Edge: DaemonSet Agent | Processing: Gateway Pool | Buffering: Kafka Buffer`.
    #[must_use]
    pub fn summary(&self) -> String {
        let edge = self
            .edge
            .iter()
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join(" + ");
        let mut parts = vec![format!("Edge: {}", edge)];

        if !self.processing.is_empty() {
            let processing = self
                .processing
                .iter()
                .map(|l| l.name.as_str())
                .collect::<Vec<_>>()
                .join(" → ");
            parts.push(format!("Processing: {}", processing));
        }

        // The in-memory queue is the unremarkable default.
        if self.buffering.id != MEMORY_QUEUE {
            parts.push(format!("Buffering: {}", self.buffering.name));
        }

        parts.join(" | ")
    }

    /// Check if any selected layer provides a capability.
    #[must_use]
    pub fn provides(&self, capability: &str) -> bool {
        self.layers().any(|l| l.provides_capability(capability))
    }

    /// All provided capabilities, deduplicated, in first-seen order.
    #[must_use]
    pub fn capabilities(&self) -> Vec<&'c str> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for layer in self.layers() {
            for cap in layer.provides() {
                if seen.insert(cap.as_str()) {
                    out.push(cap.as_str());
                }
            }
        }
        out
    }

    /// The presence flags the complexity table is evaluated on.
    #[must_use]
    pub fn complexity_factors(&self) -> ComplexityFactors {
        ComplexityFactors {
            gateway: self.has_processing(GATEWAY_POOL),
            sampling: self.has_processing(SAMPLING_TIER),
            kafka: self.buffering.id == KAFKA_BUFFER,
            persistent_queue: self.buffering.id == PERSISTENT_QUEUE,
            daemonset: self.has_edge(DAEMONSET_AGENT),
            sidecar: self.has_edge(SIDECAR_AGENT),
            multiple_edge: self.edge.len() > 1,
            tier: self.volume_profile.tier,
        }
    }
}

// =============================================================================
// COMPOSER
// =============================================================================

/// Composes architectures against one catalog.
#[derive(Debug, Clone, Copy)]
pub struct Composer<'c> {
    catalog: &'c Catalog,
}

impl<'c> Composer<'c> {
    #[must_use]
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Run all seven stages.
    #[must_use]
    pub fn compose(&self, requirements: &Requirements) -> ComposedArchitecture<'c> {
        let mut arch = ComposedArchitecture {
            edge: Vec::new(),
            processing: Vec::new(),
            buffering: self.layer(KnownLayer::MemoryQueue),
            requirements: requirements.clone(),
            needs_load_balancer: false,
            volume_profile: VolumeProfile::from_volume(requirements.data_volume),
            diagram: DiagramGraph::default(),
            config_snippets: ConfigSnippets::default(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
            complexity: Complexity::Low,
            no_processing: self.layer(KnownLayer::NoProcessing),
        };

        self.select_edge(requirements, &mut arch);
        self.select_processing(requirements, &mut arch);
        self.select_buffering(requirements, &mut arch);
        add_volume_recommendations(&mut arch);

        arch.complexity = complexity::assess(&arch.complexity_factors());
        arch.diagram = DiagramGraph::assemble(&arch.edge, arch.buffering, &arch.processing);
        arch.config_snippets = snippets::merge(
            arch.edge
                .iter()
                .chain(arch.processing.iter())
                .copied()
                .chain(std::iter::once(arch.buffering)),
        );

        arch
    }

    fn layer(&self, known: KnownLayer) -> &'c Layer {
        self.catalog.known(known)
    }

    // -------------------------------------------------------------------------
    // Stage 1: edge
    // -------------------------------------------------------------------------

    fn select_edge(&self, req: &Requirements, arch: &mut ComposedArchitecture<'c>) {
        let infra = req.needs_infra_collection();

        // Host environments take a standalone agent regardless of infra needs.
        if req.environment_type == EnvironmentType::Host {
            arch.edge.push(self.layer(KnownLayer::HostAgent));
            let note = if infra {
                HOST_AGENT_WITH_INFRA
            } else {
                HOST_AGENT_WITHOUT_INFRA
            };
            arch.recommendations.push(note.to_string());
            return;
        }

        if req.serverless_kubernetes {
            if infra {
                arch.warnings.push(SERVERLESS_NO_INFRA.to_string());
            }
            let known = if req.needs_per_service_isolation {
                KnownLayer::SidecarAgent
            } else {
                KnownLayer::DirectSdk
            };
            arch.edge.push(self.layer(known));
            return;
        }

        if infra {
            arch.edge.push(self.layer(KnownLayer::DaemonsetAgent));
            if req.needs_infra_logs && req.needs_infra_metrics {
                arch.recommendations.push(DAEMONSET_BOTH_SIGNALS.to_string());
            }
        }

        if req.needs_per_service_isolation {
            arch.edge.push(self.layer(KnownLayer::SidecarAgent));
            if infra {
                arch.recommendations.push(DAEMONSET_WITH_SIDECAR.to_string());
            }
        }

        if arch.edge.is_empty() {
            arch.edge.push(self.layer(KnownLayer::DirectSdk));
        }
    }

    // -------------------------------------------------------------------------
    // Stage 2: processing
    // -------------------------------------------------------------------------

    fn select_processing(&self, req: &Requirements, arch: &mut ComposedArchitecture<'c>) {
        let needs_gateway = req.needs_central_policy
            || req.needs_multi_backend
            || req.data_loss_policy != DataLossPolicy::Acceptable
            || req.data_volume >= MEDIUM_VOLUME_THRESHOLD;

        if needs_gateway {
            arch.processing.push(self.layer(KnownLayer::GatewayPool));
            arch.needs_load_balancer = true;
        }

        if req.needs_tail_sampling {
            arch.processing.push(self.layer(KnownLayer::SamplingTier));
            arch.recommendations.push(TAIL_SAMPLING_ROUTING.to_string());
            if req.needs_multi_backend {
                arch.warnings.push(SPANMETRICS_ROUTING_CONFLICT.to_string());
            }
        }
    }

    // -------------------------------------------------------------------------
    // Stage 3: buffering
    // -------------------------------------------------------------------------

    fn select_buffering(&self, req: &Requirements, arch: &mut ComposedArchitecture<'c>) {
        match req.data_loss_policy {
            DataLossPolicy::Zero => {
                arch.buffering = self.layer(KnownLayer::KafkaBuffer);
                arch.recommendations.push(KAFKA_DURABILITY.to_string());
                arch.warnings.push(KAFKA_OPERATIONS.to_string());
            }
            DataLossPolicy::Minimize => {
                arch.buffering = self.layer(KnownLayer::PersistentQueue);
                arch.recommendations.push(PERSISTENT_QUEUE_NOTE.to_string());
            }
            DataLossPolicy::Acceptable => {
                arch.buffering = self.layer(KnownLayer::MemoryQueue);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Stage 4: volume
// -----------------------------------------------------------------------------

fn add_volume_recommendations(arch: &mut ComposedArchitecture<'_>) {
    if !arch.has_processing(GATEWAY_POOL) {
        return;
    }
    let note = arch.volume_profile.tier.gateway_recommendation();
    arch.recommendations.push(note.to_string());
}

/// Compose against the built-in catalog.
#[must_use]
pub fn compose_architecture(requirements: &Requirements) -> ComposedArchitecture<'static> {
    Composer::new(Catalog::builtin()).compose(requirements)
}

// =============================================================================
// MESSAGES
// =============================================================================

const HOST_AGENT_WITH_INFRA: &str = "Host agent runs as a systemd service collecting host metrics \
    (hostmetrics receiver) and local logs (filelog receiver). Applications export to localhost:4317.";

const HOST_AGENT_WITHOUT_INFRA: &str = "A local host agent is recommended even without \
    infrastructure collection — it provides buffering, retry, and resource detection for \
    application telemetry.";

const SERVERLESS_NO_INFRA: &str = "Infrastructure collection (host metrics, disk logs) is \
    unavailable on serverless Kubernetes. DaemonSet agents cannot run on Fargate/Cloud Run. \
    Consider using cloud provider metrics instead.";

const DAEMONSET_BOTH_SIGNALS: &str = "DaemonSet agent will collect both infrastructure logs \
    (filelog receiver) and host metrics (hostmetrics receiver) from each node.";

const DAEMONSET_WITH_SIDECAR: &str = "Running both DaemonSet and Sidecar agents: DaemonSet \
    collects infrastructure telemetry, Sidecar provides per-service isolation for application \
    telemetry. Both forward to the same gateway.";

const TAIL_SAMPLING_ROUTING: &str = "Tail sampling requires the loadbalancingexporter with \
    routing_key: traceID. All spans of a trace must reach the same sampling collector.";

const SPANMETRICS_ROUTING_CONFLICT: &str = "Note: spanmetrics connector requires routing_key: \
    service, which is incompatible with tail sampling (traceID routing). Consider running \
    spanmetrics on the agent tier before sampling.";

const KAFKA_DURABILITY: &str = "Kafka provides the strongest durability guarantee. Use \
    partition_traces_by_id: true if you need tail sampling downstream. Ensure Kafka topic \
    partitions >= consumer replicas.";

const KAFKA_OPERATIONS: &str = "Kafka adds operational complexity. Ensure your team has Kafka \
    expertise or consider a managed Kafka service.";

const PERSISTENT_QUEUE_NOTE: &str = "Persistent queues (file_storage extension) survive \
    collector restarts. Requires StatefulSet with PVC in Kubernetes.";

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{DIRECT_SDK, HOST_AGENT, NO_PROCESSING};
    use crate::volume::VolumeTier;

    fn ids(layers: &[&Layer]) -> Vec<String> {
        layers.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn defaults_compose_minimal_pipeline() {
        let arch = compose_architecture(&Requirements::default());

        assert_eq!(ids(&arch.edge), vec![DIRECT_SDK]);
        assert!(arch.processing.is_empty());
        assert_eq!(ids(arch.processing_or_none()), vec![NO_PROCESSING]);
        assert_eq!(arch.buffering.id, MEMORY_QUEUE);
        assert!(!arch.needs_load_balancer);
        assert_eq!(arch.complexity, Complexity::Low);
        assert!(arch.warnings.is_empty());
        assert!(arch.recommendations.is_empty());
    }

    #[test]
    fn host_recommendation_depends_on_infra() {
        let req = Requirements {
            environment_type: EnvironmentType::Host,
            ..Requirements::default()
        };
        let arch = compose_architecture(&req);
        assert_eq!(ids(&arch.edge), vec![HOST_AGENT]);
        assert_eq!(arch.recommendations, vec![HOST_AGENT_WITHOUT_INFRA]);

        let req = Requirements {
            needs_infra_metrics: true,
            ..req
        };
        let arch = compose_architecture(&req);
        assert_eq!(arch.recommendations, vec![HOST_AGENT_WITH_INFRA]);
    }

    #[test]
    fn host_ignores_kubernetes_constraints() {
        let req = Requirements {
            environment_type: EnvironmentType::Host,
            serverless_kubernetes: true,
            needs_per_service_isolation: true,
            needs_infra_logs: true,
            ..Requirements::default()
        };
        let arch = compose_architecture(&req);
        assert_eq!(ids(&arch.edge), vec![HOST_AGENT]);
        assert!(arch.warnings.is_empty());
    }

    #[test]
    fn both_infra_signals_add_daemonset_note() {
        let req = Requirements {
            needs_infra_logs: true,
            needs_infra_metrics: true,
            ..Requirements::default()
        };
        let arch = compose_architecture(&req);
        assert_eq!(ids(&arch.edge), vec![DAEMONSET_AGENT]);
        assert_eq!(arch.recommendations, vec![DAEMONSET_BOTH_SIGNALS]);
    }

    #[test]
    fn serverless_isolation_uses_sidecar() {
        let req = Requirements {
            serverless_kubernetes: true,
            needs_per_service_isolation: true,
            ..Requirements::default()
        };
        let arch = compose_architecture(&req);
        assert_eq!(ids(&arch.edge), vec![SIDECAR_AGENT]);
        assert_eq!(arch.complexity, Complexity::Medium);
    }

    #[test]
    fn gateway_triggers() {
        let triggers = [
            Requirements {
                needs_central_policy: true,
                ..Requirements::default()
            },
            Requirements {
                needs_multi_backend: true,
                ..Requirements::default()
            },
            Requirements {
                data_loss_policy: DataLossPolicy::Minimize,
                ..Requirements::default()
            },
            Requirements {
                data_volume: 50,
                ..Requirements::default()
            },
        ];
        for req in &triggers {
            let arch = compose_architecture(req);
            assert!(arch.has_processing(GATEWAY_POOL), "{:?}", req);
            assert!(arch.needs_load_balancer);
        }

        let quiet = Requirements {
            data_volume: 49,
            ..Requirements::default()
        };
        assert!(!compose_architecture(&quiet).has_processing(GATEWAY_POOL));
    }

    #[test]
    fn sampling_without_gateway_stands_alone() {
        let req = Requirements {
            needs_tail_sampling: true,
            ..Requirements::default()
        };
        let arch = compose_architecture(&req);
        assert_eq!(ids(&arch.processing), vec![SAMPLING_TIER]);
        assert!(!arch.needs_load_balancer);
        assert_eq!(arch.recommendations, vec![TAIL_SAMPLING_ROUTING]);
        assert_eq!(arch.complexity, Complexity::High);
    }

    #[test]
    fn sampling_with_multi_backend_warns() {
        let req = Requirements {
            needs_tail_sampling: true,
            needs_multi_backend: true,
            ..Requirements::default()
        };
        let arch = compose_architecture(&req);
        assert_eq!(ids(&arch.processing), vec![GATEWAY_POOL, SAMPLING_TIER]);
        assert_eq!(arch.warnings, vec![SPANMETRICS_ROUTING_CONFLICT]);
    }

    #[test]
    fn message_order_follows_stages() {
        let req = Requirements {
            needs_tail_sampling: true,
            data_loss_policy: DataLossPolicy::Minimize,
            ..Requirements::default()
        };
        let arch = compose_architecture(&req);
        assert_eq!(
            arch.recommendations,
            vec![
                TAIL_SAMPLING_ROUTING,
                PERSISTENT_QUEUE_NOTE,
                VolumeTier::Low.gateway_recommendation(),
            ]
        );
    }

    #[test]
    fn summary_omits_defaults() {
        let arch = compose_architecture(&Requirements::default());
        assert_eq!(arch.summary(), "Edge: Direct SDK Export");

        let req = Requirements {
            needs_infra_logs: true,
            needs_per_service_isolation: true,
            needs_tail_sampling: true,
            needs_central_policy: true,
            data_loss_policy: DataLossPolicy::Zero,
            ..Requirements::default()
        };
        let arch = compose_architecture(&req);
        assert_eq!(
            arch.summary(),
            "Edge: DaemonSet Agent + Sidecar Agent | Processing: Gateway Pool → Tail Sampling Tier | Buffering: Kafka Buffer"
        );
    }

    #[test]
    fn capabilities_are_unique_and_ordered() {
        let req = Requirements {
            needs_central_policy: true,
            ..Requirements::default()
        };
        let arch = compose_architecture(&req);
        let caps = arch.capabilities();

        assert!(arch.provides("central-policy"));
        assert!(arch.provides("basic-retry"));
        assert!(!arch.provides("replay"));

        let unique: BTreeSet<_> = caps.iter().collect();
        assert_eq!(unique.len(), caps.len());

        let policy = caps.iter().position(|c| *c == "central-policy");
        let retry = caps.iter().position(|c| *c == "basic-retry");
        assert!(policy < retry);
    }

    #[test]
    fn explicit_catalog_is_used() {
        let catalog = Catalog::builtin();
        let composer = Composer::new(catalog);
        let arch = composer.compose(&Requirements::default());
        assert!(std::ptr::eq(arch.buffering, catalog.known(KnownLayer::MemoryQueue)));
    }
}
