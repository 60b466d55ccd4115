//! # Composition Scenario Tests (S0-S3)
//!
//! ## Tiers
//! - S0: Reference Scenarios
//! - S1: Edge Coexistence and Constraints
//! - S2: Diagram Shape
//! - S3: Config Snippets

use strata_core::{
    Catalog, Complexity, DataLossPolicy, EnvironmentType, LayerType, NodeKind, Requirements,
    SnippetKind, VolumeTier, compose_architecture,
};

fn ids<'a>(layers: &[&'a strata_core::Layer]) -> Vec<&'a str> {
    layers.iter().map(|l| l.id.as_str()).collect()
}

// =============================================================================
// TIER S0: REFERENCE SCENARIOS
// =============================================================================

mod s0_reference {
    use super::*;

    /// S0.1: Defaults compose the simplest pipeline.
    #[test]
    fn scenario_a_defaults() {
        let arch = compose_architecture(&Requirements::default());

        assert_eq!(ids(&arch.edge), vec!["direct-sdk"]);
        assert!(arch.processing.is_empty());
        assert_eq!(ids(arch.processing_or_none()), vec!["none"]);
        assert_eq!(arch.buffering.id, "memory-queue");
        assert!(!arch.needs_load_balancer);
        assert_eq!(arch.complexity, Complexity::Low);
    }

    /// S0.2: Infra metrics bring in a DaemonSet, nothing else.
    #[test]
    fn scenario_b_infra_metrics() {
        let arch = compose_architecture(&Requirements {
            needs_infra_metrics: true,
            ..Requirements::default()
        });

        assert_eq!(ids(&arch.edge), vec!["daemonset-agent"]);
        assert!(arch.processing.is_empty());
        assert_eq!(arch.complexity, Complexity::Low);
        // Only one infra signal: no "both kinds" note.
        assert!(arch.recommendations.is_empty());
    }

    /// S0.3: High volume alone forces a gateway.
    #[test]
    fn scenario_c_high_volume() {
        let arch = compose_architecture(&Requirements {
            data_volume: 100,
            ..Requirements::default()
        });

        assert_eq!(ids(&arch.processing), vec!["gateway-pool"]);
        assert!(arch.needs_load_balancer);
        assert_eq!(arch.volume_profile.tier, VolumeTier::High);
        assert_eq!(arch.volume_profile.replicas, "5-20+");
        assert_eq!(arch.complexity, Complexity::High);
        assert_eq!(
            arch.recommendations.last().map(String::as_str),
            Some(VolumeTier::High.gateway_recommendation())
        );
    }

    /// S0.4: Zero loss with tail sampling at high volume is the heaviest build.
    #[test]
    fn scenario_d_zero_loss_sampling() {
        let arch = compose_architecture(&Requirements {
            data_loss_policy: DataLossPolicy::Zero,
            needs_tail_sampling: true,
            data_volume: 100,
            ..Requirements::default()
        });

        assert_eq!(arch.buffering.id, "kafka-buffer");
        assert_eq!(ids(&arch.processing), vec!["gateway-pool", "sampling-tier"]);
        assert_eq!(arch.complexity, Complexity::VeryHigh);
        assert_eq!(arch.warnings.len(), 1);
        assert!(arch.warnings[0].starts_with("Kafka adds operational complexity"));
    }

    /// S0.5: Serverless with infra logs warns and never uses a DaemonSet.
    #[test]
    fn scenario_e_serverless_infra() {
        let arch = compose_architecture(&Requirements {
            serverless_kubernetes: true,
            needs_infra_logs: true,
            ..Requirements::default()
        });

        assert_eq!(ids(&arch.edge), vec!["direct-sdk"]);
        assert_eq!(arch.warnings.len(), 1);
        assert!(arch.warnings[0].contains("unavailable on serverless Kubernetes"));
    }
}

// =============================================================================
// TIER S1: EDGE COEXISTENCE AND CONSTRAINTS
// =============================================================================

mod s1_edge {
    use super::*;

    /// S1.1: DaemonSet and Sidecar coexist, DaemonSet first.
    #[test]
    fn daemonset_and_sidecar_coexist() {
        let arch = compose_architecture(&Requirements {
            needs_infra_logs: true,
            needs_per_service_isolation: true,
            ..Requirements::default()
        });

        assert_eq!(ids(&arch.edge), vec!["daemonset-agent", "sidecar-agent"]);
        assert_eq!(arch.recommendations.len(), 1);
        assert!(arch.recommendations[0].starts_with("Running both DaemonSet and Sidecar"));
        assert_eq!(arch.complexity, Complexity::Medium);
    }

    /// S1.2: Isolation alone swaps direct export for a sidecar.
    #[test]
    fn isolation_without_infra() {
        let arch = compose_architecture(&Requirements {
            needs_per_service_isolation: true,
            ..Requirements::default()
        });
        assert_eq!(ids(&arch.edge), vec!["sidecar-agent"]);
        assert!(arch.recommendations.is_empty());
    }

    /// S1.3: Host environments always get exactly one host agent.
    #[test]
    fn host_gets_single_agent() {
        for infra in [false, true] {
            let arch = compose_architecture(&Requirements {
                environment_type: EnvironmentType::Host,
                needs_infra_logs: infra,
                needs_per_service_isolation: true,
                ..Requirements::default()
            });
            assert_eq!(ids(&arch.edge), vec!["host-agent"]);
        }
    }

    /// S1.4: Serverless never selects a DaemonSet, whatever else is asked.
    #[test]
    fn serverless_excludes_daemonset() {
        let arch = compose_architecture(&Requirements {
            serverless_kubernetes: true,
            needs_infra_logs: true,
            needs_infra_metrics: true,
            needs_per_service_isolation: true,
            ..Requirements::default()
        });
        assert_eq!(ids(&arch.edge), vec!["sidecar-agent"]);
    }

    /// S1.5: Every selected edge layer really is an edge layer.
    #[test]
    fn edge_layers_have_edge_type() {
        let arch = compose_architecture(&Requirements {
            needs_infra_metrics: true,
            needs_per_service_isolation: true,
            ..Requirements::default()
        });
        assert!(arch.edge.iter().all(|l| l.layer_type == LayerType::Edge));
        assert_eq!(arch.buffering.layer_type, LayerType::Buffering);
    }
}

// =============================================================================
// TIER S2: DIAGRAM SHAPE
// =============================================================================

mod s2_diagram {
    use super::*;

    /// S2.1: Edge-only architectures connect straight to the backend.
    #[test]
    fn edge_only_connects_to_backend() {
        let arch = compose_architecture(&Requirements::default());
        let graph = &arch.diagram;

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].from, "app");
        assert_eq!(graph.edges[0].to, "backend");
        assert_eq!(graph.edges[0].label.as_deref(), Some("OTLP"));
    }

    /// S2.2: Kafka sits between the edge and the gateway.
    #[test]
    fn kafka_between_edge_and_gateway() {
        let arch = compose_architecture(&Requirements {
            needs_infra_logs: true,
            needs_per_service_isolation: true,
            data_loss_policy: DataLossPolicy::Zero,
            ..Requirements::default()
        });
        let graph = &arch.diagram;

        assert!(graph.reaches("edge0-daemonset", "kafka"));
        assert!(graph.reaches("edge1-sidecar", "kafka"));
        assert_eq!(graph.successors("kafka").collect::<Vec<_>>(), vec!["lb"]);
        assert_eq!(graph.successors("gateway").collect::<Vec<_>>(), vec!["backend"]);
    }

    /// S2.3: Exactly one backend, reached from every edge terminal.
    #[test]
    fn single_backend_reached_by_all_edges() {
        let arch = compose_architecture(&Requirements {
            needs_infra_metrics: true,
            needs_per_service_isolation: true,
            needs_tail_sampling: true,
            needs_multi_backend: true,
            ..Requirements::default()
        });
        let graph = &arch.diagram;

        assert_eq!(graph.nodes_of_kind(NodeKind::Backend).count(), 1);
        for id in ["edge0-daemonset", "edge1-sidecar"] {
            assert!(graph.reaches(id, "backend"), "{} cannot reach backend", id);
        }
        let backend_inputs = graph.edges.iter().filter(|e| e.to == "backend").count();
        assert_eq!(backend_inputs, 1);
    }

    /// S2.4: The sampling tier keeps its trace-routing label.
    #[test]
    fn sampling_edge_is_labelled() {
        let arch = compose_architecture(&Requirements {
            needs_tail_sampling: true,
            ..Requirements::default()
        });
        let routed = arch
            .diagram
            .edges
            .iter()
            .find(|e| e.from == "lb-exporter" && e.to == "sampling")
            .and_then(|e| e.label.as_deref());
        assert_eq!(routed, Some("traceID\nhash"));
    }

    /// S2.5: Node ids are unique.
    #[test]
    fn node_ids_unique() {
        let arch = compose_architecture(&Requirements {
            needs_infra_logs: true,
            needs_per_service_isolation: true,
            needs_tail_sampling: true,
            data_loss_policy: DataLossPolicy::Zero,
            ..Requirements::default()
        });
        let mut ids: Vec<_> = arch.diagram.nodes.iter().map(|n| n.id.as_str()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}

// =============================================================================
// TIER S3: CONFIG SNIPPETS
// =============================================================================

mod s3_snippets {
    use super::*;

    /// S3.1: Every fragment is introduced by its layer name.
    #[test]
    fn fragments_have_headers() {
        let arch = compose_architecture(&Requirements {
            needs_infra_logs: true,
            needs_central_policy: true,
            data_loss_policy: DataLossPolicy::Minimize,
            ..Requirements::default()
        });

        let agent = arch.config_snippets.get(SnippetKind::Agent).expect("agent");
        assert!(agent.starts_with("# === DaemonSet Agent ===\n"));
        assert!(agent.contains("\n\n# === Persistent Queues ===\n"));

        let gateway = arch.config_snippets.get(SnippetKind::Gateway).expect("gateway");
        assert!(gateway.starts_with("# === Gateway Pool ===\n"));

        let deployment = arch
            .config_snippets
            .get(SnippetKind::Deployment)
            .expect("deployment");
        let daemonset = deployment.find("# === DaemonSet Agent ===");
        let gateway_pos = deployment.find("# === Gateway Pool ===");
        let queue = deployment.find("# === Persistent Queues ===");
        assert!(daemonset < gateway_pos && gateway_pos < queue);
    }

    /// S3.2: Edge-only defaults produce no gateway config.
    #[test]
    fn no_gateway_config_without_gateway() {
        let arch = compose_architecture(&Requirements::default());
        assert!(arch.config_snippets.gateway.is_none());
        assert!(arch.config_snippets.agent.is_some());
    }

    /// S3.3: The none layer never contributes.
    #[test]
    fn none_layer_contributes_nothing() {
        let none = Catalog::builtin().get_layer("none").expect("none layer");
        assert!(none.config_snippets.is_empty());
        assert!(none.diagram_nodes.is_empty());
    }
}
