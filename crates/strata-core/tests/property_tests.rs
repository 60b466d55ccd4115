//! # Property-Based Tests
//!
//! Invariants that must hold for every `Requirements` value.

use proptest::prelude::*;
use std::collections::BTreeSet;
use strata_core::{
    Complexity, DataLossPolicy, EnvironmentType, NodeKind, Requirements, canonical_checksum,
    compose_architecture,
};

// =============================================================================
// STRATEGIES
// =============================================================================

fn environment() -> impl Strategy<Value = EnvironmentType> {
    prop_oneof![Just(EnvironmentType::Kubernetes), Just(EnvironmentType::Host)]
}

fn loss_policy() -> impl Strategy<Value = DataLossPolicy> {
    prop_oneof![
        Just(DataLossPolicy::Acceptable),
        Just(DataLossPolicy::Minimize),
        Just(DataLossPolicy::Zero),
    ]
}

prop_compose! {
    fn requirements()(
        environment_type in environment(),
        data_volume in 0u8..=100,
        app in any::<[bool; 3]>(),
        infra in any::<[bool; 2]>(),
        processing in any::<[bool; 3]>(),
        data_loss_policy in loss_policy(),
        constraints in any::<[bool; 2]>(),
    ) -> Requirements {
        Requirements {
            environment_type,
            data_volume,
            needs_app_logs: app[0],
            needs_app_traces: app[1],
            needs_app_metrics: app[2],
            needs_infra_logs: infra[0],
            needs_infra_metrics: infra[1],
            needs_central_policy: processing[0],
            needs_multi_backend: processing[1],
            needs_tail_sampling: processing[2],
            data_loss_policy,
            serverless_kubernetes: constraints[0],
            needs_per_service_isolation: constraints[1],
        }
    }
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Structurally equal input composes to structurally equal output.
    #[test]
    fn determinism(req in requirements()) {
        let a = compose_architecture(&req);
        let b = compose_architecture(&req.clone());
        prop_assert_eq!(canonical_checksum(&a), canonical_checksum(&b));
        prop_assert_eq!(a, b);
    }

    /// There is always at least one edge layer.
    #[test]
    fn edge_never_empty(req in requirements()) {
        prop_assert!(!compose_architecture(&req).edge.is_empty());
    }

    /// `processing_or_none` is never empty, and holds `none` exactly when
    /// nothing is active.
    #[test]
    fn processing_sentinel(req in requirements()) {
        let arch = compose_architecture(&req);
        let shown = arch.processing_or_none();
        prop_assert!(!shown.is_empty());
        prop_assert!(arch.processing.iter().all(|l| l.id != "none"));
        prop_assert_eq!(arch.processing.is_empty(), shown[0].id == "none");
    }

    /// Buffering depends on the data-loss policy and nothing else.
    #[test]
    fn buffering_determined_by_policy(req in requirements(), other in requirements()) {
        let mut twin = other;
        twin.data_loss_policy = req.data_loss_policy;

        let arch = compose_architecture(&req);
        let expected = match req.data_loss_policy {
            DataLossPolicy::Acceptable => "memory-queue",
            DataLossPolicy::Minimize => "persistent-queue",
            DataLossPolicy::Zero => "kafka-buffer",
        };
        prop_assert_eq!(&arch.buffering.id, expected);
        prop_assert_eq!(&compose_architecture(&twin).buffering.id, expected);
    }

    /// Stricter durability never lowers complexity.
    #[test]
    fn durability_monotonic(req in requirements()) {
        let rate = |policy| {
            let r = Requirements { data_loss_policy: policy, ..req.clone() };
            compose_architecture(&r).complexity
        };
        let acceptable = rate(DataLossPolicy::Acceptable);
        let minimize = rate(DataLossPolicy::Minimize);
        let zero = rate(DataLossPolicy::Zero);

        prop_assert!(acceptable <= minimize);
        prop_assert!(minimize <= zero);
        prop_assert!(zero >= Complexity::High);
    }

    /// Serverless Kubernetes never gets a DaemonSet.
    #[test]
    fn serverless_excludes_daemonset(mut req in requirements()) {
        req.environment_type = EnvironmentType::Kubernetes;
        req.serverless_kubernetes = true;
        let arch = compose_architecture(&req);
        prop_assert!(arch.edge.iter().all(|l| l.id != "daemonset-agent"));
        prop_assert_eq!(arch.edge.len(), 1);
    }

    /// One backend, reachable from the terminal of every edge layer.
    #[test]
    fn diagram_connected(req in requirements()) {
        let arch = compose_architecture(&req);
        let graph = &arch.diagram;

        prop_assert_eq!(graph.nodes_of_kind(NodeKind::Backend).count(), 1);

        let ids: BTreeSet<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        prop_assert_eq!(ids.len(), graph.nodes.len());
        for edge in &graph.edges {
            prop_assert!(ids.contains(edge.from.as_str()));
            prop_assert!(ids.contains(edge.to.as_str()));
        }

        for source in graph.sources() {
            prop_assert!(graph.reaches(&source.id, "backend"), "{} is cut off", source.id);
        }
    }

    /// The gateway and the load balancer come together.
    #[test]
    fn load_balancer_tracks_gateway(req in requirements()) {
        let arch = compose_architecture(&req);
        prop_assert_eq!(arch.needs_load_balancer, arch.has_processing("gateway-pool"));
    }

    /// Capabilities are deduplicated and agree with `provides`.
    #[test]
    fn capabilities_consistent(req in requirements()) {
        let arch = compose_architecture(&req);
        let caps = arch.capabilities();
        let unique: BTreeSet<_> = caps.iter().collect();
        prop_assert_eq!(unique.len(), caps.len());
        for cap in &caps {
            prop_assert!(arch.provides(cap));
        }
    }
}
