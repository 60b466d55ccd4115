//! # Layer Catalog
//!
//! The write-once registry of pipeline layers, grouped by [`LayerType`].
//!
//! ## Invariants
//!
//! - Layer ids are unique across all three groups.
//! - Each layer sits in the group matching its own `layer_type`.
//! - Every [`KnownLayer`] the composer selects by id is present.
//!
//! These are checked once, when the catalog is built. After construction a
//! catalog is never mutated, so the composer's fixed lookups cannot fail.
//!
//! Group order is significant: it is display order, and for edge layers it
//! drives the left-to-right sequencing of the composed diagram.

mod buffering;
mod edge;
mod processing;

use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::primitives::{
    DAEMONSET_AGENT, DIRECT_SDK, GATEWAY_POOL, HOST_AGENT, KAFKA_BUFFER, MEMORY_QUEUE,
    NO_PROCESSING, PERSISTENT_QUEUE, SAMPLING_TIER, SIDECAR_AGENT,
};
use crate::{Layer, LayerType, StrataError};

// =============================================================================
// KNOWN LAYERS
// =============================================================================

/// Layers the composer selects directly by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KnownLayer {
    DirectSdk,
    DaemonsetAgent,
    SidecarAgent,
    HostAgent,
    NoProcessing,
    GatewayPool,
    SamplingTier,
    MemoryQueue,
    PersistentQueue,
    KafkaBuffer,
}

impl KnownLayer {
    pub const ALL: [KnownLayer; 10] = [
        KnownLayer::DirectSdk,
        KnownLayer::DaemonsetAgent,
        KnownLayer::SidecarAgent,
        KnownLayer::HostAgent,
        KnownLayer::NoProcessing,
        KnownLayer::GatewayPool,
        KnownLayer::SamplingTier,
        KnownLayer::MemoryQueue,
        KnownLayer::PersistentQueue,
        KnownLayer::KafkaBuffer,
    ];

    /// Catalog id of this layer.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            KnownLayer::DirectSdk => DIRECT_SDK,
            KnownLayer::DaemonsetAgent => DAEMONSET_AGENT,
            KnownLayer::SidecarAgent => SIDECAR_AGENT,
            KnownLayer::HostAgent => HOST_AGENT,
            KnownLayer::NoProcessing => NO_PROCESSING,
            KnownLayer::GatewayPool => GATEWAY_POOL,
            KnownLayer::SamplingTier => SAMPLING_TIER,
            KnownLayer::MemoryQueue => MEMORY_QUEUE,
            KnownLayer::PersistentQueue => PERSISTENT_QUEUE,
            KnownLayer::KafkaBuffer => KAFKA_BUFFER,
        }
    }

    /// The group this layer must be declared in.
    #[must_use]
    pub fn layer_type(self) -> LayerType {
        match self {
            KnownLayer::DirectSdk
            | KnownLayer::DaemonsetAgent
            | KnownLayer::SidecarAgent
            | KnownLayer::HostAgent => LayerType::Edge,
            KnownLayer::NoProcessing | KnownLayer::GatewayPool | KnownLayer::SamplingTier => {
                LayerType::Processing
            }
            KnownLayer::MemoryQueue | KnownLayer::PersistentQueue | KnownLayer::KafkaBuffer => {
                LayerType::Buffering
            }
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

static BUILTIN: LazyLock<Catalog> = LazyLock::new(build_builtin);

/// An immutable, validated set of layer definitions.
#[derive(Debug, Clone)]
pub struct Catalog {
    edge: Vec<Layer>,
    processing: Vec<Layer>,
    buffering: Vec<Layer>,
    /// Position of each [`KnownLayer`] inside its group, indexed by discriminant.
    known: [usize; 10],
}

impl Catalog {
    /// The built-in catalog, constructed on first use.
    #[must_use]
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Build a catalog from explicit groups, preserving declaration order.
    ///
    /// # Errors
    ///
    /// - `DuplicateLayer` if two layers share an id (in any groups)
    /// - `MisplacedLayer` if a layer's type does not match its group
    /// - `MissingLayer` if a [`KnownLayer`] is absent
    pub fn from_groups(
        edge: Vec<Layer>,
        processing: Vec<Layer>,
        buffering: Vec<Layer>,
    ) -> Result<Self, StrataError> {
        let mut seen = BTreeSet::new();
        for (expected, group) in [
            (LayerType::Edge, &edge),
            (LayerType::Processing, &processing),
            (LayerType::Buffering, &buffering),
        ] {
            for layer in group {
                if layer.layer_type != expected {
                    return Err(StrataError::MisplacedLayer {
                        id: layer.id.clone(),
                        expected,
                        actual: layer.layer_type,
                    });
                }
                if !seen.insert(layer.id.as_str()) {
                    return Err(StrataError::DuplicateLayer(layer.id.clone()));
                }
            }
        }

        let mut known = [0usize; 10];
        for (slot, wanted) in KnownLayer::ALL.iter().enumerate() {
            let group = match wanted.layer_type() {
                LayerType::Edge => &edge,
                LayerType::Processing => &processing,
                LayerType::Buffering => &buffering,
            };
            known[slot] = group
                .iter()
                .position(|l| l.id == wanted.id())
                .ok_or_else(|| StrataError::MissingLayer(wanted.id().to_string()))?;
        }

        Ok(Self {
            edge,
            processing,
            buffering,
            known,
        })
    }

    /// Build a catalog from a flat list, grouping by each layer's own type.
    ///
    /// Relative order within each group is preserved.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, StrataError> {
        let mut edge = Vec::new();
        let mut processing = Vec::new();
        let mut buffering = Vec::new();
        for layer in layers {
            match layer.layer_type {
                LayerType::Edge => edge.push(layer),
                LayerType::Processing => processing.push(layer),
                LayerType::Buffering => buffering.push(layer),
            }
        }
        Self::from_groups(edge, processing, buffering)
    }

    /// Look up a layer by id across all groups. First match wins.
    ///
    /// Returns `None` if no layer has this id.
    #[must_use]
    pub fn get_layer(&self, id: &str) -> Option<&Layer> {
        self.all_layers().find(|l| l.id == id)
    }

    /// The full group for a layer type, in declaration order.
    #[must_use]
    pub fn layers_by_type(&self, layer_type: LayerType) -> &[Layer] {
        match layer_type {
            LayerType::Edge => &self.edge,
            LayerType::Processing => &self.processing,
            LayerType::Buffering => &self.buffering,
        }
    }

    /// All layers: edge, then processing, then buffering.
    pub fn all_layers(&self) -> impl Iterator<Item = &Layer> {
        self.edge
            .iter()
            .chain(self.processing.iter())
            .chain(self.buffering.iter())
    }

    /// Total number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edge.len() + self.processing.len() + self.buffering.len()
    }

    /// A validated catalog always holds the known layers, so this is false in practice.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a layer the composer depends on. Infallible after validation.
    #[must_use]
    pub fn known(&self, layer: KnownLayer) -> &Layer {
        &self.layers_by_type(layer.layer_type())[self.known[layer as usize]]
    }
}

#[allow(clippy::panic)]
fn build_builtin() -> Catalog {
    match Catalog::from_groups(edge::layers(), processing::layers(), buffering::layers()) {
        Ok(catalog) => catalog,
        // Fail at first use rather than at some later lookup.
        Err(e) => panic!("built-in layer catalog is invalid: {}", e),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_complete() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 10);
        for known in KnownLayer::ALL {
            let layer = catalog.known(known);
            assert_eq!(layer.id, known.id());
            assert_eq!(layer.layer_type, known.layer_type());
        }
    }

    #[test]
    fn builtin_declaration_order() {
        let catalog = Catalog::builtin();
        let ids = |t| {
            catalog
                .layers_by_type(t)
                .iter()
                .map(|l| l.id.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(
            ids(LayerType::Edge),
            vec!["direct-sdk", "daemonset-agent", "sidecar-agent", "host-agent"]
        );
        assert_eq!(
            ids(LayerType::Processing),
            vec!["none", "gateway-pool", "sampling-tier"]
        );
        assert_eq!(
            ids(LayerType::Buffering),
            vec!["memory-queue", "persistent-queue", "kafka-buffer"]
        );
    }

    #[test]
    fn get_layer_scans_all_groups() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.get_layer("kafka-buffer").map(|l| l.layer_type),
            Some(LayerType::Buffering)
        );
        assert_eq!(
            catalog.get_layer("direct-sdk").map(|l| l.layer_type),
            Some(LayerType::Edge)
        );
        assert!(catalog.get_layer("regional-federation").is_none());
    }

    #[test]
    fn all_layers_in_group_order() {
        let catalog = Catalog::builtin();
        let types: Vec<_> = catalog.all_layers().map(|l| l.layer_type).collect();
        let mut sorted = types.clone();
        sorted.sort();
        assert_eq!(types, sorted);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut edge = edge::layers();
        edge.push(Layer::new("gateway-pool", LayerType::Edge, "Impostor"));

        let result = Catalog::from_groups(edge, processing::layers(), buffering::layers());
        assert!(matches!(result, Err(StrataError::DuplicateLayer(id)) if id == "gateway-pool"));
    }

    #[test]
    fn missing_known_layer_rejected() {
        let buffering: Vec<_> = buffering::layers()
            .into_iter()
            .filter(|l| l.id != "memory-queue")
            .collect();

        let result = Catalog::from_groups(edge::layers(), processing::layers(), buffering);
        assert!(matches!(result, Err(StrataError::MissingLayer(id)) if id == "memory-queue"));
    }

    #[test]
    fn misplaced_layer_rejected() {
        let mut processing = processing::layers();
        processing.push(Layer::new("edge-in-disguise", LayerType::Edge, "X"));

        let result = Catalog::from_groups(edge::layers(), processing, buffering::layers());
        assert!(matches!(
            result,
            Err(StrataError::MisplacedLayer {
                expected: LayerType::Processing,
                actual: LayerType::Edge,
                ..
            })
        ));
    }

    #[test]
    fn from_layers_groups_by_type() {
        let mut flat = buffering::layers();
        flat.extend(processing::layers());
        flat.extend(edge::layers());

        let catalog = Catalog::from_layers(flat).unwrap();
        assert_eq!(catalog.layers_by_type(LayerType::Edge)[0].id, "direct-sdk");
        assert_eq!(catalog.known(KnownLayer::KafkaBuffer).id, "kafka-buffer");
    }

    #[test]
    fn none_layer_is_empty_placeholder() {
        let none = Catalog::builtin().known(KnownLayer::NoProcessing);
        assert!(none.diagram_nodes.is_empty());
        assert!(none.config_snippets.is_empty());
        assert!(!none.is_compatible(&["tail-sampling"]));
    }
}
