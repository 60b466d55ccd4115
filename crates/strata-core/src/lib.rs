//! # strata-core
//!
//! The deterministic composition engine for Strata.
//!
//! Given a [`Requirements`] record, the engine selects layers from a small
//! write-once [`Catalog`] (edge collection, central processing, buffering)
//! and produces a [`ComposedArchitecture`]: the selected layers, a volume
//! profile, a diagram graph, merged collector config snippets, ordered
//! warnings and recommendations, and a complexity rating.
//!
//! ## Architectural Constraints
//!
//! - Pure: no I/O, no logging, no async
//! - Total: every `Requirements` value composes
//! - Deterministic: structurally equal input gives structurally equal output
//! - Closed: the built-in catalog is validated once and never mutated
//!
//! ```
//! use strata_core::{Requirements, compose_architecture};
//!
//! let arch = compose_architecture(&Requirements::default());
//! assert_eq!(arch.summary(), "Edge: Direct SDK Export");
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod complexity;
pub mod components;
pub mod composer;
pub mod diagram;
pub mod fingerprint;
pub mod levers;
pub mod primitives;
pub mod snippets;
pub mod types;
pub mod volume;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ConfigSnippets, DataLossPolicy, DiagramEdge, DiagramNode, EnvironmentType, Layer, LayerType,
    NodeKind, Requirements, Resources, SnippetKind, StrataError,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use catalog::{Catalog, KnownLayer};
pub use complexity::{Complexity, ComplexityFactors};
pub use composer::{ComposedArchitecture, Composer, compose_architecture};
pub use diagram::DiagramGraph;
pub use volume::{VolumeProfile, VolumeTier};

// =============================================================================
// RE-EXPORTS: Reference Data
// =============================================================================

pub use components::{
    ComponentConfig, ComponentDetail, ComponentId, ExternalLink, component_for_node,
};
pub use levers::{
    CAPABILITY_LEVERS, CONSTRAINT_LEVERS, CapabilityCategory, CapabilityLever, ConstraintLever,
    DATA_LOSS_LEVER, DATA_VOLUME_LEVER, LeverPosition, LeverValue, SLIDER_LEVERS,
    ThreePositionLever,
};

// =============================================================================
// RE-EXPORTS: Fingerprint
// =============================================================================

pub use fingerprint::{
    CanonicalArchitecture, CanonicalHeader, canonical_checksum, export_canonical,
    import_canonical,
};

#[cfg(feature = "crypto-hash")]
pub use fingerprint::canonical_crypto_hash;
