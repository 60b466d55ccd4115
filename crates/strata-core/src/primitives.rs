//! # Innate Primitives
//!
//! Hardcoded constants for the Strata composition engine.
//!
//! These values are compiled into the binary and are immutable at runtime.
//! The rule tables in `composer` and `complexity` reference them by name.

// =============================================================================
// VOLUME THRESHOLDS
// =============================================================================

/// Upper bound of the `data_volume` input domain.
pub const MAX_DATA_VOLUME: u8 = 100;

/// `data_volume >= MEDIUM_VOLUME_THRESHOLD` is the medium tier and forces a gateway.
pub const MEDIUM_VOLUME_THRESHOLD: u8 = 50;

/// `data_volume >= HIGH_VOLUME_THRESHOLD` is the high tier.
pub const HIGH_VOLUME_THRESHOLD: u8 = 100;

// Tier thresholds must stay ordered inside the input domain.
const _: () = assert!(MEDIUM_VOLUME_THRESHOLD < HIGH_VOLUME_THRESHOLD);
const _: () = assert!(HIGH_VOLUME_THRESHOLD <= MAX_DATA_VOLUME);

// =============================================================================
// CATALOG LAYER IDS
// =============================================================================

pub const DIRECT_SDK: &str = "direct-sdk";
pub const DAEMONSET_AGENT: &str = "daemonset-agent";
pub const SIDECAR_AGENT: &str = "sidecar-agent";
pub const HOST_AGENT: &str = "host-agent";

/// Placeholder shown when no central processing is selected.
pub const NO_PROCESSING: &str = "none";
pub const GATEWAY_POOL: &str = "gateway-pool";
pub const SAMPLING_TIER: &str = "sampling-tier";

pub const MEMORY_QUEUE: &str = "memory-queue";
pub const PERSISTENT_QUEUE: &str = "persistent-queue";
pub const KAFKA_BUFFER: &str = "kafka-buffer";

// =============================================================================
// DIAGRAM
// =============================================================================

/// Id of the single terminal node of every composed diagram.
pub const BACKEND_NODE_ID: &str = "backend";

/// Label of the edges that enter the backend node.
pub const BACKEND_EDGE_LABEL: &str = "OTLP";

// =============================================================================
// CANONICAL FORMAT
// =============================================================================

/// Magic bytes of the canonical architecture header.
pub const MAGIC_BYTES: &[u8; 4] = b"STRA";

/// Current canonical format version.
///
/// Increment this when making breaking changes to the canonical form.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum node count accepted when importing a canonical architecture.
pub const MAX_IMPORT_NODE_COUNT: u64 = 1024;

/// Maximum edge count accepted when importing a canonical architecture.
pub const MAX_IMPORT_EDGE_COUNT: u64 = 4096;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"STRA");
    }
}
