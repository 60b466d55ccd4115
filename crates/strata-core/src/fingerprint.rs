//! # Architecture Fingerprint
//!
//! A bit-exact `postcard` encoding of a composed architecture, reduced to
//! ids, and a checksum over it. Two structurally equal compositions always
//! produce the same bytes and the same checksum.
//!
//! Format:
//! ```text
//! [header_len: u32 LE] [CanonicalHeader (postcard)] [CanonicalArchitecture (postcard)]
//! ```

use serde::{Deserialize, Serialize};

use crate::complexity::Complexity;
use crate::composer::ComposedArchitecture;
use crate::primitives::{FORMAT_VERSION, MAGIC_BYTES, MAX_IMPORT_EDGE_COUNT, MAX_IMPORT_NODE_COUNT};
use crate::{Requirements, StrataError};

// =============================================================================
// HEADER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalHeader {
    pub magic: [u8; 4],
    pub version: u8,
    pub node_count: u64,
    pub edge_count: u64,
    pub checksum: u64,
}

impl CanonicalHeader {
    #[must_use]
    pub fn new(node_count: u64, edge_count: u64, checksum: u64) -> Self {
        Self {
            magic: *MAGIC_BYTES,
            version: FORMAT_VERSION,
            node_count,
            edge_count,
            checksum,
        }
    }

    /// Reject foreign or future formats.
    pub fn validate(&self) -> Result<(), StrataError> {
        if &self.magic != MAGIC_BYTES {
            return Err(StrataError::SerializationError(
                "Invalid fingerprint format".to_string(),
            ));
        }
        if self.version != FORMAT_VERSION {
            return Err(StrataError::SerializationError(format!(
                "Unsupported fingerprint version {}",
                self.version
            )));
        }
        Ok(())
    }
}

// =============================================================================
// CANONICAL ARCHITECTURE
// =============================================================================

/// A composed architecture reduced to ids, in composition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalArchitecture {
    pub requirements: Requirements,
    pub edge: Vec<String>,
    pub processing: Vec<String>,
    pub buffering: String,
    pub complexity: Complexity,
    pub needs_load_balancer: bool,
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl CanonicalArchitecture {
    #[must_use]
    pub fn from_architecture(arch: &ComposedArchitecture<'_>) -> Self {
        Self {
            requirements: arch.requirements.clone(),
            edge: arch.edge.iter().map(|l| l.id.clone()).collect(),
            processing: arch.processing.iter().map(|l| l.id.clone()).collect(),
            buffering: arch.buffering.id.clone(),
            complexity: arch.complexity,
            needs_load_balancer: arch.needs_load_balancer,
            nodes: arch.diagram.nodes.iter().map(|n| n.id.clone()).collect(),
            edges: arch
                .diagram
                .edges
                .iter()
                .map(|e| (e.from.clone(), e.to.clone()))
                .collect(),
        }
    }

    /// Deterministic rotate/xor checksum.
    ///
    /// Detects accidental corruption and gives a quick equality check. Not
    /// collision resistant; use the `crypto-hash` feature for that.
    #[must_use]
    pub fn checksum(&self) -> u64 {
        let req = &self.requirements;
        let flags = [
            req.needs_app_logs,
            req.needs_app_traces,
            req.needs_app_metrics,
            req.needs_infra_logs,
            req.needs_infra_metrics,
            req.needs_central_policy,
            req.needs_multi_backend,
            req.needs_tail_sampling,
            req.serverless_kubernetes,
            req.needs_per_service_isolation,
            self.needs_load_balancer,
        ];
        let bits = flags
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, f)| acc | (u64::from(*f) << i));

        let mut hash = bits.rotate_left(3);
        hash ^= u64::from(req.data_volume).rotate_left(11);
        hash = mix(hash, req.environment_type.as_str(), 7);
        hash = mix(hash, req.data_loss_policy.as_str(), 13);

        for id in &self.edge {
            hash = mix(hash, id, 17);
        }
        for id in &self.processing {
            hash = mix(hash, id, 19);
        }
        hash = mix(hash, &self.buffering, 23);
        hash ^= u64::from(self.complexity.rank()).rotate_left(29);

        for id in &self.nodes {
            hash = mix(hash, id, 31);
        }
        for (from, to) in &self.edges {
            hash = mix(hash, from, 37);
            hash = mix(hash, to, 41);
        }
        hash
    }
}

/// Fold a string into the running hash. Order sensitive.
fn mix(hash: u64, text: &str, rotation: u32) -> u64 {
    let folded = text
        .bytes()
        .fold(hash, |acc, b| acc.rotate_left(5) ^ u64::from(b));
    folded.rotate_left(rotation) ^ (text.len() as u64)
}

// =============================================================================
// EXPORT / IMPORT
// =============================================================================

/// Encode an architecture in canonical form.
pub fn export_canonical(arch: &ComposedArchitecture<'_>) -> Result<Vec<u8>, StrataError> {
    let canonical = CanonicalArchitecture::from_architecture(arch);
    let header = CanonicalHeader::new(
        canonical.nodes.len() as u64,
        canonical.edges.len() as u64,
        canonical.checksum(),
    );

    let header_bytes = postcard::to_allocvec(&header)
        .map_err(|e| StrataError::SerializationError(format!("Header: {}", e)))?;
    let data_bytes = postcard::to_allocvec(&canonical)
        .map_err(|e| StrataError::SerializationError(format!("Data: {}", e)))?;

    let mut result = Vec::with_capacity(4 + header_bytes.len() + data_bytes.len());
    result.extend_from_slice(&(header_bytes.len() as u32).to_le_bytes());
    result.extend_from_slice(&header_bytes);
    result.extend_from_slice(&data_bytes);
    Ok(result)
}

/// Decode and verify a canonical encoding.
pub fn import_canonical(data: &[u8]) -> Result<CanonicalArchitecture, StrataError> {
    let Some((len_bytes, rest)) = data.split_first_chunk::<4>() else {
        return Err(StrataError::SerializationError("Data too short".to_string()));
    };
    let header_len = u32::from_le_bytes(*len_bytes) as usize;

    let Some((header_bytes, body)) = rest.split_at_checked(header_len) else {
        return Err(StrataError::SerializationError(
            "Data too short for header".to_string(),
        ));
    };

    let header: CanonicalHeader = postcard::from_bytes(header_bytes)
        .map_err(|e| StrataError::SerializationError(format!("Header: {}", e)))?;
    header.validate()?;

    // Size limits come before the body is decoded.
    if header.node_count > MAX_IMPORT_NODE_COUNT {
        return Err(StrataError::SerializationError(format!(
            "Node count {} exceeds maximum allowed {}",
            header.node_count, MAX_IMPORT_NODE_COUNT
        )));
    }
    if header.edge_count > MAX_IMPORT_EDGE_COUNT {
        return Err(StrataError::SerializationError(format!(
            "Edge count {} exceeds maximum allowed {}",
            header.edge_count, MAX_IMPORT_EDGE_COUNT
        )));
    }

    let canonical: CanonicalArchitecture = postcard::from_bytes(body)
        .map_err(|e| StrataError::SerializationError(format!("Data: {}", e)))?;

    if canonical.nodes.len() as u64 != header.node_count {
        return Err(StrataError::SerializationError(
            "Node count mismatch".to_string(),
        ));
    }
    if canonical.edges.len() as u64 != header.edge_count {
        return Err(StrataError::SerializationError(
            "Edge count mismatch".to_string(),
        ));
    }

    let computed = canonical.checksum();
    if computed != header.checksum {
        return Err(StrataError::SerializationError(format!(
            "Checksum mismatch: expected {}, got {}",
            header.checksum, computed
        )));
    }

    Ok(canonical)
}

#[must_use]
pub fn canonical_checksum(arch: &ComposedArchitecture<'_>) -> u64 {
    CanonicalArchitecture::from_architecture(arch).checksum()
}

/// BLAKE3 hash of the canonical encoding, as 64 hex characters.
#[cfg(feature = "crypto-hash")]
pub fn canonical_crypto_hash(arch: &ComposedArchitecture<'_>) -> Result<String, StrataError> {
    let data = export_canonical(arch)?;
    Ok(blake3::hash(&data).to_hex().to_string())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::compose_architecture;
    use crate::DataLossPolicy;

    fn busy() -> Requirements {
        Requirements {
            needs_infra_logs: true,
            needs_per_service_isolation: true,
            needs_tail_sampling: true,
            data_loss_policy: DataLossPolicy::Zero,
            data_volume: 100,
            ..Requirements::default()
        }
    }

    #[test]
    fn export_import_preserves_ids() {
        let arch = compose_architecture(&busy());
        let bytes = export_canonical(&arch).expect("export");
        let imported = import_canonical(&bytes).expect("import");

        assert_eq!(imported.buffering, "kafka-buffer");
        assert_eq!(imported.complexity, Complexity::VeryHigh);
        assert_eq!(imported.nodes.len(), arch.diagram.nodes.len());
        assert_eq!(imported, CanonicalArchitecture::from_architecture(&arch));
    }

    #[test]
    fn equal_inputs_equal_fingerprints() {
        let a = compose_architecture(&busy());
        let b = compose_architecture(&busy());
        assert_eq!(canonical_checksum(&a), canonical_checksum(&b));
        assert_eq!(
            export_canonical(&a).expect("export"),
            export_canonical(&b).expect("export")
        );
    }

    #[test]
    fn different_inputs_differ() {
        let a = compose_architecture(&Requirements::default());
        let b = compose_architecture(&busy());
        assert_ne!(canonical_checksum(&a), canonical_checksum(&b));
        let imported = import_canonical(&export_canonical(&b).expect("export")).expect("import");
        assert_ne!(imported, CanonicalArchitecture::from_architecture(&a));
    }

    #[test]
    fn rejects_truncated_and_corrupted_data() {
        assert!(import_canonical(&[]).is_err());
        assert!(import_canonical(&[200, 0, 0, 0, 1]).is_err());

        let arch = compose_architecture(&busy());
        let mut bytes = export_canonical(&arch).expect("export");
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        assert!(import_canonical(&bytes).is_err());
    }

    #[test]
    fn rejects_foreign_magic() {
        let header = CanonicalHeader {
            magic: *b"OTLP",
            ..CanonicalHeader::new(0, 0, 0)
        };
        assert!(header.validate().is_err());

        let future = CanonicalHeader {
            version: FORMAT_VERSION + 1,
            ..CanonicalHeader::new(0, 0, 0)
        };
        assert!(future.validate().is_err());
    }

    #[cfg(feature = "crypto-hash")]
    #[test]
    fn crypto_hash_is_stable_hex() {
        let arch = compose_architecture(&busy());
        let first = canonical_crypto_hash(&arch).expect("hash");
        assert_eq!(first.len(), 64);
        assert_eq!(first, canonical_crypto_hash(&arch).expect("hash"));
    }
}
