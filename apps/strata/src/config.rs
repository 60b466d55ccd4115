//! # Configuration Loading
//!
//! Requirements files (TOML or JSON), custom catalog files (TOML), and the
//! command-line overrides applied on top of them.
//!
//! Requirements files use the `snake_case` field names of [`Requirements`].
//! Missing keys take their default values; unknown keys are rejected.

use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use strata_core::{Catalog, DataLossPolicy, EnvironmentType, Layer, Requirements, StrataError};

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Maximum size of a requirements, catalog or fingerprint file (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), StrataError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| StrataError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(StrataError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve a path to an existing regular file.
pub(crate) fn validate_file_path(path: &Path) -> Result<PathBuf, StrataError> {
    let canonical = path.canonicalize().map_err(|e| {
        StrataError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(StrataError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path whose parent directory must already exist.
pub(crate) fn validate_output_path(path: &Path) -> Result<PathBuf, StrataError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        StrataError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(StrataError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| StrataError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn read_config_file(path: &Path) -> Result<String, StrataError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_CONFIG_FILE_SIZE)?;
    std::fs::read_to_string(&validated)
        .map_err(|e| StrataError::IoError(format!("Read file: {}", e)))
}

/// Read a canonical fingerprint file written by `fingerprint --export`.
pub fn read_fingerprint_file(path: &Path) -> Result<Vec<u8>, StrataError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_CONFIG_FILE_SIZE)?;
    std::fs::read(&validated).map_err(|e| StrataError::IoError(format!("Read file: {}", e)))
}

// =============================================================================
// REQUIREMENTS FILES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Parse and validate a requirements document.
pub fn parse_requirements(text: &str, format: ConfigFormat) -> Result<Requirements, StrataError> {
    let req: Requirements = match format {
        ConfigFormat::Toml => toml::from_str(text)
            .map_err(|e| StrataError::InvalidRequirements(format!("TOML: {}", e)))?,
        ConfigFormat::Json => serde_json::from_str(text)
            .map_err(|e| StrataError::InvalidRequirements(format!("JSON: {}", e)))?,
    };
    req.validate()?;
    Ok(req)
}

/// Load a requirements file, choosing the format by extension.
pub fn load_requirements(path: &Path) -> Result<Requirements, StrataError> {
    let text = read_config_file(path)?;
    parse_requirements(&text, ConfigFormat::from_path(path))
}

/// The file `strata init` writes. Parses to [`Requirements::default`].
pub const DEFAULT_REQUIREMENTS_TOML: &str = r#"# Strata requirements
#
# Every key is optional; missing keys take the values shown here.

# kubernetes | host
environment_type = "kubernetes"

# Expected throughput: 0 (<1K events/sec), 50 (1K-50K), 100 (>50K)
data_volume = 0

# Application signals
needs_app_logs = true
needs_app_traces = true
needs_app_metrics = true

# Infrastructure signals (node logs, host metrics)
needs_infra_logs = false
needs_infra_metrics = false

# Central processing and routing
needs_central_policy = false
needs_multi_backend = false
needs_tail_sampling = false

# acceptable | minimize | zero
data_loss_policy = "acceptable"

# Environment constraints (Kubernetes only)
serverless_kubernetes = false
needs_per_service_isolation = false
"#;

// =============================================================================
// CATALOG FILES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    layers: Vec<Layer>,
}

/// Parse a catalog document of `[[layers]]` tables.
pub fn parse_catalog(text: &str) -> Result<Catalog, StrataError> {
    let file: CatalogFile = toml::from_str(text)
        .map_err(|e| StrataError::SerializationError(format!("Catalog TOML: {}", e)))?;
    Catalog::from_layers(file.layers)
}

/// Load and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog, StrataError> {
    let text = read_config_file(path)?;
    parse_catalog(&text)
}

// =============================================================================
// OVERRIDES
// =============================================================================

/// Requirement overrides from the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Deployment environment (kubernetes, host)
    #[arg(long, global = true)]
    pub environment: Option<EnvironmentType>,

    /// Data volume tier signal (0-100)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: Option<u8>,

    /// Data loss policy (acceptable, minimize, zero)
    #[arg(long, global = true)]
    pub loss: Option<DataLossPolicy>,

    /// Turn a capability or constraint on (repeatable)
    #[arg(long, global = true, value_name = "CAPABILITY")]
    pub enable: Vec<String>,

    /// Turn a capability or constraint off (repeatable)
    #[arg(long, global = true, value_name = "CAPABILITY")]
    pub disable: Vec<String>,

    /// Running on serverless Kubernetes (no DaemonSets)
    #[arg(long, global = true)]
    pub serverless: bool,

    /// Require per-service collector isolation
    #[arg(long, global = true)]
    pub isolation: bool,
}

impl Overrides {
    /// Apply on top of `req`. `--disable` wins over `--enable`.
    pub fn apply(&self, req: &mut Requirements) -> Result<(), StrataError> {
        if let Some(environment) = self.environment {
            req.environment_type = environment;
        }
        if let Some(volume) = self.volume {
            req.data_volume = volume;
        }
        if let Some(loss) = self.loss {
            req.data_loss_policy = loss;
        }
        if self.serverless {
            req.serverless_kubernetes = true;
        }
        if self.isolation {
            req.needs_per_service_isolation = true;
        }
        for id in &self.enable {
            req.set_capability(id, true)?;
        }
        for id in &self.disable {
            req.set_capability(id, false)?;
        }
        req.validate()
    }
}

/// Requirements from an optional file, with overrides applied.
pub fn resolve_requirements(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<Requirements, StrataError> {
    let mut req = match path {
        Some(p) => load_requirements(p)?,
        None => Requirements::default(),
    };
    overrides.apply(&mut req)?;
    Ok(req)
}
