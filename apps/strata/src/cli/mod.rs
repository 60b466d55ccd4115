//! # Strata CLI Module
//!
//! ## Available Commands
//!
//! - `compose` - Compose and describe an architecture (default)
//! - `diagram` - Show the diagram graph
//! - `config` - Show merged collector config snippets
//! - `layers` - List the layer catalog
//! - `levers` - Show decision levers and their current positions
//! - `capabilities` - List or check provided capabilities
//! - `components` - Reference entries for the OpenTelemetry components
//! - `fingerprint` - Canonical checksum and BLAKE3 hash, export and verify
//! - `init` - Write a default requirements file

mod commands;

use crate::config::{self, Overrides};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use strata_core::{
    Catalog, ComponentId, ComposedArchitecture, Composer, LayerType, Requirements, SnippetKind,
    StrataError,
};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Strata - OpenTelemetry pipeline composer
///
/// Composes a collector pipeline architecture from your requirements.
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Requirements file (TOML, or JSON by extension)
    #[arg(short = 'r', long, global = true)]
    pub requirements: Option<PathBuf>,

    /// Layer catalog file (TOML) replacing the built-in catalog
    #[arg(short = 'c', long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: Overrides,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose an architecture and describe it
    Compose,

    /// Show the diagram nodes and edges
    Diagram,

    /// Show merged collector configuration
    Config {
        /// Only this kind (agent, gateway, deployment)
        #[arg(short, long)]
        kind: Option<SnippetKind>,
    },

    /// List the layer catalog
    Layers {
        /// Only this group (edge, processing, buffering)
        #[arg(short = 't', long = "type")]
        layer_type: Option<LayerType>,
    },

    /// Show decision levers and their current positions
    Levers,

    /// List capabilities of the composed architecture
    Capabilities {
        /// Exit with status 1 unless this capability is provided
        #[arg(long)]
        check: Option<String>,
    },

    /// Describe the OpenTelemetry components behind the diagram nodes
    Components {
        /// Show this component in full (e.g. tail-sampling)
        id: Option<ComponentId>,
    },

    /// Compute the architecture fingerprint
    Fingerprint {
        /// Write the canonical encoding to this file
        #[arg(short, long, conflicts_with = "verify")]
        export: Option<PathBuf>,

        /// Compare a previously exported encoding with the current composition
        #[arg(long)]
        verify: Option<PathBuf>,
    },

    /// Write a default requirements file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,

        /// Output file path
        #[arg(short, long, default_value = "strata.toml")]
        output: PathBuf,
    },
}

// =============================================================================
// COMMAND CONTEXT
// =============================================================================

/// How a command that ran without error ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The thing asked for is not there (`capabilities --check`, `config --kind`),
    /// or a verified fingerprint does not match.
    Absent,
}

impl Outcome {
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::Absent => ExitCode::FAILURE,
        }
    }
}

/// Inputs shared by every composing command.
#[derive(Debug)]
pub struct Context {
    pub requirements: Requirements,
    pub json_mode: bool,
    pub verbose: bool,
    custom_catalog: Option<Catalog>,
}

impl Context {
    /// Load requirements and catalog, apply overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self, StrataError> {
        let requirements =
            config::resolve_requirements(cli.requirements.as_deref(), &cli.overrides)?;
        tracing::debug!(?requirements, "resolved requirements");

        let custom_catalog = match &cli.catalog {
            Some(path) => {
                let catalog = config::load_catalog(path)?;
                tracing::debug!(path = %path.display(), layers = catalog.len(), "loaded catalog");
                Some(catalog)
            }
            None => None,
        };

        Ok(Self {
            requirements,
            json_mode: cli.json_mode,
            verbose: cli.verbose,
            custom_catalog,
        })
    }

    // A closure, so the 'static builtin reference can shorten to the borrow of self.
    #[allow(clippy::redundant_closure)]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        self.custom_catalog
            .as_ref()
            .unwrap_or_else(|| Catalog::builtin())
    }

    /// Compose the resolved requirements and log the outcome.
    #[must_use]
    pub fn compose(&self) -> ComposedArchitecture<'_> {
        let arch = Composer::new(self.catalog()).compose(&self.requirements);
        tracing::info!(
            edge = ?arch.edge.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            processing = ?arch.processing.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            buffering = %arch.buffering.id,
            complexity = %arch.complexity,
            "composed architecture"
        );
        arch
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<Outcome, StrataError> {
    // Init needs neither requirements nor a catalog, so the context is built lazily.
    let ctx = || Context::from_cli(&cli);

    match &cli.command {
        Some(Commands::Compose) | None => cmd_compose(&ctx()?),
        Some(Commands::Diagram) => cmd_diagram(&ctx()?),
        Some(Commands::Config { kind }) => cmd_config(&ctx()?, *kind),
        Some(Commands::Layers { layer_type }) => cmd_layers(&ctx()?, *layer_type),
        Some(Commands::Levers) => cmd_levers(&ctx()?),
        Some(Commands::Capabilities { check }) => cmd_capabilities(&ctx()?, check.as_deref()),
        Some(Commands::Components { id }) => cmd_components(*id, cli.json_mode, cli.verbose),
        Some(Commands::Fingerprint { export, verify }) => {
            cmd_fingerprint(&ctx()?, export.as_deref(), verify.as_deref())
        }
        Some(Commands::Init { force, output }) => cmd_init(output, *force),
    }
}
