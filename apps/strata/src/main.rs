//! # Strata - OpenTelemetry Pipeline Composer
//!
//! Composes a collector pipeline architecture (edge collection, central
//! processing, buffering) from a set of requirements and prints it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 apps/strata (THE BINARY)                │
//! │                                                         │
//! │  ┌─────────────┐    ┌──────────────────────────────┐    │
//! │  │    CLI      │    │  Requirements / catalog      │    │
//! │  │   (clap)    │    │  files (TOML, JSON)          │    │
//! │  └──────┬──────┘    └──────────────┬───────────────┘    │
//! │         └──────────────┬───────────┘                    │
//! │                        ▼                                │
//! │                ┌───────────────┐                        │
//! │                │  strata-core  │                        │
//! │                │ (THE LOGIC)   │                        │
//! │                └───────────────┘                        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Compose with defaults
//! strata
//!
//! # Compose from a file, with overrides
//! strata -r strata.toml --volume 100 --loss zero compose
//!
//! # Gateway config only
//! strata --enable central-policy config --kind gateway
//! ```

use clap::Parser;
use std::process::ExitCode;
use strata::cli::{self, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Stdout carries command output, so the banner goes to stderr.
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    match cli::execute(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            tracing::error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr. `STRATA_LOG_FORMAT=json` enables machine-parseable output.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("STRATA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose { "strata=debug" } else { "strata=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the Strata startup banner.
fn print_banner() {
    eprintln!(
        r#"
  ███████╗████████╗██████╗  █████╗ ████████╗ █████╗
  ██╔════╝╚══██╔══╝██╔══██╗██╔══██╗╚══██╔══╝██╔══██╗
  ███████╗   ██║   ██████╔╝███████║   ██║   ███████║
  ╚════██║   ██║   ██╔══██╗██╔══██║   ██║   ██╔══██║
  ███████║   ██║   ██║  ██║██║  ██║   ██║   ██║  ██║
  ╚══════╝   ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝

  OpenTelemetry Pipeline Composer v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
