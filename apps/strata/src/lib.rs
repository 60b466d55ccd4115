//! # Strata CLI Library
//!
//! Command-line surface over `strata-core`: argument parsing, requirements
//! and catalog files, and the command implementations. The binary in
//! `main.rs` only sets up logging and dispatches here.

pub mod cli;
pub mod config;
