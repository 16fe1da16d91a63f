//! Tooling & Integration Layer
//!
//! Command-line entry points over the export pipeline.

pub mod cli;

pub use cli::{normalize_legacy_args, Cli, CliContext};
