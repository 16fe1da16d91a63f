//! Compartment Paths: OCI Compartment Tree Export
//!
//! Lists every compartment in an OCI tenancy, rebuilds the hierarchy from the
//! flat listing, and writes each compartment's full path and depth as CSV.

pub mod config;
pub mod error;
pub mod export;
pub mod identity;
pub mod logging;
pub mod report;
pub mod tooling;
pub mod tree;
pub mod types;
