//! Integration tests for the compartment export pipeline

mod export_pipeline;
mod request_signing;
mod support;
