//! Source composition for [`ExportConfig`](super::ExportConfig).

pub mod merge_policy;
pub mod service;
