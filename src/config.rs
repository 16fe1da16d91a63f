//! Configuration
//!
//! Tool settings layered from defaults, the global config file, an explicit
//! `--config` file and `COMPARTMENT_PATHS__*` environment variables. CLI flags
//! are applied on top by the CLI layer.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::identity::AccessLevel;
use crate::logging::LoggingConfig;
use crate::report::DEFAULT_OUTPUT_FILE;
use serde::Deserialize;
use std::path::PathBuf;

/// Directory and application name under the XDG config home
pub const APP_NAME: &str = "oci-compartment-paths";

/// Environment prefix for config overrides (`COMPARTMENT_PATHS__OCI__PROFILE`)
pub const ENV_PREFIX: &str = "COMPARTMENT_PATHS";

/// Top-level tool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// CSV output file
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Restrict the export to the subtree rooted at this compartment
    #[serde(default)]
    pub root: Option<String>,

    #[serde(default)]
    pub oci: OciSettings,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where to find OCI credentials and which endpoint to call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OciSettings {
    /// OCI config file; None means OCI_CONFIG_FILE or ~/.oci/config
    #[serde(default)]
    pub config_file: Option<PathBuf>,

    /// Profile section; None means OCI_CLI_PROFILE or DEFAULT
    #[serde(default)]
    pub profile: Option<String>,

    /// Overrides the profile's region
    #[serde(default)]
    pub region: Option<String>,

    /// Overrides the identity endpoint derived from the region
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// ListCompartments query settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingConfig {
    #[serde(default)]
    pub page_size: Option<u32>,

    #[serde(default)]
    pub access_level: AccessLevel,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            root: None,
            oci: OciSettings::default(),
            listing: ListingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ExportConfig {
    /// Reject settings that would only fail later, mid-run.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.output.as_os_str().is_empty() {
            return Err(ApiError::ConfigError(
                "Output path cannot be empty".to_string(),
            ));
        }
        if self.listing.page_size == Some(0) {
            return Err(ApiError::ConfigError(
                "listing.page_size must be positive".to_string(),
            ));
        }
        if let Some(endpoint) = &self.oci.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ApiError::ConfigError(format!(
                    "Invalid identity endpoint URL: {}",
                    endpoint
                )));
            }
        }
        Ok(())
    }
}
