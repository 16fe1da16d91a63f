//! CLI Tooling
//!
//! Command-line interface for the compartment export. Flags are folded over the
//! layered configuration, then a single export runs to completion.

use crate::config::{ConfigLoader, ExportConfig};
use crate::error::ApiError;
use crate::export::{ExportRequest, ExportService};
use crate::identity::client::default_endpoint;
use crate::identity::profile::{resolve_config_path, resolve_profile_name};
use crate::identity::{CompartmentSource, IdentityClient, ListOptions, OciProfile, RequestSigner};
use crate::logging::LoggingConfig;
use crate::report::format_export_summary;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Export every compartment in an OCI tenancy with its full path and depth
#[derive(Parser, Debug)]
#[command(name = "oci-compartment-paths")]
#[command(about = "Export OCI compartment paths and levels as CSV")]
pub struct Cli {
    /// OCID of the compartment whose subtree to export (default: whole tenancy)
    #[arg(long)]
    pub root: Option<String>,

    /// Output CSV file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// OCI config file (default: OCI_CONFIG_FILE or ~/.oci/config)
    #[arg(long)]
    pub oci_config: Option<PathBuf>,

    /// Profile in the OCI config file (default: OCI_CLI_PROFILE or DEFAULT)
    #[arg(long)]
    pub profile: Option<String>,

    /// Region override for the identity endpoint
    #[arg(long)]
    pub region: Option<String>,

    /// Page size for ListCompartments requests
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Enable verbose logging (same as --log-level debug)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parse process arguments, accepting single-dash long flags such as `-root`.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_legacy_args(std::env::args_os()))
    }

    /// Fold flags that override plain config values into `config`.
    pub fn apply_overrides(&self, config: &mut ExportConfig) {
        if let Some(root) = &self.root {
            config.root = Some(root.clone());
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(region) = &self.region {
            config.oci.region = Some(region.clone());
        }
        if let Some(page_size) = self.page_size {
            config.listing.page_size = Some(page_size);
        }
        self.apply_logging_overrides(&mut config.logging);
    }

    fn apply_logging_overrides(&self, logging: &mut LoggingConfig) {
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

/// Rewrite single-dash long flags (`-root x`, `-root=x`) to their `--` form.
///
/// Short flags and values are left untouched; the first element is the program name.
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Cli::command();
    let longs: Vec<&str> = command
        .get_arguments()
        .filter_map(|arg| arg.get_long())
        .collect();

    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or_default();
                    if name.len() > 1 && longs.contains(&name) {
                        OsString::from(format!("-{}", text))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

/// CLI context: resolved configuration plus credential selection flags
pub struct CliContext {
    config: ExportConfig,
    oci_config: Option<PathBuf>,
    profile: Option<String>,
}

impl CliContext {
    /// Load layered config, then the logging env variables, then the command-line flags.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        crate::logging::apply_env_overrides(&mut config.logging);
        cli.apply_overrides(&mut config);
        config.validate()?;
        Ok(Self {
            config,
            oci_config: cli.oci_config.clone(),
            profile: cli.profile.clone(),
        })
    }

    /// Wrap an already-resolved configuration.
    pub fn from_config(config: ExportConfig) -> Self {
        Self {
            config,
            oci_config: None,
            profile: None,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn init_logging(&self) -> Result<(), ApiError> {
        crate::logging::init_logging(Some(&self.config.logging))
    }

    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            output: self.config.output.clone(),
            root: self.config.root.clone(),
        }
    }

    /// Load the OCI profile and key, then build a signed identity client.
    ///
    /// A profile without a tenancy id is a fatal credential error.
    pub fn build_client(&self) -> Result<IdentityClient, ApiError> {
        let config_path =
            resolve_config_path(self.oci_config.clone(), self.config.oci.config_file.clone())?;
        let profile_name =
            resolve_profile_name(self.profile.clone(), self.config.oci.profile.clone());
        let mut profile = OciProfile::load(&config_path, &profile_name)?;
        if let Some(region) = &self.config.oci.region {
            profile.region = region.clone();
        }

        let endpoint = self
            .config
            .oci
            .endpoint
            .clone()
            .unwrap_or_else(|| default_endpoint(&profile.region));
        info!(
            profile = %profile.name,
            region = %profile.region,
            endpoint = %endpoint,
            "Using OCI credentials from {}",
            config_path.display()
        );

        let signer = RequestSigner::from_profile(&profile)?;
        IdentityClient::new(
            endpoint,
            profile.tenancy.clone(),
            signer,
            ListOptions {
                access_level: self.config.listing.access_level,
                limit: self.config.listing.page_size,
            },
        )
    }

    /// Run the export against the real identity service.
    pub fn execute(&self) -> Result<String, ApiError> {
        let client = self.build_client()?;
        self.execute_with(&client)
    }

    /// Run the export against any compartment source and return the user-facing summary.
    pub fn execute_with(&self, source: &dyn CompartmentSource) -> Result<String, ApiError> {
        let started = Instant::now();
        let request = self.export_request();
        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
        let summary = rt.block_on(ExportService::run(source, &request))?;
        info!(
            rows = summary.rows,
            duration_ms = started.elapsed().as_millis() as u64,
            "Export finished"
        );
        Ok(format_export_summary(&summary))
    }
}
