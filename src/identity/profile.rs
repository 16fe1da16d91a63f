//! OCI config file profiles.
//!
//! Reads the INI-style file shared with the OCI CLI and SDKs. A named profile
//! inherits any key it does not set from `[DEFAULT]`.

use crate::error::ApiError;
use config::{Config, File, FileFormat};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Profile used when none is requested
pub const DEFAULT_PROFILE: &str = "DEFAULT";

const CONFIG_FILE_ENV: &str = "OCI_CONFIG_FILE";
const PROFILE_ENV: &str = "OCI_CLI_PROFILE";

/// Credentials and placement read from one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OciProfile {
    pub name: String,
    pub user: String,
    pub fingerprint: String,
    pub key_file: PathBuf,
    pub tenancy: String,
    pub region: String,
    pub pass_phrase: Option<String>,
}

impl OciProfile {
    /// Key id used in request signatures: `tenancy/user/fingerprint`.
    pub fn key_id(&self) -> String {
        format!("{}/{}/{}", self.tenancy, self.user, self.fingerprint)
    }

    /// Load `profile` from the OCI config file at `path`.
    pub fn load(path: &Path, profile: &str) -> Result<Self, ApiError> {
        if !path.exists() {
            return Err(ApiError::CredentialError(format!(
                "OCI config file not found: {}",
                path.display()
            )));
        }

        let sections: HashMap<String, HashMap<String, String>> = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini).required(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                ApiError::CredentialError(format!(
                    "Failed to parse OCI config {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let merged = merge_with_default(&sections, profile).ok_or_else(|| {
            ApiError::CredentialError(format!(
                "Profile '{}' not found in {}",
                profile,
                path.display()
            ))
        })?;

        let require = |key: &str| -> Result<String, ApiError> {
            merged
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| {
                    ApiError::CredentialError(format!(
                        "Profile '{}' in {} is missing '{}'",
                        profile,
                        path.display(),
                        key
                    ))
                })
        };

        Ok(Self {
            name: profile.to_string(),
            user: require("user")?,
            fingerprint: require("fingerprint")?,
            key_file: expand_home(&require("key_file")?),
            tenancy: require("tenancy")?,
            region: require("region")?,
            pass_phrase: merged
                .get("pass_phrase")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

/// Section lookup is case-insensitive; keys are lowercased.
fn find_section<'a>(
    sections: &'a HashMap<String, HashMap<String, String>>,
    name: &str,
) -> Option<&'a HashMap<String, String>> {
    sections
        .iter()
        .find(|(section, _)| section.eq_ignore_ascii_case(name))
        .map(|(_, values)| values)
}

fn merge_with_default(
    sections: &HashMap<String, HashMap<String, String>>,
    profile: &str,
) -> Option<HashMap<String, String>> {
    let selected = find_section(sections, profile)?;
    let mut merged: HashMap<String, String> = HashMap::new();
    if let Some(defaults) = find_section(sections, DEFAULT_PROFILE) {
        for (key, value) in defaults {
            merged.insert(key.to_ascii_lowercase(), value.clone());
        }
    }
    for (key, value) in selected {
        merged.insert(key.to_ascii_lowercase(), value.clone());
    }
    Some(merged)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let home = || directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
    if raw == "~" {
        if let Some(home) = home() {
            return home;
        }
    } else if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = home() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// `~/.oci/config`
pub fn default_config_path() -> Result<PathBuf, ApiError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".oci").join("config"))
        .ok_or_else(|| {
            ApiError::ConfigError("Could not determine home directory for OCI config".to_string())
        })
}

/// Resolve the OCI config file path with precedence: CLI, OCI_CONFIG_FILE env, config file, default.
///
/// A leading `~` is expanded in every source.
pub fn resolve_config_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    resolve_config_path_with(cli_file, std::env::var(CONFIG_FILE_ENV).ok(), config_file)
}

fn resolve_config_path_with(
    cli_file: Option<PathBuf>,
    env_file: Option<String>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, ApiError> {
    let candidate = cli_file
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| env_file.filter(|p| !p.is_empty()).map(PathBuf::from))
        .or_else(|| config_file.filter(|p| !p.as_os_str().is_empty()));
    match candidate {
        Some(path) => Ok(expand_home_path(path)),
        None => default_config_path(),
    }
}

fn expand_home_path(path: PathBuf) -> PathBuf {
    match path.to_str() {
        Some(raw) => expand_home(raw),
        None => path,
    }
}

/// Resolve the profile name with precedence: CLI, OCI_CLI_PROFILE env, config file, `DEFAULT`.
pub fn resolve_profile_name(cli_profile: Option<String>, config_profile: Option<String>) -> String {
    if let Some(p) = cli_profile.filter(|p| !p.is_empty()) {
        return p;
    }
    if let Ok(env_profile) = std::env::var(PROFILE_ENV) {
        if !env_profile.is_empty() {
            return env_profile;
        }
    }
    config_profile
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}
