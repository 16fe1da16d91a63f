//! Global config file source: $XDG_CONFIG_HOME/oci-compartment-paths/config.toml

use crate::config::paths::xdg_root;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

/// Add the global config file to builder if the config home can be determined.
/// A missing file is not an error.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match xdg_root::global_config_path() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Global config file candidate");
            Ok(builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            ))
        }
        Err(_) => Ok(builder),
    }
}
