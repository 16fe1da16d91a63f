//! Built-in defaults every builder starts from.

use crate::report::DEFAULT_OUTPUT_FILE;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with defaults; later sources override these keys.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("output", DEFAULT_OUTPUT_FILE)?
        .set_default("listing.access_level", "ANY")?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
