//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod filter;

pub(crate) use check::CheckArgs;
pub(crate) use filter::FilterArgs;

use std::path::Path;

use wikipub_config::{CliSettings, Config};

/// Load config, letting command-line flags override file values.
fn load_config(
    config_path: Option<&Path>,
    respect_code_fences: bool,
    filter_enabled: Option<bool>,
) -> Result<Config, wikipub_config::ConfigError> {
    let cli_settings = CliSettings {
        filter_enabled,
        respect_code_fences: respect_code_fences.then_some(true),
        ..Default::default()
    };
    let config = Config::load(config_path, Some(&cli_settings))?;
    if let Some(path) = &config.config_path {
        tracing::info!(path = %path.display(), "Loaded configuration");
    }
    Ok(config)
}
