//! Subcommands.

pub mod batch;
pub mod config;
pub mod output;
pub mod parse;

use std::path::Path;

use corretagem_core::CorretagemConfig;
use tracing::debug;

/// Load the configuration from `path`, else from the default location when
/// present, else fall back to defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<CorretagemConfig> {
    if let Some(path) = path {
        return Ok(CorretagemConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(CorretagemConfig::from_file(&default_path)?)
    } else {
        Ok(CorretagemConfig::default())
    }
}
