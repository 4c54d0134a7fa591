//! CLI command implementations.

pub mod build;
pub mod init;
pub mod search;
pub mod verify;

pub use build::{build_index, BuildOverrides};
pub use init::init_project;
pub use search::{search_index, SearchCommandOptions};
pub use verify::verify_index;

use anyhow::{Context, Result};
use pagedex_core::Config;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "pagedex.yml";

/// Load an explicitly named config, or `pagedex.yml` if present, or defaults.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            tracing::info!("Loading config from {:?}", path);
            Config::from_file(path).context("Failed to load configuration")
        }
        None => Config::load_or_default(DEFAULT_CONFIG_FILE)
            .context("Failed to load configuration"),
    }
}
