//! Command implementations

pub mod completions;
pub mod doctor;
pub mod generate;
pub mod list;

use std::path::Path;

use anyhow::Result;

use submake::util::config::{global_config_path, load_config, project_config_path};
use submake::{Manifest, Settings};

/// Load the configuration file, or the built-in example when none is given.
pub fn load_manifest(config: Option<&Path>) -> Result<Manifest> {
    match config {
        Some(path) => Manifest::load(path),
        None => {
            tracing::info!("no configuration given, using the built-in example");
            Ok(Manifest::example())
        }
    }
}

/// Settings from the global and project configuration files.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    let global = global_config_path();
    let config = load_config(global.as_deref(), &project_config_path(&cwd));
    Ok(config.settings())
}
