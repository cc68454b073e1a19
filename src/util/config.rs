//! Configuration file support for submake.
//!
//! submake supports two configuration file locations:
//! - Global: `~/.submake/config.toml` - User-wide defaults
//! - Project: `.submake/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [install]
//! system_prefix = "/opt/deps"
//! elevate = "doas"
//!
//! [build]
//! fallback_jobs = 8
//!
//! [packages]
//! update = "sudo dnf check-update"
//! install = "sudo dnf install -y"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default install prefix for system-wide installs.
pub const DEFAULT_SYSTEM_PREFIX: &str = "/usr/local";

/// Default install prefix for local installs, relative to the Makefile.
pub const DEFAULT_LOCAL_PREFIX: &str = "$(CURDIR)/install";

/// Parallel job count used when `nproc` is unavailable.
pub const DEFAULT_FALLBACK_JOBS: u32 = 4;

/// submake configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Install prefixes and privilege elevation
    pub install: InstallConfig,

    /// Build settings
    pub build: BuildConfig,

    /// Build-dependency package installation
    pub packages: PackagesConfig,
}

/// Install-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    /// Prefix for system and dev installs (default `/usr/local`)
    pub system_prefix: Option<String>,

    /// Prefix for local installs (default `$(CURDIR)/install`)
    pub local_prefix: Option<String>,

    /// Command used to elevate system installs (default `sudo`)
    pub elevate: Option<String>,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Parallel jobs when the CPU count cannot be detected (default 4)
    pub fallback_jobs: Option<u32>,
}

/// Commands used by the `install-deps` target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Refresh the package index (default `sudo apt-get update`)
    pub update: Option<String>,

    /// Install packages; the package list is appended (default `sudo apt-get install -y`)
    pub install: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.install.system_prefix.is_some() {
            self.install.system_prefix = other.install.system_prefix;
        }
        if other.install.local_prefix.is_some() {
            self.install.local_prefix = other.install.local_prefix;
        }
        if other.install.elevate.is_some() {
            self.install.elevate = other.install.elevate;
        }

        if other.build.fallback_jobs.is_some() {
            self.build.fallback_jobs = other.build.fallback_jobs;
        }

        if other.packages.update.is_some() {
            self.packages.update = other.packages.update;
        }
        if other.packages.install.is_some() {
            self.packages.install = other.packages.install;
        }
    }

    /// Resolve the effective generation settings.
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            system_prefix: self
                .install
                .system_prefix
                .clone()
                .unwrap_or(defaults.system_prefix),
            local_prefix: self
                .install
                .local_prefix
                .clone()
                .unwrap_or(defaults.local_prefix),
            elevate: self.install.elevate.clone().unwrap_or(defaults.elevate),
            fallback_jobs: self
                .build
                .fallback_jobs
                .filter(|&jobs| jobs > 0)
                .unwrap_or(defaults.fallback_jobs),
            package_update: self
                .packages
                .update
                .clone()
                .unwrap_or(defaults.package_update),
            package_install: self
                .packages
                .install
                .clone()
                .unwrap_or(defaults.package_install),
        }
    }
}

/// Effective settings consumed by the generator.
///
/// Generation is a pure function of the descriptor list and these values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub system_prefix: String,
    pub local_prefix: String,
    /// Prepended to system install commands; empty disables elevation
    pub elevate: String,
    pub fallback_jobs: u32,
    pub package_update: String,
    pub package_install: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            system_prefix: DEFAULT_SYSTEM_PREFIX.to_string(),
            local_prefix: DEFAULT_LOCAL_PREFIX.to_string(),
            elevate: "sudo".to_string(),
            fallback_jobs: DEFAULT_FALLBACK_JOBS,
            package_update: "sudo apt-get update".to_string(),
            package_install: "sudo apt-get install -y".to_string(),
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.submake/config.toml)
/// 2. Global config (~/.submake/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global submake config directory (~/.submake).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".submake"))
}

/// Get the global config path (~/.submake/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.submake/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".submake").join("config.toml")
}
