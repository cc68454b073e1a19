//! Install modes and build profiles.

use std::fmt;

use crate::util::config::Settings;

/// Where a generated target installs, and with which privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallMode {
    /// System-wide prefix, elevated install
    System,
    /// Prefix under the Makefile directory, no elevation
    Local,
    /// Debug profile into the system prefix, elevated install
    Dev,
}

impl InstallMode {
    /// Every mode, in emission order.
    pub const ALL: [InstallMode; 3] = [InstallMode::System, InstallMode::Local, InstallMode::Dev];

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMode::System => "system",
            InstallMode::Local => "local",
            InstallMode::Dev => "dev",
        }
    }

    /// Install prefix for this mode.
    pub fn prefix<'a>(&self, settings: &'a Settings) -> &'a str {
        match self {
            InstallMode::System | InstallMode::Dev => &settings.system_prefix,
            InstallMode::Local => "$(LOCAL_PREFIX)",
        }
    }

    /// Whether the install step needs elevated privileges.
    pub fn elevated(&self) -> bool {
        matches!(self, InstallMode::System | InstallMode::Dev)
    }

    /// The profile this mode builds with, given the requested one.
    ///
    /// Dev mode always builds Debug.
    pub fn effective_profile(&self, requested: BuildProfile) -> BuildProfile {
        match self {
            InstallMode::Dev => BuildProfile::Debug,
            InstallMode::System | InstallMode::Local => requested,
        }
    }
}

impl fmt::Display for InstallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optimization profile passed to the configure step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildProfile {
    #[default]
    Release,
    Debug,
}

impl BuildProfile {
    /// CMake spelling (`Release`, `Debug`).
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildProfile::Release => "Release",
            BuildProfile::Debug => "Debug",
        }
    }

    /// Meson `--buildtype` value (lower-cased).
    pub fn meson_buildtype(&self) -> &'static str {
        match self {
            BuildProfile::Release => "release",
            BuildProfile::Debug => "debug",
        }
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
