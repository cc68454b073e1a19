//! Dependency descriptors.
//!
//! A [`DependencyDescriptor`] is the validated, immutable record of one
//! submodule: where it comes from, where it lives, and how it is built.

use crate::core::build_system::{BuildSystem, BuildSystemKind, RawBuildOptions};
use crate::core::errors::DescriptorError;

/// One external source dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDescriptor {
    /// Unique identifier, used for target and variable names
    name: String,

    /// Remote location used by `git submodule add`
    url: String,

    /// Build system and its options
    build_system: BuildSystem,

    /// Checkout directory, relative to the generated Makefile
    directory: String,

    /// Names of other submodules this one depends on
    depends_on: Vec<String>,
}

impl DependencyDescriptor {
    /// Construct a descriptor from raw configuration values.
    ///
    /// Only the build-system kind is validated. `directory` defaults to `name`.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        kind: &str,
        directory: Option<String>,
        depends_on: Vec<String>,
        options: &RawBuildOptions,
    ) -> Result<Self, DescriptorError> {
        let kind: BuildSystemKind = kind.parse()?;
        Ok(Self::from_build_system(
            name,
            url,
            BuildSystem::from_raw(kind, options),
            directory,
            depends_on,
        ))
    }

    /// Construct a descriptor from an already-typed build system.
    pub fn from_build_system(
        name: impl Into<String>,
        url: impl Into<String>,
        build_system: BuildSystem,
        directory: Option<String>,
        depends_on: Vec<String>,
    ) -> Self {
        let name = name.into();
        let directory = directory
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| name.clone());

        DependencyDescriptor {
            name,
            url: url.into(),
            build_system,
            directory,
            depends_on,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> BuildSystemKind {
        self.build_system.kind()
    }

    pub fn build_system(&self) -> &BuildSystem {
        &self.build_system
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// The out-of-tree build directory, always `<directory>/build`.
    pub fn build_directory(&self) -> String {
        format!("{}/build", self.directory)
    }

    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }

    /// Prefix for this descriptor's make variables (`<PREFIX>_DIR`).
    ///
    /// Upper-cased name with `-` and `.` mapped to `_`.
    pub fn var_prefix(&self) -> String {
        self.name
            .chars()
            .map(|c| match c {
                '-' | '.' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect()
    }

    /// `$(<PREFIX>_DIR)` reference.
    pub fn dir_var(&self) -> String {
        format!("$({}_DIR)", self.var_prefix())
    }

    /// `$(<PREFIX>_BUILD_DIR)` reference.
    pub fn build_dir_var(&self) -> String {
        format!("$({}_BUILD_DIR)", self.var_prefix())
    }
}

/// Check that a name can be used as a make target and variable stem.
///
/// Only ASCII letters, digits, `-`, `_` and `.` are allowed, and the name
/// may not start with `-`.
pub fn validate_name(name: &str) -> Result<(), DescriptorError> {
    let invalid = name.is_empty()
        || name.starts_with('-')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if invalid {
        return Err(DescriptorError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
