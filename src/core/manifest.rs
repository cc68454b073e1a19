//! Submodule configuration files.
//!
//! The configuration is a JSON object with a `submodules` list:
//!
//! ```json
//! {
//!   "submodules": [
//!     {
//!       "name": "glog",
//!       "url": "https://github.com/google/glog.git",
//!       "build_system": "cmake",
//!       "build_options": { "cmake_options": ["WITH_GFLAGS=OFF"] }
//!     }
//!   ]
//! }
//! ```
//!
//! The companion file written next to a generated Makefile uses the same
//! format, so it can be fed back to `submake generate`.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::build_system::RawBuildOptions;
use crate::core::descriptor::{validate_name, DependencyDescriptor};
use crate::core::errors::DescriptorError;
use crate::util::fs;

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub submodules: Vec<SubmoduleSpec>,
}

/// One submodule entry as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmoduleSpec {
    pub name: String,

    pub url: String,

    /// Kept as a string so unsupported kinds surface as `InvalidBuildSystem`
    pub build_system: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,

    #[serde(default, alias = "depends_on", skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub build_options: RawBuildOptions,
}

impl SubmoduleSpec {
    /// Create an entry with no directory override, dependencies or options.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        build_system: impl Into<String>,
    ) -> Self {
        SubmoduleSpec {
            name: name.into(),
            url: url.into(),
            build_system: build_system.into(),
            directory: None,
            dependencies: Vec::new(),
            build_options: RawBuildOptions::default(),
        }
    }

    /// Validate and convert into a descriptor.
    pub fn to_descriptor(&self) -> Result<DependencyDescriptor, DescriptorError> {
        validate_name(&self.name)?;
        DependencyDescriptor::new(
            self.name.clone(),
            self.url.clone(),
            &self.build_system,
            self.directory.clone(),
            self.dependencies.clone(),
            &self.build_options,
        )
    }

    /// Render a descriptor back into its configuration form.
    pub fn from_descriptor(desc: &DependencyDescriptor) -> Self {
        SubmoduleSpec {
            name: desc.name().to_string(),
            url: desc.url().to_string(),
            build_system: desc.kind().as_str().to_string(),
            directory: Some(desc.directory().to_string()),
            dependencies: desc.depends_on().to_vec(),
            build_options: desc.build_system().to_raw(),
        }
    }
}

impl Manifest {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Parse a configuration document.
    pub fn parse(contents: &str) -> Result<Self> {
        let manifest = serde_json::from_str(contents)?;
        Ok(manifest)
    }

    /// Serialize to pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).context("failed to serialize configuration")?;
        json.push('\n');
        Ok(json)
    }

    /// Write the configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write_string(path, &json)
            .with_context(|| format!("failed to write config file: {}", path.display()))
    }

    /// Build the companion configuration for a descriptor list.
    pub fn from_descriptors(descriptors: &[DependencyDescriptor]) -> Self {
        Manifest {
            submodules: descriptors.iter().map(SubmoduleSpec::from_descriptor).collect(),
        }
    }

    /// Convert every entry into a descriptor.
    ///
    /// Fails on the first invalid entry, or when two distinct names share a
    /// make variable stem. When two entries share a name the later one wins
    /// but keeps the position of the first.
    pub fn to_descriptors(&self) -> Result<Vec<DependencyDescriptor>, DescriptorError> {
        let mut descriptors: Vec<DependencyDescriptor> = Vec::with_capacity(self.submodules.len());
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut variables: HashMap<String, String> = HashMap::new();

        for spec in &self.submodules {
            let desc = spec.to_descriptor()?;

            let prefix = desc.var_prefix();
            match variables.get(&prefix) {
                Some(owner) if owner != desc.name() => {
                    return Err(DescriptorError::VariableClash {
                        first: owner.clone(),
                        second: desc.name().to_string(),
                        variable: format!("{}_DIR", prefix),
                    });
                }
                Some(_) => {}
                None => {
                    variables.insert(prefix, desc.name().to_string());
                }
            }

            match positions.get(desc.name()) {
                Some(&index) => {
                    tracing::warn!(
                        "submodule `{}` is defined more than once, using the last definition",
                        desc.name()
                    );
                    descriptors[index] = desc;
                }
                None => {
                    positions.insert(desc.name().to_string(), descriptors.len());
                    descriptors.push(desc);
                }
            }
        }

        Ok(descriptors)
    }

    /// The configuration used when none is supplied.
    pub fn example() -> Self {
        let mut glog = SubmoduleSpec::new("glog", "https://github.com/google/glog.git", "cmake");
        glog.build_options.cmake_options = Some(vec![
            "WITH_GFLAGS=OFF".into(),
            "WITH_UNWIND=ON".into(),
        ]);

        let mut modbus = SubmoduleSpec::new(
            "libmodbus",
            "https://github.com/stephane/libmodbus.git",
            "autoconf",
        );
        modbus.build_options.autoconf_options =
            Some(vec!["enable-shared".into(), "disable-static".into()]);

        Manifest {
            submodules: vec![glog, modbus],
        }
    }
}
