//! Build-system kinds and their kind-scoped options.
//!
//! The raw `build_options` object from the configuration file is only a
//! permissive boundary format. It is parsed once into a [`BuildSystem`]
//! variant that carries the typed options for exactly one kind.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::DescriptorError;

/// The closed set of supported build systems.
///
/// Ordering follows [`BuildSystemKind::ALL`], which is also the order used for
/// every kind-derived section of the generated Makefile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystemKind {
    /// `CMakeLists.txt` projects
    CMake,
    /// `configure.ac` projects (autoreconf + configure)
    Autoconf,
    /// Projects with a hand-written Makefile
    Make,
    /// `meson.build` projects
    Meson,
}

impl BuildSystemKind {
    /// Every kind, in canonical order.
    pub const ALL: [BuildSystemKind; 4] = [
        BuildSystemKind::CMake,
        BuildSystemKind::Autoconf,
        BuildSystemKind::Make,
        BuildSystemKind::Meson,
    ];

    /// Get the kind name as written in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildSystemKind::CMake => "cmake",
            BuildSystemKind::Autoconf => "autoconf",
            BuildSystemKind::Make => "make",
            BuildSystemKind::Meson => "meson",
        }
    }

    /// Canonical names of all kinds.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.as_str()).collect()
    }

    /// Key of this kind's entry in the raw `build_options` object.
    pub fn options_key(&self) -> &'static str {
        match self {
            BuildSystemKind::CMake => "cmake_options",
            BuildSystemKind::Autoconf => "autoconf_options",
            BuildSystemKind::Make => "make_options",
            BuildSystemKind::Meson => "meson_options",
        }
    }
}

impl fmt::Display for BuildSystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BuildSystemKind {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cmake" => Ok(BuildSystemKind::CMake),
            "autoconf" | "autotools" => Ok(BuildSystemKind::Autoconf),
            "make" | "plain-make" => Ok(BuildSystemKind::Make),
            "meson" => Ok(BuildSystemKind::Meson),
            _ => Err(DescriptorError::InvalidBuildSystem {
                name: s.to_string(),
            }),
        }
    }
}

/// Options for CMake projects. Each define is rendered as `-D<define>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CMakeOptions {
    pub defines: Vec<String>,
}

/// Options for autoconf projects. Each flag is rendered as `--<flag>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoconfOptions {
    pub flags: Vec<String>,
}

/// Options for plain-make projects.
///
/// Variables are prepended to the build invocation as `KEY=VALUE`, in the
/// order they were declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MakeOptions {
    pub vars: Vec<(String, String)>,
}

/// Options for Meson projects. Each define is rendered as `-D<define>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MesonOptions {
    pub defines: Vec<String>,
}

/// A build system together with its kind-scoped options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildSystem {
    CMake(CMakeOptions),
    Autoconf(AutoconfOptions),
    Make(MakeOptions),
    Meson(MesonOptions),
}

impl BuildSystem {
    /// The kind of this build system.
    pub fn kind(&self) -> BuildSystemKind {
        match self {
            BuildSystem::CMake(_) => BuildSystemKind::CMake,
            BuildSystem::Autoconf(_) => BuildSystemKind::Autoconf,
            BuildSystem::Make(_) => BuildSystemKind::Make,
            BuildSystem::Meson(_) => BuildSystemKind::Meson,
        }
    }

    /// A build system of the given kind with no user options.
    pub fn bare(kind: BuildSystemKind) -> Self {
        Self::from_raw(kind, &RawBuildOptions::default())
    }

    /// Parse the raw option bag for `kind`. Entries for other kinds are ignored.
    pub fn from_raw(kind: BuildSystemKind, raw: &RawBuildOptions) -> Self {
        match kind {
            BuildSystemKind::CMake => BuildSystem::CMake(CMakeOptions {
                defines: option_list(raw.cmake_options.as_deref()),
            }),
            BuildSystemKind::Autoconf => BuildSystem::Autoconf(AutoconfOptions {
                flags: option_list(raw.autoconf_options.as_deref()),
            }),
            BuildSystemKind::Make => BuildSystem::Make(MakeOptions {
                vars: raw
                    .make_options
                    .iter()
                    .flatten()
                    .map(|(k, v)| (k.clone(), option_text(v)))
                    .collect(),
            }),
            BuildSystemKind::Meson => BuildSystem::Meson(MesonOptions {
                defines: option_list(raw.meson_options.as_deref()),
            }),
        }
    }

    /// Render the options back into the raw boundary format.
    pub fn to_raw(&self) -> RawBuildOptions {
        let mut raw = RawBuildOptions::default();
        match self {
            BuildSystem::CMake(opts) => raw.cmake_options = string_list(&opts.defines),
            BuildSystem::Autoconf(opts) => raw.autoconf_options = string_list(&opts.flags),
            BuildSystem::Make(opts) => {
                if !opts.vars.is_empty() {
                    raw.make_options = Some(
                        opts.vars
                            .iter()
                            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                            .collect(),
                    );
                }
            }
            BuildSystem::Meson(opts) => raw.meson_options = string_list(&opts.defines),
        }
        raw
    }
}

/// The `build_options` object as it appears in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBuildOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmake_options: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoconf_options: Option<Vec<Value>>,

    /// Ordered `KEY: VALUE` mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make_options: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meson_options: Option<Vec<Value>>,
}

fn option_list(values: Option<&[Value]>) -> Vec<String> {
    values.unwrap_or_default().iter().map(option_text).collect()
}

fn string_list(values: &[String]) -> Option<Vec<Value>> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().cloned().map(Value::String).collect())
    }
}

/// Strings are used verbatim; any other JSON value uses its JSON text.
fn option_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("cmake".parse::<BuildSystemKind>().unwrap(), BuildSystemKind::CMake);
        assert_eq!("CMake".parse::<BuildSystemKind>().unwrap(), BuildSystemKind::CMake);
        assert_eq!(
            "autotools".parse::<BuildSystemKind>().unwrap(),
            BuildSystemKind::Autoconf
        );
        assert_eq!("make".parse::<BuildSystemKind>().unwrap(), BuildSystemKind::Make);
        assert_eq!(" meson ".parse::<BuildSystemKind>().unwrap(), BuildSystemKind::Meson);
    }

    #[test]
    fn test_kind_from_str_rejects_unknown() {
        let err = "bazel".parse::<BuildSystemKind>().unwrap_err();
        assert_eq!(
            err,
            DescriptorError::InvalidBuildSystem {
                name: "bazel".to_string()
            }
        );
    }

    #[test]
    fn test_kind_display_roundtrip() {
        for kind in BuildSystemKind::ALL {
            assert_eq!(kind.to_string().parse::<BuildSystemKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_raw_only_reads_own_key() {
        let raw: RawBuildOptions = serde_json::from_str(
            r#"{"cmake_options": ["A=1"], "meson_options": ["b=2"]}"#,
        )
        .unwrap();

        let cmake = BuildSystem::from_raw(BuildSystemKind::CMake, &raw);
        assert_eq!(
            cmake,
            BuildSystem::CMake(CMakeOptions {
                defines: vec!["A=1".to_string()]
            })
        );

        let meson = BuildSystem::from_raw(BuildSystemKind::Meson, &raw);
        assert_eq!(
            meson,
            BuildSystem::Meson(MesonOptions {
                defines: vec!["b=2".to_string()]
            })
        );
    }

    #[test]
    fn test_make_options_keep_declaration_order() {
        let raw: RawBuildOptions =
            serde_json::from_str(r#"{"make_options": {"Z": "1", "A": 2, "M": true}}"#).unwrap();

        let BuildSystem::Make(opts) = BuildSystem::from_raw(BuildSystemKind::Make, &raw) else {
            panic!("expected make options");
        };
        assert_eq!(
            opts.vars,
            vec![
                ("Z".to_string(), "1".to_string()),
                ("A".to_string(), "2".to_string()),
                ("M".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_to_raw_omits_empty_options() {
        let raw = BuildSystem::bare(BuildSystemKind::Autoconf).to_raw();
        assert_eq!(raw, RawBuildOptions::default());
        assert_eq!(serde_json::to_string(&raw).unwrap(), "{}");
    }
}
