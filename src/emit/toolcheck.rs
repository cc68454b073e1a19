//! Required tools and packages, derived from the set of kinds in use.

use std::collections::BTreeSet;

use crate::builder::Step;
use crate::core::build_system::BuildSystemKind;
use crate::core::descriptor::DependencyDescriptor;

/// An external command the generated Makefile relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tool {
    /// Executable name probed with `command -v`
    pub command: &'static str,
    /// Name used in the "is not installed" message
    pub label: &'static str,
}

impl Tool {
    const fn new(command: &'static str, label: &'static str) -> Self {
        Tool { command, label }
    }

    /// Availability probe that reports a missing tool and never fails.
    pub fn probe(&self) -> Step {
        Step::Quiet(format!(
            "command -v {} >/dev/null 2>&1 || echo \"{} is not installed\"",
            self.command, self.label
        ))
    }
}

/// Tools needed regardless of the kinds in use.
pub const BASE_TOOLS: [Tool; 3] = [
    Tool::new("make", "make"),
    Tool::new("gcc", "gcc"),
    Tool::new("git", "git"),
];

/// Packages installed regardless of the kinds in use.
pub const BASE_PACKAGES: [&str; 4] = ["git", "build-essential", "gcc", "g++"];

/// Tools a kind adds on top of [`BASE_TOOLS`].
pub fn kind_tools(kind: BuildSystemKind) -> &'static [Tool] {
    const CMAKE: [Tool; 1] = [Tool::new("cmake", "CMake")];
    const AUTOCONF: [Tool; 1] = [Tool::new("autoreconf", "autoconf")];
    const MESON: [Tool; 2] = [Tool::new("meson", "meson"), Tool::new("ninja", "ninja")];

    match kind {
        BuildSystemKind::CMake => &CMAKE,
        BuildSystemKind::Autoconf => &AUTOCONF,
        BuildSystemKind::Make => &[],
        BuildSystemKind::Meson => &MESON,
    }
}

/// Packages a kind adds on top of [`BASE_PACKAGES`].
pub fn kind_packages(kind: BuildSystemKind) -> &'static [&'static str] {
    match kind {
        BuildSystemKind::CMake => &["cmake"],
        BuildSystemKind::Autoconf => &["autoconf", "automake", "libtool"],
        BuildSystemKind::Make => &[],
        BuildSystemKind::Meson => &["meson", "ninja-build"],
    }
}

/// The distinct kinds used by `descriptors`, in canonical order.
pub fn kinds_present(descriptors: &[DependencyDescriptor]) -> BTreeSet<BuildSystemKind> {
    descriptors.iter().map(|d| d.kind()).collect()
}

/// Kind-specific tools in canonical kind order, then [`BASE_TOOLS`].
pub fn required_tools(kinds: &BTreeSet<BuildSystemKind>) -> Vec<Tool> {
    let mut tools: Vec<Tool> = Vec::new();
    let candidates = kinds
        .iter()
        .flat_map(|&kind| kind_tools(kind).iter())
        .chain(BASE_TOOLS.iter());

    for tool in candidates {
        if !tools.contains(tool) {
            tools.push(*tool);
        }
    }
    tools
}

/// [`BASE_PACKAGES`] followed by each kind's additions, without duplicates.
pub fn required_packages(kinds: &BTreeSet<BuildSystemKind>) -> Vec<&'static str> {
    let mut packages: Vec<&'static str> = Vec::new();
    let candidates = BASE_PACKAGES
        .iter()
        .chain(kinds.iter().flat_map(|&kind| kind_packages(kind).iter()));

    for package in candidates {
        if !packages.contains(package) {
            packages.push(package);
        }
    }
    packages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{alpha_beta, descriptor_of_kind, one_of_each};

    fn commands(tools: &[Tool]) -> Vec<&str> {
        tools.iter().map(|t| t.command).collect()
    }

    #[test]
    fn test_tools_for_cmake_and_make() {
        let kinds = kinds_present(&alpha_beta());
        assert_eq!(
            commands(&required_tools(&kinds)),
            ["cmake", "make", "gcc", "git"]
        );
    }

    #[test]
    fn test_tools_for_every_kind() {
        let kinds = kinds_present(&one_of_each());
        assert_eq!(
            commands(&required_tools(&kinds)),
            ["cmake", "autoreconf", "meson", "ninja", "make", "gcc", "git"]
        );
    }

    #[test]
    fn test_packages_deduplicated_across_descriptors() {
        let descriptors = vec![
            descriptor_of_kind("a", BuildSystemKind::Meson),
            descriptor_of_kind("b", BuildSystemKind::Meson),
            descriptor_of_kind("c", BuildSystemKind::Autoconf),
            descriptor_of_kind("d", BuildSystemKind::Meson),
        ];
        let packages = required_packages(&kinds_present(&descriptors));
        assert_eq!(
            packages,
            [
                "git",
                "build-essential",
                "gcc",
                "g++",
                "autoconf",
                "automake",
                "libtool",
                "meson",
                "ninja-build"
            ]
        );
    }

    #[test]
    fn test_plain_make_adds_no_packages() {
        let kinds = kinds_present(&[descriptor_of_kind("m", BuildSystemKind::Make)]);
        assert_eq!(required_packages(&kinds), BASE_PACKAGES);
    }

    #[test]
    fn test_probe_never_fails() {
        let probe = Tool::new("cmake", "CMake").probe();
        assert_eq!(
            probe.render(),
            "\t@command -v cmake >/dev/null 2>&1 || echo \"CMake is not installed\""
        );
    }
}
