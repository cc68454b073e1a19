//! Descriptor fixtures for common test scenarios.

use crate::core::build_system::{
    AutoconfOptions, BuildSystem, BuildSystemKind, CMakeOptions, MakeOptions, MesonOptions,
};
use crate::core::descriptor::DependencyDescriptor;

/// A descriptor of `kind` with one representative option set.
pub fn descriptor_of_kind(name: &str, kind: BuildSystemKind) -> DependencyDescriptor {
    let build_system = match kind {
        BuildSystemKind::CMake => BuildSystem::CMake(CMakeOptions {
            defines: vec!["WITH_TESTS=OFF".to_string()],
        }),
        BuildSystemKind::Autoconf => BuildSystem::Autoconf(AutoconfOptions {
            flags: vec!["without-docs".to_string()],
        }),
        BuildSystemKind::Make => BuildSystem::Make(MakeOptions {
            vars: vec![("CC".to_string(), "gcc".to_string())],
        }),
        BuildSystemKind::Meson => BuildSystem::Meson(MesonOptions {
            defines: vec!["tests=false".to_string()],
        }),
    };

    DependencyDescriptor::from_build_system(
        name,
        format!("https://example.com/{}.git", name),
        build_system,
        None,
        Vec::new(),
    )
}

/// `alpha` (cmake, no options) and `beta` (make, `DEBUG=1`).
pub fn alpha_beta() -> Vec<DependencyDescriptor> {
    vec![
        DependencyDescriptor::from_build_system(
            "alpha",
            "https://example.com/alpha.git",
            BuildSystem::bare(BuildSystemKind::CMake),
            None,
            Vec::new(),
        ),
        DependencyDescriptor::from_build_system(
            "beta",
            "https://example.com/beta.git",
            BuildSystem::Make(MakeOptions {
                vars: vec![("DEBUG".to_string(), "1".to_string())],
            }),
            None,
            Vec::new(),
        ),
    ]
}

/// One descriptor of every kind, in canonical kind order.
pub fn one_of_each() -> Vec<DependencyDescriptor> {
    BuildSystemKind::ALL
        .iter()
        .map(|&kind| descriptor_of_kind(&format!("{}-dep", kind), kind))
        .collect()
}
