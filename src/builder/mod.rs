//! Command-sequence synthesis.
//!
//! Maps a descriptor and an install mode to the ordered shell steps that
//! build and install it. Each build-system kind has its own recipe module.

pub mod autoconf;
pub mod cmake;
pub mod make;
pub mod meson;
pub mod mode;
pub mod recipe;
pub mod step;

pub use mode::{BuildProfile, InstallMode};
pub use recipe::{clean_steps, marker_file, recipe_for, synthesize, BuildRecipe, RecipeContext};
pub use step::{render_steps, Step};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::build_system::{BuildSystem, BuildSystemKind};
    use crate::test_support::fixtures::descriptor_of_kind;
    use crate::util::config::Settings;

    /// Turn a system recipe into what the local recipe should be.
    fn as_local(system: &str, settings: &Settings) -> String {
        system
            .replace(
                &format!("={}", settings.system_prefix),
                "=$(LOCAL_PREFIX)",
            )
            .replace("sudo ", "")
    }

    #[test]
    fn test_system_and_local_differ_only_in_prefix_and_elevation() {
        let settings = Settings::default();
        for kind in [
            BuildSystemKind::CMake,
            BuildSystemKind::Autoconf,
            BuildSystemKind::Meson,
        ] {
            let desc = descriptor_of_kind("dep", kind);
            let system = render_steps(&synthesize(
                &desc,
                InstallMode::System,
                BuildProfile::Release,
                &settings,
            ));
            let local = render_steps(&synthesize(
                &desc,
                InstallMode::Local,
                BuildProfile::Release,
                &settings,
            ));
            assert_eq!(as_local(&system, &settings), local, "kind {}", kind);
        }
    }

    #[test]
    fn test_plain_make_prefix_only_in_local() {
        let settings = Settings::default();
        let desc = descriptor_of_kind("dep", BuildSystemKind::Make);

        let system = render_steps(&synthesize(
            &desc,
            InstallMode::System,
            BuildProfile::Release,
            &settings,
        ));
        let local = render_steps(&synthesize(
            &desc,
            InstallMode::Local,
            BuildProfile::Release,
            &settings,
        ));

        assert!(!system.contains("PREFIX="));
        assert_eq!(local.matches("PREFIX=$(LOCAL_PREFIX)").count(), 2);
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let settings = Settings::default();
        for kind in BuildSystemKind::ALL {
            let desc = descriptor_of_kind("dep", kind);
            for mode in InstallMode::ALL {
                assert_eq!(
                    synthesize(&desc, mode, BuildProfile::Release, &settings),
                    synthesize(&desc, mode, BuildProfile::Release, &settings)
                );
            }
        }
    }

    #[test]
    fn test_every_kind_has_a_recipe() {
        for kind in BuildSystemKind::ALL {
            let build_system = BuildSystem::bare(kind);
            assert_eq!(recipe_for(&build_system).kind(), kind);
        }
    }
}
