//! Meson recipe. Ninja parallelizes on its own, so no jobs flag is passed.

use crate::builder::recipe::{BuildRecipe, RecipeContext};
use crate::builder::step::Step;
use crate::core::build_system::{BuildSystemKind, MesonOptions};

impl BuildRecipe for MesonOptions {
    fn kind(&self) -> BuildSystemKind {
        BuildSystemKind::Meson
    }

    fn marker_file(&self) -> &'static str {
        "meson.build"
    }

    fn build_steps(&self, ctx: &RecipeContext<'_>) -> Vec<Step> {
        let build_dir = &ctx.paths.build_dir;

        let mut args = vec![
            format!("--buildtype={}", ctx.profile.meson_buildtype()),
            format!("--prefix={}", ctx.prefix),
        ];
        args.extend(self.defines.iter().map(|d| format!("-D{}", d)));

        vec![
            Step::Quiet(format!("mkdir -p {}", build_dir)),
            Step::command(format!("cd {} && meson setup ..", build_dir), args),
            Step::in_dir(build_dir, "ninja"),
        ]
    }

    fn install_steps(&self, ctx: &RecipeContext<'_>) -> Vec<Step> {
        vec![Step::in_dir(&ctx.paths.build_dir, ctx.elevated("ninja install"))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::mode::{BuildProfile, InstallMode};
    use crate::builder::recipe::synthesize;
    use crate::builder::step::render_steps;
    use crate::core::build_system::BuildSystem;
    use crate::core::descriptor::DependencyDescriptor;
    use crate::util::config::Settings;

    fn pixman() -> DependencyDescriptor {
        DependencyDescriptor::from_build_system(
            "pixman",
            "https://gitlab.freedesktop.org/pixman/pixman.git",
            BuildSystem::Meson(MesonOptions {
                defines: vec!["gtk=disabled".into()],
            }),
            Some("deps/pixman".into()),
            vec![],
        )
    }

    #[test]
    fn test_system_recipe() {
        let steps = synthesize(
            &pixman(),
            InstallMode::System,
            BuildProfile::Release,
            &Settings::default(),
        );

        assert_eq!(
            render_steps(&steps),
            "\t@mkdir -p $(PIXMAN_BUILD_DIR)\n\
             \tcd $(PIXMAN_BUILD_DIR) && meson setup .. \\\n\
             \t\t--buildtype=release \\\n\
             \t\t--prefix=/usr/local \\\n\
             \t\t-Dgtk=disabled\n\
             \tcd $(PIXMAN_BUILD_DIR) && ninja\n\
             \tcd $(PIXMAN_BUILD_DIR) && sudo ninja install"
        );
    }

    #[test]
    fn test_debug_profile_lowercased() {
        let text = render_steps(&synthesize(
            &pixman(),
            InstallMode::Local,
            BuildProfile::Debug,
            &Settings::default(),
        ));
        assert!(text.contains("--buildtype=debug"));
        assert!(text.contains("--prefix=$(LOCAL_PREFIX)"));
        assert!(!text.contains("-j"));
        assert!(text.ends_with("cd $(PIXMAN_BUILD_DIR) && ninja install"));
    }
}
