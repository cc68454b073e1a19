//! Plain-make recipe.
//!
//! Builds in the source directory. Local installs pass `PREFIX`, which only
//! works for projects that follow that convention.

use crate::builder::mode::InstallMode;
use crate::builder::recipe::{BuildRecipe, Paths, RecipeContext, JOBS_FLAG};
use crate::builder::step::Step;
use crate::core::build_system::{BuildSystemKind, MakeOptions};

/// Printed by local targets before relying on `PREFIX`.
pub const LOCAL_PREFIX_NOTE: &str = "Note: make build system may not support local installation";

impl MakeOptions {
    /// `KEY=VALUE` overrides prepended to the build invocation.
    fn env_prefix(&self) -> String {
        self.vars
            .iter()
            .map(|(k, v)| format!("{}={} ", k, v))
            .collect()
    }

    fn prefix_override(ctx: &RecipeContext<'_>) -> Option<String> {
        match ctx.mode {
            InstallMode::Local => Some(format!("PREFIX={}", ctx.prefix)),
            InstallMode::System | InstallMode::Dev => None,
        }
    }
}

impl BuildRecipe for MakeOptions {
    fn kind(&self) -> BuildSystemKind {
        BuildSystemKind::Make
    }

    fn marker_file(&self) -> &'static str {
        "Makefile"
    }

    fn build_steps(&self, ctx: &RecipeContext<'_>) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut build = format!("{}$(MAKE) {}", self.env_prefix(), JOBS_FLAG);

        if let Some(prefix) = Self::prefix_override(ctx) {
            steps.push(Step::Echo(LOCAL_PREFIX_NOTE.to_string()));
            build = format!("{} {}", build, prefix);
        }

        steps.push(Step::in_dir(&ctx.paths.source_dir, build));
        steps
    }

    fn install_steps(&self, ctx: &RecipeContext<'_>) -> Vec<Step> {
        let install = match Self::prefix_override(ctx) {
            Some(prefix) => format!("$(MAKE) {} install", prefix),
            None => ctx.elevated("$(MAKE) install"),
        };
        vec![Step::in_dir(&ctx.paths.source_dir, install)]
    }

    fn clean_steps(&self, paths: &Paths) -> Vec<Step> {
        vec![
            Step::Run(format!("rm -rf {}", paths.build_dir)),
            Step::in_dir(&paths.source_dir, "$(MAKE) clean 2>/dev/null || true"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::mode::BuildProfile;
    use crate::builder::recipe::{clean_steps, synthesize};
    use crate::builder::step::render_steps;
    use crate::core::build_system::BuildSystem;
    use crate::core::descriptor::DependencyDescriptor;
    use crate::util::config::Settings;

    fn beta(vars: &[(&str, &str)]) -> DependencyDescriptor {
        DependencyDescriptor::from_build_system(
            "beta",
            "https://example.com/beta.git",
            BuildSystem::Make(MakeOptions {
                vars: vars
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            }),
            None,
            vec![],
        )
    }

    #[test]
    fn test_system_recipe() {
        let steps = synthesize(
            &beta(&[("DEBUG", "1")]),
            InstallMode::System,
            BuildProfile::Release,
            &Settings::default(),
        );

        assert_eq!(
            render_steps(&steps),
            "\tcd $(BETA_DIR) && DEBUG=1 $(MAKE) -j$(JOBS)\n\
             \tcd $(BETA_DIR) && sudo $(MAKE) install"
        );
    }

    #[test]
    fn test_system_recipe_has_no_build_dir_or_prefix() {
        let text = render_steps(&synthesize(
            &beta(&[]),
            InstallMode::System,
            BuildProfile::Release,
            &Settings::default(),
        ));

        assert!(!text.contains("mkdir"));
        assert!(!text.contains("BUILD_DIR"));
        assert!(!text.contains("PREFIX="));
        assert!(text.contains("cd $(BETA_DIR) && $(MAKE) -j$(JOBS)"));
    }

    #[test]
    fn test_local_recipe_passes_prefix_to_build_and_install() {
        let steps = synthesize(
            &beta(&[("CC", "clang"), ("DEBUG", "1")]),
            InstallMode::Local,
            BuildProfile::Release,
            &Settings::default(),
        );

        assert_eq!(
            steps,
            vec![
                Step::Echo(LOCAL_PREFIX_NOTE.to_string()),
                Step::Run(
                    "cd $(BETA_DIR) && CC=clang DEBUG=1 $(MAKE) -j$(JOBS) PREFIX=$(LOCAL_PREFIX)"
                        .to_string()
                ),
                Step::Run("cd $(BETA_DIR) && $(MAKE) PREFIX=$(LOCAL_PREFIX) install".to_string()),
            ]
        );
    }

    #[test]
    fn test_clean_tolerates_failure() {
        let text = render_steps(&clean_steps(&beta(&[])));
        assert_eq!(
            text,
            "\trm -rf $(BETA_BUILD_DIR)\n\
             \tcd $(BETA_DIR) && $(MAKE) clean 2>/dev/null || true"
        );
    }
}
