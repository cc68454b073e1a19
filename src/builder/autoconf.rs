//! Autoconf recipe.
//!
//! Regenerates `configure`, then configures out of tree in `<dir>/build`.

use crate::builder::mode::BuildProfile;
use crate::builder::recipe::{BuildRecipe, RecipeContext, JOBS_FLAG};
use crate::builder::step::Step;
use crate::core::build_system::{AutoconfOptions, BuildSystemKind};

/// Compiler flags appended to `configure` for debug builds.
pub const DEBUG_CFLAGS: &str = "CFLAGS=\"-g -O0\"";

impl AutoconfOptions {
    /// Arguments passed to `../configure`.
    ///
    /// Debug builds get [`DEBUG_CFLAGS`] appended to a local copy of the
    /// argument list; the stored options are left as declared.
    fn configure_args(&self, ctx: &RecipeContext<'_>) -> Vec<String> {
        let mut args = vec![
            format!("--prefix={}", ctx.prefix),
            "--enable-shared".to_string(),
            "--disable-static".to_string(),
        ];
        args.extend(self.flags.iter().map(|f| format!("--{}", f)));
        if ctx.profile == BuildProfile::Debug {
            args.push(DEBUG_CFLAGS.to_string());
        }
        args
    }
}

impl BuildRecipe for AutoconfOptions {
    fn kind(&self) -> BuildSystemKind {
        BuildSystemKind::Autoconf
    }

    fn marker_file(&self) -> &'static str {
        "configure.ac"
    }

    fn supports_debug(&self) -> bool {
        true
    }

    fn build_steps(&self, ctx: &RecipeContext<'_>) -> Vec<Step> {
        let build_dir = &ctx.paths.build_dir;
        vec![
            Step::in_dir(
                &ctx.paths.source_dir,
                "{ autoreconf -f -i 2>/dev/null || autoreconf -i; }",
            ),
            Step::Quiet(format!("mkdir -p {}", build_dir)),
            Step::command(
                format!("cd {} && ../configure", build_dir),
                self.configure_args(ctx),
            ),
            Step::in_dir(build_dir, format!("$(MAKE) {}", JOBS_FLAG)),
        ]
    }

    fn install_steps(&self, ctx: &RecipeContext<'_>) -> Vec<Step> {
        vec![Step::in_dir(
            &ctx.paths.build_dir,
            ctx.elevated("$(MAKE) install"),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::mode::InstallMode;
    use crate::builder::recipe::synthesize;
    use crate::builder::step::render_steps;
    use crate::core::build_system::BuildSystem;
    use crate::core::descriptor::DependencyDescriptor;
    use crate::util::config::Settings;

    fn modbus() -> DependencyDescriptor {
        DependencyDescriptor::from_build_system(
            "libmodbus",
            "https://github.com/stephane/libmodbus.git",
            BuildSystem::Autoconf(AutoconfOptions {
                flags: vec!["disable-tests".into()],
            }),
            None,
            vec![],
        )
    }

    #[test]
    fn test_system_recipe() {
        let steps = synthesize(
            &modbus(),
            InstallMode::System,
            BuildProfile::Release,
            &Settings::default(),
        );

        assert_eq!(
            render_steps(&steps),
            "\tcd $(LIBMODBUS_DIR) && { autoreconf -f -i 2>/dev/null || autoreconf -i; }\n\
             \t@mkdir -p $(LIBMODBUS_BUILD_DIR)\n\
             \tcd $(LIBMODBUS_BUILD_DIR) && ../configure \\\n\
             \t\t--prefix=/usr/local \\\n\
             \t\t--enable-shared \\\n\
             \t\t--disable-static \\\n\
             \t\t--disable-tests\n\
             \tcd $(LIBMODBUS_BUILD_DIR) && $(MAKE) -j$(JOBS)\n\
             \tcd $(LIBMODBUS_BUILD_DIR) && sudo $(MAKE) install"
        );
    }

    #[test]
    fn test_dev_recipe_appends_debug_cflags() {
        let text = render_steps(&synthesize(
            &modbus(),
            InstallMode::Dev,
            BuildProfile::Release,
            &Settings::default(),
        ));

        assert!(text.contains("--disable-tests \\\n\t\tCFLAGS=\"-g -O0\""));
        assert!(text.contains("--prefix=/usr/local"));
        assert!(text.contains("sudo $(MAKE) install"));
    }

    #[test]
    fn test_dev_synthesis_leaves_descriptor_untouched() {
        let desc = modbus();
        let before = desc.clone();
        let settings = Settings::default();

        let first = synthesize(&desc, InstallMode::Dev, BuildProfile::Release, &settings);
        let second = synthesize(&desc, InstallMode::Dev, BuildProfile::Release, &settings);
        let system = synthesize(&desc, InstallMode::System, BuildProfile::Release, &settings);

        assert_eq!(desc, before);
        assert_eq!(first, second);
        assert_eq!(render_steps(&first).matches("CFLAGS").count(), 1);
        assert!(!render_steps(&system).contains("CFLAGS"));
    }
}
