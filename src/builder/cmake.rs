//! CMake recipe.
//!
//! Out-of-tree build in `<dir>/build`, shared libraries forced on.

use crate::builder::recipe::{BuildRecipe, RecipeContext, JOBS_FLAG};
use crate::builder::step::Step;
use crate::core::build_system::{BuildSystemKind, CMakeOptions};

impl CMakeOptions {
    /// Arguments passed to `cmake ..`, one per continuation line.
    fn configure_args(&self, ctx: &RecipeContext<'_>) -> Vec<String> {
        let mut args = vec![
            format!("-DCMAKE_BUILD_TYPE={}", ctx.profile.as_str()),
            format!("-DCMAKE_INSTALL_PREFIX={}", ctx.prefix),
            "-DBUILD_SHARED_LIBS=ON".to_string(),
        ];
        args.extend(self.defines.iter().map(|d| format!("-D{}", d)));
        args
    }
}

impl BuildRecipe for CMakeOptions {
    fn kind(&self) -> BuildSystemKind {
        BuildSystemKind::CMake
    }

    fn marker_file(&self) -> &'static str {
        "CMakeLists.txt"
    }

    fn supports_debug(&self) -> bool {
        true
    }

    fn build_steps(&self, ctx: &RecipeContext<'_>) -> Vec<Step> {
        let build_dir = &ctx.paths.build_dir;
        vec![
            Step::Quiet(format!("mkdir -p {}", build_dir)),
            Step::command(
                format!("cd {} && cmake ..", build_dir),
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
