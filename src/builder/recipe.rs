//! The per-kind recipe interface and the synthesizer entry points.

use crate::builder::mode::{BuildProfile, InstallMode};
use crate::builder::step::Step;
use crate::core::build_system::{BuildSystem, BuildSystemKind};
use crate::core::descriptor::DependencyDescriptor;
use crate::util::config::Settings;

/// Parallel build flag; `JOBS` is defined at the top of the generated Makefile.
pub const JOBS_FLAG: &str = "-j$(JOBS)";

/// Make variable references for one descriptor's directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// `$(<PREFIX>_DIR)`
    pub source_dir: String,
    /// `$(<PREFIX>_BUILD_DIR)`
    pub build_dir: String,
}

impl Paths {
    pub fn of(desc: &DependencyDescriptor) -> Self {
        Paths {
            source_dir: desc.dir_var(),
            build_dir: desc.build_dir_var(),
        }
    }
}

/// Everything a recipe needs to emit steps for one (descriptor, mode) pair.
#[derive(Debug, Clone)]
pub struct RecipeContext<'a> {
    pub paths: Paths,
    pub mode: InstallMode,
    /// Profile after mode adjustments
    pub profile: BuildProfile,
    pub prefix: &'a str,
    elevate: &'a str,
}

impl<'a> RecipeContext<'a> {
    pub fn new(
        desc: &DependencyDescriptor,
        mode: InstallMode,
        profile: BuildProfile,
        settings: &'a Settings,
    ) -> Self {
        RecipeContext {
            paths: Paths::of(desc),
            mode,
            profile: mode.effective_profile(profile),
            prefix: mode.prefix(settings),
            elevate: settings.elevate.trim(),
        }
    }

    /// Prefix `command` with the elevation command when this mode needs it.
    pub fn elevated(&self, command: &str) -> String {
        if self.mode.elevated() && !self.elevate.is_empty() {
            format!("{} {}", self.elevate, command)
        } else {
            command.to_string()
        }
    }
}

/// Build-system specific knowledge.
///
/// Implemented by each kind's option struct, so the options a recipe sees
/// are always the ones declared for its own kind.
pub trait BuildRecipe {
    /// The kind this recipe builds.
    fn kind(&self) -> BuildSystemKind;

    /// File whose absence means the checkout still needs a recursive init.
    fn marker_file(&self) -> &'static str;

    /// Whether dev mode produces a debug build for this kind.
    fn supports_debug(&self) -> bool {
        false
    }

    /// Configure and compile steps.
    fn build_steps(&self, ctx: &RecipeContext<'_>) -> Vec<Step>;

    /// Install steps.
    fn install_steps(&self, ctx: &RecipeContext<'_>) -> Vec<Step>;

    /// Steps for the `clean-<name>` target.
    fn clean_steps(&self, paths: &Paths) -> Vec<Step> {
        vec![Step::Run(format!("rm -rf {}", paths.build_dir))]
    }
}

/// The recipe for a build system.
pub fn recipe_for(build_system: &BuildSystem) -> &dyn BuildRecipe {
    match build_system {
        BuildSystem::CMake(opts) => opts,
        BuildSystem::Autoconf(opts) => opts,
        BuildSystem::Make(opts) => opts,
        BuildSystem::Meson(opts) => opts,
    }
}

/// Notice emitted by dev targets of kinds without a debug recipe.
pub fn debug_unsupported_notice(kind: BuildSystemKind) -> String {
    format!("Debug build not configured for {} build system", kind)
}

/// The ordered build and install steps for `desc` in `mode`.
///
/// Never fails: problems such as missing tools surface when the generated
/// Makefile runs.
pub fn synthesize(
    desc: &DependencyDescriptor,
    mode: InstallMode,
    profile: BuildProfile,
    settings: &Settings,
) -> Vec<Step> {
    let recipe = recipe_for(desc.build_system());

    if mode == InstallMode::Dev && !recipe.supports_debug() {
        return vec![Step::Echo(debug_unsupported_notice(desc.kind()))];
    }

    let ctx = RecipeContext::new(desc, mode, profile, settings);
    let mut steps = recipe.build_steps(&ctx);
    steps.extend(recipe.install_steps(&ctx));

    tracing::debug!(
        "synthesized {} steps for {} ({}, {})",
        steps.len(),
        desc.name(),
        mode,
        ctx.profile
    );
    steps
}

/// Steps for the `clean-<name>` target.
pub fn clean_steps(desc: &DependencyDescriptor) -> Vec<Step> {
    recipe_for(desc.build_system()).clean_steps(&Paths::of(desc))
}

/// Marker file checked by the fetch target.
pub fn marker_file(desc: &DependencyDescriptor) -> &'static str {
    recipe_for(desc.build_system()).marker_file()
}
