//! Makefile generation.
//!
//! Combines the per-descriptor recipes into one Makefile. Sections are
//! always emitted in the same order:
//!
//! 1. Header and the `all` target
//! 2. Directory variables
//! 3. Submodule fetch targets and `update-submodules`
//! 4. System, local and dev install targets
//! 5. `clean`, per-descriptor clean targets and `distclean`
//! 6. `check-deps`, `install-deps` and `help`
//!
//! The output is a pure function of the descriptor list and the settings.

pub mod help;
pub mod names;
pub mod toolcheck;
pub mod writer;

use crate::builder::{self, BuildProfile, InstallMode, Step};
use crate::core::descriptor::DependencyDescriptor;
use crate::core::errors::DescriptorError;
use crate::core::graph::{known_dependencies, order_descriptors, TargetOrder};
use crate::util::config::Settings;

pub use help::{help_sections, HelpEntry, HelpSection};
pub use toolcheck::{kinds_present, required_packages, required_tools, Tool};
pub use writer::MakefileWriter;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "Makefile";

/// Suffix of the companion configuration written next to the Makefile.
pub const CONFIG_SUFFIX: &str = ".config.json";

/// Generates a Makefile for a list of descriptors.
#[derive(Debug, Clone)]
pub struct MakefileGenerator<'a> {
    descriptors: &'a [DependencyDescriptor],
    settings: &'a Settings,
    order: TargetOrder,
    regenerate_hint: Option<String>,
}

impl<'a> MakefileGenerator<'a> {
    pub fn new(descriptors: &'a [DependencyDescriptor], settings: &'a Settings) -> Self {
        MakefileGenerator {
            descriptors,
            settings,
            order: TargetOrder::Input,
            regenerate_hint: None,
        }
    }

    /// Set how targets are ordered.
    pub fn order(mut self, order: TargetOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the command shown in the header comment.
    ///
    /// Defaults to regenerating `Makefile` with the configured order.
    pub fn regenerate_hint(mut self, hint: impl Into<String>) -> Self {
        self.regenerate_hint = Some(hint.into());
        self
    }

    /// Render the Makefile.
    ///
    /// Only fails when dependency ordering is requested and the
    /// dependencies form a cycle.
    pub fn generate(&self) -> Result<String, DescriptorError> {
        let descriptors = order_descriptors(self.descriptors, self.order)?;
        let emitter = Emitter {
            descriptors: &descriptors,
            settings: self.settings,
            order: self.order,
        };

        let mut w = MakefileWriter::new();
        let hint = self
            .regenerate_hint
            .clone()
            .unwrap_or_else(|| regenerate_command(DEFAULT_OUTPUT, self.order));
        emitter.header(&mut w, &hint);
        emitter.variables(&mut w);
        emitter.fetch_targets(&mut w);
        emitter.system_targets(&mut w);
        emitter.local_targets(&mut w);
        emitter.dev_targets(&mut w);
        emitter.clean_targets(&mut w);
        emitter.distclean_target(&mut w);
        emitter.check_deps_target(&mut w);
        emitter.install_deps_target(&mut w);
        emitter.help_target(&mut w);

        tracing::debug!("generated Makefile for {} submodules", descriptors.len());
        Ok(w.finish())
    }
}

/// The header's regeneration command for an output path.
///
/// Points at the companion configuration, so regenerating from it yields
/// the same header.
pub fn regenerate_command(output: &str, order: TargetOrder) -> String {
    let mut command = format!("submake generate {}{} -o {}", output, CONFIG_SUFFIX, output);
    if order == TargetOrder::Dependencies {
        command.push_str(" --order dependencies");
    }
    command
}

struct Emitter<'a> {
    descriptors: &'a [DependencyDescriptor],
    settings: &'a Settings,
    order: TargetOrder,
}

impl Emitter<'_> {
    fn names<F>(&self, f: F) -> Vec<String>
    where
        F: Fn(&DependencyDescriptor) -> String,
    {
        self.descriptors.iter().map(f).collect()
    }

    /// Prerequisites of a mode target: the fetch target, then the matching
    /// targets of known dependencies when ordering by dependencies.
    fn mode_prereqs(&self, desc: &DependencyDescriptor, mode: InstallMode) -> Vec<String> {
        let mut prereqs = vec![names::fetch(desc)];
        if self.order == TargetOrder::Dependencies {
            // Dev builds install into the system prefix, so they need the
            // dependencies' system installs.
            let dep_mode = match mode {
                InstallMode::Local => InstallMode::Local,
                InstallMode::System | InstallMode::Dev => InstallMode::System,
            };
            for name in known_dependencies(desc, self.descriptors) {
                if let Some(dep) = self.descriptors.iter().find(|d| d.name() == name) {
                    prereqs.push(names::mode_target(dep, dep_mode));
                }
            }
        }
        prereqs
    }

    fn header(&self, w: &mut MakefileWriter, hint: &str) {
        w.comment("Generated Makefile for managing submodules with different build systems")
            .comment(&format!("To regenerate: {}", hint))
            .blank()
            .comment("Default target - builds all libraries")
            .phony(
                names::ALL,
                &self.names(|d| names::mode_target(d, InstallMode::System)),
                &[],
            )
            .blank();
    }

    fn variables(&self, w: &mut MakefileWriter) {
        w.comment("Directory definitions");
        w.line(format!(
            "JOBS ?= $(shell nproc 2>/dev/null || echo {})",
            self.settings.fallback_jobs
        ));
        w.line(format!("LOCAL_PREFIX ?= {}", self.settings.local_prefix));
        for desc in self.descriptors {
            let var = desc.var_prefix();
            w.line(format!("{}_DIR ?= {}", var, desc.directory()));
            w.line(format!("{}_BUILD_DIR = $({}_DIR)/build", var, var));
        }
        w.blank();
    }

    fn fetch_targets(&self, w: &mut MakefileWriter) {
        w.comment("Submodule management targets");
        w.phony::<String>(names::SUBMODULES, &self.names(names::fetch), &[])
            .blank();

        for desc in self.descriptors {
            let dir = desc.dir_var();
            let name = desc.name();
            let steps = [
                Step::Quiet(format!(
                    "if [ ! -e \"{dir}/.git\" ]; then \\\n\
                     \t\techo \"Adding {name} submodule...\"; \\\n\
                     \t\tgit submodule add {url} {dir}; \\\n\
                     \telse \\\n\
                     \t\techo \"{name} submodule already exists\"; \\\n\
                     \tfi",
                    dir = dir,
                    name = name,
                    url = desc.url(),
                )),
                Step::Quiet(format!(
                    "if [ ! -f \"{dir}/{marker}\" ]; then \\\n\
                     \t\tgit submodule update --init --recursive {dir}; \\\n\
                     \tfi",
                    dir = dir,
                    marker = builder::marker_file(desc),
                )),
            ];
            w.phony::<&str>(&names::fetch(desc), &[], &steps).blank();
        }

        w.comment("Update all submodules");
        w.phony::<&str>(
            names::UPDATE_SUBMODULES,
            &[],
            &[
                Step::Echo("Updating all submodules...".to_string()),
                Step::Run("git submodule update --remote --merge".to_string()),
            ],
        )
        .blank();
    }

    fn mode_target(&self, w: &mut MakefileWriter, desc: &DependencyDescriptor, mode: InstallMode) {
        let name = desc.name();
        let mut steps = vec![Step::Echo(match mode {
            InstallMode::System => format!("Building and installing {}...", name),
            InstallMode::Local => format!("Building and installing {} locally...", name),
            InstallMode::Dev => format!("Building {} with debug symbols...", name),
        })];

        let synthesized = builder::synthesize(desc, mode, BuildProfile::Release, self.settings);
        let built = !matches!(synthesized.as_slice(), [Step::Echo(_)]);
        steps.extend(synthesized);

        match mode {
            InstallMode::System => steps.push(Step::Echo(format!("{} installed successfully", name))),
            InstallMode::Local => steps.push(Step::Echo(format!(
                "{} installed to: $(LOCAL_PREFIX)",
                name
            ))),
            InstallMode::Dev if built => {
                steps.push(Step::Echo(format!("{} debug build installed", name)))
            }
            InstallMode::Dev => {}
        }

        w.phony(
            &names::mode_target(desc, mode),
            &self.mode_prereqs(desc, mode),
            &steps,
        )
        .blank();
    }

    fn system_targets(&self, w: &mut MakefileWriter) {
        w.comment("Build targets (system-wide installation)");
        for desc in self.descriptors {
            self.mode_target(w, desc, InstallMode::System);
        }
    }

    fn local_targets(&self, w: &mut MakefileWriter) {
        w.comment("Local installation targets (no sudo required)");
        w.phony::<String>(
            names::LOCAL,
            &self.names(|d| names::mode_target(d, InstallMode::Local)),
            &[],
        )
        .blank();
        for desc in self.descriptors {
            self.mode_target(w, desc, InstallMode::Local);
        }
    }

    fn dev_targets(&self, w: &mut MakefileWriter) {
        w.comment("Development mode targets (with debugging symbols)");
        for desc in self.descriptors {
            self.mode_target(w, desc, InstallMode::Dev);
        }
    }

    fn clean_targets(&self, w: &mut MakefileWriter) {
        w.comment("Clean targets");
        w.phony::<String>(names::CLEAN, &self.names(names::clean), &[])
            .blank();
        for desc in self.descriptors {
            w.phony::<&str>(&names::clean(desc), &[], &builder::clean_steps(desc))
                .blank();
        }
    }

    fn distclean_target(&self, w: &mut MakefileWriter) {
        let mut steps = vec![Step::Echo("Removing all submodules...".to_string())];
        for desc in self.descriptors {
            let dir = desc.dir_var();
            steps.push(Step::Tolerant(format!("git submodule deinit -f {}", dir)));
            steps.push(Step::Tolerant(format!("git rm -f {}", dir)));
            steps.push(Step::Tolerant(format!("rm -rf .git/modules/{}", dir)));
            steps.push(Step::Tolerant(format!("rm -rf {}", dir)));
        }

        w.comment("Distclean (remove everything including submodules)");
        w.phony(names::DISTCLEAN, &[names::CLEAN], &steps).blank();
    }

    fn check_deps_target(&self, w: &mut MakefileWriter) {
        let kinds = kinds_present(self.descriptors);
        let mut steps = vec![Step::Echo("Checking build dependencies...".to_string())];
        steps.extend(required_tools(&kinds).iter().map(Tool::probe));
        steps.push(Step::Echo("Dependency check complete".to_string()));

        w.comment("Check dependencies");
        w.phony::<&str>(names::CHECK_DEPS, &[], &steps).blank();
    }

    fn install_deps_target(&self, w: &mut MakefileWriter) {
        let kinds = kinds_present(self.descriptors);
        let steps = [
            Step::Run(self.settings.package_update.clone()),
            Step::Run(format!(
                "{} {}",
                self.settings.package_install,
                required_packages(&kinds).join(" ")
            )),
        ];

        w.comment("Install build dependencies");
        w.phony::<&str>(names::INSTALL_DEPS, &[], &steps).blank();
    }

    fn help_target(&self, w: &mut MakefileWriter) {
        let sections = help_sections(self.descriptors, self.settings);
        w.comment("Help target");
        w.phony::<&str>(names::HELP, &[], &help::help_steps(&sections));
    }
}
