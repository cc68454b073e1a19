//! The `help` target.

use crate::builder::{InstallMode, Step};
use crate::core::descriptor::DependencyDescriptor;
use crate::emit::names;
use crate::util::config::Settings;

/// Minimum width of the target-name column.
const MIN_NAME_WIDTH: usize = 17;

/// One `  <target> - <description>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub target: String,
    pub description: String,
}

impl HelpEntry {
    fn new(target: impl Into<String>, description: impl Into<String>) -> Self {
        HelpEntry {
            target: target.into(),
            description: description.into(),
        }
    }
}

/// A titled group of help entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub title: &'static str,
    pub entries: Vec<HelpEntry>,
}

/// The help entry for one descriptor in one mode.
pub fn mode_entry(desc: &DependencyDescriptor, mode: InstallMode, settings: &Settings) -> HelpEntry {
    let name = desc.name();
    let description = match mode {
        InstallMode::System if settings.elevate.trim().is_empty() => {
            format!("Build and install {}", name)
        }
        InstallMode::System => format!(
            "Build and install {} (requires {})",
            name,
            settings.elevate.trim()
        ),
        InstallMode::Local => format!("Build and install {} locally", name),
        InstallMode::Dev => format!("Build {} with debug symbols", name),
    };
    HelpEntry::new(names::mode_target(desc, mode), description)
}

/// The help entry for one descriptor's clean target.
pub fn clean_entry(desc: &DependencyDescriptor) -> HelpEntry {
    HelpEntry::new(
        names::clean(desc),
        format!("Remove {} build files", desc.name()),
    )
}

/// All help sections, in display order.
pub fn help_sections(descriptors: &[DependencyDescriptor], settings: &Settings) -> Vec<HelpSection> {
    let per_mode = |mode| {
        descriptors
            .iter()
            .map(|d| mode_entry(d, mode, settings))
            .collect::<Vec<_>>()
    };

    let mut clean = vec![HelpEntry::new(names::CLEAN, "Remove all build files")];
    clean.extend(descriptors.iter().map(clean_entry));
    clean.push(HelpEntry::new(
        names::DISTCLEAN,
        "Completely remove all libraries including submodules",
    ));

    vec![
        HelpSection {
            title: "Available targets:",
            entries: vec![
                HelpEntry::new(names::ALL, "Build and install all libraries system-wide"),
                HelpEntry::new(names::LOCAL, "Build and install all libraries locally"),
                HelpEntry::new(names::SUBMODULES, "Only add all submodules"),
                HelpEntry::new(names::UPDATE_SUBMODULES, "Update all submodules to latest"),
            ],
        },
        HelpSection {
            title: "Individual library targets (system-wide):",
            entries: per_mode(InstallMode::System),
        },
        HelpSection {
            title: "Individual library targets (local):",
            entries: per_mode(InstallMode::Local),
        },
        HelpSection {
            title: "Development targets:",
            entries: per_mode(InstallMode::Dev),
        },
        HelpSection {
            title: "Clean targets:",
            entries: clean,
        },
        HelpSection {
            title: "Utility targets:",
            entries: vec![
                HelpEntry::new(names::CHECK_DEPS, "Check for required build tools"),
                HelpEntry::new(names::INSTALL_DEPS, "Install build dependencies"),
                HelpEntry::new(names::HELP, "Show this help message"),
            ],
        },
    ]
}

/// Recipe of the `help` target.
pub fn help_steps(sections: &[HelpSection]) -> Vec<Step> {
    let width = sections
        .iter()
        .flat_map(|s| s.entries.iter())
        .map(|e| e.target.len())
        .max()
        .unwrap_or(0)
        .max(MIN_NAME_WIDTH);

    let mut steps = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            steps.push(Step::Echo(String::new()));
        }
        steps.push(Step::Echo(section.title.to_string()));
        if i == 0 {
            steps.push(Step::Echo(String::new()));
        }
        for entry in &section.entries {
            steps.push(Step::Echo(format!(
                "  {:<width$} - {}",
                entry.target,
                entry.description,
                width = width
            )));
        }
    }
    steps
}
