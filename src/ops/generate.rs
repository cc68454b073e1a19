//! Implementation of `submake generate`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::graph::TargetOrder;
use crate::core::manifest::Manifest;
use crate::emit::{regenerate_command, MakefileGenerator, CONFIG_SUFFIX, DEFAULT_OUTPUT};
use crate::util::config::Settings;
use crate::util::fs;

/// Options for generating a Makefile.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Path of the generated Makefile
    pub output: PathBuf,

    /// Target ordering
    pub order: TargetOrder,

    /// Effective settings
    pub settings: Settings,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            output: PathBuf::from(DEFAULT_OUTPUT),
            order: TargetOrder::default(),
            settings: Settings::default(),
        }
    }
}

/// What `generate` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// No submodules were configured; nothing was written.
    Empty,

    /// The Makefile and its companion configuration were written.
    Written {
        makefile: PathBuf,
        config: PathBuf,
        submodules: usize,
    },
}

/// Companion configuration path for a Makefile: `<output>.config.json`.
pub fn companion_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_OUTPUT.into());
    name.push(CONFIG_SUFFIX);
    output.with_file_name(name)
}

/// Generate a Makefile for `manifest`.
///
/// Every descriptor is constructed and the Makefile is rendered before
/// anything touches the filesystem, so a failure leaves no files behind.
pub fn generate(manifest: &Manifest, options: &GenerateOptions) -> Result<GenerateOutcome> {
    let descriptors = manifest
        .to_descriptors()
        .context("invalid submodule configuration")?;

    if descriptors.is_empty() {
        tracing::debug!("no submodules configured");
        return Ok(GenerateOutcome::Empty);
    }

    let output = &options.output;
    let makefile = MakefileGenerator::new(&descriptors, &options.settings)
        .order(options.order)
        .regenerate_hint(regenerate_command(
            &output.display().to_string(),
            options.order,
        ))
        .generate()
        .context("failed to order submodules")?;

    let config = companion_path(output);
    let companion = Manifest::from_descriptors(&descriptors).to_json()?;

    fs::write_string(output, &makefile)?;
    fs::set_executable(output)?;
    fs::write_string(&config, &companion)?;

    tracing::debug!(
        "wrote {} and {}",
        output.display(),
        config.display()
    );

    Ok(GenerateOutcome::Written {
        makefile: output.clone(),
        config,
        submodules: descriptors.len(),
    })
}
