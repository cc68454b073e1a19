//! `submake list` command

use anyhow::Result;

use crate::cli::ListArgs;
use crate::commands::load_manifest;

pub fn execute(args: ListArgs) -> Result<()> {
    let manifest = load_manifest(args.config.as_deref())?;
    let descriptors = manifest.to_descriptors()?;

    if descriptors.is_empty() {
        println!("No submodules configured.");
        return Ok(());
    }

    let width = descriptors.iter().map(|d| d.name().len()).max().unwrap_or(0);

    for desc in &descriptors {
        println!(
            "{:<width$}  {:<8}  {} -> {}",
            desc.name(),
            desc.kind().as_str(),
            desc.directory(),
            desc.build_directory(),
            width = width
        );
        if !desc.depends_on().is_empty() {
            println!("{:<width$}  depends on: {}", "", desc.depends_on().join(", "), width = width);
        }
    }

    Ok(())
}
