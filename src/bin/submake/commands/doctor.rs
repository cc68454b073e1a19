//! `submake doctor` command

use anyhow::Result;

use crate::cli::DoctorArgs;
use crate::commands::load_manifest;
use submake::ops::{doctor, format_report};

pub fn execute(args: DoctorArgs, verbose: bool) -> Result<()> {
    let manifest = load_manifest(args.config.as_deref())?;
    let descriptors = manifest.to_descriptors()?;

    let report = doctor(&descriptors);
    print!("{}", format_report(&report, verbose));

    if !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
