//! `submake generate` command

use std::io;

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::{load_manifest, load_settings};
use submake::ops::{generate, prompt_descriptors, GenerateOptions, GenerateOutcome};

pub fn execute(args: GenerateArgs) -> Result<()> {
    let manifest = if args.interactive {
        let stdin = io::stdin();
        prompt_descriptors(&mut stdin.lock(), &mut io::stdout())?
    } else {
        load_manifest(args.config.as_deref())?
    };

    let options = GenerateOptions {
        output: args.output,
        order: args.order.into(),
        settings: load_settings()?,
    };

    match generate(&manifest, &options)? {
        GenerateOutcome::Empty => {
            println!("No submodules configured. Exiting.");
        }
        GenerateOutcome::Written {
            makefile,
            config,
            submodules,
        } => {
            println!("Makefile generated successfully: {}", makefile.display());
            println!("Configuration saved to: {}", config.display());
            println!("Generated targets for {} submodules", submodules);

            let example = manifest
                .submodules
                .first()
                .map(|s| s.name.as_str())
                .unwrap_or("<name>");
            println!();
            println!("Usage examples:");
            println!("  make all           # Build and install all libraries");
            println!("  make {:<13} # Build and install specific library", example);
            println!("  make local         # Local installation");
            println!("  make check-deps    # Check dependencies");
            println!("  make help          # Show all targets");
        }
    }

    Ok(())
}
