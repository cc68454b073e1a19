//! Interactive submodule entry for `submake generate --interactive`.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::core::build_system::BuildSystemKind;
use crate::core::descriptor::validate_name;
use crate::core::manifest::{Manifest, SubmoduleSpec};

/// Prompt for submodules until an empty name (or end of input).
///
/// Invalid names and build systems are reported and asked for again; an
/// empty URL restarts the current entry.
pub fn prompt_descriptors<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Manifest> {
    let mut manifest = Manifest::default();

    writeln!(out, "=== Makefile Generator for Git Submodules ===")?;
    writeln!(out, "Enter submodule configurations (leave name empty when done):")?;

    'entries: loop {
        writeln!(out)?;
        writeln!(out, "Submodule #{}:", manifest.submodules.len() + 1)?;

        let name = loop {
            let Some(name) = ask(input, out, "Name (e.g., glog, libmodbus): ")? else {
                break 'entries;
            };
            if name.is_empty() {
                break 'entries;
            }
            match validate_name(&name) {
                Ok(()) => break name,
                Err(e) => writeln!(out, "{}", e)?,
            }
        };

        let Some(url) = ask(input, out, &format!("Git URL for {}: ", name))? else {
            break;
        };
        if url.is_empty() {
            writeln!(out, "URL is required!")?;
            continue;
        }

        writeln!(
            out,
            "Available build systems: {}",
            BuildSystemKind::names().join(", ")
        )?;
        let kind = loop {
            let Some(answer) = ask(input, out, &format!("Build system for {}: ", name))? else {
                break 'entries;
            };
            match answer.parse::<BuildSystemKind>() {
                Ok(kind) => break kind,
                Err(e) => writeln!(out, "{}", e)?,
            }
        };

        let Some(directory) = ask(
            input,
            out,
            &format!("Directory name [default: {}]: ", name),
        )?
        else {
            break;
        };

        let mut spec = SubmoduleSpec::new(name.as_str(), url, kind.as_str());
        spec.directory = Some(if directory.is_empty() {
            name.clone()
        } else {
            directory
        });
        manifest.submodules.push(spec);

        writeln!(out, "Added {}", name)?;
    }

    Ok(manifest)
}

/// Print `prompt` and read one trimmed line; `None` at end of input.
fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
