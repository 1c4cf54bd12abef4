//! Fmt command implementation.
//!
//! Canonical form is a full parse and re-serialize: sections land in layer
//! order, keys in their standard spelling, one entity per block.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{MapError, Result};
use crate::flatten::flatten;
use crate::output::{display_path, plural, Printer};
use crate::parser::parse;
use crate::writer::to_text;

/// Rewrite map text in canonical form
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Map text files to format
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Rewrite files in place instead of printing
    #[arg(long)]
    pub write: bool,

    /// Exit with an error if any file is not canonical
    #[arg(long, conflicts_with = "write")]
    pub check: bool,
}

pub fn run(args: FmtArgs) -> Result<()> {
    let printer = Printer::new();
    let mut dirty = 0usize;

    for file in &args.files {
        let raw = fs::read_to_string(file).map_err(|e| MapError::Io {
            path: file.clone(),
            message: e.to_string(),
        })?;
        let doc = parse(&raw)?.ok_or_else(|| MapError::Parse {
            message: format!("{} contains no map", file.display()),
            help: Some("map text needs a [map] section with a name= line".to_string()),
        })?;
        let canonical = to_text(&flatten(&doc));

        if args.check {
            if canonical != raw {
                printer.warning("Differs", &display_path(file));
                dirty += 1;
            }
        } else if args.write {
            if canonical != raw {
                fs::write(file, &canonical).map_err(|e| MapError::Io {
                    path: file.clone(),
                    message: e.to_string(),
                })?;
                printer.status("Formatted", &display_path(file));
            }
        } else {
            print!("{canonical}");
        }
    }

    if dirty > 0 {
        return Err(MapError::Parse {
            message: format!("{} not in canonical form", plural(dirty, "file is", "files are")),
            help: Some("run `gridmap fmt --write` to fix".to_string()),
        });
    }
    Ok(())
}
