//! List command implementation.
//!
//! Walks a directory for `.map.txt` files and prints a one-line summary of
//! each map it can parse.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use walkdir::WalkDir;

use crate::error::{MapError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::MapParser;
use crate::types::LayerKind;

/// List map files under a directory
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Also report files that fail to parse
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let printer = Printer::new();
    let parser = MapParser::new();
    let mut found = 0usize;

    for entry in WalkDir::new(&args.dir).sort_by_file_name() {
        let entry = entry.map_err(|e| MapError::Io {
            path: args.dir.clone(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() || !is_map_file(entry.path()) {
            continue;
        }

        let raw = fs::read_to_string(entry.path()).map_err(|e| MapError::Io {
            path: entry.path().to_path_buf(),
            message: e.to_string(),
        })?;
        match parser.parse(&raw)? {
            Some(doc) => {
                found += 1;
                let grid = doc
                    .grid
                    .as_ref()
                    .map(|g| format!("{}x{}", g.cols, g.rows))
                    .unwrap_or_else(|| "no grid".to_string());
                let entities = doc.images(LayerKind::Terrain).len()
                    + doc.images(LayerKind::Aura).len()
                    + doc.images(LayerKind::Token).len();
                printer.info(
                    "Map",
                    &format!(
                        "{} ({grid}, {}) {}",
                        doc.name,
                        plural(entities, "entity", "entities"),
                        printer.dim(&display_path(entry.path())),
                    ),
                );
            }
            None if args.all => {
                printer.warning("Unreadable", &display_path(entry.path()));
            }
            None => {}
        }
    }

    printer.status("Found", &plural(found, "map", "maps"));
    Ok(())
}

fn is_map_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".map.txt"))
}
