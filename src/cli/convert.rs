//! Convert command implementation.
//!
//! Map text in, flattened JSON out, and back again.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{MapError, Result};
use crate::flatten::flatten;
use crate::output::Printer;
use crate::parser::MapParser;
use crate::types::FlatMap;
use crate::writer::to_text;

/// Convert between map text and the flattened JSON shape
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input file; `.json` converts to map text, anything else to JSON
    pub file: PathBuf,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Treat the input as JSON regardless of extension
    #[arg(long, conflicts_with = "from_text")]
    pub from_json: bool,

    /// Treat the input as map text regardless of extension
    #[arg(long)]
    pub from_text: bool,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let printer = Printer::new();
    let raw = fs::read_to_string(&args.file).map_err(|e| MapError::Io {
        path: args.file.clone(),
        message: e.to_string(),
    })?;

    let json_input = args.from_json || (!args.from_text && has_extension(&args.file, "json"));
    let rendered = if json_input {
        let map: FlatMap =
            serde_json::from_str(&raw).map_err(|e| MapError::Parse {
                message: format!("{} is not a valid flattened map: {e}", args.file.display()),
                help: Some("expected the JSON shape produced by `gridmap convert`".to_string()),
            })?;
        to_text(&map)
    } else {
        let (doc, report) = MapParser::new().parse_with_report(&raw)?;
        for skipped in report.skipped() {
            printer.warning(
                "Skipping",
                &format!("[{}] entity: {}", skipped.label, skipped.reason),
            );
        }
        let doc = doc.ok_or_else(|| MapError::Parse {
            message: format!("{} contains no map", args.file.display()),
            help: Some("map text needs a [map] section with a name= line".to_string()),
        })?;
        let mut json =
            serde_json::to_string_pretty(&flatten(&doc)).map_err(|e| MapError::Parse {
                message: format!("failed to encode map: {e}"),
                help: None,
            })?;
        json.push('\n');
        json
    };

    match &args.output {
        Some(path) => fs::write(path, rendered).map_err(|e| MapError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ext)
}
