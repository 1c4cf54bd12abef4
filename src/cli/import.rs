//! Import command implementation.
//!
//! Parses map text files and appends them to a JSON map store, numbering
//! duplicate names.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::edit::add_map;
use crate::error::{MapError, Result};
use crate::flatten::flatten;
use crate::output::{display_path, plural, Printer};
use crate::parser::MapParser;
use crate::store::MapStore;

/// Import map text files into a map store
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Map text files to import
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Store file to import into
    #[arg(long, short, default_value = "maps.json")]
    pub store: PathBuf,

    /// Make the last imported map the active one
    #[arg(long)]
    pub activate: bool,
}

pub fn run(args: ImportArgs) -> Result<()> {
    let printer = Printer::new();
    let parser = MapParser::new();
    let store = MapStore::new(&args.store);
    let mut data = store.load()?;

    let mut imported = 0usize;
    let mut last_index = None;
    for file in &args.files {
        let raw = fs::read_to_string(file).map_err(|e| MapError::Io {
            path: file.clone(),
            message: e.to_string(),
        })?;
        let Some(doc) = parser.parse(&raw)? else {
            printer.warning("Skipping", &format!("{} contains no map", display_path(file)));
            continue;
        };

        let index = add_map(&mut data.maps, flatten(&doc));
        printer.status(
            "Importing",
            &format!("{} from {}", data.maps[index].name, display_path(file)),
        );
        last_index = Some(index);
        imported += 1;
    }

    if args.activate {
        if let Some(index) = last_index {
            data.index = index;
        }
    }
    store.save(&data)?;

    printer.status(
        "Imported",
        &format!("{} into {}", plural(imported, "map", "maps"), display_path(&args.store)),
    );
    Ok(())
}
