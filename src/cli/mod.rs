pub mod completions;
pub mod convert;
pub mod fmt;
pub mod import;
pub mod list;

use clap::{Parser, Subcommand};

/// gridmap - Plain-text tabletop map codec
#[derive(Parser, Debug)]
#[command(name = "gridmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert between map text and the flattened JSON shape
    Convert(convert::ConvertArgs),

    /// Rewrite map text in canonical form
    Fmt(fmt::FmtArgs),

    /// List map files under a directory
    List(list::ListArgs),

    /// Import map text files into a map store
    Import(import::ImportArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
