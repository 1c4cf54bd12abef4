use clap::Parser;
use miette::Result;
use gridmap::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert(args) => gridmap::cli::convert::run(args)?,
        Commands::Fmt(args) => gridmap::cli::fmt::run(args)?,
        Commands::List(args) => gridmap::cli::list::run(args)?,
        Commands::Import(args) => gridmap::cli::import::run(args)?,
        Commands::Completions(args) => gridmap::cli::completions::run(args)?,
    }

    Ok(())
}
