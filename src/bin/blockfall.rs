use anyhow::Result;
use clap::{Parser, Subcommand};

use blockfall::{
    app::App,
    cli::commands::{export, inspect},
};

/// Tabular Q-learning toolkit for a falling-block puzzle game.
#[derive(Parser)]
#[command(name = "blockfall", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a saved model artifact.
    Inspect(inspect::InspectArgs),
    /// Export an experiment report to CSVs and a JSON summary.
    Export(export::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let app = App::new();

    match cli.command {
        Command::Inspect(args) => inspect::execute(&app, &args)?,
        Command::Export(args) => export::execute(&args)?,
    }

    Ok(())
}
