//! idmanifest - Generate a sorted manifest of item identifiers

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use idmanifest::commands;
use idmanifest::config::{self, Overrides};
use idmanifest::logging;

#[derive(Parser)]
#[command(name = "idmanifest")]
#[command(author, version, about = "Write a sorted JSON manifest of the *.json item files in a directory")]
struct Cli {
    /// Config file (defaults to ./idmanifest.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the per-item JSON files
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Manifest file to write
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the data directory and write the manifest (default)
    Generate,

    /// Exit non-zero if the manifest on disk is missing or out of date
    Check,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = Overrides {
        config_file: cli.config,
        data_dir: cli.data_dir,
        manifest_file: cli.output,
    };
    let config = config::load_config(&overrides).context("Failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Generate) {
        Commands::Generate => {
            commands::generate(&config)?;
        }
        Commands::Check => {
            commands::check(&config)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        tracing::debug!("{:?}", err);
        for line in commands::error_report(&err) {
            println!("{}", line);
        }
        std::process::exit(1);
    }
}
