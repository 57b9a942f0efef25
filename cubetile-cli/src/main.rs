//! Cubetile CLI - Command-line interface
//!
//! Splits cube-map face images into level tiles, builds tile thumbnails and
//! checks written tiles against their sources.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use cubetile::config::ConfigFile;
use cubetile::logging::{init_logging, LogOptions};

use commands::common::{load_config, ThumbnailArgs, TilerArgs};
use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "cubetile", version, about = "Cube-map face tiling and thumbnails")]
struct Cli {
    /// Configuration file (default: ~/.cubetile/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log every tile and file written
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write log output to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Split each face image into the tiles of one or more levels
    Tile(TilerArgs),

    /// Resize matching tiles into thumb_* images
    Thumbnail(ThumbnailArgs),

    /// Check that tiles on disk rebuild their face images exactly
    Verify(TilerArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let _log_guard = init_logging(&LogOptions {
        verbose: cli.verbose,
        log_file: cli.log_file.clone(),
    })?;

    match &cli.command {
        Commands::Tile(args) => {
            let config = load_config(cli.config.as_ref())?;
            commands::tile::run(args, &config)
        }
        Commands::Thumbnail(args) => {
            let config = load_config(cli.config.as_ref())?;
            commands::thumbnail::run(args, &config)
        }
        Commands::Verify(args) => {
            let config = load_config(cli.config.as_ref())?;
            commands::verify::run(args, &config)
        }
        Commands::Config { command } => {
            // `config init` may target a file that does not exist yet
            let config = match cli.config.as_ref() {
                Some(path) if !path.exists() => ConfigFile::default(),
                other => load_config(other)?,
            };
            commands::config::run(command, &config, cli.config.as_ref())
        }
    }
}
