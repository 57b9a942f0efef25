//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use cubetile::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a configuration file with the current settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(
    command: &ConfigCommands,
    config: &ConfigFile,
    explicit_path: Option<&PathBuf>,
) -> Result<(), CliError> {
    let path = match explicit_path {
        Some(path) => path.clone(),
        None => config_file_path()?,
    };

    match command {
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => {
            let mut stdout = std::io::stdout().lock();
            write_config(config, &mut stdout)
        }
        ConfigCommands::Init { force } => run_init(config, &path, *force),
    }
}

/// Render the effective configuration as INI text.
fn write_config<W: Write>(config: &ConfigFile, out: &mut W) -> Result<(), CliError> {
    config.to_ini().write_to(out).map_err(CliError::Output)
}

/// Write the config file unless one already exists.
fn run_init(config: &ConfigFile, path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    config.save_to(path)?;
    println!("Configuration file: {}", path.display());
    println!();
    println!("Edit this file to customize tiling and thumbnail settings.");
    println!("CLI arguments override config file values when specified.");
    Ok(())
}
