//! Argument types and config resolution shared across CLI commands.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use cubetile::config::ConfigFile;
use cubetile::face::FaceIndex;
use cubetile::grid::parse_levels;
use cubetile::thumbnail::{ResizeFilter, ThumbnailConfig};
use cubetile::tiler::TilerConfig;

use crate::error::CliError;

/// Tiler arguments, shared by `tile` and `verify`.
#[derive(Debug, Clone, Default, Args)]
pub struct TilerArgs {
    /// Directory containing the {face}_0_0 face images
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Directory tiles are written to
    #[arg(long)]
    pub destination: Option<PathBuf>,

    /// Subdivision level(s): a single level, a range (1-4) or a list (2,4)
    #[arg(long, alias = "level", value_name = "LEVELS")]
    pub levels: Option<String>,

    /// Face to process (repeatable, 0-5); all six by default
    #[arg(long = "face", value_name = "FACE", value_parser = parse_face)]
    pub faces: Vec<FaceIndex>,

    /// Image file extension of face sources and tiles
    #[arg(long)]
    pub extension: Option<String>,

    /// Tile set prefix (e.g. e_ for elevation tiles)
    #[arg(long)]
    pub prefix: Option<String>,
}

fn parse_face(s: &str) -> Result<FaceIndex, String> {
    s.parse::<FaceIndex>().map_err(|e| e.to_string())
}

/// Resampling filter selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum FilterArg {
    /// Nearest neighbour (fastest, blocky)
    Nearest,
    /// Bilinear
    Triangle,
    /// Bicubic
    Catmullrom,
    /// Gaussian blur
    Gaussian,
    /// Lanczos, window 3 (sharpest)
    Lanczos3,
}

impl From<FilterArg> for ResizeFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::Nearest => ResizeFilter::Nearest,
            FilterArg::Triangle => ResizeFilter::Triangle,
            FilterArg::Catmullrom => ResizeFilter::CatmullRom,
            FilterArg::Gaussian => ResizeFilter::Gaussian,
            FilterArg::Lanczos3 => ResizeFilter::Lanczos3,
        }
    }
}

/// Thumbnail arguments.
#[derive(Debug, Clone, Default, Args)]
pub struct ThumbnailArgs {
    /// Directory scanned for tiles
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Filename glob selecting tiles (e.g. "3_*")
    #[arg(long)]
    pub pattern: Option<String>,

    /// Directory thumbnails are written to
    #[arg(long)]
    pub destination: Option<PathBuf>,

    /// Thumbnail side length in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Resampling filter
    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,
}

/// Load the config file named on the command line, or the default one.
pub fn load_config(path: Option<&PathBuf>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Resolve tiler settings from CLI args and config.
pub fn resolve_tiler_config(
    args: &TilerArgs,
    config: &ConfigFile,
) -> Result<TilerConfig, CliError> {
    // CLI takes precedence, then config
    let mut tiler = config.tiler.to_tiler_config();

    if let Some(source) = &args.source {
        tiler.source_dir = source.clone();
    }
    if let Some(destination) = &args.destination {
        tiler.destination_dir = destination.clone();
    }
    if let Some(levels) = &args.levels {
        tiler.levels = parse_levels(levels)?;
    }
    if !args.faces.is_empty() {
        let mut faces = args.faces.clone();
        faces.sort();
        faces.dedup();
        tiler.faces = faces;
    }
    if let Some(extension) = &args.extension {
        tiler.extension = extension.trim_start_matches('.').to_string();
    }
    if let Some(prefix) = &args.prefix {
        tiler.prefix = prefix.clone();
    }

    Ok(tiler)
}

/// Resolve thumbnail settings from CLI args and config.
pub fn resolve_thumbnail_config(args: &ThumbnailArgs, config: &ConfigFile) -> ThumbnailConfig {
    let settings = &config.thumbnail;

    ThumbnailConfig::new(
        args.source.clone().unwrap_or_else(|| settings.source.clone()),
        args.pattern.clone().unwrap_or_else(|| settings.pattern.clone()),
    )
    .with_destination(
        args.destination
            .clone()
            .unwrap_or_else(|| settings.destination.clone()),
    )
    .with_size(args.size.unwrap_or(settings.size))
    .with_filter(args.filter.map(ResizeFilter::from).unwrap_or(settings.filter))
}
