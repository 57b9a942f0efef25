//! Error types for the tiler module.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::grid::{GridError, TileCoord};

/// Result type for tiling operations.
pub type TileResult<T> = Result<T, TileError>;

/// Errors that can occur while tiling or verifying faces.
#[derive(Debug)]
pub enum TileError {
    /// Face source image does not exist.
    SourceNotFound(PathBuf),

    /// Image could not be decoded.
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Face image does not fit the requested grid.
    Grid { path: PathBuf, source: GridError },

    /// Failed to create the destination directory.
    CreateDirectory { path: PathBuf, source: io::Error },

    /// Failed to encode or write a tile.
    Write {
        path: PathBuf,
        source: image::ImageError,
    },

    /// Failed to list existing tiles.
    ListTiles(String),

    /// Tile missing from an assembly or verification.
    MissingTile(TileCoord),

    /// Tile supplied more than once to an assembly.
    DuplicateTile(TileCoord),

    /// Tile belongs to another face or level than the one being assembled.
    ForeignTile(TileCoord),

    /// Tile dimensions differ from the rest of the set.
    TileSizeMismatch {
        coord: TileCoord,
        expected: u32,
        width: u32,
        height: u32,
    },

    /// Tile colour type differs from the rest of the set.
    ColorTypeMismatch(TileCoord),

    /// Tile on disk differs from the matching region of the face source.
    VerifyMismatch { path: PathBuf, coord: TileCoord },

    /// Invalid tiler configuration.
    InvalidConfig(String),
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::SourceNotFound(path) => {
                write!(f, "face source not found: {}", path.display())
            }
            TileError::Decode { path, source } => {
                write!(f, "failed to decode {}: {}", path.display(), source)
            }
            TileError::Grid { path, source } => {
                write!(f, "cannot tile {}: {}", path.display(), source)
            }
            TileError::CreateDirectory { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            TileError::Write { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            TileError::ListTiles(msg) => {
                write!(f, "failed to list tiles: {}", msg)
            }
            TileError::MissingTile(coord) => {
                write!(f, "missing tile {}", coord)
            }
            TileError::DuplicateTile(coord) => {
                write!(f, "duplicate tile {}", coord)
            }
            TileError::ForeignTile(coord) => {
                write!(f, "tile {} does not belong to this face and level", coord)
            }
            TileError::TileSizeMismatch {
                coord,
                expected,
                width,
                height,
            } => {
                write!(
                    f,
                    "tile {} is {}×{}, expected {}×{}",
                    coord, width, height, expected, expected
                )
            }
            TileError::ColorTypeMismatch(coord) => {
                write!(f, "tile {} has a different colour type", coord)
            }
            TileError::VerifyMismatch { path, coord } => {
                write!(
                    f,
                    "tile {} ({}) does not match its face source",
                    path.display(),
                    coord
                )
            }
            TileError::InvalidConfig(msg) => {
                write!(f, "invalid tiler configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for TileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TileError::Decode { source, .. } => Some(source),
            TileError::Grid { source, .. } => Some(source),
            TileError::CreateDirectory { source, .. } => Some(source),
            TileError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}
