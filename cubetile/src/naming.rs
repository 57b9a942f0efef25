//! Centralized file naming conventions.
//!
//! This module is the single source of truth for every filename the tools
//! read or write:
//! - Face source images: `{prefix}{face}_0_0.{ext}` (e.g. `3_0_0.png`)
//! - Tiles: `{prefix}{level}_{face}_{row}_{col}.{ext}` (e.g. `3_1_0_2.png`)
//! - Thumbnails: `thumb_{original}` (e.g. `thumb_3_1_0_2.png`)
//!
//! The prefix separates parallel tile sets; colour tiles use no prefix and
//! elevation tiles use `e_` (e.g. `e_3_1_0_2.png`).

use regex::Regex;
use std::sync::OnceLock;

use crate::face::FaceIndex;
use crate::grid::{SubdivisionLevel, TileCoord};

/// Prefix prepended to thumbnail filenames.
pub const THUMBNAIL_PREFIX: &str = "thumb_";

/// Prefix used for elevation tile sets.
pub const ELEVATION_PREFIX: &str = "e_";

/// Parsed tile filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFilename {
    /// Tile set prefix, empty for the default set.
    pub prefix: String,
    /// Tile coordinate.
    pub coord: TileCoord,
    /// File extension without the dot.
    pub extension: String,
}

/// Error parsing a tile filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Filename doesn't match the tile pattern
    InvalidPattern,
    /// Level is not a valid subdivision level
    InvalidLevel(String),
    /// Face is not in 0–5
    InvalidFace(String),
    /// Row or column is outside the level's grid
    OutOfRange { row: u32, col: u32 },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidPattern => write!(f, "Filename doesn't match tile pattern"),
            ParseError::InvalidLevel(s) => write!(f, "Invalid subdivision level: {}", s),
            ParseError::InvalidFace(s) => write!(f, "Invalid face index: {}", s),
            ParseError::OutOfRange { row, col } => {
                write!(f, "Tile ({}, {}) is outside the level's grid", row, col)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Filename of a tile.
///
/// # Examples
///
/// ```
/// use cubetile::face::FaceIndex;
/// use cubetile::grid::{SubdivisionLevel, TileCoord};
/// use cubetile::naming::tile_filename;
///
/// let coord = TileCoord::new(
///     SubdivisionLevel::new(3).unwrap(),
///     FaceIndex::new(1).unwrap(),
///     0,
///     2,
/// ).unwrap();
/// assert_eq!(tile_filename("", &coord, "png"), "3_1_0_2.png");
/// assert_eq!(tile_filename("e_", &coord, "png"), "e_3_1_0_2.png");
/// ```
pub fn tile_filename(prefix: &str, coord: &TileCoord, extension: &str) -> String {
    format!(
        "{}{}_{}_{}_{}.{}",
        prefix, coord.level, coord.face, coord.row, coord.col, extension
    )
}

/// Filename of a top-level face source image.
///
/// # Examples
///
/// ```
/// use cubetile::face::FaceIndex;
/// use cubetile::naming::face_source_filename;
///
/// assert_eq!(face_source_filename("", FaceIndex::new(4).unwrap(), "png"), "4_0_0.png");
/// ```
pub fn face_source_filename(prefix: &str, face: FaceIndex, extension: &str) -> String {
    format!("{}{}_0_0.{}", prefix, face, extension)
}

/// Filename of the thumbnail generated from `original`.
pub fn thumbnail_filename(original: &str) -> String {
    format!("{}{}", THUMBNAIL_PREFIX, original)
}

/// Returns true if `name` is a generated thumbnail.
pub fn is_thumbnail(name: &str) -> bool {
    name.starts_with(THUMBNAIL_PREFIX)
}

/// Tile filename pattern.
///
/// - Group 1: optional set prefix (letters/digits starting with a letter, ending in `_`)
/// - Group 2: level
/// - Group 3: face
/// - Group 4: row
/// - Group 5: col
/// - Group 6: extension
fn tile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^((?:[A-Za-z][A-Za-z0-9]*_)?)(\d{1,3})_(\d{1,3})_(\d{1,10})_(\d{1,10})\.([A-Za-z0-9]+)$")
            .expect("tile filename pattern is valid")
    })
}

/// Parse a tile filename back into its prefix, coordinate and extension.
///
/// # Examples
///
/// ```
/// use cubetile::naming::parse_tile_filename;
///
/// let parsed = parse_tile_filename("e_3_1_0_2.png").unwrap();
/// assert_eq!(parsed.prefix, "e_");
/// assert_eq!(parsed.coord.level.value(), 3);
/// assert_eq!(parsed.coord.face.index(), 1);
/// assert_eq!((parsed.coord.row, parsed.coord.col), (0, 2));
/// assert_eq!(parsed.extension, "png");
/// ```
pub fn parse_tile_filename(filename: &str) -> Result<TileFilename, ParseError> {
    let captures = tile_pattern()
        .captures(filename)
        .ok_or(ParseError::InvalidPattern)?;

    let group = |i: usize| captures.get(i).map_or("", |m| m.as_str());

    let level_str = group(2);
    let level = level_str
        .parse::<SubdivisionLevel>()
        .map_err(|_| ParseError::InvalidLevel(level_str.to_string()))?;

    let face_str = group(3);
    let face = face_str
        .parse::<FaceIndex>()
        .map_err(|_| ParseError::InvalidFace(face_str.to_string()))?;

    let row = group(4)
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidPattern)?;
    let col = group(5)
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidPattern)?;

    let coord =
        TileCoord::new(level, face, row, col).map_err(|_| ParseError::OutOfRange { row, col })?;

    Ok(TileFilename {
        prefix: group(1).to_string(),
        coord,
        extension: group(6).to_string(),
    })
}
