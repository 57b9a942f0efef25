//! Core types for the tile grid.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::face::FaceIndex;

/// Lowest valid subdivision level (a single tile covering the whole face).
pub const MIN_LEVEL: u8 = 1;

/// Highest supported subdivision level (32768 × 32768 tiles per face).
pub const MAX_LEVEL: u8 = 16;

/// Errors raised by grid arithmetic and identifier parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Subdivision level outside `MIN_LEVEL..=MAX_LEVEL`.
    #[error("Invalid subdivision level {0} (expected {MIN_LEVEL}-{MAX_LEVEL})")]
    InvalidLevel(u8),

    /// Subdivision level text that is not a number or range.
    #[error("Invalid subdivision level '{0}'")]
    InvalidLevelValue(String),

    /// Face index outside 0–5.
    #[error("Invalid face index {0} (expected 0-5)")]
    InvalidFace(u8),

    /// Face index text that is not a number.
    #[error("Invalid face index '{0}'")]
    InvalidFaceValue(String),

    /// The face image has no pixels.
    #[error("Face image is empty")]
    EmptyImage,

    /// The face image is not square.
    #[error("Face image is not square: {width}×{height}")]
    NotSquare { width: u32, height: u32 },

    /// The face side does not split evenly into the level's grid.
    #[error(
        "Face side {side}px is not divisible into {divisions}×{divisions} tiles at level {level}"
    )]
    NotDivisible {
        side: u32,
        level: u8,
        divisions: u32,
    },

    /// Row or column outside the grid.
    #[error("Tile ({row}, {col}) is outside a {divisions}×{divisions} grid")]
    TileOutOfRange { row: u32, col: u32, divisions: u32 },
}

/// Subdivision level `L`, controlling a `2^(L-1)` × `2^(L-1)` tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubdivisionLevel(u8);

impl SubdivisionLevel {
    /// Create a level, rejecting 0 and anything above [`MAX_LEVEL`].
    pub fn new(level: u8) -> Result<Self, GridError> {
        if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            Ok(Self(level))
        } else {
            Err(GridError::InvalidLevel(level))
        }
    }

    /// Raw level number.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Number of rows (and columns) of tiles: `2^(L-1)`.
    pub fn grid_dimension(self) -> u32 {
        1u32 << (self.0 - 1)
    }

    /// Total number of tiles per face at this level.
    pub fn tile_count(self) -> u64 {
        let n = u64::from(self.grid_dimension());
        n * n
    }
}

impl fmt::Display for SubdivisionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubdivisionLevel {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s
            .trim()
            .parse::<u8>()
            .map_err(|_| GridError::InvalidLevelValue(s.to_string()))?;
        SubdivisionLevel::new(level)
    }
}

/// Identifier of one tile: `(level, face, row, col)`.
///
/// `row` runs down the face image (pixel y), `col` runs across it (pixel x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileCoord {
    pub level: SubdivisionLevel,
    pub face: FaceIndex,
    pub row: u32,
    pub col: u32,
}

impl TileCoord {
    /// Create a tile coordinate, checking row and column against the level's grid.
    pub fn new(
        level: SubdivisionLevel,
        face: FaceIndex,
        row: u32,
        col: u32,
    ) -> Result<Self, GridError> {
        let divisions = level.grid_dimension();
        if row >= divisions || col >= divisions {
            return Err(GridError::TileOutOfRange {
                row,
                col,
                divisions,
            });
        }
        Ok(Self {
            level,
            face,
            row,
            col,
        })
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "L{} face {} ({}, {})",
            self.level, self.face, self.row, self.col
        )
    }
}

/// Pixel rectangle covered by one tile.
///
/// Covers `x..x + size` horizontally and `y..y + size` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRegion {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

impl TileRegion {
    /// Returns true if the pixel lies inside this region.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x + self.size && py >= self.y && py < self.y + self.size
    }
}

/// Validated pairing of a face side length with a subdivision level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    side: u32,
    level: SubdivisionLevel,
    divisions: u32,
    tile_side: u32,
}

impl TileGrid {
    /// Build the grid for a square face of `side` pixels.
    ///
    /// # Errors
    ///
    /// - [`GridError::EmptyImage`] if `side` is zero
    /// - [`GridError::NotDivisible`] if `side` is not a multiple of `2^(L-1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use cubetile::grid::{SubdivisionLevel, TileGrid};
    ///
    /// let grid = TileGrid::new(2048, SubdivisionLevel::new(3).unwrap()).unwrap();
    /// assert_eq!(grid.divisions(), 4);
    /// assert_eq!(grid.tile_side(), 512);
    ///
    /// assert!(TileGrid::new(1000, SubdivisionLevel::new(5).unwrap()).is_err());
    /// ```
    pub fn new(side: u32, level: SubdivisionLevel) -> Result<Self, GridError> {
        if side == 0 {
            return Err(GridError::EmptyImage);
        }

        let divisions = level.grid_dimension();
        if side % divisions != 0 {
            return Err(GridError::NotDivisible {
                side,
                level: level.value(),
                divisions,
            });
        }

        Ok(Self {
            side,
            level,
            divisions,
            tile_side: side / divisions,
        })
    }

    /// Build the grid for an image of the given dimensions, which must be square.
    pub fn for_dimensions(
        width: u32,
        height: u32,
        level: SubdivisionLevel,
    ) -> Result<Self, GridError> {
        if width != height {
            return Err(GridError::NotSquare { width, height });
        }
        Self::new(width, level)
    }

    /// Face side length in pixels.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Subdivision level of this grid.
    pub fn level(&self) -> SubdivisionLevel {
        self.level
    }

    /// Number of rows (and columns) of tiles.
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Side length of every tile in pixels.
    pub fn tile_side(&self) -> u32 {
        self.tile_side
    }

    /// Pixel region of the tile at `(row, col)`.
    pub fn region(&self, row: u32, col: u32) -> Result<TileRegion, GridError> {
        if row >= self.divisions || col >= self.divisions {
            return Err(GridError::TileOutOfRange {
                row,
                col,
                divisions: self.divisions,
            });
        }
        Ok(TileRegion {
            x: col * self.tile_side,
            y: row * self.tile_side,
            size: self.tile_side,
        })
    }

    /// Iterate every tile of `face` in row-major order.
    pub fn regions(&self, face: FaceIndex) -> TileRegions {
        TileRegions {
            grid: *self,
            face,
            row: 0,
            col: 0,
        }
    }
}

/// Row-major iterator over the tiles of one face.
#[derive(Debug, Clone)]
pub struct TileRegions {
    grid: TileGrid,
    face: FaceIndex,
    row: u32,
    col: u32,
}

impl Iterator for TileRegions {
    type Item = (TileCoord, TileRegion);

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.grid.divisions {
            return None;
        }

        let coord = TileCoord {
            level: self.grid.level,
            face: self.face,
            row: self.row,
            col: self.col,
        };
        let region = TileRegion {
            x: self.col * self.grid.tile_side,
            y: self.row * self.grid.tile_side,
            size: self.grid.tile_side,
        };

        self.col += 1;
        if self.col >= self.grid.divisions {
            self.col = 0;
            self.row += 1;
        }

        Some((coord, region))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = u64::from(self.grid.divisions);
        let done = u64::from(self.row) * n + u64::from(self.col);
        let remaining = (n * n).saturating_sub(done);
        match usize::try_from(remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}
