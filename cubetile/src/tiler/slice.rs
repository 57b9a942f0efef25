//! Pure slicing and assembly of face images.
//!
//! Pixels are copied verbatim and the source colour type is preserved, so
//! 8-bit RGB colour faces and single-channel elevation faces tile the same way.

use std::collections::HashSet;

use image::{DynamicImage, GenericImage, GenericImageView};

use crate::face::FaceIndex;
use crate::grid::{GridError, SubdivisionLevel, TileCoord, TileGrid};
use crate::tiler::{TileError, TileResult};

/// Split a square face image into the tiles of `level`.
///
/// Tiles are returned in row-major order, `n²` of them for `n = 2^(L-1)`.
///
/// # Errors
///
/// Returns [`GridError`] if the image is empty, not square, or its side is
/// not divisible by `n`. No tiles are produced in that case.
///
/// # Examples
///
/// ```
/// use cubetile::face::FaceIndex;
/// use cubetile::grid::SubdivisionLevel;
/// use cubetile::tiler::slice_face;
/// use image::DynamicImage;
///
/// let face = DynamicImage::new_rgb8(64, 64);
/// let tiles = slice_face(&face, FaceIndex::new(0).unwrap(), SubdivisionLevel::new(3).unwrap()).unwrap();
/// assert_eq!(tiles.len(), 16);
/// assert_eq!(tiles[0].1.width(), 16);
/// ```
pub fn slice_face(
    image: &DynamicImage,
    face: FaceIndex,
    level: SubdivisionLevel,
) -> Result<Vec<(TileCoord, DynamicImage)>, GridError> {
    let grid = TileGrid::for_dimensions(image.width(), image.height(), level)?;

    Ok(grid
        .regions(face)
        .map(|(coord, region)| {
            let tile = image.crop_imm(region.x, region.y, region.size, region.size);
            (coord, tile)
        })
        .collect())
}

/// Rebuild a face image from its complete set of tiles at `level`.
///
/// Every tile must belong to the same face and level, be square with the same
/// side, share the same colour type, and appear exactly once.
pub fn assemble_face(
    tiles: &[(TileCoord, DynamicImage)],
    level: SubdivisionLevel,
) -> TileResult<DynamicImage> {
    let (first_coord, first_tile) = tiles
        .first()
        .ok_or_else(|| TileError::InvalidConfig("no tiles to assemble".to_string()))?;

    let face = first_coord.face;
    let tile_side = first_tile.width();
    let color = first_tile.color();
    let divisions = level.grid_dimension();

    let mut seen = HashSet::with_capacity(tiles.len());
    for (coord, tile) in tiles {
        if coord.face != face || coord.level != level {
            return Err(TileError::ForeignTile(*coord));
        }
        if tile.width() != tile_side || tile.height() != tile_side {
            return Err(TileError::TileSizeMismatch {
                coord: *coord,
                expected: tile_side,
                width: tile.width(),
                height: tile.height(),
            });
        }
        if tile.color() != color {
            return Err(TileError::ColorTypeMismatch(*coord));
        }
        if !seen.insert((coord.row, coord.col)) {
            return Err(TileError::DuplicateTile(*coord));
        }
    }

    for row in 0..divisions {
        for col in 0..divisions {
            if !seen.contains(&(row, col)) {
                let coord = TileCoord::new(level, face, row, col).map_err(|e| {
                    TileError::InvalidConfig(format!("invalid tile coordinate: {}", e))
                })?;
                return Err(TileError::MissingTile(coord));
            }
        }
    }

    let side = tile_side
        .checked_mul(divisions)
        .ok_or_else(|| TileError::InvalidConfig("assembled face is too large".to_string()))?;
    let mut canvas = DynamicImage::new(side, side, color);

    for (coord, tile) in tiles {
        if !copy_tile(&mut canvas, tile, coord.col * tile_side, coord.row * tile_side) {
            return Err(TileError::ColorTypeMismatch(*coord));
        }
    }

    Ok(canvas)
}

/// Copy `tile` into `canvas` at `(x, y)` without converting pixel formats.
///
/// Returns false if the two images have different pixel layouts.
fn copy_tile(canvas: &mut DynamicImage, tile: &DynamicImage, x: u32, y: u32) -> bool {
    macro_rules! copy_variants {
        ($($variant:ident),*) => {
            match (canvas, tile) {
                $(
                    (DynamicImage::$variant(dst), DynamicImage::$variant(src)) => {
                        dst.copy_from(src, x, y).is_ok()
                    }
                )*
                _ => false,
            }
        };
    }

    copy_variants!(
        ImageLuma8,
        ImageLumaA8,
        ImageRgb8,
        ImageRgba8,
        ImageLuma16,
        ImageLumaA16,
        ImageRgb16,
        ImageRgba16,
        ImageRgb32F,
        ImageRgba32F
    )
}
