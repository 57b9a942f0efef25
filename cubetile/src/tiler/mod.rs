//! Face tiling.
//!
//! Splits each top-level cube face image into the square tiles of one or more
//! subdivision levels and writes them to disk.
//!
//! # Data Flow
//!
//! ```text
//! {prefix}{face}_0_0.{ext} ──decode──► DynamicImage
//!                                         │
//!                        slice_face(level) │ (validated TileGrid)
//!                                         ▼
//!                    {prefix}{level}_{face}_{row}_{col}.{ext}  × n²
//! ```
//!
//! Tiling is strict: every level is checked against the face size before
//! any tile of that face is written, and the first error aborts the run.
//!
//! # Example
//!
//! ```no_run
//! use cubetile::grid::SubdivisionLevel;
//! use cubetile::tiler::{Tiler, TilerConfig};
//!
//! let config = TilerConfig::new(
//!     "data/earth_textures/2k",
//!     "data/earth_textures",
//!     SubdivisionLevel::new(3).unwrap(),
//! );
//! let summary = Tiler::new(config).unwrap().run().unwrap();
//! println!("{} tiles written", summary.tiles_written);
//! ```

mod config;
mod error;
mod slice;

pub use config::{TilerConfig, DEFAULT_EXTENSION};
pub use error::{TileError, TileResult};
pub use slice::{assemble_face, slice_face};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{debug, info};

use crate::face::FaceIndex;
use crate::grid::{SubdivisionLevel, TileGrid};
use crate::naming::{face_source_filename, parse_tile_filename, tile_filename};

/// Summary of a tiling run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TilingSummary {
    /// Number of faces tiled.
    pub faces_processed: usize,

    /// Total tiles written across all faces and levels.
    pub tiles_written: u64,

    /// Tiles written per level.
    pub tiles_per_level: BTreeMap<u8, u64>,
}

impl TilingSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_level(&mut self, level: SubdivisionLevel, count: u64) {
        *self.tiles_per_level.entry(level.value()).or_insert(0) += count;
        self.tiles_written += count;
    }
}

/// Writes the tiles of every configured face and level.
#[derive(Debug, Clone)]
pub struct Tiler {
    config: TilerConfig,
}

impl Tiler {
    /// Create a tiler, validating the configuration.
    pub fn new(config: TilerConfig) -> TileResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this tiler runs with.
    pub fn config(&self) -> &TilerConfig {
        &self.config
    }

    /// Path of the face source image for `face`.
    pub fn source_path(&self, face: FaceIndex) -> PathBuf {
        self.config.source_dir.join(face_source_filename(
            &self.config.prefix,
            face,
            &self.config.extension,
        ))
    }

    /// Tile every configured face at every configured level.
    ///
    /// # Errors
    ///
    /// Stops at the first face source that is missing, undecodable or does
    /// not divide into a level's grid, and at the first tile that fails to
    /// write. Tiles of earlier faces stay on disk.
    pub fn run(&self) -> TileResult<TilingSummary> {
        let destination = &self.config.destination_dir;
        fs::create_dir_all(destination).map_err(|source| TileError::CreateDirectory {
            path: destination.clone(),
            source,
        })?;

        let mut summary = TilingSummary::new();
        for &face in &self.config.faces {
            self.tile_face(face, &mut summary)?;
            summary.faces_processed += 1;
        }

        info!(
            faces = summary.faces_processed,
            tiles = summary.tiles_written,
            destination = %destination.display(),
            "Tiling complete"
        );
        Ok(summary)
    }

    fn tile_face(&self, face: FaceIndex, summary: &mut TilingSummary) -> TileResult<()> {
        let path = self.source_path(face);
        let image = load_image(&path)?;

        info!(
            face = %face,
            source = %path.display(),
            width = image.width(),
            height = image.height(),
            "Tiling face"
        );

        // Reject every level up front so a bad level leaves no partial output
        for &level in &self.config.levels {
            TileGrid::for_dimensions(image.width(), image.height(), level).map_err(|source| {
                TileError::Grid {
                    path: path.clone(),
                    source,
                }
            })?;
        }

        for &level in &self.config.levels {
            let tiles = slice_face(&image, face, level).map_err(|source| TileError::Grid {
                path: path.clone(),
                source,
            })?;

            let mut written = 0u64;
            for (coord, tile) in &tiles {
                let tile_path = self.config.destination_dir.join(tile_filename(
                    &self.config.prefix,
                    coord,
                    &self.config.extension,
                ));
                tile.save(&tile_path).map_err(|source| TileError::Write {
                    path: tile_path.clone(),
                    source,
                })?;
                debug!(tile = %coord, path = %tile_path.display(), "Wrote tile");
                written += 1;
            }

            debug!(face = %face, level = %level, tiles = written, "Level complete");
            summary.record_level(level, written);
        }

        Ok(())
    }

    /// Check that the tiles of one face and level on disk rebuild the face source.
    ///
    /// Returns the number of tiles checked.
    ///
    /// Only meaningful for lossless formats; lossy re-encoding will report a
    /// mismatch.
    pub fn verify_face(&self, face: FaceIndex, level: SubdivisionLevel) -> TileResult<u64> {
        let path = self.source_path(face);
        let source = load_image(&path)?;
        let grid = TileGrid::for_dimensions(source.width(), source.height(), level).map_err(
            |source| TileError::Grid {
                path: path.clone(),
                source,
            },
        )?;

        let mut tiles = Vec::new();
        let mut paths = BTreeMap::new();
        for tile_path in self.find_tiles(face, level)? {
            let tile = load_image(&tile_path)?;
            let name = tile_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            if let Ok(parsed) = parse_tile_filename(name) {
                paths.insert((parsed.coord.row, parsed.coord.col), tile_path.clone());
                tiles.push((parsed.coord, tile));
            }
        }

        if tiles.is_empty() {
            let first = grid.regions(face).next().map(|(coord, _)| coord);
            return match first {
                Some(coord) => Err(TileError::MissingTile(coord)),
                None => Err(TileError::InvalidConfig("empty grid".to_string())),
            };
        }

        let assembled = assemble_face(&tiles, level)?;
        if assembled == source {
            info!(face = %face, level = %level, tiles = tiles.len(), "Tiles verified");
            return Ok(tiles.len() as u64);
        }

        // Locate the first tile that differs from its source region
        let expected = slice_face(&source, face, level).map_err(|source| TileError::Grid {
            path: path.clone(),
            source,
        })?;
        for (coord, expected_tile) in &expected {
            let actual = tiles.iter().find(|(c, _)| c == coord).map(|(_, t)| t);
            if actual != Some(expected_tile) {
                let tile_path = paths
                    .get(&(coord.row, coord.col))
                    .cloned()
                    .unwrap_or_default();
                return Err(TileError::VerifyMismatch {
                    path: tile_path,
                    coord: *coord,
                });
            }
        }

        Err(TileError::VerifyMismatch {
            path,
            coord: expected[0].0,
        })
    }

    /// Tile files of one face and level present in the destination directory.
    fn find_tiles(&self, face: FaceIndex, level: SubdivisionLevel) -> TileResult<Vec<PathBuf>> {
        let dir = self.config.destination_dir.to_string_lossy();
        let pattern = format!(
            "{}/{}{}_{}_*_*.{}",
            glob::Pattern::escape(&dir),
            glob::Pattern::escape(&self.config.prefix),
            level,
            face,
            glob::Pattern::escape(&self.config.extension)
        );

        let entries = glob::glob(&pattern).map_err(|e| TileError::ListTiles(e.to_string()))?;

        let mut found = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| TileError::ListTiles(e.to_string()))?;
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| parse_tile_filename(n).ok())
                .is_some_and(|parsed| {
                    parsed.prefix == self.config.prefix
                        && parsed.coord.face == face
                        && parsed.coord.level == level
                        && parsed.extension == self.config.extension
                });
            if matches {
                found.push(path);
            }
        }
        Ok(found)
    }
}

/// Decode an image, distinguishing a missing file from a corrupt one.
fn load_image(path: &Path) -> TileResult<DynamicImage> {
    if !path.is_file() {
        return Err(TileError::SourceNotFound(path.to_path_buf()));
    }
    image::open(path).map_err(|source| TileError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn level(l: u8) -> SubdivisionLevel {
        SubdivisionLevel::new(l).unwrap()
    }

    fn face(f: u8) -> FaceIndex {
        FaceIndex::new(f).unwrap()
    }

    fn write_face(dir: &Path, prefix: &str, f: u8, side: u32) -> DynamicImage {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(side, side, |x, y| {
            Rgb([(x * 3) as u8, (y * 5) as u8, f * 40])
        }));
        img.save(dir.join(face_source_filename(prefix, face(f), "png")))
            .unwrap();
        img
    }

    #[test]
    fn test_tiling_summary_record() {
        let mut summary = TilingSummary::new();
        summary.record_level(level(2), 4);
        summary.record_level(level(2), 4);
        summary.record_level(level(3), 16);
        assert_eq!(summary.tiles_written, 24);
        assert_eq!(summary.tiles_per_level.get(&2), Some(&8));
        assert_eq!(summary.tiles_per_level.get(&3), Some(&16));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = TilerConfig::new("/src", "/dst", level(1)).with_faces(vec![]);
        assert!(Tiler::new(config).is_err());
    }

    #[test]
    fn test_run_writes_named_tiles() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write_face(src.path(), "", 1, 64);

        let config =
            TilerConfig::new(src.path(), dst.path(), level(3)).with_faces(vec![face(1)]);
        let summary = Tiler::new(config).unwrap().run().unwrap();

        assert_eq!(summary.faces_processed, 1);
        assert_eq!(summary.tiles_written, 16);
        for row in 0..4 {
            for col in 0..4 {
                let path = dst.path().join(format!("3_1_{}_{}.png", row, col));
                let tile = image::open(&path).unwrap();
                assert_eq!((tile.width(), tile.height()), (16, 16));
            }
        }
    }

    #[test]
    fn test_run_multiple_levels() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write_face(src.path(), "", 0, 32);

        let config = TilerConfig::new(src.path(), dst.path(), level(1))
            .with_levels(vec![level(1), level(2), level(3)])
            .with_faces(vec![face(0)]);
        let summary = Tiler::new(config).unwrap().run().unwrap();

        assert_eq!(summary.tiles_written, 1 + 4 + 16);
        assert!(dst.path().join("1_0_0_0.png").is_file());
        assert!(dst.path().join("2_0_1_1.png").is_file());
        assert!(dst.path().join("3_0_3_3.png").is_file());
    }

    #[test]
    fn test_run_with_prefix() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write_face(src.path(), "e_", 2, 16);

        let config = TilerConfig::new(src.path(), dst.path(), level(2))
            .with_faces(vec![face(2)])
            .with_prefix("e_");
        Tiler::new(config).unwrap().run().unwrap();

        assert!(dst.path().join("e_2_2_0_0.png").is_file());
        assert!(!dst.path().join("2_2_0_0.png").exists());
    }

    #[test]
    fn test_run_missing_source() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();

        let config = TilerConfig::new(src.path(), dst.path(), level(2));
        match Tiler::new(config).unwrap().run() {
            Err(TileError::SourceNotFound(path)) => assert!(path.ends_with("0_0_0.png")),
            other => panic!("expected SourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_run_undecodable_source() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        fs::write(src.path().join("0_0_0.png"), b"not a png").unwrap();

        let config =
            TilerConfig::new(src.path(), dst.path(), level(1)).with_faces(vec![face(0)]);
        assert!(matches!(
            Tiler::new(config).unwrap().run(),
            Err(TileError::Decode { .. })
        ));
    }

    #[test]
    fn test_run_indivisible_writes_nothing() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write_face(src.path(), "", 0, 48);

        // 48 splits into 2 and 4, but not 32
        let config = TilerConfig::new(src.path(), dst.path(), level(1))
            .with_levels(vec![level(2), level(6)])
            .with_faces(vec![face(0)]);
        let err = Tiler::new(config).unwrap().run().unwrap_err();

        assert!(matches!(err, TileError::Grid { .. }));
        assert!(err.to_string().contains("0_0_0.png"));
        assert_eq!(fs::read_dir(dst.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_run_creates_destination() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let nested = dst.path().join("tiles").join("level2");
        write_face(src.path(), "", 3, 8);

        let config = TilerConfig::new(src.path(), &nested, level(2)).with_faces(vec![face(3)]);
        Tiler::new(config).unwrap().run().unwrap();
        assert!(nested.join("2_3_1_0.png").is_file());
    }

    #[test]
    fn test_verify_after_run() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write_face(src.path(), "", 4, 32);

        let config =
            TilerConfig::new(src.path(), dst.path(), level(3)).with_faces(vec![face(4)]);
        let tiler = Tiler::new(config).unwrap();
        tiler.run().unwrap();

        assert_eq!(tiler.verify_face(face(4), level(3)).unwrap(), 16);
    }

    #[test]
    fn test_verify_detects_missing_tile() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write_face(src.path(), "", 0, 16);

        let config =
            TilerConfig::new(src.path(), dst.path(), level(2)).with_faces(vec![face(0)]);
        let tiler = Tiler::new(config).unwrap();
        tiler.run().unwrap();
        fs::remove_file(dst.path().join("2_0_0_1.png")).unwrap();

        match tiler.verify_face(face(0), level(2)) {
            Err(TileError::MissingTile(coord)) => assert_eq!((coord.row, coord.col), (0, 1)),
            other => panic!("expected MissingTile, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_detects_altered_tile() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write_face(src.path(), "", 0, 16);

        let config =
            TilerConfig::new(src.path(), dst.path(), level(2)).with_faces(vec![face(0)]);
        let tiler = Tiler::new(config).unwrap();
        tiler.run().unwrap();

        let altered = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])));
        altered.save(dst.path().join("2_0_1_0.png")).unwrap();

        match tiler.verify_face(face(0), level(2)) {
            Err(TileError::VerifyMismatch { path, coord }) => {
                assert!(path.ends_with("2_0_1_0.png"));
                assert_eq!((coord.row, coord.col), (1, 0));
            }
            other => panic!("expected VerifyMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_without_tiles() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write_face(src.path(), "", 0, 16);

        let config =
            TilerConfig::new(src.path(), dst.path(), level(2)).with_faces(vec![face(0)]);
        let tiler = Tiler::new(config).unwrap();
        assert!(matches!(
            tiler.verify_face(face(0), level(2)),
            Err(TileError::MissingTile(_))
        ));
    }
}
