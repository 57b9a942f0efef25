//! Integration tests for the tiling and thumbnail pipeline.
//!
//! These tests run the tools the way the renderer's asset preparation does:
//! - six face sources → tiles at one or more levels
//! - tiles → verification against the face sources
//! - one level of tiles → thumbnails
//!
//! Run with: `cargo test --test pipeline_integration`

use std::fs;
use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, Luma, Rgb, RgbImage};
use tempfile::TempDir;

use cubetile::face::FaceIndex;
use cubetile::grid::{parse_levels, SubdivisionLevel};
use cubetile::naming::{face_source_filename, ELEVATION_PREFIX};
use cubetile::thumbnail::{ThumbnailConfig, Thumbnailer};
use cubetile::tiler::{assemble_face, slice_face, TileError, Tiler, TilerConfig};

// ============================================================================
// Helper Functions
// ============================================================================

fn level(l: u8) -> SubdivisionLevel {
    SubdivisionLevel::new(l).unwrap()
}

/// Colour face whose pixels identify face and position.
fn colour_face(face: u8, side: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(side, side, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 11 % 256) as u8, face * 42])
    }))
}

/// Write all six colour faces into `dir`.
fn write_cube(dir: &Path, side: u32) {
    for face in FaceIndex::all() {
        colour_face(face.index(), side)
            .save(dir.join(face_source_filename("", face, "png")))
            .unwrap();
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// Integration Tests
// ============================================================================

/// 2048px face at level 3 gives 16 tiles of 512px named 3_{face}_{row}_{col}.png.
#[test]
fn test_2048_face_at_level_3() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    let face = FaceIndex::new(2).unwrap();
    DynamicImage::new_rgb8(2048, 2048)
        .save(src.path().join("2_0_0.png"))
        .unwrap();

    let config = TilerConfig::new(src.path(), dst.path(), level(3)).with_faces(vec![face]);
    let summary = Tiler::new(config).unwrap().run().unwrap();
    assert_eq!(summary.tiles_written, 16);

    let mut expected = Vec::new();
    for row in 0..4 {
        for col in 0..4 {
            expected.push(format!("3_2_{}_{}.png", row, col));
        }
    }
    expected.sort();
    assert_eq!(file_names(dst.path()), expected);

    for name in &expected {
        let tile = image::open(dst.path().join(name)).unwrap();
        assert_eq!(tile.dimensions(), (512, 512));
    }
}

/// Full cube at several levels, then verification of every face and level.
#[test]
fn test_full_cube_tiles_and_verifies() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    write_cube(src.path(), 64);

    let levels = parse_levels("1-3").unwrap();
    let config = TilerConfig::new(src.path(), dst.path(), level(1)).with_levels(levels.clone());
    let tiler = Tiler::new(config).unwrap();
    let summary = tiler.run().unwrap();

    assert_eq!(summary.faces_processed, 6);
    assert_eq!(summary.tiles_written, 6 * (1 + 4 + 16));
    assert_eq!(summary.tiles_per_level.get(&3), Some(&96));

    for face in FaceIndex::all() {
        for &l in &levels {
            let checked = tiler.verify_face(face, l).unwrap();
            assert_eq!(checked, l.tile_count());
        }
    }
}

/// Tiles read back from disk reassemble into the original face.
#[test]
fn test_tiles_on_disk_reassemble() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    write_cube(src.path(), 32);
    let face = FaceIndex::new(4).unwrap();

    let config = TilerConfig::new(src.path(), dst.path(), level(2)).with_faces(vec![face]);
    Tiler::new(config).unwrap().run().unwrap();

    let original = colour_face(4, 32);
    let expected = slice_face(&original, face, level(2)).unwrap();
    let mut from_disk = Vec::new();
    for (coord, _) in &expected {
        let path = dst
            .path()
            .join(format!("2_4_{}_{}.png", coord.row, coord.col));
        from_disk.push((*coord, image::open(path).unwrap()));
    }

    assert_eq!(assemble_face(&from_disk, level(2)).unwrap(), original);
}

/// An indivisible face/level pairing is reported and writes nothing.
#[test]
fn test_indivisible_face_is_reported() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    DynamicImage::new_rgb8(100, 100)
        .save(src.path().join("0_0_0.png"))
        .unwrap();

    let config = TilerConfig::new(src.path(), dst.path(), level(4))
        .with_faces(vec![FaceIndex::new(0).unwrap()]);
    let err = Tiler::new(config).unwrap().run().unwrap_err();

    assert!(matches!(err, TileError::Grid { .. }));
    assert!(file_names(dst.path()).is_empty());
}

/// Elevation faces keep their single channel and get the e_ prefix.
#[test]
fn test_elevation_tile_set() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    let face = FaceIndex::new(1).unwrap();
    let elevation = DynamicImage::ImageLuma8(GrayImage::from_fn(16, 16, |x, y| {
        Luma([(x * 16 + y) as u8])
    }));
    elevation
        .save(src.path().join(face_source_filename(ELEVATION_PREFIX, face, "png")))
        .unwrap();

    let config = TilerConfig::new(src.path(), dst.path(), level(2))
        .with_faces(vec![face])
        .with_prefix(ELEVATION_PREFIX);
    let tiler = Tiler::new(config).unwrap();
    tiler.run().unwrap();

    let tile = image::open(dst.path().join("e_2_1_1_1.png")).unwrap();
    assert_eq!(tile.color(), image::ColorType::L8);
    assert_eq!(tiler.verify_face(face, level(2)).unwrap(), 4);
}

/// Tiles of one level become 256×256 thumbnails next to them.
#[test]
fn test_thumbnails_for_level_3_tiles() {
    let src = TempDir::new().unwrap();
    let tiles = TempDir::new().unwrap();
    colour_face(0, 2048)
        .save(src.path().join("0_0_0.png"))
        .unwrap();

    let config = TilerConfig::new(src.path(), tiles.path(), level(2))
        .with_levels(vec![level(2), level(3)])
        .with_faces(vec![FaceIndex::new(0).unwrap()]);
    Tiler::new(config).unwrap().run().unwrap();

    let thumbnailer = Thumbnailer::new(ThumbnailConfig::new(tiles.path(), "3_*")).unwrap();
    let summary = thumbnailer.run().unwrap();

    assert_eq!(summary.matched, 16);
    assert_eq!(summary.written, 16);
    assert!(!summary.has_warnings());

    let thumb = image::open(tiles.path().join("thumb_3_0_2_1.png")).unwrap();
    assert_eq!(thumb.dimensions(), (256, 256));
    assert!(!tiles.path().join("thumb_2_0_0_0.png").exists());
}

/// A corrupt tile is skipped and the rest of the batch still completes.
#[test]
fn test_thumbnail_batch_survives_corrupt_tile() {
    let tiles = TempDir::new().unwrap();
    let thumbs = TempDir::new().unwrap();
    for name in ["3_0_0_0.png", "3_0_0_1.png"] {
        colour_face(0, 512).save(tiles.path().join(name)).unwrap();
    }
    fs::write(tiles.path().join("3_0_1_0.png"), b"\x89PNG truncated").unwrap();

    let config = ThumbnailConfig::new(tiles.path(), "3_*")
        .with_destination(thumbs.path())
        .with_size(256);
    let summary = Thumbnailer::new(config).unwrap().run().unwrap();

    assert_eq!(summary.written, 2);
    assert_eq!(summary.warnings.len(), 1);
    assert_eq!(
        file_names(thumbs.path()),
        vec!["thumb_3_0_0_0.png", "thumb_3_0_0_1.png"]
    );
}
