//! Tiler configuration.

use std::path::PathBuf;

use image::ImageFormat;

use crate::face::FaceIndex;
use crate::grid::SubdivisionLevel;
use crate::tiler::{TileError, TileResult};

/// Default file extension for face sources and tiles.
pub const DEFAULT_EXTENSION: &str = "png";

/// Settings for one tiling run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilerConfig {
    /// Directory containing the `{prefix}{face}_0_0.{ext}` face sources.
    pub source_dir: PathBuf,

    /// Directory tiles are written to.
    pub destination_dir: PathBuf,

    /// Levels to produce, each one a full grid per face.
    pub levels: Vec<SubdivisionLevel>,

    /// Faces to tile.
    pub faces: Vec<FaceIndex>,

    /// File extension of face sources and tiles; also selects the encoder.
    pub extension: String,

    /// Tile set prefix (empty for colour tiles, `e_` for elevation).
    pub prefix: String,
}

impl TilerConfig {
    /// Create a config for one level over all six faces with PNG output.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        destination_dir: impl Into<PathBuf>,
        level: SubdivisionLevel,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
            levels: vec![level],
            faces: FaceIndex::all().collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            prefix: String::new(),
        }
    }

    /// Set the levels to produce.
    pub fn with_levels(mut self, levels: Vec<SubdivisionLevel>) -> Self {
        self.levels = levels;
        self
    }

    /// Restrict tiling to the given faces.
    pub fn with_faces(mut self, faces: Vec<FaceIndex>) -> Self {
        self.faces = faces;
        self
    }

    /// Set the file extension (without the dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the tile set prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Check the config is usable before any file is touched.
    pub fn validate(&self) -> TileResult<()> {
        if self.levels.is_empty() {
            return Err(TileError::InvalidConfig("no levels selected".to_string()));
        }
        if self.faces.is_empty() {
            return Err(TileError::InvalidConfig("no faces selected".to_string()));
        }
        if ImageFormat::from_extension(&self.extension).is_none() {
            return Err(TileError::InvalidConfig(format!(
                "unsupported image extension '{}'",
                self.extension
            )));
        }
        if self.prefix.contains(['/', '\\']) {
            return Err(TileError::InvalidConfig(format!(
                "prefix '{}' must not contain path separators",
                self.prefix
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(l: u8) -> SubdivisionLevel {
        SubdivisionLevel::new(l).unwrap()
    }

    #[test]
    fn test_new_defaults() {
        let config = TilerConfig::new("/src", "/dst", level(2));
        assert_eq!(config.source_dir, PathBuf::from("/src"));
        assert_eq!(config.destination_dir, PathBuf::from("/dst"));
        assert_eq!(config.levels, vec![level(2)]);
        assert_eq!(config.faces.len(), 6);
        assert_eq!(config.extension, "png");
        assert!(config.prefix.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = TilerConfig::new("/src", "/dst", level(1))
            .with_levels(vec![level(1), level(3)])
            .with_faces(vec![FaceIndex::new(4).unwrap()])
            .with_extension("jpg")
            .with_prefix("e_");
        assert_eq!(config.levels.len(), 2);
        assert_eq!(config.faces, vec![FaceIndex::new(4).unwrap()]);
        assert_eq!(config.extension, "jpg");
        assert_eq!(config.prefix, "e_");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_levels() {
        let config = TilerConfig::new("/src", "/dst", level(1)).with_levels(vec![]);
        assert!(matches!(config.validate(), Err(TileError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_empty_faces() {
        let config = TilerConfig::new("/src", "/dst", level(1)).with_faces(vec![]);
        assert!(matches!(config.validate(), Err(TileError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_extension() {
        let config = TilerConfig::new("/src", "/dst", level(1)).with_extension("xyz");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("xyz"));
    }

    #[test]
    fn test_validate_rejects_path_in_prefix() {
        let config = TilerConfig::new("/src", "/dst", level(1)).with_prefix("../e_");
        assert!(config.validate().is_err());
    }
}
