//! Thumbnail generation for tiles.
//!
//! Scans a directory for files whose name matches a glob pattern (e.g. `3_*`
//! for every level-3 tile), resizes each one to an exact `Z × Z` square and
//! writes it as `thumb_{name}`.
//!
//! Unlike tiling, a thumbnail batch is lenient: a file that cannot be decoded
//! or written is logged, recorded in the [`ThumbnailSummary`] and skipped.
//! Existing `thumb_*` files are never picked up as inputs, so the
//! destination may be the source directory.

mod error;

pub use error::{ThumbnailError, ThumbnailWarning};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::imageops::FilterType;
use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::naming::{is_thumbnail, thumbnail_filename};

/// Default thumbnail side length in pixels.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 256;

/// Default filename pattern (every level-3 tile).
pub const DEFAULT_PATTERN: &str = "3_*";

/// Resampling filter used to shrink images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    /// Nearest neighbour
    Nearest,
    /// Linear
    Triangle,
    /// Cubic
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    /// Config/CLI name of the filter.
    pub fn name(&self) -> &'static str {
        match self {
            ResizeFilter::Nearest => "nearest",
            ResizeFilter::Triangle => "triangle",
            ResizeFilter::CatmullRom => "catmullrom",
            ResizeFilter::Gaussian => "gaussian",
            ResizeFilter::Lanczos3 => "lanczos3",
        }
    }
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest" => Ok(ResizeFilter::Nearest),
            "triangle" | "linear" => Ok(ResizeFilter::Triangle),
            "catmullrom" | "cubic" => Ok(ResizeFilter::CatmullRom),
            "gaussian" => Ok(ResizeFilter::Gaussian),
            "lanczos3" | "lanczos" => Ok(ResizeFilter::Lanczos3),
            other => Err(format!("unknown resize filter '{}'", other)),
        }
    }
}

/// Settings for one thumbnail batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailConfig {
    /// Directory scanned for input images.
    pub source_dir: PathBuf,

    /// Glob pattern matched against file names (not paths).
    pub pattern: String,

    /// Directory thumbnails are written to.
    pub destination_dir: PathBuf,

    /// Output side length in pixels.
    pub size: u32,

    /// Resampling filter.
    pub filter: ResizeFilter,
}

impl ThumbnailConfig {
    /// Create a config writing 256×256 Lanczos thumbnails next to the sources.
    pub fn new(source_dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        let source_dir = source_dir.into();
        Self {
            destination_dir: source_dir.clone(),
            source_dir,
            pattern: pattern.into(),
            size: DEFAULT_THUMBNAIL_SIZE,
            filter: ResizeFilter::default(),
        }
    }

    /// Set the destination directory.
    pub fn with_destination(mut self, destination_dir: impl Into<PathBuf>) -> Self {
        self.destination_dir = destination_dir.into();
        self
    }

    /// Set the thumbnail side length.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the resampling filter.
    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Summary of a thumbnail batch.
#[derive(Debug, Clone, Default)]
pub struct ThumbnailSummary {
    /// Files matching the pattern.
    pub matched: usize,

    /// Thumbnails written.
    pub written: usize,

    /// Files that were skipped, with the reason.
    pub warnings: Vec<ThumbnailWarning>,
}

impl ThumbnailSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any file was skipped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn skip(&mut self, path: &Path, message: impl Into<String>) {
        let warning = ThumbnailWarning::new(path, message);
        warn!(path = %warning.path.display(), reason = %warning.message, "Skipping file");
        self.warnings.push(warning);
    }
}

/// Resize an image to exactly `size × size`, ignoring its aspect ratio.
///
/// # Examples
///
/// ```
/// use cubetile::thumbnail::{make_thumbnail, ResizeFilter};
/// use image::DynamicImage;
///
/// let tile = DynamicImage::new_rgb8(512, 512);
/// let thumb = make_thumbnail(&tile, 256, ResizeFilter::Lanczos3);
/// assert_eq!((thumb.width(), thumb.height()), (256, 256));
/// ```
pub fn make_thumbnail(image: &DynamicImage, size: u32, filter: ResizeFilter) -> DynamicImage {
    image.resize_exact(size, size, filter.into())
}

/// Produces thumbnails for every matching file in a directory.
#[derive(Debug, Clone)]
pub struct Thumbnailer {
    config: ThumbnailConfig,
    pattern: glob::Pattern,
}

impl Thumbnailer {
    /// Create a thumbnailer, validating the size and pattern.
    pub fn new(config: ThumbnailConfig) -> Result<Self, ThumbnailError> {
        if config.size == 0 {
            return Err(ThumbnailError::InvalidSize(config.size));
        }
        let pattern =
            glob::Pattern::new(&config.pattern).map_err(|e| ThumbnailError::InvalidPattern {
                pattern: config.pattern.clone(),
                message: e.msg.to_string(),
            })?;
        Ok(Self { config, pattern })
    }

    /// The configuration this thumbnailer runs with.
    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Files in the source directory matching the pattern, sorted by name.
    ///
    /// Directories and existing thumbnails are excluded.
    pub fn matching_files(&self) -> Result<Vec<PathBuf>, ThumbnailError> {
        let source_dir = &self.config.source_dir;
        if !source_dir.is_dir() {
            return Err(ThumbnailError::SourceDirectoryNotFound(source_dir.clone()));
        }

        let entries = fs::read_dir(source_dir).map_err(|source| ThumbnailError::ListFiles {
            path: source_dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ThumbnailError::ListFiles {
                path: source_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if self.pattern.matches(name) && !is_thumbnail(name) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Thumbnail every matching file.
    ///
    /// # Errors
    ///
    /// Fails only if the source directory cannot be listed or the destination
    /// cannot be created. Per-file failures are reported in the summary.
    pub fn run(&self) -> Result<ThumbnailSummary, ThumbnailError> {
        let files = self.matching_files()?;

        let destination = &self.config.destination_dir;
        fs::create_dir_all(destination).map_err(|source| ThumbnailError::CreateDirectory {
            path: destination.clone(),
            source,
        })?;

        let mut summary = ThumbnailSummary::new();
        summary.matched = files.len();

        info!(
            source = %self.config.source_dir.display(),
            pattern = %self.config.pattern,
            files = files.len(),
            size = self.config.size,
            "Generating thumbnails"
        );

        for path in &files {
            let image = match image::open(path) {
                Ok(image) => image,
                Err(e) => {
                    summary.skip(path, format!("decode failed: {}", e));
                    continue;
                }
            };

            let thumb = make_thumbnail(&image, self.config.size, self.config.filter);

            // matching_files only returns paths with a UTF-8 file name
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            let output = destination.join(thumbnail_filename(name));

            match thumb.save(&output) {
                Ok(()) => {
                    debug!(source = %path.display(), output = %output.display(), "Wrote thumbnail");
                    summary.written += 1;
                }
                Err(e) => summary.skip(path, format!("write {} failed: {}", output.display(), e)),
            }
        }

        info!(
            written = summary.written,
            skipped = summary.warnings.len(),
            "Thumbnails complete"
        );
        Ok(summary)
    }
}
