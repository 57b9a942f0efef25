//! INI configuration file.
//!
//! Settings live in `~/.cubetile/config.ini` by default:
//!
//! ```ini
//! [tiler]
//! source = data/earth_textures/2k
//! destination = data/earth_textures
//! ; a single level, or a list/range such as 1-4
//! levels = 2
//! faces = 0,1,2,3,4,5
//! extension = png
//! prefix =
//!
//! [thumbnail]
//! source = data/earth_textures
//! pattern = 3_*
//! destination = data/earth_textures
//! size = 256
//! filter = lanczos3
//! ```
//!
//! A `;` or `#` after whitespace starts a trailing comment.
//!
//! Missing keys fall back to defaults and unknown keys are ignored. Command
//! line arguments take precedence over anything read here.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::face::FaceIndex;
use crate::grid::{format_levels, parse_levels, GridError, SubdivisionLevel};
use crate::thumbnail::{ResizeFilter, ThumbnailConfig, DEFAULT_PATTERN, DEFAULT_THUMBNAIL_SIZE};
use crate::tiler::{TilerConfig, DEFAULT_EXTENSION};

/// Name of the per-user configuration directory.
pub const CONFIG_DIR_NAME: &str = ".cubetile";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.ini";

const TILER_SECTION: &str = "tiler";
const THUMBNAIL_SECTION: &str = "thumbnail";

/// Level used when none is configured.
pub const DEFAULT_LEVEL: u8 = 2;

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The home directory could not be determined.
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    /// The file could not be read or parsed.
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// INI text could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ini::ParseError),

    /// A key holds a value of the wrong shape.
    #[error("Invalid value '{value}' for {section}.{key}: {message}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        message: String,
    },

    /// The file could not be written.
    #[error("Failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `[tiler]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilerSettings {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub levels: Vec<SubdivisionLevel>,
    pub faces: Vec<FaceIndex>,
    pub extension: String,
    pub prefix: String,
}

impl Default for TilerSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/earth_textures/2k"),
            destination: PathBuf::from("data/earth_textures"),
            levels: SubdivisionLevel::new(DEFAULT_LEVEL).into_iter().collect(),
            faces: FaceIndex::all().collect(),
            extension: DEFAULT_EXTENSION.to_string(),
            prefix: String::new(),
        }
    }
}

impl TilerSettings {
    /// Build a tiler config from these settings.
    pub fn to_tiler_config(&self) -> TilerConfig {
        TilerConfig {
            source_dir: self.source.clone(),
            destination_dir: self.destination.clone(),
            levels: self.levels.clone(),
            faces: self.faces.clone(),
            extension: self.extension.clone(),
            prefix: self.prefix.clone(),
        }
    }
}

/// `[thumbnail]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailSettings {
    pub source: PathBuf,
    pub pattern: String,
    pub destination: PathBuf,
    pub size: u32,
    pub filter: ResizeFilter,
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/earth_textures"),
            pattern: DEFAULT_PATTERN.to_string(),
            destination: PathBuf::from("data/earth_textures"),
            size: DEFAULT_THUMBNAIL_SIZE,
            filter: ResizeFilter::default(),
        }
    }
}

impl ThumbnailSettings {
    /// Build a thumbnail config from these settings.
    pub fn to_thumbnail_config(&self) -> ThumbnailConfig {
        ThumbnailConfig::new(self.source.clone(), self.pattern.clone())
            .with_destination(self.destination.clone())
            .with_size(self.size)
            .with_filter(self.filter)
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub tiler: TilerSettings,
    pub thumbnail: ThumbnailSettings,
}

/// Per-user configuration directory (`~/.cubetile`).
pub fn config_directory() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Default configuration file path (`~/.cubetile/config.ini`).
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

impl ConfigFile {
    /// Load the default configuration file, or defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load a specific configuration file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text)?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = ConfigFile::default();

        if let Some(section) = ini.section(Some(TILER_SECTION)) {
            let tiler = &mut config.tiler;
            if let Some(v) = section.get("source") {
                tiler.source = PathBuf::from(v.trim());
            }
            if let Some(v) = section.get("destination") {
                tiler.destination = PathBuf::from(v.trim());
            }
            if let Some(v) = section.get("levels") {
                tiler.levels = parse_levels(v)
                    .map_err(|e| invalid_value(TILER_SECTION, "levels", v, e))?;
            }
            if let Some(v) = section.get("faces") {
                tiler.faces = parse_faces(v)
                    .map_err(|e| invalid_value(TILER_SECTION, "faces", v, e))?;
            }
            if let Some(v) = section.get("extension") {
                tiler.extension = v.trim().trim_start_matches('.').to_string();
            }
            if let Some(v) = section.get("prefix") {
                tiler.prefix = v.trim().to_string();
            }
        }

        if let Some(section) = ini.section(Some(THUMBNAIL_SECTION)) {
            let thumbnail = &mut config.thumbnail;
            if let Some(v) = section.get("source") {
                thumbnail.source = PathBuf::from(v.trim());
            }
            if let Some(v) = section.get("pattern") {
                thumbnail.pattern = v.trim().to_string();
            }
            if let Some(v) = section.get("destination") {
                thumbnail.destination = PathBuf::from(v.trim());
            }
            if let Some(v) = section.get("size") {
                thumbnail.size = v
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| invalid_value(THUMBNAIL_SECTION, "size", v, e))?;
            }
            if let Some(v) = section.get("filter") {
                thumbnail.filter = v
                    .parse::<ResizeFilter>()
                    .map_err(|e| invalid_value(THUMBNAIL_SECTION, "filter", v, e))?;
            }
        }

        Ok(config)
    }

    /// Render this configuration as INI.
    pub fn to_ini(&self) -> Ini {
        let faces: Vec<String> = self.tiler.faces.iter().map(|f| f.to_string()).collect();

        let mut ini = Ini::new();
        ini.with_section(Some(TILER_SECTION))
            .set("source", self.tiler.source.to_string_lossy())
            .set("destination", self.tiler.destination.to_string_lossy())
            .set("levels", format_levels(&self.tiler.levels))
            .set("faces", faces.join(","))
            .set("extension", self.tiler.extension.as_str())
            .set("prefix", self.tiler.prefix.as_str());
        ini.with_section(Some(THUMBNAIL_SECTION))
            .set("source", self.thumbnail.source.to_string_lossy())
            .set("pattern", self.thumbnail.pattern.as_str())
            .set("destination", self.thumbnail.destination.to_string_lossy())
            .set("size", self.thumbnail.size.to_string())
            .set("filter", self.thumbnail.filter.name());
        ini
    }

    /// Write this configuration to the default path, creating its directory.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write this configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        self.to_ini()
            .write_to_file(path)
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Parse a comma-separated face list such as `0,2,5`.
pub fn parse_faces(s: &str) -> Result<Vec<FaceIndex>, GridError> {
    let mut faces = s
        .split(',')
        .map(str::parse::<FaceIndex>)
        .collect::<Result<Vec<_>, _>>()?;
    faces.sort();
    faces.dedup();
    Ok(faces)
}

fn invalid_value(section: &str, key: &str, value: &str, err: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        message: err.to_string(),
    }
}
