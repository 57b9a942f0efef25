//! CLI error type.

use std::fmt;

use cubetile::config::ConfigError;
use cubetile::grid::GridError;
use cubetile::logging::LoggingError;
use cubetile::thumbnail::ThumbnailError;
use cubetile::tiler::TileError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded or saved.
    Config(ConfigError),

    /// Invalid command line argument.
    InvalidArgument(String),

    /// Logging could not be set up.
    Logging(LoggingError),

    /// Tiling or verification failed.
    Tile(TileError),

    /// Thumbnail batch could not run.
    Thumbnail(ThumbnailError),

    /// Command output could not be written.
    Output(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Logging(e) => write!(f, "Logging error: {}", e),
            CliError::Tile(e) => write!(f, "Tiling failed: {}", e),
            CliError::Thumbnail(e) => write!(f, "Thumbnail generation failed: {}", e),
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::InvalidArgument(_) => None,
            CliError::Logging(e) => Some(e),
            CliError::Tile(e) => Some(e),
            CliError::Thumbnail(e) => Some(e),
            CliError::Output(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<GridError> for CliError {
    fn from(e: GridError) -> Self {
        CliError::InvalidArgument(e.to_string())
    }
}

impl From<LoggingError> for CliError {
    fn from(e: LoggingError) -> Self {
        CliError::Logging(e)
    }
}

impl From<TileError> for CliError {
    fn from(e: TileError) -> Self {
        CliError::Tile(e)
    }
}

impl From<ThumbnailError> for CliError {
    fn from(e: ThumbnailError) -> Self {
        CliError::Thumbnail(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::InvalidArgument("bad level".to_string());
        assert_eq!(err.to_string(), "Invalid argument: bad level");
    }

    #[test]
    fn test_cli_error_from_tile_error() {
        let err: CliError = TileError::SourceNotFound(PathBuf::from("0_0_0.png")).into();
        assert!(matches!(err, CliError::Tile(_)));
        assert!(err.to_string().contains("0_0_0.png"));
    }

    #[test]
    fn test_cli_error_output_keeps_source() {
        use std::error::Error;

        let err = CliError::Output(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "stdout closed",
        ));
        assert_eq!(err.to_string(), "Failed to write output: stdout closed");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_cli_error_from_grid_error() {
        let err: CliError = GridError::InvalidLevel(0).into();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
