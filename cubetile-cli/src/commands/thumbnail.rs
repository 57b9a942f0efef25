//! Thumbnail command - build fixed-size thumbnails of matching tiles.

use cubetile::config::ConfigFile;
use cubetile::thumbnail::Thumbnailer;

use super::common::{resolve_thumbnail_config, ThumbnailArgs};
use crate::error::CliError;

/// Run the thumbnail command.
///
/// Skipped files are listed but do not fail the command.
pub fn run(args: &ThumbnailArgs, config: &ConfigFile) -> Result<(), CliError> {
    let thumbnailer = Thumbnailer::new(resolve_thumbnail_config(args, config))?;
    let summary = thumbnailer.run()?;
    let thumb_config = thumbnailer.config();

    println!(
        "Wrote {} of {} thumbnail(s) ({}×{}) to {}",
        summary.written,
        summary.matched,
        thumb_config.size,
        thumb_config.size,
        thumb_config.destination_dir.display()
    );

    if summary.has_warnings() {
        println!("Skipped {} file(s):", summary.warnings.len());
        for warning in &summary.warnings {
            println!("  {}: {}", warning.path.display(), warning.message);
        }
    }
    Ok(())
}
