//! Tile command - split face images into level tiles.

use cubetile::config::ConfigFile;
use cubetile::tiler::Tiler;

use super::common::{resolve_tiler_config, TilerArgs};
use crate::error::CliError;

/// Run the tile command.
pub fn run(args: &TilerArgs, config: &ConfigFile) -> Result<(), CliError> {
    let tiler = Tiler::new(resolve_tiler_config(args, config)?)?;
    let summary = tiler.run()?;

    println!(
        "Tiled {} face(s) into {}",
        summary.faces_processed,
        tiler.config().destination_dir.display()
    );
    for (level, count) in &summary.tiles_per_level {
        println!("  Level {}: {} tiles", level, count);
    }
    println!("  Total:   {} tiles", summary.tiles_written);
    Ok(())
}
