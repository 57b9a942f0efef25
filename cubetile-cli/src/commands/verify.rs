//! Verify command - check written tiles rebuild their face images.

use cubetile::config::ConfigFile;
use cubetile::tiler::Tiler;

use super::common::{resolve_tiler_config, TilerArgs};
use crate::error::CliError;

/// Run the verify command.
///
/// Stops at the first face and level whose tiles are missing or differ.
pub fn run(args: &TilerArgs, config: &ConfigFile) -> Result<(), CliError> {
    let tiler = Tiler::new(resolve_tiler_config(args, config)?)?;
    let tiler_config = tiler.config();

    let mut total = 0u64;
    for &face in &tiler_config.faces {
        for &level in &tiler_config.levels {
            let checked = tiler.verify_face(face, level)?;
            println!("Face {} level {}: {} tiles OK", face, level, checked);
            total += checked;
        }
    }

    println!("Verified {} tiles", total);
    Ok(())
}
