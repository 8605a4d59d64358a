use tracing::info;

use super::read_manifest;
use crate::errors::LvgError;
use crate::manifest::validation;

pub(super) fn run(manifest_file: &str) -> Result<(), LvgError> {
    let start = std::time::Instant::now();

    let manifest = read_manifest(manifest_file)?;
    validation::validate(&manifest)?;

    info!(
        "manifest {manifest_file} is valid: {} volume groups, validation done in {:?}",
        manifest.volume_groups.len(),
        start.elapsed(),
    );

    Ok(())
}
