use tracing::info;

use super::read_manifest;
use crate::cli;
use crate::converge::{
    self,
    VolumeGroupSpec,
};
use crate::entity::report::{
    Report,
    ReportVg,
};
use crate::errors::LvgError;
use crate::host::{
    DryRunHost,
    Host,
    SystemHost,
};
use crate::manifest::{
    validation,
    Manifest,
};
use crate::sanity;

pub(super) fn run(
    manifest_file: &str,
    fstab: &str,
    dry_run: bool,
    args: cli::ArgsApply,
) -> Result<Report, LvgError> {
    let manifest = read_manifest(manifest_file)?;

    if !args.no_validate {
        validation::validate(&manifest)?;
    }

    sanity::check(&manifest);

    let system = SystemHost::new(fstab);
    match dry_run {
        true => apply_manifest(&DryRunHost::new(system), &manifest, true),
        false => apply_manifest(&system, &manifest, false),
    }
}

/// Converges every volume group in `manifest`, in declaration order.
/// The first error aborts the remaining volume groups.
pub(crate) fn apply_manifest(
    host: &dyn Host,
    manifest: &Manifest,
    dry_run: bool,
) -> Result<Report, LvgError> {
    let start = std::time::Instant::now();
    let mut volume_groups = Vec::new();

    for manifest_vg in &manifest.volume_groups {
        let mut vg = VolumeGroupSpec::from(manifest_vg);
        let result = converge::converge(host, &mut vg)?;

        info!("vg {}: changed={}", vg.name, result.changed);

        volume_groups.push(ReportVg {
            name: vg.name,
            changed: result.changed,
            actions: result.actions,
        });
    }

    Ok(Report {
        dry_run,
        volume_groups,
        duration: start.elapsed(),
    })
}
