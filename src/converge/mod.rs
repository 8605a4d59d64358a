//! Convergence of one volume group: free its PVs from mounts,
//! create or extend the group, then converge its logical volumes.

pub mod lv;

pub use self::lv::{
    LogicalVolume,
    LvmLogicalVolume,
};

use std::collections::HashSet;

use tracing::{
    debug,
    info,
};

use crate::entity::action::Action;
use crate::errors::LvgError;
use crate::host::Host;
use crate::linux::{
    lvm,
    mount,
};
use crate::manifest::ManifestVg;

/// Desired state of a volume group
pub struct VolumeGroupSpec {
    pub name: String,
    pub physical_volumes: Vec<String>,
    pub physical_extent_size: Option<String>,
    pub logical_volumes: Vec<Box<dyn LogicalVolume>>,
}

impl From<&ManifestVg> for VolumeGroupSpec {
    fn from(vg: &ManifestVg) -> Self {
        VolumeGroupSpec {
            name: vg.name.clone(),
            physical_volumes: vg.physical_volumes.clone(),
            physical_extent_size: vg.physical_extent_size.clone(),
            logical_volumes: vg
                .logical_volumes
                .iter()
                .map(|lv| Box::new(LvmLogicalVolume::new(lv.clone())) as Box<dyn LogicalVolume>)
                .collect(),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Convergence {
    /// Whether the VG was created or extended, or any of its LVs changed.
    /// Unmounting PVs alone does not count as a change of the VG.
    pub changed: bool,
    pub actions: Vec<Action>,
}

/// Brings the host's state of volume group `vg` in line with `vg`.
///
/// The first failing command aborts convergence, and steps
/// already applied are left as they are.
pub fn converge(host: &dyn Host, vg: &mut VolumeGroupSpec) -> Result<Convergence, LvgError> {
    let mut result = Convergence::default();

    let pvs = dedup_pvs(&vg.physical_volumes);

    // LVM refuses to take over mounted devices, and cloud images
    // often mount ephemeral disks at boot.
    unmount_pvs(host, &pvs, &mut result.actions)?;

    result.changed = converge_vg(host, vg, &pvs, &mut result.actions)?;

    for lv in vg.logical_volumes.iter_mut() {
        lv.set_group(&vg.name);
        let changed = lv.create(host)?;

        result.actions.push(Action::ConvergeLv {
            vg: vg.name.clone(),
            lv: lv.name().to_string(),
            changed,
        });

        result.changed |= changed;
    }

    Ok(result)
}

fn unmount_pvs(host: &dyn Host, pvs: &[String], actions: &mut Vec<Action>) -> Result<(), LvgError> {
    for pv in pvs.iter().filter(|pv| host.device_exists(pv)) {
        let mountpoint = match host.query_mount_point(pv)? {
            Some(mountpoint) => mountpoint,
            None => continue,
        };

        info!("Unmounting {pv} from {mountpoint}");
        host.exec(&mount::cmd_umount(&mountpoint))?;
        actions.push(Action::UnmountPv {
            device: pv.clone(),
            mountpoint: mountpoint.clone(),
        });

        host.disable_mount(pv, &mountpoint)?;
        actions.push(Action::DisableMount {
            device: pv.clone(),
            mountpoint,
        });
    }

    Ok(())
}

// Drops repeated PVs, keeping the first occurrence
fn dedup_pvs(pvs: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();

    pvs.iter()
        .filter(|pv| seen.insert(pv.as_str()))
        .cloned()
        .collect()
}

// Returns whether vgcreate or vgextend ran
fn converge_vg(
    host: &dyn Host,
    vg: &VolumeGroupSpec,
    pvs: &[String],
    actions: &mut Vec<Action>,
) -> Result<bool, LvgError> {
    let name = vg.name.as_str();

    if let Some(existing) = host.query_volume_group(name)? {
        info!("Volume group '{name}' already exists. Seeking for new PV to add...");

        let new_pvs = pvs
            .iter()
            .filter(|pv| !existing.physical_volumes.contains(pv));

        let mut extended = false;
        for pv in new_pvs {
            let output = host.exec(&lvm::cmd_vgextend(name, pv))?;
            info!("Added {pv} to vg {name}");
            debug!("Command output: '{}'", output.trim());

            actions.push(Action::ExtendVg {
                vg: name.to_string(),
                pv: pv.clone(),
            });

            extended = true;
        }

        return Ok(extended);
    }

    if pvs.is_empty() {
        return Err(LvgError::BadManifest(format!(
            "cannot create vg {name} without pvs"
        )));
    }

    let cmd = lvm::cmd_vgcreate(name, pvs, vg.physical_extent_size.as_deref());

    let output = host.exec(&cmd)?;
    info!("Created vg {name} with {}", pvs.join(" "));
    debug!("Command output: '{}'", output.trim());

    actions.push(Action::CreateVg {
        vg: name.to_string(),
        pvs: pvs.to_vec(),
        pe_size: vg.physical_extent_size.clone(),
    });

    Ok(true)
}
