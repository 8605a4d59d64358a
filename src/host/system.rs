use std::path::Path;

use tracing::{
    debug,
    info,
};

use super::{
    Host,
    VolumeGroupState,
};
use crate::errors::LvgError;
use crate::linux::{
    fstab,
    lvm,
    mkfs,
    mount,
};
use crate::utils::shell::{
    self,
    Cmd,
    CmdError,
};

/// Host backed by the programs and files of the running system
pub struct SystemHost {
    fstab: String,
}

impl SystemHost {
    pub fn new(fstab: &str) -> Self {
        SystemHost {
            fstab: fstab.to_string(),
        }
    }
}

impl Host for SystemHost {
    fn device_exists(&self, device: &str) -> bool {
        Path::new(device).exists()
    }

    fn query_mount_point(&self, device: &str) -> Result<Option<String>, LvgError> {
        let output_mount = shell::exec(&mount::cmd_mount())?;
        mount::parse_mount_point(&output_mount, device)
    }

    fn query_volume_group(&self, name: &str) -> Result<Option<VolumeGroupState>, LvgError> {
        let output_vgs = shell::exec(&lvm::cmd_vgs())?;
        if !lvm::parse_vgs(&output_vgs).iter().any(|vg| vg == name) {
            return Ok(None);
        }

        let output_pvs = shell::exec(&lvm::cmd_pvs())?;

        Ok(Some(VolumeGroupState {
            name: name.to_string(),
            physical_volumes: lvm::parse_pvs_in_vg(&output_pvs, name),
        }))
    }

    fn query_logical_volume(&self, vg: &str, lv: &str) -> Result<bool, LvgError> {
        let output_lvs = shell::exec(&lvm::cmd_lvs())?;
        Ok(lvm::lvs_contains(&output_lvs, vg, lv))
    }

    fn query_filesystem(&self, device: &str) -> Result<Option<String>, LvgError> {
        match shell::exec(&mkfs::cmd_blkid_type(device)) {
            Ok(output_blkid) => Ok(mkfs::parse_blkid_type(&output_blkid)),
            Err(LvgError::CmdFailed {
                error: CmdError::ErrExit { code, .. },
                ..
            }) if code == mkfs::BLKID_NOT_FOUND => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn disable_mount(&self, device: &str, mount_point: &str) -> Result<(), LvgError> {
        if !Path::new(&self.fstab).exists() {
            debug!("no fstab at {}, nothing to disable", self.fstab);
            return Ok(());
        }

        let original = std::fs::read_to_string(&self.fstab)
            .map_err(|err| LvgError::FileError(err, format!("read fstab {}", self.fstab)))?;

        let (disabled, n) = fstab::disable_entries(&original, device, mount_point);
        if n == 0 {
            debug!("no fstab entry for {device} at {mount_point}");
            return Ok(());
        }

        std::fs::write(&self.fstab, disabled)
            .map_err(|err| LvgError::FileError(err, format!("write fstab {}", self.fstab)))?;

        info!("Disabled {n} fstab entries for {device} at {mount_point}");

        Ok(())
    }

    fn exec(&self, cmd: &Cmd) -> Result<String, LvgError> {
        shell::exec(cmd)
    }
}
