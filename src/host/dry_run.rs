use tracing::info;

use super::{
    Host,
    SystemHost,
    VolumeGroupState,
};
use crate::errors::LvgError;
use crate::utils::shell::Cmd;

/// Queries the running system, but only logs what it would change
pub struct DryRunHost {
    inner: SystemHost,
}

impl DryRunHost {
    pub fn new(inner: SystemHost) -> Self {
        DryRunHost { inner }
    }
}

impl Host for DryRunHost {
    fn device_exists(&self, device: &str) -> bool {
        self.inner.device_exists(device)
    }

    fn query_mount_point(&self, device: &str) -> Result<Option<String>, LvgError> {
        self.inner.query_mount_point(device)
    }

    fn query_volume_group(&self, name: &str) -> Result<Option<VolumeGroupState>, LvgError> {
        self.inner.query_volume_group(name)
    }

    fn query_logical_volume(&self, vg: &str, lv: &str) -> Result<bool, LvgError> {
        self.inner.query_logical_volume(vg, lv)
    }

    fn query_filesystem(&self, device: &str) -> Result<Option<String>, LvgError> {
        self.inner.query_filesystem(device)
    }

    fn disable_mount(&self, device: &str, mount_point: &str) -> Result<(), LvgError> {
        info!("dry-run: would disable fstab entries for {device} at {mount_point}");
        Ok(())
    }

    fn exec(&self, cmd: &Cmd) -> Result<String, LvgError> {
        info!("dry-run: would run '{cmd}'");
        Ok(String::new())
    }
}
