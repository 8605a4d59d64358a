//! Gateway to live host state.
//!
//! Convergence code never runs programs or touches files directly:
//! it asks a [`Host`] for the current LVM and mount state, and hands it
//! the commands that mutate that state.

mod dry_run;
#[cfg(test)]
pub mod fake;
mod system;

pub use self::dry_run::DryRunHost;
pub use self::system::SystemHost;

use crate::errors::LvgError;
use crate::utils::shell::Cmd;

/// Live state of an existing volume group
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeGroupState {
    pub name: String,
    pub physical_volumes: Vec<String>,
}

pub trait Host {
    /// Whether `device` exists as a file or device node
    fn device_exists(&self, device: &str) -> bool;

    /// Mount point of `device`, or None if it is not mounted
    fn query_mount_point(&self, device: &str) -> Result<Option<String>, LvgError>;

    /// State of VG `name`, or None if no such VG exists
    fn query_volume_group(&self, name: &str) -> Result<Option<VolumeGroupState>, LvgError>;

    /// Whether LV `lv` exists in VG `vg`
    fn query_logical_volume(&self, vg: &str, lv: &str) -> Result<bool, LvgError>;

    /// Filesystem type found on `device`, or None if it has none
    fn query_filesystem(&self, device: &str) -> Result<Option<String>, LvgError>;

    /// Disables persistent mount entries of `device` at `mount_point`
    fn disable_mount(&self, device: &str, mount_point: &str) -> Result<(), LvgError>;

    /// Runs a state-changing command, returning its output
    fn exec(&self, cmd: &Cmd) -> Result<String, LvgError>;
}
