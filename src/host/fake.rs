use std::cell::RefCell;
use std::collections::{
    HashMap,
    HashSet,
};

use super::{
    Host,
    VolumeGroupState,
};
use crate::errors::LvgError;
use crate::linux::mount;
use crate::utils::shell::{
    Cmd,
    CmdError,
};

/// In-memory host that records every command it is given
/// and applies the LVM ones to its own state.
#[derive(Default)]
pub struct FakeHost {
    pub devices: HashSet<String>,
    pub output_mount: RefCell<String>,
    pub vgs: RefCell<HashMap<String, Vec<String>>>,
    pub lvs: RefCell<HashSet<(String, String)>>,
    pub filesystems: RefCell<HashMap<String, String>>,
    pub executed: RefCell<Vec<Cmd>>,
    pub disabled: RefCell<Vec<(String, String)>>,

    /// Program that exits non-zero when run
    pub fail: RefCell<Option<String>>,
}

impl FakeHost {
    pub fn with_devices(devices: &[&str]) -> Self {
        FakeHost {
            devices: devices.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_vg(self, name: &str, pvs: &[&str]) -> Self {
        self.vgs.borrow_mut().insert(
            name.to_string(),
            pvs.iter().map(|pv| pv.to_string()).collect(),
        );
        self
    }

    pub fn with_mount(self, line: &str) -> Self {
        {
            let mut output = self.output_mount.borrow_mut();
            output.push_str(line);
            output.push('\n');
        }
        self
    }

    pub fn failing(self, program: &str) -> Self {
        *self.fail.borrow_mut() = Some(program.to_string());
        self
    }

    pub fn executed_strings(&self) -> Vec<String> {
        self.executed
            .borrow()
            .iter()
            .map(|cmd| cmd.to_string())
            .collect()
    }

    fn apply(&self, cmd: &Cmd) {
        let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();

        match (cmd.program.as_str(), args.as_slice()) {
            ("vgcreate", [name, rest @ ..]) => {
                let pvs = match rest {
                    ["-s", _, pvs @ ..] => pvs,
                    pvs => pvs,
                };

                self.vgs.borrow_mut().insert(
                    name.to_string(),
                    pvs.iter().map(|pv| pv.to_string()).collect(),
                );
            }

            ("vgextend", [name, pv]) => {
                if let Some(pvs) = self.vgs.borrow_mut().get_mut(*name) {
                    pvs.push(pv.to_string());
                }
            }

            ("lvcreate", [.., "-n", lv, vg]) => {
                self.lvs.borrow_mut().insert((vg.to_string(), lv.to_string()));
            }

            (program, [device]) if program.starts_with("mkfs.") => {
                let fs_type = program.trim_start_matches("mkfs.");
                self.filesystems
                    .borrow_mut()
                    .insert(device.to_string(), fs_type.to_string());
            }

            ("umount", [mount_point]) => {
                let pattern = format!(" on {mount_point} type ");
                let remaining: Vec<String> = self
                    .output_mount
                    .borrow()
                    .lines()
                    .filter(|line| !line.contains(&pattern))
                    .map(|line| format!("{line}\n"))
                    .collect();

                *self.output_mount.borrow_mut() = remaining.concat();
            }

            _ => {}
        }
    }
}

impl Host for FakeHost {
    fn device_exists(&self, device: &str) -> bool {
        self.devices.contains(device)
    }

    fn query_mount_point(&self, device: &str) -> Result<Option<String>, LvgError> {
        mount::parse_mount_point(&self.output_mount.borrow(), device)
    }

    fn query_volume_group(&self, name: &str) -> Result<Option<VolumeGroupState>, LvgError> {
        Ok(self.vgs.borrow().get(name).map(|pvs| VolumeGroupState {
            name: name.to_string(),
            physical_volumes: pvs.clone(),
        }))
    }

    fn query_logical_volume(&self, vg: &str, lv: &str) -> Result<bool, LvgError> {
        Ok(self
            .lvs
            .borrow()
            .contains(&(vg.to_string(), lv.to_string())))
    }

    fn query_filesystem(&self, device: &str) -> Result<Option<String>, LvgError> {
        Ok(self.filesystems.borrow().get(device).cloned())
    }

    fn disable_mount(&self, device: &str, mount_point: &str) -> Result<(), LvgError> {
        self.disabled
            .borrow_mut()
            .push((device.to_string(), mount_point.to_string()));

        Ok(())
    }

    fn exec(&self, cmd: &Cmd) -> Result<String, LvgError> {
        self.executed.borrow_mut().push(cmd.clone());

        if self.fail.borrow().as_deref() == Some(cmd.program.as_str()) {
            return Err(LvgError::CmdFailed {
                error: CmdError::ErrExit {
                    code: 5,
                    output: format!("{}: permission denied", cmd.program),
                },
                context: format!("command '{cmd}' failed"),
            });
        }

        self.apply(cmd);

        Ok(format!("{} ok", cmd.program))
    }
}
