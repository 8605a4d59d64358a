use tracing::{
    debug,
    info,
};

use crate::errors::LvgError;
use crate::host::Host;
use crate::linux::{
    lvm,
    mkfs,
};
use crate::manifest::ManifestLv;

/// A logical volume declared under a volume group.
///
/// The volume group only assigns it a group and asks it to converge;
/// everything else is up to the implementation.
pub trait LogicalVolume {
    fn name(&self) -> &str;

    fn set_group(&mut self, group: &str);

    /// Converges the LV, returning whether anything changed
    fn create(&mut self, host: &dyn Host) -> Result<bool, LvgError>;
}

/// Logical volume created with `lvcreate`, and formatted while it has no filesystem
pub struct LvmLogicalVolume {
    spec: ManifestLv,
    group: Option<String>,
}

impl LvmLogicalVolume {
    pub fn new(spec: ManifestLv) -> Self {
        LvmLogicalVolume { spec, group: None }
    }
}

impl LogicalVolume for LvmLogicalVolume {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn set_group(&mut self, group: &str) {
        self.group = Some(group.to_string());
    }

    fn create(&mut self, host: &dyn Host) -> Result<bool, LvgError> {
        let name = self.spec.name.as_str();
        let group = self
            .group
            .as_deref()
            .ok_or_else(|| LvgError::LvgRsBug(format!("lv {name} was never assigned a vg")))?;

        let device = lvm::lv_path(group, name);

        if host.query_logical_volume(group, name)? {
            debug!("Logical volume '{group}/{name}' already exists");

            // Formats an LV left blank by an earlier failed mkfs,
            // but never one that already has a filesystem
            let Some(ref fs_type) = self.spec.filesystem else {
                return Ok(false);
            };

            if let Some(found) = host.query_filesystem(&device)? {
                debug!("Found {found} filesystem on {device}");
                return Ok(false);
            }

            format(host, fs_type, &device)?;
            return Ok(true);
        }

        let size = self.spec.lv_size()?;
        let cmd = lvm::cmd_lvcreate(
            group,
            name,
            &size,
            self.spec.stripes,
            self.spec.stripe_size.as_deref(),
        );

        let output = host.exec(&cmd)?;
        info!("Created lv {group}/{name}");
        debug!("Command output: '{}'", output.trim());

        if let Some(ref fs_type) = self.spec.filesystem {
            format(host, fs_type, &device)?;
        }

        Ok(true)
    }
}

fn format(host: &dyn Host, fs_type: &str, device: &str) -> Result<(), LvgError> {
    host.exec(&mkfs::cmd_mkfs(fs_type, device))?;
    info!("Created {fs_type} filesystem on {device}");

    Ok(())
}
