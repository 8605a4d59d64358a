use regex::Regex;

use crate::errors::LvgError;
use crate::utils::shell::Cmd;

/// Executes:
/// ```shell
/// mount
/// ```
pub fn cmd_mount() -> Cmd {
    Cmd::new("mount")
}

/// Executes:
/// ```shell
/// umount ${{ mount_point }}
/// ```
pub fn cmd_umount(mount_point: &str) -> Cmd {
    Cmd::new("umount").arg(mount_point)
}

/// Scans output of `mount` for a line like
/// `/dev/sdb on /mnt/ephemeral0 type ext3 (rw)` and returns the mount point
/// of the first line whose device field is exactly `device`.
///
/// Devices mounted through an alias (symlink, `UUID=`, `/dev/mapper/..`)
/// do not match and are reported as not mounted.
pub fn parse_mount_point(output_mount: &str, device: &str) -> Result<Option<String>, LvgError> {
    let re = Regex::new(&format!(r"^{}\s+on\s+(.*)\s+type.*", regex::escape(device)))
        .map_err(|err| LvgError::LvgRsBug(format!("bad mount regex for {device}: {err}")))?;

    for line in output_mount.lines() {
        if let Some(captures) = re.captures(line) {
            return Ok(captures.get(1).map(|m| m.as_str().to_string()));
        }
    }

    Ok(None)
}
