use crate::utils::shell::Cmd;

/// Executes:
/// ```shell
/// mkfs.${{ fs_type }} ${{ device }}
/// ```
pub fn cmd_mkfs(fs_type: &str, device: &str) -> Cmd {
    Cmd::new(&format!("mkfs.{fs_type}")).arg(device)
}

// blkid exits with 2 when it finds nothing to report on the device
pub const BLKID_NOT_FOUND: i32 = 2;

/// Executes:
/// ```shell
/// blkid -o value -s TYPE ${{ device }}
/// ```
pub fn cmd_blkid_type(device: &str) -> Cmd {
    Cmd::new("blkid").args(["-o", "value", "-s", "TYPE", device])
}

/// Filesystem type from `blkid -o value -s TYPE` output, if any
pub fn parse_blkid_type(output_blkid: &str) -> Option<String> {
    output_blkid
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}

#[test]
fn test_cmd_mkfs() {
    assert_eq!(
        "mkfs.ext4 /dev/data_vg/home",
        cmd_mkfs("ext4", "/dev/data_vg/home").to_string()
    );
    assert_eq!(
        "blkid -o value -s TYPE /dev/data_vg/home",
        cmd_blkid_type("/dev/data_vg/home").to_string()
    );
}

#[test]
fn test_parse_blkid_type() {
    assert_eq!(Some("ext4".to_string()), parse_blkid_type("ext4\n"));
    assert_eq!(Some("xfs".to_string()), parse_blkid_type("\n  xfs  \n"));
    assert_eq!(None, parse_blkid_type(""));
    assert_eq!(None, parse_blkid_type("\n"));
}
