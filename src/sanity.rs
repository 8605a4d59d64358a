use colored::Colorize;
use nix::unistd::Uid;

use crate::constants::REQUIRED_COMMANDS;
use crate::manifest::Manifest;
use crate::utils::shell::in_path;

/// Warns about conditions that will make LVM commands fail.
/// Nothing here is fatal: the commands report their own errors.
pub fn check(manifest: &Manifest) {
    if !Uid::effective().is_root() {
        eprintln!("{}", "WARN: running as non-root user".yellow());
    }

    for program in missing_programs(manifest) {
        eprintln!("{}", format!("WARN: program {program} not found in PATH").yellow());
    }
}

fn missing_programs(manifest: &Manifest) -> Vec<String> {
    let mut programs: Vec<String> = REQUIRED_COMMANDS.iter().map(|p| p.to_string()).collect();

    for vg in &manifest.volume_groups {
        for lv in &vg.logical_volumes {
            if let Some(ref fs_type) = lv.filesystem {
                let mkfs = format!("mkfs.{fs_type}");
                if !programs.contains(&mkfs) {
                    programs.push(mkfs);
                }
            }
        }
    }

    programs.retain(|program| !in_path(program));
    programs
}

#[test]
fn test_missing_programs() {
    let manifest = crate::manifest::parse(
        "volume_groups:\n  - name: vg\n    pvs: /dev/sdb\n    lvs:\n      - name: lv\n        fs: lvgrsfs\n",
    )
    .unwrap();

    assert!(missing_programs(&manifest).contains(&"mkfs.lvgrsfs".to_string()));
}
