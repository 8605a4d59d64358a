pub mod defaults {
    pub const FSTAB: &str = "/etc/fstab";
    pub const LOG_FILTER: &str = "info";
    pub const LOG_FILTER_VERBOSE: &str = "debug";
}

pub const ENV_LVG_FSTAB: &str = "LVG_FSTAB";

// Use programs instead of bindings to avoid API dependencies
pub const REQUIRED_COMMANDS: [&str; 9] = [
    "mount", "umount", "vgs", "pvs", "lvs", "vgcreate", "vgextend", "lvcreate", "blkid",
];
