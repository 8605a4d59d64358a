//! Command builders and output parsers for the Linux programs lvg-rs drives.
//! Nothing in here executes anything; see [`crate::host`].

pub mod fstab;
pub mod lvm;
pub mod mkfs;
pub mod mount;
