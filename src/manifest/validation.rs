use std::collections::{
    HashMap,
    HashSet,
};

use super::{
    parse_human_bytes,
    Manifest,
    ManifestLv,
    ManifestVg,
};
use crate::errors::LvgError;

// LVM allows at most 127 characters for VG and LV names
const MAX_NAME_LEN: usize = 127;

/// Validates manifest before anything is applied to the host.
///
/// Only the manifest itself is checked. Whether the PVs exist on the
/// host is left to vgcreate/vgextend, which report their own errors.
pub fn validate(manifest: &Manifest) -> Result<(), LvgError> {
    if manifest.volume_groups.is_empty() {
        return Err(LvgError::BadManifest(
            "manifest declares no volume groups".to_string(),
        ));
    }

    let mut vg_names = HashSet::new();

    // Maps PV to the first VG declaring it
    let mut pv_owners = HashMap::<&str, &str>::new();

    for vg in &manifest.volume_groups {
        validate_vg(vg)?;

        if !vg_names.insert(vg.name.as_str()) {
            return Err(LvgError::BadManifest(format!(
                "duplicate volume group {}",
                vg.name,
            )));
        }

        for pv in &vg.physical_volumes {
            if let Some(owner) = pv_owners.insert(pv.as_str(), vg.name.as_str()) {
                return Err(LvgError::BadManifest(format!(
                    "pv {pv} declared for both vg {owner} and vg {}",
                    vg.name,
                )));
            }
        }
    }

    Ok(())
}

fn validate_vg(vg: &ManifestVg) -> Result<(), LvgError> {
    let msg = "lvm vg validation failed";

    validate_name(&vg.name).map_err(|reason| {
        LvgError::BadManifest(format!("{msg}: bad vg name '{}': {reason}", vg.name))
    })?;

    if vg.physical_volumes.is_empty() {
        return Err(LvgError::BadManifest(format!(
            "{msg}: vg {} has no pvs",
            vg.name,
        )));
    }

    let mut dups = HashSet::new();
    for pv in &vg.physical_volumes {
        if !pv.starts_with('/') {
            return Err(LvgError::BadManifest(format!(
                "{msg}: vg {} pv {pv} is not an absolute device path",
                vg.name,
            )));
        }

        if !dups.insert(pv.as_str()) {
            return Err(LvgError::BadManifest(format!(
                "{msg}: vg {} has duplicate pv {pv}",
                vg.name,
            )));
        }
    }

    if let Some(ref size) = vg.physical_extent_size {
        validate_nonzero_bytes(size).map_err(|err| {
            LvgError::BadManifest(format!(
                "{msg}: vg {} bad physical extent size: {err}",
                vg.name,
            ))
        })?;
    }

    let mut lv_names = HashSet::new();
    for lv in &vg.logical_volumes {
        validate_lv(lv).map_err(|err| {
            LvgError::BadManifest(format!("{msg}: vg {}: {err}", vg.name))
        })?;

        if !lv_names.insert(lv.name.as_str()) {
            return Err(LvgError::BadManifest(format!(
                "{msg}: vg {} has duplicate lv {}",
                vg.name, lv.name,
            )));
        }
    }

    Ok(())
}

fn validate_lv(lv: &ManifestLv) -> Result<(), LvgError> {
    validate_name(&lv.name).map_err(|reason| {
        LvgError::BadManifest(format!("bad lv name '{}': {reason}", lv.name))
    })?;

    lv.lv_size()?;

    if lv.stripes == Some(0) {
        return Err(LvgError::BadManifest(format!(
            "lv {}: stripes must be at least 1",
            lv.name,
        )));
    }

    if let Some(ref stripe_size) = lv.stripe_size {
        if lv.stripes.is_none() {
            return Err(LvgError::BadManifest(format!(
                "lv {}: stripe_size without stripes",
                lv.name,
            )));
        }

        validate_nonzero_bytes(stripe_size)?;
    }

    if let Some(ref fs) = lv.filesystem {
        if fs.is_empty() || fs.contains(|c: char| c == '/' || c.is_whitespace()) {
            return Err(LvgError::BadManifest(format!(
                "lv {}: bad filesystem type '{fs}'",
                lv.name,
            )));
        }
    }

    Ok(())
}

/// Checks a VG or LV name against what LVM accepts:
/// `[a-zA-Z0-9+_.-]`, not starting with `-`, and not `.` or `..`
fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty name");
    }

    if name.len() > MAX_NAME_LEN {
        return Err("name too long");
    }

    if name == "." || name == ".." {
        return Err("reserved name");
    }

    if name.starts_with('-') {
        return Err("name starts with '-'");
    }

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'));

    if !valid_chars {
        return Err("invalid characters");
    }

    Ok(())
}

fn validate_nonzero_bytes(s: &str) -> Result<(), LvgError> {
    parse_human_bytes(s)?;

    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.chars().all(|c| c == '0') {
        return Err(LvgError::BadManifest(format!("zero size {s}")));
    }

    Ok(())
}
