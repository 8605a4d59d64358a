pub mod validation;

use humanize_rs::bytes;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};

use crate::errors::LvgError;

/// Declared LVM state of the host
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(
        alias = "vgs",
        alias = "volume-groups",
        alias = "lvm_volume_groups"
    )]
    pub volume_groups: Vec<ManifestVg>,
}

impl Manifest {
    #[inline]
    pub fn from_yaml(manifest_yaml: &str) -> Result<Self, LvgError> {
        parse(manifest_yaml)
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ManifestVg {
    pub name: String,

    // A single device may be given as a plain string
    #[serde(
        alias = "pvs",
        alias = "physical-volumes",
        deserialize_with = "one_or_many"
    )]
    pub physical_volumes: Vec<String>,

    // Passed verbatim to vgcreate -s
    #[serde(alias = "pe_size", alias = "physical-extent-size")]
    pub physical_extent_size: Option<String>,

    #[serde(default, alias = "lvs", alias = "logical-volumes")]
    pub logical_volumes: Vec<ManifestLv>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ManifestLv {
    pub name: String,

    // e.g. 10G, 512M, 50%VG, 100%FREE, or a number of extents.
    // None means all free space left in the VG.
    pub size: Option<String>,

    pub stripes: Option<u32>,

    #[serde(alias = "stripe-size")]
    pub stripe_size: Option<String>,

    #[serde(alias = "fs", alias = "fs_type", alias = "fstype")]
    pub filesystem: Option<String>,
}

/// How `lvcreate` is told the size of an LV
#[derive(Debug, PartialEq, Clone)]
pub enum LvSize {
    /// `-L`, e.g. 10G
    Absolute(String),
    /// `-l`, e.g. 100%FREE or 2560
    Extents(String),
}

const PERCENT_OF: [&str; 4] = ["FREE", "VG", "PVS", "ORIGIN"];

impl ManifestLv {
    pub fn lv_size(&self) -> Result<LvSize, LvgError> {
        let size = match &self.size {
            None => return Ok(LvSize::Extents("100%FREE".to_string())),
            Some(size) => size.trim(),
        };

        if let Some((percent, of)) = size.split_once('%') {
            let valid_percent = matches!(percent.parse::<u8>(), Ok(1..=100));
            if !valid_percent || !PERCENT_OF.contains(&of) {
                return Err(LvgError::BadManifest(format!(
                    "lv {}: bad percentage size {size}",
                    self.name,
                )));
            }

            return Ok(LvSize::Extents(size.to_string()));
        }

        if !size.is_empty() && size.chars().all(|c| c.is_ascii_digit()) {
            return Ok(LvSize::Extents(size.to_string()));
        }

        parse_human_bytes(size)?;

        Ok(LvSize::Absolute(size.to_string()))
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(pv) => vec![pv],
        OneOrMany::Many(pvs) => pvs,
    })
}

pub fn parse_human_bytes(s: &str) -> Result<bytes::Bytes, LvgError> {
    (s.to_lowercase())
        .parse::<bytes::Bytes>()
        .map_err(|err| LvgError::BadManifest(format!("bad byte unit string {s}: {err}")))
}

#[inline]
pub fn parse(manifest: &str) -> Result<Manifest, LvgError> {
    serde_yaml::from_str(manifest).map_err(|err| LvgError::BadManifest(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lv(size: Option<&str>) -> ManifestLv {
        ManifestLv {
            name: "lv".into(),
            size: size.map(String::from),
            stripes: None,
            stripe_size: None,
            filesystem: None,
        }
    }

    #[test]
    fn test_parse() {
        let example_yaml = include_str!("./samples/ephemeral-data.yaml");
        let manifest = parse(example_yaml).expect("failed to parse sample manifest");

        assert_eq!(2, manifest.volume_groups.len());

        let data = &manifest.volume_groups[0];
        assert_eq!("data_vg", data.name);
        assert_eq!(vec!["/dev/xvdb", "/dev/xvdc"], data.physical_volumes);
        assert_eq!(Some("4M".to_string()), data.physical_extent_size);
        assert_eq!(2, data.logical_volumes.len());
        assert_eq!(Some("ext4".to_string()), data.logical_volumes[0].filesystem);
        assert_eq!(Some(2), data.logical_volumes[1].stripes);

        let logs = &manifest.volume_groups[1];
        assert_eq!(vec!["/dev/xvdd"], logs.physical_volumes);
        assert_eq!(None, logs.physical_extent_size);
        assert!(logs.logical_volumes.is_empty());
    }

    #[test]
    fn test_parse_bad() {
        let bads = [
            "",
            "volume_groups: data_vg",
            "volume_groups:\n  - pvs: [/dev/sdb]",
            "volume_groups:\n  - name: vg\n    pvs: {a: b}",
        ];

        for bad in bads {
            assert!(parse(bad).is_err(), "should fail: {bad:?}");
        }
    }

    #[test]
    fn test_lv_size() {
        let tests = vec![
            (None, LvSize::Extents("100%FREE".into())),
            (Some("100%FREE"), LvSize::Extents("100%FREE".into())),
            (Some("50%VG"), LvSize::Extents("50%VG".into())),
            (Some("1%PVS"), LvSize::Extents("1%PVS".into())),
            (Some("2560"), LvSize::Extents("2560".into())),
            (Some("10G"), LvSize::Absolute("10G".into())),
            (Some("512M"), LvSize::Absolute("512M".into())),
            (Some("1TiB"), LvSize::Absolute("1TiB".into())),
        ];

        for (size, expected) in tests {
            let result = lv(size)
                .lv_size()
                .unwrap_or_else(|err| panic!("{size:?} should be valid: {err}"));

            assert_eq!(expected, result);
        }

        let invalids = ["0%FREE", "101%VG", "50%", "50%LV", "%VG", "ten gigs", "G", "-1G"];
        for size in invalids {
            if let Ok(parsed) = lv(Some(size)).lv_size() {
                panic!("{size} should be invalid, but got {parsed:?}");
            }
        }
    }
}
