use crate::manifest::LvSize;
use crate::utils::shell::Cmd;

/// Executes:
/// ```shell
/// vgs --noheadings -o vg_name
/// ```
pub fn cmd_vgs() -> Cmd {
    Cmd::new("vgs").args(["--noheadings", "-o", "vg_name"])
}

/// Executes:
/// ```shell
/// pvs --noheadings -o pv_name,vg_name --separator ,
/// ```
pub fn cmd_pvs() -> Cmd {
    Cmd::new("pvs").args(["--noheadings", "-o", "pv_name,vg_name", "--separator", ","])
}

/// Executes:
/// ```shell
/// lvs --noheadings -o lv_name,vg_name --separator ,
/// ```
pub fn cmd_lvs() -> Cmd {
    Cmd::new("lvs").args(["--noheadings", "-o", "lv_name,vg_name", "--separator", ","])
}

/// Executes:
/// ```shell
/// vgcreate ${{ name }} [-s ${{ pe_size }}] ${{ pvs }}
/// ```
pub fn cmd_vgcreate(name: &str, pvs: &[String], pe_size: Option<&str>) -> Cmd {
    let mut cmd = Cmd::new("vgcreate").arg(name);
    if let Some(size) = pe_size {
        cmd = cmd.args(["-s", size]);
    }

    cmd.args(pvs.iter().map(String::as_str))
}

/// Executes:
/// ```shell
/// vgextend ${{ name }} ${{ pv }}
/// ```
pub fn cmd_vgextend(name: &str, pv: &str) -> Cmd {
    Cmd::new("vgextend").args([name, pv])
}

/// Executes:
/// ```shell
/// lvcreate -L ${{ size }} [-i ${{ stripes }}] [-I ${{ stripe_size }}] -n ${{ lv }} ${{ vg }}
///
/// # or, if size is given in extents (e.g. 50%VG or 100%FREE):
///
/// lvcreate -l ${{ size }} ... -n ${{ lv }} ${{ vg }}
/// ```
pub fn cmd_lvcreate(
    vg: &str,
    lv: &str,
    size: &LvSize,
    stripes: Option<u32>,
    stripe_size: Option<&str>,
) -> Cmd {
    let (size_flag, size) = match size {
        LvSize::Absolute(s) => ("-L", s.as_str()),
        LvSize::Extents(s) => ("-l", s.as_str()),
    };

    let mut cmd = Cmd::new("lvcreate").args([size_flag, size]);
    if let Some(stripes) = stripes {
        cmd = cmd.args(["-i".to_string(), stripes.to_string()]);
    }
    if let Some(stripe_size) = stripe_size {
        cmd = cmd.args(["-I", stripe_size]);
    }

    cmd.args(["-n", lv, vg])
}

/// Device node of a logical volume
pub fn lv_path(vg: &str, lv: &str) -> String {
    format!("/dev/{vg}/{lv}")
}

/// Collects VG names from `vgs` output
pub fn parse_vgs(output_vgs: &str) -> Vec<String> {
    output_vgs
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Collects PVs belonging to `vg` from `pvs` output,
/// in the order `pvs` lists them.
/// PVs not in any VG have an empty 2nd column.
pub fn parse_pvs_in_vg(output_pvs: &str, vg: &str) -> Vec<String> {
    split_pairs(output_pvs)
        .filter(|(_, pv_vg)| *pv_vg == vg)
        .map(|(pv, _)| pv.to_string())
        .collect()
}

/// Returns whether `lvs` output lists LV `lv` in VG `vg`
pub fn lvs_contains(output_lvs: &str, vg: &str, lv: &str) -> bool {
    split_pairs(output_lvs).any(|(name, lv_vg)| name == lv && lv_vg == vg)
}

fn split_pairs(output: &str) -> impl Iterator<Item = (&str, &str)> {
    output.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut cols = line.splitn(2, ',');
        let first = cols.next()?.trim();
        let second = cols.next().unwrap_or("").trim();

        Some((first, second))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_vgcreate() {
        let pvs = vec!["/dev/sdb".to_string(), "/dev/sdc".to_string()];

        assert_eq!(
            "vgcreate data_vg /dev/sdb /dev/sdc",
            cmd_vgcreate("data_vg", &pvs, None).to_string()
        );
        assert_eq!(
            "vgcreate data_vg -s 4M /dev/sdb /dev/sdc",
            cmd_vgcreate("data_vg", &pvs, Some("4M")).to_string()
        );
        assert_eq!(
            "vgextend data_vg /dev/sdd",
            cmd_vgextend("data_vg", "/dev/sdd").to_string()
        );
    }

    #[test]
    fn test_cmd_lvcreate() {
        let tests = vec![
            (
                cmd_lvcreate("vg0", "home", &LvSize::Absolute("10G".into()), None, None),
                "lvcreate -L 10G -n home vg0",
            ),
            (
                cmd_lvcreate("vg0", "rest", &LvSize::Extents("100%FREE".into()), None, None),
                "lvcreate -l 100%FREE -n rest vg0",
            ),
            (
                cmd_lvcreate("vg0", "fast", &LvSize::Absolute("1T".into()), Some(2), Some("64K")),
                "lvcreate -L 1T -i 2 -I 64K -n fast vg0",
            ),
        ];

        for (cmd, expected) in tests {
            assert_eq!(expected, cmd.to_string());
        }
    }

    #[test]
    fn test_parse_vgs() {
        let output = "  data_vg\n  vg0  \n\n";
        assert_eq!(vec!["data_vg".to_string(), "vg0".to_string()], parse_vgs(output));
        assert!(parse_vgs("").is_empty());
    }

    #[test]
    fn test_parse_pvs_in_vg() {
        let output = "  /dev/sdb,data_vg
  /dev/sdc,vg0
  /dev/sdd,
  /dev/sde,data_vg
";

        assert_eq!(
            vec!["/dev/sdb".to_string(), "/dev/sde".to_string()],
            parse_pvs_in_vg(output, "data_vg")
        );
        assert_eq!(vec!["/dev/sdc".to_string()], parse_pvs_in_vg(output, "vg0"));
        assert!(parse_pvs_in_vg(output, "nope").is_empty());
    }

    #[test]
    fn test_lvs_contains() {
        let output = "  home,vg0\n  swap,vg0\n  home,data_vg\n";

        assert!(lvs_contains(output, "vg0", "home"));
        assert!(lvs_contains(output, "data_vg", "home"));
        assert!(!lvs_contains(output, "data_vg", "swap"));
        assert!(!lvs_contains("", "vg0", "home"));
    }
}
