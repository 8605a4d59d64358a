use serde::{
    Deserialize,
    Serialize,
};

/// A step performed (or, in dry-run, planned) while converging a volume group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "unmountPv")]
    UnmountPv { device: String, mountpoint: String },

    #[serde(rename = "disableMount")]
    DisableMount { device: String, mountpoint: String },

    #[serde(rename = "createVg")]
    CreateVg {
        vg: String,
        pvs: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pe_size: Option<String>,
    },

    #[serde(rename = "extendVg")]
    ExtendVg { vg: String, pv: String },

    #[serde(rename = "convergeLv")]
    ConvergeLv { vg: String, lv: String, changed: bool },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_json_actions() {
        let actions = vec![
            Action::UnmountPv {
                device: "/dev/sdb".into(),
                mountpoint: "/mnt/ephemeral0".into(),
            },
            Action::CreateVg {
                vg: "data_vg".into(),
                pvs: vec!["/dev/sdb".into()],
                pe_size: None,
            },
            Action::ConvergeLv {
                vg: "data_vg".into(),
                lv: "home".into(),
                changed: true,
            },
        ];

        let expected = json!([
            {"unmountPv": {"device": "/dev/sdb", "mountpoint": "/mnt/ephemeral0"}},
            {"createVg": {"vg": "data_vg", "pvs": ["/dev/sdb"]}},
            {"convergeLv": {"vg": "data_vg", "lv": "home", "changed": true}},
        ]);

        assert_eq!(expected, serde_json::to_value(&actions).unwrap());
    }
}
