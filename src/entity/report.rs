use serde::Serialize;
use serde_json::json;

use super::action::Action;

#[derive(Debug)]
pub struct Report {
    pub dry_run: bool,
    pub volume_groups: Vec<ReportVg>,
    pub duration: std::time::Duration,
}

#[derive(Debug, Serialize)]
pub struct ReportVg {
    pub name: String,
    pub changed: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl Report {
    pub fn changed(&self) -> bool {
        self.volume_groups.iter().any(|vg| vg.changed)
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "dryRun": self.dry_run,
            "changed": self.changed(),
            "volumeGroups": self.volume_groups,
            "elapsedTime": self.duration,
        })
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}
