//! Device submissions as read from an input file.

use crate::orchestrator::WorkItem;
use anyhow::Context;
use compliguard_types::{DeviceClass, DeviceProfile};
use serde::Deserialize;

/// One submitted device: a profile plus an optional caller-chosen reference id.
///
/// Field names follow the profile wire format; `ip`, `type` and `os` are accepted as aliases.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Submission {
    #[serde(default)]
    pub ref_id: Option<String>,
    pub name: String,
    #[serde(default, alias = "ip")]
    pub address: String,
    #[serde(alias = "type")]
    pub class: DeviceClass,
    #[serde(default, alias = "os")]
    pub os_version: String,
}

impl From<Submission> for WorkItem {
    fn from(s: Submission) -> Self {
        WorkItem {
            ref_id: s.ref_id,
            profile: DeviceProfile {
                name: s.name,
                address: s.address,
                class: s.class,
                os_version: s.os_version,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Submission>),
    One(Box<Submission>),
}

/// Parse a JSON array of submissions (a single object is accepted too).
pub fn parse_submissions(text: &str) -> anyhow::Result<Vec<WorkItem>> {
    let parsed: OneOrMany = serde_json::from_str(text)
        .context("parse device submissions (expected a JSON array of device profiles)")?;
    let subs = match parsed {
        OneOrMany::Many(v) => v,
        OneOrMany::One(s) => vec![*s],
    };
    Ok(subs.into_iter().map(WorkItem::from).collect())
}
