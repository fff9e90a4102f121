//! The `evaluate` use case: verdicts only, no ledger writes.

use crate::config::{build_catalog, load_config};
use crate::input::parse_submissions;
use compliguard_domain::evaluate;
use compliguard_settings::{Overrides, ResolvedConfig};
use compliguard_types::Verdict;
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct EvaluateInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    /// JSON device submissions.
    pub submissions_text: &'a str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedDevice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    pub name: String,
    pub class: String,
    pub verdict: Verdict,
}

#[derive(Clone, Debug)]
pub struct EvaluateOutput {
    pub devices: Vec<EvaluatedDevice>,
    pub resolved_config: ResolvedConfig,
}

pub fn run_evaluate(input: EvaluateInput<'_>) -> anyhow::Result<EvaluateOutput> {
    let resolved = load_config(input.config_text, input.overrides)?;
    let catalog = build_catalog(&resolved)?;
    let items = parse_submissions(input.submissions_text)?;

    let devices = items
        .into_iter()
        .map(|item| EvaluatedDevice {
            verdict: evaluate(&catalog, &item.profile),
            ref_id: item.ref_id,
            name: item.profile.name,
            class: item.profile.class.to_string(),
        })
        .collect();

    Ok(EvaluateOutput {
        devices,
        resolved_config: resolved,
    })
}

/// 0 when every device is compliant, 2 otherwise.
pub fn evaluate_exit_code(devices: &[EvaluatedDevice]) -> i32 {
    if devices.iter().all(|d| d.verdict.is_compliant()) {
        0
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliguard_types::ReasonCode;

    const DEVICES: &str = r#"[
        {"name": "HP_Elitebook", "address": "192.168.1.20", "class": "laptop", "osVersion": "Windows 10"},
        {"name": "Main_Router", "address": "192.168.0.1", "class": "router", "osVersion": "RouterOS 7"},
        {"name": "Thermostat", "address": "192.168.1.50", "class": "IoT", "osVersion": "fw"},
        {"name": "Office_Printer", "address": "192.168.1.9", "class": "printer", "osVersion": "fw"},
        {"name": "Mystery", "address": "192.168.1.99", "class": "unknown", "osVersion": ""}
    ]"#;

    fn run(config: &str) -> EvaluateOutput {
        run_evaluate(EvaluateInput {
            config_text: config,
            overrides: Overrides::default(),
            submissions_text: DEVICES,
        })
        .expect("evaluate")
    }

    #[test]
    fn default_policy_verdicts() {
        let out = run("");
        let reasons: Vec<_> = out.devices.iter().map(|d| d.verdict.reason()).collect();
        assert_eq!(
            reasons,
            [
                Some(ReasonCode::OutdatedOs),
                None,
                Some(ReasonCode::OpenPort),
                Some(ReasonCode::UnauthorizedExternalComm),
                None,
            ]
        );
        assert_eq!(out.devices[1].verdict, Verdict::Compliant);
        assert!(matches!(
            out.devices[4].verdict,
            Verdict::UnknownDevice { .. }
        ));
        assert_eq!(evaluate_exit_code(&out.devices), 2);
    }

    #[test]
    fn config_changes_verdicts() {
        let out = run(
            r#"
[checks."laptop.os_currency"]
enabled = false
"#,
        );
        assert!(out.devices[0].verdict.is_compliant());
    }

    #[test]
    fn exit_code_zero_when_all_compliant() {
        let devices = vec![EvaluatedDevice {
            ref_id: None,
            name: "r".to_string(),
            class: "router".to_string(),
            verdict: Verdict::Compliant,
        }];
        assert_eq!(evaluate_exit_code(&devices), 0);
    }
}
