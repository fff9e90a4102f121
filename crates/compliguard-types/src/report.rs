use crate::{Digest, Verdict};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for batch reports.
pub const SCHEMA_BATCH_V1: &str = "compliguard.batch.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// Evaluated and durably recorded (including idempotent replays).
    Logged,
    /// The pipeline failed for this item; see `error`.
    Failed,
    /// Abandoned before it started because the batch was cancelled.
    Cancelled,
}

/// Per-item result of a batch run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub ref_id: String,
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<Digest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Verdict categories are tallied for logged outcomes only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeCounts {
    pub compliant: u32,
    pub violation: u32,
    pub unknown_device: u32,
    pub evaluation_error: u32,
    pub failed: u32,
    pub cancelled: u32,
}

impl OutcomeCounts {
    pub fn tally(outcomes: &[BatchOutcome]) -> Self {
        let mut counts = OutcomeCounts::default();
        for o in outcomes {
            match o.status {
                OutcomeStatus::Failed => counts.failed += 1,
                OutcomeStatus::Cancelled => counts.cancelled += 1,
                OutcomeStatus::Logged => match &o.verdict {
                    Some(Verdict::Compliant) => counts.compliant += 1,
                    Some(Verdict::Violation { .. }) => counts.violation += 1,
                    Some(Verdict::UnknownDevice { .. }) => counts.unknown_device += 1,
                    Some(Verdict::EvaluationError { .. }) => counts.evaluation_error += 1,
                    None => {}
                },
            }
        }
        counts
    }

    /// Logged items whose verdict is anything other than compliant.
    pub fn non_compliant(&self) -> u32 {
        self.violation + self.unknown_device + self.evaluation_error
    }
}

/// Artifact written after a batch run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    /// Policy profile the catalog was built from.
    pub profile: String,
    pub outcomes: Vec<BatchOutcome>,
    pub counts: OutcomeCounts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReasonCode;

    fn outcome(status: OutcomeStatus, verdict: Option<Verdict>) -> BatchOutcome {
        BatchOutcome {
            ref_id: "r".to_string(),
            status,
            verdict,
            digest: None,
            error: None,
        }
    }

    #[test]
    fn tally_counts_verdicts_for_logged_items_only() {
        let violation = Verdict::Violation {
            reason: ReasonCode::OpenPort,
            check_id: "iot.open_ports".to_string(),
            detail: String::new(),
        };
        let outcomes = vec![
            outcome(OutcomeStatus::Logged, Some(Verdict::Compliant)),
            outcome(OutcomeStatus::Logged, Some(violation.clone())),
            outcome(OutcomeStatus::Failed, Some(violation)),
            outcome(OutcomeStatus::Cancelled, None),
        ];
        let counts = OutcomeCounts::tally(&outcomes);
        assert_eq!(counts.compliant, 1);
        assert_eq!(counts.violation, 1);
        assert_eq!(counts.failed, 1);
        assert_eq!(counts.cancelled, 1);
        assert_eq!(counts.non_compliant(), 1);
    }
}
