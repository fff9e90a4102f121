use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a device is out of compliance. Serialized form matches the `CODE_*` ids.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    MissingName,
    OutdatedOs,
    UnlistedDevice,
    MalformedAddress,
    UntrustedNetwork,
    OpenPort,
    UnauthorizedExternalComm,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 7] = [
        ReasonCode::MissingName,
        ReasonCode::OutdatedOs,
        ReasonCode::UnlistedDevice,
        ReasonCode::MalformedAddress,
        ReasonCode::UntrustedNetwork,
        ReasonCode::OpenPort,
        ReasonCode::UnauthorizedExternalComm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::MissingName => ids::CODE_MISSING_NAME,
            ReasonCode::OutdatedOs => ids::CODE_OUTDATED_OS,
            ReasonCode::UnlistedDevice => ids::CODE_UNLISTED_DEVICE,
            ReasonCode::MalformedAddress => ids::CODE_MALFORMED_ADDRESS,
            ReasonCode::UntrustedNetwork => ids::CODE_UNTRUSTED_NETWORK,
            ReasonCode::OpenPort => ids::CODE_OPEN_PORT,
            ReasonCode::UnauthorizedExternalComm => ids::CODE_UNAUTHORIZED_EXTERNAL_COMM,
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single check reports when a profile fails it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub reason: ReasonCode,
    pub check_id: String,
    pub detail: String,
}

impl Violation {
    pub fn new(reason: ReasonCode, check_id: &str, detail: impl Into<String>) -> Self {
        Self {
            reason,
            check_id: check_id.to_string(),
            detail: detail.into(),
        }
    }
}

/// Outcome of evaluating one device profile. Exactly one variant per evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case", deny_unknown_fields)]
pub enum Verdict {
    Compliant,
    Violation {
        reason: ReasonCode,
        #[serde(rename = "checkId")]
        check_id: String,
        detail: String,
    },
    /// No cascade is registered for this class tag.
    UnknownDevice { class: String },
    /// Catalog or check fault. Never produced for bad device data.
    EvaluationError { cause: String },
}

impl Verdict {
    pub fn is_compliant(&self) -> bool {
        matches!(self, Verdict::Compliant)
    }

    pub fn reason(&self) -> Option<ReasonCode> {
        match self {
            Verdict::Violation { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Stable lowercase label, identical to the serialized `status` tag.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Compliant => "compliant",
            Verdict::Violation { .. } => "violation",
            Verdict::UnknownDevice { .. } => "unknown_device",
            Verdict::EvaluationError { .. } => "evaluation_error",
        }
    }
}

impl From<Violation> for Verdict {
    fn from(v: Violation) -> Self {
        Verdict::Violation {
            reason: v.reason,
            check_id: v.check_id,
            detail: v.detail,
        }
    }
}
