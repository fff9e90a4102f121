use crate::{DeviceProfile, Verdict};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;
use time::OffsetDateTime;

/// Fixed-length (SHA-256) digest. Hex-encoded on the wire.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest([u8; Digest::LEN]);

impl Digest {
    pub const LEN: usize = 32;

    pub fn from_bytes(bytes: [u8; Digest::LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Digest::LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, DigestParseError> {
        let raw = hex::decode(s).map_err(|_| DigestParseError::NotHex)?;
        let bytes: [u8; Digest::LEN] = raw
            .try_into()
            .map_err(|v: Vec<u8>| DigestParseError::WrongLength(v.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl TryFrom<String> for Digest {
    type Error = DigestParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Digest::from_hex(&value)
    }
}

impl From<Digest> for String {
    fn from(value: Digest) -> Self {
        value.to_hex()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DigestParseError {
    #[error("digest is not valid hex")]
    NotHex,

    #[error("digest must be {len} bytes, got {0}", len = Digest::LEN)]
    WrongLength(usize),
}

/// The ledger-persisted unit for one device evaluation.
///
/// Immutable once built: there is no update path, only create and read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LogRecord {
    /// Ledger key. Unique per logical event.
    pub ref_id: String,
    /// SHA-256 over the canonical encoding of `profile` followed by that of `verdict`.
    #[schemars(with = "String")]
    pub digest: Digest,
    pub profile: DeviceProfile,
    pub verdict: Verdict,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// SHA-256 over `ref_id`, `digest` and `created_at`.
    #[schemars(with = "String")]
    pub seal: Digest,
}

/// Ledger unit for events that are not device evaluations (scan results).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventRecord {
    pub ref_id: String,
    pub event_type: String,
    pub payload: JsonValue,
    /// SHA-256 over the canonical encoding of `{eventType, payload}`.
    #[schemars(with = "String")]
    pub digest: Digest,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[schemars(with = "String")]
    pub seal: Digest,
}

/// One host as observed by a network scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HostScan {
    pub ip: String,
    pub status: String,
    #[serde(default)]
    pub open_ports: Vec<String>,
    #[serde(default)]
    pub vulnerabilities: Vec<String>,
}

/// Comparison of an off-ledger copy of a record against the verified ledger copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub ref_id: String,
    pub matches: bool,
    #[schemars(with = "String")]
    pub local_digest: Digest,
    #[schemars(with = "String")]
    pub ledger_digest: Digest,
}
