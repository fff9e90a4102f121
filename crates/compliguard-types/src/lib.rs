//! Stable DTOs and IDs used across the compliguard workspace.
//!
//! This crate is intentionally boring:
//! - device profiles and verdicts as they appear on the wire
//! - ledger record shapes and the digest newtype
//! - stable string IDs for checks and reason codes
//! - the batch report schema
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
mod profile;
mod record;
mod report;
mod verdict;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use profile::{DeviceClass, DeviceProfile};
pub use record::{AuditReport, Digest, DigestParseError, EventRecord, HostScan, LogRecord};
pub use report::{
    BatchOutcome, BatchReport, OutcomeCounts, OutcomeStatus, SCHEMA_BATCH_V1, ToolMeta,
};
pub use verdict::{ReasonCode, Verdict, Violation};
