//! The `ingest-scan` use case: parse scanner output and log one event per host.

use crate::cancel::CancelToken;
use crate::clock::Clock;
use crate::config::run_in_pool;
use crate::orchestrator::{Ingested, ItemOutcome, ProcessError, ingest_scan};
use compliguard_ledger::{LedgerClient, LedgerTransport};
use compliguard_scan::parse_scan_report;
use compliguard_types::{BatchOutcome, OutcomeStatus};
use tracing::info;

#[derive(Clone, Debug)]
pub struct IngestInput<'a> {
    pub scan_text: &'a str,
    /// Reference ids are `"<prefix>/<ip>"`.
    pub prefix: &'a str,
    pub workers: Option<usize>,
    pub cancel: CancelToken,
}

pub fn run_ingest_scan<T: LedgerTransport, C: Clock>(
    input: IngestInput<'_>,
    ledger: &LedgerClient<T>,
    clock: &C,
) -> anyhow::Result<Vec<BatchOutcome>> {
    let prefix = input.prefix.trim();
    if prefix.is_empty() {
        anyhow::bail!("scan reference prefix must be non-empty");
    }

    let hosts = parse_scan_report(input.scan_text);
    info!(hosts = hosts.len(), prefix, "scan parsed");

    let results = run_in_pool(input.workers, || {
        ingest_scan(ledger, clock, &hosts, prefix, &input.cancel)
    })?;

    Ok(results.into_iter().map(to_outcome).collect())
}

fn to_outcome(item: ItemOutcome<Ingested>) -> BatchOutcome {
    let (status, digest, error) = match item.result {
        Ok(ingested) => (OutcomeStatus::Logged, Some(ingested.record.digest), None),
        Err(ProcessError::Cancelled) => (OutcomeStatus::Cancelled, None, None),
        Err(err) => (OutcomeStatus::Failed, None, Some(err.to_string())),
    };
    BatchOutcome {
        ref_id: item.ref_id,
        status,
        verdict: None,
        digest,
        error,
    }
}

/// 0 when every host was logged, 1 otherwise.
pub fn ingest_exit_code(outcomes: &[BatchOutcome]) -> i32 {
    if outcomes.iter().all(|o| o.status == OutcomeStatus::Logged) {
        0
    } else {
        1
    }
}
