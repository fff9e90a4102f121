//! Evaluation pipeline: profile -> verdict -> record -> ledger, one device or many.

use crate::cancel::CancelToken;
use crate::clock::Clock;
use compliguard_domain::canonical::EncodingError;
use compliguard_domain::record::{build, build_event, derive_ref_id};
use compliguard_domain::{RuleCatalog, evaluate};
use compliguard_ledger::{LedgerClient, LedgerError, LedgerTransport, SubmitReceipt};
use compliguard_types::{DeviceProfile, EventRecord, HostScan, LogRecord, Verdict, ids};
use rayon::prelude::*;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("cancelled before processing started")]
    Cancelled,

    #[error("scan payload cannot be encoded: {0}")]
    Payload(#[source] serde_json::Error),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// One device submitted for processing. `ref_id` is derived when absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItem {
    pub ref_id: Option<String>,
    pub profile: DeviceProfile,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Processed {
    pub record: LogRecord,
    pub receipt: SubmitReceipt,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ingested {
    pub record: EventRecord,
    pub receipt: SubmitReceipt,
}

/// Per-item result. Items never affect one another.
#[derive(Debug)]
pub struct ItemOutcome<T> {
    pub ref_id: String,
    /// Verdict reached before the ledger write, if evaluation ran.
    pub verdict: Option<Verdict>,
    pub result: Result<T, ProcessError>,
}

pub struct Orchestrator<'a, T, C> {
    catalog: &'a RuleCatalog,
    ledger: &'a LedgerClient<T>,
    clock: &'a C,
}

impl<'a, T: LedgerTransport, C: Clock> Orchestrator<'a, T, C> {
    pub fn new(catalog: &'a RuleCatalog, ledger: &'a LedgerClient<T>, clock: &'a C) -> Self {
        Self {
            catalog,
            ledger,
            clock,
        }
    }

    /// Evaluate, build and submit one profile.
    pub fn process(
        &self,
        profile: &DeviceProfile,
        ref_id: Option<&str>,
    ) -> Result<Processed, ProcessError> {
        let now = self.clock.now();
        let ref_id = match ref_id {
            Some(id) => id.to_string(),
            None => derive_ref_id(profile, now),
        };
        let verdict = evaluate(self.catalog, profile);
        self.log_verdict(profile, verdict, &ref_id, now).1
    }

    fn log_verdict(
        &self,
        profile: &DeviceProfile,
        verdict: Verdict,
        ref_id: &str,
        now: OffsetDateTime,
    ) -> (Verdict, Result<Processed, ProcessError>) {
        let result = self.build_and_submit(profile, &verdict, ref_id, now);
        match &result {
            Ok(_) => debug!(ref_id, verdict = verdict.label(), "device processed"),
            Err(err) => warn!(ref_id, error = %err, "device not logged"),
        }
        (verdict, result)
    }

    fn build_and_submit(
        &self,
        profile: &DeviceProfile,
        verdict: &Verdict,
        ref_id: &str,
        now: OffsetDateTime,
    ) -> Result<Processed, ProcessError> {
        let record = build(profile, verdict, ref_id, now)?;
        let receipt = self.ledger.submit(&record)?;
        Ok(Processed { record, receipt })
    }

    /// Process `items` independently on the current rayon pool. Output order is input order.
    ///
    /// Reference ids and timestamps are assigned up front. Items that have not started when `cancel` fires
    /// report [`ProcessError::Cancelled`]; records already submitted stay submitted.
    pub fn process_batch(
        &self,
        items: &[WorkItem],
        cancel: &CancelToken,
    ) -> Vec<ItemOutcome<Processed>> {
        let keyed: Vec<(String, &DeviceProfile, OffsetDateTime)> = items
            .iter()
            .map(|item| {
                let now = self.clock.now();
                let ref_id = item
                    .ref_id
                    .clone()
                    .unwrap_or_else(|| derive_ref_id(&item.profile, now));
                (ref_id, &item.profile, now)
            })
            .collect();

        info!(items = keyed.len(), "batch started");
        let outcomes: Vec<ItemOutcome<Processed>> = keyed
            .into_par_iter()
            .map(|(ref_id, profile, now)| {
                if cancel.is_cancelled() {
                    return ItemOutcome {
                        ref_id,
                        verdict: None,
                        result: Err(ProcessError::Cancelled),
                    };
                }
                let verdict = evaluate(self.catalog, profile);
                let (verdict, result) = self.log_verdict(profile, verdict, &ref_id, now);
                ItemOutcome {
                    ref_id,
                    verdict: Some(verdict),
                    result,
                }
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(items = outcomes.len(), failed, "batch finished");
        outcomes
    }

    /// Log one event per scanned host under `"<prefix>/<ip>"`.
    pub fn ingest_scan(
        &self,
        hosts: &[HostScan],
        prefix: &str,
        cancel: &CancelToken,
    ) -> Vec<ItemOutcome<Ingested>> {
        ingest_scan(self.ledger, self.clock, hosts, prefix, cancel)
    }
}

/// Log one event per scanned host under `"<prefix>/<ip>"`, on the current rayon pool.
///
/// Scan events carry no verdict, so no catalog is involved.
pub fn ingest_scan<T: LedgerTransport, C: Clock>(
    ledger: &LedgerClient<T>,
    clock: &C,
    hosts: &[HostScan],
    prefix: &str,
    cancel: &CancelToken,
) -> Vec<ItemOutcome<Ingested>> {
    hosts
        .par_iter()
        .map(|host| {
            let ref_id = format!("{}/{}", prefix, host.ip);
            let result = if cancel.is_cancelled() {
                Err(ProcessError::Cancelled)
            } else {
                log_host(ledger, clock, host, &ref_id)
            };
            if let Err(err) = &result {
                warn!(ref_id = %ref_id, error = %err, "scan event not logged");
            }
            ItemOutcome {
                ref_id,
                verdict: None,
                result,
            }
        })
        .collect()
}

fn log_host<T: LedgerTransport, C: Clock>(
    ledger: &LedgerClient<T>,
    clock: &C,
    host: &HostScan,
    ref_id: &str,
) -> Result<Ingested, ProcessError> {
    let payload = serde_json::to_value(host).map_err(ProcessError::Payload)?;
    let record = build_event(ids::EVENT_HOST_SCAN, payload, ref_id, clock.now())?;
    let receipt = ledger.submit_event(&record)?;
    debug!(ref_id, open_ports = host.open_ports.len(), "scan event logged");
    Ok(Ingested { record, receipt })
}
