//! The `process` use case: evaluate a batch, log every verdict, produce a batch report.

use crate::cancel::CancelToken;
use crate::clock::{Clock, SystemClock};
use crate::config::{build_catalog, load_config, run_in_pool};
use crate::input::parse_submissions;
use crate::ledger::open_ledger;
use crate::orchestrator::{ItemOutcome, Orchestrator, ProcessError, Processed};
use compliguard_ledger::{LedgerClient, LedgerTransport};
use compliguard_settings::{Overrides, ResolvedConfig};
use compliguard_types::{
    BatchOutcome, BatchReport, OutcomeCounts, OutcomeStatus, SCHEMA_BATCH_V1, ToolMeta,
};
use time::OffsetDateTime;

#[derive(Clone, Debug)]
pub struct ProcessInput<'a> {
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub submissions_text: &'a str,
    pub cancel: CancelToken,
}

#[derive(Clone, Debug)]
pub struct ProcessOutput {
    pub report: BatchReport,
    pub resolved_config: ResolvedConfig,
}

/// Run against the file ledger named by the resolved config.
pub fn run_process(input: ProcessInput<'_>) -> anyhow::Result<ProcessOutput> {
    let resolved = load_config(input.config_text, input.overrides.clone())?;
    let ledger = open_ledger(&resolved.ledger_dir)?;
    process_resolved(&input, resolved, &ledger, &SystemClock::new())
}

/// Run against a caller-supplied ledger and clock.
pub fn run_process_with<T: LedgerTransport, C: Clock>(
    input: ProcessInput<'_>,
    ledger: &LedgerClient<T>,
    clock: &C,
) -> anyhow::Result<ProcessOutput> {
    let resolved = load_config(input.config_text, input.overrides.clone())?;
    process_resolved(&input, resolved, ledger, clock)
}

fn process_resolved<T: LedgerTransport, C: Clock>(
    input: &ProcessInput<'_>,
    resolved: ResolvedConfig,
    ledger: &LedgerClient<T>,
    clock: &C,
) -> anyhow::Result<ProcessOutput> {
    let started_at = OffsetDateTime::now_utc();
    let catalog = build_catalog(&resolved)?;
    let items = parse_submissions(input.submissions_text)?;

    let orch = Orchestrator::new(&catalog, ledger, clock);
    let results = run_in_pool(resolved.workers, || {
        orch.process_batch(&items, &input.cancel)
    })?;

    let outcomes: Vec<BatchOutcome> = results.into_iter().map(to_batch_outcome).collect();
    let counts = OutcomeCounts::tally(&outcomes);

    let report = BatchReport {
        schema: SCHEMA_BATCH_V1.to_string(),
        tool: ToolMeta {
            name: "compliguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        profile: resolved.effective.profile.clone(),
        outcomes,
        counts,
    };

    Ok(ProcessOutput {
        report,
        resolved_config: resolved,
    })
}

pub(crate) fn to_batch_outcome(item: ItemOutcome<Processed>) -> BatchOutcome {
    match item.result {
        Ok(processed) => BatchOutcome {
            ref_id: item.ref_id,
            status: OutcomeStatus::Logged,
            verdict: item.verdict,
            digest: Some(processed.record.digest),
            error: None,
        },
        Err(ProcessError::Cancelled) => BatchOutcome {
            ref_id: item.ref_id,
            status: OutcomeStatus::Cancelled,
            verdict: None,
            digest: None,
            error: None,
        },
        Err(err) => BatchOutcome {
            ref_id: item.ref_id,
            status: OutcomeStatus::Failed,
            verdict: item.verdict,
            digest: None,
            error: Some(err.to_string()),
        },
    }
}

/// 0 = everything logged and compliant, 2 = some verdict is non-compliant,
/// 1 = some item was not logged (failed or cancelled).
pub fn batch_exit_code(report: &BatchReport) -> i32 {
    let c = &report.counts;
    if c.failed > 0 || c.cancelled > 0 {
        1
    } else if c.non_compliant() > 0 {
        2
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use compliguard_ledger::InMemoryTransport;
    use std::sync::Arc;
    use time::macros::datetime;

    fn input<'a>(devices: &'a str) -> ProcessInput<'a> {
        ProcessInput {
            config_text: "[batch]\nworkers = 2\n",
            overrides: Overrides::default(),
            submissions_text: devices,
            cancel: CancelToken::new(),
        }
    }

    #[test]
    fn compliant_batch_exits_zero() {
        let ledger = LedgerClient::new(InMemoryTransport::new());
        let clock = FixedClock(datetime!(2024-05-01 12:00:00 UTC));
        let out = run_process_with(
            input(r#"[{"refId": "r1", "name": "Main_Router", "address": "192.168.0.1", "class": "router", "osVersion": "x"}]"#),
            &ledger,
            &clock,
        )
        .expect("process");

        assert_eq!(out.report.schema, SCHEMA_BATCH_V1);
        assert_eq!(out.report.counts.compliant, 1);
        assert_eq!(out.report.outcomes[0].status, OutcomeStatus::Logged);
        assert_eq!(
            out.report.outcomes[0].digest,
            Some(ledger.fetch("r1").expect("fetch").digest)
        );
        assert_eq!(batch_exit_code(&out.report), 0);
    }

    #[test]
    fn violation_exits_two_and_failure_exits_one() {
        let transport = Arc::new(InMemoryTransport::new());
        let ledger = LedgerClient::new(Arc::clone(&transport));
        let clock = FixedClock(datetime!(2024-05-01 12:00:00 UTC));
        let devices = r#"[{"refId": "p1", "name": "Office_Printer", "address": "192.168.1.9", "class": "printer"}]"#;

        let out = run_process_with(input(devices), &ledger, &clock).expect("process");
        assert_eq!(out.report.counts.violation, 1);
        assert_eq!(batch_exit_code(&out.report), 2);

        transport.set_unavailable(true);
        let out = run_process_with(input(devices), &ledger, &clock).expect("process");
        assert_eq!(out.report.counts.failed, 1);
        assert!(out.report.outcomes[0].error.is_some());
        assert_eq!(batch_exit_code(&out.report), 1);
    }

    #[test]
    fn resubmitting_identical_batch_is_idempotent() {
        let ledger = LedgerClient::new(InMemoryTransport::new());
        let clock = FixedClock(datetime!(2024-05-01 12:00:00 UTC));
        let devices = r#"[{"refId": "r1", "name": "Main_Router", "address": "192.168.0.1", "class": "router", "osVersion": "x"}]"#;

        run_process_with(input(devices), &ledger, &clock).expect("first");
        let out = run_process_with(input(devices), &ledger, &clock).expect("second");
        assert_eq!(out.report.outcomes[0].status, OutcomeStatus::Logged);
        assert_eq!(batch_exit_code(&out.report), 0);
    }

    #[test]
    fn cancelled_batch_exits_one() {
        let ledger = LedgerClient::new(InMemoryTransport::new());
        let clock = FixedClock(datetime!(2024-05-01 12:00:00 UTC));
        let mut inp = input(r#"[{"name": "Cam", "address": "192.168.1.2", "class": "iot"}]"#);
        inp.cancel.cancel();
        let out = run_process_with(inp, &ledger, &clock).expect("process");
        assert_eq!(out.report.counts.cancelled, 1);
        assert_eq!(batch_exit_code(&out.report), 1);
    }
}
