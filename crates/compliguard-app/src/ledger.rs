//! Ledger read use cases: fetch and reconcile.

use anyhow::Context;
use camino::Utf8Path;
use compliguard_ledger::{FileTransport, LedgerClient, LedgerTransport};
use compliguard_types::{AuditReport, EventRecord, LogRecord};

pub fn open_ledger(dir: &Utf8Path) -> anyhow::Result<LedgerClient<FileTransport>> {
    let transport =
        FileTransport::open(dir).with_context(|| format!("open ledger directory {dir}"))?;
    Ok(LedgerClient::new(transport))
}

pub fn run_fetch<T: LedgerTransport>(
    ledger: &LedgerClient<T>,
    ref_id: &str,
) -> anyhow::Result<LogRecord> {
    ledger
        .fetch(ref_id)
        .with_context(|| format!("fetch record '{ref_id}'"))
}

pub fn run_fetch_event<T: LedgerTransport>(
    ledger: &LedgerClient<T>,
    ref_id: &str,
) -> anyhow::Result<EventRecord> {
    ledger
        .fetch_event(ref_id)
        .with_context(|| format!("fetch event '{ref_id}'"))
}

/// Compare the local record in `local_text` (JSON) with the ledger copy of `ref_id`.
pub fn run_reconcile<T: LedgerTransport>(
    ledger: &LedgerClient<T>,
    ref_id: &str,
    local_text: &str,
) -> anyhow::Result<AuditReport> {
    let local: LogRecord = serde_json::from_str(local_text).context("parse local record")?;
    ledger
        .reconcile(ref_id, &local)
        .with_context(|| format!("reconcile record '{ref_id}'"))
}

/// 0 when the copies match, 2 when they diverge.
pub fn audit_exit_code(report: &AuditReport) -> i32 {
    if report.matches { 0 } else { 2 }
}
