//! Use case orchestration for compliguard.
//!
//! The application layer: use cases that coordinate the domain, settings, ledger, scan and render
//! crates. The CLI depends on this and only handles argument parsing and process-level IO.

#![forbid(unsafe_code)]

mod cancel;
mod clock;
mod config;
mod evaluate;
mod explain;
mod ingest;
mod input;
mod ledger;
mod orchestrator;
mod process;
mod render;
mod report;

pub use cancel::CancelToken;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{build_catalog, load_config};
pub use evaluate::{EvaluateInput, EvaluateOutput, EvaluatedDevice, evaluate_exit_code, run_evaluate};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use ingest::{IngestInput, ingest_exit_code, run_ingest_scan};
pub use input::{Submission, parse_submissions};
pub use ledger::{audit_exit_code, open_ledger, run_fetch, run_fetch_event, run_reconcile};
pub use orchestrator::{
    Ingested, ItemOutcome, Orchestrator, ProcessError, Processed, WorkItem, ingest_scan,
};
pub use process::{ProcessInput, ProcessOutput, batch_exit_code, run_process, run_process_with};
pub use render::{render_audit, render_markdown, render_record};
pub use report::{parse_report_json, serialize_report};
