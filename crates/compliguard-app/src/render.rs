//! Render use cases: Markdown from in-memory reports and records.

use compliguard_types::{AuditReport, BatchReport, LogRecord};

pub fn render_markdown(report: &BatchReport) -> String {
    compliguard_render::render_batch_markdown(report)
}

pub fn render_record(record: &LogRecord) -> String {
    compliguard_render::render_record_markdown(record)
}

pub fn render_audit(report: &AuditReport) -> String {
    compliguard_render::render_audit_markdown(report)
}
