use compliguard_types::{AuditReport, BatchReport, LogRecord, OutcomeStatus, Verdict};
use std::fmt::Write as _;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

fn timestamp(t: OffsetDateTime) -> String {
    t.format(&Rfc3339).unwrap_or_else(|_| t.to_string())
}

fn verdict_cell(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Compliant => "compliant".to_string(),
        Verdict::Violation {
            reason, check_id, ..
        } => format!("violation `{}` (`{}`)", reason, check_id),
        Verdict::UnknownDevice { class } => format!("unknown device class `{}`", class),
        Verdict::EvaluationError { cause } => format!("evaluation error: {}", cause),
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

pub fn render_batch_markdown(report: &BatchReport) -> String {
    let mut out = String::new();
    let c = &report.counts;

    out.push_str("# Compliguard batch report\n\n");
    let status = if c.failed > 0 {
        "FAILED"
    } else if c.non_compliant() > 0 {
        "NON-COMPLIANT"
    } else {
        "COMPLIANT"
    };
    let _ = writeln!(out, "- Status: **{}**", status);
    let _ = writeln!(out, "- Profile: `{}`", report.profile);
    let _ = writeln!(
        out,
        "- Run: {} .. {}",
        timestamp(report.started_at),
        timestamp(report.finished_at)
    );
    let _ = writeln!(
        out,
        "- Devices: {} compliant, {} violation, {} unknown, {} evaluation error, {} failed, {} cancelled\n",
        c.compliant, c.violation, c.unknown_device, c.evaluation_error, c.failed, c.cancelled
    );

    if report.outcomes.is_empty() {
        out.push_str("No devices processed.\n");
        return out;
    }

    out.push_str("## Devices\n\n");
    out.push_str("| refId | status | verdict | detail |\n");
    out.push_str("|---|---|---|---|\n");

    for o in &report.outcomes {
        let status = match o.status {
            OutcomeStatus::Logged => "logged",
            OutcomeStatus::Failed => "FAILED",
            OutcomeStatus::Cancelled => "cancelled",
        };
        let verdict = o.verdict.as_ref().map(verdict_cell).unwrap_or_default();
        let detail = match (&o.verdict, &o.error) {
            (_, Some(err)) => err.clone(),
            (Some(Verdict::Violation { detail, .. }), None) => detail.clone(),
            _ => String::new(),
        };
        let _ = writeln!(
            out,
            "| `{}` | {} | {} | {} |",
            escape_cell(&o.ref_id),
            status,
            escape_cell(&verdict),
            escape_cell(&detail)
        );
    }

    out
}

pub fn render_record_markdown(record: &LogRecord) -> String {
    let mut out = String::new();
    let p = &record.profile;

    let _ = writeln!(out, "# Ledger record `{}`\n", record.ref_id);
    let _ = writeln!(out, "- Verdict: **{}**", verdict_cell(&record.verdict));
    if let Verdict::Violation { detail, .. } = &record.verdict {
        let _ = writeln!(out, "  - detail: {}", detail);
    }
    let _ = writeln!(
        out,
        "- Device: `{}` ({}) at `{}`, OS `{}`",
        p.name, p.class, p.address, p.os_version
    );
    let _ = writeln!(out, "- Created: {}", timestamp(record.created_at));
    let _ = writeln!(out, "- Digest: `{}`", record.digest);
    let _ = writeln!(out, "- Seal: `{}`", record.seal);
    out
}

pub fn render_audit_markdown(report: &AuditReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Reconciliation `{}`\n", report.ref_id);
    let _ = writeln!(
        out,
        "- Result: **{}**",
        if report.matches { "MATCH" } else { "MISMATCH" }
    );
    let _ = writeln!(out, "- Local digest: `{}`", report.local_digest);
    let _ = writeln!(out, "- Ledger digest: `{}`", report.ledger_digest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliguard_types::{
        BatchOutcome, Digest, DeviceProfile, OutcomeCounts, ReasonCode, SCHEMA_BATCH_V1, ToolMeta,
        Violation,
    };
    use time::macros::datetime;

    fn report(outcomes: Vec<BatchOutcome>) -> BatchReport {
        let counts = OutcomeCounts::tally(&outcomes);
        BatchReport {
            schema: SCHEMA_BATCH_V1.to_string(),
            tool: ToolMeta {
                name: "compliguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: datetime!(2024-05-01 12:00:00 UTC),
            finished_at: datetime!(2024-05-01 12:00:01 UTC),
            profile: "strict".to_string(),
            outcomes,
            counts,
        }
    }

    #[test]
    fn renders_empty_batch() {
        let md = render_batch_markdown(&report(Vec::new()));
        assert!(md.contains("Status: **COMPLIANT**"));
        assert!(md.contains("No devices processed"));
    }

    #[test]
    fn renders_mixed_batch() {
        let violation: Verdict =
            Violation::new(ReasonCode::OutdatedOs, "laptop.os_currency", "runs Windows | 10").into();
        let md = render_batch_markdown(&report(vec![
            BatchOutcome {
                ref_id: "laptop-1".to_string(),
                status: OutcomeStatus::Logged,
                verdict: Some(violation),
                digest: Some(Digest::from_bytes([1; 32])),
                error: None,
            },
            BatchOutcome {
                ref_id: "router-1".to_string(),
                status: OutcomeStatus::Failed,
                verdict: Some(Verdict::Compliant),
                digest: None,
                error: Some("ledger transport unavailable".to_string()),
            },
            BatchOutcome {
                ref_id: "iot-1".to_string(),
                status: OutcomeStatus::Cancelled,
                verdict: None,
                digest: None,
                error: None,
            },
        ]));

        assert!(md.contains("Status: **FAILED**"));
        assert!(md.contains("## Devices"));
        assert!(md.contains("violation `outdated_os` (`laptop.os_currency`)"));
        assert!(md.contains("runs Windows \\| 10"));
        assert!(md.contains("| `router-1` | FAILED | compliant | ledger transport unavailable |"));
        assert!(md.contains("| `iot-1` | cancelled |  |  |"));
    }

    #[test]
    fn renders_record_and_audit() {
        let record = LogRecord {
            ref_id: "router-1".to_string(),
            digest: Digest::from_bytes([0xab; 32]),
            profile: DeviceProfile::new("Main_Router", "192.168.0.1", "router", "RouterOS 7"),
            verdict: Verdict::Compliant,
            created_at: datetime!(2024-05-01 12:00:00 UTC),
            seal: Digest::from_bytes([0xcd; 32]),
        };
        let md = render_record_markdown(&record);
        assert!(md.contains("# Ledger record `router-1`"));
        assert!(md.contains("`Main_Router` (router) at `192.168.0.1`"));
        assert!(md.contains(&"ab".repeat(32)));

        let audit = AuditReport {
            ref_id: "router-1".to_string(),
            matches: false,
            local_digest: Digest::from_bytes([0; 32]),
            ledger_digest: Digest::from_bytes([0xab; 32]),
        };
        assert!(render_audit_markdown(&audit).contains("**MISMATCH**"));
    }
}
