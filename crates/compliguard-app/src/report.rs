use anyhow::Context;
use compliguard_types::{BatchReport, SCHEMA_BATCH_V1};

pub fn serialize_report(report: &BatchReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize batch report")
}

pub fn parse_report_json(text: &str) -> anyhow::Result<BatchReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;
    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_BATCH_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_BATCH_V1})");
    }
    serde_json::from_value(value).context("parse batch report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use compliguard_types::{OutcomeCounts, ToolMeta};
    use time::macros::datetime;

    #[test]
    fn serialized_report_parses_back() {
        let report = BatchReport {
            schema: SCHEMA_BATCH_V1.to_string(),
            tool: ToolMeta {
                name: "compliguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: datetime!(2024-05-01 12:00:00 UTC),
            finished_at: datetime!(2024-05-01 12:00:02 UTC),
            profile: "strict".to_string(),
            outcomes: Vec::new(),
            counts: OutcomeCounts::default(),
        };
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert_eq!(parse_report_json(&text).expect("parse"), report);
    }

    #[test]
    fn rejects_foreign_schema() {
        let err = parse_report_json(r#"{"schema": "other.report.v1"}"#).expect_err("schema");
        assert!(err.to_string().contains("unknown report schema"));
    }
}
