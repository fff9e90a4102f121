//! The `explain` use case: look up check/code documentation.

use compliguard_types::explain::{self, Explanation};

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown identifier; includes available check_ids and codes.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\nRemediation\n-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\nExamples\n--------\n\n");
    for (label, profile) in [
        ("Flagged profile:", exp.examples.before),
        ("Passing profile:", exp.examples.after),
    ] {
        out.push_str(label);
        out.push_str("\n```json\n");
        out.push_str(profile);
        out.push_str("\n```\n\n");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    out
}

pub fn format_not_found(
    identifier: &str,
    check_ids: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = format!("Unknown check_id or code: {}\n\nAvailable check_ids:\n", identifier);
    for id in check_ids {
        out.push_str(&format!("  - {}\n", id));
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        out.push_str(&format!("  - {}\n", code));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explains_check_and_code() {
        let ExplainOutput::Found(exp) = run_explain("router.trusted_network") else {
            panic!("check id should be known");
        };
        let text = format_explanation(&exp);
        assert!(text.starts_with(exp.title));
        assert!(text.contains("Remediation"));
        assert!(text.contains("```json"));
        assert!(text.ends_with("```\n"));

        assert!(matches!(
            run_explain("malformed_address"),
            ExplainOutput::Found(_)
        ));
    }

    #[test]
    fn unknown_identifier_lists_alternatives() {
        let ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } = run_explain("deps.no_wildcards")
        else {
            panic!("should not be found");
        };
        let text = format_not_found(&identifier, available_check_ids, available_codes);
        assert!(text.contains("Unknown check_id or code: deps.no_wildcards"));
        assert!(text.contains("  - laptop.os_currency"));
        assert!(text.contains("  - open_port"));
    }
}
