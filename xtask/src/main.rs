//! Developer tasks (schema generation, fixture checks, explain coverage).
//!
//! Kept out of the end-user CLI.

use anyhow::{Context, bail};
use compliguard_types::explain;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "compliguard.device-profile.v1.json",
            generate: || schema_for!(compliguard_types::DeviceProfile),
        },
        SchemaSpec {
            filename: "compliguard.log-record.v1.json",
            generate: || schema_for!(compliguard_types::LogRecord),
        },
        SchemaSpec {
            filename: "compliguard.event-record.v1.json",
            generate: || schema_for!(compliguard_types::EventRecord),
        },
        SchemaSpec {
            filename: "compliguard.batch.v1.json",
            generate: || schema_for!(compliguard_types::BatchReport),
        },
        SchemaSpec {
            filename: "compliguard.audit.v1.json",
            generate: || schema_for!(compliguard_types::AuditReport),
        },
        SchemaSpec {
            filename: "compliguard.config.v1.json",
            generate: || schema_for!(compliguard_settings::CompliguardConfigV1),
        },
    ]
}

/// Pretty-printed JSON with a trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Fail when schemas/ differs from what the current types generate.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for entry in &stale {
        eprintln!("  - {entry}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

/// Every device fixture must parse, and every config fixture must resolve unless its name
/// starts with `invalid_`, in which case it must be rejected.
fn validate_fixtures() -> anyhow::Result<()> {
    let mut errors = Vec::new();

    for path in json_files(&fixtures_dir().join("devices"))? {
        let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        if let Err(err) = compliguard_app::parse_submissions(&text) {
            errors.push(format!("{}: {err:#}", path.display()));
        }
    }

    let config_dir = fixtures_dir().join("config");
    for path in files_with_extension(&config_dir, "toml")? {
        let text = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let expect_invalid = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("invalid_"));
        let resolved = compliguard_app::load_config(&text, Default::default());
        match (resolved, expect_invalid) {
            (Ok(_), true) => errors.push(format!("{}: expected rejection", path.display())),
            (Err(err), false) => errors.push(format!("{}: {err:#}", path.display())),
            _ => {}
        }
    }

    if errors.is_empty() {
        println!("All fixtures are valid.");
        return Ok(());
    }
    for err in &errors {
        eprintln!("  - {err}");
    }
    bail!("fixture validation failed with {} errors", errors.len())
}

fn json_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    files_with_extension(dir, "json")
}

fn files_with_extension(dir: &Path, ext: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == ext) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn explain_coverage() -> anyhow::Result<()> {
    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();
    let mut errors = Vec::new();

    for (kind, id) in check_ids
        .iter()
        .map(|id| ("check id", id))
        .chain(codes.iter().map(|c| ("code", c)))
    {
        let Some(exp) = explain::lookup_explanation(id) else {
            errors.push(format!("{kind} '{id}' has no explanation"));
            continue;
        };
        for (field, value) in [
            ("title", exp.title),
            ("description", exp.description),
            ("remediation", exp.remediation),
            ("flagged example", exp.examples.before),
        ] {
            if value.is_empty() {
                errors.push(format!("{kind} '{id}' has empty {field}"));
            }
        }
    }

    if errors.is_empty() {
        println!("{} check ids have explanations", check_ids.len());
        println!("{} codes have explanations", codes.len());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("explain coverage failed with {} errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help               Show this message");
    eprintln!("  emit-schemas       Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas   Check that schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids   Print known schema ids");
    eprintln!("  validate-fixtures  Parse device fixtures and resolve config fixtures");
    eprintln!("  explain-coverage   Check that every check id and code has an explanation");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(String::as_str).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "validate-fixtures" => validate_fixtures(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
