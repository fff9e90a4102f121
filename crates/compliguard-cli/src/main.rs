//! CLI entry point for compliguard.
//!
//! Argument parsing, file IO, logging setup and exit codes. Everything else lives in
//! `compliguard-app`.

mod interrupt;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use compliguard_app::{
    EvaluateInput, ExplainOutput, IngestInput, ProcessInput, SystemClock,
    audit_exit_code, batch_exit_code, evaluate_exit_code, format_explanation, format_not_found,
    ingest_exit_code, load_config, open_ledger, render_audit, render_markdown, render_record,
    run_evaluate, run_explain, run_fetch, run_fetch_event, run_ingest_scan, run_process,
    run_reconcile, serialize_report,
};
use compliguard_settings::{Overrides, ResolvedConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "compliguard",
    version,
    about = "Device compliance evaluation with a tamper-evident ledger"
)]
struct Cli {
    /// Path to compliguard config TOML. A missing file means defaults.
    #[arg(long, global = true, default_value = "compliguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|lenient).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the ledger directory.
    #[arg(long, global = true)]
    ledger_dir: Option<Utf8PathBuf>,

    /// Override the number of batch worker threads.
    #[arg(long, global = true)]
    workers: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate device profiles and print verdicts. Nothing is logged.
    Evaluate {
        /// JSON file holding one profile or an array of profiles.
        #[arg(long)]
        input: Utf8PathBuf,
    },

    /// Evaluate a batch, log every verdict to the ledger and write a batch report.
    Process {
        /// JSON file holding one profile or an array of profiles.
        #[arg(long)]
        input: Utf8PathBuf,

        /// Where to write the JSON batch report.
        #[arg(long, default_value = "artifacts/compliguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown summary alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown summary (if enabled).
        #[arg(long, default_value = "artifacts/compliguard/summary.md")]
        markdown_out: Utf8PathBuf,
    },

    /// Print a verified record from the ledger.
    Fetch {
        ref_id: String,

        /// Fetch a scan event instead of a compliance record.
        #[arg(long)]
        event: bool,

        /// Print Markdown instead of JSON (compliance records only).
        #[arg(long, conflicts_with = "event")]
        markdown: bool,
    },

    /// Compare a locally held record with the ledger copy.
    Reconcile {
        ref_id: String,

        /// Path to the local record JSON.
        #[arg(long)]
        local: Utf8PathBuf,

        /// Print Markdown instead of JSON.
        #[arg(long)]
        markdown: bool,
    },

    /// Parse network scanner output and log one event per host.
    IngestScan {
        /// Path to the scanner's text output.
        scan: Utf8PathBuf,

        /// Reference ids are `<prefix>/<ip>`.
        #[arg(long)]
        prefix: String,
    },

    /// Explain a check_id or reason code with remediation guidance.
    Explain {
        /// The check_id (e.g., "router.trusted_network") or code (e.g., "open_port").
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.cmd {
        Commands::Evaluate { input } => cmd_evaluate(&cli, input),
        Commands::Process {
            input,
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_process(
            &cli,
            input,
            report_out,
            (*write_markdown).then_some(markdown_out.as_path()),
        ),
        Commands::Fetch {
            ref_id,
            event,
            markdown,
        } => cmd_fetch(&cli, ref_id, *event, *markdown),
        Commands::Reconcile {
            ref_id,
            local,
            markdown,
        } => cmd_reconcile(&cli, ref_id, local, *markdown),
        Commands::IngestScan { scan, prefix } => cmd_ingest_scan(&cli, scan, prefix),
        Commands::Explain { identifier } => cmd_explain(identifier),
    };

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("compliguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        ledger_dir: cli.ledger_dir.clone(),
        workers: cli.workers,
    }
}

fn read_config_text(path: &Utf8Path) -> anyhow::Result<String> {
    if !path.exists() {
        tracing::debug!(%path, "config file not found; using defaults");
        return Ok(String::new());
    }
    std::fs::read_to_string(path).with_context(|| format!("read config: {path}"))
}

fn resolve(cli: &Cli) -> anyhow::Result<ResolvedConfig> {
    let text = read_config_text(&cli.config)?;
    load_config(&text, overrides(cli))
}

fn read_input(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read input: {path}"))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{text}");
    Ok(())
}

fn cmd_evaluate(cli: &Cli, input: &Utf8Path) -> anyhow::Result<i32> {
    let config_text = read_config_text(&cli.config)?;
    let submissions_text = read_input(input)?;

    let output = run_evaluate(EvaluateInput {
        config_text: &config_text,
        overrides: overrides(cli),
        submissions_text: &submissions_text,
    })?;

    print_json(&output.devices)?;
    Ok(evaluate_exit_code(&output.devices))
}

fn cmd_process(
    cli: &Cli,
    input: &Utf8Path,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
) -> anyhow::Result<i32> {
    let config_text = read_config_text(&cli.config)?;
    let submissions_text = read_input(input)?;

    let output = run_process(ProcessInput {
        config_text: &config_text,
        overrides: overrides(cli),
        submissions_text: &submissions_text,
        cancel: interrupt::interrupt_token(),
    })?;

    let data = serialize_report(&output.report).context("serialize report")?;
    write_file(report_out, &data).context("write report json")?;

    if let Some(path) = markdown_out {
        let md = render_markdown(&output.report);
        write_file(path, md.as_bytes()).context("write markdown")?;
    }

    let c = &output.report.counts;
    eprintln!(
        "compliguard: {} compliant, {} non-compliant, {} failed, {} cancelled (ledger {})",
        c.compliant,
        c.non_compliant(),
        c.failed,
        c.cancelled,
        output.resolved_config.ledger_dir
    );

    Ok(batch_exit_code(&output.report))
}

fn cmd_fetch(cli: &Cli, ref_id: &str, event: bool, markdown: bool) -> anyhow::Result<i32> {
    let resolved = resolve(cli)?;
    let ledger = open_ledger(&resolved.ledger_dir)?;

    if event {
        print_json(&run_fetch_event(&ledger, ref_id)?)?;
    } else {
        let record = run_fetch(&ledger, ref_id)?;
        if markdown {
            print!("{}", render_record(&record));
        } else {
            print_json(&record)?;
        }
    }
    Ok(0)
}

fn cmd_reconcile(
    cli: &Cli,
    ref_id: &str,
    local: &Utf8Path,
    markdown: bool,
) -> anyhow::Result<i32> {
    let resolved = resolve(cli)?;
    let ledger = open_ledger(&resolved.ledger_dir)?;
    let local_text =
        std::fs::read_to_string(local).with_context(|| format!("read local record: {local}"))?;

    let report = run_reconcile(&ledger, ref_id, &local_text)?;
    if markdown {
        print!("{}", render_audit(&report));
    } else {
        print_json(&report)?;
    }
    Ok(audit_exit_code(&report))
}

fn cmd_ingest_scan(cli: &Cli, scan: &Utf8Path, prefix: &str) -> anyhow::Result<i32> {
    let resolved = resolve(cli)?;
    let ledger = open_ledger(&resolved.ledger_dir)?;
    // Scanner output may carry non-UTF-8 banners; those bytes become U+FFFD.
    let scan_bytes = std::fs::read(scan).with_context(|| format!("read scan report: {scan}"))?;
    let scan_text = String::from_utf8_lossy(&scan_bytes);

    let outcomes = run_ingest_scan(
        IngestInput {
            scan_text: &scan_text,
            prefix,
            workers: resolved.workers,
            cancel: interrupt::interrupt_token(),
        },
        &ledger,
        &SystemClock::new(),
    )?;

    print_json(&outcomes)?;
    Ok(ingest_exit_code(&outcomes))
}

fn cmd_explain(identifier: &str) -> anyhow::Result<i32> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(0)
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            Ok(1)
        }
    }
}

fn write_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data).with_context(|| format!("write file: {path}"))?;
    Ok(())
}
