//! SHIPGUARD — Reference Runtime Demo CLI
//!
//! Drives the full audit pipeline against the mock tracking fleet.
//!
//! Usage:
//!   cargo run -p demo -- audit FX9876543210 --reference-date 2024-01-25T00:00:00Z
//!   cargo run -p demo -- handle-incident TNT123456789
//!   cargo run -p demo -- decisions --limit 5
//!   cargo run -p demo -- sla-info

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use shipguard_contracts::error::ShipguardError;
use shipguard_ref_tracking::Runtime;

/// Decision listings are clamped to this many entries.
const MAX_DECISION_LIMIT: usize = 50;

// ── CLI definition ────────────────────────────────────────────────────────────

/// SHIPGUARD — policy-gated shipment audit demo.
///
/// Audits shipments from a mock fleet, gates remedial actions through the
/// deterministic policy engine, and records every decision in a bounded,
/// hash-chained log.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "SHIPGUARD reference runtime demo",
    long_about = "Runs the SHIPGUARD audit pipeline against mock tracking data:\n\
                  anomaly detection, SLA evaluation, policy-gated safe actions,\n\
                  and the bounded decision log."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Audit a shipment: verdict, SLA status, risk, anomalies, suggestions.
    Audit {
        /// Tracking number (e.g. FX9876543210).
        tracking: String,
        /// Reference instant for reproducible runs (RFC 3339). Defaults to now.
        #[arg(long)]
        reference_date: Option<String>,
    },
    /// Audit, gate each suggested action through policy, execute what is
    /// allowed, and record the decision.
    HandleIncident {
        /// Tracking number (e.g. TNT123456789).
        tracking: String,
        /// Reference instant for reproducible runs (RFC 3339). Defaults to now.
        #[arg(long)]
        reference_date: Option<String>,
    },
    /// Show the most recent decision records, newest first.
    Decisions {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show the loaded SLA configuration and its thresholds.
    SlaInfo,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Structured logging; set RUST_LOG=debug to watch policy evaluation.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let runtime = Runtime::with_defaults();

    let result = match cli.command {
        Command::Audit {
            tracking,
            reference_date,
        } => run_audit(&runtime, &tracking, reference_date.as_deref()),
        Command::HandleIncident {
            tracking,
            reference_date,
        } => run_handle_incident(&runtime, &tracking, reference_date.as_deref()),
        Command::Decisions { limit } => run_decisions(&runtime, limit),
        Command::SlaInfo => run_sla_info(&runtime),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn run_audit(
    runtime: &Runtime,
    tracking: &str,
    reference_date: Option<&str>,
) -> Result<(), ShipguardError> {
    let reference = parse_reference(reference_date)?;
    let audit = runtime.audit(tracking, reference)?;
    print_json(&audit);
    Ok(())
}

fn run_handle_incident(
    runtime: &Runtime,
    tracking: &str,
    reference_date: Option<&str>,
) -> Result<(), ShipguardError> {
    let reference = parse_reference(reference_date)?;
    let report = runtime.handle_incident(tracking, reference)?;

    print_json(&json!({
        "audit_result": report.audit_result,
        "outcomes": report.outcomes,
        "decision_log_id": report.decision_log_id,
    }));
    Ok(())
}

fn run_decisions(runtime: &Runtime, limit: usize) -> Result<(), ShipguardError> {
    let limit = limit.clamp(1, MAX_DECISION_LIMIT);
    let decisions = runtime.last_decisions(limit);

    print_json(&json!({
        "count": decisions.len(),
        "log_integrity_verified": runtime.verify_log_integrity(),
        "decisions": decisions,
    }));
    Ok(())
}

fn run_sla_info(runtime: &Runtime) -> Result<(), ShipguardError> {
    let config = runtime.sla_config();
    print_json(&json!({
        "config": config,
        "thresholds": config.delay_thresholds(),
    }));
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_reference(spec: Option<&str>) -> Result<Option<DateTime<Utc>>, ShipguardError> {
    match spec {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| ShipguardError::ConfigError {
                reason: format!("invalid --reference-date '{raw}': {e}"),
            }),
    }
}

fn print_json(value: &impl serde::Serialize) {
    // The contract types always serialize; a failure here is a programming
    // error worth crashing on in a demo binary.
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("demo output must serialize")
    );
}
