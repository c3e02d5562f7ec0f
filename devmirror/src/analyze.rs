//! devmirror-analyze - CLI tool for offline behavior analysis
//!
//! Profiles an activity log file with the pattern engine, or lists the
//! analyses the hub has saved.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use devmirror_core::analysis::analyze_behavior;
use devmirror_core::{ActivityEvent, BehaviorRequest, Config, Database, HistoryFilter};
use serde::Deserialize;
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "devmirror-analyze")]
#[command(about = "Analyze developer activity logs")]
#[command(version)]
struct Args {
    /// Path to an alternate config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Profile an activity log (a JSON array of events, or `{"logs": [...]}`)
    Profile {
        /// Log file to analyze
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Trailing events inspected for a debug loop (defaults to [pattern].debug_loop_window)
        #[arg(short, long)]
        window: Option<usize>,
    },

    /// List saved analyses, newest first
    History {
        /// Only show analyses for this user
        #[arg(short, long)]
        user: Option<String>,

        /// Maximum number of analyses to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Accepted shapes of a log file
#[derive(Deserialize)]
#[serde(untagged)]
enum LogFile {
    Request(BehaviorRequest),
    Events(Vec<ActivityEvent>),
}

impl LogFile {
    fn into_events(self) -> Vec<ActivityEvent> {
        match self {
            LogFile::Request(request) => request.logs,
            LogFile::Events(events) => events,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config =
        devmirror::load_config(args.config.as_deref()).context("failed to load configuration")?;

    // Initialize logging
    let _log_guard = devmirror_core::logging::init(&config.logging, false)
        .context("failed to initialize logging")?;

    match args.command {
        Command::Profile {
            file,
            format,
            window,
        } => {
            let window = window.unwrap_or(config.pattern.debug_loop_window);
            run_profile(&file, format, window)
        }
        Command::History {
            user,
            limit,
            format,
        } => run_history(user, limit, format),
    }
}

fn run_profile(file: &Path, format: OutputFormat, window: usize) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let events = serde_json::from_str::<LogFile>(&content)
        .with_context(|| format!("{} is not a valid activity log", file.display()))?
        .into_events();

    let analysis = analyze_behavior(&events, window)
        .with_context(|| format!("failed to analyze {}", file.display()))?;
    let report = analysis.report();

    if format == OutputFormat::Json {
        let output = json!({
            "features": analysis.features,
            "profile": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let features = &analysis.features;
    println!("Analyzed {} event(s) from {}\n", features.total_events, file.display());

    println!("Features:");
    println!("  Error repeat rate:   {}", features.error_repeat_rate);
    println!("  Avg edit interval:   {}s", features.avg_edit_interval);
    println!("  Edit burstiness:     {}", features.edit_burstiness);
    println!("  Run/edit ratio:      {}", features.run_edit_ratio);
    println!();

    println!("Profile:");
    println!(
        "  Thinking style:      {} ({})",
        report.thinking_style,
        report.thinking_style.description()
    );
    println!(
        "  Debug loop:          {}",
        if report.debug_loop { "yes" } else { "no" }
    );
    println!("  Weak area:           {}", report.weak_area.as_str());
    println!("  Confidence:          {}", report.confidence);

    Ok(())
}

fn run_history(user: Option<String>, limit: usize, format: OutputFormat) -> Result<()> {
    // Open database
    let db_path = Config::database_path();
    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run database migrations")?;

    let records = db.list_analyses(&HistoryFilter {
        user_id: user,
        limit,
    })?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No analyses saved yet.");
        println!("Send activity logs to the hub's POST /analyze endpoint first.");
        return Ok(());
    }

    println!("{} analysis record(s):\n", records.len());
    for record in &records {
        let style = record
            .cognitive_profile
            .get("thinking_style")
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        println!(
            "#{:<5} {}  {:<16} {}",
            record.id,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.user_id,
            style
        );
        println!("       {}", record.ai_reflection);
    }

    Ok(())
}
