//! Match Report CLI
//!
//! Loads `match_<n>/Home.<ext>` and `match_<n>/Away.<ext>`, prints the
//! player's passes or blocks for one period and writes `match_summary_<n>.json`.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use possession_core::{EngineConfig, EntityId, SummaryQuery, Team, TransitionKind};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "match_report")]
#[command(about = "Possession and event report for one player of a tracked match", long_about = None)]
struct Cli {
    /// Player (shirt) number
    #[arg(long)]
    player: u32,

    /// Match period
    #[arg(long)]
    period: u32,

    /// Match number (data directory `match_<n>`)
    #[arg(long = "match")]
    match_number: u32,

    /// Team of the player (Home or Away)
    #[arg(long)]
    team: Team,

    /// Track file format (csv)
    #[arg(long, default_value = "csv")]
    format: String,

    /// Event list to print
    #[arg(long = "type", value_enum)]
    event_type: EventType,

    /// Directory holding the `match_<n>` folders
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Engine config YAML (defaults to $POSSESSION_CONFIG, then built-in values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report path (defaults to `match_summary_<n>.json` in the current directory)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum EventType {
    Passes,
    Blocks,
}

#[cfg(feature = "cli")]
impl From<EventType> for TransitionKind {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Passes => TransitionKind::Pass,
            EventType::Blocks => TransitionKind::Block,
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("match_report=info,possession_core=warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_yaml_file(path),
        None => EngineConfig::from_env_or_default(),
    }
    .context("Failed to load engine config")?;

    let format = cli.format.parse::<match_report::TrackFormat>()?;
    let timeline = match_report::load_match_timeline(&cli.data_dir, cli.match_number, format)?;

    let query = SummaryQuery {
        player: EntityId::new(cli.team, cli.player),
        period: cli.period,
    };
    let event_type = TransitionKind::from(cli.event_type);
    let report =
        match_report::MatchReport::build(&timeline, &query, cli.match_number, event_type, &config)?;

    print_events(&report);
    print_summary(&report);

    let out = cli
        .out
        .unwrap_or_else(|| match_report::report_path(std::path::Path::new("."), cli.match_number));
    match_report::write_report(&out, &report)?;
    println!("\nSummary saved to {}", out.display());

    Ok(())
}

#[cfg(feature = "cli")]
fn print_events(report: &match_report::MatchReport) {
    let label = match report.event_type {
        TransitionKind::Pass => "Passes",
        TransitionKind::Block => "Blocks",
    };
    println!(
        "{} by {} in period {} ({}):",
        label,
        report.summary.player,
        report.summary.period,
        report.events.len()
    );
    for event in &report.events {
        println!(
            "   t={:<8} ({:.0}, {:.0}) -> ({:.0}, {:.0})  {}",
            event.time,
            event.start_position.x,
            event.start_position.y,
            event.end_position.x,
            event.end_position.y,
            event.receiver
        );
    }
}

#[cfg(feature = "cli")]
fn print_summary(report: &match_report::MatchReport) {
    let summary = &report.summary;
    println!("\nMatch {} summary for {}:", report.match_number, summary.player);
    println!("   Distance:        {:.2} km", summary.distance_km);
    println!("   Touches:         {}", summary.touches);
    println!("   Shots ({}):    {}", summary.team, summary.shots);
    println!("   Passes:          {}", summary.passes);
    println!("   Blocks:          {}", summary.blocks);
    println!(
        "   Pass starts:     {} received, {} not received",
        summary.pass_starts_completed, summary.pass_starts_incomplete
    );
    println!(
        "   Heatmap spread:  {:.2} over {} samples",
        report.heatmap.spread(),
        report.heatmap.tracked()
    );
    for (side, pct) in &summary.possession {
        println!("   Possession {:<10} {:.1}%", side, pct);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("match_report CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
