//! Match report: the summary record plus the selected event list and the
//! heatmap grid, written as pretty-printed JSON.

use anyhow::{Context, Result};
use possession_core::analysis::metrics::{player_heatmap, Heatmap};
use possession_core::{
    period_transitions, transitions_of_kind, EngineConfig, MatchSummary, MatchTimeline,
    SummaryQuery, TransitionEvent, TransitionKind,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Creation time (RFC3339)
    pub generated_at: String,
    pub match_number: u32,
    pub event_type: TransitionKind,
    pub summary: MatchSummary,
    /// Transitions of `event_type` by the queried player in the queried period
    pub events: Vec<TransitionEvent>,
    /// Occupancy of the queried player in the queried period
    pub heatmap: Heatmap,
}

impl MatchReport {
    pub fn build(
        timeline: &MatchTimeline,
        query: &SummaryQuery,
        match_number: u32,
        event_type: TransitionKind,
        config: &EngineConfig,
    ) -> Result<Self> {
        let summary = MatchSummary::build(timeline, query, config)?;
        let transitions = period_transitions(timeline, query.player, query.period)?;
        let heatmap = player_heatmap(&timeline.for_period(query.period)?, query.player, &config.pitch)?;

        Ok(Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            match_number,
            event_type,
            summary,
            events: transitions_of_kind(&transitions, event_type),
            heatmap,
        })
    }
}

/// Default output file: `match_summary_<n>.json` inside `dir`.
pub fn report_path(dir: &Path, match_number: u32) -> PathBuf {
    dir.join(format!("match_summary_{}.json", match_number))
}

pub fn write_report(path: &Path, report: &MatchReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    info!(path = %path.display(), "report written");
    Ok(())
}

pub fn read_report(path: &Path) -> Result<MatchReport> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse report: {}", path.display()))
}
