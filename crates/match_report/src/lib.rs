//! Match Report Library
//!
//! Team track files → merged timeline → JSON match report.
//!
//! Track files live at `<data_dir>/match_<n>/<Team>.<ext>`; only `csv` is read.

pub mod report;
pub mod track_csv;

use anyhow::{Context, Result};
use possession_core::{merge_tracks, AnalysisError, MatchTimeline, Team, Track};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

pub use report::{read_report, report_path, write_report, MatchReport};
pub use track_csv::{load_track_csv, read_track};

/// Track file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    Csv,
}

impl TrackFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TrackFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for TrackFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TrackFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(TrackFormat::Csv),
            "xlsx" => Err(AnalysisError::unsupported(
                "xlsx workbooks are not read; export the sheet to csv",
            )),
            other => Err(AnalysisError::unsupported(format!(
                "unknown track format '{}'",
                other
            ))),
        }
    }
}

/// `<data_dir>/match_<n>/<Team>.<ext>`
pub fn track_path(data_dir: &Path, match_number: u32, team: Team, format: TrackFormat) -> PathBuf {
    data_dir
        .join(format!("match_{}", match_number))
        .join(format!("{}.{}", team.name(), format.extension()))
}

pub fn load_team_track(
    data_dir: &Path,
    match_number: u32,
    team: Team,
    format: TrackFormat,
) -> Result<Track> {
    let path = track_path(data_dir, match_number, team, format);
    match format {
        TrackFormat::Csv => load_track_csv(&path, team),
    }
}

/// Load both team tracks of a match and merge them.
pub fn load_match_timeline(
    data_dir: &Path,
    match_number: u32,
    format: TrackFormat,
) -> Result<MatchTimeline> {
    let home = load_team_track(data_dir, match_number, Team::Home, format)?;
    let away = load_team_track(data_dir, match_number, Team::Away, format)?;
    let timeline = merge_tracks(&home, &away)
        .with_context(|| format!("Failed to merge tracks of match {}", match_number))?;

    info!(
        match_number,
        samples = timeline.len(),
        periods = ?timeline.periods(),
        players = timeline.roster().len(),
        "match timeline ready"
    );
    Ok(timeline)
}
