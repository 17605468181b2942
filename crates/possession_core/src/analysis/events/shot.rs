//! # Shot Detector
//!
//! A shot candidate is a sample where the ball sits in the attacking team's
//! target zone: beyond the shot line (`x >= +line` or `x <= -line`) and inside
//! the goal-mouth band `|y| <= goal_half_width`.
//!
//! Home attacks +x in odd periods and -x in even periods; Away the opposite.
//!
//! Candidates collapse into one shot while each candidate time is exactly one
//! tick after the previous candidate. Any other gap starts a new shot.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{EngineConfig, PitchConfig};
use crate::error::Result;
use crate::model::{Point, Team};
use crate::timeline::MatchTimeline;

/// Attacking target rectangle for one team in one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotZone {
    pub line_x: f64,
    pub attacks_positive_x: bool,
    pub goal_half_width: f64,
}

impl ShotZone {
    pub fn for_team(team: Team, period: u32, pitch: &PitchConfig) -> Self {
        let odd_period = period % 2 == 1;
        let attacks_positive_x = match team {
            Team::Home => odd_period,
            Team::Away => !odd_period,
        };
        Self {
            line_x: pitch.shot_line_x,
            attacks_positive_x,
            goal_half_width: pitch.goal_half_width,
        }
    }

    pub fn contains(&self, ball: &Point) -> bool {
        let beyond_line = if self.attacks_positive_x {
            ball.x >= self.line_x
        } else {
            ball.x <= -self.line_x
        };
        beyond_line && ball.y >= -self.goal_half_width && ball.y <= self.goal_half_width
    }
}

/// A debounced shot: the first in-zone sample of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub team: Team,
    pub period: u32,
    pub time: i64,
    pub ball: Point,
}

/// Indices of `candidate_times` that start a new shot.
pub fn debounce_runs(candidate_times: &[i64], tick: i64) -> Vec<usize> {
    candidate_times
        .iter()
        .enumerate()
        .filter(|&(i, &t)| i == 0 || t != candidate_times[i - 1] + tick)
        .map(|(i, _)| i)
        .collect()
}

/// Shots by `team` in `period`.
///
/// # Errors
/// `InvalidPeriod` if the (non-empty) timeline has no sample in `period`.
pub fn detect_shots(
    timeline: &MatchTimeline,
    team: Team,
    period: u32,
    config: &EngineConfig,
) -> Result<Vec<Shot>> {
    let period_timeline = timeline.for_period(period)?;
    let zone = ShotZone::for_team(team, period, &config.pitch);

    let candidates: Vec<_> = period_timeline
        .samples()
        .iter()
        .filter(|s| zone.contains(&s.ball))
        .collect();
    let times: Vec<i64> = candidates.iter().map(|s| s.time).collect();

    let shots: Vec<Shot> = debounce_runs(&times, config.thresholds.tick)
        .into_iter()
        .map(|i| Shot {
            team,
            period,
            time: candidates[i].time,
            ball: candidates[i].ball,
        })
        .collect();

    debug!(
        team = %team,
        period,
        candidates = candidates.len(),
        shots = shots.len(),
        "shot detection"
    );
    Ok(shots)
}

pub fn count_shots(
    timeline: &MatchTimeline,
    team: Team,
    period: u32,
    config: &EngineConfig,
) -> Result<usize> {
    Ok(detect_shots(timeline, team, period, config)?.len())
}
