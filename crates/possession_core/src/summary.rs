//! # Match Summary
//!
//! The aggregate record for one player and one period of a merged timeline.
//!
//! Scope of each figure:
//! - distance, touches, possession: whole match
//! - shots: the player's team, queried period
//! - passes, blocks: the player, queried period
//! - pass starts (completed / incomplete): the player, queried period
//!
//! `passes` and `blocks` count changes of the closest entity away from the
//! player. Pass starts come from the pass correlator (player holding the ball,
//! ball moved next sample) and are not a breakdown of `passes`: a slow
//! ball can change possessor without a start, and a start can end with
//! nobody close enough to take the ball.
//!
//! Building is all-or-nothing: the first failing stage aborts the summary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::analysis::events::{
    correlate_passes, count_shots, count_touch_samples, period_transitions, PassOutcome,
    TransitionKind,
};
use crate::analysis::metrics::player_distance_km;
use crate::analysis::possession::ball_possession;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::{EntityId, Team};
use crate::timeline::MatchTimeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryQuery {
    pub player: EntityId,
    pub period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// `None` for an empty timeline
    pub match_id: Option<u64>,
    pub player: EntityId,
    pub team: Team,
    pub period: u32,
    pub distance_km: f64,
    pub touches: usize,
    pub shots: usize,
    /// Team name → percentage
    pub possession: BTreeMap<String, f64>,
    pub passes: usize,
    pub blocks: usize,
    /// Pass starts paired with a teammate reception
    pub pass_starts_completed: usize,
    /// Pass starts with no reception inside the window
    pub pass_starts_incomplete: usize,
}

impl MatchSummary {
    pub fn build(
        timeline: &MatchTimeline,
        query: &SummaryQuery,
        config: &EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let SummaryQuery { player, period } = *query;
        let team = player.team;

        let distance_km = player_distance_km(timeline, player)?;
        let touches = count_touch_samples(timeline, player, config.thresholds.touch_threshold)?;
        let shots = count_shots(timeline, team, period, config)?;

        let transitions = period_transitions(timeline, player, period)?;
        let passes = transitions
            .iter()
            .filter(|e| e.kind == TransitionKind::Pass)
            .count();
        let blocks = transitions.len() - passes;

        let outcomes = correlate_passes(&timeline.for_period(period)?, player, config)?;
        let pass_starts_completed = outcomes
            .iter()
            .filter(|o| matches!(o, PassOutcome::Completed(_)))
            .count();

        let possession = ball_possession(timeline, config.unassigned_policy).to_map();

        let summary = Self {
            match_id: timeline.samples().first().map(|s| s.match_id),
            player,
            team,
            period,
            distance_km,
            touches,
            shots,
            possession,
            passes,
            blocks,
            pass_starts_completed,
            pass_starts_incomplete: outcomes.len() - pass_starts_completed,
        };
        info!(
            player = %player,
            period,
            touches = summary.touches,
            shots = summary.shots,
            passes = summary.passes,
            blocks = summary.blocks,
            "match summary built"
        );
        Ok(summary)
    }
}
