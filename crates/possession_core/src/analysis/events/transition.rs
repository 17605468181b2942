//! # Possession Transitions
//!
//! Whenever the closest entity changes from the target player to someone else
//! between two consecutive samples of the same period:
//! - new possessor on the same team: `Pass`
//! - new possessor on the other team: `Block`
//!
//! A change to "nobody" is not a transition.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::proximity::{closest_entities, Closest, EntityFilter};
use crate::error::{AnalysisError, Result};
use crate::model::{EntityId, Point};
use crate::timeline::MatchTimeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Possession kept by the target's team
    Pass,
    /// Possession lost to the opponent (block / interception)
    Block,
}

/// A possession change away from the target player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub kind: TransitionKind,
    /// Time of the first sample with the new possessor
    pub time: i64,
    pub period: u32,
    pub from: EntityId,
    pub receiver: EntityId,
    /// Target's position at the last sample it was closest
    pub start_position: Point,
    /// Ball position at `time`
    pub end_position: Point,
}

/// Possession changes away from `target`.
///
/// `assignment` must be the closest-entity series of the same timeline.
pub fn detect_transitions(
    timeline: &MatchTimeline,
    assignment: &[Option<Closest>],
    target: EntityId,
) -> Result<Vec<TransitionEvent>> {
    let slot = timeline.slot_of(target)?;
    if assignment.len() != timeline.len() {
        return Err(AnalysisError::alignment(format!(
            "assignment covers {} samples, timeline has {}",
            assignment.len(),
            timeline.len()
        )));
    }

    let samples = timeline.samples();
    let mut events = Vec::new();

    for i in 1..samples.len() {
        if !timeline.continues_segment(i) {
            continue;
        }
        let (Some(prev), Some(curr)) = (assignment[i - 1], assignment[i]) else {
            continue;
        };
        if prev.entity != target || curr.entity == target {
            continue;
        }
        let Some(start_position) = samples[i - 1].positions[slot] else {
            continue;
        };

        let kind = if curr.entity.team == target.team {
            TransitionKind::Pass
        } else {
            TransitionKind::Block
        };
        events.push(TransitionEvent {
            kind,
            time: samples[i].time,
            period: samples[i].period,
            from: target,
            receiver: curr.entity,
            start_position,
            end_position: samples[i].ball,
        });
    }

    debug!(
        target = %target,
        passes = events.iter().filter(|e| e.kind == TransitionKind::Pass).count(),
        blocks = events.iter().filter(|e| e.kind == TransitionKind::Block).count(),
        "possession transitions"
    );
    Ok(events)
}

/// Transitions of `target` within one period, over the all-player assignment.
///
/// # Errors
/// `InvalidPeriod` if the (non-empty) timeline has no sample in `period`;
/// `UnknownEntity` if `target` is not on the roster.
pub fn period_transitions(
    timeline: &MatchTimeline,
    target: EntityId,
    period: u32,
) -> Result<Vec<TransitionEvent>> {
    timeline.slot_of(target)?;
    let period_timeline = timeline.for_period(period)?;
    let assignment = closest_entities(&period_timeline, EntityFilter::All);
    detect_transitions(&period_timeline, &assignment, target)
}

/// Only the transitions of one kind.
pub fn transitions_of_kind(events: &[TransitionEvent], kind: TransitionKind) -> Vec<TransitionEvent> {
    events.iter().filter(|e| e.kind == kind).cloned().collect()
}
