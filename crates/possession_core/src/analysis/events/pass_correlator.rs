//! # Pass Correlator
//!
//! Pairs each pass start by a player with the first teammate reception inside
//! the reception window.
//!
//! ## Algorithm
//! 1. Ball motion per sample: `moved` when the displacement from the previous
//!    sample exceeds `ball_moved_threshold`, `still` otherwise. Both are false
//!    on the first sample of a period.
//! 2. Initiation at sample `i`: passer within `possession_threshold`
//!    (axis-wise) of the ball and the ball moved at `i + 1`.
//! 3. Reception at the first sample `j` with
//!    `time_i < time_j <= time_i + reception_window` in the same period where a
//!    teammate (not the passer) is within `possession_threshold` and the ball
//!    moved at `j - 1`.
//! 4. No reception: the pass is reported as `Incomplete`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::{EntityId, Point};
use crate::timeline::MatchTimeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BallMotion {
    pub moved: bool,
    pub still: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedPass {
    pub passer: EntityId,
    pub receiver: EntityId,
    pub start_time: i64,
    pub start_ball: Point,
    pub end_time: i64,
    pub end_ball: Point,
}

impl CompletedPass {
    /// Straight-line ball travel between start and reception.
    pub fn length(&self) -> f64 {
        self.start_ball.distance_to(&self.end_ball)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncompletePass {
    pub passer: EntityId,
    pub start_time: i64,
    pub start_ball: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PassOutcome {
    Completed(CompletedPass),
    Incomplete(IncompletePass),
}

impl PassOutcome {
    pub fn start_time(&self) -> i64 {
        match self {
            PassOutcome::Completed(p) => p.start_time,
            PassOutcome::Incomplete(p) => p.start_time,
        }
    }

    pub fn completed(&self) -> Option<&CompletedPass> {
        match self {
            PassOutcome::Completed(p) => Some(p),
            PassOutcome::Incomplete(_) => None,
        }
    }
}

/// Moved / still flags for every sample.
pub fn ball_motion(timeline: &MatchTimeline, moved_threshold: f64) -> Vec<BallMotion> {
    timeline
        .ball_displacements()
        .into_iter()
        .map(|step| match step {
            Some(d) => BallMotion {
                moved: d > moved_threshold,
                still: d <= moved_threshold,
            },
            None => BallMotion::default(),
        })
        .collect()
}

/// Sample indices where `passer` starts a pass.
pub fn pass_initiations(
    timeline: &MatchTimeline,
    passer: EntityId,
    motion: &[BallMotion],
    possession_threshold: f64,
) -> Result<Vec<usize>> {
    let slot = timeline.slot_of(passer)?;
    let samples = timeline.samples();
    Ok((0..samples.len().saturating_sub(1))
        .filter(|&i| {
            let s = &samples[i];
            let holds = s.positions[slot].is_some_and(|p| p.within_box(&s.ball, possession_threshold));
            holds && motion[i + 1].moved
        })
        .collect())
}

/// Every pass start by `passer`, paired with its reception when one exists.
pub fn correlate_passes(
    timeline: &MatchTimeline,
    passer: EntityId,
    config: &EngineConfig,
) -> Result<Vec<PassOutcome>> {
    let thresholds = &config.thresholds;
    let motion = ball_motion(timeline, thresholds.ball_moved_threshold);
    let starts = pass_initiations(timeline, passer, &motion, thresholds.possession_threshold)?;

    let teammates: Vec<usize> = timeline
        .team_slots(passer.team)
        .into_iter()
        .filter(|&slot| timeline.roster()[slot].is_teammate_of(&passer))
        .collect();
    let samples = timeline.samples();

    let mut outcomes = Vec::with_capacity(starts.len());
    for i in starts {
        let start = &samples[i];
        let deadline = start.time + thresholds.reception_window;

        let mut reception = None;
        for j in (i + 1)..samples.len() {
            if !timeline.continues_segment(j) || samples[j].time > deadline {
                break;
            }
            let sample = &samples[j];
            if sample.time <= start.time || !motion[j - 1].moved {
                continue;
            }
            let receiver = teammates.iter().copied().find(|&slot| {
                sample.positions[slot]
                    .is_some_and(|p| p.within_box(&sample.ball, thresholds.possession_threshold))
            });
            if let Some(slot) = receiver {
                reception = Some((j, timeline.roster()[slot]));
                break;
            }
        }

        outcomes.push(match reception {
            Some((j, receiver)) => PassOutcome::Completed(CompletedPass {
                passer,
                receiver,
                start_time: start.time,
                start_ball: start.ball,
                end_time: samples[j].time,
                end_ball: samples[j].ball,
            }),
            None => PassOutcome::Incomplete(IncompletePass {
                passer,
                start_time: start.time,
                start_ball: start.ball,
            }),
        });
    }

    debug!(
        passer = %passer,
        starts = outcomes.len(),
        completed = outcomes.iter().filter(|o| o.completed().is_some()).count(),
        "pass correlation"
    );
    Ok(outcomes)
}

/// Completed passes only.
pub fn completed_passes(outcomes: &[PassOutcome]) -> Vec<CompletedPass> {
    outcomes.iter().filter_map(|o| o.completed().cloned()).collect()
}
