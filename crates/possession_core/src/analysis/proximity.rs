//! # Proximity Engine
//!
//! Euclidean distance of every tracked entity to the ball, per sample, and the
//! single closest entity.
//!
//! ## Rules
//! - Missing coordinates give distance `+inf`; such entities are never closest.
//! - All distances infinite: no closest entity.
//! - Exact ties go to the entity that comes first in `EntityId` order
//!   (Home before Away, then ascending shirt number). The timeline roster is
//!   stored in that order, so the first strict minimum in roster order wins.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::model::{EntityId, Team};
use crate::timeline::{MatchTimeline, Sample};

/// Which entities take part in a closest-entity query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntityFilter {
    #[default]
    All,
    Team(Team),
}

impl EntityFilter {
    pub fn includes(&self, entity: &EntityId) -> bool {
        match self {
            EntityFilter::All => true,
            EntityFilter::Team(team) => entity.team == *team,
        }
    }
}

/// Closest entity at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Closest {
    pub entity: EntityId,
    pub distance: f64,
}

/// Closest entity among roster `slots` (given in roster order).
fn closest_among(roster: &[EntityId], sample: &Sample, slots: &[usize]) -> Option<Closest> {
    let mut best: Option<Closest> = None;
    for &slot in slots {
        let Some(pos) = sample.positions[slot] else {
            continue;
        };
        let distance = pos.distance_to(&sample.ball);
        if !distance.is_finite() {
            continue;
        }
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Closest {
                entity: roster[slot],
                distance,
            });
        }
    }
    best
}

/// Closest entity for every sample of the timeline, in sample order.
pub fn closest_entities(timeline: &MatchTimeline, filter: EntityFilter) -> Vec<Option<Closest>> {
    let roster = timeline.roster();
    let slots: Vec<usize> = roster
        .iter()
        .enumerate()
        .filter(|(_, e)| filter.includes(e))
        .map(|(i, _)| i)
        .collect();

    let assignment: Vec<Option<Closest>> = timeline
        .samples()
        .par_iter()
        .map(|sample| closest_among(roster, sample, &slots))
        .collect();

    debug!(
        samples = assignment.len(),
        candidates = slots.len(),
        unassigned = assignment.iter().filter(|a| a.is_none()).count(),
        "closest-entity assignment"
    );
    assignment
}

/// Distance of one entity to the ball at every sample.
pub fn distances_to_ball(timeline: &MatchTimeline, entity: EntityId) -> Result<Vec<f64>> {
    let slot = timeline.slot_of(entity)?;
    Ok(timeline
        .samples()
        .iter()
        .map(|s| match s.positions[slot] {
            Some(p) => p.distance_to(&s.ball),
            None => f64::INFINITY,
        })
        .collect())
}
