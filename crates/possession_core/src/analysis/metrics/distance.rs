//! Distance covered by a player.

use crate::error::Result;
use crate::model::{EntityId, Point};
use crate::timeline::MatchTimeline;

/// Total path length in kilometers, rounded to 2 decimals.
///
/// Positions are in centimeters. Only steps between two consecutive tracked
/// samples count; a step into or out of an untracked sample is skipped.
pub fn distance_traveled_km(positions: &[Option<Point>]) -> f64 {
    let meters: f64 = positions
        .windows(2)
        .filter_map(|w| match (w[0], w[1]) {
            (Some(a), Some(b)) => {
                let (ax, ay) = a.to_meters();
                let (bx, by) = b.to_meters();
                let step = ((bx - ax).powi(2) + (by - ay).powi(2)).sqrt();
                step.is_finite().then_some(step)
            }
            _ => None,
        })
        .sum();
    round2(meters / 1000.0)
}

/// [`distance_traveled_km`] over the timeline positions of `entity`.
pub fn player_distance_km(timeline: &MatchTimeline, entity: EntityId) -> Result<f64> {
    let slot = timeline.slot_of(entity)?;
    let positions: Vec<Option<Point>> = timeline.samples().iter().map(|s| s.positions[slot]).collect();
    Ok(distance_traveled_km(&positions))
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
