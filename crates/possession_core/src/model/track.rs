//! Per-team tracking data as delivered by a track loader.

use serde::{Deserialize, Serialize};

use super::entity::{EntityId, Team};
use crate::error::{AnalysisError, Result};

/// Planar coordinate in tracking units (centimeters).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Axis-aligned proximity: both `|dx|` and `|dy|` within `threshold`.
    pub fn within_box(&self, other: &Point, threshold: f64) -> bool {
        (self.x - other.x).abs() <= threshold && (self.y - other.y).abs() <= threshold
    }

    /// Centimeters to meters.
    pub fn to_meters(&self) -> (f64, f64) {
        (self.x / 100.0, self.y / 100.0)
    }
}

/// One row of a team track.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSample {
    pub time: i64,
    pub period: u32,
    pub match_id: u64,
    pub ball: Point,
    /// Positions in roster order; `None` = untracked at this sample.
    pub positions: Vec<Option<Point>>,
}

/// Ordered samples of one team, with the roster its columns describe.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    team: Team,
    roster: Vec<EntityId>,
    samples: Vec<TrackSample>,
}

impl Track {
    /// Build a track, checking that the roster is sorted, unique, belongs to
    /// `team`, and that every sample carries one slot per roster entry.
    pub fn new(team: Team, roster: Vec<EntityId>, samples: Vec<TrackSample>) -> Result<Self> {
        if let Some(foreign) = roster.iter().find(|e| e.team != team) {
            return Err(AnalysisError::unsupported(format!(
                "{} track contains column for {}",
                team, foreign
            )));
        }
        if roster.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AnalysisError::unsupported(
                "track roster must be sorted and free of duplicates",
            ));
        }
        if let Some((row, sample)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.positions.len() != roster.len())
        {
            return Err(AnalysisError::unsupported(format!(
                "row {} has {} player slots, roster has {}",
                row,
                sample.positions.len(),
                roster.len()
            )));
        }
        Ok(Self {
            team,
            roster,
            samples,
        })
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn roster(&self) -> &[EntityId] {
        &self.roster
    }

    pub fn samples(&self) -> &[TrackSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Roster slot of `entity`, or `UnknownEntity`.
    pub fn slot_of(&self, entity: EntityId) -> Result<usize> {
        self.roster
            .binary_search(&entity)
            .map_err(|_| AnalysisError::UnknownEntity {
                entity,
                available: self.roster.clone(),
            })
    }

    /// Positions of one player over the whole track.
    pub fn player_positions(&self, entity: EntityId) -> Result<Vec<Option<Point>>> {
        let slot = self.slot_of(entity)?;
        Ok(self.samples.iter().map(|s| s.positions[slot]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: i64, positions: Vec<Option<Point>>) -> TrackSample {
        TrackSample {
            time,
            period: 1,
            match_id: 1,
            ball: Point::new(0.0, 0.0),
            positions,
        }
    }

    #[test]
    fn test_point_metrics() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!(a.within_box(&b, 4.0));
        assert!(!a.within_box(&b, 3.5));
        assert_eq!(Point::new(250.0, -100.0).to_meters(), (2.5, -1.0));
    }

    #[test]
    fn test_track_rejects_foreign_roster() {
        let roster = vec![EntityId::new(Team::Away, 3)];
        let err = Track::new(Team::Home, roster, vec![]).unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_track_rejects_short_rows() {
        let roster = vec![EntityId::new(Team::Home, 3), EntityId::new(Team::Home, 5)];
        let rows = vec![sample(0, vec![None])];
        assert!(Track::new(Team::Home, roster, rows).is_err());
    }

    #[test]
    fn test_player_positions_unknown_entity() {
        let roster = vec![EntityId::new(Team::Home, 3)];
        let track = Track::new(
            Team::Home,
            roster,
            vec![sample(0, vec![Some(Point::new(1.0, 1.0))])],
        )
        .unwrap();

        assert_eq!(
            track.player_positions(EntityId::new(Team::Home, 3)).unwrap(),
            vec![Some(Point::new(1.0, 1.0))]
        );
        let err = track
            .player_positions(EntityId::new(Team::Home, 9))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownEntity { .. }));
    }
}
