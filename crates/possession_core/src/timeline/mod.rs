//! # Match Timeline
//!
//! The merged, synchronized sequence of samples every detector consumes.
//! A timeline is only produced by [`merge_tracks`] (or assembled directly for
//! tests via [`MatchTimeline::new`]); detectors never mutate it.

mod merge;

pub use merge::merge_tracks;

use crate::error::{AnalysisError, Result};
use crate::model::{EntityId, Point, Team};

/// One synchronized time step of the match.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub time: i64,
    pub period: u32,
    pub match_id: u64,
    pub ball: Point,
    /// Positions in timeline roster order; `None` = untracked.
    pub positions: Vec<Option<Point>>,
}

impl Sample {
    /// Whether `next` directly follows this sample: same match and period,
    /// exactly one tick later.
    pub fn is_followed_by(&self, next: &Sample, tick: i64) -> bool {
        self.match_id == next.match_id && self.period == next.period && next.time == self.time + tick
    }

    fn same_segment(&self, next: &Sample) -> bool {
        self.match_id == next.match_id && self.period == next.period
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchTimeline {
    roster: Vec<EntityId>,
    samples: Vec<Sample>,
}

impl MatchTimeline {
    /// Assemble a timeline from an already aligned sample sequence.
    pub fn new(roster: Vec<EntityId>, samples: Vec<Sample>) -> Result<Self> {
        if roster.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AnalysisError::unsupported(
                "timeline roster must be sorted by entity order and free of duplicates",
            ));
        }
        if let Some((row, _)) = samples
            .iter()
            .enumerate()
            .find(|(_, s)| s.positions.len() != roster.len())
        {
            return Err(AnalysisError::unsupported(format!(
                "timeline row {} does not match roster width {}",
                row,
                roster.len()
            )));
        }
        Ok(Self { roster, samples })
    }

    pub fn roster(&self) -> &[EntityId] {
        &self.roster
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Roster slot of `entity`, or `UnknownEntity` with the available roster.
    pub fn slot_of(&self, entity: EntityId) -> Result<usize> {
        self.roster
            .binary_search(&entity)
            .map_err(|_| AnalysisError::UnknownEntity {
                entity,
                available: self.roster.clone(),
            })
    }

    /// Roster slots belonging to `team`.
    pub fn team_slots(&self, team: Team) -> Vec<usize> {
        self.roster
            .iter()
            .enumerate()
            .filter(|(_, e)| e.team == team)
            .map(|(i, _)| i)
            .collect()
    }

    /// Distinct periods, ascending.
    pub fn periods(&self) -> Vec<u32> {
        let mut periods: Vec<u32> = self.samples.iter().map(|s| s.period).collect();
        periods.sort_unstable();
        periods.dedup();
        periods
    }

    /// Samples of one period as a new timeline.
    ///
    /// An empty timeline yields an empty timeline for any period; a
    /// non-empty timeline without `period` is an `InvalidPeriod` error.
    pub fn for_period(&self, period: u32) -> Result<MatchTimeline> {
        if self.samples.is_empty() {
            return Ok(self.clone());
        }
        let samples: Vec<Sample> = self
            .samples
            .iter()
            .filter(|s| s.period == period)
            .cloned()
            .collect();
        if samples.is_empty() {
            return Err(AnalysisError::InvalidPeriod {
                period,
                available: self.periods(),
            });
        }
        Ok(MatchTimeline {
            roster: self.roster.clone(),
            samples,
        })
    }

    /// Frame-to-frame ball displacement. `None` on the first sample of each
    /// period (or match), where no predecessor exists.
    pub fn ball_displacements(&self) -> Vec<Option<f64>> {
        let mut out = Vec::with_capacity(self.samples.len());
        for (i, sample) in self.samples.iter().enumerate() {
            let step = match i.checked_sub(1).map(|p| &self.samples[p]) {
                Some(prev) if prev.same_segment(sample) => Some(prev.ball.distance_to(&sample.ball)),
                _ => None,
            };
            out.push(step);
        }
        out
    }

    /// Whether sample `i - 1` and sample `i` belong to the same period.
    pub fn continues_segment(&self, i: usize) -> bool {
        i > 0 && self.samples[i - 1].same_segment(&self.samples[i])
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::timeline;
    use super::*;

    fn home(n: u32) -> EntityId {
        EntityId::new(Team::Home, n)
    }

    #[test]
    fn test_new_rejects_unsorted_roster() {
        let roster = vec![EntityId::new(Team::Away, 1), home(1)];
        assert!(MatchTimeline::new(roster, vec![]).is_err());
    }

    #[test]
    fn test_for_period_invalid() {
        let tl = timeline(vec![home(1)], vec![(0, (0.0, 0.0), vec![None])]);
        assert_eq!(tl.for_period(1).unwrap().len(), 1);
        assert_eq!(
            tl.for_period(2).unwrap_err(),
            AnalysisError::InvalidPeriod {
                period: 2,
                available: vec![1]
            }
        );
        assert!(MatchTimeline::default().for_period(7).unwrap().is_empty());
    }

    #[test]
    fn test_ball_displacements_reset_per_period() {
        let mut tl = timeline(
            vec![home(1)],
            vec![
                (0, (0.0, 0.0), vec![None]),
                (10, (300.0, 400.0), vec![None]),
                (20, (300.0, 400.0), vec![None]),
            ],
        );
        tl.samples[2].period = 2;

        let d = tl.ball_displacements();
        assert_eq!(d[0], None);
        assert_eq!(d[1], Some(500.0));
        assert_eq!(d[2], None);
        assert!(tl.continues_segment(1));
        assert!(!tl.continues_segment(2));
    }

    #[test]
    fn test_is_followed_by() {
        let tl = timeline(
            vec![home(1)],
            vec![
                (100, (0.0, 0.0), vec![None]),
                (110, (0.0, 0.0), vec![None]),
                (130, (0.0, 0.0), vec![None]),
            ],
        );
        let s = tl.samples();
        assert!(s[0].is_followed_by(&s[1], 10));
        assert!(!s[1].is_followed_by(&s[2], 10));
    }
}
