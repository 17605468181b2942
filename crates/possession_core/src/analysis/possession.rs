//! # Possession Segmenter
//!
//! Turns the closest-entity assignment into team possession shares and
//! possession spells.
//!
//! Samples with no closest entity are handled by [`UnassignedPolicy`]:
//! - `Exclude`: dropped from the denominator; Home + Away = 100
//! - `Bucket`: counted as their own `Unassigned` share; all three sum to 100
//!
//! An empty range (or, under `Exclude`, a range with nothing assigned) gives
//! all-zero shares.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::proximity::{closest_entities, Closest, EntityFilter};
use crate::model::Team;
use crate::timeline::MatchTimeline;

pub const UNASSIGNED_BUCKET: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnassignedPolicy {
    Exclude,
    #[default]
    Bucket,
}

/// Possession percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PossessionShare {
    pub home: f64,
    pub away: f64,
    /// Present only under `UnassignedPolicy::Bucket`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unassigned: Option<f64>,
}

impl PossessionShare {
    pub fn of(&self, team: Team) -> f64 {
        match team {
            Team::Home => self.home,
            Team::Away => self.away,
        }
    }

    pub fn total(&self) -> f64 {
        self.home + self.away + self.unassigned.unwrap_or(0.0)
    }

    /// Team name → percentage, as consumed by report writers.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        map.insert(Team::Home.name().to_string(), self.home);
        map.insert(Team::Away.name().to_string(), self.away);
        if let Some(unassigned) = self.unassigned {
            map.insert(UNASSIGNED_BUCKET.to_string(), unassigned);
        }
        map
    }
}

/// Maximal run of samples possessed by one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossessionSpell {
    pub team: Team,
    pub period: u32,
    pub start_time: i64,
    pub end_time: i64,
    pub samples: usize,
}

/// Percentage of samples attributed to each team.
pub fn possession_share(assignment: &[Option<Closest>], policy: UnassignedPolicy) -> PossessionShare {
    let mut home = 0usize;
    let mut away = 0usize;
    let mut unassigned = 0usize;
    for closest in assignment {
        match closest.map(|c| c.entity.team) {
            Some(Team::Home) => home += 1,
            Some(Team::Away) => away += 1,
            None => unassigned += 1,
        }
    }

    let denominator = match policy {
        UnassignedPolicy::Exclude => home + away,
        UnassignedPolicy::Bucket => home + away + unassigned,
    };
    let pct = |n: usize| {
        if denominator == 0 {
            0.0
        } else {
            n as f64 * 100.0 / denominator as f64
        }
    };

    PossessionShare {
        home: pct(home),
        away: pct(away),
        unassigned: match policy {
            UnassignedPolicy::Exclude => None,
            UnassignedPolicy::Bucket => Some(pct(unassigned)),
        },
    }
}

/// Closest-entity assignment over all players, reduced to team shares.
pub fn ball_possession(timeline: &MatchTimeline, policy: UnassignedPolicy) -> PossessionShare {
    let assignment = closest_entities(timeline, EntityFilter::All);
    let share = possession_share(&assignment, policy);
    debug!(
        home = share.home,
        away = share.away,
        unassigned = ?share.unassigned,
        "ball possession"
    );
    share
}

/// Possession intervals. A spell ends when the possessing team changes, when
/// no entity is assigned, or at a period boundary.
///
/// `assignment` must come from [`closest_entities`] on the same timeline.
pub fn possession_spells(
    timeline: &MatchTimeline,
    assignment: &[Option<Closest>],
) -> Vec<PossessionSpell> {
    let mut spells = Vec::new();
    let mut current: Option<PossessionSpell> = None;

    for (i, (sample, closest)) in timeline.samples().iter().zip(assignment).enumerate() {
        let team = closest.map(|c| c.entity.team);
        let continues = timeline.continues_segment(i);

        match (&mut current, team) {
            (Some(spell), Some(t)) if continues && spell.team == t => {
                spell.end_time = sample.time;
                spell.samples += 1;
            }
            (_, team) => {
                if let Some(done) = current.take() {
                    spells.push(done);
                }
                current = team.map(|t| PossessionSpell {
                    team: t,
                    period: sample.period,
                    start_time: sample.time,
                    end_time: sample.time,
                    samples: 1,
                });
            }
        }
    }

    if let Some(done) = current.take() {
        spells.push(done);
    }
    spells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityId;
    use crate::timeline::test_support::timeline;

    fn owner(team: Team, number: u32) -> Option<Closest> {
        Some(Closest {
            entity: EntityId::new(team, number),
            distance: 1.0,
        })
    }

    #[test]
    fn test_bucket_policy_keeps_unassigned() {
        let assignment = vec![
            owner(Team::Home, 1),
            owner(Team::Home, 2),
            owner(Team::Away, 3),
            None,
        ];
        let share = possession_share(&assignment, UnassignedPolicy::Bucket);
        assert_eq!(share.home, 50.0);
        assert_eq!(share.away, 25.0);
        assert_eq!(share.unassigned, Some(25.0));
        assert!((share.total() - 100.0).abs() < 1e-9);

        let map = share.to_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map[UNASSIGNED_BUCKET], 25.0);
    }

    #[test]
    fn test_exclude_policy_drops_unassigned() {
        let assignment = vec![
            owner(Team::Home, 1),
            owner(Team::Away, 3),
            owner(Team::Away, 4),
            None,
        ];
        let share = possession_share(&assignment, UnassignedPolicy::Exclude);
        assert!((share.home - 100.0 / 3.0).abs() < 1e-9);
        assert!((share.away - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(share.unassigned, None);
        assert!((share.total() - 100.0).abs() < 1e-9);
        assert_eq!(share.to_map().len(), 2);
    }

    #[test]
    fn test_empty_and_all_unassigned() {
        for policy in [UnassignedPolicy::Exclude, UnassignedPolicy::Bucket] {
            let share = possession_share(&[], policy);
            assert_eq!(share.home, 0.0);
            assert_eq!(share.away, 0.0);
        }

        let share = possession_share(&[None, None], UnassignedPolicy::Exclude);
        assert_eq!(share.total(), 0.0);
        let share = possession_share(&[None, None], UnassignedPolicy::Bucket);
        assert_eq!(share.unassigned, Some(100.0));
    }

    #[test]
    fn test_ball_possession_end_to_end() {
        let home = EntityId::new(Team::Home, 1);
        let away = EntityId::new(Team::Away, 1);
        let tl = timeline(
            vec![home, away],
            vec![
                (0, (0.0, 0.0), vec![Some((1.0, 0.0)), Some((9.0, 0.0))]),
                (10, (10.0, 0.0), vec![Some((1.0, 0.0)), Some((9.0, 0.0))]),
                (20, (10.0, 0.0), vec![None, None]),
            ],
        );
        let share = ball_possession(&tl, UnassignedPolicy::Bucket);
        assert!((share.home - 100.0 / 3.0).abs() < 1e-9);
        assert!((share.away - 100.0 / 3.0).abs() < 1e-9);
        assert!((share.unassigned.unwrap() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_spells_break_on_team_change_and_gap() {
        let home = EntityId::new(Team::Home, 1);
        let away = EntityId::new(Team::Away, 1);
        let tl = timeline(
            vec![home, away],
            vec![
                (0, (0.0, 0.0), vec![Some((0.0, 0.0)), Some((50.0, 0.0))]),
                (10, (0.0, 0.0), vec![Some((0.0, 0.0)), Some((50.0, 0.0))]),
                (20, (50.0, 0.0), vec![Some((0.0, 0.0)), Some((50.0, 0.0))]),
                (30, (50.0, 0.0), vec![None, None]),
                (40, (50.0, 0.0), vec![Some((0.0, 0.0)), Some((50.0, 0.0))]),
            ],
        );
        let assignment = closest_entities(&tl, EntityFilter::All);
        let spells = possession_spells(&tl, &assignment);

        assert_eq!(spells.len(), 3);
        assert_eq!(spells[0].team, Team::Home);
        assert_eq!((spells[0].start_time, spells[0].end_time), (0, 10));
        assert_eq!(spells[0].samples, 2);
        assert_eq!(spells[1].team, Team::Away);
        assert_eq!(spells[1].samples, 1);
        assert_eq!(spells[2].start_time, 40);
    }
}
