//! Inner join of two team tracks on `(time, period, match_id, ball_x, ball_y)`.
//!
//! Ticks present in only one track are dropped. The ball coordinates are part
//! of the key, so rows where the two sources disagree on the ball do not merge.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, warn};

use super::{MatchTimeline, Sample};
use crate::error::{AnalysisError, Result};
use crate::model::{Team, Track, TrackSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct JoinKey {
    match_id: u64,
    period: u32,
    time: i64,
    ball_x: u64,
    ball_y: u64,
}

impl JoinKey {
    fn of(sample: &TrackSample) -> Self {
        Self {
            match_id: sample.match_id,
            period: sample.period,
            time: sample.time,
            ball_x: coord_bits(sample.ball.x),
            ball_y: coord_bits(sample.ball.y),
        }
    }
}

/// Exact-match bits; `-0.0` and `0.0` compare equal.
fn coord_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else {
        v.to_bits()
    }
}

/// First occurrence of every key in a track.
fn index_track(track: &Track) -> FxHashMap<JoinKey, usize> {
    let mut index = FxHashMap::default();
    let mut duplicates = 0usize;
    for (i, sample) in track.samples().iter().enumerate() {
        match index.entry(JoinKey::of(sample)) {
            Entry::Vacant(slot) => {
                slot.insert(i);
            }
            Entry::Occupied(_) => duplicates += 1,
        }
    }
    if duplicates > 0 {
        warn!(
            team = %track.team(),
            duplicates,
            "duplicate timeline keys in track; keeping first occurrence"
        );
    }
    index
}

/// Merge two team tracks into the match timeline.
///
/// The result is independent of argument order: rows are sorted by
/// `(match_id, period, time)` and the roster lists Home players before Away.
///
/// # Errors
/// `DataAlignment` if both tracks are for the same team or share no key.
pub fn merge_tracks(a: &Track, b: &Track) -> Result<MatchTimeline> {
    if a.team() == b.team() {
        return Err(AnalysisError::alignment(format!(
            "both tracks belong to {}",
            a.team()
        )));
    }
    let (home, away) = if a.team() == Team::Home { (a, b) } else { (b, a) };

    let home_index = index_track(home);
    let away_index = index_track(away);

    let mut joined: Vec<(JoinKey, usize, usize)> = home_index
        .iter()
        .filter_map(|(key, &h)| away_index.get(key).map(|&w| (*key, h, w)))
        .collect();

    if joined.is_empty() {
        return Err(AnalysisError::alignment(format!(
            "Home ({} rows) and Away ({} rows) share no (time, period, match, ball) key",
            home.len(),
            away.len()
        )));
    }
    joined.sort_unstable_by_key(|(key, _, _)| *key);

    let roster: Vec<_> = home
        .roster()
        .iter()
        .chain(away.roster().iter())
        .copied()
        .collect();

    let samples: Vec<Sample> = joined
        .iter()
        .map(|&(_, h, w)| {
            let hs = &home.samples()[h];
            let ws = &away.samples()[w];
            let mut positions = Vec::with_capacity(roster.len());
            positions.extend_from_slice(&hs.positions);
            positions.extend_from_slice(&ws.positions);
            Sample {
                time: hs.time,
                period: hs.period,
                match_id: hs.match_id,
                ball: hs.ball,
                positions,
            }
        })
        .collect();

    debug!(
        rows = samples.len(),
        dropped_home = home.len() - samples.len(),
        dropped_away = away.len() - samples.len(),
        players = roster.len(),
        "merged team tracks"
    );

    MatchTimeline::new(roster, samples)
}
