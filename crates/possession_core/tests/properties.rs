//! Property-Based Tests for the Detection Pipeline
//!
//! Properties checked over generated timelines:
//! - Closest-entity assignment is total, deterministic and a true minimum
//! - Possession buckets sum to 100
//! - Touch intervals never outnumber touch samples
//! - Shot debounce collapses fixed-step runs
//! - Merging is commutative
//! - Pass correlation is idempotent

use possession_core::analysis::events::{debounce_runs, touch_flags};
use possession_core::{
    ball_possession, closest_entities, correlate_passes, count_touch_samples, detect_touches,
    merge_tracks, EngineConfig, EntityFilter, EntityId, MatchTimeline, PassOutcome, Point, Sample,
    Team, Track, TrackSample, UnassignedPolicy,
};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

const TICK: i64 = 10;

fn roster() -> Vec<EntityId> {
    vec![
        EntityId::new(Team::Home, 1),
        EntityId::new(Team::Home, 2),
        EntityId::new(Team::Away, 1),
        EntityId::new(Team::Away, 2),
    ]
}

/// Coarse integer grid so that ties and exact touches actually occur.
fn arb_point() -> impl Strategy<Value = Point> {
    (-60i32..=60, -40i32..=40).prop_map(|(x, y)| Point::new(x as f64 * 5.0, y as f64 * 5.0))
}

fn arb_position() -> impl Strategy<Value = Option<Point>> {
    prop_oneof![1 => Just(None), 4 => arb_point().prop_map(Some)]
}

fn arb_timeline() -> impl Strategy<Value = MatchTimeline> {
    prop::collection::vec(
        (arb_point(), prop::collection::vec(arb_position(), 4), 1u32..=2),
        0..40,
    )
    .prop_map(|rows| {
        let mut rows = rows;
        // Periods must be non-decreasing along the timeline
        rows.sort_by_key(|(_, _, period)| *period);
        let samples = rows
            .into_iter()
            .enumerate()
            .map(|(i, (ball, positions, period))| Sample {
                time: i as i64 * TICK,
                period,
                match_id: 1,
                ball,
                positions,
            })
            .collect();
        MatchTimeline::new(roster(), samples).expect("generated timeline is well formed")
    })
}

fn arb_track(team: Team, keys: Vec<(i64, Point)>) -> impl Strategy<Value = Track> {
    let entities: Vec<EntityId> = roster().into_iter().filter(|e| e.team == team).collect();
    let width = entities.len();
    prop::collection::vec(
        (any::<bool>(), prop::collection::vec(arb_position(), width)),
        keys.len(),
    )
    .prop_map(move |rows| {
        let samples = keys
            .iter()
            .zip(rows)
            .filter(|(_, (keep, _))| *keep)
            .map(|(&(time, ball), (_, positions))| TrackSample {
                time,
                period: 1,
                match_id: 1,
                ball,
                positions,
            })
            .collect();
        Track::new(team, entities.clone(), samples).expect("generated track is well formed")
    })
}

fn arb_track_pair() -> impl Strategy<Value = (Track, Track)> {
    prop::collection::vec(arb_point(), 1..30).prop_flat_map(|balls| {
        let keys: Vec<(i64, Point)> = balls
            .into_iter()
            .enumerate()
            .map(|(i, b)| (i as i64 * TICK, b))
            .collect();
        (arb_track(Team::Home, keys.clone()), arb_track(Team::Away, keys))
    })
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_closest_is_total_and_minimal(tl in arb_timeline()) {
        let first = closest_entities(&tl, EntityFilter::All);
        let second = closest_entities(&tl, EntityFilter::All);
        prop_assert_eq!(first.len(), tl.len());
        prop_assert_eq!(&first, &second);

        for (sample, closest) in tl.samples().iter().zip(&first) {
            let distances: Vec<(EntityId, f64)> = tl
                .roster()
                .iter()
                .zip(&sample.positions)
                .filter_map(|(e, p)| p.map(|p| (*e, p.distance_to(&sample.ball))))
                .collect();
            match closest {
                None => prop_assert!(distances.is_empty()),
                Some(c) => {
                    let best = distances.iter().map(|(_, d)| *d).fold(f64::INFINITY, f64::min);
                    prop_assert_eq!(c.distance, best);
                    // Earliest entity among the tied minimum
                    let first_best = distances.iter().find(|(_, d)| *d == best).map(|(e, _)| *e);
                    prop_assert_eq!(Some(c.entity), first_best);
                }
            }
        }
    }

    #[test]
    fn prop_possession_sums_to_100(tl in arb_timeline()) {
        let bucket = ball_possession(&tl, UnassignedPolicy::Bucket);
        let exclude = ball_possession(&tl, UnassignedPolicy::Exclude);

        if tl.is_empty() {
            prop_assert_eq!(bucket.total(), 0.0);
        } else {
            prop_assert!((bucket.total() - 100.0).abs() < 1e-9);
        }
        let excluded = exclude.total();
        prop_assert!(excluded == 0.0 || (excluded - 100.0).abs() < 1e-9);
        prop_assert!(exclude.unassigned.is_none());
    }

    #[test]
    fn prop_touch_intervals_bounded_by_samples(tl in arb_timeline(), threshold in 0.0f64..60.0) {
        let player = EntityId::new(Team::Home, 1);
        let touches = detect_touches(&tl, player, threshold, TICK).unwrap();
        let count = count_touch_samples(&tl, player, threshold).unwrap();

        prop_assert!(touches.len() <= count);
        prop_assert_eq!(touches.iter().map(|t| t.samples).sum::<usize>(), count);

        let flags = touch_flags(&tl, player, threshold).unwrap();
        let samples = tl.samples();
        let adjacent = (1..samples.len())
            .any(|i| flags[i - 1] && flags[i] && samples[i - 1].is_followed_by(&samples[i], TICK));
        prop_assert_eq!(touches.len() == count, !adjacent);
    }

    #[test]
    fn prop_debounce_fixed_step_run(start in -1000i64..1000, len in 1usize..50) {
        let times: Vec<i64> = (0..len as i64).map(|i| start + i * TICK).collect();
        prop_assert_eq!(debounce_runs(&times, TICK), vec![0]);
    }

    #[test]
    fn prop_debounce_bounded(mut times in prop::collection::vec(0i64..500, 0..40)) {
        times.sort_unstable();
        times.dedup();
        let runs = debounce_runs(&times, TICK);
        prop_assert!(runs.len() <= times.len());
        prop_assert_eq!(runs.first().copied(), times.first().map(|_| 0usize));
    }

    #[test]
    fn prop_merge_commutative((home, away) in arb_track_pair()) {
        match (merge_tracks(&home, &away), merge_tracks(&away, &home)) {
            (Ok(ab), Ok(ba)) => prop_assert_eq!(ab, ba),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (ab, ba) => prop_assert!(false, "merge disagrees: {:?} vs {:?}", ab, ba),
        }
    }

    #[test]
    fn prop_pass_correlation_idempotent(tl in arb_timeline(), number in 1u32..=2) {
        let config = EngineConfig::default();
        let passer = EntityId::new(Team::Home, number);
        let first = correlate_passes(&tl, passer, &config).unwrap();
        let second = correlate_passes(&tl, passer, &config).unwrap();
        prop_assert_eq!(&first, &second);

        for outcome in &first {
            if let PassOutcome::Completed(pass) = outcome {
                prop_assert!(pass.end_time > pass.start_time);
                prop_assert!(pass.end_time <= pass.start_time + config.thresholds.reception_window);
                prop_assert_eq!(pass.receiver.team, passer.team);
                prop_assert_ne!(pass.receiver, passer);
            }
        }
    }
}
