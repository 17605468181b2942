//! # Touch Detector
//!
//! A player touches the ball at a sample when both `|px - bx|` and
//! `|py - by|` are within the touch threshold. This is an axis-aligned box,
//! not a Euclidean radius.
//!
//! Two counting modes:
//! - sample semantics: every qualifying sample counts ([`count_touch_samples`])
//! - interval semantics: each maximal run of contiguous qualifying samples is
//!   one [`Touch`] ([`detect_touches`])

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::EntityId;
use crate::timeline::{MatchTimeline, Sample};

/// A maximal run of touch samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub entity: EntityId,
    pub period: u32,
    pub start_time: i64,
    pub end_time: i64,
    pub samples: usize,
}

impl Touch {
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }
}

struct TouchBuilder {
    entity: EntityId,
    period: u32,
    start_time: i64,
    end_time: i64,
    samples: usize,
}

impl TouchBuilder {
    fn new(entity: EntityId, sample: &Sample) -> Self {
        Self {
            entity,
            period: sample.period,
            start_time: sample.time,
            end_time: sample.time,
            samples: 1,
        }
    }

    fn add(&mut self, sample: &Sample) {
        self.end_time = sample.time;
        self.samples += 1;
    }

    fn build(self) -> Touch {
        Touch {
            entity: self.entity,
            period: self.period,
            start_time: self.start_time,
            end_time: self.end_time,
            samples: self.samples,
        }
    }
}

/// Per-sample touch predicate for `entity`.
pub fn touch_flags(timeline: &MatchTimeline, entity: EntityId, threshold: f64) -> Result<Vec<bool>> {
    let slot = timeline.slot_of(entity)?;
    Ok(timeline
        .samples()
        .iter()
        .map(|s| s.positions[slot].is_some_and(|p| p.within_box(&s.ball, threshold)))
        .collect())
}

/// Raw touch tally: number of qualifying samples.
pub fn count_touch_samples(timeline: &MatchTimeline, entity: EntityId, threshold: f64) -> Result<usize> {
    Ok(touch_flags(timeline, entity, threshold)?
        .into_iter()
        .filter(|&t| t)
        .count())
}

/// Discrete touch events. A run continues only while the next qualifying
/// sample is exactly one tick later in the same period.
pub fn detect_touches(
    timeline: &MatchTimeline,
    entity: EntityId,
    threshold: f64,
    tick: i64,
) -> Result<Vec<Touch>> {
    let flags = touch_flags(timeline, entity, threshold)?;
    let samples = timeline.samples();

    let mut touches = Vec::new();
    let mut current: Option<TouchBuilder> = None;

    for (i, (sample, &touching)) in samples.iter().zip(&flags).enumerate() {
        let contiguous = i > 0 && samples[i - 1].is_followed_by(sample, tick);

        match (&mut current, touching) {
            (Some(builder), true) if contiguous => builder.add(sample),
            (_, true) => {
                if let Some(done) = current.take() {
                    touches.push(done.build());
                }
                current = Some(TouchBuilder::new(entity, sample));
            }
            (Some(_), false) => {
                if let Some(done) = current.take() {
                    touches.push(done.build());
                }
            }
            (None, false) => {}
        }
    }

    if let Some(done) = current.take() {
        touches.push(done.build());
    }
    Ok(touches)
}
