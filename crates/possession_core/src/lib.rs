//! # possession_core - Possession & Event Detection Engine
//!
//! Derives ball possession and match events from per-frame tracking data
//! (ball and player coordinates sampled at a fixed tick, one track per team).
//!
//! ## Pipeline
//! 1. [`timeline::merge_tracks`] aligns the two team tracks into a [`MatchTimeline`]
//! 2. [`analysis::proximity`] assigns the closest entity to every sample
//! 3. Possession, touch, transition, shot and pass detectors read the timeline
//!    (and the assignment where they need it)
//! 4. [`MatchSummary`] aggregates one query into a serializable record
//!
//! Every stage is a pure function over borrowed input; nothing here touches
//! the filesystem except [`EngineConfig`] loading.

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally in tests and presets
#![allow(clippy::field_reassign_with_default)]
// Index loops mirror the sample-relative (i - 1, i + 1) rules
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod summary;
pub mod timeline;

pub use config::{EngineConfig, PitchConfig, ThresholdsConfig, CONFIG_ENV_VAR};
pub use error::{AnalysisError, Result};
pub use model::{Axis, ColumnKey, EntityId, Point, Team, Track, TrackSample};
pub use summary::{MatchSummary, SummaryQuery};
pub use timeline::{merge_tracks, MatchTimeline, Sample};

// Re-export the detector surface
pub use analysis::events::{
    correlate_passes, count_shots, count_touch_samples, detect_shots, detect_touches,
    detect_transitions, period_transitions, transitions_of_kind, CompletedPass, IncompletePass,
    PassOutcome, Shot, Touch, TransitionEvent, TransitionKind,
};
pub use analysis::possession::{
    ball_possession, possession_share, possession_spells, PossessionShare, PossessionSpell,
    UnassignedPolicy,
};
pub use analysis::proximity::{closest_entities, distances_to_ball, Closest, EntityFilter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
