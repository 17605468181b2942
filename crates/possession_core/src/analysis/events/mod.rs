//! # Event Detection Module
//!
//! Discrete events derived from the timeline.
//!
//! - `touch` - Touch samples and touch runs
//! - `transition` - Pass / block transitions out of a player's possession
//! - `shot` - Debounced shots on the attacking goal zone
//! - `pass_correlator` - Pass start to teammate reception pairing

pub mod pass_correlator;
pub mod shot;
pub mod touch;
pub mod transition;

pub use pass_correlator::{
    ball_motion, completed_passes, correlate_passes, pass_initiations, BallMotion, CompletedPass,
    IncompletePass, PassOutcome,
};
pub use shot::{count_shots, debounce_runs, detect_shots, Shot, ShotZone};
pub use touch::{count_touch_samples, detect_touches, touch_flags, Touch};
pub use transition::{
    detect_transitions, period_transitions, transitions_of_kind, TransitionEvent, TransitionKind,
};
