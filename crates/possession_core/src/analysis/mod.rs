//! # Analysis Module
//!
//! Detectors and metrics over a merged [`MatchTimeline`](crate::timeline::MatchTimeline).
//!
//! ## Submodules
//!
//! - `proximity` - Distance to ball and closest-entity assignment
//! - `possession` - Team possession shares and spells
//! - `events` - Touch, transition (pass / block), shot and pass correlation
//! - `metrics` - Distance traveled and heatmap occupancy
//!
//! Stage order: proximity runs first; possession and transitions consume its
//! assignment, the other detectors read the timeline directly.

pub mod events;
pub mod metrics;
pub mod possession;
pub mod proximity;
