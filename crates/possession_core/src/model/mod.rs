//! # Data Model
//!
//! - `entity` - Typed team / player / column identifiers
//! - `track` - Per-team track as produced by a loader

pub mod entity;
pub mod track;

pub use entity::{Axis, ColumnKey, EntityId, Team};
pub use track::{Point, Track, TrackSample};
