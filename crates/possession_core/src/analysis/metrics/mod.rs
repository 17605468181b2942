//! # Metrics Module
//!
//! - `distance` - Distance traveled
//! - `heatmap` - Positional occupancy grid

pub mod distance;
pub mod heatmap;

pub use distance::{distance_traveled_km, player_distance_km, round2};
pub use heatmap::{cell_of, player_heatmap, shannon_entropy_normalized, Heatmap};
