//! Pitch geometry in tracking units, origin at the center spot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    /// Touchline length (x extent)
    pub length: f64,
    /// Goal line length (y extent)
    pub width: f64,
    /// |x| at or beyond which the ball is in a shooting zone
    pub shot_line_x: f64,
    /// Half width of the goal-mouth band around y = 0
    pub goal_half_width: f64,
    /// Heatmap cells along x
    pub heatmap_cols: usize,
    /// Heatmap cells along y
    pub heatmap_rows: usize,
}

impl Default for PitchConfig {
    fn default() -> Self {
        // 105m x 68m pitch in centimeters
        Self {
            length: 10500.0,
            width: 6800.0,
            shot_line_x: 5250.0,
            goal_half_width: 366.0,
            heatmap_cols: 21,
            heatmap_rows: 14,
        }
    }
}

impl PitchConfig {
    pub fn meter_scale() -> Self {
        let cm = Self::default();
        Self {
            length: cm.length / 100.0,
            width: cm.width / 100.0,
            shot_line_x: cm.shot_line_x / 100.0,
            goal_half_width: cm.goal_half_width / 100.0,
            ..cm
        }
    }

    pub(super) fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !(self.length > 0.0 && self.width > 0.0) {
            out.push(format!(
                "pitch dimensions must be > 0, got {} x {}",
                self.length, self.width
            ));
        }
        if !(self.goal_half_width >= 0.0) {
            out.push(format!("goal_half_width must be >= 0, got {}", self.goal_half_width));
        }
        if self.heatmap_cols == 0 || self.heatmap_rows == 0 {
            out.push("heatmap grid needs at least one cell per axis".to_string());
        }
        out
    }
}
