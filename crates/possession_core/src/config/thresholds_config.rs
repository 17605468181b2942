//! Detection thresholds.
//!
//! All values are in tracking units (centimeters for distances, ticks for
//! time). The touch and possession thresholds are separate on purpose: the
//! first counts ball contacts, the second decides who can receive a pass.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Axis-wise distance for a touch (`|dx| <= t && |dy| <= t`)
    pub touch_threshold: f64,
    /// Axis-wise distance for holding / receiving the ball
    pub possession_threshold: f64,
    /// Frame-to-frame ball displacement above which the ball counts as moved
    pub ball_moved_threshold: f64,
    /// Time span after a pass start in which a receiver must appear
    pub reception_window: i64,
    /// Sample step of the tracking feed
    pub tick: i64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            touch_threshold: 5.0,
            possession_threshold: 50.0,
            ball_moved_threshold: 200.0,
            reception_window: 100,
            tick: 10,
        }
    }
}

impl ThresholdsConfig {
    /// Distances rescaled for a feed that reports meters instead of centimeters.
    pub fn meter_scale() -> Self {
        let cm = Self::default();
        Self {
            touch_threshold: cm.touch_threshold / 100.0,
            possession_threshold: cm.possession_threshold / 100.0,
            ball_moved_threshold: cm.ball_moved_threshold / 100.0,
            ..cm
        }
    }

    pub(super) fn problems(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !(self.touch_threshold > 0.0) {
            out.push(format!("touch_threshold must be > 0, got {}", self.touch_threshold));
        }
        if !(self.possession_threshold > 0.0) {
            out.push(format!(
                "possession_threshold must be > 0, got {}",
                self.possession_threshold
            ));
        }
        if !(self.ball_moved_threshold >= 0.0) {
            out.push(format!(
                "ball_moved_threshold must be >= 0, got {}",
                self.ball_moved_threshold
            ));
        }
        if self.reception_window < 0 {
            out.push(format!("reception_window must be >= 0, got {}", self.reception_window));
        }
        if self.tick <= 0 {
            out.push(format!("tick must be > 0, got {}", self.tick));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_feed_calibration() {
        let t = ThresholdsConfig::default();
        assert_eq!(t.touch_threshold, 5.0);
        assert_eq!(t.possession_threshold, 50.0);
        assert_eq!(t.ball_moved_threshold, 200.0);
        assert_eq!(t.reception_window, 100);
        assert_eq!(t.tick, 10);
        assert!(t.problems().is_empty());
    }

    #[test]
    fn test_meter_scale_keeps_time() {
        let m = ThresholdsConfig::meter_scale();
        assert!((m.possession_threshold - 0.5).abs() < 1e-12);
        assert_eq!(m.tick, 10);
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let t = ThresholdsConfig {
            touch_threshold: f64::NAN,
            tick: 0,
            ..Default::default()
        };
        assert_eq!(t.problems().len(), 2);
    }
}
