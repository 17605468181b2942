//! # Engine Configuration
//!
//! Every calibration constant the detectors use lives here instead of in the
//! detectors themselves, so a feed with a different coordinate scale only
//! needs a different config.
//!
//! ## Usage
//! ```rust
//! use possession_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let meters = EngineConfig::meter_scale();
//! assert!(meters.thresholds.touch_threshold < config.thresholds.touch_threshold);
//! ```
//!
//! ## Environment Variables
//!
//! - `POSSESSION_CONFIG`: path to a YAML file with (partial) overrides

mod pitch_config;
mod thresholds_config;

pub use pitch_config::PitchConfig;
pub use thresholds_config::ThresholdsConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::analysis::possession::UnassignedPolicy;
use crate::error::{AnalysisError, Result};

pub const CONFIG_ENV_VAR: &str = "POSSESSION_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: ThresholdsConfig,
    pub pitch: PitchConfig,
    /// How samples without a closest entity count toward possession shares
    pub unassigned_policy: UnassignedPolicy,
}

impl EngineConfig {
    /// Feed reporting coordinates in meters.
    pub fn meter_scale() -> Self {
        Self {
            thresholds: ThresholdsConfig::meter_scale(),
            pitch: PitchConfig::meter_scale(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_yaml::from_str(yaml).map_err(|e| AnalysisError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path).map_err(|e| AnalysisError::InvalidConfig {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        debug!(path = %path.display(), "loading engine config");
        Self::from_yaml_str(&yaml)
    }

    /// Load from the file named by `POSSESSION_CONFIG`, or use defaults when
    /// the variable is unset.
    pub fn from_env_or_default() -> Result<Self> {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_yaml_file(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let mut problems = self.thresholds.problems();
        problems.extend(self.pitch.problems());
        if problems.is_empty() {
            Ok(())
        } else {
            Err(AnalysisError::InvalidConfig {
                reason: problems.join("; "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.unassigned_policy, UnassignedPolicy::Bucket);
        assert!(EngineConfig::meter_scale().validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_overrides() {
        let cfg = EngineConfig::from_yaml_str(
            "thresholds:\n  reception_window: 150\nunassigned_policy: exclude\n",
        )
        .unwrap();
        assert_eq!(cfg.thresholds.reception_window, 150);
        assert_eq!(cfg.thresholds.touch_threshold, 5.0);
        assert_eq!(cfg.unassigned_policy, UnassignedPolicy::Exclude);
        assert_eq!(cfg.pitch, PitchConfig::default());
    }

    #[test]
    fn test_invalid_yaml_values_rejected() {
        let err = EngineConfig::from_yaml_str("thresholds:\n  tick: 0\n").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig { .. }));

        let err = EngineConfig::from_yaml_str("thresholds: [1, 2]").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfig { .. }));
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "pitch:\n  shot_line_x: 5000").unwrap();
        let cfg = EngineConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(cfg.pitch.shot_line_x, 5000.0);

        let missing = EngineConfig::from_yaml_file(Path::new("/nonexistent/cfg.yaml"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_config_serialization() {
        let cfg = EngineConfig::meter_scale();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }
}
