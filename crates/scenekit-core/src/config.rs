//! Editor tuning: timing and snapping settings.

use crate::error::{SceneError, SceneResult};
use crate::snap::{Guidelines, HORIZONTAL_GUIDELINES, SNAP_TOLERANCE, VERTICAL_GUIDELINES};
use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Duration;

/// Settings for a [`crate::editor::SceneEditor`]. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet period before pending edits are committed, in milliseconds.
    pub quiet_period_ms: u64,
    /// Minimum interval between live gesture updates, in milliseconds.
    pub throttle_ms: u64,
    pub snap_tolerance: f64,
    pub snapping: bool,
    pub vertical_guidelines: Vec<f64>,
    pub horizontal_guidelines: Vec<f64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: 1000,
            throttle_ms: 1,
            snap_tolerance: SNAP_TOLERANCE,
            snapping: true,
            vertical_guidelines: VERTICAL_GUIDELINES.to_vec(),
            horizontal_guidelines: HORIZONTAL_GUIDELINES.to_vec(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Guidelines are sorted ascending.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let mut config: EditorConfig =
            serde_json::from_str(json).map_err(|e| SceneError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        config.vertical_guidelines.sort_by(f64::total_cmp);
        config.horizontal_guidelines.sort_by(f64::total_cmp);
        Ok(config)
    }

    pub fn validate(&self) -> SceneResult<()> {
        if !self.snap_tolerance.is_finite() || self.snap_tolerance < 0.0 {
            return Err(SceneError::InvalidConfig(format!(
                "snap tolerance must be a non-negative number, got {}",
                self.snap_tolerance
            )));
        }
        let all_finite = self
            .vertical_guidelines
            .iter()
            .chain(&self.horizontal_guidelines)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(SceneError::InvalidConfig("guidelines must be finite".to_string()));
        }
        Ok(())
    }

    /// Guidelines to snap against, or `None` when snapping is off.
    pub fn guidelines(&self) -> Option<Guidelines> {
        self.snapping.then(|| {
            Guidelines::new(
                self.vertical_guidelines.clone(),
                self.horizontal_guidelines.clone(),
                self.snap_tolerance,
            )
        })
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_canvas() {
        let config = EditorConfig::default();
        assert_eq!(config.quiet_period(), Duration::from_secs(1));
        assert_eq!(config.guidelines(), Some(Guidelines::default()));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json_str(r#"{"quiet_period_ms": 250, "vertical_guidelines": [960, 200]}"#)
            .unwrap();
        assert_eq!(config.quiet_period_ms, 250);
        assert_eq!(config.throttle_ms, 1);
        assert_eq!(config.vertical_guidelines, vec![200.0, 960.0]);
        assert_eq!(config.horizontal_guidelines, HORIZONTAL_GUIDELINES.to_vec());
    }

    #[test]
    fn test_snapping_off() {
        let config = EditorConfig::from_json_str(r#"{"snapping": false}"#).unwrap();
        assert!(config.guidelines().is_none());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            EditorConfig::from_json_str(r#"{"snap_tolerance": -1}"#),
            Err(SceneError::InvalidConfig(_))
        ));
        assert!(matches!(
            EditorConfig::from_json_str("not json"),
            Err(SceneError::InvalidConfig(_))
        ));
    }
}
