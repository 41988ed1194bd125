// SPDX-License-Identifier: GPL-3.0-only

//! User configuration.
//!
//! Every tunable of the widget lives here: the drag thresholds, the two
//! footprints, and the three timing knobs. The defaults reproduce the
//! shipped behavior; a JSON file next to the binary can override any subset
//! of fields. A missing file is not an error, the defaults apply, while a
//! file that exists but does not parse is reported so a typo does not
//! silently revert the user to defaults.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app_settings;
use crate::gesture::DragThresholds;
use crate::menu::MenuGeometry;

/// Errors raised while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config file: {}", e),
            ConfigError::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Widget configuration. All fields are optional in the JSON form and fall
/// back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Movement threshold for mouse drags, in pixels.
    pub mouse_drag_threshold: f32,
    /// Movement threshold for touch drags, in pixels.
    pub touch_drag_threshold: f32,
    /// Side length of the collapsed footprint, in pixels.
    pub collapsed_size: f32,
    /// Side length of the expanded footprint, in pixels.
    pub expanded_size: f32,
    /// Idle timeout before the expanded menu collapses, in milliseconds.
    pub auto_collapse_ms: u64,
    /// How long the assistant chord is held, in milliseconds.
    pub hold_ms: u64,
    /// Delay between paced chord legs, in milliseconds.
    pub chord_step_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mouse_drag_threshold: app_settings::MOUSE_DRAG_THRESHOLD,
            touch_drag_threshold: app_settings::TOUCH_DRAG_THRESHOLD,
            collapsed_size: app_settings::COLLAPSED_SIZE,
            expanded_size: app_settings::EXPANDED_SIZE,
            auto_collapse_ms: app_settings::AUTO_COLLAPSE_TIMEOUT_MS,
            hold_ms: app_settings::HOLD_DURATION_MS,
            chord_step_ms: app_settings::CHORD_STEP_DELAY_MS,
        }
    }
}

impl Config {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Json)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json(&json)
    }

    /// Loads the configuration file if it exists, falling back to defaults.
    ///
    /// A missing file is expected and logged at debug level; an unreadable
    /// or malformed file is a user mistake and logged as a warning.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// The drag thresholds in the gesture tracker's form.
    #[must_use]
    pub fn drag_thresholds(&self) -> DragThresholds {
        DragThresholds {
            mouse: self.mouse_drag_threshold,
            touch: self.touch_drag_threshold,
        }
    }

    /// The menu footprints in the controller's form.
    #[must_use]
    pub fn menu_geometry(&self) -> MenuGeometry {
        MenuGeometry {
            collapsed: self.collapsed_size,
            expanded: self.expanded_size,
        }
    }

    /// The auto-collapse timeout as a [`Duration`].
    #[must_use]
    pub fn auto_collapse_timeout(&self) -> Duration {
        Duration::from_millis(self.auto_collapse_ms)
    }

    /// The chord hold duration as a [`Duration`].
    #[must_use]
    pub fn hold_duration(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    /// The paced chord step delay as a [`Duration`].
    #[must_use]
    pub fn chord_step_delay(&self) -> Duration {
        Duration::from_millis(self.chord_step_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Test that defaults reproduce the shipped constants
    #[test]
    fn test_defaults_match_settings() {
        let config = Config::default();

        assert_eq!(config.mouse_drag_threshold, 5.0);
        assert_eq!(config.touch_drag_threshold, 10.0);
        assert_eq!(config.collapsed_size, 80.0);
        assert_eq!(config.expanded_size, 220.0);
        assert_eq!(config.auto_collapse_timeout(), Duration::from_secs(5));
        assert_eq!(config.hold_duration(), Duration::from_secs(2));
        assert_eq!(config.chord_step_delay(), Duration::from_millis(50));
    }

    /// Test that a partial JSON file overrides only the named fields
    #[test]
    fn test_partial_override() {
        let config = Config::from_json(r#"{ "hold_ms": 1500, "touch_drag_threshold": 12.5 }"#)
            .expect("valid config");

        assert_eq!(config.hold_ms, 1500);
        assert_eq!(config.touch_drag_threshold, 12.5);
        // Untouched fields keep their defaults
        assert_eq!(config.mouse_drag_threshold, 5.0);
        assert_eq!(config.expanded_size, 220.0);
    }

    /// Test that an empty object is a valid all-defaults config
    #[test]
    fn test_empty_object_is_default() {
        let config = Config::from_json("{}").expect("valid config");
        assert_eq!(config, Config::default());
    }

    /// Test that malformed JSON reports a parse error
    #[test]
    fn test_malformed_json_is_error() {
        let result = Config::from_json("{ hold_ms: nope }");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    /// Test a file round-trip through serde_json
    #[test]
    fn test_file_round_trip() {
        let mut config = Config::default();
        config.auto_collapse_ms = 8000;
        config.collapsed_size = 64.0;

        let mut file = NamedTempFile::new().expect("temp file");
        let json = serde_json::to_string_pretty(&config).expect("serialize");
        file.write_all(json.as_bytes()).expect("write");

        let loaded = Config::load(file.path()).expect("load");
        assert_eq!(loaded, config);
    }

    /// Test that a missing file falls back to defaults
    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default(Path::new("/nonexistent/touchfuture.json"));
        assert_eq!(config, Config::default());
    }

    /// Test that a malformed file falls back to defaults without panicking
    #[test]
    fn test_malformed_file_falls_back() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(b"not json").expect("write");

        let config = Config::load_or_default(file.path());
        assert_eq!(config, Config::default());
    }

    /// Test the conversions into component parameter types
    #[test]
    fn test_component_conversions() {
        let config = Config::default();

        let thresholds = config.drag_thresholds();
        assert_eq!(thresholds.mouse, 5.0);
        assert_eq!(thresholds.touch, 10.0);

        let geometry = config.menu_geometry();
        assert_eq!(geometry.center_offset(), 70.0);
    }
}
