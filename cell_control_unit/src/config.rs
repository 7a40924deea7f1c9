//! TOML configuration loader with validation.
//!
//! Loads [`CellConfig`] from a single TOML file. Every field has a default
//! reproducing the reference station's constants, so an empty file is a
//! valid configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

// ─── Error Type ─────────────────────────────────────────────────────

/// Configuration loading/validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("config I/O error: {0}")]
    Io(String),

    /// TOML parse error.
    #[error("config parse error: {0}")]
    Parse(String),

    /// Parameter validation error.
    #[error("config validation: {0}")]
    Validation(String),
}

// ─── Stage Timings ──────────────────────────────────────────────────

/// Cycle-count thresholds driving the software timers.
///
/// All ranges are half-open and counted in cycles at the configured period.
/// Defaults match the physical station's tuning; change them only together
/// with the mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTimings {
    /// Oven heat-treatment dwell [cycles]. The sole completion signal —
    /// there is no sensor confirming "fully heated".
    pub oven_dwell: u32,
    /// Pick: gripper lowering ends at this count.
    pub grip_lower_end: u32,
    /// Pick: vacuum grip engagement ends at this count.
    pub grip_engage_end: u32,
    /// Pick: gripper raising ends at this count; ≥ this, the carrier moves
    /// to the turntable.
    pub grip_raise_end: u32,
    /// Release: lowering at the turntable ends at this count.
    pub release_lower_end: u32,
    /// Release: grip release ends at this count; ≥ this, the gripper raises.
    pub release_grip_end: u32,
}

impl Default for StageTimings {
    fn default() -> Self {
        Self {
            oven_dwell: 30,
            grip_lower_end: 10,
            grip_engage_end: 15,
            grip_raise_end: 25,
            release_lower_end: 15,
            release_grip_end: 30,
        }
    }
}

// ─── Cell Config ────────────────────────────────────────────────────

/// Complete controller configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    /// Polling period [ms].
    pub cycle_time_ms: u64,
    /// I/O port backend name (currently only "simulation").
    pub port: String,
    /// Software timer thresholds.
    pub timings: StageTimings,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            cycle_time_ms: 50,
            port: "simulation".to_string(),
            timings: StageTimings::default(),
        }
    }
}

impl CellConfig {
    /// Validate parameter bounds and threshold ordering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_time_ms == 0 || self.cycle_time_ms > 1000 {
            return Err(ConfigError::Validation(format!(
                "cycle_time_ms {} out of range [1, 1000]",
                self.cycle_time_ms
            )));
        }
        if self.port.is_empty() {
            return Err(ConfigError::Validation("port name is empty".to_string()));
        }
        let t = &self.timings;
        if t.oven_dwell == 0 {
            return Err(ConfigError::Validation(
                "oven_dwell must be at least 1 cycle".to_string(),
            ));
        }
        if !(0 < t.grip_lower_end
            && t.grip_lower_end < t.grip_engage_end
            && t.grip_engage_end < t.grip_raise_end)
        {
            return Err(ConfigError::Validation(format!(
                "grip thresholds must be strictly increasing: {} < {} < {}",
                t.grip_lower_end, t.grip_engage_end, t.grip_raise_end
            )));
        }
        if !(0 < t.release_lower_end && t.release_lower_end < t.release_grip_end) {
            return Err(ConfigError::Validation(format!(
                "release thresholds must be strictly increasing: {} < {}",
                t.release_lower_end, t.release_grip_end
            )));
        }
        Ok(())
    }
}

// ─── Loading Functions ──────────────────────────────────────────────

/// Load and validate the configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CellConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("failed to read {}: {e}", path.display())))?;
    load_config_from_str(&raw)
}

/// Load config from a TOML string (for testing).
pub fn load_config_from_str(raw: &str) -> Result<CellConfig, ConfigError> {
    let config: CellConfig =
        toml::from_str(raw).map_err(|e| ConfigError::Parse(format!("cell config: {e}")))?;
    config.validate()?;
    Ok(config)
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_reference_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.cycle_time_ms, 50);
        assert_eq!(config.port, "simulation");
        assert_eq!(config.timings, StageTimings::default());
        assert_eq!(config.timings.oven_dwell, 30);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config = load_config_from_str(
            r#"
cycle_time_ms = 100

[timings]
oven_dwell = 60
"#,
        )
        .unwrap();
        assert_eq!(config.cycle_time_ms, 100);
        assert_eq!(config.timings.oven_dwell, 60);
        // Untouched fields keep the reference constants.
        assert_eq!(config.timings.grip_lower_end, 10);
        assert_eq!(config.timings.release_grip_end, 30);
    }

    #[test]
    fn reject_zero_cycle_time() {
        let err = load_config_from_str("cycle_time_ms = 0").unwrap_err();
        assert!(err.to_string().contains("cycle_time_ms"), "got: {err}");
    }

    #[test]
    fn reject_cycle_time_over_limit() {
        let err = load_config_from_str("cycle_time_ms = 5000").unwrap_err();
        assert!(err.to_string().contains("out of range"), "got: {err}");
    }

    #[test]
    fn reject_zero_dwell() {
        let err = load_config_from_str("[timings]\noven_dwell = 0").unwrap_err();
        assert!(err.to_string().contains("oven_dwell"), "got: {err}");
    }

    #[test]
    fn reject_non_monotonic_grip_thresholds() {
        let err = load_config_from_str(
            r#"
[timings]
grip_lower_end = 20
grip_engage_end = 15
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("grip thresholds"), "got: {err}");
    }

    #[test]
    fn reject_non_monotonic_release_thresholds() {
        let err = load_config_from_str(
            r#"
[timings]
release_lower_end = 30
release_grip_end = 30
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("release thresholds"), "got: {err}");
    }

    #[test]
    fn reject_empty_port_name() {
        let err = load_config_from_str(r#"port = """#).unwrap_err();
        assert!(err.to_string().contains("port"), "got: {err}");
    }

    #[test]
    fn reject_malformed_toml() {
        let err = load_config_from_str("this is not valid toml @@@@").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "cycle_time_ms = 25").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.cycle_time_ms, 25);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/cell.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
