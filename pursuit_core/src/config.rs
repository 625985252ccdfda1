//! Chase configuration
//!
//! Tuning knobs for the pursuit law and the control loop rate. Values can be
//! loaded from a TOML file; anything not set falls back to the defaults
//! below. Validation is fail-fast: a bad value rejects the whole config
//! before any node starts ticking.

use crate::error::{PursuitError, PursuitResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default proportional gain from distance-to-travel to linear speed
pub const DEFAULT_VELOCITY_SCALE: f64 = 2.0;

/// Default linear speed cap
pub const DEFAULT_VELOCITY_MAX: f64 = 4.0;

/// Default control loop rate
pub const DEFAULT_RATE_HZ: f64 = 10.0;

/// Parameters of a chase: pursuit tuning plus loop rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    /// Gain applied to the remaining travel distance
    pub velocity_scale: f64,
    /// Hard cap on commanded linear speed
    pub velocity_max: f64,
    /// Control loop frequency in Hz
    pub rate_hz: f64,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            velocity_scale: DEFAULT_VELOCITY_SCALE,
            velocity_max: DEFAULT_VELOCITY_MAX,
            rate_hz: DEFAULT_RATE_HZ,
        }
    }
}

impl ChaseConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> PursuitResult<Self> {
        let config: ChaseConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> PursuitResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject non-positive or non-finite values
    pub fn validate(&self) -> PursuitResult<()> {
        if !self.velocity_scale.is_finite() || self.velocity_scale <= 0.0 {
            return Err(PursuitError::config(format!(
                "velocity_scale must be positive and finite, got {}",
                self.velocity_scale
            )));
        }
        if !self.velocity_max.is_finite() || self.velocity_max <= 0.0 {
            return Err(PursuitError::config(format!(
                "velocity_max must be positive and finite, got {}",
                self.velocity_max
            )));
        }
        if !self.rate_hz.is_finite() || self.rate_hz <= 0.0 {
            return Err(PursuitError::config(format!(
                "rate_hz must be positive and finite, got {}",
                self.rate_hz
            )));
        }
        Ok(())
    }

    /// Nominal duration of one control tick
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = ChaseConfig::default();

        assert_relative_eq!(config.velocity_scale, 2.0);
        assert_relative_eq!(config.velocity_max, 4.0);
        assert_relative_eq!(config.rate_hz, 10.0);
        assert_eq!(config.tick_period(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ChaseConfig::from_toml_str("velocity_max = 6.0\n").unwrap();

        assert_relative_eq!(config.velocity_max, 6.0);
        assert_relative_eq!(config.velocity_scale, DEFAULT_VELOCITY_SCALE);
        assert_relative_eq!(config.rate_hz, DEFAULT_RATE_HZ);
    }

    #[test]
    fn test_full_toml() {
        let text = "velocity_scale = 1.5\nvelocity_max = 3.0\nrate_hz = 50.0\n";
        let config = ChaseConfig::from_toml_str(text).unwrap();

        assert_relative_eq!(config.velocity_scale, 1.5);
        assert_relative_eq!(config.velocity_max, 3.0);
        assert_eq!(config.tick_period(), Duration::from_millis(20));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ChaseConfig::from_toml_str("velocity_scale = 0.0\n").is_err());
        assert!(ChaseConfig::from_toml_str("velocity_max = -1.0\n").is_err());
        assert!(ChaseConfig::from_toml_str("rate_hz = 0.0\n").is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(ChaseConfig::from_toml_str("velocity_scale = \"fast\"\n").is_err());
    }
}
