//! Configuration data models
//!
//! This module defines the data structures used for session configuration.

use crate::error::{Result, SlideLoopError, StringError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default advance period in milliseconds
const DEFAULT_PERIOD_MS: u64 = 5000;

/// Default startup leeway in milliseconds
const DEFAULT_STARTUP_LEEWAY_MS: u64 = 1000;

/// Top-level session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlideshowConfig {
    /// Timer behavior
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Advance timer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Automatic advance period in milliseconds
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
    /// Permitted tick lateness in milliseconds before the repeating cadence
    /// re-anchors to the current instant
    #[serde(default = "default_startup_leeway_ms")]
    pub startup_leeway_ms: u64,
}

fn default_period_ms() -> u64 {
    DEFAULT_PERIOD_MS
}

fn default_startup_leeway_ms() -> u64 {
    DEFAULT_STARTUP_LEEWAY_MS
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            startup_leeway_ms: DEFAULT_STARTUP_LEEWAY_MS,
        }
    }
}

impl TimingConfig {
    /// Advance period as a [`Duration`]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    /// Startup leeway as a [`Duration`]
    pub fn startup_leeway(&self) -> Duration {
        Duration::from_millis(self.startup_leeway_ms)
    }

    /// Validate the timer settings
    ///
    /// The period must be non-zero; the leeway may not exceed the period
    /// (a tick later than a full period is a missed tick, not slack).
    pub fn validate(&self) -> Result<()> {
        if self.period_ms == 0 {
            return Err(SlideLoopError::ConfigError(StringError::new(
                "advance period must be non-zero",
            )));
        }
        if self.startup_leeway_ms > self.period_ms {
            return Err(SlideLoopError::ConfigError(StringError::new(format!(
                "startup leeway {}ms exceeds advance period {}ms",
                self.startup_leeway_ms, self.period_ms
            ))));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SlideshowConfig::default();
        assert_eq!(config.timing.period_ms, 5000);
        assert_eq!(config.timing.startup_leeway_ms, 1000);
        assert!(config.timing.validate().is_ok());
    }

    #[test]
    fn test_duration_accessors() {
        let timing = TimingConfig {
            period_ms: 250,
            startup_leeway_ms: 50,
        };
        assert_eq!(timing.period(), Duration::from_millis(250));
        assert_eq!(timing.startup_leeway(), Duration::from_millis(50));
    }

    #[test]
    fn test_zero_period_rejected() {
        let timing = TimingConfig {
            period_ms: 0,
            startup_leeway_ms: 0,
        };
        assert!(timing.validate().is_err());
    }

    #[test]
    fn test_leeway_beyond_period_rejected() {
        let timing = TimingConfig {
            period_ms: 100,
            startup_leeway_ms: 101,
        };
        assert!(timing.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = SlideshowConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SlideshowConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.timing, deserialized.timing);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: SlideshowConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.timing, TimingConfig::default());

        let config: SlideshowConfig =
            serde_json::from_str(r#"{"timing": {"period_ms": 2000}}"#).unwrap();
        assert_eq!(config.timing.period_ms, 2000);
        assert_eq!(config.timing.startup_leeway_ms, 1000);
    }
}
