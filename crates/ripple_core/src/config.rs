//! # Simulation Configuration
//!
//! All tunables are loaded once from TOML at startup. Every field has a
//! default, so an empty file is a valid configuration.
//!
//! ```toml
//! seed = 48339
//!
//! [grid]
//! dimension = 250
//!
//! [schedule]
//! tick_period_ms = 60.0
//! raindrop_period_ms = 35.0
//!
//! [splash]
//! amplitude = -3.0
//! delta = 1.0
//! drop_size = 1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{DEFAULT_DIMENSION, DEFAULT_RAINDROP_PERIOD_MS, DEFAULT_SEED, DEFAULT_TICK_PERIOD_MS, MIN_DIMENSION};
use crate::disturbance::{check_width, Disturbance};
use crate::error::{RippleError, RippleResult};
use crate::height_field::HeightField;
use crate::random::SimulationSeed;
use crate::scheduler::{rate_to_period_ms, StepScheduler};

/// Grid section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Side length of the square grid.
    pub dimension: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { dimension: DEFAULT_DIMENSION }
    }
}

/// Schedule section.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Fixed tick period in milliseconds.
    pub tick_period_ms: f64,
    /// Mean time between raindrops in milliseconds.
    pub raindrop_period_ms: f64,
    /// Raindrops per second. Overrides `raindrop_period_ms` when set.
    pub drops_per_second: Option<f64>,
}

impl ScheduleConfig {
    /// Mean raindrop period after applying the rate override.
    #[must_use]
    pub fn effective_raindrop_period_ms(&self) -> f64 {
        self.drops_per_second.map_or(self.raindrop_period_ms, rate_to_period_ms)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            raindrop_period_ms: DEFAULT_RAINDROP_PERIOD_MS,
            drops_per_second: None,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RippleConfig {
    /// Root seed for every random stream.
    pub seed: u64,
    /// Grid parameters.
    pub grid: GridConfig,
    /// Tick and arrival timing.
    pub schedule: ScheduleConfig,
    /// Raindrop amplitude and size.
    pub splash: Disturbance,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            grid: GridConfig::default(),
            schedule: ScheduleConfig::default(),
            splash: Disturbance::default(),
        }
    }
}

impl RippleConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` on a parse error or a value the engine
    /// would reject.
    pub fn from_toml_str(text: &str) -> RippleResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| RippleError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`RippleConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> RippleResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RippleError::Io(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), dimension = config.grid.dimension, "configuration loaded");
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a value cannot be represented.
    pub fn to_toml_string(&self) -> RippleResult<String> {
        toml::to_string(self).map_err(|e| RippleError::InvalidConfig(e.to_string()))
    }

    /// Checks every value against the engine's preconditions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` describing the first offending value.
    pub fn validate(&self) -> RippleResult<()> {
        let invalid = |e: RippleError| RippleError::InvalidConfig(e.to_string());

        let dimension = self.grid.dimension;
        if dimension < MIN_DIMENSION {
            return Err(invalid(RippleError::InvalidDimension { dimension, min: MIN_DIMENSION }));
        }
        check_width(self.splash.width, dimension).map_err(invalid)?;
        if !self.splash.base_peak.is_finite() || !self.splash.delta.is_finite() {
            return Err(RippleError::InvalidConfig("splash amplitude and delta must be finite".into()));
        }
        self.scheduler().map_err(invalid)?;
        Ok(())
    }

    /// Root seed.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> SimulationSeed {
        SimulationSeed::new(self.seed)
    }

    /// Builds a flat height field of the configured dimension.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if the dimension is too small.
    pub fn height_field(&self) -> RippleResult<HeightField> {
        HeightField::new(self.grid.dimension)
    }

    /// Builds the configured scheduler.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if a period is not finite and positive.
    pub fn scheduler(&self) -> RippleResult<StepScheduler> {
        StepScheduler::new(self.schedule.tick_period_ms, self.schedule.effective_raindrop_period_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        let config = RippleConfig::from_toml_str("").unwrap();
        assert_eq!(config, RippleConfig::default());
        assert_eq!(config.grid.dimension, DEFAULT_DIMENSION);
        assert_eq!(config.splash.base_peak, -3.0);
    }

    #[test]
    fn test_parse_sections() {
        let config = RippleConfig::from_toml_str(
            r#"
            seed = 7

            [grid]
            dimension = 40

            [schedule]
            tick_period_ms = 50.0
            drops_per_second = 20.0

            [splash]
            amplitude = -5.0
            delta = 0.5
            drop_size = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.seed().value(), 7);
        assert_eq!(config.grid.dimension, 40);
        assert_eq!(config.schedule.effective_raindrop_period_ms(), 50.0);
        assert_eq!(config.splash, Disturbance::new(-5.0, 0.5, 3));
        assert_eq!(config.scheduler().unwrap().split_drops(), (1, 0.0));
    }

    #[test]
    fn test_rejects_small_grid() {
        let err = RippleConfig::from_toml_str("[grid]\ndimension = 4\n").unwrap_err();
        assert!(matches!(err, RippleError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_wide_drop() {
        let err = RippleConfig::from_toml_str("[grid]\ndimension = 10\n[splash]\ndrop_size = 6\n").unwrap_err();
        assert!(err.to_string().contains("peak width"));
    }

    #[test]
    fn test_rejects_bad_period() {
        assert!(RippleConfig::from_toml_str("[schedule]\nraindrop_period_ms = 0.0\n").is_err());
        assert!(RippleConfig::from_toml_str("[schedule]\ndrops_per_second = -1.0\n").is_err());
    }

    #[test]
    fn test_rejects_unknown_key() {
        assert!(RippleConfig::from_toml_str("[grid]\nsize = 10\n").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RippleConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(RippleConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = RippleConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, RippleError::Io(_)));
    }

    #[test]
    fn test_builders() {
        let config = RippleConfig::default();
        assert_eq!(config.height_field().unwrap().dimension(), DEFAULT_DIMENSION);
        assert_eq!(config.scheduler().unwrap().tick_period_ms(), DEFAULT_TICK_PERIOD_MS);
    }
}
