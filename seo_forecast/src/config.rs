//! Forecast configuration
//!
//! The dashboard's sidebar selections become an explicit value handed to every
//! aggregator call. A configuration file looks like:
//!
//! ```toml
//! horizon_months = 6
//! confidence_level = 0.9
//! gap_threshold_days = 3
//! ```

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Lowest accepted confidence level
pub const MIN_CONFIDENCE: f64 = 0.80;
/// Highest accepted confidence level
pub const MAX_CONFIDENCE: f64 = 0.99;
/// Confidence level used when none is configured
pub const DEFAULT_CONFIDENCE: f64 = 0.95;
/// Longest run of missing days a history may contain by default
pub const DEFAULT_GAP_THRESHOLD_DAYS: u32 = 3;

/// Forecast horizon offered by the dashboard
///
/// Serialized as a number of months (3, 6 or 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ForecastHorizon {
    /// 3 months, 90 days
    ThreeMonths,
    /// 6 months, 180 days
    SixMonths,
    /// 12 months, 365 days
    TwelveMonths,
}

impl ForecastHorizon {
    /// Number of projected days
    pub fn days(self) -> u32 {
        match self {
            ForecastHorizon::ThreeMonths => 90,
            ForecastHorizon::SixMonths => 180,
            ForecastHorizon::TwelveMonths => 365,
        }
    }

    pub fn months(self) -> u32 {
        match self {
            ForecastHorizon::ThreeMonths => 3,
            ForecastHorizon::SixMonths => 6,
            ForecastHorizon::TwelveMonths => 12,
        }
    }

    /// Map a day count back to a horizon; only 90, 180 and 365 are accepted
    pub fn from_days(days: u32) -> Result<Self> {
        match days {
            90 => Ok(ForecastHorizon::ThreeMonths),
            180 => Ok(ForecastHorizon::SixMonths),
            365 => Ok(ForecastHorizon::TwelveMonths),
            other => Err(ForecastError::InvalidConfiguration(format!(
                "Horizon must be 90, 180 or 365 days, got {}",
                other
            ))),
        }
    }

    pub fn from_months(months: u32) -> Result<Self> {
        match months {
            3 => Ok(ForecastHorizon::ThreeMonths),
            6 => Ok(ForecastHorizon::SixMonths),
            12 => Ok(ForecastHorizon::TwelveMonths),
            other => Err(ForecastError::InvalidConfiguration(format!(
                "Horizon must be 3, 6 or 12 months, got {}",
                other
            ))),
        }
    }
}

impl Default for ForecastHorizon {
    fn default() -> Self {
        ForecastHorizon::ThreeMonths
    }
}

impl TryFrom<u32> for ForecastHorizon {
    type Error = ForecastError;

    fn try_from(months: u32) -> Result<Self> {
        Self::from_months(months)
    }
}

impl From<ForecastHorizon> for u32 {
    fn from(horizon: ForecastHorizon) -> Self {
        horizon.months()
    }
}

/// Check that a confidence level lies in the accepted range
pub fn check_confidence_level(confidence_level: f64) -> Result<()> {
    if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&confidence_level) {
        return Err(ForecastError::InvalidConfiguration(format!(
            "Confidence level must be between {} and {}, got {}",
            MIN_CONFIDENCE, MAX_CONFIDENCE, confidence_level
        )));
    }
    Ok(())
}

/// Parameters for a forecast refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Projection length
    #[serde(rename = "horizon_months")]
    pub horizon: ForecastHorizon,
    /// Probability mass the band is sized for
    pub confidence_level: f64,
    /// Longest allowed run of missing days in a history
    pub gap_threshold_days: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            horizon: ForecastHorizon::default(),
            confidence_level: DEFAULT_CONFIDENCE,
            gap_threshold_days: DEFAULT_GAP_THRESHOLD_DAYS,
        }
    }
}

impl Configuration {
    pub fn with_horizon(mut self, horizon: ForecastHorizon) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_gap_threshold_days(mut self, days: u32) -> Self {
        self.gap_threshold_days = days;
        self
    }

    /// Validate every field
    pub fn validate(&self) -> Result<()> {
        check_confidence_level(self.confidence_level)
    }

    /// Parse and validate a TOML document; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Configuration = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
