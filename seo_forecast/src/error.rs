//! Error types for the seo_forecast crate

use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the seo_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No observation matched the requested metric
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Fewer than two distinct dates, so no trend can be fit
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A run of missing days is longer than the allowed threshold
    #[error("Data gap of {gap_days} days starting {start} exceeds threshold of {threshold_days} days")]
    DataGap {
        start: chrono::NaiveDate,
        gap_days: u32,
        threshold_days: u32,
    },

    /// Horizon or confidence level outside the allowed set
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Observation value rejected at construction
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from reading or writing delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from parsing a configuration file
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
