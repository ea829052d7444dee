//! # Forecast Math
//!
//! Numeric building blocks for daily-series forecasting.
//! This crate provides an ordinary least squares trend fit, a weekday
//! seasonal profile and the residual statistics used to size confidence bands.

use thiserror::Error;

pub mod regression;
pub mod seasonal;
pub mod statistics;

pub use regression::LinearFit;
pub use seasonal::WeekdayProfile;

/// Errors that can occur in forecasting calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;
