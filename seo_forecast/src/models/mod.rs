//! Forecasting models for daily metric series

use crate::config::ForecastHorizon;
use crate::data::{Metric, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::metrics::ForecastAccuracy;
use chrono::{Duration, NaiveDate};
use forecast_math::WeekdayProfile;
use serde::Serialize;
use std::fmt::Debug;

pub mod trend_seasonal;

pub use trend_seasonal::{TrainedTrendSeasonal, TrendSeasonal};

/// Parameters and in-sample quality of the fitted model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitSummary {
    /// Name of the model
    pub model: String,
    /// Daily trend increment
    pub slope: f64,
    /// Trend value on the first history day
    pub intercept: f64,
    /// Share of variance explained by the trend alone; `None` for a flat history
    pub trend_r_squared: Option<f64>,
    /// Mean residual per weekday
    pub weekday_profile: WeekdayProfile,
    /// Standard deviation of in-sample errors; zero for a perfect fit
    pub residual_std_dev: f64,
    /// Accuracy of the fitted values against observed days
    pub accuracy: ForecastAccuracy,
}

/// Observed history, projected values and the confidence band around them
///
/// Every projected day satisfies `lower <= projected <= upper`, and the
/// projection starts the day after the history ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    metric: Metric,
    history: TimeSeries,
    projection: TimeSeries,
    lower_bound: TimeSeries,
    upper_bound: TimeSeries,
    confidence_level: f64,
    horizon: ForecastHorizon,
    fit: FitSummary,
}

impl ForecastResult {
    /// Assemble a result, checking the band and date invariants
    pub fn new(
        history: TimeSeries,
        projection: TimeSeries,
        lower_bound: TimeSeries,
        upper_bound: TimeSeries,
        confidence_level: f64,
        horizon: ForecastHorizon,
        fit: FitSummary,
    ) -> Result<Self> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Confidence level must be between 0 and 1, got {}",
                confidence_level
            )));
        }

        let len = projection.len();
        if lower_bound.len() != len || upper_bound.len() != len {
            return Err(ForecastError::InvalidParameter(format!(
                "Band lengths ({}, {}) don't match projection length ({})",
                lower_bound.len(),
                upper_bound.len(),
                len
            )));
        }

        match (history.last_date(), projection.first_date()) {
            (Some(last), Some(first)) if first == last + Duration::days(1) => {}
            (last, first) => {
                return Err(ForecastError::InvalidParameter(format!(
                    "Projection must start the day after history ends (history ends {:?}, projection starts {:?})",
                    last, first
                )))
            }
        }

        for ((p, lo), hi) in projection
            .points()
            .iter()
            .zip(lower_bound.points())
            .zip(upper_bound.points())
        {
            if p.date != lo.date || p.date != hi.date {
                return Err(ForecastError::InvalidParameter(format!(
                    "Band dates don't line up with projection on {}",
                    p.date
                )));
            }
            match (lo.value, p.value, hi.value) {
                (Some(lo), Some(p), Some(hi)) if lo <= p && p <= hi => {}
                _ => {
                    return Err(ForecastError::InvalidParameter(format!(
                        "Band invariant violated on {}",
                        p.date
                    )))
                }
            }
        }

        Ok(Self {
            metric: history.metric(),
            history,
            projection,
            lower_bound,
            upper_bound,
            confidence_level,
            horizon,
            fit,
        })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Normalized input series
    pub fn history(&self) -> &TimeSeries {
        &self.history
    }

    /// Point forecast for each future day
    pub fn projection(&self) -> &TimeSeries {
        &self.projection
    }

    pub fn lower_bound(&self) -> &TimeSeries {
        &self.lower_bound
    }

    pub fn upper_bound(&self) -> &TimeSeries {
        &self.upper_bound
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    pub fn horizon(&self) -> ForecastHorizon {
        self.horizon
    }

    pub fn fit(&self) -> &FitSummary {
        &self.fit
    }

    /// `(date, lower, projected, upper)` for every projected day
    pub fn bands(&self) -> impl Iterator<Item = (NaiveDate, f64, f64, f64)> + '_ {
        self.projection
            .points()
            .iter()
            .zip(self.lower_bound.points())
            .zip(self.upper_bound.points())
            .map(|((p, lo), hi)| {
                (
                    p.date,
                    lo.value.unwrap_or_default(),
                    p.value.unwrap_or_default(),
                    hi.value.unwrap_or_default(),
                )
            })
    }

    /// Width of the band on every projected day
    pub fn band_widths(&self) -> Vec<f64> {
        self.bands().map(|(_, lo, _, hi)| hi - lo).collect()
    }

    /// Serialize the whole result for a presentation layer
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ForecastError::InvalidParameter(format!("JSON encoding failed: {}", e)))
    }
}

/// Forecast model that can be trained on a daily series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on the observed days of `history`
    fn train(&self, history: &TimeSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Point forecast for a single date
    fn predict(&self, date: NaiveDate) -> f64;

    /// Point forecasts for several dates
    fn forecast(&self, dates: &[NaiveDate]) -> Vec<f64> {
        dates.iter().map(|&d| self.predict(d)).collect()
    }

    /// Spread of the in-sample errors
    fn residual_std_dev(&self) -> f64;

    /// Parameters and accuracy of the fit
    fn summary(&self) -> FitSummary;

    /// Name of the model
    fn name(&self) -> &str;
}
