//! Linear trend plus weekly seasonality

use crate::data::{weekday_slot, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::metrics::{forecast_accuracy, ForecastAccuracy};
use crate::models::{FitSummary, ForecastModel, TrainedForecastModel};
use crate::utils::day_offset;
use chrono::NaiveDate;
use forecast_math::statistics::{mean, residual_std_dev};
use forecast_math::{LinearFit, WeekdayProfile};

/// Parameters estimated by the model: slope and intercept
const FITTED_PARAMS: usize = 2;

/// Relative size below which the residual spread counts as zero
const ZERO_SPREAD_TOLERANCE: f64 = 1e-9;

/// Ordinary least squares trend with a day-of-week residual profile
#[derive(Debug, Clone)]
pub struct TrendSeasonal {
    /// Name of the model
    name: String,
}

/// Trained trend and seasonal model
#[derive(Debug, Clone)]
pub struct TrainedTrendSeasonal {
    /// Name of the model
    name: String,
    /// Day zero of the regression x axis
    origin: NaiveDate,
    trend: LinearFit,
    trend_r_squared: Option<f64>,
    profile: WeekdayProfile,
    residual_std_dev: f64,
    accuracy: ForecastAccuracy,
}

impl TrendSeasonal {
    pub fn new() -> Self {
        Self {
            name: "Linear trend + weekday seasonality".to_string(),
        }
    }
}

impl Default for TrendSeasonal {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastModel for TrendSeasonal {
    type Trained = TrainedTrendSeasonal;

    fn train(&self, history: &TimeSeries) -> Result<Self::Trained> {
        let origin = history.first_date().ok_or_else(|| {
            ForecastError::EmptyInput("Cannot train on an empty series".to_string())
        })?;

        let (dates, ys): (Vec<NaiveDate>, Vec<f64>) = history.observed().unzip();
        if ys.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "Need at least 2 observed days to fit a trend, found {}",
                ys.len()
            )));
        }

        let xs: Vec<f64> = dates.iter().map(|&d| day_offset(origin, d)).collect();
        let slots: Vec<usize> = dates.iter().map(|&d| weekday_slot(d)).collect();

        let trend = LinearFit::fit(&xs, &ys)?;
        let trend_r_squared = trend.r_squared(&xs, &ys).ok();
        let detrended = trend.residuals(&xs, &ys);
        let profile = WeekdayProfile::from_residuals(&slots, &detrended)?;

        let fitted: Vec<f64> = xs
            .iter()
            .zip(slots.iter())
            .map(|(&x, &slot)| trend.predict(x) + profile.offset(slot))
            .collect();
        let errors: Vec<f64> = ys.iter().zip(fitted.iter()).map(|(y, f)| y - f).collect();

        let mut spread = residual_std_dev(&errors, FITTED_PARAMS)?;
        let magnitudes: Vec<f64> = ys.iter().map(|y| y.abs()).collect();
        let scale = mean(&magnitudes).unwrap_or(0.0).max(1.0);
        if spread <= ZERO_SPREAD_TOLERANCE * scale {
            spread = 0.0;
        }

        let accuracy = forecast_accuracy(&fitted, &ys)?;

        Ok(TrainedTrendSeasonal {
            name: self.name.clone(),
            origin,
            trend,
            trend_r_squared,
            profile,
            residual_std_dev: spread,
            accuracy,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedTrendSeasonal {
    pub fn trend(&self) -> &LinearFit {
        &self.trend
    }

    pub fn profile(&self) -> &WeekdayProfile {
        &self.profile
    }
}

impl TrainedForecastModel for TrainedTrendSeasonal {
    fn predict(&self, date: NaiveDate) -> f64 {
        self.trend.predict(day_offset(self.origin, date)) + self.profile.offset(weekday_slot(date))
    }

    fn residual_std_dev(&self) -> f64 {
        self.residual_std_dev
    }

    fn summary(&self) -> FitSummary {
        FitSummary {
            model: self.name.clone(),
            slope: self.trend.slope(),
            intercept: self.trend.intercept(),
            trend_r_squared: self.trend_r_squared,
            weekday_profile: self.profile,
            residual_std_dev: self.residual_std_dev,
            accuracy: self.accuracy,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
