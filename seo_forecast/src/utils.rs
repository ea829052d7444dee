//! Utility functions for the seo_forecast crate

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};

/// Consecutive days following `last_date`
///
/// Fails when the range runs past the last representable date.
pub fn future_dates(last_date: NaiveDate, horizon_days: u32) -> Result<Vec<NaiveDate>> {
    (1..=horizon_days as i64)
        .map(|offset| {
            last_date
                .checked_add_signed(Duration::days(offset))
                .ok_or_else(|| {
                    ForecastError::InvalidParameter(format!(
                        "{} days after {} is out of the supported date range",
                        horizon_days, last_date
                    ))
                })
        })
        .collect()
}

/// Day offset of `date` from `origin`, as used on regression x axes
pub fn day_offset(origin: NaiveDate, date: NaiveDate) -> f64 {
    (date - origin).num_days() as f64
}
