//! Headline figures for the dashboard's KPI cards

use crate::data::{Metric, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::ForecastResult;
use serde::Serialize;

/// Window used by the dashboard cards
pub const DEFAULT_KPI_WINDOW_DAYS: u32 = 30;

/// Current level, recent change and forecast level for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricKpi {
    pub metric: Metric,
    /// Aggregate of the last `window_days` of history
    pub current: f64,
    /// Percentage change against the window before; `None` without a usable baseline
    pub change_pct: Option<f64>,
    /// Aggregate of the first `window_days` of the projection
    pub forecast: f64,
    pub window_days: u32,
}

impl MetricKpi {
    /// Summarize a forecast; additive metrics are summed over the window, rates averaged
    pub fn from_forecast(result: &ForecastResult, window_days: u32) -> Result<Self> {
        if window_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "KPI window must be at least 1 day".to_string(),
            ));
        }

        let metric = result.metric();
        let history = result.history();
        let window = window_days as usize;
        let len = history.len();

        let current = aggregate(metric, history, len.saturating_sub(window), len).ok_or_else(
            || {
                ForecastError::InsufficientData(format!(
                    "No observed {} in the last {} days",
                    metric, window_days
                ))
            },
        )?;

        let change_pct = if len >= 2 * window {
            aggregate(metric, history, len - 2 * window, len - window)
                .filter(|previous| *previous != 0.0)
                .map(|previous| (current - previous) / previous * 100.0)
        } else {
            None
        };

        let projection = result.projection();
        let forecast = aggregate(metric, projection, 0, window.min(projection.len()))
            .ok_or_else(|| {
                ForecastError::InsufficientData(format!("Projection for {} is empty", metric))
            })?;

        Ok(Self {
            metric,
            current,
            change_pct,
            forecast,
            window_days,
        })
    }
}

fn aggregate(metric: Metric, series: &TimeSeries, start: usize, end: usize) -> Option<f64> {
    let values: Vec<f64> = series.points()[start..end]
        .iter()
        .filter_map(|p| p.value)
        .collect();
    metric.combine(&values)
}

/// One KPI per forecast, in the order given
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct KpiBoard {
    pub kpis: Vec<MetricKpi>,
}

impl KpiBoard {
    pub fn from_forecasts<'a, I>(results: I, window_days: u32) -> Result<Self>
    where
        I: IntoIterator<Item = &'a ForecastResult>,
    {
        let kpis = results
            .into_iter()
            .map(|result| MetricKpi::from_forecast(result, window_days))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { kpis })
    }

    pub fn get(&self, metric: Metric) -> Option<&MetricKpi> {
        self.kpis.iter().find(|kpi| kpi.metric == metric)
    }
}
