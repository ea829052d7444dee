//! # SEO Forecast Workspace
//!
//! Facade over the workspace crates plus the one call a dashboard makes on
//! every refresh: build forecasts for the charted metrics, their KPI cards and
//! the opportunity table in one go.
//!
//! ## Example
//!
//! ```
//! use seo_forecast_workspace::refresh_dashboard;
//! use seo_forecast_workspace::seo_forecast::{
//!     ForecastAggregator, KeywordStats, Metric, MetricObservation, Source,
//! };
//! use chrono::{Duration, NaiveDate};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let observations: Vec<MetricObservation> = (0..60)
//!     .map(|i| {
//!         MetricObservation::new(
//!             start + Duration::days(i),
//!             Source::Analytics,
//!             Metric::Revenue,
//!             5000.0 + 10.0 * i as f64,
//!         )
//!         .unwrap()
//!     })
//!     .collect();
//! let keywords = vec![("seo audit".to_string(), KeywordStats::new(6, 8000, 42.0))];
//!
//! let snapshot = refresh_dashboard(
//!     &ForecastAggregator::default(),
//!     &observations,
//!     &[Metric::Revenue],
//!     keywords,
//! )
//! .unwrap();
//! assert_eq!(snapshot.forecasts.len(), 1);
//! assert_eq!(snapshot.opportunities.len(), 1);
//! ```

pub use forecast_math;
pub use seo_forecast;

use seo_forecast::kpi::DEFAULT_KPI_WINDOW_DAYS;
use seo_forecast::{
    ForecastAggregator, ForecastResult, KeywordStats, KpiBoard, Metric, MetricObservation,
    RankedOpportunities,
};
use serde::Serialize;

/// Everything the dashboard renders after a refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// One forecast per requested metric, in request order
    pub forecasts: Vec<ForecastResult>,
    pub kpis: KpiBoard,
    pub opportunities: RankedOpportunities,
}

impl DashboardSnapshot {
    pub fn forecast(&self, metric: Metric) -> Option<&ForecastResult> {
        self.forecasts.iter().find(|f| f.metric() == metric)
    }
}

/// Recompute the whole dashboard from freshly loaded inputs
///
/// Fails on the first metric that cannot be forecast; nothing is filled in
/// with placeholder values.
pub fn refresh_dashboard<K, I>(
    aggregator: &ForecastAggregator,
    observations: &[MetricObservation],
    metrics: &[Metric],
    keyword_stats: I,
) -> seo_forecast::error::Result<DashboardSnapshot>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, KeywordStats)>,
{
    let forecasts = metrics
        .iter()
        .map(|&metric| aggregator.refresh(observations, metric))
        .collect::<seo_forecast::error::Result<Vec<_>>>()?;
    let kpis = KpiBoard::from_forecasts(&forecasts, DEFAULT_KPI_WINDOW_DAYS)?;
    let opportunities = aggregator.rank_opportunities(keyword_stats)?;

    Ok(DashboardSnapshot {
        forecasts,
        kpis,
        opportunities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use seo_forecast::{ForecastError, Source};

    fn traffic(days: i64) -> Vec<MetricObservation> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..days)
            .map(|i| {
                MetricObservation::new(
                    start + Duration::days(i),
                    Source::SearchConsole,
                    Metric::Traffic,
                    1000.0 + i as f64,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_refresh_builds_every_panel() {
        let keywords = vec![
            ("k1", KeywordStats::new(8, 12000, 35.0)),
            ("k2", KeywordStats::new(1, 8000, 10.0)),
        ];
        let snapshot = refresh_dashboard(
            &ForecastAggregator::default(),
            &traffic(60),
            &[Metric::Traffic],
            keywords,
        )
        .unwrap();

        assert!(snapshot.forecast(Metric::Traffic).is_some());
        assert!(snapshot.kpis.get(Metric::Traffic).is_some());
        assert_eq!(snapshot.opportunities.iter().next().unwrap().keyword(), "k1");
    }

    #[test]
    fn test_refresh_reports_missing_metric() {
        let result = refresh_dashboard(
            &ForecastAggregator::default(),
            &traffic(60),
            &[Metric::Traffic, Metric::Revenue],
            Vec::<(String, KeywordStats)>::new(),
        );

        assert!(matches!(result, Err(ForecastError::EmptyInput(_))));
    }
}
