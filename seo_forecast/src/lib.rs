//! # SEO Forecast
//!
//! Forecast aggregation for SEO dashboards: traffic, revenue and conversion
//! observations from Search Console and analytics exports are reconciled onto
//! a daily timeline, projected forward with a confidence band, and paired with
//! a ranked list of keyword opportunities.
//!
//! ## Features
//!
//! - Multi-source normalization (sum for additive metrics, mean for rates)
//! - Linear trend plus weekday seasonality, banded by residual spread
//! - Keyword opportunity scoring
//! - Flat CSV export and KPI summaries
//!
//! Every operation is a pure function of its inputs. Errors are returned
//! instead of substituting placeholder data.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use seo_forecast::{Configuration, ForecastAggregator, Metric, MetricObservation, Source};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let observations: Vec<MetricObservation> = (0..30)
//!     .map(|i| {
//!         MetricObservation::new(
//!             start + chrono::Duration::days(i),
//!             Source::SearchConsole,
//!             Metric::Traffic,
//!             1000.0 + i as f64,
//!         )
//!     })
//!     .collect::<Result<_, _>>()?;
//!
//! let aggregator = ForecastAggregator::new(Configuration::default())?;
//! let forecast = aggregator.refresh(&observations, Metric::Traffic)?;
//! assert_eq!(forecast.projection().len(), 90);
//! # Ok::<(), seo_forecast::ForecastError>(())
//! ```

pub mod aggregator;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod kpi;
pub mod metrics;
pub mod models;
pub mod opportunities;
pub mod utils;

// Re-export commonly used types
pub use crate::aggregator::{project, ForecastAggregator};
pub use crate::config::{Configuration, ForecastHorizon};
pub use crate::data::{
    normalize, DataLoader, DataPoint, LoadedObservations, Metric, MetricObservation, Source,
    TimeSeries,
};
pub use crate::error::ForecastError;
pub use crate::export::{ForecastRow, ForecastTable};
pub use crate::kpi::{KpiBoard, MetricKpi};
pub use crate::models::{FitSummary, ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::opportunities::{
    position_gain_factor, rank_opportunities, KeywordStats, Opportunity, RankedOpportunities,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
