//! Forecast aggregation: normalization, projection and banding

use crate::config::{check_confidence_level, Configuration, ForecastHorizon};
use crate::data::{self, Metric, MetricObservation, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel, TrendSeasonal};
use crate::opportunities::{self, KeywordStats, RankedOpportunities};
use crate::utils::future_dates;
use forecast_math::statistics::two_sided_z;
use tracing::{debug, info};

/// Project a normalized history forward and band it
///
/// The band half-width on step `h` of `H` is
/// `z(confidence) * residual_std_dev * sqrt(1 + h / H)`, so it never narrows
/// further into the future.
pub fn project(
    history: &TimeSeries,
    horizon_days: u32,
    confidence_level: f64,
    gap_threshold_days: u32,
) -> Result<ForecastResult> {
    let horizon = ForecastHorizon::from_days(horizon_days)?;
    check_confidence_level(confidence_level)?;

    let last = history.last_date().ok_or_else(|| {
        ForecastError::EmptyInput(format!("History for {} is empty", history.metric()))
    })?;

    let observed = history.observed_count();
    if observed < 2 {
        return Err(ForecastError::InsufficientData(format!(
            "Need at least 2 observed days for {}, found {}",
            history.metric(),
            observed
        )));
    }

    if let Some((start, gap_days)) = history.longest_gap() {
        if gap_days > gap_threshold_days {
            return Err(ForecastError::DataGap {
                start,
                gap_days,
                threshold_days: gap_threshold_days,
            });
        }
    }

    let model = TrendSeasonal::new();
    let trained = model.train(history)?;
    let sigma = trained.residual_std_dev();
    let z = two_sided_z(confidence_level)?;

    let dates = future_dates(last, horizon.days())?;
    let points = trained.forecast(&dates);
    let total = horizon.days() as f64;

    let mut lower = Vec::with_capacity(points.len());
    let mut upper = Vec::with_capacity(points.len());
    for (step, &point) in points.iter().enumerate() {
        let fraction = (step + 1) as f64 / total;
        let half_width = z * sigma * (1.0 + fraction).sqrt();
        lower.push(Some(point - half_width));
        upper.push(Some(point + half_width));
    }

    let metric = history.metric();
    let first = dates[0];
    let projection =
        TimeSeries::from_values(metric, first, points.into_iter().map(Some).collect());
    let lower_bound = TimeSeries::from_values(metric, first, lower);
    let upper_bound = TimeSeries::from_values(metric, first, upper);

    let summary = trained.summary();
    info!(
        metric = %metric,
        model = model.name(),
        horizon_days = horizon.days(),
        confidence_level,
        slope = summary.slope,
        residual_std_dev = summary.residual_std_dev,
        "projected history"
    );

    ForecastResult::new(
        history.clone(),
        projection,
        lower_bound,
        upper_bound,
        confidence_level,
        horizon,
        summary,
    )
}

/// Stateless entry point combining normalization, projection and ranking
///
/// Holds only the configuration, so one aggregator can serve concurrent
/// callers.
#[derive(Debug, Clone, Default)]
pub struct ForecastAggregator {
    config: Configuration,
}

impl ForecastAggregator {
    /// Create an aggregator after validating `config`
    pub fn new(config: Configuration) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Reconcile observations for `metric` onto a daily series
    pub fn normalize<'a, I>(&self, observations: I, metric: Metric) -> Result<TimeSeries>
    where
        I: IntoIterator<Item = &'a MetricObservation>,
    {
        data::normalize(observations, metric)
    }

    /// Project `history` with the configured horizon, confidence and gap threshold
    pub fn project(&self, history: &TimeSeries) -> Result<ForecastResult> {
        project(
            history,
            self.config.horizon.days(),
            self.config.confidence_level,
            self.config.gap_threshold_days,
        )
    }

    /// Normalize then project; each call builds a fresh result
    pub fn refresh<'a, I>(&self, observations: I, metric: Metric) -> Result<ForecastResult>
    where
        I: IntoIterator<Item = &'a MetricObservation>,
    {
        let history = self.normalize(observations, metric)?;
        debug!(metric = %metric, days = history.len(), "refreshing forecast");
        self.project(&history)
    }

    /// Rank keywords by estimated value of further investment
    pub fn rank_opportunities<K, I>(&self, keyword_stats: I) -> Result<RankedOpportunities>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, KeywordStats)>,
    {
        opportunities::rank_opportunities(keyword_stats)
    }
}
