//! Metric observations and normalized daily series

use crate::error::{ForecastError, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Where an observation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Google Search Console
    SearchConsole,
    /// Web analytics (GA4)
    Analytics,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::SearchConsole => write!(f, "search_console"),
            Source::Analytics => write!(f, "analytics"),
        }
    }
}

impl FromStr for Source {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "search_console" | "searchconsole" | "gsc" => Ok(Source::SearchConsole),
            "analytics" | "google_analytics" | "ga4" => Ok(Source::Analytics),
            other => Err(ForecastError::InvalidObservation(format!(
                "Unknown source '{}'",
                other
            ))),
        }
    }
}

/// Measured quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Organic sessions or clicks
    Traffic,
    /// Revenue attributed to organic search
    Revenue,
    /// Conversion rate
    Conversions,
}

impl Metric {
    /// Additive metrics are summed across sources; rates are averaged
    pub fn is_additive(self) -> bool {
        match self {
            Metric::Traffic | Metric::Revenue => true,
            Metric::Conversions => false,
        }
    }

    /// Combine several same-day values according to the metric kind
    pub fn combine(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let sum = values.iter().sum::<f64>();
        if self.is_additive() {
            Some(sum)
        } else {
            Some(sum / values.len() as f64)
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Traffic => write!(f, "traffic"),
            Metric::Revenue => write!(f, "revenue"),
            Metric::Conversions => write!(f, "conversions"),
        }
    }
}

impl FromStr for Metric {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "traffic" => Ok(Metric::Traffic),
            "revenue" => Ok(Metric::Revenue),
            "conversions" | "conversion" | "conversion_rate" => Ok(Metric::Conversions),
            other => Err(ForecastError::InvalidObservation(format!(
                "Unknown metric '{}'",
                other
            ))),
        }
    }
}

/// A single measured value for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricObservation {
    date: NaiveDate,
    source: Source,
    metric: Metric,
    value: f64,
}

impl MetricObservation {
    /// Create an observation; the value must be finite and non-negative
    pub fn new(date: NaiveDate, source: Source, metric: Metric, value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(ForecastError::InvalidObservation(format!(
                "Value for {} on {} must be a non-negative number, got {}",
                metric, date, value
            )));
        }

        Ok(Self {
            date,
            source,
            metric,
            value,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// One day of a series; `None` marks a day with no data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Contiguous daily series for one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    metric: Metric,
    points: Vec<DataPoint>,
}

impl TimeSeries {
    /// Build a series from points that cover consecutive days
    pub fn from_points(metric: Metric, points: Vec<DataPoint>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[1].date != pair[0].date + Duration::days(1) {
                return Err(ForecastError::InvalidParameter(format!(
                    "Series dates must be consecutive days, found {} after {}",
                    pair[1].date, pair[0].date
                )));
            }
        }

        Ok(Self { metric, points })
    }

    /// Build a series of consecutive days starting at `start`
    pub fn from_values(metric: Metric, start: NaiveDate, values: Vec<Option<f64>>) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| DataPoint {
                date: start + Duration::days(i as i64),
                value,
            })
            .collect();

        Self { metric, points }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Values in date order, including the no-data markers
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Days that carry a value
    pub fn observed(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.value.map(|v| (p.date, v)))
    }

    pub fn observed_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    /// Value recorded for `date`, if the date is in range and observed
    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        let first = self.first_date()?;
        let offset = (date - first).num_days();
        if offset < 0 {
            return None;
        }
        self.points.get(offset as usize).and_then(|p| p.value)
    }

    /// Start date and length of the longest run of missing days
    pub fn longest_gap(&self) -> Option<(NaiveDate, u32)> {
        let mut longest: Option<(NaiveDate, u32)> = None;
        let mut current: Option<(NaiveDate, u32)> = None;

        for point in &self.points {
            if point.value.is_none() {
                current = match current {
                    Some((start, len)) => Some((start, len + 1)),
                    None => Some((point.date, 1)),
                };
                if let Some(run) = current {
                    if longest.map_or(true, |(_, len)| run.1 > len) {
                        longest = Some(run);
                    }
                }
            } else {
                current = None;
            }
        }

        longest
    }

    /// Turn observed days back into observations tagged with `source`
    pub fn to_observations(&self, source: Source) -> Result<Vec<MetricObservation>> {
        self.observed()
            .map(|(date, value)| MetricObservation::new(date, source, self.metric, value))
            .collect()
    }
}

/// Reconcile observations for one metric onto a contiguous daily timeline
///
/// Same-day values are summed for additive metrics and averaged for rates.
/// Interior days without any observation are marked as missing.
pub fn normalize<'a, I>(observations: I, metric: Metric) -> Result<TimeSeries>
where
    I: IntoIterator<Item = &'a MetricObservation>,
{
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for observation in observations {
        if observation.metric() == metric {
            by_date
                .entry(observation.date())
                .or_default()
                .push(observation.value());
        }
    }

    if by_date.is_empty() {
        return Err(ForecastError::EmptyInput(format!(
            "No observations for metric {}",
            metric
        )));
    }
    if by_date.len() < 2 {
        return Err(ForecastError::InsufficientData(format!(
            "Need at least 2 distinct dates for {}, found {}",
            metric,
            by_date.len()
        )));
    }

    let (first, last) = match (by_date.keys().next(), by_date.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            return Err(ForecastError::EmptyInput(format!(
                "No observations for metric {}",
                metric
            )))
        }
    };

    let span = (last - first).num_days() as usize + 1;
    let mut values = Vec::with_capacity(span);
    for offset in 0..span {
        let date = first + Duration::days(offset as i64);
        values.push(by_date.get(&date).and_then(|v| metric.combine(v)));
    }

    let series = TimeSeries::from_values(metric, first, values);
    debug!(
        metric = %metric,
        first = %first,
        last = %last,
        observed_days = by_date.len(),
        missing_days = span - by_date.len(),
        "normalized observations"
    );

    Ok(series)
}

/// Weekday slot (0 = Monday) of a date
pub(crate) fn weekday_slot(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Observations read by a loader, with the number of rows it rejected
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedObservations {
    pub observations: Vec<MetricObservation>,
    pub dropped: usize,
}

/// Loader for the canonical `date,source,metric,value` row layout
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load observations from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<LoadedObservations> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load observations from any CSV source with a header row
    ///
    /// Rows that cannot be turned into a valid observation are skipped and
    /// counted in `dropped`.
    pub fn from_reader<R: Read>(reader: R) -> Result<LoadedObservations> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    ForecastError::InvalidParameter(format!(
                        "Missing required column '{}'",
                        name
                    ))
                })
        };
        let date_idx = column("date")?;
        let source_idx = column("source")?;
        let metric_idx = column("metric")?;
        let value_idx = column("value")?;

        let mut observations = Vec::new();
        let mut dropped = 0;

        for (row, record) in csv_reader.records().enumerate() {
            let parsed = record.map_err(ForecastError::from).and_then(|record| {
                let field = |idx: usize| record.get(idx).unwrap_or("");
                let date = NaiveDate::parse_from_str(field(date_idx), "%Y-%m-%d").map_err(
                    |e| ForecastError::InvalidObservation(format!("Bad date: {}", e)),
                )?;
                let source = field(source_idx).parse::<Source>()?;
                let metric = field(metric_idx).parse::<Metric>()?;
                let value = field(value_idx).parse::<f64>().map_err(|e| {
                    ForecastError::InvalidObservation(format!("Bad value: {}", e))
                })?;
                MetricObservation::new(date, source, metric, value)
            });

            match parsed {
                Ok(observation) => observations.push(observation),
                Err(e) => {
                    debug!(row = row + 1, error = %e, "dropping malformed row");
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            warn!(dropped, "dropped malformed observation rows");
        }
        info!(loaded = observations.len(), dropped, "loaded observations");

        Ok(LoadedObservations {
            observations,
            dropped,
        })
    }
}
