use chrono::{Duration, NaiveDate};
use pretty_assertions::assert_eq;
use rstest::rstest;
use seo_forecast::data::{
    normalize, DataLoader, DataPoint, Metric, MetricObservation, Source, TimeSeries,
};
use seo_forecast::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

fn day(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
}

fn obs(n: i64, source: Source, metric: Metric, value: f64) -> MetricObservation {
    MetricObservation::new(day(n), source, metric, value).unwrap()
}

#[test]
fn test_normalize_sums_additive_metrics_across_sources() {
    let observations = vec![
        obs(0, Source::SearchConsole, Metric::Traffic, 600.0),
        obs(0, Source::Analytics, Metric::Traffic, 400.0),
        obs(1, Source::SearchConsole, Metric::Traffic, 650.0),
        obs(1, Source::Analytics, Metric::Revenue, 99.0),
    ];

    let series = normalize(&observations, Metric::Traffic).unwrap();

    assert_eq!(series.metric(), Metric::Traffic);
    assert_eq!(series.values(), vec![Some(1000.0), Some(650.0)]);
}

#[test]
fn test_normalize_averages_rates() {
    let observations = vec![
        obs(0, Source::SearchConsole, Metric::Conversions, 2.0),
        obs(0, Source::Analytics, Metric::Conversions, 3.0),
        obs(1, Source::Analytics, Metric::Conversions, 2.8),
    ];

    let series = normalize(&observations, Metric::Conversions).unwrap();

    assert_eq!(series.values(), vec![Some(2.5), Some(2.8)]);
}

#[test]
fn test_normalize_sorts_and_marks_missing_days() {
    let observations = vec![
        obs(4, Source::Analytics, Metric::Revenue, 40.0),
        obs(0, Source::Analytics, Metric::Revenue, 10.0),
        obs(1, Source::Analytics, Metric::Revenue, 20.0),
    ];

    let series = normalize(&observations, Metric::Revenue).unwrap();

    assert_eq!(series.first_date(), Some(day(0)));
    assert_eq!(series.last_date(), Some(day(4)));
    assert_eq!(
        series.values(),
        vec![Some(10.0), Some(20.0), None, None, Some(40.0)]
    );
    assert_eq!(series.observed_count(), 3);
    assert_eq!(series.longest_gap(), Some((day(2), 2)));
    assert_eq!(series.value_on(day(4)), Some(40.0));
    assert_eq!(series.value_on(day(2)), None);
    assert_eq!(series.value_on(day(-1)), None);
}

#[test]
fn test_normalize_is_idempotent() {
    let observations = vec![
        obs(0, Source::SearchConsole, Metric::Traffic, 500.0),
        obs(0, Source::Analytics, Metric::Traffic, 300.0),
        obs(2, Source::SearchConsole, Metric::Traffic, 820.0),
        obs(3, Source::Analytics, Metric::Traffic, 810.0),
        obs(7, Source::Analytics, Metric::Traffic, 900.0),
    ];

    let once = normalize(&observations, Metric::Traffic).unwrap();
    let replayed = once.to_observations(Source::SearchConsole).unwrap();
    let twice = normalize(&replayed, Metric::Traffic).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_normalize_empty_input() {
    let result = normalize(&Vec::<MetricObservation>::new(), Metric::Traffic);
    assert!(matches!(result, Err(ForecastError::EmptyInput(_))));

    let other_metric = vec![obs(0, Source::Analytics, Metric::Revenue, 1.0)];
    let result = normalize(&other_metric, Metric::Traffic);
    assert!(matches!(result, Err(ForecastError::EmptyInput(_))));
}

#[test]
fn test_normalize_needs_two_distinct_dates() {
    let observations = vec![
        obs(0, Source::SearchConsole, Metric::Traffic, 1.0),
        obs(0, Source::Analytics, Metric::Traffic, 2.0),
    ];

    let result = normalize(&observations, Metric::Traffic);
    assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
}

#[rstest]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn test_observation_rejects_invalid_values(#[case] value: f64) {
    let result = MetricObservation::new(day(0), Source::Analytics, Metric::Traffic, value);
    assert!(matches!(result, Err(ForecastError::InvalidObservation(_))));
}

#[rstest]
#[case("gsc", Source::SearchConsole)]
#[case("Search_Console", Source::SearchConsole)]
#[case("ga4", Source::Analytics)]
#[case("analytics", Source::Analytics)]
fn test_source_parsing(#[case] raw: &str, #[case] expected: Source) {
    assert_eq!(raw.parse::<Source>().unwrap(), expected);
}

#[test]
fn test_metric_parsing() {
    assert_eq!("traffic".parse::<Metric>().unwrap(), Metric::Traffic);
    assert_eq!("Revenue".parse::<Metric>().unwrap(), Metric::Revenue);
    assert_eq!("conversion_rate".parse::<Metric>().unwrap(), Metric::Conversions);
    assert!("bounce".parse::<Metric>().is_err());
}

#[test]
fn test_series_from_points_requires_consecutive_days() {
    let points = vec![
        DataPoint {
            date: day(0),
            value: Some(1.0),
        },
        DataPoint {
            date: day(2),
            value: Some(2.0),
        },
    ];

    assert!(TimeSeries::from_points(Metric::Traffic, points).is_err());

    let points = vec![
        DataPoint {
            date: day(0),
            value: Some(1.0),
        },
        DataPoint {
            date: day(1),
            value: None,
        },
    ];
    let series = TimeSeries::from_points(Metric::Traffic, points).unwrap();
    assert_eq!(series.len(), 2);
}

#[test]
fn test_data_loader_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,source,metric,value").unwrap();
    writeln!(file, "2024-01-01,gsc,traffic,600").unwrap();
    writeln!(file, "2024-01-01,ga4,traffic,400").unwrap();
    writeln!(file, "2024-01-02,ga4,revenue,1250.5").unwrap();
    writeln!(file, "01/03/2024,gsc,traffic,700").unwrap();
    writeln!(file, "2024-01-03,gsc,traffic,-5").unwrap();
    writeln!(file, "2024-01-03,gsc,bounce,0.4").unwrap();
    writeln!(file, "2024-01-03,facebook,traffic,10").unwrap();
    writeln!(file, "2024-01-04,gsc,traffic,").unwrap();

    let loaded = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(loaded.observations.len(), 3);
    assert_eq!(loaded.dropped, 5);
    assert_eq!(loaded.observations[2].metric(), Metric::Revenue);
    assert_eq!(loaded.observations[2].value(), 1250.5);
}

#[test]
fn test_data_loader_reorders_columns_by_header() {
    let csv = "metric,value,date,source\ntraffic,10,2024-02-01,analytics\n";
    let loaded = DataLoader::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(loaded.dropped, 0);
    assert_eq!(loaded.observations[0].date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(loaded.observations[0].source(), Source::Analytics);
}

#[test]
fn test_data_loader_error_handling() {
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::Io(_))));

    let csv = "date,metric,value\n2024-01-01,traffic,1\n";
    let result = DataLoader::from_reader(csv.as_bytes());
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}
