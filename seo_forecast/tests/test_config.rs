use pretty_assertions::assert_eq;
use rstest::rstest;
use seo_forecast::config::{DEFAULT_CONFIDENCE, DEFAULT_GAP_THRESHOLD_DAYS};
use seo_forecast::{Configuration, ForecastError, ForecastHorizon};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_configuration() {
    let config = Configuration::default();

    assert_eq!(config.horizon, ForecastHorizon::ThreeMonths);
    assert_eq!(config.confidence_level, DEFAULT_CONFIDENCE);
    assert_eq!(config.gap_threshold_days, DEFAULT_GAP_THRESHOLD_DAYS);
    assert!(config.validate().is_ok());
}

#[test]
fn test_full_toml_document() {
    let config = Configuration::from_toml_str(
        "horizon_months = 12\nconfidence_level = 0.8\ngap_threshold_days = 7\n",
    )
    .unwrap();

    assert_eq!(
        config,
        Configuration::default()
            .with_horizon(ForecastHorizon::TwelveMonths)
            .with_confidence_level(0.8)
            .with_gap_threshold_days(7)
    );
}

#[test]
fn test_partial_toml_takes_defaults() {
    let config = Configuration::from_toml_str("horizon_months = 6\n").unwrap();

    assert_eq!(config.horizon, ForecastHorizon::SixMonths);
    assert_eq!(config.confidence_level, DEFAULT_CONFIDENCE);

    let empty = Configuration::from_toml_str("").unwrap();
    assert_eq!(empty, Configuration::default());
}

#[test]
fn test_unknown_horizon_fails_to_parse() {
    let result = Configuration::from_toml_str("horizon_months = 4\n");
    assert!(matches!(result, Err(ForecastError::Config(_))));
}

#[test]
fn test_out_of_range_confidence_fails_validation() {
    let result = Configuration::from_toml_str("confidence_level = 0.5\n");
    assert!(matches!(result, Err(ForecastError::InvalidConfiguration(_))));
}

#[test]
fn test_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "horizon_months = 3").unwrap();
    writeln!(file, "confidence_level = 0.99").unwrap();

    let config = Configuration::from_toml_file(file.path()).unwrap();
    assert_eq!(config.confidence_level, 0.99);

    let missing = Configuration::from_toml_file("no_such_config.toml");
    assert!(matches!(missing, Err(ForecastError::Io(_))));
}

#[rstest]
#[case(90, ForecastHorizon::ThreeMonths, 3)]
#[case(180, ForecastHorizon::SixMonths, 6)]
#[case(365, ForecastHorizon::TwelveMonths, 12)]
fn test_horizon_days_and_months(
    #[case] days: u32,
    #[case] horizon: ForecastHorizon,
    #[case] months: u32,
) {
    assert_eq!(ForecastHorizon::from_days(days).unwrap(), horizon);
    assert_eq!(horizon.days(), days);
    assert_eq!(u32::from(horizon), months);
    assert_eq!(ForecastHorizon::try_from(months).unwrap(), horizon);
}

#[test]
fn test_horizon_rejects_other_lengths() {
    assert!(matches!(
        ForecastHorizon::from_days(120),
        Err(ForecastError::InvalidConfiguration(_))
    ));
    assert!(ForecastHorizon::from_months(9).is_err());
}
