use chrono::{Duration, NaiveDate};
use seo_forecast::utils::{day_offset, future_dates};
use seo_forecast::ForecastError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_future_dates_start_the_next_day() {
    let dates = future_dates(date(2024, 2, 27), 4).unwrap();

    assert_eq!(
        dates,
        vec![
            date(2024, 2, 28),
            date(2024, 2, 29),
            date(2024, 3, 1),
            date(2024, 3, 2)
        ]
    );
    assert!(future_dates(date(2024, 1, 1), 0).unwrap().is_empty());
    assert_eq!(future_dates(date(2024, 1, 1), 365).unwrap().len(), 365);
}

#[test]
fn test_future_dates_past_the_calendar_end() {
    let near_end = NaiveDate::MAX - Duration::days(10);

    assert!(matches!(
        future_dates(near_end, 90),
        Err(ForecastError::InvalidParameter(_))
    ));
    assert_eq!(future_dates(near_end, 10).unwrap().last(), Some(&NaiveDate::MAX));
}

#[test]
fn test_day_offset() {
    let origin = date(2024, 1, 1);

    assert_eq!(day_offset(origin, origin), 0.0);
    assert_eq!(day_offset(origin, date(2024, 3, 1)), 60.0);
    assert_eq!(day_offset(origin, date(2023, 12, 31)), -1.0);
}
