//! Refresh a dashboard from two sources and print what each panel would show
//!
//! Run with `RUST_LOG=debug` to see the aggregator's log output.

use chrono::{Duration, NaiveDate};
use seo_forecast_workspace::refresh_dashboard;
use seo_forecast_workspace::seo_forecast::{
    Configuration, ForecastAggregator, ForecastHorizon, ForecastTable, KeywordStats, Metric,
    MetricObservation, Source,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;
    let mut observations = Vec::new();

    for day in 0..120 {
        let date = start + Duration::days(day);
        // Weekends are quieter
        let weekly = if day % 7 >= 5 { -80.0 } else { 20.0 };
        let clicks = 900.0 + 2.5 * day as f64 + weekly;

        observations.push(MetricObservation::new(
            date,
            Source::SearchConsole,
            Metric::Traffic,
            clicks * 0.6,
        )?);
        observations.push(MetricObservation::new(
            date,
            Source::Analytics,
            Metric::Traffic,
            clicks * 0.4,
        )?);
        observations.push(MetricObservation::new(
            date,
            Source::Analytics,
            Metric::Revenue,
            clicks * 1.8,
        )?);
        observations.push(MetricObservation::new(
            date,
            Source::Analytics,
            Metric::Conversions,
            2.8 + 0.002 * day as f64,
        )?);
    }

    let keywords = vec![
        ("mot clé 1", KeywordStats::new(8, 12000, 35.0)),
        ("mot clé 2", KeywordStats::new(6, 8000, 42.0)),
        ("mot clé 3", KeywordStats::new(5, 6500, 28.0)),
    ];

    let config = Configuration::default()
        .with_horizon(ForecastHorizon::SixMonths)
        .with_confidence_level(0.9);
    let aggregator = ForecastAggregator::new(config)?;

    let snapshot = refresh_dashboard(
        &aggregator,
        &observations,
        &[Metric::Traffic, Metric::Revenue, Metric::Conversions],
        keywords,
    )?;
    info!(
        observations = observations.len(),
        forecasts = snapshot.forecasts.len(),
        opportunities = snapshot.opportunities.len(),
        "dashboard refreshed"
    );

    println!("KPIs");
    for kpi in &snapshot.kpis.kpis {
        let change = kpi
            .change_pct
            .map(|c| format!("{:+.1}%", c))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {:<12} current {:>12.2}  change {:>8}  forecast {:>12.2}",
            kpi.metric.to_string(),
            kpi.current,
            change,
            kpi.forecast
        );
    }

    println!("\nOpportunities");
    for opportunity in &snapshot.opportunities {
        println!(
            "  {:<10} pos {:>3}  vol {:>6}  diff {:>5.1}  potential {:>5.1}",
            opportunity.keyword(),
            opportunity.current_position(),
            opportunity.search_volume(),
            opportunity.difficulty(),
            opportunity.potential_score()
        );
    }

    if let Some(traffic) = snapshot.forecast(Metric::Traffic) {
        println!("\n{}", traffic.fit().accuracy);
        let csv = ForecastTable::from_result(traffic).to_csv_string()?;
        println!("First export lines:");
        for line in csv.lines().take(5) {
            println!("  {}", line);
        }
    }

    println!("\n{}", serde_json::to_string_pretty(&snapshot.opportunities)?);

    Ok(())
}
