//! Flat tabular rendering of a forecast for delimited-text download

use crate::error::{ForecastError, Result};
use crate::models::ForecastResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

/// One exported day; columns that don't apply are left empty
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub observed: Option<f64>,
    pub projected: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

/// History rows followed by projection rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastTable {
    rows: Vec<ForecastRow>,
}

impl ForecastTable {
    pub fn from_result(result: &ForecastResult) -> Self {
        let history = result.history().points().iter().map(|p| ForecastRow {
            date: p.date,
            observed: p.value,
            projected: None,
            lower: None,
            upper: None,
        });
        let future = result.bands().map(|(date, lower, projected, upper)| ForecastRow {
            date,
            observed: None,
            projected: Some(projected),
            lower: Some(lower),
            upper: Some(upper),
        });

        Self {
            rows: history.chain(future).collect(),
        }
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// Write a header line and one line per row
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| ForecastError::InvalidParameter(format!("Export is not UTF-8: {}", e)))
    }
}

impl From<&ForecastResult> for ForecastTable {
    fn from(result: &ForecastResult) -> Self {
        Self::from_result(result)
    }
}
