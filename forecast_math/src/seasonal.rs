//! Day-of-week seasonal component

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Number of slots in a weekly cycle
pub const DAYS_PER_WEEK: usize = 7;

/// Mean detrended value for each day of the week, Monday first
///
/// A weekday that never appears in the fitted window contributes zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeekdayProfile {
    offsets: [f64; DAYS_PER_WEEK],
}

impl WeekdayProfile {
    /// A profile with no seasonal effect
    pub fn flat() -> Self {
        Self {
            offsets: [0.0; DAYS_PER_WEEK],
        }
    }

    /// Average `residuals` per weekday slot
    ///
    /// `weekdays[i]` is the slot (0 = Monday) of `residuals[i]`.
    pub fn from_residuals(weekdays: &[usize], residuals: &[f64]) -> Result<Self> {
        if weekdays.len() != residuals.len() {
            return Err(MathError::InvalidInput(format!(
                "Weekday length ({}) doesn't match residual length ({})",
                weekdays.len(),
                residuals.len()
            )));
        }

        let mut sums = [0.0; DAYS_PER_WEEK];
        let mut counts = [0usize; DAYS_PER_WEEK];

        for (&slot, &residual) in weekdays.iter().zip(residuals.iter()) {
            if slot >= DAYS_PER_WEEK {
                return Err(MathError::InvalidInput(format!(
                    "Weekday slot {} is out of range",
                    slot
                )));
            }
            sums[slot] += residual;
            counts[slot] += 1;
        }

        let mut offsets = [0.0; DAYS_PER_WEEK];
        for slot in 0..DAYS_PER_WEEK {
            if counts[slot] > 0 {
                offsets[slot] = sums[slot] / counts[slot] as f64;
            }
        }

        Ok(Self { offsets })
    }

    /// Seasonal offset for a weekday slot; slots wrap modulo seven
    pub fn offset(&self, weekday: usize) -> f64 {
        self.offsets[weekday % DAYS_PER_WEEK]
    }

    pub fn offsets(&self) -> &[f64; DAYS_PER_WEEK] {
        &self.offsets
    }
}

impl Default for WeekdayProfile {
    fn default() -> Self {
        Self::flat()
    }
}
