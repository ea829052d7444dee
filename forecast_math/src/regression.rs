//! Ordinary least squares trend fitting
//!
//! The fit works on explicit `(x, y)` pairs so that series with missing days
//! keep their true spacing on the x axis.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Slope and intercept of a least squares line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
}

impl LinearFit {
    /// Fit a line through the given points by ordinary least squares
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MathError::InvalidInput(format!(
                "x length ({}) doesn't match y length ({})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(MathError::InsufficientData(
                "Need at least 2 points for linear regression".to_string(),
            ));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Regression input contains non-finite values".to_string(),
            ));
        }

        let n = xs.len() as f64;
        let x_mean = xs.iter().sum::<f64>() / n;
        let y_mean = ys.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (&x, &y) in xs.iter().zip(ys.iter()) {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        Ok(Self { slope, intercept })
    }

    /// Value of the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Coefficient of determination of this line over the given points
    pub fn r_squared(&self, xs: &[f64], ys: &[f64]) -> Result<f64> {
        if xs.len() != ys.len() || ys.is_empty() {
            return Err(MathError::InvalidInput(
                "x and y must have the same non-zero length".to_string(),
            ));
        }

        let y_mean = ys.iter().sum::<f64>() / ys.len() as f64;
        let mut ss_total = 0.0;
        let mut ss_residual = 0.0;

        for (&x, &y) in xs.iter().zip(ys.iter()) {
            ss_total += (y - y_mean).powi(2);
            ss_residual += (y - self.predict(x)).powi(2);
        }

        if ss_total.abs() < 1e-10 {
            return Err(MathError::CalculationError(
                "Cannot calculate R-squared: total sum of squares is too small".to_string(),
            ));
        }

        Ok(1.0 - (ss_residual / ss_total))
    }

    /// Residuals `y - predict(x)` for every point
    pub fn residuals(&self, xs: &[f64], ys: &[f64]) -> Vec<f64> {
        xs.iter()
            .zip(ys.iter())
            .map(|(&x, &y)| y - self.predict(x))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_perfect_line() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [10.0, 20.0, 30.0];
        let fit = LinearFit::fit(&xs, &ys).unwrap();

        assert_relative_eq!(fit.slope(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(fit.intercept(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(fit.predict(3.0), 40.0, epsilon = 1e-9);
        assert!(fit.r_squared(&xs, &ys).unwrap() > 0.999);
    }

    #[test]
    fn test_uneven_spacing() {
        // Same line sampled with a hole at x = 2
        let xs = [0.0, 1.0, 3.0, 4.0];
        let ys = [1.0, 3.0, 7.0, 9.0];
        let fit = LinearFit::fit(&xs, &ys).unwrap();

        assert_relative_eq!(fit.slope(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(fit.intercept(), 1.0, epsilon = 1e-9);
        assert!(fit.residuals(&xs, &ys).iter().all(|r| r.abs() < 1e-9));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            LinearFit::fit(&[1.0], &[1.0]),
            Err(MathError::InsufficientData(_))
        ));
        assert!(matches!(
            LinearFit::fit(&[1.0, 2.0], &[1.0]),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            LinearFit::fit(&[2.0, 2.0], &[1.0, 5.0]),
            Err(MathError::CalculationError(_))
        ));
        assert!(matches!(
            LinearFit::fit(&[0.0, 1.0], &[1.0, f64::NAN]),
            Err(MathError::InvalidInput(_))
        ));
    }
}
