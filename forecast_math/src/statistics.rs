//! Residual statistics and normal quantiles

use crate::{MathError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Arithmetic mean, or `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation of in-sample errors
///
/// The squared residuals are divided by `n - fitted_params`, floored at one,
/// so short windows still produce a finite value.
pub fn residual_std_dev(residuals: &[f64], fitted_params: usize) -> Result<f64> {
    if residuals.is_empty() {
        return Err(MathError::InsufficientData(
            "No residuals to measure".to_string(),
        ));
    }

    let dof = residuals.len().saturating_sub(fitted_params).max(1) as f64;
    let ss = residuals.iter().map(|r| r * r).sum::<f64>();
    let std_dev = (ss / dof).sqrt();

    if !std_dev.is_finite() {
        return Err(MathError::CalculationError(
            "Residual standard deviation is not finite".to_string(),
        ));
    }

    Ok(std_dev)
}

/// Two-sided standard normal quantile for a confidence level in (0, 1)
///
/// 0.95 gives roughly 1.96.
pub fn two_sided_z(confidence_level: f64) -> Result<f64> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Confidence level must be between 0 and 1, got {}",
            confidence_level
        )));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| MathError::CalculationError(format!("Standard normal: {}", e)))?;

    Ok(normal.inverse_cdf(0.5 + confidence_level / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_known_quantiles() {
        assert_abs_diff_eq!(two_sided_z(0.95).unwrap(), 1.959964, epsilon = 1e-4);
        assert_abs_diff_eq!(two_sided_z(0.99).unwrap(), 2.575829, epsilon = 1e-4);
        assert_abs_diff_eq!(two_sided_z(0.80).unwrap(), 1.281552, epsilon = 1e-4);
        assert!(two_sided_z(1.0).is_err());
        assert!(two_sided_z(f64::NAN).is_err());
    }

    #[test]
    fn test_residual_std_dev() {
        let residuals = [1.0, -1.0, 1.0, -1.0];
        // 4 / (4 - 2) = 2
        assert_abs_diff_eq!(
            residual_std_dev(&residuals, 2).unwrap(),
            2f64.sqrt(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(residual_std_dev(&[0.0; 5], 2).unwrap(), 0.0);
        assert!(residual_std_dev(&[], 2).is_err());
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }
}
