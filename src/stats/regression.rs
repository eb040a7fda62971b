//! Regression Engine
//! Ordinary least-squares fit of y on x with Pearson correlation.

use serde::Serialize;
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegressionError {
    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("Need at least 2 rows to fit a line, found {0}")]
    TooFewRows(usize),
    #[error("x has zero variance; slope is undefined")]
    ZeroVariance,
}

/// Result of one least-squares fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson r. NaN when y is constant.
    pub correlation: f64,
}

impl FitResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn r_squared(&self) -> f64 {
        self.correlation * self.correlation
    }
}

/// Fits `y = slope * x + intercept`.
pub struct LinearRegression;

impl LinearRegression {
    pub fn fit(x: &[f64], y: &[f64]) -> Result<FitResult, RegressionError> {
        if x.len() != y.len() {
            return Err(RegressionError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let n = x.len();
        if n < 2 {
            return Err(RegressionError::TooFewRows(n));
        }

        let var_x = x.iter().variance();
        if var_x.is_nan() || var_x <= 0.0 {
            return Err(RegressionError::ZeroVariance);
        }
        let var_y = y.iter().variance();
        let cov_xy = x.iter().covariance(y.iter());

        let slope = cov_xy / var_x;
        let intercept = y.iter().mean() - slope * x.iter().mean();
        let correlation = if var_y > 0.0 {
            // Rounding can push |r| a hair past 1
            (cov_xy / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
        } else {
            f64::NAN
        };

        Ok(FitResult {
            slope,
            intercept,
            correlation,
        })
    }
}
