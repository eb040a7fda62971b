//! Stats module - Least-squares fit and its text summary

mod regression;
mod summary;

pub use regression::{FitResult, LinearRegression, RegressionError};
pub use summary::SummaryFormatter;
