//! Summary Formatter
//! Renders fit statistics as a plain text block.

use super::FitResult;

pub struct SummaryFormatter;

impl SummaryFormatter {
    pub fn format(fit: &FitResult, x_name: &str, y_name: &str) -> String {
        let (r, r2) = if fit.correlation.is_nan() {
            ("undefined".to_string(), "undefined".to_string())
        } else {
            (
                format!("{:.4}", fit.correlation),
                format!("{:.4}", fit.r_squared()),
            )
        };

        format!(
            "Linear model: {y} = slope * {x} + intercept\n\
             Slope:        {slope:.4}\n\
             Intercept:    {intercept:.4}\n\
             Correlation:  {r}\n\
             R-squared:    {r2}",
            x = x_name,
            y = y_name,
            slope = fit.slope,
            intercept = fit.intercept,
        )
    }
}
