//! Chart Artifacts
//! Scatter and regression-overlay chart descriptions shared by the
//! on-screen plotter and the static PNG renderer.

use crate::data::{DataError, Dataset};
use crate::stats::FitResult;

/// Dark chart theme as plain RGB triples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    pub background: (u8, u8, u8),
    pub grid: (u8, u8, u8),
    pub text: (u8, u8, u8),
    pub marker: (u8, u8, u8),
    pub fit_line: (u8, u8, u8),
}

pub const DARK_THEME: ChartTheme = ChartTheme {
    background: (30, 30, 36),
    grid: (70, 70, 82),
    text: (220, 220, 225),
    marker: (0, 188, 212),   // Cyan
    fit_line: (243, 156, 18), // Orange
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Scatter,
    Overlay,
}

impl ChartKind {
    /// Image name inside the export archive.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::Scatter => "scatter.png",
            ChartKind::Overlay => "regression.png",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// One point per dataset row, row order.
    pub points: Vec<(f64, f64)>,
    /// Fitted values at every dataset x, row order.
    pub fit_line: Option<Vec<(f64, f64)>>,
    pub theme: ChartTheme,
}

impl ChartArtifact {
    /// Base scatter of column 1 (x) against column 2 (y).
    pub fn scatter(dataset: &Dataset) -> Result<Self, DataError> {
        let (x_label, y_label) = dataset.axis_names()?;
        let (x, y) = dataset.numeric_pair()?;

        Ok(Self {
            kind: ChartKind::Scatter,
            title: format!("{} vs {}", y_label, x_label),
            x_label,
            y_label,
            points: x.into_iter().zip(y).collect(),
            fit_line: None,
            theme: DARK_THEME,
        })
    }

    /// A fresh copy of `base` with the fitted line added. `base` is untouched.
    pub fn overlay(base: &ChartArtifact, fit: &FitResult) -> Self {
        let fit_line = base
            .points
            .iter()
            .map(|&(x, _)| (x, fit.predict(x)))
            .collect();

        Self {
            kind: ChartKind::Overlay,
            title: format!("{} (linear fit)", base.title),
            fit_line: Some(fit_line),
            ..base.clone()
        }
    }

    /// Fitted line sorted by x, for drawing.
    pub fn sorted_fit_line(&self) -> Option<Vec<(f64, f64)>> {
        self.fit_line.as_ref().map(|line| {
            let mut sorted = line.clone();
            sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            sorted
        })
    }

    /// Padded data bounds: `(x_min, x_max, y_min, y_max)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        let line = self.fit_line.iter().flatten();
        for &(x, y) in self.points.iter().chain(line) {
            if x.is_finite() && y.is_finite() {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }

        let (x_min, x_max) = Self::pad(x_min, x_max);
        let (y_min, y_max) = Self::pad(y_min, y_max);
        (x_min, x_max, y_min, y_max)
    }

    fn pad(min: f64, max: f64) -> (f64, f64) {
        if !min.is_finite() || !max.is_finite() {
            return (0.0, 1.0);
        }
        if max - min == 0.0 {
            return (min - 1.0, max + 1.0);
        }
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}
