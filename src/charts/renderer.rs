//! Static Chart Renderer
//! Rasterizes chart artifacts to PNG files with plotters.
//!
//! Layout: caption on top, mesh with axis descriptions, scatter markers,
//! and the fitted line (overlay charts only), all on the dark theme.

use crate::charts::{ChartArtifact, ChartTheme};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image size {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("Chart drawing failed: {0}")]
    Draw(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb(c: (u8, u8, u8)) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// PNG size and whether text is drawn.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub draw_labels: bool,
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart to a PNG file at `path`.
    pub fn render_png(
        chart: &ChartArtifact,
        path: &Path,
        options: RenderOptions,
    ) -> Result<(), RenderError> {
        if options.width == 0 || options.height == 0 {
            return Err(RenderError::InvalidSize(options.width, options.height));
        }

        let theme: ChartTheme = chart.theme;
        let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
        root.fill(&rgb(theme.background)).map_err(draw_err)?;

        let (x_min, x_max, y_min, y_max) = chart.bounds();
        let scale = options.width as f64 / 1000.0;

        let mut builder = ChartBuilder::on(&root);
        builder.margin((20.0 * scale) as u32);
        if options.draw_labels {
            builder
                .caption(
                    &chart.title,
                    ("sans-serif", 28.0 * scale)
                        .into_font()
                        .color(&rgb(theme.text)),
                )
                .x_label_area_size((50.0 * scale) as u32)
                .y_label_area_size((70.0 * scale) as u32);
        }

        let mut plot = builder
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_err)?;

        // Mesh labels need a font; skip the mesh entirely without labels
        if options.draw_labels {
            let label_font = ("sans-serif", 16.0 * scale)
                .into_font()
                .color(&rgb(theme.text));
            plot.configure_mesh()
                .x_desc(chart.x_label.as_str())
                .y_desc(chart.y_label.as_str())
                .axis_style(rgb(theme.text))
                .bold_line_style(rgb(theme.grid))
                .light_line_style(rgb(theme.grid).mix(0.3))
                .label_style(label_font.clone())
                .axis_desc_style(label_font)
                .draw()
                .map_err(draw_err)?;
        }

        let marker = rgb(theme.marker);
        let radius = ((5.0 * scale) as i32).max(2);
        plot.draw_series(
            chart
                .points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), radius, marker.mix(0.85).filled())),
        )
        .map_err(draw_err)?;

        if let Some(line) = chart.sorted_fit_line() {
            let stroke = ((3.0 * scale) as u32).max(1);
            plot.draw_series(LineSeries::new(
                line,
                rgb(theme.fit_line).stroke_width(stroke),
            ))
            .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }
}
