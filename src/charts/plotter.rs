//! Chart Plotter Module
//! Draws chart artifacts interactively using egui_plot.

use crate::charts::ChartArtifact;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

pub fn color32(c: (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// Creates interactive scatter and fit-overlay plots.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw a chart inside a themed frame.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &ChartArtifact, id: &str, height: f32) {
        let theme = chart.theme;
        let text_color = color32(theme.text);

        egui::Frame::none()
            .fill(color32(theme.background))
            .rounding(6.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(&chart.title).size(14.0).strong().color(text_color));
                ui.add_space(4.0);

                let (x_min, x_max, y_min, y_max) = chart.bounds();

                Plot::new(id)
                    .height(height)
                    .show_background(false)
                    .legend(Legend::default())
                    .x_axis_label(chart.x_label.clone())
                    .y_axis_label(chart.y_label.clone())
                    .include_x(x_min)
                    .include_x(x_max)
                    .include_y(y_min)
                    .include_y(y_max)
                    .allow_scroll(false)
                    .show(ui, |plot_ui| {
                        let points: PlotPoints =
                            chart.points.iter().map(|&(x, y)| [x, y]).collect();
                        plot_ui.points(
                            Points::new(points)
                                .radius(3.5)
                                .color(color32(theme.marker))
                                .name(&chart.y_label),
                        );

                        if let Some(line) = chart.sorted_fit_line() {
                            let line_points: PlotPoints =
                                line.iter().map(|&(x, y)| [x, y]).collect();
                            plot_ui.line(
                                Line::new(line_points)
                                    .color(color32(theme.fit_line))
                                    .width(2.5)
                                    .name("Linear fit"),
                            );
                        }
                    });
            });
    }

    /// Placeholder shown while an output has nothing to render.
    pub fn draw_placeholder(ui: &mut egui::Ui, message: &str, height: f32) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(6.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_min_height(height);
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(message).size(14.0).color(Color32::GRAY));
                });
            });
    }
}
