//! Chart Viewer Widget
//! Central panel: data table, scatter chart, regression overlay and the
//! fit summary. Each section renders independently from session outputs.

use crate::charts::ChartPlotter;
use crate::data::TableView;
use crate::session::Session;
use egui::{RichText, ScrollArea};
use egui_extras::{Column, TableBuilder};

const CHART_HEIGHT: f32 = 320.0;
const TABLE_HEIGHT: f32 = 240.0;
const ROW_HEIGHT: f32 = 18.0;

pub struct ChartViewer;

impl ChartViewer {
    pub fn show(ui: &mut egui::Ui, session: &Session) {
        if session.table.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(table) = &session.table {
                    ui.label(RichText::new("Data").size(16.0).strong());
                    ui.add_space(4.0);
                    Self::draw_table(ui, table);
                    ui.add_space(12.0);
                }

                let half = (ui.available_width() - 12.0) / 2.0;
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(half);
                        ui.label(RichText::new("Scatter").size(16.0).strong());
                        match &session.scatter {
                            Some(chart) => {
                                ChartPlotter::draw_chart(ui, chart, "scatter_plot", CHART_HEIGHT)
                            }
                            None => ChartPlotter::draw_placeholder(
                                ui,
                                "Need two numeric columns",
                                CHART_HEIGHT,
                            ),
                        }
                    });

                    ui.add_space(12.0);

                    ui.vertical(|ui| {
                        ui.set_width(half);
                        ui.label(RichText::new("Regression").size(16.0).strong());
                        match &session.overlay {
                            Some(chart) => {
                                ChartPlotter::draw_chart(ui, chart, "overlay_plot", CHART_HEIGHT)
                            }
                            None => ChartPlotter::draw_placeholder(
                                ui,
                                "Press \"Fit Model\"",
                                CHART_HEIGHT,
                            ),
                        }
                    });
                });

                if let Some(summary) = &session.summary {
                    ui.add_space(12.0);
                    ui.label(RichText::new("Model Summary").size(16.0).strong());
                    egui::Frame::none()
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .rounding(5.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(summary).monospace().size(13.0));
                        });
                }
            });
    }

    fn draw_table(ui: &mut egui::Ui, table: &TableView) {
        ui.push_id("data_table", |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(TABLE_HEIGHT)
                .columns(Column::auto().at_least(60.0), table.column_count())
                .header(20.0, |mut header| {
                    for name in &table.headers {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.row_count(), |mut row| {
                        let cells = &table.rows[row.index()];
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
    }
}
