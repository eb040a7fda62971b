//! Control Panel Widget
//! Left side panel with the upload, model and export controls.

use crate::data::Dataset;
use crate::session::SessionState;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Left side control panel with file selection and action buttons.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub rows: usize,
    pub columns: usize,
    pub status: String,
    pub status_kind: StatusKind,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            rows: 0,
            columns: 0,
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, kind: StatusKind, status: impl Into<String>) {
        self.status_kind = kind;
        self.status = status.into();
    }

    /// Mirror the dataset the session actually holds.
    pub fn sync_dataset(&mut self, dataset: Option<&Dataset>) {
        match dataset {
            Some(ds) => {
                self.csv_path = ds.source().map(|p| p.to_path_buf());
                self.rows = ds.row_count();
                self.columns = ds.column_count();
            }
            None => {
                self.csv_path = None;
                self.rows = 0;
                self.columns = 0;
            }
        }
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: SessionState,
        can_export: bool,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Chartify Fit")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Scatter & Linear Fit")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });

                if state != SessionState::NoData {
                    ui.label(
                        RichText::new(format!("{} rows × {} columns", self.rows, self.columns))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(state != SessionState::NoData, |ui| {
                let button = egui::Button::new(RichText::new("▶ Fit Model").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::FitModel;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(can_export, |ui| {
                let export_button =
                    egui::Button::new(RichText::new("📦 Export Charts").size(14.0))
                        .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });

            if state == SessionState::DataLoaded && can_export {
                ui.label(
                    RichText::new("Fit the model to include the regression chart")
                        .size(10.0)
                        .color(Color32::GRAY),
                );
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📋 Status").size(14.0).strong());
        ui.add_space(5.0);

        let status_color = match self.status_kind {
            StatusKind::Error => Color32::from_rgb(220, 53, 69),
            StatusKind::Success => Color32::from_rgb(40, 167, 69),
            StatusKind::Info => Color32::GRAY,
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    FitModel,
    ExportCharts,
}
