//! Chartify Fit Main Application
//! Main window with control panel and chart viewer.

use crate::charts::RenderOptions;
use crate::config::AppConfig;
use crate::data::DataLoader;
use crate::export::{ExportPackager, ExportReport};
use crate::gui::control_panel::StatusKind;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::session::{Session, SessionState};
use anyhow::Context;
use egui::SidePanel;

/// Main application window.
pub struct ChartifyApp {
    session: Session,
    control_panel: ControlPanel,
    packager: ExportPackager,
    config: AppConfig,
}

impl ChartifyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let packager = ExportPackager::new(RenderOptions {
            width: config.export.width,
            height: config.export.height,
            draw_labels: config.export.draw_labels,
        });

        Self {
            session: Session::new(DataLoader::new(config.infer_schema_rows)),
            control_panel: ControlPanel::new(),
            packager,
            config,
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return; // User cancelled
        };

        let result = self.session.upload(&path);
        self.control_panel.sync_dataset(self.session.dataset.as_ref());
        let loaded_name = self
            .session
            .dataset
            .as_ref()
            .map(|ds| ds.file_name())
            .unwrap_or_default();

        match result {
            Ok(()) if self.session.state() == SessionState::NoData => {
                self.control_panel
                    .set_status(StatusKind::Info, "No file loaded");
            }
            Ok(()) => {
                self.control_panel.set_status(
                    StatusKind::Success,
                    format!(
                        "Loaded {}: {} rows, {} columns",
                        loaded_name, self.control_panel.rows, self.control_panel.columns
                    ),
                );
            }
            Err(e) => {
                log::error!("Upload of {} failed: {e}", path.display());
                self.control_panel
                    .set_status(StatusKind::Error, format!("Error: {e}"));
            }
        }
    }

    fn handle_fit_model(&mut self) {
        match self.session.fit_model() {
            Ok(()) => {
                self.control_panel
                    .set_status(StatusKind::Success, "Model fitted");
            }
            Err(e) => {
                log::error!("Fit failed: {e}");
                self.control_panel
                    .set_status(StatusKind::Error, format!("Error: {e}"));
            }
        }
    }

    /// Handle chart export - ask for a destination, then write the archive
    fn handle_export_charts(&mut self) {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter("ZIP Archive", &["zip"])
            .set_file_name(ExportPackager::default_archive_name())
            .save_file()
        else {
            return; // User cancelled
        };

        match self.export_to(&dest) {
            Ok(report) => {
                self.control_panel.set_status(
                    StatusKind::Success,
                    format!(
                        "Exported {} chart(s) to {}",
                        report.entries.len(),
                        report.archive.display()
                    ),
                );
            }
            Err(e) => {
                log::error!("{e:#}");
                self.control_panel
                    .set_status(StatusKind::Error, format!("Export error: {e:#}"));
            }
        }
    }

    fn export_to(&self, dest: &std::path::Path) -> anyhow::Result<ExportReport> {
        let report = self
            .session
            .export(&self.packager, dest)
            .with_context(|| format!("writing {}", dest.display()))?;

        if self.config.export.open_after_export {
            if let Some(dir) = dest.parent() {
                open::that(dir).with_context(|| format!("opening {}", dir.display()))?;
            }
        }

        Ok(report)
    }
}

impl eframe::App for ChartifyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let state = self.session.state();
                    let can_export = self.session.scatter.is_some();
                    let action = self.control_panel.show(ui, state, can_export);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::FitModel => self.handle_fit_model(),
                        ControlPanelAction::ExportCharts => self.handle_export_charts(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            ChartViewer::show(ui, &self.session);
        });
    }
}
