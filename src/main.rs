//! Chartify Fit - CSV Scatter Viewer with Linear Regression Overlay
//!
//! Open a CSV file, view it as a table and a scatter plot of its first two
//! columns, fit a least-squares line on request, and export both charts.

mod charts;
mod config;
mod data;
mod export;
mod gui;
mod session;
mod stats;

use config::{AppConfig, CONFIG_FILE_NAME};
use eframe::egui;
use gui::ChartifyApp;
use std::path::Path;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE_NAME));

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title("Chartify Fit"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Chartify Fit",
        options,
        Box::new(|cc| Ok(Box::new(ChartifyApp::new(cc, config)))),
    )
}
