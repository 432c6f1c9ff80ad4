mod app;
mod charts;
mod color;
mod config;
mod data;
mod state;
mod summary;
mod ui;

use app::VehicleDashboardApp;
use config::{DashboardConfig, WINDOW_TITLE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(VehicleDashboardApp::new(config)))),
    )
}
