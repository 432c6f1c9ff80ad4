use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct VehicleDashboardApp {
    pub state: AppState,
}

impl VehicleDashboardApp {
    /// Create the app and read the configured data file once.
    pub fn new(config: DashboardConfig) -> Self {
        let path = config.data_path.clone();
        let mut state = AppState::new(config);
        state.load(&path);
        Self { state }
    }
}

impl eframe::App for VehicleDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.reconcile();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset overview ----
        egui::SidePanel::left("dataset_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::dashboard(ui, &mut self.state);
        });
    }
}
