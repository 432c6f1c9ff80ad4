use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard defaults
// ---------------------------------------------------------------------------

/// File read at startup, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "./cleaned_vehicles_us.csv";

pub const WINDOW_TITLE: &str = "US Vehicle Listings Analysis";

/// Fixed layout and styling values for the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Chart heights in points: type histogram, price comparison, matrix.
    pub type_chart_height: f32,
    pub price_chart_height: f32,
    pub matrix_height: f32,
    /// Fraction of each category slot left empty between bar groups.
    pub bar_gap: f64,
    /// Opacity of the price-comparison bars.
    pub price_opacity: f32,
    /// Rows shown in the raw-data preview table.
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 600.0],
            type_chart_height: 500.0,
            price_chart_height: 500.0,
            matrix_height: 800.0,
            bar_gap: 0.1,
            price_opacity: 0.75,
            preview_rows: 100,
        }
    }
}
