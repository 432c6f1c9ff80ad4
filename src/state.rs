use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::charts::scatter_matrix::{default_color_column, default_dimensions};
use crate::config::DashboardConfig;
use crate::data::cache::DatasetCache;
use crate::data::filter::{manufacturer_options, second_manufacturer_options};
use crate::data::model::ListingDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Datasets already read from disk, keyed by path.
    cache: DatasetCache,

    /// File the current dataset came from (or failed to come from).
    pub data_path: PathBuf,

    /// Loaded dataset (None when the last load failed).
    pub dataset: Option<Arc<ListingDataset>>,

    /// User-facing load error; set means every chart is suppressed.
    pub load_error: Option<String>,

    /// Price comparison selections.
    pub manufacturer1: Option<String>,
    pub manufacturer2: Option<String>,
    pub normalized: bool,

    /// Scatter matrix selections.
    pub selected_dims: Vec<String>,
    pub color_column: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            data_path: config.data_path.clone(),
            config,
            cache: DatasetCache::default(),
            dataset: None,
            load_error: None,
            manufacturer1: None,
            manufacturer2: None,
            normalized: true,
            selected_dims: Vec::new(),
            color_column: None,
        }
    }

    /// Load `path` through the cache and reset every selection.
    ///
    /// On failure the dataset is cleared and the message stored for display.
    pub fn load(&mut self, path: &Path) {
        self.data_path = path.to_path_buf();
        if !self.cache.contains(path) {
            log::info!("Reading {}", path.display());
        }
        match self.cache.get_or_load(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.dataset = None;
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Read the current file again, bypassing the cache.
    pub fn reload(&mut self) {
        let path = self.data_path.clone();
        self.cache.invalidate(&path);
        self.load(&path);
    }

    /// Ingest a newly loaded dataset and reset widgets to their defaults.
    pub fn set_dataset(&mut self, dataset: Arc<ListingDataset>) {
        self.manufacturer1 = None;
        self.manufacturer2 = None;
        self.normalized = true;
        self.selected_dims = default_dimensions(&dataset);
        self.color_column = default_color_column(&dataset);
        self.dataset = Some(dataset);
        self.load_error = None;
        self.reconcile();
    }

    /// Bring every selection back in line with the options the current
    /// dataset offers. Runs each frame before rendering.
    pub fn reconcile(&mut self) {
        let Some(ds) = self.dataset.clone() else {
            return;
        };

        // Without a manufacturer column the price chart reports the error.
        if let Ok(options) = manufacturer_options(&ds) {
            if !self
                .manufacturer1
                .as_ref()
                .is_some_and(|m| options.contains(m))
            {
                self.manufacturer1 = options.first().cloned();
            }
            let first = self.manufacturer1.clone().unwrap_or_default();
            let second_options = second_manufacturer_options(&options, &first);
            if !self
                .manufacturer2
                .as_ref()
                .is_some_and(|m| second_options.contains(m))
            {
                self.manufacturer2 = second_options.first().cloned();
            }
        }

        let numeric = ds.numeric_columns();
        self.selected_dims.retain(|d| numeric.contains(d));

        if !self
            .color_column
            .as_deref()
            .is_some_and(|c| ds.has_column(c))
        {
            self.color_column = default_color_column(&ds);
        }
    }

    /// Options for the first manufacturer selector.
    pub fn manufacturer1_options(&self) -> Vec<String> {
        self.dataset
            .as_deref()
            .and_then(|ds| manufacturer_options(ds).ok())
            .unwrap_or_default()
    }

    /// Options for the second selector; never includes the first selection.
    pub fn manufacturer2_options(&self) -> Vec<String> {
        let first = self.manufacturer1.as_deref().unwrap_or_default();
        second_manufacturer_options(&self.manufacturer1_options(), first)
    }

    pub fn set_manufacturer1(&mut self, manufacturer: String) {
        log::debug!("First manufacturer set to {manufacturer}");
        self.manufacturer1 = Some(manufacturer);
        self.reconcile();
    }

    pub fn set_manufacturer2(&mut self, manufacturer: String) {
        log::debug!("Second manufacturer set to {manufacturer}");
        self.manufacturer2 = Some(manufacturer);
        self.reconcile();
    }

    /// Add or remove a scatter-matrix dimension, keeping column order.
    pub fn toggle_dimension(&mut self, column: &str) {
        if let Some(pos) = self.selected_dims.iter().position(|d| d == column) {
            self.selected_dims.remove(pos);
        } else if let Some(ds) = &self.dataset {
            let mut dims: Vec<String> = ds
                .numeric_columns()
                .into_iter()
                .filter(|c| c == column || self.selected_dims.contains(c))
                .collect();
            // Unknown selections keep their place at the end.
            let unknown: Vec<String> = self
                .selected_dims
                .iter()
                .filter(|d| !dims.contains(d))
                .cloned()
                .collect();
            dims.extend(unknown);
            self.selected_dims = dims;
        }
        log::debug!("Scatter dimensions: {:?}", self.selected_dims);
    }

    pub fn set_color_column(&mut self, column: String) {
        log::debug!("Scatter colour column set to {column}");
        self.color_column = Some(column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;
    use std::io::Write;

    fn state_with_sample() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Arc::new(sample_dataset()));
        state
    }

    #[test]
    fn test_defaults_after_load() {
        let state = state_with_sample();

        assert_eq!(state.manufacturer1.as_deref(), Some("ford"));
        assert_eq!(state.manufacturer2.as_deref(), Some("toyota"));
        assert!(state.normalized);
        assert_eq!(state.selected_dims, vec!["price", "odometer", "model_year"]);
        assert_eq!(state.color_column.as_deref(), Some("manufacturer"));
    }

    #[test]
    fn test_second_selector_follows_first() {
        let mut state = state_with_sample();

        state.set_manufacturer1("toyota".into());

        assert_eq!(state.manufacturer2_options(), vec!["ford"]);
        assert_eq!(state.manufacturer2.as_deref(), Some("ford"));
        assert!(!state.manufacturer2_options().contains(&"toyota".to_string()));
    }

    #[test]
    fn test_invalid_second_selection_is_replaced() {
        let mut state = state_with_sample();

        state.set_manufacturer2("ford".into());

        assert_eq!(state.manufacturer1.as_deref(), Some("ford"));
        assert_eq!(state.manufacturer2.as_deref(), Some("toyota"));
    }

    #[test]
    fn test_toggle_dimension_keeps_column_order() {
        let mut state = state_with_sample();

        state.toggle_dimension("odometer");
        assert_eq!(state.selected_dims, vec!["price", "model_year"]);
        state.toggle_dimension("odometer");
        assert_eq!(state.selected_dims, vec!["price", "odometer", "model_year"]);
    }

    #[test]
    fn test_missing_file_suppresses_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with_sample();

        state.load(&dir.path().join("cleaned_vehicles_us.csv"));

        assert!(state.dataset.is_none());
        assert_eq!(
            state.load_error.as_deref(),
            Some("Data file not found. Please ensure 'cleaned_vehicles_us.csv' is in the correct directory.")
        );
    }

    #[test]
    fn test_ford_toyota_comparison_end_to_end() {
        use crate::charts::price_histogram::{BarMode, price_comparison};
        use crate::summary::DataSummary;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"price,type,manufacturer\n1000,sedan,toyota\n2000,SUV,toyota\n3000,truck,ford\n4000,truck,ford\n",
        )
        .unwrap();
        let mut state = AppState::default();
        state.load(file.path());

        state.set_manufacturer1("ford".into());
        state.set_manufacturer2("toyota".into());
        state.normalized = true;

        let ds = state.dataset.clone().unwrap();
        let chart = price_comparison(
            &ds,
            state.manufacturer1.as_deref().unwrap(),
            state.manufacturer2.as_deref().unwrap(),
            state.normalized,
        )
        .unwrap();
        assert_eq!(chart.bar_mode, BarMode::Overlay);
        assert_eq!(chart.y_label(), "Percentage");
        for series in &chart.series {
            let sum: f64 = series.heights.iter().sum();
            assert!((sum - 100.0).abs() < 1e-9);
        }

        let lines = DataSummary::compute(&ds).unwrap().lines();
        assert_eq!(lines[0], "Total number of vehicles: 4");
        assert_eq!(lines[1], "Number of manufacturers: 2");
    }

    #[test]
    fn test_reload_rereads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"price,type,manufacturer\n100,sedan,ford\n").unwrap();
        let mut state = AppState::default();

        state.load(file.path());
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(1));

        file.write_all(b"250,SUV,bmw\n").unwrap();
        state.reload();
        assert_eq!(state.dataset.as_ref().map(|d| d.len()), Some(2));
        assert_eq!(state.manufacturer2.as_deref(), Some("ford"));
    }
}
