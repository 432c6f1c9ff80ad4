//! Chart models: the numbers behind each dashboard panel.
//!
//! Everything here is pure data derived from a [`ListingDataset`]; the `ui`
//! module turns these models into `egui_plot` items. Keeping the two apart
//! lets the binning, grouping and guard rails be tested without a window.
//!
//! [`ListingDataset`]: crate::data::model::ListingDataset

pub mod price_histogram;
pub mod scatter_matrix;
pub mod type_histogram;

use thiserror::Error;

use crate::data::model::ColumnError;

/// Failures that replace a single chart with an error message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error(transparent)]
    Column(#[from] ColumnError),
}

/// One rectangle of a bar chart, in plot coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub center: f64,
    pub width: f64,
    pub height: f64,
}
