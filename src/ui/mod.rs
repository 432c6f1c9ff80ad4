//! egui rendering: panels, charts and the raw-data table.

pub mod panels;
pub mod plot;
pub mod table;
