use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{CellValue, ListingDataset};

const ROW_HEIGHT: f32 = 18.0;

/// Scrollable preview of the first `max_rows` listings.
pub fn preview_table(ui: &mut Ui, dataset: &ListingDataset, max_rows: usize) {
    let n_rows = dataset.len().min(max_rows);
    ui.label(format!("Showing {n_rows} of {} rows", dataset.len()));

    ui.push_id("raw_data_preview", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .max_scroll_height(320.0)
                .columns(TableColumn::auto().at_least(60.0), dataset.columns.len())
                .header(ROW_HEIGHT + 2.0, |mut header| {
                    for col in &dataset.columns {
                        header.col(|ui: &mut Ui| {
                            ui.strong(&col.name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, n_rows, |mut row| {
                        let idx = row.index();
                        for cell in &dataset.rows[idx] {
                            row.col(|ui: &mut Ui| {
                                match cell {
                                    CellValue::Null => ui.weak("NaN"),
                                    other => ui.label(other.to_string()),
                                };
                            });
                        }
                    });
                });
        });
    });
}
