use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::charts::price_histogram::price_comparison;
use crate::charts::scatter_matrix::scatter_matrix;
use crate::charts::type_histogram::type_by_manufacturer;
use crate::state::AppState;
use crate::summary::DataSummary;
use crate::ui::{plot, table};

pub const PAGE_TITLE: &str = "🚗 US Vehicle Listings Analysis";

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} listings loaded from {}",
                ds.len(),
                state.data_path.display()
            ));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – dataset overview
// ---------------------------------------------------------------------------

/// Render the column overview of the loaded dataset.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Dataset");
    ui.separator();

    let Some(ds) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.label(format!("{} rows, {} columns", ds.len(), ds.columns.len()));
    ui.add_space(4.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in &ds.columns {
                let n_unique = ds.unique_values(&col.name).map_or(0, |v| v.len());
                egui::CollapsingHeader::new(RichText::new(&col.name).strong())
                    .id_salt(&col.name)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.label(format!("type: {:?}", col.kind));
                        ui.label(format!("unique values: {n_unique}"));
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – the dashboard page
// ---------------------------------------------------------------------------

/// Render the dashboard top to bottom against the current state.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new(PAGE_TITLE).size(28.0));
            ui.add_space(8.0);

            if let Some(msg) = &state.load_error {
                plot::error_label(ui, msg.clone());
                return;
            }
            let Some(ds) = state.dataset.clone() else {
                return;
            };
            let config = state.config.clone();

            // ---- Chart 1 ----
            ui.heading("📊 Distribution of Vehicle Types by Brand");
            match type_by_manufacturer(&ds) {
                Ok(hist) => plot::type_histogram_chart(ui, &hist, &config),
                Err(e) => plot::error_label(ui, e.to_string()),
            }
            ui.add_space(16.0);

            // ---- Chart 2 ----
            ui.heading("💰 Price Distribution Comparison");
            price_selectors(ui, state);
            match (&state.manufacturer1, &state.manufacturer2) {
                (Some(m1), Some(m2)) => match price_comparison(&ds, m1, m2, state.normalized) {
                    Ok(chart) => plot::price_comparison_chart(ui, &chart, &config),
                    Err(e) => plot::error_label(ui, e.to_string()),
                },
                _ => plot::warning_label(
                    ui,
                    "At least two manufacturers are needed for a comparison.",
                ),
            }
            ui.add_space(16.0);

            // ---- Chart 3 ----
            ui.heading("📈 Multi-dimensional Analysis");
            if ds.numeric_columns().len() >= crate::charts::scatter_matrix::MIN_NUMERIC_COLUMNS {
                matrix_selectors(ui, state);
            }
            let color_column = state.color_column.clone().unwrap_or_default();
            match scatter_matrix(&ds, &state.selected_dims, &color_column) {
                Ok(status) => plot::scatter_matrix_chart(ui, &status, &config),
                Err(e) => plot::error_label(ui, e.to_string()),
            }
            ui.add_space(16.0);

            // ---- Summary ----
            ui.heading("📝 Data Summary");
            match DataSummary::compute(&ds) {
                Ok(summary) => {
                    for line in summary.lines() {
                        ui.label(line);
                    }
                }
                Err(e) => plot::error_label(ui, e.to_string()),
            }
            ui.add_space(16.0);

            egui::CollapsingHeader::new("Raw data")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    table::preview_table(ui, &ds, config.preview_rows);
                });
        });
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

fn price_selectors(ui: &mut Ui, state: &mut AppState) {
    let first_options = state.manufacturer1_options();
    let second_options = state.manufacturer2_options();
    let current1 = state.manufacturer1.clone().unwrap_or_default();
    let current2 = state.manufacturer2.clone().unwrap_or_default();

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].label("Select First Manufacturer");
        egui::ComboBox::from_id_salt("manufacturer1")
            .selected_text(&current1)
            .width(cols[0].available_width())
            .show_ui(&mut cols[0], |ui: &mut Ui| {
                for m in &first_options {
                    if ui.selectable_label(current1 == *m, m).clicked() {
                        state.set_manufacturer1(m.clone());
                    }
                }
            });

        cols[1].label("Select Second Manufacturer");
        egui::ComboBox::from_id_salt("manufacturer2")
            .selected_text(&current2)
            .width(cols[1].available_width())
            .show_ui(&mut cols[1], |ui: &mut Ui| {
                for m in &second_options {
                    if ui.selectable_label(current2 == *m, m).clicked() {
                        state.set_manufacturer2(m.clone());
                    }
                }
            });
    });

    ui.checkbox(&mut state.normalized, "Show Normalized Distribution");
}

fn matrix_selectors(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = state.dataset.clone() else {
        return;
    };

    ui.label("Select dimensions for analysis (select 3-4 dimensions)");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for col in ds.numeric_columns() {
            let mut checked = state.selected_dims.contains(&col);
            if ui.checkbox(&mut checked, &col).changed() {
                state.toggle_dimension(&col);
            }
        }
    });

    let current = state.color_column.clone().unwrap_or_default();
    ui.label("Select color variable");
    egui::ComboBox::from_id_salt("color_variable")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for col in ds.column_names() {
                if ui.selectable_label(current == col, col).clicked() {
                    state.set_color_column(col.to_string());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open vehicle listings")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
