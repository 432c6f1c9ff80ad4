use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, Points};

use crate::charts::price_histogram::{self, PriceComparison};
use crate::charts::scatter_matrix::{ColorScale, MatrixStatus, ScatterMatrix};
use crate::charts::type_histogram::{self, CategoryHistogram};
use crate::charts::BarRect;
use crate::color::{ColorMap, group_colors, with_opacity};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

pub fn error_label(ui: &mut Ui, msg: impl Into<String>) {
    ui.label(RichText::new(msg.into()).color(Color32::RED));
}

pub fn warning_label(ui: &mut Ui, msg: impl Into<String>) {
    let color = ui.visuals().warn_fg_color;
    ui.label(RichText::new(msg.into()).color(color));
}

fn bar_chart(name: &str, rects: &[BarRect], color: Color32) -> BarChart {
    let bars = rects
        .iter()
        .map(|r| Bar::new(r.center, r.height).width(r.width).name(name))
        .collect();
    BarChart::new(bars).name(name).color(color)
}

// ---------------------------------------------------------------------------
// Chart 1: vehicle types by manufacturer
// ---------------------------------------------------------------------------

pub fn type_histogram_chart(ui: &mut Ui, hist: &CategoryHistogram, config: &DashboardConfig) {
    ui.label(RichText::new(type_histogram::TITLE).strong());
    ui.label(format!(
        "{} listings; legend: {}",
        hist.total(),
        type_histogram::LEGEND_TITLE
    ));

    let colors = ColorMap::new(hist.series.iter().map(|s| s.name.as_str()));
    let bars = hist.grouped_bars(config.bar_gap);
    let categories = hist.categories.clone();

    Plot::new("type_by_manufacturer")
        .height(config.type_chart_height)
        .legend(Legend::default())
        .x_axis_label(type_histogram::X_LABEL)
        .y_axis_label("count")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&categories, mark.value)
        })
        .allow_scroll(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for (series, rects) in hist.series.iter().zip(&bars) {
                let color = colors.color_for(&series.name);
                plot_ui.bar_chart(bar_chart(&series.name, rects, color));
            }
        });
}

/// Category name for integer grid marks, blank elsewhere.
fn category_label(categories: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Chart 2: price distribution comparison
// ---------------------------------------------------------------------------

pub fn price_comparison_chart(ui: &mut Ui, chart: &PriceComparison, config: &DashboardConfig) {
    ui.label(RichText::new(price_histogram::TITLE).strong());
    let totals: Vec<String> = chart
        .series
        .iter()
        .map(|s| format!("{}: {} listings", s.name, s.total))
        .collect();
    ui.label(totals.join(", "));

    let colors = ColorMap::new(chart.series.iter().map(|s| s.name.as_str()));
    let bars = chart.bars();

    Plot::new("price_comparison")
        .height(config.price_chart_height)
        .legend(Legend::default())
        .x_axis_label(price_histogram::X_LABEL)
        .y_axis_label(chart.y_label())
        .allow_scroll(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for (series, rects) in chart.series.iter().zip(&bars) {
                let color = with_opacity(colors.color_for(&series.name), config.price_opacity);
                plot_ui.bar_chart(bar_chart(&series.name, rects, color));
            }
        });
}

// ---------------------------------------------------------------------------
// Chart 3: scatter plot matrix
// ---------------------------------------------------------------------------

pub fn scatter_matrix_chart(ui: &mut Ui, status: &MatrixStatus, config: &DashboardConfig) {
    match status {
        MatrixStatus::Error(msg) => error_label(ui, *msg),
        MatrixStatus::Warning(msg) => warning_label(ui, *msg),
        MatrixStatus::Ready(matrix) => matrix_grid(ui, matrix, config),
    }
}

fn matrix_grid(ui: &mut Ui, matrix: &ScatterMatrix, config: &DashboardConfig) {
    ui.label(RichText::new(matrix.title()).strong());

    let colors = group_colors(&matrix.groups);
    legend_row(ui, matrix, &colors);

    let n = matrix.dimensions.len();
    let spacing = ui.spacing().item_spacing;
    let cell_w = ((ui.available_width() - spacing.x * n as f32) / n as f32).max(60.0);
    let cell_h = ((config.matrix_height - spacing.y * n as f32) / n as f32).max(60.0);

    egui::Grid::new("scatter_matrix_grid")
        .spacing(spacing)
        .show(ui, |ui: &mut Ui| {
            for (r, row) in matrix.cells.iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    let Some(cell) = cell else {
                        // Diagonal: dimension name only.
                        ui.allocate_ui(egui::vec2(cell_w, cell_h), |ui: &mut Ui| {
                            ui.centered_and_justified(|ui: &mut Ui| {
                                ui.strong(&matrix.dimensions[r]);
                            });
                        });
                        continue;
                    };
                    let mut plot = Plot::new(("scatter_matrix", r, c))
                        .width(cell_w)
                        .height(cell_h)
                        .allow_scroll(false)
                        .show_grid(false);
                    if r + 1 == n {
                        plot = plot.x_axis_label(matrix.dimensions[cell.x_dim].as_str());
                    }
                    if c == 0 {
                        plot = plot.y_axis_label(matrix.dimensions[cell.y_dim].as_str());
                    }
                    plot.show(ui, |plot_ui| {
                        let groups = matrix.groups.iter().zip(&colors).zip(&cell.points);
                        for ((group, &color), points) in groups {
                            if points.is_empty() {
                                continue;
                            }
                            plot_ui.points(
                                Points::new(points.clone())
                                    .radius(2.0)
                                    .color(color)
                                    .name(&group.label),
                            );
                        }
                    });
                }
                ui.end_row();
            }
        });
}

fn legend_row(ui: &mut Ui, matrix: &ScatterMatrix, colors: &[Color32]) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        match matrix.scale {
            ColorScale::Continuous { min, max } => {
                ui.label(format!("{} ({min} to {max}):", matrix.color_column));
            }
            ColorScale::Discrete => {
                ui.label(format!("{}:", matrix.color_column));
            }
        }
        for (group, &color) in matrix.groups.iter().zip(colors) {
            ui.label(RichText::new(format!("● {}", group.label)).color(color));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_label_on_integer_marks_only() {
        let cats = vec!["toyota".to_string(), "ford".to_string()];
        assert_eq!(category_label(&cats, 0.0), "toyota");
        assert_eq!(category_label(&cats, 1.0), "ford");
        assert_eq!(category_label(&cats, 0.5), "");
        assert_eq!(category_label(&cats, 2.0), "");
        assert_eq!(category_label(&cats, -1.0), "");
    }
}
