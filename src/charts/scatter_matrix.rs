use std::collections::BTreeMap;

use super::ChartError;
use crate::data::model::{CellValue, ColumnError, ListingDataset};

pub const NOT_ENOUGH_NUMERIC: &str =
    "Not enough numeric columns for scatter plot matrix analysis.";
pub const TOO_FEW_DIMENSIONS: &str =
    "Please select at least 2 dimensions for the scatter plot matrix.";

/// Numeric columns needed before the matrix is offered at all.
pub const MIN_NUMERIC_COLUMNS: usize = 3;
/// Dimensions needed before a matrix is drawn.
pub const MIN_DIMENSIONS: usize = 2;
/// Buckets used when colouring by a numeric column.
pub const CONTINUOUS_BUCKETS: usize = 10;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// First three numeric columns.
pub fn default_dimensions(dataset: &ListingDataset) -> Vec<String> {
    dataset
        .numeric_columns()
        .into_iter()
        .take(MIN_NUMERIC_COLUMNS)
        .collect()
}

/// `manufacturer` when present, otherwise the first column of the file.
pub fn default_color_column(dataset: &ListingDataset) -> Option<String> {
    if dataset.has_column("manufacturer") {
        Some("manufacturer".to_string())
    } else {
        dataset.columns.first().map(|c| c.name.clone())
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// How points are assigned to colour groups.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScale {
    /// One group per distinct value of a non-numeric column.
    Discrete,
    /// Numeric column split into equal-width buckets over `[min, max]`.
    Continuous { min: f64, max: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorGroup {
    pub label: String,
    /// Position on the colour scale in `[0, 1]` for continuous scales,
    /// `None` for discrete groups.
    pub position: Option<f64>,
}

/// One off-diagonal cell: `x` from the column dimension, `y` from the row
/// dimension. `points[g]` holds the points of colour group `g`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixCell {
    pub x_dim: usize,
    pub y_dim: usize,
    pub points: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterMatrix {
    pub dimensions: Vec<String>,
    pub color_column: String,
    pub scale: ColorScale,
    pub groups: Vec<ColorGroup>,
    /// `cells[row][col]`, `None` on the diagonal.
    pub cells: Vec<Vec<Option<MatrixCell>>>,
}

impl ScatterMatrix {
    pub fn title(&self) -> String {
        format!("Scatter Plot Matrix colored by {}", self.color_column)
    }
}

/// Outcome of the matrix panel: a chart, or the message shown instead.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixStatus {
    Ready(ScatterMatrix),
    Warning(&'static str),
    Error(&'static str),
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the all-pairs scatter matrix for `dimensions`, coloured by
/// `color_column`.
///
/// Guard rails come first: fewer than three numeric columns in the dataset is
/// an error, fewer than two selected dimensions a warning.
pub fn scatter_matrix(
    dataset: &ListingDataset,
    dimensions: &[String],
    color_column: &str,
) -> Result<MatrixStatus, ChartError> {
    if dataset.numeric_columns().len() < MIN_NUMERIC_COLUMNS {
        return Ok(MatrixStatus::Error(NOT_ENOUGH_NUMERIC));
    }
    if dimensions.len() < MIN_DIMENSIONS {
        return Ok(MatrixStatus::Warning(TOO_FEW_DIMENSIONS));
    }

    let dim_idx: Vec<usize> = dimensions
        .iter()
        .map(|d| {
            let col = dataset
                .column(d)
                .ok_or_else(|| ColumnError::Missing(d.clone()))?;
            if !col.kind.is_numeric() {
                return Err(ColumnError::NotNumeric(d.clone()));
            }
            dataset
                .column_index(d)
                .ok_or_else(|| ColumnError::Missing(d.clone()))
        })
        .collect::<Result<_, _>>()?;
    let color_idx = dataset
        .column_index(color_column)
        .ok_or_else(|| ColumnError::Missing(color_column.to_string()))?;
    let numeric_color = dataset.columns[color_idx].kind.is_numeric();

    let (scale, groups, row_group) = if numeric_color {
        continuous_groups(dataset, color_idx)
    } else {
        discrete_groups(dataset, color_idx)
    };

    let n = dimensions.len();
    let cells = (0..n)
        .map(|r| {
            (0..n)
                .map(|c| {
                    (r != c).then(|| {
                        let mut points = vec![Vec::new(); groups.len()];
                        for (row, group) in dataset.rows.iter().zip(&row_group) {
                            let (Some(g), Some(x), Some(y)) =
                                (*group, row[dim_idx[c]].as_f64(), row[dim_idx[r]].as_f64())
                            else {
                                continue;
                            };
                            points[g].push([x, y]);
                        }
                        MatrixCell {
                            x_dim: c,
                            y_dim: r,
                            points,
                        }
                    })
                })
                .collect()
        })
        .collect();

    Ok(MatrixStatus::Ready(ScatterMatrix {
        dimensions: dimensions.to_vec(),
        color_column: color_column.to_string(),
        scale,
        groups,
        cells,
    }))
}

type Grouping = (ColorScale, Vec<ColorGroup>, Vec<Option<usize>>);

fn discrete_groups(dataset: &ListingDataset, color_idx: usize) -> Grouping {
    let mut index: BTreeMap<&CellValue, usize> = BTreeMap::new();
    let mut groups = Vec::new();
    let row_group = dataset
        .rows
        .iter()
        .map(|row| {
            let value = &row[color_idx];
            let g = *index.entry(value).or_insert_with(|| {
                groups.push(ColorGroup {
                    label: value.to_string(),
                    position: None,
                });
                groups.len() - 1
            });
            Some(g)
        })
        .collect();
    (ColorScale::Discrete, groups, row_group)
}

fn continuous_groups(dataset: &ListingDataset, color_idx: usize) -> Grouping {
    let values: Vec<Option<f64>> = dataset
        .rows
        .iter()
        .map(|r| r[color_idx].as_f64())
        .collect();
    let (min, max) = values
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        // Column has no values; nothing to colour.
        return (
            ColorScale::Continuous { min: 0.0, max: 0.0 },
            Vec::new(),
            vec![None; values.len()],
        );
    }

    let span = max - min;
    let buckets = if span > 0.0 { CONTINUOUS_BUCKETS } else { 1 };
    let step = span / buckets as f64;
    let precision = bucket_precision(step);
    let groups = (0..buckets)
        .map(|b| {
            let lo = min + step * b as f64;
            let hi = lo + step;
            ColorGroup {
                label: if buckets == 1 {
                    format!("{min}")
                } else {
                    format!("{lo:.precision$} – {hi:.precision$}")
                },
                position: Some(if buckets == 1 {
                    0.5
                } else {
                    b as f64 / (buckets - 1) as f64
                }),
            }
        })
        .collect();
    let row_group = values
        .iter()
        .map(|v| {
            v.map(|v| {
                if span > 0.0 {
                    (((v - min) / step).floor() as usize).min(buckets - 1)
                } else {
                    0
                }
            })
        })
        .collect();
    (ColorScale::Continuous { min, max }, groups, row_group)
}

/// Decimals needed so neighbouring bucket edges `step` apart print
/// differently: one digit finer than the step's own magnitude.
fn bucket_precision(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 0;
    }
    (1.0 - step.log10().floor()).max(0.0) as usize
}
