use std::collections::HashMap;

use super::{BarRect, ChartError};
use crate::data::model::{CellValue, ColumnError, ListingDataset};

pub const TITLE: &str = "Vehicle Types Distribution by Manufacturer";
pub const X_LABEL: &str = "Manufacturer";
pub const LEGEND_TITLE: &str = "Vehicle Type";

// ---------------------------------------------------------------------------
// Categorical histogram: listings per (manufacturer, type)
// ---------------------------------------------------------------------------

/// Count of one vehicle type per manufacturer, aligned with
/// [`CategoryHistogram::categories`].
#[derive(Debug, Clone, PartialEq)]
pub struct CountSeries {
    pub name: String,
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryHistogram {
    /// Manufacturers, in order of first appearance.
    pub categories: Vec<String>,
    /// One series per vehicle type, in order of first appearance.
    pub series: Vec<CountSeries>,
}

/// Count listings by manufacturer (x) and type (series).
///
/// Rows missing either value are left out.
pub fn type_by_manufacturer(dataset: &ListingDataset) -> Result<CategoryHistogram, ChartError> {
    let mfr_idx = column_idx(dataset, "manufacturer")?;
    let type_idx = column_idx(dataset, "type")?;

    let mut categories: Vec<String> = Vec::new();
    let mut category_pos: HashMap<String, usize> = HashMap::new();
    let mut series: Vec<CountSeries> = Vec::new();
    let mut series_pos: HashMap<String, usize> = HashMap::new();
    let mut cells: Vec<(usize, usize)> = Vec::with_capacity(dataset.len());

    for row in &dataset.rows {
        let (mfr, ty) = match (&row[mfr_idx], &row[type_idx]) {
            (CellValue::Null, _) | (_, CellValue::Null) => continue,
            (m, t) => (m.to_string(), t.to_string()),
        };
        let c = *category_pos.entry(mfr.clone()).or_insert_with(|| {
            categories.push(mfr);
            categories.len() - 1
        });
        let s = *series_pos.entry(ty.clone()).or_insert_with(|| {
            series.push(CountSeries {
                name: ty,
                counts: Vec::new(),
            });
            series.len() - 1
        });
        cells.push((c, s));
    }

    for s in &mut series {
        s.counts = vec![0; categories.len()];
    }
    for (c, s) in cells {
        series[s].counts[c] += 1;
    }

    Ok(CategoryHistogram { categories, series })
}

fn column_idx(dataset: &ListingDataset, name: &str) -> Result<usize, ChartError> {
    dataset
        .column_index(name)
        .ok_or_else(|| ColumnError::Missing(name.to_string()).into())
}

impl CategoryHistogram {
    /// Grouped bar layout: category `i` occupies `[i - 0.5, i + 0.5]`, of which
    /// the fraction `bar_gap` stays empty and the rest is split evenly between
    /// the series. Returns one `Vec<BarRect>` per series.
    pub fn grouped_bars(&self, bar_gap: f64) -> Vec<Vec<BarRect>> {
        let n = self.series.len().max(1) as f64;
        let group_width = 1.0 - bar_gap.clamp(0.0, 0.95);
        let width = group_width / n;
        self.series
            .iter()
            .enumerate()
            .map(|(s, series)| {
                let offset = -group_width / 2.0 + width * (s as f64 + 0.5);
                series
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(c, &count)| BarRect {
                        center: c as f64 + offset,
                        width,
                        height: count as f64,
                    })
                    .collect()
            })
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.series.iter().flat_map(|s| &s.counts).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn test_counts_by_manufacturer_and_type() {
        let hist = type_by_manufacturer(&sample_dataset()).unwrap();

        assert_eq!(hist.categories, vec!["toyota", "ford"]);
        let names: Vec<&str> = hist.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["sedan", "SUV", "truck"]);
        assert_eq!(hist.series[0].counts, vec![1, 0]);
        assert_eq!(hist.series[1].counts, vec![1, 0]);
        assert_eq!(hist.series[2].counts, vec![0, 2]);
        assert_eq!(hist.total(), 4);
    }

    #[test]
    fn test_grouped_bars_stay_inside_slot() {
        let hist = type_by_manufacturer(&sample_dataset()).unwrap();
        let bars = hist.grouped_bars(0.1);

        assert_eq!(bars.len(), 3);
        for (c, _) in hist.categories.iter().enumerate() {
            let lo = bars
                .iter()
                .map(|s| s[c].center - s[c].width / 2.0)
                .fold(f64::MAX, f64::min);
            let hi = bars
                .iter()
                .map(|s| s[c].center + s[c].width / 2.0)
                .fold(f64::MIN, f64::max);
            assert!((hi - lo - 0.9).abs() < 1e-9);
            assert!(((lo + hi) / 2.0 - c as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_missing_manufacturer_column() {
        let ds = ListingDataset::new(Vec::new(), Vec::new());
        assert_eq!(
            type_by_manufacturer(&ds),
            Err(ChartError::Column(ColumnError::Missing("manufacturer".into())))
        );
    }
}
