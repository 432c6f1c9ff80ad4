use std::collections::BTreeSet;

use super::model::{ColumnError, ListingDataset};

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Indices of rows whose `column` cell displays as `label`.
///
/// Labels are the strings the selectors offer (see [`sorted_unique_text`]),
/// so a numeric code such as `1` matches an integer cell. Nulls never match.
pub fn rows_with_label(
    dataset: &ListingDataset,
    column: &str,
    label: &str,
) -> Result<Vec<usize>, ColumnError> {
    Ok(dataset
        .values(column)?
        .enumerate()
        .filter(|(_, v)| !v.is_null() && v.to_string() == label)
        .map(|(i, _)| i)
        .collect())
}

/// Numeric values of `column` for the given rows, nulls skipped.
pub fn column_f64_for_rows(
    dataset: &ListingDataset,
    column: &str,
    rows: &[usize],
) -> Result<Vec<f64>, ColumnError> {
    let col = dataset
        .column(column)
        .ok_or_else(|| ColumnError::Missing(column.to_string()))?;
    if !col.kind.is_numeric() {
        return Err(ColumnError::NotNumeric(column.to_string()));
    }
    let idx = dataset
        .column_index(column)
        .ok_or_else(|| ColumnError::Missing(column.to_string()))?;
    Ok(rows
        .iter()
        .filter_map(|&r| dataset.rows.get(r).and_then(|row| row[idx].as_f64()))
        .collect())
}

// ---------------------------------------------------------------------------
// Selector options
// ---------------------------------------------------------------------------

/// Sorted distinct values of a column as display strings, nulls excluded.
pub fn sorted_unique_text(
    dataset: &ListingDataset,
    column: &str,
) -> Result<Vec<String>, ColumnError> {
    let set = dataset
        .unique_values(column)
        .ok_or_else(|| ColumnError::Missing(column.to_string()))?;
    // Re-sort as text: numeric codes should sort the way the labels read.
    let labels: BTreeSet<String> = set
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| v.to_string())
        .collect();
    Ok(labels.into_iter().collect())
}

/// Choices for the first manufacturer selector.
pub fn manufacturer_options(dataset: &ListingDataset) -> Result<Vec<String>, ColumnError> {
    sorted_unique_text(dataset, "manufacturer")
}

/// Choices for the second manufacturer selector: everything except `first`.
pub fn second_manufacturer_options(options: &[String], first: &str) -> Vec<String> {
    options.iter().filter(|m| *m != first).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;
    use crate::data::model::CellValue;

    #[test]
    fn test_rows_with_label_matches_text() {
        let ds = sample_dataset();
        assert_eq!(rows_with_label(&ds, "manufacturer", "ford").unwrap(), vec![2, 3]);
        assert!(rows_with_label(&ds, "manufacturer", "tesla").unwrap().is_empty());
    }

    #[test]
    fn test_rows_with_label_matches_numeric_codes() {
        let ds = sample_dataset();
        // Option labels come from display strings, so lookups must too.
        let years = sorted_unique_text(&ds, "model_year").unwrap();
        assert_eq!(years[1], "2011");
        assert_eq!(rows_with_label(&ds, "model_year", &years[1]).unwrap(), vec![1]);
        // Nulls are never offered, so they never match either.
        let null_label = CellValue::Null.to_string();
        assert!(rows_with_label(&ds, "odometer", &null_label).unwrap().is_empty());
    }

    #[test]
    fn test_column_f64_for_rows() {
        let ds = sample_dataset();
        assert_eq!(
            column_f64_for_rows(&ds, "price", &[0, 3]).unwrap(),
            vec![1000.0, 4000.0]
        );
        assert_eq!(
            column_f64_for_rows(&ds, "odometer", &[2, 3]).unwrap(),
            vec![30_000.0]
        );
        assert!(column_f64_for_rows(&ds, "manufacturer", &[0]).is_err());
    }

    #[test]
    fn test_manufacturer_options_sorted() {
        let ds = sample_dataset();
        assert_eq!(manufacturer_options(&ds).unwrap(), vec!["ford", "toyota"]);
    }

    #[test]
    fn test_second_options_exclude_first() {
        let options: Vec<String> = ["bmw", "ford", "toyota"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for first in &options {
            let second = second_manufacturer_options(&options, first);
            assert!(!second.contains(first));
            assert_eq!(second.len(), options.len() - 1);
        }
    }

    #[test]
    fn test_missing_manufacturer_column() {
        let ds = ListingDataset::new(Vec::new(), Vec::new());
        assert_eq!(
            manufacturer_options(&ds),
            Err(ColumnError::Missing("manufacturer".into()))
        );
    }
}
