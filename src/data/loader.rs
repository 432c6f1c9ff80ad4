use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use thiserror::Error;

use super::model::{CellValue, Column, ColumnKind, ListingDataset};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The two load failures the dashboard distinguishes.
/// `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Data file not found. Please ensure '{}' is in the correct directory.", file_name(.path))]
    NotFound { path: PathBuf },
    #[error("Error loading data: {0:#}")]
    Read(#[from] anyhow::Error),
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load the listings CSV at `path`.
///
/// The header row names the columns. Every column gets a single type,
/// inferred over all of its non-empty cells:
/// * all parse as `i64`            → [`ColumnKind::Integer`]
/// * all parse as `f64`            → [`ColumnKind::Float`]
/// * all are `true` / `false`      → [`ColumnKind::Bool`]
/// * anything else                 → [`ColumnKind::Text`]
///
/// Empty cells become [`CellValue::Null`]. A column whose rows are all empty
/// is treated as float; a file with a header and no rows has text columns
/// only.
pub fn load_csv(path: &Path) -> Result<ListingDataset, LoadError> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("opening {}", path.display()))
                .into());
        }
    };
    Ok(read_listings(file)?)
}

/// Parse listings from any reader. Split out of [`load_csv`] for tests.
pub fn read_listings<R: io::Read>(input: R) -> anyhow::Result<ListingDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if h.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        raw_rows.push(record.iter().map(str::to_string).collect());
    }

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|idx| infer_kind(raw_rows.iter().map(|r| r[idx].as_str())))
        .collect();

    let rows = raw_rows
        .iter()
        .map(|raw| {
            raw.iter()
                .zip(&kinds)
                .map(|(s, kind)| parse_cell(s, *kind))
                .collect()
        })
        .collect();

    let columns = headers
        .into_iter()
        .zip(kinds)
        .map(|(name, kind)| Column { name, kind })
        .collect();

    Ok(ListingDataset::new(columns, rows))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;
    let mut rows = 0usize;
    for cell in cells.inspect(|_| rows += 1).filter(|c| !c.is_empty()) {
        all_int &= cell.parse::<i64>().is_ok();
        all_float &= cell.parse::<f64>().is_ok();
        all_bool &= parse_bool(cell).is_some();
        if !(all_int || all_float || all_bool) {
            return ColumnKind::Text;
        }
    }
    if rows == 0 {
        // Header only: nothing to count as numeric.
        ColumnKind::Text
    } else if all_int && all_bool {
        // Rows exist but every cell is empty.
        ColumnKind::Float
    } else if all_int {
        ColumnKind::Integer
    } else if all_float {
        ColumnKind::Float
    } else if all_bool {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

fn parse_cell(s: &str, kind: ColumnKind) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    let parsed = match kind {
        ColumnKind::Integer => s.parse().ok().map(CellValue::Integer),
        ColumnKind::Float => s.parse().ok().map(CellValue::Float),
        ColumnKind::Bool => parse_bool(s).map(CellValue::Bool),
        ColumnKind::Text => None,
    };
    parsed.unwrap_or_else(|| CellValue::Text(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LISTINGS: &str = "\
price,model_year,model,odometer,type,is_4wd,manufacturer
9400,2011,bmw x5,145000,SUV,True,bmw
25500,,ford f-150,88705.5,pickup,True,ford
5500,2013,hyundai sonata,110000,sedan,False,hyundai
";

    #[test]
    fn test_load_well_formed_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LISTINGS.as_bytes()).unwrap();

        let ds = load_csv(file.path()).unwrap();

        assert!(!ds.is_empty());
        assert_eq!(ds.len(), 3);
        assert!(ds.has_column("manufacturer"));
        assert!(ds.has_column("type"));
        assert!(ds.has_column("price"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned_vehicles_us.csv");

        let err = load_csv(&path).unwrap_err();

        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(
            err.to_string(),
            "Data file not found. Please ensure 'cleaned_vehicles_us.csv' is in the correct directory."
        );
    }

    #[test]
    fn test_malformed_csv_is_read_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"price,manufacturer\n100,ford,extra\n").unwrap();

        let err = load_csv(file.path()).unwrap_err();

        assert!(matches!(err, LoadError::Read(_)));
        assert!(err.to_string().starts_with("Error loading data: "));
    }

    #[test]
    fn test_column_kinds_inferred_per_column() {
        let ds = read_listings(LISTINGS.as_bytes()).unwrap();
        let kind = |name: &str| ds.column(name).unwrap().kind;

        assert_eq!(kind("price"), ColumnKind::Integer);
        assert_eq!(kind("model_year"), ColumnKind::Integer);
        assert_eq!(kind("odometer"), ColumnKind::Float);
        assert_eq!(kind("is_4wd"), ColumnKind::Bool);
        assert_eq!(kind("model"), ColumnKind::Text);
        assert_eq!(ds.numeric_columns(), vec!["price", "model_year", "odometer"]);
    }

    #[test]
    fn test_empty_cells_are_null() {
        let ds = read_listings(LISTINGS.as_bytes()).unwrap();
        let years: Vec<&CellValue> = ds.values("model_year").unwrap().collect();
        assert_eq!(years[1], &CellValue::Null);
    }

    #[test]
    fn test_unnamed_index_column() {
        let ds = read_listings(",price,manufacturer\n0,100,ford\n".as_bytes()).unwrap();
        assert_eq!(ds.columns[0].name, "Unnamed: 0");
    }

    #[test]
    fn test_header_only_file_has_no_numeric_columns() {
        let ds = read_listings("price,odometer,model_year,manufacturer\n".as_bytes()).unwrap();

        assert!(ds.is_empty());
        assert!(ds.columns.iter().all(|c| c.kind == ColumnKind::Text));
        assert!(ds.numeric_columns().is_empty());
    }

    #[test]
    fn test_all_empty_column_is_float() {
        let ds = read_listings("price,paint_color\n100,\n200,\n".as_bytes()).unwrap();

        assert_eq!(ds.column("paint_color").unwrap().kind, ColumnKind::Float);
        assert!(ds.values("paint_color").unwrap().all(CellValue::is_null));
    }

    #[test]
    fn test_mixed_column_is_text() {
        let ds = read_listings("cylinders\n4\nunknown\n".as_bytes()).unwrap();
        assert_eq!(ds.column("cylinders").unwrap().kind, ColumnKind::Text);
        let vals: Vec<&CellValue> = ds.values("cylinders").unwrap().collect();
        assert_eq!(vals[0], &CellValue::Text("4".into()));
    }
}
