use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the listings table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Used as a key in `BTreeMap` / `BTreeSet`, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn rank(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) | Float(_) => 2,
                Text(_) => 3,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            // Mixed numerics compare by value, integers first on ties.
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Text(a), Text(b)) => a.cmp(b),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Numeric view of the cell, `None` for text, booleans and nulls.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Inferred storage type of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    /// Integer and float columns are numeric; booleans are not.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Lookup failures surfaced when a view needs a column the file lacks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("column '{0}' not found in dataset")]
    Missing(String),
    #[error("column '{0}' is not numeric")]
    NotNumeric(String),
}

// ---------------------------------------------------------------------------
// ListingDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed listings table. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct ListingDataset {
    /// Columns in file order.
    pub columns: Vec<Column>,
    /// One `Vec` per listing, one cell per column.
    pub rows: Vec<Vec<CellValue>>,
    /// For each column the sorted set of unique values.
    unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl ListingDataset {
    /// Build the per-column unique-value index from typed rows.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = columns
            .iter()
            .map(|c| (c.name.clone(), BTreeSet::new()))
            .collect();

        for row in &rows {
            for (col, val) in columns.iter().zip(row) {
                if let Some(set) = unique_values.get_mut(&col.name) {
                    set.insert(val.clone());
                }
            }
        }

        ListingDataset {
            columns,
            rows,
            unique_values,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the numeric columns, in file order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.kind.is_numeric())
            .map(|c| c.name.clone())
            .collect()
    }

    /// All cells of one column, row order.
    pub fn values(&self, name: &str) -> Result<impl Iterator<Item = &CellValue>, ColumnError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| ColumnError::Missing(name.to_string()))?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Numeric cells of one column; nulls are skipped.
    pub fn f64_values(&self, name: &str) -> Result<Vec<f64>, ColumnError> {
        let column = self
            .column(name)
            .ok_or_else(|| ColumnError::Missing(name.to_string()))?;
        if !column.kind.is_numeric() {
            return Err(ColumnError::NotNumeric(name.to_string()));
        }
        Ok(self.values(name)?.filter_map(CellValue::as_f64).collect())
    }

    /// Sorted unique values of a column, including `Null` when present.
    pub fn unique_values(&self, name: &str) -> Option<&BTreeSet<CellValue>> {
        self.unique_values.get(name)
    }

    /// Number of distinct non-null values in a column.
    pub fn distinct_count(&self, name: &str) -> Result<usize, ColumnError> {
        let set = self
            .unique_values(name)
            .ok_or_else(|| ColumnError::Missing(name.to_string()))?;
        Ok(set.iter().filter(|v| !v.is_null()).count())
    }
}
