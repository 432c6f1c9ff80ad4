use crate::data::model::{ColumnError, ListingDataset};

// ---------------------------------------------------------------------------
// Data summary
// ---------------------------------------------------------------------------

/// Aggregates printed under the charts, computed from the loaded table.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSummary {
    pub total: usize,
    pub manufacturers: usize,
    /// `None` when the price column has no values.
    pub price_range: Option<(f64, f64)>,
}

impl DataSummary {
    pub fn compute(dataset: &ListingDataset) -> Result<Self, ColumnError> {
        let prices = dataset.f64_values("price")?;
        let price_range = prices.iter().fold(None, |acc: Option<(f64, f64)>, &p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        });
        Ok(DataSummary {
            total: dataset.len(),
            manufacturers: dataset.distinct_count("manufacturer")?,
            price_range,
        })
    }

    /// The three summary lines, in display order.
    pub fn lines(&self) -> [String; 3] {
        let range = match self.price_range {
            Some((lo, hi)) => format!("${} - ${}", format_money(lo), format_money(hi)),
            None => "$nan - $nan".to_string(),
        };
        [
            format!("Total number of vehicles: {}", group_thousands(self.total as u64)),
            format!("Number of manufacturers: {}", group_thousands(self.manufacturers as u64)),
            format!("Price range: {range}"),
        ]
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals with thousands separators: `12500.5` → `"12,500.50"`.
pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{}.{:02}", group_thousands(cents / 100), cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn test_summary_matches_direct_aggregates() {
        let ds = sample_dataset();
        let summary = DataSummary::compute(&ds).unwrap();

        assert_eq!(summary.total, ds.len());
        assert_eq!(summary.manufacturers, 2);
        assert_eq!(summary.price_range, Some((1000.0, 4000.0)));
    }

    #[test]
    fn test_summary_lines() {
        let summary = DataSummary::compute(&sample_dataset()).unwrap();
        assert_eq!(
            summary.lines(),
            [
                "Total number of vehicles: 4".to_string(),
                "Number of manufacturers: 2".to_string(),
                "Price range: $1,000.00 - $4,000.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_price_column() {
        let ds = ListingDataset::new(Vec::new(), Vec::new());
        assert_eq!(
            DataSummary::compute(&ds),
            Err(ColumnError::Missing("price".into()))
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(51525), "51,525");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1.0), "1.00");
        assert_eq!(format_money(375000.0), "375,000.00");
        assert_eq!(format_money(12500.125), "12,500.13");
        assert_eq!(format_money(-42.5), "-42.50");
    }
}
