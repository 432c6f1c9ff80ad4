use super::{BarRect, ChartError};
use crate::data::filter::{column_f64_for_rows, rows_with_label};
use crate::data::model::ListingDataset;

pub const TITLE: &str = "Price Distribution Comparison";
pub const X_LABEL: &str = "Price ($)";

// ---------------------------------------------------------------------------
// Display modes
// ---------------------------------------------------------------------------

/// How the two price series share the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    /// Both series drawn full width on top of each other.
    Overlay,
    /// Series side by side within each bin.
    Group,
}

/// What a bar height means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistNorm {
    Count,
    Percent,
}

impl HistNorm {
    pub fn y_label(self) -> &'static str {
        match self {
            HistNorm::Count => "Count",
            HistNorm::Percent => "Percentage",
        }
    }
}

// ---------------------------------------------------------------------------
// Binning
// ---------------------------------------------------------------------------

/// Equal-width bins `[start + i*width, start + (i+1)*width)`, `i < count`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bins {
    pub start: f64,
    pub width: f64,
    pub count: usize,
}

impl Bins {
    /// Bins covering every value: Sturges' bin count, width rounded up to a
    /// 1/2/2.5/5 step and edges aligned to that step.
    pub fn for_values(values: &[f64]) -> Self {
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min > max {
            return Bins {
                start: 0.0,
                width: 1.0,
                count: 1,
            };
        }

        let target = (values.len() as f64).log2().ceil().max(0.0) + 1.0;
        let range = max - min;
        let width = if range > 0.0 {
            nice_step(range / target)
        } else {
            nice_step(min.abs().max(1.0) / 10.0)
        };
        let start = (min / width).floor() * width;
        let count = (((max - start) / width).floor() as usize + 1).max(1);
        Bins { start, width, count }
    }

    pub fn index_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.start {
            return None;
        }
        let idx = ((value - self.start) / self.width).floor() as usize;
        Some(idx.min(self.count - 1))
    }

    pub fn center(&self, idx: usize) -> f64 {
        self.start + self.width * (idx as f64 + 0.5)
    }

    pub fn counts(&self, values: &[f64]) -> Vec<u64> {
        let mut counts = vec![0u64; self.count];
        for idx in values.iter().filter_map(|&v| self.index_of(v)) {
            counts[idx] += 1;
        }
        counts
    }
}

/// Smallest value of the form {1, 2, 2.5, 5} × 10^k that is ≥ `raw`.
fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|&n| fraction <= n * (1.0 + 1e-9))
        .unwrap_or(10.0);
    nice * magnitude
}

// ---------------------------------------------------------------------------
// Price comparison chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    /// Manufacturer name.
    pub name: String,
    /// Bar height per bin, already normalised.
    pub heights: Vec<f64>,
    /// Number of prices in the series.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceComparison {
    pub bins: Bins,
    pub series: Vec<HistogramSeries>,
    pub norm: HistNorm,
    pub bar_mode: BarMode,
}

/// Price histograms of two manufacturers on shared bins.
///
/// `normalized` selects percent-of-series heights drawn overlaid; otherwise
/// raw counts drawn side by side.
pub fn price_comparison(
    dataset: &ListingDataset,
    manufacturer1: &str,
    manufacturer2: &str,
    normalized: bool,
) -> Result<PriceComparison, ChartError> {
    let (norm, bar_mode) = if normalized {
        (HistNorm::Percent, BarMode::Overlay)
    } else {
        (HistNorm::Count, BarMode::Group)
    };

    let mut samples = Vec::with_capacity(2);
    for mfr in [manufacturer1, manufacturer2] {
        let rows = rows_with_label(dataset, "manufacturer", mfr)?;
        samples.push((mfr, column_f64_for_rows(dataset, "price", &rows)?));
    }

    let combined: Vec<f64> = samples.iter().flat_map(|(_, v)| v.iter().copied()).collect();
    let bins = Bins::for_values(&combined);

    let series = samples
        .into_iter()
        .map(|(name, prices)| {
            let counts = bins.counts(&prices);
            let total = prices.len();
            let heights = counts
                .iter()
                .map(|&c| match norm {
                    HistNorm::Count => c as f64,
                    HistNorm::Percent if total > 0 => c as f64 * 100.0 / total as f64,
                    HistNorm::Percent => 0.0,
                })
                .collect();
            HistogramSeries {
                name: name.to_string(),
                heights,
                total,
            }
        })
        .collect();

    Ok(PriceComparison {
        bins,
        series,
        norm,
        bar_mode,
    })
}

impl PriceComparison {
    pub fn y_label(&self) -> &'static str {
        self.norm.y_label()
    }

    /// Bar rectangles for each series according to the bar mode.
    pub fn bars(&self) -> Vec<Vec<BarRect>> {
        let n = self.series.len().max(1) as f64;
        self.series
            .iter()
            .enumerate()
            .map(|(s, series)| {
                let (width, offset) = match self.bar_mode {
                    BarMode::Overlay => (self.bins.width, 0.0),
                    BarMode::Group => {
                        let w = self.bins.width / n;
                        (w, -self.bins.width / 2.0 + w * (s as f64 + 0.5))
                    }
                };
                series
                    .heights
                    .iter()
                    .enumerate()
                    .map(|(i, &height)| BarRect {
                        center: self.bins.center(i) + offset,
                        width,
                        height,
                    })
                    .collect()
            })
            .collect()
    }
}
