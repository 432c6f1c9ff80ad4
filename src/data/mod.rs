/// Data layer: core types, loading, caching and row selection.
///
/// Architecture:
/// ```text
///  cleaned_vehicles_us.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV, infer column types → ListingDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  load once per path → Arc<ListingDataset>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  row selection, selector options
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
