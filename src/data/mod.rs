/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   main_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + sort → Dataset (memoized by path/mtime)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date range + seasons → Vec<&Observation>
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  daily / hourly / weather / season / segment tables
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
