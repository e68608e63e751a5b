/// Data layer: record types, loading, control state, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, derived summaries
///   └──────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  site selection + payload range → chart rows
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
pub mod select;
