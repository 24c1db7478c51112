/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  contaminant-levels.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch text → parse → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, header names
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  value counts, summary
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
