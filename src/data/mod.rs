/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Row>, distinct countries / years
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  countries ∩ year <= cutoff → Vec<&Row>
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
pub mod fixtures;
