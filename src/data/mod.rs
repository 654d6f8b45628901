/// Data layer: core types, loading, lookup, and slicing.
///
/// Architecture:
/// ```text
///  Probas CDFs.xlsx   Probas PDFs.xlsx
///          │                 │
///          ▼                 ▼
///   ┌──────────┐      ┌──────────┐
///   │ discover │ ───▶ │  loader  │  parse both sheets, join on SOC code
///   └──────────┘      └──────────┘
///                          │
///                          ▼
///   ┌───────────┐    ┌─────────┐    ┌──────────┐
///   │   cache   │ ◀─ │ Dataset │ ─▶ │ validate │  advisory warnings only
///   └───────────┘    └─────────┘    └──────────┘
///                          │
///              ┌───────────┴───────────┐
///              ▼                       ▼
///        ┌──────────┐            ┌──────────┐
///        │  index   │ search,    │ extract  │ codes → CDF/PDF series
///        └──────────┘ page       └──────────┘
/// ```

pub mod cache;
pub mod discover;
pub mod extract;
pub mod index;
pub mod loader;
pub mod model;
pub mod validate;

pub use cache::DatasetCache;
pub use discover::DataFiles;
pub use extract::{extract, records_for, Extraction, SeriesBundle};
pub use index::{Page, DEFAULT_PAGE_SIZE};
pub use model::{Dataset, OccupationRecord, SeriesKind, TimeSeries};
