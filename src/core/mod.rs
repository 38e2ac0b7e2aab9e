//! Core business logic: aggregation, ranking, and status classification.
//!
//! Everything here is pure and synchronous; the fetch and presentation
//! layers live in `providers` and `cli`.

pub mod aggregate;
pub mod config;
pub mod log;
pub mod model;
pub mod rank;
pub mod status;

// Re-export main types for cleaner imports
pub use aggregate::aggregate;
pub use model::{
    AggregatedChangeRow, ChangeRecord, ComparisonSnapshot, FundDetail, FundId, HoldingRecord,
    SnapshotDates, SnapshotSummary, ViewSelection,
};
pub use rank::{FieldValue, Ranker, SortDirection, SortField, SortKey, SortState};
pub use status::{HoldingStatus, RESIDUAL_EXIT_THRESHOLD, classify};
