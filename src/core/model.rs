//! Data model for the backend's holdings-comparison payload.
//!
//! A [`ComparisonSnapshot`] is fetched once per run and held read-only;
//! on refetch it is replaced wholesale, never patched in place. Display
//! strings (`*_str` fields) arrive pre-formatted from the backend and
//! are passed through verbatim.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Opaque key naming one tracked fund, e.g. `"00981A"`. The set of funds
/// is whatever the backend response enumerates.
pub type FundId = String;

/// One ticker's share-count delta for one fund between the two snapshot
/// dates.
///
/// `delta_shares` as supplied by the backend is authoritative for
/// display, even if it ever disagreed with `new_shares - old_shares`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRecord {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub old_shares: i64,
    #[serde(default)]
    pub new_shares: i64,
    #[serde(default)]
    pub delta_shares: i64,
    #[serde(default)]
    pub monetary_value: f64,
    /// Pre-formatted currency string; never re-derived client side.
    #[serde(default)]
    pub monetary_value_str: String,
}

/// One ticker's current position within one fund.
#[derive(Debug, Clone, Deserialize)]
pub struct HoldingRecord {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub new_shares: i64,
    #[serde(default)]
    pub monetary_value: f64,
    #[serde(default)]
    pub monetary_value_str: String,
}

/// A change record flattened into the cross-fund view, tagged with the
/// fund(s) it came from. Today the aggregation emits exactly one fund
/// per row; see `core::aggregate`.
#[derive(Debug, Clone)]
pub struct AggregatedChangeRow {
    pub record: ChangeRecord,
    pub affected_funds: Vec<FundId>,
}

/// The two snapshot dates being compared, as 8-digit `YYYYMMDD` strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotDates {
    #[serde(default)]
    pub old: String,
    #[serde(default)]
    pub new: String,
}

/// Aggregate stats precomputed by the backend. Pass-through only; the
/// client never recomputes these.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotSummary {
    #[serde(default)]
    pub total_buy_str: String,
    #[serde(default)]
    pub total_sell_str: String,
    #[serde(default)]
    pub count_added: u64,
    #[serde(default)]
    pub count_removed: u64,
}

/// One fund's change list and current-holdings list. Absent or null
/// collections degrade to empty so a malformed fund entry renders as
/// zero rows instead of failing the whole snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundDetail {
    #[serde(default)]
    pub changes: Vec<ChangeRecord>,
    #[serde(default)]
    pub holdings: Vec<HoldingRecord>,
}

/// The full payload of one comparison fetch.
///
/// `fund_details` uses a `BTreeMap` so the aggregated view iterates
/// funds in a deterministic (lexicographic) order; with equal sort keys
/// this pre-sort order is the only ordering guarantee rows have.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonSnapshot {
    #[serde(default)]
    pub dates: SnapshotDates,
    #[serde(default)]
    pub summary: SnapshotSummary,
    #[serde(default, alias = "etf_details")]
    pub fund_details: BTreeMap<FundId, FundDetail>,
}

/// Which record set the views operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSelection {
    /// Cross-fund flattened change view.
    Aggregated,
    /// Detail view for one fund present in `fund_details`.
    Fund(FundId),
}
