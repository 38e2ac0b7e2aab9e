//! Sorting of change and holding rows by a user-selected column.
//!
//! One comparator serves every table shape: any row type that can look
//! up a value by [`SortKey`] is sortable, so the aggregated change view,
//! the single-fund change view, and the full-holdings view all share the
//! same ordering code.

use crate::core::model::{AggregatedChangeRow, ChangeRecord, HoldingRecord};
use anyhow::{Result, anyhow};
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::Locale;
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

/// The sortable columns across both table shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Ticker,
    Name,
    OldShares,
    NewShares,
    DeltaShares,
    MonetaryValue,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortKey::Ticker => "ticker",
                SortKey::Name => "name",
                SortKey::OldShares => "old-shares",
                SortKey::NewShares => "new-shares",
                SortKey::DeltaShares => "delta-shares",
                SortKey::MonetaryValue => "value",
            }
        )
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ticker" => Ok(SortKey::Ticker),
            "name" => Ok(SortKey::Name),
            "old-shares" => Ok(SortKey::OldShares),
            "new-shares" | "shares" => Ok(SortKey::NewShares),
            "delta-shares" | "delta" => Ok(SortKey::DeltaShares),
            "value" | "monetary-value" => Ok(SortKey::MonetaryValue),
            _ => Err(anyhow!("Invalid sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort column and direction. Owned by the presentation
/// layer and passed by reference into [`Ranker::sort`] on each render;
/// the engine itself holds no state across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            key: Some(SortKey::MonetaryValue),
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Column-header activation: selecting a new column resets to
    /// descending, reselecting the active column toggles direction.
    pub fn request(&mut self, key: SortKey) {
        if self.key == Some(key) && self.direction == SortDirection::Descending {
            self.direction = SortDirection::Ascending;
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Descending;
        }
    }
}

/// A value looked up from a row for comparison purposes.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// Lookup-by-column capability. Rows return `None` for columns they do
/// not carry (holdings have no delta), which the comparator treats as a
/// first-class missing value rather than an error.
pub trait SortField {
    fn field(&self, key: SortKey) -> Option<FieldValue<'_>>;
}

impl SortField for ChangeRecord {
    fn field(&self, key: SortKey) -> Option<FieldValue<'_>> {
        match key {
            SortKey::Ticker => Some(FieldValue::Text(&self.ticker)),
            SortKey::Name => Some(FieldValue::Text(&self.name)),
            SortKey::OldShares => Some(FieldValue::Number(self.old_shares as f64)),
            SortKey::NewShares => Some(FieldValue::Number(self.new_shares as f64)),
            SortKey::DeltaShares => Some(FieldValue::Number(self.delta_shares as f64)),
            SortKey::MonetaryValue => Some(FieldValue::Number(self.monetary_value)),
        }
    }
}

impl SortField for AggregatedChangeRow {
    fn field(&self, key: SortKey) -> Option<FieldValue<'_>> {
        self.record.field(key)
    }
}

impl SortField for HoldingRecord {
    fn field(&self, key: SortKey) -> Option<FieldValue<'_>> {
        match key {
            SortKey::Ticker => Some(FieldValue::Text(&self.ticker)),
            SortKey::Name => Some(FieldValue::Text(&self.name)),
            SortKey::NewShares => Some(FieldValue::Number(self.new_shares as f64)),
            SortKey::MonetaryValue => Some(FieldValue::Number(self.monetary_value)),
            SortKey::OldShares | SortKey::DeltaShares => None,
        }
    }
}

/// Sorts rows with locale-aware text collation. Built once per run from
/// the configured locale and reused for every table.
pub struct Ranker {
    collator: Collator,
}

impl Ranker {
    pub fn new(locale: &str) -> Result<Self> {
        let locale: Locale = locale
            .parse()
            .map_err(|e| anyhow!("Invalid locale '{}': {}", locale, e))?;
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = Collator::try_new(&locale.into(), options)
            .map_err(|e| anyhow!("Failed to build collator: {}", e))?;
        Ok(Ranker { collator })
    }

    /// Returns a sorted copy of `rows`; the input is never mutated.
    ///
    /// Text values compare by locale collation, numeric values by their
    /// natural order, and descending inverts that single three-way
    /// outcome. With `key == None` the input order is returned as-is.
    ///
    /// Missing values (a row without the column) order before present
    /// ones in ascending direction and compare equal to each other; the
    /// underlying stable sort keeps input order on ties.
    pub fn sort<T: SortField + Clone>(
        &self,
        rows: &[T],
        key: Option<SortKey>,
        direction: SortDirection,
    ) -> Vec<T> {
        let mut sorted = rows.to_vec();
        let Some(key) = key else {
            return sorted;
        };
        sorted.sort_by(|a, b| {
            let ordering = self.compare_values(a.field(key), b.field(key));
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        sorted
    }

    fn compare_values(&self, a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(FieldValue::Text(a)), Some(FieldValue::Text(b))) => self.collator.compare(a, b),
            (Some(FieldValue::Number(a)), Some(FieldValue::Number(b))) => {
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            }
            // Columns are homogeneous, so mixed pairs cannot occur; keep
            // the comparator total anyway.
            (Some(FieldValue::Number(_)), Some(FieldValue::Text(_))) => Ordering::Less,
            (Some(FieldValue::Text(_)), Some(FieldValue::Number(_))) => Ordering::Greater,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranker() -> Ranker {
        Ranker::new("zh-TW").unwrap()
    }

    fn change(ticker: &str, name: &str, delta: i64, value: f64) -> ChangeRecord {
        ChangeRecord {
            ticker: ticker.to_string(),
            name: name.to_string(),
            old_shares: 1000,
            new_shares: 1000 + delta,
            delta_shares: delta,
            monetary_value: value,
            monetary_value_str: String::new(),
        }
    }

    fn holding(ticker: &str, shares: i64) -> HoldingRecord {
        HoldingRecord {
            ticker: ticker.to_string(),
            name: format!("{ticker} Corp"),
            new_shares: shares,
            monetary_value: shares as f64,
            monetary_value_str: String::new(),
        }
    }

    #[test]
    fn test_numeric_sort_descending_by_default_key() {
        let rows = vec![
            change("A", "A", 10, 100.0),
            change("B", "B", 20, 300.0),
            change("C", "C", 30, -200.0),
        ];
        let state = SortState::default();
        let sorted = ranker().sort(&rows, state.key, state.direction);
        let values: Vec<f64> = sorted.iter().map(|r| r.monetary_value).collect();
        assert_eq!(values, vec![300.0, 100.0, -200.0]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let rows = vec![change("B", "B", 1, 2.0), change("A", "A", 2, 1.0)];
        let _ = ranker().sort(&rows, Some(SortKey::Ticker), SortDirection::Ascending);
        assert_eq!(rows[0].ticker, "B");
    }

    #[test]
    fn test_no_key_returns_input_order() {
        let rows = vec![change("B", "B", 1, 2.0), change("A", "A", 2, 1.0)];
        let sorted = ranker().sort(&rows, None, SortDirection::Ascending);
        let tickers: Vec<&str> = sorted.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["B", "A"]);
    }

    #[test]
    fn test_sort_ascending_is_idempotent() {
        let rows = vec![
            change("C", "C", 1, 3.0),
            change("A", "A", 2, 1.0),
            change("B", "B", 3, 2.0),
        ];
        let r = ranker();
        let once = r.sort(&rows, Some(SortKey::MonetaryValue), SortDirection::Ascending);
        let twice = r.sort(&once, Some(SortKey::MonetaryValue), SortDirection::Ascending);
        let a: Vec<&str> = once.iter().map(|r| r.ticker.as_str()).collect();
        let b: Vec<&str> = twice.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_descending_is_reverse_of_ascending_without_ties() {
        let rows = vec![
            change("A", "A", 5, 1.0),
            change("B", "B", -3, 2.0),
            change("C", "C", 8, 3.0),
        ];
        let r = ranker();
        let asc = r.sort(&rows, Some(SortKey::DeltaShares), SortDirection::Ascending);
        let mut desc = r.sort(&rows, Some(SortKey::DeltaShares), SortDirection::Descending);
        desc.reverse();
        let a: Vec<&str> = asc.iter().map(|r| r.ticker.as_str()).collect();
        let d: Vec<&str> = desc.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(a, d);
    }

    #[test]
    fn test_locale_collation_not_codepoint_order() {
        let rows = vec![
            change("1", "zebra", 0, 0.0),
            change("2", "\u{e9}p\u{e9}e", 0, 0.0),
            change("3", "apple", 0, 0.0),
        ];
        let sorted = ranker().sort(&rows, Some(SortKey::Name), SortDirection::Ascending);
        let names: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();
        // Codepoint order would put "épée" after "zebra".
        assert_eq!(names, vec!["apple", "\u{e9}p\u{e9}e", "zebra"]);
    }

    #[test]
    fn test_missing_column_orders_before_present() {
        // Holdings carry no delta column; they all compare equal on it
        // and the stable sort keeps their input order.
        let rows = vec![holding("B", 10), holding("A", 20)];
        let sorted = ranker().sort(&rows, Some(SortKey::DeltaShares), SortDirection::Ascending);
        let tickers: Vec<&str> = sorted.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["B", "A"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let rows = vec![
            change("X", "same", 0, 7.0),
            change("Y", "same", 0, 7.0),
            change("Z", "same", 0, 7.0),
        ];
        let sorted = ranker().sort(&rows, Some(SortKey::MonetaryValue), SortDirection::Ascending);
        let tickers: Vec<&str> = sorted.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_request_toggles_direction_on_same_key() {
        let mut state = SortState::default();
        state.request(SortKey::MonetaryValue);
        assert_eq!(state.direction, SortDirection::Ascending);
        state.request(SortKey::MonetaryValue);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn test_request_new_key_resets_to_descending() {
        let mut state = SortState {
            key: Some(SortKey::Ticker),
            direction: SortDirection::Ascending,
        };
        state.request(SortKey::Name);
        assert_eq!(state.key, Some(SortKey::Name));
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn test_sort_key_round_trip() {
        for key in [
            SortKey::Ticker,
            SortKey::Name,
            SortKey::OldShares,
            SortKey::NewShares,
            SortKey::DeltaShares,
            SortKey::MonetaryValue,
        ] {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
        assert!("volume".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_invalid_locale_is_an_error() {
        assert!(Ranker::new("not a locale").is_err());
    }
}
