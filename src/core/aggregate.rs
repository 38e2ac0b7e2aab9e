//! Flattens per-fund change lists into the single cross-fund view.

use crate::core::model::{AggregatedChangeRow, FundDetail, FundId};
use std::collections::BTreeMap;
use tracing::debug;

/// Produces one display row per (fund, change record) pair, tagging each
/// row with the fund it came from.
///
/// This is a flatten, not a merge: a ticker reported by two funds yields
/// two rows, each with a single-element `affected_funds`. Grouping those
/// into one multi-fund row would change observable output and is left as
/// an explicit future decision.
///
/// Funds are visited in map order; within a fund, records keep their
/// original order. A fund with an empty change list contributes nothing.
pub fn aggregate(fund_details: &BTreeMap<FundId, FundDetail>) -> Vec<AggregatedChangeRow> {
    let mut rows = Vec::new();
    for (fund_id, detail) in fund_details {
        for change in &detail.changes {
            rows.push(AggregatedChangeRow {
                record: change.clone(),
                affected_funds: vec![fund_id.clone()],
            });
        }
    }
    debug!(
        funds = fund_details.len(),
        rows = rows.len(),
        "Aggregated change rows across funds"
    );
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ChangeRecord;

    fn change(ticker: &str, delta: i64) -> ChangeRecord {
        ChangeRecord {
            ticker: ticker.to_string(),
            name: format!("{ticker} Corp"),
            old_shares: 1000,
            new_shares: 1000 + delta,
            delta_shares: delta,
            monetary_value: delta as f64 * 100.0,
            monetary_value_str: String::new(),
        }
    }

    fn fund(changes: Vec<ChangeRecord>) -> FundDetail {
        FundDetail {
            changes,
            holdings: Vec::new(),
        }
    }

    #[test]
    fn test_row_count_equals_sum_of_change_lists() {
        let mut details = BTreeMap::new();
        details.insert("00XX".to_string(), fund(vec![change("2330", 100), change("2317", -50)]));
        details.insert("00YY".to_string(), fund(vec![change("2454", 300)]));
        details.insert("00ZZ".to_string(), fund(Vec::new()));

        let rows = aggregate(&details);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_each_row_attributes_exactly_its_own_fund() {
        let mut details = BTreeMap::new();
        details.insert("00XX".to_string(), fund(vec![change("2330", 100)]));
        details.insert("00YY".to_string(), fund(vec![change("2317", 200)]));

        let rows = aggregate(&details);
        assert_eq!(rows[0].affected_funds, vec!["00XX".to_string()]);
        assert_eq!(rows[1].affected_funds, vec!["00YY".to_string()]);
    }

    #[test]
    fn test_duplicate_ticker_across_funds_stays_two_rows() {
        let mut details = BTreeMap::new();
        details.insert("00XX".to_string(), fund(vec![change("2330", 100)]));
        details.insert("00YY".to_string(), fund(vec![change("2330", -200)]));

        let rows = aggregate(&details);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].record.ticker, "2330");
        assert_eq!(rows[1].record.ticker, "2330");
        assert_eq!(rows[0].affected_funds, vec!["00XX".to_string()]);
        assert_eq!(rows[1].affected_funds, vec!["00YY".to_string()]);
    }

    #[test]
    fn test_fund_order_then_original_order() {
        let mut details = BTreeMap::new();
        // Inserted out of order; BTreeMap iterates lexicographically.
        details.insert("00YY".to_string(), fund(vec![change("3008", 10)]));
        details.insert("00XX".to_string(), fund(vec![change("2330", 1), change("2317", 2)]));

        let rows = aggregate(&details);
        let tickers: Vec<&str> = rows.iter().map(|r| r.record.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["2330", "2317", "3008"]);
    }

    #[test]
    fn test_empty_details_yield_no_rows() {
        let details = BTreeMap::new();
        assert!(aggregate(&details).is_empty());
    }
}
