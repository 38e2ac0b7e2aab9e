//! Aggregated cross-fund change view.

use super::ui;
use crate::core::model::ComparisonSnapshot;
use crate::core::rank::{Ranker, SortKey, SortState};
use crate::core::{aggregate, classify};
use anyhow::Result;
use comfy_table::Cell;

pub fn run(snapshot: &ComparisonSnapshot, ranker: &Ranker, sort: &SortState) -> Result<()> {
    println!(
        "{}",
        ui::style_text("ETF holdings changes (all funds)", ui::StyleType::Title)
    );
    println!("{}\n", render_dates_line(snapshot));
    println!("{}\n", render_summary(snapshot));
    print!("{}", render_changes_table(snapshot, ranker, sort));
    Ok(())
}

pub fn render_dates_line(snapshot: &ComparisonSnapshot) -> String {
    format!(
        "Comparing {} vs {}",
        ui::format_compact_date(&snapshot.dates.new),
        ui::format_compact_date(&snapshot.dates.old)
    )
}

/// Backend-precomputed aggregate stats, passed through verbatim.
pub fn render_summary(snapshot: &ComparisonSnapshot) -> String {
    let summary = &snapshot.summary;
    format!(
        "{} {}   {} {}   {} {}   {} {}",
        ui::style_text("Est. total buy:", ui::StyleType::TotalLabel),
        ui::style_text(&summary.total_buy_str, ui::StyleType::GainValue),
        ui::style_text("Est. total sell:", ui::StyleType::TotalLabel),
        ui::style_text(&summary.total_sell_str, ui::StyleType::LossValue),
        ui::style_text("Added:", ui::StyleType::TotalLabel),
        summary.count_added,
        ui::style_text("Removed:", ui::StyleType::TotalLabel),
        summary.count_removed,
    )
}

pub fn render_changes_table(
    snapshot: &ComparisonSnapshot,
    ranker: &Ranker,
    sort: &SortState,
) -> String {
    let rows = aggregate(&snapshot.fund_details);
    if rows.is_empty() {
        return format!(
            "{}\n",
            ui::style_text("No change data for this period.", ui::StyleType::Subtle)
        );
    }
    let rows = ranker.sort(&rows, sort.key, sort.direction);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::sort_header_cell("Ticker", SortKey::Ticker, sort),
        ui::sort_header_cell("Name", SortKey::Name, sort),
        ui::sort_header_cell("Δ Shares", SortKey::DeltaShares, sort),
        ui::sort_header_cell("Est. Value", SortKey::MonetaryValue, sort),
        ui::header_cell("Funds"),
        ui::header_cell("Status"),
    ]);

    for row in &rows {
        let record = &row.record;
        table.add_row(vec![
            Cell::new(&record.ticker),
            Cell::new(&record.name),
            ui::delta_cell(record.delta_shares),
            ui::value_cell(record.monetary_value, &record.monetary_value_str),
            ui::funds_cell(&row.affected_funds),
            ui::status_cell(classify(record)),
        ]);
    }

    format!("{table}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ChangeRecord, FundDetail};

    fn snapshot_with_two_funds() -> ComparisonSnapshot {
        let mut snapshot = ComparisonSnapshot::default();
        snapshot.dates.old = "20260105".to_string();
        snapshot.dates.new = "20260106".to_string();
        snapshot.summary.total_buy_str = "1.2億".to_string();
        snapshot.summary.total_sell_str = "-345萬".to_string();
        snapshot.summary.count_added = 2;
        snapshot.summary.count_removed = 1;
        for (fund, ticker, value) in [("00XX", "2330", 500.0), ("00YY", "2317", -200.0)] {
            snapshot.fund_details.insert(
                fund.to_string(),
                FundDetail {
                    changes: vec![ChangeRecord {
                        ticker: ticker.to_string(),
                        name: format!("{ticker} Corp"),
                        old_shares: 0,
                        new_shares: 5000,
                        delta_shares: 5000,
                        monetary_value: value,
                        monetary_value_str: format!("{value}"),
                    }],
                    holdings: Vec::new(),
                },
            );
        }
        snapshot
    }

    #[test]
    fn test_table_lists_rows_from_every_fund() {
        let snapshot = snapshot_with_two_funds();
        let ranker = Ranker::new("zh-TW").unwrap();
        let output = render_changes_table(&snapshot, &ranker, &SortState::default());
        assert!(output.contains("2330"));
        assert!(output.contains("2317"));
        assert!(output.contains("00XX"));
        assert!(output.contains("00YY"));
        assert!(output.contains("Added"));
    }

    #[test]
    fn test_empty_snapshot_renders_empty_state() {
        let snapshot = ComparisonSnapshot::default();
        let ranker = Ranker::new("zh-TW").unwrap();
        let output = render_changes_table(&snapshot, &ranker, &SortState::default());
        assert!(output.contains("No change data for this period."));
    }

    #[test]
    fn test_summary_passes_backend_strings_through() {
        let snapshot = snapshot_with_two_funds();
        let output = render_summary(&snapshot);
        assert!(output.contains("1.2億"));
        assert!(output.contains("-345萬"));
    }

    #[test]
    fn test_dates_line_formats_both_dates() {
        let snapshot = snapshot_with_two_funds();
        assert_eq!(
            render_dates_line(&snapshot),
            "Comparing 2026/01/06 vs 2026/01/05"
        );
    }
}
