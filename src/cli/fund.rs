//! Single-fund detail view: the fund's change list plus its full
//! current holdings.

use super::ui;
use crate::core::classify;
use crate::core::model::{ComparisonSnapshot, FundDetail};
use crate::core::rank::{Ranker, SortKey, SortState};
use anyhow::{Result, bail};
use comfy_table::Cell;

pub fn run(
    snapshot: &ComparisonSnapshot,
    fund_id: &str,
    ranker: &Ranker,
    sort: &SortState,
) -> Result<()> {
    let Some(detail) = snapshot.fund_details.get(fund_id) else {
        let known: Vec<&str> = snapshot.fund_details.keys().map(String::as_str).collect();
        bail!(
            "Unknown fund '{}'. Funds in this snapshot: {}",
            fund_id,
            known.join(", ")
        );
    };

    println!(
        "{}",
        ui::style_text(&format!("{fund_id} holdings changes"), ui::StyleType::Title)
    );
    println!(
        "Comparing {} vs {}\n",
        ui::format_compact_date(&snapshot.dates.new),
        ui::format_compact_date(&snapshot.dates.old)
    );
    print!("{}", render_changes_table(detail, ranker, sort));

    ui::print_separator();
    println!(
        "{}",
        ui::style_text(&format!("{fund_id} current holdings"), ui::StyleType::Title)
    );
    print!("{}", render_holdings_table(detail, ranker, sort));
    Ok(())
}

pub fn render_changes_table(detail: &FundDetail, ranker: &Ranker, sort: &SortState) -> String {
    if detail.changes.is_empty() {
        return format!(
            "{}\n",
            ui::style_text("No change data for this period.", ui::StyleType::Subtle)
        );
    }
    let rows = ranker.sort(&detail.changes, sort.key, sort.direction);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::sort_header_cell("Ticker", SortKey::Ticker, sort),
        ui::sort_header_cell("Name", SortKey::Name, sort),
        ui::sort_header_cell("Δ Shares", SortKey::DeltaShares, sort),
        ui::sort_header_cell("Current Shares", SortKey::NewShares, sort),
        ui::sort_header_cell("Est. Value", SortKey::MonetaryValue, sort),
        ui::header_cell("Status"),
    ]);

    for record in &rows {
        table.add_row(vec![
            Cell::new(&record.ticker),
            Cell::new(&record.name),
            ui::delta_cell(record.delta_shares),
            ui::shares_cell(record.new_shares),
            ui::value_cell(record.monetary_value, &record.monetary_value_str),
            ui::status_cell(classify(record)),
        ]);
    }

    format!("{table}\n")
}

pub fn render_holdings_table(detail: &FundDetail, ranker: &Ranker, sort: &SortState) -> String {
    if detail.holdings.is_empty() {
        return format!(
            "{}\n",
            ui::style_text(
                "No holdings data (fund may be fully in cash).",
                ui::StyleType::Subtle
            )
        );
    }
    let rows = ranker.sort(&detail.holdings, sort.key, sort.direction);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::sort_header_cell("Ticker", SortKey::Ticker, sort),
        ui::sort_header_cell("Name", SortKey::Name, sort),
        ui::sort_header_cell("Shares Held", SortKey::NewShares, sort),
        ui::sort_header_cell("Market Value", SortKey::MonetaryValue, sort),
    ]);

    for holding in &rows {
        table.add_row(vec![
            Cell::new(&holding.ticker),
            Cell::new(&holding.name),
            ui::shares_cell(holding.new_shares),
            Cell::new(&holding.monetary_value_str)
                .set_alignment(comfy_table::CellAlignment::Right),
        ]);
    }

    format!("{table}\n")
}
