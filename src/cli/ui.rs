use chrono::NaiveDate;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::rank::{SortDirection, SortKey, SortState};
use crate::core::status::HoldingStatus;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    GainValue,
    LossValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::GainValue => style(text).green().bold(),
        StyleType::LossValue => style(text).red().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Header cell for a sortable column, marking the active sort column
/// with a direction arrow.
pub fn sort_header_cell(text: &str, key: SortKey, state: &SortState) -> Cell {
    let text = if state.key == Some(key) {
        let arrow = match state.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        };
        format!("{text} {arrow}")
    } else {
        text.to_string()
    };
    header_cell(&text)
}

/// Renders a share count with thousands separators, right aligned.
pub fn shares_cell(shares: i64) -> Cell {
    Cell::new(group_thousands(shares)).set_alignment(CellAlignment::Right)
}

/// Renders a share delta with an explicit sign and gain/loss coloring.
pub fn delta_cell(delta: i64) -> Cell {
    let text = if delta > 0 {
        format!("+{}", group_thousands(delta))
    } else {
        group_thousands(delta)
    };
    let color = if delta > 0 { Color::Green } else { Color::Red };
    Cell::new(text)
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Renders a pre-formatted monetary string, colored by the sign of the
/// numeric value it came with. The string itself is backend supplied
/// and passed through untouched.
pub fn value_cell(value: f64, display: &str) -> Cell {
    let text = if value > 0.0 {
        format!("+{display}")
    } else {
        display.to_string()
    };
    let color = if value > 0.0 { Color::Green } else { Color::Red };
    Cell::new(text)
        .fg(color)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// Renders the status badge for a change row.
pub fn status_cell(status: HoldingStatus) -> Cell {
    let color = match status {
        HoldingStatus::Added => Color::Green,
        HoldingStatus::Increased => Color::Cyan,
        HoldingStatus::Reduced => Color::Yellow,
        HoldingStatus::Removed => Color::Red,
    };
    Cell::new(status.label())
        .fg(color)
        .set_alignment(CellAlignment::Center)
}

/// Renders the fund badges of an aggregated row.
pub fn funds_cell(funds: &[String]) -> Cell {
    Cell::new(funds.join(" ")).fg(Color::Magenta)
}

/// Formats an 8-digit `YYYYMMDD` date as `YYYY/MM/DD`, or "N/A" when
/// the backend sent something else.
pub fn format_compact_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y%m%d")
        .map(|d| d.format("%Y/%m/%d").to_string())
        .unwrap_or_else(|_| "N/A".to_string())
}

fn group_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Creates a spinner shown while the snapshot fetch is in flight.
pub fn new_fetch_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}
