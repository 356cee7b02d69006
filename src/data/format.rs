//! Number and label formatting for cards, tables and chart axes.

use crate::data::model::ValueFormat;
use num_format::{Locale, ToFormattedString};

/// Round half up, the way browsers round (`-0.5` -> `0`, `2.5` -> `3`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn grouped(value: f64) -> String {
    let rounded = value.round() as i64;
    rounded.to_formatted_string(&Locale::en)
}

/// Render a summary figure: `$1,250,000`, `45,672`, `23.4%`.
pub fn format_value(value: f64, format: ValueFormat) -> String {
    match format {
        ValueFormat::Currency => format!("${}", grouped(value)),
        ValueFormat::Plain => grouped(value),
        ValueFormat::Percent => format!("{:.1}%", value),
    }
}

/// Compact form with one decimal: `1.4M`, `45.7K`, `999`.
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        format!("{}", num)
    }
}

/// Axis label in thousands of dollars: `$850K`.
pub fn currency_thousands(value: f64) -> String {
    let thousands = round_half_up(value / 1000.0) as i64;
    format!("${}K", thousands)
}

/// Signed change badge: `+12.5%` / `-2.1%`.
pub fn format_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.1}%", change)
    } else {
        format!("{:.1}%", change)
    }
}

/// `<value>%` with the value printed as-is (`35%`, `12.5%`).
pub fn percent_label(value: f64) -> String {
    format!("{}%", value)
}

/// Share of a total as a percentage, at most one decimal: `35%`, `33.3%`.
pub fn share_label(value: f64, total: f64) -> String {
    let share = (value / total * 1000.0).round() / 10.0;
    percent_label(share)
}

/// First letter of every name part: `John Smith` -> `JS`.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .collect()
}
