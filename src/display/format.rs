//! Locale formatting of amounts and dates
//!
//! Uses the book's decimal separator, fraction digits and date pattern.

use chrono::NaiveDate;

use crate::config::BookSettings;
use crate::models::{Money, Periodicity};

/// Format an amount with the book's fraction digits and separators
pub fn format_value(amount: Money, settings: &BookSettings) -> String {
    let fixed = amount.to_fixed(settings.fraction_digits);
    let (negative, digits) = match fixed.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, fixed.as_str()),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let separator = settings.decimal_separator;
    let mut output = String::new();
    if negative {
        output.push('-');
    }
    output.push_str(&group_thousands(integer, separator.grouping_char()));
    if let Some(fraction) = fraction {
        output.push(separator.decimal_char());
        output.push_str(fraction);
    }
    output
}

/// Format a date with the book pattern, falling back to the periodicity default
pub fn format_date(date: NaiveDate, settings: &BookSettings, periodicity: Periodicity) -> String {
    let pattern = settings
        .date_pattern
        .as_deref()
        .unwrap_or_else(|| periodicity.date_pattern());
    date.format(pattern).to_string()
}

fn group_thousands(integer: &str, grouping: char) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(grouping);
        }
        grouped.push(ch);
    }
    grouped
}
