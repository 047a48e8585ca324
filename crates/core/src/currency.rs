//! Display formatting for monetary amounts.
//!
//! Amounts are stored as integer minor units. The one display convention is
//! minor units / 100 with two decimals and Indian digit grouping
//! (`12,34,567.89`).

use crate::types::MinorUnits;

/// Format minor units as Indian rupees, e.g. `500000` -> `₹5,000.00`.
pub fn format_inr(minor: MinorUnits) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}₹{}.{:02}", group_indian(abs / 100), abs % 100)
}

/// Format minor units with a currency code prefix for non-INR currencies.
pub fn format_amount(minor: MinorUnits, currency: &str) -> String {
    if currency.eq_ignore_ascii_case("INR") {
        return format_inr(minor);
    }
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!(
        "{sign}{} {}.{:02}",
        currency.to_ascii_uppercase(),
        group_thousands(abs / 100),
        abs % 100
    )
}

/// Convert a major-unit amount (as typed in a spreadsheet) to minor units.
///
/// Returns `None` for non-finite or out-of-range input.
pub fn major_to_minor(major: f64) -> Option<MinorUnits> {
    if !major.is_finite() {
        return None;
    }
    let minor = (major * 100.0).round();
    if minor.abs() > i64::MAX as f64 {
        return None;
    }
    Some(minor as i64)
}

/// Last three digits, then groups of two: `1234567` -> `12,34,567`.
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Western grouping in threes: `1234567` -> `1,234,567`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
