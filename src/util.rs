// Utility helpers for parsing and display formatting.
//
// This module centralizes all the "dirty" spreadsheet number handling so the
// rest of the code can assume clean, typed values.
use crate::types::CellValue;
use num_format::{Locale, ToFormattedString};
use tracing::debug;

const CURRENCY_SYMBOL: &str = "R$";

/// Convert a loosely-typed cell into `f64`, never failing.
///
/// - Absent values and empty text become `0.0`.
/// - Numbers pass through untouched.
/// - Text is treated as a currency amount: the `R$` symbol and all
///   whitespace are stripped, then separators are disambiguated with
///   [`normalize_separators`].
/// - Anything that still does not parse becomes `0.0`.
pub fn normalize_number(value: Option<&CellValue>) -> f64 {
    match value {
        None => 0.0,
        Some(CellValue::Number(n)) => *n,
        Some(CellValue::Text(s)) => parse_currency(s).unwrap_or_else(|| {
            if !s.trim().is_empty() {
                debug!(value = %s, "could not convert to a number, using 0");
            }
            0.0
        }),
    }
}

/// Parse a currency-like string such as `R$ 1.234,56` or `1,234.56`.
pub fn parse_currency(s: &str) -> Option<f64> {
    let stripped: String = s
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if stripped.is_empty() {
        return None;
    }
    let canonical = normalize_separators(&stripped)?;
    canonical.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rewrite a number so that `.` is the only decimal separator and no
/// thousands separators remain.
///
/// - Both `,` and `.` present: whichever occurs last is the decimal point.
/// - Only one kind of separator: a thousands separator when the string is
///   shaped like a grouped integer (`1.234`, `1,234,567`), a decimal point
///   otherwise (`3,5`, `3,50`, `1234.56`). `1.234` and `1,234` are
///   genuinely ambiguous; the grouped reading wins.
fn normalize_separators(s: &str) -> Option<String> {
    let last_comma = s.rfind(',');
    let last_dot = s.rfind('.');
    match (last_comma, last_dot) {
        (Some(c), Some(d)) if d > c => Some(s.replace(',', "")),
        (Some(_), Some(_)) => Some(s.replace('.', "").replace(',', ".")),
        (Some(_), None) if is_grouped_integer(s, ',') => Some(s.replace(',', "")),
        (Some(_), None) => Some(s.replace(',', ".")),
        (None, Some(_)) if is_grouped_integer(s, '.') => Some(s.replace('.', "")),
        _ => Some(s.to_string()),
    }
}

/// `[-]D{1,3}(<sep>DDD)+` with a non-zero leading digit.
fn is_grouped_integer(s: &str, sep: char) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut groups = digits.split(sep);
    let head = match groups.next() {
        Some(h) => h,
        None => return false,
    };
    if head.is_empty()
        || head.len() > 3
        || head.starts_with('0')
        || !head.chars().all(|c| c.is_ascii_digit())
    {
        return false;
    }
    let mut seen = 0;
    for g in groups {
        if g.len() != 3 || !g.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        seen += 1;
    }
    seen > 0
}

/// Parse a year marker cell into an integer.
///
/// Numbers are truncated; text must be an integer literal after trimming.
/// Returns `None` for anything else so the caller can skip the row.
pub fn parse_year(value: Option<&CellValue>) -> Option<i32> {
    match value? {
        CellValue::Number(n) if n.is_finite() && n.abs() < i32::MAX as f64 => Some(n.trunc() as i32),
        CellValue::Number(_) => None,
        CellValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<i32>().ok()
        }
    }
}

/// Truncate toward zero into an integer count, saturating at the `i64` bounds.
pub fn truncate_count(v: f64) -> i64 {
    // `as` saturates and maps NaN to 0.
    v.trunc() as i64
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value the Brazilian way:
    // - a fixed number of decimal places after a `,`, and
    // - `.` thousands separators (e.g., `1.234.567,89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::pt);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push(',');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// `R$ 1.234,56` style rendering used by tables and previews.
pub fn format_brl(n: f64) -> String {
    if n < 0.0 {
        format!("-{} {}", CURRENCY_SYMBOL, format_number(n.abs(), 2))
    } else {
        format!("{} {}", CURRENCY_SYMBOL, format_number(n, 2))
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages (e.g., `1.250 rows loaded`).
    n.to_formatted_string(&Locale::pt)
}
