use crate::classify::{
    classify, RowKind, BALANCE_KEY, ENERGY_LABEL_KEY, ENERGY_VALUE_KEY, PAYBACK_YEAR_KEY,
    SAVINGS_KEY,
};
use crate::mapping::{match_label, LABEL_TABLE};
use crate::types::{AmortizationEntry, AmortizationSchedule, CellValue, Row, SystemSpec};
use crate::util::{normalize_number, parse_year};
use tracing::debug;

/// Years at or above this are calendar years; below it, relative indices.
pub const ABSOLUTE_YEAR_THRESHOLD: i32 = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub total_rows: usize,
    pub payback_rows: usize,
    pub energy_rows: usize,
    pub skipped_rows: usize,
    pub invalid_payback_rows: usize,
}

/// Convert spreadsheet rows into a system specification and an amortization
/// schedule. Never fails: unusable rows are skipped and unusable values
/// degrade to zero.
///
/// `current_year` anchors relative payback years to the calendar.
pub fn extract(rows: &[Row], current_year: i32) -> (SystemSpec, AmortizationSchedule) {
    let (spec, schedule, _) = extract_with_report(rows, current_year);
    (spec, schedule)
}

pub fn extract_with_report(
    rows: &[Row],
    current_year: i32,
) -> (SystemSpec, AmortizationSchedule, ExtractReport) {
    let mut spec = SystemSpec::default();
    let mut schedule: AmortizationSchedule = Vec::new();
    let mut report = ExtractReport { total_rows: rows.len(), ..Default::default() };

    for (idx, row) in rows.iter().enumerate() {
        match classify(row) {
            RowKind::Payback { year, balance, savings } => {
                let Some(year) = parse_year(year) else {
                    debug!(row = idx, "payback row without an integer year, skipping");
                    report.invalid_payback_rows += 1;
                    continue;
                };
                let (relative_year, absolute_year) = resolve_year(year, current_year);
                schedule.push(AmortizationEntry {
                    relative_year,
                    absolute_year,
                    balance: normalize_number(Some(balance)),
                    monthly_savings: normalize_number(savings),
                });
                report.payback_rows += 1;
            }
            RowKind::Energy { label, value } => {
                report.energy_rows += 1;
                // Labels must be text; numeric labels never match.
                let Some(field) = label.and_then(CellValue::as_text).and_then(match_label) else {
                    continue;
                };
                debug!(row = idx, field = field.key(), "energy field set");
                field.assign(&mut spec, value);
            }
            RowKind::Unknown => {
                report.skipped_rows += 1;
            }
        }
    }

    (spec, schedule, report)
}

/// Split a payback year marker into `(relative_year, absolute_year)`.
///
/// `2026` with current year 2024 is `(3, 2026)`; `3` is `(3, 2026)` too.
pub fn resolve_year(year: i32, current_year: i32) -> (i32, i32) {
    if year >= ABSOLUTE_YEAR_THRESHOLD {
        (year.saturating_sub(current_year).saturating_add(1), year)
    } else {
        (year, current_year.saturating_add(year).saturating_sub(1))
    }
}

/// Rebuild spreadsheet rows from previously extracted values.
///
/// Payback rows carry the calendar year, or the relative year when the
/// calendar year falls below [`ABSOLUTE_YEAR_THRESHOLD`] and would be read
/// back as a relative index. Every `SystemSpec` field is emitted under its
/// table label, so feeding the result back into [`extract`] with the same
/// `current_year` reproduces the same values.
pub fn rows_from_extraction(spec: &SystemSpec, schedule: &[AmortizationEntry]) -> Vec<Row> {
    let mut rows = Vec::with_capacity(schedule.len() + LABEL_TABLE.len());
    for entry in schedule {
        let year = if entry.absolute_year >= ABSOLUTE_YEAR_THRESHOLD {
            entry.absolute_year
        } else {
            entry.relative_year
        };
        let mut row = Row::new();
        row.insert(PAYBACK_YEAR_KEY.to_string(), Some(CellValue::from(year)));
        row.insert(BALANCE_KEY.to_string(), Some(CellValue::from(entry.balance)));
        row.insert(SAVINGS_KEY.to_string(), Some(CellValue::from(entry.monthly_savings)));
        rows.push(row);
    }
    for (label, field) in LABEL_TABLE {
        let mut row = Row::new();
        row.insert(ENERGY_LABEL_KEY.to_string(), Some(CellValue::from(label)));
        row.insert(ENERGY_VALUE_KEY.to_string(), Some(field.read(spec)));
        rows.push(row);
    }
    rows
}
