use crate::types::{AmortizationEntry, PaybackResult};
use tracing::debug;

const MONTHS_PER_YEAR: u32 = 12;

/// Compute the break-even time of an amortization schedule.
///
/// Finds the first entry whose balance is non-negative right after a
/// negative one and interpolates linearly inside that year:
///
/// ```text
/// months = floor(|prev| * 12 / (curr - prev))
/// years  = index of the last negative entry
/// ```
///
/// A non-negative first entry has nothing to interpolate against and is
/// not a crossing; the scan simply moves on. Returns `(0, 0)` when no
/// negative-to-non-negative pair exists anywhere in the schedule.
pub fn compute_payback(schedule: &[AmortizationEntry]) -> PaybackResult {
    for (i, pair) in schedule.windows(2).enumerate() {
        let (prev, curr) = (pair[0].balance, pair[1].balance);
        if !(prev < 0.0 && curr >= 0.0) {
            continue;
        }
        let annual_delta = curr - prev;
        if annual_delta <= 0.0 || !annual_delta.is_finite() {
            debug!(index = i + 1, annual_delta, "degenerate crossing, scanning on");
            continue;
        }
        let deficit = prev.abs();
        // Multiply before dividing so exact fractions (4000/6000 -> 8) stay exact.
        let extra_months = (deficit * f64::from(MONTHS_PER_YEAR) / annual_delta).floor();
        let extra_months = if extra_months.is_finite() && extra_months > 0.0 {
            extra_months as u32
        } else {
            0
        };
        // `i` indexes the negative entry of the pair.
        let years = u32::try_from(i).unwrap_or(u32::MAX);
        return PaybackResult {
            years: years.saturating_add(extra_months / MONTHS_PER_YEAR),
            months: extra_months % MONTHS_PER_YEAR,
        };
    }

    debug!(entries = schedule.len(), "no break-even crossing");
    PaybackResult::default()
}
