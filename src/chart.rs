use crate::types::{AmortizationEntry, ChartSeries};

/// Labels are calendar years, values the amortization balance, one point
/// per schedule entry in schedule order.
pub fn build_chart_series(schedule: &[AmortizationEntry]) -> ChartSeries {
    let (labels, values) = schedule
        .iter()
        .map(|e| (e.absolute_year.to_string(), e.balance))
        .unzip();
    ChartSeries { labels, values }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_follow_schedule() {
        let schedule = vec![
            AmortizationEntry { relative_year: 1, absolute_year: 2025, balance: -8000.0, monthly_savings: 300.0 },
            AmortizationEntry { relative_year: 2, absolute_year: 2026, balance: -4200.5, monthly_savings: 310.0 },
            AmortizationEntry { relative_year: 3, absolute_year: 2027, balance: 150.0, monthly_savings: 320.0 },
        ];
        let series = build_chart_series(&schedule);
        assert_eq!(series.labels, vec!["2025", "2026", "2027"]);
        assert_eq!(series.values, vec![-8000.0, -4200.5, 150.0]);
    }

    #[test]
    fn test_empty_schedule() {
        assert_eq!(build_chart_series(&[]), ChartSeries::default());
    }
}
