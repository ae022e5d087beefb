// Row shape detection.
//
// Spreadsheet exports carry no schema, so a row's role is inferred from the
// marker keys it contains. Classification happens once per row and the
// extractor only ever matches on the resulting `RowKind`.
use crate::types::{CellValue, Row};

/// Column holding the year of a payback chart row.
pub const PAYBACK_YEAR_KEY: &str = "Gráfico Payback";
/// Column holding the cumulative amortization balance of a payback row.
pub const BALANCE_KEY: &str = "col_2";
/// Column holding the monthly savings of a payback row.
pub const SAVINGS_KEY: &str = "col_3";
/// Column holding the free-text label of an energy account row.
pub const ENERGY_LABEL_KEY: &str = "DADOS DA CONTA DE ENERGIA";
/// Column holding the value of an energy account row.
pub const ENERGY_VALUE_KEY: &str = "col_7";

/// Borrowed view of the cells the extractor needs from a classified row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowKind<'a> {
    Payback {
        year: Option<&'a CellValue>,
        balance: &'a CellValue,
        savings: Option<&'a CellValue>,
    },
    Energy {
        label: Option<&'a CellValue>,
        value: Option<&'a CellValue>,
    },
    Unknown,
}

fn cell<'a>(row: &'a Row, key: &str) -> Option<&'a CellValue> {
    row.get(key).and_then(Option::as_ref)
}

/// Tag a row as a payback row, an energy account row or unknown.
///
/// The payback check runs first, so a row carrying both markers is a
/// payback row.
pub fn classify(row: &Row) -> RowKind<'_> {
    if row.contains_key(PAYBACK_YEAR_KEY) {
        if let Some(balance) = cell(row, BALANCE_KEY).filter(|v| !v.is_blank()) {
            return RowKind::Payback {
                year: cell(row, PAYBACK_YEAR_KEY),
                balance,
                savings: cell(row, SAVINGS_KEY),
            };
        }
    }
    if row.contains_key(ENERGY_LABEL_KEY) {
        return RowKind::Energy {
            label: cell(row, ENERGY_LABEL_KEY),
            value: cell(row, ENERGY_VALUE_KEY),
        };
    }
    RowKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Option<CellValue>)]) -> Row {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_payback_row() {
        let r = row(&[
            (PAYBACK_YEAR_KEY, Some("2025".into())),
            (BALANCE_KEY, Some("-R$ 10.000,00".into())),
            (SAVINGS_KEY, Some("R$ 350,00".into())),
        ]);
        match classify(&r) {
            RowKind::Payback { year, balance, savings } => {
                assert_eq!(year, Some(&CellValue::from("2025")));
                assert_eq!(balance, &CellValue::from("-R$ 10.000,00"));
                assert_eq!(savings, Some(&CellValue::from("R$ 350,00")));
            }
            other => panic!("expected payback row, got {:?}", other),
        }
    }

    #[test]
    fn test_payback_marker_without_balance_is_unknown() {
        let blank = row(&[(PAYBACK_YEAR_KEY, Some("Ano".into())), (BALANCE_KEY, Some("".into()))]);
        assert_eq!(classify(&blank), RowKind::Unknown);
        let null = row(&[(PAYBACK_YEAR_KEY, Some("Ano".into())), (BALANCE_KEY, None)]);
        assert_eq!(classify(&null), RowKind::Unknown);
        let missing = row(&[(PAYBACK_YEAR_KEY, Some("2025".into()))]);
        assert_eq!(classify(&missing), RowKind::Unknown);
    }

    #[test]
    fn test_numeric_zero_balance_is_payback() {
        let r = row(&[(PAYBACK_YEAR_KEY, Some(CellValue::from(3))), (BALANCE_KEY, Some(CellValue::Number(0.0)))]);
        assert!(matches!(classify(&r), RowKind::Payback { .. }));
    }

    #[test]
    fn test_energy_row() {
        let r = row(&[
            (ENERGY_LABEL_KEY, Some("Quantidade de módulos".into())),
            (ENERGY_VALUE_KEY, Some("12".into())),
        ]);
        assert_eq!(
            classify(&r),
            RowKind::Energy {
                label: Some(&CellValue::from("Quantidade de módulos")),
                value: Some(&CellValue::from("12")),
            }
        );
    }

    #[test]
    fn test_payback_wins_over_energy() {
        let r = row(&[
            (PAYBACK_YEAR_KEY, Some("1".into())),
            (BALANCE_KEY, Some("-100".into())),
            (ENERGY_LABEL_KEY, Some("Preço do Sistema".into())),
        ]);
        assert!(matches!(classify(&r), RowKind::Payback { .. }));
    }

    #[test]
    fn test_payback_marker_falls_through_to_energy() {
        let r = row(&[
            (PAYBACK_YEAR_KEY, Some("".into())),
            (ENERGY_LABEL_KEY, Some("Preço do Sistema".into())),
        ]);
        assert!(matches!(classify(&r), RowKind::Energy { .. }));
    }

    #[test]
    fn test_unknown_row() {
        let r = row(&[("row_number", Some("7".into())), ("col_4", Some("x".into()))]);
        assert_eq!(classify(&r), RowKind::Unknown);
        assert_eq!(classify(&Row::new()), RowKind::Unknown);
    }
}
