// Energy-account label table.
//
// Maps the free-text labels found in the spreadsheet's energy account block
// to canonical `SystemSpec` fields. New spreadsheet layouts only need a
// change here.
use crate::types::{CellValue, SystemSpec};
use crate::util::{normalize_number, truncate_count};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecField {
    ConsumoAtual,
    NumModulos,
    PotenciaKwp,
    PotenciaInversor,
    AreaTotal,
    GeracaoMensal,
    GeracaoAnual,
    ContaAntes,
    ContaDepois,
    Investimento,
    TipoFornecimento,
}

/// Ordered `(label substring, field)` pairs. The first pair whose label is
/// contained in a row's text wins.
pub const LABEL_TABLE: [(&str, SpecField); 11] = [
    ("Consumo Total Permitido (mês) kwh:", SpecField::ConsumoAtual),
    ("Quantidade de módulos", SpecField::NumModulos),
    ("Potência do sistema", SpecField::PotenciaKwp),
    ("Potência do inversor", SpecField::PotenciaInversor),
    ("Área total instalada", SpecField::AreaTotal),
    ("Energia Média Gerada (mês)", SpecField::GeracaoMensal),
    ("Energia Média Gerada (ano)", SpecField::GeracaoAnual),
    ("Valor da conta antes", SpecField::ContaAntes),
    ("Valor da conta depois", SpecField::ContaDepois),
    ("Preço do Sistema", SpecField::Investimento),
    ("Padrão do Cliente", SpecField::TipoFornecimento),
];

impl SpecField {
    /// Canonical field name as stored in serialized proposals.
    pub fn key(self) -> &'static str {
        match self {
            SpecField::ConsumoAtual => "consumo_atual",
            SpecField::NumModulos => "num_modulos",
            SpecField::PotenciaKwp => "potencia_kwp",
            SpecField::PotenciaInversor => "potencia_inversor",
            SpecField::AreaTotal => "area_total",
            SpecField::GeracaoMensal => "geracao_mensal",
            SpecField::GeracaoAnual => "geracao_anual",
            SpecField::ContaAntes => "conta_antes",
            SpecField::ContaDepois => "conta_depois",
            SpecField::Investimento => "investimento",
            SpecField::TipoFornecimento => "tipo_fornecimento",
        }
    }

    /// Inverse of [`match_label`]: the spreadsheet label that maps to this field.
    pub fn label(self) -> &'static str {
        LABEL_TABLE
            .iter()
            .find(|(_, f)| *f == self)
            .map(|(label, _)| *label)
            .unwrap_or_default()
    }

    /// Write a raw cell into the matching `SystemSpec` field, normalizing
    /// numbers on the way.
    pub fn assign(self, spec: &mut SystemSpec, value: Option<&CellValue>) {
        match self {
            SpecField::ConsumoAtual => spec.consumo_atual = normalize_number(value),
            SpecField::NumModulos => spec.num_modulos = truncate_count(normalize_number(value)),
            SpecField::PotenciaKwp => spec.potencia_kwp = normalize_number(value),
            SpecField::PotenciaInversor => spec.potencia_inversor = normalize_number(value),
            SpecField::AreaTotal => spec.area_total = normalize_number(value),
            SpecField::GeracaoMensal => spec.geracao_mensal = normalize_number(value),
            SpecField::GeracaoAnual => spec.geracao_anual = normalize_number(value),
            SpecField::ContaAntes => spec.conta_antes = normalize_number(value),
            SpecField::ContaDepois => spec.conta_depois = normalize_number(value),
            SpecField::Investimento => spec.investimento = normalize_number(value),
            SpecField::TipoFornecimento => {
                spec.tipo_fornecimento = value.map(|v| v.to_string()).unwrap_or_default()
            }
        }
    }

    /// Read the field back out as a cell, for rebuilding spreadsheet rows.
    pub fn read(self, spec: &SystemSpec) -> CellValue {
        match self {
            SpecField::ConsumoAtual => spec.consumo_atual.into(),
            SpecField::NumModulos => spec.num_modulos.into(),
            SpecField::PotenciaKwp => spec.potencia_kwp.into(),
            SpecField::PotenciaInversor => spec.potencia_inversor.into(),
            SpecField::AreaTotal => spec.area_total.into(),
            SpecField::GeracaoMensal => spec.geracao_mensal.into(),
            SpecField::GeracaoAnual => spec.geracao_anual.into(),
            SpecField::ContaAntes => spec.conta_antes.into(),
            SpecField::ContaDepois => spec.conta_depois.into(),
            SpecField::Investimento => spec.investimento.into(),
            SpecField::TipoFornecimento => spec.tipo_fornecimento.clone().into(),
        }
    }
}

/// Find the field whose label is contained in `text`, in table order.
pub fn match_label(text: &str) -> Option<SpecField> {
    LABEL_TABLE
        .iter()
        .find(|(label, _)| text.contains(*label))
        .map(|(_, field)| *field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_label_substring() {
        assert_eq!(match_label("Quantidade de módulos"), Some(SpecField::NumModulos));
        assert_eq!(match_label("  Preço do Sistema (R$):"), Some(SpecField::Investimento));
        assert_eq!(
            match_label("Consumo Total Permitido (mês) kwh: 450"),
            Some(SpecField::ConsumoAtual)
        );
        assert_eq!(match_label("Irradiação média"), None);
        assert_eq!(match_label(""), None);
    }

    #[test]
    fn test_match_label_is_case_sensitive() {
        assert_eq!(match_label("preço do sistema"), None);
    }

    #[test]
    fn test_first_entry_wins() {
        // Both "antes" and "depois" appear; "antes" is earlier in the table.
        assert_eq!(
            match_label("Valor da conta antes / Valor da conta depois"),
            Some(SpecField::ContaAntes)
        );
    }

    #[test]
    fn test_label_inverse_covers_every_field() {
        for (label, field) in LABEL_TABLE {
            assert_eq!(field.label(), label);
            assert_eq!(match_label(field.label()), Some(field));
        }
    }

    #[test]
    fn test_assign_and_read() {
        let mut spec = SystemSpec::default();
        SpecField::NumModulos.assign(&mut spec, Some(&CellValue::from("12,70")));
        SpecField::Investimento.assign(&mut spec, Some(&CellValue::from("R$ 25.900,00")));
        SpecField::TipoFornecimento.assign(&mut spec, Some(&CellValue::from("Trifásico")));
        assert_eq!(spec.num_modulos, 12);
        assert_eq!(spec.investimento, 25900.0);
        assert_eq!(spec.tipo_fornecimento, "Trifásico");
        assert_eq!(SpecField::NumModulos.read(&spec), CellValue::Number(12.0));
        assert_eq!(SpecField::TipoFornecimento.read(&spec), CellValue::from("Trifásico"));
    }

    #[test]
    fn test_assign_absent_resets_to_default() {
        let mut spec = SystemSpec { area_total: 40.0, ..Default::default() };
        SpecField::AreaTotal.assign(&mut spec, None);
        assert_eq!(spec.area_total, 0.0);
    }
}
