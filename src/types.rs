use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tabled::Tabled;

/// A single cell of a spreadsheet export: either already numeric or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            CellValue::Number(_) => None,
        }
    }

    /// Empty text counts as "no value"; every number is a value.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

/// One spreadsheet row. Keys are column headers; `None` is an explicit null.
/// There is no fixed schema: the row's shape is inferred from which keys exist.
pub type Row = BTreeMap<String, Option<CellValue>>;

/// Normalized photovoltaic system attributes. Fields missing from a stored
/// blob load as their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSpec {
    /// kWh/month
    pub consumo_atual: f64,
    pub num_modulos: i64,
    /// kWp
    pub potencia_kwp: f64,
    pub potencia_inversor: f64,
    pub area_total: f64,
    pub geracao_mensal: f64,
    pub geracao_anual: f64,
    pub conta_antes: f64,
    pub conta_depois: f64,
    pub investimento: f64,
    pub tipo_fornecimento: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// `0` when loaded from a blob that only stores calendar years; running
    /// the entry back through extraction recomputes it.
    #[serde(rename = "ano_relativo", default)]
    pub relative_year: i32,
    #[serde(rename = "ano")]
    pub absolute_year: i32,
    #[serde(rename = "amortizacao")]
    pub balance: f64,
    #[serde(rename = "economia_mensal")]
    pub monthly_savings: f64,
}

/// Ordered by ascending relative year (input order).
pub type AmortizationSchedule = Vec<AmortizationEntry>;

/// Break-even time. `months` is always within `0..=11`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaybackResult {
    #[serde(rename = "anos")]
    pub years: u32,
    #[serde(rename = "meses")]
    pub months: u32,
}

impl fmt::Display for PaybackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} anos e {} meses", self.years, self.months)
    }
}

/// Chart-ready label/value pairs, same length and order as the schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub cpf_cnpj: String,
    #[serde(default)]
    pub endereco: String,
    #[serde(default)]
    pub cidade: String,
    #[serde(default)]
    pub telefone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProposalSummary {
    pub numero_proposta: String,
    pub cliente: Option<ClientInfo>,
    pub sistema: SystemSpec,
    pub payback: PaybackResult,
    pub economia_total: f64,
    pub amortizacao: AmortizationSchedule,
    pub grafico: ChartSeries,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ScheduleTableRow {
    #[serde(rename = "Ano")]
    #[tabled(rename = "Ano")]
    pub year: i32,
    #[serde(rename = "AnoRelativo")]
    #[tabled(rename = "AnoRelativo")]
    pub relative_year: i32,
    #[serde(rename = "Saldo")]
    #[tabled(rename = "Saldo")]
    pub balance: String,
    #[serde(rename = "EconomiaMensal")]
    #[tabled(rename = "EconomiaMensal")]
    pub monthly_savings: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SpecTableRow {
    #[serde(rename = "Campo")]
    #[tabled(rename = "Campo")]
    pub label: String,
    #[serde(rename = "Valor")]
    #[tabled(rename = "Valor")]
    pub value: String,
}
