use crate::chart::build_chart_series;
use crate::mapping::{SpecField, LABEL_TABLE};
use crate::payback::compute_payback;
use crate::types::{
    AmortizationEntry, ClientInfo, ProposalSummary, ScheduleTableRow, SpecTableRow, SystemSpec,
};
use crate::util::{format_brl, format_int, format_number};
use chrono::{Datelike, NaiveDate};

/// Proposal numbers look like `211124/2024`: issue date as `ddmmyy`, then the year.
pub fn proposal_number(issued: NaiveDate) -> String {
    format!("{}/{}", issued.format("%d%m%y"), issued.year())
}

/// Net value at the end of the schedule, 0 without a schedule.
pub fn total_savings(schedule: &[AmortizationEntry]) -> f64 {
    schedule.last().map(|e| e.balance).unwrap_or(0.0)
}

pub fn generate_summary(
    cliente: Option<ClientInfo>,
    spec: &SystemSpec,
    schedule: &[AmortizationEntry],
    issued: NaiveDate,
) -> ProposalSummary {
    ProposalSummary {
        numero_proposta: proposal_number(issued),
        cliente,
        sistema: spec.clone(),
        payback: compute_payback(schedule),
        economia_total: total_savings(schedule),
        amortizacao: schedule.to_vec(),
        grafico: build_chart_series(schedule),
    }
}

pub fn schedule_table(schedule: &[AmortizationEntry]) -> Vec<ScheduleTableRow> {
    schedule
        .iter()
        .map(|e| ScheduleTableRow {
            year: e.absolute_year,
            relative_year: e.relative_year,
            balance: format_brl(e.balance),
            monthly_savings: format_brl(e.monthly_savings),
        })
        .collect()
}

pub fn spec_table(spec: &SystemSpec) -> Vec<SpecTableRow> {
    LABEL_TABLE
        .iter()
        .map(|(label, field)| SpecTableRow {
            label: label.trim_end_matches(':').trim_end().to_string(),
            value: display_field(*field, spec),
        })
        .collect()
}

fn display_field(field: SpecField, spec: &SystemSpec) -> String {
    match field {
        SpecField::NumModulos => format_int(spec.num_modulos),
        SpecField::ContaAntes => format_brl(spec.conta_antes),
        SpecField::ContaDepois => format_brl(spec.conta_depois),
        SpecField::Investimento => format_brl(spec.investimento),
        SpecField::TipoFornecimento => spec.tipo_fornecimento.clone(),
        SpecField::ConsumoAtual => format!("{} kWh", format_number(spec.consumo_atual, 0)),
        SpecField::GeracaoMensal => format!("{} kWh", format_number(spec.geracao_mensal, 0)),
        SpecField::GeracaoAnual => format!("{} kWh", format_number(spec.geracao_anual, 0)),
        SpecField::PotenciaKwp => format!("{} kWp", format_number(spec.potencia_kwp, 2)),
        SpecField::PotenciaInversor => format!("{} kW", format_number(spec.potencia_inversor, 2)),
        SpecField::AreaTotal => format!("{} m²", format_number(spec.area_total, 2)),
    }
}
