// Financial data extraction and payback calculation for photovoltaic
// sales proposals.
//
// Spreadsheet exports arrive as loosely-typed rows. The pipeline is:
//
// rows -> classify -> extract (numbers via normalize_number) ->
// (SystemSpec, AmortizationSchedule) -> compute_payback and
// build_chart_series.
//
// Everything in that pipeline is pure and infallible. File loading and
// writing live in `loader` and `output`.
pub mod chart;
pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod loader;
pub mod mapping;
pub mod output;
pub mod payback;
pub mod reports;
pub mod types;
pub mod util;

pub use chart::build_chart_series;
pub use classify::{classify, RowKind};
pub use error::{ProposalError, Result};
pub use extract::{extract, extract_with_report, resolve_year, rows_from_extraction, ExtractReport};
pub use mapping::{match_label, SpecField, LABEL_TABLE};
pub use payback::compute_payback;
pub use types::{
    AmortizationEntry, AmortizationSchedule, CellValue, ChartSeries, ClientInfo, PaybackResult,
    ProposalSummary, Row, SystemSpec,
};
pub use util::normalize_number;
