// Runtime settings for the proposal CLI, read from flags or the environment.
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "proposta_solar", version, about = "Build photovoltaic sales proposals from spreadsheet exports")]
pub struct Settings {
    /// Spreadsheet rows to load (.json payload or .csv export)
    #[arg(short, long, env = "PROPOSTA_INPUT", default_value = "dados_completos.json")]
    pub input: PathBuf,

    /// Directory that receives amortizacao.csv and proposta.json
    #[arg(short, long, env = "PROPOSTA_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Calendar year used to anchor relative payback years (defaults to today)
    #[arg(long, env = "PROPOSTA_CURRENT_YEAR")]
    pub current_year: Option<i32>,

    /// Proposal issue date as YYYY-MM-DD (defaults to today)
    #[arg(long, env = "PROPOSTA_ISSUE_DATE")]
    pub issue_date: Option<NaiveDate>,

    /// Number of schedule rows shown in console previews
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,
}

impl Settings {
    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// An explicit `--current-year` wins over the issue date's year.
    pub fn effective_year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| self.issue_date().year())
    }

    pub fn schedule_csv_path(&self) -> PathBuf {
        self.output_dir.join("amortizacao.csv")
    }

    pub fn summary_json_path(&self) -> PathBuf {
        self.output_dir.join("proposta.json")
    }
}
