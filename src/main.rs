// Entry point and high-level CLI flow.
//
// - Option [1] loads the spreadsheet rows and extracts the system data and
//   payback schedule, printing diagnostics.
// - Option [2] computes the payback, writes the schedule CSV and the proposal
//   JSON, and previews both.
// - After generating a proposal, the user can choose to go back to the
//   selection menu or exit.
use clap::Parser;
use once_cell::sync::Lazy;
use proposta_solar::config::Settings;
use proposta_solar::types::{AmortizationSchedule, ClientInfo, SystemSpec};
use proposta_solar::util::{format_brl, format_int};
use proposta_solar::{extract, loader, output, reports};
use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

// Loaded once, reused for every proposal generated in this run.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Extracted>,
}

#[derive(Clone)]
struct Extracted {
    cliente: Option<ClientInfo>,
    spec: SystemSpec,
    schedule: AmortizationSchedule,
}

fn app_state() -> MutexGuard<'static, AppState> {
    APP_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read a single line of input after printing the common "Enter choice:" prompt.
///
/// Returns `None` once stdin is closed.
fn read_choice() -> Option<String> {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to Menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
            return false;
        }
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Handle option [1]: load the rows and run the extraction.
fn handle_load(settings: &Settings) {
    let input = match loader::load_rows(&settings.input) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
            return;
        }
    };
    let current_year = settings.effective_year();
    let (spec, schedule, report) = extract::extract_with_report(&input.rows, current_year);
    info!(?report, current_year, "extraction finished");

    println!(
        "Processing spreadsheet... ({} rows read, {} payback years, {} energy rows)",
        format_int(report.total_rows),
        format_int(report.payback_rows),
        format_int(report.energy_rows)
    );
    if report.invalid_payback_rows > 0 {
        println!(
            "Note: {} payback rows skipped (year is not an integer).",
            format_int(report.invalid_payback_rows)
        );
    }
    if report.skipped_rows > 0 {
        println!("Info: {} rows did not match a known block.", format_int(report.skipped_rows));
    }
    println!();

    app_state().data = Some(Extracted { cliente: input.cliente, spec, schedule });
}

/// Handle option [2]: payback, chart series, files and previews.
fn handle_generate(settings: &Settings) {
    let data = app_state().data.clone();
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the spreadsheet first (option 1).\n");
        return;
    };

    let summary = reports::generate_summary(data.cliente, &data.spec, &data.schedule, settings.issue_date());

    let csv_path = settings.schedule_csv_path();
    if let Err(e) = output::write_csv(&csv_path, &summary.amortizacao) {
        warn!(path = %csv_path.display(), error = %e, "could not write schedule");
        eprintln!("Write error: {}", e);
    }
    let json_path = settings.summary_json_path();
    if let Err(e) = output::write_json(&json_path, &summary) {
        warn!(path = %json_path.display(), error = %e, "could not write proposal");
        eprintln!("Write error: {}", e);
    }

    println!("Proposta {}\n", summary.numero_proposta);
    output::preview_table("Dados do Sistema", None, &reports::spec_table(&summary.sistema), usize::MAX);
    let note = format!("first {} years", settings.preview_rows);
    output::preview_table(
        "Amortização",
        Some(note.as_str()),
        &reports::schedule_table(&summary.amortizacao),
        settings.preview_rows,
    );
    println!("(Full schedule exported to {})", csv_path.display());
    println!("(Proposal data exported to {})\n", json_path.display());
    println!("Payback: {}", summary.payback);
    println!("Economia total: {}\n", format_brl(summary.economia_total));
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let settings = Settings::parse();
    info!(input = %settings.input.display(), "starting proposal builder");

    loop {
        println!("Select an option:");
        println!("[1] Load the spreadsheet rows");
        println!("[2] Generate proposal\n");
        let Some(choice) = read_choice() else {
            break;
        };
        match choice.as_str() {
            "1" => handle_load(&settings),
            "2" => {
                println!();
                handle_generate(&settings);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => println!("Invalid choice. Please enter 1 or 2.\n"),
        }
    }
}
