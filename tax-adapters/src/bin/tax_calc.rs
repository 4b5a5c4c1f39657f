use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tax_adapters::admin::{self, DeductionRequest};
use tax_adapters::{ErrorResponse, SettingsFile, TaxRequest, request, tax_file};
use tax_core::{Allowance, DeductionSettings};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal income tax calculator.
///
/// Prints results as JSON on stdout. Deduction settings start at their
/// defaults and can be changed with a settings file or the admin flags.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version, about, long_about = None)]
struct Cli {
    /// TOML settings file with `personal_deduction` and `k_receipt_ceiling`.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the personal deduction (minimum 10,000).
    #[arg(long, global = true, allow_negative_numbers = true)]
    personal_deduction: Option<Decimal>,

    /// Override the k-receipt ceiling (minimum 0).
    #[arg(long = "k-receipt", global = true, allow_negative_numbers = true)]
    k_receipt_ceiling: Option<Decimal>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate tax for one taxpayer.
    Calculate(CalculateArgs),

    /// Calculate tax for every row of a `totalIncome,wht,donation` CSV file.
    Upload {
        /// Path to the CSV file.
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct CalculateArgs {
    /// Read a JSON request body instead of the individual flags.
    #[arg(long, conflicts_with_all = ["income", "wht", "donation", "k_receipt_allowance"])]
    request: Option<PathBuf>,

    /// Total income for the year.
    #[arg(long, required_unless_present = "request", allow_negative_numbers = true)]
    income: Option<Decimal>,

    /// Withholding tax already paid.
    #[arg(long, allow_negative_numbers = true)]
    wht: Option<Decimal>,

    /// Donation allowance.
    #[arg(long, allow_negative_numbers = true)]
    donation: Option<Decimal>,

    /// k-receipt allowance.
    #[arg(long, allow_negative_numbers = true)]
    k_receipt_allowance: Option<Decimal>,
}

impl CalculateArgs {
    fn to_request(&self) -> Result<TaxRequest> {
        if let Some(path) = &self.request {
            let body = fs::read_to_string(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            return serde_json::from_str(&body)
                .with_context(|| format!("Failed to parse request: {}", path.display()));
        }

        let allowances = self
            .donation
            .map(Allowance::donation)
            .into_iter()
            .chain(self.k_receipt_allowance.map(Allowance::k_receipt))
            .collect();

        Ok(TaxRequest {
            total_income: self.income.unwrap_or_default(),
            wht: self.wht.unwrap_or_default(),
            allowances,
        })
    }
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Writes to stderr so stdout carries only JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn configure(cli: &Cli) -> Result<DeductionSettings> {
    let settings = DeductionSettings::new();

    if let Some(path) = &cli.config {
        SettingsFile::load(path)?
            .apply(&settings)
            .with_context(|| format!("Failed to apply settings: {}", path.display()))?;
    }
    if let Some(amount) = cli.personal_deduction {
        admin::update_personal_deduction(&settings, DeductionRequest { amount })?;
    }
    if let Some(amount) = cli.k_receipt_ceiling {
        admin::update_k_receipt(&settings, DeductionRequest { amount })?;
    }

    debug!(config = ?settings.get(), "deduction settings ready");
    Ok(settings)
}

fn to_json(value: &impl Serialize) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize response")
}

fn run(cli: &Cli) -> Result<String> {
    let settings = configure(cli)?;

    match &cli.command {
        Command::Calculate(args) => {
            let response = request::calculate(&settings, args.to_request()?)?;
            to_json(&response)
        }
        Command::Upload { file } => {
            let response = tax_file::load_from_file(file, &settings)?;
            to_json(&response)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            let body = ErrorResponse::new(format!("{err:#}"));
            println!("{}", to_json(&body).unwrap_or(body.message));
            ExitCode::FAILURE
        }
    }
}
