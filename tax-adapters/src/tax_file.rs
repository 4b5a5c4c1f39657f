//! Batch tax calculation from an uploaded CSV file.
//!
//! ## CSV Format
//!
//! The header must be exactly these three columns, in this order:
//!
//! | Column | Type | Notes |
//! |---------------|---------|----------------------------------------|
//! | `totalIncome` | decimal | |
//! | `wht` | decimal | Withholding tax already paid |
//! | `donation` | decimal | Becomes a single donation allowance |
//!
//! ```csv
//! totalIncome,wht,donation
//! 500000.0,0.0,0.0
//! 600000.0,40000.0,20000.0
//! ```
//!
//! Every row is calculated against one snapshot of the deduction settings,
//! taken before the first row. Rows come back in file order as either a
//! `tax` or a `taxRefund` record.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use tax_core::{Allowance, DeductionSettings, IncomeTaxCalculator, IncomeTaxError, IncomeTaxInput};
use thiserror::Error;
use tracing::debug;

const EXPECTED_HEADER: [&str; 3] = ["totalIncome", "wht", "donation"];

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while reading or calculating a tax file.
///
/// Row numbers are 1-based and do not count the header.
#[derive(Debug, Error)]
pub enum TaxFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structurally invalid CSV, such as a row with the wrong column count.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("Failed to read CSV header")]
    MissingHeader,

    #[error("Invalid CSV header format")]
    InvalidHeader(Vec<String>),

    #[error("Invalid totalIncome format '{value}' on row {row}")]
    InvalidTotalIncome { value: String, row: usize },

    #[error("Invalid WHT format '{value}' on row {row}")]
    InvalidWht { value: String, row: usize },

    #[error("Invalid donation format '{value}' on row {row}")]
    InvalidDonation { value: String, row: usize },

    #[error("{source} on row {row}")]
    Calculation {
        row: usize,
        #[source]
        source: IncomeTaxError,
    },
}

// ---------------------------------------------------------------------------
// Rows and records
// ---------------------------------------------------------------------------

/// One data row of a tax file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxFileRow {
    pub total_income: Decimal,
    pub wht: Decimal,
    pub donation: Decimal,
}

impl TaxFileRow {
    fn to_input(&self) -> IncomeTaxInput {
        IncomeTaxInput {
            total_income: self.total_income,
            wht: self.wht,
            allowances: vec![Allowance::donation(self.donation)],
        }
    }
}

/// Per-row outcome: tax owed, or a refund with the sign inverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaxRecord {
    Due {
        #[serde(rename = "totalIncome", with = "rust_decimal::serde::float")]
        total_income: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        tax: Decimal,
    },
    Refund {
        #[serde(rename = "totalIncome", with = "rust_decimal::serde::float")]
        total_income: Decimal,
        #[serde(rename = "taxRefund", with = "rust_decimal::serde::float")]
        tax_refund: Decimal,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaxFileResponse {
    pub taxes: Vec<TaxRecord>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn parse_amount(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

fn check_header(header: &csv::StringRecord) -> Result<(), TaxFileError> {
    if header.is_empty() {
        return Err(TaxFileError::MissingHeader);
    }
    if !header.iter().eq(EXPECTED_HEADER) {
        return Err(TaxFileError::InvalidHeader(
            header.iter().map(str::to_string).collect(),
        ));
    }
    Ok(())
}

fn convert_record(
    record: &csv::StringRecord,
    row: usize,
) -> Result<TaxFileRow, TaxFileError> {
    let field = |idx: usize| record.get(idx).unwrap_or_default();

    let total_income =
        parse_amount(field(0)).ok_or_else(|| TaxFileError::InvalidTotalIncome {
            value: field(0).to_string(),
            row,
        })?;
    let wht = parse_amount(field(1)).ok_or_else(|| TaxFileError::InvalidWht {
        value: field(1).to_string(),
        row,
    })?;
    let donation = parse_amount(field(2)).ok_or_else(|| TaxFileError::InvalidDonation {
        value: field(2).to_string(),
        row,
    })?;

    Ok(TaxFileRow {
        total_income,
        wht,
        donation,
    })
}

/// Parses CSV text into rows, in file order.
///
/// # Errors
///
/// * [`TaxFileError::MissingHeader`] / [`TaxFileError::InvalidHeader`] when
///   the header is absent or differs from `totalIncome,wht,donation`.
/// * A field-specific format error when a cell is not a number.
/// * [`TaxFileError::Parse`] when the CSV itself is malformed.
pub fn parse_rows(input: &str) -> Result<Vec<TaxFileRow>, TaxFileError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .flexible(false)
        .from_reader(input.as_bytes());

    check_header(reader.headers()?)?;

    reader
        .records()
        .enumerate()
        .map(|(idx, result)| {
            let record = result?;
            convert_record(&record, idx + 1)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Calculates every row with the same calculator.
///
/// Stops at the first row the calculator rejects; no partial response is
/// returned.
pub fn calculate_rows(
    rows: &[TaxFileRow],
    calculator: &IncomeTaxCalculator,
) -> Result<TaxFileResponse, TaxFileError> {
    let taxes = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| -> Result<TaxRecord, TaxFileError> {
            let result = calculator
                .calculate(&row.to_input())
                .map_err(|source| TaxFileError::Calculation {
                    row: idx + 1,
                    source,
                })?;

            Ok(if result.is_refund() {
                TaxRecord::Refund {
                    total_income: row.total_income,
                    tax_refund: -result.net_tax,
                }
            } else {
                TaxRecord::Due {
                    total_income: row.total_income,
                    tax: result.net_tax,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(rows = taxes.len(), "calculated tax file");
    Ok(TaxFileResponse { taxes })
}

/// Parses `input` and calculates every row against the current settings.
pub fn load_from_str(
    input: &str,
    settings: &DeductionSettings,
) -> Result<TaxFileResponse, TaxFileError> {
    let rows = parse_rows(input)?;
    calculate_rows(&rows, &settings.calculator())
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(
    path: &Path,
    settings: &DeductionSettings,
) -> Result<TaxFileResponse, TaxFileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TaxFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents, settings)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
