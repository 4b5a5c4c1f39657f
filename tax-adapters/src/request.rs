//! JSON request and response shapes for a single tax calculation.
//!
//! A request looks like:
//!
//! ```json
//! {
//!   "totalIncome": 500000.0,
//!   "wht": 0.0,
//!   "allowances": [{ "allowanceType": "donation", "amount": 200000.0 }]
//! }
//! ```
//!
//! The response carries `tax` when money is owed and `taxRefund` (sign
//! inverted) when withholding exceeds the bracket total. Both shapes include
//! the five-entry `taxlevel` breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{
    Allowance, DeductionSettings, IncomeTaxCalculator, IncomeTaxError, IncomeTaxInput, TaxLevel,
    TaxResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub wht: Decimal,
    #[serde(default)]
    pub allowances: Vec<Allowance>,
}

impl From<TaxRequest> for IncomeTaxInput {
    fn from(request: TaxRequest) -> Self {
        IncomeTaxInput {
            total_income: request.total_income,
            wht: request.wht,
            allowances: request.allowances,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaxResponse {
    Due {
        #[serde(with = "rust_decimal::serde::float")]
        tax: Decimal,
        #[serde(rename = "taxlevel")]
        tax_level: Vec<TaxLevel>,
    },
    Refund {
        #[serde(rename = "taxRefund", with = "rust_decimal::serde::float")]
        tax_refund: Decimal,
        #[serde(rename = "taxlevel")]
        tax_level: Vec<TaxLevel>,
    },
}

impl From<TaxResult> for TaxResponse {
    fn from(result: TaxResult) -> Self {
        let tax_level = result.tax_levels.to_vec();
        if result.is_refund() {
            TaxResponse::Refund {
                tax_refund: -result.net_tax,
                tax_level,
            }
        } else {
            TaxResponse::Due {
                tax: result.net_tax,
                tax_level,
            }
        }
    }
}

/// Client-visible failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Runs one request against the current deduction settings.
pub fn calculate(
    settings: &DeductionSettings,
    request: TaxRequest,
) -> Result<TaxResponse, IncomeTaxError> {
    calculate_with(&settings.calculator(), request)
}

/// Runs one request against an existing calculator.
pub fn calculate_with(
    calculator: &IncomeTaxCalculator,
    request: TaxRequest,
) -> Result<TaxResponse, IncomeTaxError> {
    let input = IncomeTaxInput::from(request);
    calculator.calculate(&input).map(TaxResponse::from)
}
