//! Admin updates to the deduction settings.
//!
//! Both endpoints accept `{ "amount": n }` and echo the stored value back.
//! Access control sits in front of these functions and is not handled here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::{DeductionSettings, DeductionSettingsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDeductionResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub personal_deduction: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KReceiptResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub k_receipt: Decimal,
}

pub fn update_personal_deduction(
    settings: &DeductionSettings,
    request: DeductionRequest,
) -> Result<PersonalDeductionResponse, DeductionSettingsError> {
    let personal_deduction = settings.set_personal_deduction(request.amount)?;
    Ok(PersonalDeductionResponse { personal_deduction })
}

pub fn update_k_receipt(
    settings: &DeductionSettings,
    request: DeductionRequest,
) -> Result<KReceiptResponse, DeductionSettingsError> {
    let k_receipt = settings.set_k_receipt_ceiling(request.amount)?;
    Ok(KReceiptResponse { k_receipt })
}
