use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of itemized allowance claimed against income.
///
/// Only [`AllowanceType::Donation`] and [`AllowanceType::KReceipt`] reduce
/// taxable income. Any other kind deserializes to [`AllowanceType::Other`]
/// and is ignored by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowanceType {
    #[serde(rename = "donation")]
    Donation,
    #[serde(rename = "k-receipt")]
    KReceipt,
    #[serde(rename = "other", other)]
    Other,
}

impl AllowanceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Donation => "donation",
            Self::KReceipt => "k-receipt",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "donation" => Self::Donation,
            "k-receipt" => Self::KReceipt,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for AllowanceType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allowance {
    pub allowance_type: AllowanceType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl Allowance {
    pub fn new(
        allowance_type: AllowanceType,
        amount: Decimal,
    ) -> Self {
        Self {
            allowance_type,
            amount,
        }
    }

    pub fn donation(amount: Decimal) -> Self {
        Self::new(AllowanceType::Donation, amount)
    }

    pub fn k_receipt(amount: Decimal) -> Self {
        Self::new(AllowanceType::KReceipt, amount)
    }
}
