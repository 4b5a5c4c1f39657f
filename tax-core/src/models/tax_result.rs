use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tax_bracket::{BRACKET_COUNT, standard_schedule};

/// Tax contributed by a single bracket, before withholding is deducted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLevel {
    pub level: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
}

/// Outcome of a tax calculation.
///
/// `net_tax` is the bracket total minus withholding. A negative value is a
/// refund owed to the taxpayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub net_tax: Decimal,
    pub tax_levels: [TaxLevel; BRACKET_COUNT],
}

impl TaxResult {
    /// A result with no tax due and every bracket at zero.
    pub fn zero() -> Self {
        Self {
            net_tax: Decimal::ZERO,
            tax_levels: standard_schedule().map(|bracket| TaxLevel {
                level: bracket.label.to_string(),
                tax: Decimal::ZERO,
            }),
        }
    }

    /// Sum of all bracket contributions.
    pub fn gross_tax(&self) -> Decimal {
        self.tax_levels.iter().map(|level| level.tax).sum()
    }

    pub fn is_refund(&self) -> bool {
        self.net_tax < Decimal::ZERO
    }
}
