//! Progressive personal income tax calculation.
//!
//! Net tax is computed in the following steps:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1 | Validate total income and withholding tax (WHT) |
//! | 2 | Zero income returns immediately with every bracket at zero |
//! | 3 | Cap the donation (100,000) and k-receipt (configurable) allowances |
//! | 4 | Taxable income = income - personal deduction - capped allowances |
//! | 5 | Apply the five-tier schedule, bracket by bracket |
//! | 6 | Net tax = bracket total - WHT (negative means a refund) |
//!
//! Taxable income is not floored at zero. Any value at or below 150,000,
//! negative included, falls entirely inside the 0% bracket.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::calculations::{IncomeTaxCalculator, IncomeTaxInput};
//! use tax_core::{Allowance, DeductionConfig};
//!
//! let input = IncomeTaxInput {
//!     total_income: dec!(500000),
//!     wht: dec!(0),
//!     allowances: vec![
//!         Allowance::donation(dec!(200000)),
//!         Allowance::k_receipt(dec!(100000)),
//!     ],
//! };
//!
//! let calculator = IncomeTaxCalculator::new(DeductionConfig::default());
//! let result = calculator.calculate(&input).unwrap();
//!
//! assert_eq!(result.net_tax, dec!(14000));
//! assert_eq!(result.tax_levels[1].tax, dec!(14000));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{bracket_portion, cap};
use crate::models::{
    Allowance, AllowanceType, BRACKET_COUNT, DeductionConfig, TaxBracket, TaxLevel, TaxResult,
    standard_schedule,
};

/// Errors that can occur during an income tax calculation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncomeTaxError {
    /// Total income was negative.
    #[error("TotalIncome must be greater than 0")]
    InvalidIncome(Decimal),

    /// Withholding tax was negative or larger than total income.
    #[error("wht must be between 0 and totalIncome")]
    InvalidWht { wht: Decimal, total_income: Decimal },

    /// A donation or k-receipt allowance carried a negative amount.
    #[error("{} must be greater than 0", allowance_field(.allowance_type))]
    InvalidAllowance {
        allowance_type: AllowanceType,
        amount: Decimal,
    },
}

fn allowance_field(allowance_type: &AllowanceType) -> &'static str {
    match allowance_type {
        AllowanceType::KReceipt => "kReceiptAmount",
        AllowanceType::Donation | AllowanceType::Other => "donation",
    }
}

/// Input values for a single calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeTaxInput {
    pub total_income: Decimal,
    pub wht: Decimal,
    pub allowances: Vec<Allowance>,
}

/// Allowance amounts after their ceilings have been applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AppliedAllowances {
    donation: Decimal,
    k_receipt: Decimal,
}

impl AppliedAllowances {
    fn total(&self) -> Decimal {
        self.donation.saturating_add(self.k_receipt)
    }
}

/// Calculator for personal income tax under the fixed progressive schedule.
///
/// The calculator holds a [`DeductionConfig`] snapshot taken when it was
/// built. It never reads shared state, so one instance can be used from many
/// threads and repeated calls with equal input return equal results.
#[derive(Debug, Clone)]
pub struct IncomeTaxCalculator {
    config: DeductionConfig,
    schedule: [TaxBracket; BRACKET_COUNT],
}

impl IncomeTaxCalculator {
    pub fn new(config: DeductionConfig) -> Self {
        Self {
            config,
            schedule: standard_schedule(),
        }
    }

    /// The deduction snapshot this calculator applies.
    pub fn config(&self) -> DeductionConfig {
        self.config
    }

    /// Calculates net tax and the per-bracket breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`IncomeTaxError`] if:
    /// - Total income is negative
    /// - WHT is negative or exceeds total income
    /// - A donation or k-receipt amount is negative (not checked when total
    ///   income is exactly zero)
    pub fn calculate(
        &self,
        input: &IncomeTaxInput,
    ) -> Result<TaxResult, IncomeTaxError> {
        self.compute(input.total_income, input.wht, &input.allowances)
    }

    fn compute(
        &self,
        total_income: Decimal,
        wht: Decimal,
        allowances: &[Allowance],
    ) -> Result<TaxResult, IncomeTaxError> {
        self.validate_income(total_income)?;
        self.validate_wht(wht, total_income)?;

        // Allowances are neither validated nor applied for zero income.
        if total_income.is_zero() {
            debug!("total income is zero, no tax due");
            return Ok(TaxResult::zero());
        }

        let applied = self.applied_allowances(allowances)?;
        let taxable_income = self.taxable_income(total_income, applied);
        let tax_levels = self.tax_levels(taxable_income);
        let net_tax = self.net_tax(&tax_levels, wht);

        debug!(
            %total_income,
            %wht,
            donation = %applied.donation,
            k_receipt = %applied.k_receipt,
            %taxable_income,
            %net_tax,
            "calculated income tax"
        );

        Ok(TaxResult {
            net_tax,
            tax_levels,
        })
    }

    fn validate_income(
        &self,
        total_income: Decimal,
    ) -> Result<(), IncomeTaxError> {
        if total_income < Decimal::ZERO {
            return Err(IncomeTaxError::InvalidIncome(total_income));
        }
        Ok(())
    }

    fn validate_wht(
        &self,
        wht: Decimal,
        total_income: Decimal,
    ) -> Result<(), IncomeTaxError> {
        if wht < Decimal::ZERO || wht > total_income {
            return Err(IncomeTaxError::InvalidWht { wht, total_income });
        }
        Ok(())
    }

    /// Caps each allowance at its ceiling.
    ///
    /// Entries are not accumulated: when a type appears more than once, the
    /// last entry replaces the earlier ones.
    fn applied_allowances(
        &self,
        allowances: &[Allowance],
    ) -> Result<AppliedAllowances, IncomeTaxError> {
        let mut applied = AppliedAllowances::default();

        for allowance in allowances {
            match allowance.allowance_type {
                AllowanceType::Donation => {
                    self.validate_allowance(allowance)?;
                    applied.donation = cap(allowance.amount, self.config.donation_ceiling());
                }
                AllowanceType::KReceipt => {
                    self.validate_allowance(allowance)?;
                    applied.k_receipt = cap(allowance.amount, self.config.k_receipt_ceiling);
                }
                AllowanceType::Other => {
                    warn!(amount = %allowance.amount, "ignoring unsupported allowance type");
                }
            }
        }

        Ok(applied)
    }

    fn validate_allowance(
        &self,
        allowance: &Allowance,
    ) -> Result<(), IncomeTaxError> {
        if allowance.amount < Decimal::ZERO {
            return Err(IncomeTaxError::InvalidAllowance {
                allowance_type: allowance.allowance_type,
                amount: allowance.amount,
            });
        }
        Ok(())
    }

    /// Total income less the personal deduction and applied allowances.
    ///
    /// Saturates instead of overflowing; any result at or below 150,000 is
    /// untaxed, so a clamped negative value yields the same breakdown.
    fn taxable_income(
        &self,
        total_income: Decimal,
        applied: AppliedAllowances,
    ) -> Decimal {
        total_income
            .saturating_sub(self.config.personal_deduction)
            .saturating_sub(applied.total())
    }

    /// Tax contributed by each bracket of the schedule.
    fn tax_levels(
        &self,
        taxable_income: Decimal,
    ) -> [TaxLevel; BRACKET_COUNT] {
        self.schedule.clone().map(|bracket| {
            let portion = bracket_portion(taxable_income, bracket.min_income, bracket.max_income);
            TaxLevel {
                level: bracket.label.to_string(),
                tax: portion * bracket.tax_rate,
            }
        })
    }

    fn net_tax(
        &self,
        tax_levels: &[TaxLevel],
        wht: Decimal,
    ) -> Decimal {
        tax_levels.iter().map(|level| level.tax).sum::<Decimal>() - wht
    }
}

/// Calculates tax for one taxpayer against a configuration snapshot.
///
/// Shorthand for building an [`IncomeTaxCalculator`] and calling
/// [`IncomeTaxCalculator::calculate`].
pub fn compute_tax(
    total_income: Decimal,
    wht: Decimal,
    allowances: &[Allowance],
    config: DeductionConfig,
) -> Result<TaxResult, IncomeTaxError> {
    IncomeTaxCalculator::new(config).compute(total_income, wht, allowances)
}
