//! Process-wide deduction settings.
//!
//! [`DeductionSettings`] owns the two configurable ceilings behind an
//! [`RwLock`]. Callers share it by reference (usually through an `Arc`) and
//! take a [`DeductionConfig`] snapshot for each calculation, so a calculation
//! sees either the value before or after a concurrent update, never a mix
//! of the two fields from different writes.
//!
//! Updates are last-writer-wins. No versioning is kept.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::DeductionSettings;
//!
//! let settings = DeductionSettings::new();
//! settings.set_personal_deduction(dec!(70000)).unwrap();
//!
//! assert_eq!(settings.get().personal_deduction, dec!(70000));
//! assert!(settings.set_k_receipt_ceiling(dec!(-1)).is_err());
//! ```

use std::sync::{PoisonError, RwLock};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::calculations::IncomeTaxCalculator;
use crate::models::{DeductionConfig, MIN_PERSONAL_DEDUCTION};

/// Errors returned by admin updates to the deduction settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeductionSettingsError {
    /// Personal deduction below the 10,000 minimum.
    #[error("personalDeduction amount must be greater than or equal to 10,000")]
    InvalidDeductionAmount(Decimal),

    /// Negative k-receipt ceiling.
    #[error("kReceipt amount must be greater than or equal to 0")]
    InvalidKReceiptAmount(Decimal),
}

/// Shared, synchronized store for the configurable deduction ceilings.
#[derive(Debug, Default)]
pub struct DeductionSettings {
    current: RwLock<DeductionConfig>,
}

impl DeductionSettings {
    /// Creates the store with the default ceilings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the current configuration.
    pub fn get(&self) -> DeductionConfig {
        // The guarded value is `Copy` and written in one assignment, so a
        // poisoned lock still holds a consistent snapshot.
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builds a calculator bound to the current snapshot.
    pub fn calculator(&self) -> IncomeTaxCalculator {
        IncomeTaxCalculator::new(self.get())
    }

    /// Replaces the personal deduction.
    ///
    /// # Errors
    ///
    /// Returns [`DeductionSettingsError::InvalidDeductionAmount`] if `amount`
    /// is below 10,000.
    pub fn set_personal_deduction(
        &self,
        amount: Decimal,
    ) -> Result<Decimal, DeductionSettingsError> {
        if amount < MIN_PERSONAL_DEDUCTION {
            warn!(%amount, "rejected personal deduction update");
            return Err(DeductionSettingsError::InvalidDeductionAmount(amount));
        }

        self.update(|config| config.personal_deduction = amount);
        info!(%amount, "personal deduction updated");
        Ok(amount)
    }

    /// Replaces the k-receipt ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`DeductionSettingsError::InvalidKReceiptAmount`] if `amount`
    /// is negative.
    pub fn set_k_receipt_ceiling(
        &self,
        amount: Decimal,
    ) -> Result<Decimal, DeductionSettingsError> {
        if amount < Decimal::ZERO {
            warn!(%amount, "rejected k-receipt ceiling update");
            return Err(DeductionSettingsError::InvalidKReceiptAmount(amount));
        }

        self.update(|config| config.k_receipt_ceiling = amount);
        info!(%amount, "k-receipt ceiling updated");
        Ok(amount)
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut DeductionConfig),
    ) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::IncomeTaxInput;
    use crate::models::Allowance;

    // =========================================================================
    // personal deduction tests
    // =========================================================================

    #[test]
    fn starts_with_defaults() {
        let settings = DeductionSettings::new();

        assert_eq!(settings.get(), DeductionConfig::default());
    }

    #[test]
    fn personal_deduction_is_updated() {
        let settings = DeductionSettings::new();

        let result = settings.set_personal_deduction(dec!(70000));

        assert_eq!(result, Ok(dec!(70000)));
        assert_eq!(settings.get().personal_deduction, dec!(70000));
        assert_eq!(settings.get().k_receipt_ceiling, dec!(50000));
    }

    #[test]
    fn personal_deduction_accepts_minimum() {
        let settings = DeductionSettings::new();

        assert_eq!(settings.set_personal_deduction(dec!(10000)), Ok(dec!(10000)));
    }

    #[test]
    fn personal_deduction_below_minimum_is_rejected() {
        let settings = DeductionSettings::new();

        let result = settings.set_personal_deduction(dec!(9999.99));

        assert_eq!(
            result,
            Err(DeductionSettingsError::InvalidDeductionAmount(dec!(9999.99)))
        );
        assert_eq!(settings.get().personal_deduction, dec!(60000));
    }

    // =========================================================================
    // k-receipt ceiling tests
    // =========================================================================

    #[test]
    fn k_receipt_ceiling_is_updated() {
        let settings = DeductionSettings::new();

        assert_eq!(settings.set_k_receipt_ceiling(dec!(0)), Ok(dec!(0)));
        assert_eq!(settings.get().k_receipt_ceiling, dec!(0));
    }

    #[test]
    fn negative_k_receipt_ceiling_is_rejected() {
        let settings = DeductionSettings::new();

        let result = settings.set_k_receipt_ceiling(dec!(-1));

        assert_eq!(
            result,
            Err(DeductionSettingsError::InvalidKReceiptAmount(dec!(-1)))
        );
        assert_eq!(settings.get().k_receipt_ceiling, dec!(50000));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            DeductionSettingsError::InvalidDeductionAmount(dec!(1)).to_string(),
            "personalDeduction amount must be greater than or equal to 10,000"
        );
        assert_eq!(
            DeductionSettingsError::InvalidKReceiptAmount(dec!(-1)).to_string(),
            "kReceipt amount must be greater than or equal to 0"
        );
    }

    // =========================================================================
    // calculator snapshot tests
    // =========================================================================

    #[test]
    fn calculator_uses_snapshot_at_creation() {
        let settings = DeductionSettings::new();
        let before = settings.calculator();

        settings.set_personal_deduction(dec!(100000)).unwrap();
        let after = settings.calculator();

        assert_eq!(before.config().personal_deduction, dec!(60000));
        assert_eq!(after.config().personal_deduction, dec!(100000));
    }

    #[test]
    fn concurrent_updates_and_reads() {
        let settings = Arc::new(DeductionSettings::new());
        let input = IncomeTaxInput {
            total_income: dec!(500000),
            wht: dec!(0),
            allowances: vec![Allowance::k_receipt(dec!(100000))],
        };

        thread::scope(|scope| {
            for step in 0..4i64 {
                let settings = Arc::clone(&settings);
                scope.spawn(move || {
                    for i in 0..50i64 {
                        settings
                            .set_k_receipt_ceiling(Decimal::from(step * 1000 + i))
                            .unwrap();
                    }
                });
            }

            for _ in 0..4 {
                let settings = Arc::clone(&settings);
                let input = &input;
                scope.spawn(move || {
                    for _ in 0..50 {
                        let result = settings.calculator().calculate(input).unwrap();
                        assert!(result.net_tax <= dec!(29000));
                    }
                });
            }
        });

        assert!(settings.get().k_receipt_ceiling <= dec!(3049));
    }
}
