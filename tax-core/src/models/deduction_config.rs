use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Personal deduction applied when no admin update has been made.
pub const DEFAULT_PERSONAL_DEDUCTION: Decimal = Decimal::from_parts(60_000, 0, 0, false, 0);

/// k-receipt ceiling applied when no admin update has been made.
pub const DEFAULT_K_RECEIPT_CEILING: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

/// Smallest personal deduction an admin may configure.
pub const MIN_PERSONAL_DEDUCTION: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Donation ceiling. Fixed, not configurable.
pub const DONATION_CEILING: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Snapshot of the configurable deduction values read by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionConfig {
    pub personal_deduction: Decimal,
    pub k_receipt_ceiling: Decimal,
}

impl DeductionConfig {
    /// The donation ceiling that accompanies every snapshot.
    pub fn donation_ceiling(&self) -> Decimal {
        DONATION_CEILING
    }
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            personal_deduction: DEFAULT_PERSONAL_DEDUCTION,
            k_receipt_ceiling: DEFAULT_K_RECEIPT_CEILING,
        }
    }
}
