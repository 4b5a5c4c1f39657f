pub mod calculations;
pub mod deductions;
pub mod models;

pub use calculations::{IncomeTaxCalculator, IncomeTaxError, IncomeTaxInput, compute_tax};
pub use deductions::{DeductionSettings, DeductionSettingsError};
pub use models::*;
