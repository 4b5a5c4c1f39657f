//! Input and output adapters around the `tax-core` calculator.
//!
//! Each adapter turns an external shape (a JSON request, an uploaded CSV
//! file, an admin update, a settings file) into validated calls on
//! [`tax_core::IncomeTaxCalculator`] or [`tax_core::DeductionSettings`].

pub mod admin;
pub mod request;
pub mod settings;
pub mod tax_file;

pub use admin::{DeductionRequest, KReceiptResponse, PersonalDeductionResponse};
pub use request::{ErrorResponse, TaxRequest, TaxResponse};
pub use settings::{SettingsError, SettingsFile};
pub use tax_file::{TaxFileError, TaxFileResponse, TaxFileRow, TaxRecord};
