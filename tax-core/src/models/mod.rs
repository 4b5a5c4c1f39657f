mod allowance;
mod deduction_config;
mod tax_bracket;
mod tax_result;

pub use allowance::{Allowance, AllowanceType};
pub use deduction_config::{
    DEFAULT_K_RECEIPT_CEILING, DEFAULT_PERSONAL_DEDUCTION, DONATION_CEILING, DeductionConfig,
    MIN_PERSONAL_DEDUCTION,
};
pub use tax_bracket::{BRACKET_COUNT, TaxBracket, standard_schedule};
pub use tax_result::{TaxLevel, TaxResult};
