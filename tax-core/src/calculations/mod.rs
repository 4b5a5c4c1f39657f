//! Personal income tax calculations.
//!
//! This module provides the progressive-schedule calculator and the small
//! arithmetic helpers it is built from.

pub mod common;
pub mod income_tax;

pub use income_tax::{IncomeTaxCalculator, IncomeTaxError, IncomeTaxInput, compute_tax};
