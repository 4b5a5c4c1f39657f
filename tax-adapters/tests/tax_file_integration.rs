//! Integration tests that exercise the adapters against on-disk fixture files.
//!
//! These complement the unit tests inside tax_file.rs and settings.rs (which
//! use inline strings) by verifying the read-from-disk paths end-to-end.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tax_adapters::{SettingsFile, TaxFileError, TaxRecord, TaxRequest, request, tax_file};
use tax_core::{Allowance, DeductionSettings};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture_with_default_settings() {
    let response = tax_file::load_from_file(&fixture_path("taxes.csv"), &DeductionSettings::new())
        .expect("fixture file should load without error");

    assert_eq!(
        response.taxes,
        vec![
            TaxRecord::Due {
                total_income: dec!(500000),
                tax: dec!(29000),
            },
            TaxRecord::Refund {
                total_income: dec!(600000),
                tax_refund: dec!(2000),
            },
            TaxRecord::Due {
                total_income: dec!(750000),
                tax: dec!(11250),
            },
        ]
    );
}

#[test]
fn test_load_fixture_with_settings_file() {
    let settings = DeductionSettings::new();
    SettingsFile::load(&fixture_path("settings.toml"))
        .unwrap()
        .apply(&settings)
        .unwrap();

    let response = tax_file::load_from_file(&fixture_path("taxes.csv"), &settings).unwrap();

    // Row 1: 500000 - 100000 = 400000 -> 25000
    // Row 2: 600000 - 100000 - 20000 = 480000 -> 33000 - 40000
    // Row 3: 750000 - 100000 - 15000 = 635000 -> 35000 + 20250 - 50000
    assert_eq!(
        response.taxes,
        vec![
            TaxRecord::Due {
                total_income: dec!(500000),
                tax: dec!(25000),
            },
            TaxRecord::Refund {
                total_income: dec!(600000),
                tax_refund: dec!(7000),
            },
            TaxRecord::Due {
                total_income: dec!(750000),
                tax: dec!(5250),
            },
        ]
    );
}

#[test]
fn test_settings_file_applies_k_receipt_ceiling() {
    let settings = DeductionSettings::new();
    SettingsFile::load(&fixture_path("settings.toml"))
        .unwrap()
        .apply(&settings)
        .unwrap();

    let response = request::calculate(
        &settings,
        TaxRequest {
            total_income: dec!(500000),
            wht: dec!(0),
            allowances: vec![Allowance::k_receipt(dec!(50000))],
        },
    )
    .unwrap();

    // 500000 - 100000 - 20000 = 380000 -> 23000
    assert_eq!(serde_json::to_value(&response).unwrap()["tax"], 23000.0);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = tax_file::load_from_file(&fixture_path("missing.csv"), &DeductionSettings::new())
        .unwrap_err();

    assert!(matches!(err, TaxFileError::Io { .. }));
}
