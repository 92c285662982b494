use napi::Result as NapiResult;
use napi_derive::napi;

use loan_calc_core::{Currency, RoundingPrecision};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan and mortgage pages
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::amortization::calculator::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_calc_core::amortization::calculator::calculate_loan(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::amortization::mortgage::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_calc_core::amortization::mortgage::calculate_mortgage(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Landing-page widgets
// ---------------------------------------------------------------------------

#[napi]
pub fn quote_emi(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::quick::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_calc_core::quick::emi::quote_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn max_loan_for_emi(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::quick::emi::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_calc_core::quick::emi::max_loan_for_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn preview_mortgage(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::quick::mortgage::MortgagePreviewInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_calc_core::quick::mortgage::preview_mortgage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format a decimal amount string for display, e.g. ("2939.1", "USD") -> "$2,939.10".
#[napi]
pub fn format_currency(amount: String, currency: String, whole_units: bool) -> NapiResult<String> {
    let amount: rust_decimal::Decimal = amount.trim().parse().map_err(to_napi_error)?;
    let currency = Currency::from_code(&currency);
    let precision = if whole_units {
        RoundingPrecision::WholeUnits
    } else {
        RoundingPrecision::MinorUnits
    };
    Ok(loan_calc_core::formatting::format_currency(
        amount, &currency, precision,
    ))
}

/// Read a typed form value such as "$350,000" back into a decimal string.
#[napi]
pub fn parse_currency(display: String) -> NapiResult<Option<String>> {
    Ok(loan_calc_core::formatting::parse_currency(&display).map(|d| d.to_string()))
}
