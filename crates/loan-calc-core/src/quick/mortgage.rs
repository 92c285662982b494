use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::collateral::{financed_amount, share_of_value};
use crate::error::LoanCalcError;
use crate::time_value::annuity_payment;
use crate::types::{with_metadata, ComputationOutput, Currency, Money, Percent, RoundingPrecision};
use crate::LoanCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgagePreviewInput {
    pub property_value: Money,
    pub down_payment: Money,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    #[serde(default)]
    pub precision: RoundingPrecision,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgagePreview {
    pub loan_amount: Money,
    /// Principal and interest only
    pub monthly_payment: Money,
    pub loan_to_value_percent: Percent,
}

/// Home-page mortgage widget: one payment figure, no schedule or escrow.
pub fn preview_mortgage(
    input: &MortgagePreviewInput,
) -> LoanCalcResult<ComputationOutput<MortgagePreview>> {
    let start = Instant::now();
    let loan_amount = financed_amount(input.property_value, input.down_payment)?;
    let term_months = input
        .term_years
        .checked_mul(12)
        .filter(|m| *m > 0)
        .ok_or_else(|| LoanCalcError::invalid("term_years", "Term must be at least one year"))?;

    let payment = annuity_payment(loan_amount, input.annual_rate_percent, term_months)?;
    let preview = MortgagePreview {
        loan_amount,
        monthly_payment: input.precision.round(payment, &input.currency).max(Decimal::ZERO),
        loan_to_value_percent: share_of_value(loan_amount, input.property_value)?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage payment preview (annuity formula)",
        input,
        Vec::new(),
        elapsed,
        preview,
    ))
}
