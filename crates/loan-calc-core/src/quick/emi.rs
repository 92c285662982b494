use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::time_value::{annuity_payment, annuity_present_value};
use crate::types::{with_metadata, ComputationOutput, Currency, Money, Percent, RoundingPrecision};
use crate::LoanCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    #[serde(default)]
    pub precision: RoundingPrecision,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiQuote {
    /// Equated monthly installment
    pub emi: Money,
    pub total_interest: Money,
    pub total_payment: Money,
}

/// Landing-page EMI quote.
pub fn quote_emi(input: &EmiInput) -> LoanCalcResult<ComputationOutput<EmiQuote>> {
    let start = Instant::now();
    let emi = annuity_payment(input.principal, input.annual_rate_percent, input.term_months)?;
    let total_paid = emi
        .checked_mul(Decimal::from(input.term_months))
        .ok_or_else(|| {
            LoanCalcError::PrecisionOverflow(format!("total of {emi} EMIs exceeds decimal range"))
        })?;

    let total_interest = input
        .precision
        .round(total_paid - input.principal, &input.currency)
        .max(Decimal::ZERO);
    let quote = EmiQuote {
        emi: input.precision.round(emi, &input.currency),
        total_interest,
        total_payment: input.precision.round(input.principal, &input.currency) + total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata("EMI (annuity formula)", input, Vec::new(), elapsed, quote))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    /// Monthly installment the borrower can afford
    pub monthly_payment: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    #[serde(default)]
    pub precision: RoundingPrecision,
    #[serde(default)]
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    /// Largest loan the payment fully repays
    pub max_principal: Money,
    pub total_interest: Money,
    pub total_payment: Money,
}

/// Largest principal a target EMI amortises. The principal is rounded down so
/// that re-quoting it never yields an EMI above the target.
pub fn max_loan_for_emi(
    input: &AffordabilityInput,
) -> LoanCalcResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let pv = annuity_present_value(
        input.monthly_payment,
        input.annual_rate_percent,
        input.term_months,
    )?;

    let dp = input.precision.decimal_places(&input.currency);
    let max_principal = pv.round_dp_with_strategy(dp, RoundingStrategy::ToZero);
    let total_paid = input
        .monthly_payment
        .checked_mul(Decimal::from(input.term_months))
        .ok_or_else(|| {
            LoanCalcError::PrecisionOverflow(format!(
                "total of {} payments exceeds decimal range",
                input.term_months
            ))
        })?;
    let total_payment = input.precision.round(total_paid, &input.currency);

    let mut warnings = Vec::new();
    if max_principal.is_zero() {
        warnings.push("Monthly payment is too small to support any loan".to_string());
    }

    let output = AffordabilityOutput {
        max_principal,
        total_interest: (total_payment - max_principal).max(Decimal::ZERO),
        total_payment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Inverse annuity (present value of level payments)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
