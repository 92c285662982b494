//! Mortgage front-end: property value and down payment in, full loan
//! calculation out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::calculator::{calculate_loan, AmortizationResult, LoanInput};
use crate::amortization::costs::RecurringCosts;
use crate::collateral::{
    down_payment_from_percent, financed_amount, share_of_value, PMI_THRESHOLD_PERCENT,
};
use crate::error::LoanCalcError;
use crate::types::{with_metadata, ComputationOutput, Currency, Money, Percent, RoundingPrecision};
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: u32 = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub property_value: Money,
    pub down_payment: Money,
    /// Nominal annual rate as a percentage
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_tax: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoa_fees: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_rows: Option<u32>,
    #[serde(default)]
    pub precision: RoundingPrecision,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub loan_amount: Money,
    pub down_payment_percent: Percent,
    pub loan_to_value_percent: Percent,
    pub term_months: u32,
    pub amortization: AmortizationResult,
}

/// Finance `property_value - down_payment` over `term_years` and amortise it.
pub fn calculate_mortgage(
    input: &MortgageInput,
) -> LoanCalcResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();

    if input.term_years == 0 {
        return Err(LoanCalcError::invalid(
            "term_years",
            "Term must be at least one year",
        ));
    }
    let loan_amount = financed_amount(input.property_value, input.down_payment)?;
    let term_months = input.term_years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
        LoanCalcError::invalid("term_years", "Term in years is out of range")
    })?;

    let loan = LoanInput {
        principal: loan_amount,
        annual_rate_percent: input.annual_rate_percent,
        term_months,
        recurring_costs: RecurringCosts {
            property_tax: input.property_tax,
            insurance: input.insurance,
            hoa_fees: input.hoa_fees,
        },
        schedule_rows: input.schedule_rows,
        precision: input.precision,
        currency: input.currency.clone(),
        first_payment_date: input.first_payment_date,
    };
    let loan_output = calculate_loan(&loan)?;

    let down_payment_percent = share_of_value(input.down_payment, input.property_value)?;
    let loan_to_value_percent = share_of_value(loan_amount, input.property_value)?;

    let mut warnings = loan_output.warnings;
    if down_payment_percent < PMI_THRESHOLD_PERCENT {
        warnings.push(format!(
            "Down payment of {down_payment_percent}% is below {PMI_THRESHOLD_PERCENT}%; \
             lenders typically require mortgage insurance"
        ));
    }

    tracing::debug!(
        loan_amount = %loan_amount,
        loan_to_value_percent = %loan_to_value_percent,
        "mortgage financed"
    );

    let output = MortgageOutput {
        loan_amount,
        down_payment_percent,
        loan_to_value_percent,
        term_months,
        amortization: loan_output.result,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate mortgage amortization",
        input,
        warnings,
        elapsed,
        output,
    ))
}

impl MortgageInput {
    /// Down payment expressed as a share of the property value.
    pub fn with_down_payment_percent(
        property_value: Money,
        down_payment_percent: Percent,
        annual_rate_percent: Percent,
        term_years: u32,
    ) -> LoanCalcResult<Self> {
        Ok(Self {
            property_value,
            down_payment: down_payment_from_percent(property_value, down_payment_percent)?,
            annual_rate_percent,
            term_years,
            property_tax: None,
            insurance: None,
            hoa_fees: None,
            schedule_rows: None,
            precision: RoundingPrecision::default(),
            currency: Currency::default(),
            first_payment_date: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_mortgage() -> MortgageInput {
        let mut input =
            MortgageInput::with_down_payment_percent(dec!(350_000), dec!(20), dec!(6.5), 15)
                .unwrap();
        input.property_tax = Some(dec!(350));
        input.insurance = Some(dec!(150));
        input.hoa_fees = Some(Decimal::ZERO);
        input.schedule_rows = Some(12);
        input
    }

    #[test]
    fn test_mortgage_maps_to_loan() {
        let out = calculate_mortgage(&sample_mortgage()).unwrap();
        let r = &out.result;
        assert_eq!(r.loan_amount, dec!(280_000));
        assert_eq!(r.term_months, 180);
        assert_eq!(r.down_payment_percent, dec!(20));
        assert_eq!(r.loan_to_value_percent, dec!(80));
        assert_eq!(r.amortization.monthly_payment, dec!(2939.10));
        assert_eq!(r.amortization.schedule.len(), 12);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_small_down_payment_warns() {
        let mut input = sample_mortgage();
        input.down_payment = dec!(17_500);
        let out = calculate_mortgage(&input).unwrap();
        assert_eq!(out.result.down_payment_percent, dec!(5));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("mortgage insurance"));
    }

    #[test]
    fn test_down_payment_covering_value_rejected() {
        let mut input = sample_mortgage();
        input.down_payment = dec!(350_000);
        assert!(calculate_mortgage(&input).is_err());
    }

    #[test]
    fn test_zero_term_years_rejected() {
        let mut input = sample_mortgage();
        input.term_years = 0;
        match calculate_mortgage(&input).unwrap_err() {
            LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "term_years"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_percent_constructor_reports_overflow() {
        let huge = Decimal::from_scientific("7.9e28").unwrap();
        let err = MortgageInput::with_down_payment_percent(huge, dec!(20), dec!(6.5), 15).unwrap_err();
        assert!(matches!(err, LoanCalcError::PrecisionOverflow(_)));
    }
}
