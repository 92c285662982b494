//! Fixed-rate loan calculator: annuity payment, amortization schedule and
//! cost totals in one call.
//!
//! Every loan page goes through [`calculate_loan`]; the quick widgets in
//! `crate::quick` share the same annuity formula but skip the schedule.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::costs::{aggregate_costs, RecurringCosts};
use crate::amortization::schedule::{generate_schedule, AmortizationRow, ScheduleParams};
use crate::error::LoanCalcError;
use crate::time_value::{annuity_payment, validate_terms};
use crate::types::{with_metadata, ComputationOutput, Currency, Money, Percent, RoundingPrecision};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Annual rates above this are flagged as unusual.
const HIGH_RATE_WARNING_PERCENT: Decimal = dec!(30);

/// Terms longer than this (40 years) are flagged as unusual.
const LONG_TERM_WARNING_MONTHS: u32 = 480;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// One calculation request, rebuilt whenever a form field changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Financed amount
    pub principal: Money,
    /// Nominal annual rate as a percentage (6.5 = 6.5%)
    pub annual_rate_percent: Percent,
    /// Number of monthly periods
    pub term_months: u32,
    #[serde(default)]
    pub recurring_costs: RecurringCosts,
    /// Rows of the schedule to materialise; the full term when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_rows: Option<u32>,
    #[serde(default)]
    pub precision: RoundingPrecision,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanInput {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
            recurring_costs: RecurringCosts::default(),
            schedule_rows: None,
            precision: RoundingPrecision::default(),
            currency: Currency::default(),
            first_payment_date: None,
        }
    }
}

/// Derived loan figures. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Principal and interest plus recurring costs
    pub monthly_payment: Money,
    /// Annuity payment on principal alone
    pub principal_and_interest: Money,
    pub recurring_costs_per_period: Money,
    pub total_interest: Money,
    pub total_recurring_costs: Money,
    pub total_payment: Money,
    /// Date of the final payment, when a first payment date was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
    pub schedule: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the payment, cost totals and amortization schedule for a loan.
pub fn calculate_loan(
    input: &LoanInput,
) -> LoanCalcResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();
    validate_input(input)?;

    tracing::debug!(
        principal = %input.principal,
        annual_rate_percent = %input.annual_rate_percent,
        term_months = input.term_months,
        "calculating loan amortization"
    );

    let mut warnings: Vec<String> = Vec::new();
    if input.annual_rate_percent > HIGH_RATE_WARNING_PERCENT {
        warnings.push(format!(
            "Annual rate of {}% is unusually high",
            input.annual_rate_percent
        ));
    }
    if input.term_months > LONG_TERM_WARNING_MONTHS {
        warnings.push(format!(
            "Term of {} months exceeds {} months; check the term unit",
            input.term_months, LONG_TERM_WARNING_MONTHS
        ));
    }
    if let Some(rows) = input.schedule_rows {
        if rows > input.term_months {
            warnings.push(format!(
                "Requested {} schedule rows; a {}-month loan has only {}",
                rows, input.term_months, input.term_months
            ));
        }
    }

    let principal_and_interest = annuity_payment(
        input.principal,
        input.annual_rate_percent,
        input.term_months,
    )?;

    let summary = aggregate_costs(
        input.principal,
        principal_and_interest,
        input.term_months,
        &input.recurring_costs,
        input.precision,
        &input.currency,
    )?;

    let schedule = generate_schedule(
        ScheduleParams {
            principal: input.principal,
            annual_rate_percent: input.annual_rate_percent,
            term_months: input.term_months,
            principal_and_interest,
            precision: input.precision,
            currency: input.currency.clone(),
            first_payment_date: input.first_payment_date,
        },
        input.schedule_rows,
    )?;

    let payoff_date = input
        .first_payment_date
        .and_then(|d| d.checked_add_months(Months::new(input.term_months - 1)));

    let result = AmortizationResult {
        monthly_payment: summary.monthly_payment,
        principal_and_interest: summary.principal_and_interest,
        recurring_costs_per_period: summary.recurring_costs_per_period,
        total_interest: summary.total_interest,
        total_recurring_costs: summary.total_recurring_costs,
        total_payment: summary.total_payment,
        payoff_date,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity amortization",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Positional form used by the calculator pages: full schedule, minor-unit
/// rounding, USD.
pub fn calculate_loan_with(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
    property_tax: Money,
    insurance: Money,
    hoa_fees: Money,
) -> LoanCalcResult<ComputationOutput<AmortizationResult>> {
    let mut input = LoanInput::new(principal, annual_rate_percent, term_months);
    input.recurring_costs = RecurringCosts::new(property_tax, insurance, hoa_fees);
    calculate_loan(&input)
}

fn validate_input(input: &LoanInput) -> LoanCalcResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }
    validate_terms(
        input.principal,
        input.annual_rate_percent,
        input.term_months,
    )?;
    input.recurring_costs.validate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fifteen_year_mortgage() -> LoanInput {
        let mut input = LoanInput::new(dec!(280_000), dec!(6.5), 180);
        input.recurring_costs = RecurringCosts::new(dec!(350), dec!(150), Decimal::ZERO);
        input
    }

    #[test]
    fn test_mortgage_regression_fixture() {
        let out = calculate_loan(&fifteen_year_mortgage()).unwrap();
        let r = &out.result;
        assert_eq!(r.principal_and_interest, dec!(2439.10));
        assert_eq!(r.monthly_payment, dec!(2939.10));
        assert_eq!(r.total_interest, dec!(159038.11));
        assert_eq!(r.total_payment, dec!(529038.11));
        assert_eq!(r.schedule.len(), 180);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_zero_rate_loan() {
        let out = calculate_loan_with(
            dec!(12_000),
            Decimal::ZERO,
            12,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        )
        .unwrap();
        assert_eq!(out.result.monthly_payment, dec!(1000));
        assert_eq!(out.result.total_interest, Decimal::ZERO);
        assert_eq!(out.result.total_payment, dec!(12_000));
    }

    #[test]
    fn test_schedule_rows_cap() {
        let mut input = fifteen_year_mortgage();
        input.schedule_rows = Some(12);
        let out = calculate_loan(&input).unwrap();
        assert_eq!(out.result.schedule.len(), 12);
        // Totals still cover the whole term
        assert_eq!(out.result.total_interest, dec!(159038.11));
    }

    #[test]
    fn test_schedule_rows_above_term_warns() {
        let mut input = LoanInput::new(dec!(6000), dec!(4), 6);
        input.schedule_rows = Some(12);
        let out = calculate_loan(&input).unwrap();
        assert_eq!(out.result.schedule.len(), 6);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_unusual_terms_warn() {
        let input = LoanInput::new(dec!(10_000), dec!(35), 600);
        let out = calculate_loan(&input).unwrap();
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_payoff_date() {
        let mut input = LoanInput::new(dec!(24_000), dec!(5), 24);
        input.first_payment_date = NaiveDate::from_ymd_opt(2026, 11, 1);
        let out = calculate_loan(&input).unwrap();
        assert_eq!(out.result.payoff_date, NaiveDate::from_ymd_opt(2028, 10, 1));
        assert_eq!(
            out.result.schedule[23].payment_date,
            NaiveDate::from_ymd_opt(2028, 10, 1)
        );
    }

    #[test]
    fn test_zero_principal_rejected() {
        let input = LoanInput::new(Decimal::ZERO, dec!(5), 12);
        assert!(calculate_loan(&input).is_err());
    }

    #[test]
    fn test_zero_term_rejected() {
        let input = LoanInput::new(dec!(1000), dec!(5), 0);
        match calculate_loan(&input).unwrap_err() {
            LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_metadata_populated() {
        let out = calculate_loan(&fifteen_year_mortgage()).unwrap();
        assert_eq!(out.methodology, "Fixed-rate annuity amortization");
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
        assert!(!out.metadata.version.is_empty());
        assert_eq!(out.assumptions["term_months"], 180);
    }

    #[test]
    fn test_input_deserialises_with_defaults() {
        let input: LoanInput = serde_json::from_str(
            r#"{"principal": "280000", "annual_rate_percent": "6.5", "term_months": 180}"#,
        )
        .unwrap();
        assert_eq!(input.precision, RoundingPrecision::MinorUnits);
        assert_eq!(input.currency, Currency::USD);
        assert_eq!(input.recurring_costs, RecurringCosts::default());
        assert!(input.schedule_rows.is_none());
    }
}
