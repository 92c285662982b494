use loan_calc_core::amortization::calculator::{calculate_loan, LoanInput};
use loan_calc_core::amortization::mortgage::{calculate_mortgage, MortgageInput};
use loan_calc_core::formatting::format_currency;
use loan_calc_core::quick::emi::{max_loan_for_emi, quote_emi, AffordabilityInput, EmiInput};
use loan_calc_core::quick::mortgage::{preview_mortgage, MortgagePreviewInput};
use loan_calc_core::{Currency, RoundingPrecision};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Quick widgets agree with the full calculator
// ===========================================================================

#[test]
fn test_emi_widget_matches_loan_calculator() {
    let cases = [
        (dec!(100_000), dec!(12), 12),
        (dec!(500_000), dec!(8.75), 240),
        (dec!(7_500), Decimal::ZERO, 10),
    ];
    for (principal, rate, term) in cases {
        let quote = quote_emi(&EmiInput {
            principal,
            annual_rate_percent: rate,
            term_months: term,
            precision: RoundingPrecision::MinorUnits,
            currency: Currency::USD,
        })
        .unwrap();
        let full = calculate_loan(&LoanInput::new(principal, rate, term)).unwrap();

        assert_eq!(quote.result.emi, full.result.principal_and_interest);
        assert_eq!(quote.result.total_interest, full.result.total_interest);
        assert_eq!(quote.result.total_payment, full.result.total_payment);
    }
}

#[test]
fn test_mortgage_widget_matches_mortgage_calculator() {
    let preview = preview_mortgage(&MortgagePreviewInput {
        property_value: dec!(425_000),
        down_payment: dec!(85_000),
        annual_rate_percent: dec!(7.125),
        term_years: 30,
        precision: RoundingPrecision::MinorUnits,
        currency: Currency::USD,
    })
    .unwrap();

    let mut full_input =
        MortgageInput::with_down_payment_percent(dec!(425_000), dec!(20), dec!(7.125), 30)
            .unwrap();
    full_input.schedule_rows = Some(0);
    let full = calculate_mortgage(&full_input).unwrap();

    assert_eq!(preview.result.loan_amount, full.result.loan_amount);
    assert_eq!(
        preview.result.monthly_payment,
        full.result.amortization.principal_and_interest
    );
    assert_eq!(
        preview.result.loan_to_value_percent,
        full.result.loan_to_value_percent
    );
    assert!(full.result.amortization.schedule.is_empty());
}

#[test]
fn test_affordability_inverts_emi() {
    let quote = quote_emi(&EmiInput {
        principal: dec!(300_000),
        annual_rate_percent: dec!(5.5),
        term_months: 360,
        precision: RoundingPrecision::MinorUnits,
        currency: Currency::USD,
    })
    .unwrap();

    let afford = max_loan_for_emi(&AffordabilityInput {
        monthly_payment: quote.result.emi,
        annual_rate_percent: dec!(5.5),
        term_months: 360,
        precision: RoundingPrecision::MinorUnits,
        currency: Currency::USD,
    })
    .unwrap();

    // The EMI was rounded to the cent, so the recovered principal is within
    // a cent's worth of present value of the original.
    let diff = (afford.result.max_principal - dec!(300_000)).abs();
    assert!(diff < dec!(1.00), "diff = {diff}");
}

#[test]
fn test_formatted_widget_output() {
    let quote = quote_emi(&EmiInput {
        principal: dec!(100_000),
        annual_rate_percent: dec!(12),
        term_months: 12,
        precision: RoundingPrecision::MinorUnits,
        currency: Currency::INR,
    })
    .unwrap();
    assert_eq!(
        format_currency(quote.result.emi, &Currency::INR, RoundingPrecision::MinorUnits),
        "₹8,884.88"
    );
}
