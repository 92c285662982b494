use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Money, Percent, Rate};
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Largest principal accepted. Keeps every intermediate product well inside
/// the 96-bit decimal mantissa.
pub const MAX_PRINCIPAL: Decimal = dec!(1_000_000_000_000_000);

/// Longest term accepted (100 years).
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Periodic (monthly) rate from a nominal annual percentage: 6.5 -> 0.065 / 12
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / MONTHS_PER_YEAR
}

/// Fixed monthly payment covering principal and interest (the annuity / EMI formula).
///
/// `payment = P * r * (1 + r)^n / ((1 + r)^n - 1)`, or `P / n` when the rate is zero.
pub fn annuity_payment(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> LoanCalcResult<Money> {
    validate_terms(principal, annual_rate_percent, term_months)?;

    let n = Decimal::from(term_months);
    let r = monthly_rate(annual_rate_percent);
    if r.is_zero() {
        return Ok(principal / n);
    }

    let factor = compound_factor(r, term_months)?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "annuity payment denominator".into(),
        });
    }

    principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denom))
        .ok_or_else(|| {
            LoanCalcError::PrecisionOverflow(format!(
                "annuity payment on principal {principal} exceeds decimal range"
            ))
        })
}

/// Principal that a fixed monthly payment fully amortises over the term.
///
/// Inverse of [`annuity_payment`]: `PV = pmt * (1 - (1 + r)^-n) / r`.
pub fn annuity_present_value(
    payment: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> LoanCalcResult<Money> {
    if payment < Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "payment",
            "Payment must be non-negative",
        ));
    }
    if payment > MAX_PRINCIPAL {
        return Err(LoanCalcError::InvalidInput {
            field: "payment".into(),
            reason: format!("Payment cannot exceed {MAX_PRINCIPAL}"),
        });
    }
    validate_terms(Decimal::ZERO, annual_rate_percent, term_months)?;

    let overflow = || {
        LoanCalcError::PrecisionOverflow(format!(
            "present value of payment {payment} exceeds decimal range"
        ))
    };
    let r = monthly_rate(annual_rate_percent);
    if r.is_zero() {
        return payment
            .checked_mul(Decimal::from(term_months))
            .ok_or_else(overflow);
    }

    let factor = compound_factor(r, term_months)?;
    let annuity_factor = (Decimal::ONE - Decimal::ONE / factor) / r;
    payment.checked_mul(annuity_factor).ok_or_else(overflow)
}

/// `(1 + r)^n`, rejecting terms that overflow 96-bit decimal precision.
fn compound_factor(r: Rate, term_months: u32) -> LoanCalcResult<Decimal> {
    (Decimal::ONE + r)
        .checked_powu(u64::from(term_months))
        .ok_or_else(|| {
            LoanCalcError::PrecisionOverflow(format!(
                "(1 + {r})^{term_months} exceeds decimal range"
            ))
        })
}

pub(crate) fn validate_terms(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> LoanCalcResult<()> {
    if principal < Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "principal",
            "Principal cannot be negative",
        ));
    }
    if principal > MAX_PRINCIPAL {
        return Err(LoanCalcError::InvalidInput {
            field: "principal".into(),
            reason: format!("Principal cannot exceed {MAX_PRINCIPAL}"),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "annual_rate_percent",
            "Annual interest rate cannot be negative",
        ));
    }
    if term_months == 0 {
        return Err(LoanCalcError::invalid(
            "term_months",
            "Term must be at least one month",
        ));
    }
    if term_months > MAX_TERM_MONTHS {
        return Err(LoanCalcError::InvalidInput {
            field: "term_months".into(),
            reason: format!("Term cannot exceed {MAX_TERM_MONTHS} months"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_annuity_payment_standard_emi() {
        // 100k at 12% over 12 months: EMI ~ 8884.88
        let pmt = annuity_payment(dec!(100_000), dec!(12), 12).unwrap();
        assert_close(pmt, dec!(8884.88), dec!(0.01));
    }

    #[test]
    fn test_annuity_payment_thirty_year_mortgage() {
        let pmt = annuity_payment(dec!(200_000), dec!(6), 360).unwrap();
        assert_close(pmt, dec!(1199.10), dec!(0.01));
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        let pmt = annuity_payment(dec!(12_000), Decimal::ZERO, 12).unwrap();
        assert_eq!(pmt, dec!(1000));
    }

    #[test]
    fn test_annuity_payment_zero_principal() {
        let pmt = annuity_payment(Decimal::ZERO, dec!(5), 60).unwrap();
        assert_eq!(pmt, Decimal::ZERO);
    }

    #[test]
    fn test_annuity_payment_rejects_zero_term() {
        let err = annuity_payment(dec!(1000), dec!(5), 0).unwrap_err();
        match err {
            LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_annuity_payment_rejects_negative_inputs() {
        assert!(annuity_payment(dec!(-1), dec!(5), 12).is_err());
        assert!(annuity_payment(dec!(1000), dec!(-0.5), 12).is_err());
    }

    #[test]
    fn test_annuity_payment_overflow_is_reported() {
        // 900% a year compounded over 100 years cannot be represented
        let err = annuity_payment(dec!(1000), dec!(900), MAX_TERM_MONTHS).unwrap_err();
        assert!(matches!(err, LoanCalcError::PrecisionOverflow(_)));
    }

    #[test]
    fn test_annuity_payment_rejects_out_of_range_terms() {
        assert!(annuity_payment(dec!(1000), dec!(5), MAX_TERM_MONTHS + 1).is_err());
        assert!(annuity_payment(MAX_PRINCIPAL + Decimal::ONE, dec!(5), 12).is_err());
    }

    #[test]
    fn test_present_value_inverts_payment() {
        let pmt = annuity_payment(dec!(250_000), dec!(4.75), 300).unwrap();
        let pv = annuity_present_value(pmt, dec!(4.75), 300).unwrap();
        assert_close(pv, dec!(250_000), dec!(0.0001));
    }

    #[test]
    fn test_present_value_zero_rate() {
        let pv = annuity_present_value(dec!(500), Decimal::ZERO, 24).unwrap();
        assert_eq!(pv, dec!(12_000));
    }

    #[test]
    fn test_present_value_rejects_oversized_payment() {
        let err = annuity_present_value(MAX_PRINCIPAL + Decimal::ONE, Decimal::ZERO, 12).unwrap_err();
        assert!(matches!(err, LoanCalcError::InvalidInput { .. }));
        assert_eq!(
            annuity_present_value(MAX_PRINCIPAL, Decimal::ZERO, MAX_TERM_MONTHS).unwrap(),
            MAX_PRINCIPAL * Decimal::from(MAX_TERM_MONTHS)
        );
    }
}
