//! Property value / down payment arithmetic shared by the mortgage calculators.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Money, Percent};
use crate::LoanCalcResult;

/// Down payment share below which lenders usually require mortgage insurance.
pub const PMI_THRESHOLD_PERCENT: Decimal = dec!(20);

/// Amount financed once the down payment is applied.
pub fn financed_amount(property_value: Money, down_payment: Money) -> LoanCalcResult<Money> {
    if property_value <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "property_value",
            "Property value must be positive",
        ));
    }
    if down_payment < Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "down_payment",
            "Down payment cannot be negative",
        ));
    }
    if down_payment >= property_value {
        return Err(LoanCalcError::invalid(
            "down_payment",
            "Down payment must be less than the property value",
        ));
    }
    Ok(property_value - down_payment)
}

/// Down payment given as a percentage of the property value.
pub fn down_payment_from_percent(
    property_value: Money,
    down_payment_percent: Percent,
) -> LoanCalcResult<Money> {
    if down_payment_percent < Decimal::ZERO || down_payment_percent > dec!(100) {
        return Err(LoanCalcError::invalid(
            "down_payment_percent",
            "Down payment percent must be between 0 and 100",
        ));
    }
    property_value
        .checked_mul(down_payment_percent)
        .map(|v| v / dec!(100))
        .ok_or_else(|| {
            LoanCalcError::PrecisionOverflow(format!(
                "{down_payment_percent}% of {property_value} exceeds decimal range"
            ))
        })
}

/// `part / property_value` as a percentage, two decimals.
pub fn share_of_value(part: Money, property_value: Money) -> LoanCalcResult<Percent> {
    if property_value.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "share of property value".into(),
        });
    }
    Ok((part / property_value * dec!(100))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
