use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::time_value::MAX_PRINCIPAL;
use crate::types::{Currency, Money, RoundingPrecision};
use crate::LoanCalcResult;

/// Fixed per-period costs paid alongside the loan. They never accrue interest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringCosts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_tax: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hoa_fees: Option<Money>,
}

impl RecurringCosts {
    pub fn new(property_tax: Money, insurance: Money, hoa_fees: Money) -> Self {
        Self {
            property_tax: Some(property_tax),
            insurance: Some(insurance),
            hoa_fees: Some(hoa_fees),
        }
    }

    /// Sum of every cost for one period; missing fields count as zero.
    pub fn per_period(&self) -> Money {
        [self.property_tax, self.insurance, self.hoa_fees]
            .iter()
            .flatten()
            .sum()
    }

    pub fn validate(&self) -> LoanCalcResult<()> {
        let fields = [
            ("property_tax", self.property_tax),
            ("insurance", self.insurance),
            ("hoa_fees", self.hoa_fees),
        ];
        for (field, value) in fields {
            let Some(v) = value else { continue };
            if v < Decimal::ZERO {
                return Err(LoanCalcError::InvalidInput {
                    field: field.into(),
                    reason: "Recurring costs cannot be negative".into(),
                });
            }
            if v > MAX_PRINCIPAL {
                return Err(LoanCalcError::InvalidInput {
                    field: field.into(),
                    reason: format!("Recurring costs cannot exceed {MAX_PRINCIPAL}"),
                });
            }
        }
        Ok(())
    }
}

/// Totals over the full term of the loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Principal and interest plus recurring costs, per period
    pub monthly_payment: Money,
    pub principal_and_interest: Money,
    pub recurring_costs_per_period: Money,
    pub total_interest: Money,
    pub total_recurring_costs: Money,
    /// Principal + total interest + total recurring costs
    pub total_payment: Money,
}

/// Aggregate payment totals. `principal_and_interest` is the unrounded annuity
/// payment; every emitted figure is rounded once, at the end.
pub fn aggregate_costs(
    principal: Money,
    principal_and_interest: Money,
    term_months: u32,
    costs: &RecurringCosts,
    precision: RoundingPrecision,
    currency: &Currency,
) -> LoanCalcResult<CostSummary> {
    costs.validate()?;

    let n = Decimal::from(term_months);
    let per_period = costs.per_period();

    let total_interest = precision
        .round(principal_and_interest * n - principal, currency)
        .max(Decimal::ZERO);
    let total_recurring_costs = precision.round(per_period * n, currency);
    let total_payment = precision.round(principal, currency) + total_interest + total_recurring_costs;

    Ok(CostSummary {
        monthly_payment: precision.round(principal_and_interest + per_period, currency),
        principal_and_interest: precision.round(principal_and_interest, currency),
        recurring_costs_per_period: precision.round(per_period, currency),
        total_interest,
        total_recurring_costs,
        total_payment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::annuity_payment;
    use rust_decimal_macros::dec;

    #[test]
    fn test_per_period_treats_missing_as_zero() {
        let costs = RecurringCosts {
            property_tax: Some(dec!(350)),
            insurance: None,
            hoa_fees: Some(dec!(25.50)),
        };
        assert_eq!(costs.per_period(), dec!(375.50));
        assert_eq!(RecurringCosts::default().per_period(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_cost_rejected() {
        let costs = RecurringCosts::new(dec!(350), dec!(-1), Decimal::ZERO);
        match costs.validate().unwrap_err() {
            LoanCalcError::InvalidInput { field, .. } => assert_eq!(field, "insurance"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_aggregate_mortgage_costs() {
        let pi = annuity_payment(dec!(280_000), dec!(6.5), 180).unwrap();
        let costs = RecurringCosts::new(dec!(350), dec!(150), Decimal::ZERO);
        let summary = aggregate_costs(
            dec!(280_000),
            pi,
            180,
            &costs,
            RoundingPrecision::MinorUnits,
            &Currency::USD,
        )
        .unwrap();

        assert_eq!(summary.principal_and_interest, dec!(2439.10));
        assert_eq!(summary.monthly_payment, dec!(2939.10));
        assert_eq!(summary.recurring_costs_per_period, dec!(500));
        assert_eq!(summary.total_interest, dec!(159038.11));
        assert_eq!(summary.total_recurring_costs, dec!(90_000));
        assert_eq!(summary.total_payment, dec!(529038.11));
    }

    #[test]
    fn test_aggregate_whole_units() {
        let pi = annuity_payment(dec!(280_000), dec!(6.5), 180).unwrap();
        let costs = RecurringCosts::new(dec!(350), dec!(150), Decimal::ZERO);
        let summary = aggregate_costs(
            dec!(280_000),
            pi,
            180,
            &costs,
            RoundingPrecision::WholeUnits,
            &Currency::USD,
        )
        .unwrap();
        assert_eq!(summary.monthly_payment, dec!(2939));
        assert_eq!(summary.total_interest, dec!(159038));
    }

    #[test]
    fn test_aggregate_zero_rate() {
        let summary = aggregate_costs(
            dec!(12_000),
            dec!(1000),
            12,
            &RecurringCosts::default(),
            RoundingPrecision::MinorUnits,
            &Currency::USD,
        )
        .unwrap();
        assert_eq!(summary.monthly_payment, dec!(1000));
        assert_eq!(summary.total_interest, Decimal::ZERO);
        assert_eq!(summary.total_payment, dec!(12_000));
    }
}
