//! Month-by-month amortization schedule.
//!
//! The running balance is carried at full decimal precision; only the
//! emitted row values are rounded. Each emitted amount is rounded first and
//! then clamped at zero, so a row never shows a negative balance. The final
//! period retires whatever residual balance remains, so a full schedule
//! always ends at exactly zero.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{monthly_rate, validate_terms};
use crate::types::{Currency, Money, Percent, Rate, RoundingPrecision};
use crate::LoanCalcResult;

/// Rows shown by the calculator page preview.
pub const PREVIEW_ROWS: u32 = 12;

/// A single period in the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based period number
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Principal and interest paid this period
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// Balance after this period's principal is applied
    pub remaining_balance: Money,
}

/// Everything the generator needs to walk the loan.
#[derive(Debug, Clone)]
pub struct ScheduleParams {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    /// Unrounded annuity payment for the loan.
    pub principal_and_interest: Money,
    pub precision: RoundingPrecision,
    pub currency: Currency,
    pub first_payment_date: Option<NaiveDate>,
}

/// Lazy schedule: yields one row per period until the term is exhausted.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    params: ScheduleParams,
    monthly_rate: Rate,
    balance: Money,
    period: u32,
}

impl AmortizationSchedule {
    pub fn new(params: ScheduleParams) -> LoanCalcResult<Self> {
        validate_terms(
            params.principal,
            params.annual_rate_percent,
            params.term_months,
        )?;
        Ok(Self {
            monthly_rate: monthly_rate(params.annual_rate_percent),
            balance: params.principal,
            period: 0,
            params,
        })
    }

    /// Unrounded balance after the last yielded period.
    pub fn outstanding_balance(&self) -> Money {
        self.balance
    }

    fn round(&self, amount: Money) -> Money {
        let rounded = self.params.precision.round(amount, &self.params.currency);
        rounded.max(Decimal::ZERO)
    }

    fn payment_date(&self, period: u32) -> Option<NaiveDate> {
        self.params
            .first_payment_date
            .and_then(|first| first.checked_add_months(Months::new(period - 1)))
    }
}

impl Iterator for AmortizationSchedule {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<AmortizationRow> {
        if self.period >= self.params.term_months {
            return None;
        }
        self.period += 1;

        let interest = self.balance * self.monthly_rate;
        let mut principal = self.params.principal_and_interest - interest;
        if self.period == self.params.term_months || principal > self.balance {
            principal = self.balance;
        }
        if principal < Decimal::ZERO {
            principal = Decimal::ZERO;
        }
        self.balance -= principal;

        Some(AmortizationRow {
            period: self.period,
            payment_date: self.payment_date(self.period),
            payment: self.round(principal + interest),
            principal_portion: self.round(principal),
            interest_portion: self.round(interest),
            remaining_balance: self.round(self.balance),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.params.term_months - self.period) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for AmortizationSchedule {}

/// Materialise the first `row_limit` rows (all of them when `None`).
pub fn generate_schedule(
    params: ScheduleParams,
    row_limit: Option<u32>,
) -> LoanCalcResult<Vec<AmortizationRow>> {
    let limit = row_limit
        .unwrap_or(params.term_months)
        .min(params.term_months);
    let schedule = AmortizationSchedule::new(params)?;
    Ok(schedule.take(limit as usize).collect())
}
