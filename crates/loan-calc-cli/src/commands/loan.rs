use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::amortization::calculator::{self, LoanInput};
use loan_calc_core::amortization::costs::RecurringCosts;
use loan_calc_core::amortization::mortgage::{self, MortgageInput};
use loan_calc_core::amortization::schedule::PREVIEW_ROWS;
use loan_calc_core::collateral::down_payment_from_percent;

use super::{read_structured_input, DisplayArgs};

/// Arguments for the full loan calculator
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (6.5 = 6.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in months
    #[arg(long, alias = "months")]
    pub term_months: Option<u32>,

    /// Monthly property tax
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Monthly insurance
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly HOA fees
    #[arg(long, alias = "hoa")]
    pub hoa_fees: Option<Decimal>,

    /// Number of schedule rows to include (default: full term)
    #[arg(long)]
    pub rows: Option<u32>,

    /// Include only the first year of the schedule
    #[arg(long, conflicts_with = "rows")]
    pub preview: bool,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment: Option<NaiveDate>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Arguments for the mortgage calculator
#[derive(Args)]
pub struct MortgageArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price of the property
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment amount
    #[arg(long, conflicts_with = "down_payment_percent")]
    pub down_payment: Option<Decimal>,

    /// Down payment as a percentage of the property value
    #[arg(long)]
    pub down_payment_percent: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in years
    #[arg(long, alias = "years")]
    pub term_years: Option<u32>,

    /// Monthly property tax
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Monthly insurance
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly HOA fees
    #[arg(long, alias = "hoa")]
    pub hoa_fees: Option<Decimal>,

    /// Number of schedule rows to include (default: full term)
    #[arg(long)]
    pub rows: Option<u32>,

    /// Include only the first year of the schedule
    #[arg(long, conflicts_with = "rows")]
    pub preview: bool,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub first_payment: Option<NaiveDate>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = match read_structured_input(args.input.as_deref())? {
        Some(input) => input,
        None => LoanInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            recurring_costs: RecurringCosts {
                property_tax: args.property_tax,
                insurance: args.insurance,
                hoa_fees: args.hoa_fees,
            },
            schedule_rows: schedule_rows(args.rows, args.preview),
            precision: args.display.precision(),
            currency: args.display.currency(),
            first_payment_date: args.first_payment,
        },
    };

    let result = calculator::calculate_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = match read_structured_input(args.input.as_deref())? {
        Some(input) => input,
        None => {
            let property_value = args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?;
            let down_payment = match (args.down_payment, args.down_payment_percent) {
                (Some(amount), _) => amount,
                (None, Some(pct)) => down_payment_from_percent(property_value, pct)?,
                (None, None) => {
                    return Err(
                        "--down-payment or --down-payment-percent is required (or provide --input)"
                            .into(),
                    )
                }
            };
            MortgageInput {
                property_value,
                down_payment,
                annual_rate_percent: args
                    .annual_rate_percent
                    .ok_or("--annual-rate-percent is required (or provide --input)")?,
                term_years: args
                    .term_years
                    .ok_or("--term-years is required (or provide --input)")?,
                property_tax: args.property_tax,
                insurance: args.insurance,
                hoa_fees: args.hoa_fees,
                schedule_rows: schedule_rows(args.rows, args.preview),
                precision: args.display.precision(),
                currency: args.display.currency(),
                first_payment_date: args.first_payment,
            }
        }
    };

    let result = mortgage::calculate_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}

fn schedule_rows(rows: Option<u32>, preview: bool) -> Option<u32> {
    if preview {
        Some(PREVIEW_ROWS)
    } else {
        rows
    }
}
