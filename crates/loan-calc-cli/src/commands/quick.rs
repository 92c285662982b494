use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::quick::emi::{self, AffordabilityInput, EmiInput};
use loan_calc_core::quick::mortgage::{self, MortgagePreviewInput};

use super::{read_structured_input, DisplayArgs};

/// Arguments for a quick EMI quote
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Tenure in months
    #[arg(long, alias = "months")]
    pub term_months: Option<u32>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Arguments for affordability
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly installment the borrower can afford
    #[arg(long, alias = "emi")]
    pub monthly_payment: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Tenure in months
    #[arg(long, alias = "months")]
    pub term_months: Option<u32>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Arguments for the quick mortgage preview
#[derive(Args)]
pub struct PreviewArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price of the property
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Down payment amount
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in years
    #[arg(long, alias = "years")]
    pub term_years: Option<u32>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input: EmiInput = match read_structured_input(args.input.as_deref())? {
        Some(input) => input,
        None => EmiInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            precision: args.display.precision(),
            currency: args.display.currency(),
        },
    };
    let result = emi::quote_emi(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input: AffordabilityInput = match read_structured_input(args.input.as_deref())? {
        Some(input) => input,
        None => AffordabilityInput {
            monthly_payment: args
                .monthly_payment
                .ok_or("--monthly-payment is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            precision: args.display.precision(),
            currency: args.display.currency(),
        },
    };
    let result = emi::max_loan_for_emi(&afford_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_preview(args: PreviewArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let preview_input: MortgagePreviewInput = match read_structured_input(args.input.as_deref())? {
        Some(input) => input,
        None => MortgagePreviewInput {
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            annual_rate_percent: args
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            precision: args.display.precision(),
            currency: args.display.currency(),
        },
    };
    let result = mortgage::preview_mortgage(&preview_input)?;
    Ok(serde_json::to_value(result)?)
}
