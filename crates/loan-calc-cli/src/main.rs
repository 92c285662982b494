mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{LoanArgs, MortgageArgs};
use commands::quick::{AffordabilityArgs, EmiArgs, PreviewArgs};

/// Loan amortization, mortgage and EMI calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Loan amortization, mortgage and EMI calculations",
    long_about = "A CLI for fixed-rate loan calculations with decimal precision. \
                  Computes monthly payments, amortization schedules, total cost \
                  of borrowing, quick EMI quotes and affordability."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is not set (e.g. warn, debug, loan_calc_core=trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment, totals and amortization schedule for a fixed-rate loan
    Loan(LoanArgs),
    /// Mortgage from property value and down payment, with escrow costs
    Mortgage(MortgageArgs),
    /// Quick EMI quote without a schedule
    Emi(EmiArgs),
    /// Largest loan a monthly payment can repay
    Affordability(AffordabilityArgs),
    /// Quick mortgage payment preview (principal and interest only)
    Preview(PreviewArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Mortgage(args) => commands::loan::run_mortgage(args),
        Commands::Emi(args) => commands::quick::run_emi(args),
        Commands::Affordability(args) => commands::quick::run_affordability(args),
        Commands::Preview(args) => commands::quick::run_preview(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result.and_then(|value| output::format_output(&cli.output, &value)) {
        Ok(()) => process::exit(0),
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
