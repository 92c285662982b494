pub mod loan;
pub mod quick;

use clap::Args;
use loan_calc_core::{Currency, RoundingPrecision};
use serde::de::DeserializeOwned;

use crate::input;

/// Display options shared by every calculator command.
#[derive(Args)]
pub struct DisplayArgs {
    /// Round amounts to whole currency units instead of the minor unit
    #[arg(long)]
    pub whole_units: bool,

    /// ISO currency code (USD, EUR, GBP, JPY, INR, ...)
    #[arg(long, default_value = "USD")]
    pub currency: String,
}

impl DisplayArgs {
    pub fn precision(&self) -> RoundingPrecision {
        if self.whole_units {
            RoundingPrecision::WholeUnits
        } else {
            RoundingPrecision::MinorUnits
        }
    }

    pub fn currency(&self) -> Currency {
        Currency::from_code(&self.currency)
    }
}

/// Deserialise the command input from `--input <file>`, else from piped stdin.
/// `Ok(None)` means neither was given and flags should be used.
pub fn read_structured_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(input::file::read_json(path)?));
    }
    match input::stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}
