use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Rates expressed as percentages (6.5 = 6.5%), the way loan forms collect them.
pub type Percent = Decimal;

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    GBP,
    #[default]
    USD,
    EUR,
    CHF,
    JPY,
    CAD,
    AUD,
    HKD,
    SGD,
    INR,
    Other(String),
}

impl Currency {
    /// Parse an ISO code case-insensitively; unknown codes become `Other`.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        match code.as_str() {
            "GBP" => Currency::GBP,
            "USD" => Currency::USD,
            "EUR" => Currency::EUR,
            "CHF" => Currency::CHF,
            "JPY" => Currency::JPY,
            "CAD" => Currency::CAD,
            "AUD" => Currency::AUD,
            "HKD" => Currency::HKD,
            "SGD" => Currency::SGD,
            "INR" => Currency::INR,
            _ => Currency::Other(code),
        }
    }

    /// Digits after the decimal point in the currency's minor unit.
    pub fn minor_units(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Display symbol, including any separating space.
    pub fn symbol(&self) -> String {
        match self {
            Currency::GBP => "£".into(),
            Currency::USD => "$".into(),
            Currency::EUR => "€".into(),
            Currency::CHF => "CHF ".into(),
            Currency::JPY => "¥".into(),
            Currency::CAD => "CA$".into(),
            Currency::AUD => "A$".into(),
            Currency::HKD => "HK$".into(),
            Currency::SGD => "S$".into(),
            Currency::INR => "₹".into(),
            Currency::Other(code) => format!("{code} "),
        }
    }
}

/// Precision that emitted currency amounts are rounded to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundingPrecision {
    /// Round to the currency's minor unit (cents for USD).
    #[default]
    MinorUnits,
    /// Round to whole currency units, as the quick preview widgets display.
    WholeUnits,
}

impl RoundingPrecision {
    pub fn decimal_places(&self, currency: &Currency) -> u32 {
        match self {
            RoundingPrecision::MinorUnits => currency.minor_units(),
            RoundingPrecision::WholeUnits => 0,
        }
    }

    /// Round half away from zero, matching how the calculator widgets present amounts.
    pub fn round(&self, amount: Money, currency: &Currency) -> Money {
        amount.round_dp_with_strategy(
            self.decimal_places(currency),
            RoundingStrategy::MidpointAwayFromZero,
        )
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    for warning in &warnings {
        tracing::warn!(methodology, "{warning}");
    }
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
