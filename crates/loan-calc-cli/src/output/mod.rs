pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod yaml;

use crate::OutputFormat;
use serde_json::Value;

/// Key under which loan results carry their amortization rows.
pub const SCHEDULE_KEY: &str = "schedule";

/// Dispatch output to the appropriate formatter.
pub fn format_output(
    format: &OutputFormat,
    value: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => json::print_json(value)?,
        OutputFormat::Yaml => yaml::print_yaml(value)?,
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value)?,
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
    Ok(())
}

/// Find the schedule rows in a result object, including one nested under
/// `amortization` as the mortgage command emits.
pub fn find_schedule(result: &serde_json::Map<String, Value>) -> Option<&Vec<Value>> {
    match result.get(SCHEDULE_KEY) {
        Some(Value::Array(rows)) => Some(rows),
        _ => match result.get("amortization") {
            Some(Value::Object(inner)) => find_schedule(inner),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_schedule_top_level() {
        let result = json!({ "monthly_payment": "1000", "schedule": [{ "period": 1 }] });
        let rows = find_schedule(result.as_object().unwrap()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_find_schedule_nested_under_amortization() {
        let result = json!({
            "loan_amount": "280000",
            "amortization": { "schedule": [{ "period": 1 }, { "period": 2 }] }
        });
        let rows = find_schedule(result.as_object().unwrap()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_find_schedule_absent() {
        let result = json!({ "emi": "8884.88" });
        assert!(find_schedule(result.as_object().unwrap()).is_none());
    }
}
