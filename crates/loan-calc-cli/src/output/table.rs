use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use loan_calc_core::formatting::{format_currency, format_percent};
use loan_calc_core::{Currency, RoundingPrecision};

use super::{find_schedule, SCHEDULE_KEY};

/// Result fields rendered as currency amounts.
const MONEY_FIELDS: &[&str] = &[
    "monthly_payment",
    "principal_and_interest",
    "recurring_costs_per_period",
    "total_interest",
    "total_recurring_costs",
    "total_payment",
    "loan_amount",
    "emi",
    "max_principal",
    "payment",
    "principal_portion",
    "interest_portion",
    "remaining_balance",
];

/// How amounts are rendered, read back from the envelope's assumptions.
struct Presentation {
    currency: Currency,
    precision: RoundingPrecision,
}

impl Presentation {
    fn from_envelope(envelope: &Map<String, Value>) -> Self {
        let assumptions = envelope.get("assumptions");
        let field = |key: &str| assumptions.and_then(|a| a.get(key)).cloned();
        Self {
            currency: field("currency")
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default(),
            precision: field("precision")
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default(),
        }
    }

    fn format(&self, key: &str, value: &Value) -> String {
        let amount = match value {
            Value::String(s) => s.parse::<Decimal>().ok(),
            _ => None,
        };
        match amount {
            Some(d) if MONEY_FIELDS.contains(&key) => {
                format_currency(d, &self.currency, self.precision)
            }
            Some(d) if key.ends_with("_percent") => format_percent(d),
            _ => format_value(value),
        }
    }
}

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            // Check if "result" key holds the primary data
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr, None);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    let presentation = Presentation::from_envelope(envelope);

    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        push_fields(&mut builder, res_map, &presentation, "");
        let table = Table::from(builder);
        println!("{}", table);

        if let Some(rows) = find_schedule(res_map) {
            if !rows.is_empty() {
                println!("\nAmortization schedule:");
                print_array_table(rows, Some(&presentation));
            }
        }
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    // Print warnings if any
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    // Print methodology
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Flatten nested result objects (`amortization.*`) into prefixed rows,
/// leaving the schedule for its own table.
fn push_fields(builder: &mut Builder, map: &Map<String, Value>, p: &Presentation, prefix: &str) {
    for (key, val) in map {
        if key == SCHEDULE_KEY {
            continue;
        }
        match val {
            Value::Object(inner) => push_fields(builder, inner, p, &format!("{prefix}{key}.")),
            _ => builder.push_record([format!("{prefix}{key}"), p.format(key, val)]),
        }
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn print_array_table(arr: &[Value], presentation: Option<&Presentation>) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| match presentation {
                                Some(p) => p.format(h, v),
                                None => format_value(v),
                            })
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        // Simple array of values
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
