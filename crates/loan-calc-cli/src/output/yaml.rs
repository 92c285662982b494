use serde_json::Value;
use std::io;

/// Print the output envelope as YAML to stdout.
pub fn print_yaml(value: &Value) -> Result<(), serde_yaml::Error> {
    serde_yaml::to_writer(io::stdout().lock(), value)
}
