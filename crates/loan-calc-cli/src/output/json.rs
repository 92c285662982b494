use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print the envelope as JSON to stdout.
pub fn print_json(value: &Value) -> io::Result<()> {
    write_json(io::stdout().lock(), value)
}

pub fn write_json<W: Write>(mut out: W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)
}
