//! JSON codec module
//!
//! Parses and serializes arbitrary JSON values. Response bodies use
//! 4-space indentation, the on-disk document is kept compact.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

/// Parse JSON text into a value
pub fn parse(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(text)
}

/// Parse a raw JSON byte buffer into a value
pub fn parse_bytes(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Serialize a value with 4-space indentation
pub fn to_pretty(value: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    // serde_json output is always valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Serialize a value without any whitespace
pub fn to_compact(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}
