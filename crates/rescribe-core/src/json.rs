//! JSON pass: decode, recursively replace inside strings and keys,
//! re-encode.
//!
//! Only structured documents (objects and arrays) are handled here; a
//! valid-but-scalar document falls through to the later stages. Compact
//! re-encoding escapes neither forward slashes nor non-ASCII codepoints,
//! and map entry order is preserved across the round trip.

use serde_json::Value;

use crate::bytes;

/// Rewrite a structured JSON payload. `None` means "not recognized":
/// invalid JSON, invalid UTF-8, or a scalar top level.
pub fn rewrite(input: &[u8], search: &[u8], replace: &[u8]) -> Option<Vec<u8>> {
    let value: Value = serde_json::from_slice(input).ok()?;
    if !value.is_object() && !value.is_array() {
        return None;
    }
    let rewritten = replace_value(value, search, replace);
    serde_json::to_vec(&rewritten).ok()
}

/// Traverse sequences element-by-element and maps key-then-value; strings
/// get byte-wise substring replacement, all other scalars pass through.
fn replace_value(value: Value, search: &[u8], replace: &[u8]) -> Value {
    match value {
        Value::String(s) => Value::String(replace_str(s, search, replace)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| replace_value(v, search, replace))
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| {
                    (
                        replace_str(k, search, replace),
                        replace_value(v, search, replace),
                    )
                })
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Byte-wise replacement inside a JSON string. A result that is not valid
/// UTF-8 cannot be represented in a JSON document, so the original string
/// is kept in that case.
fn replace_str(s: String, search: &[u8], replace: &[u8]) -> String {
    if !bytes::contains(s.as_bytes(), search) {
        return s;
    }
    match String::from_utf8(bytes::replace(s.as_bytes(), search, replace)) {
        Ok(out) => out,
        Err(_) => s,
    }
}
