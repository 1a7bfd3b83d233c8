//! Length-prefixed serialization codec and string rewriter.
//!
//! Wire format:
//! - Null:    `N;`
//! - Bool:    `b:0;` / `b:1;`
//! - Int:     `i:<decimal>;`
//! - Float:   `d:<numeric>;`
//! - String:  `s:<byte_len>:"<bytes>";`   (raw bytes, no escaping)
//! - Array:   `a:<count>:{<2·count values>}`
//! - Object:  `O:<len>:"<class>":<count>:{<2·count values>}`
//! - Refs:    `r:<index>;` / `R:<index>;`  (emitted verbatim)
//! - Closure values (`C:…`) are refused.

mod decoder;
mod encoder;
mod error;

pub use decoder::{SerialDecoder, MAX_DEPTH};
pub use encoder::SerialEncoder;
pub use error::SerialError;

use crate::bytes;
use crate::value::Value;

/// Prefix bytes a serialized value may start with.
const LEAD_BYTES: &[u8] = b"abcdinorsONR";

/// Cheap structural sniff that keeps the full decoder off inputs that are
/// plainly not serialization.
fn plausible(input: &[u8]) -> bool {
    match input.iter().find(|b| !b.is_ascii_whitespace()) {
        None => false,
        Some(b) if !LEAD_BYTES.contains(b) => false,
        Some(_) => input.iter().any(|&b| b == b';' || b == b'{'),
    }
}

/// Rewrite every embedded string in a serialized payload.
///
/// Succeeds only when the decoder consumes the entire input; any shorter
/// consumption means the input was not pure serialization and the result
/// is discarded. String byte lengths are recomputed on re-emission; every
/// other production, back-reference indexes included, round-trips
/// byte-identically.
pub fn rewrite(input: &[u8], search: &[u8], replace: &[u8]) -> Result<Vec<u8>, SerialError> {
    if !plausible(input) {
        return Err(SerialError::NotSerialized);
    }
    let value = SerialDecoder::new().decode(input)?;
    let rewritten = replace_strings(&value, search, replace);
    Ok(SerialEncoder::new().encode(&rewritten))
}

/// Pure rebuild of the tree with every string — keys included — passed
/// through byte-wise substring replacement. Rebuilding rather than mutating
/// keeps reference indexes untouched by construction.
fn replace_strings(value: &Value, search: &[u8], replace: &[u8]) -> Value {
    match value {
        Value::Str(s) => Value::Str(bytes::replace(s, search, replace)),
        Value::Arr(entries) => Value::Arr(replace_entries(entries, search, replace)),
        Value::Obj { class, props } => Value::Obj {
            class: class.clone(),
            props: replace_entries(props, search, replace),
        },
        other => other.clone(),
    }
}

fn replace_entries(
    entries: &[(Value, Value)],
    search: &[u8],
    replace: &[u8],
) -> Vec<(Value, Value)> {
    entries
        .iter()
        .map(|(k, v)| {
            (
                replace_strings(k, search, replace),
                replace_strings(v, search, replace),
            )
        })
        .collect()
}
