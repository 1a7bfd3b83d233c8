//! Single-pass dispatcher and the bounded fixed-point driver.

use crate::{bytes, envelope, json, serial};

/// Upper bound on dispatcher passes. Payloads occur with nested envelopes
/// (base64 of serialization of JSON); one pass peels a single layer, and
/// the bound stops runaway expansion when `replace` itself looks like
/// encoded content.
pub const MAX_PASSES: usize = 5;

/// One dispatcher pass. Strategies run in order — serialization, JSON,
/// base64 envelope, literal substitution — and the first that recognizes
/// the input wins. Stage failures are sentinels, never errors: the pass is
/// a total function.
pub fn one_pass(input: &[u8], search: &[u8], replace: &[u8]) -> Vec<u8> {
    if let Ok(out) = serial::rewrite(input, search, replace) {
        return out;
    }
    if let Some(out) = json::rewrite(input, search, replace) {
        return out;
    }
    if let Some(out) = envelope::rewrite(input, search, replace) {
        return out;
    }
    bytes::replace(input, search, replace)
}

/// Rewrite a payload to a fixed point.
///
/// [`one_pass`] repeats until the output equals the input byte-for-byte or
/// [`MAX_PASSES`] iterations have run; the last output is returned either
/// way. An empty `search` is a no-op. Pure function of its arguments: no
/// global state, no I/O, re-entrant across threads.
pub fn rewrite(payload: &[u8], search: &[u8], replace: &[u8]) -> Vec<u8> {
    if search.is_empty() {
        return payload.to_vec();
    }
    let mut current = payload.to_vec();
    for _ in 0..MAX_PASSES {
        let next = one_pass(&current, search, replace);
        if next == current {
            break;
        }
        current = next;
    }
    current
}
