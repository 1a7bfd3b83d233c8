//! Base64 envelope pass.
//!
//! The rewrite after decode is a flat byte substitution; the decoded
//! payload is treated as opaque, so an encoded serialization payload keeps
//! its original length prefixes even when an embedded string changes size.
//! Nested envelopes rely on the multi-pass driver peeling one layer per
//! pass, and that limitation is intentional.

use base64::{engine::general_purpose::STANDARD as B64, Engine};

use crate::bytes;

/// Plausible-base64 sniff: non-empty, length divisible by 4, every byte in
/// the standard alphabet (`A-Z a-z 0-9 + / =`). Deliberately loose — short
/// alphanumeric words match — because strict decoding below is the real
/// gate and the literal fallback keeps false positives harmless.
pub fn looks_like_base64(input: &[u8]) -> bool {
    !input.is_empty()
        && input.len() % 4 == 0
        && input
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
}

/// Rewrite a base64 envelope: strict decode, flat byte replacement over the
/// decoded bytes, canonical re-encode. `None` means "not recognized".
pub fn rewrite(input: &[u8], search: &[u8], replace: &[u8]) -> Option<Vec<u8>> {
    if !looks_like_base64(input) {
        return None;
    }
    let decoded = B64.decode(input).ok()?;
    if decoded.is_empty() {
        return None;
    }
    let replaced = bytes::replace(&decoded, search, replace);
    Some(B64.encode(replaced).into_bytes())
}
