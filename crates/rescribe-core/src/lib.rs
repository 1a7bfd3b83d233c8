//! Content-aware search-and-replace for encoded database payloads.
//!
//! Text and binary cells frequently hold encoded payloads — length-prefixed
//! object serialization, JSON documents, base64 envelopes — that a blind
//! substring replacement would corrupt. This crate decodes each payload,
//! rewrites the embedded strings, and re-encodes with corrected length
//! prefixes.
//!
//! The public entry point is [`rewrite`], a pure function of
//! `(payload, search, replace)`. The per-format stages live in [`serial`],
//! [`json`] and [`envelope`] and are usable on their own.
//!
//! # Example
//!
//! ```
//! use rescribe_core::rewrite;
//!
//! let out = rewrite(b"s:5:\"hello\";", b"hello", b"hi");
//! assert_eq!(out, b"s:2:\"hi\";");
//! ```

pub mod bytes;
pub mod envelope;
pub mod json;
pub mod serial;

mod rewrite;
mod value;

pub use rewrite::{one_pass, rewrite, MAX_PASSES};
pub use value::{RefStyle, Value};
