//! `Value` — the decoded tree produced by the serialization decoder.

/// Back-reference flavor: `r:` points at a previously serialized object,
/// `R:` aliases a previously serialized slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefStyle {
    Object,
    Alias,
}

/// A decoded serialization value.
///
/// Arrays and object properties are ordered `(key, value)` pairs rather
/// than a map: the wire format is positional, and reordering entries would
/// change the emitted bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Canonical decimal integer; re-emission reproduces the input text.
    Int(i64),
    /// Raw numeric text of a `d:…;` token, echoed byte-exact on encode.
    /// Producers emit float precision a formatter round trip would lose.
    Float(Vec<u8>),
    /// Raw string bytes. The only production the rewriter substitutes into.
    Str(Vec<u8>),
    Arr(Vec<(Value, Value)>),
    Obj {
        /// Class name bytes, preserved whether or not the class is known.
        class: Vec<u8>,
        props: Vec<(Value, Value)>,
    },
    /// Back-reference to an earlier value, emitted verbatim. Rewriting
    /// changes byte lengths, not value positions, so the index stays valid.
    Ref { style: RefStyle, index: i64 },
}
