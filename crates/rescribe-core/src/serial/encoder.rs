//! `SerialEncoder` — re-emits a decoded tree in the length-prefixed wire
//! format.
//!
//! String length prefixes are recomputed from the actual byte strings, so a
//! rewritten tree always carries accurate lengths. Every other production
//! round-trips byte-identically with what the decoder accepted.

use crate::value::{RefStyle, Value};

pub struct SerialEncoder {
    out: Vec<u8>,
}

impl Default for SerialEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialEncoder {
    pub fn new() -> Self {
        Self { out: Vec::new() }
    }

    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.out.clear();
        self.write_value(value);
        std::mem::take(&mut self.out)
    }

    fn write_value(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.extend_from_slice(b"N;"),
            Value::Bool(b) => {
                self.out
                    .extend_from_slice(if *b { b"b:1;" } else { b"b:0;" });
            }
            Value::Int(n) => {
                self.out.extend_from_slice(b"i:");
                self.ascii(&n.to_string());
                self.out.push(b';');
            }
            Value::Float(raw) => {
                self.out.extend_from_slice(b"d:");
                self.out.extend_from_slice(raw);
                self.out.push(b';');
            }
            Value::Str(bytes) => {
                self.out.push(b's');
                self.write_counted(bytes);
                self.out.push(b';');
            }
            Value::Arr(entries) => {
                self.out.extend_from_slice(b"a:");
                self.ascii(&entries.len().to_string());
                self.out.push(b':');
                self.write_entries(entries);
            }
            Value::Obj { class, props } => {
                self.out.push(b'O');
                self.write_counted(class);
                self.out.push(b':');
                self.ascii(&props.len().to_string());
                self.out.push(b':');
                self.write_entries(props);
            }
            Value::Ref { style, index } => {
                self.out.push(match style {
                    RefStyle::Object => b'r',
                    RefStyle::Alias => b'R',
                });
                self.out.push(b':');
                self.ascii(&index.to_string());
                self.out.push(b';');
            }
        }
    }

    /// `:<byte_len>:"<bytes>"` — the length prefix counts bytes, never
    /// codepoints.
    fn write_counted(&mut self, bytes: &[u8]) {
        self.out.push(b':');
        self.ascii(&bytes.len().to_string());
        self.out.extend_from_slice(b":\"");
        self.out.extend_from_slice(bytes);
        self.out.push(b'"');
    }

    fn write_entries(&mut self, entries: &[(Value, Value)]) {
        self.out.push(b'{');
        for (key, value) in entries {
            self.write_value(key);
            self.write_value(value);
        }
        self.out.push(b'}');
    }

    fn ascii(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }
}
