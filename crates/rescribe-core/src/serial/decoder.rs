//! `SerialDecoder` — decoder for the length-prefixed serialization grammar.
//!
//! Strictly structural: counts govern loops, string lengths are byte
//! counts, and nothing is validated beyond the grammar itself. Every
//! mismatch is an error; the decoder never partially commits and never
//! panics on truncated input.

use super::error::SerialError;
use crate::value::{RefStyle, Value};

/// Maximum nesting depth before a payload is rejected.
pub const MAX_DEPTH: usize = 1000;

/// Internal cursor used during decoding.
struct Cur<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cur<'a> {
    fn peek(&self) -> Result<u8, SerialError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(SerialError::UnexpectedEof(self.pos))
    }

    fn u8(&mut self) -> Result<u8, SerialError> {
        let v = self.peek()?;
        self.pos += 1;
        Ok(v)
    }

    fn expect(&mut self, byte: u8) -> Result<(), SerialError> {
        let pos = self.pos;
        if self.u8()? != byte {
            return Err(SerialError::InvalidByte(pos));
        }
        Ok(())
    }

    /// Slice exactly `len` bytes, by byte offset.
    fn take(&mut self, len: usize) -> Result<&'a [u8], SerialError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(SerialError::LengthOverrun(self.pos))?;
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}

/// Stateless serialization decoder.
#[derive(Default)]
pub struct SerialDecoder;

impl SerialDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode a complete payload. The entire input must be consumed;
    /// trailing bytes reject the whole payload.
    pub fn decode(&self, input: &[u8]) -> Result<Value, SerialError> {
        let mut c = Cur {
            data: input,
            pos: 0,
        };
        let value = self.read_value(&mut c, 0)?;
        if c.pos != input.len() {
            return Err(SerialError::TrailingBytes);
        }
        Ok(value)
    }

    fn read_value(&self, c: &mut Cur, depth: usize) -> Result<Value, SerialError> {
        if depth > MAX_DEPTH {
            return Err(SerialError::TooDeep);
        }
        let pos = c.pos;
        match c.u8()? {
            b'N' => {
                c.expect(b';')?;
                Ok(Value::Null)
            }
            b'b' => self.read_bool(c),
            b'i' => self.read_int(c),
            b'd' => self.read_float(c),
            b's' => self.read_str(c),
            b'a' => self.read_arr(c, depth),
            b'O' => self.read_obj(c, depth),
            b'r' => self.read_ref(c, RefStyle::Object),
            b'R' => self.read_ref(c, RefStyle::Alias),
            b'C' => Err(SerialError::Closure),
            _ => Err(SerialError::InvalidByte(pos)),
        }
    }

    fn read_bool(&self, c: &mut Cur) -> Result<Value, SerialError> {
        c.expect(b':')?;
        let pos = c.pos;
        let v = match c.u8()? {
            b'0' => false,
            b'1' => true,
            _ => return Err(SerialError::InvalidByte(pos)),
        };
        c.expect(b';')?;
        Ok(Value::Bool(v))
    }

    fn read_int(&self, c: &mut Cur) -> Result<Value, SerialError> {
        c.expect(b':')?;
        let n = self.read_decimal(c)?;
        c.expect(b';')?;
        Ok(Value::Int(n))
    }

    /// `d:<numeric>;` — the numeric text is kept raw so re-emission is
    /// byte-exact regardless of the producer's float formatting.
    fn read_float(&self, c: &mut Cur) -> Result<Value, SerialError> {
        c.expect(b':')?;
        let start = c.pos;
        let mut digits = 0usize;
        while let Ok(ch) = c.peek() {
            match ch {
                b'0'..=b'9' => {
                    digits += 1;
                    c.pos += 1;
                }
                b'+' | b'-' | b'.' | b'e' | b'E' => c.pos += 1,
                _ => break,
            }
        }
        if digits == 0 {
            return Err(SerialError::InvalidNumber(start));
        }
        let raw = c.data[start..c.pos].to_vec();
        c.expect(b';')?;
        Ok(Value::Float(raw))
    }

    fn read_str(&self, c: &mut Cur) -> Result<Value, SerialError> {
        let bytes = self.read_str_bytes(c)?;
        c.expect(b';')?;
        Ok(Value::Str(bytes))
    }

    /// `:<len>:"<len bytes>"` — the declared length counts bytes; the
    /// closing quote is validated after the slice, so quotes inside the
    /// string need no escaping.
    fn read_str_bytes(&self, c: &mut Cur) -> Result<Vec<u8>, SerialError> {
        c.expect(b':')?;
        let len = self.read_count(c)?;
        c.expect(b':')?;
        c.expect(b'"')?;
        let bytes = c.take(len)?.to_vec();
        c.expect(b'"')?;
        Ok(bytes)
    }

    fn read_arr(&self, c: &mut Cur, depth: usize) -> Result<Value, SerialError> {
        c.expect(b':')?;
        let count = self.read_count(c)?;
        c.expect(b':')?;
        let entries = self.read_entries(c, count, depth)?;
        Ok(Value::Arr(entries))
    }

    fn read_obj(&self, c: &mut Cur, depth: usize) -> Result<Value, SerialError> {
        let class = self.read_str_bytes(c)?;
        c.expect(b':')?;
        let count = self.read_count(c)?;
        c.expect(b':')?;
        let props = self.read_entries(c, count, depth)?;
        Ok(Value::Obj { class, props })
    }

    /// `{<2·count values>}` — keys and values alternate but are parsed
    /// uniformly; the count governs the loop.
    fn read_entries(
        &self,
        c: &mut Cur,
        count: usize,
        depth: usize,
    ) -> Result<Vec<(Value, Value)>, SerialError> {
        c.expect(b'{')?;
        // count comes off the wire; do not pre-allocate it blindly
        let mut entries = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let key = self.read_value(c, depth + 1)?;
            let val = self.read_value(c, depth + 1)?;
            entries.push((key, val));
        }
        c.expect(b'}')?;
        Ok(entries)
    }

    fn read_ref(&self, c: &mut Cur, style: RefStyle) -> Result<Value, SerialError> {
        c.expect(b':')?;
        let index = self.read_decimal(c)?;
        c.expect(b';')?;
        Ok(Value::Ref { style, index })
    }

    /// Canonical signed decimal: optional `-`, no leading zeros, no `-0`,
    /// fits in i64. Canonical text is what producers emit, and it is the
    /// only text whose re-emission is guaranteed byte-identical.
    fn read_decimal(&self, c: &mut Cur) -> Result<i64, SerialError> {
        let start = c.pos;
        let negative = c.peek()? == b'-';
        if negative {
            c.pos += 1;
        }
        let digits_start = c.pos;
        while matches!(c.peek(), Ok(b'0'..=b'9')) {
            c.pos += 1;
        }
        let digits = &c.data[digits_start..c.pos];
        let canonical = match digits {
            [] => false,
            [b'0'] => !negative,
            [first, ..] => *first != b'0',
        };
        if !canonical {
            return Err(SerialError::InvalidNumber(start));
        }
        std::str::from_utf8(&c.data[start..c.pos])
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or(SerialError::InvalidNumber(start))
    }

    /// Non-negative canonical decimal used for lengths and entry counts.
    fn read_count(&self, c: &mut Cur) -> Result<usize, SerialError> {
        let start = c.pos;
        let n = self.read_decimal(c)?;
        usize::try_from(n).map_err(|_| SerialError::InvalidNumber(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &[u8]) -> Result<Value, SerialError> {
        SerialDecoder::new().decode(input)
    }

    #[test]
    fn scalars() {
        assert_eq!(decode(b"N;"), Ok(Value::Null));
        assert_eq!(decode(b"b:0;"), Ok(Value::Bool(false)));
        assert_eq!(decode(b"b:1;"), Ok(Value::Bool(true)));
        assert_eq!(decode(b"i:-42;"), Ok(Value::Int(-42)));
        assert_eq!(decode(b"d:0.5;"), Ok(Value::Float(b"0.5".to_vec())));
        assert_eq!(decode(b"s:0:\"\";"), Ok(Value::Str(Vec::new())));
    }

    #[test]
    fn string_length_is_bytes_not_codepoints() {
        let input = "s:6:\"café!\";".as_bytes();
        assert_eq!(decode(input), Ok(Value::Str("café!".as_bytes().to_vec())));
    }

    #[test]
    fn string_may_contain_quotes_and_semicolons() {
        assert_eq!(
            decode(b"s:4:\"a\";\"\";"),
            Ok(Value::Str(b"a\";\"".to_vec()))
        );
    }

    #[test]
    fn non_canonical_numbers_are_rejected() {
        assert!(decode(b"i:01;").is_err());
        assert!(decode(b"i:-0;").is_err());
        assert!(decode(b"i:+1;").is_err());
        assert!(decode(b"s:00:\"\";").is_err());
        assert!(decode(b"a:-1:{}").is_err());
    }

    #[test]
    fn truncated_inputs_do_not_panic() {
        for input in [
            &b"s:5:\"hi\";"[..],
            b"s:5:\"hello",
            b"a:2:{i:0;s:3:\"foo\";",
            b"i:12",
            b"d:;",
            b"",
            b"s:18446744073709551615:\"x\";",
        ] {
            assert!(decode(input).is_err());
        }
    }

    #[test]
    fn trailing_bytes_reject_the_payload() {
        assert!(matches!(
            decode(b"i:1;i:2;"),
            Err(SerialError::TrailingBytes)
        ));
    }

    #[test]
    fn closures_are_refused() {
        assert!(matches!(
            decode(b"C:3:\"abc\":4:{i:1;}"),
            Err(SerialError::Closure)
        ));
    }

    #[test]
    fn nested_array_with_reference() {
        let input = b"a:2:{i:0;s:3:\"foo\";i:1;r:2;}";
        let expected = Value::Arr(vec![
            (Value::Int(0), Value::Str(b"foo".to_vec())),
            (
                Value::Int(1),
                Value::Ref {
                    style: RefStyle::Object,
                    index: 2,
                },
            ),
        ]);
        assert_eq!(decode(input), Ok(expected));
    }

    #[test]
    fn object_keeps_unknown_class() {
        let input = b"O:8:\"stdClass\":1:{s:3:\"url\";s:7:\"old.com\";}";
        match decode(input) {
            Ok(Value::Obj { class, props }) => {
                assert_eq!(class, b"stdClass");
                assert_eq!(props.len(), 1);
            }
            other => panic!("unexpected decode result: {other:?}"),
        }
    }

    #[test]
    fn depth_limit_rejects_instead_of_overflowing() {
        let mut input = Vec::new();
        for _ in 0..(MAX_DEPTH + 10) {
            input.extend_from_slice(b"a:1:{i:0;");
        }
        assert!(matches!(decode(&input), Err(SerialError::TooDeep)));
    }
}
