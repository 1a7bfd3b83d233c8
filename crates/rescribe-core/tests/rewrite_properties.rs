//! Property tests for the universal rewriter invariants.

use proptest::prelude::*;
use rescribe_core::serial::{SerialDecoder, SerialEncoder};
use rescribe_core::{bytes, rewrite, RefStyle, Value};

fn string_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        "[a-z ./:]{0,12}".prop_map(String::into_bytes),
        // seed strings that actually contain the search text
        "[a-z]{0,4}old[a-z]{0,4}".prop_map(String::into_bytes),
        proptest::collection::vec(any::<u8>(), 0..12),
    ]
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "-?[1-9][0-9]{0,6}\\.[0-9]{1,6}".prop_map(|s| Value::Float(s.into_bytes())),
        string_bytes().prop_map(Value::Str),
        (0i64..100).prop_map(|index| Value::Ref {
            style: RefStyle::Object,
            index,
        }),
        (0i64..100).prop_map(|index| Value::Ref {
            style: RefStyle::Alias,
            index,
        }),
    ]
}

fn key() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0i64..1000).prop_map(Value::Int),
        "[a-z_]{1,10}".prop_map(|s| Value::Str(s.into_bytes())),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            proptest::collection::vec((key(), inner.clone()), 0..4).prop_map(Value::Arr),
            ((
                "[A-Z][A-Za-z0-9_]{0,8}",
                proptest::collection::vec((key(), inner.clone()), 0..4)
            ))
                .prop_map(|(class, props)| Value::Obj {
                    class: class.into_bytes(),
                    props,
                }),
        ]
    })
}

/// The expected tree after replacement: every string, keys included, passed
/// through byte substitution; everything else untouched.
fn replaced(value: &Value, search: &[u8], replace: &[u8]) -> Value {
    match value {
        Value::Str(s) => Value::Str(bytes::replace(s, search, replace)),
        Value::Arr(entries) => Value::Arr(
            entries
                .iter()
                .map(|(k, v)| (replaced(k, search, replace), replaced(v, search, replace)))
                .collect(),
        ),
        Value::Obj { class, props } => Value::Obj {
            class: class.clone(),
            props: props
                .iter()
                .map(|(k, v)| (replaced(k, search, replace), replaced(v, search, replace)))
                .collect(),
        },
        other => other.clone(),
    }
}

proptest! {
    // Grammar preservation: a valid payload rewrites to a valid payload
    // whose tree is the input tree with every embedded string replaced.
    // Decoding the output also re-checks every emitted length prefix.
    #[test]
    fn serialized_trees_rewrite_structurally(value in tree()) {
        let payload = SerialEncoder::new().encode(&value);
        let out = rewrite(&payload, b"old", b"new");
        let decoded = SerialDecoder::new().decode(&out).expect("output must stay valid serialization");
        prop_assert_eq!(decoded, replaced(&value, b"old", b"new"));
    }

    // Byte identity when nothing matches; tree equality otherwise.
    #[test]
    fn untouched_payloads_round_trip_byte_exact(value in tree()) {
        let payload = SerialEncoder::new().encode(&value);
        let out = rescribe_core::serial::rewrite(&payload, b"\0qq\0", b"x").expect("valid payload");
        if replaced(&value, b"\0qq\0", b"x") == value {
            prop_assert_eq!(out, payload);
        }
    }

    #[test]
    fn rewrite_is_pure(payload in proptest::collection::vec(any::<u8>(), 0..64),
                       search in "[a-z]{1,4}",
                       replace in "[a-z]{0,6}") {
        let a = rewrite(&payload, search.as_bytes(), replace.as_bytes());
        let b = rewrite(&payload, search.as_bytes(), replace.as_bytes());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn empty_search_is_a_no_op(payload in proptest::collection::vec(any::<u8>(), 0..64)) {
        prop_assert_eq!(rewrite(&payload, b"", b"whatever"), payload);
    }

    // The driver always terminates; literal-only payloads that cannot
    // stabilize are truncated at the bound rather than looping.
    #[test]
    fn driver_terminates_on_arbitrary_input(payload in proptest::collection::vec(any::<u8>(), 0..64)) {
        let _ = rewrite(&payload, b"ab", b"a");
    }
}

#[test]
fn representative_option_rows_round_trip() {
    // payloads shaped like the serialized configuration rows this tool is
    // pointed at in practice
    let rows: [&[u8]; 3] = [
        b"a:2:{s:4:\"home\";s:18:\"http://old.example\";s:7:\"siteurl\";s:18:\"http://old.example\";}",
        b"O:8:\"stdClass\":2:{s:3:\"url\";s:18:\"http://old.example\";s:5:\"count\";i:3;}",
        b"a:2:{i:0;a:1:{s:4:\"link\";s:18:\"http://old.example\";}i:1;R:3;}",
    ];
    for row in rows {
        let out = rewrite(row, b"old.example", b"shiny.example.org");
        let decoded = SerialDecoder::new()
            .decode(&out)
            .expect("rewritten row must decode");
        let original = SerialDecoder::new().decode(row).expect("row must decode");
        assert_eq!(decoded, replaced(&original, b"old.example", b"shiny.example.org"));
        // a second application changes nothing further
        assert_eq!(rewrite(&out, b"old.example", b"shiny.example.org"), out);
    }
}
