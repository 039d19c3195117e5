//! Line-level format behavior: indentation, comments, markers, quoting,
//! and the decode error taxonomy with exact line numbers.

use serde_yamlite::{decode, encode, yaml, Error, Number, Value};

#[test]
fn test_comments_blanks_and_markers() {
    let text = "\
---
# configuration
a: 1

b: 2   # trailing note
# another comment
...
";
    let doc = decode(text).unwrap();
    assert_eq!(doc.get("a").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(doc.get("b").and_then(|v| v.as_i64()), Some(2));
    assert_eq!(doc.as_mapping().unwrap().len(), 2);
}

#[test]
fn test_hash_without_leading_space_is_content() {
    let doc = decode("a: x#y\n").unwrap();
    assert_eq!(doc.get("a").and_then(|v| v.as_str()), Some("x#y"));

    let doc = decode("a: \"x # y\" # real comment\n").unwrap();
    assert_eq!(doc.get("a").and_then(|v| v.as_str()), Some("x # y"));
}

#[test]
fn test_nested_mapping() {
    let doc = decode("a: 1\nb:\n  c: 2\n  d: 3\ne: 4\n").unwrap();
    assert_eq!(doc.get("a").and_then(|v| v.as_i64()), Some(1));
    let b = doc.get("b").unwrap();
    assert_eq!(b.get("c").and_then(|v| v.as_i64()), Some(2));
    assert_eq!(b.get("d").and_then(|v| v.as_i64()), Some(3));
    assert_eq!(doc.get("e").and_then(|v| v.as_i64()), Some(4));
}

#[test]
fn test_tab_indentation() {
    let doc = decode("a:\n\tb: 1\n\tc: 2\n").unwrap();
    let a = doc.get("a").unwrap();
    assert_eq!(a.get("b").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(a.get("c").and_then(|v| v.as_i64()), Some(2));
}

#[test]
fn test_width_agnostic_siblings() {
    // Each section picks its own width from its first line.
    let doc = decode("a:\n      deep: 1\nb:\n c: 2\n").unwrap();
    assert_eq!(
        doc.get("a").and_then(|v| v.get("deep")).and_then(|v| v.as_i64()),
        Some(1)
    );
    assert_eq!(
        doc.get("b").and_then(|v| v.get("c")).and_then(|v| v.as_i64()),
        Some(2)
    );
}

#[test]
fn test_hang_indented_sequence() {
    // Sequence entries at the same width as the parent key.
    let doc = decode("a: 1\nb:\n- 2\n- 3\nc: 4\n").unwrap();
    assert_eq!(doc.get("a").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(
        doc.get("b"),
        Some(&Value::Sequence(vec![
            Value::Number(Number::Integer(2)),
            Value::Number(Number::Integer(3)),
        ]))
    );
    assert_eq!(doc.get("c").and_then(|v| v.as_i64()), Some(4));
}

#[test]
fn test_indented_sequence() {
    let doc = decode("b:\n  - 2\n  - 3\n").unwrap();
    assert_eq!(
        doc.get("b"),
        Some(&Value::Sequence(vec![
            Value::Number(Number::Integer(2)),
            Value::Number(Number::Integer(3)),
        ]))
    );
}

#[test]
fn test_sequence_of_mappings() {
    // Inline remainders stay scalars; a nested mapping needs its own lines.
    let doc = decode("- a: 1\n").unwrap();
    assert_eq!(
        doc,
        Value::Sequence(vec![Value::String("a: 1".to_string())])
    );

    let doc = decode("-\n  a: 1\n-\n  a: 2\n").unwrap();
    let seq = doc.as_sequence().unwrap();
    assert_eq!(seq.len(), 2);
    assert_eq!(seq[0].get("a").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(seq[1].get("a").and_then(|v| v.as_i64()), Some(2));
}

#[test]
fn test_empty_value_is_empty_mapping() {
    let doc = decode("a:\n").unwrap();
    assert_eq!(doc.get("a"), Some(&Value::Mapping(Default::default())));
}

#[test]
fn test_undefined_round_trip() {
    let doc = decode("- 1\n- undefined\n- 3\n").unwrap();
    assert_eq!(
        doc,
        Value::Sequence(vec![
            Value::Number(Number::Integer(1)),
            Value::Absent,
            Value::Number(Number::Integer(3)),
        ])
    );
    // Sequence positions survive re-encoding.
    assert_eq!(encode(&doc).unwrap(), "- 1\n- undefined\n- 3\n");

    // Mapping entries do not.
    let doc = decode("a: 1\nb: undefined\n").unwrap();
    assert_eq!(doc.get("b"), Some(&Value::Absent));
    assert_eq!(encode(&doc).unwrap(), "a: 1\n");
}

#[test]
fn test_literal_forms() {
    let doc = decode("a: null\nb: True\nc: FALSE\nd: .inf\ne: -.Inf\nf: .NaN\n").unwrap();
    assert_eq!(doc.get("a"), Some(&Value::Null));
    assert_eq!(doc.get("b"), Some(&Value::Bool(true)));
    assert_eq!(doc.get("c"), Some(&Value::Bool(false)));
    assert_eq!(doc.get("d"), Some(&Value::Number(Number::Infinity)));
    assert_eq!(doc.get("e"), Some(&Value::Number(Number::NegativeInfinity)));
    assert_eq!(doc.get("f"), Some(&Value::Number(Number::NaN)));
}

#[test]
fn test_encode_canonical_forms() {
    let doc = yaml!({
        "n": null,
        "t": true,
        "inf": 1.5,
        "list": [1, "two words", false]
    });
    let text = encode(&doc).unwrap();
    assert_eq!(
        text,
        "n: null\nt: true\ninf: 1.5\nlist:\n  - 1\n  - two words\n  - false\n"
    );
    // Re-encoding a decoded document reproduces it byte for byte.
    assert_eq!(encode(&decode(&text).unwrap()).unwrap(), text);
}

#[test]
fn test_encode_quotes_when_needed() {
    let doc = yaml!({
        "empty": "",
        "padded": " x ",
        "colon": "a: b",
        "accent": "héllo"
    });
    let text = encode(&doc).unwrap();
    assert_eq!(
        text,
        "empty: \"\"\npadded: \" x \"\ncolon: \"a: b\"\naccent: \"h\\u00e9llo\"\n"
    );
    assert_eq!(decode(&text).unwrap(), doc);
}

#[test]
fn test_quoted_key_round_trip() {
    let mut map = serde_yamlite::YamlMap::new();
    map.insert("a: b".to_string(), Value::from(1i64));
    let doc = Value::Mapping(map);

    let text = encode(&doc).unwrap();
    assert_eq!(text, "\"a: b\": 1\n");
    assert_eq!(decode(&text).unwrap(), doc);
}

#[test]
fn test_error_missing_name() {
    let err = decode("a: 1\nbogus\n").unwrap_err();
    assert!(matches!(err, Error::MissingName { line: 2 }));
    assert_eq!(err.to_string(), "line 2: missing property name");
}

#[test]
fn test_error_indentation_change() {
    let err = decode("a: 1\n  b: 2\n").unwrap_err();
    assert!(matches!(err, Error::IndentationChange { line: 2 }));
    assert_eq!(err.to_string(), "line 2: unexpected change in indentation");
}

#[test]
fn test_error_mixed_kinds() {
    let err = decode("a: 1\n- 2\n").unwrap_err();
    assert!(matches!(err, Error::MixedKinds { line: 2 }));
    assert_eq!(err.to_string(), "line 2: unexpected array element in hash");
}

#[test]
fn test_error_invalid_quoted_string() {
    let err = decode("a: \"unterminated\n").unwrap_err();
    assert!(matches!(err, Error::InvalidQuotedString { line: 1 }));

    let err = decode("a: \"tail\" extra\n").unwrap_err();
    assert!(matches!(err, Error::InvalidQuotedString { line: 1 }));

    let err = decode("x: 1\ny: \"bad\\q\"\n").unwrap_err();
    assert!(matches!(err, Error::InvalidQuotedString { line: 2 }));
}

#[test]
fn test_error_trailing_input() {
    let err = decode("  a: 1\nb: 2\n").unwrap_err();
    assert!(matches!(err, Error::TrailingInput { line: 2 }));

    let err = decode("- 1\nb: 2\n").unwrap_err();
    assert!(matches!(err, Error::TrailingInput { line: 2 }));
}

#[test]
fn test_error_lines_skip_comments() {
    // Comment and blank lines still count toward line numbers.
    let err = decode("# one\n\na: 1\n  b: 2\n").unwrap_err();
    assert!(matches!(err, Error::IndentationChange { line: 4 }));
}

#[test]
fn test_deep_nesting_encode_limit() {
    let mut value = yaml!({ "leaf": 1 });
    for _ in 0..1100 {
        let mut map = serde_yamlite::YamlMap::new();
        map.insert("next".to_string(), value);
        value = Value::Mapping(map);
    }
    assert!(matches!(
        encode(&value),
        Err(Error::DepthLimitExceeded)
    ));
}
