//! Encoding: the tree walker and the quoting/escaping engine.
//!
//! ## Overview
//!
//! The encoder walks a [`Value`] tree and emits indented lines, never
//! mutating the tree it walks:
//!
//! - **Quote minimization**: strings are emitted bare whenever the quoting
//!   rules allow, quoted and escaped JSON-style otherwise
//! - **Absent asymmetry**: a mapping entry holding [`Value::Absent`] is
//!   omitted entirely, while a sequence element holding it keeps its
//!   position as a visible `undefined` placeholder
//! - **Depth ceiling**: recursion is bounded at 1000 levels, the guard
//!   against pathologically deep input
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_yamlite::{encode, yaml};
//!
//! let doc = yaml!({ "d3": 3, "d4": [4] });
//! assert_eq!(encode(&doc).unwrap(), "d3: 3\nd4:\n  - 4\n");
//! ```

use crate::{scalar, Error, Number, Result, Value, YamlMap, YamlOptions};
use serde::{ser, Serialize};

/// Encode recursion ceiling. Deeper trees fail with
/// [`Error::DepthLimitExceeded`] instead of exhausting the stack.
const MAX_DEPTH: usize = 1000;

/// First characters that force quoting even when nothing else does.
const RESERVED_FIRST: &[char] = &[
    '\'', '"', '[', ']', '{', '}', '>', '|', '*', '&', '!', '%', '#', '`', '@', ',',
];

/// Decides whether a string must be quoted to survive a round trip.
///
/// True when the string is empty, has leading or trailing whitespace, starts
/// with a reserved character, or contains a control character, a double
/// quote, a colon, or any character outside printable ASCII. Also true when
/// the bare token would re-read as something other than this exact string:
/// literal and number lookalikes like `true` or `123`, sequence-entry
/// lookalikes like `- x`, and tokens containing a comment opener.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::needs_quoting;
///
/// assert!(needs_quoting(""));
/// assert!(needs_quoting(" x"));
/// assert!(needs_quoting("a:b"));
/// assert!(needs_quoting("héllo"));
/// assert!(needs_quoting("true"));
/// assert!(needs_quoting("123"));
/// assert!(!needs_quoting("three"));
/// assert!(!needs_quoting("two three"));
/// ```
#[must_use]
pub fn needs_quoting(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    if first.is_whitespace() || RESERVED_FIRST.contains(&first) {
        return true;
    }
    if s.trim() != s {
        return true;
    }
    if s.chars()
        .any(|c| (c as u32) < 0x20 || c == '"' || c == ':' || (c as u32) >= 0x7F)
    {
        return true;
    }
    // A decoder strips trailing comments before coercing, so a bare token
    // containing a comment opener would come back shortened.
    if s.contains(" #") || s.contains("\t#") {
        return true;
    }
    // Bare in key position, a dash line would re-parse as a sequence entry.
    if s == "-" || s.starts_with("- ") {
        return true;
    }
    !matches!(scalar::coerce(s), Value::String(_))
}

/// Produces the quoted, escaped form of a string: JSON-style escapes for
/// control characters, quotes, and backslashes; `\uXXXX` for everything
/// non-ASCII, with surrogate pairs above U+FFFF.
#[must_use]
pub fn quote(s: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c if (c as u32) >= 0x7F => {
                let cp = c as u32;
                if cp > 0xFFFF {
                    let v = cp - 0x10000;
                    let _ = write!(out, "\\u{:04x}\\u{:04x}", 0xD800 + (v >> 10), 0xDC00 + (v & 0x3FF));
                } else {
                    let _ = write!(out, "\\u{:04x}", cp);
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn encode_string(s: &str) -> String {
    if needs_quoting(s) {
        quote(s)
    } else {
        s.to_string()
    }
}

fn format_number(n: &Number) -> String {
    match n {
        Number::Integer(i) => i.to_string(),
        Number::Float(f) if f.is_nan() => ".NaN".to_string(),
        Number::Float(f) if *f == f64::INFINITY => ".Inf".to_string(),
        Number::Float(f) if *f == f64::NEG_INFINITY => "-.Inf".to_string(),
        Number::Float(f) => {
            // Keep a decimal point so a re-decode yields Float, not Integer.
            let mut s = f.to_string();
            if !s.contains('.') {
                s.push_str(".0");
            }
            s
        }
        Number::Infinity => ".Inf".to_string(),
        Number::NegativeInfinity => "-.Inf".to_string(),
        Number::NaN => ".NaN".to_string(),
    }
}

fn format_scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => (if *b { "true" } else { "false" }).to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => encode_string(s),
        Value::Absent => "undefined".to_string(),
        // Compound values never reach scalar formatting.
        Value::Sequence(_) | Value::Mapping(_) => unreachable!("compound value in scalar position"),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Absent => "undefined",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
    }
}

fn encode_node(
    out: &mut String,
    value: &Value,
    level: usize,
    depth: usize,
    options: &YamlOptions,
) -> Result<()> {
    if depth >= MAX_DEPTH {
        return Err(Error::DepthLimitExceeded);
    }
    let pad = " ".repeat(level * options.indent);
    match value {
        Value::Sequence(seq) => {
            for element in seq {
                match element {
                    Value::Sequence(_) | Value::Mapping(_) => {
                        out.push_str(&pad);
                        out.push_str("-\n");
                        encode_node(out, element, level + 1, depth + 1, options)?;
                    }
                    scalar => {
                        out.push_str(&pad);
                        out.push_str("- ");
                        out.push_str(&format_scalar(scalar));
                        out.push('\n');
                    }
                }
            }
        }
        Value::Mapping(map) => {
            for (key, entry) in map.iter() {
                // Absent in a mapping means "skip the entry".
                if entry.is_absent() {
                    continue;
                }
                match entry {
                    Value::Sequence(_) | Value::Mapping(_) => {
                        out.push_str(&pad);
                        out.push_str(&encode_string(key));
                        out.push_str(":\n");
                        encode_node(out, entry, level + 1, depth + 1, options)?;
                    }
                    scalar => {
                        out.push_str(&pad);
                        out.push_str(&encode_string(key));
                        out.push_str(": ");
                        out.push_str(&format_scalar(scalar));
                        out.push('\n');
                    }
                }
            }
        }
        other => return Err(Error::unencodable(kind_name(other))),
    }
    Ok(())
}

/// Encodes a [`Value`] tree with default options (2-space indentation).
///
/// # Errors
///
/// The root must be a sequence or a mapping; anything else fails with
/// [`Error::UnencodableValue`]. Trees deeper than 1000 levels fail with
/// [`Error::DepthLimitExceeded`].
pub fn encode(value: &Value) -> Result<String> {
    encode_with_options(value, &YamlOptions::default())
}

/// Encodes a [`Value`] tree using the given options.
///
/// The output consists of joined lines, each newline-terminated, including
/// a trailing newline after the last line.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{encode_with_options, yaml, YamlOptions};
///
/// let doc = yaml!({ "key": { "nested": true } });
/// let options = YamlOptions::new().with_indent(4);
/// assert_eq!(
///     encode_with_options(&doc, &options).unwrap(),
///     "key:\n    nested: true\n"
/// );
/// ```
pub fn encode_with_options(value: &Value, options: &YamlOptions) -> Result<String> {
    match value {
        Value::Sequence(_) | Value::Mapping(_) => {
            let mut out = String::new();
            encode_node(&mut out, value, 0, 0, options)?;
            Ok(out)
        }
        other => Err(Error::unencodable(kind_name(other))),
    }
}

/// Serializer ingesting host values into the [`Value`] model.
///
/// This is the boundary where serde's data model is fixed into the closed
/// variant set: `None` becomes [`Value::Absent`] (so optional mapping
/// entries vanish from output while sequence positions survive), units
/// become `Null`, and everything compound collects into sequences and
/// mappings.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: YamlMap,
    current_key: Option<String>,
}

fn to_value_inner<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(Number::Integer(v as i64)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Number(Number::Integer(v as i64)))
        } else {
            Ok(Value::Number(Number::Float(v as f64)))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::from(v as f64)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::from(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v
            .iter()
            .map(|&b| Value::Number(Number::Integer(b as i64)))
            .collect();
        Ok(Value::Sequence(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Absent)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = YamlMap::new();
        map.insert(variant.to_string(), to_value_inner(value)?);
        Ok(Value::Mapping(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::custom("tuple variants are not supported"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: YamlMap::new(),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Err(Error::custom("struct variants are not supported"))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value_inner(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::custom(format!(
                "mapping keys must be strings, found {:?}",
                other
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value_inner(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml;

    #[test]
    fn test_needs_quoting_table() {
        assert!(needs_quoting(""));
        assert!(needs_quoting(" x"));
        assert!(needs_quoting("x "));
        assert!(needs_quoting("a:b"));
        assert!(needs_quoting("\"quoted\""));
        assert!(needs_quoting("#comment"));
        assert!(needs_quoting("[bracket"));
        assert!(needs_quoting("héllo"));
        assert!(needs_quoting("tab\there"));
        assert!(needs_quoting("line\nbreak"));
        assert!(!needs_quoting("three"));
        assert!(!needs_quoting("two three"));
        assert!(!needs_quoting("mid#hash"));
        assert!(!needs_quoting("dash-word"));
    }

    #[test]
    fn test_needs_quoting_lookalikes() {
        // Bare renditions of these would re-read as typed scalars.
        assert!(needs_quoting("true"));
        assert!(needs_quoting("False"));
        assert!(needs_quoting("null"));
        assert!(needs_quoting("undefined"));
        assert!(needs_quoting("123"));
        assert!(needs_quoting("-1.5"));
        assert!(needs_quoting("0x1A"));
        assert!(needs_quoting(".inf"));
        assert!(needs_quoting("a # b"));
        assert!(needs_quoting("-"));
        assert!(needs_quoting("- x"));
        assert!(!needs_quoting("-x"));
        assert!(!needs_quoting("Inflation"));
        assert!(!needs_quoting("1.2.3"));
    }

    #[test]
    fn test_dash_key_stays_a_mapping() {
        let mut map = YamlMap::new();
        map.insert("- x".to_string(), Value::from(1i64));
        let doc = Value::Mapping(map);

        let text = encode(&doc).unwrap();
        assert_eq!(text, "\"- x\": 1\n");
        assert_eq!(crate::decode(&text).unwrap(), doc);
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("a\nb"), "\"a\\nb\"");
        assert_eq!(quote("\u{1}"), "\"\\u0001\"");
        assert_eq!(quote("é"), "\"\\u00e9\"");
        assert_eq!(quote("😀"), "\"\\ud83d\\ude00\"");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(&Number::Integer(42)), "42");
        assert_eq!(format_number(&Number::Integer(-1)), "-1");
        assert_eq!(format_number(&Number::Float(0.5)), "0.5");
        assert_eq!(format_number(&Number::Float(3.0)), "3.0");
        assert_eq!(format_number(&Number::Infinity), ".Inf");
        assert_eq!(format_number(&Number::NegativeInfinity), "-.Inf");
        assert_eq!(format_number(&Number::NaN), ".NaN");
    }

    #[test]
    fn test_encode_simple_mapping() {
        let doc = yaml!({ "d3": 3, "d4": [4] });
        assert_eq!(encode(&doc).unwrap(), "d3: 3\nd4:\n  - 4\n");
    }

    #[test]
    fn test_encode_rejects_scalar_root() {
        assert!(matches!(
            encode(&Value::Null),
            Err(Error::UnencodableValue(_))
        ));
        assert!(matches!(
            encode(&Value::from("text")),
            Err(Error::UnencodableValue(_))
        ));
    }

    #[test]
    fn test_absent_asymmetry() {
        let mut map = YamlMap::new();
        map.insert("a".to_string(), Value::from(1i64));
        map.insert("b".to_string(), Value::Absent);
        map.insert("c".to_string(), Value::from(3i64));
        assert_eq!(encode(&Value::Mapping(map)).unwrap(), "a: 1\nc: 3\n");

        let seq = Value::Sequence(vec![Value::from(1i64), Value::Absent, Value::from(3i64)]);
        assert_eq!(encode(&seq).unwrap(), "- 1\n- undefined\n- 3\n");
    }

    #[test]
    fn test_depth_limit() {
        let mut value = Value::Sequence(vec![Value::from(1i64)]);
        for _ in 0..1100 {
            value = Value::Sequence(vec![value]);
        }
        assert_eq!(encode(&value).unwrap_err(), Error::DepthLimitExceeded);
    }
}
