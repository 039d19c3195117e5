//! Decoding: the indentation-driven recursive section parser.
//!
//! ## Overview
//!
//! The decoder works on whole lines. A *section* is one contiguous run of
//! sibling lines sharing a single indentation baseline, decoded as one
//! mapping or one sequence. Nested blocks are decoded by recursing into
//! [`decode_section`] with a deeper indentation requirement; the recursion
//! carries an explicit [`Cursor`] so one decode call owns all of its state
//! and concurrent decodes never interfere.
//!
//! - **Single-pass**: every line is looked at once; a line that ends a
//!   section is left un-consumed for the enclosing section
//! - **Width-agnostic**: each section measures whatever indentation its own
//!   siblings use; tabs count as one unit apiece, no expansion
//! - **Line-numbered errors**: every failure names the 1-based input line
//!
//! ## Usage
//!
//! Most users should use [`crate::decode`] for value trees or
//! [`crate::from_str`] for typed data:
//!
//! ```rust
//! use serde_yamlite::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str("x: 1\ny: 2\n").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::{scalar, Error, Number, Result, Value, YamlMap};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// The decoder's working state: the remaining input lines plus a running
/// 1-based line counter used only for diagnostics. Owned exclusively by one
/// decode invocation.
struct Cursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        Cursor { lines, pos: 0 }
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// 1-based number of the line [`Cursor::peek`] would return.
    fn line_number(&self) -> usize {
        self.pos + 1
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Looks past blanks, comments, and document markers without consuming
    /// anything.
    fn peek_substantive(&self) -> Option<&'a str> {
        self.lines[self.pos..]
            .iter()
            .copied()
            .find(|line| !is_skippable(line))
    }
}

/// Measures leading whitespace width. Tab characters count as a single
/// indentation unit each; no expansion, no normalization.
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| matches!(c, ' ' | '\t')).count()
}

/// Strips a trailing comment from a line's content, respecting quoted
/// substrings. A `#` opens a comment only outside double quotes and only at
/// the start of the content or after a space or tab, so barewords like
/// `a#b` survive. Trailing whitespace goes with the comment.
fn strip_comment(content: &str) -> &str {
    let mut in_quote = false;
    let mut escaped = false;
    let mut prev: Option<char> = None;
    for (i, c) in content.char_indices() {
        if escaped {
            escaped = false;
            prev = Some(c);
            continue;
        }
        match c {
            '\\' if in_quote => escaped = true,
            '"' => in_quote = !in_quote,
            '#' if !in_quote && (i == 0 || matches!(prev, Some(' ') | Some('\t'))) => {
                return content[..i].trim_end();
            }
            _ => {}
        }
        prev = Some(c);
    }
    content.trim_end()
}

/// Lines that advance the cursor without affecting any section baseline:
/// blanks, pure comments, and the `---`/`...` document markers.
fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---" || trimmed == "..."
}

/// A sequence entry starts with `-` followed by a space or end-of-line.
fn is_sequence_entry(content: &str) -> bool {
    content == "-" || content.starts_with("- ")
}

/// Decodes a JSON-style double-quoted token. The token must be consumed
/// exactly: anything after the closing quote is an error.
fn decode_quoted(token: &str, line: usize) -> Result<String> {
    let err = || Error::invalid_quoted_string(line);
    let mut chars = token.chars();
    if chars.next() != Some('"') {
        return Err(err());
    }
    let mut out = String::new();
    loop {
        let c = chars.next().ok_or_else(err)?;
        match c {
            '"' => break,
            '\\' => {
                let escape = chars.next().ok_or_else(err)?;
                match escape {
                    '"' => out.push('"'),
                    '\\' => out.push('\\'),
                    '/' => out.push('/'),
                    'b' => out.push('\u{0008}'),
                    'f' => out.push('\u{000C}'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'u' => {
                        let unit = read_hex4(&mut chars).ok_or_else(err)?;
                        if (0xD800..0xDC00).contains(&unit) {
                            // High surrogate: a low surrogate escape must follow.
                            if chars.next() != Some('\\') || chars.next() != Some('u') {
                                return Err(err());
                            }
                            let low = read_hex4(&mut chars).ok_or_else(err)?;
                            if !(0xDC00..0xE000).contains(&low) {
                                return Err(err());
                            }
                            let cp = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                            out.push(char::from_u32(cp).ok_or_else(err)?);
                        } else {
                            out.push(char::from_u32(unit).ok_or_else(err)?);
                        }
                    }
                    _ => return Err(err()),
                }
            }
            _ => out.push(c),
        }
    }
    if chars.next().is_some() {
        return Err(err());
    }
    Ok(out)
}

fn read_hex4(chars: &mut std::str::Chars) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

/// Resolves a non-empty value token: quoted tokens decode JSON-style,
/// everything else goes through scalar coercion.
fn resolve_scalar(token: &str, line: usize) -> Result<Value> {
    if token.starts_with('"') {
        decode_quoted(token, line).map(Value::String)
    } else {
        Ok(scalar::coerce(token))
    }
}

#[derive(PartialEq)]
enum SectionKind {
    Sequence,
    Mapping,
}

/// Decodes one section: sibling lines sharing one indentation baseline.
///
/// The baseline comes from the first substantive line at or beyond
/// `min_indent`. A shallower line ends the section and stays un-consumed;
/// a deeper one after the first element is a fatal indentation change.
fn decode_section(cursor: &mut Cursor, min_indent: usize) -> Result<Value> {
    let mut baseline: Option<usize> = None;
    let mut kind: Option<SectionKind> = None;
    let mut sequence: Vec<Value> = Vec::new();
    let mut mapping = YamlMap::new();

    loop {
        let Some(raw) = cursor.peek() else { break };
        let line = cursor.line_number();
        if is_skippable(raw) {
            cursor.advance();
            continue;
        }

        let width = indent_width(raw);
        let base = match baseline {
            None => {
                if width < min_indent {
                    // The whole section is empty; the line belongs to an
                    // enclosing section.
                    break;
                }
                baseline = Some(width);
                width
            }
            Some(base) if width < base => break,
            Some(base) if width > base => return Err(Error::indentation_change(line)),
            Some(base) => base,
        };

        let content = strip_comment(&raw[width..]);
        if is_sequence_entry(content) {
            if kind == Some(SectionKind::Mapping) {
                return Err(Error::mixed_kinds(line));
            }
            kind = Some(SectionKind::Sequence);
            cursor.advance();
            let rest = &content[1..];
            let token = rest.strip_prefix(' ').unwrap_or(rest).trim();
            let value = if token.is_empty() {
                decode_section(cursor, base + 1)?
            } else {
                resolve_scalar(token, line)?
            };
            sequence.push(value);
        } else {
            if kind == Some(SectionKind::Sequence) {
                // A mapping entry at the same width terminates a
                // hang-indented sequence; the line stays for the caller.
                break;
            }
            kind = Some(SectionKind::Mapping);
            cursor.advance();

            let (name_part, remainder) =
                split_entry(content).ok_or_else(|| Error::missing_name(line))?;
            let name_part = name_part.trim();
            let key = if name_part.starts_with('"') {
                decode_quoted(name_part, line)?
            } else {
                name_part.to_string()
            };

            let token = remainder.trim();
            let value = if !token.is_empty() {
                resolve_scalar(token, line)?
            } else {
                match cursor.peek_substantive() {
                    Some(next) => {
                        let next_width = indent_width(next);
                        if next_width <= base
                            && is_sequence_entry(strip_comment(&next[next_width..]))
                        {
                            // Hang-indented nested sequence: its entries
                            // share the parent key's indentation.
                            decode_section(cursor, next_width)?
                        } else {
                            decode_section(cursor, base + 1)?
                        }
                    }
                    None => Value::Mapping(YamlMap::new()),
                }
            };
            mapping.insert(key, value);
        }
    }

    match kind {
        Some(SectionKind::Sequence) => Ok(Value::Sequence(sequence)),
        _ => Ok(Value::Mapping(mapping)),
    }
}

/// Locates the name/value delimiter in a mapping-entry line: the first
/// unquoted `: ` or a trailing bare `:`.
fn split_entry(content: &str) -> Option<(&str, &str)> {
    let mut in_quote = false;
    let mut escaped = false;
    let mut iter = content.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quote => escaped = true,
            '"' => in_quote = !in_quote,
            ':' if !in_quote => match iter.peek() {
                Some((_, ' ')) => return Some((&content[..i], &content[i + 2..])),
                None => return Some((&content[..i], "")),
                _ => {}
            },
            _ => {}
        }
    }
    None
}

/// Decodes a whole document into a [`Value`] tree.
///
/// The input is split into lines and consumed in a single pass. A document
/// containing no substantive lines decodes to an empty mapping. Lines left
/// over once the top-level section ends are a fatal error.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{decode, Value};
///
/// let doc = decode("a: 1\nb:\n  c: 2\n").unwrap();
/// assert_eq!(doc.get("a").and_then(|v| v.as_i64()), Some(1));
/// assert_eq!(
///     doc.get("b").and_then(|v| v.get("c")).and_then(|v| v.as_i64()),
///     Some(2)
/// );
/// ```
///
/// # Errors
///
/// Returns an error on malformed input; every error carries the 1-based
/// line number of the offending line.
pub fn decode(input: &str) -> Result<Value> {
    let lines: Vec<&str> = input.lines().collect();
    let mut cursor = Cursor::new(&lines);
    let value = decode_section(&mut cursor, 0)?;
    while let Some(raw) = cursor.peek() {
        if !is_skippable(raw) {
            return Err(Error::trailing_input(cursor.line_number()));
        }
        cursor.advance();
    }
    Ok(value)
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

/// Deserializing from a decoded [`Value`] tree. This is what backs
/// [`crate::from_str`] and [`crate::from_value`]: the document is decoded
/// into the value model first, then handed to serde from there.
impl<'de> de::Deserializer<'de> for Value {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null | Value::Absent => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(n) => visitor.visit_f64(n.as_f64()),
            Value::String(s) => visitor.visit_string(s),
            Value::Sequence(seq) => {
                visitor.visit_seq(de::value::SeqDeserializer::new(seq.into_iter()))
            }
            Value::Mapping(map) => {
                visitor.visit_map(de::value::MapDeserializer::new(map.into_iter()))
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::Null | Value::Absent => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            other => Err(Error::custom(format!(
                "expected enum variant name, found {:?}",
                other
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}
