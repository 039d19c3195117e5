//! # serde_yamlite
//!
//! A Serde-compatible codec for a restricted, indentation-delimited YAML
//! subset aimed at configuration files.
//!
//! ## What subset?
//!
//! The format is the part of YAML that configuration files actually use:
//! indented block mappings and sequences, bare and double-quoted scalars,
//! `#` comments, and the `---`/`...` document markers (recognized and
//! skipped). Deliberately out of scope: flow collections (`[...]`/`{...}`),
//! anchors and references, block scalars, line continuations, and
//! multi-document semantics.
//!
//! ```text
//! # a typical document
//! host: example.com
//! port: 8080
//! tags:
//!   - production
//!   - eu-west
//! limits:
//!   retries: 3
//!   timeout: 2.5
//! ```
//!
//! ## Key Features
//!
//! - **Width-agnostic decoding**: each nested section measures whatever
//!   indentation its own siblings use; no fixed indent is imposed on input
//! - **Line-numbered errors**: every decode failure names the offending
//!   1-based input line
//! - **Deterministic encoding**: mappings preserve insertion order, strings
//!   are quoted only when a bare rendition would not survive a round trip
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **Reentrant**: all decode/encode state is call-scoped, so one coder
//!   can be shared across threads freely
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_yamlite::{to_string, from_str};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     active: bool,
//! }
//!
//! let server = Server {
//!     host: "example.com".to_string(),
//!     port: 8080,
//!     active: true,
//! };
//!
//! let text = to_string(&server).unwrap();
//! assert_eq!(text, "host: example.com\nport: 8080\nactive: true\n");
//!
//! let back: Server = from_str(&text).unwrap();
//! assert_eq!(server, back);
//! ```
//!
//! ## Dynamic Values with the yaml! Macro
//!
//! ```rust
//! use serde_yamlite::{yaml, Value};
//!
//! let doc = yaml!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"]
//! });
//!
//! assert_eq!(doc.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```
//!
//! ## Value Trees Directly
//!
//! [`decode`] and [`encode`] work on [`Value`] trees when the structure is
//! not known at compile time:
//!
//! ```rust
//! use serde_yamlite::decode;
//!
//! let doc = decode("a: 1\nb:\n  c: 2\n").unwrap();
//! assert_eq!(doc.get("a").and_then(|v| v.as_i64()), Some(1));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Decode and encode either fully succeed or fail atomically
//! - Encode recursion is bounded (1000 levels), so pathological trees fail
//!   cleanly instead of exhausting the stack

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod scalar;
pub mod ser;
pub mod value;

pub use de::decode;
pub use error::{Error, Result};
pub use map::YamlMap;
pub use options::YamlOptions;
pub use scalar::coerce;
pub use ser::{encode, encode_with_options, needs_quoting, quote, ValueSerializer};
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a document string.
///
/// The root must serialize to a sequence or mapping; scalar roots are
/// rejected, matching the format's line-oriented structure.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, "x: 1\ny: 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (non-string map
/// keys, scalar root) or exceeds the encode depth limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &YamlOptions::default())
}

/// Serialize any `T: Serialize` to a document string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{to_string_with_options, YamlOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Config { names: Vec<String> }
///
/// let config = Config { names: vec!["a".to_string()] };
/// let options = YamlOptions::new().with_indent(4);
/// let text = to_string_with_options(&config, &options).unwrap();
/// assert_eq!(text, "names:\n    - a\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &YamlOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let tree = to_value(value)?;
    encode_with_options(&tree, options)
}

/// Convert any `T: Serialize` to a [`Value`] tree.
///
/// This is the ingestion boundary: host types are fixed into the closed
/// variant set here, before the encoder ever sees them.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_mapping());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented in the value model.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a writer.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &YamlOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &YamlOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a document string.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2\n").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed or cannot be deserialized to
/// type `T`. Decode errors include the 1-based line number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = decode(s)?;
    T::deserialize(value)
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// # Errors
///
/// Returns an error if reading fails, the input is malformed, or the data
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of document text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, the input is
/// malformed, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an already-decoded [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{from_value, yaml};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let value = yaml!({ "x": 1, "y": 2 });
/// let point: Point = from_value(value).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Server {
        host: String,
        port: u16,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let back: Point = from_str(&text).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn test_serialize_deserialize_server() {
        let server = Server {
            host: "example.com".to_string(),
            port: 8080,
            active: true,
            tags: vec!["prod".to_string(), "eu".to_string()],
        };

        let text = to_string(&server).unwrap();
        let back: Server = from_str(&text).unwrap();
        assert_eq!(server, back);
    }

    #[test]
    fn test_to_value() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();

        match value {
            Value::Mapping(map) => {
                assert_eq!(map.get("x"), Some(&Value::Number(Number::Integer(1))));
                assert_eq!(map.get("y"), Some(&Value::Number(Number::Integer(2))));
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_sequences() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        let back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, back);
    }

    #[test]
    fn test_writer_reader() {
        let point = Point { x: 3, y: 4 };
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &point).unwrap();
        let back: Point = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn test_from_slice() {
        let point: Point = from_slice(b"x: 1\ny: 2\n").unwrap();
        assert_eq!(point, Point { x: 1, y: 2 });
    }

    #[test]
    fn test_scalar_root_rejected() {
        assert!(to_string(&42i32).is_err());
        assert!(to_string(&"text").is_err());
    }

    #[test]
    fn test_custom_indent() {
        let server = Server {
            host: "h".to_string(),
            port: 1,
            active: false,
            tags: vec!["a".to_string()],
        };
        let options = YamlOptions::new().with_indent(4);
        let text = to_string_with_options(&server, &options).unwrap();
        let back: Server = from_str(&text).unwrap();
        assert_eq!(server, back);
    }
}
