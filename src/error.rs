//! Error types for YAML-subset encoding and decoding.
//!
//! All decode-time errors carry the 1-based line number of the offending
//! input line. Decode and encode either fully succeed or fail atomically;
//! nothing is silently recovered.
//!
//! ## Error Categories
//!
//! - **Structural decode errors**: missing name delimiters, indentation
//!   changes mid-section, arrays mixed into hashes, trailing input
//! - **Scalar errors**: malformed quoted strings
//! - **Encode errors**: non-compound roots and the recursion-depth guard
//! - **I/O errors**: reader/writer failures in the convenience wrappers
//!
//! ## Examples
//!
//! ```rust
//! use serde_yamlite::{decode, Error};
//!
//! let result = decode("a: 1\n    b: 2\n");
//! match result {
//!     Err(Error::IndentationChange { line }) => assert_eq!(line, 2),
//!     other => panic!("expected indentation error, got {:?}", other),
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during encoding or decoding.
///
/// Decode variants include the 1-based line number where the problem was
/// detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A mapping-section line has no `: ` or trailing `:` separating the
    /// name from the value.
    #[error("line {line}: missing property name")]
    MissingName { line: usize },

    /// Indentation increased mid-section after siblings were already
    /// established.
    #[error("line {line}: unexpected change in indentation")]
    IndentationChange { line: usize },

    /// A sequence entry appeared inside an established mapping section.
    #[error("line {line}: unexpected array element in hash")]
    MixedKinds { line: usize },

    /// A quoted scalar failed structural decoding.
    #[error("line {line}: invalid quoted string")]
    InvalidQuotedString { line: usize },

    /// The top-level decode left unconsumed lines behind.
    #[error("line {line}: unexpected trailing lines")]
    TrailingInput { line: usize },

    /// Encode was asked to serialize a non-compound root or an unsupported
    /// leaf type.
    #[error("cannot encode simple value: {0}")]
    UnencodableValue(String),

    /// Encode recursion exceeded the cyclic-structure guard.
    #[error("depth limit exceeded")]
    DepthLimitExceeded,

    /// IO error during reading or writing.
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error raised through the serde error traits.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a missing-name error for the given 1-based line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yamlite::Error;
    ///
    /// let err = Error::missing_name(3);
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn missing_name(line: usize) -> Self {
        Error::MissingName { line }
    }

    /// Creates an indentation-change error for the given 1-based line.
    pub fn indentation_change(line: usize) -> Self {
        Error::IndentationChange { line }
    }

    /// Creates a mixed-kinds error for the given 1-based line.
    pub fn mixed_kinds(line: usize) -> Self {
        Error::MixedKinds { line }
    }

    /// Creates an invalid-quoted-string error for the given 1-based line.
    pub fn invalid_quoted_string(line: usize) -> Self {
        Error::InvalidQuotedString { line }
    }

    /// Creates a trailing-input error for the given 1-based line.
    pub fn trailing_input(line: usize) -> Self {
        Error::TrailingInput { line }
    }

    /// Creates an unencodable-value error describing the offending value.
    pub fn unencodable(what: &str) -> Self {
        Error::UnencodableValue(what.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_yamlite::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns the 1-based input line this error points at, if it is a
    /// decode-time error.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::MissingName { line }
            | Error::IndentationChange { line }
            | Error::MixedKinds { line }
            | Error::InvalidQuotedString { line }
            | Error::TrailingInput { line } => Some(*line),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
