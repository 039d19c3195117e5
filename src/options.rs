//! Configuration options for encoding.
//!
//! [`YamlOptions`] controls how [`crate::encode_with_options`] renders a
//! value tree. Only the encoder reads it: decoding is width-agnostic and
//! measures whatever indentation siblings actually use, section by section.
//!
//! ## Examples
//!
//! ```rust
//! use serde_yamlite::{encode_with_options, yaml, YamlOptions};
//!
//! let doc = yaml!({ "servers": ["alpha", "beta"] });
//!
//! let options = YamlOptions::new().with_indent(4);
//! let text = encode_with_options(&doc, &options).unwrap();
//! assert_eq!(text, "servers:\n    - alpha\n    - beta\n");
//! ```

/// Configuration options for encoding.
///
/// Immutable per coder instance; the encoder only reads it.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::YamlOptions;
///
/// let options = YamlOptions::new();
/// assert_eq!(options.indent, 2);
///
/// let options = YamlOptions::new().with_indent(4);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct YamlOptions {
    /// Number of spaces per nesting level. Must be at least 1.
    pub indent: usize,
}

impl Default for YamlOptions {
    fn default() -> Self {
        YamlOptions { indent: 2 }
    }
}

impl YamlOptions {
    /// Creates default options (2-space indentation).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width (number of spaces per level).
    ///
    /// Values below 1 are clamped to 1; a zero-width indent would make
    /// nested sections indistinguishable from their parents.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_indent() {
        assert_eq!(YamlOptions::default().indent, 2);
    }

    #[test]
    fn test_zero_indent_clamped() {
        assert_eq!(YamlOptions::new().with_indent(0).indent, 1);
    }
}
