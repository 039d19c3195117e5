//! The [`yaml!`] construction macro.
//!
//! Builds a [`Value`](crate::Value) tree from inline literal syntax,
//! mirroring the document structure: `[...]` for sequences, `{...}` with
//! string-literal keys for mappings, and the usual scalar literals.

/// Builds a [`Value`](crate::Value) tree from an inline literal.
///
/// Mapping keys must be string literals and keep the order they are
/// written in. Any other expression is converted through
/// [`to_value`](crate::to_value); an expression that fails to serialize
/// collapses to `Null`.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::yaml;
///
/// let doc = yaml!({
///     "host": "example.com",
///     "ports": [80, 443],
///     "tls": true
/// });
///
/// assert_eq!(doc.get("host").and_then(|v| v.as_str()), Some("example.com"));
/// assert!(doc.get("ports").is_some_and(|v| v.is_sequence()));
/// ```
#[macro_export]
macro_rules! yaml {
    (null) => {
        $crate::Value::Null
    };
    (true) => {
        $crate::Value::Bool(true)
    };
    (false) => {
        $crate::Value::Bool(false)
    };
    ([ $($element:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![ $($crate::yaml!($element)),* ])
    };
    ({ $($name:literal : $entry:tt),* $(,)? }) => {
        $crate::Value::Mapping(
            [ $(($name.to_string(), $crate::yaml!($entry))),* ]
                .into_iter()
                .collect::<$crate::YamlMap>(),
        )
    };
    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
