//! Scalar coercion: mapping bare tokens to typed values.
//!
//! Given a trimmed, comment-stripped token, [`coerce`] produces the typed
//! scalar it denotes: the literal table first (null/bool/undefined and the
//! `.inf`/`.nan` families), then a numeric-parse attempt, and finally the
//! token verbatim as an unquoted string ("bareword"). Quoted tokens never
//! reach this module; the decoder handles them separately.

use crate::{Number, Value};

/// Coerces a trimmed, comment-stripped token to a typed scalar value.
///
/// Never fails: anything that matches no literal and survives no numeric
/// parse comes back as a bareword string.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{coerce, Number, Value};
///
/// assert_eq!(coerce("null"), Value::Null);
/// assert_eq!(coerce("True"), Value::Bool(true));
/// assert_eq!(coerce("-1"), Value::Number(Number::Integer(-1)));
/// assert_eq!(coerce(".5"), Value::Number(Number::Float(0.5)));
/// assert_eq!(coerce("0x1A"), Value::Number(Number::Integer(26)));
/// assert_eq!(coerce("hello world"), Value::String("hello world".to_string()));
/// ```
#[must_use]
pub fn coerce(token: &str) -> Value {
    match token {
        "null" | "Null" | "NULL" => return Value::Null,
        "true" | "True" | "TRUE" => return Value::Bool(true),
        "false" | "False" | "FALSE" => return Value::Bool(false),
        "undefined" => return Value::Absent,
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => {
            return Value::Number(Number::Infinity)
        }
        "-.inf" | "-.Inf" | "-.INF" => return Value::Number(Number::NegativeInfinity),
        _ => {}
    }
    if token.eq_ignore_ascii_case(".nan") {
        return Value::Number(Number::NaN);
    }

    if let Some(number) = try_number(token) {
        return Value::Number(number);
    }

    Value::String(token.to_string())
}

/// Attempts the numeric conversion of a token.
///
/// Only tokens whose first character is a digit, `+`, `-`, `.`, or `I`
/// (covering `Infinity` written in full) are candidates. Hexadecimal `0x`
/// prefixes convert; a leading-zero sequence like `010` is decimal 10, not
/// octal. A candidate that fails to parse is not an error — the caller falls
/// through to a bareword.
fn try_number(token: &str) -> Option<Number> {
    let first = token.chars().next()?;
    if !first.is_ascii_digit() && !matches!(first, '+' | '-' | '.' | 'I') {
        return None;
    }

    match token {
        "Infinity" | "+Infinity" => return Some(Number::Infinity),
        "-Infinity" => return Some(Number::NegativeInfinity),
        _ => {}
    }

    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok().map(Number::Integer);
    }

    if let Ok(i) = token.parse::<i64>() {
        return Some(Number::Integer(i));
    }

    // The float parser in the standard library also accepts "inf" and "nan"
    // spellings, which must stay barewords here. Restricting the alphabet to
    // decimal/exponential characters before parsing rules those out.
    if !token
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    token.parse::<f64>().ok().map(Number::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_forms() {
        for token in ["null", "Null", "NULL"] {
            assert_eq!(coerce(token), Value::Null, "token {:?}", token);
        }
        // Other casings are barewords.
        assert_eq!(coerce("nUll"), Value::String("nUll".to_string()));
    }

    #[test]
    fn test_bool_forms() {
        for token in ["true", "True", "TRUE"] {
            assert_eq!(coerce(token), Value::Bool(true), "token {:?}", token);
        }
        for token in ["false", "False", "FALSE"] {
            assert_eq!(coerce(token), Value::Bool(false), "token {:?}", token);
        }
    }

    #[test]
    fn test_undefined_is_absent() {
        assert_eq!(coerce("undefined"), Value::Absent);
        assert_eq!(coerce("Undefined"), Value::String("Undefined".to_string()));
    }

    #[test]
    fn test_infinity_forms() {
        for token in [".inf", ".Inf", ".INF", "+.inf", "+.Inf", "+.INF", "Infinity", "+Infinity"] {
            assert_eq!(coerce(token), Value::Number(Number::Infinity), "token {:?}", token);
        }
        for token in ["-.inf", "-.Inf", "-.INF", "-Infinity"] {
            assert_eq!(
                coerce(token),
                Value::Number(Number::NegativeInfinity),
                "token {:?}",
                token
            );
        }
        // Lowercase "infinity" never begins a numeric attempt.
        assert_eq!(coerce("infinity"), Value::String("infinity".to_string()));
        assert_eq!(coerce("inf"), Value::String("inf".to_string()));
    }

    #[test]
    fn test_nan_forms() {
        for token in [".nan", ".NaN", ".NAN", ".Nan", ".nAn"] {
            assert_eq!(coerce(token), Value::Number(Number::NaN), "token {:?}", token);
        }
        assert_eq!(coerce("nan"), Value::String("nan".to_string()));
    }

    #[test]
    fn test_integers() {
        assert_eq!(coerce("0"), Value::Number(Number::Integer(0)));
        assert_eq!(coerce("42"), Value::Number(Number::Integer(42)));
        assert_eq!(coerce("-1"), Value::Number(Number::Integer(-1)));
        assert_eq!(coerce("+7"), Value::Number(Number::Integer(7)));
        // Leading zeros are decimal, not octal.
        assert_eq!(coerce("010"), Value::Number(Number::Integer(10)));
    }

    #[test]
    fn test_hex() {
        assert_eq!(coerce("0x1A"), Value::Number(Number::Integer(26)));
        assert_eq!(coerce("0XFF"), Value::Number(Number::Integer(255)));
        assert_eq!(coerce("0xGG"), Value::String("0xGG".to_string()));
    }

    #[test]
    fn test_floats() {
        assert_eq!(coerce(".5"), Value::Number(Number::Float(0.5)));
        assert_eq!(coerce("-0.25"), Value::Number(Number::Float(-0.25)));
        assert_eq!(coerce("1e3"), Value::Number(Number::Float(1000.0)));
        assert_eq!(coerce("2.5E-2"), Value::Number(Number::Float(0.025)));
        // Overflowing exponents saturate to the special values.
        assert_eq!(coerce("1e999"), Value::Number(Number::Infinity));
    }

    #[test]
    fn test_numeric_looking_barewords() {
        assert_eq!(coerce("1.2.3"), Value::String("1.2.3".to_string()));
        assert_eq!(coerce("-"), Value::String("-".to_string()));
        assert_eq!(coerce("+"), Value::String("+".to_string()));
        assert_eq!(coerce("."), Value::String(".".to_string()));
        assert_eq!(coerce("12abc"), Value::String("12abc".to_string()));
        assert_eq!(coerce("Inflation"), Value::String("Inflation".to_string()));
    }

    #[test]
    fn test_barewords() {
        assert_eq!(coerce("hello"), Value::String("hello".to_string()));
        assert_eq!(coerce("two words"), Value::String("two words".to_string()));
    }
}
