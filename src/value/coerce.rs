//! JavaScript-style conversions between value variants
//!
//! These follow the coercion rules of JavaScript rather than strict JSON
//! semantics: [`to_boolean`](JsonValue::to_boolean) behaves like `!!value`,
//! [`to_integer`](JsonValue::to_integer) and [`to_real`](JsonValue::to_real)
//! like `1 * value`, and [`to_text`](JsonValue::to_text) like `"" + value`.

use crate::code_unit::CodeUnit;
use crate::value::JsonValue;

/// Largest magnitude at which every integral `f64` is an exact `i64`
///
/// `i64::MAX` itself rounds to 2⁶³ when converted to `f64`, so the safe
/// bound is ±2⁵³ as in JavaScript.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whether truncating `value` toward zero yields an exactly representable `i64`
pub(crate) fn fits_int64_range(value: f64) -> bool {
    value.is_finite() && (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).contains(&value)
}

/// Whether `value` converts to an `i64` without any loss
pub(crate) fn fits_int64_exact(value: f64) -> bool {
    fits_int64_range(value) && value.fract() == 0.0
}

impl<K: CodeUnit> JsonValue<K> {
    /// The value converted to a boolean
    ///
    /// `Boolean` converts to itself, `Text` to whether it is non-empty,
    /// numbers to whether they are non-zero, containers to `true`, and
    /// `Null` and `Undefined` to `false`.
    pub fn to_boolean(&self) -> bool {
        match self {
            JsonValue::Boolean(b) => *b,
            JsonValue::Text(t) => !t.is_empty(),
            JsonValue::Integer(i) => *i != 0,
            JsonValue::Real(r) => *r != 0.0,
            JsonValue::Object(_) | JsonValue::Array(_) => true,
            JsonValue::Undefined | JsonValue::Null => false,
        }
    }

    /// The value converted to an integer, or `None` when no sensible integer
    /// exists
    ///
    /// - `Boolean` converts to 0 or 1, `Integer` to itself.
    /// - `Real` truncates toward zero when finite and within ±2⁵³.
    /// - `Text` is parsed after trimming trailing whitespace; text which
    ///   continues with `.`, `e` or `E` after the integer part is parsed as a
    ///   double and follows the `Real` rule.
    /// - An empty `Array` converts to 0, a single-item array converts its
    ///   item.
    ///
    /// # Examples
    /// ```
    /// # use chunkson::value::JsonValue;
    /// assert_eq!(Some(1), JsonValue::<u8>::from(true).to_integer());
    /// assert_eq!(Some(-2), JsonValue::<u8>::from(-2.5).to_integer());
    /// assert_eq!(Some(12), JsonValue::<u8>::from("12.75").to_integer());
    /// assert_eq!(None, JsonValue::<u8>::from("12abc").to_integer());
    /// ```
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            JsonValue::Boolean(b) => Some(i64::from(*b)),
            JsonValue::Integer(i) => Some(*i),
            JsonValue::Real(r) if fits_int64_range(*r) => Some(*r as i64),
            JsonValue::Text(t) => text_to_integer(&K::text_to_string(t)),
            JsonValue::Array(items) => match items.len() {
                0 => Some(0),
                1 => items[0].to_integer(),
                _ => None,
            },
            _ => None,
        }
    }

    /// The value converted to a double; NaN when no sensible number exists
    ///
    /// `Boolean` converts to 0.0 or 1.0, numbers widen, `Text` is parsed as a
    /// double.
    pub fn to_real(&self) -> f64 {
        match self {
            JsonValue::Boolean(b) => f64::from(*b),
            JsonValue::Integer(i) => *i as f64,
            JsonValue::Real(r) => *r,
            JsonValue::Text(t) => K::text_to_string(t).trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    /// The value converted to text
    ///
    /// `Undefined` renders as `undefined`, `Null` as `null`, booleans as
    /// `true`/`false`, numbers in their shortest decimal form, an `Object` as
    /// the literal `[object Object]` and an `Array` as its items' `to_text`
    /// joined by commas.
    ///
    /// # Examples
    /// ```
    /// # use chunkson::value::JsonValue;
    /// let value = JsonValue::<u8>::array_from([
    ///     JsonValue::from(1),
    ///     JsonValue::from("a"),
    ///     JsonValue::Null,
    /// ]);
    /// assert_eq!(&b"1,a,null"[..], &value.to_text()[..]);
    /// ```
    pub fn to_text(&self) -> Vec<K> {
        match self {
            JsonValue::Undefined => K::text_from_str("undefined"),
            JsonValue::Null => K::text_from_str("null"),
            JsonValue::Boolean(b) => K::text_from_str(if *b { "true" } else { "false" }),
            JsonValue::Integer(i) => K::text_from_str(&i.to_string()),
            JsonValue::Real(r) => K::text_from_str(&r.to_string()),
            JsonValue::Text(t) => t.clone(),
            JsonValue::Object(_) => K::text_from_str("[object Object]"),
            JsonValue::Array(items) => {
                let mut out = Vec::new();
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push(K::from_ascii(b','));
                    }
                    out.extend_from_slice(&item.to_text());
                }
                out
            }
        }
    }
}

fn text_to_integer(text: &str) -> Option<i64> {
    let text = text.trim_end();
    let bytes = text.as_bytes();

    let mut digits_end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        digits_end = 1;
    }
    let digits_start = digits_end;
    while digits_end < bytes.len() && bytes[digits_end].is_ascii_digit() {
        digits_end += 1;
    }
    if digits_end == digits_start {
        // No integer part at all
        return None;
    }

    if digits_end == bytes.len() {
        return text.parse().ok();
    }
    if matches!(bytes[digits_end], b'.' | b'e' | b'E') {
        if let Ok(real) = text.parse::<f64>() {
            if fits_int64_range(real) {
                return Some(real as i64);
            }
        }
    }
    None
}
