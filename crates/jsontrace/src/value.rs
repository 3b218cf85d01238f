//! Decoded JSON values.
//!
//! This module defines the [`Value`] tree produced by the parser. Numbers keep
//! the exact lexeme found in the input; any numeric interpretation is derived
//! from that text on request.
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use crate::trace::SpanKind;

/// Object members. Inserting an existing key replaces the previous value.
pub type Map = BTreeMap<String, Value>;
/// Array elements in input order.
pub type Array = Vec<Value>;

/// A decoded JSON value.
///
/// # Examples
///
/// ```
/// use jsontrace::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::from("value"));
/// let v = Value::Object(map);
/// assert_eq!(v.get("key").and_then(Value::as_str), Some("value"));
/// ```
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Map),
}

/// A JSON number, stored as the raw lexeme that was scanned.
///
/// The scanner accepts any run of `0-9 . - + e E`, so the lexeme is not
/// guaranteed to be a well-formed number. [`Number::as_f64`] reports `None`
/// for lexemes that do not parse.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(transparent))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Number {
    raw: String,
}

impl Number {
    /// Wraps a lexeme without validating it.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The lexeme exactly as it appeared in the input.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consumes the number, returning its lexeme.
    #[must_use]
    pub fn into_raw(self) -> String {
        self.raw
    }

    /// Lexical hint: no fraction and no exponent.
    ///
    /// ```
    /// use jsontrace::Number;
    ///
    /// assert!(Number::from_raw("-12").is_integer());
    /// assert!(!Number::from_raw("1e3").is_integer());
    /// ```
    #[must_use]
    pub fn is_integer(&self) -> bool {
        !self.raw.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
    }

    /// Interprets the lexeme as a floating point value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.raw.parse().ok()
    }

    /// Interprets an integer lexeme as `i64`.
    ///
    /// Returns `None` for lexemes with a fraction or exponent and for values
    /// out of range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.raw.parse().ok()
        } else {
            None
        }
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Number").field(&self.raw).finish()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` when the value is an object.
    ///
    /// ```
    /// let doc = jsontrace::parse(r#"{"a": null}"#).unwrap();
    /// assert!(doc.value().get("a").is_some_and(|v| v.is_null()));
    /// assert!(doc.value().get("b").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|m| m.get(key))
    }

    /// The span kind the parser records for this value.
    #[must_use]
    pub fn kind(&self) -> SpanKind {
        match self {
            Self::Null => SpanKind::Null,
            Self::Boolean(true) => SpanKind::True,
            Self::Boolean(false) => SpanKind::False,
            Self::Number(_) => SpanKind::Number,
            Self::String(_) => SpanKind::String,
            Self::Array(_) => SpanKind::Array,
            Self::Object(_) => SpanKind::Object,
        }
    }
}
