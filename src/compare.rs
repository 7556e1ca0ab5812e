// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Equality used by the search operations.
//!
//! Two modes exist. [`Comparison::Strict`] requires the same kind of value and
//! the same content, with arrays and objects compared by identity.
//! [`Comparison::Loose`] first applies the legacy abstract-equality coercions,
//! enumerated in [`loose_equals`].
//!
//! Under both modes `NaN` is unequal to every value, itself included. Callers
//! therefore cannot find, count or deduplicate `NaN` with these functions.

use core::str::FromStr;

use serde::Deserialize;

use crate::number::Number;
use crate::value::Value;
use crate::Rc;

/// How a needle is matched against scalar leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Same kind and same value, no coercion.
    #[default]
    Strict,
    /// Equality after legacy type coercion.
    Loose,
}

impl Comparison {
    pub fn matches(self, a: &Value, b: &Value) -> bool {
        match self {
            Comparison::Strict => strict_equals(a, b),
            Comparison::Loose => loose_equals(a, b),
        }
    }
}

/// `true` selects strict comparison, so a `use_strict` flag converts directly.
impl From<bool> for Comparison {
    fn from(use_strict: bool) -> Self {
        if use_strict {
            Comparison::Strict
        } else {
            Comparison::Loose
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison mode `{0}`, expected `strict` or `loose`")]
pub struct ParseComparisonError(pub String);

impl FromStr for Comparison {
    type Err = ParseComparisonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Comparison::Strict),
            "loose" => Ok(Comparison::Loose),
            _ => Err(ParseComparisonError(s.to_string())),
        }
    }
}

/// Strict equality.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
        (Value::Object(x), Value::Object(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// Loose equality. Rules are tried in order:
///
/// | operands                           | result                                  |
/// |------------------------------------|-----------------------------------------|
/// | same kind                          | [`strict_equals`]                       |
/// | `Null` and `Undefined`             | `true`                                  |
/// | `Null`/`Undefined` and other       | `false`                                 |
/// | `Number` and `String`              | number vs [`to_number`] of the string   |
/// | `Bool` and other                   | `1`/`0` vs the other operand, again     |
/// | `Array`/`Object` and number/string | [`to_primitive`] vs the operand, again  |
/// | anything else                      | `false`                                 |
pub fn loose_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined)
        | (Value::Null, Value::Null)
        | (Value::Bool(_), Value::Bool(_))
        | (Value::Number(_), Value::Number(_))
        | (Value::String(_), Value::String(_))
        | (Value::Array(_), Value::Array(_))
        | (Value::Object(_), Value::Object(_)) => strict_equals(a, b),

        (Value::Null | Value::Undefined, Value::Null | Value::Undefined) => true,
        (Value::Null | Value::Undefined, _) | (_, Value::Null | Value::Undefined) => false,

        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => {
            *n == to_number(s)
        }

        (Value::Bool(x), other) | (other, Value::Bool(x)) => {
            loose_equals(&Value::from(u64::from(*x)), other)
        }

        (Value::Array(_) | Value::Object(_), Value::Number(_) | Value::String(_)) => {
            loose_equals(&to_primitive(a), b)
        }
        (Value::Number(_) | Value::String(_), Value::Array(_) | Value::Object(_)) => {
            loose_equals(a, &to_primitive(b))
        }

        _ => false,
    }
}

/// Reads a string operand as a number; unparsable strings become `NaN`.
pub fn to_number(s: &str) -> Number {
    Number::from_str(s).unwrap_or_else(|_| Number::nan())
}

/// Converts arrays and objects to the primitive they present to loose
/// comparison. Other values are returned unchanged.
pub fn to_primitive(v: &Value) -> Value {
    match v {
        Value::Array(_) | Value::Object(_) => Value::from(to_string(v)),
        _ => v.clone(),
    }
}

fn to_string(v: &Value) -> String {
    match v {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.format_decimal(),
        Value::String(s) => s.to_string(),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Array(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items.iter() {
                match item {
                    // Absent elements join as empty strings.
                    Value::Null | Value::Undefined => parts.push(String::new()),
                    _ => parts.push(to_string(item)),
                }
            }
            parts.join(",")
        }
    }
}
