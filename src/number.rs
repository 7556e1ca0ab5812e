// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use core::fmt::{Debug, Formatter};
use core::str::FromStr;

use num_bigint::BigInt as NumBigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::Rc;

pub type BigInt = NumBigInt;

const F64_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// Numeric scalar.
///
/// Integers are kept exact; equality between representations is by
/// mathematical value. `NaN` is never equal to anything, itself included.
#[derive(Clone)]
pub enum Number {
    UInt(u64),
    Int(i64),
    Float(f64),
    BigInt(Rc<BigInt>),
}

impl Number {
    pub fn nan() -> Number {
        Number::Float(f64::NAN)
    }

    fn from_bigint_owned(value: BigInt) -> Self {
        if value.is_zero() {
            return Number::UInt(0);
        }

        if value.is_negative() {
            if let Some(i) = value.to_i64() {
                return Number::Int(i);
            }
        } else if let Some(u) = value.to_u64() {
            return Number::UInt(u);
        }

        Number::BigInt(Rc::new(value))
    }

    fn from_i128(value: i128) -> Self {
        if let Ok(u) = u64::try_from(value) {
            Number::UInt(u)
        } else if let Ok(i) = i64::try_from(value) {
            Number::Int(i)
        } else {
            Number::BigInt(Rc::new(BigInt::from(value)))
        }
    }

    fn to_bigint_owned(&self) -> Option<BigInt> {
        match self {
            Number::UInt(v) => Some(BigInt::from(*v)),
            Number::Int(v) => Some(BigInt::from(*v)),
            Number::BigInt(v) => Some((**v).clone()),
            Number::Float(f) => Self::float_to_small_bigint(*f),
        }
    }

    // Only floats that hold an integer exactly (|f| <= 2^53) take the exact path.
    fn float_to_small_bigint(value: f64) -> Option<BigInt> {
        if !value.is_finite() || value.fract() != 0.0 || value.abs() > F64_SAFE_INTEGER {
            return None;
        }

        if value >= 0.0 {
            Some(BigInt::from(value as u64))
        } else {
            Some(BigInt::from(value as i64))
        }
    }

    fn to_f64_lossy(&self) -> f64 {
        match self {
            Number::UInt(v) => *v as f64,
            Number::Int(v) => *v as f64,
            Number::Float(v) => *v,
            Number::BigInt(v) => match v.to_f64() {
                Some(f) => f,
                None if v.is_negative() => f64::NEG_INFINITY,
                None => f64::INFINITY,
            },
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Number::Float(f) if f.is_nan())
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Number::Float(f) => f.is_finite() && f.fract() == 0.0,
            _ => true,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Number::UInt(v) => Some(*v),
            Number::Int(v) => u64::try_from(*v).ok(),
            Number::BigInt(v) => v.to_u64(),
            Number::Float(f) => Self::float_to_small_bigint(*f).and_then(|b| b.to_u64()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::UInt(v) => i64::try_from(*v).ok(),
            Number::Int(v) => Some(*v),
            Number::BigInt(v) => v.to_i64(),
            Number::Float(f) => Self::float_to_small_bigint(*f).and_then(|b| b.to_i64()),
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.to_f64_lossy()
    }

    /// Decimal rendering used when a number is coerced to a string:
    /// integers print without a fractional part, very large or very small
    /// magnitudes switch to exponent notation with an explicit sign.
    pub fn format_decimal(&self) -> String {
        match self {
            Number::UInt(v) => v.to_string(),
            Number::Int(v) => v.to_string(),
            Number::BigInt(v) => {
                let f = self.to_f64_lossy();
                if f.is_finite() && f.abs() < 1e21 {
                    v.to_string()
                } else {
                    format_float(f)
                }
            }
            Number::Float(f) => format_float(*f),
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }

    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }

    // `{:e}` yields e.g. `1e21` / `1.5e-7`; exponents carry an explicit sign.
    let s = format!("{f:e}");
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => s,
    }
}

impl Debug for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.format_decimal())
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Number::from_bigint_owned(value)
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Self {
        Number::UInt(value)
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Number::UInt(value as u64)
    }
}

impl From<u128> for Number {
    fn from(value: u128) -> Self {
        match u64::try_from(value) {
            Ok(n) => Number::UInt(n),
            Err(_) => Number::from_bigint_owned(BigInt::from(value)),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::from_i128(value as i128)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::from_i128(value as i128)
    }
}

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        Number::from_i128(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseNumberError;

/// Parses a numeric literal the way string operands are read by loose
/// comparison.
///
/// Accepted, after trimming surrounding whitespace:
/// - the empty string (zero),
/// - `Infinity` with an optional sign,
/// - unsigned `0x`, `0o` and `0b` integer literals,
/// - decimal literals with an optional sign, fraction and exponent.
///
/// Underscores, `inf`/`nan` spellings and trailing garbage are rejected.
impl FromStr for Number {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if trimmed.is_empty() {
            return Ok(Number::UInt(0));
        }

        match trimmed {
            "Infinity" | "+Infinity" => return Ok(Number::Float(f64::INFINITY)),
            "-Infinity" => return Ok(Number::Float(f64::NEG_INFINITY)),
            _ => (),
        }

        let radix = match trimmed.get(..2) {
            Some("0x") | Some("0X") => Some(16),
            Some("0o") | Some("0O") => Some(8),
            Some("0b") | Some("0B") => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            let digits = &trimmed[2..];
            // `parse_bytes` alone would also take signs and `_` separators.
            if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
                return Err(ParseNumberError);
            }
            return BigInt::parse_bytes(digits.as_bytes(), radix)
                .map(Number::from_bigint_owned)
                .ok_or(ParseNumberError);
        }

        if !is_decimal_literal(trimmed) {
            return Err(ParseNumberError);
        }

        let unsigned = trimmed.trim_start_matches(['+', '-']);
        if unsigned.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(mut value) = BigInt::parse_bytes(unsigned.as_bytes(), 10) {
                if trimmed.starts_with('-') {
                    if value.is_zero() {
                        return Ok(Number::Float(-0.0));
                    }
                    value = -value;
                }
                return Ok(Number::from_bigint_owned(value));
            }
        }

        trimmed
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| ParseNumberError)
    }
}

// [+-] (digits [. digits?] | . digits) ([eE] [+-] digits)?
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }

    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.to_bigint_owned(), other.to_bigint_owned()) {
            return a == b;
        }

        // NaN compares unequal here by IEEE rules.
        self.to_f64_lossy() == other.to_f64_lossy()
    }
}
