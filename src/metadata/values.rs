//! Constant values and typed values.
//!
//! These are the payloads of literal fields, optional parameter defaults and custom attribute
//! arguments. A [`Value`] on its own only knows its runtime shape; a [`TypedValue`] pairs it with
//! the type it was declared as, which is what decides between `null` and `default` or between a
//! raw number and an enum member name.

use std::fmt;

use crate::metadata::types::TypeRef;

/// A `System.Decimal` constant, stored as an unscaled integer and a decimal scale
///
/// `mantissa = 125, scale = 1` represents `12.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DecimalValue {
    /// The unscaled value (sign included)
    pub mantissa: i128,
    /// Number of digits after the decimal point (0..=28)
    pub scale: u8,
}

impl DecimalValue {
    /// Create a new decimal from its unscaled value and scale
    #[must_use]
    pub fn new(mantissa: i128, scale: u8) -> Self {
        DecimalValue { mantissa, scale }
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.unsigned_abs().to_string();
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let scale = usize::from(self.scale);
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }

        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (integral, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{integral}.{fraction}")
    }
}

/// A constant value as found in metadata
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null reference (or a zero-initialized value type)
    Null,
    /// `System.Boolean`
    Boolean(bool),
    /// `System.Char`, a single UTF-16 code unit
    Char(u16),
    /// `System.SByte`
    I1(i8),
    /// `System.Byte`
    U1(u8),
    /// `System.Int16`
    I2(i16),
    /// `System.UInt16`
    U2(u16),
    /// `System.Int32`
    I4(i32),
    /// `System.UInt32`
    U4(u32),
    /// `System.Int64`
    I8(i64),
    /// `System.UInt64`
    U8(u64),
    /// `System.Single`
    R4(f32),
    /// `System.Double`
    R8(f64),
    /// `System.Decimal`
    Decimal(DecimalValue),
    /// `System.String`
    String(String),
    /// A `System.Type` instance
    Type(TypeRef),
    /// A single-dimensional array of constants
    Array(Vec<Value>),
}

impl Value {
    /// Create a `System.Char` value from a Rust `char` in the basic multilingual plane
    ///
    /// Characters outside the BMP do not fit a single UTF-16 unit; their high surrogate is kept.
    #[must_use]
    pub fn char(c: char) -> Self {
        let mut buffer = [0u16; 2];
        Value::Char(c.encode_utf16(&mut buffer)[0])
    }

    /// Create a `System.String` value
    #[must_use]
    pub fn string(text: &str) -> Self {
        Value::String(text.to_string())
    }

    /// Check if this value is one of the integral shapes (the shapes an enum value can take)
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::Boolean(_)
                | Value::Char(_)
                | Value::I1(_)
                | Value::U1(_)
                | Value::I2(_)
                | Value::U2(_)
                | Value::I4(_)
                | Value::U4(_)
                | Value::I8(_)
                | Value::U8(_)
        )
    }

    /// The bit pattern of an integral value, sign-extended to 64 bits
    ///
    /// Two values of the same shape compare equal exactly when their bit patterns do, which is
    /// what flag decomposition relies on.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn to_bits(&self) -> Option<u64> {
        match self {
            Value::Boolean(value) => Some(u64::from(*value)),
            Value::Char(value) => Some(u64::from(*value)),
            Value::I1(value) => Some(i64::from(*value) as u64),
            Value::U1(value) => Some(u64::from(*value)),
            Value::I2(value) => Some(i64::from(*value) as u64),
            Value::U2(value) => Some(u64::from(*value)),
            Value::I4(value) => Some(i64::from(*value) as u64),
            Value::U4(value) => Some(u64::from(*value)),
            Value::I8(value) => Some(*value as u64),
            Value::U8(value) => Some(*value),
            _ => None,
        }
    }

    /// A value of the same integral shape as `self`, holding `bits` truncated to that width
    ///
    /// Returns `None` for non-integral shapes.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn with_bits(&self, bits: u64) -> Option<Value> {
        match self {
            Value::Boolean(_) => Some(Value::Boolean(bits != 0)),
            Value::Char(_) => Some(Value::Char(bits as u16)),
            Value::I1(_) => Some(Value::I1(bits as i8)),
            Value::U1(_) => Some(Value::U1(bits as u8)),
            Value::I2(_) => Some(Value::I2(bits as i16)),
            Value::U2(_) => Some(Value::U2(bits as u16)),
            Value::I4(_) => Some(Value::I4(bits as i32)),
            Value::U4(_) => Some(Value::U4(bits as u32)),
            Value::I8(_) => Some(Value::I8(bits as i64)),
            Value::U8(_) => Some(Value::U8(bits)),
            _ => None,
        }
    }

    /// The name of this value's shape, for diagnostics
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "bool",
            Value::Char(_) => "char",
            Value::I1(_) => "sbyte",
            Value::U1(_) => "byte",
            Value::I2(_) => "short",
            Value::U2(_) => "ushort",
            Value::I4(_) => "int",
            Value::U4(_) => "uint",
            Value::I8(_) => "long",
            Value::U8(_) => "ulong",
            Value::R4(_) => "float",
            Value::R8(_) => "double",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Type(_) => "type",
            Value::Array(_) => "array",
        }
    }
}

/// A constant together with the type it was declared as
///
/// Equality is structural: same declared type (by identity) and equal values.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    /// The declared type of the value
    pub value_type: TypeRef,
    /// The value itself
    pub value: Value,
}

impl TypedValue {
    /// Pair a value with its declared type
    #[must_use]
    pub fn new(value_type: TypeRef, value: Value) -> Self {
        TypedValue { value_type, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_display() {
        assert_eq!(DecimalValue::new(125, 1).to_string(), "12.5");
        assert_eq!(DecimalValue::new(-125, 1).to_string(), "-12.5");
        assert_eq!(DecimalValue::new(5, 3).to_string(), "0.005");
        assert_eq!(DecimalValue::new(-5, 2).to_string(), "-0.05");
        assert_eq!(DecimalValue::new(42, 0).to_string(), "42");
    }

    #[test]
    fn bits_are_sign_extended() {
        assert_eq!(Value::I4(-1).to_bits(), Some(u64::MAX));
        assert_eq!(Value::U4(u32::MAX).to_bits(), Some(0xFFFF_FFFF));
        assert_eq!(Value::I1(3).to_bits(), Some(3));
        assert_eq!(Value::string("x").to_bits(), None);
    }

    #[test]
    fn with_bits_keeps_shape() {
        assert_eq!(Value::I4(0).with_bits(u64::MAX), Some(Value::I4(-1)));
        assert_eq!(Value::U1(0).with_bits(0x1FF), Some(Value::U1(0xFF)));
        assert_eq!(Value::R8(0.0).with_bits(1), None);
    }

    #[test]
    fn char_from_rust_char() {
        assert_eq!(Value::char('A'), Value::Char(0x41));
        assert_eq!(Value::char('\u{1F600}'), Value::Char(0xD83D));
    }
}
