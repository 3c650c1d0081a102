//! Constants and literals.
//!
//! Every value is written as the literal a C# compiler would accept for its declared type:
//! numeric suffixes, escaped strings and characters, `typeof(...)`, array creation and enum
//! member names. Values of flags enums that match no single member are decomposed into members
//! joined with `|`.

use crate::{
    language::csharp::Writer,
    metadata::{FieldRc, Member, TypeKind, TypeModifier, TypeRc, Value},
    Error, Result,
};

/// Escape UTF-16 code units for a literal delimited by `delimiter`
///
/// Printable ASCII passes through unchanged, apart from the backslash and the delimiter. Control
/// characters with a C# escape sequence use it; every other code unit is written as `\uXXXX`.
#[must_use]
pub fn escape(units: impl IntoIterator<Item = u16>, delimiter: char) -> String {
    let mut escaped = String::new();
    for unit in units {
        let simple = match unit {
            0x5C => Some("\\\\"),
            0x0A => Some("\\n"),
            0x0D => Some("\\r"),
            0x09 => Some("\\t"),
            0x07 => Some("\\a"),
            0x08 => Some("\\b"),
            0x0C => Some("\\f"),
            0x0B => Some("\\v"),
            0x1B => Some("\\e"),
            0x00 => Some("\\0"),
            _ => None,
        };

        match (simple, char::from_u32(u32::from(unit))) {
            (Some(sequence), _) => escaped.push_str(sequence),
            (None, Some(c)) if c == delimiter => {
                escaped.push('\\');
                escaped.push(c);
            }
            (None, Some(c)) if (' '..='~').contains(&c) => escaped.push(c),
            _ => escaped.push_str(&format!("\\u{unit:04X}")),
        }
    }
    escaped
}

/// Decompose `value` into flag members
///
/// Candidates are considered by descending number of set bits, then by ascending value. A
/// candidate is taken if all of its bits are set in `value` and it covers at least one bit no
/// earlier candidate covered. Returns the chosen candidates in that order, together with the bits
/// of `value` no candidate covers.
pub fn decompose_flags<T: Clone>(candidates: &[(T, u64)], value: u64) -> (Vec<T>, u64) {
    let mut ordered: Vec<&(T, u64)> = candidates
        .iter()
        .filter(|(_, bits)| *bits != 0 && bits & value == *bits)
        .collect();
    ordered.sort_by(|(_, a), (_, b)| b.count_ones().cmp(&a.count_ones()).then(a.cmp(b)));

    ordered
        .into_iter()
        .fold((Vec::new(), value), |(mut chosen, remaining), (candidate, bits)| {
            if bits & remaining == 0 {
                (chosen, remaining)
            } else {
                chosen.push(candidate.clone());
                (chosen, remaining & !bits)
            }
        })
}

/// `NaN`, `PositiveInfinity` or `NegativeInfinity` for the special floating point values
fn special_floating_name(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() && value.is_sign_positive() {
        Some("PositiveInfinity")
    } else if value.is_infinite() {
        Some("NegativeInfinity")
    } else {
        None
    }
}

/// The type a non-null value of `ty` actually has, looking through `T?` and `ref T`
fn value_type_of(mut ty: &TypeRc) -> &TypeRc {
    while let Some((TypeModifier::Nullable | TypeModifier::ByRef, element)) = ty.decoration() {
        ty = element;
    }
    ty
}

/// Bit mask covering the width of an enum's underlying type
fn underlying_mask(enumeration: &TypeRc) -> u64 {
    let TypeKind::Enum { underlying } = &enumeration.kind else {
        return u64::MAX;
    };
    match underlying.name.as_str() {
        "SByte" | "Byte" | "Boolean" => 0xFF,
        "Int16" | "UInt16" | "Char" => 0xFFFF,
        "Int32" | "UInt32" => 0xFFFF_FFFF,
        _ => u64::MAX,
    }
}

impl Writer<'_> {
    /// Write `value` as a literal of `value_type`
    pub(super) fn write_constant(
        &mut self,
        value: &Value,
        value_type: Option<&TypeRc>,
    ) -> Result<()> {
        let value_type = match value {
            Value::Null => value_type,
            _ => value_type.map(value_type_of),
        };
        if let Some(enumeration) = value_type.filter(|ty| ty.is_enum()) {
            if value.is_integer() {
                return self.write_enum_value(enumeration, value);
            }
            if !matches!(value, Value::Null) {
                return Err(Error::UnsupportedValue(format!(
                    "{} value for enum {}",
                    value.shape(),
                    enumeration.fullname()
                )));
            }
        }

        match value {
            Value::Null => {
                if value_type.is_some_and(|ty| ty.is_non_nullable_value_type()) {
                    self.text("default")
                } else {
                    self.text("null")
                }
            }
            Value::Boolean(value) => self.text(if *value { "true" } else { "false" }),
            Value::Char(unit) => {
                self.text("'")?;
                self.text(&escape([*unit], '\''))?;
                self.text("'")
            }
            Value::String(text) => {
                self.text("\"")?;
                self.text(&escape(text.encode_utf16(), '"'))?;
                self.text("\"")
            }
            Value::I1(value) => self.text(&value.to_string()),
            Value::U1(value) => self.text(&value.to_string()),
            Value::I2(value) => self.text(&value.to_string()),
            Value::U2(value) => self.text(&value.to_string()),
            Value::I4(value) => self.text(&value.to_string()),
            Value::U4(value) => self.text(&value.to_string()),
            Value::I8(value) => self.text(&value.to_string()),
            Value::U8(value) => self.text(&value.to_string()),
            Value::R4(value) => match special_floating_name(f64::from(*value)) {
                Some(name) => self.text(&format!("float.{name}")),
                None => self.text(&format!("{value}F")),
            },
            Value::R8(value) => match special_floating_name(*value) {
                Some(name) => self.text(&format!("double.{name}")),
                None => self.text(&format!("{value}D")),
            },
            Value::Decimal(value) => self.text(&format!("{value}M")),
            Value::Type(target) => {
                let target = target.resolve()?;
                self.text("typeof(")?;
                self.write_type_reference(&target)?;
                self.text(")")
            }
            Value::Array(items) => self.write_array(items, value_type),
        }
    }

    /// Write `new T[] { a, b }`
    fn write_array(&mut self, items: &[Value], array_type: Option<&TypeRc>) -> Result<()> {
        let element = array_type.and_then(|ty| match ty.decoration() {
            Some((TypeModifier::Array(_), element)) => Some(element.clone()),
            _ => None,
        });

        self.text("new")?;
        if let Some(element) = &element {
            self.text(" ")?;
            self.write_type_reference(element)?;
        }
        self.text("[] {")?;
        if !items.is_empty() {
            self.text(" ")?;
            self.write_list(items, ", ", |writer, item| {
                writer.write_constant(item, element.as_ref())
            })?;
        }
        self.text(" }")
    }

    /// Write an enum value as member name, flag combination or raw number
    fn write_enum_value(&mut self, enumeration: &TypeRc, value: &Value) -> Result<()> {
        let mask = underlying_mask(enumeration);
        let bits = value.to_bits().unwrap_or_default() & mask;

        let members: Vec<(FieldRc, u64)> = enumeration
            .fields
            .iter()
            .filter_map(|(_, field)| {
                let constant = field.constant.as_ref()?.to_bits()? & mask;
                Some((field.clone(), constant))
            })
            .collect();

        if let Some((member, _)) = members.iter().find(|(_, constant)| *constant == bits) {
            return self.write_enum_member(enumeration, member);
        }

        if enumeration.is_flags() {
            let (chosen, remaining) = decompose_flags(&members, bits);
            if !chosen.is_empty() {
                self.write_list(&chosen, " | ", |writer, member| {
                    writer.write_enum_member(enumeration, member)
                })?;
                if remaining != 0 {
                    self.text(" | ")?;
                    self.write_raw(value, remaining)?;
                }
                return Ok(());
            }
        }

        self.write_raw(value, bits)
    }

    fn write_enum_member(&mut self, enumeration: &TypeRc, member: &FieldRc) -> Result<()> {
        self.write_type_reference(enumeration)?;
        self.text(".")?;
        self.link(&Member::Field(member.clone()), &member.name)
    }

    /// Write `bits` as a number of the same shape as `value`
    fn write_raw(&mut self, value: &Value, bits: u64) -> Result<()> {
        let raw = value.with_bits(bits).ok_or_else(|| {
            Error::UnsupportedValue(format!("{} is not an integral value", value.shape()))
        })?;
        self.write_constant(&raw, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        language::{csharp::CSharp, Language},
        metadata::{DecimalValue, FieldBuilder, TypeBuilder, TypeRegistry},
        test::SampleLibrary,
    };

    /// Reverses [`escape`] for the sequences it produces
    fn unescape(text: &str) -> Vec<u16> {
        let mut units = Vec::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                units.push(c as u16);
                continue;
            }
            let unit = match chars.next() {
                Some('n') => 0x0A,
                Some('r') => 0x0D,
                Some('t') => 0x09,
                Some('a') => 0x07,
                Some('b') => 0x08,
                Some('f') => 0x0C,
                Some('v') => 0x0B,
                Some('e') => 0x1B,
                Some('0') => 0x00,
                Some('u') => {
                    let hex: String = chars.by_ref().take(4).collect();
                    u16::from_str_radix(&hex, 16).unwrap()
                }
                Some(other) => other as u16,
                None => panic!("dangling backslash"),
            };
            units.push(unit);
        }
        units
    }

    fn constant(value: &Value, value_type: Option<&TypeRc>) -> String {
        let mut out = String::new();
        CSharp::default()
            .write_constant_value(&mut out, value, value_type, None)
            .unwrap();
        out
    }

    #[test]
    fn printable_ascii_is_unchanged() {
        let text = "Hello, World! 0123 ~{}[]";
        assert_eq!(escape(text.encode_utf16(), '"'), text);
    }

    #[test]
    fn escape_table() {
        let text = "a\\b\n\r\t\u{7}\u{8}\u{c}\u{b}\u{1b}\0\"'é😀";
        assert_eq!(
            escape(text.encode_utf16(), '"'),
            "a\\\\b\\n\\r\\t\\a\\b\\f\\v\\e\\0\\\"'\\u00E9\\uD83D\\uDE00"
        );
        assert_eq!(escape("'".encode_utf16(), '\''), "\\'");
    }

    #[test]
    fn escape_round_trip() {
        for text in ["plain", "tab\there", "quote\"d", "nul\0", "ünïcödé", "emoji 😀 \u{7f}"] {
            let units: Vec<u16> = text.encode_utf16().collect();
            assert_eq!(unescape(&escape(units.iter().copied(), '"')), units, "{text}");
        }
    }

    #[test]
    fn primitive_literals() {
        let registry = TypeRegistry::new();
        let int = registry.system("Int32").unwrap();
        let string = registry.system("String").unwrap();

        assert_eq!(constant(&Value::Null, Some(&int)), "default");
        assert_eq!(constant(&Value::Null, Some(&string)), "null");
        assert_eq!(constant(&Value::Null, None), "null");
        assert_eq!(constant(&Value::Boolean(false), None), "false");
        assert_eq!(constant(&Value::I4(-42), None), "-42");
        assert_eq!(constant(&Value::U8(u64::MAX), None), "18446744073709551615");
        assert_eq!(constant(&Value::R4(1.5), None), "1.5F");
        assert_eq!(constant(&Value::R8(0.25), None), "0.25D");
        assert_eq!(constant(&Value::R8(f64::NAN), None), "double.NaN");
        assert_eq!(constant(&Value::R4(f32::NEG_INFINITY), None), "float.NegativeInfinity");
        assert_eq!(constant(&Value::R8(f64::INFINITY), None), "double.PositiveInfinity");
        assert_eq!(constant(&Value::Decimal(DecimalValue::new(125, 1)), None), "12.5M");
        assert_eq!(constant(&Value::char('\n'), None), "'\\n'");
        assert_eq!(constant(&Value::char('"'), None), "'\"'");
        assert_eq!(constant(&Value::string("a'b"), None), "\"a'b\"");
    }

    #[test]
    fn type_and_array_literals() {
        let registry = TypeRegistry::new();
        let int = registry.system("Int32").unwrap();
        let string = registry.system("String").unwrap();
        let ints = registry.array(&int, 1);

        assert_eq!(
            constant(&Value::Type((&registry.array(&string, 1)).into()), None),
            "typeof(string[])"
        );
        assert_eq!(
            constant(&Value::Array(vec![Value::I4(1), Value::I4(2)]), Some(&ints)),
            "new int[] { 1, 2 }"
        );
        assert_eq!(constant(&Value::Array(Vec::new()), Some(&ints)), "new int[] { }");
        assert_eq!(
            constant(&Value::Array(vec![Value::string("x")]), None),
            "new[] { \"x\" }"
        );
    }

    #[test]
    fn flags_decomposition_prefers_wider_members() {
        let candidates = [("A", 1), ("B", 2), ("C", 3)];
        assert_eq!(decompose_flags(&candidates, 3), (vec!["C"], 0));
        assert_eq!(decompose_flags(&candidates, 1), (vec!["A"], 0));
        assert_eq!(decompose_flags(&candidates, 8), (Vec::<&str>::new(), 8));

        let overlapping = [("Low", 0b011), ("High", 0b110), ("Mid", 0b010), ("Top", 0b100)];
        assert_eq!(decompose_flags(&overlapping, 0b111), (vec!["Low", "High"], 0));
        assert_eq!(decompose_flags(&overlapping, 0b1101), (vec!["Top"], 0b1001));
    }

    #[test]
    fn enum_values() {
        let library = SampleLibrary::new();
        let access = Some(&library.access);

        assert_eq!(constant(&Value::I4(3), access), "FileAccess.ReadWrite");
        assert_eq!(constant(&Value::I4(1), access), "FileAccess.Read");
        assert_eq!(
            constant(&Value::I4(5), access),
            "FileAccess.Read | FileAccess.Execute"
        );
        assert_eq!(
            constant(&Value::I4(7), access),
            "FileAccess.ReadWrite | FileAccess.Execute"
        );
        assert_eq!(
            constant(&Value::I4(0x13), access),
            "FileAccess.ReadWrite | 16"
        );
        assert_eq!(constant(&Value::I4(0), access), "FileAccess.None");
        assert_eq!(constant(&Value::I4(64), access), "64");
    }

    #[test]
    fn nullable_enum_values() {
        let library = SampleLibrary::new();
        let nullable = library.registry.nullable(&library.access);

        assert_eq!(
            constant(&Value::I4(5), Some(&nullable)),
            "FileAccess.Read | FileAccess.Execute"
        );
        assert_eq!(constant(&Value::I4(64), Some(&nullable)), "64");
        assert_eq!(constant(&Value::Null, Some(&nullable)), "null");

        let by_ref = library.registry.by_ref(&nullable);
        assert_eq!(constant(&Value::I4(1), Some(&by_ref)), "FileAccess.Read");
    }

    #[test]
    fn plain_enum_values() {
        let registry = TypeRegistry::new();
        let byte = registry.system("Byte").unwrap();
        let color = TypeBuilder::enumeration(&registry, "Drawing", "Color", &byte).build();
        FieldBuilder::enum_member("Red", &color, Value::U1(1)).build(&color);
        FieldBuilder::enum_member("Green", &color, Value::U1(2)).build(&color);

        assert_eq!(constant(&Value::U1(2), Some(&color)), "Color.Green");
        assert_eq!(constant(&Value::I4(1), Some(&color)), "Color.Red");
        assert_eq!(constant(&Value::U1(3), Some(&color)), "3");
        assert_eq!(constant(&Value::Null, Some(&color)), "default");
        assert!(matches!(
            CSharp::default().write_constant_value(
                &mut String::new(),
                &Value::string("Red"),
                Some(&color),
                None
            ),
            Err(Error::UnsupportedValue(_))
        ));
    }
}
