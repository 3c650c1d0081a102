//! Integration tests for the output side of the formatter: the linker seam, constants and
//! attribute applications.

use std::fmt;

use dotdoc::{
    language::csharp::{decompose_flags, escape},
    prelude::*,
    Result,
};

fn greeter(registry: &TypeRegistry) -> MethodRc {
    let string = registry.system("String").unwrap();
    let greeter = TypeBuilder::class(registry, "Samples", "Greeter").build();
    MethodBuilder::new("Greet", &string)
        .parameter(Parameter::new("name", 0, &string))
        .build(&greeter)
}

/// Every identifier goes through the linker, punctuation and keywords do not.
#[test]
fn linker_wraps_identifiers() -> Result<()> {
    let registry = TypeRegistry::new();
    let greet = Member::Method(greeter(&registry));
    let csharp = CSharp::default();

    let linker = |out: &mut dyn fmt::Write, member: &Member, name: &str| {
        write!(out, "<{}:{}>", member.kind_name(), name)
    };

    let mut text = String::new();
    csharp.write_definition(&mut text, &greet, Some(&linker))?;
    assert_eq!(
        text,
        "public <type:string> <method:Greet>(<type:string> <parameter:name>);"
    );

    let mut text = String::new();
    csharp.write_name(&mut text, &greet, NameQualifier::Full, Some(&linker))?;
    assert_eq!(text, "Samples.<type:Greeter>.<method:Greet>");
    Ok(())
}

#[test]
fn plain_linker_matches_no_linker() -> Result<()> {
    let registry = TypeRegistry::new();
    let greet = Member::Method(greeter(&registry));
    let csharp = CSharp::default();

    for qualifier in [
        NameQualifier::None,
        NameQualifier::DeclaringType,
        NameQualifier::Full,
    ] {
        let mut linked = String::new();
        csharp.write_signature(&mut linked, &greet, qualifier, Some(&PlainLinker))?;
        assert_eq!(linked, csharp.format_signature(&greet, qualifier)?);
    }

    let mut linked = String::new();
    csharp.write_definition(&mut linked, &greet, Some(&PlainLinker))?;
    assert_eq!(linked, csharp.format_definition(&greet)?);
    Ok(())
}

#[test]
fn linker_failure_is_reported() {
    let registry = TypeRegistry::new();
    let greet = Member::Method(greeter(&registry));

    let failing = |_: &mut dyn fmt::Write, _: &Member, _: &str| -> fmt::Result { Err(fmt::Error) };
    let mut text = String::new();
    let result = CSharp::default().write_definition(&mut text, &greet, Some(&failing));

    assert!(matches!(result, Err(Error::Fmt(_))));
    assert_eq!(text, "public ");
}

#[test]
fn constants() -> Result<()> {
    let registry = TypeRegistry::new();
    let csharp = CSharp::default();
    let string = registry.system("String").unwrap();
    let int = registry.system("Int32").unwrap();
    let widget = TypeBuilder::class(&registry, "Ui", "Widget").build();

    let constant = |value: Value, value_type: Option<&TypeRc>| -> Result<String> {
        let mut text = String::new();
        csharp.write_constant_value(&mut text, &value, value_type, None)?;
        Ok(text)
    };

    assert_eq!(
        constant(Value::string("say \"hi\"\n"), Some(&string))?,
        r#""say \"hi\"\n""#
    );
    assert_eq!(constant(Value::char('\''), None)?, r"'\''");
    assert_eq!(constant(Value::char('é'), None)?, r"'\u00E9'");
    assert_eq!(constant(Value::Null, Some(&int))?, "default");
    assert_eq!(constant(Value::Null, Some(&string))?, "null");
    assert_eq!(constant(Value::R4(1.5), None)?, "1.5F");
    assert_eq!(constant(Value::R8(f64::NEG_INFINITY), None)?, "double.NegativeInfinity");
    assert_eq!(
        constant(Value::Decimal(DecimalValue::new(-12345, 2)), None)?,
        "-123.45M"
    );
    assert_eq!(
        constant(Value::Type(TypeRef::new(&widget)), None)?,
        "typeof(Widget)"
    );
    assert_eq!(
        constant(
            Value::Array(vec![Value::I4(1), Value::I4(2)]),
            Some(&registry.array(&int, 1))
        )?,
        "new int[] { 1, 2 }"
    );
    Ok(())
}

#[test]
fn enum_constants() -> Result<()> {
    let registry = TypeRegistry::new();
    let csharp = CSharp::default();
    let int = registry.system("Int32").unwrap();
    let flags = registry.system("FlagsAttribute").unwrap();

    let options = TypeBuilder::enumeration(&registry, "Text", "RegexOptions", &int)
        .attribute(CustomAttribute::new(&flags))
        .build();
    for (name, value) in [("None", 0), ("IgnoreCase", 1), ("Multiline", 2), ("Compiled", 8)] {
        FieldBuilder::enum_member(name, &options, Value::I4(value)).build(&options);
    }

    let constant = |value: i32| -> Result<String> {
        let mut text = String::new();
        csharp.write_constant_value(&mut text, &Value::I4(value), Some(&options), None)?;
        Ok(text)
    };

    assert_eq!(constant(0)?, "RegexOptions.None");
    assert_eq!(constant(9)?, "RegexOptions.IgnoreCase | RegexOptions.Compiled");
    assert_eq!(
        constant(7)?,
        "RegexOptions.IgnoreCase | RegexOptions.Multiline | 4"
    );
    assert_eq!(constant(4)?, "4");

    let mut text = String::new();
    let mismatch = csharp.write_constant_value(
        &mut text,
        &Value::string("Compiled"),
        Some(&options),
        None,
    );
    assert!(matches!(mismatch, Err(Error::UnsupportedValue(_))));
    Ok(())
}

#[test]
fn attributes() -> Result<()> {
    let registry = TypeRegistry::new();
    let csharp = CSharp::default();
    let string = registry.system("String").unwrap();
    let boolean = registry.system("Boolean").unwrap();
    let obsolete = TypeBuilder::class(&registry, "System", "ObsoleteAttribute").build();

    let attribute = CustomAttribute::new(&obsolete)
        .argument(&string, Value::string("Use Run"))
        .argument(&boolean, Value::Boolean(true))
        .property("DiagnosticId", &string, Value::string("X1"));

    let mut text = String::new();
    csharp.write_attribute(&mut text, &attribute, NameQualifier::None, None)?;
    assert_eq!(text, r#"[Obsolete("Use Run", true, DiagnosticId = "X1")]"#);

    let mut text = String::new();
    csharp.write_attribute(
        &mut text,
        &CustomAttribute::new(&obsolete),
        NameQualifier::Full,
        None,
    )?;
    assert_eq!(text, "[System.Obsolete]");
    Ok(())
}

/// Every UTF-16 code unit escapes to printable ASCII that never ends a literal early.
#[test]
fn escaping_covers_every_code_unit() {
    for unit in 0..=u16::MAX {
        for delimiter in ['"', '\''] {
            let escaped = escape([unit], delimiter);
            assert!(
                escaped.chars().all(|c| (' '..='~').contains(&c)),
                "{unit:#06x} -> {escaped}"
            );
            let unescaped_delimiter = escaped
                .char_indices()
                .any(|(index, c)| c == delimiter && !escaped[..index].ends_with('\\'));
            assert!(!unescaped_delimiter, "{unit:#06x} -> {escaped}");
        }
    }
    assert_eq!(escape("tab\there".encode_utf16(), '"'), r"tab\there");
    assert_eq!(escape("\u{1b}".encode_utf16(), '"'), r"\e");
}

#[test]
fn flag_decomposition_is_deterministic() {
    let candidates = [("Low", 0b0011), ("High", 0b1100), ("Mid", 0b0110), ("All", 0b1111)];
    let mut reversed = candidates;
    reversed.reverse();

    for value in 0..=0b11111 {
        assert_eq!(
            decompose_flags(&candidates, value),
            decompose_flags(&reversed, value)
        );
    }

    assert_eq!(decompose_flags(&candidates, 0b1111), (vec!["All"], 0));
    assert_eq!(decompose_flags(&candidates, 0b0111), (vec!["Low", "Mid"], 0));
    assert_eq!(
        decompose_flags(&candidates, 0b10111),
        (vec!["Low", "Mid"], 0b10000)
    );
    assert_eq!(decompose_flags(&candidates, 0b0001), (vec![], 0b0001));
}
