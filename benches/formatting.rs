//! Benchmarks for C# formatting.
//!
//! Tests formatting performance for the common documentation workloads:
//! - Qualified names of nested generic types
//! - Method signatures and definitions
//! - Flags enum literals that need decomposition
//! - Definitions written through a hyperlinking linker

extern crate dotdoc;

use criterion::{criterion_group, criterion_main, Criterion};
use dotdoc::prelude::*;
use std::{fmt, hint::black_box};

struct Fixture {
    registry: TypeRegistry,
    dictionary: TypeRc,
    enumerator: TypeRc,
    try_add: MethodRc,
    options: TypeRc,
}

/// `Collections.Dictionary<TKey, TValue>` with a nested `Enumerator` and a flags enum
fn fixture() -> Fixture {
    let registry = TypeRegistry::new();
    let boolean = registry.system("Boolean").unwrap();
    let int = registry.system("Int32").unwrap();
    let flags = registry.system("FlagsAttribute").unwrap();

    let dictionary = TypeBuilder::class(&registry, "Collections", "Dictionary")
        .generic_parameter("TKey")
        .generic_parameter("TValue")
        .build();
    let enumerator = TypeBuilder::struct_type(&registry, "", "Enumerator")
        .nested_in(&dictionary)
        .build();
    let key = dictionary.generic_parameters[0].clone();
    let value = dictionary.generic_parameters[1].clone();
    let try_add = MethodBuilder::new("TryAdd", &boolean)
        .parameter(Parameter::new("key", 0, &key))
        .parameter(Parameter::new("value", 1, &value))
        .parameter(Parameter::new("overwrite", 2, &boolean).with_default(Value::Boolean(false)))
        .build(&dictionary);

    let options = TypeBuilder::enumeration(&registry, "Collections", "Options", &int)
        .attribute(CustomAttribute::new(&flags))
        .build();
    for bit in 0..16 {
        FieldBuilder::enum_member(&format!("Option{bit}"), &options, Value::I4(1 << bit))
            .build(&options);
    }

    Fixture {
        registry,
        dictionary,
        enumerator,
        try_add,
        options,
    }
}

/// Benchmark the fully qualified name of a type nested in a constructed generic type.
/// Output: Collections.Dictionary<string, int[]>.Enumerator
fn bench_nested_generic_name(c: &mut Criterion) {
    let fixture = fixture();
    let string = fixture.registry.system("String").unwrap();
    let int = fixture.registry.system("Int32").unwrap();
    let arguments = [string, fixture.registry.array(&int, 1)];
    let enumerator = fixture
        .registry
        .construct(&fixture.enumerator, &arguments)
        .unwrap();
    let member = Member::Type(enumerator);
    let csharp = CSharp::default();

    c.bench_function("format_nested_generic_name", |b| {
        b.iter(|| {
            let name = csharp
                .format_name(black_box(&member), NameQualifier::Full)
                .unwrap();
            black_box(name)
        });
    });
}

/// Benchmark a method signature.
/// Output: Dictionary<TKey, TValue>.TryAdd(TKey, TValue, bool)
fn bench_method_signature(c: &mut Criterion) {
    let fixture = fixture();
    let member = Member::Method(fixture.try_add.clone());
    let csharp = CSharp::default();

    c.bench_function("format_method_signature", |b| {
        b.iter(|| {
            let signature = csharp
                .format_signature(black_box(&member), NameQualifier::DeclaringType)
                .unwrap();
            black_box(signature)
        });
    });
}

/// Benchmark a method definition with a default value.
/// Output: public bool TryAdd(TKey key, TValue value, bool overwrite = false);
fn bench_method_definition(c: &mut Criterion) {
    let fixture = fixture();
    let member = Member::Method(fixture.try_add.clone());
    let csharp = CSharp::default();

    c.bench_function("format_method_definition", |b| {
        b.iter(|| {
            let definition = csharp.format_definition(black_box(&member)).unwrap();
            black_box(definition)
        });
    });
}

/// Benchmark a flags enum value spanning eight members.
fn bench_flags_literal(c: &mut Criterion) {
    let fixture = fixture();
    let csharp = CSharp::default();
    let value = Value::I4(0x5555);

    c.bench_function("format_flags_literal", |b| {
        b.iter(|| {
            let mut text = String::new();
            csharp
                .write_constant_value(&mut text, black_box(&value), Some(&fixture.options), None)
                .unwrap();
            black_box(text)
        });
    });
}

/// Benchmark a type definition written through a linker producing markdown links.
fn bench_linked_definition(c: &mut Criterion) {
    let fixture = fixture();
    let member = Member::Type(fixture.dictionary.clone());
    let csharp = CSharp::default();
    let linker = |out: &mut dyn fmt::Write, member: &Member, name: &str| {
        write!(out, "[{}]({}.md)", name, member.name())
    };

    c.bench_function("format_linked_definition", |b| {
        b.iter(|| {
            let mut text = String::new();
            csharp
                .write_definition(&mut text, black_box(&member), Some(&linker))
                .unwrap();
            black_box(text)
        });
    });
}

criterion_group!(
    benches,
    bench_nested_generic_name,
    bench_method_signature,
    bench_method_definition,
    bench_flags_literal,
    bench_linked_definition,
);
criterion_main!(benches);
