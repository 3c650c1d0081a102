//! Formatters and metadata shared between threads.

use std::{sync::Arc, thread};

use dotdoc::{prelude::*, Result};

const THREADS: usize = 8;

/// One formatter and one registry serve many threads with identical results.
#[test]
fn shared_formatter() -> Result<()> {
    let registry = TypeRegistry::new();
    let int = registry.system("Int32").unwrap();
    let list = TypeBuilder::class(&registry, "Collections", "List")
        .generic_parameter("T")
        .build();
    let element = list.generic_parameters[0].clone();
    let add = MethodBuilder::new("Add", registry.void())
        .parameter(Parameter::new("item", 0, &element))
        .build(&list);
    let ints = registry.construct(&list, &[int])?;

    let csharp = CSharp::default();
    let expected = csharp.format_definition(&Member::Method(add.clone()))?;
    assert_eq!(expected, "public void Add(T item);");

    let shared = &csharp;
    let results: Vec<Result<(String, String)>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let add = Member::Method(add.clone());
                let ints = Member::Type(ints.clone());
                scope.spawn(move || -> Result<(String, String)> {
                    let definition = shared.format_definition(&add)?;
                    let name = shared.format_name(&ints, NameQualifier::Full)?;
                    Ok((definition, name))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for result in results {
        let (definition, name) = result?;
        assert_eq!(definition, expected);
        assert_eq!(name, "Collections.List<int>");
    }
    Ok(())
}

/// Racing requests for the same derived type all get the same instance.
#[test]
fn concurrent_interning() {
    let registry = TypeRegistry::new();
    let string = registry.system("String").unwrap();
    let before = registry.len();

    let shared = &registry;
    let arrays: Vec<TypeRc> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let string = string.clone();
                scope.spawn(move || shared.array(&string, 2))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(arrays
        .windows(2)
        .all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(registry.len(), before + 1);
    assert_eq!(arrays[0].fullname(), "System.String[,]");
}
