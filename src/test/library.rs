use std::sync::Arc;

use crate::metadata::{
    Accessibility, Accessor, CustomAttribute, ExtensionBlock, FieldBuilder, FieldRc,
    GenericConstraints, GenericParameter, Member, MemberModifiers, MethodBuilder, MethodRc,
    Parameter, PropertyBuilder, PropertyRc, TypeBuilder, TypeFlags, TypeRc, TypeRegistry, Value,
};

/// A small library covering the shapes the formatter has to deal with
///
/// ```csharp
/// namespace Samples {
///     public class Box {
///         public Box(int capacity);
///         public static T Convert<T>(string value) where T : struct, IComparable;
///         public int this[int index] { get; private set; }
///     }
///     public sealed class Foo : IComparable { object IComparable.Value { get; } }
///     public struct Money {
///         public static Money operator +(Money left, Money right);
///         public static explicit operator decimal(Money value);
///     }
///     [Flags] public enum FileAccess { None = 0, Read = 1, Write = 2, ReadWrite = 3, Execute = 4 }
///     public class Outer<T> { public class Inner<U> {} }
///     public class Widget {}
///     public static class Enumerable {
///         extension<T>(IEnumerable<T> source) { public bool IsEmpty { get; } }
///     }
/// }
/// ```
pub struct SampleLibrary {
    pub registry: TypeRegistry,
    pub comparable: TypeRc,
    pub comparable_value: PropertyRc,
    pub box_type: TypeRc,
    pub box_constructor: MethodRc,
    pub convert: MethodRc,
    pub indexer: PropertyRc,
    pub foo: TypeRc,
    pub foo_value: PropertyRc,
    pub money: TypeRc,
    pub money_add: MethodRc,
    pub money_to_decimal: MethodRc,
    pub access: TypeRc,
    pub access_members: Vec<FieldRc>,
    pub outer: TypeRc,
    pub inner: TypeRc,
    pub widget: TypeRc,
    pub enumerable: TypeRc,
    pub extension_is_empty: PropertyRc,
}

impl SampleLibrary {
    pub fn new() -> Self {
        let registry = TypeRegistry::new();
        let int = registry.system("Int32").unwrap();
        let boolean = registry.system("Boolean").unwrap();
        let string = registry.system("String").unwrap();
        let object = registry.system("Object").unwrap();
        let decimal = registry.system("Decimal").unwrap();
        let flags = registry.system("FlagsAttribute").unwrap();

        let comparable = TypeBuilder::interface(&registry, "System", "IComparable").build();
        let comparable_value = PropertyBuilder::new("Value", &object)
            .modifiers(MemberModifiers::ABSTRACT)
            .getter(Accessor::new(Accessibility::Public))
            .build(&comparable);

        let box_type = TypeBuilder::class(&registry, "Samples", "Box").build();
        let box_constructor = MethodBuilder::constructor(&registry)
            .parameter(Parameter::new("capacity", 0, &int))
            .build(&box_type);

        let t = registry.generic_parameter(
            "T",
            GenericParameter::method_parameter(0).with_constraints(GenericConstraints::VALUE_TYPE),
        );
        t.add_constraint(&comparable);
        let convert = MethodBuilder::new("Convert", &t)
            .modifiers(MemberModifiers::STATIC)
            .generic_parameter(&t)
            .parameter(Parameter::new("value", 0, &string))
            .build(&box_type);

        let indexer = PropertyBuilder::new("Item", &int)
            .getter(Accessor::new(Accessibility::Public))
            .setter(Accessor::new(Accessibility::Private))
            .parameter(Parameter::new("index", 0, &int))
            .build(&box_type);

        let foo = TypeBuilder::class(&registry, "Samples", "Foo")
            .flags(TypeFlags::SEALED)
            .implements(&comparable)
            .build();
        let foo_value = PropertyBuilder::new("Value", &object)
            .accessibility(Accessibility::Private)
            .getter(Accessor::new(Accessibility::Private))
            .implements(&comparable, comparable_value.clone())
            .build(&foo);

        let money = TypeBuilder::struct_type(&registry, "Samples", "Money").build();
        let money_add = MethodBuilder::operator("op_Addition", &money)
            .parameter(Parameter::new("left", 0, &money))
            .parameter(Parameter::new("right", 1, &money))
            .build(&money);
        let money_to_decimal = MethodBuilder::operator("op_Explicit", &decimal)
            .parameter(Parameter::new("value", 0, &money))
            .build(&money);

        let access = TypeBuilder::enumeration(&registry, "Samples", "FileAccess", &int)
            .attribute(CustomAttribute::new(&flags))
            .build();
        let access_members = [
            ("None", 0),
            ("Read", 1),
            ("Write", 2),
            ("ReadWrite", 3),
            ("Execute", 4),
        ]
        .into_iter()
        .map(|(name, value)| {
            FieldBuilder::enum_member(name, &access, Value::I4(value)).build(&access)
        })
        .collect();

        let outer = TypeBuilder::class(&registry, "Samples", "Outer")
            .generic_parameter("T")
            .build();
        let inner = TypeBuilder::class(&registry, "Samples", "Inner")
            .nested_in(&outer)
            .generic_parameter("U")
            .build();
        let widget = TypeBuilder::class(&registry, "Samples", "Widget").build();

        let enumerable_interface =
            TypeBuilder::interface(&registry, "System.Collections.Generic", "IEnumerable")
                .generic_parameter("T")
                .build();
        let enumerable = TypeBuilder::class(&registry, "Samples", "Enumerable")
            .flags(TypeFlags::STATIC)
            .build();
        let element = registry.generic_parameter("T", GenericParameter::method_parameter(0));
        let sequence = registry
            .construct(&enumerable_interface, &[element.clone()])
            .unwrap();
        let block = Arc::new(ExtensionBlock::new(
            vec![element],
            Parameter::new("source", 0, &sequence),
        ));
        let extension_is_empty = PropertyBuilder::new("IsEmpty", &boolean)
            .getter(Accessor::new(Accessibility::Public))
            .extension_block(&block)
            .build(&enumerable);

        SampleLibrary {
            registry,
            comparable,
            comparable_value,
            box_type,
            box_constructor,
            convert,
            indexer,
            foo,
            foo_value,
            money,
            money_add,
            money_to_decimal,
            access,
            access_members,
            outer,
            inner,
            widget,
            enumerable,
            extension_is_empty,
        }
    }

    // Every named entity of the library, types first
    pub fn members(&self) -> Vec<Member> {
        let types = [
            &self.comparable,
            &self.box_type,
            &self.foo,
            &self.money,
            &self.access,
            &self.outer,
            &self.inner,
            &self.widget,
            &self.enumerable,
        ]
        .into_iter()
        .map(|ty| Member::Type(ty.clone()));

        let members = [
            Member::Property(self.comparable_value.clone()),
            Member::Method(self.box_constructor.clone()),
            Member::Method(self.convert.clone()),
            Member::Property(self.indexer.clone()),
            Member::Property(self.foo_value.clone()),
            Member::Method(self.money_add.clone()),
            Member::Method(self.money_to_decimal.clone()),
            Member::Property(self.extension_is_empty.clone()),
        ];

        types
            .chain(members)
            .chain(self.access_members.iter().cloned().map(Member::Field))
            .collect()
    }
}
