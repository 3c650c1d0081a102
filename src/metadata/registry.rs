//! Central type registry.
//!
//! The `TypeRegistry` owns every [`DocType`] of a load context. Types, members and custom
//! attributes only hold weak [`TypeRef`]s to other types, so the registry is what keeps a
//! metadata graph alive: dropping it invalidates every reference into it.
//!
//! # Derived types
//!
//! Decorated types (arrays, pointers, by-ref and nullable wrappers) and constructed generic types
//! are interned: asking twice for `int[]` yields the same `Arc`, so identity comparisons between
//! types stay meaningful.
//!
//! # Thread Safety
//!
//! All operations take `&self`. Storage is an append-only `boxcar::Vec`, the indices are
//! `DashMap`s and identities come from an atomic counter, so a registry can be shared between
//! threads that load and format concurrently.
//!
//! # Examples
//!
//! ```rust
//! use dotdoc::metadata::TypeRegistry;
//!
//! let registry = TypeRegistry::new();
//! let int = registry.system("Int32").unwrap();
//! let jagged = registry.array(&registry.array(&int, 1), 1);
//! assert_eq!(jagged.fullname(), "System.Int32[][]");
//! assert!(std::sync::Arc::ptr_eq(&jagged, &registry.array(&registry.array(&int, 1), 1)));
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use dashmap::DashMap;

use crate::{
    metadata::types::{DocType, GenericParameter, TypeKind, TypeModifier, TypeRc, TypeRef},
    Result,
};

/// Well-known `System` types every registry starts out with, and their shape
const SYSTEM_TYPES: &[(&str, SeedKind)] = &[
    ("Object", SeedKind::Class),
    ("ValueType", SeedKind::Class),
    ("Enum", SeedKind::Class),
    ("Void", SeedKind::Struct),
    ("Boolean", SeedKind::Struct),
    ("Char", SeedKind::Struct),
    ("SByte", SeedKind::Struct),
    ("Byte", SeedKind::Struct),
    ("Int16", SeedKind::Struct),
    ("UInt16", SeedKind::Struct),
    ("Int32", SeedKind::Struct),
    ("UInt32", SeedKind::Struct),
    ("Int64", SeedKind::Struct),
    ("UInt64", SeedKind::Struct),
    ("Single", SeedKind::Struct),
    ("Double", SeedKind::Struct),
    ("Decimal", SeedKind::Struct),
    ("IntPtr", SeedKind::Struct),
    ("UIntPtr", SeedKind::Struct),
    ("String", SeedKind::Class),
    ("Type", SeedKind::Class),
    ("Delegate", SeedKind::Class),
    ("MulticastDelegate", SeedKind::Class),
    ("Attribute", SeedKind::Class),
    ("FlagsAttribute", SeedKind::Attribute),
    ("ParamArrayAttribute", SeedKind::Attribute),
];

#[derive(Clone, Copy)]
enum SeedKind {
    Class,
    Struct,
    Attribute,
}

/// Owner and index of all types of one load context
pub struct TypeRegistry {
    /// Every type ever created, in creation order
    types: boxcar::Vec<TypeRc>,
    /// Named type definitions by full metadata name
    fullnames: DashMap<String, TypeRc>,
    /// Interned decorated and constructed types by structural key
    derived: DashMap<String, TypeRc>,
    /// Next identity to hand out
    next_id: AtomicU32,
    void: TypeRc,
}

impl TypeRegistry {
    /// Create a registry seeded with the well-known `System` types
    #[must_use]
    pub fn new() -> Self {
        let void = Arc::new(DocType::new(0, "System", "Void", TypeKind::Struct));
        let registry = TypeRegistry {
            types: boxcar::Vec::new(),
            fullnames: DashMap::new(),
            derived: DashMap::new(),
            next_id: AtomicU32::new(1),
            void: void.clone(),
        };

        registry.insert(&void);
        for (name, seed) in SYSTEM_TYPES {
            if *name == "Void" {
                continue;
            }

            let kind = match seed {
                SeedKind::Struct => TypeKind::Struct,
                SeedKind::Class | SeedKind::Attribute => TypeKind::Class,
            };
            registry.register(DocType::new(registry.next_id(), "System", name, kind));
        }

        registry.seed_bases();
        registry
    }

    fn seed_bases(&self) {
        let (Some(object), Some(value_type), Some(attribute), Some(delegate)) = (
            self.system("Object"),
            self.system("ValueType"),
            self.system("Attribute"),
            self.system("Delegate"),
        ) else {
            return;
        };

        for (name, seed) in SYSTEM_TYPES {
            let Some(ty) = self.system(name) else {
                continue;
            };
            match (name, seed) {
                (&"Object", _) => {}
                (&"MulticastDelegate", _) => ty.set_base(&delegate),
                (_, SeedKind::Struct) => ty.set_base(&value_type),
                (_, SeedKind::Attribute) => ty.set_base(&attribute),
                (_, SeedKind::Class) => ty.set_base(&object),
            }
        }
    }

    /// Hand out a fresh type identity
    pub(crate) fn next_id(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn insert(&self, ty: &TypeRc) {
        self.types.push(ty.clone());
        self.fullnames.insert(ty.fullname(), ty.clone());
    }

    /// Take ownership of a type definition and index it by its full name
    ///
    /// A later registration with the same full name replaces the index entry; both types stay
    /// owned by the registry.
    ///
    /// ## Arguments
    /// * 'ty' - The type to register
    pub fn register(&self, ty: DocType) -> TypeRc {
        let ty = Arc::new(ty);
        self.insert(&ty);
        ty
    }

    /// Look up a type definition by its full metadata name (`Namespace.Outer+Inner`)
    #[must_use]
    pub fn get(&self, fullname: &str) -> Option<TypeRc> {
        self.fullnames.get(fullname).map(|entry| entry.value().clone())
    }

    /// Look up a type of the `System` namespace by its simple name
    #[must_use]
    pub fn system(&self, name: &str) -> Option<TypeRc> {
        self.get(&format!("System.{name}"))
    }

    /// `System.Void`, the return type of constructors and procedures
    #[must_use]
    pub fn void(&self) -> &TypeRc {
        &self.void
    }

    /// Number of types owned by this registry
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.count()
    }

    /// Check if the registry owns no types at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.count() == 0
    }

    /// Iterate all owned types in creation order
    pub fn iter(&self) -> impl Iterator<Item = &TypeRc> {
        self.types.iter().map(|(_, ty)| ty)
    }

    /// Create a generic parameter of a type or method
    ///
    /// Generic parameters are owned by the registry but not indexed by name.
    pub fn generic_parameter(&self, name: &str, info: GenericParameter) -> TypeRc {
        let parameter = Arc::new(DocType::new(
            self.next_id(),
            "",
            name,
            TypeKind::GenericParameter(info),
        ));
        self.types.push(parameter.clone());
        parameter
    }

    /// Wrap `element` in the given decorator, reusing an existing wrapper if there is one
    pub fn decorate(&self, element: &TypeRc, modifier: TypeModifier) -> TypeRc {
        let modifier = match modifier {
            TypeModifier::Array(rank) => TypeModifier::Array(rank.max(1)),
            other => other,
        };
        let (key, suffix) = match modifier {
            TypeModifier::Array(rank) => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                (format!("{}[{}]", element.id, commas), format!("[{commas}]"))
            }
            TypeModifier::Pointer => (format!("{}*", element.id), "*".to_string()),
            TypeModifier::ByRef => (format!("{}&", element.id), "&".to_string()),
            TypeModifier::Nullable => (format!("{}?", element.id), "?".to_string()),
        };

        self.derived
            .entry(key)
            .or_insert_with(|| {
                let decorated = Arc::new(DocType::new(
                    self.next_id(),
                    "",
                    &format!("{}{}", element.name, suffix),
                    TypeKind::Decorated {
                        modifier,
                        element: element.clone(),
                    },
                ));
                self.types.push(decorated.clone());
                decorated
            })
            .value()
            .clone()
    }

    /// An array of `element` with the given rank (`1` for `T[]`)
    pub fn array(&self, element: &TypeRc, rank: u32) -> TypeRc {
        self.decorate(element, TypeModifier::Array(rank))
    }

    /// An unmanaged pointer to `element`
    pub fn pointer(&self, element: &TypeRc) -> TypeRc {
        self.decorate(element, TypeModifier::Pointer)
    }

    /// A managed reference to `element`
    pub fn by_ref(&self, element: &TypeRc) -> TypeRc {
        self.decorate(element, TypeModifier::ByRef)
    }

    /// `element?`
    pub fn nullable(&self, element: &TypeRc) -> TypeRc {
        self.decorate(element, TypeModifier::Nullable)
    }

    /// Instantiate a generic type definition with the given arguments
    ///
    /// `arguments` covers all generic parameters of the definition, inherited ones from
    /// enclosing types first, exactly like [`DocType::generic_parameters`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `definition` is not a generic definition or the
    /// number of arguments does not match its number of generic parameters.
    pub fn construct(&self, definition: &TypeRc, arguments: &[TypeRc]) -> Result<TypeRc> {
        if !definition.is_generic() || definition.is_constructed() {
            return Err(malformed_error!(
                "{} is not a generic type definition",
                definition.fullname()
            ));
        }

        if definition.generic_parameters.len() != arguments.len() {
            return Err(malformed_error!(
                "{} expects {} generic arguments, got {}",
                definition.fullname(),
                definition.generic_parameters.len(),
                arguments.len()
            ));
        }

        let key = format!(
            "{}<{}>",
            definition.id,
            arguments
                .iter()
                .map(|argument| argument.id.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );

        let constructed = self
            .derived
            .entry(key)
            .or_insert_with(|| {
                let mut instance = DocType::new(
                    self.next_id(),
                    &definition.namespace,
                    &definition.name,
                    definition.kind.clone(),
                );
                instance.accessibility = definition.accessibility;
                instance.flags = definition.flags;
                instance.generic_parameters = definition.generic_parameters.clone();
                instance.generic_arguments = arguments.to_vec();
                instance.own_generic_range = definition.own_generic_range.clone();
                instance.declaring_type = definition.declaring_type.clone();
                instance.definition = Some(TypeRef::new(definition));

                let instance = Arc::new(instance);
                if let Some(base) = definition.base() {
                    instance.set_base(&base);
                }
                self.types.push(instance.clone());
                instance
            })
            .value()
            .clone();

        Ok(constructed)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_system_types() {
        let registry = TypeRegistry::new();
        for (name, _) in SYSTEM_TYPES {
            let ty = registry.system(name).unwrap();
            assert_eq!(ty.namespace, "System");
            assert_eq!(ty.name, *name);
        }
        assert_eq!(registry.len(), SYSTEM_TYPES.len());
        assert!(Arc::ptr_eq(registry.void(), &registry.system("Void").unwrap()));
    }

    #[test]
    fn seeded_bases() {
        let registry = TypeRegistry::new();
        let int = registry.system("Int32").unwrap();
        assert_eq!(int.base().unwrap().fullname(), "System.ValueType");

        let flags = registry.system("FlagsAttribute").unwrap();
        assert_eq!(flags.base().unwrap().fullname(), "System.Attribute");

        assert!(registry.system("Object").unwrap().base().is_none());
    }

    #[test]
    fn decorated_types_are_interned() {
        let registry = TypeRegistry::new();
        let int = registry.system("Int32").unwrap();

        let matrix = registry.array(&int, 2);
        assert_eq!(matrix.fullname(), "System.Int32[,]");
        assert!(Arc::ptr_eq(&matrix, &registry.array(&int, 2)));
        assert!(!Arc::ptr_eq(&matrix, &registry.array(&int, 1)));

        let nullable_array = registry.array(&registry.nullable(&int), 1);
        let array_nullable = registry.nullable(&registry.array(&int, 1));
        assert_eq!(nullable_array.fullname(), "System.Int32?[]");
        assert_eq!(array_nullable.fullname(), "System.Int32[]?");
    }

    #[test]
    fn construct_checks_arity() {
        let registry = TypeRegistry::new();
        let int = registry.system("Int32").unwrap();
        let t = registry.generic_parameter("T", GenericParameter::type_parameter(0));

        let mut list = DocType::new(
            registry.next_id(),
            "System.Collections.Generic",
            "List`1",
            TypeKind::Class,
        );
        list.generic_parameters = vec![t];
        list.own_generic_range = 0..1;
        let list = registry.register(list);

        let list_of_int = registry.construct(&list, &[int.clone()]).unwrap();
        assert!(list_of_int.is_constructed());
        assert!(Arc::ptr_eq(&list_of_int.definition().unwrap(), &list));
        assert!(Arc::ptr_eq(
            &list_of_int,
            &registry.construct(&list, &[int.clone()]).unwrap()
        ));

        assert!(registry.construct(&list, &[]).is_err());
        assert!(registry.construct(&int, &[int.clone()]).is_err());
        assert!(registry.construct(&list_of_int, &[int.clone()]).is_err());
    }
}
