//! Metadata model consumed by the formatters.
//!
//! This module holds a normalized, read-only view of .NET assembly metadata: types, their
//! members, parameters, custom attributes and constant values. Raw ECMA-335 encodings (tables,
//! signature blobs, attribute flags) are expected to be decoded by a loader before they reach this
//! model; everything here is phrased in language-level terms.
//!
//! # Key Components
//!
//! - [`TypeRegistry`] - Owner of every type of a load context, with interning of derived types
//! - [`DocType`] / [`TypeKind`] - Classes, structs, interfaces, enums, delegates, generic
//!   parameters and decorated types as one tagged union
//! - [`Member`] - The union of everything a formatter can render
//! - [`CustomAttribute`] / [`TypedValue`] - Attribute applications and their arguments
//! - [`TypeBuilder`], [`MethodBuilder`] and friends - Fluent construction
//!
//! # Ownership
//!
//! The registry owns types, types own their members, members own their parameters. Every link
//! pointing the other way, or sideways to another type, is a weak [`TypeRef`].
//!
//! # Examples
//!
//! ```rust
//! use dotdoc::metadata::{FieldBuilder, TypeBuilder, TypeRegistry, Value};
//!
//! let registry = TypeRegistry::new();
//! let int = registry.system("Int32").unwrap();
//! let color = TypeBuilder::enumeration(&registry, "Drawing", "Color", &int).build();
//! FieldBuilder::enum_member("Red", &color, Value::I4(0)).build(&color);
//! FieldBuilder::enum_member("Green", &color, Value::I4(1)).build(&color);
//!
//! assert!(color.is_enum());
//! assert_eq!(color.fields.count(), 2);
//! ```

/// Custom attribute applications
pub mod attributes;
/// Fluent builders for types and members
pub mod builder;
/// Accessibility, modifiers and other flag sets
pub mod flags;
/// Fields, properties, methods, events and parameters
pub mod members;
/// The type registry
pub mod registry;
/// Type representation
pub mod types;
/// Constant values
pub mod values;

pub use attributes::{
    AttributeTarget, AttributeTargets, CustomAttribute, CustomAttributeRc, NamedArgument,
};
pub use builder::{EventBuilder, FieldBuilder, MethodBuilder, PropertyBuilder, TypeBuilder};
pub use flags::{Accessibility, GenericConstraints, MemberModifiers, RefKind, TypeFlags, Variance};
pub use members::{
    Accessor, Event, EventRc, ExtensionBlock, ExtensionBlockRc, Field, FieldRc, InterfaceMember,
    Member, Method, MethodKind, MethodRc, Parameter, ParameterRc, Property, PropertyRc,
};
pub use registry::TypeRegistry;
pub use types::{DocType, GenericParameter, TypeKind, TypeModifier, TypeRc, TypeRef};
pub use values::{DecimalValue, TypedValue, Value};
