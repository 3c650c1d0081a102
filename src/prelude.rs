//! # dotdoc Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the dotdoc library. Import this module to get quick access to the essential
//! types for building metadata and formatting it.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dotdoc operations
pub use crate::Error;

/// The result type used throughout dotdoc
pub use crate::Result;

// ================================================================================================
// Formatting
// ================================================================================================

/// The formatter contract, qualification levels and the identifier seam
pub use crate::language::{Language, Linker, NameQualifier, PlainLinker};

/// The C# formatter and its configuration
pub use crate::language::csharp::{CSharp, CodeStyleOptions};

// ================================================================================================
// Type System
// ================================================================================================

/// Types, type references and the registry owning them
pub use crate::metadata::{
    DocType, GenericParameter, TypeKind, TypeModifier, TypeRc, TypeRef, TypeRegistry,
};

// ================================================================================================
// Members
// ================================================================================================

/// Fields, properties, methods, events and parameters
pub use crate::metadata::{
    Accessor, Event, EventRc, ExtensionBlock, Field, FieldRc, Member, Method, MethodKind,
    MethodRc, Parameter, ParameterRc, Property, PropertyRc,
};

/// Declaration modifiers and flags
pub use crate::metadata::{
    Accessibility, GenericConstraints, MemberModifiers, RefKind, TypeFlags, Variance,
};

// ================================================================================================
// Values and Attributes
// ================================================================================================

/// Constants and custom attribute applications
pub use crate::metadata::{AttributeTarget, CustomAttribute, DecimalValue, TypedValue, Value};

// ================================================================================================
// Builders
// ================================================================================================

/// Fluent builders for types and members
pub use crate::metadata::{
    EventBuilder, FieldBuilder, MethodBuilder, PropertyBuilder, TypeBuilder,
};
