//! Type representation.
//!
//! A [`DocType`] unifies everything the formatter may need to name: type definitions
//! (classes, structs, interfaces, enums, delegates), constructed generic types, generic
//! parameters and decorated types (arrays, pointers, by-ref and nullable wrappers).
//!
//! Every `DocType` is owned by the [`crate::metadata::TypeRegistry`] it was created in. Types
//! refer to each other through [`TypeRef`], a weak reference, so that self-referential metadata
//! (a class implementing `IComparable<Self>`, a constraint `T : IEquatable<T>`) never forms a
//! reference cycle. Structural composition (the element of a decorated type, the arguments of a
//! constructed type, the parameters of a generic definition) is held strongly.

use std::{
    fmt,
    ops::Range,
    sync::{Arc, OnceLock, Weak},
};

use crate::{
    metadata::{
        attributes::CustomAttributeRc,
        flags::{Accessibility, GenericConstraints, TypeFlags, Variance},
        members::{EventRc, FieldRc, MethodRc, PropertyRc},
    },
    Result,
};

/// Reference to a `DocType`
pub type TypeRc = Arc<DocType>;

/// A weak reference to a `DocType`, used for every non-structural type-to-type link
#[derive(Clone, Default)]
pub struct TypeRef {
    weak_ref: Weak<DocType>,
}

impl TypeRef {
    /// Create a new `TypeRef` from a strong reference
    #[must_use]
    pub fn new(strong_ref: &TypeRc) -> Self {
        Self {
            weak_ref: Arc::downgrade(strong_ref),
        }
    }

    /// Get a strong reference to the type, returning None if the type has been dropped
    #[must_use]
    pub fn upgrade(&self) -> Option<TypeRc> {
        self.weak_ref.upgrade()
    }

    /// Get a strong reference to the type
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the referenced type has been dropped, which means
    /// the registry that owned it is gone.
    pub fn resolve(&self) -> Result<TypeRc> {
        self.weak_ref
            .upgrade()
            .ok_or_else(|| malformed_error!("Type reference outlived its registry"))
    }

    /// Check if the referenced type is still alive
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.weak_ref.strong_count() > 0
    }
}

impl From<&TypeRc> for TypeRef {
    fn from(strong_ref: &TypeRc) -> Self {
        Self::new(strong_ref)
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.weak_ref, &other.weak_ref)
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(target) => write!(f, "TypeRef({})", target.fullname()),
            None => write!(f, "TypeRef(<dropped>)"),
        }
    }
}

/// The wrapping a decorated type applies to its element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeModifier {
    /// Array with the given rank (`1` for `T[]`, `2` for `T[,]`)
    Array(u32),
    /// Unmanaged pointer (`T*`)
    Pointer,
    /// Managed reference (`ref T`)
    ByRef,
    /// Nullable wrapper (`T?`)
    Nullable,
}

/// The shape of a type
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// Reference type definition
    Class,
    /// Value type definition
    Struct,
    /// Interface definition
    Interface,
    /// Enumeration, carrying its underlying integral type
    Enum {
        /// The underlying integral type (`System.Int32` unless declared otherwise)
        underlying: TypeRc,
    },
    /// Delegate definition (its signature is the `Invoke` method)
    Delegate,
    /// Generic parameter of a type or method
    GenericParameter(GenericParameter),
    /// A decorator wrapping exactly one element type
    Decorated {
        /// The kind of wrapping
        modifier: TypeModifier,
        /// The wrapped type, which may itself be decorated
        element: TypeRc,
    },
}

/// Information carried by a generic parameter
pub struct GenericParameter {
    /// Zero-based position in the declaring type's or method's parameter list
    pub position: usize,
    /// Declared by a method rather than a type
    pub is_method_parameter: bool,
    /// Declared variance (interfaces and delegates only)
    pub variance: Variance,
    /// Special constraints (`class`, `struct`, `new()`, ...)
    pub constraints: GenericConstraints,
    /// Type constraints, in declaration order
    pub constraint_types: boxcar::Vec<TypeRef>,
}

impl GenericParameter {
    /// Parameter declared by a type
    #[must_use]
    pub fn type_parameter(position: usize) -> Self {
        GenericParameter {
            position,
            is_method_parameter: false,
            variance: Variance::None,
            constraints: GenericConstraints::empty(),
            constraint_types: boxcar::Vec::new(),
        }
    }

    /// Parameter declared by a method
    #[must_use]
    pub fn method_parameter(position: usize) -> Self {
        GenericParameter {
            is_method_parameter: true,
            ..Self::type_parameter(position)
        }
    }

    /// Set the declared variance
    #[must_use]
    pub fn with_variance(mut self, variance: Variance) -> Self {
        self.variance = variance;
        self
    }

    /// Set the special constraints
    #[must_use]
    pub fn with_constraints(mut self, constraints: GenericConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Check if any constraint (special or type) applies
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        !self.constraints.is_empty() || self.constraint_types.count() > 0
    }
}

impl fmt::Debug for GenericParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericParameter")
            .field("position", &self.position)
            .field("is_method_parameter", &self.is_method_parameter)
            .field("variance", &self.variance)
            .field("constraints", &self.constraints)
            .field("constraint_types", &self.constraint_types.count())
            .finish()
    }
}

impl Clone for GenericParameter {
    fn clone(&self) -> Self {
        let constraint_types = boxcar::Vec::new();
        for (_, constraint) in self.constraint_types.iter() {
            constraint_types.push(constraint.clone());
        }

        GenericParameter {
            position: self.position,
            is_method_parameter: self.is_method_parameter,
            variance: self.variance,
            constraints: self.constraints,
            constraint_types,
        }
    }
}

/// Represents a type as seen by the documentation formatter
pub struct DocType {
    /// Identity within the owning registry
    pub id: u32,
    /// Namespace (empty for nested types, generic parameters and decorated types)
    pub namespace: String,
    /// Metadata name, including the generic arity suffix (``List`1``)
    pub name: String,
    /// The shape of the type
    pub kind: TypeKind,
    /// Declared accessibility
    pub accessibility: Accessibility,
    /// Declaration modifiers
    pub flags: TypeFlags,
    /// All generic parameters, inherited ones from enclosing types first
    pub generic_parameters: Vec<TypeRc>,
    /// Generic arguments of a constructed type, parallel to `generic_parameters`
    pub generic_arguments: Vec<TypeRc>,
    /// The slice of `generic_parameters` this type declares itself
    pub own_generic_range: Range<usize>,
    /// Implemented interfaces
    pub interfaces: boxcar::Vec<TypeRef>,
    /// All fields this type has
    pub fields: boxcar::Vec<FieldRc>,
    /// All properties this type has
    pub properties: boxcar::Vec<PropertyRc>,
    /// All methods (including constructors and operators) this type has
    pub methods: boxcar::Vec<MethodRc>,
    /// All events this type has
    pub events: boxcar::Vec<EventRc>,
    /// All types that are 'contained' in this type
    pub nested_types: boxcar::Vec<TypeRc>,
    /// All custom attributes this type has
    pub custom_attributes: boxcar::Vec<CustomAttributeRc>,
    pub(crate) declaring_type: Option<TypeRef>,
    pub(crate) definition: Option<TypeRef>,
    pub(crate) base: OnceLock<TypeRef>,
}

impl DocType {
    /// Create a new, non-generic, top-level type
    #[must_use]
    pub fn new(id: u32, namespace: &str, name: &str, kind: TypeKind) -> Self {
        DocType {
            id,
            namespace: namespace.to_string(),
            name: name.to_string(),
            kind,
            accessibility: Accessibility::Public,
            flags: TypeFlags::empty(),
            generic_parameters: Vec::new(),
            generic_arguments: Vec::new(),
            own_generic_range: 0..0,
            interfaces: boxcar::Vec::new(),
            fields: boxcar::Vec::new(),
            properties: boxcar::Vec::new(),
            methods: boxcar::Vec::new(),
            events: boxcar::Vec::new(),
            nested_types: boxcar::Vec::new(),
            custom_attributes: boxcar::Vec::new(),
            declaring_type: None,
            definition: None,
            base: OnceLock::new(),
        }
    }

    /// The name without its generic arity suffix
    #[must_use]
    pub fn simple_name(&self) -> &str {
        match self.name.find('`') {
            Some(index) => &self.name[..index],
            None => &self.name,
        }
    }

    /// Returns the full metadata name (`Namespace.Outer+Inner`)
    ///
    /// Decorated types are spelled after their element, generic parameters by their name.
    #[must_use]
    pub fn fullname(&self) -> String {
        match &self.kind {
            TypeKind::Decorated { modifier, element } => {
                let element = element.fullname();
                match modifier {
                    TypeModifier::Array(rank) => {
                        let commas = ",".repeat(rank.saturating_sub(1) as usize);
                        format!("{element}[{commas}]")
                    }
                    TypeModifier::Pointer => format!("{element}*"),
                    TypeModifier::ByRef => format!("{element}&"),
                    TypeModifier::Nullable => format!("{element}?"),
                }
            }
            TypeKind::GenericParameter(_) => self.name.clone(),
            _ => match self.declaring_type() {
                Some(parent) => format!("{}+{}", parent.fullname(), self.name),
                None if self.namespace.is_empty() => self.name.clone(),
                None => format!("{}.{}", self.namespace, self.name),
            },
        }
    }

    /// The type this type is nested in, if it is nested (and the parent is still alive)
    #[must_use]
    pub fn declaring_type(&self) -> Option<TypeRc> {
        self.declaring_type.as_ref().and_then(TypeRef::upgrade)
    }

    /// The type this type is nested in, failing loudly if the reference is dangling
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the type is nested but its parent has been dropped.
    pub fn resolve_declaring_type(&self) -> Result<Option<TypeRc>> {
        self.declaring_type.as_ref().map(TypeRef::resolve).transpose()
    }

    /// The generic definition of a constructed type
    #[must_use]
    pub fn definition(&self) -> Option<TypeRc> {
        self.definition.as_ref().and_then(TypeRef::upgrade)
    }

    /// The base type (`extends`), if one is set
    #[must_use]
    pub fn base(&self) -> Option<TypeRc> {
        self.base.get().and_then(TypeRef::upgrade)
    }

    /// Set the base type. Only the first call has an effect.
    pub fn set_base(&self, base: &TypeRc) {
        self.base.set(TypeRef::new(base)).ok();
    }

    /// Record an implemented interface
    pub fn add_interface(&self, interface: &TypeRc) {
        self.interfaces.push(TypeRef::new(interface));
    }

    /// Record a type constraint on a generic parameter. Has no effect on other types.
    pub fn add_constraint(&self, constraint: &TypeRc) {
        if let TypeKind::GenericParameter(info) = &self.kind {
            info.constraint_types.push(TypeRef::new(constraint));
        }
    }

    /// Attach a custom attribute
    pub fn add_attribute(&self, attribute: CustomAttributeRc) {
        self.custom_attributes.push(attribute);
    }

    /// Check if this type is nested in another type
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.declaring_type.is_some()
    }

    /// Check if this type declares or inherits generic parameters
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }

    /// Check if this type is a constructed generic type
    #[must_use]
    pub fn is_constructed(&self) -> bool {
        !self.generic_arguments.is_empty()
    }

    /// The generic arguments of a constructed type, or the parameters of a definition
    #[must_use]
    pub fn type_arguments(&self) -> &[TypeRc] {
        if self.generic_arguments.is_empty() {
            &self.generic_parameters
        } else {
            &self.generic_arguments
        }
    }

    /// The generic parameters this type declares itself
    #[must_use]
    pub fn own_generic_parameters(&self) -> &[TypeRc] {
        self.generic_parameters
            .get(self.own_generic_range.clone())
            .unwrap_or_default()
    }

    /// Generic parameter information, if this type is a generic parameter
    #[must_use]
    pub fn generic_parameter(&self) -> Option<&GenericParameter> {
        match &self.kind {
            TypeKind::GenericParameter(info) => Some(info),
            _ => None,
        }
    }

    /// The wrapping and element of a decorated type
    #[must_use]
    pub fn decoration(&self) -> Option<(TypeModifier, &TypeRc)> {
        match &self.kind {
            TypeKind::Decorated { modifier, element } => Some((*modifier, element)),
            _ => None,
        }
    }

    /// Check if this is an enumeration
    #[must_use]
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum { .. })
    }

    /// Check if this is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    /// Check if this is a value type that can not hold `null`
    ///
    /// Structs and enums qualify; nullable wrappers do not. Generic parameters qualify unless
    /// constrained to reference types, since `default` is their only valid zero value.
    #[must_use]
    pub fn is_non_nullable_value_type(&self) -> bool {
        match &self.kind {
            TypeKind::Struct | TypeKind::Enum { .. } => true,
            TypeKind::GenericParameter(info) => !info
                .constraints
                .contains(GenericConstraints::REFERENCE_TYPE),
            _ => false,
        }
    }

    /// Check if this type carries a custom attribute with the given full name
    #[must_use]
    pub fn has_attribute(&self, fullname: &str) -> bool {
        self.custom_attributes
            .iter()
            .any(|(_, attribute)| attribute.is(fullname))
    }

    /// Check if this is a flags-style enumeration (`[Flags]`)
    #[must_use]
    pub fn is_flags(&self) -> bool {
        self.is_enum() && self.has_attribute("System.FlagsAttribute")
    }

    /// The `Invoke` method of a delegate type
    #[must_use]
    pub fn invoke_method(&self) -> Option<MethodRc> {
        self.methods
            .iter()
            .find(|(_, method)| method.name == "Invoke")
            .map(|(_, method)| method.clone())
    }
}

impl fmt::Debug for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocType")
            .field("id", &self.id)
            .field("fullname", &self.fullname())
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
