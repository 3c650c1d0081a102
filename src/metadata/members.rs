//! Type members: fields, properties, methods (including constructors and operators), events
//! and parameters, plus the [`Member`] union the formatter dispatches on.
//!
//! Every type member is declared by exactly one type, which it references weakly; the declaring
//! type owns the member through its member lists.

use std::{fmt, sync::Arc};

use crate::{
    metadata::{
        attributes::{AttributeTarget, CustomAttributeRc},
        flags::{Accessibility, MemberModifiers, RefKind},
        types::{TypeRc, TypeRef},
        values::Value,
    },
    Result,
};

/// A reference-counted pointer to a `Field`
pub type FieldRc = Arc<Field>;
/// A reference-counted pointer to a `Property`
pub type PropertyRc = Arc<Property>;
/// A reference-counted pointer to a `Method`
pub type MethodRc = Arc<Method>;
/// A reference-counted pointer to an `Event`
pub type EventRc = Arc<Event>;
/// A reference-counted pointer to a `Parameter`
pub type ParameterRc = Arc<Parameter>;
/// A reference-counted pointer to an `ExtensionBlock`
pub type ExtensionBlockRc = Arc<ExtensionBlock>;

/// A parameter of a method or indexer, or the return parameter of a method
pub struct Parameter {
    /// Parameter name (empty for the return parameter)
    pub name: String,
    /// Zero-based position, `-1` for the return parameter
    pub position: i32,
    /// Declared type
    pub parameter_type: TypeRef,
    /// How the argument is passed
    pub ref_kind: RefKind,
    /// Whether the argument may be omitted
    pub is_optional: bool,
    /// Default value of an optional parameter
    pub default_value: Option<Value>,
    /// All custom attributes this parameter has
    pub custom_attributes: boxcar::Vec<CustomAttributeRc>,
}

impl Parameter {
    /// Create a by-value parameter
    #[must_use]
    pub fn new(name: &str, position: i32, parameter_type: &TypeRc) -> Self {
        Parameter {
            name: name.to_string(),
            position,
            parameter_type: TypeRef::new(parameter_type),
            ref_kind: RefKind::None,
            is_optional: false,
            default_value: None,
            custom_attributes: boxcar::Vec::new(),
        }
    }

    /// Create the return parameter of a method
    #[must_use]
    pub fn return_parameter(return_type: &TypeRc) -> Self {
        Self::new("", -1, return_type)
    }

    /// Set how the argument is passed
    #[must_use]
    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    /// Make the parameter optional with the given default
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.is_optional = true;
        self.default_value = Some(value);
        self
    }

    /// Attach a custom attribute; its target is derived from the parameter position
    #[must_use]
    pub fn with_attribute(self, attribute: crate::metadata::CustomAttribute) -> Self {
        let target = if self.is_return() {
            AttributeTarget::ReturnParameter
        } else {
            AttributeTarget::Parameter
        };
        self.custom_attributes
            .push(Arc::new(attribute.with_target(target)));
        self
    }

    /// Check if this is the return parameter
    #[must_use]
    pub fn is_return(&self) -> bool {
        self.position < 0
    }

    /// Check if this is a parameter array (`params`)
    #[must_use]
    pub fn is_params(&self) -> bool {
        self.custom_attributes
            .iter()
            .any(|(_, attribute)| attribute.is("System.ParamArrayAttribute"))
    }
}

/// Accessibility and shape of a property or event accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accessor {
    /// Declared accessibility of the accessor
    pub accessibility: Accessibility,
    /// The setter is an `init` accessor
    pub is_init: bool,
    /// The accessor is `readonly` (struct members)
    pub is_readonly: bool,
}

impl Accessor {
    /// A plain accessor with the given accessibility
    #[must_use]
    pub fn new(accessibility: Accessibility) -> Self {
        Accessor {
            accessibility,
            is_init: false,
            is_readonly: false,
        }
    }

    /// An `init` setter with the given accessibility
    #[must_use]
    pub fn init(accessibility: Accessibility) -> Self {
        Accessor {
            is_init: true,
            ..Self::new(accessibility)
        }
    }
}

/// The interface member an explicit interface implementation stands for
#[derive(Clone)]
pub struct InterfaceMember {
    /// The (possibly constructed) interface type
    pub interface: TypeRef,
    /// The implemented member, declared by the interface
    pub member: Member,
}

/// A grouping of extension members sharing one receiver parameter
pub struct ExtensionBlock {
    /// Generic parameters declared by the block
    pub generic_parameters: Vec<TypeRc>,
    /// The receiver parameter
    pub receiver: ParameterRc,
}

impl ExtensionBlock {
    /// Create a block extending the given receiver
    #[must_use]
    pub fn new(generic_parameters: Vec<TypeRc>, receiver: Parameter) -> Self {
        ExtensionBlock {
            generic_parameters,
            receiver: Arc::new(receiver),
        }
    }

    /// Check if the block declares generic parameters
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.generic_parameters.is_empty()
    }
}

/// A field
pub struct Field {
    /// Field name
    pub name: String,
    /// Declared type
    pub field_type: TypeRef,
    /// Declared accessibility
    pub accessibility: Accessibility,
    /// Declaration modifiers
    pub modifiers: MemberModifiers,
    /// Value of a literal (`const`) field
    pub constant: Option<Value>,
    /// Length of a fixed-size buffer, with `field_type` as the buffer element
    pub fixed_buffer_length: Option<u32>,
    /// All custom attributes this field has
    pub custom_attributes: boxcar::Vec<CustomAttributeRc>,
    pub(crate) declaring_type: TypeRef,
}

impl Field {
    /// The type declaring this field
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type has been dropped.
    pub fn declaring_type(&self) -> Result<TypeRc> {
        self.declaring_type.resolve()
    }

    /// Check if this field is a member of an enumeration
    #[must_use]
    pub fn is_enum_member(&self) -> bool {
        self.constant.is_some()
            && self
                .declaring_type
                .upgrade()
                .is_some_and(|declaring| declaring.is_enum())
    }
}

/// A property or indexer
pub struct Property {
    /// Property name
    pub name: String,
    /// Declared type
    pub property_type: TypeRef,
    /// Declared accessibility (the most accessible accessor)
    pub accessibility: Accessibility,
    /// Declaration modifiers
    pub modifiers: MemberModifiers,
    /// The `get` accessor, if any
    pub getter: Option<Accessor>,
    /// The `set` or `init` accessor, if any
    pub setter: Option<Accessor>,
    /// Index parameters (empty for plain properties)
    pub parameters: Vec<ParameterRc>,
    /// Interface member this property explicitly implements
    pub implements: Option<InterfaceMember>,
    /// Extension block this property belongs to
    pub extension_block: Option<ExtensionBlockRc>,
    /// All custom attributes this property has
    pub custom_attributes: boxcar::Vec<CustomAttributeRc>,
    pub(crate) declaring_type: TypeRef,
}

impl Property {
    /// The type declaring this property
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type has been dropped.
    pub fn declaring_type(&self) -> Result<TypeRc> {
        self.declaring_type.resolve()
    }

    /// Check if this property is an indexer
    #[must_use]
    pub fn is_indexer(&self) -> bool {
        !self.parameters.is_empty()
    }
}

/// What a method is, syntactically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodKind {
    /// An ordinary method
    #[default]
    Ordinary,
    /// An instance or static constructor
    Constructor,
    /// A user-defined operator or conversion (`op_*` special name)
    Operator,
}

/// A method, constructor or operator
pub struct Method {
    /// Metadata name (`.ctor`, `op_Addition`, ...)
    pub name: String,
    /// What the method is, syntactically
    pub kind: MethodKind,
    /// Declared accessibility
    pub accessibility: Accessibility,
    /// Declaration modifiers
    pub modifiers: MemberModifiers,
    /// The return parameter, holding the return type and return attributes
    pub return_parameter: ParameterRc,
    /// Parameters in declaration order
    pub parameters: Vec<ParameterRc>,
    /// Generic parameters declared by the method
    pub generic_parameters: Vec<TypeRc>,
    /// The method is a classic extension method (first parameter is `this`)
    pub is_extension: bool,
    /// Interface member this method explicitly implements
    pub implements: Option<InterfaceMember>,
    /// Extension block this method belongs to
    pub extension_block: Option<ExtensionBlockRc>,
    /// All custom attributes this method has
    pub custom_attributes: boxcar::Vec<CustomAttributeRc>,
    pub(crate) declaring_type: TypeRef,
}

impl Method {
    /// The type declaring this method
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type has been dropped.
    pub fn declaring_type(&self) -> Result<TypeRc> {
        self.declaring_type.resolve()
    }

    /// The declared return type
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the return type has been dropped.
    pub fn return_type(&self) -> Result<TypeRc> {
        self.return_parameter.parameter_type.resolve()
    }

    /// Check if this is a static constructor
    #[must_use]
    pub fn is_static_constructor(&self) -> bool {
        self.kind == MethodKind::Constructor && self.modifiers.contains(MemberModifiers::STATIC)
    }

    /// Check if the compiler generated a state machine for this method (`async`)
    #[must_use]
    pub fn is_async(&self) -> bool {
        self.custom_attributes.iter().any(|(_, attribute)| {
            attribute.is("System.Runtime.CompilerServices.AsyncStateMachineAttribute")
        })
    }
}

/// An event
pub struct Event {
    /// Event name
    pub name: String,
    /// Delegate type of the event
    pub event_type: TypeRef,
    /// Declared accessibility (the most accessible accessor)
    pub accessibility: Accessibility,
    /// Declaration modifiers
    pub modifiers: MemberModifiers,
    /// The `add` accessor
    pub add: Accessor,
    /// The `remove` accessor
    pub remove: Accessor,
    /// Interface member this event explicitly implements
    pub implements: Option<InterfaceMember>,
    /// Extension block this event belongs to
    pub extension_block: Option<ExtensionBlockRc>,
    /// All custom attributes this event has
    pub custom_attributes: boxcar::Vec<CustomAttributeRc>,
    pub(crate) declaring_type: TypeRef,
}

impl Event {
    /// The type declaring this event
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type has been dropped.
    pub fn declaring_type(&self) -> Result<TypeRc> {
        self.declaring_type.resolve()
    }
}

/// Any formattable entity
///
/// Cloning is cheap; every variant holds a reference-counted pointer.
#[derive(Clone)]
pub enum Member {
    /// A type of any shape
    Type(TypeRc),
    /// A field
    Field(FieldRc),
    /// A property or indexer
    Property(PropertyRc),
    /// A method, constructor or operator
    Method(MethodRc),
    /// An event
    Event(EventRc),
    /// A parameter
    Parameter(ParameterRc),
}

impl Member {
    /// The metadata name of the member
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Member::Type(ty) => &ty.name,
            Member::Field(field) => &field.name,
            Member::Property(property) => &property.name,
            Member::Method(method) => &method.name,
            Member::Event(event) => &event.name,
            Member::Parameter(parameter) => &parameter.name,
        }
    }

    /// A short description of the member kind, for diagnostics
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Member::Type(_) => "type",
            Member::Field(_) => "field",
            Member::Property(_) => "property",
            Member::Method(method) => match method.kind {
                MethodKind::Ordinary => "method",
                MethodKind::Constructor => "constructor",
                MethodKind::Operator => "operator",
            },
            Member::Event(_) => "event",
            Member::Parameter(_) => "parameter",
        }
    }

    /// The type declaring this member
    ///
    /// Top-level types and parameters have none.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the declaring type has been dropped.
    pub fn declaring_type(&self) -> Result<Option<TypeRc>> {
        match self {
            Member::Type(ty) => ty.resolve_declaring_type(),
            Member::Field(field) => field.declaring_type().map(Some),
            Member::Property(property) => property.declaring_type().map(Some),
            Member::Method(method) => method.declaring_type().map(Some),
            Member::Event(event) => event.declaring_type().map(Some),
            Member::Parameter(_) => Ok(None),
        }
    }

    /// The interface member this member explicitly implements
    #[must_use]
    pub fn implements(&self) -> Option<&InterfaceMember> {
        match self {
            Member::Property(property) => property.implements.as_ref(),
            Member::Method(method) => method.implements.as_ref(),
            Member::Event(event) => event.implements.as_ref(),
            _ => None,
        }
    }

    /// The extension block this member belongs to
    #[must_use]
    pub fn extension_block(&self) -> Option<&ExtensionBlockRc> {
        match self {
            Member::Property(property) => property.extension_block.as_ref(),
            Member::Method(method) => method.extension_block.as_ref(),
            Member::Event(event) => event.extension_block.as_ref(),
            _ => None,
        }
    }

    /// The explicit custom attributes of this member
    #[must_use]
    pub fn custom_attributes(&self) -> &boxcar::Vec<CustomAttributeRc> {
        match self {
            Member::Type(ty) => &ty.custom_attributes,
            Member::Field(field) => &field.custom_attributes,
            Member::Property(property) => &property.custom_attributes,
            Member::Method(method) => &method.custom_attributes,
            Member::Event(event) => &event.custom_attributes,
            Member::Parameter(parameter) => &parameter.custom_attributes,
        }
    }

    /// Check if two handles point at the same member
    #[must_use]
    pub fn same_as(&self, other: &Member) -> bool {
        match (self, other) {
            (Member::Type(a), Member::Type(b)) => Arc::ptr_eq(a, b),
            (Member::Field(a), Member::Field(b)) => Arc::ptr_eq(a, b),
            (Member::Property(a), Member::Property(b)) => Arc::ptr_eq(a, b),
            (Member::Method(a), Member::Method(b)) => Arc::ptr_eq(a, b),
            (Member::Event(a), Member::Event(b)) => Arc::ptr_eq(a, b),
            (Member::Parameter(a), Member::Parameter(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Member::{}({})", self.kind_name(), self.name())
    }
}

impl From<TypeRc> for Member {
    fn from(ty: TypeRc) -> Self {
        Member::Type(ty)
    }
}

impl From<FieldRc> for Member {
    fn from(field: FieldRc) -> Self {
        Member::Field(field)
    }
}

impl From<PropertyRc> for Member {
    fn from(property: PropertyRc) -> Self {
        Member::Property(property)
    }
}

impl From<MethodRc> for Member {
    fn from(method: MethodRc) -> Self {
        Member::Method(method)
    }
}

impl From<EventRc> for Member {
    fn from(event: EventRc) -> Self {
        Member::Event(event)
    }
}

impl From<ParameterRc> for Member {
    fn from(parameter: ParameterRc) -> Self {
        Member::Parameter(parameter)
    }
}
