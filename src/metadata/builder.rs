//! Fluent builders for types and type members.
//!
//! Metadata entities are immutable once they are shared, so everything that is structural (name,
//! kind, generic parameters, declaring type) is collected by a builder first. `build()` then
//! registers the result with its owner: types with the [`TypeRegistry`], members with their
//! declaring type.
//!
//! # Examples
//!
//! ```rust
//! use dotdoc::metadata::{
//!     Accessibility, MethodBuilder, Parameter, TypeBuilder, TypeRegistry,
//! };
//!
//! let registry = TypeRegistry::new();
//! let string = registry.system("String").unwrap();
//!
//! let greeter = TypeBuilder::class(&registry, "Samples", "Greeter").build();
//! let greet = MethodBuilder::new("Greet", &string)
//!     .accessibility(Accessibility::Public)
//!     .parameter(Parameter::new("name", 0, &string))
//!     .build(&greeter);
//!
//! assert_eq!(greeter.methods.count(), 1);
//! assert_eq!(greet.declaring_type().unwrap().fullname(), "Samples.Greeter");
//! ```

use std::sync::Arc;

use crate::metadata::{
    attributes::{AttributeTarget, CustomAttribute},
    flags::{Accessibility, MemberModifiers, TypeFlags},
    members::{
        Accessor, Event, EventRc, ExtensionBlockRc, Field, FieldRc, InterfaceMember, Member,
        Method, MethodKind, MethodRc, Parameter, ParameterRc, Property, PropertyRc,
    },
    registry::TypeRegistry,
    types::{DocType, GenericParameter, TypeKind, TypeRc, TypeRef},
    values::Value,
};

fn next_position(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

fn implementation(interface: &TypeRc, member: Member) -> InterfaceMember {
    InterfaceMember {
        interface: TypeRef::new(interface),
        member,
    }
}

/// Provides a fluent API for building type definitions
pub struct TypeBuilder<'a> {
    registry: &'a TypeRegistry,
    ty: DocType,
    declaring: Option<TypeRc>,
    base: Option<TypeRc>,
    interfaces: Vec<TypeRc>,
    attributes: Vec<CustomAttribute>,
}

impl<'a> TypeBuilder<'a> {
    fn start(registry: &'a TypeRegistry, namespace: &str, name: &str, kind: TypeKind) -> Self {
        TypeBuilder {
            registry,
            ty: DocType::new(registry.next_id(), namespace, name, kind),
            declaring: None,
            base: None,
            interfaces: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Start building a class
    ///
    /// ## Arguments
    /// * 'registry'  - The registry that will own the type
    /// * 'namespace' - Namespace of the class
    /// * 'name'      - Name of the class, without generic arity suffix
    #[must_use]
    pub fn class(registry: &'a TypeRegistry, namespace: &str, name: &str) -> Self {
        Self::start(registry, namespace, name, TypeKind::Class)
    }

    /// Start building a value type
    #[must_use]
    pub fn struct_type(registry: &'a TypeRegistry, namespace: &str, name: &str) -> Self {
        Self::start(registry, namespace, name, TypeKind::Struct)
    }

    /// Start building an interface
    #[must_use]
    pub fn interface(registry: &'a TypeRegistry, namespace: &str, name: &str) -> Self {
        Self::start(registry, namespace, name, TypeKind::Interface)
    }

    /// Start building an enumeration over the given underlying integral type
    #[must_use]
    pub fn enumeration(
        registry: &'a TypeRegistry,
        namespace: &str,
        name: &str,
        underlying: &TypeRc,
    ) -> Self {
        Self::start(
            registry,
            namespace,
            name,
            TypeKind::Enum {
                underlying: underlying.clone(),
            },
        )
    }

    /// Start building a delegate; its signature is the `Invoke` method added after `build()`
    #[must_use]
    pub fn delegate(registry: &'a TypeRegistry, namespace: &str, name: &str) -> Self {
        Self::start(registry, namespace, name, TypeKind::Delegate)
    }

    /// Nest the type in `parent`, inheriting the parent's generic parameters
    ///
    /// Must be called before any own generic parameter is declared.
    #[must_use]
    pub fn nested_in(mut self, parent: &TypeRc) -> Self {
        self.ty.namespace.clear();
        self.ty.generic_parameters = parent.generic_parameters.clone();
        let inherited = self.ty.generic_parameters.len();
        self.ty.own_generic_range = inherited..inherited;
        self.declaring = Some(parent.clone());
        self
    }

    /// Declare an invariant, unconstrained generic parameter
    #[must_use]
    pub fn generic_parameter(self, name: &str) -> Self {
        self.generic_parameter_with(name, GenericParameter::type_parameter(0))
    }

    /// Declare a generic parameter with variance and special constraints
    ///
    /// The position stored in `info` is replaced by the parameter's actual position.
    #[must_use]
    pub fn generic_parameter_with(mut self, name: &str, mut info: GenericParameter) -> Self {
        info.position = self.ty.generic_parameters.len();
        info.is_method_parameter = false;
        let parameter = self.registry.generic_parameter(name, info);
        self.ty.generic_parameters.push(parameter);
        self.ty.own_generic_range.end = self.ty.generic_parameters.len();
        self
    }

    /// Set the declared accessibility
    #[must_use]
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.ty.accessibility = accessibility;
        self
    }

    /// Set the declaration modifiers
    #[must_use]
    pub fn flags(mut self, flags: TypeFlags) -> Self {
        self.ty.flags = flags;
        self
    }

    /// Set the base type, replacing the implicit `System.Object`/`ValueType`/`Enum`
    #[must_use]
    pub fn extends(mut self, base: &TypeRc) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Add an implemented interface
    #[must_use]
    pub fn implements(mut self, interface: &TypeRc) -> Self {
        self.interfaces.push(interface.clone());
        self
    }

    /// Add a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Register the type with the registry (and its declaring type, if nested)
    pub fn build(mut self) -> TypeRc {
        let own = self.ty.own_generic_range.len();
        if own > 0 {
            self.ty.name = format!("{}`{}", self.ty.name, own);
        }
        if let Some(parent) = &self.declaring {
            self.ty.declaring_type = Some(TypeRef::new(parent));
        }

        let implicit_base = match self.ty.kind {
            TypeKind::Class => self.registry.system("Object"),
            TypeKind::Struct => self.registry.system("ValueType"),
            TypeKind::Enum { .. } => self.registry.system("Enum"),
            TypeKind::Delegate => self.registry.system("MulticastDelegate"),
            _ => None,
        };

        let ty = self.registry.register(self.ty);
        if let Some(base) = self.base.or(implicit_base) {
            ty.set_base(&base);
        }
        for interface in &self.interfaces {
            ty.add_interface(interface);
        }
        for attribute in self.attributes {
            ty.add_attribute(Arc::new(attribute.with_target(AttributeTarget::Type)));
        }
        if let Some(parent) = &self.declaring {
            parent.nested_types.push(ty.clone());
        }
        ty
    }
}

/// Provides a fluent API for building fields
pub struct FieldBuilder {
    name: String,
    field_type: TypeRef,
    accessibility: Accessibility,
    modifiers: MemberModifiers,
    constant: Option<Value>,
    fixed_buffer_length: Option<u32>,
    attributes: Vec<CustomAttribute>,
}

impl FieldBuilder {
    /// Start building a field of the given type
    #[must_use]
    pub fn new(name: &str, field_type: &TypeRc) -> Self {
        FieldBuilder {
            name: name.to_string(),
            field_type: TypeRef::new(field_type),
            accessibility: Accessibility::Public,
            modifiers: MemberModifiers::empty(),
            constant: None,
            fixed_buffer_length: None,
            attributes: Vec::new(),
        }
    }

    /// Start building a member of an enumeration
    #[must_use]
    pub fn enum_member(name: &str, enumeration: &TypeRc, value: Value) -> Self {
        Self::new(name, enumeration)
            .modifiers(MemberModifiers::STATIC | MemberModifiers::CONST)
            .constant(value)
    }

    /// Set the declared accessibility
    #[must_use]
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Set the declaration modifiers
    #[must_use]
    pub fn modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Make the field a literal with the given value
    #[must_use]
    pub fn constant(mut self, value: Value) -> Self {
        self.modifiers |= MemberModifiers::CONST;
        self.constant = Some(value);
        self
    }

    /// Make the field a fixed-size buffer of `length` elements of the field type
    #[must_use]
    pub fn fixed_buffer(mut self, length: u32) -> Self {
        self.fixed_buffer_length = Some(length);
        self
    }

    /// Add a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Create the field and add it to `declaring`
    pub fn build(self, declaring: &TypeRc) -> FieldRc {
        let custom_attributes = boxcar::Vec::new();
        for attribute in self.attributes {
            custom_attributes.push(Arc::new(attribute.with_target(AttributeTarget::TypeMember)));
        }

        let field = Arc::new(Field {
            name: self.name,
            field_type: self.field_type,
            accessibility: self.accessibility,
            modifiers: self.modifiers,
            constant: self.constant,
            fixed_buffer_length: self.fixed_buffer_length,
            custom_attributes,
            declaring_type: TypeRef::new(declaring),
        });
        declaring.fields.push(field.clone());
        field
    }
}

/// Provides a fluent API for building properties and indexers
pub struct PropertyBuilder {
    name: String,
    property_type: TypeRef,
    accessibility: Accessibility,
    modifiers: MemberModifiers,
    getter: Option<Accessor>,
    setter: Option<Accessor>,
    parameters: Vec<ParameterRc>,
    implements: Option<InterfaceMember>,
    extension_block: Option<ExtensionBlockRc>,
    attributes: Vec<CustomAttribute>,
}

impl PropertyBuilder {
    /// Start building a property of the given type
    #[must_use]
    pub fn new(name: &str, property_type: &TypeRc) -> Self {
        PropertyBuilder {
            name: name.to_string(),
            property_type: TypeRef::new(property_type),
            accessibility: Accessibility::Public,
            modifiers: MemberModifiers::empty(),
            getter: None,
            setter: None,
            parameters: Vec::new(),
            implements: None,
            extension_block: None,
            attributes: Vec::new(),
        }
    }

    /// Set the declared accessibility
    #[must_use]
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Set the declaration modifiers
    #[must_use]
    pub fn modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Add a `get` accessor
    #[must_use]
    pub fn getter(mut self, accessor: Accessor) -> Self {
        self.getter = Some(accessor);
        self
    }

    /// Add a `set` (or `init`) accessor
    #[must_use]
    pub fn setter(mut self, accessor: Accessor) -> Self {
        self.setter = Some(accessor);
        self
    }

    /// Add an index parameter, turning the property into an indexer
    #[must_use]
    pub fn parameter(mut self, mut parameter: Parameter) -> Self {
        parameter.position = next_position(self.parameters.len());
        self.parameters.push(Arc::new(parameter));
        self
    }

    /// Mark the property as explicit implementation of an interface member
    #[must_use]
    pub fn implements(mut self, interface: &TypeRc, member: impl Into<Member>) -> Self {
        self.implements = Some(implementation(interface, member.into()));
        self
    }

    /// Place the property in an extension block
    #[must_use]
    pub fn extension_block(mut self, block: &ExtensionBlockRc) -> Self {
        self.extension_block = Some(block.clone());
        self
    }

    /// Add a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Create the property and add it to `declaring`
    pub fn build(self, declaring: &TypeRc) -> PropertyRc {
        let custom_attributes = boxcar::Vec::new();
        for attribute in self.attributes {
            custom_attributes.push(Arc::new(attribute.with_target(AttributeTarget::TypeMember)));
        }

        let property = Arc::new(Property {
            name: self.name,
            property_type: self.property_type,
            accessibility: self.accessibility,
            modifiers: self.modifiers,
            getter: self.getter,
            setter: self.setter,
            parameters: self.parameters,
            implements: self.implements,
            extension_block: self.extension_block,
            custom_attributes,
            declaring_type: TypeRef::new(declaring),
        });
        declaring.properties.push(property.clone());
        property
    }
}

/// Provides a fluent API for building methods, constructors and operators
pub struct MethodBuilder {
    name: String,
    kind: MethodKind,
    accessibility: Accessibility,
    modifiers: MemberModifiers,
    return_parameter: Parameter,
    parameters: Vec<ParameterRc>,
    generic_parameters: Vec<TypeRc>,
    is_extension: bool,
    implements: Option<InterfaceMember>,
    extension_block: Option<ExtensionBlockRc>,
    attributes: Vec<CustomAttribute>,
}

impl MethodBuilder {
    /// Start building an ordinary method returning `return_type`
    #[must_use]
    pub fn new(name: &str, return_type: &TypeRc) -> Self {
        MethodBuilder {
            name: name.to_string(),
            kind: MethodKind::Ordinary,
            accessibility: Accessibility::Public,
            modifiers: MemberModifiers::empty(),
            return_parameter: Parameter::return_parameter(return_type),
            parameters: Vec::new(),
            generic_parameters: Vec::new(),
            is_extension: false,
            implements: None,
            extension_block: None,
            attributes: Vec::new(),
        }
    }

    /// Start building an instance constructor
    #[must_use]
    pub fn constructor(registry: &TypeRegistry) -> Self {
        let mut builder = Self::new(".ctor", registry.void());
        builder.kind = MethodKind::Constructor;
        builder
    }

    /// Start building a static constructor (type initializer)
    #[must_use]
    pub fn static_constructor(registry: &TypeRegistry) -> Self {
        let mut builder = Self::new(".cctor", registry.void());
        builder.kind = MethodKind::Constructor;
        builder.modifiers = MemberModifiers::STATIC;
        builder
    }

    /// Start building a user-defined operator from its special name (`op_Addition`, ...)
    #[must_use]
    pub fn operator(name: &str, return_type: &TypeRc) -> Self {
        let mut builder = Self::new(name, return_type);
        builder.kind = MethodKind::Operator;
        builder.modifiers = MemberModifiers::STATIC;
        builder
    }

    /// Set the declared accessibility
    #[must_use]
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Set the declaration modifiers
    #[must_use]
    pub fn modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Append a parameter; its position is assigned from the current parameter count
    #[must_use]
    pub fn parameter(mut self, mut parameter: Parameter) -> Self {
        parameter.position = next_position(self.parameters.len());
        self.parameters.push(Arc::new(parameter));
        self
    }

    /// Declare a generic parameter created with
    /// [`TypeRegistry::generic_parameter`] and [`GenericParameter::method_parameter`]
    #[must_use]
    pub fn generic_parameter(mut self, parameter: &TypeRc) -> Self {
        self.generic_parameters.push(parameter.clone());
        self
    }

    /// Add a custom attribute to the return value
    #[must_use]
    pub fn return_attribute(mut self, attribute: CustomAttribute) -> Self {
        self.return_parameter = self.return_parameter.with_attribute(attribute);
        self
    }

    /// Mark the method as a classic (`this`-parameter) extension method
    #[must_use]
    pub fn extension(mut self) -> Self {
        self.is_extension = true;
        self.modifiers |= MemberModifiers::STATIC;
        self
    }

    /// Mark the method as explicit implementation of an interface member
    #[must_use]
    pub fn implements(mut self, interface: &TypeRc, member: impl Into<Member>) -> Self {
        self.implements = Some(implementation(interface, member.into()));
        self
    }

    /// Place the method in an extension block
    #[must_use]
    pub fn extension_block(mut self, block: &ExtensionBlockRc) -> Self {
        self.extension_block = Some(block.clone());
        self
    }

    /// Add a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Create the method and add it to `declaring`
    pub fn build(self, declaring: &TypeRc) -> MethodRc {
        let custom_attributes = boxcar::Vec::new();
        for attribute in self.attributes {
            custom_attributes.push(Arc::new(attribute.with_target(AttributeTarget::TypeMember)));
        }

        let method = Arc::new(Method {
            name: self.name,
            kind: self.kind,
            accessibility: self.accessibility,
            modifiers: self.modifiers,
            return_parameter: Arc::new(self.return_parameter),
            parameters: self.parameters,
            generic_parameters: self.generic_parameters,
            is_extension: self.is_extension,
            implements: self.implements,
            extension_block: self.extension_block,
            custom_attributes,
            declaring_type: TypeRef::new(declaring),
        });
        declaring.methods.push(method.clone());
        method
    }
}

/// Provides a fluent API for building events
pub struct EventBuilder {
    name: String,
    event_type: TypeRef,
    accessibility: Accessibility,
    modifiers: MemberModifiers,
    add: Option<Accessor>,
    remove: Option<Accessor>,
    implements: Option<InterfaceMember>,
    extension_block: Option<ExtensionBlockRc>,
    attributes: Vec<CustomAttribute>,
}

impl EventBuilder {
    /// Start building an event of the given delegate type
    #[must_use]
    pub fn new(name: &str, event_type: &TypeRc) -> Self {
        EventBuilder {
            name: name.to_string(),
            event_type: TypeRef::new(event_type),
            accessibility: Accessibility::Public,
            modifiers: MemberModifiers::empty(),
            add: None,
            remove: None,
            implements: None,
            extension_block: None,
            attributes: Vec::new(),
        }
    }

    /// Set the declared accessibility; accessors not set explicitly inherit it
    #[must_use]
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Set the declaration modifiers
    #[must_use]
    pub fn modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the `add` accessor
    #[must_use]
    pub fn add(mut self, accessor: Accessor) -> Self {
        self.add = Some(accessor);
        self
    }

    /// Set the `remove` accessor
    #[must_use]
    pub fn remove(mut self, accessor: Accessor) -> Self {
        self.remove = Some(accessor);
        self
    }

    /// Mark the event as explicit implementation of an interface member
    #[must_use]
    pub fn implements(mut self, interface: &TypeRc, member: impl Into<Member>) -> Self {
        self.implements = Some(implementation(interface, member.into()));
        self
    }

    /// Place the event in an extension block
    #[must_use]
    pub fn extension_block(mut self, block: &ExtensionBlockRc) -> Self {
        self.extension_block = Some(block.clone());
        self
    }

    /// Add a custom attribute
    #[must_use]
    pub fn attribute(mut self, attribute: CustomAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Create the event and add it to `declaring`
    pub fn build(self, declaring: &TypeRc) -> EventRc {
        let custom_attributes = boxcar::Vec::new();
        for attribute in self.attributes {
            custom_attributes.push(Arc::new(attribute.with_target(AttributeTarget::TypeMember)));
        }

        let event = Arc::new(Event {
            name: self.name,
            event_type: self.event_type,
            accessibility: self.accessibility,
            modifiers: self.modifiers,
            add: self.add.unwrap_or(Accessor::new(self.accessibility)),
            remove: self.remove.unwrap_or(Accessor::new(self.accessibility)),
            implements: self.implements,
            extension_block: self.extension_block,
            custom_attributes,
            declaring_type: TypeRef::new(declaring),
        });
        declaring.events.push(event.clone());
        event
    }
}
