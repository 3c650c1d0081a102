//! Full declarations.
//!
//! Every member kind is written in the same order: attributes, modifiers, type, name with
//! generic parameters, parameter or accessor list, generic constraints. Fields, methods,
//! constructors, operators, events and delegates end with `;`; properties end with their
//! accessor block and types with their constraints.

use log::debug;

use crate::{
    language::{
        csharp::{
            names::{ref_keyword, NameMode},
            operators::Operator,
            Writer,
        },
        NameQualifier,
    },
    metadata::{
        Accessibility, Accessor, EventRc, FieldRc, GenericConstraints, Member, MemberModifiers,
        MethodKind, MethodRc, ParameterRc, PropertyRc, TypeFlags, TypeKind, TypeModifier, TypeRc,
    },
    Error, Result,
};

/// Modifier keywords in declaration order
const MODIFIER_KEYWORDS: &[(MemberModifiers, &str)] = &[
    (MemberModifiers::NEW, "new"),
    (MemberModifiers::STATIC, "static"),
    (MemberModifiers::SEALED, "sealed"),
    (MemberModifiers::ABSTRACT, "abstract"),
    (MemberModifiers::VIRTUAL, "virtual"),
    (MemberModifiers::OVERRIDE, "override"),
    (MemberModifiers::EXTERN, "extern"),
    (MemberModifiers::REQUIRED, "required"),
    (MemberModifiers::READONLY, "readonly"),
    (MemberModifiers::VOLATILE, "volatile"),
    (MemberModifiers::CONST, "const"),
];

/// Base types every type of a kind has, which base lists leave out
const IMPLICIT_BASES: &[&str] = &[
    "System.Object",
    "System.ValueType",
    "System.Enum",
    "System.MulticastDelegate",
];

/// One entry of a `where` clause
enum Constraint {
    Keyword(&'static str),
    Type(TypeRc),
}

impl Writer<'_> {
    pub(super) fn write_definition(&mut self, member: &Member) -> Result<()> {
        match member {
            Member::Type(ty) => self.write_type_definition(ty),
            Member::Field(field) => {
                debug!("Writing field definition of {}", field.name);
                self.write_field_definition(field)
            }
            Member::Property(property) => {
                debug!("Writing property definition of {}", property.name);
                self.write_property_definition(property)
            }
            Member::Method(method) => {
                debug!("Writing {} definition of {}", member.kind_name(), method.name);
                match method.kind {
                    MethodKind::Ordinary => self.write_method_definition(method),
                    MethodKind::Constructor => self.write_constructor_definition(method),
                    MethodKind::Operator => self.write_operator_definition(method),
                }
            }
            Member::Event(event) => {
                debug!("Writing event definition of {}", event.name);
                self.write_event_definition(event)
            }
            Member::Parameter(parameter) => {
                debug!("Rejecting definition of parameter {}", parameter.name);
                Err(Error::UnsupportedMember(format!(
                    "parameter {}",
                    parameter.name
                )))
            }
        }
    }

    fn write_type_definition(&mut self, ty: &TypeRc) -> Result<()> {
        if let Some(definition) = ty.definition() {
            return self.write_type_definition(&definition);
        }

        let keyword = match &ty.kind {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum { .. } => "enum",
            TypeKind::Delegate => return self.write_delegate_definition(ty),
            TypeKind::GenericParameter(_) => {
                debug!("Rejecting definition of generic parameter {}", ty.name);
                return Err(Error::UnsupportedMember(format!(
                    "generic parameter {}",
                    ty.name
                )));
            }
            TypeKind::Decorated { .. } => {
                debug!("Rejecting definition of decorated type {}", ty.fullname());
                return Err(Error::UnsupportedMember(format!(
                    "decorated type {}",
                    ty.fullname()
                )));
            }
        };
        debug!("Writing {keyword} definition of {}", ty.fullname());

        self.write_attribute_lines(ty.custom_attributes.iter().map(|(_, attribute)| attribute))?;
        self.write_accessibility(Some(ty.accessibility))?;
        match &ty.kind {
            TypeKind::Class if ty.flags.contains(TypeFlags::STATIC) => self.text("static ")?,
            TypeKind::Class => {
                if ty.flags.contains(TypeFlags::ABSTRACT) {
                    self.text("abstract ")?;
                }
                if ty.flags.contains(TypeFlags::SEALED) {
                    self.text("sealed ")?;
                }
            }
            TypeKind::Struct => {
                if ty.flags.contains(TypeFlags::READONLY) {
                    self.text("readonly ")?;
                }
                if ty.flags.contains(TypeFlags::BY_REF_LIKE) {
                    self.text("ref ")?;
                }
            }
            _ => {}
        }
        self.text(keyword)?;
        self.text(" ")?;
        self.link_type(ty, ty.simple_name())?;
        self.write_generic_parameter_list(ty.own_generic_parameters())?;

        let mut bases = Vec::new();
        if let TypeKind::Enum { underlying } = &ty.kind {
            if underlying.fullname() != "System.Int32" {
                bases.push(underlying.clone());
            }
        } else if let Some(base) = ty.base() {
            if !IMPLICIT_BASES.contains(&base.fullname().as_str()) {
                bases.push(base);
            }
        }
        for (_, interface) in ty.interfaces.iter() {
            bases.push(interface.resolve()?);
        }
        if !bases.is_empty() {
            self.text(" : ")?;
            self.write_list(&bases, ", ", |writer, base| writer.write_type_reference(base))?;
        }

        self.write_constraints(ty.own_generic_parameters())
    }

    fn write_delegate_definition(&mut self, ty: &TypeRc) -> Result<()> {
        let invoke = ty
            .invoke_method()
            .ok_or_else(|| malformed_error!("Delegate {} has no Invoke method", ty.fullname()))?;
        debug!("Writing delegate definition of {}", ty.fullname());

        self.write_attribute_lines(ty.custom_attributes.iter().map(|(_, attribute)| attribute))?;
        self.write_attribute_lines(
            invoke
                .return_parameter
                .custom_attributes
                .iter()
                .map(|(_, attribute)| attribute),
        )?;
        self.write_accessibility(Some(ty.accessibility))?;
        self.text("delegate ")?;
        self.write_return_type(&invoke)?;
        self.text(" ")?;
        self.link_type(ty, ty.simple_name())?;
        self.write_generic_parameter_list(ty.own_generic_parameters())?;
        self.write_parameter_list("(", &invoke.parameters, ")", false)?;
        self.write_constraints(ty.own_generic_parameters())?;
        self.text(";")
    }

    fn write_field_definition(&mut self, field: &FieldRc) -> Result<()> {
        let declaring = field.declaring_type()?;
        let member = Member::Field(field.clone());
        self.write_attribute_lines(field.custom_attributes.iter().map(|(_, attribute)| attribute))?;

        if let (TypeKind::Enum { underlying }, Some(constant)) =
            (&declaring.kind, &field.constant)
        {
            self.link(&member, &field.name)?;
            self.text(" = ")?;
            return self.write_constant(constant, Some(underlying));
        }

        let mut modifiers = field.modifiers;
        if modifiers.contains(MemberModifiers::CONST) {
            modifiers.remove(MemberModifiers::STATIC);
        }
        self.write_accessibility(Some(field.accessibility))?;
        self.write_modifiers(modifiers)?;
        if field.fixed_buffer_length.is_some() {
            self.text("fixed ")?;
        }

        let field_type = field.field_type.resolve()?;
        self.write_type_reference(&field_type)?;
        self.text(" ")?;
        self.link(&member, &field.name)?;
        if let Some(length) = field.fixed_buffer_length {
            self.text(&format!("[{length}]"))?;
        }
        if let (true, Some(constant)) = (
            field.modifiers.contains(MemberModifiers::CONST),
            &field.constant,
        ) {
            self.text(" = ")?;
            self.write_constant(constant, Some(&field_type))?;
        }
        self.text(";")
    }

    fn write_property_definition(&mut self, property: &PropertyRc) -> Result<()> {
        let member = Member::Property(property.clone());
        self.write_attribute_lines(
            property
                .custom_attributes
                .iter()
                .map(|(_, attribute)| attribute),
        )?;

        let explicit = property.implements.is_some();
        self.write_accessibility((!explicit).then_some(property.accessibility))?;
        self.write_modifiers(property.modifiers)?;

        let property_type = property.property_type.resolve()?;
        self.write_type(
            &property_type,
            self.options.type_reference_qualifier,
            property_type.decoration().is_some(),
        )?;
        self.text(" ")?;
        self.write_member_name(&member, NameQualifier::None, NameMode::Declaration)?;
        if property.is_indexer() {
            self.write_parameter_list("[", &property.parameters, "]", false)?;
        }

        let visible = (!explicit).then_some(property.accessibility);
        self.text(" { ")?;
        if let Some(getter) = &property.getter {
            self.write_accessor(getter, visible, "get")?;
        }
        if let Some(setter) = &property.setter {
            self.write_accessor(setter, visible, if setter.is_init { "init" } else { "set" })?;
        }
        self.text("}")
    }

    fn write_event_definition(&mut self, event: &EventRc) -> Result<()> {
        let member = Member::Event(event.clone());
        self.write_attribute_lines(event.custom_attributes.iter().map(|(_, attribute)| attribute))?;

        let explicit = event.implements.is_some();
        self.write_accessibility((!explicit).then_some(event.accessibility))?;
        self.write_modifiers(event.modifiers)?;
        self.text("event ")?;
        let event_type = event.event_type.resolve()?;
        self.write_type_reference(&event_type)?;
        self.text(" ")?;
        self.write_member_name(&member, NameQualifier::None, NameMode::Declaration)?;

        if event.add.accessibility == event.remove.accessibility {
            return self.text(";");
        }

        let visible = (!explicit).then_some(event.accessibility);
        self.text(" { ")?;
        self.write_accessor(&event.add, visible, "add")?;
        self.write_accessor(&event.remove, visible, "remove")?;
        self.text("}")
    }

    fn write_method_definition(&mut self, method: &MethodRc) -> Result<()> {
        let member = Member::Method(method.clone());
        self.write_method_attributes(method)?;

        let explicit = method.implements.is_some();
        self.write_accessibility((!explicit).then_some(method.accessibility))?;
        self.write_modifiers(method.modifiers)?;
        if method.is_async() {
            self.text("async ")?;
        }
        self.write_return_type(method)?;
        self.text(" ")?;
        self.write_member_name(&member, NameQualifier::None, NameMode::Declaration)?;
        let this_parameter = method.is_extension && method.extension_block.is_none();
        self.write_parameter_list("(", &method.parameters, ")", this_parameter)?;
        self.write_constraints(&method.generic_parameters)?;
        self.text(";")
    }

    fn write_constructor_definition(&mut self, method: &MethodRc) -> Result<()> {
        let member = Member::Method(method.clone());
        self.write_attribute_lines(
            method
                .custom_attributes
                .iter()
                .map(|(_, attribute)| attribute),
        )?;

        if method.is_static_constructor() {
            self.text("static ")?;
        } else {
            self.write_accessibility(Some(method.accessibility))?;
            self.write_modifiers(method.modifiers & MemberModifiers::EXTERN)?;
        }
        self.write_member_name(&member, NameQualifier::None, NameMode::Declaration)?;
        self.write_parameter_list("(", &method.parameters, ")", false)?;
        self.text(";")
    }

    fn write_operator_definition(&mut self, method: &MethodRc) -> Result<()> {
        let member = Member::Method(method.clone());
        self.write_method_attributes(method)?;

        let explicit = method.implements.is_some();
        self.write_accessibility((!explicit).then_some(method.accessibility))?;
        self.write_modifiers(method.modifiers)?;

        let implemented = method
            .implements
            .as_ref()
            .and_then(|implemented| match &implemented.member {
                Member::Method(interface_method) => Some(interface_method.name.as_str()),
                _ => None,
            });
        let operator = Operator::from_method_name(implemented.unwrap_or(&method.name));
        match operator {
            Some(operator) if operator.is_conversion() => {
                self.text(operator.symbol())?;
                self.text(" ")?;
            }
            _ => {
                self.write_return_type(method)?;
                self.text(" ")?;
            }
        }

        self.write_member_name(&member, NameQualifier::None, NameMode::Declaration)?;
        self.write_parameter_list("(", &method.parameters, ")", false)?;
        self.text(";")
    }

    /// Attributes of a method and of its return value
    fn write_method_attributes(&mut self, method: &MethodRc) -> Result<()> {
        self.write_attribute_lines(
            method
                .custom_attributes
                .iter()
                .chain(method.return_parameter.custom_attributes.iter())
                .map(|(_, attribute)| attribute),
        )
    }

    /// Return types are declarative when decorated, so by-ref returns read `ref T`
    fn write_return_type(&mut self, method: &MethodRc) -> Result<()> {
        let return_type = method.return_type()?;
        let declarative = return_type.decoration().is_some();
        self.write_type(
            &return_type,
            self.options.type_reference_qualifier,
            declarative,
        )
    }

    fn write_accessibility(&mut self, accessibility: Option<Accessibility>) -> Result<()> {
        if let Some(accessibility) = accessibility {
            self.text(accessibility.keyword())?;
            self.text(" ")?;
        }
        Ok(())
    }

    fn write_modifiers(&mut self, modifiers: MemberModifiers) -> Result<()> {
        for (flag, keyword) in MODIFIER_KEYWORDS {
            if modifiers.contains(*flag) {
                self.text(keyword)?;
                self.text(" ")?;
            }
        }
        Ok(())
    }

    /// Write `get; `, `private set; ` or `readonly get; `
    ///
    /// The accessibility is shown when it differs from `visible`, the accessibility of the
    /// enclosing declaration.
    fn write_accessor(
        &mut self,
        accessor: &Accessor,
        visible: Option<Accessibility>,
        keyword: &str,
    ) -> Result<()> {
        if visible.is_some_and(|visible| visible != accessor.accessibility) {
            self.write_accessibility(Some(accessor.accessibility))?;
        }
        if accessor.is_readonly {
            self.text("readonly ")?;
        }
        self.text(keyword)?;
        self.text("; ")
    }

    /// Write a delimited parameter list, one parameter per line if there are too many
    fn write_parameter_list(
        &mut self,
        open: &str,
        parameters: &[ParameterRc],
        close: &str,
        this_parameter: bool,
    ) -> Result<()> {
        self.text(open)?;
        let separator = if parameters.len() > self.options.max_inline_parameters {
            self.text("\n\t")?;
            ",\n\t"
        } else {
            ", "
        };
        self.write_list(
            parameters.iter().enumerate(),
            separator,
            |writer, (index, parameter)| {
                writer.write_parameter_declaration(parameter, this_parameter && index == 0)
            },
        )?;
        self.text(close)
    }

    fn write_parameter_declaration(
        &mut self,
        parameter: &ParameterRc,
        is_this: bool,
    ) -> Result<()> {
        self.write_inline_attributes(&parameter.custom_attributes)?;
        if is_this {
            self.text("this ")?;
        }
        if parameter.is_params() {
            self.text("params ")?;
        }

        let parameter_type = parameter.parameter_type.resolve()?;
        if let Some(keyword) = ref_keyword(parameter, &parameter_type) {
            self.text(keyword)?;
            self.text(" ")?;
        }
        self.write_type_reference(&parameter_type)?;
        self.text(" ")?;
        self.link(&Member::Parameter(parameter.clone()), &parameter.name)?;

        if !self.options.show_default_values || !parameter.is_optional {
            return Ok(());
        }
        if let Some(default) = &parameter.default_value {
            let value_type = match parameter_type.decoration() {
                Some((TypeModifier::ByRef, element)) => element.clone(),
                _ => parameter_type.clone(),
            };
            self.text(" = ")?;
            self.write_constant(default, Some(&value_type))?;
        }
        Ok(())
    }

    /// Write one indented `where` clause per constrained generic parameter
    fn write_constraints(&mut self, parameters: &[TypeRc]) -> Result<()> {
        for parameter in parameters {
            let Some(info) = parameter.generic_parameter() else {
                continue;
            };
            if !info.is_constrained() {
                continue;
            }

            let special = info.constraints;
            let mut constraints = Vec::new();
            if special.contains(GenericConstraints::UNMANAGED) {
                constraints.push(Constraint::Keyword("unmanaged"));
            } else if special.contains(GenericConstraints::VALUE_TYPE) {
                constraints.push(Constraint::Keyword("struct"));
            } else if special.contains(GenericConstraints::REFERENCE_TYPE) {
                constraints.push(Constraint::Keyword("class"));
            } else if special.contains(GenericConstraints::NOT_NULLABLE) {
                constraints.push(Constraint::Keyword("notnull"));
            }

            let value_type = special
                .intersects(GenericConstraints::VALUE_TYPE | GenericConstraints::UNMANAGED);
            for (_, constraint) in info.constraint_types.iter() {
                let constraint = constraint.resolve()?;
                if value_type && constraint.fullname() == "System.ValueType" {
                    continue;
                }
                constraints.push(Constraint::Type(constraint));
            }

            if special.contains(GenericConstraints::DEFAULT_CONSTRUCTOR) && !value_type {
                constraints.push(Constraint::Keyword("new()"));
            }
            if special.contains(GenericConstraints::ALLOWS_BY_REF_LIKE) {
                constraints.push(Constraint::Keyword("allows ref struct"));
            }
            if constraints.is_empty() {
                continue;
            }

            self.text("\n\twhere ")?;
            self.link_type(parameter, &parameter.name)?;
            self.text(" : ")?;
            self.write_list(&constraints, ", ", |writer, constraint| match constraint {
                Constraint::Keyword(keyword) => writer.text(keyword),
                Constraint::Type(ty) => writer.write_type_reference(ty),
            })?;
        }
        Ok(())
    }
}
