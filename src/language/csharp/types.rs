//! Type references.

use crate::{
    language::{
        csharp::{keywords::system_type_alias, Writer},
        NameQualifier,
    },
    metadata::{TypeKind, TypeModifier, TypeRc, Variance},
    Result,
};

impl Writer<'_> {
    /// Write a reference to `ty`
    ///
    /// `declarative` marks a declaring position: by-ref types get a leading `ref` and generic
    /// parameters show their variance and attributes.
    pub(super) fn write_type(
        &mut self,
        ty: &TypeRc,
        qualifier: NameQualifier,
        declarative: bool,
    ) -> Result<()> {
        self.write_type_as(ty, qualifier, declarative, None)
    }

    /// Write a reference to `ty` under the global type reference qualifier
    pub(super) fn write_type_reference(&mut self, ty: &TypeRc) -> Result<()> {
        let qualifier = self.options.type_reference_qualifier;
        self.write_type(ty, qualifier, false)
    }

    /// Write a reference to `ty`, replacing its own simple name with `display_name`
    pub(super) fn write_type_as(
        &mut self,
        ty: &TypeRc,
        qualifier: NameQualifier,
        declarative: bool,
        display_name: Option<&str>,
    ) -> Result<()> {
        if self.options.simplify_system_type_names {
            if let Some(alias) = system_type_alias(ty) {
                return self.link_type(ty, alias);
            }
        }

        match &ty.kind {
            TypeKind::Decorated { .. } => self.write_decorated_type(ty, qualifier, declarative),
            TypeKind::GenericParameter(info) => {
                if declarative {
                    self.write_inline_attributes(&ty.custom_attributes)?;
                    match info.variance {
                        Variance::Covariant => self.text("out ")?,
                        Variance::Contravariant => self.text("in ")?,
                        Variance::None => {}
                    }
                }
                self.link_type(ty, &ty.name)
            }
            _ if ty.is_generic() => {
                self.write_generic_type(ty, ty.type_arguments(), qualifier, display_name)
            }
            _ => self.write_plain_type(ty, qualifier, display_name),
        }
    }

    fn write_decorated_type(
        &mut self,
        ty: &TypeRc,
        qualifier: NameQualifier,
        declarative: bool,
    ) -> Result<()> {
        let mut modifiers = Vec::new();
        let mut element = ty.clone();
        while let Some((modifier, inner)) = element.decoration() {
            let inner = inner.clone();
            modifiers.push(modifier);
            element = inner;
        }

        if declarative && modifiers.contains(&TypeModifier::ByRef) {
            self.text("ref ")?;
        }

        self.write_type(&element, qualifier, false)?;
        for modifier in modifiers.iter().rev() {
            match modifier {
                TypeModifier::Array(rank) => {
                    self.text("[")?;
                    for _ in 1..*rank {
                        self.text(",")?;
                    }
                    self.text("]")?;
                }
                TypeModifier::Pointer => self.text("*")?,
                TypeModifier::Nullable => self.text("?")?,
                TypeModifier::ByRef => {}
            }
        }
        Ok(())
    }

    /// Write a generic type with the arguments taken from `arguments`
    ///
    /// `arguments` spans all generic parameters of the innermost type; every type along the
    /// nesting chain picks its own slice of it.
    fn write_generic_type(
        &mut self,
        ty: &TypeRc,
        arguments: &[TypeRc],
        qualifier: NameQualifier,
        display_name: Option<&str>,
    ) -> Result<()> {
        match ty.resolve_declaring_type()? {
            Some(parent) if qualifier != NameQualifier::None => {
                if parent.is_generic() {
                    self.write_generic_type(&parent, arguments, qualifier, None)?;
                } else {
                    self.write_plain_type(&parent, qualifier, None)?;
                }
                self.text(".")?;
            }
            None if qualifier == NameQualifier::Full && !ty.namespace.is_empty() => {
                self.text(&ty.namespace)?;
                self.text(".")?;
            }
            _ => {}
        }

        self.link_type(ty, display_name.unwrap_or(ty.simple_name()))?;

        let own = arguments
            .get(ty.own_generic_range.clone())
            .ok_or_else(|| {
                malformed_error!(
                    "{} expects generic arguments {:?}, got {}",
                    ty.fullname(),
                    ty.own_generic_range,
                    arguments.len()
                )
            })?;
        if !own.is_empty() {
            let global = self.options.type_reference_qualifier;
            self.text("<")?;
            self.write_list(own, ", ", |writer, argument| {
                writer.write_type(argument, global, false)
            })?;
            self.text(">")?;
        }
        Ok(())
    }

    fn write_plain_type(
        &mut self,
        ty: &TypeRc,
        qualifier: NameQualifier,
        display_name: Option<&str>,
    ) -> Result<()> {
        match ty.resolve_declaring_type()? {
            Some(parent) if qualifier != NameQualifier::None => {
                self.write_type(&parent, qualifier, false)?;
                self.text(".")?;
            }
            None if qualifier == NameQualifier::Full && !ty.namespace.is_empty() => {
                self.text(&ty.namespace)?;
                self.text(".")?;
            }
            _ => {}
        }

        self.link_type(ty, display_name.unwrap_or(&ty.name))
    }

    /// Write the generic parameter list of a declaration (`<in T, out U>`), if there is one
    pub(super) fn write_generic_parameter_list(&mut self, parameters: &[TypeRc]) -> Result<()> {
        if parameters.is_empty() {
            return Ok(());
        }

        self.text("<")?;
        self.write_list(parameters, ", ", |writer, parameter| {
            writer.write_type(parameter, NameQualifier::None, true)
        })?;
        self.text(">")
    }
}
