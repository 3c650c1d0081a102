//! Member names and signatures.
//!
//! A member's display name depends on how it is referenced. Explicit interface implementations
//! are named after the interface member they implement, constructors after their declaring type
//! and indexers after a configurable alias. Members of a generic extension block carry the block
//! between their declaring type and their own name.

use crate::{
    language::{
        csharp::{operators::Operator, Writer},
        NameQualifier,
    },
    metadata::{ExtensionBlock, Member, MethodKind, MethodRc, Parameter, TypeModifier, TypeRc},
    Result,
};

/// The context a member name is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NameMode {
    /// A reference in running text (`Item[]`)
    Reference,
    /// A reference followed by parameter types (`Item[int]`)
    Signature,
    /// A declaration (`this[int index]`, `Convert<[Attr] T>`)
    Declaration,
}

/// The `ref`-family keyword a parameter is declared with, if any
///
/// A by-ref parameter type without an explicit kind is a plain `ref`.
pub(super) fn ref_keyword(parameter: &Parameter, parameter_type: &TypeRc) -> Option<&'static str> {
    parameter.ref_kind.keyword().or_else(|| {
        parameter_type
            .decoration()
            .filter(|(modifier, _)| *modifier == TypeModifier::ByRef)
            .map(|_| "ref")
    })
}

impl Writer<'_> {
    pub(super) fn write_name(&mut self, member: &Member, qualifier: NameQualifier) -> Result<()> {
        self.write_member_name(member, qualifier, NameMode::Reference)
    }

    pub(super) fn write_signature(
        &mut self,
        member: &Member,
        qualifier: NameQualifier,
    ) -> Result<()> {
        self.write_member_name(member, qualifier, NameMode::Signature)?;
        match member {
            Member::Method(method) => {
                self.text("(")?;
                self.write_list(&method.parameters, ", ", |writer, parameter| {
                    writer.write_parameter_type(parameter)
                })?;
                self.text(")")
            }
            Member::Property(property) if property.is_indexer() => {
                self.text("[")?;
                self.write_list(&property.parameters, ", ", |writer, parameter| {
                    writer.write_parameter_type(parameter)
                })?;
                self.text("]")
            }
            _ => Ok(()),
        }
    }

    fn write_parameter_type(&mut self, parameter: &Parameter) -> Result<()> {
        let parameter_type = parameter.parameter_type.resolve()?;
        if let Some(keyword) = ref_keyword(parameter, &parameter_type) {
            self.text(keyword)?;
            self.text(" ")?;
        }
        self.write_type_reference(&parameter_type)
    }

    /// Write the name of any member
    pub(super) fn write_member_name(
        &mut self,
        member: &Member,
        qualifier: NameQualifier,
        mode: NameMode,
    ) -> Result<()> {
        let declaring = match member {
            Member::Type(ty) => return self.write_type(ty, qualifier, false),
            Member::Parameter(parameter) => return self.link(member, &parameter.name),
            _ => member.declaring_type()?.ok_or_else(|| {
                malformed_error!("{} {} has no declaring type", member.kind_name(), member.name())
            })?,
        };

        if let Some(implemented) = member.implements() {
            let interface = implemented.interface.resolve()?;
            let interface_qualifier = if qualifier == NameQualifier::None {
                if self.options.fully_qualify_explicit_interface_member_names {
                    NameQualifier::Full
                } else {
                    NameQualifier::DeclaringType
                }
            } else {
                self.write_type(&declaring, qualifier, false)?;
                self.text(".")?;
                NameQualifier::Full
            };

            self.write_type(&interface, interface_qualifier, false)?;
            self.text(".")?;
            return self.write_bare_name(&implemented.member, member, mode);
        }

        let is_constructor =
            matches!(member, Member::Method(method) if method.kind == MethodKind::Constructor);

        if qualifier != NameQualifier::None {
            self.write_type(&declaring, qualifier, false)?;
            if let Some(block) = member.extension_block().filter(|block| block.is_generic()) {
                self.text(".")?;
                self.write_extension_block(block)?;
            }
            if is_constructor {
                return Ok(());
            }
            self.text(".")?;
        } else if is_constructor {
            return if mode == NameMode::Declaration {
                self.link(member, declaring.simple_name())
            } else {
                self.write_type(&declaring, NameQualifier::None, false)
            };
        }

        self.write_bare_name(member, member, mode)
    }

    /// Write `named`'s own name, with the generic parameters of `declared`
    ///
    /// The two differ for explicit interface implementations, which take their name from the
    /// interface member.
    fn write_bare_name(&mut self, named: &Member, declared: &Member, mode: NameMode) -> Result<()> {
        match named {
            Member::Property(property) if property.is_indexer() => {
                let name = match mode {
                    NameMode::Reference => format!("{}[]", self.options.indexer_display_name),
                    NameMode::Signature => self.options.indexer_display_name.clone(),
                    NameMode::Declaration => self.options.indexer_declaration_name.clone(),
                };
                self.link(declared, &name)
            }
            Member::Method(method) if method.kind == MethodKind::Operator => {
                self.write_operator_name(method, declared, mode)
            }
            _ => {
                self.link(declared, named.name())?;
                if let Member::Method(method) = declared {
                    if mode == NameMode::Declaration {
                        self.write_generic_parameter_list(&method.generic_parameters)?;
                    } else if !method.generic_parameters.is_empty() {
                        self.text("<")?;
                        self.write_list(&method.generic_parameters, ", ", |writer, parameter| {
                            writer.write_type(parameter, NameQualifier::None, false)
                        })?;
                        self.text(">")?;
                    }
                }
                Ok(())
            }
        }
    }

    /// Write `operator +`, `operator checked -` or `explicit operator decimal`
    ///
    /// Declarations write the conversion keyword themselves, ahead of an explicit interface
    /// qualification, so it is left out in [`NameMode::Declaration`].
    fn write_operator_name(
        &mut self,
        method: &MethodRc,
        declared: &Member,
        mode: NameMode,
    ) -> Result<()> {
        let Some(operator) = Operator::from_method_name(&method.name) else {
            return self.link(declared, &method.name);
        };
        let checked = if operator.is_checked() { "checked " } else { "" };

        if operator.is_conversion() {
            let name = if mode == NameMode::Declaration {
                format!("operator {checked}")
            } else {
                format!("{} operator {checked}", operator.symbol())
            };
            self.link(declared, name.trim_end())?;
            self.text(" ")?;
            let return_type = match declared {
                Member::Method(implementation) => implementation.return_type()?,
                _ => method.return_type()?,
            };
            self.write_type_reference(&return_type)
        } else {
            self.link(declared, &format!("operator {checked}{}", operator.symbol()))
        }
    }

    /// Write `extension<T>(Receiver)`
    fn write_extension_block(&mut self, block: &ExtensionBlock) -> Result<()> {
        self.text("extension")?;
        if block.is_generic() {
            self.text("<")?;
            self.write_list(&block.generic_parameters, ", ", |writer, parameter| {
                writer.write_type(parameter, NameQualifier::None, false)
            })?;
            self.text(">")?;
        }
        self.text("(")?;
        let receiver = block.receiver.parameter_type.resolve()?;
        self.write_type_reference(&receiver)?;
        self.text(")")
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use crate::{
        language::{
            csharp::{CSharp, CodeStyleOptions},
            Language, NameQualifier,
        },
        metadata::Member,
        test::SampleLibrary,
    };

    #[test]
    fn generic_method_signature() {
        let library = SampleLibrary::new();
        let csharp = CSharp::default();
        let convert = Member::Method(library.convert.clone());

        assert_eq!(
            csharp
                .format_signature(&convert, NameQualifier::DeclaringType)
                .unwrap(),
            "Box.Convert<T>(string)"
        );
        assert_eq!(
            csharp.format_name(&convert, NameQualifier::Full).unwrap(),
            "Samples.Box.Convert<T>"
        );
    }

    #[test]
    fn explicit_interface_property() {
        let library = SampleLibrary::new();
        let value = Member::Property(library.foo_value.clone());

        let csharp = CSharp::default();
        assert_eq!(
            csharp.format_name(&value, NameQualifier::None).unwrap(),
            "IComparable.Value"
        );
        assert_eq!(
            csharp.format_name(&value, NameQualifier::DeclaringType).unwrap(),
            "Foo.System.IComparable.Value"
        );

        let qualified = CSharp::new(CodeStyleOptions {
            fully_qualify_explicit_interface_member_names: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            qualified.format_name(&value, NameQualifier::None).unwrap(),
            "System.IComparable.Value"
        );
    }

    #[test]
    fn indexer_names() {
        let library = SampleLibrary::new();
        let csharp = CSharp::default();
        let indexer = Member::Property(library.indexer.clone());

        assert_eq!(csharp.format_name(&indexer, NameQualifier::None).unwrap(), "Item[]");
        assert_eq!(
            csharp
                .format_signature(&indexer, NameQualifier::DeclaringType)
                .unwrap(),
            "Box.Item[int]"
        );
        assert!(csharp
            .format_definition(&indexer)
            .unwrap()
            .contains("this[int index]"));
    }

    #[test]
    fn constructors_are_named_after_their_type() {
        let library = SampleLibrary::new();
        let csharp = CSharp::default();
        let constructor = Member::Method(library.box_constructor.clone());

        assert_eq!(csharp.format_name(&constructor, NameQualifier::None).unwrap(), "Box");
        assert_eq!(
            csharp.format_signature(&constructor, NameQualifier::Full).unwrap(),
            "Samples.Box(int)"
        );
    }

    #[test]
    fn operator_names() {
        let library = SampleLibrary::new();
        let csharp = CSharp::default();

        assert_eq!(
            csharp
                .format_signature(
                    &Member::Method(library.money_add.clone()),
                    NameQualifier::DeclaringType
                )
                .unwrap(),
            "Money.operator +(Money, Money)"
        );
        assert_eq!(
            csharp
                .format_signature(
                    &Member::Method(library.money_to_decimal.clone()),
                    NameQualifier::DeclaringType
                )
                .unwrap(),
            "Money.explicit operator decimal(Money)"
        );
    }

    #[test]
    fn generic_extension_block_members() {
        let library = SampleLibrary::new();
        let csharp = CSharp::default();
        let is_empty = Member::Property(library.extension_is_empty.clone());

        assert_eq!(csharp.format_name(&is_empty, NameQualifier::None).unwrap(), "IsEmpty");
        assert_eq!(
            csharp
                .format_name(&is_empty, NameQualifier::DeclaringType)
                .unwrap(),
            "Enumerable.extension<T>(IEnumerable<T>).IsEmpty"
        );
    }

    #[test]
    fn qualifier_monotonicity() {
        let library = SampleLibrary::new();
        let csharp = CSharp::default();

        for member in library.members() {
            if member.implements().is_some() {
                continue;
            }

            let names: Vec<String> = NameQualifier::iter()
                .map(|qualifier| csharp.format_name(&member, qualifier).unwrap())
                .collect();
            assert!(names[1].ends_with(&names[0]), "{names:?}");
            assert!(names[2].ends_with(&names[1]), "{names:?}");
        }
    }
}
