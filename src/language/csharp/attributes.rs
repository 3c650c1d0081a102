//! Attribute applications and the attribute filter.

use log::trace;
use regex::RegexSet;

use crate::{
    language::{
        csharp::{CodeStyleOptions, Writer},
        NameQualifier,
    },
    metadata::{
        AttributeTarget, AttributeTargets, CustomAttribute, CustomAttributeRc, Member,
        NamedArgument, TypeRc,
    },
    Result,
};

const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Decides which attributes definitions leave out
///
/// Compiled once from [`CodeStyleOptions::hidden_attribute_targets`] and
/// [`CodeStyleOptions::hidden_attribute_patterns`].
#[derive(Debug, Clone)]
pub struct AttributeFilter {
    targets: AttributeTargets,
    patterns: RegexSet,
}

impl AttributeFilter {
    /// Compile the filter described by `options`
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidPattern`] if the patterns do not compile.
    pub fn new(options: &CodeStyleOptions) -> Result<Self> {
        let patterns = RegexSet::new(
            options
                .hidden_attribute_patterns
                .iter()
                .map(|pattern| wildcard_to_regex(pattern)),
        )?;

        Ok(AttributeFilter {
            targets: options.hidden_attribute_targets,
            patterns,
        })
    }

    /// A filter hiding attributes by target only
    #[must_use]
    pub fn by_target(targets: AttributeTargets) -> Self {
        AttributeFilter {
            targets,
            patterns: RegexSet::empty(),
        }
    }

    /// Check if `attribute` is left out of definitions
    #[must_use]
    pub fn is_hidden(&self, attribute: &CustomAttribute) -> bool {
        if self.targets.contains(attribute.target.flag()) {
            trace!("Hiding attribute applied to {:?}", attribute.target);
            return true;
        }

        let Some(attribute_type) = attribute.attribute_type.upgrade() else {
            return false;
        };
        let fullname = attribute_type.fullname();
        if self.patterns.is_match(&fullname) {
            trace!("Hiding attribute {fullname}");
            return true;
        }
        false
    }
}

/// Translate a wildcard pattern (`*`, `?`) into an anchored regular expression
fn wildcard_to_regex(pattern: &str) -> String {
    let mut expression = String::with_capacity(pattern.len() + 8);
    expression.push('^');
    for c in pattern.chars() {
        match c {
            '*' => expression.push_str(".*"),
            '?' => expression.push('.'),
            other => expression.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    expression.push('$');
    expression
}

impl Writer<'_> {
    /// Write `[Name(arguments)]`
    pub(super) fn write_attribute(
        &mut self,
        attribute: &CustomAttribute,
        qualifier: NameQualifier,
    ) -> Result<()> {
        self.text("[")?;
        match attribute.target {
            AttributeTarget::Assembly => self.text("assembly: ")?,
            AttributeTarget::ReturnParameter => self.text("return: ")?,
            _ => {}
        }

        let attribute_type = attribute.attribute_type.resolve()?;
        let name = attribute_type.simple_name();
        let display_name = name
            .strip_suffix(ATTRIBUTE_SUFFIX)
            .filter(|stripped| !stripped.is_empty());
        self.write_type_as(&attribute_type, qualifier, false, display_name)?;

        if attribute.has_arguments() {
            self.text("(")?;
            self.write_list(&attribute.constructor_arguments, ", ", |writer, argument| {
                let value_type = argument.value_type.upgrade();
                writer.write_constant(&argument.value, value_type.as_ref())
            })?;
            if !attribute.constructor_arguments.is_empty() && !attribute.named_arguments.is_empty()
            {
                self.text(", ")?;
            }
            self.write_list(&attribute.named_arguments, ", ", |writer, argument| {
                writer.write_named_argument_name(&attribute_type, argument)?;
                writer.text(" = ")?;
                let value_type = argument.value.value_type.upgrade();
                writer.write_constant(&argument.value.value, value_type.as_ref())
            })?;
            self.text(")")?;
        }
        self.text("]")
    }

    /// Write the field or property a named argument assigns
    ///
    /// Names the attribute type does not declare have nothing to link to and are written as text.
    fn write_named_argument_name(
        &mut self,
        attribute_type: &TypeRc,
        argument: &NamedArgument,
    ) -> Result<()> {
        let assigned = if argument.is_field {
            attribute_type
                .fields
                .iter()
                .find(|(_, field)| field.name == argument.name)
                .map(|(_, field)| Member::Field(field.clone()))
        } else {
            attribute_type
                .properties
                .iter()
                .find(|(_, property)| property.name == argument.name)
                .map(|(_, property)| Member::Property(property.clone()))
        };

        match assigned {
            Some(member) => self.link(&member, &argument.name),
            None => self.text(&argument.name),
        }
    }

    /// Write the visible attributes of a declaration, one per line
    pub(super) fn write_attribute_lines<'a>(
        &mut self,
        attributes: impl IntoIterator<Item = &'a CustomAttributeRc>,
    ) -> Result<()> {
        let qualifier = self.options.type_reference_qualifier;
        for attribute in attributes {
            if self.filter.is_hidden(attribute) {
                continue;
            }
            self.write_attribute(attribute, qualifier)?;
            self.text("\n")?;
        }
        Ok(())
    }

    /// Write the visible attributes of a parameter or generic parameter, inline
    pub(super) fn write_inline_attributes(
        &mut self,
        attributes: &boxcar::Vec<CustomAttributeRc>,
    ) -> Result<()> {
        let qualifier = self.options.type_reference_qualifier;
        for (_, attribute) in attributes.iter() {
            if self.filter.is_hidden(attribute) {
                continue;
            }
            self.write_attribute(attribute, qualifier)?;
            self.text(" ")?;
        }
        Ok(())
    }
}
