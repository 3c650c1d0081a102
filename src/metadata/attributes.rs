//! Custom attribute applications.
//!
//! An attribute application records the attribute type, the constructor arguments and the
//! named (field or property) arguments, together with the kind of element it was applied to.
//! The target matters for rendering: return-value attributes are written as `[return: ...]`,
//! and style options can hide attributes per target kind.

use std::sync::Arc;

use bitflags::bitflags;

use crate::metadata::{
    types::{TypeRc, TypeRef},
    values::{TypedValue, Value},
};

/// A reference-counted pointer to a `CustomAttribute`
pub type CustomAttributeRc = Arc<CustomAttribute>;

/// The kind of element an attribute is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttributeTarget {
    /// The assembly itself
    Assembly,
    /// A type definition
    Type,
    /// A field, property, method or event
    #[default]
    TypeMember,
    /// A generic parameter
    TypeParameter,
    /// A method or indexer parameter
    Parameter,
    /// The return value of a method
    ReturnParameter,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// A set of [`AttributeTarget`] kinds
    pub struct AttributeTargets: u8 {
        /// [`AttributeTarget::Assembly`]
        const ASSEMBLY = 0x01;
        /// [`AttributeTarget::Type`]
        const TYPE = 0x02;
        /// [`AttributeTarget::TypeMember`]
        const TYPE_MEMBER = 0x04;
        /// [`AttributeTarget::TypeParameter`]
        const TYPE_PARAMETER = 0x08;
        /// [`AttributeTarget::Parameter`]
        const PARAMETER = 0x10;
        /// [`AttributeTarget::ReturnParameter`]
        const RETURN_PARAMETER = 0x20;
    }
}

impl AttributeTarget {
    /// The single-bit set holding this target
    #[must_use]
    pub fn flag(self) -> AttributeTargets {
        match self {
            AttributeTarget::Assembly => AttributeTargets::ASSEMBLY,
            AttributeTarget::Type => AttributeTargets::TYPE,
            AttributeTarget::TypeMember => AttributeTargets::TYPE_MEMBER,
            AttributeTarget::TypeParameter => AttributeTargets::TYPE_PARAMETER,
            AttributeTarget::Parameter => AttributeTargets::PARAMETER,
            AttributeTarget::ReturnParameter => AttributeTargets::RETURN_PARAMETER,
        }
    }
}

/// A named argument (field or property assignment) of an attribute application
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArgument {
    /// Name of the field or property
    pub name: String,
    /// Whether this is a field (true) or property (false)
    pub is_field: bool,
    /// The assigned value
    pub value: TypedValue,
}

/// One application of a custom attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAttribute {
    /// The attribute class
    pub attribute_type: TypeRef,
    /// What the attribute was applied to
    pub target: AttributeTarget,
    /// Positional constructor arguments
    pub constructor_arguments: Vec<TypedValue>,
    /// Field and property assignments
    pub named_arguments: Vec<NamedArgument>,
}

impl CustomAttribute {
    /// Create an attribute application without arguments
    #[must_use]
    pub fn new(attribute_type: &TypeRc) -> Self {
        CustomAttribute {
            attribute_type: TypeRef::new(attribute_type),
            target: AttributeTarget::default(),
            constructor_arguments: Vec::new(),
            named_arguments: Vec::new(),
        }
    }

    /// Add a positional constructor argument
    #[must_use]
    pub fn argument(mut self, value_type: &TypeRc, value: Value) -> Self {
        self.constructor_arguments
            .push(TypedValue::new(TypeRef::new(value_type), value));
        self
    }

    /// Add a property assignment
    #[must_use]
    pub fn property(mut self, name: &str, value_type: &TypeRc, value: Value) -> Self {
        self.named_arguments.push(NamedArgument {
            name: name.to_string(),
            is_field: false,
            value: TypedValue::new(TypeRef::new(value_type), value),
        });
        self
    }

    /// Add a field assignment
    #[must_use]
    pub fn field(mut self, name: &str, value_type: &TypeRc, value: Value) -> Self {
        self.named_arguments.push(NamedArgument {
            name: name.to_string(),
            is_field: true,
            value: TypedValue::new(TypeRef::new(value_type), value),
        });
        self
    }

    /// Set the element kind this attribute is applied to
    #[must_use]
    pub fn with_target(mut self, target: AttributeTarget) -> Self {
        self.target = target;
        self
    }

    /// Check if this attribute's class has the given full name
    #[must_use]
    pub fn is(&self, fullname: &str) -> bool {
        self.attribute_type
            .upgrade()
            .is_some_and(|attribute_type| attribute_type.fullname() == fullname)
    }

    /// Check if the application has any arguments at all
    #[must_use]
    pub fn has_arguments(&self) -> bool {
        !self.constructor_arguments.is_empty() || !self.named_arguments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_flags_are_distinct() {
        let targets = [
            AttributeTarget::Assembly,
            AttributeTarget::Type,
            AttributeTarget::TypeMember,
            AttributeTarget::TypeParameter,
            AttributeTarget::Parameter,
            AttributeTarget::ReturnParameter,
        ];
        let all = targets
            .iter()
            .fold(AttributeTargets::empty(), |acc, target| {
                assert!(!acc.contains(target.flag()));
                acc | target.flag()
            });
        assert_eq!(all, AttributeTargets::all());
    }
}
