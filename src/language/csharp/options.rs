//! Style configuration for the C# formatter.

use crate::{language::NameQualifier, metadata::AttributeTargets};

/// Style options of the C# formatter
///
/// Options are fixed when the formatter is created through [`crate::language::csharp::CSharp::new`]
/// and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeStyleOptions {
    /// Definitions with more parameters than this put each parameter on its own line
    pub max_inline_parameters: usize,

    /// Write `int` instead of `Int32`, `string` instead of `String` and so on
    pub simplify_system_type_names: bool,

    /// Write `System.IComparable.CompareTo` instead of `IComparable.CompareTo` when naming an
    /// explicit interface implementation without qualification
    pub fully_qualify_explicit_interface_member_names: bool,

    /// Qualifier for every type referenced from within another construct: generic arguments,
    /// parameter, return and field types, attribute types, base types, constraints and enum
    /// literals
    pub type_reference_qualifier: NameQualifier,

    /// Name of an indexer in declarations
    pub indexer_declaration_name: String,

    /// Name of an indexer when it is referenced
    pub indexer_display_name: String,

    /// Attributes applied to these targets are left out of definitions
    pub hidden_attribute_targets: AttributeTargets,

    /// Attributes whose full type name matches one of these wildcard patterns (`*` and `?`) are
    /// left out of definitions
    pub hidden_attribute_patterns: Vec<String>,

    /// Write `= value` after optional parameters
    pub show_default_values: bool,
}

impl Default for CodeStyleOptions {
    fn default() -> Self {
        Self {
            max_inline_parameters: 4,
            simplify_system_type_names: true,
            fully_qualify_explicit_interface_member_names: false,
            type_reference_qualifier: NameQualifier::None,
            indexer_declaration_name: "this".to_string(),
            indexer_display_name: "Item".to_string(),
            hidden_attribute_targets: AttributeTargets::empty(),
            hidden_attribute_patterns: vec![
                "System.Runtime.CompilerServices.*".to_string(),
                "System.ParamArrayAttribute".to_string(),
                "System.Reflection.DefaultMemberAttribute".to_string(),
            ],
            show_default_values: true,
        }
    }
}

impl CodeStyleOptions {
    /// Terse output for overview tables
    ///
    /// Hides every attribute and all parameter defaults and never breaks parameter lists.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            max_inline_parameters: usize::MAX,
            hidden_attribute_targets: AttributeTargets::all(),
            show_default_values: false,
            ..Self::default()
        }
    }

    /// Unambiguous output
    ///
    /// Qualifies every referenced type, keeps metadata type names and shows every attribute.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            max_inline_parameters: 2,
            simplify_system_type_names: false,
            fully_qualify_explicit_interface_member_names: true,
            type_reference_qualifier: NameQualifier::Full,
            hidden_attribute_patterns: Vec::new(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_from_default() {
        let default = CodeStyleOptions::default();
        assert_ne!(CodeStyleOptions::compact(), default);
        assert_ne!(CodeStyleOptions::verbose(), default);
        assert_eq!(default.indexer_declaration_name, "this");
        assert_eq!(default.type_reference_qualifier, NameQualifier::None);
    }

    #[test]
    fn verbose_shows_everything() {
        let verbose = CodeStyleOptions::verbose();
        assert!(verbose.hidden_attribute_patterns.is_empty());
        assert!(verbose.hidden_attribute_targets.is_empty());
        assert!(verbose.show_default_values);
    }
}
