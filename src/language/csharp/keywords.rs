//! Keyword tables: aliases of well-known system types and reference documentation pages.

use crate::metadata::DocType;

/// The C# keyword aliasing a well-known `System` type, if there is one
#[must_use]
pub fn system_type_alias(ty: &DocType) -> Option<&'static str> {
    if ty.namespace != "System" || ty.is_nested() || ty.is_generic() {
        return None;
    }

    let alias = match ty.name.as_str() {
        "Void" => "void",
        "Boolean" => "bool",
        "Char" => "char",
        "SByte" => "sbyte",
        "Byte" => "byte",
        "Int16" => "short",
        "UInt16" => "ushort",
        "Int32" => "int",
        "UInt32" => "uint",
        "Int64" => "long",
        "UInt64" => "ulong",
        "Single" => "float",
        "Double" => "double",
        "Decimal" => "decimal",
        "String" => "string",
        "Object" => "object",
        "IntPtr" => "nint",
        "UIntPtr" => "nuint",
        _ => return None,
    };
    Some(alias)
}

macro_rules! reference {
    ($page:literal) => {
        concat!(
            "https://learn.microsoft.com/dotnet/csharp/language-reference/",
            $page
        )
    };
}

const INTEGRAL: &str = reference!("builtin-types/integral-numeric-types");
const FLOATING: &str = reference!("builtin-types/floating-point-numeric-types");
const BOOL: &str = reference!("builtin-types/bool");
const CONVERSION: &str = reference!("operators/user-defined-conversion-operators");
const CONSTRAINT: &str = reference!("keywords/where-generic-type-constraint");

/// Keywords and their reference pages, sorted by keyword
static KEYWORD_URLS: &[(&str, &str)] = &[
    ("abstract", reference!("keywords/abstract")),
    ("as", reference!("operators/type-testing-and-cast#as-operator")),
    ("async", reference!("keywords/async")),
    ("await", reference!("operators/await")),
    ("base", reference!("keywords/base")),
    ("bool", BOOL),
    ("byte", INTEGRAL),
    ("char", reference!("builtin-types/char")),
    ("checked", reference!("statements/checked-and-unchecked")),
    ("class", reference!("keywords/class")),
    ("const", reference!("keywords/const")),
    ("decimal", FLOATING),
    ("default", reference!("operators/default")),
    ("delegate", reference!("builtin-types/reference-types#the-delegate-type")),
    ("double", FLOATING),
    ("dynamic", reference!("builtin-types/reference-types#the-dynamic-type")),
    ("enum", reference!("builtin-types/enum")),
    ("event", reference!("keywords/event")),
    ("explicit", CONVERSION),
    ("extern", reference!("keywords/extern")),
    ("false", BOOL),
    ("fixed", reference!("statements/fixed")),
    ("float", FLOATING),
    ("implicit", CONVERSION),
    ("in", reference!("keywords/method-parameters#in-parameter-modifier")),
    ("init", reference!("keywords/init")),
    ("int", INTEGRAL),
    ("interface", reference!("keywords/interface")),
    ("internal", reference!("keywords/internal")),
    ("is", reference!("operators/is")),
    ("long", INTEGRAL),
    ("new", reference!("operators/new-operator")),
    ("nint", INTEGRAL),
    ("notnull", CONSTRAINT),
    ("nuint", INTEGRAL),
    ("null", reference!("keywords/null")),
    ("object", reference!("builtin-types/reference-types#the-object-type")),
    ("operator", reference!("operators/operator-overloading")),
    ("out", reference!("keywords/method-parameters#out-parameter-modifier")),
    ("override", reference!("keywords/override")),
    ("params", reference!("keywords/method-parameters#params-modifier")),
    ("private", reference!("keywords/private")),
    ("protected", reference!("keywords/protected")),
    ("public", reference!("keywords/public")),
    ("readonly", reference!("keywords/readonly")),
    ("record", reference!("builtin-types/record")),
    ("ref", reference!("keywords/ref")),
    ("required", reference!("keywords/required")),
    ("sbyte", INTEGRAL),
    ("sealed", reference!("keywords/sealed")),
    ("short", INTEGRAL),
    ("static", reference!("keywords/static")),
    ("string", reference!("builtin-types/reference-types#the-string-type")),
    ("struct", reference!("builtin-types/struct")),
    ("this", reference!("keywords/this")),
    ("true", BOOL),
    ("typeof", reference!("operators/type-testing-and-cast#typeof-operator")),
    ("uint", INTEGRAL),
    ("ulong", INTEGRAL),
    ("unmanaged", reference!("builtin-types/unmanaged-types")),
    ("ushort", INTEGRAL),
    ("virtual", reference!("keywords/virtual")),
    ("void", reference!("builtin-types/void")),
    ("volatile", reference!("keywords/volatile")),
    ("where", CONSTRAINT),
];

/// Reference documentation page of a C# keyword
#[must_use]
pub fn keyword_url(keyword: &str) -> Option<&'static str> {
    KEYWORD_URLS
        .binary_search_by(|(candidate, _)| (*candidate).cmp(keyword))
        .ok()
        .map(|index| KEYWORD_URLS[index].1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::TypeRegistry;

    #[test]
    fn keyword_table_is_sorted() {
        assert!(KEYWORD_URLS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn keyword_lookup() {
        assert_eq!(
            keyword_url("class"),
            Some("https://learn.microsoft.com/dotnet/csharp/language-reference/keywords/class")
        );
        assert_eq!(keyword_url("int"), keyword_url("long"));
        assert_eq!(keyword_url("abstract").map(|url| url.ends_with("abstract")), Some(true));
        assert_eq!(keyword_url("where"), keyword_url("notnull"));
        assert!(keyword_url("Class").is_none());
        assert!(keyword_url("").is_none());
    }

    #[test]
    fn every_alias_has_a_page() {
        let registry = TypeRegistry::new();
        for ty in registry.iter() {
            if let Some(alias) = system_type_alias(ty) {
                assert!(keyword_url(alias).is_some(), "{alias}");
            }
        }
    }

    #[test]
    fn aliases() {
        let registry = TypeRegistry::new();
        let alias = |name: &str| system_type_alias(&registry.system(name).unwrap());
        assert_eq!(alias("Int32"), Some("int"));
        assert_eq!(alias("Object"), Some("object"));
        assert_eq!(alias("UIntPtr"), Some("nuint"));
        assert_eq!(alias("Type"), None);
        assert_eq!(alias("ValueType"), None);
    }
}
