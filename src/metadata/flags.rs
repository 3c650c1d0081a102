//! Flag sets and small enumerations shared by types and type members.
//!
//! The metadata loader normalizes the raw ECMA-335 attribute bitmasks into the flag sets below,
//! so the formatter only ever asks language-level questions ("is this member `static`?",
//! "is this generic parameter covariant?") instead of decoding `MethodAttributes` itself.

use bitflags::bitflags;
use strum::{EnumIter, IntoStaticStr};

/// Declared accessibility of a type or type member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, IntoStaticStr)]
pub enum Accessibility {
    /// Accessible from everywhere
    #[default]
    #[strum(serialize = "public")]
    Public,
    /// Accessible from the declaring type and derived types (`Family`)
    #[strum(serialize = "protected")]
    Protected,
    /// Accessible from the declaring assembly (`Assembly`)
    #[strum(serialize = "internal")]
    Internal,
    /// Accessible from derived types or the declaring assembly (`FamORAssem`)
    #[strum(serialize = "protected internal")]
    ProtectedInternal,
    /// Accessible from derived types within the declaring assembly (`FamANDAssem`)
    #[strum(serialize = "private protected")]
    PrivateProtected,
    /// Accessible from the declaring type only
    #[strum(serialize = "private")]
    Private,
}

impl Accessibility {
    /// The keyword sequence used to declare this accessibility
    #[must_use]
    pub fn keyword(self) -> &'static str {
        self.into()
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Declaration modifiers of a type definition
    pub struct TypeFlags: u32 {
        /// Class can not be instantiated
        const ABSTRACT = 0x0001;
        /// Class can not be derived from
        const SEALED = 0x0002;
        /// Class is `static` (abstract and sealed in metadata)
        const STATIC = 0x0004;
        /// Struct is `readonly`
        const READONLY = 0x0008;
        /// Struct is a `ref struct`
        const BY_REF_LIKE = 0x0010;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Declaration modifiers of a field, property, method or event
    pub struct MemberModifiers: u32 {
        /// Member belongs to the type, not to an instance
        const STATIC = 0x0001;
        /// Member has no implementation
        const ABSTRACT = 0x0002;
        /// Member can be overridden
        const VIRTUAL = 0x0004;
        /// Member overrides an inherited member
        const OVERRIDE = 0x0008;
        /// Override can not be overridden again
        const SEALED = 0x0010;
        /// Member hides an inherited member (`new`)
        const NEW = 0x0020;
        /// Field or struct member is `readonly`
        const READONLY = 0x0040;
        /// Field is a compile-time constant (`literal`)
        const CONST = 0x0080;
        /// Field is `volatile`
        const VOLATILE = 0x0100;
        /// Method is implemented externally
        const EXTERN = 0x0200;
        /// Field or property must be set by object initializers
        const REQUIRED = 0x0400;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    /// Special constraints of a generic parameter (`GenericParamAttributes`)
    pub struct GenericConstraints: u32 {
        /// `class`
        const REFERENCE_TYPE = 0x0004;
        /// `struct`
        const VALUE_TYPE = 0x0008;
        /// `new()`
        const DEFAULT_CONSTRUCTOR = 0x0010;
        /// `unmanaged`
        const UNMANAGED = 0x0020;
        /// `notnull`
        const NOT_NULLABLE = 0x0040;
        /// `allows ref struct`
        const ALLOWS_BY_REF_LIKE = 0x0080;
    }
}

/// Variance of a generic parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variance {
    /// Invariant
    #[default]
    None,
    /// Covariant (`out`)
    Covariant,
    /// Contravariant (`in`)
    Contravariant,
}

/// How a parameter is passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefKind {
    /// By value
    #[default]
    None,
    /// Read-only reference (`in`)
    In,
    /// Output reference (`out`)
    Out,
    /// Read-write reference (`ref`)
    Ref,
}

impl RefKind {
    /// The keyword introducing this kind of parameter, if any
    #[must_use]
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            RefKind::None => None,
            RefKind::In => Some("in"),
            RefKind::Out => Some("out"),
            RefKind::Ref => Some("ref"),
        }
    }
}
