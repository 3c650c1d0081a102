//! Language-faithful rendering of metadata.
//!
//! A [`Language`] reconstructs source syntax from the metadata model: the display name of a
//! member, its signature (name plus parameter types) and its full declaration. Every identifier a
//! language emits goes through a [`Linker`], which is how callers turn names into hyperlinks
//! without the formatter knowing anything about page addressing.
//!
//! # Key Components
//!
//! - [`NameQualifier`] - How much containing context a name carries
//! - [`Linker`] / [`PlainLinker`] - The identifier output seam
//! - [`Language`] - The formatter contract
//! - [`csharp::CSharp`] - The C# formatter
//!
//! # Examples
//!
//! ```rust
//! use std::fmt;
//!
//! use dotdoc::{
//!     language::{csharp::CSharp, Language, NameQualifier},
//!     metadata::{Member, TypeBuilder, TypeRegistry},
//! };
//!
//! let registry = TypeRegistry::new();
//! let widget = TypeBuilder::class(&registry, "Ui.Controls", "Widget").build();
//!
//! let linker = |out: &mut dyn fmt::Write, _: &Member, name: &str| write!(out, "<{name}>");
//! let mut text = String::new();
//! CSharp::default().write_name(
//!     &mut text,
//!     &Member::Type(widget),
//!     NameQualifier::Full,
//!     Some(&linker),
//! )?;
//! assert_eq!(text, "Ui.Controls.<Widget>");
//! # Ok::<(), dotdoc::Error>(())
//! ```

use std::fmt;

use strum::{Display, EnumIter};

use crate::{
    metadata::{CustomAttribute, Member, TypeRc, Value},
    Result,
};

/// C# formatter
pub mod csharp;

/// How much of a name's containing context is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Display)]
pub enum NameQualifier {
    /// Only the name itself
    #[default]
    None,
    /// The name prefixed with its declaring type(s)
    DeclaringType,
    /// The name prefixed with namespace and declaring type(s)
    Full,
}

/// Writes emitted identifiers, optionally decorated (for example as hyperlinks)
///
/// Every identifier that refers to a member (type names, member names, aliases of system types)
/// passes through a linker together with the member it stands for. Punctuation and keywords are
/// written directly.
///
/// Closures with the matching signature are linkers.
pub trait Linker {
    /// Write `name`, which refers to `member`
    ///
    /// # Errors
    /// Returns an error if writing to `out` fails.
    fn write_link(&self, out: &mut dyn fmt::Write, member: &Member, name: &str) -> fmt::Result;
}

impl<F> Linker for F
where
    F: Fn(&mut dyn fmt::Write, &Member, &str) -> fmt::Result,
{
    fn write_link(&self, out: &mut dyn fmt::Write, member: &Member, name: &str) -> fmt::Result {
        self(out, member, name)
    }
}

/// Linker writing names as plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainLinker;

impl Linker for PlainLinker {
    fn write_link(&self, out: &mut dyn fmt::Write, _member: &Member, name: &str) -> fmt::Result {
        out.write_str(name)
    }
}

/// A source language metadata can be rendered in
///
/// Formatting is side-effect free apart from writing to `out`, so a language can be shared
/// between threads and used concurrently.
pub trait Language: Send + Sync {
    /// Human readable name of the language
    fn name(&self) -> &'static str;

    /// Write the display name of a member
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for dangling metadata references and
    /// [`crate::Error::Fmt`] if writing fails.
    fn write_name(
        &self,
        out: &mut dyn fmt::Write,
        member: &Member,
        qualifier: NameQualifier,
        linker: Option<&dyn Linker>,
    ) -> Result<()>;

    /// Write the name of a member followed by its parameter types, if it has parameters
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for dangling metadata references and
    /// [`crate::Error::Fmt`] if writing fails.
    fn write_signature(
        &self,
        out: &mut dyn fmt::Write,
        member: &Member,
        qualifier: NameQualifier,
        linker: Option<&dyn Linker>,
    ) -> Result<()>;

    /// Write the full declaration of a member as it would appear in source
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedMember`] for members that have no declaration of their
    /// own (parameters, generic parameters, decorated types).
    fn write_definition(
        &self,
        out: &mut dyn fmt::Write,
        member: &Member,
        linker: Option<&dyn Linker>,
    ) -> Result<()>;

    /// Write one attribute application
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedValue`] if an argument does not fit its declared type.
    fn write_attribute(
        &self,
        out: &mut dyn fmt::Write,
        attribute: &CustomAttribute,
        qualifier: NameQualifier,
        linker: Option<&dyn Linker>,
    ) -> Result<()>;

    /// Write a constant as a literal of the given declared type
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedValue`] if the value does not fit the declared type.
    fn write_constant_value(
        &self,
        out: &mut dyn fmt::Write,
        value: &Value,
        value_type: Option<&TypeRc>,
        linker: Option<&dyn Linker>,
    ) -> Result<()>;

    /// Reference documentation page of a language keyword
    fn keyword_url(&self, keyword: &str) -> Option<&'static str>;

    /// The display name of a member, as plain text
    ///
    /// # Errors
    /// See [`Language::write_name`].
    fn format_name(&self, member: &Member, qualifier: NameQualifier) -> Result<String> {
        let mut text = String::new();
        self.write_name(&mut text, member, qualifier, None)?;
        Ok(text)
    }

    /// The signature of a member, as plain text
    ///
    /// # Errors
    /// See [`Language::write_signature`].
    fn format_signature(&self, member: &Member, qualifier: NameQualifier) -> Result<String> {
        let mut text = String::new();
        self.write_signature(&mut text, member, qualifier, None)?;
        Ok(text)
    }

    /// The declaration of a member, as plain text
    ///
    /// # Errors
    /// See [`Language::write_definition`].
    fn format_definition(&self, member: &Member) -> Result<String> {
        let mut text = String::new();
        self.write_definition(&mut text, member, None)?;
        Ok(text)
    }
}
