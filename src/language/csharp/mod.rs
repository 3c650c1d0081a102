//! C# rendering of metadata.
//!
//! [`CSharp`] implements [`Language`] by walking the metadata model recursively and writing
//! C# syntax to the output sink. The work is split by concern:
//!
//! - `types` - type references (aliases, decorators, generics, nesting)
//! - `names` - member names and signatures (explicit implementations, indexers, extension blocks)
//! - `definitions` - full declarations per member kind
//! - `literals` - constants, escaping and enum flag decomposition
//! - `attributes` - attribute applications and the attribute filter
//! - [`keywords`] / [`operators`] - lookup tables
//!
//! # Examples
//!
//! ```rust
//! use dotdoc::{
//!     language::{csharp::CSharp, Language, NameQualifier},
//!     metadata::{Member, MethodBuilder, Parameter, TypeBuilder, TypeRegistry},
//! };
//!
//! let registry = TypeRegistry::new();
//! let int = registry.system("Int32").unwrap();
//! let math = TypeBuilder::class(&registry, "Samples", "Math").build();
//! let max = MethodBuilder::new("Max", &int)
//!     .parameter(Parameter::new("a", 0, &int))
//!     .parameter(Parameter::new("b", 1, &int))
//!     .build(&math);
//!
//! let csharp = CSharp::default();
//! let member = Member::Method(max);
//! assert_eq!(
//!     csharp.format_signature(&member, NameQualifier::DeclaringType)?,
//!     "Math.Max(int, int)"
//! );
//! assert_eq!(csharp.format_definition(&member)?, "public int Max(int a, int b);");
//! # Ok::<(), dotdoc::Error>(())
//! ```

use std::fmt;

use log::warn;

use crate::{
    language::{Language, Linker, NameQualifier, PlainLinker},
    metadata::{CustomAttribute, Member, TypeRc, Value},
    Result,
};

mod attributes;
mod definitions;
pub mod keywords;
mod literals;
mod names;
pub mod operators;
mod options;
mod types;

pub use attributes::AttributeFilter;
pub use literals::{decompose_flags, escape};
pub use options::CodeStyleOptions;

static PLAIN_LINKER: PlainLinker = PlainLinker;

/// The C# formatter
///
/// Created once with its [`CodeStyleOptions`] and read-only afterwards; share it freely between
/// threads.
pub struct CSharp {
    options: CodeStyleOptions,
    filter: AttributeFilter,
}

impl CSharp {
    /// Create a formatter with the given style options
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidPattern`] if the hidden attribute patterns do not compile.
    pub fn new(options: CodeStyleOptions) -> Result<Self> {
        let filter = AttributeFilter::new(&options)?;
        Ok(CSharp { options, filter })
    }

    /// The style options this formatter was created with
    #[must_use]
    pub fn options(&self) -> &CodeStyleOptions {
        &self.options
    }

    fn writer<'a>(
        &'a self,
        out: &'a mut dyn fmt::Write,
        linker: Option<&'a dyn Linker>,
    ) -> Writer<'a> {
        Writer {
            out,
            linker: linker.unwrap_or(&PLAIN_LINKER),
            options: &self.options,
            filter: &self.filter,
        }
    }
}

impl Default for CSharp {
    fn default() -> Self {
        let options = CodeStyleOptions::default();
        // Wildcards are regex-escaped, so only the regex size limit could reject the defaults
        let filter = AttributeFilter::new(&options).unwrap_or_else(|error| {
            warn!("Default attribute patterns failed to compile: {error}");
            AttributeFilter::by_target(options.hidden_attribute_targets)
        });
        CSharp { options, filter }
    }
}

impl Language for CSharp {
    fn name(&self) -> &'static str {
        "C#"
    }

    fn write_name(
        &self,
        out: &mut dyn fmt::Write,
        member: &Member,
        qualifier: NameQualifier,
        linker: Option<&dyn Linker>,
    ) -> Result<()> {
        self.writer(out, linker).write_name(member, qualifier)
    }

    fn write_signature(
        &self,
        out: &mut dyn fmt::Write,
        member: &Member,
        qualifier: NameQualifier,
        linker: Option<&dyn Linker>,
    ) -> Result<()> {
        self.writer(out, linker).write_signature(member, qualifier)
    }

    fn write_definition(
        &self,
        out: &mut dyn fmt::Write,
        member: &Member,
        linker: Option<&dyn Linker>,
    ) -> Result<()> {
        self.writer(out, linker).write_definition(member)
    }

    fn write_attribute(
        &self,
        out: &mut dyn fmt::Write,
        attribute: &CustomAttribute,
        qualifier: NameQualifier,
        linker: Option<&dyn Linker>,
    ) -> Result<()> {
        self.writer(out, linker).write_attribute(attribute, qualifier)
    }

    fn write_constant_value(
        &self,
        out: &mut dyn fmt::Write,
        value: &Value,
        value_type: Option<&TypeRc>,
        linker: Option<&dyn Linker>,
    ) -> Result<()> {
        self.writer(out, linker).write_constant(value, value_type)
    }

    fn keyword_url(&self, keyword: &str) -> Option<&'static str> {
        keywords::keyword_url(keyword)
    }
}

/// Output state of one formatting call
pub(crate) struct Writer<'a> {
    out: &'a mut dyn fmt::Write,
    linker: &'a dyn Linker,
    options: &'a CodeStyleOptions,
    filter: &'a AttributeFilter,
}

impl Writer<'_> {
    /// Write punctuation or keywords
    fn text(&mut self, text: &str) -> Result<()> {
        self.out.write_str(text)?;
        Ok(())
    }

    /// Write an identifier referring to `member` through the linker
    fn link(&mut self, member: &Member, name: &str) -> Result<()> {
        self.linker.write_link(&mut *self.out, member, name)?;
        Ok(())
    }

    /// Write an identifier referring to a type through the linker
    fn link_type(&mut self, ty: &TypeRc, name: &str) -> Result<()> {
        self.link(&Member::Type(ty.clone()), name)
    }

    /// Write `items` separated by `separator`
    fn write_list<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        separator: &str,
        mut write_item: impl FnMut(&mut Self, T) -> Result<()>,
    ) -> Result<()> {
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                self.text(separator)?;
            }
            write_item(self, item)?;
        }
        Ok(())
    }
}
