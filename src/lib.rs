// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # dotdoc
//!
//! Source-faithful C# signatures and declarations for .NET metadata.
//!
//! `dotdoc` is the formatting core of an API documentation generator. Given the metadata of a
//! type or type member (as produced by a metadata loader), it writes what a reader of the
//! documentation expects to see: the member's display name, its signature, its full declaration
//! as it would appear in C# source, attribute applications and constant values.
//!
//! ## Features
//!
//! - **Three qualification levels** - `Widget`, `Controls.Widget` or `Ui.Controls.Widget`
//! - **Every type shape** - nested generics, arrays of any rank, pointers, nullable and by-ref
//!   wrappers, variant generic parameters, system type aliases
//! - **Every member kind** - fields, properties, indexers, methods, constructors, operators,
//!   conversions, events, extension members and type definitions
//! - **Literals** - escaped strings and characters, typed numbers, `typeof`, arrays and enum
//!   values including flag combinations
//! - **Hyperlink seam** - every identifier goes through a caller-supplied [`language::Linker`]
//! - **Thread safe** - formatters are immutable and metadata is shared through `Arc`
//!
//! ## Quick Start
//!
//! ```rust
//! use dotdoc::prelude::*;
//!
//! let registry = TypeRegistry::new();
//! let string = registry.system("String").unwrap();
//!
//! let greeter = TypeBuilder::class(&registry, "Samples", "Greeter").build();
//! let greet = MethodBuilder::new("Greet", &string)
//!     .parameter(Parameter::new("name", 0, &string))
//!     .build(&greeter);
//!
//! let csharp = CSharp::default();
//! let member = Member::Method(greet);
//! assert_eq!(csharp.format_name(&member, NameQualifier::Full)?, "Samples.Greeter.Greet");
//! assert_eq!(csharp.format_signature(&member, NameQualifier::None)?, "Greet(string)");
//! assert_eq!(csharp.format_definition(&member)?, "public string Greet(string name);");
//! # Ok::<(), dotdoc::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`metadata`] - The metadata model, its registry and builders
//! - [`language`] - The [`language::Language`] contract and the C# formatter
//! - [`Error`] and [`Result`] - Error handling
//!
//! ### Metadata
//!
//! A [`metadata::TypeRegistry`] owns every type of a load context. Types and members reference
//! other types weakly, so cyclic metadata never leaks; dropping the registry invalidates the
//! graph. Decorated and constructed types are interned by the registry.
//!
//! ### Formatting
//!
//! [`language::csharp::CSharp`] is created once with its [`language::csharp::CodeStyleOptions`]
//! and may then be used from any number of threads. Each call writes to a caller-supplied
//! [`std::fmt::Write`] sink and fails loudly rather than produce incorrect syntax.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use dotdoc::{prelude::*, Error};
//!
//! let registry = TypeRegistry::new();
//! let int = registry.system("Int32").unwrap();
//! let pointer = Member::Type(registry.pointer(&int));
//!
//! match CSharp::default().format_definition(&pointer) {
//!     Err(Error::UnsupportedMember(what)) => println!("No definition for {}", what),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed metadata: {}", message),
//!     Err(e) => println!("Other error: {}", e),
//!     Ok(text) => println!("{}", text),
//! }
//! ```
//!
//! ## Logging
//!
//! `dotdoc` logs through the [`log`](https://docs.rs/log) facade and never installs a logger.
//! Definition renderer selection is logged at `debug`, hidden attributes at `trace`.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use dotdoc::prelude::*;
///
/// let registry = TypeRegistry::new();
/// let int = registry.system("Int32").unwrap();
/// let text = CSharp::default().format_name(&Member::Type(int), NameQualifier::Full)?;
/// assert_eq!(text, "int");
/// # Ok::<(), dotdoc::Error>(())
/// ```
pub mod prelude;

/// The metadata model the formatter works on
///
/// # Key Components
///
/// ## Types
/// - [`metadata::DocType`] - Classes, structs, interfaces, enums, delegates, generic parameters
///   and decorated types
/// - [`metadata::TypeRegistry`] - Owner of all types, seeded with the well-known `System` types
/// - [`metadata::TypeRef`] - Weak type reference
///
/// ## Members
/// - [`metadata::Field`], [`metadata::Property`], [`metadata::Method`], [`metadata::Event`],
///   [`metadata::Parameter`]
/// - [`metadata::Member`] - Any formattable entity
///
/// ## Values and Attributes
/// - [`metadata::Value`] / [`metadata::TypedValue`] - Constants
/// - [`metadata::CustomAttribute`] - Attribute applications
///
/// ## Construction
/// - [`metadata::TypeBuilder`], [`metadata::FieldBuilder`], [`metadata::PropertyBuilder`],
///   [`metadata::MethodBuilder`], [`metadata::EventBuilder`]
pub mod metadata;

/// Rendering of metadata as source syntax
///
/// See [`language::Language`] for the contract and [`language::csharp`] for the C# formatter.
pub mod language;

/// `dotdoc` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
pub type Result<T> = std::result::Result<T, Error>;

/// `dotdoc` Error type
///
/// The main error type for all operations in this crate. Distinguishes contract violations
/// (unsupported members and values) from broken metadata and failing output sinks.
pub use error::Error;
