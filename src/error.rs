use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Rendering is a total function over well-formed metadata. Every variant below therefore
/// describes either a contract violation by the caller or metadata that is broken in a way the
/// formatter refuses to paper over.
///
/// # Error Categories
///
/// ## Contract Violations
/// - [`Error::UnsupportedMember`] - A definition was requested for a member kind without one
/// - [`Error::UnsupportedValue`] - A constant value does not fit any literal shape
///
/// ## Broken Metadata
/// - [`Error::Malformed`] - Dangling references, broken decorator chains, missing arguments
///
/// ## Configuration and Output
/// - [`Error::InvalidPattern`] - An attribute filter pattern failed to compile
/// - [`Error::Fmt`] - The output sink refused a write
///
/// # Examples
///
/// ```rust
/// use dotdoc::{Error, metadata::{Member, TypeRegistry}, language::{csharp::CSharp, Language}};
///
/// let registry = TypeRegistry::new();
/// let int = registry.system("Int32").unwrap();
/// let array = registry.array(&int, 1);
///
/// let mut out = String::new();
/// match CSharp::default().write_definition(&mut out, &Member::Type(array), None) {
///     Err(Error::UnsupportedMember(what)) => println!("no definition for {}", what),
///     Err(e) => println!("other error: {}", e),
///     Ok(()) => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The metadata handed to the formatter is broken.
    ///
    /// Raised for references whose target has already been dropped, decorator chains that do
    /// not terminate in a regular type and generic types that lack the arguments their own
    /// parameter range promises. The error includes the source location where the problem
    /// was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A definition was requested for a member that has no definition renderer.
    ///
    /// Parameters, generic parameters and decorated types (arrays, pointers, by-ref and
    /// nullable wrappers) can be named but not declared.
    #[error("Member has no definition - {0}")]
    UnsupportedMember(String),

    /// A constant value does not match any literal shape for its declared type.
    #[error("Value can not be rendered as a literal - {0}")]
    UnsupportedValue(String),

    /// An attribute filter pattern could not be compiled.
    #[error("{0}")]
    InvalidPattern(#[from] regex::Error),

    /// The output sink failed.
    #[error("{0}")]
    Fmt(#[from] std::fmt::Error),
}
