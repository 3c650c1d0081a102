mod library;

pub use library::*;
