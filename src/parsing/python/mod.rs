//! Python language support
//!
//! Extracts classes, methods, and module-level functions. Documentation
//! prefers the docstring; leading `#` comments are the fallback.

pub mod definition;
pub mod parser;

pub use definition::PythonLanguage;
pub use parser::PythonParser;

// Re-export for registry registration
pub(crate) use definition::register;
