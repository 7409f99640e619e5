//! Java language support
//!
//! Extracts classes, interfaces, enums, and their members together with the
//! comment written directly above each declaration. Handles the complete
//! declaration contract: class, constructor, static and instance methods,
//! interface methods (declared and implemented), enums, and enum constants.

pub mod definition;
pub mod parser;

pub use definition::JavaLanguage;
pub use parser::JavaParser;

// Re-export for registry registration
pub(crate) use definition::register;
