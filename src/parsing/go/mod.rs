//! Go language support
//!
//! Extracts struct, interface, and alias types, functions, and methods
//! (value and pointer receivers) with their leading comment groups.

pub mod definition;
pub mod parser;

pub use definition::GoLanguage;
pub use parser::GoParser;

// Re-export for registry registration
pub(crate) use definition::register;
