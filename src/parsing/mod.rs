pub mod go;
pub mod java;
pub mod language;
pub mod parser;
pub mod python;
pub mod registry;

pub use go::GoParser;
pub use java::JavaParser;
pub use language::Language;
pub use parser::SourceParser;
pub use python::PythonParser;
pub use registry::{
    LanguageDefinition, LanguageId, LanguageRegistry, RegistryError, get_registry,
};
