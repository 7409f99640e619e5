//! doclink: declaration and documentation lookup for codebases.
//!
//! Given a repository, a git revision, and a target path such as
//! `Class1.method1()`, doclink checks out the revision in a scratch
//! workspace, parses the requested file with tree-sitter, and returns the
//! matching declarations together with the comment block written directly
//! above them.

pub mod config;
pub mod declaration;
pub mod error;
pub mod parsing;
pub mod repo;
pub mod target;
pub mod types;

// Explicit exports for better API clarity
pub use config::Settings;
pub use declaration::{Declaration, DeclarationKind, Visibility};
pub use error::{ExtractError, ExtractResult, RepoError, RepoResult};
pub use parsing::{GoParser, JavaParser, PythonParser, SourceParser};
pub use repo::Workspace;
pub use target::Target;
pub use types::Range;
