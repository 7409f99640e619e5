//! Error types for declaration extraction and workspace operations
//!
//! Structured error types using thiserror, with actionable messages where
//! the caller can do something about the failure.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing source files and extracting declarations
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to initialize {language} parser: {reason}")]
    ParserInit { language: String, reason: String },

    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "Target is empty: expected a type, a member path like 'Type.method', or a function name"
    )]
    EmptyTarget,
}

/// Errors raised by workspace (git-backed) operations
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Git operation failed: {operation}")]
    GitOperation { operation: String },

    #[error("File '{path}' not found at the requested revision")]
    FileNotFound { path: PathBuf },

    #[error("Invalid line range: start {start} is past end {end}")]
    InvalidLineRange { start: usize, end: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Registry(#[from] crate::parsing::RegistryError),
}

impl From<git2::Error> for RepoError {
    fn from(e: git2::Error) -> Self {
        RepoError::GitOperation {
            operation: e.message().to_string(),
        }
    }
}

/// Result type alias for extraction operations
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Result type alias for workspace operations
pub type RepoResult<T> = Result<T, RepoError>;
