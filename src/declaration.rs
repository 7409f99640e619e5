//! The declaration model: what a parser extracts from a source document.
//!
//! A declaration is a named construct that can carry an associated comment:
//! a type, a member of a type, or a free function. Parsers return these in
//! source order; everything downstream (target matching, the CLI's list
//! view) works on this model.

use crate::types::Range;
use serde::{Deserialize, Serialize};

/// Kind of a source declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    Class,
    Interface,
    Enum,
    EnumConstant,
    Struct,
    TypeAlias,
    Constructor,
    Method,
    Function,
}

impl DeclarationKind {
    /// True for kinds that introduce a type (as opposed to a member or function)
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Class
                | DeclarationKind::Interface
                | DeclarationKind::Enum
                | DeclarationKind::Struct
                | DeclarationKind::TypeAlias
        )
    }

    /// True for kinds that belong to an enclosing type
    pub fn is_member(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Constructor | DeclarationKind::Method | DeclarationKind::EnumConstant
        )
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeclarationKind::Class => "class",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Enum => "enum",
            DeclarationKind::EnumConstant => "enum constant",
            DeclarationKind::Struct => "struct",
            DeclarationKind::TypeAlias => "type alias",
            DeclarationKind::Constructor => "constructor",
            DeclarationKind::Method => "method",
            DeclarationKind::Function => "function",
        };
        write!(f, "{name}")
    }
}

/// Declared visibility of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
    /// Package/module-level visibility (Java default, Go unexported, etc.)
    Module,
}

/// A single declaration extracted from a source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub range: Range,

    /// Name of the enclosing type, for members
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,

    /// Single-line signature, without the body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// Comment block written directly above the declaration (or the
    /// docstring, for Python)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_comment: Option<String>,

    pub visibility: Visibility,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclarationKind, range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            container: None,
            signature: None,
            doc_comment: None,
            visibility: Visibility::Module,
        }
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc_comment = Some(doc.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Dotted path of this declaration: `Type.member` or just the name
    pub fn qualified_name(&self) -> String {
        match &self.container {
            Some(container) => format!("{container}.{}", self.name),
            None => self.name.clone(),
        }
    }
}
