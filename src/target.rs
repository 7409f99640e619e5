//! Target paths: what the caller is asking for.
//!
//! A target is parsed from a dotted path such as `Class1.method1()`,
//! `pkg.Type.method`, or `staticFunction`. The last segment names the
//! member or function, the segment before it (if any) the enclosing type.
//! Any earlier segments are a package prefix and are ignored for matching.

use crate::declaration::Declaration;
use crate::error::{ExtractError, ExtractResult};
use std::fmt::Display;

/// A lookup target: a type, a member of a type, or a free function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    member_name: Option<String>,
    type_name: Option<String>,
}

impl Target {
    pub fn new_method<S: Into<String>>(type_name: S, member_name: S) -> Self {
        Self {
            member_name: Some(member_name.into()),
            type_name: Some(type_name.into()),
        }
    }

    pub fn new_function<S: Into<String>>(member_name: S) -> Self {
        Self {
            member_name: Some(member_name.into()),
            type_name: None,
        }
    }

    pub fn new_type<S: Into<String>>(type_name: S) -> Self {
        Self {
            member_name: None,
            type_name: Some(type_name.into()),
        }
    }

    /// Parse a dotted member path. A single segment is treated as a free
    /// function; use [`Target::parse_type`] to look up a bare type name.
    pub fn parse(full_path: &str) -> ExtractResult<Self> {
        let full_path = full_path.trim().trim_end_matches("()");
        if full_path.is_empty() {
            return Err(ExtractError::EmptyTarget);
        }

        let mut parts: Vec<&str> = full_path.split('.').collect();
        let member_name = parts.pop().map(|s| s.to_string());
        // A package prefix before the type is allowed but not matched on
        let type_name = parts.pop().map(|s| s.to_string());

        Ok(Self {
            member_name,
            type_name,
        })
    }

    /// Parse a bare type name target
    pub fn parse_type(name: &str) -> ExtractResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExtractError::EmptyTarget);
        }
        Ok(Self::new_type(name))
    }

    pub fn is_typed(&self) -> bool {
        self.type_name.is_some()
    }

    /// Check whether a declaration satisfies this target
    pub fn matches(&self, decl: &Declaration) -> bool {
        match (&self.type_name, &self.member_name) {
            // Type.member: a member of the named type
            (Some(type_name), Some(member)) => {
                decl.kind.is_member()
                    && decl.name == *member
                    && decl.container.as_deref() == Some(type_name.as_str())
            }
            // Bare type lookup
            (Some(type_name), None) => decl.kind.is_type() && decl.name == *type_name,
            // Free function lookup
            (None, Some(member)) => {
                decl.kind == crate::declaration::DeclarationKind::Function && decl.name == *member
            }
            (None, None) => false,
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.type_name.as_deref().unwrap_or(""),
            if self.is_typed() && self.member_name.is_some() {
                "."
            } else {
                ""
            },
            self.member_name.as_deref().unwrap_or(""),
        )
    }
}
