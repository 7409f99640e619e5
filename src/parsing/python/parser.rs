//! Python parser implementation
//!
//! Documentation for a Python declaration lives in two places: the
//! docstring (first string expression of the body) and any `#` comments
//! written directly above. The docstring wins when both are present.

use crate::declaration::{Declaration, DeclarationKind, Visibility};
use crate::error::{ExtractError, ExtractResult};
use crate::parsing::parser::{leading_line_comments, signature_of};
use crate::parsing::{Language, SourceParser};
use crate::types::Range;
use std::any::Any;
use tree_sitter::{Node, Parser};

/// Python language parser
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    pub fn new() -> ExtractResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ExtractError::ParserInit {
                language: "Python".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { parser })
    }

    fn extract_from_node(
        &self,
        node: Node,
        code: &str,
        container: Option<&str>,
        declarations: &mut Vec<Declaration>,
    ) {
        match node.kind() {
            "class_definition" => {
                self.process_class(node, code, declarations);
            }
            "function_definition" => {
                if let Some(decl) = self.process_function(node, code, container) {
                    declarations.push(decl);
                }
            }
            "decorated_definition" => {
                // The comment sits above the decorator, but the definition
                // inside carries the name; recurse into it with the same
                // container
                if let Some(definition) = node.child_by_field_name("definition") {
                    self.extract_from_node(definition, code, container, declarations);
                }
            }
            _ => {
                for child in node.children(&mut node.walk()) {
                    self.extract_from_node(child, code, container, declarations);
                }
            }
        }
    }

    fn process_class(&self, node: Node, code: &str, declarations: &mut Vec<Declaration>) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = code[name_node.byte_range()].to_string();

        let mut decl = Declaration::new(&name, DeclarationKind::Class, Range::from_node(&node))
            .with_signature(signature_of(&node, code, "body"))
            .with_visibility(python_visibility(&name));
        if let Some(doc) = self.extract_doc_comment(&node, code) {
            decl = decl.with_doc(doc);
        }
        declarations.push(decl);

        if let Some(body) = node.child_by_field_name("body") {
            for child in body.children(&mut body.walk()) {
                self.extract_from_node(child, code, Some(&name), declarations);
            }
        }
    }

    fn process_function(
        &self,
        node: Node,
        code: &str,
        container: Option<&str>,
    ) -> Option<Declaration> {
        let name_node = node.child_by_field_name("name")?;
        let name = code[name_node.byte_range()].to_string();

        let kind = match container {
            Some(_) if name == "__init__" => DeclarationKind::Constructor,
            Some(_) => DeclarationKind::Method,
            None => DeclarationKind::Function,
        };

        let mut decl = Declaration::new(&name, kind, Range::from_node(&node))
            .with_signature(signature_of(&node, code, "body"))
            .with_visibility(python_visibility(&name));
        if let Some(container) = container {
            decl = decl.with_container(container);
        }
        if let Some(doc) = self.extract_doc_comment(&node, code) {
            decl = decl.with_doc(doc);
        }
        Some(decl)
    }

    /// Docstring of a definition node: the first expression statement of
    /// the body when it is a plain string
    fn extract_docstring(&self, node: Node, code: &str) -> Option<String> {
        let body = node.child_by_field_name("body")?;
        let first_statement = body.child(0)?;

        if first_statement.kind() == "expression_statement" {
            let expr = first_statement.child(0)?;
            if expr.kind() == "string" {
                let raw = &code[expr.byte_range()];
                return Some(normalize_docstring(raw));
            }
        }

        None
    }
}

/// Normalize a docstring literal: strip quotes and per-line indentation
fn normalize_docstring(raw: &str) -> String {
    let trimmed = raw.trim();

    let content = if (trimmed.starts_with("\"\"\"") && trimmed.ends_with("\"\"\"") && trimmed.len() >= 6)
        || (trimmed.starts_with("'''") && trimmed.ends_with("'''") && trimmed.len() >= 6)
    {
        &trimmed[3..trimmed.len() - 3]
    } else if (trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2)
        || (trimmed.starts_with('\'') && trimmed.ends_with('\'') && trimmed.len() >= 2)
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leading-underscore names are private by convention; dunders are not
fn python_visibility(name: &str) -> Visibility {
    if name.starts_with('_') && !(name.starts_with("__") && name.ends_with("__")) {
        Visibility::Private
    } else {
        Visibility::Public
    }
}

impl SourceParser for PythonParser {
    fn parse(&mut self, code: &str) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        match self.parser.parse(code, None) {
            Some(tree) => {
                self.extract_from_node(tree.root_node(), code, None, &mut declarations);
            }
            None => {
                tracing::warn!("tree-sitter produced no tree for Python input");
            }
        }

        declarations
    }

    fn extract_doc_comment(&self, node: &Node, code: &str) -> Option<String> {
        // Docstring first; a decorated definition's leading comment sits
        // above the decorator, so the sibling walk starts at the wrapper
        if let Some(docstring) = self.extract_docstring(*node, code) {
            return Some(docstring);
        }

        let search_node = match node.parent() {
            Some(parent) if parent.kind() == "decorated_definition" => parent,
            _ => *node,
        };

        leading_line_comments(&search_node, code, &["comment"], &[])
    }

    fn language(&self) -> Language {
        Language::Python
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Vec<Declaration> {
        let mut parser = PythonParser::new().expect("parser init");
        parser.parse(code)
    }

    fn find<'a>(decls: &'a [Declaration], name: &str, kind: DeclarationKind) -> &'a Declaration {
        decls
            .iter()
            .find(|d| d.name == name && d.kind == kind)
            .unwrap_or_else(|| panic!("no {kind} named {name} in {decls:#?}"))
    }

    #[test]
    fn test_class_docstring_wins_over_comment() {
        let code = r#"
# Point is a class
class Point:
    """A 2D point."""

    def norm(self):
        return 0
"#;
        let decls = parse(code);
        let class = find(&decls, "Point", DeclarationKind::Class);
        assert_eq!(class.doc_comment.as_deref(), Some("A 2D point."));
    }

    #[test]
    fn test_leading_comment_fallback_without_docstring() {
        let code = r#"
# helper does the thing
def helper():
    pass
"#;
        let decls = parse(code);
        let helper = find(&decls, "helper", DeclarationKind::Function);
        assert_eq!(helper.doc_comment.as_deref(), Some("helper does the thing"));
    }

    #[test]
    fn test_init_is_a_constructor() {
        let code = r#"
class Point:
    def __init__(self, x):
        """Store x."""
        self.x = x

    def _internal(self):
        pass
"#;
        let decls = parse(code);

        let ctor = find(&decls, "__init__", DeclarationKind::Constructor);
        assert_eq!(ctor.container.as_deref(), Some("Point"));
        assert_eq!(ctor.doc_comment.as_deref(), Some("Store x."));
        // Dunders stay public
        assert_eq!(ctor.visibility, Visibility::Public);

        let internal = find(&decls, "_internal", DeclarationKind::Method);
        assert_eq!(internal.visibility, Visibility::Private);
    }

    #[test]
    fn test_multi_line_docstring_normalization() {
        let code = r#"
def run():
    """
    Starts the loop.
    Never returns.
    """
    pass
"#;
        let decls = parse(code);
        let run = find(&decls, "run", DeclarationKind::Function);
        assert_eq!(
            run.doc_comment.as_deref(),
            Some("Starts the loop.\nNever returns.")
        );
    }

    #[test]
    fn test_decorated_method_comment_above_decorator() {
        let code = r#"
class Box:
    # size reports the size
    @property
    def size(self):
        return 1
"#;
        let decls = parse(code);
        let size = find(&decls, "size", DeclarationKind::Method);
        assert_eq!(size.container.as_deref(), Some("Box"));
        assert_eq!(size.doc_comment.as_deref(), Some("size reports the size"));
    }

    #[test]
    fn test_undocumented_function() {
        let decls = parse("def bare():\n    pass\n");
        let bare = find(&decls, "bare", DeclarationKind::Function);
        assert_eq!(bare.doc_comment, None);
    }
}
