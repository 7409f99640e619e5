//! Go parser implementation
//!
//! Uses the tree-sitter-go crate's LANGUAGE constant (converted via .into()).
//! Comment groups above a `type_spec` hang off the enclosing
//! `type_declaration`, so the doc walk hops to the parent for those nodes.

use crate::declaration::{Declaration, DeclarationKind, Visibility};
use crate::error::{ExtractError, ExtractResult};
use crate::parsing::parser::{leading_line_comments, signature_of};
use crate::parsing::{Language, SourceParser};
use crate::types::Range;
use std::any::Any;
use tree_sitter::{Node, Parser};

/// Go language parser
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> ExtractResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| ExtractError::ParserInit {
                language: "Go".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { parser })
    }

    fn extract_from_node(&self, node: Node, code: &str, declarations: &mut Vec<Declaration>) {
        match node.kind() {
            "function_declaration" => {
                if let Some(name_node) = node.child_by_field_name("name") {
                    let name = code[name_node.byte_range()].to_string();
                    let mut decl =
                        Declaration::new(&name, DeclarationKind::Function, Range::from_node(&node))
                            .with_signature(signature_of(&node, code, "body"))
                            .with_visibility(go_visibility(&name));
                    if let Some(doc) = self.extract_doc_comment(&node, code) {
                        decl = decl.with_doc(doc);
                    }
                    declarations.push(decl);
                }
            }
            "method_declaration" => {
                if let Some(decl) = self.process_method(node, code) {
                    declarations.push(decl);
                }
            }
            "type_declaration" => {
                for child in node.children(&mut node.walk()) {
                    match child.kind() {
                        "type_spec" => {
                            if let Some(decl) = self.process_type_spec(child, code) {
                                declarations.push(decl);
                            }
                        }
                        "type_alias" => {
                            if let Some(decl) = self.process_type_alias(child, code) {
                                declarations.push(decl);
                            }
                        }
                        _ => {}
                    }
                }
            }
            _ => {
                for child in node.children(&mut node.walk()) {
                    self.extract_from_node(child, code, declarations);
                }
            }
        }
    }

    fn process_method(&self, node: Node, code: &str) -> Option<Declaration> {
        let name_node = node.child_by_field_name("name")?;
        let name = code[name_node.byte_range()].to_string();

        let mut decl = Declaration::new(&name, DeclarationKind::Method, Range::from_node(&node))
            .with_signature(signature_of(&node, code, "body"))
            .with_visibility(go_visibility(&name));

        if let Some(receiver) = self.receiver_type(node, code) {
            decl = decl.with_container(receiver);
        }
        if let Some(doc) = self.extract_doc_comment(&node, code) {
            decl = decl.with_doc(doc);
        }

        Some(decl)
    }

    /// Receiver type name with any pointer marker stripped
    fn receiver_type(&self, node: Node, code: &str) -> Option<String> {
        let receiver = node.child_by_field_name("receiver")?;
        let mut cursor = receiver.walk();
        for param in receiver.children(&mut cursor) {
            if param.kind() == "parameter_declaration" {
                let type_node = param.child_by_field_name("type")?;
                let type_node = if type_node.kind() == "pointer_type" {
                    type_node.child(1).or(Some(type_node))?
                } else {
                    type_node
                };
                return Some(code[type_node.byte_range()].to_string());
            }
        }
        None
    }

    fn process_type_spec(&self, node: Node, code: &str) -> Option<Declaration> {
        let name_node = node.child_by_field_name("name")?;
        let name = code[name_node.byte_range()].to_string();

        let kind = match node.child_by_field_name("type").map(|t| t.kind()) {
            Some("struct_type") => DeclarationKind::Struct,
            Some("interface_type") => DeclarationKind::Interface,
            _ => DeclarationKind::TypeAlias,
        };

        let mut decl = Declaration::new(&name, kind, Range::from_node(&node))
            .with_signature(first_line(&code[node.byte_range()]))
            .with_visibility(go_visibility(&name));
        if let Some(doc) = self.extract_doc_comment(&node, code) {
            decl = decl.with_doc(doc);
        }
        Some(decl)
    }

    fn process_type_alias(&self, node: Node, code: &str) -> Option<Declaration> {
        let name_node = node.child_by_field_name("name")?;
        let name = code[name_node.byte_range()].to_string();

        let mut decl = Declaration::new(&name, DeclarationKind::TypeAlias, Range::from_node(&node))
            .with_signature(first_line(&code[node.byte_range()]))
            .with_visibility(go_visibility(&name));
        if let Some(doc) = self.extract_doc_comment(&node, code) {
            decl = decl.with_doc(doc);
        }
        Some(decl)
    }
}

/// Go visibility follows capitalization of the first rune
fn go_visibility(name: &str) -> Visibility {
    if name.chars().next().is_some_and(|c| c.is_uppercase()) {
        Visibility::Public
    } else {
        Visibility::Private
    }
}

fn first_line(text: &str) -> String {
    text.lines()
        .next()
        .unwrap_or("")
        .trim_end_matches('{')
        .trim()
        .to_string()
}

impl SourceParser for GoParser {
    fn parse(&mut self, code: &str) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        match self.parser.parse(code, None) {
            Some(tree) => {
                self.extract_from_node(tree.root_node(), code, &mut declarations);
            }
            None => {
                tracing::warn!("tree-sitter produced no tree for Go input");
            }
        }

        declarations
    }

    fn extract_doc_comment(&self, node: &Node, code: &str) -> Option<String> {
        // For type_spec/type_alias nodes the comment precedes the parent
        // type_declaration
        let search_node = match node.kind() {
            "type_spec" | "type_alias" => node.parent()?,
            _ => *node,
        };

        leading_line_comments(&search_node, code, &["comment"], &[])
    }

    fn language(&self) -> Language {
        Language::Go
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Vec<Declaration> {
        let mut parser = GoParser::new().expect("parser init");
        parser.parse(code)
    }

    fn find<'a>(decls: &'a [Declaration], name: &str, kind: DeclarationKind) -> &'a Declaration {
        decls
            .iter()
            .find(|d| d.name == name && d.kind == kind)
            .unwrap_or_else(|| panic!("no {kind} named {name} in {decls:#?}"))
    }

    #[test]
    fn test_struct_and_alias_comments_hop_the_type_declaration() {
        let code = r#"
package main

// Point is a 2D point
type Point struct {
	X int
	Y int
}

// Coord is an alias for int32
type Coord = int32
"#;
        let decls = parse(code);

        let point = find(&decls, "Point", DeclarationKind::Struct);
        assert_eq!(point.doc_comment.as_deref(), Some("Point is a 2D point"));
        assert_eq!(point.visibility, Visibility::Public);

        let coord = find(&decls, "Coord", DeclarationKind::TypeAlias);
        assert_eq!(
            coord.doc_comment.as_deref(),
            Some("Coord is an alias for int32")
        );
    }

    #[test]
    fn test_methods_with_both_receiver_forms() {
        let code = r#"
package main

type Point struct{}

// Move shifts the point (pointer receiver)
func (p *Point) Move(dx int) {}

// Norm returns the norm (value receiver)
func (p Point) Norm() int { return 0 }
"#;
        let decls = parse(code);

        let mv = find(&decls, "Move", DeclarationKind::Method);
        assert_eq!(mv.container.as_deref(), Some("Point"));
        assert_eq!(
            mv.doc_comment.as_deref(),
            Some("Move shifts the point (pointer receiver)")
        );

        let norm = find(&decls, "Norm", DeclarationKind::Method);
        assert_eq!(norm.container.as_deref(), Some("Point"));
    }

    #[test]
    fn test_function_and_multi_line_comment_group() {
        let code = r#"
package main

// run starts the loop.
// It never returns.
func run() {}
"#;
        let decls = parse(code);
        let run = find(&decls, "run", DeclarationKind::Function);
        assert_eq!(
            run.doc_comment.as_deref(),
            Some("run starts the loop.\nIt never returns.")
        );
        assert_eq!(run.visibility, Visibility::Private);
        assert_eq!(run.signature.as_deref(), Some("func run()"));
    }

    #[test]
    fn test_interface_type() {
        let code = r#"
package main

// Mover is an interface
type Mover interface {
	Move(dx int)
}
"#;
        let decls = parse(code);
        let mover = find(&decls, "Mover", DeclarationKind::Interface);
        assert_eq!(mover.doc_comment.as_deref(), Some("Mover is an interface"));
    }

    #[test]
    fn test_undocumented_function() {
        let code = "package main\n\nfunc main() {}\n";
        let decls = parse(code);
        let main = find(&decls, "main", DeclarationKind::Function);
        assert_eq!(main.doc_comment, None);
    }
}
