//! Java parser implementation
//!
//! Walks the tree-sitter-java AST and extracts every declaration that can
//! carry a leading comment. Java uses distinct node kinds for line and
//! block comments, so the comment walk accepts both.

use crate::declaration::{Declaration, DeclarationKind, Visibility};
use crate::error::{ExtractError, ExtractResult};
use crate::parsing::parser::{leading_line_comments, signature_of};
use crate::parsing::{Language, SourceParser};
use crate::types::Range;
use std::any::Any;
use tree_sitter::{Node, Parser};

const COMMENT_KINDS: &[&str] = &["line_comment", "block_comment"];

/// Java language parser
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> ExtractResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| ExtractError::ParserInit {
                language: "Java".to_string(),
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
            "class_declaration" => {
                self.process_type(node, code, DeclarationKind::Class, declarations);
            }
            "interface_declaration" => {
                self.process_type(node, code, DeclarationKind::Interface, declarations);
            }
            "enum_declaration" => {
                self.process_enum(node, code, declarations);
            }
            "method_declaration" => {
                if let Some(decl) = self.process_member(
                    node,
                    code,
                    DeclarationKind::Method,
                    container,
                ) {
                    declarations.push(decl);
                }
            }
            "constructor_declaration" => {
                if let Some(decl) = self.process_member(
                    node,
                    code,
                    DeclarationKind::Constructor,
                    container,
                ) {
                    declarations.push(decl);
                }
            }
            _ => {
                // Recurse through structural nodes (program, bodies)
                for child in node.children(&mut node.walk()) {
                    self.extract_from_node(child, code, container, declarations);
                }
            }
        }
    }

    /// Extract a class or interface declaration, then its members
    fn process_type(
        &self,
        node: Node,
        code: &str,
        kind: DeclarationKind,
        declarations: &mut Vec<Declaration>,
    ) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = code[name_node.byte_range()].to_string();

        let decl = self.build_declaration(node, code, &name, kind, None);
        declarations.push(decl);

        if let Some(body) = node.child_by_field_name("body") {
            for child in body.children(&mut body.walk()) {
                self.extract_from_node(child, code, Some(&name), declarations);
            }
        }
    }

    /// Extract an enum declaration and its constants
    fn process_enum(&self, node: Node, code: &str, declarations: &mut Vec<Declaration>) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = code[name_node.byte_range()].to_string();

        let decl = self.build_declaration(node, code, &name, DeclarationKind::Enum, None);
        declarations.push(decl);

        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        for child in body.children(&mut body.walk()) {
            match child.kind() {
                "enum_constant" => {
                    if let Some(constant_name) = child.child_by_field_name("name") {
                        let constant = code[constant_name.byte_range()].to_string();
                        let mut decl = Declaration::new(
                            constant,
                            DeclarationKind::EnumConstant,
                            Range::from_node(&child),
                        )
                        .with_container(&name)
                        .with_visibility(Visibility::Public);
                        if let Some(doc) = self.extract_doc_comment(&child, code) {
                            decl = decl.with_doc(doc);
                        }
                        declarations.push(decl);
                    }
                }
                // Methods and fields may follow the constants
                "enum_body_declarations" => {
                    for member in child.children(&mut child.walk()) {
                        self.extract_from_node(member, code, Some(&name), declarations);
                    }
                }
                _ => {}
            }
        }
    }

    fn process_member(
        &self,
        node: Node,
        code: &str,
        kind: DeclarationKind,
        container: Option<&str>,
    ) -> Option<Declaration> {
        let name_node = node.child_by_field_name("name")?;
        let name = code[name_node.byte_range()].to_string();

        let mut decl = self.build_declaration(node, code, &name, kind, container);
        if let Some(container) = container {
            decl = decl.with_container(container);
        }
        Some(decl)
    }

    fn build_declaration(
        &self,
        node: Node,
        code: &str,
        name: &str,
        kind: DeclarationKind,
        _container: Option<&str>,
    ) -> Declaration {
        let mut decl = Declaration::new(name, kind, Range::from_node(&node))
            .with_signature(signature_of(&node, code, "body"))
            .with_visibility(visibility_of(node, code));

        if let Some(doc) = self.extract_doc_comment(&node, code) {
            decl = decl.with_doc(doc);
        }

        decl
    }
}

/// Read visibility off the declaration's modifiers node.
/// Anything other than an explicit `public` or `private` (including
/// `protected` and the package-private default) maps to Module.
fn visibility_of(node: Node, code: &str) -> Visibility {
    for child in node.children(&mut node.walk()) {
        if child.kind() == "modifiers" {
            for token in code[child.byte_range()].split_whitespace() {
                match token {
                    "public" => return Visibility::Public,
                    "private" => return Visibility::Private,
                    _ => {}
                }
            }
        }
    }
    Visibility::Module
}

impl SourceParser for JavaParser {
    fn parse(&mut self, code: &str) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        match self.parser.parse(code, None) {
            Some(tree) => {
                self.extract_from_node(tree.root_node(), code, None, &mut declarations);
            }
            None => {
                tracing::warn!("tree-sitter produced no tree for Java input");
            }
        }

        declarations
    }

    fn extract_doc_comment(&self, node: &Node, code: &str) -> Option<String> {
        // Commas separate enum constants; they must not end the comment walk
        leading_line_comments(node, code, COMMENT_KINDS, &[","])
    }

    fn language(&self) -> Language {
        Language::Java
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
