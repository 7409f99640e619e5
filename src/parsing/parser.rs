//! Source parser trait
//!
//! This module defines the common interface that all language parsers
//! must implement to extract declarations and their documentation.

use crate::declaration::Declaration;
use std::any::Any;
use tree_sitter::Node;

/// Common interface for all language parsers
pub trait SourceParser: Send {
    /// Parse source code and extract declarations in source order
    fn parse(&mut self, code: &str) -> Vec<Declaration>;

    /// Extract the documentation comment associated with a node
    ///
    /// Each language has its own conventions:
    /// - Java: `//` line comments and `/** */` blocks above the declaration
    /// - Go: `//` comment groups above the declaration
    /// - Python: docstrings, falling back to `#` comments above
    fn extract_doc_comment(&self, node: &Node, code: &str) -> Option<String>;

    /// Get the language this parser handles
    fn language(&self) -> crate::parsing::Language;

    /// Enable downcasting to concrete parser types
    fn as_any(&self) -> &dyn Any;
}

/// Walk previous siblings of `node`, collecting a block of consecutive
/// line comments. Stops at the first non-comment sibling. Siblings whose
/// kinds appear in `skip` (commas between enum constants, for example)
/// are stepped over without ending the block.
///
/// Returns the comment lines stripped of their `//` prefix and joined
/// with newlines, or None when no comment is directly above.
pub(crate) fn leading_line_comments(
    node: &Node,
    code: &str,
    comment_kinds: &[&str],
    skip: &[&str],
) -> Option<String> {
    let mut doc_lines: Vec<String> = Vec::new();
    let mut current = node.prev_sibling();

    while let Some(sibling) = current {
        let kind = sibling.kind();
        if comment_kinds.contains(&kind) {
            let text = &code[sibling.byte_range()];
            if let Some(stripped) = strip_comment_markers(text) {
                // Walking backwards, so prepend
                doc_lines.insert(0, stripped);
                current = sibling.prev_sibling();
            } else {
                break;
            }
        } else if skip.contains(&kind) {
            current = sibling.prev_sibling();
        } else {
            break;
        }
    }

    let joined = doc_lines
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if joined.is_empty() { None } else { Some(joined) }
}

/// Strip comment markers from a single comment node's text.
///
/// Handles `//` and `#` line comments and `/* */` / `/** */` blocks;
/// block comment bodies lose their leading `*` gutters.
fn strip_comment_markers(text: &str) -> Option<String> {
    if let Some(rest) = text.strip_prefix("//") {
        return Some(rest.trim().to_string());
    }

    if let Some(rest) = text.strip_prefix('#') {
        return Some(rest.trim().to_string());
    }

    if text.starts_with("/*") {
        let body = text
            .trim_start_matches("/**")
            .trim_start_matches("/*")
            .trim_end_matches("*/");
        let lines: Vec<&str> = body
            .lines()
            .map(|line| line.trim().trim_start_matches('*').trim())
            .filter(|line| !line.is_empty())
            .collect();
        return Some(lines.join("\n"));
    }

    None
}

/// Single-line signature of a declaration node: the node's text up to its
/// body (when `body_field` resolves), whitespace-collapsed.
pub(crate) fn signature_of(node: &Node, code: &str, body_field: &str) -> String {
    let start = node.start_byte();
    let end = match node.child_by_field_name(body_field) {
        Some(body) => body.start_byte(),
        None => node.end_byte(),
    };

    code[start..end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(';')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::strip_comment_markers;

    #[test]
    fn test_strip_line_comment() {
        assert_eq!(
            strip_comment_markers("// Class1 is a class").as_deref(),
            Some("Class1 is a class")
        );
        assert_eq!(strip_comment_markers("//").as_deref(), Some(""));
    }

    #[test]
    fn test_strip_block_comment() {
        let text = "/**\n * First line.\n * Second line.\n */";
        assert_eq!(
            strip_comment_markers(text).as_deref(),
            Some("First line.\nSecond line.")
        );
    }

    #[test]
    fn test_non_comment_text() {
        assert_eq!(strip_comment_markers("public class X {}"), None);
    }
}
