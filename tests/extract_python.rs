//! Python extraction against the checked-in fixture file.

use doclink::parsing::SourceParser;
use doclink::parsing::python::PythonParser;
use doclink::{Declaration, DeclarationKind, Target};

const FIXTURE: &str = include_str!("fixtures/python/code.py");

fn parse_fixture() -> Vec<Declaration> {
    let mut parser = PythonParser::new().expect("Failed to create Python parser");
    parser.parse(FIXTURE)
}

fn find<'a>(
    decls: &'a [Declaration],
    name: &str,
    kind: DeclarationKind,
    container: Option<&str>,
) -> &'a Declaration {
    decls
        .iter()
        .find(|d| d.name == name && d.kind == kind && d.container.as_deref() == container)
        .unwrap_or_else(|| panic!("expected {kind} '{name}' (container {container:?}) in fixture"))
}

#[test]
fn test_class_docstring_wins_over_leading_comment() {
    let decls = parse_fixture();
    let type1 = find(&decls, "Type1", DeclarationKind::Class, None);
    // Both a leading comment and a docstring exist; the docstring wins
    assert_eq!(
        type1.doc_comment.as_deref(),
        Some("This is a docstring for the Type1 class.")
    );
}

#[test]
fn test_constructor_and_method() {
    let decls = parse_fixture();

    let ctor = find(
        &decls,
        "__init__",
        DeclarationKind::Constructor,
        Some("Type1"),
    );
    assert_eq!(
        ctor.doc_comment.as_deref(),
        Some("This is a docstring for the __init__ method.")
    );

    let method1 = find(&decls, "method1", DeclarationKind::Method, Some("Type1"));
    assert_eq!(
        method1.doc_comment.as_deref(),
        Some("This is a docstring for method1.")
    );
}

#[test]
fn test_subclass_and_enum_class() {
    let decls = parse_fixture();

    let type2 = find(&decls, "Type2", DeclarationKind::Class, None);
    assert_eq!(
        type2.doc_comment.as_deref(),
        Some("This is a docstring for the Type2 class.")
    );

    // enum.Enum subclasses are still class definitions to the grammar
    let type3 = find(&decls, "Type3", DeclarationKind::Class, None);
    assert_eq!(
        type3.doc_comment.as_deref(),
        Some("This is a docstring for the Type3 class.")
    );
}

#[test]
fn test_module_level_function() {
    let decls = parse_fixture();
    let func = find(&decls, "static_function", DeclarationKind::Function, None);
    assert_eq!(
        func.doc_comment.as_deref(),
        Some("This is a docstring for static_function.")
    );

    let target = Target::parse("static_function").unwrap();
    assert!(target.matches(func));
}

#[test]
fn test_member_target_matching() {
    let decls = parse_fixture();
    let target = Target::parse("Type1.method1()").unwrap();
    let matched: Vec<_> = decls.iter().filter(|d| target.matches(d)).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].container.as_deref(), Some("Type1"));
}

#[test]
fn test_fixture_declaration_count() {
    let decls = parse_fixture();
    // 3 classes + __init__ + method1 + static_function
    assert_eq!(decls.len(), 6, "unexpected declarations: {decls:#?}");
}
