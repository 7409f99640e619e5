//! Go extraction against the checked-in fixture file.

use doclink::parsing::SourceParser;
use doclink::parsing::go::GoParser;
use doclink::{Declaration, DeclarationKind, Target, Visibility};

const FIXTURE: &str = include_str!("fixtures/go/code.go");

fn parse_fixture() -> Vec<Declaration> {
    let mut parser = GoParser::new().expect("Failed to create Go parser");
    parser.parse(FIXTURE)
}

fn find<'a>(decls: &'a [Declaration], name: &str, kind: DeclarationKind) -> &'a Declaration {
    decls
        .iter()
        .find(|d| d.name == name && d.kind == kind)
        .unwrap_or_else(|| panic!("expected {kind} '{name}' in fixture"))
}

#[test]
fn test_struct_comment_hangs_off_type_declaration() {
    let decls = parse_fixture();
    let struct1 = find(&decls, "Struct1", DeclarationKind::Struct);
    assert_eq!(struct1.doc_comment.as_deref(), Some("Struct1 is a struct"));
    // Exported names are public in Go
    assert_eq!(struct1.visibility, Visibility::Public);
}

#[test]
fn test_type_alias() {
    let decls = parse_fixture();
    let alias1 = find(&decls, "Alias1", DeclarationKind::TypeAlias);
    assert_eq!(
        alias1.doc_comment.as_deref(),
        Some("Alias1 is an alias for int32")
    );
}

#[test]
fn test_interface() {
    let decls = parse_fixture();
    let interface1 = find(&decls, "Interface1", DeclarationKind::Interface);
    assert_eq!(
        interface1.doc_comment.as_deref(),
        Some("Interface1 is an interface")
    );
}

#[test]
fn test_pointer_and_value_receiver_methods() {
    let decls = parse_fixture();

    let method1 = find(&decls, "method1", DeclarationKind::Method);
    assert_eq!(
        method1.container.as_deref(),
        Some("Struct1"),
        "pointer receiver should resolve to the bare type name"
    );
    assert_eq!(
        method1.doc_comment.as_deref(),
        Some("method1 is a method with a pointer receiver")
    );
    assert_eq!(method1.visibility, Visibility::Private);

    let method2 = find(&decls, "method2", DeclarationKind::Method);
    assert_eq!(method2.container.as_deref(), Some("Struct1"));
    assert_eq!(
        method2.doc_comment.as_deref(),
        Some("method2 is a method with a value receiver")
    );
}

#[test]
fn test_free_function() {
    let decls = parse_fixture();
    let func = find(&decls, "staticFunction", DeclarationKind::Function);
    assert_eq!(func.container, None);
    assert_eq!(
        func.doc_comment.as_deref(),
        Some("staticFunction is a free function")
    );

    let target = Target::parse("staticFunction").unwrap();
    assert!(target.matches(func));
}

#[test]
fn test_method_target_matches_through_receiver() {
    let decls = parse_fixture();
    let target = Target::parse("Struct1.method1()").unwrap();
    let matched: Vec<_> = decls.iter().filter(|d| target.matches(d)).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].name, "method1");
}

#[test]
fn test_fixture_declaration_count() {
    let decls = parse_fixture();
    // 3 types + 2 methods + 1 function
    assert_eq!(decls.len(), 6, "unexpected declarations: {decls:#?}");
}
