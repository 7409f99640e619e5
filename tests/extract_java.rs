//! Java extraction against the checked-in fixture file.

use doclink::parsing::SourceParser;
use doclink::parsing::java::JavaParser;
use doclink::{Declaration, DeclarationKind, Target, Visibility};

const FIXTURE: &str = include_str!("fixtures/java/code.java");

fn parse_fixture() -> Vec<Declaration> {
    let mut parser = JavaParser::new().expect("Failed to create Java parser");
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
fn test_class_with_comment() {
    let decls = parse_fixture();
    let class1 = find(&decls, "Class1", DeclarationKind::Class, None);
    assert_eq!(class1.doc_comment.as_deref(), Some("Class1 is a class"));
    assert_eq!(class1.visibility, Visibility::Public);
}

#[test]
fn test_static_method() {
    let decls = parse_fixture();
    let static1 = find(&decls, "static1", DeclarationKind::Method, Some("Class1"));
    assert_eq!(
        static1.doc_comment.as_deref(),
        Some("static1 is a static method")
    );
}

#[test]
fn test_constructor() {
    let decls = parse_fixture();
    let ctor = find(
        &decls,
        "Class1",
        DeclarationKind::Constructor,
        Some("Class1"),
    );
    assert_eq!(ctor.doc_comment.as_deref(), Some("Class1 is a constructor"));
}

#[test]
fn test_instance_method() {
    let decls = parse_fixture();
    let method1 = find(&decls, "method1", DeclarationKind::Method, Some("Class1"));
    assert_eq!(method1.doc_comment.as_deref(), Some("method1 is a method"));
    assert_eq!(
        method1.signature.as_deref(),
        Some("public void method1()"),
        "signature should stop before the body"
    );
}

#[test]
fn test_interface_and_both_interface_methods() {
    let decls = parse_fixture();

    let interface = find(&decls, "Interface1", DeclarationKind::Interface, None);
    assert_eq!(
        interface.doc_comment.as_deref(),
        Some("Interface1 is an interface")
    );

    // The declaration inside the interface has no body
    let declared = find(
        &decls,
        "interfaceMethod1",
        DeclarationKind::Method,
        Some("Interface1"),
    );
    assert_eq!(
        declared.doc_comment.as_deref(),
        Some("interfaceMethod1 is an interface method")
    );

    // The implementation inside Class2 carries its own comment
    let implemented = find(
        &decls,
        "interfaceMethod1",
        DeclarationKind::Method,
        Some("Class2"),
    );
    assert_eq!(
        implemented.doc_comment.as_deref(),
        Some("interfaceMethod1 is an implementation of an interface method")
    );
}

#[test]
fn test_enum_and_constants() {
    let decls = parse_fixture();

    let enum1 = find(&decls, "Enum1", DeclarationKind::Enum, None);
    assert_eq!(enum1.doc_comment.as_deref(), Some("Enum1 is an enum"));

    // ENUM2 follows a comma; its comment must not absorb ENUM1's
    let enum_constant1 = find(&decls, "ENUM1", DeclarationKind::EnumConstant, Some("Enum1"));
    assert_eq!(
        enum_constant1.doc_comment.as_deref(),
        Some("ENUM1 is an enum constant")
    );

    let enum_constant2 = find(&decls, "ENUM2", DeclarationKind::EnumConstant, Some("Enum1"));
    assert_eq!(
        enum_constant2.doc_comment.as_deref(),
        Some("ENUM2 is an enum constant")
    );
}

#[test]
fn test_target_matching_against_fixture() {
    let decls = parse_fixture();

    let target = Target::parse("Class1.method1()").unwrap();
    let matched: Vec<_> = decls.iter().filter(|d| target.matches(d)).collect();
    assert_eq!(matched.len(), 1, "exactly one Class1.method1 expected");
    assert_eq!(matched[0].name, "method1");

    // Same member name in two containers: each target picks its own
    let on_interface = Target::parse("Interface1.interfaceMethod1()").unwrap();
    let matched: Vec<_> = decls.iter().filter(|d| on_interface.matches(d)).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].container.as_deref(), Some("Interface1"));

    let as_type = Target::parse_type("Enum1").unwrap();
    let matched: Vec<_> = decls.iter().filter(|d| as_type.matches(d)).collect();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].kind, DeclarationKind::Enum);
}

#[test]
fn test_fixture_declaration_count() {
    let decls = parse_fixture();
    // 4 types + 3 Class1 members + 1 Class2 method + 1 interface method
    // + 2 enum constants
    assert_eq!(decls.len(), 11, "unexpected declarations: {decls:#?}");
}
