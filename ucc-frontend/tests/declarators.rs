//! Declarator composition as seen through the public API

use pretty_assertions::assert_eq;
use ucc_frontend::semantic::types::resolve_declarator;
use ucc_frontend::{parse, Node, NodeKind, ParseError};

fn first_decl(source: &str) -> Node {
    let program = parse(source).unwrap();
    let NodeKind::Program { mut gdecls } = program.kind else {
        panic!("expected program");
    };
    let NodeKind::GlobalDecl { mut decls } = gdecls.remove(0).kind else {
        panic!("expected global declaration");
    };
    decls.remove(0)
}

fn resolved(source: &str) -> String {
    resolve_declarator(&first_decl(source), &[]).unwrap().to_string()
}

#[test]
fn test_composition_order() {
    assert_eq!(
        first_decl("int a[5];").to_string(),
        "Decl(name=a, type=ArrayDecl(type=VarDecl(declname=a, type=Type(names=[int])), \
         dim=Constant(type=int, value=5)), init=None)"
    );
    assert_eq!(
        first_decl("int *f();").to_string(),
        "Decl(name=f, type=FuncDecl(args=None, type=PtrDecl(type=VarDecl(declname=f, type=Type(names=[int])))), \
         init=None)"
    );
    assert_eq!(
        first_decl("int (*f)();").to_string(),
        "Decl(name=f, type=PtrDecl(type=FuncDecl(args=None, type=VarDecl(declname=f, type=Type(names=[int])))), \
         init=None)"
    );
}

#[test]
fn test_resolved_types() {
    assert_eq!(resolved("int a[5];"), "int[5]");
    assert_eq!(resolved("int a[5][10];"), "int[5][10]");
    assert_eq!(resolved("int *f();"), "() -> int*");
    assert_eq!(resolved("int a()[3];"), "() -> int[3]");
    assert_eq!(resolved("int (*f)();"), "(() -> int)*");
    assert_eq!(resolved("char *names[4];"), "char*[4]");
}

#[test]
fn test_parameters_resolve_in_order() {
    assert_eq!(resolved("void f(int a, float b[], char *c);"), "(int, float[], char*) -> void");
    assert_eq!(resolved("int g(void);"), "() -> int");
}

#[test]
fn test_specifier_without_declarator_is_rejected() {
    assert!(parse("x;").is_ok());

    let err = parse("int ;").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));
}
