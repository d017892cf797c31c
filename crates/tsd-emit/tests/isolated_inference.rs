//! Isolated-declarations emission: local inference from initializers
//! and bodies, const-context narrowing, and inference-failure
//! diagnostics with `invalid` placeholders.

mod support;

use support::{FakeHost, FakeResolver, function, param, source_file, var_stmt};
use tsd_ast::{
    ClassData, EnumData, ModifierFlags, NodeArena, NodeId, NodeKind, VarKind,
};
use tsd_common::span::Span;
use tsd_common::{DeclarationOptions, diagnostics::diagnostic_codes as codes};
use tsd_emit::emit_declarations;

fn isolated_options() -> DeclarationOptions {
    DeclarationOptions {
        isolated_declarations: true,
        strict_null_checks: true,
        ..Default::default()
    }
}

fn emit(
    arena: &mut NodeArena,
    files: Vec<NodeId>,
) -> tsd_emit::DeclarationEmitResult {
    let host = FakeHost {
        files,
        ..Default::default()
    };
    emit_declarations(arena, &FakeResolver::default(), &host, &isolated_options())
}

fn number_lit(arena: &mut NodeArena, text: &str) -> NodeId {
    arena.alloc(
        NodeKind::NumberLit { text: text.into() },
        Span::EMPTY,
    )
}

#[test]
fn const_keeps_literal_freshness_let_widens() {
    let mut arena = NodeArena::new();
    let init_x = number_lit(&mut arena, "42");
    let x = var_stmt(
        &mut arena,
        VarKind::Const,
        "x",
        NodeId::NONE,
        init_x,
        ModifierFlags::EXPORT,
    );
    let init_y = number_lit(&mut arena, "42");
    let y = var_stmt(
        &mut arena,
        VarKind::Let,
        "y",
        NodeId::NONE,
        init_y,
        ModifierFlags::EXPORT,
    );
    let file = source_file(&mut arena, "a.ts", vec![x, y]);

    let result = emit(&mut arena, vec![file]);
    let text = &result.files[0].text;
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert!(text.contains("export declare const x: 42;"), "{text}");
    assert!(text.contains("export declare let y: number;"), "{text}");
}

#[test]
fn array_literal_widens_to_union_array() {
    let mut arena = NodeArena::new();
    let one = number_lit(&mut arena, "1");
    let a = arena.alloc(NodeKind::StringLit("a".into()), Span::EMPTY);
    let one_again = number_lit(&mut arena, "1");
    let array = arena.alloc(
        NodeKind::ArrayLiteral {
            elements: vec![one, a, one_again],
        },
        Span::EMPTY,
    );
    let stmt = var_stmt(
        &mut arena,
        VarKind::Const,
        "xs",
        NodeId::NONE,
        array,
        ModifierFlags::EXPORT,
    );
    let file = source_file(&mut arena, "a.ts", vec![stmt]);

    let result = emit(&mut arena, vec![file]);
    let text = &result.files[0].text;
    assert!(
        text.contains("xs: (number | string)[];"),
        "Union element array: {text}"
    );
}

#[test]
fn as_const_array_becomes_readonly_tuple() {
    let mut arena = NodeArena::new();
    let one = number_lit(&mut arena, "1");
    let a = arena.alloc(NodeKind::StringLit("a".into()), Span::EMPTY);
    let one_again = number_lit(&mut arena, "1");
    let array = arena.alloc(
        NodeKind::ArrayLiteral {
            elements: vec![one, a, one_again],
        },
        Span::EMPTY,
    );
    let as_const = arena.alloc(
        NodeKind::AsExpr {
            expr: array,
            ty: NodeId::NONE,
            is_const: true,
        },
        Span::EMPTY,
    );
    let stmt = var_stmt(
        &mut arena,
        VarKind::Const,
        "xs",
        NodeId::NONE,
        as_const,
        ModifierFlags::EXPORT,
    );
    let file = source_file(&mut arena, "a.ts", vec![stmt]);

    let result = emit(&mut arena, vec![file]);
    let text = &result.files[0].text;
    assert!(
        text.contains("xs: readonly [1, \"a\", 1];"),
        "Const tuple keeps literal elements: {text}"
    );
}

#[test]
fn return_type_is_inferred_from_return_statements() {
    let mut arena = NodeArena::new();
    let one = number_lit(&mut arena, "1");
    let ret_one = arena.alloc(NodeKind::ReturnStatement { expr: one }, Span::EMPTY);
    let a = arena.alloc(NodeKind::StringLit("a".into()), Span::EMPTY);
    let ret_a = arena.alloc(NodeKind::ReturnStatement { expr: a }, Span::EMPTY);
    let body = arena.alloc(
        NodeKind::Block {
            statements: vec![ret_one, ret_a],
        },
        Span::EMPTY,
    );
    let f = function(
        &mut arena,
        "f",
        Vec::new(),
        NodeId::NONE,
        body,
        ModifierFlags::EXPORT,
    );
    let file = source_file(&mut arena, "a.ts", vec![f]);

    let result = emit(&mut arena, vec![file]);
    let text = &result.files[0].text;
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert!(
        text.contains("function f(): number | string;"),
        "Widened return union: {text}"
    );
}

#[test]
fn spread_property_initializer_reports_and_emits_invalid() {
    let mut arena = NodeArena::new();
    let other = arena.add_ident(Span::EMPTY, "other");
    let spread = arena.alloc(NodeKind::SpreadAssignment { expr: other }, Span::EMPTY);
    let object = arena.alloc(
        NodeKind::ObjectLiteral {
            members: vec![spread],
        },
        Span::new(24, 34),
    );
    let prop_name = arena.add_ident(Span::new(20, 21), "p");
    let prop = arena.alloc(
        NodeKind::PropertyDecl {
            name: prop_name,
            ty: NodeId::NONE,
            initializer: object,
            optional: false,
            modifiers: ModifierFlags::empty(),
        },
        Span::new(20, 35),
    );
    let class = arena.alloc(
        NodeKind::Class(ClassData {
            name: Some("C".into()),
            type_params: Vec::new(),
            heritage: Vec::new(),
            members: vec![prop],
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(0, 37),
    );
    let file = source_file(&mut arena, "a.ts", vec![class]);

    let result = emit(&mut arena, vec![file]);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, codes::ISOLATED_OBJECT_SPREAD);
    let out = &result.files[0];
    assert!(out.suppressed);
    assert!(
        out.text.contains("p: invalid;"),
        "Placeholder instead of a panic: {}",
        out.text
    );
}

#[test]
fn unannotated_parameter_reports_and_emits_invalid() {
    let mut arena = NodeArena::new();
    let p = param(&mut arena, "x", NodeId::NONE);
    let body = arena.alloc(
        NodeKind::Block {
            statements: Vec::new(),
        },
        Span::EMPTY,
    );
    let f = function(
        &mut arena,
        "f",
        vec![p],
        NodeId::NONE,
        body,
        ModifierFlags::EXPORT,
    );
    let file = source_file(&mut arena, "a.ts", vec![f]);

    let result = emit(&mut arena, vec![file]);
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.code == codes::ISOLATED_PARAMETER_NEEDS_TYPE),
        "{:?}",
        result.diagnostics
    );
    assert!(result.files[0].suppressed);
    assert!(
        result.files[0].text.contains("x: invalid"),
        "{}",
        result.files[0].text
    );
}

#[test]
fn uncomputable_enum_member_reports_in_isolated_mode() {
    let mut arena = NodeArena::new();
    let a_name = arena.add_ident(Span::EMPTY, "A");
    let a_init = arena.add_ident(Span::EMPTY, "external");
    let a = arena.alloc(
        NodeKind::EnumMember {
            name: a_name,
            initializer: a_init,
        },
        Span::new(11, 23),
    );
    let e = arena.alloc(
        NodeKind::Enum(EnumData {
            name: "E".into(),
            members: vec![a],
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(0, 25),
    );
    let file = source_file(&mut arena, "a.ts", vec![e]);

    let result = emit(&mut arena, vec![file]);
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.code == codes::ISOLATED_ENUM_MEMBER_NOT_COMPUTABLE),
        "{:?}",
        result.diagnostics
    );
}
