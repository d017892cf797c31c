//! End-to-end declaration emission through the driver: transform path,
//! legacy collector path, late-import resolution, reference directives,
//! and error suppression.

mod support;

use rustc_hash::{FxHashMap, FxHashSet};
use support::{FakeHost, FakeResolver, function, param, source_file, var_stmt};
use tsd_ast::{
    ClassData, EnumData, ImportEqualsTarget, InterfaceData, KeywordTypeKind, ModifierFlags,
    ModuleData, ModuleName, NamedBindings, NodeArena, NodeId, NodeKind, TypeAliasData, VarKind,
};
use tsd_common::span::Span;
use tsd_common::{DeclarationOptions, diagnostics::diagnostic_codes as codes};
use tsd_emit::{AccessorPair, emit_declarations};

fn emit(
    arena: &mut NodeArena,
    resolver: &FakeResolver,
    files: Vec<NodeId>,
    options: DeclarationOptions,
) -> tsd_emit::DeclarationEmitResult {
    let host = FakeHost {
        files,
        ..Default::default()
    };
    emit_declarations(arena, resolver, &host, &options)
}

#[test]
fn emits_annotated_function_with_declare() {
    let mut arena = NodeArena::new();
    let number = arena.ty_keyword(KeywordTypeKind::Number);
    let string = arena.ty_keyword(KeywordTypeKind::String);
    let p = param(&mut arena, "x", number);
    let f = function(
        &mut arena,
        "f",
        vec![p],
        string,
        NodeId::NONE,
        ModifierFlags::EXPORT,
    );
    let file = source_file(&mut arena, "a.ts", vec![f]);

    let result = emit(
        &mut arena,
        &FakeResolver::default(),
        vec![file],
        DeclarationOptions::default(),
    );
    assert_eq!(result.files.len(), 1);
    let out = &result.files[0];
    assert_eq!(out.name, "a.d.ts");
    assert!(!out.suppressed);
    assert!(
        out.text
            .contains("export declare function f(x: number): string;"),
        "Expected function signature: {}",
        out.text
    );
}

#[test]
fn inaccessible_property_type_reports_once_and_suppresses_output() {
    let mut arena = NodeArena::new();
    let prop_name = arena.add_ident(Span::new(20, 21), "p");
    let prop_ty = arena.ty_ref_ident("I");
    let prop = arena.alloc(
        NodeKind::PropertyDecl {
            name: prop_name,
            ty: prop_ty,
            initializer: NodeId::NONE,
            optional: false,
            modifiers: ModifierFlags::empty(),
        },
        Span::new(20, 25),
    );
    let class = arena.alloc(
        NodeKind::Class(ClassData {
            name: Some("C".into()),
            type_params: Vec::new(),
            heritage: Vec::new(),
            members: vec![prop],
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(0, 27),
    );
    let file = source_file(&mut arena, "a.ts", vec![class]);

    let resolver = FakeResolver {
        hidden: vec!["I".into()],
        ..Default::default()
    };
    let result = emit(&mut arena, &resolver, vec![file], DeclarationOptions::default());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, codes::CLASS_PROPERTY_PRIVATE_NAME);
    assert!(result.diagnostics[0].message_text.contains('I'));
    assert!(result.files[0].suppressed, "errors must suppress the file");
}

#[test]
fn unreferenced_import_is_dropped_and_referenced_import_kept() {
    let mut arena = NodeArena::new();
    let used = arena.alloc(
        NodeKind::ImportDecl {
            default_name: None,
            named: NamedBindings::Named(vec![tsd_ast::ImportSpecifier {
                name: "T".into(),
                property_name: None,
                type_only: false,
            }]),
            specifier: "m".into(),
            type_only: false,
        },
        Span::new(0, 24),
    );
    let unused = arena.alloc(
        NodeKind::ImportDecl {
            default_name: None,
            named: NamedBindings::Named(vec![tsd_ast::ImportSpecifier {
                name: "U".into(),
                property_name: None,
                type_only: false,
            }]),
            specifier: "n".into(),
            type_only: false,
        },
        Span::new(25, 49),
    );
    let ty = arena.ty_ref_ident("T");
    let x = var_stmt(
        &mut arena,
        VarKind::Const,
        "x",
        ty,
        NodeId::NONE,
        ModifierFlags::EXPORT,
    );
    let file = source_file(&mut arena, "a.ts", vec![used, unused, x]);

    let resolver = FakeResolver {
        aliases: FxHashMap::from_iter([("T".to_string(), vec![used])]),
        ..Default::default()
    };
    let result = emit(&mut arena, &resolver, vec![file], DeclarationOptions::default());
    let text = &result.files[0].text;
    assert!(
        text.contains("import { T } from \"m\";"),
        "Used import must survive: {text}"
    );
    assert!(!text.contains("\"n\""), "Unused import must be dropped: {text}");
    assert!(text.contains("export declare const x: T;"), "{text}");
}

#[test]
fn mutual_alias_fixed_point_resolves_each_import_once() {
    let mut arena = NodeArena::new();
    let ns = arena.add_ident(Span::EMPTY, "NS");
    let ns_a = arena.add_qualified_name(Span::EMPTY, ns, "A");
    let import_a = arena.alloc(
        NodeKind::ImportEquals {
            name: "A".into(),
            target: ImportEqualsTarget::EntityName(ns_a),
            modifiers: ModifierFlags::empty(),
            type_only: false,
        },
        Span::new(0, 17),
    );
    let ns = arena.add_ident(Span::EMPTY, "NS");
    let ns_b = arena.add_qualified_name(Span::EMPTY, ns, "B");
    let import_b = arena.alloc(
        NodeKind::ImportEquals {
            name: "B".into(),
            target: ImportEqualsTarget::EntityName(ns_b),
            modifiers: ModifierFlags::empty(),
            type_only: false,
        },
        Span::new(18, 35),
    );
    let aliased = arena.ty_ref_ident("T");
    let alias = arena.alloc(
        NodeKind::TypeAlias(TypeAliasData {
            name: "X".into(),
            type_params: Vec::new(),
            ty: aliased,
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(36, 55),
    );
    let file = source_file(&mut arena, "a.ts", vec![import_a, import_b, alias]);

    // T needs A; resolving A reveals B; resolving B points back at A.
    let resolver = FakeResolver {
        aliases: FxHashMap::from_iter([
            ("T".to_string(), vec![import_a]),
            ("NS.A".to_string(), vec![import_b]),
            ("NS.B".to_string(), vec![import_a]),
        ]),
        ..Default::default()
    };
    let result = emit(&mut arena, &resolver, vec![file], DeclarationOptions::default());
    let text = &result.files[0].text;
    assert_eq!(
        text.matches("import A = NS.A;").count(),
        1,
        "A emitted exactly once: {text}"
    );
    assert_eq!(
        text.matches("import B = NS.B;").count(),
        1,
        "B emitted exactly once: {text}"
    );
}

#[test]
fn namespace_with_dropped_member_gets_empty_export_marker() {
    let mut arena = NodeArena::new();
    let visible = arena.alloc(
        NodeKind::Interface(InterfaceData {
            name: "Pub".into(),
            type_params: Vec::new(),
            heritage: Vec::new(),
            members: Vec::new(),
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(14, 38),
    );
    let hidden = arena.alloc(
        NodeKind::Interface(InterfaceData {
            name: "Hidden".into(),
            type_params: Vec::new(),
            heritage: Vec::new(),
            members: Vec::new(),
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(39, 66),
    );
    let block = arena.alloc(
        NodeKind::ModuleBlock {
            statements: vec![visible, hidden],
        },
        Span::new(12, 68),
    );
    let module = arena.alloc(
        NodeKind::Module(ModuleData {
            name: ModuleName::Ident("N".into()),
            body: block,
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(0, 68),
    );
    let file = source_file(&mut arena, "a.ts", vec![module]);

    let resolver = FakeResolver {
        invisible: FxHashSet::from_iter([hidden]),
        ..Default::default()
    };
    let result = emit(&mut arena, &resolver, vec![file], DeclarationOptions::default());
    let text = &result.files[0].text;
    assert!(text.contains("export declare namespace N {"), "{text}");
    assert!(text.contains("interface Pub"), "{text}");
    assert!(!text.contains("Hidden"), "{text}");
    assert!(
        text.contains("export {};"),
        "Dropped member forces a scope marker: {text}"
    );
}

#[test]
fn legacy_collector_emits_transitively_referenced_interface() {
    let mut arena = NodeArena::new();
    let interface = arena.alloc(
        NodeKind::Interface(InterfaceData {
            name: "I".into(),
            type_params: Vec::new(),
            heritage: Vec::new(),
            members: Vec::new(),
            modifiers: ModifierFlags::empty(),
        }),
        Span::new(0, 16),
    );
    let prop_name = arena.add_ident(Span::new(40, 41), "p");
    let prop_ty = arena.ty_ref_ident("I");
    let prop = arena.alloc(
        NodeKind::PropertyDecl {
            name: prop_name,
            ty: prop_ty,
            initializer: NodeId::NONE,
            optional: false,
            modifiers: ModifierFlags::empty(),
        },
        Span::new(40, 45),
    );
    let class = arena.alloc(
        NodeKind::Class(ClassData {
            name: Some("C".into()),
            type_params: Vec::new(),
            heritage: Vec::new(),
            members: vec![prop],
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(17, 47),
    );
    let file = source_file(&mut arena, "a.ts", vec![interface, class]);

    let resolver = FakeResolver {
        invisible: FxHashSet::from_iter([interface]),
        aliases: FxHashMap::from_iter([("I".to_string(), vec![interface])]),
        ..Default::default()
    };

    let direct = emit(&mut arena, &resolver, vec![file], DeclarationOptions::default());
    assert!(
        !direct.files[0].text.contains("interface I"),
        "Transform path trusts the checker's visibility: {}",
        direct.files[0].text
    );

    let legacy = emit(
        &mut arena,
        &resolver,
        vec![file],
        DeclarationOptions {
            legacy_collector: true,
            ..Default::default()
        },
    );
    assert!(
        legacy.files[0].text.contains("interface I"),
        "Collector paints the referenced interface visible: {}",
        legacy.files[0].text
    );
}

#[test]
fn cross_file_reference_gets_path_directive() {
    let mut arena = NodeArena::new();
    let interface = arena.alloc(
        NodeKind::Interface(InterfaceData {
            name: "I".into(),
            type_params: Vec::new(),
            heritage: Vec::new(),
            members: Vec::new(),
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(0, 22),
    );
    let dep = source_file(&mut arena, "dep.ts", vec![interface]);
    let ty = arena.ty_ref_ident("I");
    let x = var_stmt(
        &mut arena,
        VarKind::Const,
        "x",
        ty,
        NodeId::NONE,
        ModifierFlags::EXPORT,
    );
    let main = source_file(&mut arena, "a.ts", vec![x]);

    let resolver = FakeResolver {
        aliases: FxHashMap::from_iter([("I".to_string(), vec![interface])]),
        ..Default::default()
    };
    let result = emit(
        &mut arena,
        &resolver,
        vec![dep, main],
        DeclarationOptions::default(),
    );
    let main_out = result.files.iter().find(|f| f.name == "a.d.ts").unwrap();
    assert!(
        main_out
            .text
            .starts_with("/// <reference path=\"dep.d.ts\" />\n"),
        "Cross-file reference needs a path directive: {}",
        main_out.text
    );
    let dep_out = result.files.iter().find(|f| f.name == "dep.d.ts").unwrap();
    assert!(
        !dep_out.text.contains("<reference path="),
        "Self-contained file needs no directive: {}",
        dep_out.text
    );

    // Bundled into one unit, the dependency is inlined instead.
    let bundled = emit(
        &mut arena,
        &resolver,
        vec![dep, main],
        DeclarationOptions {
            bundle_file: Some("bundle.d.ts".into()),
            ..Default::default()
        },
    );
    assert!(
        !bundled.files[0].text.contains("<reference path="),
        "{}",
        bundled.files[0].text
    );
}

#[test]
fn borrowed_accessor_annotation_reports_only_for_its_owner() {
    let mut arena = NodeArena::new();
    let secret = arena.ty_ref_ident("Secret");
    let getter_name = arena.add_ident(Span::new(20, 21), "p");
    let getter = arena.alloc(
        NodeKind::Accessor {
            is_getter: true,
            name: getter_name,
            params: Vec::new(),
            return_type: secret,
            body: NodeId::NONE,
            modifiers: ModifierFlags::empty(),
        },
        Span::new(20, 40),
    );
    let setter_name = arena.add_ident(Span::new(45, 46), "p");
    let v = param(&mut arena, "v", NodeId::NONE);
    let setter = arena.alloc(
        NodeKind::Accessor {
            is_getter: false,
            name: setter_name,
            params: vec![v],
            return_type: NodeId::NONE,
            body: NodeId::NONE,
            modifiers: ModifierFlags::empty(),
        },
        Span::new(45, 60),
    );
    let class = arena.alloc(
        NodeKind::Class(ClassData {
            name: Some("C".into()),
            type_params: Vec::new(),
            heritage: Vec::new(),
            members: vec![getter, setter],
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(0, 62),
    );
    let file = source_file(&mut arena, "a.ts", vec![class]);

    let pair = AccessorPair {
        getter,
        setter,
        first: getter,
    };
    let resolver = FakeResolver {
        hidden: vec!["Secret".into()],
        accessor_pairs: FxHashMap::from_iter([(getter, pair), (setter, pair)]),
        ..Default::default()
    };
    let result = emit(&mut arena, &resolver, vec![file], DeclarationOptions::default());
    assert_eq!(
        result.diagnostics.len(),
        1,
        "The annotation's owner reports, the borrower stays quiet: {:?}",
        result.diagnostics
    );
}

#[test]
fn type_directives_and_libs_are_prepended() {
    let mut arena = NodeArena::new();
    let ty = arena.ty_ref_ident("Buffer");
    let x = var_stmt(
        &mut arena,
        VarKind::Const,
        "x",
        ty,
        NodeId::NONE,
        ModifierFlags::EXPORT,
    );
    let file = source_file(&mut arena, "a.ts", vec![x]);

    let resolver = FakeResolver {
        directives: FxHashMap::from_iter([("Buffer".to_string(), vec!["node".to_string()])]),
        ..Default::default()
    };
    let host = FakeHost {
        files: vec![file],
        libs: vec!["es2015".into()],
    };
    let result = emit_declarations(&mut arena, &resolver, &host, &DeclarationOptions::default());
    let text = &result.files[0].text;
    assert!(
        text.starts_with("/// <reference types=\"node\" />\n"),
        "{text}"
    );
    assert!(text.contains("/// <reference lib=\"es2015\" />\n"), "{text}");
}

#[test]
fn bundle_mode_merges_files_into_one_output() {
    let mut arena = NodeArena::new();
    let number = arena.ty_keyword(KeywordTypeKind::Number);
    let a = var_stmt(
        &mut arena,
        VarKind::Const,
        "a",
        number,
        NodeId::NONE,
        ModifierFlags::EXPORT,
    );
    let file_a = source_file(&mut arena, "a.ts", vec![a]);
    let string = arena.ty_keyword(KeywordTypeKind::String);
    let b = var_stmt(
        &mut arena,
        VarKind::Const,
        "b",
        string,
        NodeId::NONE,
        ModifierFlags::EXPORT,
    );
    let file_b = source_file(&mut arena, "b.ts", vec![b]);

    let result = emit(
        &mut arena,
        &FakeResolver::default(),
        vec![file_a, file_b],
        DeclarationOptions {
            bundle_file: Some("bundle.d.ts".into()),
            ..Default::default()
        },
    );
    assert_eq!(result.files.len(), 1);
    let out = &result.files[0];
    assert_eq!(out.name, "bundle.d.ts");
    assert!(out.text.contains("const a: number;"), "{}", out.text);
    assert!(out.text.contains("const b: string;"), "{}", out.text);
}

#[test]
fn enum_members_fold_to_constant_literals() {
    let mut arena = NodeArena::new();
    let a_name = arena.add_ident(Span::EMPTY, "A");
    let a_init = arena.alloc(NodeKind::NumberLit { text: "1".into() }, Span::EMPTY);
    let a = arena.alloc(
        NodeKind::EnumMember {
            name: a_name,
            initializer: a_init,
        },
        Span::new(11, 16),
    );
    let b_name = arena.add_ident(Span::EMPTY, "B");
    let b_init = arena.add_ident(Span::EMPTY, "A");
    let b = arena.alloc(
        NodeKind::EnumMember {
            name: b_name,
            initializer: b_init,
        },
        Span::new(18, 27),
    );
    let e = arena.alloc(
        NodeKind::Enum(EnumData {
            name: "E".into(),
            members: vec![a, b],
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(0, 29),
    );
    let file = source_file(&mut arena, "a.ts", vec![e]);

    let resolver = FakeResolver {
        constants: FxHashMap::from_iter([
            (a, tsd_emit::ConstantValue::Number(1.0)),
            (b, tsd_emit::ConstantValue::Number(2.0)),
        ]),
        ..Default::default()
    };
    let result = emit(&mut arena, &resolver, vec![file], DeclarationOptions::default());
    let text = &result.files[0].text;
    assert!(text.contains("A = 1,"), "{text}");
    assert!(text.contains("B = 2,"), "{text}");
}

#[test]
fn private_identifier_members_collapse_to_a_brand() {
    let mut arena = NodeArena::new();
    let secret_name = arena.alloc(NodeKind::PrivateName("secret".into()), Span::new(20, 27));
    let number = arena.ty_keyword(KeywordTypeKind::Number);
    let secret = arena.alloc(
        NodeKind::PropertyDecl {
            name: secret_name,
            ty: number,
            initializer: NodeId::NONE,
            optional: false,
            modifiers: ModifierFlags::empty(),
        },
        Span::new(20, 37),
    );
    let class = arena.alloc(
        NodeKind::Class(ClassData {
            name: Some("C".into()),
            type_params: Vec::new(),
            heritage: Vec::new(),
            members: vec![secret],
            modifiers: ModifierFlags::EXPORT,
        }),
        Span::new(0, 39),
    );
    let file = source_file(&mut arena, "a.ts", vec![class]);

    let result = emit(
        &mut arena,
        &FakeResolver::default(),
        vec![file],
        DeclarationOptions::default(),
    );
    let text = &result.files[0].text;
    assert!(text.contains("#private;"), "{text}");
    assert!(!text.contains("secret"), "{text}");
}
