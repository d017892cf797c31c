//! Shared test doubles: a configurable resolver fake and an in-memory
//! emit host.

#![allow(dead_code)]

use rustc_hash::{FxHashMap, FxHashSet};
use tsd_ast::{
    FunctionData, ModifierFlags, NodeArena, NodeId, NodeKind, builder, set_parents,
};
use tsd_common::span::Span;
use tsd_emit::{
    AccessorPair, ConstantValue, EmitHost, EmitResolver, SymbolAccessibilityResult, TrackedSymbols,
};

/// Resolver fake. Declarations listed in `invisible` are not visible;
/// entity names in `hidden` cannot be named; `aliases` maps a name to
/// the import-like declarations that must be painted visible to use it;
/// `directives` maps a name to its required type-reference directives.
#[derive(Default)]
pub struct FakeResolver {
    pub invisible: FxHashSet<NodeId>,
    pub hidden: Vec<String>,
    pub aliases: FxHashMap<String, Vec<NodeId>>,
    pub directives: FxHashMap<String, Vec<String>>,
    pub constants: FxHashMap<NodeId, ConstantValue>,
    /// Accessor pairing; unlisted accessors stand alone.
    pub accessor_pairs: FxHashMap<NodeId, AccessorPair>,
    /// Keyword type the oracle synthesizes for unannotated declarations.
    pub oracle_type: Option<tsd_ast::KeywordTypeKind>,
}

impl EmitResolver for FakeResolver {
    fn is_declaration_visible(&self, _arena: &NodeArena, node: NodeId) -> bool {
        !self.invisible.contains(&node)
    }

    fn is_entity_name_visible(
        &self,
        arena: &NodeArena,
        entity_name: NodeId,
        _enclosing: NodeId,
    ) -> SymbolAccessibilityResult {
        let text = builder::entity_name_text(arena, entity_name);
        if self.hidden.contains(&text) {
            SymbolAccessibilityResult::not_accessible(text, NodeId::NONE)
        } else if let Some(decls) = self.aliases.get(&text) {
            SymbolAccessibilityResult::accessible_via(decls.clone())
        } else {
            SymbolAccessibilityResult::accessible()
        }
    }

    fn type_reference_directives(&self, arena: &NodeArena, entity_name: NodeId) -> Vec<String> {
        let text = builder::entity_name_text(arena, entity_name);
        self.directives.get(&text).cloned().unwrap_or_default()
    }

    fn create_type_of_declaration(
        &self,
        arena: &mut NodeArena,
        _decl: NodeId,
        _enclosing: NodeId,
        _tracker: &mut TrackedSymbols,
    ) -> Option<NodeId> {
        self.oracle_type.map(|kind| arena.ty_keyword(kind))
    }

    fn create_return_type_of_signature(
        &self,
        arena: &mut NodeArena,
        _signature: NodeId,
        _enclosing: NodeId,
        _tracker: &mut TrackedSymbols,
    ) -> Option<NodeId> {
        self.oracle_type.map(|kind| arena.ty_keyword(kind))
    }

    fn constant_value(&self, _arena: &NodeArena, member: NodeId) -> Option<ConstantValue> {
        self.constants.get(&member).cloned()
    }

    fn all_accessor_declarations(&self, _arena: &NodeArena, accessor: NodeId) -> AccessorPair {
        self.accessor_pairs
            .get(&accessor)
            .copied()
            .unwrap_or(AccessorPair {
                getter: accessor,
                setter: NodeId::NONE,
                first: accessor,
            })
    }
}

/// In-memory host over a fixed file list.
#[derive(Default)]
pub struct FakeHost {
    pub files: Vec<NodeId>,
    pub libs: Vec<String>,
}

impl EmitHost for FakeHost {
    fn source_files(&self) -> Vec<NodeId> {
        self.files.clone()
    }

    fn default_libs(&self) -> Vec<String> {
        self.libs.clone()
    }
}

/// Route emitter traces to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Finish a source file: allocate the node and fix up parent links.
pub fn source_file(arena: &mut NodeArena, name: &str, statements: Vec<NodeId>) -> NodeId {
    init_tracing();
    let file = arena.add_source_file(name, statements);
    set_parents(arena, file);
    file
}

/// `(name: <ty>)` parameter, unannotated when `ty` is `NodeId::NONE`.
pub fn param(arena: &mut NodeArena, name: &str, ty: NodeId) -> NodeId {
    let name = arena.add_ident(Span::EMPTY, name);
    arena.alloc(
        NodeKind::Parameter {
            name,
            ty,
            initializer: NodeId::NONE,
            dotdotdot: false,
            question: false,
            modifiers: ModifierFlags::empty(),
        },
        Span::EMPTY,
    )
}

/// Function statement with the given pieces; `body` may be `NodeId::NONE`.
pub fn function(
    arena: &mut NodeArena,
    name: &str,
    params: Vec<NodeId>,
    return_type: NodeId,
    body: NodeId,
    modifiers: ModifierFlags,
) -> NodeId {
    arena.alloc(
        NodeKind::Function(FunctionData {
            name: Some(name.into()),
            type_params: Vec::new(),
            params,
            return_type,
            body,
            modifiers,
        }),
        Span::EMPTY,
    )
}

/// Single-declaration variable statement.
pub fn var_stmt(
    arena: &mut NodeArena,
    kind: tsd_ast::VarKind,
    name: &str,
    ty: NodeId,
    initializer: NodeId,
    modifiers: ModifierFlags,
) -> NodeId {
    let name = arena.add_ident(Span::EMPTY, name);
    let decl = arena.alloc(
        NodeKind::VariableDeclaration {
            name,
            ty,
            initializer,
        },
        Span::EMPTY,
    );
    arena.alloc(
        NodeKind::VariableStatement(tsd_ast::VariableStatementData {
            kind,
            declarations: vec![decl],
            modifiers,
        }),
        Span::EMPTY,
    )
}
