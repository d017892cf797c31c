//! Node creation methods (add_* methods) on the `NodeArena`.
//!
//! Checked trees are built with explicit spans; synthesized output nodes
//! (the `ty_*` family) are spanless and typically get an `original` link
//! from the caller via `alloc_synthesized`.

use crate::arena::{NodeArena, NodeId};
use crate::modifiers::ModifierFlags;
use crate::node::*;
use tsd_common::span::Span;

impl NodeArena {
    pub fn add_ident(&mut self, span: Span, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Ident(text.into()), span)
    }

    pub fn add_private_name(&mut self, span: Span, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::PrivateName(text.into()), span)
    }

    pub fn add_qualified_name(
        &mut self,
        span: Span,
        left: NodeId,
        right: impl Into<String>,
    ) -> NodeId {
        let id = self.alloc(
            NodeKind::QualifiedName {
                left,
                right: right.into(),
            },
            span,
        );
        self.set_parent(left, id);
        id
    }

    pub fn add_source_file(
        &mut self,
        file_name: impl Into<String>,
        statements: Vec<NodeId>,
    ) -> NodeId {
        let id = self.alloc(
            NodeKind::SourceFile {
                file_name: file_name.into(),
                statements: statements.clone(),
            },
            Span::EMPTY,
        );
        for stmt in statements {
            self.set_parent(stmt, id);
        }
        id
    }

    // ----- Synthesized type nodes -----

    pub fn ty_keyword(&mut self, kind: KeywordTypeKind) -> NodeId {
        self.alloc(NodeKind::KeywordType(kind), Span::EMPTY)
    }

    pub fn ty_literal(&mut self, value: LiteralValue) -> NodeId {
        self.alloc(NodeKind::LiteralType(value), Span::EMPTY)
    }

    pub fn ty_string_literal(&mut self, text: impl Into<String>) -> NodeId {
        self.ty_literal(LiteralValue::String(text.into()))
    }

    pub fn ty_number_literal(&mut self, text: impl Into<String>, negative: bool) -> NodeId {
        self.ty_literal(LiteralValue::Number {
            text: text.into(),
            negative,
        })
    }

    pub fn ty_ref_ident(&mut self, name: impl Into<String>) -> NodeId {
        let ident = self.add_ident(Span::EMPTY, name);
        self.ty_ref(ident, Vec::new())
    }

    pub fn ty_ref(&mut self, name: NodeId, type_args: Vec<NodeId>) -> NodeId {
        let id = self.alloc(NodeKind::TypeReference { name, type_args }, Span::EMPTY);
        self.set_parent(name, id);
        id
    }

    pub fn ty_array(&mut self, element: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::ArrayType { element }, Span::EMPTY);
        self.set_parent(element, id);
        id
    }

    pub fn ty_tuple(&mut self, elements: Vec<NodeId>) -> NodeId {
        let id = self.alloc(
            NodeKind::TupleType {
                elements: elements.clone(),
            },
            Span::EMPTY,
        );
        for e in elements {
            self.set_parent(e, id);
        }
        id
    }

    pub fn ty_operator(&mut self, op: TypeOperatorKind, ty: NodeId) -> NodeId {
        let id = self.alloc(NodeKind::TypeOperator { op, ty }, Span::EMPTY);
        self.set_parent(ty, id);
        id
    }

    /// Build a union; a single member collapses to the member itself and
    /// an empty list to `never`.
    pub fn ty_union(&mut self, members: Vec<NodeId>) -> NodeId {
        match members.len() {
            0 => self.ty_keyword(KeywordTypeKind::Never),
            1 => members[0],
            _ => {
                let id = self.alloc(
                    NodeKind::UnionType {
                        members: members.clone(),
                    },
                    Span::EMPTY,
                );
                for m in members {
                    self.set_parent(m, id);
                }
                id
            }
        }
    }

    pub fn ty_type_literal(&mut self, members: Vec<NodeId>) -> NodeId {
        let id = self.alloc(
            NodeKind::TypeLiteral {
                members: members.clone(),
            },
            Span::EMPTY,
        );
        for m in members {
            self.set_parent(m, id);
        }
        id
    }

    pub fn ty_function(&mut self, params: Vec<NodeId>, return_type: NodeId) -> NodeId {
        let id = self.alloc(
            NodeKind::FunctionType(SignatureData {
                type_params: Vec::new(),
                params: params.clone(),
                return_type,
            }),
            Span::EMPTY,
        );
        for p in params {
            self.set_parent(p, id);
        }
        self.set_parent(return_type, id);
        id
    }

    pub fn ty_invalid(&mut self) -> NodeId {
        self.alloc(NodeKind::InvalidType, Span::EMPTY)
    }

    /// `name(?): ty` property signature for synthesized type literals.
    pub fn synth_property_signature(
        &mut self,
        name: impl Into<String>,
        ty: NodeId,
        optional: bool,
        readonly: bool,
    ) -> NodeId {
        let name_id = self.add_ident(Span::EMPTY, name);
        let modifiers = if readonly {
            ModifierFlags::READONLY
        } else {
            ModifierFlags::empty()
        };
        let id = self.alloc(
            NodeKind::PropertySignature {
                name: name_id,
                ty,
                optional,
                modifiers,
            },
            Span::EMPTY,
        );
        self.set_parent(name_id, id);
        self.set_parent(ty, id);
        id
    }
}

/// Text of an identifier or private name; `None` otherwise.
#[must_use]
pub fn ident_text(arena: &NodeArena, id: NodeId) -> Option<&str> {
    match arena.get(id).map(|n| &n.kind) {
        Some(NodeKind::Ident(text) | NodeKind::PrivateName(text)) => Some(text),
        _ => None,
    }
}

/// Leftmost identifier of an entity name (`A` in `A.B.C`).
#[must_use]
pub fn leftmost_ident(arena: &NodeArena, mut id: NodeId) -> NodeId {
    loop {
        match arena.get(id).map(|n| &n.kind) {
            Some(NodeKind::QualifiedName { left, .. }) => id = *left,
            Some(NodeKind::PropertyAccess { expr, .. }) => id = *expr,
            _ => return id,
        }
    }
}

/// Render an entity name (`A.B.C`) to text.
#[must_use]
pub fn entity_name_text(arena: &NodeArena, id: NodeId) -> String {
    match arena.get(id).map(|n| &n.kind) {
        Some(NodeKind::Ident(text) | NodeKind::PrivateName(text)) => text.clone(),
        Some(NodeKind::QualifiedName { left, right }) => {
            format!("{}.{}", entity_name_text(arena, *left), right)
        }
        Some(NodeKind::PropertyAccess { expr, name }) => {
            format!("{}.{}", entity_name_text(arena, *expr), name)
        }
        _ => String::new(),
    }
}

/// Display text for a member name node (identifier, literal, private, or
/// `[computed]`).
#[must_use]
pub fn member_name_text(arena: &NodeArena, id: NodeId) -> String {
    match arena.get(id).map(|n| &n.kind) {
        Some(NodeKind::Ident(text)) => text.clone(),
        Some(NodeKind::PrivateName(text)) => text.clone(),
        Some(NodeKind::StringLit(text)) => format!("\"{text}\""),
        Some(NodeKind::NumberLit { text }) => text.clone(),
        Some(NodeKind::ComputedName { expr }) => {
            format!("[{}]", entity_name_text(arena, *expr))
        }
        _ => String::new(),
    }
}

/// A source file is an external module when any top-level statement is
/// import/export syntax or carries an `export` modifier.
#[must_use]
pub fn is_external_module(arena: &NodeArena, file: NodeId) -> bool {
    match arena.get(file).map(|n| &n.kind) {
        Some(NodeKind::SourceFile { statements, .. }) => statements.iter().any(|s| {
            arena.get(*s).is_some_and(|n| {
                n.kind.is_module_marker()
                    || n.kind.modifiers().contains(ModifierFlags::EXPORT)
                    || n.kind.modifiers().contains(ModifierFlags::DEFAULT)
            })
        }),
        _ => false,
    }
}

/// File name of a source-file node.
#[must_use]
pub fn source_file_name(arena: &NodeArena, file: NodeId) -> &str {
    match arena.get(file).map(|n| &n.kind) {
        Some(NodeKind::SourceFile { file_name, .. }) => file_name,
        _ => "",
    }
}

/// Source file containing `node`, found by climbing parent links.
/// `NodeId::NONE` when the node is detached.
#[must_use]
pub fn containing_source_file(arena: &NodeArena, node: NodeId) -> NodeId {
    let mut current = node;
    while current.is_some() {
        if matches!(
            arena.get(current).map(|n| &n.kind),
            Some(NodeKind::SourceFile { .. })
        ) {
            return current;
        }
        current = arena.parent(current);
    }
    NodeId::NONE
}

/// Statements of a source file or module block.
#[must_use]
pub fn statements_of(arena: &NodeArena, id: NodeId) -> &[NodeId] {
    match arena.get(id).map(|n| &n.kind) {
        Some(
            NodeKind::SourceFile { statements, .. } | NodeKind::ModuleBlock { statements },
        ) => statements,
        _ => &[],
    }
}
