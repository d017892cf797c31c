//! Node arena: flat storage for AST nodes, addressed by `NodeId`.

use crate::node::NodeKind;
use rustc_hash::FxHashSet;
use tsd_common::span::Span;

/// Stable index of a node in its arena. `NodeId::NONE` is the absent
/// sentinel (no `Option` wrapping at every child slot).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    #[must_use]
    pub fn is_none(self) -> bool {
        self == NodeId::NONE
    }

    #[inline]
    #[must_use]
    pub fn is_some(self) -> bool {
        self != NodeId::NONE
    }
}

/// A single AST node: its kind payload, source span, parent link, and a
/// back-link from output nodes to the checked node they were derived from.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: NodeId,
    pub original: NodeId,
}

/// Flat node storage. Checked trees and emitter-produced output trees
/// share one arena; output nodes carry `original` links for diagnostics.
#[derive(Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    /// Nodes whose leading comments carried an `@internal` marker, as
    /// recorded by the front end.
    internal: FxHashSet<NodeId>,
}

impl NodeArena {
    #[must_use]
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
            internal: FxHashSet::default(),
        }
    }

    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX - 1));
        self.nodes.push(Node {
            kind,
            span,
            parent: NodeId::NONE,
            original: NodeId::NONE,
        });
        id
    }

    /// Allocate a synthesized (spanless) output node linked to `original`.
    pub fn alloc_synthesized(&mut self, kind: NodeKind, original: NodeId) -> NodeId {
        let span = if original.is_some() {
            self.nodes[original.0 as usize].span
        } else {
            Span::EMPTY
        };
        let id = self.alloc(kind, span);
        self.nodes[id.0 as usize].original = original;
        id
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            None
        } else {
            self.nodes.get(id.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            None
        } else {
            self.nodes.get_mut(id.0 as usize)
        }
    }

    /// Kind of `id`. Panics on `NodeId::NONE` — callers check absence first.
    #[inline]
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0 as usize].kind
    }

    #[inline]
    #[must_use]
    pub fn span(&self, id: NodeId) -> Span {
        self.get(id).map_or(Span::EMPTY, |n| n.span)
    }

    #[inline]
    #[must_use]
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.parent)
    }

    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.parent = parent;
        }
    }

    /// The checked node an output node was derived from, or `id` itself
    /// when it is not a synthesized node.
    #[inline]
    #[must_use]
    pub fn original(&self, id: NodeId) -> NodeId {
        match self.get(id) {
            Some(n) if n.original.is_some() => n.original,
            _ => id,
        }
    }

    pub fn set_original(&mut self, id: NodeId, original: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.original = original;
        }
    }

    pub fn mark_internal(&mut self, id: NodeId) {
        self.internal.insert(id);
    }

    #[must_use]
    pub fn is_internal(&self, id: NodeId) -> bool {
        self.internal.contains(&self.original(id)) || self.internal.contains(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk up the parent chain, yielding each ancestor.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            if current.is_none() {
                return None;
            }
            let out = current;
            current = self.parent(current);
            Some(out)
        })
    }
}
