//! Per-run emission state: node-links tables and the rewrite context.
//!
//! Both are allocated fresh for every output file and never shared
//! across runs; the enclosing-declaration scope is an explicit stack
//! with push/pop helpers, not a free-standing global.

use rustc_hash::{FxHashMap, FxHashSet};
use tsd_ast::{NodeArena, NodeId};
use tsd_common::{DeclarationOptions, Diagnostic};

/// Transient per-node state for one file's processing. Each node is
/// finalized at most once per run; duplicate attempts are no-ops
/// through these sets.
#[derive(Default)]
pub struct NodeLinks {
    collected: FxHashSet<NodeId>,
    error_reported: FxHashSet<NodeId>,
    visible_children: FxHashMap<NodeId, Vec<NodeId>>,
}

impl NodeLinks {
    #[must_use]
    pub fn new() -> NodeLinks {
        NodeLinks::default()
    }

    /// Returns `true` the first time `id` is collected.
    pub fn mark_collected(&mut self, id: NodeId) -> bool {
        self.collected.insert(id)
    }

    #[must_use]
    pub fn is_collected(&self, id: NodeId) -> bool {
        self.collected.contains(&id)
    }

    /// Returns `true` the first time an error is reported for `id`
    /// (per-container diagnostic dedup).
    pub fn mark_error_reported(&mut self, id: NodeId) -> bool {
        self.error_reported.insert(id)
    }

    pub fn add_visible_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let children = self.visible_children.entry(parent).or_default();
        if children.contains(&child) {
            false
        } else {
            children.push(child);
            true
        }
    }

    #[must_use]
    pub fn visible_children(&self, parent: NodeId) -> &[NodeId] {
        self.visible_children
            .get(&parent)
            .map_or(&[], Vec::as_slice)
    }

    /// Sort every visible-children list by source position so interleaved
    /// declarations print in original file order.
    pub fn sort_children_by_position(&mut self, arena: &NodeArena) {
        for children in self.visible_children.values_mut() {
            children.sort_by_key(|c| arena.span(*c).start);
        }
    }

    #[must_use]
    pub fn visible_children_map(&self) -> &FxHashMap<NodeId, Vec<NodeId>> {
        &self.visible_children
    }
}

/// Context threaded through every rewrite call: options, the current
/// file, the enclosing-declaration stack, and the diagnostics sink.
pub struct EmitContext {
    pub options: DeclarationOptions,
    current_file: NodeId,
    current_file_name: String,
    scope_stack: Vec<NodeId>,
    diagnostics: Vec<Diagnostic>,
    /// Depth of contexts in which accessibility diagnostics are
    /// suppressed (e.g. re-walking an already-reported subtree).
    suppress_depth: u32,
}

impl EmitContext {
    #[must_use]
    pub fn new(options: DeclarationOptions) -> EmitContext {
        EmitContext {
            options,
            current_file: NodeId::NONE,
            current_file_name: String::new(),
            scope_stack: Vec::new(),
            diagnostics: Vec::new(),
            suppress_depth: 0,
        }
    }

    pub fn begin_file(&mut self, file: NodeId, file_name: &str) {
        self.current_file = file;
        self.current_file_name = file_name.to_string();
        self.scope_stack.clear();
        self.scope_stack.push(file);
    }

    #[must_use]
    pub fn current_file(&self) -> NodeId {
        self.current_file
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.current_file_name
    }

    pub fn push_scope(&mut self, scope: NodeId) {
        self.scope_stack.push(scope);
    }

    pub fn pop_scope(&mut self) {
        debug_assert!(self.scope_stack.len() > 1, "popped the source-file scope");
        self.scope_stack.pop();
    }

    /// The nearest enclosing declaration, used as the anchor for
    /// accessibility queries.
    #[must_use]
    pub fn enclosing_declaration(&self) -> NodeId {
        self.scope_stack.last().copied().unwrap_or(NodeId::NONE)
    }

    pub fn suppress_diagnostics(&mut self) {
        self.suppress_depth += 1;
    }

    pub fn unsuppress_diagnostics(&mut self) {
        debug_assert!(self.suppress_depth > 0);
        self.suppress_depth = self.suppress_depth.saturating_sub(1);
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        if self.suppress_depth == 0 {
            self.diagnostics.push(diagnostic);
        }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}
