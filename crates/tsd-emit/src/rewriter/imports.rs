//! Late-visibility resolution of import-like statements.
//!
//! Imports start unresolved: the statement pass leaves a placeholder,
//! and type rewriting paints aliases "needed" as references resolve.
//! A fixed-point loop then resolves painted aliases to their final form
//! (which can paint further aliases) until the worklist drains, and a
//! substitution pass replaces each placeholder or omits it.

use std::collections::VecDeque;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;
use tsd_ast::{ImportEqualsTarget, NodeArena, NodeId, NodeKind, builder};

use crate::collector::enclosing_declaration_of;
use crate::context::{EmitContext, NodeLinks};
use crate::diagnostics::context_for_error_node;
use crate::resolver::EmitResolver;

use super::{Rewriter, Rewritten};

/// Worklist state for the import fixed point. Fresh per output file.
#[derive(Default)]
pub struct LateStatements {
    /// Import-like statements whose output form is deferred.
    deferred: FxHashSet<NodeId>,
    /// Aliases painted visible but not yet resolved, FIFO.
    worklist: VecDeque<NodeId>,
    marked: FxHashSet<NodeId>,
    /// Final form per original statement; `None` resolves to omission.
    resolved: FxHashMap<NodeId, Option<NodeId>>,
    /// `/// <reference types="..." />` directives required by resolved
    /// references, in first-seen order.
    type_directives: IndexSet<String>,
    /// Source files outside the current one whose declarations were
    /// reached by a resolved reference; the driver turns these into
    /// `/// <reference path="..." />` directives.
    referenced_files: IndexSet<NodeId>,
}

impl LateStatements {
    #[must_use]
    pub fn new() -> LateStatements {
        LateStatements::default()
    }

    /// Paint an alias declaration as needed by some resolved reference.
    /// Idempotent; already-resolved aliases are not revisited.
    pub fn mark_needed(&mut self, alias: NodeId) {
        if alias.is_some() && self.marked.insert(alias) {
            trace!(node = alias.0, "alias painted visible");
            self.worklist.push_back(alias);
        }
    }

    /// Paint `alias` and note the source file that declares it; a
    /// declaration from another file makes the output depend on that
    /// file's declaration output.
    pub fn mark_needed_from(&mut self, arena: &NodeArena, current_file: NodeId, alias: NodeId) {
        self.mark_needed(alias);
        let file = builder::containing_source_file(arena, alias);
        if file.is_some() && file != current_file {
            self.referenced_files.insert(file);
        }
    }

    #[must_use]
    pub fn referenced_files(&self) -> &IndexSet<NodeId> {
        &self.referenced_files
    }

    pub fn record_type_directive(&mut self, directive: String) {
        self.type_directives.insert(directive);
    }

    #[must_use]
    pub fn type_directives(&self) -> &IndexSet<String> {
        &self.type_directives
    }

    pub(super) fn defer(&mut self, stmt: NodeId) {
        self.deferred.insert(stmt);
    }

    /// Drain the painted-alias worklist to a fixed point. Resolving an
    /// import-equals target can paint further aliases, which re-enter
    /// the worklist exactly once each.
    pub(super) fn resolve_fixed_point<R: EmitResolver + ?Sized>(
        &mut self,
        arena: &mut NodeArena,
        resolver: &R,
        ctx: &mut EmitContext,
        links: &mut NodeLinks,
    ) {
        while let Some(alias) = self.worklist.pop_front() {
            if self.resolved.contains_key(&alias) {
                continue;
            }
            let form = self.resolve_alias(arena, resolver, ctx, links, alias);
            self.resolved.insert(alias, form);
        }
    }

    fn resolve_alias<R: EmitResolver + ?Sized>(
        &mut self,
        arena: &mut NodeArena,
        resolver: &R,
        ctx: &mut EmitContext,
        links: &mut NodeLinks,
        alias: NodeId,
    ) -> Option<NodeId> {
        match arena.get(alias).map(|n| n.kind.clone()) {
            Some(NodeKind::ImportDecl { .. }) => Some(arena.deep_copy(alias)),
            Some(NodeKind::ImportEquals { target, .. }) => {
                if let ImportEqualsTarget::EntityName(name) = target {
                    let enclosing = enclosing_declaration_of(arena, name);
                    let result = resolver.is_entity_name_visible(arena, name, enclosing);
                    if result.is_accessible() {
                        let current_file = ctx.current_file();
                        for further in result.aliases_to_make_visible {
                            self.mark_needed_from(arena, current_file, further);
                        }
                    } else {
                        let symbol = result
                            .error_symbol_name
                            .unwrap_or_else(|| builder::entity_name_text(arena, name));
                        report_import_failure(arena, ctx, links, name, &symbol);
                    }
                }
                Some(arena.deep_copy(alias))
            }
            Some(NodeKind::ExportDecl { .. } | NodeKind::ExportAssignment { .. }) => {
                Some(arena.deep_copy(alias))
            }
            _ => None,
        }
    }

    /// Replace placeholders with their resolved forms; imports never
    /// painted visible survive only if the program references them in a
    /// way declaration emit must preserve. Recurses into namespace
    /// bodies, which hold placeholders of their own.
    pub(super) fn substitute_placeholders<R: EmitResolver + ?Sized>(
        &mut self,
        arena: &mut NodeArena,
        resolver: &R,
        output: Vec<NodeId>,
    ) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(output.len());
        for stmt in output {
            if self.deferred.contains(&stmt) {
                match self.resolved.get(&stmt) {
                    Some(Some(form)) => out.push(*form),
                    Some(None) => {}
                    None => {
                        if resolver.is_referenced_alias_declaration(arena, stmt) {
                            out.push(arena.deep_copy(stmt));
                        }
                    }
                }
                continue;
            }
            self.substitute_in_module(arena, resolver, stmt);
            out.push(stmt);
        }
        out
    }

    fn substitute_in_module<R: EmitResolver + ?Sized>(
        &mut self,
        arena: &mut NodeArena,
        resolver: &R,
        stmt: NodeId,
    ) {
        let Some(NodeKind::Module(m)) = arena.get(stmt).map(|n| &n.kind) else {
            return;
        };
        let body = m.body;
        if body.is_none() {
            return;
        }
        let inner = builder::statements_of(arena, body).to_vec();
        let inner = self.substitute_placeholders(arena, resolver, inner);
        if let Some(NodeKind::ModuleBlock { statements }) = arena.get_mut(body).map(|n| &mut n.kind)
        {
            *statements = inner;
        }
    }
}

fn report_import_failure(
    arena: &NodeArena,
    ctx: &mut EmitContext,
    links: &mut NodeLinks,
    reference: NodeId,
    symbol: &str,
) {
    let Some((context, container)) = context_for_error_node(arena, reference) else {
        return;
    };
    if !links.mark_error_reported(container) {
        return;
    }
    let span = arena.span(reference);
    ctx.report(context.to_diagnostic(ctx.file_name(), span, symbol));
}

impl<R: EmitResolver + ?Sized> Rewriter<'_, R> {
    /// Import statements leave a placeholder; their final form depends on
    /// whether anything emitted later still needs them.
    pub(super) fn defer_import(&mut self, stmt: NodeId) -> Rewritten {
        if self.strip_as_internal(stmt) {
            return Rewritten::new();
        }
        self.late.defer(stmt);
        let mut out = Rewritten::new();
        out.push(stmt);
        out
    }

    /// Export declarations and assignments are always preserved; a
    /// default-export expression is itself an accessibility-checked
    /// reference.
    pub(super) fn rewrite_export(&mut self, stmt: NodeId) -> Rewritten {
        let mut out = Rewritten::new();
        let Some(node) = self.arena.get(stmt) else {
            return out;
        };
        match node.kind.clone() {
            NodeKind::ExportAssignment { expr, is_export_equals } => {
                if self
                    .arena
                    .get(expr)
                    .is_some_and(|n| n.kind.is_entity_name())
                {
                    self.check_entity_name(expr);
                }
                let expr = self.arena.deep_copy(expr);
                out.push(self.synth(
                    NodeKind::ExportAssignment {
                        expr,
                        is_export_equals,
                    },
                    stmt,
                ));
            }
            NodeKind::ExportDecl { .. } => out.push(self.arena.deep_copy(stmt)),
            _ => {}
        }
        out
    }
}
