//! Visibility and reachability collection (legacy path).
//!
//! Starting from each file's exported top-level declarations, a FIFO
//! work queue chases every declaration a visible declaration references
//! through its type positions, painting intermediate containers visible
//! along the way. The result is a per-enclosing-declaration list of
//! visible children plus the accessibility diagnostics encountered.

use std::collections::VecDeque;

use tracing::trace;
use tsd_ast::{ImportEqualsTarget, ModifierFlags, NodeArena, NodeId, NodeKind, builder};
use tsd_common::diagnostics::Diagnostic;

use crate::context::NodeLinks;
use crate::diagnostics::{context_for_error_node, outermost_reference};
use crate::resolver::{EmitResolver, TrackedSymbols};

/// Visible-children tables and diagnostics for one collection run.
pub struct CollectorOutput {
    pub links: NodeLinks,
    pub diagnostics: Vec<Diagnostic>,
}

/// One unit of queued work: either a declaration to paint visible, or an
/// entity-name reference whose accessibility is tested when popped.
enum WorkItem {
    Declaration(NodeId),
    Reference { entity_name: NodeId },
}

/// Collect the visible declarations of `files` and the diagnostics for
/// references that cannot be named.
pub fn collect_visible_declarations<R: EmitResolver + ?Sized>(
    arena: &NodeArena,
    resolver: &R,
    files: &[NodeId],
) -> CollectorOutput {
    let mut collector = Collector {
        arena,
        resolver,
        queue: VecDeque::new(),
        links: NodeLinks::new(),
        diagnostics: Vec::new(),
    };
    for &file in files {
        collector.seed_container(file);
    }
    collector.drain();
    collector.links.sort_children_by_position(arena);
    CollectorOutput {
        links: collector.links,
        diagnostics: collector.diagnostics,
    }
}

struct Collector<'a, R: ?Sized> {
    arena: &'a NodeArena,
    resolver: &'a R,
    queue: VecDeque<WorkItem>,
    links: NodeLinks,
    diagnostics: Vec<Diagnostic>,
}

impl<R: EmitResolver + ?Sized> Collector<'_, R> {
    /// Enqueue the exported top-level statements of a source file or
    /// module block.
    fn seed_container(&mut self, container: NodeId) {
        for &stmt in builder::statements_of(self.arena, container) {
            let Some(node) = self.arena.get(stmt) else {
                continue;
            };
            match &node.kind {
                NodeKind::ExportAssignment { expr, .. } => {
                    // `export default x` / `export = x` reference a
                    // declaration directly.
                    if self
                        .arena
                        .get(*expr)
                        .is_some_and(|n| n.kind.is_entity_name())
                    {
                        self.queue.push_back(WorkItem::Reference { entity_name: *expr });
                    }
                }
                kind if kind.is_declaration() => {
                    if self.is_exported_from_container(stmt, container) {
                        self.queue.push_back(WorkItem::Declaration(stmt));
                    }
                }
                _ => {}
            }
        }
    }

    /// Exported per ambient-scoping rules: an explicit modifier, a
    /// non-module source file (all top-levels implicitly exported), or an
    /// ambient module block with no explicit export statements.
    fn is_exported_from_container(&self, stmt: NodeId, container: NodeId) -> bool {
        let modifiers = self.arena.kind(stmt).modifiers();
        if modifiers.contains(ModifierFlags::EXPORT) || modifiers.contains(ModifierFlags::DEFAULT) {
            return true;
        }
        match self.arena.get(container).map(|n| &n.kind) {
            Some(NodeKind::SourceFile { .. }) => !builder::is_external_module(self.arena, container),
            Some(NodeKind::ModuleBlock { statements }) => !statements.iter().any(|s| {
                matches!(
                    self.arena.get(*s).map(|n| &n.kind),
                    Some(NodeKind::ExportDecl { .. } | NodeKind::ExportAssignment { .. })
                )
            }),
            _ => false,
        }
    }

    fn drain(&mut self) {
        while let Some(item) = self.queue.pop_front() {
            match item {
                WorkItem::Declaration(decl) => self.collect_declaration(decl),
                WorkItem::Reference { entity_name } => self.resolve_reference(entity_name),
            }
        }
    }

    /// Test a popped reference's accessibility from its enclosing
    /// declaration; accessible references enqueue their supporting
    /// aliases, inaccessible ones report once per container.
    fn resolve_reference(&mut self, entity_name: NodeId) {
        let enclosing = enclosing_declaration_of(self.arena, entity_name);
        let result = self
            .resolver
            .is_entity_name_visible(self.arena, entity_name, enclosing);
        if result.is_accessible() {
            for alias in result.aliases_to_make_visible {
                self.queue.push_back(WorkItem::Declaration(alias));
            }
        } else {
            let symbol = result
                .error_symbol_name
                .unwrap_or_else(|| builder::entity_name_text(self.arena, entity_name));
            self.report_inaccessible(entity_name, &symbol);
        }
    }

    fn report_inaccessible(&mut self, reference: NodeId, symbol: &str) {
        let error_node = outermost_reference(self.arena, reference);
        let Some((context, container)) = context_for_error_node(self.arena, error_node) else {
            return;
        };
        // One diagnostic per container, no matter how many references
        // inside it fail.
        if !self.links.mark_error_reported(container) {
            return;
        }
        let file = file_name_of(self.arena, error_node);
        let span = self.arena.span(error_node);
        self.diagnostics
            .push(context.to_diagnostic(file, span, symbol));
    }

    fn collect_declaration(&mut self, decl: NodeId) {
        if !self.links.mark_collected(decl) {
            return;
        }
        trace!(node = decl.0, "collect declaration");
        self.ensure_declaration_visible(decl);
        self.visit_declaration_references(decl);
        self.enqueue_container_children(decl);
    }

    /// Attach `decl` as a visible child of each enclosing declaration up
    /// to its source file, so intermediate namespaces are emitted even
    /// when nothing references them directly.
    fn ensure_declaration_visible(&mut self, decl: NodeId) {
        let mut child = decl;
        for ancestor in self.arena.ancestors(decl) {
            let Some(node) = self.arena.get(ancestor) else {
                break;
            };
            if node.kind.is_enclosing_declaration() {
                self.links.add_visible_child(ancestor, child);
                child = ancestor;
                if matches!(node.kind, NodeKind::SourceFile { .. }) {
                    break;
                }
            } else {
                // Wrapper nodes (variable statements, heritage clauses)
                // ride along so the attached child is statement-shaped.
                child = ancestor;
            }
        }
    }

    /// Syntax-directed walk of a declaration's type positions, enqueueing
    /// every entity-name reference found there.
    fn visit_declaration_references(&mut self, decl: NodeId) {
        let Some(node) = self.arena.get(decl) else {
            return;
        };
        match &node.kind {
            NodeKind::Function(f) => {
                self.visit_type_params(&f.type_params);
                self.visit_params(&f.params);
                if f.return_type.is_some() {
                    self.visit_type(f.return_type);
                } else {
                    self.track_absent_type(decl);
                }
            }
            NodeKind::Class(c) => {
                self.visit_type_params(&c.type_params);
                self.visit_heritage(&c.heritage);
            }
            NodeKind::Interface(i) => {
                self.visit_type_params(&i.type_params);
                self.visit_heritage(&i.heritage);
            }
            NodeKind::TypeAlias(t) => {
                self.visit_type_params(&t.type_params);
                self.visit_type(t.ty);
            }
            NodeKind::VariableDeclaration { ty, .. } => {
                if ty.is_some() {
                    self.visit_type(*ty);
                } else {
                    self.track_absent_type(decl);
                }
            }
            NodeKind::VariableStatement(v) => {
                for &d in &v.declarations {
                    self.queue.push_back(WorkItem::Declaration(d));
                }
            }
            NodeKind::PropertyDecl { ty, .. } | NodeKind::PropertySignature { ty, .. } => {
                if ty.is_some() {
                    self.visit_type(*ty);
                } else {
                    self.track_absent_type(decl);
                }
            }
            NodeKind::MethodDecl { sig, .. } | NodeKind::MethodSignature { sig, .. } => {
                self.visit_type_params(&sig.type_params);
                self.visit_params(&sig.params);
                if sig.return_type.is_some() {
                    self.visit_type(sig.return_type);
                } else {
                    self.track_absent_type(decl);
                }
            }
            NodeKind::Constructor { params, .. } => self.visit_params(params),
            NodeKind::Accessor { params, return_type, .. } => {
                self.visit_params(params);
                if return_type.is_some() {
                    self.visit_type(*return_type);
                } else {
                    self.track_absent_type(decl);
                }
            }
            NodeKind::CallSignature(sig) | NodeKind::ConstructSignature(sig) => {
                self.visit_type_params(&sig.type_params);
                self.visit_params(&sig.params);
                self.visit_type(sig.return_type);
            }
            NodeKind::IndexSignature { param, ty, .. } => {
                self.visit_params(std::slice::from_ref(param));
                self.visit_type(*ty);
            }
            NodeKind::Parameter { ty, .. } => {
                if ty.is_some() {
                    self.visit_type(*ty);
                } else {
                    self.track_absent_type(decl);
                }
            }
            NodeKind::ImportEquals { target, .. } => {
                if let ImportEqualsTarget::EntityName(name) = target {
                    self.queue
                        .push_back(WorkItem::Reference { entity_name: *name });
                }
            }
            _ => {}
        }
    }

    fn visit_type_params(&mut self, type_params: &[NodeId]) {
        for &tp in type_params {
            if let Some(NodeKind::TypeParameter {
                constraint,
                default,
                ..
            }) = self.arena.get(tp).map(|n| &n.kind)
            {
                if constraint.is_some() {
                    self.visit_type(*constraint);
                }
                if default.is_some() {
                    self.visit_type(*default);
                }
            }
        }
    }

    fn visit_params(&mut self, params: &[NodeId]) {
        for &param in params {
            self.queue.push_back(WorkItem::Declaration(param));
        }
    }

    fn visit_heritage(&mut self, heritage: &[NodeId]) {
        for &clause in heritage {
            let Some(NodeKind::HeritageClause { types, .. }) =
                self.arena.get(clause).map(|n| &n.kind)
            else {
                continue;
            };
            for &ty in types {
                if let Some(NodeKind::ExpressionWithTypeArgs { expr, type_args }) =
                    self.arena.get(ty).map(|n| &n.kind)
                {
                    if self
                        .arena
                        .get(*expr)
                        .is_some_and(|n| n.kind.is_entity_name())
                    {
                        self.queue
                            .push_back(WorkItem::Reference { entity_name: *expr });
                    }
                    for &arg in type_args {
                        self.visit_type(arg);
                    }
                }
            }
        }
    }

    /// Recursive walk of a type node, enqueueing each named reference.
    fn visit_type(&mut self, ty: NodeId) {
        let Some(node) = self.arena.get(ty) else {
            return;
        };
        match &node.kind {
            NodeKind::TypeReference { name, type_args } => {
                self.queue
                    .push_back(WorkItem::Reference { entity_name: *name });
                for &arg in type_args {
                    self.visit_type(arg);
                }
            }
            NodeKind::TypeQuery { name } => {
                self.queue
                    .push_back(WorkItem::Reference { entity_name: *name });
            }
            NodeKind::ImportTypeNode {
                qualifier,
                type_args,
                ..
            } => {
                // The specifier names a module, not a local symbol; only
                // the type arguments can reference local declarations.
                let _ = qualifier;
                for &arg in type_args {
                    self.visit_type(arg);
                }
            }
            _ => {
                for child in tsd_ast::children_of(self.arena, ty) {
                    let Some(child_node) = self.arena.get(child) else {
                        continue;
                    };
                    if child_node.kind.is_type_node() {
                        self.visit_type(child);
                    } else if child_node.kind.is_declaration() {
                        // Signature members of type literals and function
                        // types carry their own type positions.
                        self.queue.push_back(WorkItem::Declaration(child));
                    } else if matches!(
                        child_node.kind,
                        NodeKind::CallSignature(_)
                            | NodeKind::ConstructSignature(_)
                            | NodeKind::PropertySignature { .. }
                            | NodeKind::MethodSignature { .. }
                            | NodeKind::IndexSignature { .. }
                    ) {
                        self.queue.push_back(WorkItem::Declaration(child));
                    }
                }
            }
        }
    }

    /// No written annotation: ask the oracle what the type would touch
    /// and chase (or report) each tracked symbol.
    fn track_absent_type(&mut self, decl: NodeId) {
        let enclosing = enclosing_declaration_of(self.arena, decl);
        let mut tracker = TrackedSymbols::default();
        self.resolver
            .track_type_of_declaration(self.arena, decl, enclosing, &mut tracker);
        for result in tracker.results {
            if result.is_accessible() {
                for alias in result.aliases_to_make_visible {
                    self.queue.push_back(WorkItem::Declaration(alias));
                }
            } else {
                let symbol = result.error_symbol_name.clone().unwrap_or_default();
                let reference = if result.error_node.is_some() {
                    result.error_node
                } else {
                    decl
                };
                self.report_inaccessible(reference, &symbol);
            }
        }
    }

    /// Containers enqueue their own exported children so nested scopes
    /// are walked to exhaustion.
    fn enqueue_container_children(&mut self, decl: NodeId) {
        let Some(node) = self.arena.get(decl) else {
            return;
        };
        match &node.kind {
            NodeKind::Module(m) => {
                if m.body.is_some() {
                    self.seed_container(m.body);
                }
            }
            NodeKind::Class(c) => {
                for &member in &c.members {
                    if !self.arena.kind(member).modifiers().is_private() {
                        self.queue.push_back(WorkItem::Declaration(member));
                    }
                }
            }
            NodeKind::Interface(i) => {
                for &member in &i.members {
                    self.queue.push_back(WorkItem::Declaration(member));
                }
            }
            _ => {}
        }
    }
}

/// Nearest ancestor that opens a naming scope; the anchor for
/// accessibility queries from `node`.
#[must_use]
pub fn enclosing_declaration_of(arena: &NodeArena, node: NodeId) -> NodeId {
    arena
        .ancestors(node)
        .find(|&a| arena.get(a).is_some_and(|n| n.kind.is_enclosing_declaration()))
        .unwrap_or(NodeId::NONE)
}

/// Source file name owning `node`, for diagnostic locations.
#[must_use]
fn file_name_of(arena: &NodeArena, node: NodeId) -> &str {
    for ancestor in std::iter::once(node).chain(arena.ancestors(node)) {
        if let Some(NodeKind::SourceFile { file_name, .. }) = arena.get(ancestor).map(|n| &n.kind) {
            return file_name;
        }
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{AccessorPair, SymbolAccessibilityResult};
    use rustc_hash::FxHashMap;
    use tsd_ast::{ClassData, InterfaceData, set_parents};
    use tsd_common::diagnostics::diagnostic_codes as codes;
    use tsd_common::span::Span;

    /// Resolver fake: entity names listed in `hidden` are inaccessible;
    /// names in `aliases` are accessible via the mapped declarations.
    #[derive(Default)]
    struct MapResolver {
        hidden: Vec<String>,
        aliases: FxHashMap<String, Vec<NodeId>>,
    }

    impl EmitResolver for MapResolver {
        fn is_declaration_visible(&self, _: &NodeArena, _: NodeId) -> bool {
            true
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

        fn create_type_of_declaration(
            &self,
            _: &mut NodeArena,
            _: NodeId,
            _: NodeId,
            _: &mut crate::resolver::TrackedSymbols,
        ) -> Option<NodeId> {
            None
        }

        fn create_return_type_of_signature(
            &self,
            _: &mut NodeArena,
            _: NodeId,
            _: NodeId,
            _: &mut crate::resolver::TrackedSymbols,
        ) -> Option<NodeId> {
            None
        }

        fn all_accessor_declarations(&self, _: &NodeArena, accessor: NodeId) -> AccessorPair {
            AccessorPair {
                getter: accessor,
                setter: NodeId::NONE,
                first: accessor,
            }
        }
    }

    /// `interface I {}` then `export class C { p: I }` in one module file.
    fn class_referencing_interface(arena: &mut NodeArena) -> (NodeId, NodeId, NodeId, NodeId) {
        let interface = arena.alloc(
            NodeKind::Interface(InterfaceData {
                name: "I".into(),
                type_params: Vec::new(),
                heritage: Vec::new(),
                members: Vec::new(),
                modifiers: ModifierFlags::empty(),
            }),
            Span::new(0, 15),
        );
        let prop_name = arena.add_ident(Span::new(35, 36), "p");
        let prop_ty = arena.ty_ref_ident("I");
        let prop = arena.alloc(
            NodeKind::PropertyDecl {
                name: prop_name,
                ty: prop_ty,
                initializer: NodeId::NONE,
                optional: false,
                modifiers: ModifierFlags::empty(),
            },
            Span::new(35, 40),
        );
        let class = arena.alloc(
            NodeKind::Class(ClassData {
                name: Some("C".into()),
                type_params: Vec::new(),
                heritage: Vec::new(),
                members: vec![prop],
                modifiers: ModifierFlags::EXPORT,
            }),
            Span::new(16, 42),
        );
        let file = arena.add_source_file("a.ts", vec![interface, class]);
        set_parents(arena, file);
        (file, interface, class, prop)
    }

    #[test]
    fn referenced_interface_becomes_visible_in_file_order() {
        let mut arena = NodeArena::new();
        let (file, interface, class, prop) = class_referencing_interface(&mut arena);
        let resolver = MapResolver {
            aliases: FxHashMap::from_iter([("I".to_string(), vec![interface])]),
            ..Default::default()
        };

        let out = collect_visible_declarations(&arena, &resolver, &[file]);
        assert!(out.diagnostics.is_empty());
        // Interface precedes the class in source order despite being
        // collected second.
        assert_eq!(out.links.visible_children(file), &[interface, class]);
        assert_eq!(out.links.visible_children(class), &[prop]);
    }

    #[test]
    fn inaccessible_property_type_reports_once_per_container() {
        let mut arena = NodeArena::new();
        let prop_name = arena.add_ident(Span::new(35, 36), "p");
        // `p: P | P` — two failing references inside one property.
        let ref_a = arena.ty_ref_ident("P");
        let ref_b = arena.ty_ref_ident("P");
        let union = arena.ty_union(vec![ref_a, ref_b]);
        let prop = arena.alloc(
            NodeKind::PropertyDecl {
                name: prop_name,
                ty: union,
                initializer: NodeId::NONE,
                optional: false,
                modifiers: ModifierFlags::empty(),
            },
            Span::new(35, 43),
        );
        let class = arena.alloc(
            NodeKind::Class(ClassData {
                name: Some("C".into()),
                type_params: Vec::new(),
                heritage: Vec::new(),
                members: vec![prop],
                modifiers: ModifierFlags::EXPORT,
            }),
            Span::new(0, 45),
        );
        let file = arena.add_source_file("a.ts", vec![class]);
        set_parents(&mut arena, file);

        let resolver = MapResolver {
            hidden: vec!["P".into()],
            ..Default::default()
        };
        let out = collect_visible_declarations(&arena, &resolver, &[file]);
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].code, codes::CLASS_PROPERTY_PRIVATE_NAME);
        assert!(out.diagnostics[0].message_text.contains('p'));
        assert!(out.diagnostics[0].message_text.contains('P'));
    }

    #[test]
    fn collection_is_idempotent() {
        let mut arena = NodeArena::new();
        let (file, interface, ..) = class_referencing_interface(&mut arena);
        let resolver = MapResolver {
            aliases: FxHashMap::from_iter([("I".to_string(), vec![interface])]),
            ..Default::default()
        };

        let first = collect_visible_declarations(&arena, &resolver, &[file]);
        let second = collect_visible_declarations(&arena, &resolver, &[file]);
        assert_eq!(
            first.links.visible_children_map(),
            second.links.visible_children_map()
        );
    }

    #[test]
    fn non_module_file_seeds_every_top_level() {
        let mut arena = NodeArena::new();
        // Two unexported interfaces in a script file: both implicitly
        // exported.
        let a = arena.alloc(
            NodeKind::Interface(InterfaceData {
                name: "A".into(),
                type_params: Vec::new(),
                heritage: Vec::new(),
                members: Vec::new(),
                modifiers: ModifierFlags::empty(),
            }),
            Span::new(0, 15),
        );
        let b = arena.alloc(
            NodeKind::Interface(InterfaceData {
                name: "B".into(),
                type_params: Vec::new(),
                heritage: Vec::new(),
                members: Vec::new(),
                modifiers: ModifierFlags::empty(),
            }),
            Span::new(16, 31),
        );
        let file = arena.add_source_file("globals.ts", vec![a, b]);
        set_parents(&mut arena, file);

        let out = collect_visible_declarations(&arena, &MapResolver::default(), &[file]);
        assert_eq!(out.links.visible_children(file), &[a, b]);
    }
}
