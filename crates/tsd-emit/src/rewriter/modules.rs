//! Namespace and module rewriting, including the export-marker rule,
//! plus interfaces and type aliases.

use tsd_ast::{
    InterfaceData, ModifierFlags, ModuleData, ModuleName, NodeId, NodeKind, TypeAliasData,
};

use crate::resolver::EmitResolver;

use super::{Rewriter, Rewritten};

impl<R: EmitResolver + ?Sized> Rewriter<'_, R> {
    pub(super) fn rewrite_module(&mut self, stmt: NodeId) -> Rewritten {
        let mut out = Rewritten::new();
        if !self.is_statement_visible(stmt) {
            return out;
        }
        let Some(NodeKind::Module(m)) = self.arena.get(stmt).map(|n| n.kind.clone()) else {
            return out;
        };
        let modifiers = self.output_modifiers(stmt);

        if m.body.is_none() {
            // Bodyless ambient shorthand (`declare module "m";`).
            out.push(self.synth(
                NodeKind::Module(ModuleData {
                    name: m.name,
                    body: NodeId::NONE,
                    modifiers,
                }),
                stmt,
            ));
            return out;
        }

        let ambient = m.modifiers.contains(ModifierFlags::AMBIENT)
            || matches!(m.name, ModuleName::StringLiteral(_));
        self.ctx.push_scope(stmt);
        if ambient {
            self.enter_ambient();
        }

        let original_statements: Vec<NodeId> =
            tsd_ast::builder::statements_of(self.arena, m.body).to_vec();
        let mut statements: Vec<NodeId> = Vec::with_capacity(original_statements.len());
        let mut dropped_any = false;
        for &inner in &original_statements {
            let before = statements.len();
            statements.extend(self.rewrite_statement(inner));
            if statements.len() == before
                && self
                    .arena
                    .get(inner)
                    .is_some_and(|n| n.kind.is_declaration())
            {
                dropped_any = true;
            }
        }
        self.apply_export_marker_rule(&original_statements, &mut statements, dropped_any);

        if ambient {
            self.leave_ambient();
        }
        self.ctx.pop_scope();

        let block = self.synth(NodeKind::ModuleBlock { statements }, m.body);
        out.push(self.synth(
            NodeKind::Module(ModuleData {
                name: m.name,
                body: block,
                modifiers,
            }),
            stmt,
        ));
        out
    }

    /// Decide between stripping redundant `export` keywords and forcing a
    /// scope boundary with an empty export:
    /// - an explicit export-declaration/assignment survives → leave the
    ///   members untouched, mixed visibility is intentional;
    /// - no member ever carried an explicit `export` → all were
    ///   implicitly exported, the keywords are redundant and removed;
    /// - some members were filtered out → append `export {}` so ambient
    ///   scoping stops re-exporting the remainder.
    fn apply_export_marker_rule(
        &mut self,
        original: &[NodeId],
        statements: &mut Vec<NodeId>,
        dropped_any: bool,
    ) {
        let has_boundary_marker = statements.iter().any(|&s| {
            matches!(
                self.arena.get(s).map(|n| &n.kind),
                Some(NodeKind::ExportDecl { .. } | NodeKind::ExportAssignment { .. })
            )
        });
        if has_boundary_marker {
            return;
        }
        let any_explicit_export = original.iter().any(|&s| {
            self.arena
                .get(s)
                .is_some_and(|n| n.kind.modifiers().contains(ModifierFlags::EXPORT))
        });
        if !any_explicit_export {
            for &s in statements.iter() {
                if let Some(node) = self.arena.get_mut(s) {
                    strip_export_modifier(&mut node.kind);
                }
            }
        } else if dropped_any {
            let marker = self.arena.alloc_synthesized(
                NodeKind::ExportDecl {
                    named: Some(Vec::new()),
                    specifier: None,
                    type_only: false,
                },
                NodeId::NONE,
            );
            statements.push(marker);
        }
    }

    pub(super) fn rewrite_interface(&mut self, stmt: NodeId) -> Rewritten {
        let mut out = Rewritten::new();
        if !self.is_statement_visible(stmt) {
            return out;
        }
        let Some(NodeKind::Interface(i)) = self.arena.get(stmt).map(|n| n.kind.clone()) else {
            return out;
        };

        self.ctx.push_scope(stmt);
        let type_params = self.rewrite_type_parameters(&i.type_params);
        let heritage = self.rewrite_interface_heritage(&i.heritage);
        let members = i
            .members
            .iter()
            .filter_map(|&m| self.rewrite_member_signature(m))
            .collect();
        self.ctx.pop_scope();

        let modifiers = self.output_modifiers(stmt);
        out.push(self.synth(
            NodeKind::Interface(InterfaceData {
                name: i.name,
                type_params,
                heritage,
                members,
                modifiers,
            }),
            stmt,
        ));
        out
    }

    fn rewrite_interface_heritage(&mut self, heritage: &[NodeId]) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(heritage.len());
        for &clause in heritage {
            let Some(NodeKind::HeritageClause { kind, types }) =
                self.arena.get(clause).map(|n| n.kind.clone())
            else {
                continue;
            };
            let mut rewritten = Vec::with_capacity(types.len());
            for ty in types {
                let Some(NodeKind::ExpressionWithTypeArgs { expr, type_args }) =
                    self.arena.get(ty).map(|n| n.kind.clone())
                else {
                    continue;
                };
                if self
                    .arena
                    .get(expr)
                    .is_some_and(|n| n.kind.is_entity_name())
                {
                    self.check_entity_name(expr);
                }
                let expr = self.arena.deep_copy(expr);
                let type_args = self.rewrite_type_list(&type_args);
                rewritten.push(self.synth(
                    NodeKind::ExpressionWithTypeArgs { expr, type_args },
                    ty,
                ));
            }
            out.push(self.synth(
                NodeKind::HeritageClause {
                    kind,
                    types: rewritten,
                },
                clause,
            ));
        }
        out
    }

    pub(super) fn rewrite_type_alias(&mut self, stmt: NodeId) -> Rewritten {
        let mut out = Rewritten::new();
        if !self.is_statement_visible(stmt) {
            return out;
        }
        let Some(NodeKind::TypeAlias(t)) = self.arena.get(stmt).map(|n| n.kind.clone()) else {
            return out;
        };

        self.ctx.push_scope(stmt);
        let type_params = self.rewrite_type_parameters(&t.type_params);
        let ty = self.rewrite_type(t.ty);
        self.ctx.pop_scope();

        // `declare` is never legal on a type alias.
        let mut modifiers = self.output_modifiers(stmt);
        modifiers.remove(ModifierFlags::AMBIENT);
        out.push(self.synth(
            NodeKind::TypeAlias(TypeAliasData {
                name: t.name,
                type_params,
                ty,
                modifiers,
            }),
            stmt,
        ));
        out
    }
}

/// Remove the `export` keyword from a rewritten statement's modifier set.
fn strip_export_modifier(kind: &mut NodeKind) {
    match kind {
        NodeKind::Function(f) => f.modifiers.remove(ModifierFlags::EXPORT),
        NodeKind::Class(c) => c.modifiers.remove(ModifierFlags::EXPORT),
        NodeKind::Interface(i) => i.modifiers.remove(ModifierFlags::EXPORT),
        NodeKind::TypeAlias(t) => t.modifiers.remove(ModifierFlags::EXPORT),
        NodeKind::Enum(e) => e.modifiers.remove(ModifierFlags::EXPORT),
        NodeKind::Module(m) => m.modifiers.remove(ModifierFlags::EXPORT),
        NodeKind::VariableStatement(v) => v.modifiers.remove(ModifierFlags::EXPORT),
        NodeKind::ImportEquals { modifiers, .. } => modifiers.remove(ModifierFlags::EXPORT),
        _ => {}
    }
}
