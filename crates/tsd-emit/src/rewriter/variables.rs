//! Variable statement rewriting: visibility filtering per declared name
//! and flattening of partially visible destructuring patterns.

use tsd_ast::{NodeId, NodeKind, VarKind, VariableStatementData, builder};
use tsd_common::diagnostics::diagnostic_codes as codes;

use crate::infer;
use crate::resolver::EmitResolver;

use super::{Rewriter, Rewritten};

impl<R: EmitResolver + ?Sized> Rewriter<'_, R> {
    pub(super) fn rewrite_variable_statement(&mut self, stmt: NodeId) -> Rewritten {
        let mut out = Rewritten::new();
        if self.strip_as_internal(stmt) {
            return out;
        }
        let Some(NodeKind::VariableStatement(v)) = self.arena.get(stmt).map(|n| n.kind.clone())
        else {
            return out;
        };

        let mut declarations = Vec::with_capacity(v.declarations.len());
        for &decl in &v.declarations {
            self.rewrite_variable_declaration(decl, v.kind, &mut declarations);
        }
        // A statement with no surviving name disappears entirely.
        if declarations.is_empty() {
            return out;
        }

        let modifiers = self.output_modifiers(stmt);
        out.push(self.synth(
            NodeKind::VariableStatement(VariableStatementData {
                kind: v.kind,
                declarations,
                modifiers,
            }),
            stmt,
        ));
        out
    }

    fn rewrite_variable_declaration(
        &mut self,
        decl: NodeId,
        var_kind: VarKind,
        declarations: &mut Vec<NodeId>,
    ) {
        let Some(NodeKind::VariableDeclaration {
            name,
            ty,
            initializer,
        }) = self.arena.get(decl).map(|n| n.kind.clone())
        else {
            return;
        };

        let is_pattern = matches!(
            self.arena.get(name).map(|n| &n.kind),
            Some(NodeKind::ObjectBindingPattern { .. } | NodeKind::ArrayBindingPattern { .. })
        );
        if is_pattern {
            self.rewrite_binding_pattern(decl, name, ty, declarations);
            return;
        }

        if !self.resolver.is_declaration_visible(self.arena, decl) {
            return;
        }
        let out_ty = if ty.is_some() {
            self.rewrite_type(ty)
        } else {
            self.variable_type(decl, var_kind, initializer)
        };
        let name = self.arena.deep_copy(name);
        declarations.push(self.synth(
            NodeKind::VariableDeclaration {
                name,
                ty: out_ty,
                initializer: NodeId::NONE,
            },
            decl,
        ));
    }

    /// `const` keeps literal freshness; `let`/`var` widen.
    fn variable_type(&mut self, decl: NodeId, var_kind: VarKind, initializer: NodeId) -> NodeId {
        if self.ctx.options.isolated_declarations {
            if initializer.is_none() {
                return self.report_isolated_missing_type(decl);
            }
            let info = infer::infer_type_of_expression(self.arena, self.ctx, initializer, false);
            return if var_kind == VarKind::Const {
                info.node
            } else {
                infer::widen(self.arena, info)
            };
        }
        self.type_for_unannotated(decl, initializer)
    }

    /// A destructuring pattern whose nested names are all visible keeps
    /// its shape; a partially visible one cannot be re-printed as one
    /// pattern and is flattened into per-name declarations.
    fn rewrite_binding_pattern(
        &mut self,
        decl: NodeId,
        pattern: NodeId,
        ty: NodeId,
        declarations: &mut Vec<NodeId>,
    ) {
        let mut names = Vec::new();
        collect_binding_names(self.arena, pattern, &mut names);
        let visible: Vec<NodeId> = names
            .iter()
            .copied()
            .filter(|&n| self.resolver.is_declaration_visible(self.arena, n))
            .collect();
        if visible.is_empty() {
            return;
        }

        if visible.len() == names.len() {
            let out_ty = if ty.is_some() {
                self.rewrite_type(ty)
            } else {
                self.type_for_unannotated(decl, NodeId::NONE)
            };
            let name = self.arena.deep_copy(pattern);
            declarations.push(self.synth(
                NodeKind::VariableDeclaration {
                    name,
                    ty: out_ty,
                    initializer: NodeId::NONE,
                },
                decl,
            ));
            return;
        }

        for element in visible {
            let element_ty = if self.ctx.options.isolated_declarations {
                // A split pattern needs per-name types only full
                // checking can produce.
                let span = self.arena.span(element);
                self.report_at(span, codes::ISOLATED_BINDING_ELEMENT_EXPORT, &[]);
                self.arena.ty_invalid()
            } else {
                self.type_for_unannotated(element, NodeId::NONE)
            };
            let name_text = binding_element_name(self.arena, element);
            let name = self
                .arena
                .add_ident(tsd_common::span::Span::EMPTY, name_text);
            declarations.push(self.synth(
                NodeKind::VariableDeclaration {
                    name,
                    ty: element_ty,
                    initializer: NodeId::NONE,
                },
                element,
            ));
        }
    }
}

/// Collect the binding elements that declare names, through arbitrary
/// nesting, skipping elided array slots.
fn collect_binding_names(arena: &tsd_ast::NodeArena, pattern: NodeId, out: &mut Vec<NodeId>) {
    let Some(node) = arena.get(pattern) else {
        return;
    };
    match &node.kind {
        NodeKind::ObjectBindingPattern { elements } | NodeKind::ArrayBindingPattern { elements } => {
            for &element in elements {
                if element.is_some() {
                    collect_binding_names(arena, element, out);
                }
            }
        }
        NodeKind::BindingElement { name, .. } => {
            match arena.get(*name).map(|n| &n.kind) {
                Some(
                    NodeKind::ObjectBindingPattern { .. } | NodeKind::ArrayBindingPattern { .. },
                ) => collect_binding_names(arena, *name, out),
                Some(NodeKind::Ident(_)) => out.push(pattern),
                _ => {}
            }
        }
        _ => {}
    }
}

fn binding_element_name(arena: &tsd_ast::NodeArena, element: NodeId) -> String {
    match arena.get(element).map(|n| &n.kind) {
        Some(NodeKind::BindingElement { name, .. }) => builder::member_name_text(arena, *name),
        _ => String::new(),
    }
}
