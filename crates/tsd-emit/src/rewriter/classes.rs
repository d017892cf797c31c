//! Class rewriting: parameter-property promotion, private-member brand,
//! accessor typing, and non-nameable `extends` expressions.

use tsd_ast::{
    ClassData, HeritageKind, ModifierFlags, NodeId, NodeKind, SignatureData, VarKind,
    VariableStatementData,
};
use tsd_common::diagnostics::diagnostic_codes as codes;
use tsd_common::span::Span;

use crate::resolver::{EmitResolver, TrackedSymbols};

use super::{Rewriter, Rewritten};

impl<R: EmitResolver + ?Sized> Rewriter<'_, R> {
    pub(super) fn rewrite_class_statement(&mut self, stmt: NodeId) -> Rewritten {
        let mut out = Rewritten::new();
        if !self.is_statement_visible(stmt) {
            return out;
        }
        let Some(NodeKind::Class(c)) = self.arena.get(stmt).map(|n| n.kind.clone()) else {
            return out;
        };

        self.ctx.push_scope(stmt);
        let type_params = self.rewrite_type_parameters(&c.type_params);
        let heritage = self.rewrite_class_heritage(stmt, &c, &mut out);

        let mut members: Vec<NodeId> = Vec::with_capacity(c.members.len());
        let mut has_private_name = false;
        for &member in &c.members {
            if member_uses_private_name(self.arena, member) {
                has_private_name = true;
                continue;
            }
            if let Some(rewritten) = self.rewrite_class_member(member, &mut members) {
                members.push(rewritten);
            }
        }
        if has_private_name {
            // One unnamed brand keeps structurally identical classes
            // nominally distinct.
            let brand_name = self
                .arena
                .add_private_name(Span::EMPTY, "private");
            let brand = self.synth(
                NodeKind::PropertyDecl {
                    name: brand_name,
                    ty: NodeId::NONE,
                    initializer: NodeId::NONE,
                    optional: false,
                    modifiers: ModifierFlags::empty(),
                },
                stmt,
            );
            members.insert(0, brand);
        }
        self.ctx.pop_scope();

        let modifiers = self.output_modifiers(stmt);
        out.push(self.synth(
            NodeKind::Class(ClassData {
                name: c.name,
                type_params,
                heritage,
                members,
                modifiers,
            }),
            stmt,
        ));
        out
    }

    /// Rewrite heritage clauses. A non-nameable `extends` expression is
    /// hoisted into a synthesized `declare const <Name>_base` statement
    /// (pushed into `out` ahead of the class); isolated mode reports and
    /// substitutes the `invalid` placeholder instead.
    fn rewrite_class_heritage(
        &mut self,
        stmt: NodeId,
        c: &ClassData,
        out: &mut Rewritten,
    ) -> Vec<NodeId> {
        let mut heritage = Vec::with_capacity(c.heritage.len());
        for &clause in &c.heritage {
            let Some(NodeKind::HeritageClause { kind, types }) =
                self.arena.get(clause).map(|n| n.kind.clone())
            else {
                continue;
            };
            let mut rewritten_types = Vec::with_capacity(types.len());
            for ty in types {
                let Some(NodeKind::ExpressionWithTypeArgs { expr, type_args }) =
                    self.arena.get(ty).map(|n| n.kind.clone())
                else {
                    continue;
                };
                let is_name = self
                    .arena
                    .get(expr)
                    .is_some_and(|n| n.kind.is_entity_name());
                let new_expr = if is_name || kind == HeritageKind::Implements {
                    if is_name {
                        self.check_entity_name(expr);
                    }
                    self.arena.deep_copy(expr)
                } else if self.ctx.options.isolated_declarations {
                    let span = self.arena.span(expr);
                    self.report_at(span, codes::ISOLATED_EXTENDS_EXPRESSION, &[]);
                    self.arena.ty_invalid()
                } else {
                    self.hoist_extends_expression(stmt, c, expr, out)
                };
                let type_args = self.rewrite_type_list(&type_args);
                rewritten_types.push(self.synth(
                    NodeKind::ExpressionWithTypeArgs {
                        expr: new_expr,
                        type_args,
                    },
                    ty,
                ));
            }
            heritage.push(self.synth(
                NodeKind::HeritageClause {
                    kind,
                    types: rewritten_types,
                },
                clause,
            ));
        }
        heritage
    }

    /// `class C extends mixin(Base)` becomes
    /// `declare const C_base: <type of mixin(Base)>;` plus
    /// `class C extends C_base`.
    fn hoist_extends_expression(
        &mut self,
        stmt: NodeId,
        c: &ClassData,
        expr: NodeId,
        out: &mut Rewritten,
    ) -> NodeId {
        let base_name = format!("{}_base", c.name.as_deref().unwrap_or("default"));
        let enclosing = self.ctx.enclosing_declaration();
        let mut tracker = TrackedSymbols::default();
        let ty = self
            .resolver
            .create_type_of_declaration(self.arena, expr, enclosing, &mut tracker);
        self.finish_tracked(stmt, tracker);
        let ty = ty.unwrap_or_else(|| self.arena.ty_invalid());

        let var_name = self.arena.add_ident(Span::EMPTY, base_name.clone());
        let declaration = self.synth(
            NodeKind::VariableDeclaration {
                name: var_name,
                ty,
                initializer: NodeId::NONE,
            },
            expr,
        );
        out.push(self.synth(
            NodeKind::VariableStatement(VariableStatementData {
                kind: VarKind::Const,
                declarations: vec![declaration],
                modifiers: ModifierFlags::AMBIENT,
            }),
            stmt,
        ));
        self.arena.add_ident(Span::EMPTY, base_name)
    }

    /// Rewrite one class member; promoted parameter properties are pushed
    /// into `members` before the constructor that declared them.
    fn rewrite_class_member(
        &mut self,
        member: NodeId,
        members: &mut Vec<NodeId>,
    ) -> Option<NodeId> {
        if self.strip_as_internal(member) {
            return None;
        }
        let node = self.arena.get(member)?;
        match node.kind.clone() {
            NodeKind::Constructor {
                params, modifiers, ..
            } => {
                self.ctx.push_scope(member);
                for &param in &params {
                    if let Some(promoted) = self.promote_parameter_property(param) {
                        members.push(promoted);
                    }
                }
                let params = self.rewrite_constructor_params(&params);
                self.ctx.pop_scope();
                Some(self.synth(
                    NodeKind::Constructor {
                        params,
                        body: NodeId::NONE,
                        modifiers,
                    },
                    member,
                ))
            }
            NodeKind::PropertyDecl {
                name,
                ty,
                initializer,
                optional,
                modifiers,
            } => {
                if !self.keep_computed_member(member, name) {
                    return None;
                }
                if modifiers.is_private() {
                    // Private members lose their types; the name alone
                    // preserves assignability.
                    let name = self.arena.deep_copy(name);
                    return Some(self.synth(
                        NodeKind::PropertyDecl {
                            name,
                            ty: NodeId::NONE,
                            initializer: NodeId::NONE,
                            optional,
                            modifiers,
                        },
                        member,
                    ));
                }
                self.ctx.push_scope(member);
                let out_ty = if ty.is_some() {
                    self.rewrite_type(ty)
                } else {
                    self.type_for_unannotated(member, initializer)
                };
                self.ctx.pop_scope();
                let name = self.arena.deep_copy(name);
                let modifiers = modifiers & !ModifierFlags::ELIDED_IN_DECLARATIONS;
                Some(self.synth(
                    NodeKind::PropertyDecl {
                        name,
                        ty: out_ty,
                        initializer: NodeId::NONE,
                        optional,
                        modifiers,
                    },
                    member,
                ))
            }
            NodeKind::MethodDecl {
                name,
                sig,
                body,
                optional,
                modifiers,
            } => {
                if !self.keep_computed_member(member, name) {
                    return None;
                }
                if body.is_some() && self.resolver.is_implementation_of_overload(self.arena, member)
                {
                    return None;
                }
                if modifiers.is_private() {
                    let name = self.arena.deep_copy(name);
                    return Some(self.synth(
                        NodeKind::PropertyDecl {
                            name,
                            ty: NodeId::NONE,
                            initializer: NodeId::NONE,
                            optional,
                            modifiers,
                        },
                        member,
                    ));
                }
                self.ctx.push_scope(member);
                let type_params = self.rewrite_type_parameters(&sig.type_params);
                let params = self.rewrite_parameters(&sig.params);
                let return_type = if sig.return_type.is_some() {
                    self.rewrite_type(sig.return_type)
                } else {
                    self.return_type_for(member, body)
                };
                self.ctx.pop_scope();
                let name = self.arena.deep_copy(name);
                let modifiers = modifiers & !ModifierFlags::ELIDED_IN_DECLARATIONS;
                Some(self.synth(
                    NodeKind::MethodDecl {
                        name,
                        sig: SignatureData {
                            type_params,
                            params,
                            return_type,
                        },
                        body: NodeId::NONE,
                        optional,
                        modifiers,
                    },
                    member,
                ))
            }
            NodeKind::Accessor { .. } => self.rewrite_accessor(member),
            NodeKind::IndexSignature { .. } => self.rewrite_member_signature(member),
            _ => None,
        }
    }

    /// Computed-name members survive only when the checker could bind the
    /// name to a known symbol; truly dynamic names are dropped.
    fn keep_computed_member(&mut self, member: NodeId, name: NodeId) -> bool {
        match self.arena.get(name).map(|n| &n.kind) {
            Some(NodeKind::ComputedName { .. }) => self.resolver.is_late_bound(self.arena, member),
            _ => true,
        }
    }

    /// A constructor parameter with an accessibility or readonly modifier
    /// declares a property; surface it as one.
    fn promote_parameter_property(&mut self, param: NodeId) -> Option<NodeId> {
        let Some(NodeKind::Parameter {
            name,
            ty,
            initializer,
            modifiers,
            question,
            ..
        }) = self.arena.get(param).map(|n| n.kind.clone())
        else {
            return None;
        };
        if !modifiers.intersects(ModifierFlags::ACCESSIBILITY | ModifierFlags::READONLY) {
            return None;
        }
        let out_ty = if modifiers.is_private() {
            NodeId::NONE
        } else if ty.is_some() {
            self.rewrite_type(ty)
        } else {
            self.type_for_unannotated(param, initializer)
        };
        let name = self.arena.deep_copy(name);
        let modifiers = modifiers & !ModifierFlags::ELIDED_IN_DECLARATIONS;
        Some(self.synth(
            NodeKind::PropertyDecl {
                name,
                ty: out_ty,
                initializer: NodeId::NONE,
                optional: question || initializer.is_some(),
                modifiers,
            },
            param,
        ))
    }

    /// Constructor parameters drop the promotion modifiers; the promoted
    /// properties carry them instead.
    fn rewrite_constructor_params(&mut self, params: &[NodeId]) -> Vec<NodeId> {
        params
            .iter()
            .map(|&param| {
                let rewritten = self.rewrite_parameter(param);
                if let Some(node) = self.arena.get_mut(rewritten) {
                    if let NodeKind::Parameter { modifiers, .. } = &mut node.kind {
                        modifiers.remove(ModifierFlags::ACCESSIBILITY | ModifierFlags::READONLY);
                    }
                }
                rewritten
            })
            .collect()
    }

    /// Accessors keep their accessor form; an untyped side borrows its
    /// annotation from the pair's other half.
    fn rewrite_accessor(&mut self, member: NodeId) -> Option<NodeId> {
        let Some(NodeKind::Accessor {
            is_getter,
            name,
            params,
            return_type,
            body,
            modifiers,
        }) = self.arena.get(member).map(|n| n.kind.clone())
        else {
            return None;
        };
        if !self.keep_computed_member(member, name) {
            return None;
        }
        if modifiers.is_private() {
            let name = self.arena.deep_copy(name);
            return Some(self.synth(
                NodeKind::PropertyDecl {
                    name,
                    ty: NodeId::NONE,
                    initializer: NodeId::NONE,
                    optional: false,
                    modifiers,
                },
                member,
            ));
        }

        self.ctx.push_scope(member);
        let (out_params, out_return) = if is_getter {
            let return_type = if return_type.is_some() {
                self.rewrite_type(return_type)
            } else if let Some(annotation) = self.pair_annotation(member) {
                self.rewrite_pair_annotation(annotation)
            } else {
                self.return_type_for(member, body)
            };
            (Vec::new(), return_type)
        } else {
            let params = self.rewrite_setter_params(member, &params);
            (params, NodeId::NONE)
        };
        self.ctx.pop_scope();

        let name = self.arena.deep_copy(name);
        let modifiers = modifiers & !ModifierFlags::ELIDED_IN_DECLARATIONS;
        Some(self.synth(
            NodeKind::Accessor {
                is_getter,
                name,
                params: out_params,
                return_type: out_return,
                body: NodeId::NONE,
                modifiers,
            },
            member,
        ))
    }

    /// Rewrite an annotation borrowed from the pair's other accessor.
    /// Accessibility problems in it belong to the accessor that wrote
    /// it, so diagnostics are off while the copy is taken.
    fn rewrite_pair_annotation(&mut self, annotation: NodeId) -> NodeId {
        self.ctx.suppress_diagnostics();
        let ty = self.rewrite_type(annotation);
        self.ctx.unsuppress_diagnostics();
        ty
    }

    /// Written annotation on the other accessor of the pair, if any.
    fn pair_annotation(&self, member: NodeId) -> Option<NodeId> {
        let pair = self.resolver.all_accessor_declarations(self.arena, member);
        for other in [pair.getter, pair.setter] {
            if other == member || other.is_none() {
                continue;
            }
            match self.arena.get(other).map(|n| &n.kind) {
                Some(NodeKind::Accessor {
                    is_getter: true,
                    return_type,
                    ..
                }) if return_type.is_some() => return Some(*return_type),
                Some(NodeKind::Accessor {
                    is_getter: false,
                    params,
                    ..
                }) => {
                    if let Some(&param) = params.first() {
                        if let Some(NodeKind::Parameter { ty, .. }) =
                            self.arena.get(param).map(|n| &n.kind)
                        {
                            if ty.is_some() {
                                return Some(*ty);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn rewrite_setter_params(&mut self, member: NodeId, params: &[NodeId]) -> Vec<NodeId> {
        let Some(&param) = params.first() else {
            return Vec::new();
        };
        let Some(NodeKind::Parameter {
            name,
            ty,
            dotdotdot,
            question,
            modifiers,
            ..
        }) = self.arena.get(param).map(|n| n.kind.clone())
        else {
            return vec![self.rewrite_parameter(param)];
        };
        let out_ty = if ty.is_some() {
            self.rewrite_type(ty)
        } else if let Some(annotation) = self.pair_annotation(member) {
            self.rewrite_pair_annotation(annotation)
        } else if self.ctx.options.isolated_declarations {
            self.report_isolated_missing_type(member)
        } else {
            self.type_for_unannotated(param, NodeId::NONE)
        };
        let name = self.arena.deep_copy(name);
        vec![self.synth(
            NodeKind::Parameter {
                name,
                ty: out_ty,
                initializer: NodeId::NONE,
                dotdotdot,
                question,
                modifiers,
            },
            param,
        )]
    }
}

/// Does this member's own name use a `#private` identifier?
fn member_uses_private_name(arena: &tsd_ast::NodeArena, member: NodeId) -> bool {
    let name = match arena.get(member).map(|n| &n.kind) {
        Some(
            NodeKind::PropertyDecl { name, .. }
            | NodeKind::MethodDecl { name, .. }
            | NodeKind::Accessor { name, .. },
        ) => *name,
        _ => return false,
    };
    matches!(
        arena.get(name).map(|n| &n.kind),
        Some(NodeKind::PrivateName(_))
    )
}
