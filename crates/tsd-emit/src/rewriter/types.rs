//! Type-node rewriting and entity-name visibility checks.
//!
//! Every type position of the output tree passes through
//! `rewrite_type`, which copies the node, checks each named reference
//! against the resolver, and marks supporting import aliases as needed.

use tsd_ast::{NodeId, NodeKind, builder};
use tsd_common::diagnostics::diagnostic_codes as codes;

use crate::diagnostics::{context_for_error_node, outermost_reference};
use crate::infer;
use crate::resolver::{EmitResolver, TrackedSymbols};

use super::Rewriter;

impl<R: EmitResolver + ?Sized> Rewriter<'_, R> {
    /// Check that the symbol behind `name` can be named from the current
    /// scope; accessible references paint their supporting aliases,
    /// inaccessible ones report once per container.
    pub(super) fn check_entity_name(&mut self, name: NodeId) {
        let enclosing = self.ctx.enclosing_declaration();
        let result = self
            .resolver
            .is_entity_name_visible(self.arena, name, enclosing);
        if result.is_accessible() {
            let current_file = self.ctx.current_file();
            for alias in result.aliases_to_make_visible {
                self.late.mark_needed_from(self.arena, current_file, alias);
            }
            for directive in self.resolver.type_reference_directives(self.arena, name) {
                self.late.record_type_directive(directive);
            }
        } else {
            let symbol = result
                .error_symbol_name
                .unwrap_or_else(|| builder::entity_name_text(self.arena, name));
            self.report_inaccessible_reference(name, &symbol);
        }
    }

    pub(super) fn report_inaccessible_reference(&mut self, reference: NodeId, symbol: &str) {
        let error_node = outermost_reference(self.arena, reference);
        // Containers are identified on the checked tree; climb from the
        // original node when the reference is synthesized.
        let original = self.arena.original(error_node);
        let Some((context, container)) = context_for_error_node(self.arena, original) else {
            return;
        };
        if !self.links.mark_error_reported(container) {
            return;
        }
        let span = self.arena.span(original);
        self.ctx
            .report(context.to_diagnostic(self.ctx.file_name(), span, symbol));
    }

    /// Rewrite a type node into a fresh output node, checking every named
    /// reference inside it.
    pub(super) fn rewrite_type(&mut self, ty: NodeId) -> NodeId {
        let Some(node) = self.arena.get(ty) else {
            return NodeId::NONE;
        };
        match node.kind.clone() {
            NodeKind::KeywordType(_)
            | NodeKind::LiteralType(_)
            | NodeKind::ThisType
            | NodeKind::InvalidType => self.arena.deep_copy(ty),
            NodeKind::TypeReference { name, type_args } => {
                self.check_entity_name(name);
                let name = self.arena.deep_copy(name);
                let type_args = self.rewrite_type_list(&type_args);
                self.synth(NodeKind::TypeReference { name, type_args }, ty)
            }
            NodeKind::TypeQuery { name } => {
                self.check_entity_name(name);
                let name = self.arena.deep_copy(name);
                self.synth(NodeKind::TypeQuery { name }, ty)
            }
            NodeKind::ArrayType { element } => {
                let element = self.rewrite_type(element);
                self.synth(NodeKind::ArrayType { element }, ty)
            }
            NodeKind::TupleType { elements } => {
                let elements = self.rewrite_type_list(&elements);
                self.synth(NodeKind::TupleType { elements }, ty)
            }
            NodeKind::UnionType { members } => {
                let members = self.rewrite_type_list(&members);
                self.synth(NodeKind::UnionType { members }, ty)
            }
            NodeKind::IntersectionType { members } => {
                let members = self.rewrite_type_list(&members);
                self.synth(NodeKind::IntersectionType { members }, ty)
            }
            NodeKind::ParenthesizedType { ty: inner } => {
                let inner = self.rewrite_type(inner);
                self.synth(NodeKind::ParenthesizedType { ty: inner }, ty)
            }
            NodeKind::TypeOperator { op, ty: inner } => {
                let inner = self.rewrite_type(inner);
                self.synth(NodeKind::TypeOperator { op, ty: inner }, ty)
            }
            NodeKind::IndexedAccessType { object, index } => {
                let object = self.rewrite_type(object);
                let index = self.rewrite_type(index);
                self.synth(NodeKind::IndexedAccessType { object, index }, ty)
            }
            NodeKind::FunctionType(sig) => {
                let sig = self.rewrite_signature(ty, &sig);
                self.synth(NodeKind::FunctionType(sig), ty)
            }
            NodeKind::ConstructorType { sig, is_abstract } => {
                let sig = self.rewrite_signature(ty, &sig);
                self.synth(NodeKind::ConstructorType { sig, is_abstract }, ty)
            }
            NodeKind::TypeLiteral { members } => {
                let members = members
                    .iter()
                    .filter_map(|&m| self.rewrite_member_signature(m))
                    .collect();
                self.synth(NodeKind::TypeLiteral { members }, ty)
            }
            NodeKind::MappedType {
                type_param,
                ty: inner,
                readonly_mod,
                optional_mod,
            } => {
                let type_param = self.rewrite_type_parameter(type_param);
                let inner = self.rewrite_type(inner);
                self.synth(
                    NodeKind::MappedType {
                        type_param,
                        ty: inner,
                        readonly_mod,
                        optional_mod,
                    },
                    ty,
                )
            }
            NodeKind::ImportTypeNode {
                specifier,
                qualifier,
                type_args,
                is_typeof,
                resolution_mode,
            } => {
                if resolution_mode.is_some() && !self.ctx.options.nightly {
                    let span = self.arena.span(ty);
                    self.report_at(span, codes::RESOLUTION_MODE_ASSERTION_UNSTABLE, &[]);
                }
                let qualifier = self.arena.deep_copy(qualifier);
                let type_args = self.rewrite_type_list(&type_args);
                self.synth(
                    NodeKind::ImportTypeNode {
                        specifier,
                        qualifier,
                        type_args,
                        is_typeof,
                        resolution_mode,
                    },
                    ty,
                )
            }
            // Not a type node: the caller handed us a malformed position;
            // preserve it untouched.
            _ => self.arena.deep_copy(ty),
        }
    }

    pub(super) fn rewrite_type_list(&mut self, types: &[NodeId]) -> Vec<NodeId> {
        types.iter().map(|&t| self.rewrite_type(t)).collect()
    }

    /// Optional type slot: absent stays absent.
    pub(super) fn rewrite_type_slot(&mut self, ty: NodeId) -> NodeId {
        if ty.is_none() {
            NodeId::NONE
        } else {
            self.rewrite_type(ty)
        }
    }

    pub(super) fn rewrite_type_parameter(&mut self, tp: NodeId) -> NodeId {
        let Some(NodeKind::TypeParameter {
            name,
            constraint,
            default,
        }) = self.arena.get(tp).map(|n| n.kind.clone())
        else {
            return self.arena.deep_copy(tp);
        };
        let constraint = self.rewrite_type_slot(constraint);
        let default = self.rewrite_type_slot(default);
        self.synth(
            NodeKind::TypeParameter {
                name,
                constraint,
                default,
            },
            tp,
        )
    }

    pub(super) fn rewrite_type_parameters(&mut self, type_params: &[NodeId]) -> Vec<NodeId> {
        type_params
            .iter()
            .map(|&tp| self.rewrite_type_parameter(tp))
            .collect()
    }

    /// Rewrite a signature that already carries an explicit return type
    /// (function types, call/construct signatures inside type positions).
    pub(super) fn rewrite_signature(
        &mut self,
        owner: NodeId,
        sig: &tsd_ast::SignatureData,
    ) -> tsd_ast::SignatureData {
        self.ctx.push_scope(owner);
        let type_params = self.rewrite_type_parameters(&sig.type_params);
        let params = self.rewrite_parameters(&sig.params);
        let return_type = self.rewrite_type_slot(sig.return_type);
        self.ctx.pop_scope();
        tsd_ast::SignatureData {
            type_params,
            params,
            return_type,
        }
    }

    /// Members of type literals and interfaces share one rule set.
    /// Returns `None` for members dropped from the output.
    pub(super) fn rewrite_member_signature(&mut self, member: NodeId) -> Option<NodeId> {
        if self.strip_as_internal(member) {
            return None;
        }
        let Some(node) = self.arena.get(member) else {
            return None;
        };
        match node.kind.clone() {
            NodeKind::PropertySignature {
                name,
                ty,
                optional,
                modifiers,
            } => {
                let name = self.arena.deep_copy(name);
                let ty = self.rewrite_type_slot(ty);
                Some(self.synth(
                    NodeKind::PropertySignature {
                        name,
                        ty,
                        optional,
                        modifiers,
                    },
                    member,
                ))
            }
            NodeKind::MethodSignature {
                name,
                sig,
                optional,
            } => {
                let name = self.arena.deep_copy(name);
                let sig = self.rewrite_signature(member, &sig);
                Some(self.synth(
                    NodeKind::MethodSignature {
                        name,
                        sig,
                        optional,
                    },
                    member,
                ))
            }
            NodeKind::CallSignature(sig) => {
                let sig = self.rewrite_signature(member, &sig);
                Some(self.synth(NodeKind::CallSignature(sig), member))
            }
            NodeKind::ConstructSignature(sig) => {
                let sig = self.rewrite_signature(member, &sig);
                Some(self.synth(NodeKind::ConstructSignature(sig), member))
            }
            NodeKind::IndexSignature {
                param,
                ty,
                modifiers,
            } => {
                let param = self.rewrite_parameter(param);
                let ty = self.rewrite_type(ty);
                Some(self.synth(
                    NodeKind::IndexSignature {
                        param,
                        ty,
                        modifiers,
                    },
                    member,
                ))
            }
            _ => None,
        }
    }

    pub(super) fn rewrite_parameters(&mut self, params: &[NodeId]) -> Vec<NodeId> {
        params.iter().map(|&p| self.rewrite_parameter(p)).collect()
    }

    /// Parameters drop initializers (an initializer becomes `?`), keep
    /// binding patterns, and get an explicit type when none was written.
    pub(super) fn rewrite_parameter(&mut self, param: NodeId) -> NodeId {
        let Some(NodeKind::Parameter {
            name,
            ty,
            initializer,
            dotdotdot,
            question,
            modifiers,
        }) = self.arena.get(param).map(|n| n.kind.clone())
        else {
            return self.arena.deep_copy(param);
        };
        let optional = question || self.resolver.is_optional_parameter(self.arena, param);
        let ty = if ty.is_some() {
            self.rewrite_type(ty)
        } else {
            self.type_for_unannotated(param, initializer)
        };
        let name = self.arena.deep_copy(name);
        self.synth(
            NodeKind::Parameter {
                name,
                ty,
                initializer: NodeId::NONE,
                dotdotdot,
                question: optional,
                modifiers,
            },
            param,
        )
    }

    /// Type for a declaration with no written annotation: isolated mode
    /// infers from the initializer expression, otherwise the oracle
    /// synthesizes the checked type.
    pub(super) fn type_for_unannotated(&mut self, decl: NodeId, initializer: NodeId) -> NodeId {
        if self.ctx.options.isolated_declarations {
            if initializer.is_some() {
                let info = infer::infer_type_of_expression(self.arena, self.ctx, initializer, false);
                return infer::widen(self.arena, info);
            }
            return self.report_isolated_missing_type(decl);
        }
        let enclosing = self.ctx.enclosing_declaration();
        let mut tracker = TrackedSymbols::default();
        let created =
            self.resolver
                .create_type_of_declaration(self.arena, decl, enclosing, &mut tracker);
        self.finish_tracked(decl, tracker);
        created.unwrap_or_else(|| self.arena.ty_invalid())
    }

    /// Isolated mode and nothing to infer from: report the
    /// position-specific annotation requirement.
    pub(super) fn report_isolated_missing_type(&mut self, decl: NodeId) -> NodeId {
        let code = match self.arena.get(decl).map(|n| &n.kind) {
            Some(NodeKind::Parameter { .. }) => codes::ISOLATED_PARAMETER_NEEDS_TYPE,
            Some(NodeKind::PropertyDecl { .. } | NodeKind::PropertySignature { .. }) => {
                codes::ISOLATED_PROPERTY_NEEDS_TYPE
            }
            Some(NodeKind::VariableDeclaration { .. }) => codes::ISOLATED_VARIABLE_NEEDS_TYPE,
            Some(NodeKind::MethodDecl { .. } | NodeKind::MethodSignature { .. }) => {
                codes::ISOLATED_METHOD_NEEDS_RETURN_TYPE
            }
            Some(NodeKind::Accessor { .. }) => codes::ISOLATED_ACCESSOR_NEEDS_TYPE,
            _ => codes::ISOLATED_FUNCTION_NEEDS_RETURN_TYPE,
        };
        let span = self.arena.span(decl);
        self.report_at(span, code, &[]);
        self.arena.ty_invalid()
    }

    /// Fold a tracker's findings into diagnostics and alias paint.
    pub(super) fn finish_tracked(&mut self, decl: NodeId, tracker: TrackedSymbols) {
        let name = self.display_name_of(decl);
        let span = self.arena.span(decl);
        if tracker.inaccessible_unique_symbol {
            self.report_at(span, codes::INFERRED_TYPE_INACCESSIBLE_UNIQUE_SYMBOL, &[&name]);
        }
        if tracker.inaccessible_this {
            self.report_at(span, codes::INFERRED_TYPE_INACCESSIBLE_THIS, &[&name]);
        }
        if tracker.cyclic_structure {
            self.report_at(span, codes::INFERRED_TYPE_CYCLIC, &[&name]);
        }
        if let Some(module) = &tracker.unsafe_import {
            self.report_at(span, codes::INFERRED_TYPE_NOT_PORTABLE, &[&name, module]);
        }
        for result in tracker.results {
            if result.is_accessible() {
                let current_file = self.ctx.current_file();
                for alias in result.aliases_to_make_visible {
                    self.late.mark_needed_from(self.arena, current_file, alias);
                }
            } else {
                let symbol = result.error_symbol_name.unwrap_or_default();
                match result.error_module_name {
                    Some(module) => self.report_at(
                        span,
                        codes::EMIT_REQUIRES_PRIVATE_NAME_FROM_MODULE,
                        &[&symbol, &module],
                    ),
                    None => self.report_at(span, codes::EMIT_REQUIRES_PRIVATE_NAME, &[&symbol]),
                }
            }
        }
    }

    /// Display name of a declaration for "inferred type of ..." messages.
    pub(super) fn display_name_of(&self, decl: NodeId) -> String {
        match self.arena.get(decl).map(|n| &n.kind) {
            Some(
                NodeKind::VariableDeclaration { name, .. }
                | NodeKind::Parameter { name, .. }
                | NodeKind::PropertyDecl { name, .. }
                | NodeKind::PropertySignature { name, .. }
                | NodeKind::MethodDecl { name, .. }
                | NodeKind::Accessor { name, .. },
            ) => builder::member_name_text(self.arena, *name),
            Some(kind) => kind.name_text().unwrap_or_default().to_string(),
            None => String::new(),
        }
    }

    /// Allocate an output node linked to its checked original.
    pub(super) fn synth(&mut self, kind: NodeKind, original: NodeId) -> NodeId {
        let id = self.arena.alloc_synthesized(kind, original);
        for child in tsd_ast::children_of(self.arena, id) {
            self.arena.set_parent(child, id);
        }
        id
    }
}
