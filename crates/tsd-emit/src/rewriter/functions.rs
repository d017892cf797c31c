//! Function statement rewriting: bodies elided, return types made
//! explicit, overload implementations dropped.

use tsd_ast::{FunctionData, NodeId, NodeKind};

use crate::infer;
use crate::resolver::{EmitResolver, TrackedSymbols};

use super::{Rewriter, Rewritten};

impl<R: EmitResolver + ?Sized> Rewriter<'_, R> {
    pub(super) fn rewrite_function_statement(&mut self, stmt: NodeId) -> Rewritten {
        let mut out = Rewritten::new();
        if !self.is_statement_visible(stmt) {
            return out;
        }
        let Some(NodeKind::Function(f)) = self.arena.get(stmt).map(|n| n.kind.clone()) else {
            return out;
        };
        // The implementation signature of an overload set is not part of
        // the declaration surface.
        if f.body.is_some() && self.resolver.is_implementation_of_overload(self.arena, stmt) {
            return out;
        }

        self.ctx.push_scope(stmt);
        let type_params = self.rewrite_type_parameters(&f.type_params);
        let params = self.rewrite_parameters(&f.params);
        let return_type = if f.return_type.is_some() {
            self.rewrite_type(f.return_type)
        } else {
            self.return_type_for(stmt, f.body)
        };
        self.ctx.pop_scope();

        let modifiers = self.output_modifiers(stmt);
        out.push(self.synth(
            NodeKind::Function(FunctionData {
                name: f.name,
                type_params,
                params,
                return_type,
                body: NodeId::NONE,
                modifiers,
            }),
            stmt,
        ));
        out
    }

    /// Return type for a signature with no written annotation. Isolated
    /// mode infers from the body's return expressions; otherwise the
    /// oracle synthesizes the checked return type.
    pub(super) fn return_type_for(&mut self, owner: NodeId, body: NodeId) -> NodeId {
        if self.ctx.options.isolated_declarations {
            if body.is_none() {
                return self.report_isolated_missing_type(owner);
            }
            return infer::infer_return_type(self.arena, self.ctx, body).node;
        }
        let enclosing = self.ctx.enclosing_declaration();
        let mut tracker = TrackedSymbols::default();
        let created = self.resolver.create_return_type_of_signature(
            self.arena,
            owner,
            enclosing,
            &mut tracker,
        );
        self.finish_tracked(owner, tracker);
        created.unwrap_or_else(|| self.arena.ty_invalid())
    }
}
