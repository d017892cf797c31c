//! Enum rewriting: member initializers are replaced with their folded
//! constant values so downstream consumers never re-run constant
//! evaluation.

use tsd_ast::{EnumData, LiteralValue, NodeId, NodeKind};
use tsd_common::diagnostics::diagnostic_codes as codes;

use crate::resolver::{ConstantValue, EmitResolver};

use super::{Rewriter, Rewritten};

impl<R: EmitResolver + ?Sized> Rewriter<'_, R> {
    pub(super) fn rewrite_enum(&mut self, stmt: NodeId) -> Rewritten {
        let mut out = Rewritten::new();
        if !self.is_statement_visible(stmt) {
            return out;
        }
        let Some(NodeKind::Enum(e)) = self.arena.get(stmt).map(|n| n.kind.clone()) else {
            return out;
        };

        let mut members = Vec::with_capacity(e.members.len());
        for &member in &e.members {
            if self.strip_as_internal(member) {
                continue;
            }
            let Some(NodeKind::EnumMember { name, initializer }) =
                self.arena.get(member).map(|n| n.kind.clone())
            else {
                continue;
            };
            let initializer = self.rewrite_enum_initializer(member, initializer);
            let name = self.arena.deep_copy(name);
            members.push(self.synth(NodeKind::EnumMember { name, initializer }, member));
        }

        let modifiers = self.output_modifiers(stmt);
        out.push(self.synth(
            NodeKind::Enum(EnumData {
                name: e.name,
                members,
                modifiers,
            }),
            stmt,
        ));
        out
    }

    /// Folded constant when available; otherwise preserve a written
    /// literal verbatim. Isolated mode reports members it cannot fold
    /// locally.
    fn rewrite_enum_initializer(&mut self, member: NodeId, initializer: NodeId) -> NodeId {
        if let Some(value) = self.resolver.constant_value(self.arena, member) {
            return self.constant_literal(member, value);
        }
        if initializer.is_none() {
            // Auto-numbered member; the keyword form carries the value.
            return NodeId::NONE;
        }
        if self.ctx.options.isolated_declarations && !is_locally_constant(self.arena, initializer) {
            let span = self.arena.span(initializer);
            self.report_at(span, codes::ISOLATED_ENUM_MEMBER_NOT_COMPUTABLE, &[]);
        }
        self.arena.deep_copy(initializer)
    }

    fn constant_literal(&mut self, member: NodeId, value: ConstantValue) -> NodeId {
        match value {
            ConstantValue::Number(n) => {
                let text = format_enum_number(n.abs());
                let lit = self.synth(NodeKind::NumberLit { text }, member);
                if n < 0.0 {
                    self.synth(
                        NodeKind::PrefixUnary {
                            op: tsd_ast::PrefixOp::Minus,
                            operand: lit,
                        },
                        member,
                    )
                } else {
                    lit
                }
            }
            ConstantValue::String(s) => self.synth(NodeKind::StringLit(s), member),
        }
    }
}

/// Expressions an enum member may carry without checker support:
/// literals, prefix minus on a numeric literal, and arithmetic over
/// such operands is already folded upstream.
fn is_locally_constant(arena: &tsd_ast::NodeArena, expr: NodeId) -> bool {
    match arena.get(expr).map(|n| &n.kind) {
        Some(
            NodeKind::NumberLit { .. }
            | NodeKind::StringLit(_)
            | NodeKind::NoSubTemplate(_)
            | NodeKind::BigIntLit { .. },
        ) => true,
        Some(NodeKind::LiteralType(LiteralValue::Number { .. })) => true,
        Some(NodeKind::PrefixUnary { operand, .. }) => matches!(
            arena.get(*operand).map(|n| &n.kind),
            Some(NodeKind::NumberLit { .. })
        ),
        Some(NodeKind::ParenExpr { expr }) => is_locally_constant(arena, *expr),
        _ => false,
    }
}

/// Integer-valued constants print without a fractional part.
fn format_enum_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
