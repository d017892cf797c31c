//! Local (checker-free) type inference for isolated-declarations mode.
//!
//! Every rule here is syntactic: literals, arrays, object literals,
//! function expressions, assertions, `new` expressions, and prefix
//! minus. Anything outside the rule set is an unconditional failure
//! that reports a diagnostic and substitutes the `invalid` placeholder
//! type — isolated mode never silently guesses.

use bitflags::bitflags;
use tsd_ast::{
    KeywordTypeKind, LiteralValue, ModifierFlags, NodeArena, NodeId, NodeKind, PrefixOp,
    SignatureData, TypeOperatorKind,
};
use tsd_common::diagnostics::{Diagnostic, diagnostic_codes as codes};

use crate::context::EmitContext;
use crate::normalize;

bitflags! {
    /// Provenance bits of a locally inferred type.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct LocalTypeFlags: u32 {
        /// Derived from a literal; wideneable to its base primitive.
        const FRESH = 1 << 0;
        /// Derived from an absent/`undefined`/`null` expression under
        /// non-strict null checks; an untyped `any`.
        const IMPLICIT_ANY = 1 << 1;
    }
}

/// A locally inferred type node plus its provenance flags. Discarded
/// once the type node is finalized into the output.
#[derive(Clone, Copy, Debug)]
pub struct LocalTypeInfo {
    pub node: NodeId,
    pub flags: LocalTypeFlags,
}

impl LocalTypeInfo {
    fn fresh(node: NodeId) -> LocalTypeInfo {
        LocalTypeInfo {
            node,
            flags: LocalTypeFlags::FRESH,
        }
    }

    fn stable(node: NodeId) -> LocalTypeInfo {
        LocalTypeInfo {
            node,
            flags: LocalTypeFlags::empty(),
        }
    }
}

/// Report an inference failure and substitute the `invalid` placeholder,
/// keeping the output parseable.
fn fail(
    arena: &mut NodeArena,
    ctx: &mut EmitContext,
    node: NodeId,
    code: u32,
) -> LocalTypeInfo {
    let span = arena.span(node);
    ctx.report(Diagnostic::error_with_template(
        ctx.file_name(),
        span.start,
        span.len(),
        code,
        &[],
    ));
    LocalTypeInfo::stable(arena.ty_invalid())
}

/// Widen a fresh literal type to its base primitive; leave everything
/// else untouched.
pub fn widen(arena: &mut NodeArena, info: LocalTypeInfo) -> NodeId {
    if !info.flags.contains(LocalTypeFlags::FRESH) {
        return info.node;
    }
    match arena.get(info.node).map(|n| &n.kind) {
        Some(NodeKind::LiteralType(value)) => {
            let keyword = match value {
                LiteralValue::String(_) => KeywordTypeKind::String,
                LiteralValue::Number { .. } => KeywordTypeKind::Number,
                LiteralValue::BigInt { .. } => KeywordTypeKind::BigInt,
                LiteralValue::True | LiteralValue::False => KeywordTypeKind::Boolean,
            };
            arena.ty_keyword(keyword)
        }
        _ => info.node,
    }
}

/// Infer a type for `expr` without consulting the checker.
///
/// `const_context` is true under `as const` or directly inside a
/// const-narrowed object/array literal.
pub fn infer_type_of_expression(
    arena: &mut NodeArena,
    ctx: &mut EmitContext,
    expr: NodeId,
    const_context: bool,
) -> LocalTypeInfo {
    let Some(node) = arena.get(expr) else {
        return implicit_any(arena, ctx);
    };
    match node.kind.clone() {
        NodeKind::StringLit(text) | NodeKind::NoSubTemplate(text) => {
            LocalTypeInfo::fresh(arena.ty_string_literal(text))
        }
        NodeKind::NumberLit { text } => {
            LocalTypeInfo::fresh(arena.ty_number_literal(text, false))
        }
        NodeKind::BigIntLit { text } => LocalTypeInfo::fresh(arena.ty_literal(
            LiteralValue::BigInt {
                text,
                negative: false,
            },
        )),
        NodeKind::BoolLit(value) => LocalTypeInfo::fresh(arena.ty_literal(if value {
            LiteralValue::True
        } else {
            LiteralValue::False
        })),
        NodeKind::RegExpLit(_) => LocalTypeInfo::stable(arena.ty_ref_ident("RegExp")),
        NodeKind::NullLit => {
            if ctx.options.strict_null_checks {
                LocalTypeInfo::stable(arena.ty_keyword(KeywordTypeKind::Null))
            } else {
                implicit_any(arena, ctx)
            }
        }
        NodeKind::Ident(ref text) if text == "undefined" => {
            if ctx.options.strict_null_checks {
                LocalTypeInfo::stable(arena.ty_keyword(KeywordTypeKind::Undefined))
            } else {
                implicit_any(arena, ctx)
            }
        }
        NodeKind::TemplateExpr { .. } => {
            if const_context {
                // A substitution's value is not known locally.
                fail(arena, ctx, expr, codes::ISOLATED_EXPRESSION_NOT_INFERABLE)
            } else {
                LocalTypeInfo::stable(arena.ty_keyword(KeywordTypeKind::String))
            }
        }
        NodeKind::PrefixUnary { op, operand } => {
            infer_prefix_unary(arena, ctx, expr, op, operand)
        }
        NodeKind::ArrayLiteral { elements } => {
            infer_array_literal(arena, ctx, expr, &elements, const_context)
        }
        NodeKind::ObjectLiteral { members } => {
            infer_object_literal(arena, ctx, &members, const_context)
        }
        NodeKind::NewExpr {
            callee, type_args, ..
        } => match arena.get(callee).map(|n| &n.kind) {
            Some(NodeKind::Ident(_)) => {
                let name = arena.deep_copy(callee);
                let args: Vec<NodeId> = type_args.iter().map(|a| arena.deep_copy(*a)).collect();
                LocalTypeInfo::stable(arena.ty_ref(name, args))
            }
            _ => fail(arena, ctx, expr, codes::ISOLATED_EXPRESSION_NOT_INFERABLE),
        },
        NodeKind::AsExpr { expr: inner, ty, is_const } => {
            if is_const {
                infer_type_of_expression(arena, ctx, inner, true)
            } else {
                LocalTypeInfo::stable(arena.deep_copy(ty))
            }
        }
        NodeKind::TypeAssertion { ty, .. } => LocalTypeInfo::stable(arena.deep_copy(ty)),
        NodeKind::ArrowFunction(ref f) | NodeKind::FunctionExpr(ref f) => {
            infer_function_expression(arena, ctx, &f.clone())
        }
        NodeKind::ClassExpr(_) => fail(arena, ctx, expr, codes::ISOLATED_CLASS_EXPRESSION),
        NodeKind::ParenExpr { expr: inner } => {
            infer_type_of_expression(arena, ctx, inner, const_context)
        }
        _ => fail(arena, ctx, expr, codes::ISOLATED_EXPRESSION_NOT_INFERABLE),
    }
}

fn implicit_any(arena: &mut NodeArena, _ctx: &mut EmitContext) -> LocalTypeInfo {
    LocalTypeInfo {
        node: arena.ty_keyword(KeywordTypeKind::Any),
        flags: LocalTypeFlags::IMPLICIT_ANY,
    }
}

fn infer_prefix_unary(
    arena: &mut NodeArena,
    ctx: &mut EmitContext,
    expr: NodeId,
    op: PrefixOp,
    operand: NodeId,
) -> LocalTypeInfo {
    if op != PrefixOp::Minus {
        return fail(arena, ctx, expr, codes::ISOLATED_EXPRESSION_NOT_INFERABLE);
    }
    match arena.get(operand).map(|n| &n.kind) {
        Some(NodeKind::NumberLit { text }) => {
            let text = text.clone();
            LocalTypeInfo::fresh(arena.ty_number_literal(text, true))
        }
        Some(NodeKind::BigIntLit { text }) => {
            let text = text.clone();
            LocalTypeInfo::fresh(arena.ty_literal(LiteralValue::BigInt {
                text,
                negative: true,
            }))
        }
        _ => fail(arena, ctx, expr, codes::ISOLATED_EXPRESSION_NOT_INFERABLE),
    }
}

fn infer_array_literal(
    arena: &mut NodeArena,
    ctx: &mut EmitContext,
    expr: NodeId,
    elements: &[NodeId],
    const_context: bool,
) -> LocalTypeInfo {
    for &element in elements {
        if matches!(
            arena.get(element).map(|n| &n.kind),
            Some(NodeKind::SpreadElement { .. })
        ) {
            return fail(arena, ctx, element, codes::ISOLATED_ARRAY_SPREAD);
        }
    }

    if const_context {
        // `as const` narrows to a readonly tuple of element types.
        let mut element_types = Vec::with_capacity(elements.len());
        for &element in elements {
            let info = infer_type_of_expression(arena, ctx, element, true);
            element_types.push(info.node);
        }
        let tuple = arena.ty_tuple(element_types);
        return LocalTypeInfo::stable(arena.ty_operator(TypeOperatorKind::Readonly, tuple));
    }

    if elements.is_empty() {
        let element = if ctx.options.strict_null_checks {
            arena.ty_keyword(KeywordTypeKind::Never)
        } else {
            arena.ty_keyword(KeywordTypeKind::Any)
        };
        return LocalTypeInfo::stable(arena.ty_array(element));
    }

    let mut element_types = Vec::with_capacity(elements.len());
    for &element in elements {
        let info = infer_type_of_expression(arena, ctx, element, false);
        element_types.push(widen(arena, info));
    }
    let members = match normalize::normalize_union(arena, &element_types) {
        Ok(members) => members,
        Err(bad) => {
            return fail(arena, ctx, bad, codes::ISOLATED_EXPRESSION_NOT_INFERABLE);
        }
    };
    let element = if members.len() > 1 {
        let union = arena.ty_union(members);
        arena.alloc_synthesized(NodeKind::ParenthesizedType { ty: union }, expr)
    } else {
        members[0]
    };
    LocalTypeInfo::stable(arena.ty_array(element))
}

fn infer_object_literal(
    arena: &mut NodeArena,
    ctx: &mut EmitContext,
    members: &[NodeId],
    const_context: bool,
) -> LocalTypeInfo {
    let mut signatures = Vec::with_capacity(members.len());
    for &member in members {
        let Some(member_node) = arena.get(member) else {
            continue;
        };
        match member_node.kind.clone() {
            NodeKind::PropertyAssignment { name, initializer } => {
                if matches!(
                    arena.get(name).map(|n| &n.kind),
                    Some(NodeKind::ComputedName { .. })
                ) {
                    return fail(arena, ctx, name, codes::ISOLATED_COMPUTED_PROPERTY_NAME);
                }
                let info = infer_type_of_expression(arena, ctx, initializer, const_context);
                let ty = if const_context {
                    info.node
                } else {
                    widen(arena, info)
                };
                let name_copy = arena.deep_copy(name);
                let modifiers = if const_context {
                    ModifierFlags::READONLY
                } else {
                    ModifierFlags::empty()
                };
                let sig = arena.alloc_synthesized(
                    NodeKind::PropertySignature {
                        name: name_copy,
                        ty,
                        optional: false,
                        modifiers,
                    },
                    member,
                );
                signatures.push(sig);
            }
            NodeKind::MethodDecl {
                name, sig, body, ..
            } => {
                if matches!(
                    arena.get(name).map(|n| &n.kind),
                    Some(NodeKind::ComputedName { .. })
                ) {
                    return fail(arena, ctx, name, codes::ISOLATED_COMPUTED_PROPERTY_NAME);
                }
                let fn_type = infer_signature_type(arena, ctx, &sig, body);
                let name_copy = arena.deep_copy(name);
                let out = if const_context {
                    arena.alloc_synthesized(
                        NodeKind::PropertySignature {
                            name: name_copy,
                            ty: fn_type,
                            optional: false,
                            modifiers: ModifierFlags::READONLY,
                        },
                        member,
                    )
                } else {
                    // Reuse the freshly synthesized function type's
                    // signature rather than re-copying parameters.
                    let (params, return_type) = match arena.get(fn_type).map(|n| &n.kind) {
                        Some(NodeKind::FunctionType(s)) => (s.params.clone(), s.return_type),
                        _ => (Vec::new(), fn_type),
                    };
                    arena.alloc_synthesized(
                        NodeKind::MethodSignature {
                            name: name_copy,
                            sig: SignatureData {
                                type_params: Vec::new(),
                                params,
                                return_type,
                            },
                            optional: false,
                        },
                        member,
                    )
                };
                signatures.push(out);
            }
            NodeKind::SpreadAssignment { .. } => {
                return fail(arena, ctx, member, codes::ISOLATED_OBJECT_SPREAD);
            }
            NodeKind::ShorthandProperty { .. } => {
                return fail(arena, ctx, member, codes::ISOLATED_OBJECT_SHORTHAND);
            }
            // Accessors and anything else are outside the local rule set.
            _ => {
                return fail(arena, ctx, member, codes::ISOLATED_EXPRESSION_NOT_INFERABLE);
            }
        }
    }
    LocalTypeInfo::stable(arena.ty_type_literal(signatures))
}

/// Copy parameters into a synthesized signature, requiring each to be
/// locally typed (annotation or inferable initializer).
fn copy_params_for_signature(
    arena: &mut NodeArena,
    ctx: &mut EmitContext,
    params: &[NodeId],
) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(params.len());
    for &param in params {
        let Some(NodeKind::Parameter {
            name,
            ty,
            initializer,
            dotdotdot,
            question,
            ..
        }) = arena.get(param).map(|n| n.kind.clone())
        else {
            continue;
        };
        let param_ty = if ty.is_some() {
            arena.deep_copy(ty)
        } else if initializer.is_some() {
            let info = infer_type_of_expression(arena, ctx, initializer, false);
            widen(arena, info)
        } else {
            fail(arena, ctx, param, codes::ISOLATED_PARAMETER_NEEDS_TYPE).node
        };
        let name_copy = arena.deep_copy(name);
        let copy = arena.alloc_synthesized(
            NodeKind::Parameter {
                name: name_copy,
                ty: param_ty,
                initializer: NodeId::NONE,
                dotdotdot,
                question: question || initializer.is_some(),
                modifiers: ModifierFlags::empty(),
            },
            param,
        );
        out.push(copy);
    }
    out
}

fn infer_function_expression(
    arena: &mut NodeArena,
    ctx: &mut EmitContext,
    f: &tsd_ast::FunctionData,
) -> LocalTypeInfo {
    let sig = SignatureData {
        type_params: f.type_params.clone(),
        params: f.params.clone(),
        return_type: f.return_type,
    };
    LocalTypeInfo::stable(infer_signature_type(arena, ctx, &sig, f.body))
}

fn infer_signature_type(
    arena: &mut NodeArena,
    ctx: &mut EmitContext,
    sig: &SignatureData,
    body: NodeId,
) -> NodeId {
    let params = copy_params_for_signature(arena, ctx, &sig.params);
    let return_type = if sig.return_type.is_some() {
        arena.deep_copy(sig.return_type)
    } else {
        infer_return_type(arena, ctx, body).node
    };
    arena.ty_function(params, return_type)
}

/// Collect every reachable `return` expression of `body` (not entering
/// nested function or class bodies) and infer the union of their types.
pub fn infer_return_type(
    arena: &mut NodeArena,
    ctx: &mut EmitContext,
    body: NodeId,
) -> LocalTypeInfo {
    // An expression-bodied arrow returns its expression.
    let returns = match arena.get(body).map(|n| &n.kind) {
        Some(NodeKind::Block { .. }) => {
            let mut returns = Vec::new();
            collect_returns(arena, body, &mut returns);
            returns
        }
        Some(_) => vec![body],
        None => Vec::new(),
    };

    if returns.is_empty() {
        return LocalTypeInfo::stable(arena.ty_keyword(KeywordTypeKind::Undefined));
    }

    let mut inferred = Vec::with_capacity(returns.len());
    for ret in returns {
        if ret.is_none() {
            let undef = arena.ty_keyword(KeywordTypeKind::Undefined);
            inferred.push(LocalTypeInfo::stable(undef));
        } else {
            inferred.push(infer_type_of_expression(arena, ctx, ret, false));
        }
    }

    if inferred.len() == 1 {
        // A single result widens.
        let node = widen(arena, inferred[0]);
        return LocalTypeInfo::stable(node);
    }

    let widened: Vec<NodeId> = inferred
        .iter()
        .map(|info| widen(arena, *info))
        .collect();
    match normalize::normalize_union(arena, &widened) {
        Ok(members) => LocalTypeInfo::stable(arena.ty_union(members)),
        Err(bad) => fail(arena, ctx, bad, codes::ISOLATED_EXPRESSION_NOT_INFERABLE),
    }
}

/// Push each `return` statement's expression (or `NodeId::NONE` for a
/// bare `return`) without descending into nested callables.
fn collect_returns(arena: &NodeArena, id: NodeId, out: &mut Vec<NodeId>) {
    let Some(node) = arena.get(id) else {
        return;
    };
    match &node.kind {
        NodeKind::ReturnStatement { expr } => out.push(*expr),
        NodeKind::Function(_)
        | NodeKind::ArrowFunction(_)
        | NodeKind::FunctionExpr(_)
        | NodeKind::Class(_)
        | NodeKind::ClassExpr(_)
        | NodeKind::MethodDecl { .. }
        | NodeKind::Accessor { .. }
        | NodeKind::Constructor { .. } => {}
        NodeKind::Block { statements } => {
            for &stmt in statements {
                collect_returns(arena, stmt, out);
            }
        }
        NodeKind::IfStatement {
            then_branch,
            else_branch,
            ..
        } => {
            collect_returns(arena, *then_branch, out);
            if else_branch.is_some() {
                collect_returns(arena, *else_branch, out);
            }
        }
        NodeKind::ExpressionStatement { .. } => {}
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsd_common::DeclarationOptions;
    use tsd_common::span::Span;

    fn ctx(strict: bool) -> EmitContext {
        let mut ctx = EmitContext::new(DeclarationOptions {
            strict_null_checks: strict,
            isolated_declarations: true,
            ..Default::default()
        });
        ctx.begin_file(NodeId::NONE, "a.ts");
        ctx
    }

    #[test]
    fn string_literal_is_fresh_and_widens() {
        let mut arena = NodeArena::new();
        let mut ctx = ctx(true);
        let lit = arena.alloc(NodeKind::StringLit("hi".into()), Span::EMPTY);

        let info = infer_type_of_expression(&mut arena, &mut ctx, lit, false);
        assert!(info.flags.contains(LocalTypeFlags::FRESH));
        assert!(matches!(
            arena.kind(info.node),
            NodeKind::LiteralType(LiteralValue::String(s)) if s == "hi"
        ));

        let widened = widen(&mut arena, info);
        assert!(matches!(
            arena.kind(widened),
            NodeKind::KeywordType(KeywordTypeKind::String)
        ));
    }

    #[test]
    fn const_context_keeps_literals_narrow() {
        let mut arena = NodeArena::new();
        let mut ctx = ctx(true);
        let lit = arena.alloc(
            NodeKind::NumberLit { text: "42".into() },
            Span::EMPTY,
        );
        let as_const = arena.alloc(
            NodeKind::AsExpr {
                expr: lit,
                ty: NodeId::NONE,
                is_const: true,
            },
            Span::EMPTY,
        );

        let info = infer_type_of_expression(&mut arena, &mut ctx, as_const, false);
        assert!(matches!(
            arena.kind(info.node),
            NodeKind::LiteralType(LiteralValue::Number { text, negative: false }) if text == "42"
        ));
    }

    #[test]
    fn empty_array_element_depends_on_strictness() {
        for (strict, expected) in [
            (true, KeywordTypeKind::Never),
            (false, KeywordTypeKind::Any),
        ] {
            let mut arena = NodeArena::new();
            let mut ctx = ctx(strict);
            let array = arena.alloc(
                NodeKind::ArrayLiteral {
                    elements: Vec::new(),
                },
                Span::EMPTY,
            );
            let info = infer_type_of_expression(&mut arena, &mut ctx, array, false);
            let NodeKind::ArrayType { element } = arena.kind(info.node) else {
                panic!("expected array type");
            };
            assert!(matches!(
                arena.kind(*element),
                NodeKind::KeywordType(k) if *k == expected
            ));
        }
    }

    #[test]
    fn const_array_becomes_readonly_tuple() {
        let mut arena = NodeArena::new();
        let mut ctx = ctx(true);
        let one = arena.alloc(NodeKind::NumberLit { text: "1".into() }, Span::EMPTY);
        let two = arena.alloc(NodeKind::StringLit("x".into()), Span::EMPTY);
        let array = arena.alloc(
            NodeKind::ArrayLiteral {
                elements: vec![one, two],
            },
            Span::EMPTY,
        );

        let info = infer_type_of_expression(&mut arena, &mut ctx, array, true);
        let NodeKind::TypeOperator {
            op: TypeOperatorKind::Readonly,
            ty,
        } = arena.kind(info.node)
        else {
            panic!("expected readonly operator");
        };
        let NodeKind::TupleType { elements } = arena.kind(*ty) else {
            panic!("expected tuple");
        };
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn object_spread_fails_with_placeholder() {
        let mut arena = NodeArena::new();
        let mut ctx = ctx(true);
        let spread_src = arena.alloc(NodeKind::Ident("other".into()), Span::EMPTY);
        let spread = arena.alloc(
            NodeKind::SpreadAssignment { expr: spread_src },
            Span::new(3, 11),
        );
        let obj = arena.alloc(
            NodeKind::ObjectLiteral {
                members: vec![spread],
            },
            Span::new(0, 13),
        );

        let info = infer_type_of_expression(&mut arena, &mut ctx, obj, false);
        assert!(matches!(arena.kind(info.node), NodeKind::InvalidType));
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(ctx.diagnostics()[0].code, codes::ISOLATED_OBJECT_SPREAD);
    }

    #[test]
    fn bodiless_return_infers_undefined() {
        let mut arena = NodeArena::new();
        let mut ctx = ctx(true);
        let body = arena.alloc(
            NodeKind::Block {
                statements: Vec::new(),
            },
            Span::EMPTY,
        );
        let info = infer_return_type(&mut arena, &mut ctx, body);
        assert!(matches!(
            arena.kind(info.node),
            NodeKind::KeywordType(KeywordTypeKind::Undefined)
        ));
    }

    #[test]
    fn mixed_returns_union_and_widen() {
        let mut arena = NodeArena::new();
        let mut ctx = ctx(true);
        let one = arena.alloc(NodeKind::NumberLit { text: "1".into() }, Span::EMPTY);
        let ret1 = arena.alloc(NodeKind::ReturnStatement { expr: one }, Span::EMPTY);
        let s = arena.alloc(NodeKind::StringLit("a".into()), Span::EMPTY);
        let ret2 = arena.alloc(NodeKind::ReturnStatement { expr: s }, Span::EMPTY);
        let body = arena.alloc(
            NodeKind::Block {
                statements: vec![ret1, ret2],
            },
            Span::EMPTY,
        );

        let info = infer_return_type(&mut arena, &mut ctx, body);
        let NodeKind::UnionType { members } = arena.kind(info.node) else {
            panic!("expected union");
        };
        assert_eq!(members.len(), 2);
        assert!(matches!(
            arena.kind(members[0]),
            NodeKind::KeywordType(KeywordTypeKind::Number)
        ));
        assert!(matches!(
            arena.kind(members[1]),
            NodeKind::KeywordType(KeywordTypeKind::String)
        ));
    }

    #[test]
    fn nested_function_returns_are_not_collected() {
        let mut arena = NodeArena::new();
        let mut ctx = ctx(true);
        let inner_lit = arena.alloc(NodeKind::NumberLit { text: "1".into() }, Span::EMPTY);
        let inner_ret = arena.alloc(NodeKind::ReturnStatement { expr: inner_lit }, Span::EMPTY);
        let inner_body = arena.alloc(
            NodeKind::Block {
                statements: vec![inner_ret],
            },
            Span::EMPTY,
        );
        let inner_fn = arena.alloc(
            NodeKind::FunctionExpr(tsd_ast::FunctionData {
                name: None,
                type_params: Vec::new(),
                params: Vec::new(),
                return_type: NodeId::NONE,
                body: inner_body,
                modifiers: ModifierFlags::empty(),
            }),
            Span::EMPTY,
        );
        let stmt = arena.alloc(NodeKind::ExpressionStatement { expr: inner_fn }, Span::EMPTY);
        let body = arena.alloc(
            NodeKind::Block {
                statements: vec![stmt],
            },
            Span::EMPTY,
        );

        let info = infer_return_type(&mut arena, &mut ctx, body);
        assert!(matches!(
            arena.kind(info.node),
            NodeKind::KeywordType(KeywordTypeKind::Undefined)
        ));
    }
}
