//! Generic child traversal over the closed node union.

use crate::arena::{NodeArena, NodeId};
use crate::node::{ImportEqualsTarget, NodeKind};

fn push_some(out: &mut Vec<NodeId>, id: NodeId) {
    if id.is_some() {
        out.push(id);
    }
}

/// Direct children of `id`, in syntactic order. Absent (`NodeId::NONE`)
/// slots are skipped.
#[must_use]
pub fn children_of(arena: &NodeArena, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let Some(node) = arena.get(id) else {
        return out;
    };
    match &node.kind {
        NodeKind::SourceFile { statements, .. } | NodeKind::ModuleBlock { statements } => {
            out.extend_from_slice(statements);
        }
        NodeKind::Ident(_)
        | NodeKind::PrivateName(_)
        | NodeKind::KeywordType(_)
        | NodeKind::LiteralType(_)
        | NodeKind::ThisType
        | NodeKind::InvalidType
        | NodeKind::StringLit(_)
        | NodeKind::NumberLit { .. }
        | NodeKind::BigIntLit { .. }
        | NodeKind::BoolLit(_)
        | NodeKind::NullLit
        | NodeKind::RegExpLit(_)
        | NodeKind::NoSubTemplate(_)
        | NodeKind::ShorthandProperty { .. }
        | NodeKind::ImportDecl { .. }
        | NodeKind::ExportDecl { .. } => {}
        NodeKind::QualifiedName { left, .. } => push_some(&mut out, *left),
        NodeKind::ComputedName { expr }
        | NodeKind::SpreadAssignment { expr }
        | NodeKind::SpreadElement { expr }
        | NodeKind::ParenExpr { expr }
        | NodeKind::ExpressionStatement { expr }
        | NodeKind::ExportAssignment { expr, .. } => push_some(&mut out, *expr),
        NodeKind::Function(f) | NodeKind::ArrowFunction(f) | NodeKind::FunctionExpr(f) => {
            out.extend_from_slice(&f.type_params);
            out.extend_from_slice(&f.params);
            push_some(&mut out, f.return_type);
            push_some(&mut out, f.body);
        }
        NodeKind::Class(c) | NodeKind::ClassExpr(c) => {
            out.extend_from_slice(&c.type_params);
            out.extend_from_slice(&c.heritage);
            out.extend_from_slice(&c.members);
        }
        NodeKind::Interface(i) => {
            out.extend_from_slice(&i.type_params);
            out.extend_from_slice(&i.heritage);
            out.extend_from_slice(&i.members);
        }
        NodeKind::TypeAlias(t) => {
            out.extend_from_slice(&t.type_params);
            push_some(&mut out, t.ty);
        }
        NodeKind::Enum(e) => out.extend_from_slice(&e.members),
        NodeKind::EnumMember { name, initializer } => {
            push_some(&mut out, *name);
            push_some(&mut out, *initializer);
        }
        NodeKind::Module(m) => push_some(&mut out, m.body),
        NodeKind::VariableStatement(v) => out.extend_from_slice(&v.declarations),
        NodeKind::VariableDeclaration {
            name,
            ty,
            initializer,
        } => {
            push_some(&mut out, *name);
            push_some(&mut out, *ty);
            push_some(&mut out, *initializer);
        }
        NodeKind::ObjectBindingPattern { elements } => out.extend_from_slice(elements),
        NodeKind::ArrayBindingPattern { elements } => {
            out.extend(elements.iter().copied().filter(|e| e.is_some()));
        }
        NodeKind::BindingElement {
            name,
            property_name,
            initializer,
            ..
        } => {
            push_some(&mut out, *property_name);
            push_some(&mut out, *name);
            push_some(&mut out, *initializer);
        }
        NodeKind::ImportEquals { target, .. } => {
            if let ImportEqualsTarget::EntityName(name) = target {
                push_some(&mut out, *name);
            }
        }
        NodeKind::PropertyDecl {
            name,
            ty,
            initializer,
            ..
        } => {
            push_some(&mut out, *name);
            push_some(&mut out, *ty);
            push_some(&mut out, *initializer);
        }
        NodeKind::MethodDecl {
            name, sig, body, ..
        } => {
            push_some(&mut out, *name);
            out.extend_from_slice(&sig.type_params);
            out.extend_from_slice(&sig.params);
            push_some(&mut out, sig.return_type);
            push_some(&mut out, *body);
        }
        NodeKind::Constructor { params, body, .. } => {
            out.extend_from_slice(params);
            push_some(&mut out, *body);
        }
        NodeKind::Accessor {
            name,
            params,
            return_type,
            body,
            ..
        } => {
            push_some(&mut out, *name);
            out.extend_from_slice(params);
            push_some(&mut out, *return_type);
            push_some(&mut out, *body);
        }
        NodeKind::PropertySignature { name, ty, .. } => {
            push_some(&mut out, *name);
            push_some(&mut out, *ty);
        }
        NodeKind::MethodSignature { name, sig, .. } => {
            push_some(&mut out, *name);
            out.extend_from_slice(&sig.type_params);
            out.extend_from_slice(&sig.params);
            push_some(&mut out, sig.return_type);
        }
        NodeKind::CallSignature(sig)
        | NodeKind::ConstructSignature(sig)
        | NodeKind::FunctionType(sig) => {
            out.extend_from_slice(&sig.type_params);
            out.extend_from_slice(&sig.params);
            push_some(&mut out, sig.return_type);
        }
        NodeKind::ConstructorType { sig, .. } => {
            out.extend_from_slice(&sig.type_params);
            out.extend_from_slice(&sig.params);
            push_some(&mut out, sig.return_type);
        }
        NodeKind::IndexSignature { param, ty, .. } => {
            push_some(&mut out, *param);
            push_some(&mut out, *ty);
        }
        NodeKind::Parameter {
            name,
            ty,
            initializer,
            ..
        } => {
            push_some(&mut out, *name);
            push_some(&mut out, *ty);
            push_some(&mut out, *initializer);
        }
        NodeKind::TypeParameter {
            constraint,
            default,
            ..
        } => {
            push_some(&mut out, *constraint);
            push_some(&mut out, *default);
        }
        NodeKind::HeritageClause { types, .. } => out.extend_from_slice(types),
        NodeKind::ExpressionWithTypeArgs { expr, type_args } => {
            push_some(&mut out, *expr);
            out.extend_from_slice(type_args);
        }
        NodeKind::TypeReference { name, type_args } => {
            push_some(&mut out, *name);
            out.extend_from_slice(type_args);
        }
        NodeKind::ArrayType { element } => push_some(&mut out, *element),
        NodeKind::TupleType { elements }
        | NodeKind::UnionType { members: elements }
        | NodeKind::IntersectionType { members: elements }
        | NodeKind::TypeLiteral { members: elements } => out.extend_from_slice(elements),
        NodeKind::TypeQuery { name } => push_some(&mut out, *name),
        NodeKind::TypeOperator { ty, .. } | NodeKind::ParenthesizedType { ty } => {
            push_some(&mut out, *ty);
        }
        NodeKind::IndexedAccessType { object, index } => {
            push_some(&mut out, *object);
            push_some(&mut out, *index);
        }
        NodeKind::MappedType { type_param, ty, .. } => {
            push_some(&mut out, *type_param);
            push_some(&mut out, *ty);
        }
        NodeKind::ImportTypeNode {
            qualifier,
            type_args,
            ..
        } => {
            push_some(&mut out, *qualifier);
            out.extend_from_slice(type_args);
        }
        NodeKind::TemplateExpr { spans, .. } => {
            out.extend(spans.iter().map(|(expr, _)| *expr));
        }
        NodeKind::PrefixUnary { operand, .. } => push_some(&mut out, *operand),
        NodeKind::ObjectLiteral { members } => out.extend_from_slice(members),
        NodeKind::ArrayLiteral { elements } => {
            out.extend(elements.iter().copied().filter(|e| e.is_some()));
        }
        NodeKind::PropertyAssignment { name, initializer } => {
            push_some(&mut out, *name);
            push_some(&mut out, *initializer);
        }
        NodeKind::NewExpr {
            callee,
            type_args,
            args,
        }
        | NodeKind::CallExpr {
            callee,
            type_args,
            args,
        } => {
            push_some(&mut out, *callee);
            out.extend_from_slice(type_args);
            out.extend_from_slice(args);
        }
        NodeKind::PropertyAccess { expr, .. } => push_some(&mut out, *expr),
        NodeKind::AsExpr { expr, ty, .. } => {
            push_some(&mut out, *expr);
            push_some(&mut out, *ty);
        }
        NodeKind::TypeAssertion { ty, expr } => {
            push_some(&mut out, *ty);
            push_some(&mut out, *expr);
        }
        NodeKind::Block { statements } => out.extend_from_slice(statements),
        NodeKind::ReturnStatement { expr } => push_some(&mut out, *expr),
        NodeKind::IfStatement {
            cond,
            then_branch,
            else_branch,
        } => {
            push_some(&mut out, *cond);
            push_some(&mut out, *then_branch);
            push_some(&mut out, *else_branch);
        }
    }
    out
}

/// Invoke `f` on each direct child of `id`.
pub fn for_each_child(arena: &NodeArena, id: NodeId, f: &mut impl FnMut(NodeId)) {
    for child in children_of(arena, id) {
        f(child);
    }
}

/// Fix up parent links for the whole subtree under `root`. Front ends
/// call this once after building a checked tree.
pub fn set_parents(arena: &mut NodeArena, root: NodeId) {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        for child in children_of(arena, id) {
            arena.set_parent(child, id);
            stack.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::ModifierFlags;
    use crate::node::*;
    use tsd_common::span::Span;

    #[test]
    fn set_parents_links_nested_declarations() {
        let mut arena = NodeArena::new();
        let ty = arena.ty_keyword(KeywordTypeKind::Number);
        let name = arena.add_ident(Span::new(4, 5), "x");
        let decl = arena.alloc(
            NodeKind::VariableDeclaration {
                name,
                ty,
                initializer: NodeId::NONE,
            },
            Span::new(4, 14),
        );
        let stmt = arena.alloc(
            NodeKind::VariableStatement(VariableStatementData {
                kind: VarKind::Const,
                declarations: vec![decl],
                modifiers: ModifierFlags::EXPORT,
            }),
            Span::new(0, 15),
        );
        let file = arena.add_source_file("a.ts", vec![stmt]);
        set_parents(&mut arena, file);

        assert_eq!(arena.parent(decl), stmt);
        assert_eq!(arena.parent(name), decl);
        assert_eq!(arena.parent(ty), decl);
        assert_eq!(arena.parent(stmt), file);
    }
}
