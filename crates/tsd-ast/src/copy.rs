//! Deep copying of subtrees into fresh output nodes.
//!
//! The emitter never mutates a checked tree; whenever it wants to carry
//! a node into the output it copies the subtree and links each copy back
//! to its source through `Node::original`.

use crate::arena::{NodeArena, NodeId};
use crate::node::{ImportEqualsTarget, NodeKind};

impl NodeArena {
    /// Deep-copy the subtree rooted at `id` into fresh nodes, linking
    /// each copy to its original. `NodeId::NONE` copies to itself.
    pub fn deep_copy(&mut self, id: NodeId) -> NodeId {
        if id.is_none() {
            return NodeId::NONE;
        }
        let Some(node) = self.get(id) else {
            return NodeId::NONE;
        };
        let mut kind = node.kind.clone();
        let span = node.span;

        // Copy children first, then rewrite the child slots in the
        // cloned payload.
        match &mut kind {
            NodeKind::SourceFile { statements, .. } | NodeKind::ModuleBlock { statements } => {
                self.copy_list(statements);
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
            NodeKind::QualifiedName { left, .. } => self.copy_slot(left),
            NodeKind::ComputedName { expr }
            | NodeKind::SpreadAssignment { expr }
            | NodeKind::SpreadElement { expr }
            | NodeKind::ParenExpr { expr }
            | NodeKind::ExpressionStatement { expr }
            | NodeKind::ExportAssignment { expr, .. } => self.copy_slot(expr),
            NodeKind::Function(f) | NodeKind::ArrowFunction(f) | NodeKind::FunctionExpr(f) => {
                self.copy_list(&mut f.type_params);
                self.copy_list(&mut f.params);
                self.copy_slot(&mut f.return_type);
                self.copy_slot(&mut f.body);
            }
            NodeKind::Class(c) | NodeKind::ClassExpr(c) => {
                self.copy_list(&mut c.type_params);
                self.copy_list(&mut c.heritage);
                self.copy_list(&mut c.members);
            }
            NodeKind::Interface(i) => {
                self.copy_list(&mut i.type_params);
                self.copy_list(&mut i.heritage);
                self.copy_list(&mut i.members);
            }
            NodeKind::TypeAlias(t) => {
                self.copy_list(&mut t.type_params);
                self.copy_slot(&mut t.ty);
            }
            NodeKind::Enum(e) => self.copy_list(&mut e.members),
            NodeKind::EnumMember { name, initializer } => {
                self.copy_slot(name);
                self.copy_slot(initializer);
            }
            NodeKind::Module(m) => self.copy_slot(&mut m.body),
            NodeKind::VariableStatement(v) => self.copy_list(&mut v.declarations),
            NodeKind::VariableDeclaration {
                name,
                ty,
                initializer,
            } => {
                self.copy_slot(name);
                self.copy_slot(ty);
                self.copy_slot(initializer);
            }
            NodeKind::ObjectBindingPattern { elements }
            | NodeKind::ArrayBindingPattern { elements } => self.copy_list(elements),
            NodeKind::BindingElement {
                name,
                property_name,
                initializer,
                ..
            } => {
                self.copy_slot(name);
                self.copy_slot(property_name);
                self.copy_slot(initializer);
            }
            NodeKind::ImportEquals { target, .. } => {
                if let ImportEqualsTarget::EntityName(name) = target {
                    self.copy_slot(name);
                }
            }
            NodeKind::PropertyDecl {
                name,
                ty,
                initializer,
                ..
            } => {
                self.copy_slot(name);
                self.copy_slot(ty);
                self.copy_slot(initializer);
            }
            NodeKind::MethodDecl {
                name, sig, body, ..
            } => {
                self.copy_slot(name);
                self.copy_list(&mut sig.type_params);
                self.copy_list(&mut sig.params);
                self.copy_slot(&mut sig.return_type);
                self.copy_slot(body);
            }
            NodeKind::Constructor { params, body, .. } => {
                self.copy_list(params);
                self.copy_slot(body);
            }
            NodeKind::Accessor {
                name,
                params,
                return_type,
                body,
                ..
            } => {
                self.copy_slot(name);
                self.copy_list(params);
                self.copy_slot(return_type);
                self.copy_slot(body);
            }
            NodeKind::PropertySignature { name, ty, .. } => {
                self.copy_slot(name);
                self.copy_slot(ty);
            }
            NodeKind::MethodSignature { name, sig, .. } => {
                self.copy_slot(name);
                self.copy_list(&mut sig.type_params);
                self.copy_list(&mut sig.params);
                self.copy_slot(&mut sig.return_type);
            }
            NodeKind::CallSignature(sig)
            | NodeKind::ConstructSignature(sig)
            | NodeKind::FunctionType(sig) => {
                self.copy_list(&mut sig.type_params);
                self.copy_list(&mut sig.params);
                self.copy_slot(&mut sig.return_type);
            }
            NodeKind::ConstructorType { sig, .. } => {
                self.copy_list(&mut sig.type_params);
                self.copy_list(&mut sig.params);
                self.copy_slot(&mut sig.return_type);
            }
            NodeKind::IndexSignature { param, ty, .. } => {
                self.copy_slot(param);
                self.copy_slot(ty);
            }
            NodeKind::Parameter {
                name,
                ty,
                initializer,
                ..
            } => {
                self.copy_slot(name);
                self.copy_slot(ty);
                self.copy_slot(initializer);
            }
            NodeKind::TypeParameter {
                constraint,
                default,
                ..
            } => {
                self.copy_slot(constraint);
                self.copy_slot(default);
            }
            NodeKind::HeritageClause { types, .. } => self.copy_list(types),
            NodeKind::ExpressionWithTypeArgs { expr, type_args } => {
                self.copy_slot(expr);
                self.copy_list(type_args);
            }
            NodeKind::TypeReference { name, type_args } => {
                self.copy_slot(name);
                self.copy_list(type_args);
            }
            NodeKind::ArrayType { element } => self.copy_slot(element),
            NodeKind::TupleType { elements }
            | NodeKind::UnionType { members: elements }
            | NodeKind::IntersectionType { members: elements }
            | NodeKind::TypeLiteral { members: elements } => self.copy_list(elements),
            NodeKind::TypeQuery { name } => self.copy_slot(name),
            NodeKind::TypeOperator { ty, .. } | NodeKind::ParenthesizedType { ty } => {
                self.copy_slot(ty);
            }
            NodeKind::IndexedAccessType { object, index } => {
                self.copy_slot(object);
                self.copy_slot(index);
            }
            NodeKind::MappedType { type_param, ty, .. } => {
                self.copy_slot(type_param);
                self.copy_slot(ty);
            }
            NodeKind::ImportTypeNode {
                qualifier,
                type_args,
                ..
            } => {
                self.copy_slot(qualifier);
                self.copy_list(type_args);
            }
            NodeKind::TemplateExpr { spans, .. } => {
                for (expr, _) in spans.iter_mut() {
                    self.copy_slot(expr);
                }
            }
            NodeKind::PrefixUnary { operand, .. } => self.copy_slot(operand),
            NodeKind::ObjectLiteral { members } => self.copy_list(members),
            NodeKind::ArrayLiteral { elements } => self.copy_list(elements),
            NodeKind::PropertyAssignment { name, initializer } => {
                self.copy_slot(name);
                self.copy_slot(initializer);
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
                self.copy_slot(callee);
                self.copy_list(type_args);
                self.copy_list(args);
            }
            NodeKind::PropertyAccess { expr, .. } => self.copy_slot(expr),
            NodeKind::AsExpr { expr, ty, .. } => {
                self.copy_slot(expr);
                self.copy_slot(ty);
            }
            NodeKind::TypeAssertion { ty, expr } => {
                self.copy_slot(ty);
                self.copy_slot(expr);
            }
            NodeKind::Block { statements } => self.copy_list(statements),
            NodeKind::ReturnStatement { expr } => self.copy_slot(expr),
            NodeKind::IfStatement {
                cond,
                then_branch,
                else_branch,
            } => {
                self.copy_slot(cond);
                self.copy_slot(then_branch);
                self.copy_slot(else_branch);
            }
        }

        let copy = self.alloc(kind, span);
        self.set_original(copy, id);
        for child in crate::visit::children_of(self, copy) {
            self.set_parent(child, copy);
        }
        copy
    }

    fn copy_slot(&mut self, slot: &mut NodeId) {
        *slot = self.deep_copy(*slot);
    }

    fn copy_list(&mut self, list: &mut Vec<NodeId>) {
        for slot in list.iter_mut() {
            if slot.is_some() {
                *slot = self.deep_copy(*slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::KeywordTypeKind;

    #[test]
    fn copies_link_back_to_originals() {
        let mut arena = NodeArena::new();
        let element = arena.ty_keyword(KeywordTypeKind::String);
        let array = arena.ty_array(element);
        let copy = arena.deep_copy(array);

        assert_ne!(copy, array);
        assert_eq!(arena.original(copy), array);
        let copied_element = match arena.kind(copy) {
            NodeKind::ArrayType { element } => *element,
            other => panic!("expected array type, got {other:?}"),
        };
        assert_ne!(copied_element, element);
        assert_eq!(arena.original(copied_element), element);
        assert_eq!(arena.parent(copied_element), copy);
    }
}
