//! Container-specific accessibility diagnostics.
//!
//! When a referenced symbol cannot be named, the message depends on
//! *where* the reference sits: an extends clause, a property type, a
//! parameter type, a return type, and so on. `DiagnosticContext`
//! captures that container and maps to the matching 4000-series
//! template.

use tsd_ast::{NodeArena, NodeId, NodeKind, builder, ModifierFlags, HeritageKind};
use tsd_common::diagnostics::{Diagnostic, diagnostic_codes as codes};
use tsd_common::span::Span;

/// The syntactic container of a failed symbol reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticContext {
    ClassExtends { class_name: String },
    ClassImplements { class_name: String },
    InterfaceExtends { interface_name: String },
    ExportedVariable { name: String },
    ClassProperty { name: String, is_static: bool },
    InterfaceProperty { name: String },
    GetterReturn { name: String },
    IndexSignatureReturn,
    CallSignatureReturn,
    ConstructSignatureReturn,
    MethodReturn { is_static: bool, in_interface: bool },
    FunctionReturn,
    ConstructorParameter { name: String },
    MethodParameter { name: String, in_interface: bool },
    FunctionParameter { name: String },
    TypeAliasBody { name: String },
    DefaultExport,
    TypeParameter { name: String, owner: TypeParameterOwner },
    ImportEqualsTarget { name: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeParameterOwner {
    Class,
    Interface,
    Function,
    TypeAlias,
}

impl DiagnosticContext {
    /// Diagnostic code and template arguments for this container, given
    /// the blocking symbol's name.
    #[must_use]
    pub fn code_and_args(&self, symbol: &str) -> (u32, Vec<String>) {
        let s = symbol.to_string();
        match self {
            DiagnosticContext::ClassExtends { class_name } => {
                (codes::CLASS_EXTENDS_PRIVATE_NAME, vec![class_name.clone(), s])
            }
            DiagnosticContext::ClassImplements { class_name } => (
                codes::CLASS_IMPLEMENTS_PRIVATE_NAME,
                vec![class_name.clone(), s],
            ),
            DiagnosticContext::InterfaceExtends { interface_name } => (
                codes::INTERFACE_EXTENDS_PRIVATE_NAME,
                vec![interface_name.clone(), s],
            ),
            DiagnosticContext::ExportedVariable { name } => {
                (codes::EXPORTED_VARIABLE_PRIVATE_NAME, vec![name.clone(), s])
            }
            DiagnosticContext::ClassProperty { name, is_static } => {
                let code = if *is_static {
                    codes::CLASS_STATIC_PROPERTY_PRIVATE_NAME
                } else {
                    codes::CLASS_PROPERTY_PRIVATE_NAME
                };
                (code, vec![name.clone(), s])
            }
            DiagnosticContext::InterfaceProperty { name } => {
                (codes::INTERFACE_PROPERTY_PRIVATE_NAME, vec![name.clone(), s])
            }
            DiagnosticContext::GetterReturn { name } => {
                (codes::GETTER_RETURN_PRIVATE_NAME, vec![name.clone(), s])
            }
            DiagnosticContext::IndexSignatureReturn => {
                (codes::INDEX_SIGNATURE_RETURN_PRIVATE_NAME, vec![s])
            }
            DiagnosticContext::CallSignatureReturn => {
                (codes::CALL_SIGNATURE_RETURN_PRIVATE_NAME, vec![s])
            }
            DiagnosticContext::ConstructSignatureReturn => {
                (codes::CONSTRUCT_SIGNATURE_RETURN_PRIVATE_NAME, vec![s])
            }
            DiagnosticContext::MethodReturn {
                is_static,
                in_interface,
            } => {
                let code = if *in_interface {
                    codes::INTERFACE_METHOD_RETURN_PRIVATE_NAME
                } else if *is_static {
                    codes::STATIC_METHOD_RETURN_PRIVATE_NAME
                } else {
                    codes::METHOD_RETURN_PRIVATE_NAME
                };
                (code, vec![s])
            }
            DiagnosticContext::FunctionReturn => (codes::FUNCTION_RETURN_PRIVATE_NAME, vec![s]),
            DiagnosticContext::ConstructorParameter { name } => (
                codes::CONSTRUCTOR_PARAMETER_PRIVATE_NAME,
                vec![name.clone(), s],
            ),
            DiagnosticContext::MethodParameter { name, in_interface } => {
                let code = if *in_interface {
                    codes::INTERFACE_METHOD_PARAMETER_PRIVATE_NAME
                } else {
                    codes::METHOD_PARAMETER_PRIVATE_NAME
                };
                (code, vec![name.clone(), s])
            }
            DiagnosticContext::FunctionParameter { name } => {
                (codes::FUNCTION_PARAMETER_PRIVATE_NAME, vec![name.clone(), s])
            }
            DiagnosticContext::TypeAliasBody { name } => {
                (codes::EXPORTED_TYPE_ALIAS_PRIVATE_NAME, vec![name.clone(), s])
            }
            DiagnosticContext::DefaultExport => (codes::DEFAULT_EXPORT_PRIVATE_NAME, vec![s]),
            DiagnosticContext::TypeParameter { name, owner } => {
                let code = match owner {
                    TypeParameterOwner::Class => codes::CLASS_TYPE_PARAMETER_PRIVATE_NAME,
                    TypeParameterOwner::Interface => codes::INTERFACE_TYPE_PARAMETER_PRIVATE_NAME,
                    TypeParameterOwner::Function => codes::FUNCTION_TYPE_PARAMETER_PRIVATE_NAME,
                    TypeParameterOwner::TypeAlias => codes::TYPE_ALIAS_TYPE_PARAMETER_PRIVATE_NAME,
                };
                (code, vec![name.clone(), s])
            }
            DiagnosticContext::ImportEqualsTarget { name } => {
                (codes::IMPORT_PRIVATE_NAME, vec![name.clone(), s])
            }
        }
    }

    /// Format the accessibility diagnostic at `span`.
    #[must_use]
    pub fn to_diagnostic(&self, file: &str, span: Span, symbol: &str) -> Diagnostic {
        let (code, args) = self.code_and_args(symbol);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        Diagnostic::error_with_template(file, span.start, span.len(), code, &arg_refs)
    }
}

/// Climb from a reference node to the container that determines the
/// diagnostic template. Returns the context and the container node whose
/// identity keys error deduplication.
#[must_use]
pub fn context_for_error_node(
    arena: &NodeArena,
    error_node: NodeId,
) -> Option<(DiagnosticContext, NodeId)> {
    let mut heritage: Option<HeritageKind> = None;
    let mut param_name: Option<String> = None;

    for ancestor in std::iter::once(error_node).chain(arena.ancestors(error_node)) {
        let node = arena.get(ancestor)?;
        match &node.kind {
            NodeKind::HeritageClause { kind, .. } => heritage = Some(*kind),
            NodeKind::Class(c) => {
                let class_name = c.name.clone().unwrap_or_default();
                let ctx = match heritage {
                    Some(HeritageKind::Implements) => {
                        DiagnosticContext::ClassImplements { class_name }
                    }
                    _ => DiagnosticContext::ClassExtends { class_name },
                };
                return Some((ctx, ancestor));
            }
            NodeKind::Interface(i) => {
                if heritage.is_some() {
                    return Some((
                        DiagnosticContext::InterfaceExtends {
                            interface_name: i.name.clone(),
                        },
                        ancestor,
                    ));
                }
            }
            NodeKind::VariableDeclaration { name, .. } => {
                return Some((
                    DiagnosticContext::ExportedVariable {
                        name: builder::member_name_text(arena, *name),
                    },
                    ancestor,
                ));
            }
            NodeKind::PropertyDecl {
                name, modifiers, ..
            } => {
                return Some((
                    DiagnosticContext::ClassProperty {
                        name: builder::member_name_text(arena, *name),
                        is_static: modifiers.contains(ModifierFlags::STATIC),
                    },
                    ancestor,
                ));
            }
            NodeKind::PropertySignature { name, .. } => {
                return Some((
                    DiagnosticContext::InterfaceProperty {
                        name: builder::member_name_text(arena, *name),
                    },
                    ancestor,
                ));
            }
            NodeKind::Parameter { name, .. } => {
                param_name = Some(builder::member_name_text(arena, *name));
            }
            NodeKind::TypeParameter { name, .. } => {
                // Owner decides the template; keep climbing.
                let owner = arena.parent(ancestor);
                let owner_kind = arena.get(owner).map(|n| &n.kind);
                let owner = match owner_kind {
                    Some(NodeKind::Class(_)) => TypeParameterOwner::Class,
                    Some(NodeKind::Interface(_)) => TypeParameterOwner::Interface,
                    Some(NodeKind::TypeAlias(_)) => TypeParameterOwner::TypeAlias,
                    _ => TypeParameterOwner::Function,
                };
                return Some((
                    DiagnosticContext::TypeParameter {
                        name: name.clone(),
                        owner,
                    },
                    ancestor,
                ));
            }
            NodeKind::Constructor { .. } => {
                if let Some(name) = param_name.take() {
                    return Some((DiagnosticContext::ConstructorParameter { name }, ancestor));
                }
            }
            NodeKind::MethodDecl { modifiers, .. } => {
                let ctx = if let Some(name) = param_name.take() {
                    DiagnosticContext::MethodParameter {
                        name,
                        in_interface: false,
                    }
                } else {
                    DiagnosticContext::MethodReturn {
                        is_static: modifiers.contains(ModifierFlags::STATIC),
                        in_interface: false,
                    }
                };
                return Some((ctx, ancestor));
            }
            NodeKind::MethodSignature { .. } => {
                let ctx = if let Some(name) = param_name.take() {
                    DiagnosticContext::MethodParameter {
                        name,
                        in_interface: true,
                    }
                } else {
                    DiagnosticContext::MethodReturn {
                        is_static: false,
                        in_interface: true,
                    }
                };
                return Some((ctx, ancestor));
            }
            NodeKind::Accessor { name, .. } => {
                return Some((
                    DiagnosticContext::GetterReturn {
                        name: builder::member_name_text(arena, *name),
                    },
                    ancestor,
                ));
            }
            NodeKind::CallSignature(_) => {
                return Some((DiagnosticContext::CallSignatureReturn, ancestor));
            }
            NodeKind::ConstructSignature(_) => {
                return Some((DiagnosticContext::ConstructSignatureReturn, ancestor));
            }
            NodeKind::IndexSignature { .. } => {
                return Some((DiagnosticContext::IndexSignatureReturn, ancestor));
            }
            NodeKind::Function(_) => {
                let ctx = if let Some(name) = param_name.take() {
                    DiagnosticContext::FunctionParameter { name }
                } else {
                    DiagnosticContext::FunctionReturn
                };
                return Some((ctx, ancestor));
            }
            NodeKind::TypeAlias(t) => {
                return Some((
                    DiagnosticContext::TypeAliasBody {
                        name: t.name.clone(),
                    },
                    ancestor,
                ));
            }
            NodeKind::ImportEquals { name, .. } => {
                return Some((
                    DiagnosticContext::ImportEqualsTarget { name: name.clone() },
                    ancestor,
                ));
            }
            NodeKind::ExportAssignment { .. } => {
                return Some((DiagnosticContext::DefaultExport, ancestor));
            }
            NodeKind::SourceFile { .. } => return None,
            _ => {}
        }
    }
    None
}

/// Outermost reference expression enclosing `node`: climbs through
/// qualified-name / property-access chains so the error lands on the
/// full `A.B.C` rather than the leftmost `A`.
#[must_use]
pub fn outermost_reference(arena: &NodeArena, mut node: NodeId) -> NodeId {
    loop {
        let parent = arena.parent(node);
        match arena.get(parent).map(|n| &n.kind) {
            Some(NodeKind::QualifiedName { .. } | NodeKind::PropertyAccess { .. }) => {
                node = parent;
            }
            _ => return node,
        }
    }
}
