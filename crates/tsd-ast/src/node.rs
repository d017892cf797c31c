//! The closed node-kind union and its payload types.
//!
//! Every kind the declaration emitter understands is a variant here, so
//! the rewriter's dispatch is an exhaustive `match` the compiler checks
//! for completeness. Kinds fall into five families: names, declarations,
//! members/signatures, type nodes, and the expression/statement subset
//! needed for local inference, heritage clauses, and enum initializers.

use crate::arena::NodeId;
use crate::modifiers::ModifierFlags;

/// Keyword type kinds (`string`, `number`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeywordTypeKind {
    Any,
    Unknown,
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Void,
    Undefined,
    Null,
    Never,
}

impl KeywordTypeKind {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            KeywordTypeKind::Any => "any",
            KeywordTypeKind::Unknown => "unknown",
            KeywordTypeKind::String => "string",
            KeywordTypeKind::Number => "number",
            KeywordTypeKind::Boolean => "boolean",
            KeywordTypeKind::BigInt => "bigint",
            KeywordTypeKind::Symbol => "symbol",
            KeywordTypeKind::Object => "object",
            KeywordTypeKind::Void => "void",
            KeywordTypeKind::Undefined => "undefined",
            KeywordTypeKind::Null => "null",
            KeywordTypeKind::Never => "never",
        }
    }
}

/// Literal-type payloads. Numeric and bigint literals keep their source
/// text plus a prefix-minus flag so `-1` and `- 1` compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(String),
    Number { text: String, negative: bool },
    BigInt { text: String, negative: bool },
    True,
    False,
}

/// `extends` vs `implements` in a heritage clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeritageKind {
    Extends,
    Implements,
}

/// `var` / `let` / `const`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

/// `keyof` / `unique` / `readonly` type operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeOperatorKind {
    KeyOf,
    Unique,
    Readonly,
}

/// Prefix unary operators the inferrer understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefixOp {
    Minus,
    Plus,
}

/// Named-import bindings of an import declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamedBindings {
    None,
    /// `import * as ns from "m"`
    Namespace(String),
    /// `import { a, b as c } from "m"`
    Named(Vec<ImportSpecifier>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub name: String,
    /// `b` in `import { b as c }`.
    pub property_name: Option<String>,
    pub type_only: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSpecifier {
    pub name: String,
    pub property_name: Option<String>,
    pub type_only: bool,
}

/// Target of an `import x = ...` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportEqualsTarget {
    /// `import x = A.B.C` — an entity name node.
    EntityName(NodeId),
    /// `import x = require("m")`
    ExternalModule(String),
}

/// Module declaration name: `namespace N` vs `declare module "m"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleName {
    Ident(String),
    StringLiteral(String),
}

impl ModuleName {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            ModuleName::Ident(s) | ModuleName::StringLiteral(s) => s,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FunctionData {
    pub name: Option<String>,
    pub type_params: Vec<NodeId>,
    pub params: Vec<NodeId>,
    /// `NodeId::NONE` when no explicit return type was written.
    pub return_type: NodeId,
    /// Block body, or `NodeId::NONE` for overload signatures / ambient.
    pub body: NodeId,
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug)]
pub struct ClassData {
    pub name: Option<String>,
    pub type_params: Vec<NodeId>,
    pub heritage: Vec<NodeId>,
    pub members: Vec<NodeId>,
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug)]
pub struct InterfaceData {
    pub name: String,
    pub type_params: Vec<NodeId>,
    pub heritage: Vec<NodeId>,
    pub members: Vec<NodeId>,
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug)]
pub struct TypeAliasData {
    pub name: String,
    pub type_params: Vec<NodeId>,
    pub ty: NodeId,
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug)]
pub struct EnumData {
    pub name: String,
    pub members: Vec<NodeId>,
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug)]
pub struct ModuleData {
    pub name: ModuleName,
    /// `ModuleBlock`, or `NodeId::NONE` for a bodyless ambient shorthand.
    pub body: NodeId,
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug)]
pub struct VariableStatementData {
    pub kind: VarKind,
    pub declarations: Vec<NodeId>,
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug)]
pub struct SignatureData {
    pub type_params: Vec<NodeId>,
    pub params: Vec<NodeId>,
    pub return_type: NodeId,
}

/// The closed union of node kinds.
#[derive(Clone, Debug)]
pub enum NodeKind {
    // ----- Source file -----
    SourceFile {
        file_name: String,
        statements: Vec<NodeId>,
    },

    // ----- Names -----
    Ident(String),
    /// `#name`
    PrivateName(String),
    /// `left.right` in type space.
    QualifiedName { left: NodeId, right: String },
    ComputedName { expr: NodeId },

    // ----- Declarations -----
    Function(FunctionData),
    Class(ClassData),
    ClassExpr(ClassData),
    Interface(InterfaceData),
    TypeAlias(TypeAliasData),
    Enum(EnumData),
    EnumMember {
        name: NodeId,
        initializer: NodeId,
    },
    Module(ModuleData),
    ModuleBlock { statements: Vec<NodeId> },
    VariableStatement(VariableStatementData),
    VariableDeclaration {
        name: NodeId,
        ty: NodeId,
        initializer: NodeId,
    },
    ObjectBindingPattern { elements: Vec<NodeId> },
    /// Elements may be `NodeId::NONE` for elided slots (`[, x]`).
    ArrayBindingPattern { elements: Vec<NodeId> },
    BindingElement {
        name: NodeId,
        property_name: NodeId,
        dotdotdot: bool,
        initializer: NodeId,
    },

    // ----- Imports / exports -----
    ImportDecl {
        /// Default-import name, if any.
        default_name: Option<String>,
        named: NamedBindings,
        specifier: String,
        type_only: bool,
    },
    ImportEquals {
        name: String,
        target: ImportEqualsTarget,
        modifiers: ModifierFlags,
        type_only: bool,
    },
    ExportDecl {
        /// `None` means `export * from ...`.
        named: Option<Vec<ExportSpecifier>>,
        specifier: Option<String>,
        type_only: bool,
    },
    ExportAssignment {
        expr: NodeId,
        is_export_equals: bool,
    },

    // ----- Members / signatures -----
    PropertyDecl {
        name: NodeId,
        ty: NodeId,
        initializer: NodeId,
        optional: bool,
        modifiers: ModifierFlags,
    },
    MethodDecl {
        name: NodeId,
        sig: SignatureData,
        body: NodeId,
        optional: bool,
        modifiers: ModifierFlags,
    },
    Constructor {
        params: Vec<NodeId>,
        body: NodeId,
        modifiers: ModifierFlags,
    },
    Accessor {
        is_getter: bool,
        name: NodeId,
        params: Vec<NodeId>,
        /// Getter return annotation or setter parameter annotation owner;
        /// `NodeId::NONE` when absent.
        return_type: NodeId,
        body: NodeId,
        modifiers: ModifierFlags,
    },
    PropertySignature {
        name: NodeId,
        ty: NodeId,
        optional: bool,
        modifiers: ModifierFlags,
    },
    MethodSignature {
        name: NodeId,
        sig: SignatureData,
        optional: bool,
    },
    CallSignature(SignatureData),
    ConstructSignature(SignatureData),
    IndexSignature {
        param: NodeId,
        ty: NodeId,
        modifiers: ModifierFlags,
    },
    Parameter {
        name: NodeId,
        ty: NodeId,
        initializer: NodeId,
        dotdotdot: bool,
        question: bool,
        modifiers: ModifierFlags,
    },
    TypeParameter {
        name: String,
        constraint: NodeId,
        default: NodeId,
    },
    HeritageClause {
        kind: HeritageKind,
        types: Vec<NodeId>,
    },
    ExpressionWithTypeArgs {
        expr: NodeId,
        type_args: Vec<NodeId>,
    },

    // ----- Type nodes -----
    KeywordType(KeywordTypeKind),
    TypeReference {
        name: NodeId,
        type_args: Vec<NodeId>,
    },
    LiteralType(LiteralValue),
    ArrayType { element: NodeId },
    TupleType { elements: Vec<NodeId> },
    UnionType { members: Vec<NodeId> },
    IntersectionType { members: Vec<NodeId> },
    FunctionType(SignatureData),
    ConstructorType {
        sig: SignatureData,
        is_abstract: bool,
    },
    TypeLiteral { members: Vec<NodeId> },
    /// `typeof name`
    TypeQuery { name: NodeId },
    TypeOperator {
        op: TypeOperatorKind,
        ty: NodeId,
    },
    IndexedAccessType {
        object: NodeId,
        index: NodeId,
    },
    MappedType {
        type_param: NodeId,
        ty: NodeId,
        readonly_mod: bool,
        optional_mod: bool,
    },
    ImportTypeNode {
        specifier: String,
        qualifier: NodeId,
        type_args: Vec<NodeId>,
        is_typeof: bool,
        /// `assert { "resolution-mode": ... }` value, when present.
        resolution_mode: Option<String>,
    },
    ThisType,
    ParenthesizedType { ty: NodeId },
    /// Placeholder substituted for types that could not be inferred or
    /// named; keeps the output parseable.
    InvalidType,

    // ----- Expressions (inference subset) -----
    StringLit(String),
    NumberLit { text: String },
    BigIntLit { text: String },
    BoolLit(bool),
    NullLit,
    RegExpLit(String),
    /// Template literal without substitutions.
    NoSubTemplate(String),
    TemplateExpr {
        head: String,
        /// `(expression, literal-text-after)` pairs.
        spans: Vec<(NodeId, String)>,
    },
    PrefixUnary {
        op: PrefixOp,
        operand: NodeId,
    },
    ObjectLiteral { members: Vec<NodeId> },
    ArrayLiteral { elements: Vec<NodeId> },
    PropertyAssignment {
        name: NodeId,
        initializer: NodeId,
    },
    ShorthandProperty { name: String },
    SpreadAssignment { expr: NodeId },
    SpreadElement { expr: NodeId },
    NewExpr {
        callee: NodeId,
        type_args: Vec<NodeId>,
        args: Vec<NodeId>,
    },
    CallExpr {
        callee: NodeId,
        type_args: Vec<NodeId>,
        args: Vec<NodeId>,
    },
    PropertyAccess {
        expr: NodeId,
        name: String,
    },
    AsExpr {
        expr: NodeId,
        ty: NodeId,
        /// `expr as const`
        is_const: bool,
    },
    TypeAssertion {
        ty: NodeId,
        expr: NodeId,
    },
    ArrowFunction(FunctionData),
    FunctionExpr(FunctionData),
    ParenExpr { expr: NodeId },

    // ----- Statements (body subset) -----
    Block { statements: Vec<NodeId> },
    ReturnStatement { expr: NodeId },
    ExpressionStatement { expr: NodeId },
    IfStatement {
        cond: NodeId,
        then_branch: NodeId,
        else_branch: NodeId,
    },
}

impl NodeKind {
    /// Modifier set of a declaration-like kind, empty otherwise.
    #[must_use]
    pub fn modifiers(&self) -> ModifierFlags {
        match self {
            NodeKind::Function(f) | NodeKind::ArrowFunction(f) | NodeKind::FunctionExpr(f) => {
                f.modifiers
            }
            NodeKind::Class(c) | NodeKind::ClassExpr(c) => c.modifiers,
            NodeKind::Interface(i) => i.modifiers,
            NodeKind::TypeAlias(t) => t.modifiers,
            NodeKind::Enum(e) => e.modifiers,
            NodeKind::Module(m) => m.modifiers,
            NodeKind::VariableStatement(v) => v.modifiers,
            NodeKind::ImportEquals { modifiers, .. }
            | NodeKind::PropertyDecl { modifiers, .. }
            | NodeKind::MethodDecl { modifiers, .. }
            | NodeKind::Constructor { modifiers, .. }
            | NodeKind::Accessor { modifiers, .. }
            | NodeKind::PropertySignature { modifiers, .. }
            | NodeKind::IndexSignature { modifiers, .. }
            | NodeKind::Parameter { modifiers, .. } => *modifiers,
            _ => ModifierFlags::empty(),
        }
    }

    /// Name text of a declaration, when it has a plain identifier name.
    #[must_use]
    pub fn name_text(&self) -> Option<&str> {
        match self {
            NodeKind::Function(f) | NodeKind::ArrowFunction(f) | NodeKind::FunctionExpr(f) => {
                f.name.as_deref()
            }
            NodeKind::Class(c) | NodeKind::ClassExpr(c) => c.name.as_deref(),
            NodeKind::Interface(i) => Some(&i.name),
            NodeKind::TypeAlias(t) => Some(&t.name),
            NodeKind::Enum(e) => Some(&e.name),
            NodeKind::Module(m) => Some(m.name.text()),
            NodeKind::ImportEquals { name, .. } => Some(name),
            NodeKind::TypeParameter { name, .. } => Some(name),
            NodeKind::Ident(name) | NodeKind::PrivateName(name) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::Function(_)
                | NodeKind::Class(_)
                | NodeKind::Interface(_)
                | NodeKind::TypeAlias(_)
                | NodeKind::Enum(_)
                | NodeKind::EnumMember { .. }
                | NodeKind::Module(_)
                | NodeKind::VariableStatement(_)
                | NodeKind::VariableDeclaration { .. }
                | NodeKind::ImportDecl { .. }
                | NodeKind::ImportEquals { .. }
                | NodeKind::PropertyDecl { .. }
                | NodeKind::MethodDecl { .. }
                | NodeKind::Constructor { .. }
                | NodeKind::Accessor { .. }
                | NodeKind::Parameter { .. }
                | NodeKind::TypeParameter { .. }
        )
    }

    #[must_use]
    pub fn is_type_node(&self) -> bool {
        matches!(
            self,
            NodeKind::KeywordType(_)
                | NodeKind::TypeReference { .. }
                | NodeKind::LiteralType(_)
                | NodeKind::ArrayType { .. }
                | NodeKind::TupleType { .. }
                | NodeKind::UnionType { .. }
                | NodeKind::IntersectionType { .. }
                | NodeKind::FunctionType(_)
                | NodeKind::ConstructorType { .. }
                | NodeKind::TypeLiteral { .. }
                | NodeKind::TypeQuery { .. }
                | NodeKind::TypeOperator { .. }
                | NodeKind::IndexedAccessType { .. }
                | NodeKind::MappedType { .. }
                | NodeKind::ImportTypeNode { .. }
                | NodeKind::ThisType
                | NodeKind::ParenthesizedType { .. }
                | NodeKind::InvalidType
        )
    }

    /// Kinds that open a naming/visibility scope and can anchor an
    /// accessibility query.
    #[must_use]
    pub fn is_enclosing_declaration(&self) -> bool {
        matches!(
            self,
            NodeKind::SourceFile { .. }
                | NodeKind::Module(_)
                | NodeKind::ModuleBlock { .. }
                | NodeKind::Class(_)
                | NodeKind::ClassExpr(_)
                | NodeKind::Interface(_)
                | NodeKind::Function(_)
                | NodeKind::ArrowFunction(_)
                | NodeKind::FunctionExpr(_)
                | NodeKind::MethodDecl { .. }
                | NodeKind::Constructor { .. }
                | NodeKind::Accessor { .. }
                | NodeKind::IndexSignature { .. }
                | NodeKind::MappedType { .. }
                | NodeKind::TypeAlias(_)
        )
    }

    /// An entity name: identifier or dotted qualified name.
    #[must_use]
    pub fn is_entity_name(&self) -> bool {
        matches!(self, NodeKind::Ident(_) | NodeKind::QualifiedName { .. })
    }

    #[must_use]
    pub fn is_import_like(&self) -> bool {
        matches!(
            self,
            NodeKind::ImportDecl { .. } | NodeKind::ImportEquals { .. }
        )
    }

    #[must_use]
    pub fn is_module_marker(&self) -> bool {
        matches!(
            self,
            NodeKind::ImportDecl { .. }
                | NodeKind::ImportEquals {
                    target: ImportEqualsTarget::ExternalModule(_),
                    ..
                }
                | NodeKind::ExportDecl { .. }
                | NodeKind::ExportAssignment { .. }
        )
    }
}
