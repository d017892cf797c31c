//! The resolver capability surface the emitter consumes.
//!
//! Everything the declaration emitter needs from the type checker is
//! behind `EmitResolver`: pure queries against the already-checked
//! program. The emitter never reaches around this trait, so a full
//! checker, a binder-only approximation, or a test fake can all drive it.

use tsd_ast::{NodeArena, NodeId};

/// Outcome tag of a symbol accessibility query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolAccessibility {
    /// The symbol can be named from the enclosing scope.
    Accessible,
    /// The symbol resolves but cannot be named without exporting
    /// something unreachable.
    NotAccessible,
    /// The symbol cannot be named at all (anonymous, `unique symbol`,
    /// synthesized).
    CannotBeNamed,
}

/// Full result of an accessibility query: the tag plus enough context to
/// format a container-specific diagnostic, and the alias declarations
/// that must be made visible for the reference to work.
#[derive(Clone, Debug)]
pub struct SymbolAccessibilityResult {
    pub accessibility: SymbolAccessibility,
    /// Name of the blocking symbol, for diagnostics.
    pub error_symbol_name: Option<String>,
    /// Module the blocking symbol lives in, when it is module-scoped.
    pub error_module_name: Option<String>,
    /// The blocking declaration itself, when known.
    pub error_node: NodeId,
    /// Import-like declarations that must be painted visible (and
    /// declarations that must be collected) to support this reference.
    pub aliases_to_make_visible: Vec<NodeId>,
}

impl SymbolAccessibilityResult {
    #[must_use]
    pub fn accessible() -> Self {
        SymbolAccessibilityResult {
            accessibility: SymbolAccessibility::Accessible,
            error_symbol_name: None,
            error_module_name: None,
            error_node: NodeId::NONE,
            aliases_to_make_visible: Vec::new(),
        }
    }

    #[must_use]
    pub fn accessible_via(aliases: Vec<NodeId>) -> Self {
        SymbolAccessibilityResult {
            aliases_to_make_visible: aliases,
            ..Self::accessible()
        }
    }

    #[must_use]
    pub fn not_accessible(symbol_name: impl Into<String>, error_node: NodeId) -> Self {
        SymbolAccessibilityResult {
            accessibility: SymbolAccessibility::NotAccessible,
            error_symbol_name: Some(symbol_name.into()),
            error_module_name: None,
            error_node,
            aliases_to_make_visible: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.accessibility == SymbolAccessibility::Accessible
    }
}

/// Resolved constant value of an enum member.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstantValue {
    Number(f64),
    String(String),
}

/// Both accessors of a get/set pair. Either side may be `NodeId::NONE`.
#[derive(Clone, Copy, Debug)]
pub struct AccessorPair {
    pub getter: NodeId,
    pub setter: NodeId,
    /// The one that appears first in source order.
    pub first: NodeId,
}

/// Symbol-tracking sink filled by the resolver while it synthesizes a
/// type expression. The emitter turns recorded events into diagnostics
/// at the node it is currently rewriting.
#[derive(Debug, Default)]
pub struct TrackedSymbols {
    /// Accessibility results for every symbol the synthesized type named.
    pub results: Vec<SymbolAccessibilityResult>,
    /// The type mentions a `this`-type not nameable in the output.
    pub inaccessible_this: bool,
    /// The type mentions an inaccessible `unique symbol`.
    pub inaccessible_unique_symbol: bool,
    /// The structure is cyclic and cannot be serialized.
    pub cyclic_structure: bool,
    /// Naming the type would force an import the emitter considers
    /// unsafe; carries the module specifier.
    pub unsafe_import: Option<String>,
}

impl TrackedSymbols {
    pub fn track(&mut self, result: SymbolAccessibilityResult) {
        self.results.push(result);
    }

    /// Aliases marked visible by every accessible result so far.
    #[must_use]
    pub fn visible_aliases(&self) -> Vec<NodeId> {
        self.results
            .iter()
            .filter(|r| r.is_accessible())
            .flat_map(|r| r.aliases_to_make_visible.iter().copied())
            .collect()
    }

    /// First inaccessible result, if the synthesized type named one.
    #[must_use]
    pub fn first_failure(&self) -> Option<&SymbolAccessibilityResult> {
        self.results.iter().find(|r| !r.is_accessible())
    }
}

/// The narrow checker capability surface (the "visibility oracle").
///
/// All methods are queries; none may mutate the checked program or
/// re-enter the emitter. Type-synthesizing methods allocate fresh output
/// nodes in the arena and report what they touched through the tracker.
pub trait EmitResolver {
    /// Would this declaration be emitted by the declaration emitter?
    fn is_declaration_visible(&self, arena: &NodeArena, node: NodeId) -> bool;

    /// Can the symbol behind `entity_name` be named from `enclosing`?
    fn is_entity_name_visible(
        &self,
        arena: &NodeArena,
        entity_name: NodeId,
        enclosing: NodeId,
    ) -> SymbolAccessibilityResult;

    /// Accessibility of an arbitrary symbol reference (heritage clause
    /// expressions, default-export expressions).
    fn is_symbol_accessible(
        &self,
        arena: &NodeArena,
        reference: NodeId,
        enclosing: NodeId,
    ) -> SymbolAccessibilityResult {
        self.is_entity_name_visible(arena, reference, enclosing)
    }

    /// Type-reference directives (`/// <reference types="..." />`)
    /// required to name the symbol behind `entity_name`.
    fn type_reference_directives(&self, _arena: &NodeArena, _entity_name: NodeId) -> Vec<String> {
        Vec::new()
    }

    /// Synthesize a type node for a declaration with no annotation.
    /// Returns `None` when the checker cannot produce a nameable type.
    fn create_type_of_declaration(
        &self,
        arena: &mut NodeArena,
        decl: NodeId,
        enclosing: NodeId,
        tracker: &mut TrackedSymbols,
    ) -> Option<NodeId>;

    /// Synthesize the return type of a signature with no annotation.
    fn create_return_type_of_signature(
        &self,
        arena: &mut NodeArena,
        signature: NodeId,
        enclosing: NodeId,
        tracker: &mut TrackedSymbols,
    ) -> Option<NodeId>;

    /// Track the symbols the type of `decl` would touch, without
    /// materializing the type. The legacy collector uses this to chase
    /// references of unannotated declarations.
    fn track_type_of_declaration(
        &self,
        _arena: &NodeArena,
        _decl: NodeId,
        _enclosing: NodeId,
        _tracker: &mut TrackedSymbols,
    ) {
    }

    /// Folded constant value of an enum member, when the checker could
    /// evaluate it.
    fn constant_value(&self, _arena: &NodeArena, _member: NodeId) -> Option<ConstantValue> {
        None
    }

    /// Is this function body the implementation signature of an overload
    /// set (and therefore elided from declarations)?
    fn is_implementation_of_overload(&self, _arena: &NodeArena, _function: NodeId) -> bool {
        false
    }

    /// Is this parameter optional (considering initializers)?
    fn is_optional_parameter(&self, arena: &NodeArena, param: NodeId) -> bool {
        match arena.get(param).map(|n| &n.kind) {
            Some(tsd_ast::NodeKind::Parameter {
                question,
                initializer,
                ..
            }) => *question || initializer.is_some(),
            _ => false,
        }
    }

    /// Both accessors of the get/set pair `accessor` belongs to.
    fn all_accessor_declarations(&self, arena: &NodeArena, accessor: NodeId) -> AccessorPair;

    /// Is this member's computed name late-bound (resolvable to a known
    /// symbol at check time)?
    fn is_late_bound(&self, _arena: &NodeArena, _member: NodeId) -> bool {
        false
    }

    /// Does anything in the program reference this import-like
    /// declaration in a way that declaration emit must preserve?
    fn is_referenced_alias_declaration(&self, _arena: &NodeArena, _node: NodeId) -> bool {
        false
    }
}
