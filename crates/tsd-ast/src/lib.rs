//! Declaration AST for the tsd declaration emitter.
//!
//! The AST is a closed tagged union (`NodeKind`) over every declaration,
//! type-node, name, and expression kind the emitter understands, stored in
//! a flat arena (`NodeArena`) and addressed by stable `NodeId` indices.
//! Output trees produced by the emitter live in the same arena and link
//! back to their checked originals through `Node::original`.

pub mod arena;
pub use arena::{Node, NodeArena, NodeId};

pub mod node;
pub use node::*;

pub mod modifiers;
pub use modifiers::ModifierFlags;

// Node creation methods (add_* constructors) on NodeArena
pub mod builder;
pub use builder::{
    containing_source_file, entity_name_text, ident_text, is_external_module, leftmost_ident,
    member_name_text, source_file_name, statements_of,
};

// Deep copying of subtrees into fresh output nodes
pub mod copy;

// Generic child traversal
pub mod visit;
pub use visit::{children_of, for_each_child, set_parents};
