//! Declaration (.d.ts) emission pipeline for the tsd compiler.
//!
//! Given a checked program behind the `EmitResolver` capability trait,
//! this crate produces declaration-file text: the statement transform
//! (`rewriter`), local type inference for the isolated-declarations path
//! (`infer`), the legacy reachability collector (`collector`), and the
//! printer and triple-slash reference emitter that serialize the result.
//! `driver::emit_declarations` is the top-level entry point.

// Checker capability surface: accessibility queries, type synthesis
pub mod resolver;
pub use resolver::{
    AccessorPair, ConstantValue, EmitResolver, SymbolAccessibility, SymbolAccessibilityResult,
    TrackedSymbols,
};

// Host capability surface: file sets and reference paths
pub mod host;
pub use host::EmitHost;

// Per-run state: node-links tables and the rewrite context
pub mod context;
pub use context::{EmitContext, NodeLinks};

// Accessibility diagnostic contexts (container-specific messages)
pub mod diagnostics;
pub use diagnostics::{DiagnosticContext, context_for_error_node, outermost_reference};

// Local type inference for the isolated-declarations path
pub mod infer;
pub use infer::{LocalTypeFlags, LocalTypeInfo};

// Union normalization for synthesized types
pub mod normalize;
pub use normalize::normalize_union;

// Legacy work-queue reachability collector
pub mod collector;
pub use collector::{CollectorOutput, collect_visible_declarations};

// Statement-level declaration transform (modern path)
pub mod rewriter;
pub use rewriter::{LateStatements, Rewriter};

// Declaration text rendering
pub mod printer;
pub use printer::print_source_file;

// Triple-slash reference directives
pub mod references;
pub use references::ReferenceCollector;

// Output-unit driver
pub mod driver;
pub use driver::{DeclarationEmitResult, EmittedFile, emit_declarations};
