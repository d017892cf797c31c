//! Common types and utilities for the tsd declaration emitter.
//!
//! This crate provides foundational types used across all tsd crates:
//! - Source spans (`Span`, `Spanned`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Emitter options (`DeclarationOptions`)

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{Span, Spanned};

// Diagnostics - categories, codes, message templates
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage};

// Emitter options, deserializable from tsconfig-style JSON
pub mod options;
pub use options::DeclarationOptions;
