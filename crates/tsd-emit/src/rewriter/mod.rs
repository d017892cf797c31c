//! Statement-level declaration transform (modern path).
//!
//! Consumes one checked source file and produces an output tree with
//! bodies elided, invisible declarations dropped, and absent types made
//! explicit. Import-like statements are deferred as placeholders and
//! resolved by a fixed-point pass once the rest of the file has revealed
//! which aliases are actually needed (see `imports`).

mod classes;
mod enums;
mod functions;
mod imports;
mod modules;
mod types;
mod variables;

pub use imports::LateStatements;

use smallvec::SmallVec;
use tracing::debug;
use tsd_ast::{ModifierFlags, NodeArena, NodeId, NodeKind, builder};

use crate::context::{EmitContext, NodeLinks};
use crate::resolver::EmitResolver;

/// Zero, one, or many output statements for one input statement.
pub type Rewritten = SmallVec<[NodeId; 1]>;

/// One file's rewrite pass. Fresh per output file; the arena is shared
/// with the checked tree but output nodes only link to it through
/// `original`.
pub struct Rewriter<'a, R: ?Sized> {
    arena: &'a mut NodeArena,
    resolver: &'a R,
    ctx: &'a mut EmitContext,
    links: NodeLinks,
    late: LateStatements,
    /// Inside a `declare` context (ambient module or declaration file
    /// top level); nested members must not restate `declare`.
    ambient_depth: u32,
}

impl<'a, R: EmitResolver + ?Sized> Rewriter<'a, R> {
    pub fn new(arena: &'a mut NodeArena, resolver: &'a R, ctx: &'a mut EmitContext) -> Self {
        Rewriter {
            arena,
            resolver,
            ctx,
            links: NodeLinks::new(),
            late: LateStatements::new(),
            ambient_depth: 0,
        }
    }

    /// Transform a checked source file into its declaration output tree.
    pub fn transform_source_file(&mut self, file: NodeId) -> NodeId {
        let file_name = builder::source_file_name(self.arena, file).to_string();
        self.ctx.begin_file(file, &file_name);
        debug!(file = %file_name, "transform source file");

        let statements: Vec<NodeId> = builder::statements_of(self.arena, file).to_vec();
        let mut output: Vec<NodeId> = Vec::with_capacity(statements.len());
        for stmt in statements {
            output.extend(self.rewrite_statement(stmt));
        }

        self.late.resolve_fixed_point(
            self.arena,
            self.resolver,
            self.ctx,
            &mut self.links,
        );
        let output = self
            .late
            .substitute_placeholders(self.arena, self.resolver, output);

        let out_file = self.arena.add_source_file(file_name, output);
        self.arena.set_original(out_file, file);
        out_file
    }

    /// Type-reference directives required by references resolved during
    /// the transform, in first-seen order.
    #[must_use]
    pub fn type_directives(&self) -> &indexmap::IndexSet<String> {
        self.late.type_directives()
    }

    /// Other source files whose declarations the output depends on, in
    /// first-seen order.
    #[must_use]
    pub fn referenced_files(&self) -> &indexmap::IndexSet<NodeId> {
        self.late.referenced_files()
    }

    /// Dispatch one statement to its kind-specific rule. Recognized
    /// declaration kinds always have an explicit rule; expression and
    /// control-flow statements never appear in declaration output.
    fn rewrite_statement(&mut self, stmt: NodeId) -> Rewritten {
        let Some(node) = self.arena.get(stmt) else {
            return Rewritten::new();
        };
        match &node.kind {
            NodeKind::Function(_) => self.rewrite_function_statement(stmt),
            NodeKind::Class(_) => self.rewrite_class_statement(stmt),
            NodeKind::Interface(_) => self.rewrite_interface(stmt),
            NodeKind::TypeAlias(_) => self.rewrite_type_alias(stmt),
            NodeKind::Enum(_) => self.rewrite_enum(stmt),
            NodeKind::Module(_) => self.rewrite_module(stmt),
            NodeKind::VariableStatement(_) => self.rewrite_variable_statement(stmt),
            NodeKind::ImportDecl { .. } | NodeKind::ImportEquals { .. } => {
                self.defer_import(stmt)
            }
            NodeKind::ExportDecl { .. } | NodeKind::ExportAssignment { .. } => {
                self.rewrite_export(stmt)
            }
            // Executable statements carry no declarations.
            _ => Rewritten::new(),
        }
    }

    /// Should this declaration statement survive into the output?
    fn is_statement_visible(&mut self, stmt: NodeId) -> bool {
        if self.strip_as_internal(stmt) {
            return false;
        }
        self.resolver.is_declaration_visible(self.arena, stmt)
    }

    /// `--stripInternal`: drop declarations the front end marked
    /// `@internal`.
    fn strip_as_internal(&self, node: NodeId) -> bool {
        self.ctx.options.strip_internal && self.arena.is_internal(node)
    }

    /// Modifiers as they appear in declaration output: `public`, `async`
    /// and `override` carry no information there.
    fn output_modifiers(&self, node: NodeId) -> ModifierFlags {
        let mut modifiers = self.arena.kind(node).modifiers();
        modifiers.remove(ModifierFlags::ELIDED_IN_DECLARATIONS);
        if self.ambient_depth > 0 {
            // Nested ambient members must not restate `declare`.
            modifiers.remove(ModifierFlags::AMBIENT);
        }
        modifiers
    }

    /// Report a templated error at `span` in the current file.
    fn report_at(&mut self, span: tsd_common::span::Span, code: u32, args: &[&str]) {
        self.ctx.report(
            tsd_common::Diagnostic::error_with_template(
                self.ctx.file_name(),
                span.start,
                span.len(),
                code,
                args,
            ),
        );
    }

    fn enter_ambient(&mut self) {
        self.ambient_depth += 1;
    }

    fn leave_ambient(&mut self) {
        debug_assert!(self.ambient_depth > 0);
        self.ambient_depth = self.ambient_depth.saturating_sub(1);
    }
}
