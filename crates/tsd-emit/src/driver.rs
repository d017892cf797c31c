//! Per-output-file emission driver.
//!
//! Groups source files into output units (one per file, or one combined
//! unit in bundle mode), runs the legacy collector or the statement
//! transform per file, and finishes each unit with the printer and the
//! reference emitter. Units are processed strictly one at a time; all
//! per-run state is fresh per unit.

use tracing::{debug, info};
use tsd_ast::{ImportEqualsTarget, NodeArena, NodeId, NodeKind, builder};
use tsd_common::{DeclarationOptions, Diagnostic};

use crate::collector;
use crate::context::{EmitContext, NodeLinks};
use crate::host::EmitHost;
use crate::printer;
use crate::references::ReferenceCollector;
use crate::resolver::{
    AccessorPair, ConstantValue, EmitResolver, SymbolAccessibilityResult, TrackedSymbols,
};
use crate::rewriter::Rewriter;

/// One emitted declaration file.
#[derive(Clone, Debug)]
pub struct EmittedFile {
    pub name: String,
    pub text: String,
    /// The unit produced an error diagnostic; the text exists but the
    /// caller must not write it out.
    pub suppressed: bool,
}

/// All output units plus the combined diagnostics list.
#[derive(Debug, Default)]
pub struct DeclarationEmitResult {
    pub files: Vec<EmittedFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DeclarationEmitResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Emit declaration output for every source file of the host's program.
pub fn emit_declarations<R: EmitResolver + ?Sized, H: EmitHost + ?Sized>(
    arena: &mut NodeArena,
    resolver: &R,
    host: &H,
    options: &DeclarationOptions,
) -> DeclarationEmitResult {
    let files = host.source_files();
    let mut result = DeclarationEmitResult::default();

    if let Some(bundle_name) = options.bundle_file.clone() {
        info!(output = %bundle_name, files = files.len(), "emit combined declaration file");
        emit_unit(arena, resolver, host, options, &files, bundle_name, &mut result);
        return result;
    }

    for &file in &files {
        let output_name = host.output_file_name(builder::source_file_name(arena, file));
        emit_unit(
            arena,
            resolver,
            host,
            options,
            &[file],
            output_name,
            &mut result,
        );
    }
    result
}

fn emit_unit<R: EmitResolver + ?Sized, H: EmitHost + ?Sized>(
    arena: &mut NodeArena,
    resolver: &R,
    host: &H,
    options: &DeclarationOptions,
    files: &[NodeId],
    output_name: String,
    result: &mut DeclarationEmitResult,
) {
    let mut refs = ReferenceCollector::new();
    for lib in host.default_libs() {
        refs.add_lib(lib);
    }

    let mut text = String::new();
    let mut diagnostics = Vec::new();
    for &file in files {
        let (file_text, file_diagnostics) = if options.use_legacy_collector() {
            let collected = collector::collect_visible_declarations(arena, resolver, &[file]);
            diagnostics.extend(collected.diagnostics);
            let gated = CollectedResolver {
                inner: resolver,
                links: &collected.links,
            };
            emit_file(arena, &gated, host, options, &mut refs, &output_name, files, file)
        } else {
            emit_file(arena, resolver, host, options, &mut refs, &output_name, files, file)
        };
        text.push_str(&file_text);
        diagnostics.extend(file_diagnostics);
    }

    let suppressed = diagnostics.iter().any(Diagnostic::is_error);
    if suppressed {
        debug!(output = %output_name, "declaration output suppressed by errors");
    }
    result.diagnostics.append(&mut diagnostics);
    result.files.push(EmittedFile {
        name: output_name,
        text: refs.prepend_to(&text),
        suppressed,
    });
}

/// Transform and print one source file, recording the type directives
/// and cross-file path references its resolved references require.
fn emit_file<R: EmitResolver + ?Sized, H: EmitHost + ?Sized>(
    arena: &mut NodeArena,
    resolver: &R,
    host: &H,
    options: &DeclarationOptions,
    refs: &mut ReferenceCollector,
    output_name: &str,
    unit_files: &[NodeId],
    file: NodeId,
) -> (String, Vec<Diagnostic>) {
    let file_name = builder::source_file_name(arena, file).to_string();
    let mut ctx = EmitContext::new(options.clone());
    let mut rewriter = Rewriter::new(arena, resolver, &mut ctx);
    let out_file = rewriter.transform_source_file(file);
    refs.add_type_directives(rewriter.type_directives().iter().cloned());
    let referenced: Vec<NodeId> = rewriter.referenced_files().iter().copied().collect();
    drop(rewriter);
    for referenced_file in referenced {
        // Files merged into this unit need no directive pointing at it.
        if !unit_files.contains(&referenced_file) {
            refs.add_path_reference(host, output_name, arena, referenced_file);
        }
    }
    rewrite_specifiers(arena, host, &file_name, out_file);
    let text = printer::print_source_file(arena, out_file);
    (text, ctx.take_diagnostics())
}

/// Ask the host to respell module specifiers so they stay resolvable
/// from the output location. Recurses into namespace bodies.
fn rewrite_specifiers<H: EmitHost + ?Sized>(
    arena: &mut NodeArena,
    host: &H,
    containing_file: &str,
    container: NodeId,
) {
    let statements = builder::statements_of(arena, container).to_vec();
    for stmt in statements {
        enum Action {
            Respell(String),
            Recurse(NodeId),
            Skip,
        }
        let action = match arena.get(stmt).map(|n| &n.kind) {
            Some(
                NodeKind::ImportDecl { specifier, .. }
                | NodeKind::ExportDecl {
                    specifier: Some(specifier),
                    ..
                }
                | NodeKind::ImportEquals {
                    target: ImportEqualsTarget::ExternalModule(specifier),
                    ..
                },
            ) => Action::Respell(host.rewrite_module_specifier(containing_file, specifier)),
            Some(NodeKind::Module(m)) if m.body.is_some() => Action::Recurse(m.body),
            _ => Action::Skip,
        };
        match action {
            Action::Respell(rewritten) => set_specifier(arena, stmt, rewritten),
            Action::Recurse(body) => rewrite_specifiers(arena, host, containing_file, body),
            Action::Skip => {}
        }
    }
}

fn set_specifier(arena: &mut NodeArena, stmt: NodeId, rewritten: String) {
    if let Some(node) = arena.get_mut(stmt) {
        match &mut node.kind {
            NodeKind::ImportDecl { specifier, .. } => *specifier = rewritten,
            NodeKind::ExportDecl {
                specifier: Some(specifier),
                ..
            } => *specifier = rewritten,
            NodeKind::ImportEquals {
                target: ImportEqualsTarget::ExternalModule(specifier),
                ..
            } => *specifier = rewritten,
            _ => {}
        }
    }
}

/// Resolver adapter for the legacy path: visibility answers come from
/// the collector's painted set first, the checker second, so transitively
/// reachable declarations survive the transform even when not exported.
struct CollectedResolver<'a, R: ?Sized> {
    inner: &'a R,
    links: &'a NodeLinks,
}

impl<R: EmitResolver + ?Sized> EmitResolver for CollectedResolver<'_, R> {
    fn is_declaration_visible(&self, arena: &NodeArena, node: NodeId) -> bool {
        self.links.is_collected(node) || self.inner.is_declaration_visible(arena, node)
    }

    fn is_entity_name_visible(
        &self,
        arena: &NodeArena,
        entity_name: NodeId,
        enclosing: NodeId,
    ) -> SymbolAccessibilityResult {
        self.inner.is_entity_name_visible(arena, entity_name, enclosing)
    }

    fn is_symbol_accessible(
        &self,
        arena: &NodeArena,
        reference: NodeId,
        enclosing: NodeId,
    ) -> SymbolAccessibilityResult {
        self.inner.is_symbol_accessible(arena, reference, enclosing)
    }

    fn type_reference_directives(&self, arena: &NodeArena, entity_name: NodeId) -> Vec<String> {
        self.inner.type_reference_directives(arena, entity_name)
    }

    fn create_type_of_declaration(
        &self,
        arena: &mut NodeArena,
        decl: NodeId,
        enclosing: NodeId,
        tracker: &mut TrackedSymbols,
    ) -> Option<NodeId> {
        self.inner
            .create_type_of_declaration(arena, decl, enclosing, tracker)
    }

    fn create_return_type_of_signature(
        &self,
        arena: &mut NodeArena,
        signature: NodeId,
        enclosing: NodeId,
        tracker: &mut TrackedSymbols,
    ) -> Option<NodeId> {
        self.inner
            .create_return_type_of_signature(arena, signature, enclosing, tracker)
    }

    fn track_type_of_declaration(
        &self,
        arena: &NodeArena,
        decl: NodeId,
        enclosing: NodeId,
        tracker: &mut TrackedSymbols,
    ) {
        self.inner
            .track_type_of_declaration(arena, decl, enclosing, tracker);
    }

    fn constant_value(&self, arena: &NodeArena, member: NodeId) -> Option<ConstantValue> {
        self.inner.constant_value(arena, member)
    }

    fn is_implementation_of_overload(&self, arena: &NodeArena, function: NodeId) -> bool {
        self.inner.is_implementation_of_overload(arena, function)
    }

    fn is_optional_parameter(&self, arena: &NodeArena, param: NodeId) -> bool {
        self.inner.is_optional_parameter(arena, param)
    }

    fn all_accessor_declarations(&self, arena: &NodeArena, accessor: NodeId) -> AccessorPair {
        self.inner.all_accessor_declarations(arena, accessor)
    }

    fn is_late_bound(&self, arena: &NodeArena, member: NodeId) -> bool {
        self.inner.is_late_bound(arena, member)
    }

    fn is_referenced_alias_declaration(&self, arena: &NodeArena, node: NodeId) -> bool {
        self.inner.is_referenced_alias_declaration(arena, node)
    }
}
