//! Triple-slash reference directives for an output file.
//!
//! Collects the files, type packages, and libs an output file depends on
//! while its declarations are rewritten, then renders the directive
//! header prepended to the declaration text. Path references are keyed
//! by source-file node identity so a file referenced through several
//! declarations produces one directive.

use indexmap::{IndexMap, IndexSet};
use tsd_ast::{NodeArena, NodeId, NodeKind};

use crate::host::EmitHost;

/// Per-output-file reference sets, finalized once into a directive header.
#[derive(Debug, Default)]
pub struct ReferenceCollector {
    /// Referenced source file -> relative path from the output file.
    paths: IndexMap<NodeId, String>,
    /// `/// <reference types="..." />` package names.
    types: IndexSet<String>,
    /// `/// <reference lib="..." />` identifiers.
    libs: IndexSet<String>,
}

impl ReferenceCollector {
    #[must_use]
    pub fn new() -> ReferenceCollector {
        ReferenceCollector::default()
    }

    /// Record that `output_file` depends on the declarations of `file`.
    /// The host decides how the path is spelled from the output location.
    pub fn add_path_reference<H: EmitHost + ?Sized>(
        &mut self,
        host: &H,
        output_file: &str,
        arena: &NodeArena,
        file: NodeId,
    ) {
        if self.paths.contains_key(&file) {
            return;
        }
        let Some(NodeKind::SourceFile { file_name, .. }) = arena.get(file).map(|n| &n.kind) else {
            return;
        };
        let path = host.reference_path(output_file, file_name);
        self.paths.insert(file, path);
    }

    pub fn add_type_directive(&mut self, directive: impl Into<String>) {
        self.types.insert(directive.into());
    }

    pub fn add_type_directives<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, iter: I) {
        for directive in iter {
            self.types.insert(directive.into());
        }
    }

    pub fn add_lib(&mut self, lib: impl Into<String>) {
        self.libs.insert(lib.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.types.is_empty() && self.libs.is_empty()
    }

    /// Render the directive header and prepend it to `text`.
    /// Directive order is path, types, lib, each in first-seen order.
    #[must_use]
    pub fn prepend_to(&self, text: &str) -> String {
        if self.is_empty() {
            return text.to_string();
        }
        let mut out = String::new();
        for path in self.paths.values() {
            out.push_str("/// <reference path=\"");
            out.push_str(path);
            out.push_str("\" />\n");
        }
        for types in &self.types {
            out.push_str("/// <reference types=\"");
            out.push_str(types);
            out.push_str("\" />\n");
        }
        for lib in &self.libs {
            out.push_str("/// <reference lib=\"");
            out.push_str(lib);
            out.push_str("\" />\n");
        }
        out.push_str(text);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PathHost;

    impl EmitHost for PathHost {
        fn source_files(&self) -> Vec<NodeId> {
            Vec::new()
        }

        fn reference_path(&self, _from_output: &str, to_file: &str) -> String {
            format!("./{}", self.output_file_name(to_file))
        }
    }

    #[test]
    fn deduplicates_path_references_by_file_identity() {
        let mut arena = NodeArena::new();
        let file = arena.add_source_file("dep.ts", Vec::new());
        let mut refs = ReferenceCollector::new();
        refs.add_path_reference(&PathHost, "a.d.ts", &arena, file);
        refs.add_path_reference(&PathHost, "a.d.ts", &arena, file);
        refs.add_type_directive("node");
        refs.add_type_directive("node");
        refs.add_lib("es2015");

        let text = refs.prepend_to("declare const x: number;\n");
        assert_eq!(
            text,
            "/// <reference path=\"./dep.d.ts\" />\n\
             /// <reference types=\"node\" />\n\
             /// <reference lib=\"es2015\" />\n\
             declare const x: number;\n"
        );
    }

    #[test]
    fn empty_collector_leaves_text_untouched() {
        let refs = ReferenceCollector::new();
        assert_eq!(refs.prepend_to("export {};\n"), "export {};\n");
        assert!(refs.is_empty());
    }

    #[test]
    fn type_directives_keep_first_seen_order() {
        let mut refs = ReferenceCollector::new();
        refs.add_type_directives(["react", "node", "react"]);
        let text = refs.prepend_to("");
        assert_eq!(
            text,
            "/// <reference types=\"react\" />\n/// <reference types=\"node\" />\n"
        );
    }
}
