//! Host capability surface: path and file-set questions.
//!
//! The emitter asks the host which files belong to an output unit and
//! how to spell cross-file references; it never touches the file system
//! itself.

use tsd_ast::NodeId;

/// Host services for declaration emission.
pub trait EmitHost {
    /// Source files of the program, in program order.
    fn source_files(&self) -> Vec<NodeId>;

    /// Output declaration-file name for a source file
    /// (`src/a.ts` -> `src/a.d.ts`).
    fn output_file_name(&self, source_file_name: &str) -> String {
        let stem = source_file_name
            .strip_suffix(".tsx")
            .or_else(|| source_file_name.strip_suffix(".ts"))
            .unwrap_or(source_file_name);
        format!("{stem}.d.ts")
    }

    /// Module specifier to use in emitted import clauses when the
    /// original specifier must be rewritten to stay resolvable from the
    /// output location. Returning the input keeps it unchanged.
    fn rewrite_module_specifier(&self, _containing_file: &str, specifier: &str) -> String {
        specifier.to_string()
    }

    /// Relative path for a triple-slash `<reference path=...>` from the
    /// output file to another file's declaration output.
    fn reference_path(&self, _from_output: &str, to_file: &str) -> String {
        self.output_file_name(to_file)
    }

    /// Default `lib` reference identifiers for the compilation, if the
    /// configuration pins any.
    fn default_libs(&self) -> Vec<String> {
        Vec::new()
    }
}
