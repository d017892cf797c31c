//! Declaration-emission options.
//!
//! A narrow slice of the compiler options surface: only the switches the
//! declaration emitter consults. Deserializable from tsconfig-style JSON
//! (camelCase keys, all optional).

use serde::{Deserialize, Serialize};

/// Options consulted by the declaration emitter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeclarationOptions {
    /// `--strictNullChecks`: gates literal `null`/`undefined` types in
    /// local inference (off means implicit `any`).
    pub strict_null_checks: bool,
    /// `--isolatedDeclarations`: forbid resolver-backed inference; every
    /// exported type must be derivable from local syntax.
    pub isolated_declarations: bool,
    /// `--stripInternal`: drop declarations marked `@internal`.
    pub strip_internal: bool,
    /// `--outFile`-style combined output: merge all contributing files
    /// into one declaration file with this name.
    pub bundle_file: Option<String>,
    /// Run the legacy visibility-collector path instead of the per-statement
    /// transform path.
    pub legacy_collector: bool,
    /// Unstable features enabled (nightly build): permits
    /// `resolution-mode` assertions in import types.
    pub nightly: bool,
}

impl DeclarationOptions {
    /// Parse from tsconfig-style JSON. Unknown keys are ignored.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The transform path is mandatory in isolated mode; the legacy
    /// collector needs a full resolver behind it.
    #[must_use]
    pub fn use_legacy_collector(&self) -> bool {
        self.legacy_collector && !self.isolated_declarations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_json() {
        let options = DeclarationOptions::from_json_str(
            r#"{ "strictNullChecks": true, "isolatedDeclarations": true, "unknownKey": 1 }"#,
        )
        .unwrap();
        assert!(options.strict_null_checks);
        assert!(options.isolated_declarations);
        assert!(!options.strip_internal);
    }

    #[test]
    fn isolated_mode_overrides_legacy_path() {
        let options = DeclarationOptions {
            legacy_collector: true,
            isolated_declarations: true,
            ..Default::default()
        };
        assert!(!options.use_legacy_collector());
    }
}
