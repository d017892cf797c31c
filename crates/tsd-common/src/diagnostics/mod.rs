//! Diagnostic types and message lookup for declaration emission.
//!
//! Message data lives in `data.rs`: the 4000-series accessibility errors,
//! the 9000-series isolated-declarations errors, and the unnameable
//! inferred-type errors. Templates use `{0}`, `{1}`, ... placeholders;
//! `format_message()` fills them in.

use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes};

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Related information for a diagnostic (e.g., where the blocking symbol
/// was declared).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// An emission diagnostic with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Build an error from a message template code and its arguments.
    #[must_use]
    pub fn error_with_template(
        file: impl Into<String>,
        start: u32,
        length: u32,
        code: u32,
        args: &[&str],
    ) -> Self {
        let template = get_message_template(code).unwrap_or("Unknown diagnostic code {0}");
        Self::error(file.into(), start, length, format_message(template, args), code)
    }

    #[must_use]
    pub fn with_related(
        mut self,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file: file.into(),
            start,
            length,
            message_text: message.into(),
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// A diagnostic message definition: code, category, and `{n}` template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Fill `{0}`, `{1}`, ... placeholders in a message template.
#[must_use]
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_fills_placeholders_in_order() {
        assert_eq!(
            format_message("Parameter '{0}' of exported function has or is using private name '{1}'.", &["x", "Hidden"]),
            "Parameter 'x' of exported function has or is using private name 'Hidden'."
        );
    }

    #[test]
    fn every_code_constant_has_a_message() {
        for code in diagnostic_codes::ALL {
            assert!(
                get_message_template(*code).is_some(),
                "no message template registered for code {code}"
            );
        }
    }

    #[test]
    fn error_with_template_formats() {
        let diag = Diagnostic::error_with_template(
            "a.ts",
            10,
            4,
            diagnostic_codes::EXPORTED_VARIABLE_PRIVATE_NAME,
            &["v", "I"],
        );
        assert_eq!(diag.message_text, "Exported variable 'v' has or is using private name 'I'.");
        assert!(diag.is_error());
    }
}
