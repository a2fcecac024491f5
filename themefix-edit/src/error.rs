//! Error types for themefix-edit.
//!
//! Most primitives report failures through `anyhow` with path context, the
//! same way they report read/write failures. `EditError` exists for the one
//! case callers need to distinguish: a structured document that is present
//! but cannot be parsed, which must abort a fix run instead of being
//! silently skipped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// A structured document exists but failed to parse.
    #[error("malformed document {path}: {message}")]
    MalformedDocument { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::EditError;

    #[test]
    fn malformed_document_display_names_the_path() {
        let err = EditError::MalformedDocument {
            path: "locales/en.default.json".to_string(),
            message: "expected value at line 1".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("locales/en.default.json"));
        assert!(text.contains("expected value"));
    }
}
