//! Detection-time errors.
//!
//! Everything here is recoverable: a parse failure degrades that document to
//! text-only matching, and a lookup miss skips a single candidate detection.
//! Callers log these with document and rule context; they never abort the
//! analysis of the rest of the document.

use super::error_code::{self, BaselineErrorCode};

/// Errors that can occur while analyzing a single document.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("failed to parse {document_id} as {language}")]
    ParseFailure { document_id: String, language: String },

    #[error("no grammar available for language '{language}'")]
    GrammarUnavailable { language: String },

    #[error("feature '{feature_id}' not found in lookup service")]
    LookupMiss { feature_id: String },
}

impl BaselineErrorCode for DetectError {
    fn error_code(&self) -> &'static str {
        error_code::DETECT_ERROR
    }
}
