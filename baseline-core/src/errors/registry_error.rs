//! Pattern registry validation errors.
//!
//! All of these are fatal: they are raised once at startup while the rule
//! table is loaded and validated, and must halt initialization. A malformed
//! rule is never discovered per-document.

use super::error_code::{self, BaselineErrorCode};

/// Errors raised while loading or validating the pattern registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("rule '{rule_id}' has an empty feature id")]
    EmptyFeatureId { rule_id: String },

    #[error("rule '{rule_id}' applies to no languages")]
    EmptyLanguageSet { rule_id: String },

    #[error("rule '{rule_id}' has confidence {confidence} outside [0, 1]")]
    ConfidenceOutOfRange { rule_id: String, confidence: f32 },

    #[error("rule '{rule_id}' defines neither a text pattern nor a syntax pattern")]
    NoPattern { rule_id: String },

    #[error("invalid regex in rule '{rule_id}': {message}")]
    InvalidRegex { rule_id: String, message: String },

    #[error("incomplete syntax shape in rule '{rule_id}': {message}")]
    IncompleteShape { rule_id: String, message: String },

    #[error("unknown category '{category}' in rule '{rule_id}'")]
    UnknownCategory { rule_id: String, category: String },

    #[error("unknown language '{language}' in rule '{rule_id}'")]
    UnknownLanguage { rule_id: String, language: String },

    #[error("failed to parse rule file: {0}")]
    RuleFileParse(String),

    #[error("failed to read rule file {path}: {message}")]
    RuleFileRead { path: String, message: String },
}

impl BaselineErrorCode for RegistryError {
    fn error_code(&self) -> &'static str {
        error_code::REGISTRY_ERROR
    }
}
