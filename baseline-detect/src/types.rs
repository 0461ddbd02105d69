//! Core value types for the detection engine.

use serde::{Deserialize, Serialize};

/// A half-open source range in line/column coordinates (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// How a feature occurrence was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionMethod {
    /// Structural match over a tree-sitter parse.
    Syntax,
    /// Regex match over raw text.
    Text,
}

/// Severity suggestion derived from a feature's baseline support status.
///
/// The engine never presents these to a user; a consuming layer maps them
/// to its own diagnostic levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityHint {
    Warning,
    Information,
    Hint,
}

/// A single feature occurrence — the universal output type.
///
/// Created fresh per analysis pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedFeature {
    pub feature_id: String,
    pub range: SourceRange,
    pub confidence: f32,
    pub severity: SeverityHint,
    pub context_snippet: String,
    pub method: DetectionMethod,
}
