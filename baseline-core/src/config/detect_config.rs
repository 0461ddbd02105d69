//! Detection engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the feature-detection engine.
///
/// Every field is optional so a partial TOML table deserializes cleanly;
/// the `effective_*` accessors apply the documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectConfig {
    /// Maximum number of distinct documents kept in the detection cache.
    /// Default: 10. Eviction is oldest-inserted, not LRU.
    pub cache_capacity: Option<usize>,
    /// Minimum confidence for a detection to survive the merge stage.
    /// Default: 0.6.
    pub confidence_floor: Option<f32>,
    /// Context-heuristic results below this are discarded outright.
    /// Default: 0.5.
    pub heuristic_discard_below: Option<f32>,
    /// Characters of context captured on each side of a syntax match.
    /// Default: 50.
    pub snippet_radius: Option<usize>,
    /// Lines of context captured on each side of a text match.
    /// Default: 2.
    pub snippet_context_lines: Option<usize>,
}

impl DetectConfig {
    /// Parse a config from a TOML string. Unknown keys are ignored;
    /// missing keys fall back to defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Effective cache capacity, defaulting to 10 distinct documents.
    pub fn effective_cache_capacity(&self) -> usize {
        self.cache_capacity.unwrap_or(10)
    }

    /// Effective merge-stage confidence floor, defaulting to 0.6.
    pub fn effective_confidence_floor(&self) -> f32 {
        self.confidence_floor.unwrap_or(0.6)
    }

    /// Effective heuristic discard threshold, defaulting to 0.5.
    pub fn effective_heuristic_discard_below(&self) -> f32 {
        self.heuristic_discard_below.unwrap_or(0.5)
    }

    /// Effective snippet radius for syntax matches, defaulting to 50 chars.
    pub fn effective_snippet_radius(&self) -> usize {
        self.snippet_radius.unwrap_or(50)
    }

    /// Effective snippet context lines for text matches, defaulting to 2.
    pub fn effective_snippet_context_lines(&self) -> usize {
        self.snippet_context_lines.unwrap_or(2)
    }
}
