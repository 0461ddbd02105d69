//! # baseline-detect
//!
//! Feature-detection engine for modern web-platform features.
//! Scans source documents with two strategies — structural matching over a
//! tree-sitter parse for program languages, and regex matching over raw text
//! for markup and stylesheets — then merges, deduplicates, and caches the
//! results per document version.

pub mod cache;
pub mod detector;
pub mod heuristics;
pub mod languages;
pub mod lookup;
pub mod merge;
pub mod registry;
pub mod syntax;
pub mod text;
pub mod types;

pub use detector::FeatureDetector;
pub use languages::LanguageId;
pub use lookup::{BaselineStatus, FeatureLookup, FeatureRecord, StaticFeatureLookup};
pub use registry::{PatternRegistry, PatternRule, RuleCategory, SyntaxShape};
pub use types::{DetectedFeature, DetectionMethod, SeverityHint, SourceRange};
