//! The detection facade — the engine's sole entry point.
//!
//! Collaborators (registry, lookup service, heuristics, cache) are explicit
//! constructor arguments, not process-wide singletons, so tests build
//! isolated instances per case.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use baseline_core::{BaselineErrorCode, DetectConfig, DetectError};

use crate::cache::DetectionCache;
use crate::heuristics::ContextHeuristics;
use crate::languages::LanguageId;
use crate::lookup::FeatureLookup;
use crate::merge::merge_detections;
use crate::registry::PatternRegistry;
use crate::syntax::SyntaxMatcher;
use crate::text::TextMatcher;
use crate::types::DetectedFeature;

/// Detects web-platform feature usage in source documents.
///
/// Detection runs synchronously per request to completion; bursty edits are
/// expected to be debounced by the caller.
pub struct FeatureDetector {
    registry: Arc<PatternRegistry>,
    lookup: Arc<dyn FeatureLookup>,
    heuristics: ContextHeuristics,
    cache: DetectionCache,
    config: DetectConfig,
    /// Full pipeline runs, i.e. cache misses. Cache hits do not move this.
    scans: AtomicU64,
}

impl FeatureDetector {
    /// Build a detector with the built-in context heuristics.
    pub fn new(
        registry: Arc<PatternRegistry>,
        lookup: Arc<dyn FeatureLookup>,
        config: DetectConfig,
    ) -> Self {
        Self::with_heuristics(registry, lookup, ContextHeuristics::with_builtin_validators(), config)
    }

    /// Build a detector with a custom heuristic table.
    pub fn with_heuristics(
        registry: Arc<PatternRegistry>,
        lookup: Arc<dyn FeatureLookup>,
        heuristics: ContextHeuristics,
        config: DetectConfig,
    ) -> Self {
        let cache = DetectionCache::new(config.effective_cache_capacity());
        Self {
            registry,
            lookup,
            heuristics,
            cache,
            config,
            scans: AtomicU64::new(0),
        }
    }

    /// Detect feature uses in one document version.
    ///
    /// Cache lookup precedes everything; a hit returns the stored list with
    /// no scanning. Unknown language ids produce an empty result. Parse
    /// failures degrade that document to text-only matching.
    pub fn detect_features(
        &self,
        document_id: &str,
        version: i32,
        language_id: &str,
        text: &str,
    ) -> Vec<DetectedFeature> {
        let Some(language) = LanguageId::from_id(language_id) else {
            tracing::debug!(document_id, language_id, "unsupported language, skipping");
            return Vec::new();
        };

        if let Some(cached) = self.cache.get(document_id, version) {
            return cached;
        }

        self.scans.fetch_add(1, Ordering::Relaxed);
        let rules = self.registry.rules_for(language);

        let mut raw = Vec::new();
        if language.is_program_like() {
            raw.extend(self.run_syntax_pass(document_id, language, text, &rules));
        }
        raw.extend(TextMatcher::match_rules(
            text,
            language,
            &rules,
            &self.heuristics,
            self.lookup.as_ref(),
            &self.config,
            document_id,
        ));

        let merged = merge_detections(raw, self.config.effective_confidence_floor());
        self.cache.insert(document_id, version, merged.clone());
        merged
    }

    /// Drop all cached results.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Drop cached results for one document, e.g. on file close.
    pub fn evict_document(&self, document_id: &str) {
        self.cache.evict_document(document_id);
    }

    /// Number of full pipeline runs performed so far.
    pub fn scan_count(&self) -> u64 {
        self.scans.load(Ordering::Relaxed)
    }

    /// Number of cached (document, version) entries.
    pub fn cache_entry_count(&self) -> usize {
        self.cache.entry_count()
    }

    fn run_syntax_pass(
        &self,
        document_id: &str,
        language: LanguageId,
        text: &str,
        rules: &[&crate::registry::PatternRule],
    ) -> Vec<DetectedFeature> {
        let Some(grammar) = language.ts_language() else {
            return Vec::new();
        };

        let mut parser = tree_sitter::Parser::new();
        if parser.set_language(&grammar).is_err() {
            let err = DetectError::GrammarUnavailable {
                language: language.name().to_string(),
            };
            tracing::warn!(
                document_id,
                code = err.error_code(),
                error = %err,
                "degrading to text-only detection"
            );
            return Vec::new();
        }

        let Some(tree) = parser.parse(text, None) else {
            let err = DetectError::ParseFailure {
                document_id: document_id.to_string(),
                language: language.name().to_string(),
            };
            tracing::warn!(
                document_id,
                code = err.error_code(),
                error = %err,
                "degrading to text-only detection"
            );
            return Vec::new();
        };

        let syntax_rules: Vec<&crate::registry::PatternRule> = rules
            .iter()
            .copied()
            .filter(|r| r.syntax_pattern.is_some())
            .collect();

        SyntaxMatcher::match_rules(
            &tree,
            text,
            &syntax_rules,
            self.lookup.as_ref(),
            self.config.effective_snippet_radius(),
            document_id,
        )
    }
}
