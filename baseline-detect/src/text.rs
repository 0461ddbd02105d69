//! Text matcher — regex scan over raw source.
//!
//! Handles markup and stylesheet languages, and serves as the fallback for
//! program languages on rules without a structural form. Rules that have a
//! syntax pattern are excluded for program-like languages so the same
//! occurrence is never counted by both strategies.

use baseline_core::{DetectConfig, DetectError};

use crate::heuristics::{ContextHeuristics, HeuristicInput};
use crate::languages::LanguageId;
use crate::lookup::FeatureLookup;
use crate::registry::PatternRule;
use crate::types::{DetectedFeature, DetectionMethod, SourceRange};

/// The regex matcher. Stateless; the scan cursor lives on the stack per
/// rule per document, so shared rules never leak match state across
/// documents.
pub struct TextMatcher;

impl TextMatcher {
    /// Run all applicable text rules over the document.
    pub fn match_rules(
        text: &str,
        language: LanguageId,
        rules: &[&PatternRule],
        heuristics: &ContextHeuristics,
        lookup: &dyn FeatureLookup,
        config: &DetectConfig,
        document_id: &str,
    ) -> Vec<DetectedFeature> {
        let lines = LineIndex::new(text);
        let mut detections = Vec::new();

        for rule in rules {
            // Structural rules are exclusively the syntax matcher's job for
            // program languages.
            if rule.syntax_pattern.is_some() && language.is_program_like() {
                continue;
            }
            let Some(regex) = &rule.text_pattern else {
                continue;
            };

            let mut cursor = 0usize;
            while cursor <= text.len() {
                let Some(m) = regex.find_at(text, cursor) else {
                    break;
                };

                // Zero-length matches would never advance the cursor; step
                // past them by hand so total matches stay bounded by the
                // text length.
                if m.start() == m.end() {
                    cursor = m.end() + 1;
                    continue;
                }
                cursor = m.end();

                let (line, column) = lines.line_col(m.start());
                let (end_line, end_column) = lines.line_col(m.end());
                let line_text = lines.line_text(text, line);

                let mut confidence = rule.base_confidence;
                if rule.context_required {
                    let input = HeuristicInput {
                        line: line_text,
                        token: m.as_str(),
                        token_start: m.start() - lines.line_start(line),
                    };
                    confidence =
                        heuristics.confidence_for(&rule.feature_id, &input, confidence);
                    if confidence < config.effective_heuristic_discard_below() {
                        tracing::debug!(
                            document_id,
                            rule_id = rule.id.as_str(),
                            confidence,
                            "context heuristic discarded match"
                        );
                        continue;
                    }
                }

                let Some(record) = lookup.get_feature(&rule.feature_id) else {
                    let err = DetectError::LookupMiss {
                        feature_id: rule.feature_id.clone(),
                    };
                    tracing::warn!(
                        document_id,
                        rule_id = rule.id.as_str(),
                        error = %err,
                        "skipping text detection"
                    );
                    continue;
                };

                detections.push(DetectedFeature {
                    feature_id: rule.feature_id.clone(),
                    range: SourceRange {
                        start_line: line,
                        start_column: column,
                        end_line,
                        end_column,
                    },
                    confidence,
                    severity: record.baseline.severity_hint(),
                    context_snippet: lines.context_snippet(
                        text,
                        line,
                        config.effective_snippet_context_lines(),
                    ),
                    method: DetectionMethod::Text,
                });
            }
        }

        detections
    }
}

/// Byte offsets of line starts, for offset → line/column conversion.
struct LineIndex {
    starts: Vec<usize>,
    text_len: usize,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        Self {
            starts,
            text_len: text.len(),
        }
    }

    /// Zero-based (line, byte column) for a byte offset.
    fn line_col(&self, offset: usize) -> (u32, u32) {
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line as u32, (offset - self.starts[line]) as u32)
    }

    fn line_start(&self, line: u32) -> usize {
        self.starts[line as usize]
    }

    /// End byte of a line, excluding its newline.
    fn line_end(&self, line: u32) -> usize {
        let next = line as usize + 1;
        if next < self.starts.len() {
            // Back off the trailing '\n'.
            self.starts[next].saturating_sub(1)
        } else {
            self.text_len
        }
    }

    fn line_text<'a>(&self, text: &'a str, line: u32) -> &'a str {
        let end = self.line_end(line);
        let s = &text[self.line_start(line)..end];
        s.strip_suffix('\r').unwrap_or(s)
    }

    fn line_count(&self) -> u32 {
        self.starts.len() as u32
    }

    /// `context_lines` lines on each side of `line`, clamped to bounds.
    fn context_snippet(&self, text: &str, line: u32, context_lines: usize) -> String {
        let context = context_lines as u32;
        let first = line.saturating_sub(context);
        let last = (line + context).min(self.line_count() - 1);
        text[self.line_start(first)..self.line_end(last)].to_string()
    }
}
