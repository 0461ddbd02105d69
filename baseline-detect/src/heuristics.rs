//! Line-local context heuristics for ambiguous text patterns.
//!
//! Some tokens are weak evidence on their own: `?.` could be a ternary
//! branch, `#name` could be a comment, `await` could sit inside an async
//! function. For rules marked `context_required`, the text matcher asks
//! this table for a confidence override computed from the single source
//! line containing the match.
//!
//! Validators are registered per feature id so new ambiguity classes are
//! additive; nothing here dispatches on feature ids inline. The heuristics
//! are deliberately single-line and can misclassify multi-line expressions;
//! that accuracy trade-off is intentional.

use baseline_core::FxHashMap;

/// Everything a validator may inspect: the match's source line, the matched
/// token, and the token's byte offset within that line.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicInput<'a> {
    pub line: &'a str,
    pub token: &'a str,
    pub token_start: usize,
}

/// A confidence validator for one ambiguity class.
pub type HeuristicFn = fn(&HeuristicInput<'_>) -> f32;

/// Registry of per-feature confidence validators.
pub struct ContextHeuristics {
    validators: FxHashMap<String, HeuristicFn>,
}

impl ContextHeuristics {
    /// Empty table: every `context_required` rule keeps its base confidence.
    pub fn new() -> Self {
        Self {
            validators: FxHashMap::default(),
        }
    }

    /// Table with the built-in ambiguity classes registered.
    pub fn with_builtin_validators() -> Self {
        let mut table = Self::new();
        table.register("optional-chaining", optional_chaining_confidence);
        table.register("private-class-fields", private_field_confidence);
        table.register("top-level-await", top_level_await_confidence);
        table
    }

    /// Register a validator for a feature id, replacing any existing one.
    pub fn register(&mut self, feature_id: &str, validator: HeuristicFn) {
        self.validators.insert(feature_id.to_string(), validator);
    }

    /// Confidence for a match of `feature_id`. Falls back to
    /// `base_confidence` when no validator is registered.
    pub fn confidence_for(
        &self,
        feature_id: &str,
        input: &HeuristicInput<'_>,
        base_confidence: f32,
    ) -> f32 {
        match self.validators.get(feature_id) {
            Some(validator) => validator(input),
            None => base_confidence,
        }
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether no validators are registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for ContextHeuristics {
    fn default() -> Self {
        Self::with_builtin_validators()
    }
}

/// `?.` vs. a ternary `?` followed by a member access on the next line:
/// strong when the token is immediately followed by a member-ish character.
fn optional_chaining_confidence(input: &HeuristicInput<'_>) -> f32 {
    let after = input.token_start + input.token.len();
    let next = input.line[after.min(input.line.len())..].chars().next();
    match next {
        Some(c) if c.is_alphanumeric() || c == '_' || c == '$' || c == '[' || c == '(' => 0.9,
        _ => 0.3,
    }
}

/// `#name` is a private field when it is accessed as a member (`this.#x`)
/// or declared at the start of a class-body line; a `#` buried mid-line is
/// more likely a string fragment or a color literal.
fn private_field_confidence(input: &HeuristicInput<'_>) -> f32 {
    let preceded_by_dot = input.token_start > 0
        && input.line.as_bytes().get(input.token_start - 1) == Some(&b'.');
    let leading_len = input.line.len() - input.line.trim_start().len();
    let at_declaration_position = input.token_start == leading_len;
    if preceded_by_dot || at_declaration_position || input.line.contains("class ") {
        0.9
    } else {
        0.4
    }
}

/// `await` at statement start outside any async declaration is likely
/// top-level; anything inside an async scope is ordinary await.
fn top_level_await_confidence(input: &HeuristicInput<'_>) -> f32 {
    let trimmed = input.line.trim_start();
    let at_line_start = trimmed.starts_with("await");
    let declares_async_scope =
        input.line.contains("async") || input.line.contains("function");
    if at_line_start && !declares_async_scope {
        0.8
    } else {
        0.3
    }
}
