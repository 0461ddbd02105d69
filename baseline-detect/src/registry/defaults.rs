//! Built-in detection rules.
//!
//! These are raw `RuleDef`s so they go through the same compile-and-validate
//! path as user-supplied TOML rules. Confidence values are per-rule
//! judgments of how unambiguous the pattern is, not hard law.

use super::{RuleDef, SyntaxShapeDef};

const SCRIPT_LANGUAGES: &[&str] = &[
    "javascript",
    "javascriptreact",
    "typescript",
    "typescriptreact",
];

fn rule(
    id: &str,
    feature: &str,
    languages: &[&str],
    category: &str,
    confidence: f32,
) -> RuleDef {
    RuleDef {
        id: id.to_string(),
        feature: feature.to_string(),
        languages: languages.iter().map(|l| l.to_string()).collect(),
        category: category.to_string(),
        confidence,
        text: None,
        syntax: None,
        context_required: false,
        enabled: None,
    }
}

fn text(mut def: RuleDef, pattern: &str) -> RuleDef {
    def.text = Some(pattern.to_string());
    def
}

fn needs_context(mut def: RuleDef) -> RuleDef {
    def.context_required = true;
    def
}

fn constructor_call(mut def: RuleDef, type_name: &str) -> RuleDef {
    def.syntax = Some(SyntaxShapeDef {
        kind: "constructor_call".to_string(),
        type_name: Some(type_name.to_string()),
        receiver: None,
        member: None,
    });
    def
}

fn method_call(mut def: RuleDef, receiver: Option<&str>, member: &str) -> RuleDef {
    def.syntax = Some(SyntaxShapeDef {
        kind: "method_call".to_string(),
        type_name: None,
        receiver: receiver.map(|r| r.to_string()),
        member: Some(member.to_string()),
    });
    def
}

fn optional_access(mut def: RuleDef) -> RuleDef {
    def.syntax = Some(SyntaxShapeDef {
        kind: "optional_access".to_string(),
        type_name: None,
        receiver: None,
        member: None,
    });
    def
}

/// The built-in rule table covering markup, stylesheet, script, and api
/// features.
pub fn builtin_rule_defs() -> Vec<RuleDef> {
    vec![
        // --- Script / API rules (structural where a shape exists) ---
        // Both forms: structural for program text, regex as the rule-file
        // fallback. The text form is never run for program languages.
        text(
            constructor_call(
                rule("js-urlpattern", "urlpattern", SCRIPT_LANGUAGES, "api", 1.0),
                "URLPattern",
            ),
            r"\bnew\s+URLPattern\b",
        ),
        method_call(
            rule(
                "js-clipboard-write",
                "async-clipboard",
                SCRIPT_LANGUAGES,
                "api",
                0.95,
            ),
            Some("navigator.clipboard"),
            "writeText",
        ),
        method_call(
            rule(
                "js-abortsignal-timeout",
                "abortsignal-timeout",
                SCRIPT_LANGUAGES,
                "api",
                0.95,
            ),
            Some("AbortSignal"),
            "timeout",
        ),
        // Any-receiver `.at(...)` is inherently ambiguous; confidence stays
        // modest.
        method_call(
            rule("js-array-at", "array-at", SCRIPT_LANGUAGES, "script", 0.7),
            None,
            "at",
        ),
        text(
            rule(
                "js-structured-clone",
                "structured-clone",
                SCRIPT_LANGUAGES,
                "api",
                0.95,
            ),
            r"\bstructuredClone\s*\(",
        ),
        needs_context(text(
            optional_access(rule(
                "js-optional-chaining",
                "optional-chaining",
                SCRIPT_LANGUAGES,
                "script",
                0.8,
            )),
            r"\?\.",
        )),
        needs_context(text(
            rule(
                "js-private-fields",
                "private-class-fields",
                SCRIPT_LANGUAGES,
                "script",
                0.8,
            ),
            r"#[A-Za-z_$][A-Za-z0-9_$]*",
        )),
        needs_context(text(
            rule(
                "js-top-level-await",
                "top-level-await",
                SCRIPT_LANGUAGES,
                "script",
                0.8,
            ),
            r"\bawait\s",
        )),
        // --- Stylesheet rules ---
        text(
            rule(
                "css-backdrop-filter",
                "backdrop-filter",
                &["css", "scss"],
                "stylesheet",
                0.95,
            ),
            r"backdrop-filter\s*:",
        ),
        text(
            rule("css-has-selector", "has", &["css", "scss"], "stylesheet", 0.9),
            r":has\(",
        ),
        text(
            rule(
                "css-container-at-rule",
                "container-queries",
                &["css", "scss"],
                "stylesheet",
                0.95,
            ),
            r"@container\b",
        ),
        // Second rule for the same feature through a different signal.
        text(
            rule(
                "css-container-type",
                "container-queries",
                &["css", "scss"],
                "stylesheet",
                0.9,
            ),
            r"container-type\s*:",
        ),
        text(
            rule("css-subgrid", "subgrid", &["css", "scss"], "stylesheet", 0.85),
            r"\bsubgrid\b",
        ),
        text(
            rule(
                "css-text-wrap-balance",
                "text-wrap-balance",
                &["css", "scss"],
                "stylesheet",
                0.9,
            ),
            r"text-wrap\s*:\s*balance",
        ),
        // --- Markup rules ---
        text(
            rule("html-dialog", "dialog", &["html"], "markup", 0.9),
            r"<dialog\b",
        ),
        text(
            rule("html-popover", "popover", &["html"], "markup", 0.85),
            r"\spopover[\s=>]",
        ),
        text(
            rule("html-loading-lazy", "loading-lazy", &["html"], "markup", 0.95),
            r#"loading\s*=\s*["']lazy["']"#,
        ),
    ]
}
