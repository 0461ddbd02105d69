//! Syntax matcher tests: one test per structural shape, plus receiver
//! discrimination and lookup-miss handling.

use std::sync::Arc;

use baseline_core::DetectConfig;
use baseline_detect::registry::PatternRegistry;
use baseline_detect::{
    DetectionMethod, FeatureDetector, SeverityHint, StaticFeatureLookup,
};

fn detector() -> FeatureDetector {
    FeatureDetector::new(
        Arc::new(PatternRegistry::with_builtin_rules().unwrap()),
        Arc::new(StaticFeatureLookup::with_builtin_features()),
        DetectConfig::default(),
    )
}

#[test]
fn constructor_call_matches_constructed_type() {
    let detector = detector();
    let result = detector.detect_features(
        "file:///app.ts",
        1,
        "typescript",
        "const p = new URLPattern({ pathname: '/books/:id' });",
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].feature_id, "urlpattern");
    assert_eq!(result[0].method, DetectionMethod::Syntax);
    // URLPattern has limited availability.
    assert_eq!(result[0].severity, SeverityHint::Warning);
}

#[test]
fn constructor_call_ignores_other_types() {
    let detector = detector();
    let result = detector.detect_features(
        "file:///app.ts",
        1,
        "typescript",
        "const u = new URL('https://example.com');",
    );
    assert!(result.is_empty());
}

#[test]
fn method_call_with_receiver_matches_both_parts() {
    let detector = detector();
    let result = detector.detect_features(
        "file:///app.ts",
        1,
        "typescript",
        "const signal = AbortSignal.timeout(5_000);",
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].feature_id, "abortsignal-timeout");
    assert_eq!(result[0].method, DetectionMethod::Syntax);
}

#[test]
fn method_call_with_receiver_rejects_wrong_receiver() {
    let detector = detector();
    // `timeout` on a different receiver must not match the AbortSignal rule.
    let result = detector.detect_features(
        "file:///app.ts",
        1,
        "typescript",
        "const t = scheduler.timeout(5_000);",
    );
    assert!(result.iter().all(|d| d.feature_id != "abortsignal-timeout"));
}

#[test]
fn method_call_with_chained_receiver_text() {
    let detector = detector();
    let result = detector.detect_features(
        "file:///app.ts",
        1,
        "typescript",
        "await navigator.clipboard.writeText(serialized);",
    );

    let clipboard: Vec<_> = result
        .iter()
        .filter(|d| d.feature_id == "async-clipboard")
        .collect();
    assert_eq!(clipboard.len(), 1);
    assert_eq!(clipboard[0].method, DetectionMethod::Syntax);
}

#[test]
fn method_call_without_receiver_matches_any_receiver() {
    let detector = detector();
    let result = detector.detect_features(
        "file:///app.ts",
        1,
        "typescript",
        "const last = items.at(-1);",
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].feature_id, "array-at");
    assert!((result[0].confidence - 0.7).abs() < f32::EPSILON);
}

#[test]
fn optional_access_requires_optional_chain_token() {
    let detector = detector();

    let with_chain = detector.detect_features(
        "file:///a.ts",
        1,
        "typescript",
        "const name = user?.profile;",
    );
    assert_eq!(with_chain.len(), 1);
    assert_eq!(with_chain[0].feature_id, "optional-chaining");
    assert_eq!(with_chain[0].method, DetectionMethod::Syntax);

    let without_chain =
        detector.detect_features("file:///b.ts", 1, "typescript", "const name = user.profile;");
    assert!(without_chain.is_empty());
}

#[test]
fn chained_optional_access_collapses_per_line() {
    let detector = detector();
    // Two optional-chain nodes on the same line merge to one finding.
    let result = detector.detect_features(
        "file:///app.ts",
        1,
        "typescript",
        "const city = user?.address?.city;",
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].feature_id, "optional-chaining");
}

#[test]
fn syntax_detection_carries_context_snippet() {
    let detector = detector();
    let source = "const pattern = new URLPattern({ pathname: '/books/:id' });";
    let result = detector.detect_features("file:///app.js", 1, "javascript", source);

    assert_eq!(result.len(), 1);
    assert!(result[0].context_snippet.contains("new URLPattern"));
}

#[test]
fn jsx_and_tsx_flavors_parse_structurally() {
    let detector = detector();
    let source = "export function Panel() {\n  const last = items.at(-1);\n  return <div>{last}</div>;\n}\n";
    let result = detector.detect_features("file:///panel.tsx", 1, "typescriptreact", source);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].feature_id, "array-at");
    assert_eq!(result[0].method, DetectionMethod::Syntax);
    assert_eq!(result[0].range.start_line, 1);
}

#[test]
fn lookup_miss_skips_only_that_candidate() {
    // A lookup that knows nothing: every candidate is skipped, no panic.
    let empty_lookup = StaticFeatureLookup::new(Vec::new());
    let detector = FeatureDetector::new(
        Arc::new(PatternRegistry::with_builtin_rules().unwrap()),
        Arc::new(empty_lookup),
        DetectConfig::default(),
    );

    let result = detector.detect_features(
        "file:///app.ts",
        1,
        "typescript",
        "const p = new URLPattern({ pathname: '/x' });",
    );
    assert!(result.is_empty());
}
