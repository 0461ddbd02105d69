//! End-to-end detector tests: the full pipeline over real documents,
//! cache-hit instrumentation, and determinism.

use std::sync::Arc;

use baseline_core::DetectConfig;
use baseline_detect::registry::PatternRegistry;
use baseline_detect::{DetectionMethod, FeatureDetector, StaticFeatureLookup};

fn detector() -> FeatureDetector {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    FeatureDetector::new(
        Arc::new(PatternRegistry::with_builtin_rules().unwrap()),
        Arc::new(StaticFeatureLookup::with_builtin_features()),
        DetectConfig::default(),
    )
}

#[test]
fn urlpattern_construction_detected_once_via_syntax() {
    let detector = detector();
    let result = detector.detect_features(
        "file:///routes.js",
        1,
        "javascript",
        "new URLPattern({ pathname: '/books/:id' })",
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].feature_id, "urlpattern");
    assert_eq!(result[0].method, DetectionMethod::Syntax);
    assert!((result[0].confidence - 1.0).abs() < f32::EPSILON);
}

#[test]
fn backdrop_filter_detected_once_via_text() {
    let detector = detector();
    let result = detector.detect_features(
        "file:///card.css",
        1,
        "css",
        ".card { backdrop-filter: blur(4px); }",
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].feature_id, "backdrop-filter");
    assert_eq!(result[0].method, DetectionMethod::Text);
    assert!((result[0].confidence - 0.95).abs() < f32::EPSILON);
}

#[test]
fn dialog_element_detected_once_via_text() {
    let detector = detector();
    let result = detector.detect_features(
        "file:///page.html",
        1,
        "html",
        "<dialog open></dialog>",
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].feature_id, "dialog");
    assert_eq!(result[0].method, DetectionMethod::Text);
}

#[test]
fn unchanged_version_is_served_from_cache() {
    let detector = detector();
    let source = "const p = new URLPattern({ pathname: '/x' });";

    let first = detector.detect_features("file:///app.js", 1, "javascript", source);
    assert_eq!(detector.scan_count(), 1);

    let second = detector.detect_features("file:///app.js", 1, "javascript", source);
    assert_eq!(detector.scan_count(), 1, "second call must not re-scan");
    assert_eq!(first, second);

    // A bumped version misses the cache and scans again.
    detector.detect_features("file:///app.js", 2, "javascript", source);
    assert_eq!(detector.scan_count(), 2);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let source = "const p = new URLPattern({ pathname: '/x' });\nconst last = items.at(-1);\nawait navigator.clipboard.writeText(p.pathname);\n";

    let first = detector().detect_features("file:///app.ts", 1, "typescript", source);
    let second = detector().detect_features("file:///app.ts", 1, "typescript", source);

    let a = serde_json::to_string(&first).unwrap();
    let b = serde_json::to_string(&second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn syntax_signal_takes_precedence_over_text_for_script() {
    let detector = detector();
    // The urlpattern feature carries both a structural rule and a text
    // rule; on a script document only the structural one runs, so the
    // construct yields exactly one finding.
    let result = detector.detect_features(
        "file:///app.js",
        1,
        "javascript",
        "const p = new URLPattern({ pathname: '/books/:id' });",
    );

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].method, DetectionMethod::Syntax);
}

#[test]
fn unknown_language_yields_empty_without_scanning() {
    let detector = detector();
    let result = detector.detect_features("file:///main.rs", 1, "rust", "fn main() {}");
    assert!(result.is_empty());
    assert_eq!(detector.scan_count(), 0);
    assert_eq!(detector.cache_entry_count(), 0);
}

#[test]
fn empty_document_yields_empty() {
    let detector = detector();
    let result = detector.detect_features("file:///empty.css", 1, "css", "");
    assert!(result.is_empty());
    // The empty result is still cached.
    detector.detect_features("file:///empty.css", 1, "css", "");
    assert_eq!(detector.scan_count(), 1);
}

#[test]
fn mixed_document_finds_multiple_features_in_order() {
    let detector = detector();
    let source = "\
.sidebar { container-type: inline-size; }
@container sidebar (min-width: 400px) {
  .card { backdrop-filter: blur(2px); }
}
.grid { grid-template-columns: subgrid; }
";
    let result = detector.detect_features("file:///layout.css", 1, "css", source);

    let ids: Vec<&str> = result.iter().map(|d| d.feature_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "container-queries",
            "container-queries",
            "backdrop-filter",
            "subgrid",
        ]
    );
    for window in result.windows(2) {
        assert!(window[0].range.start_line <= window[1].range.start_line);
    }
}

#[test]
fn evicting_a_document_forces_a_fresh_scan() {
    let detector = detector();
    let source = "<div popover>hi</div>";

    detector.detect_features("file:///p.html", 1, "html", source);
    detector.evict_document("file:///p.html");
    detector.detect_features("file:///p.html", 1, "html", source);
    assert_eq!(detector.scan_count(), 2);
}

#[test]
fn clear_cache_forces_fresh_scans_for_all_documents() {
    let detector = detector();
    detector.detect_features("file:///a.css", 1, "css", ".a { backdrop-filter: none; }");
    detector.detect_features("file:///b.html", 1, "html", "<dialog></dialog>");
    assert_eq!(detector.cache_entry_count(), 2);

    detector.clear_cache();
    assert_eq!(detector.cache_entry_count(), 0);

    detector.detect_features("file:///a.css", 1, "css", ".a { backdrop-filter: none; }");
    assert_eq!(detector.scan_count(), 3);
}

#[test]
fn detections_serialize_to_stable_json_shape() {
    let detector = detector();
    let result = detector.detect_features(
        "file:///card.css",
        1,
        "css",
        ".card { backdrop-filter: blur(4px); }",
    );

    let json = serde_json::to_value(&result).unwrap();
    let first = &json[0];
    assert_eq!(first["feature_id"], "backdrop-filter");
    assert_eq!(first["method"], "Text");
    assert_eq!(first["range"]["start_line"], 0);
    assert!(first["context_snippet"].as_str().unwrap().contains("backdrop-filter"));

    let back: Vec<baseline_detect::DetectedFeature> = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}
