//! Structural matcher — walks a tree-sitter parse once, depth-first, and
//! tests every candidate rule's shape at each node.
//!
//! Matching is shape-per-variant: `SyntaxShape` is a closed enum and each
//! variant has exactly one matcher function here.

use baseline_core::DetectError;
use tree_sitter::Node;

use crate::lookup::FeatureLookup;
use crate::registry::{PatternRule, SyntaxShape};
use crate::types::{DetectedFeature, DetectionMethod, SourceRange};

/// The structural matcher. Stateless; all inputs are passed per call.
pub struct SyntaxMatcher;

impl SyntaxMatcher {
    /// Run all syntax rules over a parsed document in a single depth-first
    /// traversal. A feature-lookup miss skips that one candidate and is
    /// logged, never fatal.
    pub fn match_rules(
        tree: &tree_sitter::Tree,
        source: &str,
        rules: &[&PatternRule],
        lookup: &dyn FeatureLookup,
        snippet_radius: usize,
        document_id: &str,
    ) -> Vec<DetectedFeature> {
        let mut detections = Vec::new();
        let root = tree.root_node();
        visit_node(
            &root,
            source,
            rules,
            lookup,
            snippet_radius,
            document_id,
            &mut detections,
        );
        detections
    }
}

#[allow(clippy::too_many_arguments)]
fn visit_node(
    node: &Node,
    source: &str,
    rules: &[&PatternRule],
    lookup: &dyn FeatureLookup,
    snippet_radius: usize,
    document_id: &str,
    detections: &mut Vec<DetectedFeature>,
) {
    for rule in rules {
        let Some(shape) = &rule.syntax_pattern else {
            continue;
        };
        if shape_matches(node, source, shape) {
            emit_detection(node, source, rule, lookup, snippet_radius, document_id, detections);
        }
    }

    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            visit_node(
                &child,
                source,
                rules,
                lookup,
                snippet_radius,
                document_id,
                detections,
            );
        }
    }
}

/// Dispatch to the matcher for the rule's shape variant.
fn shape_matches(node: &Node, source: &str, shape: &SyntaxShape) -> bool {
    match shape {
        SyntaxShape::ConstructorCall { type_name } => {
            matches_constructor_call(node, source, type_name)
        }
        SyntaxShape::MethodCall { receiver, member } => {
            matches_method_call(node, source, receiver.as_deref(), member)
        }
        SyntaxShape::OptionalAccess => matches_optional_access(node),
    }
}

/// `new_expression` whose constructed-type text equals `type_name`.
fn matches_constructor_call(node: &Node, source: &str, type_name: &str) -> bool {
    if node.kind() != "new_expression" {
        return false;
    }
    node.child_by_field_name("constructor")
        .map(|c| node_text(&c, source) == type_name)
        .unwrap_or(false)
}

/// `call_expression` through a member access. The accessed property must
/// equal `member`; a set `receiver` must equal the receiver expression's
/// source text, an unset one matches any receiver.
fn matches_method_call(
    node: &Node,
    source: &str,
    receiver: Option<&str>,
    member: &str,
) -> bool {
    if node.kind() != "call_expression" {
        return false;
    }
    let Some(callee) = node.child_by_field_name("function") else {
        return false;
    };
    if callee.kind() != "member_expression" {
        return false;
    }
    let Some(property) = callee.child_by_field_name("property") else {
        return false;
    };
    if node_text(&property, source) != member {
        return false;
    }
    match receiver {
        Some(expected) => callee
            .child_by_field_name("object")
            .map(|obj| node_text(&obj, source) == expected)
            .unwrap_or(false),
        None => true,
    }
}

/// Member access carrying the grammar's optional-chain token (`?.`).
fn matches_optional_access(node: &Node) -> bool {
    if node.kind() != "member_expression" && node.kind() != "subscript_expression" {
        return false;
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == "optional_chain" {
                return true;
            }
        }
    }
    false
}

fn emit_detection(
    node: &Node,
    source: &str,
    rule: &PatternRule,
    lookup: &dyn FeatureLookup,
    snippet_radius: usize,
    document_id: &str,
    detections: &mut Vec<DetectedFeature>,
) {
    let Some(record) = lookup.get_feature(&rule.feature_id) else {
        let err = DetectError::LookupMiss {
            feature_id: rule.feature_id.clone(),
        };
        tracing::warn!(
            document_id,
            rule_id = rule.id.as_str(),
            error = %err,
            "skipping syntax detection"
        );
        return;
    };

    let start = node.start_position();
    let end = node.end_position();

    detections.push(DetectedFeature {
        feature_id: rule.feature_id.clone(),
        range: SourceRange {
            start_line: start.row as u32,
            start_column: start.column as u32,
            end_line: end.row as u32,
            end_column: end.column as u32,
        },
        confidence: rule.base_confidence,
        severity: record.baseline.severity_hint(),
        context_snippet: snippet_around(source, node.start_byte(), node.end_byte(), snippet_radius),
        method: DetectionMethod::Syntax,
    });
}

/// Extract `radius` characters of context on each side of a byte span,
/// clamped to document bounds and snapped to char boundaries.
fn snippet_around(source: &str, start_byte: usize, end_byte: usize, radius: usize) -> String {
    let mut lo = start_byte.saturating_sub(radius);
    let mut hi = (end_byte + radius).min(source.len());
    while lo > 0 && !source.is_char_boundary(lo) {
        lo -= 1;
    }
    while hi < source.len() && !source.is_char_boundary(hi) {
        hi += 1;
    }
    source[lo..hi].to_string()
}

fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}
