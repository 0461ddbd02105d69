//! Feature lookup service — resolves a feature id to support metadata.
//!
//! The engine treats this as an injected read-only collaborator. The real
//! host wires in a lookup backed by its support dataset; tests and the
//! built-in rules use [`StaticFeatureLookup`].

use baseline_core::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::types::SeverityHint;

/// Three-tier browser-support classification, plus unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaselineStatus {
    /// Widely available across the major browsers.
    Widely,
    /// Newly available: interoperable but recent.
    Newly,
    /// Limited availability: missing in at least one major browser.
    Limited,
    /// Not classified by the support dataset.
    Unknown,
}

impl BaselineStatus {
    /// Severity suggested for an occurrence of a feature with this status.
    pub fn severity_hint(&self) -> SeverityHint {
        match self {
            BaselineStatus::Limited => SeverityHint::Warning,
            BaselineStatus::Newly => SeverityHint::Information,
            BaselineStatus::Widely => SeverityHint::Hint,
            BaselineStatus::Unknown => SeverityHint::Information,
        }
    }
}

/// Per-browser availability entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserSupport {
    pub browser: String,
    pub version: String,
}

/// Support metadata for one web-platform feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub feature_id: String,
    pub name: String,
    pub baseline: BaselineStatus,
    #[serde(default)]
    pub support: Vec<BrowserSupport>,
    /// Share of page loads using the feature, if the dataset tracks it.
    pub usage_percent: Option<f32>,
    pub spec_url: Option<String>,
}

/// Pure, side-effect-free feature metadata lookup.
pub trait FeatureLookup: Send + Sync {
    fn get_feature(&self, feature_id: &str) -> Option<FeatureRecord>;
}

/// In-memory lookup over a fixed table.
pub struct StaticFeatureLookup {
    features: FxHashMap<String, FeatureRecord>,
}

impl StaticFeatureLookup {
    /// Build a lookup from an explicit record list.
    pub fn new(records: Vec<FeatureRecord>) -> Self {
        let mut features = FxHashMap::default();
        for record in records {
            features.insert(record.feature_id.clone(), record);
        }
        Self { features }
    }

    /// Lookup table covering every feature targeted by the built-in rules.
    pub fn with_builtin_features() -> Self {
        Self::new(builtin_features())
    }

    /// Number of known features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FeatureLookup for StaticFeatureLookup {
    fn get_feature(&self, feature_id: &str) -> Option<FeatureRecord> {
        self.features.get(feature_id).cloned()
    }
}

fn record(
    feature_id: &str,
    name: &str,
    baseline: BaselineStatus,
    spec_url: &str,
) -> FeatureRecord {
    FeatureRecord {
        feature_id: feature_id.to_string(),
        name: name.to_string(),
        baseline,
        support: Vec::new(),
        usage_percent: None,
        spec_url: Some(spec_url.to_string()),
    }
}

/// Baseline statuses for the features the built-in rules target.
fn builtin_features() -> Vec<FeatureRecord> {
    vec![
        record(
            "urlpattern",
            "URLPattern",
            BaselineStatus::Limited,
            "https://urlpattern.spec.whatwg.org/",
        ),
        record(
            "structured-clone",
            "structuredClone()",
            BaselineStatus::Widely,
            "https://html.spec.whatwg.org/multipage/structured-data.html",
        ),
        record(
            "async-clipboard",
            "Async Clipboard API",
            BaselineStatus::Newly,
            "https://w3c.github.io/clipboard-apis/",
        ),
        record(
            "abortsignal-timeout",
            "AbortSignal.timeout()",
            BaselineStatus::Widely,
            "https://dom.spec.whatwg.org/#interface-abortsignal",
        ),
        record(
            "optional-chaining",
            "Optional chaining",
            BaselineStatus::Widely,
            "https://tc39.es/ecma262/#sec-optional-chains",
        ),
        record(
            "private-class-fields",
            "Private class fields",
            BaselineStatus::Widely,
            "https://tc39.es/ecma262/#sec-private-names",
        ),
        record(
            "top-level-await",
            "Top-level await",
            BaselineStatus::Widely,
            "https://tc39.es/ecma262/#sec-modules",
        ),
        record(
            "array-at",
            "Array.prototype.at()",
            BaselineStatus::Widely,
            "https://tc39.es/ecma262/#sec-array.prototype.at",
        ),
        record(
            "backdrop-filter",
            "backdrop-filter",
            BaselineStatus::Widely,
            "https://drafts.fxtf.org/filter-effects-2/",
        ),
        record(
            "has",
            ":has() selector",
            BaselineStatus::Newly,
            "https://drafts.csswg.org/selectors-4/#relational",
        ),
        record(
            "container-queries",
            "Container queries",
            BaselineStatus::Newly,
            "https://drafts.csswg.org/css-contain-3/",
        ),
        record(
            "subgrid",
            "Subgrid",
            BaselineStatus::Newly,
            "https://drafts.csswg.org/css-grid-2/",
        ),
        record(
            "text-wrap-balance",
            "text-wrap: balance",
            BaselineStatus::Limited,
            "https://drafts.csswg.org/css-text-4/",
        ),
        record(
            "dialog",
            "<dialog> element",
            BaselineStatus::Widely,
            "https://html.spec.whatwg.org/multipage/interactive-elements.html",
        ),
        record(
            "popover",
            "Popover API",
            BaselineStatus::Newly,
            "https://html.spec.whatwg.org/multipage/popover.html",
        ),
        record(
            "loading-lazy",
            "Lazy loading",
            BaselineStatus::Widely,
            "https://html.spec.whatwg.org/multipage/urls-and-fetching.html",
        ),
    ]
}
