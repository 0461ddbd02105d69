//! Pattern registry — the static, read-only table of feature-detection rules.
//!
//! Rules are data, not behavior. The registry is built once at startup,
//! validated eagerly (malformed rules are fatal there, never per-document),
//! and shared immutably by every analysis afterwards.

pub mod defaults;
pub mod toml_rules;

use baseline_core::errors::RegistryError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::languages::LanguageId;

/// What kind of web-platform surface a rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleCategory {
    Markup,
    Stylesheet,
    Script,
    Api,
}

impl RuleCategory {
    pub fn name(&self) -> &'static str {
        match self {
            RuleCategory::Markup => "markup",
            RuleCategory::Stylesheet => "stylesheet",
            RuleCategory::Script => "script",
            RuleCategory::Api => "api",
        }
    }

    pub fn parse_str(s: &str) -> Option<RuleCategory> {
        match s {
            "markup" => Some(RuleCategory::Markup),
            "stylesheet" => Some(RuleCategory::Stylesheet),
            "script" => Some(RuleCategory::Script),
            "api" => Some(RuleCategory::Api),
            _ => None,
        }
    }
}

/// Structural shape a syntax rule matches against the parse tree.
///
/// Closed set: each variant has exactly one matcher in the syntax matcher.
/// New shapes are new variants, not extra conditions on existing ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxShape {
    /// `new TypeName(...)` where the constructed type matches `type_name`.
    ConstructorCall { type_name: String },
    /// A call through member access. `member` must match the accessed
    /// property; a set `receiver` must match the receiver's source text,
    /// an unset one matches any receiver.
    MethodCall {
        receiver: Option<String>,
        member: String,
    },
    /// A member access carrying an optional-chain token (`?.`).
    OptionalAccess,
}

/// One feature-detection rule. Immutable after registry construction.
///
/// `feature_id` is not unique across rules: several rules may target the
/// same feature through different shapes.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Unique rule identifier, used in logs and validation errors.
    pub id: String,
    pub feature_id: String,
    pub languages: SmallVec<[LanguageId; 4]>,
    pub category: RuleCategory,
    pub base_confidence: f32,
    pub text_pattern: Option<Regex>,
    pub syntax_pattern: Option<SyntaxShape>,
    /// When set, the text matcher runs the line-local context heuristic for
    /// this rule's feature and may discard the match.
    pub context_required: bool,
}

/// A raw, serializable rule definition prior to compilation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    pub id: String,
    pub feature: String,
    pub languages: Vec<String>,
    pub category: String,
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    pub text: Option<String>,
    pub syntax: Option<SyntaxShapeDef>,
    #[serde(default)]
    pub context_required: bool,
    #[serde(default)]
    pub enabled: Option<bool>,
}

fn default_confidence() -> f32 {
    0.70
}

/// Raw structural shape descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxShapeDef {
    /// One of `constructor_call`, `method_call`, `optional_access`.
    pub kind: String,
    pub type_name: Option<String>,
    pub receiver: Option<String>,
    pub member: Option<String>,
}

impl RuleDef {
    /// Compile a raw definition into a validated rule.
    pub fn compile(self) -> Result<PatternRule, RegistryError> {
        if self.feature.trim().is_empty() {
            return Err(RegistryError::EmptyFeatureId { rule_id: self.id });
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(RegistryError::ConfidenceOutOfRange {
                rule_id: self.id,
                confidence: self.confidence,
            });
        }

        let mut languages = SmallVec::new();
        for lang in &self.languages {
            match LanguageId::from_id(lang) {
                Some(l) => {
                    if !languages.contains(&l) {
                        languages.push(l);
                    }
                }
                None => {
                    return Err(RegistryError::UnknownLanguage {
                        rule_id: self.id,
                        language: lang.clone(),
                    });
                }
            }
        }
        if languages.is_empty() {
            return Err(RegistryError::EmptyLanguageSet { rule_id: self.id });
        }

        let category = RuleCategory::parse_str(&self.category).ok_or_else(|| {
            RegistryError::UnknownCategory {
                rule_id: self.id.clone(),
                category: self.category.clone(),
            }
        })?;

        let text_pattern = match &self.text {
            Some(p) if p.is_empty() => {
                return Err(RegistryError::InvalidRegex {
                    rule_id: self.id,
                    message: "empty pattern".to_string(),
                });
            }
            Some(p) => Some(Regex::new(p).map_err(|e| RegistryError::InvalidRegex {
                rule_id: self.id.clone(),
                message: e.to_string(),
            })?),
            None => None,
        };

        let syntax_pattern = match self.syntax {
            Some(def) => Some(compile_shape(&self.id, def)?),
            None => None,
        };

        if text_pattern.is_none() && syntax_pattern.is_none() {
            return Err(RegistryError::NoPattern { rule_id: self.id });
        }

        Ok(PatternRule {
            id: self.id,
            feature_id: self.feature,
            languages,
            category,
            base_confidence: self.confidence,
            text_pattern,
            syntax_pattern,
            context_required: self.context_required,
        })
    }
}

fn compile_shape(rule_id: &str, def: SyntaxShapeDef) -> Result<SyntaxShape, RegistryError> {
    let nonempty = |field: &str, value: Option<String>| -> Result<String, RegistryError> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(RegistryError::IncompleteShape {
                rule_id: rule_id.to_string(),
                message: format!("missing {field}"),
            }),
        }
    };

    match def.kind.as_str() {
        "constructor_call" => Ok(SyntaxShape::ConstructorCall {
            type_name: nonempty("type_name", def.type_name)?,
        }),
        "method_call" => Ok(SyntaxShape::MethodCall {
            receiver: def.receiver.filter(|r| !r.trim().is_empty()),
            member: nonempty("member", def.member)?,
        }),
        "optional_access" => Ok(SyntaxShape::OptionalAccess),
        other => Err(RegistryError::IncompleteShape {
            rule_id: rule_id.to_string(),
            message: format!("unknown shape kind '{other}'"),
        }),
    }
}

/// The validated, immutable rule table.
pub struct PatternRegistry {
    rules: Vec<PatternRule>,
}

impl PatternRegistry {
    /// Build a registry from compiled rules, validating every rule.
    /// Any malformed rule fails the whole construction.
    pub fn new(rules: Vec<PatternRule>) -> Result<Self, RegistryError> {
        let registry = Self { rules };
        registry.validate()?;
        Ok(registry)
    }

    /// Build the registry with the built-in rule set.
    pub fn with_builtin_rules() -> Result<Self, RegistryError> {
        Self::from_defs(defaults::builtin_rule_defs())
    }

    /// Compile raw definitions and build a registry. Definitions with
    /// `enabled = false` are skipped.
    pub fn from_defs(defs: Vec<RuleDef>) -> Result<Self, RegistryError> {
        let mut rules = Vec::with_capacity(defs.len());
        for def in defs {
            if def.enabled == Some(false) {
                continue;
            }
            rules.push(def.compile()?);
        }
        Self::new(rules)
    }

    /// Rules applicable to the given language, in registry order.
    pub fn rules_for(&self, language: LanguageId) -> Vec<&PatternRule> {
        self.rules
            .iter()
            .filter(|r| r.languages.contains(&language))
            .collect()
    }

    /// All rules.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Re-check every rule's invariants. Construction already runs this;
    /// it is public so hosts can assert registry health at startup.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for rule in &self.rules {
            if rule.feature_id.trim().is_empty() {
                return Err(RegistryError::EmptyFeatureId {
                    rule_id: rule.id.clone(),
                });
            }
            if rule.languages.is_empty() {
                return Err(RegistryError::EmptyLanguageSet {
                    rule_id: rule.id.clone(),
                });
            }
            if !(0.0..=1.0).contains(&rule.base_confidence) {
                return Err(RegistryError::ConfidenceOutOfRange {
                    rule_id: rule.id.clone(),
                    confidence: rule.base_confidence,
                });
            }
            if rule.text_pattern.is_none() && rule.syntax_pattern.is_none() {
                return Err(RegistryError::NoPattern {
                    rule_id: rule.id.clone(),
                });
            }
            if let Some(SyntaxShape::ConstructorCall { type_name }) = &rule.syntax_pattern {
                if type_name.trim().is_empty() {
                    return Err(RegistryError::IncompleteShape {
                        rule_id: rule.id.clone(),
                        message: "empty type_name".to_string(),
                    });
                }
            }
            if let Some(SyntaxShape::MethodCall { member, .. }) = &rule.syntax_pattern {
                if member.trim().is_empty() {
                    return Err(RegistryError::IncompleteShape {
                        rule_id: rule.id.clone(),
                        message: "empty member".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
