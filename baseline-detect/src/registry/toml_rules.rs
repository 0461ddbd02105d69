//! Declarative TOML rule definitions — user-extensible without recompiling.
//!
//! Custom rules share the compile-and-validate path of the built-in table,
//! so a malformed file fails registry construction the same fatal way.

use std::path::Path;

use baseline_core::errors::RegistryError;
use serde::{Deserialize, Serialize};

use super::{PatternRule, RuleDef};

/// A TOML rule file: a list of `[[rules]]` tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

/// Loader for TOML rule definitions.
pub struct TomlRuleLoader;

impl TomlRuleLoader {
    /// Load and compile rules from a TOML string. Definitions with
    /// `enabled = false` are skipped.
    pub fn load_from_str(toml_str: &str) -> Result<Vec<PatternRule>, RegistryError> {
        let file: RuleFile = toml::from_str(toml_str)
            .map_err(|e| RegistryError::RuleFileParse(format!("TOML parse error: {e}")))?;

        let mut rules = Vec::with_capacity(file.rules.len());
        for def in file.rules {
            if def.enabled == Some(false) {
                continue;
            }
            rules.push(def.compile()?);
        }
        Ok(rules)
    }

    /// Load and compile rules from a file path.
    pub fn load_from_file(path: &Path) -> Result<Vec<PatternRule>, RegistryError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| RegistryError::RuleFileRead {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::load_from_str(&content)
    }
}
