//! Language identification from host language ids.

use serde::{Deserialize, Serialize};

/// Languages the detection engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageId {
    JavaScript,
    JavaScriptReact,
    TypeScript,
    TypeScriptReact,
    Css,
    Scss,
    Html,
}

impl LanguageId {
    /// Resolve a host-supplied language id string (editor convention,
    /// e.g. `"typescriptreact"`) to a `LanguageId`.
    pub fn from_id(id: &str) -> Option<LanguageId> {
        match id {
            "javascript" => Some(LanguageId::JavaScript),
            "javascriptreact" => Some(LanguageId::JavaScriptReact),
            "typescript" => Some(LanguageId::TypeScript),
            "typescriptreact" => Some(LanguageId::TypeScriptReact),
            "css" => Some(LanguageId::Css),
            "scss" | "less" => Some(LanguageId::Scss),
            "html" => Some(LanguageId::Html),
            _ => None,
        }
    }

    /// Whether this language gets a structural parse. Markup and stylesheet
    /// languages are handled by the text matcher only.
    pub fn is_program_like(&self) -> bool {
        matches!(
            self,
            LanguageId::JavaScript
                | LanguageId::JavaScriptReact
                | LanguageId::TypeScript
                | LanguageId::TypeScriptReact
        )
    }

    /// The tree-sitter grammar for a program-like language.
    /// Returns `None` for markup/stylesheet languages.
    pub fn ts_language(&self) -> Option<tree_sitter::Language> {
        match self {
            LanguageId::JavaScript | LanguageId::JavaScriptReact => {
                Some(tree_sitter_javascript::LANGUAGE.into())
            }
            LanguageId::TypeScript => {
                Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            }
            LanguageId::TypeScriptReact => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
            LanguageId::Css | LanguageId::Scss | LanguageId::Html => None,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::JavaScript => "JavaScript",
            LanguageId::JavaScriptReact => "JavaScript (JSX)",
            LanguageId::TypeScript => "TypeScript",
            LanguageId::TypeScriptReact => "TypeScript (TSX)",
            LanguageId::Css => "CSS",
            LanguageId::Scss => "SCSS",
            LanguageId::Html => "HTML",
        }
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
