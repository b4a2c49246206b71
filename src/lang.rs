//! Language detection and tree-sitter grammar loading
//!
//! propscan only targets the JavaScript/TypeScript family since that is where
//! React components live. Markup-flavored variants (.jsx/.tsx) are tracked
//! separately because the classifier awards them a score bonus.

use std::path::Path;
use tree_sitter::Language;

use crate::error::{PropscanError, Result};

/// Supported source languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
}

impl Lang {
    /// Detect language from file path extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| PropscanError::UnsupportedLanguage {
                extension: "none".to_string(),
            })?;

        Self::from_extension(ext)
    }

    /// Detect language from file extension string
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "ts" | "mts" | "cts" => Ok(Self::TypeScript),
            "tsx" => Ok(Self::Tsx),
            "js" | "mjs" | "cjs" => Ok(Self::JavaScript),
            "jsx" => Ok(Self::Jsx),
            _ => Err(PropscanError::UnsupportedLanguage {
                extension: ext.to_string(),
            }),
        }
    }

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::JavaScript => "javascript",
            Self::Jsx => "jsx",
        }
    }

    /// Get the tree-sitter Language for parsing
    ///
    /// JSX files use the TSX grammar so that JSX syntax and type
    /// annotations both parse without a grammar switch.
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx | Self::Jsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    /// Check if this is a markup-flavored extension (.jsx/.tsx)
    pub fn is_markup_flavored(&self) -> bool {
        matches!(self, Self::Tsx | Self::Jsx)
    }

    /// Default extension allow-list for a scan
    pub fn default_extensions() -> &'static [&'static str] {
        &["ts", "tsx", "js", "jsx"]
    }
}
