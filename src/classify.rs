//! Confidence-scored component classifier
//!
//! Scores raw file text against a weighted pattern set and decides whether a
//! file defines a reusable UI component. The score is a pure function of
//! (text, path): re-running on identical input yields an identical result.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Minimum score for a file to be considered a component
pub const SCORE_THRESHOLD: i32 = 3;

/// Per-file classification outcome (diagnostic, not persisted in the store)
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    pub is_component: bool,

    /// Additive confidence score
    pub confidence: i32,

    /// Human-readable dominant cause of the decision
    pub reason: String,

    /// Names of all positive patterns that matched
    pub matched_patterns: Vec<String>,

    pub has_jsx_return: bool,
    pub has_framework_import: bool,
    pub has_props_keyword: bool,
    pub has_hook_calls: bool,
}

static JSX_RETURN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"return\s*\(?\s*<[A-Za-z>/]").unwrap());
static JSX_ARROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"=>\s*\(?\s*<[A-Za-z>/]").unwrap());

static FRAMEWORK_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)(import\s+[^;\n]*from\s+['"]react['"]|require\(\s*['"]react['"]\s*\)|import\s+['"]react['"])"#)
        .unwrap()
});

static PROPS_INTERFACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:interface|type)\s+[A-Za-z0-9_]*Props\b").unwrap());
static PROPS_DESTRUCTURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\{[^}]*\}").unwrap());

static HOOK_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\buse(?:State|Reducer|Effect|LayoutEffect|Ref|Memo|Callback|Context|ImperativeHandle)\s*\(",
    )
    .unwrap()
});

/// Weighted structural patterns; each contributes its weight at most once
static STRUCTURAL_PATTERNS: Lazy<Vec<(&'static str, i32, Regex)>> = Lazy::new(|| {
    vec![
        (
            "exported named function",
            3,
            Regex::new(r"export\s+(?:default\s+)?(?:async\s+)?function\s+[A-Z][A-Za-z0-9_]*")
                .unwrap(),
        ),
        (
            "exported named assignment",
            3,
            Regex::new(r"export\s+(?:const|let|var)\s+[A-Z][A-Za-z0-9_]*\s*(?::[^=\n]+)?=")
                .unwrap(),
        ),
        (
            "bare named assignment",
            2,
            Regex::new(r"(?m)^\s*(?:const|let|var)\s+[A-Z][A-Za-z0-9_]*\s*(?::[^=\n]+)?=")
                .unwrap(),
        ),
        (
            "named function declaration",
            2,
            Regex::new(r"(?m)^\s*(?:async\s+)?function\s+[A-Z][A-Za-z0-9_]*").unwrap(),
        ),
        (
            "forwardRef wrapper",
            4,
            Regex::new(r"(?:React\s*\.\s*)?forwardRef\s*[<(]").unwrap(),
        ),
        (
            "memo wrapper",
            4,
            Regex::new(r"(?:React\s*\.\s*)?\bmemo\s*\(").unwrap(),
        ),
        (
            "class component",
            4,
            Regex::new(
                r"class\s+[A-Z][A-Za-z0-9_]*(?:<[^>\n]*>)?\s+extends\s+(?:React\s*\.\s*)?(?:Pure)?Component",
            )
            .unwrap(),
        ),
        (
            "capitalized arrow assignment",
            2,
            Regex::new(
                r"(?:const|let|var)\s+[A-Z][A-Za-z0-9_]*[^=\n]*=\s*(?:async\s+)?(?:\([^)\n]*\)|[A-Za-z_$][A-Za-z0-9_$]*)\s*=>",
            )
            .unwrap(),
        ),
        (
            "default-export arrow",
            3,
            Regex::new(
                r"export\s+default\s+(?:async\s+)?(?:\([^)\n]*\)|[A-Za-z_$][A-Za-z0-9_$]*)\s*=>",
            )
            .unwrap(),
        ),
    ]
});

const COMPONENT_DIRS: &[&str] = &[
    "component",
    "components",
    "view",
    "views",
    "page",
    "pages",
    "layout",
    "layouts",
];

const UTILITY_DIRS: &[&str] = &["util", "utils", "helper", "helpers", "lib"];

/// Classify a source file as component or not
///
/// Scoring is additive and order-independent; see `DetectionResult` for the
/// diagnostic breakdown.
pub fn classify(source: &str, path: &Path) -> DetectionResult {
    let mut score = 0;
    let mut matched: Vec<String> = Vec::new();

    let has_jsx_return = JSX_RETURN.is_match(source) || JSX_ARROW.is_match(source);
    if has_jsx_return {
        score += 3;
        matched.push("jsx return".to_string());
    }

    let has_framework_import = FRAMEWORK_IMPORT.is_match(source);
    if has_framework_import {
        score += 2;
        matched.push("framework import".to_string());
    }

    for (name, weight, pattern) in STRUCTURAL_PATTERNS.iter() {
        if pattern.is_match(source) {
            score += weight;
            matched.push((*name).to_string());
        }
    }

    let has_props_keyword = PROPS_INTERFACE.is_match(source) || PROPS_DESTRUCTURE.is_match(source);
    if has_props_keyword {
        score += 1;
        matched.push("props keyword".to_string());
    }

    let has_hook_calls = HOOK_CALL.is_match(source);
    if has_hook_calls {
        score += 2;
        matched.push("hook calls".to_string());
    }

    if in_directory_of(path, COMPONENT_DIRS) {
        score += 1;
        matched.push("component directory".to_string());
    }

    let markup_extension = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jsx") | Some("tsx")
    );
    if markup_extension {
        score += 1;
        matched.push("markup extension".to_string());
    }

    if is_hook_file(path) && has_hook_calls && !has_jsx_return {
        score += 1;
        matched.push("hook naming convention".to_string());
    }

    let utility_penalty = in_directory_of(path, UTILITY_DIRS) && !has_jsx_return;
    if utility_penalty {
        score -= 2;
    }

    let config_penalty = is_config_or_test_file(path);
    if config_penalty {
        score -= 3;
    }

    let is_component = score >= SCORE_THRESHOLD;

    let reason = if score == 0 && matched.is_empty() {
        "no patterns detected".to_string()
    } else if config_penalty && !is_component {
        "config or test file".to_string()
    } else if utility_penalty && !is_component {
        "utility path without JSX return".to_string()
    } else if !is_component {
        format!("score {} below threshold {}", score, SCORE_THRESHOLD)
    } else {
        format!("score {}: {}", score, matched.join(", "))
    };

    DetectionResult {
        is_component,
        confidence: score,
        reason,
        matched_patterns: matched,
        has_jsx_return,
        has_framework_import,
        has_props_keyword,
        has_hook_calls,
    }
}

/// Check whether any ancestor directory matches one of the given names
fn in_directory_of(path: &Path, names: &[&str]) -> bool {
    path.parent()
        .map(|parent| {
            parent.components().any(|c| {
                c.as_os_str()
                    .to_str()
                    .map(|s| names.contains(&s.to_lowercase().as_str()))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

/// Check the `useXxx` file naming convention
fn is_hook_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|stem| {
            stem.starts_with("use")
                && stem
                    .chars()
                    .nth(3)
                    .map(|c| c.is_uppercase())
                    .unwrap_or(false)
        })
        .unwrap_or(false)
}

/// Check for config/test/story naming: any dotted name segment is one of
/// `test`, `spec`, `stories`, `config`, or `setup`
fn is_config_or_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| {
            name.split('.')
                .any(|seg| matches!(seg, "test" | "spec" | "stories" | "config" | "setup"))
        })
        .unwrap_or(false)
}
