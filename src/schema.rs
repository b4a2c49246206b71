//! Data model for the component document store

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current document store schema version
/// 1.1 - Added per-directory counts to the run summary
/// 1.2 - Default values carry a `computed` flag for non-literal expressions
pub const STORE_VERSION: &str = "1.2";

/// Provenance of a record's props and description
///
/// `Automatic` means both came from the structured parser; any cascade
/// involvement (fallback props, recovered or synthesized description)
/// makes the record `Manual`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    Automatic,
    #[default]
    Manual,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Manual => "manual",
        }
    }
}

/// Structural kind of a component, by fixed keyword priority:
/// forwardRef > class extends > memo > hook > function/arrow > generic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Functional,
    ForwardRef,
    Class,
    Memoized,
    Hook,
    #[default]
    Generic,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::ForwardRef => "forward_ref",
            Self::Class => "class",
            Self::Memoized => "memoized",
            Self::Hook => "hook",
            Self::Generic => "generic",
        }
    }
}

/// Behavioral feature flags, detected independently (non-exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    RefForwarding,
    Stateful,
    Memoized,
    Effects,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RefForwarding => "ref_forwarding",
            Self::Stateful => "stateful",
            Self::Memoized => "memoized",
            Self::Effects => "effects",
        }
    }
}

/// A recovered default value for a prop
///
/// `computed` marks defaults that are expressions rather than literals
/// (function calls, identifiers, member accesses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultValue {
    pub value: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,
}

impl DefaultValue {
    /// Build a default value, classifying the expression as literal or computed
    pub fn from_expression(expr: &str) -> Self {
        let trimmed = expr.trim();
        let computed = !is_literal(trimmed);
        Self {
            value: trimmed.to_string(),
            computed,
        }
    }
}

/// Whether an expression is a plain literal (string, number, boolean,
/// null/undefined, or an empty array/object)
fn is_literal(expr: &str) -> bool {
    if expr.is_empty() {
        return false;
    }
    if matches!(expr, "true" | "false" | "null" | "undefined" | "[]" | "{}") {
        return true;
    }
    if expr.parse::<f64>().is_ok() {
        return true;
    }
    let bytes = expr.as_bytes();
    let quoted = |q: u8| bytes.len() >= 2 && bytes[0] == q && bytes[bytes.len() - 1] == q;
    quoted(b'"') || quoted(b'\'') || quoted(b'`')
}

/// Schema entry for a single component prop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropSpec {
    /// Best-effort text capture of the declared type
    #[serde(rename = "type")]
    pub type_label: String,

    pub required: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

impl PropSpec {
    pub fn new(type_label: impl Into<String>, required: bool) -> Self {
        Self {
            type_label: type_label.into(),
            required,
            description: String::new(),
            default_value: None,
        }
    }
}

/// One extracted component, keyed by (file, name) within a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Resolved display name (never empty)
    pub name: String,

    /// Path relative to the scan root
    pub file: String,

    /// Parent directory of `file`
    pub directory: String,

    /// Property schema, keyed by unique prop name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, PropSpec>,

    /// Free-text description; empty only when no heuristic matched
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Bounded prefix of the file text, retained for downstream chunking
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_excerpt: String,

    pub extraction_method: ExtractionMethod,

    pub component_type: ComponentType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,

    /// Opaque tags passed through from the structured parser
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

/// Aggregate counts for a scan run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Candidate files examined (classifier ran on them)
    pub files_scanned: usize,

    /// Files rejected by the classifier
    pub files_skipped: usize,

    /// Files that could not be read or processed
    pub files_failed: usize,

    pub components_found: usize,

    pub with_props: usize,
    pub without_props: usize,
    pub with_description: usize,
    pub without_description: usize,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_method: BTreeMap<String, usize>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_type: BTreeMap<String, usize>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_directory: BTreeMap<String, usize>,
}

impl RunSummary {
    /// Fold one finalized record into the counters
    pub fn record(&mut self, record: &ComponentRecord) {
        self.components_found += 1;

        if record.props.is_empty() {
            self.without_props += 1;
        } else {
            self.with_props += 1;
        }
        if record.description.is_empty() {
            self.without_description += 1;
        } else {
            self.with_description += 1;
        }

        *self
            .by_method
            .entry(record.extraction_method.as_str().to_string())
            .or_insert(0) += 1;
        *self
            .by_type
            .entry(record.component_type.as_str().to_string())
            .or_insert(0) += 1;

        // Root-level files have an empty directory and are not counted
        let top_level = record
            .directory
            .split(['/', '\\'])
            .next()
            .unwrap_or("")
            .to_string();
        if !top_level.is_empty() {
            *self.by_directory.entry(top_level).or_insert(0) += 1;
        }
    }
}

/// The single output artifact: metadata envelope plus sorted records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStore {
    /// Generation timestamp (RFC 3339)
    pub generated_at: String,

    /// Extractor version tag
    pub version: String,

    pub summary: RunSummary,

    pub components: Vec<ComponentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, file: &str) -> ComponentRecord {
        let directory = file
            .rsplit_once('/')
            .map(|(dir, _)| dir.to_string())
            .unwrap_or_default();
        ComponentRecord {
            name: name.to_string(),
            file: file.to_string(),
            directory,
            props: BTreeMap::new(),
            description: String::new(),
            raw_excerpt: String::new(),
            extraction_method: ExtractionMethod::Manual,
            component_type: ComponentType::Functional,
            features: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    #[test]
    fn test_default_value_literals() {
        assert!(!DefaultValue::from_expression("42").computed);
        assert!(!DefaultValue::from_expression("'primary'").computed);
        assert!(!DefaultValue::from_expression("true").computed);
        assert!(!DefaultValue::from_expression("[]").computed);
        assert!(DefaultValue::from_expression("getDefaults()").computed);
        assert!(DefaultValue::from_expression("theme.primary").computed);
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = RunSummary::default();

        let mut with_props = record("Button", "components/Button.tsx");
        with_props
            .props
            .insert("label".to_string(), PropSpec::new("string", true));
        with_props.description = "A button".to_string();
        summary.record(&with_props);

        let bare = record("Card", "components/Card.tsx");
        summary.record(&bare);

        assert_eq!(summary.components_found, 2);
        assert_eq!(summary.with_props, 1);
        assert_eq!(summary.without_props, 1);
        assert_eq!(summary.with_description, 1);
        assert_eq!(summary.without_description, 1);
        assert_eq!(summary.by_method.get("manual"), Some(&2));
        assert_eq!(summary.by_directory.get("components"), Some(&2));
    }

    #[test]
    fn test_root_level_files_have_no_directory_count() {
        let mut summary = RunSummary::default();
        summary.record(&record("App", "App.tsx"));
        summary.record(&record("Button", "components/Button.tsx"));

        assert_eq!(summary.components_found, 2);
        assert!(summary.by_directory.get("App.tsx").is_none());
        assert_eq!(summary.by_directory.get("components"), Some(&1));
    }

    #[test]
    fn test_prop_spec_serialization_skips_empty_fields() {
        let spec = PropSpec::new("string", true);
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["type"], "string");
        assert_eq!(json["required"], true);
        assert!(json.get("description").is_none());
        assert!(json.get("default_value").is_none());
    }
}
