//! Merger: reconcile structured and fallback extraction results
//!
//! The merger owns the provenance tag, the component-type derivation, and
//! the feature flags. Gap-filling rules are applied independently, not as
//! exclusive branches.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::fallback::{self, FallbackResult};
use crate::extract::primary::RawComponentDoc;
use crate::schema::{ComponentType, ExtractionMethod, Feature, PropSpec};

/// Primary descriptions shorter than this trigger description recovery
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Tagged outcome of the extraction attempt for one component
#[derive(Debug, Clone)]
pub enum ExtractionResult {
    /// The structured parser produced a doc
    Automatic(RawComponentDoc),
    /// The structured parser yielded nothing; the cascade ran instead
    Manual(FallbackResult),
}

/// A fully merged component, ready to become a `ComponentRecord`
#[derive(Debug, Clone)]
pub struct MergedComponent {
    pub name: String,
    pub props: BTreeMap<String, PropSpec>,
    pub description: String,
    pub extraction_method: ExtractionMethod,
    pub component_type: ComponentType,
    pub features: Vec<Feature>,
    pub tags: BTreeMap<String, String>,
}

/// Merge an extraction result with fallback gap-filling
///
/// A record stays `Automatic` only when both props and description came from
/// the structured parser; any cascade involvement makes it `Manual`.
pub fn merge(name: &str, source: &str, result: ExtractionResult) -> MergedComponent {
    let (mut props, mut description, mut method, tags) = match result {
        ExtractionResult::Automatic(doc) => (
            doc.props,
            doc.description,
            ExtractionMethod::Automatic,
            doc.tags,
        ),
        ExtractionResult::Manual(fb) => (
            fb.props,
            fb.description,
            ExtractionMethod::Manual,
            BTreeMap::new(),
        ),
    };

    if props.is_empty() {
        let mut recovered = fallback::extract_props(source, name);
        if !recovered.is_empty() {
            fallback::recover_defaults(source, name, &mut recovered);
            for (prop_name, spec) in recovered.iter_mut() {
                if spec.description.is_empty() {
                    spec.description = fallback::prop_description(prop_name, &spec.type_label);
                }
            }
            props = recovered;
            method = ExtractionMethod::Manual;
        }
    }

    if description.trim().len() < MIN_DESCRIPTION_LEN {
        let recovered = fallback::recover_description(source, name);
        if !recovered.is_empty() {
            description = recovered;
            method = ExtractionMethod::Manual;
        }
    }

    MergedComponent {
        name: name.to_string(),
        props,
        description,
        extraction_method: method,
        component_type: component_type(source, name),
        features: detect_features(source),
        tags,
    }
}

// =============================================================================
// Component type and feature derivation
// =============================================================================

static CLASS_EXTENDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"class\s+[A-Z][A-Za-z0-9_]*(?:<[^>\n]*>)?\s+extends\s+(?:React\s*\.\s*)?(?:Pure)?Component")
        .unwrap()
});
static MEMO_WRAPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmemo\s*\(").unwrap());
static FUNCTION_FORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:function\s+[A-Za-z_$]|=>)").unwrap());
static STATE_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:useState|useReducer)\s*\(|this\.state").unwrap());
static MEMO_CALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:memo|useMemo)\s*\(").unwrap());
static EFFECT_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:useEffect|useLayoutEffect)\s*\(").unwrap());

pub fn uses_forward_ref(source: &str) -> bool {
    source.contains("forwardRef")
}

pub fn is_stateful(source: &str) -> bool {
    STATE_CALL.is_match(source)
}

pub fn is_memoized(source: &str) -> bool {
    MEMO_CALL.is_match(source)
}

pub fn has_side_effects(source: &str) -> bool {
    EFFECT_CALL.is_match(source)
}

fn is_hook_name(name: &str) -> bool {
    name.starts_with("use")
        && name
            .chars()
            .nth(3)
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
}

/// Derive the component type by fixed keyword priority:
/// forwardRef > class extends > memo > hook > function/arrow > generic
pub fn component_type(source: &str, name: &str) -> ComponentType {
    if uses_forward_ref(source) {
        ComponentType::ForwardRef
    } else if CLASS_EXTENDS.is_match(source) {
        ComponentType::Class
    } else if MEMO_WRAPPER.is_match(source) {
        ComponentType::Memoized
    } else if is_hook_name(name) {
        ComponentType::Hook
    } else if FUNCTION_FORM.is_match(source) {
        ComponentType::Functional
    } else {
        ComponentType::Generic
    }
}

/// Detect feature flags via independent pattern checks (all matches, not
/// first-match)
pub fn detect_features(source: &str) -> Vec<Feature> {
    let mut features = Vec::new();
    if uses_forward_ref(source) {
        features.push(Feature::RefForwarding);
    }
    if is_stateful(source) {
        features.push(Feature::Stateful);
    }
    if is_memoized(source) {
        features.push(Feature::Memoized);
    }
    if has_side_effects(source) {
        features.push(Feature::Effects);
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn automatic_result_with_full_doc_stays_automatic() {
        let mut doc = RawComponentDoc {
            name: "Button".to_string(),
            description: "A clickable button control.".to_string(),
            ..Default::default()
        };
        doc.props
            .insert("label".to_string(), PropSpec::new("string", true));

        let source = "export function Button(props: ButtonProps) { return <button/>; }";
        let merged = merge("Button", source, ExtractionResult::Automatic(doc));

        assert_eq!(merged.extraction_method, ExtractionMethod::Automatic);
        assert_eq!(merged.description, "A clickable button control.");
        assert!(merged.props.contains_key("label"));
    }

    #[test]
    fn empty_primary_props_fall_back_to_cascade() {
        let doc = RawComponentDoc {
            name: "Button".to_string(),
            description: "A clickable button control.".to_string(),
            ..Default::default()
        };

        let source = "interface ButtonProps { label: string }\nexport function Button(props) { return <button/>; }";
        let merged = merge("Button", source, ExtractionResult::Automatic(doc));

        assert_eq!(merged.extraction_method, ExtractionMethod::Manual);
        assert!(merged.props.contains_key("label"));
        // Cascade props get the per-prop description fallback
        assert!(!merged.props.get("label").unwrap().description.is_empty());
    }

    #[test]
    fn short_primary_description_triggers_recovery() {
        let doc = RawComponentDoc {
            name: "Modal".to_string(),
            description: "x".to_string(),
            ..Default::default()
        };

        let source = "export const Modal = () => <dialog/>;";
        let merged = merge("Modal", source, ExtractionResult::Automatic(doc));

        assert_eq!(merged.extraction_method, ExtractionMethod::Manual);
        assert_eq!(merged.description, "A modal component.");
    }

    #[test]
    fn component_type_priority() {
        assert_eq!(
            component_type("const X = React.forwardRef(memo(() => <div/>));", "X"),
            ComponentType::ForwardRef
        );
        assert_eq!(
            component_type("class X extends React.Component { render() { return <div/>; } }", "X"),
            ComponentType::Class
        );
        assert_eq!(
            component_type("export const X = memo(() => <div/>);", "X"),
            ComponentType::Memoized
        );
        assert_eq!(
            component_type("export function useThing() { return 1; }", "useThing"),
            ComponentType::Hook
        );
        assert_eq!(
            component_type("export const X = () => <div/>;", "X"),
            ComponentType::Functional
        );
        assert_eq!(component_type("export default 5;", "X"), ComponentType::Generic);
    }

    #[test]
    fn features_are_independent() {
        let source = "const C = forwardRef(() => {\n  const [a] = useState(0);\n  useEffect(() => {}, []);\n  const v = useMemo(() => a, [a]);\n  return <div/>;\n});";
        let features = detect_features(source);
        assert_eq!(
            features,
            vec![
                Feature::RefForwarding,
                Feature::Stateful,
                Feature::Memoized,
                Feature::Effects
            ]
        );
    }

    #[test]
    fn no_features_for_plain_component() {
        let source = "export const Plain = () => <div/>;";
        assert!(detect_features(source).is_empty());
    }
}
