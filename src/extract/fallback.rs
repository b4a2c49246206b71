//! Regex fallback extraction cascade
//!
//! Recovers a property schema, default values, and a description when the
//! structured parser yields nothing or an incomplete result. Schema recovery
//! tries source patterns in fixed priority order and short-circuits at the
//! first non-empty match; partial matches from multiple patterns are never
//! merged.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::merge::{
    has_side_effects, is_memoized, is_stateful, uses_forward_ref,
};
use crate::extract::primary::clean_doc_comment;
use crate::schema::{DefaultValue, PropSpec};

/// Output of the fallback cascade for one component
#[derive(Debug, Clone, Default)]
pub struct FallbackResult {
    pub props: BTreeMap<String, PropSpec>,
    pub description: String,
}

/// Run the full cascade: props, then defaults, then description
pub fn extract(source: &str, component_name: &str) -> FallbackResult {
    let mut props = extract_props(source, component_name);
    recover_defaults(source, component_name, &mut props);

    for (name, spec) in props.iter_mut() {
        if spec.description.is_empty() {
            spec.description = prop_description(name, &spec.type_label);
        }
    }

    FallbackResult {
        props,
        description: recover_description(source, component_name),
    }
}

// =============================================================================
// Property schema recovery
// =============================================================================

/// Recover a prop schema by trying candidate source patterns in priority
/// order, stopping at the first pattern that yields a non-empty schema.
pub fn extract_props(source: &str, component_name: &str) -> BTreeMap<String, PropSpec> {
    let name = regex::escape(component_name);

    // Priority order is part of the contract; do not reorder.
    let patterns = [
        format!(r"interface\s+{name}Props(?:\s+extends\s+[^{{]+)?\s*\{{"),
        r"interface\s+Props(?:\s*<[^>]*>)?\s*\{".to_string(),
        format!(r"interface\s+I{name}\b[^{{]*\{{"),
        format!(r"type\s+{name}Props(?:\s*<[^>]*>)?\s*=\s*\{{"),
        r"type\s+Props\s*<[^>]*>\s*=\s*\{".to_string(),
        r"export\s+type\s+Props\s*=\s*\{".to_string(),
        format!(
            r"type\s+{name}Props(?:\s*<[^>]*>)?\s*=\s*[^;{{]*?(?:Omit|Pick|Partial|Exclude|Merge|Overwrite)\s*<"
        ),
    ];

    for pattern in &patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        let Some(m) = re.find(source) else {
            continue;
        };
        // The object body starts at the first `{` at or after the match end
        let open = if source.as_bytes().get(m.end().saturating_sub(1)) == Some(&b'{') {
            Some(m.end() - 1)
        } else {
            source[m.end()..].find('{').map(|off| m.end() + off)
        };
        let Some(open) = open else {
            continue;
        };
        if let Some(block) = brace_block(source, open) {
            let props = parse_props_block(block);
            if !props.is_empty() {
                return props;
            }
        }
    }

    destructured_param_schema(source)
}

/// Extract the text between a balanced `{ ... }` pair
///
/// `open` must be the byte offset of the opening brace.
fn brace_block(source: &str, open: usize) -> Option<&str> {
    let bytes = source.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&source[open + 1..i]);
                }
            }
            _ => {}
        }
    }
    None
}

static PROP_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:readonly\s+)?([A-Za-z_$][A-Za-z0-9_$]*)\s*(\?)?\s*:\s*(.+)$").unwrap()
});

/// Parse the body of a matched props block into individual prop entries
///
/// The block is first split into logical lines (joined while grouping depth
/// is open), then each line into `;`/`,`-separated declarations, so that an
/// inline comment stays attached to the declaration on its line.
fn parse_props_block(block: &str) -> BTreeMap<String, PropSpec> {
    let mut props = BTreeMap::new();
    let mut pending_doc: Option<String> = None;
    let mut doc_buf: Option<String> = None;

    for raw in split_depth0(block, &['\n']) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        // Multi-line doc comment accumulation
        if let Some(mut buf) = doc_buf.take() {
            buf.push('\n');
            buf.push_str(line);
            if line.contains("*/") {
                pending_doc = Some(clean_doc_comment(&buf));
            } else {
                doc_buf = Some(buf);
            }
            continue;
        }
        if line.starts_with("/**") {
            if line.contains("*/") {
                pending_doc = Some(clean_doc_comment(line));
            } else {
                doc_buf = Some(line.to_string());
            }
            continue;
        }
        if line.starts_with("//") || line.starts_with("/*") || line.starts_with('*') {
            continue;
        }

        let (code, inline_comment) = match line.split_once("//") {
            Some((before, after)) => (before.trim_end(), Some(after.trim())),
            None => (line, None),
        };

        let decls = split_depth0(code, &[';', ',']);
        let last = decls.len().saturating_sub(1);
        for (i, decl) in decls.iter().enumerate() {
            let Some(caps) = PROP_DECL.captures(decl) else {
                continue;
            };

            let name = caps[1].to_string();
            let optional = caps.get(2).is_some();
            let type_label = caps[3].trim().trim_end_matches([';', ',']).trim();

            let mut spec = PropSpec::new(type_label, !optional);
            // The inline comment belongs to the last declaration on the line
            if i == last {
                if let Some(comment) = inline_comment.filter(|c| !c.is_empty()) {
                    spec.description = comment.to_string();
                }
            }
            if spec.description.is_empty() {
                if let Some(doc) = pending_doc.take() {
                    spec.description = doc;
                }
            }
            props.entry(name).or_insert(spec);
        }
        pending_doc = None;
    }

    props
}

/// Split text at the given separators, respecting nested `{}`, `<>`, `()`,
/// and `[]` grouping so that only depth-0 separators split
fn split_depth0(text: &str, separators: &[char]) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut brace = 0i32;
    let mut angle = 0i32;
    let mut paren = 0i32;
    let mut bracket = 0i32;
    let mut prev = '\0';

    for c in text.chars() {
        match c {
            '{' => brace += 1,
            '}' => brace -= 1,
            '(' => paren += 1,
            ')' => paren -= 1,
            '[' => bracket += 1,
            ']' => bracket -= 1,
            '<' => angle += 1,
            // Do not treat the arrow in `() => void` as a closing angle
            '>' if prev != '=' && angle > 0 => angle -= 1,
            _ if separators.contains(&c)
                && brace == 0
                && angle == 0
                && paren == 0
                && bracket == 0 =>
            {
                if !current.trim().is_empty() {
                    pieces.push(current.trim().to_string());
                }
                current.clear();
                prev = c;
                continue;
            }
            _ => {}
        }
        current.push(c);
        prev = c;
    }
    if !current.trim().is_empty() {
        pieces.push(current.trim().to_string());
    }
    pieces
}

static DESTRUCTURE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\{").unwrap());

/// Locate the first destructured function-parameter block and return its
/// balanced `{ ... }` body, so nested object/array defaults stay intact
fn destructured_param_block(source: &str) -> Option<&str> {
    let m = DESTRUCTURE_OPEN.find(source)?;
    brace_block(source, m.end() - 1)
}

/// Derive a schema from destructured function-parameter names: each name
/// becomes a required prop with an `any` type label
fn destructured_param_schema(source: &str) -> BTreeMap<String, PropSpec> {
    let mut props = BTreeMap::new();
    let Some(block) = destructured_param_block(source) else {
        return props;
    };

    for entry in split_depth0(block, &[',']) {
        let entry = entry.trim();
        if entry.is_empty() || entry.starts_with("...") {
            continue;
        }
        // Strip defaults (`open = false`) and renames (`value: current`)
        let name = entry
            .split(['=', ':'])
            .next()
            .map(str::trim)
            .unwrap_or_default();
        let valid_start = name.starts_with('_')
            || name.chars().next().map(char::is_alphabetic).unwrap_or(false);
        if !valid_start {
            continue;
        }
        props
            .entry(name.to_string())
            .or_insert_with(|| PropSpec::new("any", true));
    }

    props
}

// =============================================================================
// Default value recovery
// =============================================================================

/// Recover default values from destructured-parameter defaults and
/// `defaultProps` blocks
///
/// A recovered default is assigned into an existing prop entry by name match
/// only; it never creates a new prop entry.
pub fn recover_defaults(
    source: &str,
    component_name: &str,
    props: &mut BTreeMap<String, PropSpec>,
) {
    if props.is_empty() {
        return;
    }

    if let Some(block) = destructured_param_block(source) {
        for entry in split_depth0(block, &[',']) {
            let Some((name, expr)) = entry.split_once('=') else {
                continue;
            };
            let name = name.trim().trim_end_matches('?');
            if let Some(spec) = props.get_mut(name) {
                spec.default_value = Some(DefaultValue::from_expression(expr));
            }
        }
    }

    let default_props = format!(
        r"{}\s*\.\s*defaultProps\s*=\s*\{{",
        regex::escape(component_name)
    );
    if let Ok(re) = Regex::new(&default_props) {
        if let Some(m) = re.find(source) {
            if let Some(block) = brace_block(source, m.end() - 1) {
                for piece in split_depth0(block, &[';', ',', '\n']) {
                    let Some((name, expr)) = piece.split_once(':') else {
                        continue;
                    };
                    let name = name.trim().trim_matches(['\'', '"']);
                    if let Some(spec) = props.get_mut(name) {
                        spec.default_value = Some(DefaultValue::from_expression(expr));
                    }
                }
            }
        }
    }
}

// =============================================================================
// Description recovery
// =============================================================================

/// Recover a component description: doc comment, then trailing line comment,
/// then a synthesized sentence
pub fn recover_description(source: &str, component_name: &str) -> String {
    let name = regex::escape(component_name);

    // Doc comment immediately preceding the declaration, tried against the
    // plain, wrapper, and default-export shapes
    let doc_shapes = [
        format!(
            r"(?s)/\*\*(.*?)\*/\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?(?:function|const|let|var|class)\s+{name}\b"
        ),
        format!(
            r"(?s)/\*\*(.*?)\*/\s*(?:export\s+)?const\s+{name}\s*=\s*(?:React\s*\.\s*)?(?:forwardRef|memo)"
        ),
        r"(?s)/\*\*(.*?)\*/\s*export\s+default\b".to_string(),
    ];
    for shape in &doc_shapes {
        if let Ok(re) = Regex::new(shape) {
            if let Some(caps) = re.captures(source) {
                let cleaned = clean_doc_comment(&format!("/**{}*/", &caps[1]));
                if !cleaned.is_empty() {
                    return cleaned;
                }
            }
        }
    }

    // Single trailing line comment on the declaration line
    let trailing = format!(r"(?:function|const|let|var|class)\s+{name}\b[^\n]*//\s*([^\n]+)");
    if let Ok(re) = Regex::new(&trailing) {
        if let Some(caps) = re.captures(source) {
            let comment = caps[1].trim();
            if !comment.is_empty() {
                return comment.to_string();
            }
        }
    }

    synthesize_description(source, component_name)
}

/// UI-role keywords checked against the component name, most specific first
const ROLE_KEYWORDS: &[&str] = &[
    "input", "button", "form", "modal", "tooltip", "dropdown", "table", "card", "layout", "page",
    "hook",
];

/// Build a natural-language description from detected role and flags
fn synthesize_description(source: &str, component_name: &str) -> String {
    let lowered = component_name.to_lowercase();
    let role = if component_name.starts_with("use") {
        Some("hook")
    } else {
        ROLE_KEYWORDS.iter().copied().find(|k| lowered.contains(k))
    };

    let mut flags = Vec::new();
    if is_stateful(source) {
        flags.push("stateful");
    }
    if uses_forward_ref(source) {
        flags.push("ref-forwarding");
    }
    if is_memoized(source) {
        flags.push("memoized");
    }
    if has_side_effects(source) {
        flags.push("side-effect");
    }

    let base = match role {
        Some("hook") => "A custom hook".to_string(),
        Some(role) => format!("A {} component", role),
        None => "A UI component".to_string(),
    };

    if flags.is_empty() {
        format!("{}.", base)
    } else {
        format!("{} with {} capabilities.", base, flags.join(", "))
    }
}

// =============================================================================
// Per-property description fallback
// =============================================================================

static COMMON_PROP_DESCRIPTIONS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        ("className", "CSS class name applied to the root element"),
        ("children", "Child content rendered inside the component"),
        ("style", "Inline styles applied to the root element"),
        ("id", "DOM id attribute"),
        ("disabled", "Disables user interaction"),
        ("value", "Current value of the component"),
        ("label", "Text label shown to the user"),
        ("title", "Title text"),
        ("placeholder", "Placeholder text shown when empty"),
        ("variant", "Visual variant of the component"),
        ("size", "Size variant of the component"),
    ])
});

/// Description for a prop with no inline comment: common-name lookup, then
/// naming-convention prefixes, then a template by declared type category
pub fn prop_description(name: &str, type_label: &str) -> String {
    if let Some(description) = COMMON_PROP_DESCRIPTIONS.get(name) {
        return (*description).to_string();
    }

    if let Some(event) = prefixed(name, "on") {
        return format!("Callback fired on {} events", event.to_lowercase());
    }
    if let Some(rest) = prefixed(name, "is") {
        return format!("Whether the component is {}", rest.to_lowercase());
    }
    if let Some(rest) = prefixed(name, "has") {
        return format!("Whether the component has {}", rest.to_lowercase());
    }

    let label = type_label.trim();
    if label == "boolean" || label == "bool" {
        format!("Boolean flag controlling {}", name)
    } else if label == "string" {
        format!("Text value for {}", name)
    } else if label == "number" {
        format!("Numeric value for {}", name)
    } else if label.contains("=>") || label.starts_with("function") {
        "Callback function invoked by the component".to_string()
    } else if label.contains('|') {
        format!("One of the allowed values for {}", name)
    } else {
        format!("Value for the {} prop", name)
    }
}

/// Match a camelCase prefix: `onClick` -> Some("Click")
fn prefixed<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    rest.chars()
        .next()
        .filter(|c| c.is_uppercase())
        .map(|_| rest)
}
