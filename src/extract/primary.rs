//! Structured extraction via tree-sitter
//!
//! The structured parser sits behind the `ComponentParser` trait so any
//! concrete implementation is pluggable. The scan loop treats it as a black
//! box: a failed or malformed parse is converted to an empty result and the
//! regex fallback takes over.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tree_sitter::Node;

use crate::error::{PropscanError, Result};
use crate::lang::Lang;
use crate::schema::PropSpec;

/// Project-level hints consumed only by the structured parser
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    pub root: PathBuf,
    pub flavor: ProjectFlavor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectFlavor {
    TypeScript,
    JavaScript,
    #[default]
    Mixed,
}

impl ProjectDescriptor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            flavor: ProjectFlavor::Mixed,
        }
    }
}

/// Raw per-component output of the structured parser
#[derive(Debug, Clone, Default)]
pub struct RawComponentDoc {
    pub name: String,
    pub props: BTreeMap<String, PropSpec>,
    pub description: String,
    pub export_name: Option<String>,
    pub tags: BTreeMap<String, String>,
}

/// Narrow capability interface for the structured parser
pub trait ComponentParser {
    /// Parse a file into zero or more raw component docs.
    ///
    /// Implementations may fail; callers must treat any `Err` as an empty
    /// result rather than propagating it.
    fn parse(
        &self,
        path: &Path,
        source: &str,
        descriptor: &ProjectDescriptor,
    ) -> Result<Vec<RawComponentDoc>>;
}

/// Default `ComponentParser` built on the tree-sitter TSX/JS grammars
#[derive(Debug, Default)]
pub struct TreeSitterParser;

impl ComponentParser for TreeSitterParser {
    fn parse(
        &self,
        path: &Path,
        source: &str,
        _descriptor: &ProjectDescriptor,
    ) -> Result<Vec<RawComponentDoc>> {
        let lang = Lang::from_path(path)?;

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&lang.tree_sitter_language())
            .map_err(|e| PropscanError::ParseFailure {
                message: format!("Failed to set language for {}: {}", path.display(), e),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| PropscanError::ParseFailure {
                message: format!("Failed to parse file: {}", path.display()),
            })?;

        let root = tree.root_node();
        let type_decls = collect_type_declarations(&root, source);

        let mut docs = Vec::new();
        let mut last_comment: Option<String> = None;

        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            if child.kind() == "comment" {
                last_comment = doc_comment_text(&child, source);
                continue;
            }

            let description = last_comment.take().unwrap_or_default();
            let (decl, exported, default_export) = unwrap_export(&child);

            if let Some(mut doc) = component_from_declaration(&decl, source, &type_decls) {
                doc.description = description;
                if exported {
                    doc.export_name = Some(doc.name.clone());
                    doc.tags.insert(
                        "export".to_string(),
                        if default_export { "default" } else { "named" }.to_string(),
                    );
                }
                docs.push(doc);
            }
        }

        Ok(docs)
    }
}

/// Map of interface/type-alias name to its defining node (same file only)
fn collect_type_declarations<'a>(root: &Node<'a>, source: &str) -> BTreeMap<String, Node<'a>> {
    let mut decls = BTreeMap::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let (decl, _, _) = unwrap_export(&child);
        if matches!(
            decl.kind(),
            "interface_declaration" | "type_alias_declaration"
        ) {
            if let Some(name) = decl.child_by_field_name("name") {
                decls.insert(node_text(&name, source), decl);
            }
        }
    }
    decls
}

/// Unwrap an `export_statement` into (declaration, exported, default)
fn unwrap_export<'a>(node: &Node<'a>) -> (Node<'a>, bool, bool) {
    if node.kind() != "export_statement" {
        return (*node, false, false);
    }

    let mut default_export = false;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "default" {
            default_export = true;
        }
    }

    if let Some(decl) = node.child_by_field_name("declaration") {
        return (decl, true, default_export);
    }
    if let Some(value) = node.child_by_field_name("value") {
        return (value, true, default_export);
    }
    (*node, true, default_export)
}

/// Build a component doc from a top-level declaration, if it looks like one
fn component_from_declaration(
    decl: &Node,
    source: &str,
    type_decls: &BTreeMap<String, Node>,
) -> Option<RawComponentDoc> {
    match decl.kind() {
        "function_declaration" => {
            let name_node = decl.child_by_field_name("name")?;
            let name = node_text(&name_node, source);
            if !is_component_name(&name) {
                return None;
            }
            let props = decl
                .child_by_field_name("parameters")
                .map(|params| props_from_parameters(&params, source, type_decls))
                .unwrap_or_default();
            let mut doc = RawComponentDoc {
                name,
                props,
                ..Default::default()
            };
            doc.tags
                .insert("declaration".to_string(), "function".to_string());
            Some(doc)
        }
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            for child in decl.children(&mut cursor) {
                if child.kind() != "variable_declarator" {
                    continue;
                }
                let name_node = child.child_by_field_name("name")?;
                if name_node.kind() != "identifier" {
                    continue;
                }
                let name = node_text(&name_node, source);
                if !is_component_name(&name) {
                    continue;
                }
                let value = child.child_by_field_name("value")?;
                if let Some(inner) = component_value(&value) {
                    let props = inner
                        .child_by_field_name("parameters")
                        .or_else(|| inner.child_by_field_name("parameter"))
                        .map(|params| props_from_parameters(&params, source, type_decls))
                        .unwrap_or_default();
                    let mut doc = RawComponentDoc {
                        name,
                        props,
                        ..Default::default()
                    };
                    let declaration = if value.kind() == "call_expression" {
                        "wrapped"
                    } else {
                        "arrow"
                    };
                    doc.tags
                        .insert("declaration".to_string(), declaration.to_string());
                    return Some(doc);
                }
            }
            None
        }
        "class_declaration" => {
            let name_node = decl.child_by_field_name("name")?;
            let name = node_text(&name_node, source);
            if !name.chars().next().map(char::is_uppercase).unwrap_or(false) {
                return None;
            }
            let extends_component = decl
                .utf8_text(source.as_bytes())
                .ok()?
                .lines()
                .next()
                .map(|line| line.contains("extends") && line.contains("Component"))
                .unwrap_or(false);
            if !extends_component {
                return None;
            }
            let mut doc = RawComponentDoc {
                name,
                ..Default::default()
            };
            doc.tags
                .insert("declaration".to_string(), "class".to_string());
            Some(doc)
        }
        _ => None,
    }
}

/// Accept capitalized component names and `useXxx` hook names
fn is_component_name(name: &str) -> bool {
    if name.chars().next().map(char::is_uppercase).unwrap_or(false) {
        return true;
    }
    name.starts_with("use")
        && name
            .chars()
            .nth(3)
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
}

/// Resolve the function-like node inside a declarator value
///
/// Handles direct arrow functions and forwardRef/memo call wrappers.
fn component_value<'a>(value: &Node<'a>) -> Option<Node<'a>> {
    match value.kind() {
        "arrow_function" | "function_expression" | "function" => Some(*value),
        "call_expression" => {
            let mut cursor = value.walk();
            let args = value.child_by_field_name("arguments")?;
            for arg in args.children(&mut cursor) {
                if matches!(
                    arg.kind(),
                    "arrow_function" | "function_expression" | "function"
                ) {
                    return Some(arg);
                }
                // memo(forwardRef(...)) nests one level deeper
                if arg.kind() == "call_expression" {
                    if let Some(inner) = component_value(&arg) {
                        return Some(inner);
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// Extract props from the first parameter's type annotation
fn props_from_parameters(
    params: &Node,
    source: &str,
    type_decls: &BTreeMap<String, Node>,
) -> BTreeMap<String, PropSpec> {
    let mut cursor = params.walk();
    for param in params.children(&mut cursor) {
        if !matches!(param.kind(), "required_parameter" | "optional_parameter") {
            continue;
        }
        if let Some(annotation) = param.child_by_field_name("type") {
            if let Some(type_node) = annotation.named_child(0) {
                return props_from_type(&type_node, source, type_decls);
            }
        }
        // Only the first parameter carries props
        break;
    }
    BTreeMap::new()
}

/// Resolve a type node into a prop schema
///
/// Named types are looked up in the same file; inline object types are
/// parsed directly. Anything else yields an empty schema and defers to the
/// regex fallback.
fn props_from_type(
    type_node: &Node,
    source: &str,
    type_decls: &BTreeMap<String, Node>,
) -> BTreeMap<String, PropSpec> {
    match type_node.kind() {
        "type_identifier" => {
            let name = node_text(type_node, source);
            type_decls
                .get(&name)
                .map(|decl| props_from_type_declaration(decl, source))
                .unwrap_or_default()
        }
        "object_type" => props_from_object_type(type_node, source),
        "generic_type" => type_node
            .child_by_field_name("name")
            .map(|name| props_from_type(&name, source, type_decls))
            .unwrap_or_default(),
        _ => BTreeMap::new(),
    }
}

/// Parse members of an interface or type-alias declaration
fn props_from_type_declaration(decl: &Node, source: &str) -> BTreeMap<String, PropSpec> {
    if let Some(body) = decl.child_by_field_name("body") {
        return props_from_object_type(&body, source);
    }
    if let Some(value) = decl.child_by_field_name("value") {
        if value.kind() == "object_type" {
            return props_from_object_type(&value, source);
        }
    }
    BTreeMap::new()
}

/// Parse `property_signature` members of an object type body
fn props_from_object_type(body: &Node, source: &str) -> BTreeMap<String, PropSpec> {
    let mut props = BTreeMap::new();
    let mut pending_doc: Option<String> = None;

    let mut cursor = body.walk();
    for member in body.children(&mut cursor) {
        if member.kind() == "comment" {
            pending_doc = doc_comment_text(&member, source);
            continue;
        }
        if member.kind() != "property_signature" {
            pending_doc = None;
            continue;
        }

        let Some(name_node) = member.child_by_field_name("name") else {
            continue;
        };
        let name = node_text(&name_node, source);

        let mut optional = false;
        let mut member_cursor = member.walk();
        for piece in member.children(&mut member_cursor) {
            if piece.kind() == "?" {
                optional = true;
            }
        }

        let type_label = member
            .child_by_field_name("type")
            .and_then(|annotation| annotation.named_child(0))
            .map(|t| node_text(&t, source))
            .unwrap_or_else(|| "any".to_string());

        let mut spec = PropSpec::new(type_label, !optional);
        if let Some(doc) = pending_doc.take() {
            spec.description = doc;
        }
        props.entry(name).or_insert(spec);
    }

    props
}

/// Extract cleaned text from a `/** ... */` doc comment node
fn doc_comment_text(node: &Node, source: &str) -> Option<String> {
    let raw = node.utf8_text(source.as_bytes()).ok()?;
    if !raw.starts_with("/**") {
        return None;
    }
    Some(clean_doc_comment(raw))
}

/// Strip comment markers and `@tag` trailers from a doc comment
pub fn clean_doc_comment(raw: &str) -> String {
    let inner = raw
        .trim_start_matches("/**")
        .trim_end_matches("*/")
        .trim();

    let mut lines = Vec::new();
    for line in inner.lines() {
        let line = line.trim().trim_start_matches('*').trim();
        if line.starts_with('@') {
            break;
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join(" ")
}

fn node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}
