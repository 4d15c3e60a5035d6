//! Shared tree-sitter node helpers used by the extractor.

use tree_sitter::Node;

/// UTF-8 text of a node, empty on encoding failure.
pub fn text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// 1-based line of a node's start.
pub fn line(node: &Node) -> u32 {
    node.start_position().row as u32 + 1
}

pub fn find_child_by_kind<'a>(node: &Node<'a>, kind: &str) -> Option<Node<'a>> {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                return Some(child);
            }
        }
    }
    None
}

pub fn children_of_kind<'a>(node: &Node<'a>, kind: &str) -> Vec<Node<'a>> {
    let mut out = Vec::new();
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == kind {
                out.push(child);
            }
        }
    }
    out
}

pub fn named_children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut out = Vec::new();
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            out.push(child);
        }
    }
    out
}

/// Whether the node has an anonymous child of the given kind
/// (`static`, `async`, `get`, ...).
pub fn has_keyword(node: &Node, keyword: &str) -> bool {
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if !child.is_named() && child.kind() == keyword {
                return true;
            }
        }
    }
    false
}

/// The type inside a `type_annotation` node (`: T` → `T`), as raw text.
pub fn annotation_type<'a>(annotation: &Node, source: &'a [u8]) -> Option<String> {
    annotation
        .named_child(0)
        .map(|t| text(&t, source).trim().to_string())
}

/// The `/** ... */` block immediately preceding a node, cleaned of comment
/// markers. Line comments and detached blocks are ignored.
pub fn doc_comment_before(node: &Node, source: &[u8]) -> Option<String> {
    let prev = node.prev_sibling()?;
    // The doc block must be the immediate sibling; detached comments and
    // `//` runs are not documentation.
    if prev.kind() != "comment" {
        return None;
    }
    let raw = text(&prev, source);
    if !raw.starts_with("/**") {
        return None;
    }
    Some(clean_doc(raw))
}

/// Name of a decorator: `@Input` and `@Input(...)` both yield `Input`;
/// `@ns.Tag()` yields `ns.Tag`.
pub fn decorator_name(dec: &Node, source: &[u8]) -> String {
    match dec.named_child(0) {
        Some(expr) if expr.kind() == "call_expression" => expr
            .child_by_field_name("function")
            .map(|f| text(&f, source).to_string())
            .unwrap_or_default(),
        Some(expr) => text(&expr, source).to_string(),
        None => String::new(),
    }
}

/// The call node of a decorator, when it was invoked with parentheses.
pub fn decorator_call<'a>(dec: &Node<'a>) -> Option<Node<'a>> {
    dec.named_child(0).filter(|n| n.kind() == "call_expression")
}

/// Named argument nodes of a call expression.
pub fn call_arguments<'a>(call: &Node<'a>) -> Vec<Node<'a>> {
    call.child_by_field_name("arguments")
        .map(|args| named_children(&args))
        .unwrap_or_default()
}

/// Strip `/** */` markers and leading `*` gutters.
pub fn clean_doc(raw: &str) -> String {
    let body = raw
        .trim_start_matches("/**")
        .trim_end_matches("*/")
        .trim_matches('\n');
    let mut lines = Vec::new();
    for line in body.lines() {
        let trimmed = line.trim_start();
        let without_gutter = trimmed
            .strip_prefix("* ")
            .or_else(|| trimmed.strip_prefix('*'))
            .unwrap_or(trimmed);
        lines.push(without_gutter.trim_end());
    }
    lines.join("\n").trim().to_string()
}
