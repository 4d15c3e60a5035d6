//! Decorator metadata normalization.
//!
//! Decorator arguments are evaluated structurally, never executed: object
//! literals are walked key by key, spreads are resolved against same-file
//! constants, and provider configuration objects are reduced to the
//! identifier they register. Anything dynamic degrades to its raw source
//! text.

use rustc_hash::FxHashMap;
use tree_sitter::Node;

use crate::extract::walk::{named_children, text};
use crate::model::{
    ComponentMetadata, DirectiveMetadata, HostBinding, ModuleMetadata, PipeMetadata,
};

/// Per-file lookup context for structural evaluation. `constants` maps
/// top-level `const` names to their initializer nodes so spreads and
/// shorthand properties can be resolved without executing anything.
pub struct FileContext<'t> {
    pub source: &'t [u8],
    pub constants: FxHashMap<String, Node<'t>>,
}

impl<'t> FileContext<'t> {
    pub fn new(source: &'t [u8]) -> Self {
        Self {
            source,
            constants: FxHashMap::default(),
        }
    }

    fn constant(&self, name: &str) -> Option<Node<'t>> {
        self.constants.get(name).copied()
    }
}

/// Flatten an object literal into ordered `(key, value)` entries.
/// Spread elements referring to same-file constant objects are expanded in
/// place; shorthand properties resolve to the constant they name when one
/// exists.
pub fn object_entries<'t>(obj: &Node<'t>, ctx: &FileContext<'t>) -> Vec<(String, Node<'t>)> {
    let mut entries = Vec::new();
    for child in named_children(obj) {
        match child.kind() {
            "pair" => {
                let key = match child.child_by_field_name("key") {
                    Some(k) => unquote(text(&k, ctx.source)).to_string(),
                    None => continue,
                };
                if let Some(value) = child.child_by_field_name("value") {
                    entries.push((key, value));
                }
            }
            "shorthand_property_identifier" => {
                let key = text(&child, ctx.source).to_string();
                let value = ctx.constant(&key).unwrap_or(child);
                entries.push((key, value));
            }
            "spread_element" => {
                if let Some(inner) = child.named_child(0) {
                    if inner.kind() == "identifier" {
                        if let Some(resolved) = ctx.constant(text(&inner, ctx.source)) {
                            if resolved.kind() == "object" {
                                entries.extend(object_entries(&resolved, ctx));
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
    entries
}

/// Evaluate a metadata value expected to be a string.
pub fn string_value(node: &Node, ctx: &FileContext) -> String {
    let raw = text(node, ctx.source);
    match node.kind() {
        "string" | "template_string" => unquote(raw).to_string(),
        "identifier" => match ctx.constant(raw) {
            Some(resolved) if resolved.id() != node.id() => string_value(&resolved, ctx),
            _ => raw.to_string(),
        },
        _ => raw.trim().to_string(),
    }
}

pub fn bool_value(node: &Node, ctx: &FileContext) -> bool {
    text(node, ctx.source).trim() == "true"
}

/// Evaluate a metadata value expected to be a list of identifiers
/// (`imports`, `declarations`, `providers`, ...). Spread-of-constant is
/// spliced; provider configuration objects reduce to one identifier; calls
/// like `RouterModule.forRoot(...)` reduce to their root identifier.
pub fn list_value(node: &Node, ctx: &FileContext) -> Vec<String> {
    let mut out = Vec::new();
    collect_list(node, ctx, &mut out);
    out
}

fn collect_list(node: &Node, ctx: &FileContext, out: &mut Vec<String>) {
    match node.kind() {
        "array" => {
            for element in named_children(node) {
                collect_element(&element, ctx, out);
            }
        }
        "identifier" => {
            let name = text(node, ctx.source);
            match ctx.constant(name) {
                Some(resolved) if resolved.kind() == "array" => {
                    collect_list(&resolved, ctx, out);
                }
                _ => out.push(name.to_string()),
            }
        }
        _ => out.push(text(node, ctx.source).trim().to_string()),
    }
}

fn collect_element(element: &Node, ctx: &FileContext, out: &mut Vec<String>) {
    match element.kind() {
        "identifier" | "member_expression" => {
            out.push(text(element, ctx.source).to_string());
        }
        "string" | "template_string" => {
            out.push(unquote(text(element, ctx.source)).to_string());
        }
        "object" => {
            out.push(provider_identifier(element, ctx));
        }
        "spread_element" => {
            if let Some(inner) = element.named_child(0) {
                collect_list(&inner, ctx, out);
            }
        }
        "call_expression" => {
            if let Some(callee) = element.child_by_field_name("function") {
                out.push(root_identifier(&callee, ctx));
            }
        }
        "comment" => {}
        _ => {
            out.push(text(element, ctx.source).trim().to_string());
        }
    }
}

/// Reduce a provider configuration object to the identifier it registers.
/// The `use*` side names the implementation, so it wins over the `provide`
/// token; a bare `provide` falls back to the token itself. String tokens
/// lose their quotes.
pub fn provider_identifier(obj: &Node, ctx: &FileContext) -> String {
    let entries = object_entries(obj, ctx);
    for key in ["useClass", "useValue", "useFactory", "useExisting", "provide"] {
        if let Some((_, value)) = entries.iter().find(|(k, _)| k == key) {
            return unquote(text(value, ctx.source).trim()).to_string();
        }
    }
    text(obj, ctx.source).trim().to_string()
}

/// Leftmost identifier of a (possibly chained) callee:
/// `RouterModule.forRoot` → `RouterModule`.
fn root_identifier(callee: &Node, ctx: &FileContext) -> String {
    let mut node = *callee;
    while node.kind() == "member_expression" {
        match node.child_by_field_name("object") {
            Some(object) => node = object,
            None => break,
        }
    }
    text(&node, ctx.source).to_string()
}

/// Ordered `host: {...}` entries. Event keys lose their parentheses and
/// property keys their brackets; duplicate keys are preserved in order.
pub fn host_entries(obj: &Node, ctx: &FileContext) -> Vec<HostBinding> {
    object_entries(obj, ctx)
        .into_iter()
        .map(|(key, value)| HostBinding {
            key: strip_host_key(&key),
            expression: string_value(&value, ctx),
        })
        .collect()
}

fn strip_host_key(key: &str) -> String {
    key.trim()
        .trim_start_matches(['(', '['])
        .trim_end_matches([')', ']'])
        .to_string()
}

pub fn component_metadata(
    obj: &Node,
    ctx: &FileContext,
) -> (ComponentMetadata, Vec<HostBinding>) {
    let mut meta = ComponentMetadata::default();
    let mut host = Vec::new();
    for (key, value) in object_entries(obj, ctx) {
        match key.as_str() {
            "selector" => meta.selector = Some(string_value(&value, ctx)),
            "template" => meta.template = Some(string_value(&value, ctx)),
            "templateUrl" => meta.template_url = Some(string_value(&value, ctx)),
            "styles" => meta.styles = list_value(&value, ctx),
            "styleUrls" => meta.style_urls = list_value(&value, ctx),
            "styleUrl" => meta.style_urls.push(string_value(&value, ctx)),
            "providers" => meta.providers = list_value(&value, ctx),
            "imports" => meta.imports = list_value(&value, ctx),
            "entryComponents" => meta.entry_components = list_value(&value, ctx),
            "hostDirectives" => meta.host_directives = list_value(&value, ctx),
            "exportAs" => meta.export_as = Some(string_value(&value, ctx)),
            "changeDetection" => meta.change_detection = Some(string_value(&value, ctx)),
            "encapsulation" => meta.encapsulation = Some(string_value(&value, ctx)),
            "preserveWhitespaces" => {
                meta.preserve_whitespaces = Some(string_value(&value, ctx))
            }
            "standalone" => meta.standalone = Some(bool_value(&value, ctx)),
            "host" => host = host_entries(&value, ctx),
            _ => {}
        }
    }
    (meta, host)
}

pub fn module_metadata(obj: &Node, ctx: &FileContext) -> ModuleMetadata {
    let mut meta = ModuleMetadata::default();
    for (key, value) in object_entries(obj, ctx) {
        match key.as_str() {
            "imports" => meta.imports = list_value(&value, ctx),
            "declarations" => meta.declarations = list_value(&value, ctx),
            "exports" => meta.exports = list_value(&value, ctx),
            "entryComponents" => meta.entry_components = list_value(&value, ctx),
            "bootstrap" => meta.bootstrap = list_value(&value, ctx),
            "providers" => meta.providers = list_value(&value, ctx),
            "schemas" => meta.schemas = list_value(&value, ctx),
            "id" => meta.id = Some(string_value(&value, ctx)),
            _ => {}
        }
    }
    meta
}

pub fn directive_metadata(
    obj: &Node,
    ctx: &FileContext,
) -> (DirectiveMetadata, Vec<HostBinding>) {
    let mut meta = DirectiveMetadata::default();
    let mut host = Vec::new();
    for (key, value) in object_entries(obj, ctx) {
        match key.as_str() {
            "selector" => meta.selector = Some(string_value(&value, ctx)),
            "providers" => meta.providers = list_value(&value, ctx),
            "hostDirectives" => meta.host_directives = list_value(&value, ctx),
            "exportAs" => meta.export_as = Some(string_value(&value, ctx)),
            "standalone" => meta.standalone = Some(bool_value(&value, ctx)),
            "host" => host = host_entries(&value, ctx),
            _ => {}
        }
    }
    (meta, host)
}

pub fn pipe_metadata(obj: &Node, ctx: &FileContext) -> PipeMetadata {
    let mut meta = PipeMetadata::default();
    for (key, value) in object_entries(obj, ctx) {
        match key.as_str() {
            "name" => meta.name = Some(string_value(&value, ctx)),
            "pure" => meta.pure = Some(bool_value(&value, ctx)),
            "standalone" => meta.standalone = Some(bool_value(&value, ctx)),
            _ => {}
        }
    }
    meta
}

pub fn unquote(raw: &str) -> &str {
    raw.trim()
        .trim_matches(|c| c == '\'' || c == '"' || c == '`')
}
