//! Top-level declaration extraction.
//!
//! Walks the program tree and classifies every surfaced symbol. Export
//! wrappers are transparent: documentation and decorators attached to the
//! `export` statement belong to the declaration inside it. Namespace bodies
//! are hoisted, so their declarations surface like top-level ones.

use tree_sitter::{Node, Tree};

use scandoc_core::{ResolutionConfig, Warning, WarningKind};

use crate::extract::members::{
    extract_class_members, extract_enum_members, extract_interface_members, extract_parameters,
};
use crate::extract::walk::{
    annotation_type, call_arguments, children_of_kind, decorator_call, decorator_name,
    doc_comment_before, find_child_by_kind, has_keyword, line, named_children, text,
};
use crate::extract::FileExtraction;
use crate::model::{
    Declaration, DeclarationKind, FunctionSignature, Metadata, RouteInfo, SourceFile,
    TypeAliasInfo, VariableInfo,
};
use crate::normalize::metadata::{
    component_metadata, directive_metadata, module_metadata, pipe_metadata, FileContext,
};
use crate::normalize::types::TypeExpr;

pub fn extract(tree: &Tree, file: &SourceFile, config: &ResolutionConfig) -> FileExtraction {
    let source = file.text.as_bytes();
    let root = tree.root_node();
    let mut ctx = FileContext::new(source);
    collect_constants(&root, &mut ctx);

    let mut out = FileExtraction::default();
    walk_statements(&root, file, config, &ctx, &mut out);
    out
}

/// Top-level `const` initializers, keyed by name, for spread and shorthand
/// resolution inside decorator metadata.
fn collect_constants<'t>(root: &Node<'t>, ctx: &mut FileContext<'t>) {
    for child in named_children(root) {
        let decl = if child.kind() == "export_statement" {
            match child.child_by_field_name("declaration") {
                Some(inner) => inner,
                None => continue,
            }
        } else {
            child
        };
        if decl.kind() != "lexical_declaration" && decl.kind() != "variable_declaration" {
            continue;
        }
        for declarator in children_of_kind(&decl, "variable_declarator") {
            let (Some(name), Some(value)) = (
                declarator.child_by_field_name("name"),
                declarator.child_by_field_name("value"),
            ) else {
                continue;
            };
            if name.kind() == "identifier" {
                ctx.constants
                    .insert(text(&name, ctx.source).to_string(), value);
            }
        }
    }
}

fn walk_statements(
    container: &Node,
    file: &SourceFile,
    config: &ResolutionConfig,
    ctx: &FileContext,
    out: &mut FileExtraction,
) {
    for child in named_children(container) {
        match child.kind() {
            "export_statement" => {
                if let Some(decl) = child.child_by_field_name("declaration") {
                    handle_declaration(&decl, Some(&child), file, config, ctx, out);
                } else if let Some(value) = child.child_by_field_name("value") {
                    // `export default function ...` and friends.
                    handle_declaration(&value, Some(&child), file, config, ctx, out);
                }
            }
            // `namespace X { ... }` parses as an expression statement
            // wrapping an `internal_module`; unwrap it so the body hoists.
            "expression_statement" => {
                if let Some(inner) = child.named_child(0) {
                    handle_declaration(&inner, None, file, config, ctx, out);
                }
            }
            "ambient_declaration" => {
                walk_statements(&child, file, config, ctx, out);
            }
            "ERROR" => {
                out.warnings.push(Warning::new(
                    WarningKind::SkippedDeclaration,
                    Some(&file.path),
                    format!("unparseable declaration at line {}", line(&child)),
                ));
            }
            _ => handle_declaration(&child, None, file, config, ctx, out),
        }
    }
}

fn handle_declaration(
    node: &Node,
    outer: Option<&Node>,
    file: &SourceFile,
    config: &ResolutionConfig,
    ctx: &FileContext,
    out: &mut FileExtraction,
) {
    match node.kind() {
        "class_declaration" | "abstract_class_declaration" => {
            extract_class(node, outer, file, config, ctx, out);
        }
        "interface_declaration" => extract_interface(node, outer, file, ctx, out),
        "enum_declaration" => extract_enum(node, outer, file, ctx, out),
        "function_declaration" | "generator_function_declaration" | "function_expression" => {
            extract_function(node, outer, file, ctx, out);
        }
        "lexical_declaration" | "variable_declaration" => {
            extract_variables(node, outer, file, ctx, out);
        }
        "type_alias_declaration" => extract_type_alias(node, outer, file, ctx, out),
        // Namespace bodies hoist: their statements surface like top-level
        // ones, recursively for nested namespaces.
        "internal_module" | "module" => {
            if let Some(body) = node.child_by_field_name("body") {
                walk_statements(&body, file, config, ctx, out);
            }
        }
        _ => {}
    }
}

const FRAMEWORK_DECORATORS: [(&str, DeclarationKind); 5] = [
    ("Component", DeclarationKind::Component),
    ("NgModule", DeclarationKind::Module),
    ("Directive", DeclarationKind::Directive),
    ("Pipe", DeclarationKind::Pipe),
    ("Injectable", DeclarationKind::Injectable),
];

fn extract_class(
    node: &Node,
    outer: Option<&Node>,
    file: &SourceFile,
    config: &ResolutionConfig,
    ctx: &FileContext,
    out: &mut FileExtraction,
) {
    let Some(name_node) = node.child_by_field_name("name") else {
        out.warnings.push(Warning::new(
            WarningKind::SkippedDeclaration,
            Some(&file.path),
            format!("class without a name at line {}", line(node)),
        ));
        return;
    };
    let mut decl = Declaration::new(
        DeclarationKind::Class,
        text(&name_node, ctx.source),
        file.path.clone(),
        line(node),
    );
    decl.doc = doc_comment_before(outer.unwrap_or(node), ctx.source);
    decl.type_parameters = type_parameter_names(node, ctx);

    if let Some(heritage) = find_child_by_kind(node, "class_heritage") {
        if let Some(extends) = find_child_by_kind(&heritage, "extends_clause") {
            decl.extends = extends
                .named_child(0)
                .map(|parent| text(&parent, ctx.source).to_string());
        }
        if let Some(implements) = find_child_by_kind(&heritage, "implements_clause") {
            decl.implements = named_children(&implements)
                .iter()
                .map(|n| text(n, ctx.source).to_string())
                .collect();
        }
    }

    decl.is_guard = decl
        .implements
        .iter()
        .any(|name| config.is_guard_interface(base_name(name)));

    let mut framework: Option<DeclarationKind> = None;
    let mut decorators = children_of_kind(node, "decorator");
    if let Some(outer) = outer {
        decorators.extend(children_of_kind(outer, "decorator"));
    }
    for dec in &decorators {
        let name = decorator_name(dec, ctx.source);
        let known = FRAMEWORK_DECORATORS.iter().find(|(n, _)| *n == name);
        match known {
            Some((_, kind)) if framework.is_none() => {
                framework = Some(*kind);
                let arg = decorator_call(dec)
                    .and_then(|call| call_arguments(&call).into_iter().next());
                if let Some(arg) = &arg {
                    if arg.kind() != "object" {
                        out.warnings.push(Warning::new(
                            WarningKind::MalformedMetadata,
                            Some(&file.path),
                            format!("'{}': @{} argument is not an object literal", decl.name, name),
                        ));
                    }
                }
                let arg = arg.filter(|a| a.kind() == "object");
                apply_framework_metadata(&mut decl, *kind, arg.as_ref(), ctx);
            }
            Some(_) => {}
            None => decl
                .custom_decorators
                .push(text(dec, ctx.source).to_string()),
        }
    }

    // A routing capability outranks @Injectable but never a template
    // decorator.
    decl.kind = match framework {
        Some(kind @ DeclarationKind::Component)
        | Some(kind @ DeclarationKind::Module)
        | Some(kind @ DeclarationKind::Directive)
        | Some(kind @ DeclarationKind::Pipe) => kind,
        Some(DeclarationKind::Injectable) if decl.is_guard => DeclarationKind::Guard,
        Some(DeclarationKind::Injectable) => DeclarationKind::Injectable,
        _ if decl.is_guard => DeclarationKind::Guard,
        _ => DeclarationKind::Class,
    };

    if let Some(body) = node.child_by_field_name("body") {
        let extracted = extract_class_members(&body, ctx);
        decl.members = extracted.members;
        decl.host_bindings.extend(extracted.host_bindings);
    }
    warn_unprintable(&decl, file, out);
    out.declarations.push(decl);
}

fn apply_framework_metadata(
    decl: &mut Declaration,
    kind: DeclarationKind,
    arg: Option<&Node>,
    ctx: &FileContext,
) {
    match kind {
        DeclarationKind::Component => {
            let (meta, host) = match arg {
                Some(obj) => component_metadata(obj, ctx),
                None => Default::default(),
            };
            decl.standalone = meta.standalone.unwrap_or(false);
            decl.host_bindings = host;
            decl.metadata = Metadata::Component(meta);
        }
        DeclarationKind::Module => {
            let meta = match arg {
                Some(obj) => module_metadata(obj, ctx),
                None => Default::default(),
            };
            decl.metadata = Metadata::Module(meta);
        }
        DeclarationKind::Directive => {
            let (meta, host) = match arg {
                Some(obj) => directive_metadata(obj, ctx),
                None => Default::default(),
            };
            decl.standalone = meta.standalone.unwrap_or(false);
            decl.host_bindings = host;
            decl.metadata = Metadata::Directive(meta);
        }
        DeclarationKind::Pipe => {
            let meta = match arg {
                Some(obj) => pipe_metadata(obj, ctx),
                None => Default::default(),
            };
            decl.standalone = meta.standalone.unwrap_or(false);
            decl.metadata = Metadata::Pipe(meta);
        }
        _ => {}
    }
}

fn extract_interface(
    node: &Node,
    outer: Option<&Node>,
    file: &SourceFile,
    ctx: &FileContext,
    out: &mut FileExtraction,
) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let mut decl = Declaration::new(
        DeclarationKind::Interface,
        text(&name_node, ctx.source),
        file.path.clone(),
        line(node),
    );
    decl.doc = doc_comment_before(outer.unwrap_or(node), ctx.source);
    decl.type_parameters = type_parameter_names(node, ctx);
    if let Some(extends) = find_child_by_kind(node, "extends_type_clause") {
        decl.extends_interfaces = named_children(&extends)
            .iter()
            .map(|n| text(n, ctx.source).to_string())
            .collect();
    }
    if let Some(body) = node.child_by_field_name("body") {
        decl.members = extract_interface_members(&body, ctx);
    }
    warn_unprintable(&decl, file, out);
    out.declarations.push(decl);
}

fn extract_enum(
    node: &Node,
    outer: Option<&Node>,
    file: &SourceFile,
    ctx: &FileContext,
    out: &mut FileExtraction,
) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let mut decl = Declaration::new(
        DeclarationKind::Enum,
        text(&name_node, ctx.source),
        file.path.clone(),
        line(node),
    );
    decl.doc = doc_comment_before(outer.unwrap_or(node), ctx.source);
    if let Some(body) = node.child_by_field_name("body") {
        decl.members = extract_enum_members(&body, ctx);
    }
    out.declarations.push(decl);
}

fn extract_function(
    node: &Node,
    outer: Option<&Node>,
    file: &SourceFile,
    ctx: &FileContext,
    out: &mut FileExtraction,
) {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(&n, ctx.source).to_string())
        .unwrap_or_else(|| "Unnamed".to_string());
    let mut decl = Declaration::new(
        DeclarationKind::Function,
        name,
        file.path.clone(),
        line(node),
    );
    decl.doc = doc_comment_before(outer.unwrap_or(node), ctx.source);
    decl.type_parameters = type_parameter_names(node, ctx);
    let signature = FunctionSignature {
        parameters: node
            .child_by_field_name("parameters")
            .map(|p| extract_parameters(&p, ctx).into_vec())
            .unwrap_or_default(),
        return_type_raw: node
            .child_by_field_name("return_type")
            .and_then(|a| annotation_type(&a, ctx.source)),
        type_parameters: decl.type_parameters.clone(),
        is_async: has_keyword(node, "async"),
    };
    decl.metadata = Metadata::Function(signature);
    out.declarations.push(decl);
}

fn extract_variables(
    node: &Node,
    outer: Option<&Node>,
    file: &SourceFile,
    ctx: &FileContext,
    out: &mut FileExtraction,
) {
    for declarator in children_of_kind(node, "variable_declarator") {
        let Some(name_node) = declarator.child_by_field_name("name") else {
            continue;
        };
        let name = text(&name_node, ctx.source).to_string();
        let type_raw = declarator
            .child_by_field_name("type")
            .and_then(|a| annotation_type(&a, ctx.source));
        let value = declarator.child_by_field_name("value");

        // A `Routes`-typed table surfaces as a route document rather than a
        // plain variable.
        if matches!(type_raw.as_deref(), Some("Routes") | Some("Route[]")) {
            let mut decl = Declaration::new(
                DeclarationKind::Route,
                name,
                file.path.clone(),
                line(&declarator),
            );
            decl.doc = doc_comment_before(outer.unwrap_or(node), ctx.source);
            decl.metadata = Metadata::Route(RouteInfo {
                raw: value
                    .map(|v| text(&v, ctx.source).to_string())
                    .unwrap_or_default(),
            });
            out.declarations.push(decl);
            continue;
        }

        let mut decl = Declaration::new(
            DeclarationKind::Variable,
            name,
            file.path.clone(),
            line(&declarator),
        );
        decl.doc = doc_comment_before(outer.unwrap_or(node), ctx.source);
        decl.metadata = Metadata::Variable(VariableInfo {
            type_raw,
            default_value: value.map(|v| {
                if v.kind() == "arrow_function" {
                    "() => {...}".to_string()
                } else {
                    text(&v, ctx.source).trim().to_string()
                }
            }),
        });
        out.declarations.push(decl);
    }
}

fn extract_type_alias(
    node: &Node,
    outer: Option<&Node>,
    file: &SourceFile,
    ctx: &FileContext,
    out: &mut FileExtraction,
) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let Some(value) = node.child_by_field_name("value") else {
        return;
    };
    let raw = text(&value, ctx.source).trim().to_string();
    let aliased = TypeExpr::parse(&raw);
    if aliased.is_none() {
        out.warnings.push(Warning::new(
            WarningKind::UnprintableType,
            Some(&file.path),
            format!(
                "type alias '{}' kept as raw text",
                text(&name_node, ctx.source)
            ),
        ));
    }
    let mut decl = Declaration::new(
        DeclarationKind::TypeAlias,
        text(&name_node, ctx.source),
        file.path.clone(),
        line(node),
    );
    decl.doc = doc_comment_before(outer.unwrap_or(node), ctx.source);
    decl.type_parameters = type_parameter_names(node, ctx);
    decl.metadata = Metadata::TypeAlias(TypeAliasInfo {
        aliased_raw: raw,
        aliased,
    });
    out.declarations.push(decl);
}

fn type_parameter_names(node: &Node, ctx: &FileContext) -> Vec<String> {
    node.child_by_field_name("type_parameters")
        .map(|params| {
            named_children(&params)
                .iter()
                .map(|p| text(p, ctx.source).to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Generic base of a heritage reference: `Resolve<Hero>` → `Resolve`.
pub fn base_name(reference: &str) -> &str {
    reference.split('<').next().unwrap_or(reference).trim()
}

/// One warning per member whose annotation could not be printed; the member
/// keeps its raw text either way.
fn warn_unprintable(decl: &Declaration, file: &SourceFile, out: &mut FileExtraction) {
    for member in &decl.members {
        if let (Some(raw), None) = (&member.type_raw, &member.type_expr) {
            out.warnings.push(Warning::new(
                WarningKind::UnprintableType,
                Some(&file.path),
                format!(
                    "type of '{}.{}' kept as raw text: {}",
                    decl.name, member.name, raw
                ),
            ));
        }
    }
}
