//! Class, interface and enum member extraction.
//!
//! Getter/setter pairs merge into one accessor record. Binding decorators
//! and functional binding initializers both route through
//! [`BindingSpec`](crate::normalize::BindingSpec), so a decorator-declared
//! input and a functional one produce identical members.

use smallvec::SmallVec;
use tree_sitter::Node;

use crate::extract::walk::{
    annotation_type, call_arguments, children_of_kind, decorator_call, decorator_name,
    doc_comment_before, find_child_by_kind, has_keyword, line, named_children, text,
};
use crate::model::{HostBinding, Member, MemberKind, ParameterInfo, Visibility};
use crate::normalize::bindings::{classify_decorator, classify_functional, normalize_member_type};
use crate::normalize::metadata::{object_entries, unquote, FileContext};
use crate::normalize::BindingSpec;

/// Extracted members of a class body, plus host bindings contributed by
/// `@HostBinding`/`@HostListener` member decorators in declaration order.
pub struct ClassMembers {
    pub members: Vec<Member>,
    pub host_bindings: Vec<HostBinding>,
}

pub fn extract_class_members(body: &Node, ctx: &FileContext) -> ClassMembers {
    let mut members: Vec<Member> = Vec::new();
    let mut host_bindings = Vec::new();
    for child in named_children(body) {
        match child.kind() {
            "public_field_definition" | "field_definition" => {
                if let Some(member) = extract_field(&child, ctx, &mut host_bindings) {
                    members.push(member);
                }
            }
            "method_definition" | "abstract_method_signature" | "method_signature" => {
                extract_method(&child, ctx, &mut members, &mut host_bindings);
            }
            "index_signature" => {
                if let Some(member) = extract_index_signature(&child, ctx) {
                    members.push(member);
                }
            }
            _ => {}
        }
    }
    ClassMembers {
        members,
        host_bindings,
    }
}

fn extract_field(
    field: &Node,
    ctx: &FileContext,
    host_bindings: &mut Vec<HostBinding>,
) -> Option<Member> {
    let name_node = field.child_by_field_name("name")?;
    let mut member = Member::new(
        MemberKind::Property,
        unquote(text(&name_node, ctx.source)),
        line(field),
    );
    member.visibility = field_visibility(field, &name_node, ctx.source);
    member.optional = has_keyword(field, "?");
    member.is_static = has_keyword(field, "static");
    member.is_readonly = has_keyword(field, "readonly");
    member.is_abstract = has_keyword(field, "abstract");
    member.doc = doc_comment_before(field, ctx.source);
    if let Some(annotation) = field.child_by_field_name("type") {
        member.type_raw = annotation_type(&annotation, ctx.source);
    }

    let mut spec: Option<BindingSpec> = None;
    for dec in children_of_kind(field, "decorator") {
        let name = decorator_name(&dec, ctx.source);
        if let Some(kind) = classify_decorator(&name) {
            let mut s = BindingSpec::for_kind(kind);
            apply_decorator_arguments(&mut s, &dec, ctx);
            spec = Some(s);
        } else if name == "HostBinding" {
            host_bindings.push(host_binding_from_decorator(&dec, &member.name, ctx));
        } else if name == "HostListener" {
            host_bindings.push(host_listener_from_decorator(&dec, &member.name, ctx));
        }
    }

    if let Some(value) = field.child_by_field_name("value") {
        if let Some(functional) = functional_binding(&value, ctx) {
            spec = Some(functional);
        } else {
            member.default_value = Some(default_text(&value, ctx.source));
        }
    }

    if let Some(spec) = spec {
        spec.apply_to(&mut member);
    }
    normalize_member_type(&mut member);
    Some(member)
}

/// Recognize `input(...)`, `input.required<T>(...)`, `output(...)`,
/// `model(...)` initializers and fold them into a binding spec.
fn functional_binding(value: &Node, ctx: &FileContext) -> Option<BindingSpec> {
    if value.kind() != "call_expression" {
        return None;
    }
    let callee = value.child_by_field_name("function")?;
    let (kind, required) = classify_functional(text(&callee, ctx.source))?;
    let mut spec = BindingSpec::for_kind(kind);
    spec.required = required;

    if let Some(type_args) = value.child_by_field_name("type_arguments") {
        if let Some(arg) = type_args.named_child(0) {
            spec.type_raw = Some(text(&arg, ctx.source).trim().to_string());
        }
    }

    for arg in call_arguments(value) {
        if arg.kind() == "object" {
            for (key, option) in object_entries(&arg, ctx) {
                spec.apply_option(&key, text(&option, ctx.source));
            }
        } else if !required && kind != MemberKind::OutputBinding {
            spec.default_value = Some(default_text(&arg, ctx.source));
        }
    }
    Some(spec)
}

fn apply_decorator_arguments(spec: &mut BindingSpec, dec: &Node, ctx: &FileContext) {
    let Some(call) = decorator_call(dec) else {
        return;
    };
    for arg in call_arguments(&call) {
        match arg.kind() {
            "string" | "template_string" => {
                spec.apply_string_argument(text(&arg, ctx.source));
            }
            "object" => {
                for (key, value) in object_entries(&arg, ctx) {
                    spec.apply_option(&key, text(&value, ctx.source));
                }
            }
            _ => {}
        }
    }
}

fn host_binding_from_decorator(dec: &Node, member_name: &str, ctx: &FileContext) -> HostBinding {
    let key = decorator_call(dec)
        .and_then(|call| call_arguments(&call).into_iter().next())
        .map(|arg| unquote(text(&arg, ctx.source)).to_string())
        .unwrap_or_else(|| member_name.to_string());
    HostBinding {
        key,
        expression: member_name.to_string(),
    }
}

fn host_listener_from_decorator(dec: &Node, member_name: &str, ctx: &FileContext) -> HostBinding {
    let mut key = member_name.to_string();
    let mut args = Vec::new();
    if let Some(call) = decorator_call(dec) {
        for (i, arg) in call_arguments(&call).into_iter().enumerate() {
            if i == 0 {
                key = unquote(text(&arg, ctx.source)).to_string();
            } else if arg.kind() == "array" {
                for element in named_children(&arg) {
                    args.push(unquote(text(&element, ctx.source)).to_string());
                }
            }
        }
    }
    HostBinding {
        key,
        expression: format!("{}({})", member_name, args.join(", ")),
    }
}

fn extract_method(
    node: &Node,
    ctx: &FileContext,
    members: &mut Vec<Member>,
    host_bindings: &mut Vec<HostBinding>,
) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let name = unquote(text(&name_node, ctx.source)).to_string();
    let doc = doc_comment_before(node, ctx.source);
    let return_type = node
        .child_by_field_name("return_type")
        .and_then(|a| annotation_type(&a, ctx.source));
    let parameters = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, ctx))
        .unwrap_or_default();

    for dec in children_of_kind(node, "decorator") {
        let dec_name = decorator_name(&dec, ctx.source);
        if dec_name == "HostListener" {
            host_bindings.push(host_listener_from_decorator(&dec, &name, ctx));
        } else if dec_name == "HostBinding" {
            host_bindings.push(host_binding_from_decorator(&dec, &name, ctx));
        }
    }

    if has_keyword(node, "get") || has_keyword(node, "set") {
        merge_accessor(members, node, ctx, name, doc, return_type, parameters);
        return;
    }

    let mut member = Member::new(MemberKind::Method, name, line(node));
    member.visibility = field_visibility(node, &name_node, ctx.source);
    member.is_static = has_keyword(node, "static");
    member.is_async = has_keyword(node, "async");
    member.is_abstract =
        has_keyword(node, "abstract") || node.kind() == "abstract_method_signature";
    member.optional = has_keyword(node, "?");
    member.doc = doc;
    member.return_type_raw = return_type;
    member.parameters = parameters;
    members.push(member);
}

/// Fold a getter or setter into the accessor member of the same name,
/// creating it on first sight. The getter supplies the type; docs from both
/// halves are kept.
fn merge_accessor(
    members: &mut Vec<Member>,
    node: &Node,
    ctx: &FileContext,
    name: String,
    doc: Option<String>,
    return_type: Option<String>,
    parameters: SmallVec<[ParameterInfo; 4]>,
) {
    let is_getter = has_keyword(node, "get");
    let index = members
        .iter()
        .position(|m| m.kind == MemberKind::Accessor && m.name == name);
    let index = match index {
        Some(i) => i,
        None => {
            let mut m = Member::new(MemberKind::Accessor, name, line(node));
            m.visibility = field_visibility(node, node, ctx.source);
            members.push(m);
            members.len() - 1
        }
    };
    let member = &mut members[index];
    if is_getter {
        if let Some(t) = return_type {
            member.type_raw = Some(t);
        }
    } else if member.type_raw.is_none() {
        if let Some(param) = parameters.first() {
            member.type_raw.clone_from(&param.type_raw);
        }
    }
    if let Some(doc) = doc {
        member.doc = match member.doc.take() {
            Some(existing) => Some(format!("{existing}\n\n{doc}")),
            None => Some(doc),
        };
    }
    normalize_member_type(member);
}

fn extract_index_signature(node: &Node, ctx: &FileContext) -> Option<Member> {
    let raw = text(node, ctx.source);
    let bracket = raw.find(']')?;
    let mut member = Member::new(MemberKind::Property, raw[..=bracket].trim(), line(node));
    member.type_raw = children_of_kind(node, "type_annotation")
        .last()
        .and_then(|a| annotation_type(a, ctx.source));
    member.doc = doc_comment_before(node, ctx.source);
    normalize_member_type(&mut member);
    Some(member)
}

pub fn extract_parameters(params: &Node, ctx: &FileContext) -> SmallVec<[ParameterInfo; 4]> {
    let mut out = SmallVec::new();
    for param in named_children(params) {
        match param.kind() {
            "required_parameter" | "optional_parameter" => {
                let Some(pattern) = param.child_by_field_name("pattern") else {
                    continue;
                };
                let is_rest = pattern.kind() == "rest_pattern";
                let name = if is_rest {
                    pattern
                        .named_child(0)
                        .map(|inner| text(&inner, ctx.source).to_string())
                        .unwrap_or_else(|| text(&pattern, ctx.source).to_string())
                } else {
                    text(&pattern, ctx.source).to_string()
                };
                if name == "this" {
                    continue;
                }
                out.push(ParameterInfo {
                    name,
                    type_raw: param
                        .child_by_field_name("type")
                        .and_then(|a| annotation_type(&a, ctx.source)),
                    optional: param.kind() == "optional_parameter",
                    default_value: param
                        .child_by_field_name("value")
                        .map(|v| default_text(&v, ctx.source)),
                    is_rest,
                });
            }
            _ => {}
        }
    }
    out
}

pub fn extract_interface_members(body: &Node, ctx: &FileContext) -> Vec<Member> {
    let mut members = Vec::new();
    for child in named_children(body) {
        match child.kind() {
            "property_signature" => {
                let Some(name_node) = child.child_by_field_name("name") else {
                    continue;
                };
                let mut member = Member::new(
                    MemberKind::Property,
                    unquote(text(&name_node, ctx.source)),
                    line(&child),
                );
                member.optional = has_keyword(&child, "?");
                member.is_readonly = has_keyword(&child, "readonly");
                member.doc = doc_comment_before(&child, ctx.source);
                if let Some(annotation) = child.child_by_field_name("type") {
                    member.type_raw = annotation_type(&annotation, ctx.source);
                }
                normalize_member_type(&mut member);
                members.push(member);
            }
            "method_signature" => {
                let Some(name_node) = child.child_by_field_name("name") else {
                    continue;
                };
                let mut member = Member::new(
                    MemberKind::Method,
                    unquote(text(&name_node, ctx.source)),
                    line(&child),
                );
                member.optional = has_keyword(&child, "?");
                member.doc = doc_comment_before(&child, ctx.source);
                member.return_type_raw = child
                    .child_by_field_name("return_type")
                    .and_then(|a| annotation_type(&a, ctx.source));
                member.parameters = child
                    .child_by_field_name("parameters")
                    .map(|p| extract_parameters(&p, ctx))
                    .unwrap_or_default();
                members.push(member);
            }
            "index_signature" => {
                if let Some(member) = extract_index_signature(&child, ctx) {
                    members.push(member);
                }
            }
            _ => {}
        }
    }
    members
}

pub fn extract_enum_members(body: &Node, ctx: &FileContext) -> Vec<Member> {
    let mut members = Vec::new();
    for child in named_children(body) {
        match child.kind() {
            "enum_assignment" => {
                let Some(name_node) = child.child_by_field_name("name") else {
                    continue;
                };
                let mut member = Member::new(
                    MemberKind::Property,
                    unquote(text(&name_node, ctx.source)),
                    line(&child),
                );
                member.default_value = child
                    .child_by_field_name("value")
                    .map(|v| text(&v, ctx.source).to_string());
                member.doc = doc_comment_before(&child, ctx.source);
                members.push(member);
            }
            "property_identifier" | "string" => {
                members.push(Member::new(
                    MemberKind::Property,
                    unquote(text(&child, ctx.source)),
                    line(&child),
                ));
            }
            _ => {}
        }
    }
    members
}

/// Visibility of a member. `#name` fields are ECMAScript-private; the
/// `private`/`protected` modifiers come from the accessibility keyword.
fn field_visibility(node: &Node, name_node: &Node, source: &[u8]) -> Visibility {
    if name_node.kind() == "private_property_identifier" {
        return Visibility::EcmascriptPrivate;
    }
    match find_child_by_kind(node, "accessibility_modifier") {
        Some(modifier) => match text(&modifier, source) {
            "private" => Visibility::Private,
            "protected" => Visibility::Protected,
            _ => Visibility::Public,
        },
        None => Visibility::Public,
    }
}

/// Default values render verbatim except arrow functions, which collapse to
/// a placeholder to keep records compact.
fn default_text(node: &Node, source: &[u8]) -> String {
    if node.kind() == "arrow_function" {
        "() => {...}".to_string()
    } else {
        text(node, source).trim().to_string()
    }
}
