//! Binding normalization.
//!
//! A component/directive binding can be declared four ways: a bare
//! decorator (`@Input()`), a decorator with a string alias
//! (`@Input('alias')`), a decorator with an option object
//! (`@Input({alias, required})`), or a functional call
//! (`input(...)`, `input.required<T>(...)`, `output(...)`, `model(...)`).
//! All of them normalize into one [`BindingSpec`]; downstream phases never
//! see the origin syntax.

use crate::model::{Member, MemberKind};
use crate::normalize::types::{infer_from_literal, TypeExpr};

/// The normalized superset of binding fields, regardless of syntax.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BindingSpec {
    pub kind: Option<MemberKind>,
    pub alias: Option<String>,
    pub required: bool,
    pub type_raw: Option<String>,
    pub default_value: Option<String>,
}

impl BindingSpec {
    pub fn for_kind(kind: MemberKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// Apply one key of a decorator or functional option object.
    pub fn apply_option(&mut self, key: &str, value: &str) {
        match key {
            "alias" => self.alias = Some(unquote(value).to_string()),
            "required" => self.required = value.trim() == "true",
            _ => {}
        }
    }

    /// Apply a decorator string argument (`@Input('alias')`).
    pub fn apply_string_argument(&mut self, raw: &str) {
        self.alias = Some(unquote(raw).to_string());
    }

    /// Fold the binding record into an extracted member. An alias equal to the
    /// declared name collapses to `None`: the public name already matches.
    pub fn apply_to(self, member: &mut Member) {
        if let Some(kind) = self.kind {
            member.kind = kind;
        }
        member.alias = self.alias.filter(|a| a != &member.name);
        member.required = self.required;
        if let Some(t) = self.type_raw {
            member.type_raw = Some(t);
        }
        if let Some(d) = self.default_value {
            member.default_value = Some(d);
        }
    }
}

/// Classify a functional-call initializer (`input(...)`, `output.required()`,
/// `model(...)`). Returns the binding kind and whether the `.required` form
/// was used.
pub fn classify_functional(callee: &str) -> Option<(MemberKind, bool)> {
    match callee {
        "input" => Some((MemberKind::InputBinding, false)),
        "input.required" => Some((MemberKind::InputBinding, true)),
        "output" => Some((MemberKind::OutputBinding, false)),
        "output.required" => Some((MemberKind::OutputBinding, true)),
        "model" => Some((MemberKind::ModelBinding, false)),
        "model.required" => Some((MemberKind::ModelBinding, true)),
        _ => None,
    }
}

/// Classify a binding decorator name.
pub fn classify_decorator(name: &str) -> Option<MemberKind> {
    match name {
        "Input" => Some(MemberKind::InputBinding),
        "Output" => Some(MemberKind::OutputBinding),
        "Model" => Some(MemberKind::ModelBinding),
        _ => None,
    }
}

/// Derive the normalized type for a member: explicit annotation first, then
/// literal-default inference.
pub fn normalize_member_type(member: &mut Member) {
    if member.type_raw.is_none() {
        if let Some(default) = &member.default_value {
            if let Some(inferred) = infer_from_literal(default) {
                member.type_raw = Some(inferred.to_string());
                member.type_expr = Some(inferred);
                return;
            }
        }
    }
    if let Some(raw) = &member.type_raw {
        member.type_expr = TypeExpr::parse(raw);
    }
}

fn unquote(raw: &str) -> &str {
    raw.trim()
        .trim_matches(|c| c == '\'' || c == '"' || c == '`')
}
