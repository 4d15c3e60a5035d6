//! Canonical documentation model types.
//!
//! This is the single source of truth for extraction output. Every
//! downstream phase (registry, resolver, search, graph) consumes these
//! structs; nothing else redefines them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::normalize::types::TypeExpr;

/// One source file handed to the core by the external loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// A logical project: ordered source files plus resolution configuration.
#[derive(Debug, Clone)]
pub struct Project {
    pub files: Vec<SourceFile>,
    pub config: scandoc_core::ResolutionConfig,
}

/// Index of a declaration in the registry arena. Stable for the lifetime of
/// one analysis run and serializable for the renderer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

/// Kind of a documented top-level symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    Component,
    Module,
    Directive,
    Pipe,
    Injectable,
    Guard,
    Class,
    Interface,
    Enum,
    Function,
    Variable,
    TypeAlias,
    Route,
}

impl DeclarationKind {
    /// Stable category segment used for page ids and link targets.
    pub fn category(self) -> &'static str {
        match self {
            DeclarationKind::Module => "modules",
            DeclarationKind::Component => "components",
            DeclarationKind::Directive => "directives",
            DeclarationKind::Pipe => "pipes",
            DeclarationKind::Injectable => "injectables",
            DeclarationKind::Guard => "guards",
            DeclarationKind::Class => "classes",
            DeclarationKind::Interface => "interfaces",
            DeclarationKind::Enum => "miscellaneous/enumerations",
            DeclarationKind::Function => "miscellaneous/functions",
            DeclarationKind::Variable => "miscellaneous/variables",
            DeclarationKind::TypeAlias => "miscellaneous/typealiases",
            DeclarationKind::Route => "routes",
        }
    }

    /// Ranking priority used for deterministic search tie-breaking.
    /// Lower is more important.
    pub fn priority(self) -> u8 {
        match self {
            DeclarationKind::Module => 0,
            DeclarationKind::Component => 1,
            DeclarationKind::Directive => 2,
            DeclarationKind::Injectable => 3,
            DeclarationKind::Guard => 4,
            DeclarationKind::Pipe => 5,
            DeclarationKind::Interface => 6,
            DeclarationKind::Class => 7,
            DeclarationKind::Enum => 8,
            DeclarationKind::Function => 9,
            DeclarationKind::TypeAlias => 10,
            DeclarationKind::Variable => 11,
            DeclarationKind::Route => 12,
        }
    }
}

/// Member visibility. `#field` names are tagged distinctly from
/// `private`-modifier fields; both render, with different markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
    EcmascriptPrivate,
}

/// Kind of a class/interface member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    Property,
    Method,
    /// Paired getter/setter merged into one member.
    Accessor,
    InputBinding,
    OutputBinding,
    ModelBinding,
}

/// One function/method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    pub type_raw: Option<String>,
    pub optional: bool,
    pub default_value: Option<String>,
    /// `...rest` parameter.
    pub is_rest: bool,
}

/// One member of a class, interface, component, directive or enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    /// Public name when it differs from the declared name. `None` means the
    /// public name equals `name`.
    pub alias: Option<String>,
    pub type_raw: Option<String>,
    /// Normalized type, when the raw text was printable.
    pub type_expr: Option<TypeExpr>,
    /// Required flag for bindings (`{required: true}` / `input.required`).
    pub required: bool,
    /// `?` marker on properties and method signatures.
    pub optional: bool,
    /// Default value as source text, verbatim.
    pub default_value: Option<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
    pub is_abstract: bool,
    pub is_async: bool,
    pub doc: Option<String>,
    /// Line of the declaration site. For inherited members this stays the
    /// ancestor's line.
    pub line: u32,
    pub parameters: SmallVec<[ParameterInfo; 4]>,
    pub return_type_raw: Option<String>,
    /// For inherited members, the ancestor declaration this member was
    /// defined in. Display-only back-reference.
    pub defined_in: Option<EntityId>,
}

impl Member {
    pub fn new(kind: MemberKind, name: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            name: name.into(),
            alias: None,
            type_raw: None,
            type_expr: None,
            required: false,
            optional: false,
            default_value: None,
            visibility: Visibility::Public,
            is_static: false,
            is_readonly: false,
            is_abstract: false,
            is_async: false,
            doc: None,
            line,
            parameters: SmallVec::new(),
            return_type_raw: None,
            defined_in: None,
        }
    }

    /// The public name of the member: alias when present, declared name
    /// otherwise.
    pub fn public_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn is_binding(&self) -> bool {
        matches!(
            self.kind,
            MemberKind::InputBinding | MemberKind::OutputBinding | MemberKind::ModelBinding
        )
    }
}

/// One host-level declarative binding: a `host: {...}` entry or a
/// `@HostBinding`/`@HostListener` member decorator. Declaration order is
/// preserved; the same key may appear multiple times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostBinding {
    /// Event name (`click`) or bound property (`style.color`, `attr.role`).
    pub key: String,
    pub expression: String,
}

/// Component decorator metadata, normalized from whichever argument syntax
/// was used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentMetadata {
    pub selector: Option<String>,
    pub template: Option<String>,
    pub template_url: Option<String>,
    pub styles: Vec<String>,
    pub style_urls: Vec<String>,
    pub providers: Vec<String>,
    pub imports: Vec<String>,
    pub entry_components: Vec<String>,
    pub host_directives: Vec<String>,
    pub export_as: Option<String>,
    pub change_detection: Option<String>,
    pub encapsulation: Option<String>,
    pub preserve_whitespaces: Option<String>,
    pub standalone: Option<bool>,
}

/// NgModule decorator metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub imports: Vec<String>,
    pub declarations: Vec<String>,
    pub exports: Vec<String>,
    pub entry_components: Vec<String>,
    pub bootstrap: Vec<String>,
    pub providers: Vec<String>,
    pub schemas: Vec<String>,
    pub id: Option<String>,
}

/// Directive decorator metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectiveMetadata {
    pub selector: Option<String>,
    pub providers: Vec<String>,
    pub host_directives: Vec<String>,
    pub export_as: Option<String>,
    pub standalone: Option<bool>,
}

/// Pipe decorator metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipeMetadata {
    pub name: Option<String>,
    pub pure: Option<bool>,
    pub standalone: Option<bool>,
}

/// Signature of a top-level function declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub parameters: Vec<ParameterInfo>,
    pub return_type_raw: Option<String>,
    pub type_parameters: Vec<String>,
    pub is_async: bool,
}

/// A top-level variable declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableInfo {
    pub type_raw: Option<String>,
    pub default_value: Option<String>,
}

/// A type alias declaration (`type Name = ...`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasInfo {
    pub aliased_raw: String,
    pub aliased: Option<TypeExpr>,
}

/// A route table declaration (`const routes: Routes = [...]`). The raw
/// initializer is surfaced for consumers; deep route parsing is theirs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub raw: String,
}

/// Kind-specific metadata record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Metadata {
    Component(ComponentMetadata),
    Module(ModuleMetadata),
    Directive(DirectiveMetadata),
    Pipe(PipeMetadata),
    Function(FunctionSignature),
    Variable(VariableInfo),
    TypeAlias(TypeAliasInfo),
    Route(RouteInfo),
    #[default]
    None,
}

/// One documented top-level symbol. Immutable once the registry barrier is
/// passed; owned exclusively by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclarationKind,
    /// Post-disambiguation name (`AboutModule2` after a collision).
    pub name: String,
    pub file: String,
    pub line: u32,
    pub doc: Option<String>,
    /// Raw custom (non-framework) decorators, kept for display only.
    pub custom_decorators: Vec<String>,
    pub standalone: bool,
    /// Capability tag set at extraction time from the implements clause.
    pub is_guard: bool,
    /// Single parent class, raw text as written (`Base`, `Base<T>`).
    pub extends: Option<String>,
    /// Interface parents (interfaces may extend several).
    pub extends_interfaces: Vec<String>,
    pub implements: Vec<String>,
    pub type_parameters: Vec<String>,
    pub members: Vec<Member>,
    pub host_bindings: Vec<HostBinding>,
    pub metadata: Metadata,
}

impl Declaration {
    pub fn new(
        kind: DeclarationKind,
        name: impl Into<String>,
        file: impl Into<String>,
        line: u32,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            file: file.into(),
            line,
            doc: None,
            custom_decorators: Vec::new(),
            standalone: false,
            is_guard: false,
            extends: None,
            extends_interfaces: Vec::new(),
            implements: Vec::new(),
            type_parameters: Vec::new(),
            members: Vec::new(),
            host_bindings: Vec::new(),
            metadata: Metadata::None,
        }
    }

    /// First paragraph of the documentation comment, used as the search
    /// summary.
    pub fn summary(&self) -> Option<&str> {
        let doc = self.doc.as_deref()?;
        let first = doc.split("\n\n").next().unwrap_or(doc).trim();
        if first.is_empty() {
            None
        } else {
            Some(first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_name_defaults_to_declared_name() {
        let mut m = Member::new(MemberKind::InputBinding, "exampleInput", 3);
        assert_eq!(m.public_name(), "exampleInput");
        m.alias = Some("aliased".into());
        assert_eq!(m.public_name(), "aliased");
    }

    #[test]
    fn summary_is_first_paragraph() {
        let mut d = Declaration::new(DeclarationKind::Class, "Todo", "todo.ts", 1);
        d.doc = Some("The todo class.\n\nLonger text\nacross lines.".into());
        assert_eq!(d.summary(), Some("The todo class."));
        d.doc = None;
        assert_eq!(d.summary(), None);
    }
}
