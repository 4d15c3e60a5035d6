//! `{@link}` tag resolution inside documentation text.
//!
//! Three syntaxes resolve to the same result: `{@link Target}`,
//! `{@link Target|display}` and `[display]{@link Target}`. A `#` suffix on
//! the target addresses a member anchor (`Todo#completed`). Every tag is
//! scanned exactly once; a tag whose target is not registered is left in
//! the text verbatim and reported as a warning, unless the target is a
//! declared ambient type. Link failures are never fatal.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use scandoc_core::{ResolutionConfig, Warning, WarningKind};

use crate::model::EntityId;
use crate::registry::EntityRegistry;

// One regex covers all three forms: an optional `[display]` prefix, the
// target up to `|` or `}`, and an optional `|display` suffix.
static LINK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\[(?P<pre>[^\[\]]+)\])?\{@link\s+(?P<target>[^}|]+)(?:\|(?P<post>[^}]+))?\}")
        .expect("valid regex")
});

/// One resolved documentation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReference {
    pub display: String,
    pub target: EntityId,
    pub anchor: Option<String>,
}

/// Rewrite every resolvable `{@link}` tag in `doc` to a markdown link with
/// a stable page target, collecting the references. Unresolved tags stay
/// verbatim.
pub fn resolve_doc_links(
    doc: &str,
    entity: &str,
    file: Option<&str>,
    registry: &EntityRegistry,
    config: &ResolutionConfig,
    links: &mut Vec<LinkReference>,
    warnings: &mut Vec<Warning>,
) -> String {
    LINK_TAG
        .replace_all(doc, |caps: &Captures| {
            let display = caps
                .name("pre")
                .or_else(|| caps.name("post"))
                .map(|m| m.as_str());
            rewrite(
                &caps["target"],
                display,
                &caps[0],
                entity,
                file,
                registry,
                config,
                links,
                warnings,
            )
        })
        .into_owned()
}

#[allow(clippy::too_many_arguments)]
fn rewrite(
    raw_target: &str,
    display: Option<&str>,
    original: &str,
    entity: &str,
    file: Option<&str>,
    registry: &EntityRegistry,
    config: &ResolutionConfig,
    links: &mut Vec<LinkReference>,
    warnings: &mut Vec<Warning>,
) -> String {
    let raw_target = raw_target.trim();
    let (name, anchor) = match raw_target.split_once('#') {
        Some((name, anchor)) => (name.trim(), Some(anchor.trim())),
        None => (raw_target, None),
    };
    let Some(target) = registry.lookup(name) else {
        if !config.is_ambient_type(name) {
            warnings.push(Warning::new(
                WarningKind::UnresolvedLink,
                file,
                format!("'{raw_target}' referenced from '{entity}' is not documented"),
            ));
        }
        return original.to_string();
    };
    let display = display.map(str::trim).unwrap_or(raw_target).to_string();
    let href = match (registry.get(target), anchor) {
        (Some(decl), Some(anchor)) => {
            format!("{}/{}#{}", decl.kind.category(), decl.name, anchor)
        }
        (Some(decl), None) => format!("{}/{}", decl.kind.category(), decl.name),
        (None, _) => return original.to_string(),
    };
    links.push(LinkReference {
        display: display.clone(),
        target,
        anchor: anchor.map(str::to_string),
    });
    format!("[{display}]({href})")
}
