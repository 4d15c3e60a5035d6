//! Cross-reference and inheritance resolution.
//!
//! Runs after the registry barrier, over an immutable registry. Produces
//! one [`ResolvedEntity`] per declaration: rewritten documentation, the
//! links it references, and the effective member and host binding lists
//! after inheritance.

pub mod inheritance;
pub mod links;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use scandoc_core::{ResolutionConfig, ResolveError, Warning};

use crate::model::{EntityId, HostBinding, Member};
use crate::registry::EntityRegistry;

pub use links::LinkReference;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntity {
    /// Documentation with `{@link}` tags rewritten to markdown links.
    pub doc: Option<String>,
    pub links: Vec<LinkReference>,
    /// Own members plus inherited ones, ancestor-tagged.
    pub members: Vec<Member>,
    pub host_bindings: Vec<HostBinding>,
    /// Documentation targets for built-in type names appearing in member
    /// types (`string` and friends link out to their global reference).
    pub type_links: BTreeMap<String, String>,
}

/// Resolve every registered entity. Deterministic: the output map is
/// ordered by entity id. The only fatal outcome is a cyclic hierarchy.
pub fn resolve_all(
    registry: &EntityRegistry,
    config: &ResolutionConfig,
    warnings: &mut Vec<Warning>,
) -> Result<BTreeMap<EntityId, ResolvedEntity>, ResolveError> {
    let mut resolved = BTreeMap::new();
    for (id, decl) in registry.iter() {
        let chain = inheritance::ancestor_chain(id, registry)?;
        let members = inheritance::effective_members(decl, &chain, registry);

        let mut type_links = BTreeMap::new();
        for member in &members {
            if let Some(expr) = &member.type_expr {
                expr.visit_names(&mut |name| {
                    if let Some(url) = config.doc_link_for(name) {
                        type_links
                            .entry(name.to_string())
                            .or_insert_with(|| url.to_string());
                    }
                });
            }
        }

        let mut entity = ResolvedEntity {
            members,
            host_bindings: inheritance::effective_host_bindings(decl, &chain, registry),
            type_links,
            ..Default::default()
        };
        if let Some(doc) = decl.doc.as_deref() {
            entity.doc = Some(links::resolve_doc_links(
                doc,
                &decl.name,
                Some(&decl.file),
                registry,
                config,
                &mut entity.links,
                warnings,
            ));
        }
        for member in &mut entity.members {
            if let Some(doc) = member.doc.take() {
                member.doc = Some(links::resolve_doc_links(
                    &doc,
                    &decl.name,
                    Some(&decl.file),
                    registry,
                    config,
                    &mut entity.links,
                    warnings,
                ));
            }
        }
        resolved.insert(id, entity);
    }
    Ok(resolved)
}
