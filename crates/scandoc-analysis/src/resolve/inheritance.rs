//! Inheritance resolution.
//!
//! Classes follow a single `extends` chain; interfaces may extend several
//! parents. Effective member lists put own members first, then ancestor
//! members not redeclared by a closer type, each tagged with the ancestor
//! it came from while keeping the ancestor's source line. A cyclic
//! hierarchy is the one condition the whole analysis treats as fatal.

use rustc_hash::FxHashSet;

use scandoc_core::ResolveError;

use crate::extract::declarations::base_name;
use crate::model::{Declaration, EntityId, HostBinding, Member};
use crate::registry::EntityRegistry;

/// Ordered ancestor ids of a declaration, closest first. Errors on a cycle.
pub fn ancestor_chain(
    id: EntityId,
    registry: &EntityRegistry,
) -> Result<Vec<EntityId>, ResolveError> {
    let mut chain = Vec::new();
    let mut visited: FxHashSet<EntityId> = FxHashSet::default();
    visited.insert(id);
    let Some(start) = registry.get(id) else {
        return Ok(chain);
    };
    if !start.extends_interfaces.is_empty() {
        collect_interface_parents(start, registry, &mut visited, &mut chain)?;
        return Ok(chain);
    }
    let mut current = start;
    while let Some(parent_name) = current.extends.as_deref() {
        let Some(parent_id) = registry.lookup(base_name(parent_name)) else {
            break;
        };
        let Some(parent) = registry.get(parent_id) else {
            break;
        };
        if !visited.insert(parent_id) {
            return Err(ResolveError::CyclicInheritance {
                first: current.name.clone(),
                second: parent.name.clone(),
            });
        }
        chain.push(parent_id);
        current = parent;
    }
    Ok(chain)
}

/// Depth-first over the interface parent lists, in declaration order.
fn collect_interface_parents(
    decl: &Declaration,
    registry: &EntityRegistry,
    visited: &mut FxHashSet<EntityId>,
    chain: &mut Vec<EntityId>,
) -> Result<(), ResolveError> {
    for parent_name in &decl.extends_interfaces {
        let Some(parent_id) = registry.lookup(base_name(parent_name)) else {
            continue;
        };
        let Some(parent) = registry.get(parent_id) else {
            continue;
        };
        if !visited.insert(parent_id) {
            return Err(ResolveError::CyclicInheritance {
                first: decl.name.clone(),
                second: parent.name.clone(),
            });
        }
        chain.push(parent_id);
        collect_interface_parents(parent, registry, visited, chain)?;
    }
    Ok(())
}

/// Effective members of a declaration given its ancestor chain. A member
/// redeclared closer to the leaf fully replaces the ancestor's record.
pub fn effective_members(
    decl: &Declaration,
    chain: &[EntityId],
    registry: &EntityRegistry,
) -> Vec<Member> {
    let mut members = decl.members.clone();
    let mut seen: FxHashSet<String> = members.iter().map(|m| m.name.clone()).collect();
    for ancestor_id in chain {
        let Some(ancestor) = registry.get(*ancestor_id) else {
            continue;
        };
        for member in &ancestor.members {
            if seen.insert(member.name.clone()) {
                let mut inherited = member.clone();
                inherited.defined_in = Some(*ancestor_id);
                members.push(inherited);
            }
        }
    }
    members
}

/// Effective host bindings: own entries first, then ancestor entries whose
/// key the leaf did not rebind.
pub fn effective_host_bindings(
    decl: &Declaration,
    chain: &[EntityId],
    registry: &EntityRegistry,
) -> Vec<HostBinding> {
    let mut bindings = decl.host_bindings.clone();
    let own_keys: FxHashSet<String> = bindings.iter().map(|b| b.key.clone()).collect();
    for ancestor_id in chain {
        let Some(ancestor) = registry.get(*ancestor_id) else {
            continue;
        };
        for binding in &ancestor.host_bindings {
            if !own_keys.contains(&binding.key) {
                bindings.push(binding.clone());
            }
        }
    }
    bindings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclarationKind, MemberKind};

    fn class(name: &str, extends: Option<&str>) -> Declaration {
        let mut d = Declaration::new(DeclarationKind::Class, name, "test.ts", 1);
        d.extends = extends.map(str::to_string);
        d
    }

    #[test]
    fn chain_walks_to_the_root() {
        let mut registry = EntityRegistry::new();
        let c = registry.insert(class("C", Some("B")));
        let b = registry.insert(class("B", Some("A")));
        let a = registry.insert(class("A", None));
        assert_eq!(ancestor_chain(c, &registry).unwrap(), vec![b, a]);
    }

    #[test]
    fn generic_parent_reference_is_followed() {
        let mut registry = EntityRegistry::new();
        let child = registry.insert(class("Child", Some("Base<string>")));
        let base = registry.insert(class("Base", None));
        assert_eq!(ancestor_chain(child, &registry).unwrap(), vec![base]);
    }

    #[test]
    fn class_cycle_is_fatal_and_names_both() {
        let mut registry = EntityRegistry::new();
        let a = registry.insert(class("A", Some("B")));
        registry.insert(class("B", Some("A")));
        let err = ancestor_chain(a, &registry).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'A'") && message.contains("'B'"), "{message}");
    }

    #[test]
    fn interface_cycle_is_fatal() {
        let mut registry = EntityRegistry::new();
        let mut first = Declaration::new(DeclarationKind::Interface, "First", "t.ts", 1);
        first.extends_interfaces = vec!["Second".into()];
        let mut second = Declaration::new(DeclarationKind::Interface, "Second", "t.ts", 5);
        second.extends_interfaces = vec!["First".into()];
        let id = registry.insert(first);
        registry.insert(second);
        assert!(ancestor_chain(id, &registry).is_err());
    }

    #[test]
    fn inherited_members_keep_ancestor_line_and_origin() {
        let mut registry = EntityRegistry::new();
        let child_id = registry.insert(class("Child", Some("Base")));
        let mut base = class("Base", None);
        base.members.push(Member::new(MemberKind::Property, "shared", 42));
        let base_id = registry.insert(base);

        let chain = ancestor_chain(child_id, &registry).unwrap();
        let child = registry.get(child_id).unwrap();
        let members = effective_members(child, &chain, &registry);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].line, 42);
        assert_eq!(members[0].defined_in, Some(base_id));
    }

    #[test]
    fn override_fully_replaces_ancestor_member() {
        let mut registry = EntityRegistry::new();
        let mut child = class("Child", Some("Base"));
        child
            .members
            .push(Member::new(MemberKind::Method, "run", 3));
        let child_id = registry.insert(child);
        let mut base = class("Base", None);
        base.members.push(Member::new(MemberKind::Method, "run", 30));
        registry.insert(base);

        let chain = ancestor_chain(child_id, &registry).unwrap();
        let decl = registry.get(child_id).unwrap();
        let members = effective_members(decl, &chain, &registry);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].line, 3);
        assert_eq!(members[0].defined_in, None);
    }
}
