//! Document graph assembly.
//!
//! The final, serializable output of an analysis run: every document
//! record, category menus in encounter order, module dependency edges,
//! route tables, the search index and the accumulated warnings.
//!
//! Guards keep their own category. A guard that is also registered as a
//! provider somewhere additionally appears in the injectables menu; an
//! unregistered guard appears only under guards.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use scandoc_core::Warning;

use crate::model::{Declaration, DeclarationKind, EntityId, Metadata};
use crate::registry::EntityRegistry;
use crate::resolve::ResolvedEntity;
use crate::search::SearchIndex;

/// One fully resolved document: the declaration record plus resolution
/// output, addressable by a stable page id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: EntityId,
    pub page_id: String,
    pub declaration: Declaration,
    pub resolved: ResolvedEntity,
}

/// A named dependency edge from a module page. `entity` is set when the
/// name resolves to a documented entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRef {
    pub name: String,
    pub entity: Option<EntityId>,
}

/// Dependency edges of one module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModulePage {
    pub id: EntityId,
    pub imports: Vec<DependencyRef>,
    pub declarations: Vec<DependencyRef>,
    pub exports: Vec<DependencyRef>,
    pub bootstrap: Vec<DependencyRef>,
    pub providers: Vec<DependencyRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Miscellaneous {
    pub enumerations: Vec<EntityId>,
    pub functions: Vec<EntityId>,
    pub variables: Vec<EntityId>,
    pub type_aliases: Vec<EntityId>,
}

/// Category menus, each in encounter order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Categories {
    pub modules: Vec<ModulePage>,
    pub components: Vec<EntityId>,
    pub directives: Vec<EntityId>,
    pub injectables: Vec<EntityId>,
    pub guards: Vec<EntityId>,
    pub pipes: Vec<EntityId>,
    pub interfaces: Vec<EntityId>,
    pub classes: Vec<EntityId>,
    pub miscellaneous: Miscellaneous,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentGraph {
    pub documents: Vec<DocumentRecord>,
    pub categories: Categories,
    pub routes: Vec<EntityId>,
    pub search: SearchIndex,
    pub warnings: Vec<Warning>,
}

impl DocumentGraph {
    pub fn document(&self, id: EntityId) -> Option<&DocumentRecord> {
        self.documents.get(id.0 as usize)
    }

    /// Menu ids sorted by document name, for alphabetical navigation.
    /// Encounter order stays untouched in the category itself.
    pub fn alphabetical(&self, ids: &[EntityId]) -> Vec<EntityId> {
        let mut sorted = ids.to_vec();
        sorted.sort_by(|a, b| {
            let name_a = self.document(*a).map(|d| d.declaration.name.as_str());
            let name_b = self.document(*b).map(|d| d.declaration.name.as_str());
            name_a.cmp(&name_b)
        });
        sorted
    }
}

pub fn assemble(
    registry: &EntityRegistry,
    mut resolved: std::collections::BTreeMap<EntityId, ResolvedEntity>,
    search: SearchIndex,
    warnings: Vec<Warning>,
) -> DocumentGraph {
    let registered_providers = provider_registrations(registry);

    let mut graph = DocumentGraph {
        search,
        warnings,
        ..Default::default()
    };
    for (id, decl) in registry.iter() {
        let record = DocumentRecord {
            id,
            page_id: format!("{}/{}", decl.kind.category(), decl.name),
            declaration: decl.clone(),
            resolved: resolved.remove(&id).unwrap_or_default(),
        };
        match decl.kind {
            DeclarationKind::Module => graph
                .categories
                .modules
                .push(module_page(id, decl, registry)),
            DeclarationKind::Component => graph.categories.components.push(id),
            DeclarationKind::Directive => graph.categories.directives.push(id),
            DeclarationKind::Injectable => graph.categories.injectables.push(id),
            DeclarationKind::Guard => {
                graph.categories.guards.push(id);
                if registered_providers.contains(&decl.name) {
                    graph.categories.injectables.push(id);
                }
            }
            DeclarationKind::Pipe => graph.categories.pipes.push(id),
            DeclarationKind::Interface => graph.categories.interfaces.push(id),
            DeclarationKind::Class => graph.categories.classes.push(id),
            DeclarationKind::Enum => graph.categories.miscellaneous.enumerations.push(id),
            DeclarationKind::Function => graph.categories.miscellaneous.functions.push(id),
            DeclarationKind::Variable => graph.categories.miscellaneous.variables.push(id),
            DeclarationKind::TypeAlias => graph.categories.miscellaneous.type_aliases.push(id),
            DeclarationKind::Route => graph.routes.push(id),
        }
        graph.documents.push(record);
    }
    graph
}

/// Names registered through any `providers` list in the project.
fn provider_registrations(registry: &EntityRegistry) -> FxHashSet<String> {
    let mut registered = FxHashSet::default();
    for (_, decl) in registry.iter() {
        let providers = match &decl.metadata {
            Metadata::Module(meta) => &meta.providers,
            Metadata::Component(meta) => &meta.providers,
            Metadata::Directive(meta) => &meta.providers,
            _ => continue,
        };
        for name in providers {
            registered.insert(name.clone());
        }
    }
    registered
}

fn module_page(id: EntityId, decl: &Declaration, registry: &EntityRegistry) -> ModulePage {
    let Metadata::Module(meta) = &decl.metadata else {
        return ModulePage {
            id,
            ..Default::default()
        };
    };
    ModulePage {
        id,
        imports: dependency_refs(&meta.imports, registry),
        declarations: dependency_refs(&meta.declarations, registry),
        exports: dependency_refs(&meta.exports, registry),
        bootstrap: dependency_refs(&meta.bootstrap, registry),
        providers: dependency_refs(&meta.providers, registry),
    }
}

fn dependency_refs(names: &[String], registry: &EntityRegistry) -> Vec<DependencyRef> {
    names
        .iter()
        .map(|name| DependencyRef {
            name: name.clone(),
            entity: registry.lookup(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModuleMetadata;
    use std::collections::BTreeMap;

    fn guard(name: &str) -> Declaration {
        let mut d = Declaration::new(DeclarationKind::Guard, name, "guards.ts", 1);
        d.is_guard = true;
        d
    }

    fn module_with_providers(name: &str, providers: &[&str]) -> Declaration {
        let mut d = Declaration::new(DeclarationKind::Module, name, "app.module.ts", 1);
        d.metadata = Metadata::Module(ModuleMetadata {
            providers: providers.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        });
        d
    }

    #[test]
    fn registered_guard_is_listed_in_both_categories() {
        let mut registry = EntityRegistry::new();
        registry.insert(module_with_providers("AppModule", &["AuthGuard"]));
        let auth = registry.insert(guard("AuthGuard"));
        let solo = registry.insert(guard("SoloGuard"));

        let graph = assemble(&registry, BTreeMap::new(), SearchIndex::default(), Vec::new());
        assert_eq!(graph.categories.guards, vec![auth, solo]);
        assert_eq!(graph.categories.injectables, vec![auth]);
        assert!(graph.categories.classes.is_empty());
    }

    #[test]
    fn module_dependencies_resolve_to_entities_when_documented() {
        let mut registry = EntityRegistry::new();
        let mut module = Declaration::new(DeclarationKind::Module, "AppModule", "app.ts", 1);
        module.metadata = Metadata::Module(ModuleMetadata {
            declarations: vec!["AppComponent".into()],
            imports: vec!["BrowserModule".into()],
            ..Default::default()
        });
        registry.insert(module);
        let component =
            registry.insert(Declaration::new(DeclarationKind::Component, "AppComponent", "a.ts", 1));

        let graph = assemble(&registry, BTreeMap::new(), SearchIndex::default(), Vec::new());
        let page = &graph.categories.modules[0];
        assert_eq!(page.declarations[0].entity, Some(component));
        // External framework import resolves to no entity but keeps its name.
        assert_eq!(page.imports[0].entity, None);
        assert_eq!(page.imports[0].name, "BrowserModule");
    }

    #[test]
    fn page_ids_use_category_segments() {
        let mut registry = EntityRegistry::new();
        registry.insert(Declaration::new(DeclarationKind::Enum, "Direction", "d.ts", 1));
        let graph = assemble(&registry, BTreeMap::new(), SearchIndex::default(), Vec::new());
        assert_eq!(
            graph.documents[0].page_id,
            "miscellaneous/enumerations/Direction"
        );
    }

    #[test]
    fn alphabetical_accessor_does_not_disturb_encounter_order() {
        let mut registry = EntityRegistry::new();
        let z = registry.insert(Declaration::new(DeclarationKind::Class, "Zeta", "z.ts", 1));
        let a = registry.insert(Declaration::new(DeclarationKind::Class, "Alpha", "a.ts", 1));
        let graph = assemble(&registry, BTreeMap::new(), SearchIndex::default(), Vec::new());
        assert_eq!(graph.categories.classes, vec![z, a]);
        assert_eq!(graph.alphabetical(&graph.categories.classes), vec![a, z]);
    }
}
