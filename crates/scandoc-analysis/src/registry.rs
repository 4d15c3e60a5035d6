//! Entity registry.
//!
//! All declarations from all files live in one arena, inserted in file
//! order then declaration order so ids and disambiguated names are stable
//! run to run. Two declarations of the same kind sharing a name collide;
//! the later one gets a numeric suffix starting at 2.

use rustc_hash::FxHashMap;

use crate::model::{Declaration, DeclarationKind, EntityId};

#[derive(Debug, Default)]
pub struct EntityRegistry {
    arena: Vec<Declaration>,
    /// Final (post-suffix) name within a kind bucket.
    buckets: FxHashMap<(DeclarationKind, String), EntityId>,
    /// Every final name, first insertion wins for cross-kind lookup.
    by_name: FxHashMap<String, EntityId>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration, renaming it on a bucket collision. The chosen
    /// name depends only on insertion order, so a fixed file order yields
    /// fixed names.
    pub fn insert(&mut self, mut decl: Declaration) -> EntityId {
        let bucket = decl.kind;
        if self
            .buckets
            .contains_key(&(bucket, decl.name.clone()))
        {
            let base = decl.name.clone();
            let mut n = 2u32;
            while self
                .buckets
                .contains_key(&(bucket, format!("{base}{n}")))
            {
                n += 1;
            }
            decl.name = format!("{base}{n}");
            tracing::debug!(original = %base, renamed = %decl.name, "name collision");
        }
        let id = EntityId(self.arena.len() as u32);
        self.buckets.insert((bucket, decl.name.clone()), id);
        self.by_name.entry(decl.name.clone()).or_insert(id);
        self.arena.push(decl);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Declaration> {
        self.arena.get(id.0 as usize)
    }

    /// Look up an entity by its final name across all kinds. On a cross-kind
    /// name clash the first-registered entity wins.
    pub fn lookup(&self, name: &str) -> Option<EntityId> {
        self.by_name.get(name).copied()
    }

    /// Look up an entity by name within one kind bucket.
    pub fn lookup_kind(&self, kind: DeclarationKind, name: &str) -> Option<EntityId> {
        self.buckets.get(&(kind, name.to_string())).copied()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Declaration)> {
        self.arena
            .iter()
            .enumerate()
            .map(|(i, d)| (EntityId(i as u32), d))
    }
}
