//! Search index construction and querying.
//!
//! The index is deliberately small: entity name plus first-paragraph
//! summary tokens. Ranking is fully deterministic. An exact name match
//! always beats a name prefix, which beats a summary hit; ties break by
//! kind priority then alphabetically. Documentation larger than the
//! configured threshold (inlined assets, base64 blobs) is indexed by name
//! only.

use serde::{Deserialize, Serialize};

use scandoc_core::{ResolutionConfig, Warning, WarningKind};

use crate::model::{DeclarationKind, EntityId};
use crate::registry::EntityRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    pub id: EntityId,
    pub name: String,
    pub kind: DeclarationKind,
    pub summary_tokens: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchRank {
    ExactName,
    NamePrefix,
    Summary,
}

impl MatchRank {
    fn order(self) -> u8 {
        match self {
            MatchRank::ExactName => 0,
            MatchRank::NamePrefix => 1,
            MatchRank::Summary => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: EntityId,
    pub name: String,
    pub kind: DeclarationKind,
    pub rank: MatchRank,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchIndex {
    documents: Vec<SearchDocument>,
}

impl SearchIndex {
    pub fn build(
        registry: &EntityRegistry,
        config: &ResolutionConfig,
        warnings: &mut Vec<Warning>,
    ) -> Self {
        let mut documents = Vec::with_capacity(registry.len());
        for (id, decl) in registry.iter() {
            let oversized = decl
                .doc
                .as_deref()
                .is_some_and(|doc| doc.len() > config.search_content_threshold);
            let summary_tokens = if oversized {
                warnings.push(Warning::new(
                    WarningKind::OversizedSearchContent,
                    Some(&decl.file),
                    format!("'{}' indexed by name only", decl.name),
                ));
                Vec::new()
            } else {
                decl.summary().map(tokenize).unwrap_or_default()
            };
            documents.push(SearchDocument {
                id,
                name: decl.name.clone(),
                kind: decl.kind,
                summary_tokens,
            });
        }
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Rank matching documents for a term. Order is deterministic for a
    /// fixed index.
    pub fn query(&self, term: &str) -> Vec<SearchHit> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<SearchHit> = self
            .documents
            .iter()
            .filter_map(|doc| {
                let name = doc.name.to_lowercase();
                let rank = if name == needle {
                    MatchRank::ExactName
                } else if name.starts_with(&needle) {
                    MatchRank::NamePrefix
                } else if doc.summary_tokens.iter().any(|t| t == &needle) {
                    MatchRank::Summary
                } else {
                    return None;
                };
                Some(SearchHit {
                    id: doc.id,
                    name: doc.name.clone(),
                    kind: doc.kind,
                    rank,
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.rank
                .order()
                .cmp(&b.rank.order())
                .then(a.kind.priority().cmp(&b.kind.priority()))
                .then_with(|| a.name.cmp(&b.name))
        });
        hits
    }
}

fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect();
    tokens.sort();
    tokens.dedup();
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Declaration;

    fn registry() -> EntityRegistry {
        let mut r = EntityRegistry::new();
        let mut todo = Declaration::new(DeclarationKind::Class, "Todo", "todo.ts", 1);
        todo.doc = Some("A single todo item.".into());
        r.insert(todo);
        let mut component =
            Declaration::new(DeclarationKind::Component, "TodoComponent", "todo.component.ts", 1);
        component.doc = Some("Renders one todo.".into());
        r.insert(component);
        let store = Declaration::new(DeclarationKind::Injectable, "TodoStore", "todo.store.ts", 1);
        r.insert(store);
        r
    }

    fn index() -> SearchIndex {
        let mut warnings = Vec::new();
        SearchIndex::build(&registry(), &ResolutionConfig::default(), &mut warnings)
    }

    #[test]
    fn exact_name_outranks_prefix_and_summary() {
        let hits = index().query("todo");
        assert_eq!(hits[0].name, "Todo");
        assert_eq!(hits[0].rank, MatchRank::ExactName);
        // Prefix matches follow, ordered by kind priority.
        assert_eq!(hits[1].name, "TodoComponent");
        assert_eq!(hits[2].name, "TodoStore");
    }

    #[test]
    fn summary_tokens_match_case_insensitively() {
        let hits = index().query("Renders");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "TodoComponent");
        assert_eq!(hits[0].rank, MatchRank::Summary);
    }

    #[test]
    fn oversized_doc_is_indexed_by_name_only() {
        let mut r = EntityRegistry::new();
        let mut decl = Declaration::new(DeclarationKind::Component, "HeavyComponent", "h.ts", 1);
        decl.doc = Some("data ".repeat(20_000));
        r.insert(decl);
        let mut warnings = Vec::new();
        let index = SearchIndex::build(&r, &ResolutionConfig::default(), &mut warnings);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::OversizedSearchContent);
        assert!(index.query("data").is_empty());
        assert_eq!(index.query("heavycomponent").len(), 1);
    }

    #[test]
    fn empty_term_returns_nothing() {
        assert!(index().query("  ").is_empty());
    }
}
