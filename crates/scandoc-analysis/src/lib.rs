//! Documentation analysis engine for Angular-style TypeScript projects.
//!
//! Phases run in a fixed order: per-file declaration extraction, metadata
//! and type normalization, registration into one entity arena, cross
//! reference and inheritance resolution, search index construction, and
//! document graph assembly. The output of [`pipeline::run`] is the full
//! serializable graph a renderer consumes.

pub mod extract;
pub mod graph;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod resolve;
pub mod search;

pub use graph::{DocumentGraph, DocumentRecord};
pub use model::{Declaration, DeclarationKind, EntityId, Member, Project, SourceFile};
pub use normalize::TypeExpr;
pub use pipeline::run;
pub use registry::EntityRegistry;
pub use resolve::{LinkReference, ResolvedEntity};
pub use search::{SearchHit, SearchIndex};
