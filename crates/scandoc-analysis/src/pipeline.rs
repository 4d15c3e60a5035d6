//! Analysis pipeline.
//!
//! Extraction fans out across files with rayon; each worker parses with
//! its own parser and shares nothing. `collect` keeps file order, so the
//! merge into the registry is deterministic no matter how the work was
//! scheduled. Everything after the registry barrier reads an immutable
//! registry.

use rayon::prelude::*;
use tracing::{debug, info};

use scandoc_core::PipelineError;

use crate::extract;
use crate::graph::{assemble, DocumentGraph};
use crate::model::Project;
use crate::registry::EntityRegistry;
use crate::resolve::resolve_all;
use crate::search::SearchIndex;

/// Run the full analysis over a project. Per-file and per-declaration
/// problems degrade to warnings on the returned graph; invalid
/// configuration and cyclic hierarchies are the fatal cases.
pub fn run(project: &Project) -> Result<DocumentGraph, PipelineError> {
    project.config.validate()?;
    info!(files = project.files.len(), "analysis started");

    let extractions: Vec<_> = project
        .files
        .par_iter()
        .map(|file| extract::extract_file(file, &project.config))
        .collect();

    let mut registry = EntityRegistry::new();
    let mut warnings = Vec::new();
    for extraction in extractions {
        warnings.extend(extraction.warnings);
        for decl in extraction.declarations {
            registry.insert(decl);
        }
    }
    debug!(entities = registry.len(), "registry sealed");

    let resolved = resolve_all(&registry, &project.config, &mut warnings)?;
    let search = SearchIndex::build(&registry, &project.config, &mut warnings);
    let graph = assemble(&registry, resolved, search, warnings);
    info!(
        documents = graph.documents.len(),
        warnings = graph.warnings.len(),
        "analysis finished"
    );
    Ok(graph)
}
