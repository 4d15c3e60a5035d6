//! scandoc-core: foundation crate for the scandoc analysis engine.
//!
//! - Errors: per-domain thiserror enums with structured error codes
//! - Warnings: non-fatal degradation records accumulated through a run
//! - Config: resolution configuration supplied by the external loader
//! - Tracing: logging initialization

pub mod config;
pub mod errors;
pub mod tracing;
pub mod warnings;

pub use config::ResolutionConfig;
pub use errors::{ConfigError, PipelineError, ResolveError};
pub use warnings::{Warning, WarningKind};
