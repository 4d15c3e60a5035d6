//! Top-level pipeline error.

use super::config_error::ConfigError;
use super::error_code::ScandocErrorCode;
use super::resolve_error::ResolveError;

/// Top-level error for a whole analysis run. A run either completes with a
/// document graph or fails with one of these; no partial graph is produced.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl ScandocErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Resolve(e) => e.error_code(),
        }
    }
}
