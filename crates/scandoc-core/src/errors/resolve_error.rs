//! Resolution errors.

use super::error_code::{self, ScandocErrorCode};

/// Errors raised while resolving inheritance chains against the registry.
///
/// Cyclic inheritance is the single fatal case in the whole analysis core;
/// everything else degrades to a warning.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Cyclic inheritance detected between '{first}' and '{second}'")]
    CyclicInheritance { first: String, second: String },
}

impl ScandocErrorCode for ResolveError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CyclicInheritance { .. } => error_code::CYCLIC_INHERITANCE,
        }
    }
}
