//! Error taxonomy for the scandoc engine.
//!
//! Fatal errors only. Anything recoverable is a [`crate::warnings::Warning`].

pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod resolve_error;

pub use config_error::ConfigError;
pub use error_code::ScandocErrorCode;
pub use pipeline_error::PipelineError;
pub use resolve_error::ResolveError;
