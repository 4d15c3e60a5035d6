//! Normalization: decorator metadata, binding syntax unification, and the
//! printable type model.

pub mod bindings;
pub mod metadata;
pub mod types;

pub use bindings::BindingSpec;
pub use types::TypeExpr;
