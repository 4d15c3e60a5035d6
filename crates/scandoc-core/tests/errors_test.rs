//! Tests for the scandoc error taxonomy.

use scandoc_core::errors::error_code::ScandocErrorCode;
use scandoc_core::errors::*;

#[test]
fn every_error_has_a_code() {
    let config = ConfigError::Missing;
    assert!(!config.error_code().is_empty());

    let resolve = ResolveError::CyclicInheritance {
        first: "A".into(),
        second: "B".into(),
    };
    assert_eq!(resolve.error_code(), "CYCLIC_INHERITANCE");
}

#[test]
fn from_conversions_into_pipeline_error() {
    let config = ConfigError::Missing;
    let pipeline: PipelineError = config.into();
    assert!(matches!(pipeline, PipelineError::Config(ConfigError::Missing)));

    let resolve = ResolveError::CyclicInheritance {
        first: "A".into(),
        second: "B".into(),
    };
    let pipeline: PipelineError = resolve.into();
    assert_eq!(pipeline.error_code(), "CYCLIC_INHERITANCE");
}

#[test]
fn cyclic_inheritance_names_both_participants() {
    let err = ResolveError::CyclicInheritance {
        first: "A".into(),
        second: "B".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("'A'"));
    assert!(msg.contains("'B'"));
}

#[test]
fn coded_string_includes_bracketed_code() {
    let err = ConfigError::InvalidValue {
        field: "search_content_threshold".into(),
        message: "must be greater than zero".into(),
    };
    assert!(err.coded_string().starts_with("[CONFIG_ERROR]"));
}
