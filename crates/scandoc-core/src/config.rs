//! Resolution configuration supplied by the external loader.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default threshold above which entity content is excluded from the search
/// index (inlined base64 assets and the like).
pub const DEFAULT_SEARCH_CONTENT_THRESHOLD: usize = 50_000;

const MDN_GLOBALS: &str =
    "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects";

/// Interfaces that mark a class as a route guard. A capability-set check,
/// not a name-prefix check.
pub const DEFAULT_GUARD_INTERFACES: &[&str] = &[
    "CanActivate",
    "CanActivateChild",
    "CanDeactivate",
    "CanLoad",
    "CanMatch",
    "Resolve",
];

/// Configuration for one analysis run.
///
/// Built by the external loader alongside the source file set. An invalid
/// configuration aborts the run before any extraction happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Documentation link targets for global built-in types. Keys are the
    /// type names as written in source (`string`, `number`, ...).
    pub global_doc_links: BTreeMap<String, String>,
    /// Ambient type names the project considers known externals
    /// (e.g. `Observable`, `EventEmitter`).
    pub ambient_types: Vec<String>,
    /// Interfaces whose implementation classifies a class as a Guard.
    pub guard_interfaces: Vec<String>,
    /// Entities whose indexable text exceeds this many bytes are indexed by
    /// name only.
    pub search_content_threshold: usize,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        let mut links = BTreeMap::new();
        for name in [
            "string", "number", "boolean", "object", "symbol", "bigint", "void", "undefined",
            "null", "Date", "Promise", "Map", "Set", "Array", "RegExp", "Error", "Function",
        ] {
            links.insert(name.to_string(), format!("{}/{}", MDN_GLOBALS, name));
        }
        Self {
            global_doc_links: links,
            ambient_types: Vec::new(),
            guard_interfaces: DEFAULT_GUARD_INTERFACES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            search_content_threshold: DEFAULT_SEARCH_CONTENT_THRESHOLD,
        }
    }
}

impl ResolutionConfig {
    /// Validate the configuration. Called once at the start of a run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_content_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search_content_threshold".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.guard_interfaces.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "guard_interfaces".into(),
                message: "guard capability set must not be empty".into(),
            });
        }
        if self
            .guard_interfaces
            .iter()
            .chain(self.ambient_types.iter())
            .any(|n| n.trim().is_empty())
        {
            return Err(ConfigError::ValidationFailed {
                field: "guard_interfaces".into(),
                message: "empty interface name".into(),
            });
        }
        Ok(())
    }

    /// Documentation link for a global built-in, if configured.
    pub fn doc_link_for(&self, type_name: &str) -> Option<&str> {
        self.global_doc_links.get(type_name).map(String::as_str)
    }

    /// Whether `interface_name` is in the guard capability set.
    pub fn is_guard_interface(&self, interface_name: &str) -> bool {
        self.guard_interfaces
            .iter()
            .any(|g| g == interface_name)
    }

    /// Whether `type_name` is a declared ambient external. References to
    /// ambient types are known-good even though no document exists for them.
    pub fn is_ambient_type(&self, type_name: &str) -> bool {
        self.ambient_types.iter().any(|t| t == type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(ResolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let config = ResolutionConfig {
            search_content_threshold: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn builtin_doc_links_resolve() {
        let config = ResolutionConfig::default();
        assert!(config.doc_link_for("string").unwrap().contains("Global_Objects/string"));
        assert!(config.doc_link_for("Todo").is_none());
    }

    #[test]
    fn ambient_type_set_check() {
        let config = ResolutionConfig {
            ambient_types: vec!["Observable".into(), "EventEmitter".into()],
            ..Default::default()
        };
        assert!(config.is_ambient_type("Observable"));
        assert!(!config.is_ambient_type("Todo"));
    }

    #[test]
    fn guard_capability_set_check() {
        let config = ResolutionConfig::default();
        assert!(config.is_guard_interface("CanActivate"));
        assert!(config.is_guard_interface("Resolve"));
        assert!(!config.is_guard_interface("OnInit"));
    }
}
