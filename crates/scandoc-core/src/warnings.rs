//! Non-fatal warnings recorded during an analysis run.

use serde::{Deserialize, Serialize};

/// Category of a recorded warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarningKind {
    /// A whole file failed to produce a syntax tree.
    UnparseableFile,
    /// A single declaration was skipped; siblings are unaffected.
    SkippedDeclaration,
    /// Decorator arguments could not be evaluated structurally.
    MalformedMetadata,
    /// A type expression could not be parsed; raw text is used verbatim.
    UnprintableType,
    /// A `{@link}` target was not found in the registry.
    UnresolvedLink,
    /// Entity content exceeded the search threshold; indexed by name only.
    OversizedSearchContent,
}

/// One non-fatal issue encountered during analysis. Warnings never abort a
/// run; they are collected on the document graph for the embedder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    /// File the warning refers to, when known.
    pub file: Option<String>,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, file: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind,
            file: file.map(str::to_string),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}: {}", file, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_file_when_present() {
        let w = Warning::new(WarningKind::UnresolvedLink, Some("a.ts"), "no target");
        assert_eq!(w.to_string(), "a.ts: no target");

        let w = Warning::new(WarningKind::MalformedMetadata, None, "bad object");
        assert_eq!(w.to_string(), "bad object");
    }
}
