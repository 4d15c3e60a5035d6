//! Parser construction.
//!
//! A fresh parser is built per file so extraction can run in parallel
//! without shared mutable state. `.tsx` files get the TSX grammar, every
//! other extension gets plain TypeScript.

use tree_sitter::{Parser, Tree};

/// Parse a source file. Returns `None` when the parser cannot be
/// configured or produces no tree; syntax errors inside an otherwise
/// parseable file still yield a tree.
pub fn parse_source(path: &str, text: &str) -> Option<Tree> {
    let language = if path.ends_with(".tsx") {
        tree_sitter_typescript::LANGUAGE_TSX
    } else {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT
    };
    let mut parser = Parser::new();
    parser.set_language(&language.into()).ok()?;
    parser.parse(text, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_typescript() {
        let tree = parse_source("todo.ts", "export class Todo {}").unwrap();
        assert_eq!(tree.root_node().kind(), "program");
        assert!(!tree.root_node().has_error());
    }

    #[test]
    fn tsx_extension_selects_tsx_grammar() {
        let tree = parse_source("app.tsx", "const x = <div>hi</div>;").unwrap();
        assert!(!tree.root_node().has_error());
    }
}
