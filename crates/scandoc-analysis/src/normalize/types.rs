//! Type expression normalization.
//!
//! Parses raw TypeScript type annotation text into a [`TypeExpr`] and prints
//! it back deterministically. The printable form is derived, never stored
//! redundantly: `parse(print(t)) == t` for every supported shape. Text the
//! parser does not understand degrades to the raw source, never an error.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Built-in type names that get a documentation link from the resolution
/// configuration instead of a registry lookup.
const PRIMITIVES: &[&str] = &[
    "string", "number", "boolean", "any", "void", "unknown", "never", "null", "undefined",
    "object", "symbol", "bigint",
];

/// One parameter of a function type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionTypeParam {
    pub name: String,
    pub optional: bool,
    pub param_type: Option<TypeExpr>,
}

/// A normalized type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// A JS/TS built-in (`string`, `number`, ...). Linked to the configured
    /// global documentation target by the assembler.
    Primitive { name: String },
    /// A reference to a project declaration or ambient type, by name.
    Named { name: String },
    /// `NS.Member`
    Qualified { qualifier: String, member: String },
    Union(Vec<TypeExpr>),
    Intersection(Vec<TypeExpr>),
    /// `[A, B]` with an optional trailing `...C[]` rest element.
    Tuple {
        elements: Vec<TypeExpr>,
        rest: Option<Box<TypeExpr>>,
    },
    /// `Name<A, B>` (also `NS.Member<T>`).
    Generic { name: String, args: Vec<TypeExpr> },
    /// `T[]`
    Array(Box<TypeExpr>),
    /// `'asc'` — raw token including quotes.
    StringLiteral(String),
    /// `42`
    NumberLiteral(String),
    /// `` `(min-width: ${Foo}px)` `` — raw token including backticks.
    TemplateLiteral(String),
    /// `Base['key']` — index kept as the raw literal token.
    IndexedAccess { base: Box<TypeExpr>, index: String },
    /// `(a: T, b) => R`
    Function {
        params: Vec<FunctionTypeParam>,
        ret: Box<TypeExpr>,
    },
}

impl TypeExpr {
    /// Parse raw type annotation text. `None` when the text is outside the
    /// supported surface; callers then keep the raw text verbatim.
    pub fn parse(raw: &str) -> Option<TypeExpr> {
        let tokens = tokenize(raw)?;
        let mut parser = TypeParser {
            tokens: &tokens,
            pos: 0,
        };
        let expr = parser.parse_type()?;
        if parser.pos == tokens.len() {
            Some(expr)
        } else {
            None
        }
    }

    /// Base name for registry lookup: `Named` and `Generic` heads resolve
    /// against the project; everything else does not.
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named { name } => Some(name),
            TypeExpr::Generic { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Visit every linkable name in the expression: primitives, named
    /// references and generic heads, recursively.
    pub fn visit_names(&self, visit: &mut impl FnMut(&str)) {
        match self {
            TypeExpr::Primitive { name } | TypeExpr::Named { name } => visit(name),
            TypeExpr::Qualified { qualifier, .. } => visit(qualifier),
            TypeExpr::Union(parts) | TypeExpr::Intersection(parts) => {
                for part in parts {
                    part.visit_names(visit);
                }
            }
            TypeExpr::Tuple { elements, rest } => {
                for element in elements {
                    element.visit_names(visit);
                }
                if let Some(rest) = rest {
                    rest.visit_names(visit);
                }
            }
            TypeExpr::Generic { name, args } => {
                visit(name);
                for arg in args {
                    arg.visit_names(visit);
                }
            }
            TypeExpr::Array(inner) => inner.visit_names(visit),
            TypeExpr::IndexedAccess { base, .. } => base.visit_names(visit),
            TypeExpr::Function { params, ret } => {
                for param in params {
                    if let Some(t) = &param.param_type {
                        t.visit_names(visit);
                    }
                }
                ret.visit_names(visit);
            }
            TypeExpr::StringLiteral(_)
            | TypeExpr::NumberLiteral(_)
            | TypeExpr::TemplateLiteral(_) => {}
        }
    }

    fn needs_parens_in_array(&self) -> bool {
        matches!(
            self,
            TypeExpr::Union(_) | TypeExpr::Intersection(_) | TypeExpr::Function { .. }
        )
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive { name } | TypeExpr::Named { name } => write!(f, "{}", name),
            TypeExpr::Qualified { qualifier, member } => write!(f, "{}.{}", qualifier, member),
            TypeExpr::Union(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    if matches!(part, TypeExpr::Function { .. }) {
                        write!(f, "({})", part)?;
                    } else {
                        write!(f, "{}", part)?;
                    }
                }
                Ok(())
            }
            TypeExpr::Intersection(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " & ")?;
                    }
                    if matches!(part, TypeExpr::Union(_) | TypeExpr::Function { .. }) {
                        write!(f, "({})", part)?;
                    } else {
                        write!(f, "{}", part)?;
                    }
                }
                Ok(())
            }
            TypeExpr::Tuple { elements, rest } => {
                write!(f, "[")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                if let Some(rest) = rest {
                    if !elements.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "...{}", rest)?;
                }
                write!(f, "]")
            }
            TypeExpr::Generic { name, args } => {
                write!(f, "{}<", name)?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", a)?;
                }
                write!(f, ">")
            }
            TypeExpr::Array(inner) => {
                if inner.needs_parens_in_array() {
                    write!(f, "({})[]", inner)
                } else {
                    write!(f, "{}[]", inner)
                }
            }
            TypeExpr::StringLiteral(raw)
            | TypeExpr::NumberLiteral(raw)
            | TypeExpr::TemplateLiteral(raw) => write!(f, "{}", raw),
            TypeExpr::IndexedAccess { base, index } => write!(f, "{}[{}]", base, index),
            TypeExpr::Function { params, ret } => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p.name)?;
                    if p.optional {
                        write!(f, "?")?;
                    }
                    if let Some(t) = &p.param_type {
                        write!(f, ": {}", t)?;
                    }
                }
                write!(f, ") => {}", ret)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Template(String),
    Num(String),
    Pipe,
    Amp,
    Comma,
    Dot,
    DotDotDot,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Arrow,
    Colon,
    Question,
}

fn tokenize(raw: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '|' => {
                tokens.push(Token::Pipe);
                i += 1;
            }
            '&' => {
                tokens.push(Token::Amp);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '[' => {
                tokens.push(Token::LBracket);
                i += 1;
            }
            ']' => {
                tokens.push(Token::RBracket);
                i += 1;
            }
            '<' => {
                tokens.push(Token::Lt);
                i += 1;
            }
            '>' => {
                tokens.push(Token::Gt);
                i += 1;
            }
            ':' => {
                tokens.push(Token::Colon);
                i += 1;
            }
            '?' => {
                tokens.push(Token::Question);
                i += 1;
            }
            '=' if chars.get(i + 1) == Some(&'>') => {
                tokens.push(Token::Arrow);
                i += 2;
            }
            '.' => {
                if chars.get(i + 1) == Some(&'.') && chars.get(i + 2) == Some(&'.') {
                    tokens.push(Token::DotDotDot);
                    i += 3;
                } else {
                    tokens.push(Token::Dot);
                    i += 1;
                }
            }
            '\'' | '"' => {
                let quote = c;
                let start = i;
                i += 1;
                while i < chars.len() && chars[i] != quote {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
                if i >= chars.len() {
                    return None;
                }
                i += 1;
                tokens.push(Token::Str(chars[start..i].iter().collect()));
            }
            '`' => {
                let start = i;
                i += 1;
                while i < chars.len() && chars[i] != '`' {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
                if i >= chars.len() {
                    return None;
                }
                i += 1;
                tokens.push(Token::Template(chars[start..i].iter().collect()));
            }
            c if c.is_ascii_digit()
                || (c == '-' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) =>
            {
                let start = i;
                i += 1;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.') {
                    // A trailing `.` run belongs to a rest element, not the number.
                    if chars[i] == '.' && chars.get(i + 1) == Some(&'.') {
                        break;
                    }
                    i += 1;
                }
                tokens.push(Token::Num(chars[start..i].iter().collect()));
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$')
                {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            _ => return None,
        }
    }
    Some(tokens)
}

struct TypeParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Option<TypeExpr> {
        let mut parts = vec![self.parse_intersection()?];
        while self.eat(&Token::Pipe) {
            parts.push(self.parse_intersection()?);
        }
        if parts.len() == 1 {
            parts.pop()
        } else {
            Some(TypeExpr::Union(parts))
        }
    }

    fn parse_intersection(&mut self) -> Option<TypeExpr> {
        let mut parts = vec![self.parse_postfix()?];
        while self.eat(&Token::Amp) {
            parts.push(self.parse_postfix()?);
        }
        if parts.len() == 1 {
            parts.pop()
        } else {
            Some(TypeExpr::Intersection(parts))
        }
    }

    fn parse_postfix(&mut self) -> Option<TypeExpr> {
        let mut expr = self.parse_primary()?;
        while self.peek() == Some(&Token::LBracket) {
            match self.tokens.get(self.pos + 1) {
                Some(Token::RBracket) => {
                    self.pos += 2;
                    expr = TypeExpr::Array(Box::new(expr));
                }
                Some(Token::Str(index)) | Some(Token::Num(index))
                    if self.tokens.get(self.pos + 2) == Some(&Token::RBracket) =>
                {
                    let index = index.clone();
                    self.pos += 3;
                    expr = TypeExpr::IndexedAccess {
                        base: Box::new(expr),
                        index,
                    };
                }
                _ => break,
            }
        }
        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<TypeExpr> {
        match self.peek()?.clone() {
            Token::LParen => {
                if self.looks_like_function() {
                    self.parse_function()
                } else {
                    self.pos += 1;
                    let inner = self.parse_type()?;
                    if self.eat(&Token::RParen) {
                        Some(inner)
                    } else {
                        None
                    }
                }
            }
            Token::LBracket => self.parse_tuple(),
            Token::Str(_) => match self.bump()? {
                Token::Str(raw) => Some(TypeExpr::StringLiteral(raw)),
                _ => unreachable!(),
            },
            Token::Template(_) => match self.bump()? {
                Token::Template(raw) => Some(TypeExpr::TemplateLiteral(raw)),
                _ => unreachable!(),
            },
            Token::Num(_) => match self.bump()? {
                Token::Num(raw) => Some(TypeExpr::NumberLiteral(raw)),
                _ => unreachable!(),
            },
            Token::Ident(_) => self.parse_path(),
            _ => None,
        }
    }

    /// After a `(`, scan to the matching `)` and check for `=>`.
    fn looks_like_function(&self) -> bool {
        let mut depth = 0usize;
        let mut i = self.pos;
        while let Some(t) = self.tokens.get(i) {
            match t {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return self.tokens.get(i + 1) == Some(&Token::Arrow);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        false
    }

    fn parse_function(&mut self) -> Option<TypeExpr> {
        if !self.eat(&Token::LParen) {
            return None;
        }
        let mut params = Vec::new();
        while self.peek() != Some(&Token::RParen) {
            let name = match self.bump()? {
                Token::Ident(n) => n,
                Token::DotDotDot => match self.bump()? {
                    Token::Ident(n) => format!("...{}", n),
                    _ => return None,
                },
                _ => return None,
            };
            let optional = self.eat(&Token::Question);
            let param_type = if self.eat(&Token::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };
            params.push(FunctionTypeParam {
                name,
                optional,
                param_type,
            });
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        if !self.eat(&Token::RParen) || !self.eat(&Token::Arrow) {
            return None;
        }
        let ret = self.parse_type()?;
        Some(TypeExpr::Function {
            params,
            ret: Box::new(ret),
        })
    }

    fn parse_tuple(&mut self) -> Option<TypeExpr> {
        if !self.eat(&Token::LBracket) {
            return None;
        }
        let mut elements = Vec::new();
        let mut rest = None;
        loop {
            if self.eat(&Token::RBracket) {
                break;
            }
            if self.eat(&Token::DotDotDot) {
                rest = Some(Box::new(self.parse_postfix()?));
                if !self.eat(&Token::RBracket) {
                    return None;
                }
                break;
            }
            elements.push(self.parse_type()?);
            if !self.eat(&Token::Comma) {
                if self.eat(&Token::RBracket) {
                    break;
                }
                return None;
            }
        }
        Some(TypeExpr::Tuple { elements, rest })
    }

    fn parse_path(&mut self) -> Option<TypeExpr> {
        let mut segments = Vec::new();
        loop {
            match self.bump()? {
                Token::Ident(n) => segments.push(n),
                _ => return None,
            }
            if !self.eat(&Token::Dot) {
                break;
            }
        }
        let name = segments.join(".");

        if self.peek() == Some(&Token::Lt) {
            self.pos += 1;
            let mut args = vec![self.parse_type()?];
            while self.eat(&Token::Comma) {
                args.push(self.parse_type()?);
            }
            if !self.eat(&Token::Gt) {
                return None;
            }
            return Some(TypeExpr::Generic { name, args });
        }

        if segments.len() > 1 {
            let member = segments.pop().unwrap_or_default();
            return Some(TypeExpr::Qualified {
                qualifier: segments.join("."),
                member,
            });
        }
        if PRIMITIVES.contains(&name.as_str()) {
            Some(TypeExpr::Primitive { name })
        } else {
            Some(TypeExpr::Named { name })
        }
    }
}

/// Infer a primitive type from a literal default value, used when a member
/// has a default but no explicit annotation.
pub fn infer_from_literal(default_value: &str) -> Option<TypeExpr> {
    let v = default_value.trim();
    if v.starts_with('\'') || v.starts_with('"') || v.starts_with('`') {
        return Some(TypeExpr::Primitive {
            name: "string".into(),
        });
    }
    if v == "true" || v == "false" {
        return Some(TypeExpr::Primitive {
            name: "boolean".into(),
        });
    }
    if v.parse::<f64>().is_ok() {
        return Some(TypeExpr::Primitive {
            name: "number".into(),
        });
    }
    None
}
