//! Go declaration reader.
//!
//! Pulls the top-level `type` declarations out of a Go source file and turns
//! their type expressions into [`TypeExpr`] trees. Everything else in the file
//! (imports, functions, vars, consts) is skipped by bracket balancing, so the
//! reader tolerates any syntax it does not need to understand as long as the
//! brackets match.
pub mod lexer;

use std::collections::HashSet;

use crate::ast::{Field, Ident, Position, SourceUnit, TypeExpr, TypeSpec};
use crate::tags;
use lexer::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl ParseError {
    pub fn new(line: u32, column: u32, message: impl Into<String>) -> Self {
        Self { line, column, message: message.into() }
    }
}

/// Parse one source file. `file` is only used to label positions.
pub fn parse_file(file: &str, src: &str) -> Result<SourceUnit, ParseError> {
    let toks = lexer::tokenize(src)?;
    let mut parser = Parser { toks, at: 0, file };
    let mut specs = parser.top_level()?;

    // file-scope resolution: references to types declared here are named types
    let declared: HashSet<String> = specs.iter().map(|s| s.name.clone()).collect();
    for spec in &mut specs {
        resolve(&mut spec.ty, &declared);
    }
    Ok(SourceUnit { file: file.to_string(), specs })
}

fn resolve(ty: &mut TypeExpr, scope: &HashSet<String>) {
    match ty {
        TypeExpr::Ident(id) | TypeExpr::Selector { package: id, .. } => {
            id.declared |= scope.contains(&id.name);
        }
        TypeExpr::Pointer(inner) | TypeExpr::Paren(inner) | TypeExpr::Array(inner) => {
            resolve(inner, scope)
        }
        TypeExpr::Map { key, value } => {
            resolve(key, scope);
            resolve(value, scope);
        }
        TypeExpr::Struct(fields) => {
            for field in fields {
                resolve(&mut field.ty, scope);
            }
        }
        TypeExpr::Interface | TypeExpr::Channel | TypeExpr::Function | TypeExpr::Other(_) => {}
    }
}

struct Parser<'a> {
    toks: Vec<Token>,
    at: usize,
    file: &'a str,
}

impl<'a> Parser<'a> {
    // ---- cursor ----

    fn peek(&self) -> &Token {
        // tokenize always ends with Eof, and we never advance past it
        &self.toks[self.at.min(self.toks.len() - 1)]
    }

    fn peek_at(&self, n: usize) -> &Token {
        &self.toks[(self.at + n).min(self.toks.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if tok.kind != TokenKind::Eof {
            self.at += 1;
        }
        tok
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let tok = self.peek();
        ParseError::new(tok.line, tok.column, message)
    }

    fn expected(&self, what: &str) -> ParseError {
        let tok = self.peek();
        let found = match tok.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Semi if tok.text == "\n" => "newline".to_string(),
            _ => format!("{:?}", tok.text),
        };
        self.error(format!("expected {what}, found {found}"))
    }

    fn expect_op(&mut self, op: &str) -> Result<Token, ParseError> {
        if self.peek().is_op(op) {
            Ok(self.advance())
        } else {
            Err(self.expected(&format!("'{op}'")))
        }
    }

    fn expect_ident(&mut self) -> Result<String, ParseError> {
        if self.peek().kind == TokenKind::Ident {
            Ok(self.advance().text)
        } else {
            Err(self.expected("identifier"))
        }
    }

    /// Offset of the first token after the bracket group opening at `peek_at(n)`.
    fn past_group(&self, mut n: usize) -> usize {
        let mut depth = 0usize;
        loop {
            let tok = self.peek_at(n);
            match tok.kind {
                TokenKind::Eof => return n,
                TokenKind::Op if matches!(tok.text.as_str(), "[" | "(" | "{") => depth += 1,
                TokenKind::Op if matches!(tok.text.as_str(), "]" | ")" | "}") => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return n + 1;
                    }
                }
                _ => {}
            }
            n += 1;
        }
    }

    /// At `open`; consume through its matching `close`.
    fn skip_balanced(&mut self, open: &str, close: &str) -> Result<(), ParseError> {
        let start = self.expect_op(open)?;
        let mut depth = 1usize;
        while depth > 0 {
            let tok = self.advance();
            match tok.kind {
                TokenKind::Eof => {
                    return Err(ParseError::new(start.line, start.column, format!("unclosed '{open}'")));
                }
                TokenKind::Op if tok.text == open => depth += 1,
                TokenKind::Op if tok.text == close => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    // ---- declarations ----

    fn top_level(&mut self) -> Result<Vec<TypeSpec>, ParseError> {
        let mut specs = Vec::new();
        let mut depth = 0usize;
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof => break,
                TokenKind::Keyword if depth == 0 && tok.text == "type" => {
                    self.type_decl(&mut specs)?;
                }
                TokenKind::Op if matches!(tok.text.as_str(), "(" | "[" | "{") => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::Op if matches!(tok.text.as_str(), ")" | "]" | "}") => {
                    if depth == 0 {
                        return Err(self.error(format!("unexpected '{}'", tok.text)));
                    }
                    depth -= 1;
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
        if depth > 0 {
            return Err(self.error("unbalanced brackets at end of file"));
        }
        Ok(specs)
    }

    fn type_decl(&mut self, specs: &mut Vec<TypeSpec>) -> Result<(), ParseError> {
        let kw = self.advance();
        let position = Position { file: self.file.to_string(), line: kw.line, column: kw.column };
        if self.peek().is_op("(") {
            self.advance();
            loop {
                let tok = self.peek();
                if tok.is_op(")") {
                    self.advance();
                    break;
                }
                if tok.kind == TokenKind::Semi {
                    self.advance();
                    continue;
                }
                specs.push(self.type_spec(&position)?);
                let tok = self.peek();
                if tok.kind != TokenKind::Semi && !tok.is_op(")") {
                    return Err(self.expected("';' or ')'"));
                }
            }
        } else {
            specs.push(self.type_spec(&position)?);
        }
        Ok(())
    }

    fn type_spec(&mut self, position: &Position) -> Result<TypeSpec, ParseError> {
        let name = self.expect_ident()?;
        let params = if self.at_type_params() { self.type_params()? } else { HashSet::new() };
        if self.peek().is_op("=") {
            self.advance();
        }
        let mut ty = self.type_expr()?;
        if !params.is_empty() {
            resolve(&mut ty, &params);
        }
        Ok(TypeSpec { name, position: position.clone(), ty })
    }

    /// `type T[P any] ...` versus the array type in `type T [N]int`.
    fn at_type_params(&self) -> bool {
        if !self.peek().is_op("[") || self.peek_at(1).kind != TokenKind::Ident {
            return false;
        }
        let third = self.peek_at(2);
        match third.kind {
            TokenKind::Ident => true,
            TokenKind::Keyword => {
                matches!(third.text.as_str(), "interface" | "func" | "chan" | "map" | "struct")
            }
            TokenKind::Op => matches!(third.text.as_str(), "," | "~" | "["),
            _ => false,
        }
    }

    /// Consume `[...]` and return the declared parameter names.
    fn type_params(&mut self) -> Result<HashSet<String>, ParseError> {
        let start = self.expect_op("[")?;
        let mut names = HashSet::new();
        let mut depth = 1usize;
        let mut expect_name = true;
        while depth > 0 {
            let tok = self.advance();
            match tok.kind {
                TokenKind::Eof => {
                    return Err(ParseError::new(start.line, start.column, "unclosed type parameter list"));
                }
                TokenKind::Ident if depth == 1 && expect_name => {
                    names.insert(tok.text);
                    expect_name = false;
                }
                TokenKind::Op => match tok.text.as_str() {
                    "[" | "(" | "{" => depth += 1,
                    "]" | ")" | "}" => depth -= 1,
                    "," if depth == 1 => expect_name = true,
                    _ => expect_name = false,
                },
                _ => expect_name = false,
            }
        }
        Ok(names)
    }

    // ---- types ----

    fn type_expr(&mut self) -> Result<TypeExpr, ParseError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Ident => self.type_name(),
            TokenKind::Op => match tok.text.as_str() {
                "*" => {
                    self.advance();
                    Ok(TypeExpr::Pointer(Box::new(self.type_expr()?)))
                }
                "(" => {
                    self.advance();
                    let inner = self.type_expr()?;
                    self.expect_op(")")?;
                    Ok(TypeExpr::Paren(Box::new(inner)))
                }
                "[" => {
                    if self.peek_at(1).is_op("]") {
                        self.advance();
                        self.advance();
                    } else {
                        // the length is an expression; we only need to get past it
                        self.skip_balanced("[", "]")?;
                    }
                    Ok(TypeExpr::Array(Box::new(self.type_expr()?)))
                }
                "<-" => {
                    self.advance();
                    if !self.peek().is_keyword("chan") {
                        return Err(self.expected("'chan'"));
                    }
                    self.advance();
                    self.type_expr()?;
                    Ok(TypeExpr::Channel)
                }
                _ => Err(self.expected("type")),
            },
            TokenKind::Keyword => match tok.text.as_str() {
                "map" => {
                    self.advance();
                    self.expect_op("[")?;
                    let key = self.type_expr()?;
                    self.expect_op("]")?;
                    let value = self.type_expr()?;
                    Ok(TypeExpr::Map { key: Box::new(key), value: Box::new(value) })
                }
                "chan" => {
                    self.advance();
                    if self.peek().is_op("<-") {
                        self.advance();
                    }
                    self.type_expr()?;
                    Ok(TypeExpr::Channel)
                }
                "func" => {
                    self.advance();
                    self.signature()?;
                    Ok(TypeExpr::Function)
                }
                "interface" => {
                    self.advance();
                    self.skip_balanced("{", "}")?;
                    Ok(TypeExpr::Interface)
                }
                "struct" => self.struct_type(),
                _ => Err(self.expected("type")),
            },
            _ => Err(self.expected("type")),
        }
    }

    /// `Name`, `pkg.Name`, optionally instantiated with `[Args]`.
    fn type_name(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.expect_ident()?;
        let ty = if self.peek().is_op(".") {
            self.advance();
            let member = self.expect_ident()?;
            TypeExpr::Selector { package: Ident { name: first, declared: false }, member }
        } else {
            TypeExpr::Ident(Ident { name: first, declared: false })
        };
        if self.peek().is_op("[") {
            self.skip_balanced("[", "]")?;
            return Ok(TypeExpr::Other("instantiation".to_string()));
        }
        Ok(ty)
    }

    fn signature(&mut self) -> Result<(), ParseError> {
        self.skip_balanced("(", ")")?;
        if self.peek().is_op("(") {
            self.skip_balanced("(", ")")?;
        } else if self.at_type_start() {
            self.type_expr()?;
        }
        Ok(())
    }

    fn at_type_start(&self) -> bool {
        let tok = self.peek();
        match tok.kind {
            TokenKind::Ident => true,
            TokenKind::Op => matches!(tok.text.as_str(), "*" | "[" | "(" | "<-"),
            TokenKind::Keyword => {
                matches!(tok.text.as_str(), "map" | "chan" | "func" | "interface" | "struct")
            }
            _ => false,
        }
    }

    fn struct_type(&mut self) -> Result<TypeExpr, ParseError> {
        self.advance();
        self.expect_op("{")?;
        let mut fields = Vec::new();
        loop {
            let tok = self.peek();
            if tok.is_op("}") {
                self.advance();
                break;
            }
            if tok.kind == TokenKind::Semi {
                self.advance();
                continue;
            }
            fields.push(self.field_decl()?);
            let tok = self.peek();
            if tok.kind != TokenKind::Semi && !tok.is_op("}") {
                return Err(self.expected("';' or '}'"));
            }
        }
        Ok(TypeExpr::Struct(fields))
    }

    fn field_decl(&mut self) -> Result<Field, ParseError> {
        let (names, ty) = if self.peek().is_op("*") {
            self.advance();
            (Vec::new(), TypeExpr::Pointer(Box::new(self.type_name()?)))
        } else if self.peek().kind == TokenKind::Ident {
            let next = self.peek_at(1);
            // `Base[int]` is an embedded instantiation, `Name [4]int` a named array
            let end = if next.is_op("[") { self.peek_at(self.past_group(1)) } else { next };
            let embedded = next.is_op(".")
                || end.is_op("}")
                || matches!(end.kind, TokenKind::Semi | TokenKind::String);
            if embedded {
                (Vec::new(), self.type_name()?)
            } else {
                let mut names = vec![self.expect_ident()?];
                while self.peek().is_op(",") {
                    self.advance();
                    names.push(self.expect_ident()?);
                }
                (names, self.type_expr()?)
            }
        } else {
            return Err(self.expected("field name or embedded type"));
        };

        let tag = if self.peek().kind == TokenKind::String {
            let lit = self.advance();
            let tag = tags::unquote(&lit.text)
                .ok_or_else(|| ParseError::new(lit.line, lit.column, "invalid struct tag literal"))?;
            Some(tag)
        } else {
            None
        };
        Ok(Field { names, ty, tag })
    }
}

// ------------------------------- Tests ------------------------------------ //
