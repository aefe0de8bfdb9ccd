// Go tokenizer: just enough fidelity to find type declarations and skip
// everything else by bracket balancing.

use super::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Keyword,
    Number,   // int, float, imaginary
    Char,     // rune literal
    String,   // interpreted or raw, `text` keeps the quotes
    Op,
    Semi,     // explicit `;` or inserted at a newline / EOF
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type", "var",
];

// longest first so the scan below can take the first match
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...",
    "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=", "+=", "-=",
    "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^",
    "+", "-", "*", "/", "%", "&", "|", "^", "<", ">", "=", "!",
    "(", ")", "[", "]", "{", "}", ",", ";", ".", ":", "~",
];

impl Token {
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    pub fn is_keyword(&self, kw: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == kw
    }

    /// Semicolon insertion applies after this token when a line ends.
    fn ends_statement(&self) -> bool {
        match self.kind {
            TokenKind::Ident | TokenKind::Number | TokenKind::Char | TokenKind::String => true,
            TokenKind::Keyword => {
                matches!(self.text.as_str(), "break" | "continue" | "fallthrough" | "return")
            }
            TokenKind::Op => matches!(self.text.as_str(), "++" | "--" | ")" | "]" | "}"),
            TokenKind::Semi | TokenKind::Eof => false,
        }
    }
}

const BOM: char = '\u{feff}';

pub fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
    // a byte order mark is only allowed as the very first character
    let at = if src.starts_with(BOM) { BOM.len_utf8() } else { 0 };
    Lexer { src, at, line: 1, line_start: 0, out: Vec::new() }.run()
}

struct Lexer<'a> {
    src: &'a str,
    at: usize,
    line: u32,
    line_start: usize,
    out: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(c) = self.peek() {
            match c {
                '\n' => {
                    self.insert_semi();
                    self.bump();
                }
                ' ' | '\t' | '\r' => self.bump(),
                '/' if self.rest().starts_with("//") => {
                    while let Some(c) = self.peek() {
                        if c == '\n' { break; }
                        self.bump();
                    }
                }
                '/' if self.rest().starts_with("/*") => self.block_comment()?,
                '"' => self.interpreted_string()?,
                '`' => self.raw_string()?,
                '\'' => self.rune()?,
                c if c.is_ascii_digit() => self.number(),
                '.' if self.rest()[1..].starts_with(|c: char| c.is_ascii_digit()) => self.number(),
                c if c == '_' || c.is_alphabetic() => self.word(),
                _ => self.operator()?,
            }
        }
        self.insert_semi();
        let (line, column) = self.here();
        self.out.push(Token { kind: TokenKind::Eof, text: String::new(), line, column });
        Ok(self.out)
    }

    fn rest(&self) -> &'a str { &self.src[self.at..] }

    fn peek(&self) -> Option<char> { self.rest().chars().next() }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.at += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.line_start = self.at;
            }
        }
    }

    fn here(&self) -> (u32, u32) {
        (self.line, (self.at - self.line_start + 1) as u32)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let (line, column) = self.here();
        ParseError::new(line, column, message)
    }

    fn insert_semi(&mut self) {
        if self.out.last().is_some_and(Token::ends_statement) {
            let (line, column) = self.here();
            self.out.push(Token { kind: TokenKind::Semi, text: "\n".into(), line, column });
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: u32, column: u32) {
        let text = self.src[start..self.at].to_string();
        self.out.push(Token { kind, text, line, column });
    }

    fn block_comment(&mut self) -> Result<(), ParseError> {
        let start = self.here();
        self.bump();
        self.bump();
        let mut newline = false;
        loop {
            match self.peek() {
                None => return Err(ParseError::new(start.0, start.1, "comment not terminated")),
                Some('*') if self.rest().starts_with("*/") => {
                    self.bump();
                    self.bump();
                    break;
                }
                Some(c) => {
                    newline |= c == '\n';
                    self.bump();
                }
            }
        }
        // a comment spanning lines acts like a newline
        if newline {
            self.insert_semi();
        }
        Ok(())
    }

    fn interpreted_string(&mut self) -> Result<(), ParseError> {
        let (line, column) = self.here();
        let start = self.at;
        self.bump();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(ParseError::new(line, column, "string literal not terminated"));
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some('"') => {
                    self.bump();
                    break;
                }
                Some(_) => self.bump(),
            }
        }
        self.push(TokenKind::String, start, line, column);
        Ok(())
    }

    fn raw_string(&mut self) -> Result<(), ParseError> {
        let (line, column) = self.here();
        let start = self.at;
        self.bump();
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::new(line, column, "raw string literal not terminated"));
                }
                Some('`') => {
                    self.bump();
                    break;
                }
                Some(_) => self.bump(),
            }
        }
        self.push(TokenKind::String, start, line, column);
        Ok(())
    }

    fn rune(&mut self) -> Result<(), ParseError> {
        let (line, column) = self.here();
        let start = self.at;
        self.bump();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(ParseError::new(line, column, "rune literal not terminated"));
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some('\'') => {
                    self.bump();
                    break;
                }
                Some(_) => self.bump(),
            }
        }
        self.push(TokenKind::Char, start, line, column);
        Ok(())
    }

    fn number(&mut self) {
        let (line, column) = self.here();
        let start = self.at;
        let mut prev = '\0';
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-') && matches!(prev, 'e' | 'E' | 'p' | 'P');
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                prev = c;
                self.bump();
            } else {
                break;
            }
        }
        self.push(TokenKind::Number, start, line, column);
    }

    fn word(&mut self) {
        let (line, column) = self.here();
        let start = self.at;
        while let Some(c) = self.peek() {
            if c == '_' || c.is_alphanumeric() { self.bump(); } else { break; }
        }
        let kind = if KEYWORDS.contains(&&self.src[start..self.at]) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        self.push(kind, start, line, column);
    }

    fn operator(&mut self) -> Result<(), ParseError> {
        let (line, column) = self.here();
        let Some(op) = OPERATORS.iter().find(|op| self.rest().starts_with(**op)) else {
            let c = self.peek().unwrap_or_default();
            return Err(self.error(format!("unexpected character {c:?}")));
        };
        let start = self.at;
        for _ in 0..op.len() {
            self.bump();
        }
        let kind = if *op == ";" { TokenKind::Semi } else { TokenKind::Op };
        self.push(kind, start, line, column);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_text(src: &str) -> Vec<(TokenKind, String)> {
        tokenize(src).unwrap().into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn semicolons_inserted_after_line_enders() {
        let toks = kinds_and_text("type A int\ntype B struct {\n\tX int\n}\n");
        let semis = toks.iter().filter(|(k, _)| *k == TokenKind::Semi).count();
        // after `int`, after `int` inside the struct, after `}`
        assert_eq!(semis, 3);
        assert_eq!(toks.last().unwrap().0, TokenKind::Eof);
    }

    #[test]
    fn no_semicolon_after_open_brace_or_operator() {
        let toks = kinds_and_text("struct {\n}");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Keyword, "struct".into()),
                (TokenKind::Op, "{".into()),
                (TokenKind::Op, "}".into()),
                (TokenKind::Semi, "\n".into()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn comments_and_literals() {
        let src = "a /* one\ntwo */ b // tail\n`raw\nstring` 'x' 1.5e-3 \"s\\\"q\"";
        let toks = kinds_and_text(src);
        let kinds: Vec<_> = toks.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident, TokenKind::Semi, TokenKind::Ident, TokenKind::Semi,
                TokenKind::String, TokenKind::Char, TokenKind::Number, TokenKind::String,
                TokenKind::Semi, TokenKind::Eof,
            ]
        );
        assert_eq!(toks[4].1, "`raw\nstring`");
        assert_eq!(toks[6].1, "1.5e-3");
    }

    #[test]
    fn positions_are_one_based_byte_columns() {
        let toks = tokenize("package p\n\n\ttype T int").unwrap();
        let ty = toks.iter().find(|t| t.is_keyword("type")).unwrap();
        assert_eq!((ty.line, ty.column), (3, 2));
    }

    #[test]
    fn leading_byte_order_mark_is_skipped() {
        let toks = kinds_and_text("\u{feff}package p");
        assert_eq!(toks[0], (TokenKind::Keyword, "package".into()));
        assert!(tokenize("a \u{feff}").is_err());
    }

    #[test]
    fn longest_operator_wins() {
        let toks = kinds_and_text("<-chan ... :=");
        assert_eq!(toks[0], (TokenKind::Op, "<-".into()));
        assert_eq!(toks[1], (TokenKind::Keyword, "chan".into()));
        assert_eq!(toks[2], (TokenKind::Op, "...".into()));
        assert_eq!(toks[3], (TokenKind::Op, ":=".into()));
    }

    #[test]
    fn unterminated_input_is_an_error() {
        assert!(tokenize("\"abc").is_err());
        assert!(tokenize("`abc").is_err());
        assert!(tokenize("/* abc").is_err());
        let err = tokenize("a\n  @").unwrap_err();
        assert_eq!((err.line, err.column), (2, 3));
    }
}
