// Syntactic input model: what the declaration reader hands to inference.
// Read-only once parsed; nothing here knows about prop-types.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Ident(Ident),
    Pointer(Box<TypeExpr>),
    Paren(Box<TypeExpr>),
    Array(Box<TypeExpr>),        // slices and fixed-length arrays alike
    Map {
        key: Box<TypeExpr>,      // never consulted: JSON object keys are strings
        value: Box<TypeExpr>,
    },
    Struct(Vec<Field>),          // declaration order
    Interface,
    Selector { package: Ident, member: String },
    Channel,
    Function,
    Other(String),               // grammar we parse but do not classify
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    /// Resolves to a type or type parameter declared in the same source unit.
    pub declared: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub names: Vec<String>,      // empty for embedded fields
    pub ty: TypeExpr,
    pub tag: Option<String>,     // already unquoted
}

/// A `type Name ...` spec together with where its declaration starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub position: Position,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub file: String,
    pub specs: Vec<TypeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident(Ident { name: name.into(), declared: false })
    }

    pub fn selector(package: impl Into<String>, member: impl Into<String>) -> Self {
        TypeExpr::Selector {
            package: Ident { name: package.into(), declared: false },
            member: member.into(),
        }
    }
}

impl Field {
    pub fn new(names: &[&str], ty: TypeExpr, tag: Option<&str>) -> Self {
        Field {
            names: names.iter().map(|n| n.to_string()).collect(),
            ty,
            tag: tag.map(str::to_string),
        }
    }
}

/// Visible outside its package: starts with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.file.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.file, self.line, self.column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_names_start_upper_case() {
        assert!(is_exported("Name"));
        assert!(is_exported("Ünicode"));
        assert!(!is_exported("name"));
        assert!(!is_exported("_Name"));
        assert!(!is_exported(""));
    }

    #[test]
    fn position_display() {
        let p = Position { file: "models/user.go".into(), line: 12, column: 1 };
        assert_eq!(p.to_string(), "models/user.go:12:1");
        let p = Position { file: String::new(), line: 3, column: 7 };
        assert_eq!(p.to_string(), "3:7");
    }
}
