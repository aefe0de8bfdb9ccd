use crate::ast::Ident;
use crate::schema::{Leaf, Placeholder, Schema};

/// How a predeclared Go identifier maps onto the schema vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Leaf(Leaf),
    /// No JSON encoding exists (`encoding/json` rejects complex numbers).
    Unrepresentable,
}

pub fn builtin(name: &str) -> Option<Builtin> {
    match name {
        "bool" => Some(Builtin::Leaf(Leaf::Bool)),
        "uint8" | "uint16" | "uint32" | "uint64"
        | "int8" | "int16" | "int32" | "int64"
        | "float32" | "float64"
        | "byte" | "rune"
        | "uint" | "int" | "uintptr" => Some(Builtin::Leaf(Leaf::Number)),
        "complex64" | "complex128" => Some(Builtin::Unrepresentable),
        "string" => Some(Builtin::Leaf(Leaf::String)),
        // alias of interface{}
        "any" => Some(Builtin::Leaf(Leaf::Any)),
        _ => None,
    }
}

/// `[]byte` serializes as base64 text; `uint8` is the same type as `byte`.
pub fn is_byte(id: &Ident) -> bool {
    !id.declared && matches!(id.name.as_str(), "byte" | "uint8")
}

pub fn infer_ident(id: &Ident) -> Option<Schema> {
    if !id.declared {
        match builtin(&id.name) {
            Some(Builtin::Leaf(leaf)) => return Some(Schema::Leaf(leaf)),
            Some(Builtin::Unrepresentable) => return None,
            None => {}
        }
    }
    // Named type. Not followed to its declaration yet, so leave a visible marker.
    Some(Schema::Unresolved(Placeholder::Ident { name: id.name.clone(), declared: id.declared }))
}
