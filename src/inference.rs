//! Type-to-schema inference.
//!
//! Walk a [`TypeExpr`] and produce the prop-types [`Schema`] describing the
//! JSON `encoding/json` would produce for it. `None` means the type has no
//! JSON form at all (channels, funcs, complex numbers, unknown packages).
//!
//! Rules, most specific first:
//! - predeclared identifiers map to leaves; other identifiers are named types
//!   and stay unresolved (a visible placeholder, never inlined).
//! - pointers and parentheses are transparent. Nilability is not turned into
//!   `isRequired`: the schema cannot tell a zero value from an absent one.
//! - `pkg.Member` resolves only through a small table of well-known types.
//! - `[]byte` is a string; other arrays are `arrayOf(elem)`, or a bare `array`
//!   when the element has no JSON form.
//! - maps are `objectOf(value)` (keys are always strings in JSON), or a bare
//!   `object` when the value has no JSON form.
//! - interfaces are `any`; nothing tracks which types satisfy them.
//! - anything else becomes an `<<unmatched ...>>` placeholder.
pub mod ident;
pub mod selector;
pub mod structs;

use crate::ast::TypeExpr;
use crate::schema::{Leaf, Placeholder, Schema};

pub use ident::infer_ident;
pub use selector::infer_selector;
pub use structs::infer_struct;

pub fn infer(ty: &TypeExpr) -> Option<Schema> {
    match ty {
        TypeExpr::Ident(id) => infer_ident(id),
        TypeExpr::Pointer(inner) | TypeExpr::Paren(inner) => infer(inner),
        TypeExpr::Selector { package, member } => infer_selector(package, member),
        TypeExpr::Array(elem) => Some(infer_array(elem)),
        TypeExpr::Map { value, .. } => Some(match infer(value) {
            Some(v) => Schema::object_of(v),
            None => Schema::Leaf(Leaf::Object),
        }),
        TypeExpr::Struct(fields) => Some(infer_struct(fields)),
        TypeExpr::Interface => Some(Schema::Leaf(Leaf::Any)),
        // encoding/json returns UnsupportedTypeError for these
        TypeExpr::Channel | TypeExpr::Function => None,
        TypeExpr::Other(kind) => Some(Schema::Unresolved(Placeholder::Unmatched(kind.clone()))),
    }
}

fn infer_array(elem: &TypeExpr) -> Schema {
    if let TypeExpr::Ident(id) = elem {
        if ident::is_byte(id) {
            return Schema::Leaf(Leaf::String);
        }
    }
    match infer(elem) {
        Some(e) => Schema::array_of(e),
        None => Schema::Leaf(Leaf::Array),
    }
}

// ------------------------------- Tests ------------------------------------ //
