use crate::ast::Ident;
use crate::schema::{Leaf, Schema};

/// Cross-package types with one unambiguous JSON encoding.
pub const WELL_KNOWN: &[(&str, &str, Leaf)] = &[
    ("time", "Time", Leaf::String),      // RFC 3339 text
    ("bson", "ObjectId", Leaf::String),  // hex text
];

/// `pkg.Member` is only understood when it is in [`WELL_KNOWN`]; resolving
/// arbitrary packages is out of reach for a syntax-only pass.
pub fn infer_selector(package: &Ident, member: &str) -> Option<Schema> {
    if package.declared {
        return None;
    }
    WELL_KNOWN
        .iter()
        .find(|(pkg, name, _)| *pkg == package.name && *name == member)
        .map(|(_, _, leaf)| Schema::Leaf(*leaf))
}
