//! Declaration-level assembly: one output record per `type` spec.
use serde::Serialize;
use tracing::debug;

use crate::ast::{Position, SourceUnit, TypeSpec};
use crate::inference::infer;
use crate::schema::{format_optional, FormatOptions, Schema};

/// A prop-types declaration for one Go type.
///
/// `schema == None` means the type has no JSON form. The declaration is still
/// emitted, as `null`, unlike struct fields of such types which are dropped.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropTypeDecl {
    pub name: String,
    #[serde(serialize_with = "serialize_display")]
    pub position: Position,
    pub schema: Option<Schema>,
}

impl PropTypeDecl {
    pub fn from_spec(spec: &TypeSpec) -> Self {
        let schema = infer(&spec.ty);
        match &schema {
            None => debug!(name = %spec.name, at = %spec.position, "type has no JSON form; emitting null"),
            Some(schema) => {
                for kind in schema.unmatched_kinds() {
                    debug!(name = %spec.name, at = %spec.position, kind, "no inference rule; emitting placeholder");
                }
            }
        }
        Self { name: spec.name.clone(), position: spec.position.clone(), schema }
    }

    /// Render as a JavaScript `const`, preceded by a comment with its origin.
    pub fn format(&self, opts: &FormatOptions) -> String {
        format!(
            "// {}\nconst {} = {};",
            self.position,
            self.name,
            format_optional(self.schema.as_ref(), opts, 0),
        )
    }
}

/// Every type declaration of a unit, in source order.
pub fn inspect_unit(unit: &SourceUnit) -> Vec<PropTypeDecl> {
    unit.specs.iter().map(PropTypeDecl::from_spec).collect()
}

fn serialize_display<S: serde::Serializer>(p: &Position, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(p)
}
