use crate::ast::{is_exported, Field};
use crate::schema::{Schema, ShapeEntry};
use crate::tags;

/// Tag name that tells `encoding/json` to leave a field out.
const SKIP: &str = "-";

/// Project struct fields onto shape entries, in declaration order.
///
/// Unexported fields and fields tagged `json:"-"` are left out. So are fields
/// whose type has no JSON encoding, and unlike a top-level declaration they
/// leave no `null` behind.
pub fn infer_struct(fields: &[Field]) -> Schema {
    let mut entries = Vec::new();
    for field in fields {
        let Some(schema) = super::infer(&field.ty) else {
            continue;
        };
        for name in &field.names {
            // invisible to the json encoder
            if !is_exported(name) {
                continue;
            }
            let mut entry_name = name.as_str();
            let mut _omit_empty = false;
            let json = field.tag.as_deref().and_then(|tag| tags::lookup_tag(tag, "json"));
            if let Some(json) = json.as_deref() {
                let (tag_name, options) = tags::parse_json_tag(json);
                if tag_name == SKIP {
                    continue;
                }
                if !tag_name.is_empty() {
                    entry_name = tag_name;
                }
                // TODO: give omitempty fields an optional marker once Schema can express one
                _omit_empty = options.contains("omitempty");
            }
            entries.push(ShapeEntry::new(entry_name, schema.clone()));
        }
    }
    Schema::Shape(entries)
}
