//! Collected declarations for a run, keyed by source file in discovery order.
use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::decl::PropTypeDecl;
use crate::schema::FormatOptions;

#[derive(Clone, Debug, Default)]
pub struct Report {
    pub units: IndexMap<PathBuf, Vec<PropTypeDecl>>,
}

impl Report {
    pub fn new() -> Self { Self::default() }

    /// Later inserts of the same path replace its declarations in place.
    pub fn insert(&mut self, path: PathBuf, decls: Vec<PropTypeDecl>) {
        self.units.insert(path, decls);
    }

    pub fn extend(&mut self, other: Report) {
        for (path, decls) in other.units {
            self.insert(path, decls);
        }
    }

    pub fn declaration_count(&self) -> usize {
        self.units.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.declaration_count() == 0
    }

    /// JavaScript source: optional import line, then every declaration,
    /// separated by blank lines.
    pub fn render(&self, opts: &FormatOptions, header: bool) -> String {
        let mut blocks: Vec<String> = Vec::new();
        if header {
            blocks.push(format!("import {} from 'prop-types';", opts.import_alias));
        }
        blocks.extend(self.units.values().flatten().map(|d| d.format(opts)));
        if blocks.is_empty() {
            return String::new();
        }
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }

    /// JSON-ish debug view: schema trees next to their rendered text.
    pub fn to_json(&self, opts: &FormatOptions) -> Value {
        let mut files = serde_json::Map::new();
        for (path, decls) in &self.units {
            let entries = decls
                .iter()
                .map(|d| {
                    json!({
                        "name": d.name,
                        "position": d.position.to_string(),
                        "schema": d.schema,
                        "rendered": d.format(opts),
                    })
                })
                .collect::<Vec<_>>();
            files.insert(path.display().to_string(), Value::Array(entries));
        }
        Value::Object(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::inspect_unit;
    use crate::parse::parse_file;

    fn report_of(files: &[(&str, &str)]) -> Report {
        let mut report = Report::new();
        for (name, src) in files {
            let unit = parse_file(name, src).unwrap();
            report.insert(PathBuf::from(name), inspect_unit(&unit));
        }
        report
    }

    #[test]
    fn render_joins_declarations_across_files() {
        let report = report_of(&[
            ("b.go", "package p\ntype B bool\n"),
            ("a.go", "package p\ntype A []string\ntype F func()\n"),
        ]);
        assert_eq!(report.declaration_count(), 3);
        let opts = FormatOptions::default();
        assert_eq!(
            report.render(&opts, false),
            "// b.go:2:1\nconst B = PropTypes.bool;\n\n\
             // a.go:2:1\nconst A = PropTypes.arrayOf(PropTypes.string);\n\n\
             // a.go:3:1\nconst F = null;\n"
        );
        let with_header = report.render(&opts, true);
        assert!(with_header.starts_with("import PropTypes from 'prop-types';\n\n// b.go:2:1\n"));
    }

    #[test]
    fn render_is_repeatable_and_empty_stays_empty() {
        let report = report_of(&[("m.go", "package p\ntype M map[string]interface{}\n")]);
        let opts = FormatOptions::default();
        assert_eq!(report.render(&opts, true), report.render(&opts, true));
        assert_eq!(Report::new().render(&opts, false), "");
        assert!(Report::new().is_empty());
    }

    #[test]
    fn json_view_keeps_order_and_nulls() {
        let report = report_of(&[("x.go", "package p\ntype Z chan int\ntype Y struct{ N int }\n")]);
        let v = report.to_json(&FormatOptions::default());
        let decls = v["x.go"].as_array().unwrap();
        assert_eq!(decls[0]["name"], "Z");
        assert!(decls[0]["schema"].is_null());
        assert_eq!(decls[0]["rendered"], "// x.go:2:1\nconst Z = null;");
        assert_eq!(decls[1]["position"], "x.go:3:1");
        assert_eq!(decls[1]["schema"]["shape"][0]["name"], "N");
        assert_eq!(decls[1]["schema"]["shape"][0]["schema"]["leaf"], "number");
    }
}
