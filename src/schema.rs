//! Prop-types schema model and its JavaScript rendering.
//!
//! A [`Schema`] is built bottom-up by inference and only ever read afterwards.
//! Rendering is pure: the same node, level and [`FormatOptions`] always give
//! the same bytes, so generated files diff cleanly across runs.
//!
//! Layout rules:
//! - lists: `[]` when empty, `[x]` when there is a single one-line element,
//!   otherwise one element per line with a trailing comma and the closing
//!   bracket back at the caller's level.
//! - shapes: `{}` when empty, otherwise always one `name: value,` per line.
use serde::{Deserialize, Serialize};

// ------------------------------- Options --------------------------------- //

pub const DEFAULT_IMPORT_ALIAS: &str = "PropTypes";
pub const DEFAULT_INDENT: &str = "  ";

/// Everything rendering depends on besides the node itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FormatOptions {
    /// Name the prop-types module is imported as.
    pub import_alias: String,
    /// One level of indentation.
    pub indent: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            import_alias: DEFAULT_IMPORT_ALIAS.to_string(),
            indent: DEFAULT_INDENT.to_string(),
        }
    }
}

impl FormatOptions {
    fn indentation(&self, level: usize) -> String {
        self.indent.repeat(level)
    }
}

// -------------------------------- Model ---------------------------------- //

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Leaf {
    Any,
    Array,
    Bool,
    Func,
    Number,
    Object,
    String,
    Symbol,
    Node,        // anything renderable
    Element,     // <MyComponent />
    ElementType, // MyComponent
}

impl Leaf {
    pub const ALL: [Leaf; 11] = [
        Leaf::Any, Leaf::Array, Leaf::Bool, Leaf::Func, Leaf::Number, Leaf::Object,
        Leaf::String, Leaf::Symbol, Leaf::Node, Leaf::Element, Leaf::ElementType,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Leaf::Any => "any",
            Leaf::Array => "array",
            Leaf::Bool => "bool",
            Leaf::Func => "func",
            Leaf::Number => "number",
            Leaf::Object => "object",
            Leaf::String => "string",
            Leaf::Symbol => "symbol",
            Leaf::Node => "node",
            Leaf::Element => "element",
            Leaf::ElementType => "elementType",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Schema {
    Leaf(Leaf),
    InstanceOf(String),
    /// Literals are already JavaScript source (`"'lorem'"`, `"3.14"`).
    OneOf(Vec<String>),
    OneOfType(Vec<Option<Schema>>),
    ArrayOf(Option<Box<Schema>>),
    ObjectOf(Option<Box<Schema>>),
    Shape(Vec<ShapeEntry>),
    /// Like `Shape`, but prop-types warns on extra properties.
    Exact(Vec<ShapeEntry>),
    Required(Box<Schema>),
    /// Stand-in for input we could not classify. Renders as `<<...>>` so the
    /// gap shows up in generated code instead of turning into `null`.
    Unresolved(Placeholder),
}

/// Ordered; duplicate names are kept as written.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeEntry {
    pub name: String,
    pub schema: Option<Schema>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Placeholder {
    /// A bare identifier that is not a built-in.
    Ident { name: String, declared: bool },
    /// An expression kind inference has no rule for.
    Unmatched(String),
}

impl From<Leaf> for Schema {
    fn from(leaf: Leaf) -> Self { Schema::Leaf(leaf) }
}

impl ShapeEntry {
    pub fn new(name: impl Into<String>, schema: impl Into<Option<Schema>>) -> Self {
        Self { name: name.into(), schema: schema.into() }
    }
}

// ------------------------------ Builders --------------------------------- //

impl Schema {
    pub fn instance_of(class: impl Into<String>) -> Self {
        Schema::InstanceOf(class.into())
    }

    pub fn one_of<I, S>(literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::OneOf(literals.into_iter().map(Into::into).collect())
    }

    pub fn one_of_type(members: Vec<Option<Schema>>) -> Self {
        Schema::OneOfType(members)
    }

    pub fn array_of(elem: impl Into<Option<Schema>>) -> Self {
        Schema::ArrayOf(elem.into().map(Box::new))
    }

    pub fn object_of(value: impl Into<Option<Schema>>) -> Self {
        Schema::ObjectOf(value.into().map(Box::new))
    }

    pub fn required(self) -> Self {
        Schema::Required(Box::new(self))
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Schema::Unresolved(_))
    }

    /// Kinds of every `<<unmatched ..>>` placeholder in the tree, in render order.
    pub fn unmatched_kinds(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_unmatched(&mut out);
        out
    }

    fn collect_unmatched<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Schema::Unresolved(Placeholder::Unmatched(kind)) => out.push(kind.as_str()),
            Schema::OneOfType(members) => {
                members.iter().flatten().for_each(|m| m.collect_unmatched(out));
            }
            Schema::ArrayOf(Some(inner)) | Schema::ObjectOf(Some(inner)) | Schema::Required(inner) => {
                inner.collect_unmatched(out);
            }
            Schema::Shape(entries) | Schema::Exact(entries) => {
                for schema in entries.iter().filter_map(|e| e.schema.as_ref()) {
                    schema.collect_unmatched(out);
                }
            }
            _ => {}
        }
    }
}

// ------------------------------ Rendering -------------------------------- //

impl Schema {
    /// Render as a JavaScript expression. `level` is the indentation level the
    /// expression starts at; nested lines are indented relative to it.
    pub fn format(&self, opts: &FormatOptions, level: usize) -> String {
        match self {
            Schema::Leaf(leaf) => format!("{}.{}", opts.import_alias, leaf.name()),
            Schema::InstanceOf(class) => type_func(opts, "instanceOf", class),
            Schema::OneOf(literals) => {
                type_func(opts, "oneOf", &format_array(opts, literals, level))
            }
            Schema::OneOfType(members) => {
                let items = members
                    .iter()
                    .map(|m| format_optional(m.as_ref(), opts, level + 1))
                    .collect::<Vec<_>>();
                type_func(opts, "oneOfType", &format_array(opts, &items, level))
            }
            Schema::ArrayOf(elem) => {
                type_func(opts, "arrayOf", &format_optional(elem.as_deref(), opts, level))
            }
            Schema::ObjectOf(value) => {
                type_func(opts, "objectOf", &format_optional(value.as_deref(), opts, level))
            }
            Schema::Shape(entries) => type_func(opts, "shape", &format_shape(opts, entries, level)),
            Schema::Exact(entries) => type_func(opts, "exact", &format_shape(opts, entries, level)),
            Schema::Required(inner) => format!("{}.isRequired", inner.format(opts, level)),
            Schema::Unresolved(placeholder) => placeholder.to_string(),
        }
    }
}

pub fn format_optional(schema: Option<&Schema>, opts: &FormatOptions, level: usize) -> String {
    match schema {
        Some(s) => s.format(opts, level),
        None => "null".to_string(),
    }
}

impl std::fmt::Display for Placeholder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Placeholder::Ident { name, declared: false } => write!(f, "<<ident {name:?}>>"),
            Placeholder::Ident { name, declared: true } => write!(f, "<<ident {name:?}: declared>>"),
            Placeholder::Unmatched(kind) => write!(f, "<<unmatched {kind}>>"),
        }
    }
}

fn type_func(opts: &FormatOptions, name: &str, arg: &str) -> String {
    format!("{}.{}({})", opts.import_alias, name, arg)
}

fn format_array<S: AsRef<str>>(opts: &FormatOptions, items: &[S], level: usize) -> String {
    match items {
        [] => "[]".to_string(),
        [only] if !only.as_ref().contains('\n') => format!("[{}]", only.as_ref()),
        _ => {
            let inner = opts.indentation(level + 1);
            let mut out = String::from("[\n");
            for item in items {
                out.push_str(&inner);
                out.push_str(item.as_ref());
                out.push_str(",\n");
            }
            out.push_str(&opts.indentation(level));
            out.push(']');
            out
        }
    }
}

fn format_shape(opts: &FormatOptions, entries: &[ShapeEntry], level: usize) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    let inner = opts.indentation(level + 1);
    let mut out = String::from("{\n");
    for entry in entries {
        out.push_str(&inner);
        out.push_str(&entry.name);
        out.push_str(": ");
        out.push_str(&format_optional(entry.schema.as_ref(), opts, level + 1));
        out.push_str(",\n");
    }
    out.push_str(&opts.indentation(level));
    out.push('}');
    out
}

// ------------------------------- Tests ------------------------------------ //
