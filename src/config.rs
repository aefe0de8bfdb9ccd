//! Formatting configuration: defaults, then an optional JSON file, then flags.
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::schema::FormatOptions;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Read a config file such as `{"importAlias": "PT", "indent": "\t"}`.
/// Missing keys keep their defaults; unknown keys are rejected.
pub fn load_file(path: &Path) -> Result<FormatOptions> {
    let src = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    from_str_with_path(&src).map_err(|message| Error::Config { path: path.to_path_buf(), message })
}

/// Command-line overrides, applied on top of whatever the file gave us.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub import_alias: Option<String>,
    pub indent_width: Option<usize>,
    pub tabs: bool,
}

impl Overrides {
    pub fn apply(&self, mut opts: FormatOptions) -> FormatOptions {
        if let Some(alias) = &self.import_alias {
            opts.import_alias = alias.clone();
        }
        if self.tabs {
            opts.indent = "\t".to_string();
        } else if let Some(width) = self.indent_width {
            opts.indent = " ".repeat(width);
        }
        opts
    }
}

/// Defaults ← file ← overrides.
pub fn resolve(file: Option<&Path>, overrides: &Overrides) -> Result<FormatOptions> {
    let base = match file {
        Some(path) => load_file(path)?,
        None => FormatOptions::default(),
    };
    Ok(overrides.apply(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_json_path() {
        let err = from_str_with_path::<FormatOptions>(r#"{"indent": 4}"#).unwrap_err();
        assert!(err.contains("indent"), "{err}");
    }

    #[test]
    fn overrides_layer_on_top() {
        let base = FormatOptions { import_alias: "FromFile".into(), indent: "   ".into() };

        let opts = Overrides::default().apply(base.clone());
        assert_eq!(opts, base);

        let opts = Overrides { import_alias: Some("PROPTYPES".into()), indent_width: Some(4), tabs: false }
            .apply(base.clone());
        assert_eq!(opts.import_alias, "PROPTYPES");
        assert_eq!(opts.indent, "    ");

        let opts = Overrides { import_alias: None, indent_width: Some(8), tabs: true }.apply(base);
        assert_eq!(opts.import_alias, "FromFile");
        assert_eq!(opts.indent, "\t");
    }

    #[test]
    fn file_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("propshape.json");

        std::fs::write(&path, r#"{"importAlias": "PT"}"#).unwrap();
        let opts = resolve(Some(&path), &Overrides::default()).unwrap();
        assert_eq!(opts, FormatOptions { import_alias: "PT".into(), indent: "  ".into() });

        std::fs::write(&path, r#"{"importName": "PT"}"#).unwrap();
        let err = resolve(Some(&path), &Overrides::default()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }), "{err}");

        let missing = dir.path().join("missing.json");
        assert!(matches!(resolve(Some(&missing), &Overrides::default()), Err(Error::Io { .. })));
    }
}
