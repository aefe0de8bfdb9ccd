//! Finding and reading Go source units.
//!
//! Directories and glob patterns contribute every `*.go` file except
//! `_test.go` files. Units are parsed in parallel and collected in path order.
//! A unit that does not parse is logged and left out of the report; the rest
//! of the run carries on. Only a file named literally must parse.
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::decl::{inspect_unit, PropTypeDecl};
use crate::error::{Error, Result};
use crate::parse::parse_file;
use crate::report::Report;

/// Parse one file and build its declarations.
pub fn inspect_file(path: &Path) -> Result<Vec<PropTypeDecl>> {
    let src = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let unit = parse_file(&path.display().to_string(), &src)
        .map_err(|source| Error::Parse { path: path.to_path_buf(), source })?;
    let decls = inspect_unit(&unit);
    debug!(path = %path.display(), declarations = decls.len(), "inspected source unit");
    Ok(decls)
}

/// Non-test Go sources directly inside `dir`.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn inspect_dir(dir: &Path) -> Result<Report> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let is_file = entry.file_type().map_err(|e| Error::io(entry.path(), e))?.is_file();
        if is_file && is_go_source(&entry.path()) {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(inspect_files(paths))
}

/// Non-test Go sources anywhere below `root`.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn inspect_dir_recursive(root: &Path) -> Result<Report> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_go_source(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    Ok(inspect_files(paths))
}

/// Inspect files in parallel; the report keeps the order of `paths`.
pub fn inspect_files(paths: Vec<PathBuf>) -> Report {
    let results = paths
        .into_par_iter()
        .map(|path| {
            let decls = inspect_file(&path);
            (path, decls)
        })
        .collect::<Vec<_>>();

    let mut report = Report::new();
    for (path, decls) in results {
        match decls {
            Ok(decls) => report.insert(path, decls),
            Err(error) => warn!(%error, "skipping source unit"),
        }
    }
    info!(files = report.units.len(), declarations = report.declaration_count(), "inspection done");
    report
}

pub fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.ends_with("_test.go")
}

/// A command-line input after glob expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputPath {
    /// Given literally; a file that fails to read or parse fails the run.
    Named(PathBuf),
    /// Produced by a glob; treated like a directory entry.
    Matched(PathBuf),
}

impl InputPath {
    pub fn path(&self) -> &Path {
        match self {
            InputPath::Named(path) | InputPath::Matched(path) => path,
        }
    }
}

impl From<PathBuf> for InputPath {
    fn from(path: PathBuf) -> Self {
        InputPath::Named(path)
    }
}

/// Expand command-line inputs: literal paths pass through, anything with glob
/// characters is expanded and must match at least one directory or non-test
/// Go source.
pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<InputPath>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<InputPath>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                match entry {
                    Ok(p) if p.is_dir() || is_go_source(&p) => {
                        matched_any = true;
                        out.push(InputPath::Matched(p));
                    }
                    Ok(p) => debug!(path = %p.display(), "glob match is not a Go source"),
                    Err(e) => {
                        let path = e.path().to_path_buf();
                        return Err(Error::io(path, e.into_error()));
                    }
                }
            }
            if !matched_any {
                return Err(Error::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(InputPath::Named(PathBuf::from(pattern)));
        }
    }

    Ok(out)
}

/// Inspect each input in the order given: directories per `recursive`, glob
/// matches like directory entries, named files strictly.
pub fn inspect_inputs(inputs: &[InputPath], recursive: bool) -> Result<Report> {
    let mut report = Report::new();
    // consecutive glob matches are inspected together
    let mut matched = Vec::new();
    for input in inputs {
        let path = input.path();
        if matches!(input, InputPath::Matched(_)) && !path.is_dir() {
            matched.push(path.to_path_buf());
            continue;
        }
        if !matched.is_empty() {
            report.extend(inspect_files(std::mem::take(&mut matched)));
        }
        if path.is_dir() {
            let sub = if recursive { inspect_dir_recursive(path)? } else { inspect_dir(path)? };
            report.extend(sub);
        } else {
            // named explicitly, so `_test.go` files are allowed here and a
            // file that fails to parse is the caller's problem
            let decls = inspect_file(path)?;
            report.insert(path.to_path_buf(), decls);
        }
    }
    if !matched.is_empty() {
        report.extend(inspect_files(matched));
    }
    Ok(report)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
    }

    fn file_names(report: &Report) -> Vec<String> {
        report
            .units
            .keys()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn go_source_filter() {
        assert!(is_go_source(Path::new("a/b/user.go")));
        assert!(!is_go_source(Path::new("a/b/user_test.go")));
        assert!(!is_go_source(Path::new("a/b/user.go.txt")));
        assert!(!is_go_source(Path::new("a/b/")));
    }

    #[test]
    fn dir_skips_tests_and_broken_units() {
        let report = inspect_dir(&fixtures().join("models")).unwrap();
        // broken.go does not parse and user_test.go is a test file
        assert_eq!(file_names(&report), ["order.go", "user.go"]);
        let user = report.units.values().nth(1).unwrap();
        let names: Vec<_> = user.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["User", "Role", "Callback"]);
    }

    #[test]
    fn recursive_walk_descends() {
        let report = inspect_dir_recursive(&fixtures()).unwrap();
        assert_eq!(file_names(&report), ["order.go", "user.go", "point.go"]);
        assert!(report.declaration_count() >= 5);
    }

    #[test]
    fn explicit_inputs() {
        let models = fixtures().join("models");
        let report = inspect_inputs(&[InputPath::Named(models.clone())], false).unwrap();
        assert_eq!(report.units.len(), 2);

        let test_file = models.join("user_test.go");
        let report = inspect_inputs(&[InputPath::Named(test_file)], false).unwrap();
        assert_eq!(report.declaration_count(), 1);

        let broken = models.join("broken.go");
        let err = inspect_inputs(&[InputPath::Named(broken)], false).unwrap_err();
        assert!(err.is_parse(), "{err}");

        let missing = models.join("nope.go");
        assert!(matches!(inspect_inputs(&[InputPath::Named(missing)], false), Err(Error::Io { .. })));
    }

    #[test]
    fn inputs_keep_argument_order() {
        let inputs = [
            InputPath::from(fixtures().join("shapes").join("point.go")),
            InputPath::from(fixtures().join("models")),
        ];
        let report = inspect_inputs(&inputs, false).unwrap();
        assert_eq!(file_names(&report), ["point.go", "order.go", "user.go"]);
    }

    #[test]
    fn patterns_expand_or_pass_through() {
        let pattern = format!("{}/models/*.go", fixtures().display());
        let paths = resolve_file_path_patterns([pattern.as_str()]).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["broken.go", "order.go", "user.go"]);
        assert!(paths.iter().all(|p| matches!(p, InputPath::Matched(_))));

        let literal = resolve_file_path_patterns(["does/not/exist.go"]).unwrap();
        assert_eq!(literal, [InputPath::Named(PathBuf::from("does/not/exist.go"))]);

        let none = format!("{}/models/*.rs", fixtures().display());
        assert!(matches!(resolve_file_path_patterns([none.as_str()]), Err(Error::NoMatches(_))));

        let tests_only = format!("{}/models/*_test.go", fixtures().display());
        assert!(matches!(resolve_file_path_patterns([tests_only.as_str()]), Err(Error::NoMatches(_))));
    }

    #[test]
    fn glob_matches_skip_broken_units() {
        let pattern = format!("{}/models/*.go", fixtures().display());
        let paths = resolve_file_path_patterns([pattern.as_str()]).unwrap();
        let report = inspect_inputs(&paths, false).unwrap();
        assert_eq!(file_names(&report), ["order.go", "user.go"]);

        let pattern = format!("{}/*", fixtures().display());
        let paths = resolve_file_path_patterns([pattern.as_str()]).unwrap();
        let report = inspect_inputs(&paths, false).unwrap();
        assert_eq!(file_names(&report), ["order.go", "user.go", "point.go"]);
    }

    #[test]
    fn fixture_output_is_stable() {
        let path = fixtures().join("models").join("order.go");
        let decls = inspect_file(&path).unwrap();
        let opts = crate::schema::FormatOptions::default();
        let text: Vec<_> = decls.iter().map(|d| d.format(&opts)).collect();
        let body = text[0].split_once('\n').unwrap().1;
        assert_eq!(body, "const Order = PropTypes.shape({
  id: PropTypes.string,
  items: PropTypes.arrayOf(PropTypes.shape({
    sku: PropTypes.string,
    qty: PropTypes.number,
  })),
  totals: PropTypes.objectOf(PropTypes.number),
  placedAt: PropTypes.string,
  notes: PropTypes.array,
  extra: PropTypes.any,
});");
    }
}
