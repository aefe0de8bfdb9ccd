//! Minimal CLI: inspect Go sources → (prop-types JS | JSON debug view)
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colored::Colorize;

use crate::config::{self, Overrides};
use crate::report::Report;
use crate::schema::FormatOptions;
use crate::walk;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer prop-types shapes from Go type declarations and print them as JavaScript
#[derive(Parser, Debug)]
#[command(name = "propshape", version)]
pub struct CommandLineInterface {
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit one `const Name = PropTypes...;` per type declaration
    Emit(EmitOut),
    /// print the inferred schema trees as JSON
    Inspect(InspectOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths (files or directories) or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// descend into subdirectories of directory inputs
    #[arg(long, short, default_value_t = false)]
    recursive: bool,
}

#[derive(Args, Debug, Clone)]
struct FormatSettings {
    /// JSON config file with `importAlias` and/or `indent`
    #[arg(long)]
    config: Option<PathBuf>,

    /// name the prop-types module is imported as [default: PropTypes]
    #[arg(long)]
    import_alias: Option<String>,

    /// indent with this many spaces [default: 2]
    #[arg(long)]
    indent_width: Option<usize>,

    /// indent with tabs
    #[arg(long, default_value_t = false, conflicts_with = "indent_width")]
    tabs: bool,
}

#[derive(clap::Parser, Debug)]
struct EmitOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    format_settings: FormatSettings,

    /// start with `import PropTypes from 'prop-types';`
    #[arg(long)]
    header: bool,

    /// output .js file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct InspectOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    format_settings: FormatSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_report(&self) -> Result<Report> {
        let paths = walk::resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let report = walk::inspect_inputs(&paths, self.recursive)?;
        Ok(report)
    }
}

impl FormatSettings {
    fn options(&self) -> Result<FormatOptions> {
        let overrides = Overrides {
            import_alias: self.import_alias.clone(),
            indent_width: self.indent_width,
            tabs: self.tabs,
        };
        let opts = config::resolve(self.config.as_deref(), &overrides)?;
        Ok(opts)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Emit(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let opts = target.format_settings.options()?;
                let report = target.input_settings.load_report()?;
                let js_src = report.render(&opts, target.header);
                write_output(target.out.as_ref(), &js_src, &report)
            }
            Command::Inspect(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let opts = target.format_settings.options()?;
                let report = target.input_settings.load_report()?;
                let mut json_src = serde_json::to_string_pretty(&report.to_json(&opts))?;
                json_src.push('\n');
                write_output(target.out.as_ref(), &json_src, &report)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&PathBuf>, src: &str, report: &Report) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
            eprintln!(
                "{} {} declarations from {} files → {}",
                "wrote".green().bold(),
                report.declaration_count(),
                report.units.len(),
                out.display(),
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(src.as_bytes())?;
            lock.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CommandLineInterface::command().debug_assert();
    }

    #[test]
    fn parses_emit_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "propshape", "emit", "-i", "models", "pkg/*.go", "-r",
            "--import-alias", "PT", "--indent-width", "4", "--header",
        ])
        .unwrap();
        let Command::Emit(emit) = &cli.cmd else { panic!("expected emit") };
        assert_eq!(emit.input_settings.input, ["models", "pkg/*.go"]);
        assert!(emit.input_settings.recursive);
        assert!(emit.header);
        let opts = emit.format_settings.options().unwrap();
        assert_eq!(opts, FormatOptions { import_alias: "PT".into(), indent: "    ".into() });
    }

    #[test]
    fn tabs_conflict_with_width() {
        let res = CommandLineInterface::try_parse_from([
            "propshape", "inspect", "-i", "x.go", "--tabs", "--indent-width", "2",
        ]);
        assert!(res.is_err());
    }
}
