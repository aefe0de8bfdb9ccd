//! Infer prop-types shape descriptions from Go type declarations.
//!
//! Pipeline: [`parse`] a Go file into [`ast`] type expressions, [`inference`]
//! turns each into a [`schema::Schema`], [`decl`] pairs it with its
//! declaration, and [`report`] renders a run as JavaScript or JSON.
pub mod ast;
pub mod cli;
pub mod config;
pub mod decl;
pub mod error;
pub mod inference;
pub mod parse;
pub mod report;
pub mod schema;
pub mod tags;
pub mod walk;

pub use decl::PropTypeDecl;
pub use error::{Error, Result};
pub use inference::infer;
pub use schema::{FormatOptions, Leaf, Schema, ShapeEntry};
