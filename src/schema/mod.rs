//! Relational model built from an annotated GraphQL schema.
//!
//! # Overview
//!
//! The schema system consists of four stages, run in order by [`crate::build`]:
//!
//! 1. **Extraction** (`extract.rs`): the [`Extractor`] receives type and field
//!    callbacks from the SDL walker and copies whitelisted directive arguments
//!    into [`Table`] and [`Column`] entries.
//! 2. **Normalization** (`normalize.rs`): resolves each column's SQL type and
//!    rejects invalid flag combinations.
//! 3. **Index classification** (`indices.rs`): assigns exactly one primary
//!    index per table and collects secondary indices.
//! 4. **Compilation** (`compilers/`): renders the validated model as DDL.
//!
//! # Type Mapping
//!
//! Columns without an explicit `type` get one from their GraphQL type:
//!
//! | GraphQL Type | SQL Type |
//! |--------------|----------|
//! | Int | INT |
//! | Float | DECIMAL |
//! | Boolean | BOOLEAN |
//! | JSON | JSON |
//!
//! `String` always needs an explicit `type`.

pub mod compilers;
mod definition;
mod directives;
mod error;
mod extract;
mod indices;
mod normalize;

pub use compilers::{MysqlCompiler, UNICODE_CLAUSE};
pub use definition::{Column, RelationalModel, Table};
pub use directives::{
    ArgumentKind, COLUMN_ARGUMENTS, ColumnDirective, DEFAULT_DIRECTIVE, DEFAULT_SUPPRESS_DIRECTIVE,
    DIRECTIVE_ARGUMENTS, DirectiveBehavior, DirectiveRegistry, SQL_DIRECTIVE_DECLARATION,
    TABLE_ARGUMENTS, TableDirective, directive_declaration, suppress_declaration,
};
pub use error::BuildError;
pub use extract::Extractor;
pub use indices::gather_indices;
pub use normalize::{STRING_TYPES, infer_sql_type, normalize};
