//! sql_schema library - GraphQL schema to MySQL DDL compiler
//!
//! Reads a GraphQL SDL document whose object types and fields carry `@sql`
//! annotations and produces `CREATE TABLE` statements for them.
//!
//! ```
//! use sql_schema::build::{BuildOptions, build};
//!
//! let script = build(
//!     "type User { id: Int @sql(primary: true) }",
//!     &BuildOptions::new("app"),
//! )
//! .unwrap();
//! assert!(script.starts_with("CREATE TABLE `app`.`User` ("));
//! ```

pub mod build;
pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod schema;
pub mod sdl;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;
