//! Database schema compilers.
//!
//! Generates DDL text from a validated [`RelationalModel`](super::RelationalModel).

pub mod mysql;

pub use mysql::{MysqlCompiler, UNICODE_CLAUSE};
