//! GraphQL SDL front end.
//!
//! Parses schema text into a [`Document`], validates the handful of rules the
//! compiler relies on, and walks object types and fields through the
//! [`SchemaVisitor`] callbacks. Only the type-system subset of GraphQL is
//! supported; executable documents are rejected.
//!
//! # Example
//!
//! ```
//! use sql_schema::sdl;
//!
//! let doc = sdl::parse("type User { id: Int }").unwrap();
//! assert_eq!(doc.object_types().count(), 1);
//! ```

mod ast;
mod lexer;
mod parser;
mod validate;
mod walk;

pub use ast::{
    Definition, Directive, DirectiveDefinition, Document, EnumType, FieldDefinition,
    InputObjectType, InputValue, ObjectType, Position, ScalarType, SchemaDefinition, TypeRef,
    UnionType, Value,
};
pub use validate::{BUILT_IN_DIRECTIVES, BUILT_IN_SCALARS, validate};
pub use walk::{SchemaVisitor, walk};

use thiserror::Error;

/// Errors produced while reading schema text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SdlError {
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: u32,
        column: u32,
        message: String,
    },

    #[error("duplicate definition of type '{name}' at {line}:{column}")]
    DuplicateType { name: String, line: u32, column: u32 },

    #[error("duplicate field '{type_name}.{field}' at {line}:{column}")]
    DuplicateField {
        type_name: String,
        field: String,
        line: u32,
        column: u32,
    },

    #[error("unknown type '{name}' at {line}:{column}")]
    UnknownType { name: String, line: u32, column: u32 },

    #[error("unknown directive '@{name}' at {line}:{column}")]
    UnknownDirective { name: String, line: u32, column: u32 },
}

/// Parses SDL source text into a document without validating it.
pub fn parse(source: &str) -> Result<Document, SdlError> {
    parser::Parser::new(source)?.parse_document()
}
