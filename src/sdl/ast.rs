//! Syntax tree for GraphQL SDL documents.
//!
//! Only the type-system subset is represented: object/interface/input types,
//! scalars, enums, unions, directive definitions, and the schema block.
//! Executable definitions (queries, fragments) are rejected by the parser.

use std::fmt;

/// Line/column of a syntax element (both 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A parsed SDL document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    /// Iterates object types (including `extend type` blocks) in source order.
    pub fn object_types(&self) -> impl Iterator<Item = &ObjectType> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Object(ty) => Some(ty),
            _ => None,
        })
    }

    /// Iterates directive definitions in source order.
    pub fn directive_definitions(&self) -> impl Iterator<Item = &DirectiveDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Directive(dir) => Some(dir),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Object(ObjectType),
    Interface(ObjectType),
    Input(InputObjectType),
    Scalar(ScalarType),
    Enum(EnumType),
    Union(UnionType),
    Directive(DirectiveDefinition),
    Schema(SchemaDefinition),
}

impl Definition {
    /// Name of the defined type, if this definition introduces one.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Definition::Object(ty) | Definition::Interface(ty) => Some(&ty.name),
            Definition::Input(ty) => Some(&ty.name),
            Definition::Scalar(ty) => Some(&ty.name),
            Definition::Enum(ty) => Some(&ty.name),
            Definition::Union(ty) => Some(&ty.name),
            Definition::Directive(_) | Definition::Schema(_) => None,
        }
    }
}

/// An object or interface type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    /// True for `extend type` blocks.
    pub extension: bool,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub ty: TypeRef,
    pub directives: Vec<Directive>,
    pub position: Position,
}

/// An argument definition or input object field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub ty: TypeRef,
    pub default: Option<Value>,
    pub directives: Vec<Directive>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub directives: Vec<Directive>,
    pub fields: Vec<InputValue>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarType {
    pub name: String,
    pub directives: Vec<Directive>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub directives: Vec<Directive>,
    pub values: Vec<String>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    pub name: String,
    pub directives: Vec<Directive>,
    pub members: Vec<String>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub name: String,
    pub arguments: Vec<InputValue>,
    pub repeatable: bool,
    pub locations: Vec<String>,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    pub directives: Vec<Directive>,
    /// `(operation, type name)` pairs such as `("query", "Query")`.
    pub operations: Vec<(String, String)>,
    pub position: Position,
}

/// A type reference with list and non-null wrappers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// The innermost named type, with all wrappers removed.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_name(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// A directive application such as `@sql(type: "BINARY(16)")`.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    /// Arguments in source order.
    pub arguments: Vec<(String, Value)>,
    pub position: Position,
}

/// A constant input value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Enum(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Value {
    /// GraphQL kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Enum(_) => "Enum",
            Value::List(_) => "List",
            Value::Object(_) => "Object",
        }
    }
}
