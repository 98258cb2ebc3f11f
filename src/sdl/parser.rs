//! Recursive-descent parser for GraphQL SDL.

use super::SdlError;
use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};

/// Deepest list type or list/object value accepted.
const MAX_NESTING: usize = 64;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, SdlError> {
        Ok(Self {
            tokens: Lexer::tokenize_all(source)?,
            pos: 0,
            depth: 0,
        })
    }

    pub fn parse_document(mut self) -> Result<Document, SdlError> {
        let mut document = Document::default();
        while !self.at(&TokenKind::Eof) {
            document.definitions.push(self.parse_definition()?);
        }
        Ok(document)
    }

    // -------------------------------------------------------------------------
    // Token helpers
    // -------------------------------------------------------------------------

    fn peek(&self) -> &Token {
        // The token stream always ends with Eof, and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Name(name) if name == keyword)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Opens one level of `[` or `{` nesting.
    fn nest(&mut self) -> Result<(), SdlError> {
        if self.depth >= MAX_NESTING {
            let token = self.peek();
            return Err(SdlError::Syntax {
                line: token.position.line,
                column: token.position.column,
                message: format!("nesting deeper than {MAX_NESTING} levels"),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn unnest(&mut self) {
        self.depth -= 1;
    }

    fn unexpected(&self, expected: &str) -> SdlError {
        let token = self.peek();
        SdlError::Syntax {
            line: token.position.line,
            column: token.position.column,
            message: format!("expected {expected}, found {}", token.kind.describe()),
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token, SdlError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&kind.describe()))
        }
    }

    fn expect_name(&mut self) -> Result<(String, Position), SdlError> {
        match &self.peek().kind {
            TokenKind::Name(name) => {
                let name = name.clone();
                let position = self.advance().position;
                Ok((name, position))
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<Position, SdlError> {
        if self.at_keyword(keyword) {
            Ok(self.advance().position)
        } else {
            Err(self.unexpected(&format!("\"{keyword}\"")))
        }
    }

    fn parse_description(&mut self) -> Option<String> {
        match &self.peek().kind {
            TokenKind::String(text) | TokenKind::BlockString(text) => {
                let text = text.clone();
                self.advance();
                Some(text)
            }
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Definitions
    // -------------------------------------------------------------------------

    fn parse_definition(&mut self) -> Result<Definition, SdlError> {
        let description = self.parse_description();

        let keyword = match &self.peek().kind {
            TokenKind::Name(name) => name.clone(),
            TokenKind::LBrace => {
                return Err(self.unexpected("a type system definition"));
            }
            _ => return Err(self.unexpected("a definition")),
        };

        match keyword.as_str() {
            "type" => {
                self.advance();
                Ok(Definition::Object(self.parse_object_body(description, false)?))
            }
            "interface" => {
                self.advance();
                Ok(Definition::Interface(self.parse_object_body(description, false)?))
            }
            "input" => {
                self.advance();
                self.parse_input_object().map(Definition::Input)
            }
            "scalar" => {
                self.advance();
                let (name, position) = self.expect_name()?;
                let directives = self.parse_directives()?;
                Ok(Definition::Scalar(ScalarType {
                    name,
                    directives,
                    position,
                }))
            }
            "enum" => {
                self.advance();
                self.parse_enum().map(Definition::Enum)
            }
            "union" => {
                self.advance();
                self.parse_union().map(Definition::Union)
            }
            "directive" => {
                self.advance();
                self.parse_directive_definition().map(Definition::Directive)
            }
            "schema" => {
                let position = self.advance().position;
                self.parse_schema(position).map(Definition::Schema)
            }
            "extend" => {
                self.advance();
                if !self.at_keyword("type") {
                    return Err(self.unexpected("\"type\" (only object type extensions are supported)"));
                }
                self.advance();
                Ok(Definition::Object(self.parse_object_body(description, true)?))
            }
            "query" | "mutation" | "subscription" | "fragment" => {
                Err(self.unexpected("a type system definition"))
            }
            _ => Err(self.unexpected("a definition")),
        }
    }

    fn parse_object_body(
        &mut self,
        description: Option<String>,
        extension: bool,
    ) -> Result<ObjectType, SdlError> {
        let (name, position) = self.expect_name()?;

        let mut interfaces = Vec::new();
        if self.at_keyword("implements") {
            self.advance();
            self.eat(&TokenKind::Amp);
            loop {
                interfaces.push(self.expect_name()?.0);
                if !self.eat(&TokenKind::Amp) {
                    break;
                }
            }
        }

        let directives = self.parse_directives()?;

        let mut fields = Vec::new();
        if self.eat(&TokenKind::LBrace) {
            while !self.eat(&TokenKind::RBrace) {
                fields.push(self.parse_field()?);
            }
        }

        Ok(ObjectType {
            name,
            description,
            interfaces,
            directives,
            fields,
            extension,
            position,
        })
    }

    fn parse_field(&mut self) -> Result<FieldDefinition, SdlError> {
        let description = self.parse_description();
        let (name, position) = self.expect_name()?;
        let arguments = if self.at(&TokenKind::LParen) {
            self.parse_arguments_definition()?
        } else {
            Vec::new()
        };
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let directives = self.parse_directives()?;

        Ok(FieldDefinition {
            name,
            description,
            arguments,
            ty,
            directives,
            position,
        })
    }

    fn parse_arguments_definition(&mut self) -> Result<Vec<InputValue>, SdlError> {
        self.expect(&TokenKind::LParen)?;
        let mut arguments = Vec::new();
        while !self.eat(&TokenKind::RParen) {
            arguments.push(self.parse_input_value()?);
        }
        Ok(arguments)
    }

    fn parse_input_value(&mut self) -> Result<InputValue, SdlError> {
        self.parse_description();
        let (name, position) = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let default = if self.eat(&TokenKind::Equals) {
            Some(self.parse_value()?)
        } else {
            None
        };
        let directives = self.parse_directives()?;

        Ok(InputValue {
            name,
            ty,
            default,
            directives,
            position,
        })
    }

    fn parse_input_object(&mut self) -> Result<InputObjectType, SdlError> {
        let (name, position) = self.expect_name()?;
        let directives = self.parse_directives()?;
        let mut fields = Vec::new();
        if self.eat(&TokenKind::LBrace) {
            while !self.eat(&TokenKind::RBrace) {
                fields.push(self.parse_input_value()?);
            }
        }
        Ok(InputObjectType {
            name,
            directives,
            fields,
            position,
        })
    }

    fn parse_enum(&mut self) -> Result<EnumType, SdlError> {
        let (name, position) = self.expect_name()?;
        let directives = self.parse_directives()?;
        let mut values = Vec::new();
        if self.eat(&TokenKind::LBrace) {
            while !self.eat(&TokenKind::RBrace) {
                self.parse_description();
                values.push(self.expect_name()?.0);
                self.parse_directives()?;
            }
        }
        Ok(EnumType {
            name,
            directives,
            values,
            position,
        })
    }

    fn parse_union(&mut self) -> Result<UnionType, SdlError> {
        let (name, position) = self.expect_name()?;
        let directives = self.parse_directives()?;
        let mut members = Vec::new();
        if self.eat(&TokenKind::Equals) {
            self.eat(&TokenKind::Pipe);
            loop {
                members.push(self.expect_name()?.0);
                if !self.eat(&TokenKind::Pipe) {
                    break;
                }
            }
        }
        Ok(UnionType {
            name,
            directives,
            members,
            position,
        })
    }

    fn parse_directive_definition(&mut self) -> Result<DirectiveDefinition, SdlError> {
        self.expect(&TokenKind::At)?;
        let (name, position) = self.expect_name()?;
        let arguments = if self.at(&TokenKind::LParen) {
            self.parse_arguments_definition()?
        } else {
            Vec::new()
        };
        let repeatable = self.at_keyword("repeatable");
        if repeatable {
            self.advance();
        }
        self.expect_keyword("on")?;
        self.eat(&TokenKind::Pipe);
        let mut locations = Vec::new();
        loop {
            locations.push(self.expect_name()?.0);
            if !self.eat(&TokenKind::Pipe) {
                break;
            }
        }

        Ok(DirectiveDefinition {
            name,
            arguments,
            repeatable,
            locations,
            position,
        })
    }

    fn parse_schema(&mut self, position: Position) -> Result<SchemaDefinition, SdlError> {
        let directives = self.parse_directives()?;
        self.expect(&TokenKind::LBrace)?;
        let mut operations = Vec::new();
        while !self.eat(&TokenKind::RBrace) {
            let (operation, _) = self.expect_name()?;
            self.expect(&TokenKind::Colon)?;
            let (type_name, _) = self.expect_name()?;
            operations.push((operation, type_name));
        }
        Ok(SchemaDefinition {
            directives,
            operations,
            position,
        })
    }

    // -------------------------------------------------------------------------
    // Types, directives, values
    // -------------------------------------------------------------------------

    fn parse_type(&mut self) -> Result<TypeRef, SdlError> {
        let ty = if self.eat(&TokenKind::LBracket) {
            self.nest()?;
            let inner = self.parse_type()?;
            self.expect(&TokenKind::RBracket)?;
            self.unnest();
            TypeRef::List(Box::new(inner))
        } else {
            TypeRef::Named(self.expect_name()?.0)
        };

        if self.eat(&TokenKind::Bang) {
            Ok(TypeRef::NonNull(Box::new(ty)))
        } else {
            Ok(ty)
        }
    }

    fn parse_directives(&mut self) -> Result<Vec<Directive>, SdlError> {
        let mut directives = Vec::new();
        while self.at(&TokenKind::At) {
            let position = self.advance().position;
            let (name, _) = self.expect_name()?;
            let mut arguments = Vec::new();
            if self.eat(&TokenKind::LParen) {
                while !self.eat(&TokenKind::RParen) {
                    let (arg_name, _) = self.expect_name()?;
                    self.expect(&TokenKind::Colon)?;
                    arguments.push((arg_name, self.parse_value()?));
                }
            }
            directives.push(Directive {
                name,
                arguments,
                position,
            });
        }
        Ok(directives)
    }

    fn parse_value(&mut self) -> Result<Value, SdlError> {
        let token = self.peek().clone();
        let value = match token.kind {
            TokenKind::Int(value) => Value::Int(value),
            TokenKind::Float(value) => Value::Float(value),
            TokenKind::String(text) | TokenKind::BlockString(text) => Value::String(text),
            TokenKind::Name(name) => match name.as_str() {
                "true" => Value::Boolean(true),
                "false" => Value::Boolean(false),
                "null" => Value::Null,
                _ => Value::Enum(name),
            },
            TokenKind::LBracket => {
                self.advance();
                self.nest()?;
                let mut items = Vec::new();
                while !self.eat(&TokenKind::RBracket) {
                    items.push(self.parse_value()?);
                }
                self.unnest();
                return Ok(Value::List(items));
            }
            TokenKind::LBrace => {
                self.advance();
                self.nest()?;
                let mut fields = Vec::new();
                while !self.eat(&TokenKind::RBrace) {
                    let (name, _) = self.expect_name()?;
                    self.expect(&TokenKind::Colon)?;
                    fields.push((name, self.parse_value()?));
                }
                self.unnest();
                return Ok(Value::Object(fields));
            }
            TokenKind::Dollar => {
                return Err(SdlError::Syntax {
                    line: token.position.line,
                    column: token.position.column,
                    message: "variables are not allowed in a schema".to_string(),
                });
            }
            _ => return Err(self.unexpected("a value")),
        };
        self.advance();
        Ok(value)
    }
}
