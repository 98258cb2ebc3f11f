//! Document-level checks that run after parsing.
//!
//! These are the subset of SDL validation rules the compiler depends on:
//! unique type names, unique fields, known field types, and known directives.

use std::collections::{HashMap, HashSet};

use super::SdlError;
use super::ast::{Definition, Directive, Document, Position};

/// Scalars every schema gets without declaring them.
pub const BUILT_IN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Directives every schema gets without declaring them.
pub const BUILT_IN_DIRECTIVES: &[&str] = &["deprecated", "specifiedBy", "include", "skip"];

/// Validates a parsed document.
///
/// `implicit_directives` are treated as declared even if the document has no
/// `directive @name` definition for them.
pub fn validate(document: &Document, implicit_directives: &[&str]) -> Result<(), SdlError> {
    let mut types: HashMap<&str, Position> = HashMap::new();
    for definition in &document.definitions {
        let Some(name) = definition.type_name() else {
            continue;
        };
        if matches!(definition, Definition::Object(ty) if ty.extension) {
            continue;
        }
        let position = definition_position(definition);
        if BUILT_IN_SCALARS.contains(&name) || types.insert(name, position).is_some() {
            return Err(SdlError::DuplicateType {
                name: name.to_string(),
                line: position.line,
                column: position.column,
            });
        }
    }

    let mut directives: HashSet<&str> = BUILT_IN_DIRECTIVES.iter().copied().collect();
    directives.extend(implicit_directives.iter().copied());
    for definition in document.directive_definitions() {
        directives.insert(definition.name.as_str());
    }

    let is_known_type = |name: &str| BUILT_IN_SCALARS.contains(&name) || types.contains_key(name);
    let check_directives = |applied: &[Directive]| -> Result<(), SdlError> {
        match applied.iter().find(|d| !directives.contains(d.name.as_str())) {
            Some(unknown) => Err(SdlError::UnknownDirective {
                name: unknown.name.clone(),
                line: unknown.position.line,
                column: unknown.position.column,
            }),
            None => Ok(()),
        }
    };

    let mut fields_seen: HashMap<&str, HashSet<&str>> = HashMap::new();
    for definition in &document.definitions {
        match definition {
            Definition::Object(ty) | Definition::Interface(ty) => {
                if ty.extension && !types.contains_key(ty.name.as_str()) {
                    return Err(SdlError::UnknownType {
                        name: ty.name.clone(),
                        line: ty.position.line,
                        column: ty.position.column,
                    });
                }
                check_directives(&ty.directives)?;
                let seen = fields_seen.entry(ty.name.as_str()).or_default();
                for field in &ty.fields {
                    if !seen.insert(field.name.as_str()) {
                        return Err(SdlError::DuplicateField {
                            type_name: ty.name.clone(),
                            field: field.name.clone(),
                            line: field.position.line,
                            column: field.position.column,
                        });
                    }
                    let base = field.ty.base_name();
                    if !is_known_type(base) {
                        return Err(SdlError::UnknownType {
                            name: base.to_string(),
                            line: field.position.line,
                            column: field.position.column,
                        });
                    }
                    check_directives(&field.directives)?;
                    for argument in &field.arguments {
                        check_directives(&argument.directives)?;
                    }
                }
            }
            Definition::Input(ty) => {
                check_directives(&ty.directives)?;
                for field in &ty.fields {
                    if !is_known_type(field.ty.base_name()) {
                        return Err(SdlError::UnknownType {
                            name: field.ty.base_name().to_string(),
                            line: field.position.line,
                            column: field.position.column,
                        });
                    }
                    check_directives(&field.directives)?;
                }
            }
            Definition::Scalar(ty) => check_directives(&ty.directives)?,
            Definition::Enum(ty) => check_directives(&ty.directives)?,
            Definition::Union(ty) => check_directives(&ty.directives)?,
            Definition::Schema(schema) => check_directives(&schema.directives)?,
            Definition::Directive(_) => {}
        }
    }

    Ok(())
}

fn definition_position(definition: &Definition) -> Position {
    match definition {
        Definition::Object(ty) | Definition::Interface(ty) => ty.position,
        Definition::Input(ty) => ty.position,
        Definition::Scalar(ty) => ty.position,
        Definition::Enum(ty) => ty.position,
        Definition::Union(ty) => ty.position,
        Definition::Directive(def) => def.position,
        Definition::Schema(schema) => schema.position,
    }
}
