//! Directive extraction: builds the relational model from visitor callbacks.

use super::definition::RelationalModel;
use super::directives::{ColumnDirective, DirectiveBehavior, DirectiveRegistry, TableDirective};
use super::error::BuildError;
use crate::sdl::{Directive, SchemaVisitor, TypeRef};

/// Accumulates tables and columns as the SDL walker reports annotated types
/// and fields.
pub struct Extractor<'a> {
    registry: &'a DirectiveRegistry,
    model: RelationalModel,
}

impl<'a> Extractor<'a> {
    pub fn new(registry: &'a DirectiveRegistry) -> Self {
        Self {
            registry,
            model: RelationalModel::new(),
        }
    }

    pub fn into_model(self) -> RelationalModel {
        self.model
    }

    fn directives_with<'d>(
        &'d self,
        directives: &'d [Directive],
        behavior: DirectiveBehavior,
    ) -> impl Iterator<Item = &'d Directive> + 'd {
        directives
            .iter()
            .filter(move |d| self.registry.behavior(&d.name) == Some(behavior))
    }
}

impl SchemaVisitor for Extractor<'_> {
    type Error = BuildError;

    fn on_type(&mut self, type_name: &str, directives: &[Directive]) -> Result<(), BuildError> {
        let parsed = self
            .directives_with(directives, DirectiveBehavior::Extract)
            .map(|d| TableDirective::from_arguments(type_name, &d.arguments))
            .collect::<Result<Vec<_>, _>>()?;

        if parsed.is_empty() {
            return Ok(());
        }

        let table = self.model.table_entry(type_name);
        for directive in parsed {
            directive.apply(table);
        }
        Ok(())
    }

    fn on_field(
        &mut self,
        type_name: &str,
        field_name: &str,
        declared_type: &TypeRef,
        directives: &[Directive],
    ) -> Result<(), BuildError> {
        if self
            .directives_with(directives, DirectiveBehavior::Suppress)
            .next()
            .is_some()
        {
            tracing::debug!(table = type_name, column = field_name, "field suppressed");
            return Ok(());
        }

        let parsed = self
            .directives_with(directives, DirectiveBehavior::Extract)
            .map(|d| ColumnDirective::from_arguments(type_name, field_name, &d.arguments))
            .collect::<Result<Vec<_>, _>>()?;

        if parsed.is_empty() {
            return Ok(());
        }

        let column = self
            .model
            .table_entry(type_name)
            .column_entry(field_name, declared_type.base_name());
        for directive in parsed {
            directive.apply(column);
        }
        Ok(())
    }
}
