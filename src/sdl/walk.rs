//! Visitor interface between the SDL parser and the compiler.

use super::ast::{Directive, Document, TypeRef};

/// Callbacks invoked for each object type and each of its fields.
///
/// Object types (including `extend type` blocks) are visited in source order;
/// `on_type` fires before the type's fields. Interfaces, inputs, and other
/// definitions are not visited.
pub trait SchemaVisitor {
    type Error;

    fn on_type(&mut self, type_name: &str, directives: &[Directive]) -> Result<(), Self::Error>;

    fn on_field(
        &mut self,
        type_name: &str,
        field_name: &str,
        declared_type: &TypeRef,
        directives: &[Directive],
    ) -> Result<(), Self::Error>;
}

/// Drives `visitor` over `document`, stopping at the first error.
pub fn walk<V: SchemaVisitor>(document: &Document, visitor: &mut V) -> Result<(), V::Error> {
    for ty in document.object_types() {
        visitor.on_type(&ty.name, &ty.directives)?;
        for field in &ty.fields {
            visitor.on_field(&ty.name, &field.name, &field.ty, &field.directives)?;
        }
    }
    Ok(())
}
