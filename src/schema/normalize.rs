//! Per-column normalization and validation.
//!
//! Runs once after extraction. Resolves every column's SQL type (explicit or
//! inferred from the GraphQL type), canonicalizes it to upper case, and checks
//! the `primary`/`nullable`/`auto`/`default`/`unicode` combinations.

use super::definition::{Column, RelationalModel};
use super::error::BuildError;

/// SQL types that accept a character set clause. Compared without any
/// `(length)` suffix.
pub const STRING_TYPES: &[&str] = &[
    "CHAR",
    "VARCHAR",
    "BINARY",
    "VARBINARY",
    "BLOB",
    "TEXT",
    "ENUM",
    "SET",
];

/// Normalizes every column of every table, in declaration order.
///
/// Stops at the first violation.
pub fn normalize(model: &mut RelationalModel) -> Result<(), BuildError> {
    for table in model.tables.values_mut() {
        let mut unicode = table.unicode;
        for column in table.columns.values_mut() {
            normalize_column(&table.name, column)?;
            unicode |= column.unicode;
        }
        table.unicode = unicode;
    }
    Ok(())
}

fn normalize_column(table: &str, column: &mut Column) -> Result<(), BuildError> {
    let name = column.name.clone();
    let fail = |message: String| BuildError::invalid(table, &name, message);

    if column.primary && column.nullable {
        return Err(fail("@primary is not allowed with @nullable.".to_string()));
    }

    let sql_type = match column.sql_type.take() {
        Some(explicit) => explicit,
        None => infer_sql_type(&column.declared_type).map_err(fail)?.to_string(),
    };
    let sql_type = sql_type.to_uppercase();

    if column.auto {
        if !sql_type.contains("INT") && sql_type != "SERIAL" {
            return Err(fail(
                "Column with \"auto\" must have INT or SERIAL type.".to_string(),
            ));
        }
        if column.default.is_some() {
            return Err(fail("\"default\" is not allowed with \"auto\".".to_string()));
        }
        if column.unicode {
            return Err(fail("\"unicode\" is not allowed with \"auto\".".to_string()));
        }
    }

    if column.unicode && !STRING_TYPES.contains(&strip_length(&sql_type)) {
        return Err(fail(
            "@unicode can only be applied to a string type.".to_string(),
        ));
    }

    column.sql_type = Some(sql_type);
    Ok(())
}

/// Default SQL type for a GraphQL named type.
pub fn infer_sql_type(declared_type: &str) -> Result<&'static str, String> {
    match declared_type {
        "Int" => Ok("INT"),
        "Float" => Ok("DECIMAL"),
        "Boolean" => Ok("BOOLEAN"),
        "JSON" => Ok("JSON"),
        "String" => Err("String types must be explicitly defined using @type.".to_string()),
        other => Err(format!(
            "A default SQL type cannot be generated for GraphQL type {}",
            other
        )),
    }
}

/// `VARCHAR(300)` -> `VARCHAR`
fn strip_length(sql_type: &str) -> &str {
    sql_type.split('(').next().unwrap_or(sql_type)
}
