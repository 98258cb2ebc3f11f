//! Primary and secondary index classification.

use super::definition::RelationalModel;
use super::error::BuildError;

/// Assigns each table's primary index and collects its secondary indices.
///
/// Runs after normalization. A column marked `primary` never also becomes a
/// secondary index, even if it carries `index`.
pub fn gather_indices(model: &mut RelationalModel) -> Result<(), BuildError> {
    for table in model.tables.values_mut() {
        table.primary_index = None;
        table.secondary_indices.clear();

        for column in table.columns.values() {
            if column.primary {
                if table.primary_index.is_some() {
                    return Err(BuildError::invalid(
                        &table.name,
                        &column.name,
                        "More than one column is marked as the primary index.",
                    ));
                }
                table.primary_index = Some(column.name.clone());
            } else if column.index {
                table.secondary_indices.push(column.name.clone());
            }
        }

        if table.primary_index.is_none() {
            return Err(BuildError::invalid(
                &table.name,
                "",
                format!("Table {} does not have a primary index.", table.name),
            ));
        }
    }
    Ok(())
}
