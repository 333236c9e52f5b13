use crate::ValueHolder;
use keel_core::{Error, Failure, Field, Result};
use tokio_postgres::Row;

/// Decode the row into fresh descriptors with the names and types of `fields`.
pub(crate) fn decode_row(table: &str, row: &Row, fields: &[Field]) -> Result<Vec<Field>> {
    if row.len() != fields.len() {
        return Err(Error::msg(format!(
            "Expected {} columns, the row has {}",
            fields.len(),
            row.len()
        ))
        .context(Failure::scan(table, "Unexpected number of columns")));
    }
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let column = &row.columns()[i];
            let value = row
                .try_get::<_, ValueHolder>(i)
                .map_err(Error::new)
                .and_then(|v| v.0.convert_to(&field.ty))
                .map_err(|e| {
                    e.context(Failure::scan(
                        table,
                        format!(
                            "Could not decode the column `{}` of type {} as {}",
                            column.name(),
                            column.type_(),
                            field.ty.type_name()
                        ),
                    ))
                })?;
            Ok(Field {
                name: field.name.clone(),
                ty: field.ty.clone(),
                value,
            })
        })
        .collect()
}
