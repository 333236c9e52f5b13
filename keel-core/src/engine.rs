use crate::{
    AsValue, Driver, Error, ErrorContext, Failure, Field, QueryContext, Record, Result, Rows,
    Schema, Value,
};
use std::sync::Arc;

/// Record mapping facade: converts records to field descriptors and back and dispatches to the
/// driver.
///
/// Cheap to clone. The engine keeps no state besides the driver handle and a template
/// [`QueryContext`] applied to [`Engine::all`], [`Engine::filter`] and [`Engine::first`].
#[derive(Clone)]
pub struct Engine {
    driver: Arc<dyn Driver>,
    context: QueryContext,
}

impl Engine {
    pub fn new(driver: Arc<dyn Driver>) -> Self {
        Self {
            driver,
            context: QueryContext::default(),
        }
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    /// An engine on the same driver using `context` for multi-row fetches.
    pub fn with_context(&self, context: QueryContext) -> Self {
        Self {
            driver: self.driver.clone(),
            context,
        }
    }

    /// Insert the record when its primary key is the zero value, update it otherwise.
    ///
    /// After an insert the key assigned by the backend is written into the record.
    pub async fn save<R: Record>(&self, record: &mut R) -> Result<()> {
        let schema = R::schema()?;
        let metadata = schema.metadata(record);
        let table = &metadata.table;
        let mut id = metadata.primary_key().clone();
        if id.value.is_zero() {
            log::debug!("Creating a row in `{}` through {}", table, self.driver.name());
            self.driver
                .create(table, &metadata.fields, &mut id)
                .await?;
            schema
                .primary_key_column()
                .write(record, id.value)
                .with_context(|| format!("While storing the key generated for `{}`", table))?;
        } else {
            log::debug!(
                "Updating the row {} = {} in `{}` through {}",
                id.name,
                id.value,
                table,
                self.driver.name()
            );
            self.driver.update(table, &metadata.fields, &id).await?;
        }
        Ok(())
    }

    /// Load the row with primary key `id` into `record`.
    pub async fn get<R: Record>(&self, record: &mut R, id: impl AsValue) -> Result<()> {
        let schema = R::schema()?;
        let id = schema.key_field(id.as_value())?;
        let fields = schema.fields();
        let row = self.driver.get(schema.table(), &fields, &id).await?;
        schema.apply(record, row).map_err(|e| {
            let e = e.context(Failure::scan(schema.table(), "Could not assign the row"));
            log::error!("{:#}", e);
            e
        })
    }

    /// Every row of the table of `R`, shaped by the engine context.
    pub async fn all<R: Record + Default>(&self) -> Result<Rows<R>> {
        let schema = R::schema()?;
        let fields = schema.fields();
        let rows = self
            .driver
            .all(schema.table(), &fields, &self.context)
            .await?;
        Ok(into_records(schema, rows))
    }

    /// The rows satisfying `clause`, see the driver for the clause syntax.
    pub async fn filter<R: Record + Default>(
        &self,
        clause: &str,
        args: &[Value],
    ) -> Result<Rows<R>> {
        let schema = R::schema()?;
        check_clause(schema.table(), clause, args)?;
        let fields = schema.fields();
        let rows = self
            .driver
            .filter(schema.table(), &fields, &self.context, clause, args)
            .await?;
        Ok(into_records(schema, rows))
    }

    /// The first row satisfying `clause`, `Failure::NotFound` when there is none.
    pub async fn first<R: Record + Default>(&self, clause: &str, args: &[Value]) -> Result<R> {
        let schema = R::schema()?;
        check_clause(schema.table(), clause, args)?;
        let fields = schema.fields();
        let context = self.context.with_limit(1);
        let row = self
            .driver
            .first(schema.table(), &fields, &context, clause, args)
            .await?;
        let mut record = R::default();
        schema.apply(&mut record, row).map_err(|e| {
            let e = e.context(Failure::scan(schema.table(), "Could not assign the row"));
            log::error!("{:#}", e);
            e
        })?;
        Ok(record)
    }

    /// Delete the row identified by the primary key of `record`.
    pub async fn remove<R: Record>(&self, record: &R) -> Result<()> {
        let schema = R::schema()?;
        let id = schema.primary_key_column().read(record);
        log::debug!(
            "Removing the row {} = {} from `{}` through {}",
            id.name,
            id.value,
            schema.table(),
            self.driver.name()
        );
        self.driver.remove(schema.table(), &id).await
    }
}

/// A blank clause selects every row and has no placeholder to bind `args` to.
fn check_clause(table: &str, clause: &str, args: &[Value]) -> Result<()> {
    if clause.trim().is_empty() && !args.is_empty() {
        let error = Error::msg(format!(
            "The where clause on `{}` is blank but {} arguments were given",
            table,
            args.len()
        ));
        log::error!("{:#}", error);
        return Err(error);
    }
    Ok(())
}

/// Build one record per descriptor row, keeping the driver order.
fn into_records<R: Default>(schema: &Schema<R>, rows: Rows<Vec<Field>>) -> Rows<R> {
    let mut error = rows.error;
    let records = rows
        .rows
        .into_iter()
        .filter_map(|row| {
            let mut record = R::default();
            match schema.apply(&mut record, row) {
                Ok(()) => Some(record),
                Err(e) => {
                    let e = e.context(Failure::scan(schema.table(), "Could not assign the row"));
                    log::error!("{:#}", e);
                    error = Some(e);
                    None
                }
            }
        })
        .collect();
    Rows::new(records, error)
}
