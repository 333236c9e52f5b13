use crate::order::sort_rows;
use keel_core::{
    Driver, Error, ErrorContext, Failure, Field, QueryContext, Result, Rows, Value, find_field,
    fields_without, future::BoxFuture,
};
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Predicate standing for one where clause: receives the stored row and the call arguments.
pub type WherePredicate = Arc<dyn Fn(&[Field], &[Value]) -> Result<bool> + Send + Sync>;

#[derive(Default)]
struct Table {
    rows: Vec<Vec<Field>>,
    sequence: i64,
}

impl Table {
    fn position(&self, id: &Field) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| find_field(row, &id.name).is_some_and(|f| f.value == id.value))
    }

    fn next_key(&mut self, id: &Field) -> Result<Value> {
        let value = match id.ty {
            Value::Int16(..) | Value::Int32(..) | Value::Int64(..) => {
                self.sequence += 1;
                Value::Int64(Some(self.sequence))
            }
            Value::Uuid(..) => Value::Uuid(Some(Uuid::new_v4())),
            _ => {
                return Err(Error::msg(format!(
                    "Cannot generate a primary key of type {}",
                    id.ty.type_name()
                )));
            }
        };
        value.convert_to(&id.ty)
    }
}

/// Driver keeping the tables in process memory.
///
/// Rows are kept in insertion order. Where clauses are not parsed: each clause must be
/// registered with [`MemoryDriver::register_where`] and is matched by exact string equality, so
/// `"age < $1"` and `"age<$1"` are two unrelated clauses.
#[derive(Default)]
pub struct MemoryDriver {
    tables: Mutex<HashMap<String, Table>>,
    predicates: RwLock<HashMap<String, WherePredicate>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the predicate evaluated for `clause`, replacing any previous one.
    ///
    /// Predicates run on a copy of the table, outside of any lock held by the driver.
    pub fn register_where<F>(&self, clause: impl Into<String>, predicate: F)
    where
        F: Fn(&[Field], &[Value]) -> Result<bool> + Send + Sync + 'static,
    {
        let mut predicates = self.predicates.write().unwrap_or_else(|e| e.into_inner());
        predicates.insert(clause.into(), Arc::new(predicate));
    }

    fn predicate(&self, clause: &str) -> Result<WherePredicate> {
        let predicates = self.predicates.read().unwrap_or_else(|e| e.into_inner());
        predicates.get(clause).cloned().ok_or_else(|| {
            let error = Error::msg(format!(
                "The clause `{}` is not registered, call `register_where` first",
                clause
            ));
            log::error!("{:#}", error);
            error
        })
    }

    async fn select(
        &self,
        table: &str,
        fields: &[Field],
        context: &QueryContext,
        filter: Option<(&str, &[Value])>,
    ) -> Result<Rows<Vec<Field>>> {
        let predicate = filter
            .map(|(clause, args)| self.predicate(clause).map(|p| (p, args)))
            .transpose()?;
        let stored = {
            let tables = self.tables.lock().await;
            match tables.get(table) {
                Some(stored) => stored.rows.clone(),
                None => return Ok(Rows::default()),
            }
        };
        let mut error = None;
        let mut rows: Vec<Vec<Field>> = stored
            .into_iter()
            .filter(|row| {
                let Some((predicate, args)) = &predicate else {
                    return true;
                };
                match (**predicate)(row.as_slice(), args) {
                    Ok(v) => v,
                    Err(e) => {
                        let e = e.context(format!(
                            "While evaluating a where clause on a row of `{}`",
                            table
                        ));
                        log::error!("{:#}", e);
                        error = Some(e);
                        false
                    }
                }
            })
            .collect();
        if !context.group().is_empty() {
            log::warn!(
                "The memory driver ignores the group clause `{}`",
                context.group()
            );
        }
        sort_rows(&mut rows, context.order())
            .with_context(|| format!("While ordering the rows of `{}`", table))?;
        let skip = context.skip().unwrap_or(0) as usize;
        let limit = context.limit().map_or(usize::MAX, |v| v as usize);
        let rows = rows
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|row| project(&row, fields))
            .collect();
        Ok(Rows::new(rows, error))
    }
}

/// The stored row reshaped to the order and names of `fields`.
fn project(row: &[Field], fields: &[Field]) -> Vec<Field> {
    fields
        .iter()
        .map(|f| match find_field(row, &f.name) {
            Some(stored) => stored.clone(),
            None => f.with_value(Value::Null).unwrap_or_else(|_| f.clone()),
        })
        .collect()
}

impl Driver for MemoryDriver {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        id: &'a Field,
    ) -> BoxFuture<'a, Result<Vec<Field>>> {
        Box::pin(async move {
            let tables = self.tables.lock().await;
            let row = tables
                .get(table)
                .and_then(|t| t.position(id).map(|i| &t.rows[i]));
            match row {
                Some(row) => Ok(project(row, fields)),
                None => {
                    log::debug!("No row {} = {} in `{}`", id.name, id.value, table);
                    Err(Failure::not_found(table).into())
                }
            }
        })
    }

    fn create<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        id: &'a mut Field,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            let stored = tables.entry(table.to_string()).or_default();
            let key = stored.next_key(id).map_err(|e| {
                let e = e.context(Failure::write(table, "Could not assign the primary key"));
                log::error!("{:#}", e);
                e
            })?;
            let mut row = Vec::with_capacity(fields.len().max(1));
            let key_field = id.with_value(key)?;
            row.push(key_field.clone());
            row.extend(fields_without(fields, id).cloned());
            stored.rows.push(row);
            *id = key_field;
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        id: &'a Field,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            let Some(stored) = tables.get_mut(table) else {
                log::debug!("Updating the missing table `{}` has no effect", table);
                return Ok(());
            };
            let Some(position) = stored.position(id) else {
                log::debug!(
                    "Updating the missing row {} = {} in `{}` has no effect",
                    id.name,
                    id.value,
                    table
                );
                return Ok(());
            };
            let row = &mut stored.rows[position];
            for field in fields_without(fields, id) {
                match row.iter().position(|f| f.name == field.name) {
                    Some(i) => row[i] = field.clone(),
                    None => row.push(field.clone()),
                }
            }
            Ok(())
        })
    }

    fn all<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        context: &'a QueryContext,
    ) -> BoxFuture<'a, Result<Rows<Vec<Field>>>> {
        Box::pin(self.select(table, fields, context, None))
    }

    fn filter<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        context: &'a QueryContext,
        clause: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<Rows<Vec<Field>>>> {
        Box::pin(self.select(table, fields, context, Some((clause, args))))
    }

    fn first<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        context: &'a QueryContext,
        clause: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<Vec<Field>>> {
        Box::pin(async move {
            let context = context.with_limit(1);
            let rows = self
                .select(table, fields, &context, Some((clause, args)))
                .await?;
            match rows.rows.into_iter().next() {
                Some(row) => Ok(row),
                None => match rows.error {
                    Some(error) => Err(error),
                    None => {
                        log::debug!("No row of `{}` satisfies `{}`", table, clause);
                        Err(Failure::not_found(table).into())
                    }
                },
            }
        })
    }

    fn remove<'a>(&'a self, table: &'a str, id: &'a Field) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut tables = self.tables.lock().await;
            if let Some(stored) = tables.get_mut(table)
                && let Some(position) = stored.position(id)
            {
                stored.rows.remove(position);
            }
            Ok(())
        })
    }
}
