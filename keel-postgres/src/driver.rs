use crate::{PostgresSqlWriter, ValueHolder, connection::connect, util::decode_row};
use futures::StreamExt;
use keel_core::{
    Driver, Error, Failure, Field, QueryContext, Result, Rows, SqlWriter, Value, fields_without,
    future::BoxFuture, truncate_long,
};
use std::pin::pin;
use tokio_postgres::Client;

/// Driver over one `tokio-postgres` client.
///
/// Every value travels as a bound parameter, the SQL text only contains quoted identifiers,
/// placeholders and the caller clauses.
pub struct PostgresDriver {
    client: Client,
}

impl PostgresDriver {
    pub const NAME: &'static str = "postgres";

    /// Connect to `url`, see the crate documentation for the accepted parameters.
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            client: connect(url.as_ref()).await?,
        })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// The underlying client, for statements outside the driver contract (DDL, transactions).
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub const fn sql_writer(&self) -> PostgresSqlWriter {
        PostgresSqlWriter::new()
    }

    /// Run a statement producing rows, a scan failure is kept and the remaining rows are decoded.
    async fn fetch(
        &self,
        table: &str,
        fields: &[Field],
        sql: &str,
        params: Vec<ValueHolder>,
    ) -> Result<Rows<Vec<Field>>> {
        log::debug!("Fetching:\n{}", truncate_long!(sql));
        let context = || format!("While fetching the query:\n{}", truncate_long!(sql));
        let stream = self.client.query_raw(sql, params).await.map_err(|e| {
            let e = Error::new(e).context(context());
            log::error!("{:#}", e);
            e
        })?;
        let mut stream = pin!(stream);
        let mut rows = Vec::new();
        let mut error = None;
        while let Some(row) = stream.next().await {
            let row = row.map_err(|e| {
                let e = Error::new(e).context(context());
                log::error!("{:#}", e);
                e
            })?;
            match decode_row(table, &row, fields) {
                Ok(row) => rows.push(row),
                Err(e) => {
                    log::error!("{:#}", e);
                    error = Some(e);
                }
            }
        }
        Ok(Rows::new(rows, error))
    }

    /// Run a statement producing at most one row, `Failure::NotFound` when it produces none.
    async fn fetch_one(
        &self,
        table: &str,
        fields: &[Field],
        sql: &str,
        params: Vec<ValueHolder>,
    ) -> Result<Vec<Field>> {
        let rows = self.fetch(table, fields, sql, params).await?;
        if let Some(error) = rows.error {
            return Err(error);
        }
        rows.rows.into_iter().next().ok_or_else(|| {
            log::debug!("No row found in `{}`", table);
            Failure::not_found(table).into()
        })
    }

    /// Run a statement without rows.
    async fn execute(&self, table: &str, sql: &str, params: Vec<ValueHolder>) -> Result<u64> {
        log::debug!("Executing:\n{}", truncate_long!(sql));
        self.client.execute_raw(sql, params).await.map_err(|e| {
            let message = e
                .as_db_error()
                .map(|v| v.message().to_string())
                .unwrap_or_else(|| e.to_string());
            let e = Error::new(e)
                .context(Failure::write(table, message))
                .context(format!("While executing the query:\n{}", truncate_long!(sql)));
            log::error!("{:#}", e);
            e
        })
    }
}

fn holders<'a>(values: impl IntoIterator<Item = &'a Value>) -> Vec<ValueHolder> {
    values.into_iter().cloned().map(ValueHolder).collect()
}

impl Driver for PostgresDriver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn get<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        id: &'a Field,
    ) -> BoxFuture<'a, Result<Vec<Field>>> {
        Box::pin(async move {
            let mut sql = String::with_capacity(128);
            self.sql_writer()
                .write_select_by_key(&mut sql, table, fields, id);
            self.fetch_one(table, fields, &sql, holders([&id.value]))
                .await
        })
    }

    fn create<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        id: &'a mut Field,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut sql = String::with_capacity(128);
            self.sql_writer().write_insert(&mut sql, table, fields, id);
            let params = holders(fields_without(fields, id).map(|f| &f.value));
            let key = std::slice::from_ref(&*id);
            let row = self
                .fetch_one(table, key, &sql, params)
                .await
                .map_err(|e| {
                    if Failure::of(&e).is_some() {
                        e
                    } else {
                        let message = e.root_cause().to_string();
                        e.context(Failure::write(table, message))
                    }
                })?;
            let Some(key) = row.into_iter().next() else {
                return Err(Failure::write(table, "The insert did not return the key").into());
            };
            *id = key;
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
            if fields_without(fields, id).next().is_none() {
                return Ok(());
            }
            let mut sql = String::with_capacity(128);
            self.sql_writer().write_update(&mut sql, table, fields, id);
            let params = holders(
                std::iter::once(&id.value).chain(fields_without(fields, id).map(|f| &f.value)),
            );
            let updated = self.execute(table, &sql, params).await?;
            if updated == 0 {
                log::debug!(
                    "Updating the missing row {} = {} in `{}` has no effect",
                    id.name,
                    id.value,
                    table
                );
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
        Box::pin(async move {
            let mut sql = String::with_capacity(128);
            self.sql_writer()
                .write_select(&mut sql, table, fields, None, context);
            self.fetch(table, fields, &sql, Vec::new()).await
        })
    }

    fn filter<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        context: &'a QueryContext,
        clause: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<Rows<Vec<Field>>>> {
        Box::pin(async move {
            let mut sql = String::with_capacity(128);
            self.sql_writer()
                .write_select(&mut sql, table, fields, Some(clause), context);
            self.fetch(table, fields, &sql, holders(args)).await
        })
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
            let mut sql = String::with_capacity(128);
            self.sql_writer()
                .write_select(&mut sql, table, fields, Some(clause), &context);
            self.fetch_one(table, fields, &sql, holders(args)).await
        })
    }

    fn remove<'a>(&'a self, table: &'a str, id: &'a Field) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let mut sql = String::with_capacity(64);
            self.sql_writer().write_delete(&mut sql, table, id);
            self.execute(table, &sql, holders([&id.value])).await?;
            Ok(())
        })
    }
}
