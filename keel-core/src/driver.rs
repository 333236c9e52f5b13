use crate::{Field, QueryContext, Result, Rows, Value, future::BoxFuture};

/// Storage backend contract.
///
/// A driver only ever sees the table name, field descriptors and query context, never the record
/// type. Descriptor rows returned by a driver keep the order and names of the `fields` argument.
/// The meaning of the `clause` of [`Driver::filter`] and [`Driver::first`] is backend defined.
pub trait Driver: Send + Sync {
    /// Short name of the backend, used in logs.
    fn name(&self) -> &'static str;

    /// Fetch exactly one row by primary key, `Failure::NotFound` when there is none.
    fn get<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        id: &'a Field,
    ) -> BoxFuture<'a, Result<Vec<Field>>>;

    /// Insert all the non key descriptors and store the key assigned by the backend into `id`.
    fn create<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        id: &'a mut Field,
    ) -> BoxFuture<'a, Result<()>>;

    /// Overwrite all the non key columns of the row identified by `id`.
    fn update<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        id: &'a Field,
    ) -> BoxFuture<'a, Result<()>>;

    /// Fetch every row, shaped by `context`.
    fn all<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        context: &'a QueryContext,
    ) -> BoxFuture<'a, Result<Rows<Vec<Field>>>>;

    /// Fetch the rows satisfying `clause`, with `args` as positional arguments.
    fn filter<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        context: &'a QueryContext,
        clause: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<Rows<Vec<Field>>>>;

    /// Like [`Driver::filter`] with the limit forced to 1, `Failure::NotFound` when empty.
    fn first<'a>(
        &'a self,
        table: &'a str,
        fields: &'a [Field],
        context: &'a QueryContext,
        clause: &'a str,
        args: &'a [Value],
    ) -> BoxFuture<'a, Result<Vec<Field>>>;

    /// Delete the row identified by `id`.
    fn remove<'a>(&'a self, table: &'a str, id: &'a Field) -> BoxFuture<'a, Result<()>>;
}
