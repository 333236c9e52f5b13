use crate::{Error, Failure, Result, Schema};

/// A type mapped to the rows of one table.
///
/// Usually derived:
/// ```ignore
/// #[derive(Record, Default)]
/// #[keel(table = "people")]
/// struct Person {
///     #[keel(column = "id", primary_key)]
///     id: i64,
///     #[keel(column = "name")]
///     name: String,
/// }
/// ```
pub trait Record: Sized + Send + Sync + 'static {
    /// The cached schema of this type, fails when the type is not correctly described.
    fn schema() -> Result<&'static Schema<Self>>;
}

/// Expose a lazily built schema, cloning the configuration failure on every access.
pub fn cached_schema<R>(
    schema: &'static std::result::Result<Schema<R>, Failure>,
) -> Result<&'static Schema<R>> {
    schema.as_ref().map_err(|e| {
        let error = Error::new(e.clone());
        log::error!("{:#}", error);
        error
    })
}
