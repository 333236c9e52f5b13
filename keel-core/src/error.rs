use crate::Error;

/// Caller-visible failure kinds.
///
/// Drivers and the engine attach one of these either as the error itself or as its context, the
/// backend diagnostic (if any) stays in the chain. Use [`Failure::of`] to recover the kind.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The record type is not correctly described (table name, primary key, columns), or no
    /// driver was installed. Not retryable.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A single-row fetch matched zero rows.
    #[error("No row found in table `{table}`")]
    NotFound { table: String },
    /// The backend rejected an insert, update or delete.
    #[error("Could not write into table `{table}`: {message}")]
    Write { table: String, message: String },
    /// A fetched row could not be decoded into the declared column types.
    #[error("Could not scan a row of table `{table}`: {message}")]
    Scan { table: String, message: String },
}

impl Failure {
    /// Find the failure kind anywhere in the error chain.
    pub fn of(error: &Error) -> Option<&Failure> {
        error
            .downcast_ref::<Failure>()
            .or_else(|| error.chain().find_map(|e| e.downcast_ref::<Failure>()))
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Failure::Configuration(message.into())
    }

    pub fn not_found(table: impl Into<String>) -> Self {
        Failure::NotFound {
            table: table.into(),
        }
    }

    pub fn write(table: impl Into<String>, message: impl Into<String>) -> Self {
        Failure::Write {
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn scan(table: impl Into<String>, message: impl Into<String>) -> Self {
        Failure::Scan {
            table: table.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(error: &Error) -> bool {
        matches!(Failure::of(error), Some(Failure::NotFound { .. }))
    }
}
