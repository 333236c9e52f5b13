use crate::{Error, Result};

/// Result of a multi-row fetch.
///
/// Rows that failed to decode are not part of `rows`, the last such failure is kept in `error`.
/// The successfully decoded rows are returned anyway, in the order the backend produced them.
#[derive(Debug)]
pub struct Rows<T> {
    pub rows: Vec<T>,
    pub error: Option<Error>,
}

impl<T> Rows<T> {
    pub fn new(rows: Vec<T>, error: Option<Error>) -> Self {
        Self { rows, error }
    }

    /// Whether every row was decoded.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// The rows, or the attached error if any row failed.
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.rows),
        }
    }
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            error: None,
        }
    }
}

impl<T> From<Vec<T>> for Rows<T> {
    fn from(rows: Vec<T>) -> Self {
        Self { rows, error: None }
    }
}

impl<T> IntoIterator for Rows<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Rows<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
