//! Tri-state result of a repository lookup.

use crate::errors::{DomainError, DomainResult};

/// Outcome of looking up a record by key
///
/// Keeps "the backend answered and there is no such record" apart from
/// "the backend could not answer", which a plain `Option` cannot express
/// and a `Result<Option<_>>` makes easy to conflate.
#[derive(Debug)]
pub enum Lookup<T> {
    /// The record exists
    Found(T),
    /// The backend answered and the record does not exist
    NotFound,
    /// The backend failed to answer
    Failed(DomainError),
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    /// Collapses into `Result<Option<T>>` for callers that don't care about the distinction
    pub fn into_result(self) -> DomainResult<Option<T>> {
        match self {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::NotFound => Ok(None),
            Lookup::Failed(err) => Err(err),
        }
    }

    pub fn map<U, F>(self, f: F) -> Lookup<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Failed(err) => Lookup::Failed(err),
        }
    }
}

impl<T> From<DomainResult<Option<T>>> for Lookup<T> {
    fn from(result: DomainResult<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Lookup::Found(value),
            Ok(None) => Lookup::NotFound,
            Err(err) => Lookup::Failed(err),
        }
    }
}
