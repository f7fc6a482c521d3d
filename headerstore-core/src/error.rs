use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The header name was empty and has no canonical form.
    #[error("invalid header name: name is empty")]
    InvalidName,
    /// Growing a value list or a bucket chain failed. The table is unchanged.
    #[error("allocation failed: {0}")]
    Exhausted(#[from] TryReserveError),
}
