//! Defines the crate level error type and the conversion from SQL errors.

/// The errors that may occur in the ledger engine.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty or whitespace-only string was used to create a category name.
    #[error("a blank string is not a valid category name")]
    EmptyCategoryName,

    /// A negative or non-finite magnitude was passed to the transaction
    /// ledger.
    ///
    /// Callers give amounts as non-negative magnitudes; the sign is derived
    /// from the transaction kind.
    #[error("{0} is not a valid transaction amount")]
    InvalidAmount(f64),

    /// The requested record could not be found.
    ///
    /// Internally, this error may occur when a query returns no rows or a
    /// delete matches none. The ledgers treat it as a silent no-op for
    /// delete, undo and restore.
    #[error("the requested record could not be found")]
    NotFound,

    /// An error occurred while getting the local offset from a canonical
    /// timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    ///
    /// This indicates data-loss risk and must be propagated to the caller,
    /// never swallowed.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
