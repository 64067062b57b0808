//! Defines the transaction store trait.

use crate::{
    Error,
    models::{DatabaseID, Transaction, TransactionBuilder},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store, assigning it a fresh ID.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Delete the transaction with `id`.
    ///
    /// Implementers should return [`Error::NotFound`] when no row matched.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;

    /// Delete every transaction in the store.
    fn delete_all(&mut self) -> Result<(), Error>;

    /// Retrieve all transactions, ordered by date descending (newest first).
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;
}
