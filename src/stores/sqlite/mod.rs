//! Contains the SQLite store implementations and the convenience function
//! that assembles both ledgers over one database connection.

pub mod category;
pub mod transaction;

pub use category::SqliteCategoryStore;
pub use transaction::SqliteTransactionStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    ledgers::{CategoryLedger, TransactionLedger},
};

/// The ledgers held by the presentation layer, backed by SQLite.
///
/// Category and transaction tables are independent; each ledger serializes
/// its own mutations.
#[derive(Debug)]
pub struct Ledgers {
    /// The category ledger.
    pub categories: CategoryLedger<SqliteCategoryStore>,
    /// The transaction ledger.
    pub transactions: TransactionLedger<SqliteTransactionStore>,
}

/// Create the category and transaction ledgers over a SQLite database.
///
/// This function will modify the database by adding the tables for the domain
/// models. Default categories are NOT seeded here; call
/// [CategoryLedger::seed_defaults] once at startup.
///
/// # Errors
/// Returns an error if the schema cannot be created or the initial reads
/// fail.
pub fn create_ledgers(db_connection: Connection) -> Result<Ledgers, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let category_store = SqliteCategoryStore::new(connection.clone());
    let transaction_store = SqliteTransactionStore::new(connection);

    Ok(Ledgers {
        categories: CategoryLedger::new(category_store)?,
        transactions: TransactionLedger::new(transaction_store)?,
    })
}
