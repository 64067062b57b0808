//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{DatabaseID, Transaction, TransactionBuilder, TransactionKind},
    stores::TransactionStore,
};

/// Stores transactions in a SQLite database.
///
/// The category column holds the category name as plain text rather than a
/// foreign key; deleting a category leaves transactions referencing its name
/// untouched.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SqliteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// Returns an [`Error::SqlError`] if there is an SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "INSERT INTO \"transaction\" (amount, category, comment, date, kind)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, amount, category, comment, date, kind",
            )?
            .query_row(
                (
                    builder.amount,
                    &builder.category,
                    &builder.comment,
                    &builder.date,
                    builder.kind.as_str(),
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Delete the transaction with `id` from the database.
    ///
    /// # Errors
    /// This function will return:
    /// - [`Error::NotFound`] if no transaction has `id`,
    /// - or [`Error::SqlError`] if there is an SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM \"transaction\" WHERE id = ?1;", (id,))?;

        if rows_deleted == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    /// Delete every transaction in the database.
    ///
    /// # Errors
    /// Returns an [`Error::SqlError`] if there is an SQL error.
    fn delete_all(&mut self) -> Result<(), Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM \"transaction\";", ())?;

        Ok(())
    }

    /// Retrieve all transactions in the database, newest first.
    ///
    /// Rows inserted later win ties on equal dates.
    ///
    /// # Errors
    /// Returns an [`Error::SqlError`] if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare(
                "SELECT id, amount, category, comment, date, kind FROM \"transaction\"
                 ORDER BY datetime(date) DESC, id DESC;",
            )?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SqliteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                comment TEXT NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SqliteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let category = row.get(offset + 2)?;
        let comment = row.get(offset + 3)?;
        let date = row.get(offset + 4)?;

        let raw_kind: String = row.get(offset + 5)?;
        let kind = raw_kind.parse::<TransactionKind>().map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(offset + 5, Type::Text, Box::new(error))
        })?;

        Ok(Transaction::from_parts(
            id, amount, category, comment, date, kind,
        ))
    }
}
