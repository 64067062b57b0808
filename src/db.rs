//! Defines the traits for mapping between SQLite rows and domain types, and
//! the function that sets up the database schema.

use rusqlite::{Connection, Row};

use crate::stores::sqlite::{SqliteCategoryStore, SqliteTransactionStore};

/// A trait for adding an object's schema to a database.
pub trait CreateTable {
    /// Create the table for the model.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a [`rusqlite::Row`] to a concrete Rust type.
pub trait MapRow {
    /// The type that the row is mapped to.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// # Errors
    /// Returns an error if a column value cannot be converted.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, with the first column at `offset`.
    ///
    /// # Errors
    /// Returns an error if a column value cannot be converted.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the tables for the ledger engine in the database.
///
/// Safe to call on a database that already has the tables.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    SqliteCategoryStore::create_table(connection)?;
    SqliteTransactionStore::create_table(connection)?;

    Ok(())
}
