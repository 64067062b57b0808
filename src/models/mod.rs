//! This module defines the domain data types.

pub use category::{Category, CategoryName};
pub use transaction::{ParseTransactionKindError, Transaction, TransactionBuilder, TransactionKind};

mod category;
mod transaction;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
