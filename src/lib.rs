//! The transaction and category ledger engine behind a personal expense
//! tracker.
//!
//! The engine records income and expense events, organizes them by
//! user-defined categories, and derives balance and statistical summaries.
//! It has three layers:
//!
//! - [stores]: durable, change-notifying storage for the two record kinds,
//!   backed by SQLite.
//! - [ledgers]: the mutation rules — the expense/income sign convention,
//!   default-category seeding, and single-level undo/restore — plus live
//!   snapshots that re-deliver the full ordered record set after every
//!   mutation.
//! - [stats]: pure functions over a transaction snapshot computing the
//!   balance, per-category totals, month buckets and income/expense splits.
//!
//! The presentation layer holds a [stores::sqlite::Ledgers] (see
//! [stores::sqlite::create_ledgers]), subscribes to the snapshots, and calls
//! the ledger commands; it renders whatever the [stats] functions derive.
//!
//! ```no_run
//! use expense_ledger::{TransactionKind, stats, stores::sqlite::create_ledgers};
//!
//! # fn main() -> Result<(), expense_ledger::Error> {
//! let connection = rusqlite::Connection::open("ledger.db").map_err(expense_ledger::Error::from)?;
//! let mut ledgers = create_ledgers(connection)?;
//!
//! ledgers.categories.seed_defaults()?;
//! ledgers
//!     .transactions
//!     .add(50.0, "Groceries", "weekly shop", TransactionKind::Expense)?;
//!
//! let snapshot = ledgers.transactions.transactions();
//! println!("balance: {}", stats::balance(&snapshot));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod db;
mod error;

pub mod ledgers;
pub mod logging;
pub mod models;
pub mod stats;
pub mod stores;
pub mod timezone;

pub use db::initialize as initialize_db;
pub use error::Error;
pub use ledgers::{CategoryLedger, DEFAULT_CATEGORY_NAMES, TransactionLedger};
pub use models::{Category, CategoryName, Transaction, TransactionKind};
