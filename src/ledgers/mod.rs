//! The mutation-and-query layer over the stores.
//!
//! A ledger owns its store, serializes mutations through `&mut self`, and
//! republishes the full ordered snapshot to subscribers after every change.

mod category;
mod transaction;

pub use category::{CategoryLedger, DEFAULT_CATEGORY_NAMES};
pub use transaction::TransactionLedger;
