//! This file defines the `Transaction` type, the core type of the ledger, and
//! the builder used to create one.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::DatabaseID;

/// Whether a transaction records money spent or money earned.
///
/// The kind is used at creation time to derive the sign of the stored amount:
/// expenses are stored negative, income positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent. Stored with a negative amount.
    Expense,
    /// Money earned. Stored with a positive amount.
    Income,
}

impl TransactionKind {
    /// The string stored in the database for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error returned when parsing a string that is neither `"expense"` nor
/// `"income"`.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{0:?} is not a valid transaction kind")]
pub struct ParseTransactionKindError(String);

impl FromStr for TransactionKind {
    type Err = ParseTransactionKindError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "expense" => Ok(TransactionKind::Expense),
            "income" => Ok(TransactionKind::Income),
            other => Err(ParseTransactionKindError(other.to_string())),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The stored amount is signed: negative for expenses, positive for income.
/// The category is referenced by name, not by ID; deleting a category leaves
/// transactions with its name untouched.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: DatabaseID,
    amount: f64,
    category: String,
    comment: String,
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability. `amount`
    /// is a non-negative magnitude; the stored sign is derived from `kind`.
    pub fn build(amount: f64, kind: TransactionKind) -> TransactionBuilder {
        TransactionBuilder::new(amount, kind)
    }

    /// Reconstruct a transaction from its stored parts.
    ///
    /// Used by stores when mapping database rows. The amount is taken as
    /// already signed.
    pub(crate) fn from_parts(
        id: DatabaseID,
        amount: f64,
        category: String,
        comment: String,
        date: OffsetDateTime,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            amount,
            category,
            comment,
            date,
            kind,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The signed amount of money spent or earned in this transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The name of the category this transaction belongs to.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// A free-text comment on the transaction, possibly empty.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// When the transaction happened.
    pub fn date(&self) -> &OffsetDateTime {
        &self.date
    }

    /// Whether the transaction is an expense or income.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Create a builder that carries this transaction's exact field values.
    ///
    /// Inserting the result produces a row with the same amount, category,
    /// comment, date and kind but a NEW id. Used to restore a deleted
    /// transaction.
    pub fn rebuild(&self) -> TransactionBuilder {
        TransactionBuilder {
            amount: self.amount,
            category: self.category.clone(),
            comment: self.comment.clone(),
            date: self.date,
            kind: self.kind,
        }
    }
}

/// Builder for creating a new [Transaction].
///
/// The builder holds the signed amount; [TransactionBuilder::new] applies the
/// sign convention to the magnitude it is given. Finalize by passing the
/// builder to a transaction store.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    pub(crate) amount: f64,
    pub(crate) category: String,
    pub(crate) comment: String,
    pub(crate) date: OffsetDateTime,
    pub(crate) kind: TransactionKind,
}

impl TransactionBuilder {
    /// Create a builder for a new transaction.
    ///
    /// `amount` is a non-negative magnitude; expenses are negated, income is
    /// stored as-is. The date defaults to the current time.
    pub fn new(amount: f64, kind: TransactionKind) -> Self {
        let signed_amount = match kind {
            TransactionKind::Expense => -amount,
            TransactionKind::Income => amount,
        };

        Self {
            amount: signed_amount,
            category: String::new(),
            comment: String::new(),
            date: OffsetDateTime::now_utc(),
            kind,
        }
    }

    /// Set the category name for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set the comment for the transaction.
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    /// Set the date for the transaction.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = date;
        self
    }
}


#[cfg(test)]
mod transaction_builder_tests {
    use time::macros::datetime;

    use super::{Transaction, TransactionKind};

    #[test]
    fn expense_amount_is_negative() {
        let builder = Transaction::build(50.0, TransactionKind::Expense);

        assert_eq!(builder.amount, -50.0);
    }

    #[test]
    fn income_amount_is_positive() {
        let builder = Transaction::build(50.0, TransactionKind::Income);

        assert_eq!(builder.amount, 50.0);
    }

    #[test]
    fn zero_amount_keeps_zero() {
        let builder = Transaction::build(0.0, TransactionKind::Expense);

        assert_eq!(builder.amount, 0.0);
    }

    #[test]
    fn rebuild_preserves_fields() {
        let date = datetime!(2026-03-14 12:00 UTC);
        let transaction = Transaction::from_parts(
            42,
            -19.99,
            "Groceries".to_string(),
            "weekly shop".to_string(),
            date,
            TransactionKind::Expense,
        );

        let builder = transaction.rebuild();

        assert_eq!(builder.amount, -19.99);
        assert_eq!(builder.category, "Groceries");
        assert_eq!(builder.comment, "weekly shop");
        assert_eq!(builder.date, date);
        assert_eq!(builder.kind, TransactionKind::Expense);
    }

    #[test]
    fn serializes_to_json_and_back() {
        let transaction = Transaction::from_parts(
            1,
            25.0,
            "Salary".to_string(),
            String::new(),
            datetime!(2026-01-31 09:30 UTC),
            TransactionKind::Income,
        );

        let json = serde_json::to_string(&transaction).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, transaction);
    }
}
