//! The transaction ledger: signed inserts, deletes and single-level
//! undo/restore.

use tokio::sync::watch;

use crate::{
    Error,
    models::{Transaction, TransactionKind},
    stores::TransactionStore,
};

/// Enforces the transaction rules on top of a [TransactionStore] and
/// re-exposes the stored transactions as a live snapshot, newest first.
///
/// The ledger remembers the single most recent insert and the single most
/// recent delete, enabling exactly one reversal of each. The pointers live
/// only as long as the ledger instance; they are not persisted.
#[derive(Debug)]
pub struct TransactionLedger<S: TransactionStore> {
    store: S,
    snapshot: watch::Sender<Vec<Transaction>>,
    last_inserted: Option<Transaction>,
    last_deleted: Option<Transaction>,
}

impl<S: TransactionStore> TransactionLedger<S> {
    /// Create a ledger over `store` and publish the initial snapshot.
    ///
    /// # Errors
    /// Returns an error if the initial read from the store fails.
    pub fn new(store: S) -> Result<Self, Error> {
        let initial = store.get_all()?;
        let (snapshot, _) = watch::channel(initial);

        Ok(Self {
            store,
            snapshot,
            last_inserted: None,
            last_deleted: None,
        })
    }

    /// The current transactions, ordered by date descending.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to the live transaction snapshot.
    ///
    /// The receiver holds the full ordered set and is updated after every
    /// mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Transaction>> {
        self.snapshot.subscribe()
    }

    /// Record a new transaction dated now.
    ///
    /// `amount` is a non-negative magnitude; the stored amount is negated for
    /// [TransactionKind::Expense]. The persisted transaction becomes the
    /// "last inserted" pointer for [TransactionLedger::undo_last_insert].
    ///
    /// # Errors
    /// This function will return:
    /// - [`Error::InvalidAmount`] if `amount` is negative or not finite,
    /// - or any store error from the insert.
    pub fn add(
        &mut self,
        amount: f64,
        category: &str,
        comment: &str,
        kind: TransactionKind,
    ) -> Result<Transaction, Error> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let builder = Transaction::build(amount, kind)
            .category(category)
            .comment(comment);
        let transaction = self.store.create(builder)?;

        self.last_inserted = Some(transaction.clone());
        self.publish()?;

        Ok(transaction)
    }

    /// Delete the transaction remembered by the "last inserted" pointer and
    /// clear the pointer.
    ///
    /// A no-op when no pointer is set (nothing inserted yet, or already
    /// undone) or when the row is already gone, e.g. after
    /// [TransactionLedger::clear_all]. This is a single-level undo: a second
    /// call without an intervening insert has no effect.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn undo_last_insert(&mut self) -> Result<(), Error> {
        let Some(transaction) = self.last_inserted.take() else {
            tracing::debug!("no insert to undo");
            return Ok(());
        };

        match self.store.delete(transaction.id()) {
            Ok(()) => self.publish(),
            Err(Error::NotFound) => {
                tracing::debug!(id = transaction.id(), "last inserted row already gone");
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Delete `transaction` by its identity.
    ///
    /// On success the deleted value becomes the "last deleted" pointer for
    /// [TransactionLedger::restore_last_deleted], overwriting any previous
    /// one. Deleting a transaction that is no longer present is a silent
    /// no-op and leaves the pointer untouched.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn delete(&mut self, transaction: &Transaction) -> Result<(), Error> {
        match self.store.delete(transaction.id()) {
            Ok(()) => {
                self.last_deleted = Some(transaction.clone());
                self.publish()
            }
            Err(Error::NotFound) => {
                tracing::debug!(id = transaction.id(), "transaction already deleted");
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Re-insert the transaction remembered by the "last deleted" pointer and
    /// clear the pointer.
    ///
    /// The restored transaction keeps the original amount, category, comment,
    /// kind and date but is assigned a NEW id; the original row is not
    /// resurrected. A no-op when no pointer is set.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn restore_last_deleted(&mut self) -> Result<Option<Transaction>, Error> {
        let Some(transaction) = self.last_deleted.take() else {
            tracing::debug!("no delete to restore");
            return Ok(None);
        };

        let restored = self.store.create(transaction.rebuild())?;
        self.publish()?;

        Ok(Some(restored))
    }

    /// Delete every transaction.
    ///
    /// The undo pointers are left untouched: subsequent undo calls find no
    /// matching row and become no-ops.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn clear_all(&mut self) -> Result<(), Error> {
        self.store.delete_all()?;
        self.publish()
    }

    fn publish(&mut self) -> Result<(), Error> {
        let transactions = self.store.get_all()?;
        tracing::debug!(
            transactions = transactions.len(),
            "publishing transaction snapshot"
        );
        self.snapshot.send_replace(transactions);

        Ok(())
    }
}

#[cfg(test)]
mod transaction_ledger_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::TransactionKind,
        stores::sqlite::SqliteTransactionStore,
    };

    use super::TransactionLedger;

    fn get_test_ledger() -> TransactionLedger<SqliteTransactionStore> {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let store = SqliteTransactionStore::new(Arc::new(Mutex::new(connection)));

        TransactionLedger::new(store).unwrap()
    }

    #[test]
    fn add_expense_stores_negative_amount() {
        let mut ledger = get_test_ledger();

        let transaction = ledger
            .add(50.0, "Groceries", "", TransactionKind::Expense)
            .unwrap();

        assert_eq!(transaction.amount(), -50.0);
        assert_eq!(transaction.category(), "Groceries");
        assert_eq!(transaction.kind(), TransactionKind::Expense);
    }

    #[test]
    fn add_income_stores_positive_amount() {
        let mut ledger = get_test_ledger();

        let transaction = ledger
            .add(1500.0, "Salary", "March", TransactionKind::Income)
            .unwrap();

        assert_eq!(transaction.amount(), 1500.0);
        assert_eq!(transaction.comment(), "March");
    }

    #[test]
    fn add_rejects_negative_magnitude() {
        let mut ledger = get_test_ledger();

        let result = ledger.add(-1.0, "Groceries", "", TransactionKind::Expense);

        assert_eq!(result, Err(Error::InvalidAmount(-1.0)));
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn add_rejects_non_finite_magnitude() {
        let mut ledger = get_test_ledger();

        let result = ledger.add(f64::NAN, "Groceries", "", TransactionKind::Expense);

        assert!(result.is_err());
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn add_updates_subscribers() {
        let mut ledger = get_test_ledger();
        let receiver = ledger.subscribe();

        ledger.add(5.0, "Transport", "", TransactionKind::Expense).unwrap();

        assert_eq!(receiver.borrow().len(), 1);
    }

    #[test]
    fn undo_last_insert_removes_transaction() {
        let mut ledger = get_test_ledger();
        ledger.add(50.0, "Groceries", "", TransactionKind::Expense).unwrap();

        ledger.undo_last_insert().unwrap();

        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn undo_last_insert_twice_is_noop() {
        let mut ledger = get_test_ledger();
        let keep = ledger.add(10.0, "Transport", "", TransactionKind::Expense).unwrap();
        ledger.add(50.0, "Groceries", "", TransactionKind::Expense).unwrap();

        ledger.undo_last_insert().unwrap();
        ledger.undo_last_insert().unwrap();

        assert_eq!(ledger.transactions(), vec![keep]);
    }

    #[test]
    fn undo_only_reverses_most_recent_insert() {
        let mut ledger = get_test_ledger();
        let first = ledger.add(10.0, "Transport", "", TransactionKind::Expense).unwrap();
        ledger.add(50.0, "Groceries", "", TransactionKind::Expense).unwrap();

        ledger.undo_last_insert().unwrap();

        // The first insert can no longer be undone.
        assert_eq!(ledger.transactions(), vec![first.clone()]);
        ledger.undo_last_insert().unwrap();
        assert_eq!(ledger.transactions(), vec![first]);
    }

    #[test]
    fn undo_after_clear_all_is_noop() {
        let mut ledger = get_test_ledger();
        ledger.add(50.0, "Groceries", "", TransactionKind::Expense).unwrap();
        ledger.clear_all().unwrap();

        let result = ledger.undo_last_insert();

        assert_eq!(result, Ok(()));
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn delete_removes_transaction() {
        let mut ledger = get_test_ledger();
        let transaction = ledger.add(25.0, "Transport", "", TransactionKind::Expense).unwrap();

        ledger.delete(&transaction).unwrap();

        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn delete_missing_transaction_is_silent_noop() {
        let mut ledger = get_test_ledger();
        let transaction = ledger.add(25.0, "Transport", "", TransactionKind::Expense).unwrap();
        ledger.delete(&transaction).unwrap();

        let second_delete = ledger.delete(&transaction);

        assert_eq!(second_delete, Ok(()));
    }

    #[test]
    fn restore_last_deleted_reinserts_with_new_id() {
        let mut ledger = get_test_ledger();
        let original = ledger
            .add(50.0, "Groceries", "weekly shop", TransactionKind::Expense)
            .unwrap();
        ledger.delete(&original).unwrap();

        let restored = ledger.restore_last_deleted().unwrap().unwrap();

        assert_ne!(restored.id(), original.id());
        assert_eq!(restored.amount(), original.amount());
        assert_eq!(restored.category(), original.category());
        assert_eq!(restored.comment(), original.comment());
        assert_eq!(restored.kind(), original.kind());
        assert_eq!(restored.date(), original.date());
    }

    #[test]
    fn restore_twice_is_noop() {
        let mut ledger = get_test_ledger();
        let transaction = ledger.add(50.0, "Groceries", "", TransactionKind::Expense).unwrap();
        ledger.delete(&transaction).unwrap();

        ledger.restore_last_deleted().unwrap();
        let second_restore = ledger.restore_last_deleted().unwrap();

        assert_eq!(second_restore, None);
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn delete_overwrites_previous_restore_pointer() {
        let mut ledger = get_test_ledger();
        let first = ledger.add(10.0, "Transport", "", TransactionKind::Expense).unwrap();
        let second = ledger.add(20.0, "Groceries", "", TransactionKind::Expense).unwrap();

        ledger.delete(&first).unwrap();
        ledger.delete(&second).unwrap();
        let restored = ledger.restore_last_deleted().unwrap().unwrap();

        // Only the most recent delete can be restored.
        assert_eq!(restored.amount(), second.amount());
        assert_eq!(ledger.restore_last_deleted().unwrap(), None);
    }

    #[test]
    fn failed_delete_does_not_set_restore_pointer() {
        let mut ledger = get_test_ledger();
        let transaction = ledger.add(25.0, "Transport", "", TransactionKind::Expense).unwrap();
        ledger.delete(&transaction).unwrap();
        ledger.restore_last_deleted().unwrap();

        // Deleting the stale value again matches no row and must not arm the
        // pointer, otherwise restore would duplicate the transaction.
        ledger.delete(&transaction).unwrap();

        assert_eq!(ledger.restore_last_deleted().unwrap(), None);
        assert_eq!(ledger.transactions().len(), 1);
    }

    #[test]
    fn clear_all_empties_ledger_and_notifies() {
        let mut ledger = get_test_ledger();
        let receiver = ledger.subscribe();
        ledger.add(1.0, "Groceries", "", TransactionKind::Expense).unwrap();
        ledger.add(2.0, "Salary", "", TransactionKind::Income).unwrap();

        ledger.clear_all().unwrap();

        assert!(ledger.transactions().is_empty());
        assert!(receiver.borrow().is_empty());
    }
}
