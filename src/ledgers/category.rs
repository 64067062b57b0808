//! The category ledger: seeding policy, name validation and category wipes.

use tokio::sync::watch;

use crate::{
    Error,
    models::{Category, CategoryName},
    stores::CategoryStore,
};

/// The categories seeded on first launch.
///
/// Configuration, not logic: the seeding routine inserts exactly this set
/// when the category table is empty.
pub const DEFAULT_CATEGORY_NAMES: [&str; 4] = ["Groceries", "Transport", "Salary", "Entertainment"];

/// Enforces the category rules on top of a [CategoryStore] and re-exposes the
/// stored categories as a live snapshot.
///
/// Deleting a category never removes or modifies transactions that reference
/// its name; those transactions keep the now-dangling label.
#[derive(Debug)]
pub struct CategoryLedger<S: CategoryStore> {
    store: S,
    snapshot: watch::Sender<Vec<Category>>,
}

impl<S: CategoryStore> CategoryLedger<S> {
    /// Create a ledger over `store` and publish the initial snapshot.
    ///
    /// # Errors
    /// Returns an error if the initial read from the store fails.
    pub fn new(store: S) -> Result<Self, Error> {
        let initial = store.get_all()?;
        let (snapshot, _) = watch::channel(initial);

        Ok(Self { store, snapshot })
    }

    /// The current categories, ordered by name ascending.
    pub fn categories(&self) -> Vec<Category> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to the live category snapshot.
    ///
    /// The receiver holds the full ordered set and is updated after every
    /// mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Category>> {
        self.snapshot.subscribe()
    }

    /// Insert the built-in default categories if the store is empty.
    ///
    /// Only acts when no categories exist at call time, so calling it again
    /// after categories exist is a no-op. Note that after
    /// [CategoryLedger::clear_all] the defaults are not restored until this
    /// is invoked again.
    ///
    /// # Errors
    /// Returns an error if a store read or write fails.
    pub fn seed_defaults(&mut self) -> Result<(), Error> {
        if self.store.count()? > 0 {
            return Ok(());
        }

        tracing::info!("seeding default categories");
        for name in DEFAULT_CATEGORY_NAMES {
            self.store.create(CategoryName::new_unchecked(name), true)?;
        }

        self.publish()
    }

    /// Add a user-defined category.
    ///
    /// Blank or whitespace-only names are rejected without mutating state;
    /// `Ok(None)` is returned and the caller is responsible for any
    /// user-facing messaging.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn add(&mut self, name: &str) -> Result<Option<Category>, Error> {
        let name = match CategoryName::new(name) {
            Ok(name) => name,
            Err(Error::EmptyCategoryName) => {
                tracing::debug!("ignoring blank category name");
                return Ok(None);
            }
            Err(error) => return Err(error),
        };

        let category = self.store.create(name, false)?;
        self.publish()?;

        Ok(Some(category))
    }

    /// Delete `category` by its identity.
    ///
    /// Deleting a category that is no longer present is a silent no-op.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn remove(&mut self, category: &Category) -> Result<(), Error> {
        match self.store.delete(category.id()) {
            Ok(()) => self.publish(),
            Err(Error::NotFound) => {
                tracing::debug!(id = category.id(), "category already deleted");
                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Delete every user-defined category, preserving the seeded defaults.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn clear_user_defined(&mut self) -> Result<(), Error> {
        self.store.delete_user_defined()?;
        self.publish()
    }

    /// Delete every category, including the seeded defaults.
    ///
    /// Defaults are not automatically reseeded afterwards; call
    /// [CategoryLedger::seed_defaults] to restore them.
    ///
    /// # Errors
    /// Returns an error if the store write fails.
    pub fn clear_all(&mut self) -> Result<(), Error> {
        self.store.delete_all()?;
        self.publish()
    }

    fn publish(&mut self) -> Result<(), Error> {
        let categories = self.store.get_all()?;
        tracing::debug!(categories = categories.len(), "publishing category snapshot");
        self.snapshot.send_replace(categories);

        Ok(())
    }
}
