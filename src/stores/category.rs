//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID},
};

/// Handles the creation and retrieval of transaction categories.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    fn create(&mut self, name: CategoryName, is_default: bool) -> Result<Category, Error>;

    /// Delete the category with `id`.
    ///
    /// Implementers should return [`Error::NotFound`] when no row matched.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;

    /// Delete every category that was created by the user, preserving the
    /// seeded defaults.
    fn delete_user_defined(&mut self) -> Result<(), Error>;

    /// Delete every category, including the seeded defaults.
    fn delete_all(&mut self) -> Result<(), Error>;

    /// Retrieve all categories, ordered by name ascending.
    fn get_all(&self) -> Result<Vec<Category>, Error>;

    /// The number of categories in the store.
    fn count(&self) -> Result<usize, Error>;
}
