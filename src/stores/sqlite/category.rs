//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, DatabaseID},
    stores::CategoryStore,
};

/// Creates and retrieves transaction categories to/from a SQLite database.
///
/// Category names are intentionally not constrained to be unique; the
/// presentation layer treats duplicates as a user problem, not a store error.
#[derive(Debug, Clone)]
pub struct SqliteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SqliteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// Returns an [`Error::SqlError`] if there is an SQL error.
    fn create(&mut self, name: CategoryName, is_default: bool) -> Result<Category, Error> {
        let connection = self.connection.lock().map_err(|_| Error::DatabaseLock)?;
        connection.execute(
            "INSERT INTO category (name, is_default) VALUES (?1, ?2);",
            (name.as_ref(), is_default),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category::new(id, name, is_default))
    }

    /// Delete the category with `id` from the database.
    ///
    /// # Errors
    /// This function will return:
    /// - [`Error::NotFound`] if no category has `id`,
    /// - or [`Error::SqlError`] if there is an SQL error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM category WHERE id = ?1;", (id,))?;

        if rows_deleted == 0 {
            Err(Error::NotFound)
        } else {
            Ok(())
        }
    }

    /// Delete every user-created category, preserving seeded defaults.
    ///
    /// # Errors
    /// Returns an [`Error::SqlError`] if there is an SQL error.
    fn delete_user_defined(&mut self) -> Result<(), Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM category WHERE is_default = 0;", ())?;

        Ok(())
    }

    /// Delete every category in the database.
    ///
    /// # Errors
    /// Returns an [`Error::SqlError`] if there is an SQL error.
    fn delete_all(&mut self) -> Result<(), Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .execute("DELETE FROM category;", ())?;

        Ok(())
    }

    /// Retrieve all categories in the database, ordered by name ascending.
    ///
    /// # Errors
    /// Returns an [`Error::SqlError`] if there is an SQL error.
    fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .prepare("SELECT id, name, is_default FROM category ORDER BY name ASC;")?
            .query_map([], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// Get the number of categories in the database.
    ///
    /// # Errors
    /// Returns an [`Error::SqlError`] if there is an SQL error.
    fn count(&self) -> Result<usize, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLock)?
            .query_row("SELECT COUNT(id) FROM category;", [], |row| {
                row.get::<_, i64>(0).map(|count| count as usize)
            })
            .map_err(|error| error.into())
    }
}

impl CreateTable for SqliteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                is_default INTEGER NOT NULL DEFAULT 0
            );",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SqliteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(&raw_name);

        let is_default = row.get(offset + 2)?;

        Ok(Category::new(id, name, is_default))
    }
}

#[cfg(test)]
mod sqlite_category_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, db::initialize, models::CategoryName, stores::CategoryStore};

    use super::SqliteCategoryStore;

    fn get_test_store() -> SqliteCategoryStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SqliteCategoryStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_category_succeeds() {
        let mut store = get_test_store();
        let name = CategoryName::new("Categorically a category").unwrap();

        let category = store.create(name.clone(), false).unwrap();

        assert!(category.id() > 0);
        assert_eq!(category.name(), &name);
        assert!(!category.is_default());
    }

    #[test]
    fn create_duplicate_name_succeeds() {
        // Name uniqueness is intended but not enforced by the store.
        let mut store = get_test_store();
        let name = CategoryName::new_unchecked("Groceries");

        store.create(name.clone(), false).unwrap();
        let duplicate = store.create(name, false);

        assert!(duplicate.is_ok());
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn get_all_returns_categories_sorted_by_name() {
        let mut store = get_test_store();
        store
            .create(CategoryName::new_unchecked("Transport"), true)
            .unwrap();
        store
            .create(CategoryName::new_unchecked("Entertainment"), false)
            .unwrap();
        store
            .create(CategoryName::new_unchecked("Groceries"), true)
            .unwrap();

        let names: Vec<String> = store
            .get_all()
            .unwrap()
            .iter()
            .map(|category| category.name().to_string())
            .collect();

        assert_eq!(names, vec!["Entertainment", "Groceries", "Transport"]);
    }

    #[test]
    fn delete_category_removes_row() {
        let mut store = get_test_store();
        let category = store
            .create(CategoryName::new_unchecked("Foo"), false)
            .unwrap();

        store.delete(category.id()).unwrap();

        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn delete_category_with_invalid_id_returns_not_found() {
        let mut store = get_test_store();

        let result = store.delete(999);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_user_defined_preserves_defaults() {
        let mut store = get_test_store();
        store
            .create(CategoryName::new_unchecked("Groceries"), true)
            .unwrap();
        store
            .create(CategoryName::new_unchecked("Hobbies"), false)
            .unwrap();
        store
            .create(CategoryName::new_unchecked("Pets"), false)
            .unwrap();

        store.delete_user_defined().unwrap();

        let remaining = store.get_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].is_default());
    }

    #[test]
    fn delete_all_removes_defaults_too() {
        let mut store = get_test_store();
        store
            .create(CategoryName::new_unchecked("Groceries"), true)
            .unwrap();
        store
            .create(CategoryName::new_unchecked("Hobbies"), false)
            .unwrap();

        store.delete_all().unwrap();

        assert_eq!(store.count().unwrap(), 0);
    }
}
