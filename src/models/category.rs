//! This file defines the `Category` type and the validated name type used to
//! create one. A category is a label that transactions refer to by name.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, models::DatabaseID};

/// The name of a category.
///
/// Guaranteed to contain at least one non-whitespace character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    /// This function will return [`Error::EmptyCategoryName`] if `name` is
    /// empty or contains only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.trim().is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not blank. This function
    /// is not `unsafe` because a blank name causes incorrect behaviour but
    /// does not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses and income, e.g., 'Groceries', 'Salary'.
///
/// Categories are either seeded defaults (`is_default` is true) or created by
/// the user. They are never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    id: DatabaseID,
    name: CategoryName,
    is_default: bool,
}

impl Category {
    /// Create a new category.
    pub fn new(id: DatabaseID, name: CategoryName, is_default: bool) -> Self {
        Self {
            id,
            name,
            is_default,
        }
    }

    /// The ID of the category.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The name of the category.
    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Whether the category was created by the default seeding routine.
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}
