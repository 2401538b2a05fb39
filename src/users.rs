//! In-memory user store
//!
//! Mock user data for demonstration purposes, mirroring the rest of the
//! service's read/write surface. Ids are stringified integers assigned
//! sequentially.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by user store operations
#[derive(Debug, Error)]
pub enum UserError {
    /// No user with the requested id
    #[error("User not found")]
    NotFound,

    /// Malformed or missing required input
    #[error("{0}")]
    InvalidArgument(String),
}

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Stringified sequential id
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
}

/// Mutex-guarded collection of mock users
#[derive(Debug)]
pub struct UserStore {
    users: Mutex<Vec<User>>,
}

impl UserStore {
    /// Creates a store seeded with the demonstration users.
    pub fn with_mock_data() -> Self {
        Self {
            users: Mutex::new(vec![
                User {
                    id: "1".to_string(),
                    name: "John Doe".to_string(),
                    email: "john@example.com".to_string(),
                },
                User {
                    id: "2".to_string(),
                    name: "Jane Smith".to_string(),
                    email: "jane@example.com".to_string(),
                },
            ]),
        }
    }

    /// Creates an empty store.
    #[cfg(test)]
    pub fn empty() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    /// Looks up a user by id.
    pub fn get(&self, id: &str) -> Result<User, UserError> {
        let users = self.lock();
        users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(UserError::NotFound)
    }

    /// Creates a new user, assigning the next sequential id.
    pub fn create(&self, name: String, email: String) -> Result<User, UserError> {
        if name.trim().is_empty() {
            return Err(UserError::InvalidArgument(
                "name must not be empty".to_string(),
            ));
        }
        if email.trim().is_empty() {
            return Err(UserError::InvalidArgument(
                "email must not be empty".to_string(),
            ));
        }

        let mut users = self.lock();
        let user = User {
            id: (users.len() + 1).to_string(),
            name,
            email,
        };
        users.push(user.clone());
        Ok(user)
    }

    /// Replaces both fields of an existing user.
    pub fn update(&self, id: &str, name: String, email: String) -> Result<User, UserError> {
        if name.trim().is_empty() {
            return Err(UserError::InvalidArgument(
                "name must not be empty".to_string(),
            ));
        }
        if email.trim().is_empty() {
            return Err(UserError::InvalidArgument(
                "email must not be empty".to_string(),
            ));
        }

        let mut users = self.lock();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserError::NotFound)?;
        user.name = name;
        user.email = email;
        Ok(user.clone())
    }

    /// Updates whichever fields were supplied; blank values are ignored.
    pub fn patch(
        &self,
        id: &str,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<User, UserError> {
        let mut users = self.lock();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserError::NotFound)?;

        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            user.name = name;
        }
        if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
            user.email = email;
        }
        Ok(user.clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_data_is_seeded() {
        let store = UserStore::with_mock_data();
        assert_eq!(store.get("1").unwrap().name, "John Doe");
        assert_eq!(store.get("2").unwrap().name, "Jane Smith");
    }

    #[test]
    fn test_get_missing_user_is_not_found() {
        let store = UserStore::with_mock_data();
        assert!(matches!(store.get("99"), Err(UserError::NotFound)));
    }

    #[test]
    fn test_create_assigns_next_sequential_id() {
        let store = UserStore::with_mock_data();
        let user = store
            .create("Sam Lee".to_string(), "sam@example.com".to_string())
            .unwrap();
        assert_eq!(user.id, "3");
        assert_eq!(store.get("3").unwrap(), user);
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let store = UserStore::empty();
        assert!(matches!(
            store.create(String::new(), "a@example.com".to_string()),
            Err(UserError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.create("A".to_string(), "   ".to_string()),
            Err(UserError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_update_replaces_both_fields() {
        let store = UserStore::with_mock_data();
        let user = store
            .update("1", "John Q. Doe".to_string(), "jq@example.com".to_string())
            .unwrap();
        assert_eq!(user.name, "John Q. Doe");
        assert_eq!(store.get("1").unwrap().email, "jq@example.com");
    }

    #[test]
    fn test_update_missing_user_is_not_found() {
        let store = UserStore::with_mock_data();
        let result = store.update("99", "X".to_string(), "x@example.com".to_string());
        assert!(matches!(result, Err(UserError::NotFound)));
    }

    #[test]
    fn test_patch_updates_only_supplied_fields() {
        let store = UserStore::with_mock_data();
        let user = store
            .patch("2", Some("Jane Q. Smith".to_string()), None)
            .unwrap();
        assert_eq!(user.name, "Jane Q. Smith");
        assert_eq!(user.email, "jane@example.com");
    }

    #[test]
    fn test_patch_ignores_blank_values() {
        let store = UserStore::with_mock_data();
        let user = store
            .patch("2", Some(String::new()), Some("jane2@example.com".to_string()))
            .unwrap();
        assert_eq!(user.name, "Jane Smith");
        assert_eq!(user.email, "jane2@example.com");
    }

    #[test]
    fn test_patch_missing_user_is_not_found() {
        let store = UserStore::with_mock_data();
        assert!(matches!(
            store.patch("99", None, None),
            Err(UserError::NotFound)
        ));
    }
}
