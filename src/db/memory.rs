//! In-memory user store.

use super::traits::UserStore;
use crate::types::{AppError, Result, User};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Thread-safe in-memory store for user records.
///
/// Records are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    /// Users by username.
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    /// Create a new empty user store.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.users.read().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: User) -> Result<()> {
        let mut users = self.users.write();

        match users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(AppError::DuplicateUser(user.username)),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.read().get(username).cloned())
    }
}
