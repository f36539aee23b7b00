//! User store abstraction
//!
//! This module provides the `UserStore` trait that decouples the credential
//! logic from where user records live. The shipped backend is the in-memory
//! [`MemoryUserStore`](super::memory::MemoryUserStore); a persistent backend
//! only has to honour the same two operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use gatehouse::db::{MemoryUserStore, UserStore};
//!
//! let store = MemoryUserStore::new();
//! store.insert(user).await?;
//! let found = store.find_by_username("alice").await?;
//! ```

use crate::types::{Result, User};
use async_trait::async_trait;

/// Abstract trait for user record storage
///
/// Implementations must make `insert` an atomic insert-if-absent: the
/// uniqueness check and the write happen as one unit, so concurrent inserts
/// of the same username resolve to exactly one success.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with [`AppError::DuplicateUser`](crate::types::AppError::DuplicateUser)
    /// when a record with the same username already exists.
    async fn insert(&self, user: User) -> Result<()>;

    /// Get a user by exact, case-sensitive username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}
