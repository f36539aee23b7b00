use crate::auth::password::Argon2Hasher;
use crate::db::UserStore;
use crate::types::{AppError, Result, User};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Password verified against when the requested user does not exist.
const DUMMY_PASSWORD: &str = "gatehouse-dummy-password";

/// Owns user records: enforces username uniqueness, hashes passwords on
/// creation and verifies them on login.
pub struct CredentialStore {
    store: Arc<dyn UserStore>,
    hasher: Argon2Hasher,
    dummy_hash: OnceCell<String>,
}

impl CredentialStore {
    /// Creates a credential store on top of a user store backend.
    pub fn new(store: Arc<dyn UserStore>, hasher: Argon2Hasher) -> Self {
        Self {
            store,
            hasher,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Creates a user with a freshly salted Argon2id hash of `password`.
    ///
    /// Fails with [`AppError::DuplicateUser`] when the username is taken,
    /// including when a concurrent signup for the same name wins the insert.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User> {
        // Skip the expensive hash for names that are already taken. The
        // store's insert stays the authoritative check.
        if self.store.find_by_username(username).await?.is_some() {
            return Err(AppError::DuplicateUser(username.to_string()));
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = User {
            username: username.to_string(),
            password_hash,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at: Utc::now(),
        };

        self.store.insert(user.clone()).await?;

        Ok(user)
    }

    /// Looks up a user by exact, case-sensitive username.
    pub async fn find_user(&self, username: &str) -> Result<Option<User>> {
        self.store.find_by_username(username).await
    }

    /// Checks a username/password pair.
    ///
    /// Unknown users and wrong passwords both fail with the same
    /// [`AppError::InvalidCredentials`]. For unknown users a dummy hash is
    /// still verified so both paths do the same amount of work.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<User> {
        let Some(user) = self.store.find_by_username(username).await? else {
            let dummy_hash = self.dummy_hash().await?;
            self.hasher.verify(password, dummy_hash).await?;
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn dummy_hash(&self) -> Result<&String> {
        self.dummy_hash
            .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryUserStore;
    use crate::utils::toml_config::Argon2Config;

    fn create_test_store() -> CredentialStore {
        let hasher = Argon2Hasher::new(&Argon2Config::low_cost()).expect("valid parameters");
        CredentialStore::new(Arc::new(MemoryUserStore::new()), hasher)
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let credentials = create_test_store();

        let created = credentials
            .create_user("alice", "pw123", "Alice", "A")
            .await
            .expect("should create user");
        let found = credentials
            .find_user("alice")
            .await
            .unwrap()
            .expect("alice should exist");

        assert_eq!(found.username, "alice");
        assert_eq!(found.first_name, "Alice");
        assert_eq!(found.last_name, "A");
        assert_eq!(found.password_hash, created.password_hash);
        assert_ne!(found.password_hash, "pw123");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let credentials = create_test_store();
        credentials
            .create_user("alice", "pw123", "Alice", "A")
            .await
            .unwrap();

        let result = credentials.create_user("alice", "pw456", "A2", "L2").await;

        assert!(matches!(result, Err(AppError::DuplicateUser(_))));
        let kept = credentials.find_user("alice").await.unwrap().unwrap();
        assert_eq!(kept.first_name, "Alice");
    }

    #[tokio::test]
    async fn test_usernames_are_case_sensitive() {
        let credentials = create_test_store();
        credentials
            .create_user("alice", "pw123", "Alice", "A")
            .await
            .unwrap();

        credentials
            .create_user("Alice", "pw123", "Other", "Alice")
            .await
            .expect("differently cased username is a different user");

        assert!(matches!(
            credentials.verify_credentials("ALICE", "pw123").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials_success() {
        let credentials = create_test_store();
        credentials
            .create_user("alice", "pw123", "Alice", "A")
            .await
            .unwrap();

        let user = credentials
            .verify_credentials("alice", "pw123")
            .await
            .expect("correct password should verify");

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let credentials = create_test_store();
        credentials
            .create_user("alice", "pw123", "Alice", "A")
            .await
            .unwrap();

        let wrong_password = credentials
            .verify_credentials("alice", "wrongpw")
            .await
            .expect_err("wrong password must fail");
        let unknown_user = credentials
            .verify_credentials("nobody", "pw123")
            .await
            .expect_err("unknown user must fail");

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_user, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_same_password_different_hashes() {
        let credentials = create_test_store();

        let alice = credentials
            .create_user("alice", "shared", "Alice", "A")
            .await
            .unwrap();
        let bob = credentials
            .create_user("bob", "shared", "Bob", "B")
            .await
            .unwrap();

        assert_ne!(alice.password_hash, bob.password_hash);
        assert!(credentials.verify_credentials("alice", "shared").await.is_ok());
        assert!(credentials.verify_credentials("bob", "shared").await.is_ok());
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_not_masked() {
        let store = Arc::new(MemoryUserStore::new());
        store
            .insert(User {
                username: "broken".to_string(),
                password_hash: "plaintext".to_string(),
                first_name: "B".to_string(),
                last_name: "R".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        let hasher = Argon2Hasher::new(&Argon2Config::low_cost()).unwrap();
        let credentials = CredentialStore::new(store, hasher);

        let result = credentials.verify_credentials("broken", "plaintext").await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
