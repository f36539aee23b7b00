use crate::types::{AppError, Result};
use crate::utils::toml_config::Argon2Config;
use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Argon2id password hashing.
///
/// Hashing and verification are CPU and memory heavy, so both run on the
/// blocking thread pool instead of the async executor.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Creates a hasher with the given Argon2id cost parameters.
    pub fn new(config: &Argon2Config) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// Returns a PHC-formatted hash string.
    pub async fn hash(&self, password: &str) -> Result<String> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    /// Verifies a password against a PHC hash.
    ///
    /// Cost parameters and salt are read from the hash itself. `Ok(false)`
    /// means the password is wrong; a hash that cannot be parsed is an error.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hash)
                .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

            match argon2.verify_password(password.as_bytes(), &parsed_hash) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(AppError::Internal(format!(
                    "Failed to verify password: {}",
                    e
                ))),
            }
        })
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?
    }
}
