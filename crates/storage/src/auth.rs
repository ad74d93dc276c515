use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use skill_core::Clock;
use skill_core::model::{Credentials, Session, UserId};
use thiserror::Error;
use tracing::debug;

use crate::repository::{AccountRecord, AccountRepository, StorageError};

/// Failures reported by an identity provider.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email already in use")]
    EmailTaken,

    #[error("password rejected: {0}")]
    WeakPassword(String),

    #[error("identity provider error: {0}")]
    Provider(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Email/password identity provider.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Authenticate an existing account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for unknown emails or wrong passwords.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// End a session on the provider side.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` if the provider refuses.
    async fn sign_out(&self, session: &Session) -> Result<(), AuthError>;
}

/// Provider that keeps argon2 password hashes in an [`AccountRepository`].
#[derive(Clone)]
pub struct LocalAuthProvider {
    accounts: Arc<dyn AccountRepository>,
    clock: Clock,
}

impl LocalAuthProvider {
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountRepository>, clock: Clock) -> Self {
        Self { accounts, clock }
    }

    fn hash(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Provider(e.to_string()))
    }

    fn verify(password: &str, stored: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(stored).map_err(|e| AuthError::Provider(e.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Provider(e.to_string())),
        }
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let Some(account) = self.accounts.find_account(credentials.email()).await? else {
            debug!(email = credentials.email(), "sign-in for unknown account");
            return Err(AuthError::InvalidCredentials);
        };
        if !Self::verify(credentials.password(), &account.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Session::new(account.user_id, account.email))
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let record = AccountRecord {
            email: credentials.email().to_owned(),
            user_id: UserId::generate(),
            password_hash: Self::hash(credentials.password())?,
            created_at: self.clock.now(),
        };
        match self.accounts.insert_account(&record).await {
            Ok(()) => Ok(Session::new(record.user_id, record.email)),
            Err(StorageError::Conflict) => Err(AuthError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), AuthError> {
        Ok(())
    }
}
