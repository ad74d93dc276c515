use std::sync::Arc;

use skill_core::model::{Credentials, Session};
use storage::auth::AuthProvider;
use tokio::sync::watch;
use tracing::{error, info};

use crate::error::AuthServiceError;
use crate::profile_service::ProfileService;

/// Tracks the signed-in user and talks to the identity provider.
///
/// Sign-in state is pushed to subscribers through a watch channel.
#[derive(Clone)]
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    profiles: ProfileService,
    state: Arc<watch::Sender<Option<Session>>>,
}

impl AuthService {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>, profiles: ProfileService) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            provider,
            profiles,
            state: Arc::new(state),
        }
    }

    /// The current session, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every sign-in and sign-out.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Credentials` for incomplete input and
    /// `AuthServiceError::Auth` if the provider rejects the attempt.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        let credentials = Credentials::new(email, password)?;
        let session = self.provider.sign_in(&credentials).await?;
        info!(user = %session.user_id, "signed in");
        self.state.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Create an account, sign it in and provision its profile.
    ///
    /// A failed profile write is logged; the account stays signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Credentials` for invalid input and
    /// `AuthServiceError::Auth` if the provider rejects the registration.
    pub async fn register(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        let credentials = Credentials::for_registration(email, password)?;
        let session = self.provider.sign_up(&credentials).await?;
        info!(user = %session.user_id, "registered account");
        if let Err(e) = self.profiles.provision(&session).await {
            error!(user = %session.user_id, error = %e, "profile provisioning failed");
        }
        self.state.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Sign out the current user. A no-op when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthServiceError::Auth` if the provider refuses; the local
    /// session is kept in that case.
    pub async fn logout(&self) -> Result<(), AuthServiceError> {
        let Some(session) = self.current() else {
            return Ok(());
        };
        self.provider.sign_out(&session).await?;
        self.state.send_replace(None);
        info!(user = %session.user_id, "signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::model::CredentialsError;
    use skill_core::time::fixed_clock;
    use storage::auth::{AuthError, LocalAuthProvider};
    use storage::repository::InMemoryRepository;

    fn service() -> (AuthService, ProfileService) {
        let repo = Arc::new(InMemoryRepository::new());
        let profiles = ProfileService::new(fixed_clock(), repo.clone());
        let provider = Arc::new(LocalAuthProvider::new(repo, fixed_clock()));
        (AuthService::new(provider, profiles.clone()), profiles)
    }

    #[tokio::test]
    async fn register_signs_in_and_provisions_profile() {
        let (auth, profiles) = service();
        let mut rx = auth.subscribe();

        let session = auth.register("Ana@Example.com", "secret1").await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref(), Some(&session));
        assert_eq!(auth.current(), Some(session.clone()));
        let profile = profiles.get_profile(&session.user_id).await.unwrap();
        assert_eq!(profile.email(), "ana@example.com");
    }

    #[tokio::test]
    async fn login_and_logout_update_state() {
        let (auth, _) = service();
        auth.register("ana@example.com", "secret1").await.unwrap();
        auth.logout().await.unwrap();
        assert!(auth.current().is_none());

        let session = auth.login("ana@example.com", "secret1").await.unwrap();
        assert_eq!(auth.current(), Some(session));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_before_the_provider() {
        let (auth, _) = service();
        let err = auth.login("", "").await.unwrap_err();
        assert!(matches!(
            err,
            AuthServiceError::Credentials(CredentialsError::Missing)
        ));
        assert_eq!(err.to_string(), "Please fill in both email and password");
    }

    #[tokio::test]
    async fn failed_login_keeps_signed_out() {
        let (auth, _) = service();
        let err = auth.login("ana@example.com", "secret1").await.unwrap_err();
        assert!(matches!(
            err,
            AuthServiceError::Auth(AuthError::InvalidCredentials)
        ));
        assert!(auth.current().is_none());
    }
}
