use std::sync::Arc;

use skill_core::model::{ProfileUpdate, Session, UserId, UserProfile};
use storage::repository::ProfileRepository;
use tracing::info;

use crate::Clock;
use crate::error::ProfileServiceError;

/// Reads and edits user profile documents.
#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { clock, profiles }
    }

    /// Write the default profile for a freshly registered account.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Profile` if the email is blank or
    /// `ProfileServiceError::Storage` if the write fails.
    pub async fn provision(&self, session: &Session) -> Result<UserProfile, ProfileServiceError> {
        let profile =
            UserProfile::registered(session.user_id.clone(), &session.email, self.clock.now())?;
        self.profiles.put_profile(&profile).await?;
        info!(user = %session.user_id, "provisioned profile");
        Ok(profile)
    }

    /// Fetch a profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::NotFound` if no profile exists.
    pub async fn get_profile(&self, user_id: &UserId) -> Result<UserProfile, ProfileServiceError> {
        self.profiles
            .get_profile(user_id)
            .await?
            .ok_or_else(|| ProfileServiceError::NotFound(user_id.clone()))
    }

    /// All profiles ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if repository access fails.
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, ProfileServiceError> {
        Ok(self.profiles.list_profiles().await?)
    }

    /// Apply a partial edit and persist it.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::NotFound` if no profile exists and
    /// `ProfileServiceError::Profile` if the edit is invalid.
    pub async fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ProfileServiceError> {
        let mut profile = self.get_profile(user_id).await?;
        if update.is_empty() {
            return Ok(profile);
        }
        profile.apply(update, self.clock.now())?;
        self.profiles.update_profile(&profile).await?;
        Ok(profile)
    }
}
