use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::UserId;

/// Picture assigned to freshly registered users.
pub const DEFAULT_PROFILE_PICTURE: &str = "https://via.placeholder.com/100";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("email cannot be empty")]
    EmptyEmail,
}

/// A user's profile document (`users/{id}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    id: UserId,
    email: String,
    name: String,
    profile_picture: String,
    phone_number: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Profile provisioned at registration: the name defaults to the email and
    /// the picture to a placeholder.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyEmail` if the email is blank.
    pub fn registered(
        id: UserId,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, ProfileError> {
        let email = email.into().trim().to_owned();
        if email.is_empty() {
            return Err(ProfileError::EmptyEmail);
        }
        Ok(Self {
            id,
            name: email.clone(),
            email,
            profile_picture: DEFAULT_PROFILE_PICTURE.to_owned(),
            phone_number: String::new(),
            address: String::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a profile from storage. Missing optional fields arrive as empty
    /// strings; a missing name falls back to the email.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyEmail` if the email is blank.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: UserId,
        email: String,
        name: Option<String>,
        profile_picture: Option<String>,
        phone_number: Option<String>,
        address: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ProfileError> {
        if email.trim().is_empty() {
            return Err(ProfileError::EmptyEmail);
        }
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.clone());
        Ok(Self {
            id,
            email,
            name,
            profile_picture: profile_picture.unwrap_or_default(),
            phone_number: phone_number.unwrap_or_default(),
            address: address.unwrap_or_default(),
            created_at,
            updated_at,
        })
    }

    /// Applies a partial edit, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyName` if the update sets a blank name.
    pub fn apply(&mut self, update: ProfileUpdate, now: DateTime<Utc>) -> Result<(), ProfileError> {
        if let Some(name) = update.name {
            let name = name.trim().to_owned();
            if name.is_empty() {
                return Err(ProfileError::EmptyName);
            }
            self.name = name;
        }
        if let Some(picture) = update.profile_picture {
            self.profile_picture = picture.trim().to_owned();
        }
        if let Some(phone) = update.phone_number {
            self.phone_number = phone.trim().to_owned();
        }
        if let Some(address) = update.address {
            self.address = address.trim().to_owned();
        }
        self.updated_at = now;
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn profile_picture(&self) -> &str {
        &self.profile_picture
    }

    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Partial profile edit; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub profile_picture: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.profile_picture.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
    }
}
