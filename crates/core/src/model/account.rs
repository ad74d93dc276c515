use thiserror::Error;

use crate::model::ids::UserId;

/// Minimum password length accepted by the identity providers.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("Please fill in both email and password")]
    Missing,

    #[error("The email address is badly formatted.")]
    InvalidEmail,

    #[error("Password should be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,
}

/// Email/password pair entered on the login or register screen.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Validates the form input. The email is trimmed and lower-cased.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::Missing` if either field is blank,
    /// `InvalidEmail` if the email has no `@` with text on both sides.
    pub fn new(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(CredentialsError::Missing);
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(CredentialsError::InvalidEmail),
        }
        Ok(Self {
            email: email.to_lowercase(),
            password: password.to_owned(),
        })
    }

    /// Additional check applied when creating an account.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::WeakPassword` for short passwords.
    pub fn for_registration(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let creds = Self::new(email, password)?;
        if creds.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::WeakPassword);
        }
        Ok(creds)
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// An authenticated user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
}

impl Session {
    #[must_use]
    pub fn new(user_id: UserId, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_are_required() {
        assert_eq!(Credentials::new("", "secret").unwrap_err(), CredentialsError::Missing);
        assert_eq!(
            Credentials::new("a@b.c", "").unwrap_err(),
            CredentialsError::Missing
        );
    }

    #[test]
    fn email_needs_an_at_sign() {
        assert_eq!(
            Credentials::new("nobody", "secret").unwrap_err(),
            CredentialsError::InvalidEmail
        );
        assert_eq!(
            Credentials::new("@example.com", "secret").unwrap_err(),
            CredentialsError::InvalidEmail
        );
    }

    #[test]
    fn email_is_normalised() {
        let creds = Credentials::new("  Ana@Example.COM ", "secret").unwrap();
        assert_eq!(creds.email(), "ana@example.com");
    }

    #[test]
    fn registration_rejects_short_passwords() {
        assert_eq!(
            Credentials::for_registration("a@b.c", "12345").unwrap_err(),
            CredentialsError::WeakPassword
        );
        assert!(Credentials::for_registration("a@b.c", "123456").is_ok());
    }

    #[test]
    fn debug_hides_password() {
        let creds = Credentials::new("a@b.c", "hunter22").unwrap();
        assert!(!format!("{creds:?}").contains("hunter22"));
    }
}
