use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use skill_core::model::{Credentials, Session, UserId};
use storage::auth::{AuthError, AuthProvider};
use tracing::debug;

/// Default Identity Toolkit endpoint.
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Clone, Debug)]
pub struct FirebaseConfig {
    pub base_url: String,
    pub api_key: String,
}

impl FirebaseConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_IDENTITY_URL.into()),
            api_key: api_key.into(),
        }
    }
}

/// Email/password accounts managed by Firebase Authentication over REST.
#[derive(Clone)]
pub struct FirebaseAuthProvider {
    client: Client,
    config: FirebaseConfig,
}

impl FirebaseAuthProvider {
    #[must_use]
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn call(&self, action: &str, credentials: &Credentials) -> Result<Session, AuthError> {
        let url = format!(
            "{}/accounts:{action}?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_key
        );
        let payload = PasswordRequest {
            email: credentials.email(),
            password: credentials.password(),
            return_secure_token: true,
        };

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body: ErrorResponse = response
                .json()
                .await
                .map_err(|_| AuthError::Provider(format!("request failed with status {status}")))?;
            debug!(action, code = %body.error.message, "identity provider rejected request");
            return Err(map_error_code(&body.error.message));
        }

        let body: PasswordResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        let user_id = UserId::new(body.local_id).map_err(|e| AuthError::Provider(e.to_string()))?;
        let email = body.email.unwrap_or_else(|| credentials.email().to_owned());
        Ok(Session::new(user_id, email))
    }
}

#[async_trait]
impl AuthProvider for FirebaseAuthProvider {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.call("signInWithPassword", credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.call("signUp", credentials).await
    }

    async fn sign_out(&self, _session: &Session) -> Result<(), AuthError> {
        // ID tokens are not kept, so there is nothing to revoke.
        Ok(())
    }
}

/// Maps an Identity Toolkit error message (`CODE` or `CODE : detail`) to `AuthError`.
#[must_use]
pub fn map_error_code(message: &str) -> AuthError {
    let (code, detail) = match message.split_once(':') {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (message.trim(), None),
    };
    match code {
        "EMAIL_EXISTS" => AuthError::EmailTaken,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "WEAK_PASSWORD" => AuthError::WeakPassword(
            detail
                .unwrap_or("Password should be at least 6 characters")
                .to_owned(),
        ),
        "INVALID_EMAIL" => AuthError::Provider("The email address is badly formatted.".into()),
        "USER_DISABLED" => AuthError::Provider("This account has been disabled.".into()),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            AuthError::Provider("Too many attempts. Try again later.".into())
        }
        other => AuthError::Provider(other.to_owned()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_auth_errors() {
        assert!(matches!(map_error_code("EMAIL_EXISTS"), AuthError::EmailTaken));
        assert!(matches!(
            map_error_code("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        ));
        match map_error_code("WEAK_PASSWORD : Password should be at least 6 characters") {
            AuthError::WeakPassword(detail) => {
                assert_eq!(detail, "Password should be at least 6 characters");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_codes_are_passed_through() {
        match map_error_code("OPERATION_NOT_ALLOWED") {
            AuthError::Provider(msg) => assert_eq!(msg, "OPERATION_NOT_ALLOWED"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn request_uses_identity_toolkit_field_names() {
        let body = serde_json::to_value(PasswordRequest {
            email: "a@b.c",
            password: "secret1",
            return_secure_token: true,
        })
        .unwrap();
        assert_eq!(body["returnSecureToken"], true);

        let parsed: PasswordResponse =
            serde_json::from_str(r#"{"localId":"abc","email":"a@b.c","idToken":"t"}"#).unwrap();
        assert_eq!(parsed.local_id, "abc");
    }

    #[test]
    fn config_defaults_endpoint() {
        let cfg = FirebaseConfig::new("key", None);
        assert_eq!(cfg.base_url, DEFAULT_IDENTITY_URL);
    }
}
