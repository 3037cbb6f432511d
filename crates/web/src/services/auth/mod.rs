//! Identity provider client and user resolution.
//!
//! Authentication is delegated to a managed identity provider via the OAuth
//! 2.0 authorization-code flow:
//!
//! 1. Generate the authorization URL with `authorization_url()`
//! 2. Redirect the visitor to the provider's login page
//! 3. The provider redirects back with an authorization code
//! 4. Exchange the code with `exchange_code()` and fetch the profile
//!
//! The provider's protocol internals are not our concern; all the app needs
//! from it is `{email, given_name}`. That profile is then resolved to a
//! backend-issued [`UserId`] with [`resolve_user`]: sign-in first, sign-up
//! exactly once when the account does not exist yet.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use dresser_core::{Email, UserId};

use tower_sessions::Session;

use crate::config::IdentityConfig;
use crate::error::set_sentry_user;
use crate::models::{CurrentUser, session_keys};
use crate::wardrobe::{WardrobeClient, WardrobeError};

/// Profile fields the identity provider supplies about a logged-in visitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityProfile {
    /// Verified email address.
    pub email: Email,
    /// Given name, when the provider has one.
    pub given_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    email: String,
    #[serde(default)]
    given_name: Option<String>,
}

/// Client for the identity provider's OAuth endpoints.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    issuer_url: String,
    client_id: String,
    client_secret: String,
}

impl IdentityClient {
    /// Create a new identity provider client.
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            inner: Arc::new(IdentityClientInner {
                client: reqwest::Client::new(),
                issuer_url: config.issuer_url.trim_end_matches('/').to_string(),
                client_id: config.client_id.clone(),
                client_secret: config.client_secret.expose_secret().to_string(),
            }),
        }
    }

    /// Generate the authorization URL for login.
    ///
    /// # Arguments
    ///
    /// * `redirect_uri` - The callback URL to redirect to after authentication
    /// * `state` - A random string stored in the session to prevent CSRF attacks
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: &str, state: &str) -> String {
        format!(
            "{}/authorize?\
            client_id={}&\
            response_type=code&\
            redirect_uri={}&\
            scope=openid%20profile%20email&\
            state={}",
            self.inner.issuer_url,
            urlencoding::encode(&self.inner.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(state)
        )
    }

    /// Generate the provider logout URL.
    ///
    /// # Arguments
    ///
    /// * `return_to` - Where the provider should send the visitor afterwards
    #[must_use]
    pub fn logout_url(&self, return_to: &str) -> String {
        format!(
            "{}/logout?client_id={}&returnTo={}",
            self.inner.issuer_url,
            urlencoding::encode(&self.inner.client_id),
            urlencoding::encode(return_to)
        )
    }

    /// Exchange an authorization code for the visitor's profile.
    ///
    /// Performs the token exchange and then fetches the userinfo document.
    ///
    /// # Errors
    ///
    /// Returns an error if either call fails or the profile's email does not
    /// parse.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<IdentityProfile, AuthError> {
        let url = format!("{}/oauth/token", self.inner.issuer_url);

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", &self.inner.client_id),
            ("client_secret", &self.inner.client_secret),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self.inner.client.post(&url).form(&params).send().await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(format!(
                "token exchange failed: {text}"
            )));
        }

        let token: TokenResponse = response.json().await?;

        self.fetch_profile(&token.access_token).await
    }

    /// Fetch the visitor's profile from the userinfo endpoint.
    async fn fetch_profile(&self, access_token: &str) -> Result<IdentityProfile, AuthError> {
        let url = format!("{}/userinfo", self.inner.issuer_url);

        let response = self
            .inner
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::Provider(format!("userinfo failed: {text}")));
        }

        let info: UserInfoResponse = response.json().await?;
        let email = Email::parse(&info.email)
            .map_err(|e| AuthError::InvalidProfile(format!("bad email from provider: {e}")))?;

        Ok(IdentityProfile {
            email,
            given_name: info.given_name,
        })
    }
}

/// Resolve a provider profile to a backend user id.
///
/// Attempts sign-in; when the backend does not recognize the email, performs
/// sign-up with the email and given name - exactly once.
///
/// # Errors
///
/// Returns an error if either backend call fails. Callers log the error and
/// leave the id unresolved; actions that need it stay inert.
pub async fn resolve_user(
    wardrobe: &WardrobeClient,
    profile: &IdentityProfile,
) -> Result<UserId, WardrobeError> {
    if let Some(id) = wardrobe.sign_in(&profile.email).await? {
        tracing::debug!(user_id = %id, "Sign-in matched an existing account");
        return Ok(id);
    }

    let id = wardrobe
        .sign_up(&profile.email, profile.given_name.as_deref())
        .await?;
    tracing::info!(user_id = %id, "Created account for new visitor");
    Ok(id)
}

/// Resolve the visitor and record the result in the session.
///
/// A resolution failure is logged and swallowed: the visitor stays in the
/// resolving state and the next page view retries. Only session writes
/// propagate as errors.
///
/// # Errors
///
/// Returns an error if the session write fails.
pub async fn resolve_into_session(
    wardrobe: &WardrobeClient,
    session: &Session,
    profile: &IdentityProfile,
) -> Result<Option<CurrentUser>, tower_sessions::session::Error> {
    match resolve_user(wardrobe, profile).await {
        Ok(id) => {
            let user = CurrentUser {
                id,
                email: profile.email.clone(),
                given_name: profile.given_name.clone(),
            };
            session.insert(session_keys::CURRENT_USER, &user).await?;
            set_sentry_user(&user.id, Some(user.email.as_str()));
            Ok(Some(user))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve wardrobe user");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn test_client() -> IdentityClient {
        IdentityClient::new(&IdentityConfig {
            issuer_url: "https://login.test/".to_string(),
            client_id: "my client".to_string(),
            client_secret: SecretString::from("shhh"),
        })
    }

    #[test]
    fn test_authorization_url() {
        let url = test_client().authorization_url("https://app.test/auth/callback", "st4te");

        // Trailing slash on the issuer must not double up
        assert!(url.starts_with("https://login.test/authorize?"));
        assert!(url.contains("client_id=my%20client"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.test%2Fauth%2Fcallback"));
        assert!(url.contains("state=st4te"));
        assert!(url.contains("response_type=code"));
    }

    #[test]
    fn test_logout_url() {
        let url = test_client().logout_url("https://app.test/");
        assert!(url.starts_with("https://login.test/logout?"));
        assert!(url.contains("returnTo=https%3A%2F%2Fapp.test%2F"));
    }

    #[test]
    fn test_profile_serde() {
        let profile = IdentityProfile {
            email: Email::parse("ada@example.com").unwrap(),
            given_name: Some("Ada".to_string()),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: IdentityProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
