//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during the identity provider flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP request to the provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider rejected the request or returned an error document.
    #[error("identity provider error: {0}")]
    Provider(String),

    /// The returned profile was unusable (e.g. malformed email).
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::Provider("token exchange failed: nope".to_string());
        assert_eq!(
            err.to_string(),
            "identity provider error: token exchange failed: nope"
        );

        let err = AuthError::InvalidProfile("bad email".to_string());
        assert_eq!(err.to_string(), "invalid profile: bad email");
    }
}
