//! Session-related types.
//!
//! Types stored in the session for authentication state. The session is the
//! explicit replacement for the ambient auth/view globals of a client-side
//! app: everything a handler needs to know about the visitor lives here.

use serde::{Deserialize, Serialize};

use dresser_core::{Email, UserId};

/// Session-stored resolved user.
///
/// Present once the provider profile has been matched (or signed up) against
/// the wardrobe backend. Actions that need the backend id are inert until
/// this exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    /// Backend-issued user id.
    pub id: UserId,
    /// Email address from the identity provider.
    pub email: Email,
    /// Given name from the identity provider, when available.
    pub given_name: Option<String>,
}

impl CurrentUser {
    /// Name to greet the visitor with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.given_name.as_deref().unwrap_or_else(|| self.email.as_str())
    }
}

/// Session keys for authentication and view data.
pub mod keys {
    /// Key for the identity provider profile (pre-resolution).
    pub const IDENTITY: &str = "identity";

    /// Key for the resolved backend user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for OAuth state (CSRF protection).
    pub const OAUTH_STATE: &str = "oauth_state";

    /// Key for the wardrobe view data (outfits, featured, selected).
    pub const WARDROBE_VIEW: &str = "wardrobe_view";

    /// Key for the fetch sequence counter (stale-response detection).
    pub const FETCH_SEQ: &str = "fetch_seq";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_given_name() {
        let user = CurrentUser {
            id: UserId::new("u1"),
            email: Email::parse("ada@example.com").unwrap(),
            given_name: Some("Ada".to_string()),
        };
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = CurrentUser {
            id: UserId::new("u1"),
            email: Email::parse("ada@example.com").unwrap(),
            given_name: None,
        };
        assert_eq!(user.display_name(), "ada@example.com");
    }
}
