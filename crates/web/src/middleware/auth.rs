//! Authentication extractors.
//!
//! Two layers of "who is this": the identity provider profile (proves the
//! visitor logged in) and the resolved backend user (proves we matched or
//! created a wardrobe account). Actions that talk to the backend need the
//! latter; the page itself only needs to know which of the two exists.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};
use crate::services::auth::IdentityProfile;

/// Extractor that optionally gets the identity provider profile.
///
/// Does not reject the request; the outfits page renders a sign-in prompt
/// when this is `None`.
pub struct OptionalIdentity(pub Option<IdentityProfile>);

impl<S> FromRequestParts<S> for OptionalIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<IdentityProfile>(session_keys::IDENTITY)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(identity))
    }
}

/// Extractor that requires a resolved backend user.
///
/// Actions that need the backend id (generate, random, select, add item) are
/// inert until resolution succeeds: the rejection sends the visitor back to
/// the outfits page instead of performing anything.
///
/// # Example
///
/// ```rust,ignore
/// async fn generate(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     // user.id is the backend-issued id
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

/// Rejection when an action needs a resolved user that does not exist yet.
pub enum UserRejection {
    /// Send the visitor back to the page (for HTML form posts).
    BackToOutfits,
    /// Unauthorized response (when no session layer is present at all).
    Unauthorized,
}

impl IntoResponse for UserRejection {
    fn into_response(self) -> Response {
        match self {
            Self::BackToOutfits => Redirect::to("/outfits").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = UserRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(UserRejection::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or(UserRejection::BackToOutfits)?;

        Ok(Self(user))
    }
}
