//! Authentication routes.
//!
//! Login hands the visitor to the identity provider and the callback brings
//! them back with a code. Provider errors never surface as error responses
//! here: every failure path logs and lands back on the outfits page, which
//! renders whatever state the session ended up in.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use rand::{Rng, distr::Alphanumeric};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::clear_sentry_user;
use crate::models::session_keys;
use crate::services::auth::resolve_into_session;
use crate::state::AppState;

fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

fn callback_uri(state: &AppState) -> String {
    format!(
        "{}/auth/callback",
        state.config().base_url.trim_end_matches('/')
    )
}

/// GET handler that starts the login flow.
#[instrument(skip_all)]
pub async fn login(State(state): State<AppState>, session: Session) -> Response {
    let oauth_state = generate_state_token();
    if let Err(e) = session
        .insert(session_keys::OAUTH_STATE, &oauth_state)
        .await
    {
        tracing::error!(error = %e, "Failed to store OAuth state");
        return Redirect::to("/outfits").into_response();
    }

    let url = state
        .identity()
        .authorization_url(&callback_uri(&state), &oauth_state);
    Redirect::to(&url).into_response()
}

/// Query parameters the identity provider sends to the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET handler for the OAuth callback.
///
/// On success the provider profile lands in the session and resolution
/// against the wardrobe backend is attempted immediately. A resolution
/// failure is not fatal; the outfits page retries on the next view.
#[instrument(skip_all)]
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let back = Redirect::to("/outfits");

    if let Some(error) = &query.error {
        tracing::warn!(
            error,
            description = query.error_description.as_deref().unwrap_or(""),
            "Identity provider returned an error"
        );
        return back;
    }
    let (Some(code), Some(returned_state)) = (&query.code, &query.state) else {
        tracing::warn!("Callback missing code or state");
        return back;
    };

    let stored: Option<String> = session
        .get(session_keys::OAUTH_STATE)
        .await
        .ok()
        .flatten();
    if stored.as_deref() != Some(returned_state.as_str()) {
        tracing::warn!("OAuth state mismatch, discarding callback");
        return back;
    }
    let _removed: Option<String> = session
        .remove(session_keys::OAUTH_STATE)
        .await
        .ok()
        .flatten();

    let profile = match state
        .identity()
        .exchange_code(code, &callback_uri(&state))
        .await
    {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!(error = %e, "Code exchange failed");
            return back;
        }
    };

    if let Err(e) = session.insert(session_keys::IDENTITY, &profile).await {
        tracing::error!(error = %e, "Failed to store identity profile");
        return back;
    }

    if let Err(e) = resolve_into_session(state.wardrobe(), &session, &profile).await {
        tracing::error!(error = %e, "Failed to store resolved user");
    }

    back
}

/// POST handler that logs the visitor out.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    if let Err(e) = session.flush().await {
        tracing::error!(error = %e, "Failed to clear session on logout");
    }
    clear_sentry_user();

    let return_to = format!("{}/outfits", state.config().base_url.trim_end_matches('/'));
    Redirect::to(&state.identity().logout_url(&return_to)).into_response()
}
