//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Redirect to /outfits
//! GET  /health             - Health check
//!
//! # Outfits
//! GET  /outfits            - Outfits page (sign-in prompt when logged out)
//! POST /outfits/generate   - Regenerate the outfit collection
//! POST /outfits/random     - Fetch a random outfit into the featured slot
//! POST /outfits/select     - Mark an outfit as selected
//!
//! # Wardrobe
//! POST /wardrobe/items     - Add a new item (multipart, includes image)
//!
//! # Auth
//! GET  /auth/login         - Redirect to the identity provider
//! GET  /auth/callback      - Handle the OAuth callback, resolve the user
//! POST /auth/logout        - Clear the session, log out at the provider
//! ```

pub mod auth;
pub mod outfits;
pub mod wardrobe;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback))
        .route("/logout", post(auth::logout))
}

/// Create the outfit routes router.
pub fn outfit_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(outfits::show))
        .route("/generate", post(outfits::generate))
        .route("/random", post(outfits::random))
        .route("/select", post(outfits::select))
}

/// Create the wardrobe routes router.
pub fn wardrobe_routes() -> Router<AppState> {
    Router::new().route("/items", post(wardrobe::create))
}

/// Redirect the root to the outfits page.
async fn index() -> Redirect {
    Redirect::to("/outfits")
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .nest("/outfits", outfit_routes())
        .nest("/wardrobe", wardrobe_routes())
        .nest("/auth", auth_routes())
}
