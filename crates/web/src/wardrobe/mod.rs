//! Wardrobe backend API client.
//!
//! # Architecture
//!
//! - Plain JSON-over-HTTP calls via `reqwest` - the backend owns all
//!   persistence and the outfit generator
//! - No caching, no retries, no request timeouts: each call is a single
//!   fire-and-observe round trip
//!
//! # Endpoints
//!
//! - `POST /user/signin` / `POST /user/signup` - lookup-or-create a user from
//!   the identity provider's email
//! - `POST /outfits/generateOutfits` - candidate outfit set for a user
//! - `POST /outfits/randomOutfits` - one random outfit
//! - `POST /wardrobeItems/updateSelected` - mark which items are in use
//! - `POST /wardrobeItems/addItems` - multipart upload of a new item
//!
//! # Example
//!
//! ```rust,ignore
//! use dresser_web::wardrobe::WardrobeClient;
//!
//! let client = WardrobeClient::new(&config.wardrobe);
//!
//! let user_id = match client.sign_in(&email).await? {
//!     Some(id) => id,
//!     None => client.sign_up(&email, Some("Ada")).await?,
//! };
//! let outfits = client.generate_outfits(&user_id).await?;
//! ```

mod client;
pub mod types;

pub use client::WardrobeClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the wardrobe backend.
#[derive(Debug, Error)]
pub enum WardrobeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("wardrobe API returned {status}: {body}")]
    Status {
        /// HTTP status code from the backend.
        status: reqwest::StatusCode,
        /// Response body excerpt (truncated).
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// An uploaded file could not be turned into a multipart part.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = WardrobeError::Status {
            status: reqwest::StatusCode::BAD_GATEWAY,
            body: "upstream down".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "wardrobe API returned 502 Bad Gateway: upstream down"
        );
    }

    #[test]
    fn test_invalid_upload_display() {
        let err = WardrobeError::InvalidUpload("bad content type".to_string());
        assert_eq!(err.to_string(), "invalid upload: bad content type");
    }
}
