//! View state for the outfits page.
//!
//! The original flow derived what to show from three independent flags
//! (loading, error, authenticated) with implicit precedence. Here the page
//! state is a single tagged variant, derived structurally, so there is
//! nothing to get out of order.
//!
//! Fetch results are committed through a sequence counter: each mutating
//! fetch claims the next sequence number before it starts, and commits only
//! if no later claim happened while it was in flight. Whichever trigger came
//! last wins; stale responses are discarded instead of overwriting newer
//! state.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use crate::models::session_keys;
use crate::wardrobe::Outfit;

/// Session-held wardrobe data for the outfits page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WardrobeView {
    /// Generated outfit collection. `None` means generation has not run yet
    /// for this resolution; `Some(vec![])` is a valid "no outfits" result.
    pub outfits: Option<Vec<Outfit>>,
    /// Featured slot, filled by the random-outfit action. Independent of the
    /// generated collection.
    pub featured: Option<Outfit>,
    /// The outfit the visitor marked as selected.
    pub selected: Option<Outfit>,
    /// A recorded fetch error. When set, it replaces the entire view.
    pub error: Option<String>,
}

impl WardrobeView {
    /// Load the view from the session, defaulting to empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the session read fails.
    pub async fn load(session: &Session) -> Result<Self, SessionError> {
        Ok(session
            .get::<Self>(session_keys::WARDROBE_VIEW)
            .await?
            .unwrap_or_default())
    }

    /// Store the view back into the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session write fails.
    pub async fn store(&self, session: &Session) -> Result<(), SessionError> {
        session.insert(session_keys::WARDROBE_VIEW, self).await
    }
}

/// What the outfits page shows, as one explicit variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// No identity provider session; prompt to log in.
    SignedOut,
    /// Logged in, but the backend user id is not resolved yet.
    Resolving,
    /// A fetch failed; the whole view is replaced by the message.
    Error(String),
    /// Normal display.
    Ready(WardrobeView),
}

impl PageState {
    /// Derive the page state from the session facts.
    ///
    /// Precedence is structural: signed-out beats everything, an unresolved
    /// id beats view data, and a recorded error beats the ready view.
    #[must_use]
    pub fn derive(identity_present: bool, user_resolved: bool, view: WardrobeView) -> Self {
        if !identity_present {
            return Self::SignedOut;
        }
        if !user_resolved {
            return Self::Resolving;
        }
        if let Some(message) = view.error {
            return Self::Error(message);
        }
        Self::Ready(view)
    }
}

// =============================================================================
// Fetch sequencing
// =============================================================================

/// Claim the next fetch sequence number.
///
/// Call before starting a fetch whose result will be committed to the view.
///
/// # Errors
///
/// Returns an error if the session read or write fails.
pub async fn begin_fetch(session: &Session) -> Result<u64, SessionError> {
    let next = session
        .get::<u64>(session_keys::FETCH_SEQ)
        .await?
        .unwrap_or(0)
        .wrapping_add(1);
    session.insert(session_keys::FETCH_SEQ, next).await?;
    Ok(next)
}

/// Whether a claimed fetch is still the most recent one.
///
/// A fetch whose token is no longer current raced with a later trigger; its
/// result must be discarded.
///
/// # Errors
///
/// Returns an error if the session read fails.
pub async fn is_current_fetch(session: &Session, token: u64) -> Result<bool, SessionError> {
    Ok(session.get::<u64>(session_keys::FETCH_SEQ).await? == Some(token))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[test]
    fn test_signed_out_beats_everything() {
        let view = WardrobeView {
            error: Some("boom".to_string()),
            ..WardrobeView::default()
        };
        assert_eq!(PageState::derive(false, true, view), PageState::SignedOut);
    }

    #[test]
    fn test_unresolved_beats_view_data() {
        let view = WardrobeView {
            error: Some("boom".to_string()),
            ..WardrobeView::default()
        };
        assert_eq!(PageState::derive(true, false, view), PageState::Resolving);
    }

    #[test]
    fn test_error_beats_ready() {
        let view = WardrobeView {
            outfits: Some(vec![Outfit::default()]),
            error: Some("boom".to_string()),
            ..WardrobeView::default()
        };
        assert_eq!(
            PageState::derive(true, true, view),
            PageState::Error("boom".to_string())
        );
    }

    #[test]
    fn test_ready() {
        let view = WardrobeView {
            outfits: Some(vec![]),
            ..WardrobeView::default()
        };
        assert_eq!(
            PageState::derive(true, true, view.clone()),
            PageState::Ready(view)
        );
    }

    #[tokio::test]
    async fn test_view_load_defaults_to_empty() {
        let session = test_session();
        let view = WardrobeView::load(&session).await.unwrap();
        assert_eq!(view, WardrobeView::default());
    }

    #[tokio::test]
    async fn test_view_store_roundtrip() {
        let session = test_session();
        let view = WardrobeView {
            outfits: Some(vec![Outfit::default()]),
            ..WardrobeView::default()
        };
        view.store(&session).await.unwrap();
        assert_eq!(WardrobeView::load(&session).await.unwrap(), view);
    }

    #[tokio::test]
    async fn test_fetch_tokens_are_monotonic() {
        let session = test_session();
        let first = begin_fetch(&session).await.unwrap();
        let second = begin_fetch(&session).await.unwrap();
        assert_eq!(second, first + 1);
    }

    #[tokio::test]
    async fn test_latest_fetch_is_current() {
        let session = test_session();
        let token = begin_fetch(&session).await.unwrap();
        assert!(is_current_fetch(&session, token).await.unwrap());
    }

    #[tokio::test]
    async fn test_stale_fetch_is_discarded() {
        let session = test_session();
        let stale = begin_fetch(&session).await.unwrap();
        let fresh = begin_fetch(&session).await.unwrap();

        // The earlier claim lost the race and must not commit
        assert!(!is_current_fetch(&session, stale).await.unwrap());
        assert!(is_current_fetch(&session, fresh).await.unwrap());
    }
}
