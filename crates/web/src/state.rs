//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::DresserConfig;
use crate::services::auth::IdentityClient;
use crate::wardrobe::WardrobeClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the external API clients. There is no local database:
/// all persistence belongs to the wardrobe backend.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DresserConfig,
    wardrobe: WardrobeClient,
    identity: IdentityClient,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: DresserConfig) -> Self {
        let wardrobe = WardrobeClient::new(&config.wardrobe);
        let identity = IdentityClient::new(&config.identity);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                wardrobe,
                identity,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &DresserConfig {
        &self.inner.config
    }

    /// Get a reference to the wardrobe backend client.
    #[must_use]
    pub fn wardrobe(&self) -> &WardrobeClient {
        &self.inner.wardrobe
    }

    /// Get a reference to the identity provider client.
    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }
}
