//! HTTP client for the wardrobe backend.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;

use dresser_core::{Email, UserId};

use crate::config::WardrobeApiConfig;

use super::WardrobeError;
use super::types::{
    GenerateOutfitsResponse, NewItem, Outfit, OutfitsRequest, RandomOutfitResponse, SignInRequest,
    SignInResponse, SignUpRequest, SignUpResponse, UpdateSelectedRequest,
};

/// Client for the wardrobe backend API.
///
/// Cheaply cloneable via `Arc`. Every method is a single non-retried HTTP
/// round trip; callers decide what a failure means for the view.
#[derive(Clone)]
pub struct WardrobeClient {
    inner: Arc<WardrobeClientInner>,
}

struct WardrobeClientInner {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
}

impl WardrobeClient {
    /// Create a new wardrobe API client.
    #[must_use]
    pub fn new(config: &WardrobeApiConfig) -> Self {
        Self {
            inner: Arc::new(WardrobeClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
                api_token: config
                    .api_token
                    .as_ref()
                    .map(|t| t.expose_secret().to_string()),
            }),
        }
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.inner.base_url);
        let mut builder = self.inner.client.post(url);
        if let Some(token) = &self.inner.api_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Execute a JSON POST and decode the response body.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, WardrobeError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(path).json(body).send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                path,
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "Wardrobe API returned non-success status"
            );
            return Err(WardrobeError::Status {
                status,
                body: text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                path,
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to parse wardrobe API response"
            );
            WardrobeError::Parse(e)
        })
    }

    /// Execute a JSON POST whose response body is ignored.
    async fn post_and_discard<B>(&self, path: &str, body: &B) -> Result<(), WardrobeError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.request(path).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WardrobeError::Status {
                status,
                body: text.chars().take(200).collect(),
            });
        }

        Ok(())
    }

    // =========================================================================
    // User resolution
    // =========================================================================

    /// Look up an account by email.
    ///
    /// Returns `Some(id)` when the backend verified an existing account, and
    /// `None` when no account matched (the caller should sign up).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self, email))]
    pub async fn sign_in(&self, email: &Email) -> Result<Option<UserId>, WardrobeError> {
        let response: SignInResponse = self
            .post_json("/user/signin", &SignInRequest { email })
            .await?;
        Ok(response.verified_id())
    }

    /// Create an account from the identity provider's email and given name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self, email, name))]
    pub async fn sign_up(
        &self,
        email: &Email,
        name: Option<&str>,
    ) -> Result<UserId, WardrobeError> {
        let response: SignUpResponse = self
            .post_json("/user/signup", &SignUpRequest { email, name })
            .await?;
        Ok(response.id)
    }

    // =========================================================================
    // Outfits
    // =========================================================================

    /// Request a freshly generated candidate outfit set for a user.
    ///
    /// An absent or empty collection in the response is a valid result.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn generate_outfits(&self, user_id: &UserId) -> Result<Vec<Outfit>, WardrobeError> {
        let response: GenerateOutfitsResponse = self
            .post_json("/outfits/generateOutfits", &OutfitsRequest { user_id })
            .await?;
        Ok(response.outfits)
    }

    /// Request a single random outfit for the featured slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be parsed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn random_outfit(&self, user_id: &UserId) -> Result<Option<Outfit>, WardrobeError> {
        let response: RandomOutfitResponse = self
            .post_json("/outfits/randomOutfits", &OutfitsRequest { user_id })
            .await?;
        Ok(response.outfit)
    }

    /// Tell the backend which items are now in use.
    ///
    /// All three ids are optional: selecting the featured outfit sends no
    /// constituent ids at all. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; callers log and move on.
    #[instrument(skip_all)]
    pub async fn update_selected(&self, outfit: &Outfit) -> Result<(), WardrobeError> {
        let (top, bottom, shoes) = outfit.item_ids();
        self.post_and_discard(
            "/wardrobeItems/updateSelected",
            &UpdateSelectedRequest { top, bottom, shoes },
        )
        .await
    }

    /// Submit a new wardrobe item as a single multipart request.
    ///
    /// The payload carries exactly the eight fields the backend expects:
    /// `image`, `name`, `category`, `type`, `color`, `description`,
    /// `occasion`, `userId`. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload's content type is invalid, the request
    /// fails, or the backend returns a non-success status.
    #[instrument(skip_all, fields(name = %item.name, category = %item.category))]
    pub async fn add_item(&self, item: NewItem) -> Result<(), WardrobeError> {
        let mut image = reqwest::multipart::Part::bytes(item.image.bytes)
            .file_name(item.image.file_name);
        if let Some(content_type) = &item.image.content_type {
            image = image
                .mime_str(content_type)
                .map_err(|e| WardrobeError::InvalidUpload(e.to_string()))?;
        }

        let form = reqwest::multipart::Form::new()
            .part("image", image)
            .text("name", item.name)
            .text("category", item.category.as_str())
            .text("type", item.garment_type.as_str())
            .text("color", item.color)
            .text("description", item.description)
            .text("occasion", item.occasion.as_str())
            .text("userId", item.user_id.into_inner());

        let response = self
            .request("/wardrobeItems/addItems")
            .multipart(form)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WardrobeError::Status {
                status,
                body: text.chars().take(200).collect(),
            });
        }

        Ok(())
    }
}
