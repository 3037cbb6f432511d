//! Wardrobe item routes.

use axum::{
    extract::{Multipart, State},
    response::Response,
};
use tower_sessions::Session;
use tracing::instrument;

use dresser_core::{Category, GarmentType, Occasion};

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::routes::outfits::{self, ItemForm};
use crate::state::AppState;
use crate::wardrobe::{ImageUpload, NewItem};

/// Flash shown after a successful item submission.
const ADDED_MSG: &str = "Item added successfully!";

/// POST handler that adds a new wardrobe item.
///
/// The form is submitted as multipart because it carries the image; the
/// whole item goes to the backend as one request. Success re-renders the
/// outfits page with the submitted values still in the form and a flash
/// banner; a backend failure is logged and the page re-renders without one.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    RequireUser(user): RequireUser,
    multipart: Multipart,
) -> Result<Response> {
    let (form, image) = read_form(multipart).await?;

    let item = NewItem {
        name: require(&form.name, "name")?,
        category: parse_variant(Category::parse(&form.category))?,
        garment_type: parse_variant(GarmentType::parse(&form.garment_type))?,
        color: require(&form.color, "color")?,
        description: require(&form.description, "description")?,
        occasion: parse_variant(Occasion::parse(&form.occasion))?,
        user_id: user.id.clone(),
        image: image.ok_or_else(|| AppError::BadRequest("missing image".to_string()))?,
    };

    let flash = match state.wardrobe().add_item(item).await {
        Ok(()) => Some(ADDED_MSG.to_string()),
        Err(e) => {
            // Logged only; the page carries no failure feedback for this.
            tracing::error!(error = %e, "Failed to add wardrobe item");
            None
        }
    };

    outfits::render_page(&session, &user, form, flash).await
}

/// Drain the multipart stream into form values and the image part.
async fn read_form(mut multipart: Multipart) -> Result<(ItemForm, Option<ImageUpload>)> {
    let mut form = ItemForm::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    file_name,
                    content_type,
                });
            }
            "name" => form.name = text(field).await?,
            "category" => form.category = text(field).await?,
            "type" => form.garment_type = text(field).await?,
            "color" => form.color = text(field).await?,
            "description" => form.description = text(field).await?,
            "occasion" => form.occasion = text(field).await?,
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    Ok((form, image))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn require(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("missing {field}")));
    }
    Ok(trimmed.to_string())
}

fn parse_variant<T>(parsed: std::result::Result<T, dresser_core::UnknownVariant>) -> Result<T> {
    parsed.map_err(|e| AppError::BadRequest(e.to_string()))
}
