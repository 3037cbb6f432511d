//! Outfits page handlers.
//!
//! The page is the app's single view. GET renders one of four states:
//! a sign-in prompt, a "getting things ready" placeholder while the backend
//! user is still unresolved, an error page when a fetch failed, or the full
//! wardrobe view. The mutating actions are plain form posts that redirect
//! back to the page (POST-redirect-GET), so a browser refresh never replays
//! them.
//!
//! Generation runs once per resolved user: the first GET after resolution
//! triggers it, and later GETs reuse the session-held collection until the
//! visitor explicitly regenerates.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use dresser_core::{Category, GarmentType, Occasion};

use crate::error::Result;
use crate::filters;
use crate::middleware::{OptionalIdentity, RequireUser};
use crate::models::{CurrentUser, PageState, WardrobeView, session_keys, view};
use crate::services::auth;
use crate::state::AppState;
use crate::wardrobe::{Outfit, OutfitItem};

// =============================================================================
// View models
// =============================================================================

/// One outfit slot prepared for display.
#[derive(Debug, Clone)]
pub struct ItemCard {
    pub name: String,
    pub image_url: Option<String>,
    pub color: Option<String>,
}

impl From<&OutfitItem> for ItemCard {
    fn from(item: &OutfitItem) -> Self {
        Self {
            name: item.name.clone().unwrap_or_else(|| "Unnamed item".to_string()),
            image_url: item.image_url.clone(),
            color: item.color.clone(),
        }
    }
}

/// An outfit prepared for display.
#[derive(Debug, Clone, Default)]
pub struct OutfitCard {
    pub top: Option<ItemCard>,
    pub bottom: Option<ItemCard>,
    pub shoes: Option<ItemCard>,
}

impl From<&Outfit> for OutfitCard {
    fn from(outfit: &Outfit) -> Self {
        Self {
            top: outfit.top.as_ref().map(ItemCard::from),
            bottom: outfit.bottom.as_ref().map(ItemCard::from),
            shoes: outfit.shoes.as_ref().map(ItemCard::from),
        }
    }
}

/// Add-item form values, echoed back into the form on re-render.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub name: String,
    pub category: String,
    pub garment_type: String,
    pub color: String,
    pub description: String,
    pub occasion: String,
}

// =============================================================================
// Templates
// =============================================================================

#[derive(Template, WebTemplate)]
#[template(path = "outfits/show.html")]
pub struct OutfitsTemplate {
    pub user_name: String,
    pub outfits: Vec<OutfitCard>,
    pub featured: Option<OutfitCard>,
    pub selected: Option<OutfitCard>,
    pub form: ItemForm,
    pub flash: Option<String>,
    pub categories: &'static [Category],
    pub garment_types: &'static [GarmentType],
    pub occasions: &'static [Occasion],
}

#[derive(Template, WebTemplate)]
#[template(path = "outfits/error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "outfits/resolving.html")]
pub struct ResolvingTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "outfits/signed_out.html")]
pub struct SignedOutTemplate;

// =============================================================================
// Handlers
// =============================================================================

/// GET handler for the outfits page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalIdentity(identity): OptionalIdentity,
) -> Result<Response> {
    let Some(identity) = identity else {
        return Ok(SignedOutTemplate.into_response());
    };

    let user: Option<CurrentUser> = session.get(session_keys::CURRENT_USER).await?;
    let user = match user {
        Some(user) => user,
        // Resolution failed at the callback (or hasn't happened); retry here.
        None => match auth::resolve_into_session(state.wardrobe(), &session, &identity).await? {
            Some(user) => user,
            None => return Ok(ResolvingTemplate.into_response()),
        },
    };

    // First view after resolution: generate the initial collection.
    let current = WardrobeView::load(&session).await?;
    if current.outfits.is_none() && current.error.is_none() {
        generate_and_commit(&state, &session, &user).await?;
    }

    render_page(&session, &user, ItemForm::default(), None).await
}

/// POST handler that regenerates the outfit collection.
#[instrument(skip_all)]
pub async fn generate(
    State(state): State<AppState>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Redirect> {
    generate_and_commit(&state, &session, &user).await?;
    Ok(Redirect::to("/outfits"))
}

/// POST handler that fetches a random outfit into the featured slot.
#[instrument(skip_all)]
pub async fn random(
    State(state): State<AppState>,
    session: Session,
    RequireUser(user): RequireUser,
) -> Result<Redirect> {
    let token = view::begin_fetch(&session).await?;
    let result = state.wardrobe().random_outfit(&user.id).await;

    if !view::is_current_fetch(&session, token).await? {
        tracing::debug!("Discarding stale random-outfit response");
        return Ok(Redirect::to("/outfits"));
    }

    let mut wardrobe_view = WardrobeView::load(&session).await?;
    match result {
        Ok(outfit) => {
            wardrobe_view.featured = outfit;
            wardrobe_view.error = None;
        }
        Err(e) => {
            tracing::error!(error = %e, "Random outfit fetch failed");
            wardrobe_view.error = Some(e.to_string());
        }
    }
    wardrobe_view.store(&session).await?;

    Ok(Redirect::to("/outfits"))
}

/// Which outfit a select post refers to.
#[derive(Debug, Deserialize)]
pub struct SelectForm {
    /// `"featured"` or `"generated"`.
    pub source: String,
    /// Index into the generated collection, for `source = "generated"`.
    #[serde(default)]
    pub index: Option<usize>,
}

/// POST handler that marks an outfit as selected.
///
/// The selection is optimistic: the session is updated before the backend is
/// told, and a backend failure is logged without undoing the selection.
#[instrument(skip_all)]
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    RequireUser(_user): RequireUser,
    Form(form): Form<SelectForm>,
) -> Result<Redirect> {
    let mut wardrobe_view = WardrobeView::load(&session).await?;

    let outfit = match form.source.as_str() {
        "featured" => wardrobe_view.featured.clone(),
        "generated" => form.index.and_then(|i| {
            wardrobe_view
                .outfits
                .as_ref()
                .and_then(|outfits| outfits.get(i).cloned())
        }),
        other => {
            tracing::warn!(source = other, "Unknown select source");
            None
        }
    };
    let Some(outfit) = outfit else {
        return Ok(Redirect::to("/outfits"));
    };

    wardrobe_view.selected = Some(outfit.clone());
    wardrobe_view.store(&session).await?;

    // The featured card posts no constituent ids; generated cards post the
    // slots they have.
    let notify = if form.source == "featured" {
        Outfit::default()
    } else {
        outfit
    };
    let wardrobe = state.wardrobe().clone();
    tokio::spawn(async move {
        if let Err(e) = wardrobe.update_selected(&notify).await {
            tracing::error!(error = %e, "Failed to report selected items");
        }
    });

    Ok(Redirect::to("/outfits"))
}

// =============================================================================
// Shared rendering
// =============================================================================

/// Fetch a fresh collection and commit it to the view.
///
/// The commit honors the fetch sequence: when a later fetch started while
/// this one was in flight, the response is dropped. A fetch failure replaces
/// the view with an error page on the next GET, after which the view resets
/// so a reload behaves like a fresh visit.
async fn generate_and_commit(
    state: &AppState,
    session: &Session,
    user: &CurrentUser,
) -> Result<()> {
    let token = view::begin_fetch(session).await?;
    let result = state.wardrobe().generate_outfits(&user.id).await;

    if !view::is_current_fetch(session, token).await? {
        tracing::debug!("Discarding stale generation response");
        return Ok(());
    }

    let mut wardrobe_view = WardrobeView::load(session).await?;
    match result {
        Ok(outfits) => {
            tracing::debug!(count = outfits.len(), "Committing generated outfits");
            wardrobe_view.outfits = Some(outfits);
            wardrobe_view.error = None;
        }
        Err(e) => {
            tracing::error!(error = %e, "Outfit generation failed");
            wardrobe_view.error = Some(e.to_string());
        }
    }
    wardrobe_view.store(session).await?;
    Ok(())
}

/// Render the outfits page from the session-held view.
///
/// Used by the GET handler and by the add-item post, which re-renders the
/// page directly with the submitted form values and an optional flash.
pub(crate) async fn render_page(
    session: &Session,
    user: &CurrentUser,
    form: ItemForm,
    flash: Option<String>,
) -> Result<Response> {
    let wardrobe_view = WardrobeView::load(session).await?;

    match PageState::derive(true, true, wardrobe_view) {
        PageState::Error(message) => {
            // One-shot: clear the recorded error so the next view starts over,
            // the way a page reload resets a client-side app.
            let reset = WardrobeView::default();
            reset.store(session).await?;
            Ok(ErrorTemplate { message }.into_response())
        }
        PageState::Ready(ready) => Ok(OutfitsTemplate {
            user_name: user.display_name().to_string(),
            outfits: ready
                .outfits
                .unwrap_or_default()
                .iter()
                .map(OutfitCard::from)
                .collect(),
            featured: ready.featured.as_ref().map(OutfitCard::from),
            selected: ready.selected.as_ref().map(OutfitCard::from),
            form,
            flash,
            categories: &Category::ALL,
            garment_types: &GarmentType::ALL,
            occasions: &Occasion::ALL,
        }
        .into_response()),
        // Unreachable given the derive arguments; fall back to the page.
        PageState::SignedOut | PageState::Resolving => {
            Ok(Redirect::to("/outfits").into_response())
        }
    }
}
