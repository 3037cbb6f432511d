//! Wire types for the wardrobe backend API.
//!
//! Field names follow the backend's camelCase JSON. Outfit payloads are
//! tolerant of missing fields - the generator may omit a slot entirely, and
//! item records vary between wardrobes.

use serde::{Deserialize, Serialize};

use dresser_core::{Category, Email, GarmentType, Occasion, UserId, WardrobeItemId};

/// Sentinel message the backend returns when sign-in matches an account.
pub(crate) const VERIFIED_MSG: &str = "User verified successfully";

/// One wardrobe item as referenced inside an outfit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutfitItem {
    /// Backend id of the item, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WardrobeItemId>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Image URL for the item, when one was uploaded.
    #[serde(
        default,
        rename = "imageUrl",
        alias = "image",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
    /// Item color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A generated outfit: top, bottom, and shoes slots.
///
/// The shape is produced by the backend generator and never mutated
/// client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outfit {
    /// Top slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<OutfitItem>,
    /// Bottom slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<OutfitItem>,
    /// Shoes slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoes: Option<OutfitItem>,
}

impl Outfit {
    /// Item ids of the outfit's slots, as sent to `updateSelected`.
    #[must_use]
    pub fn item_ids(
        &self,
    ) -> (
        Option<&WardrobeItemId>,
        Option<&WardrobeItemId>,
        Option<&WardrobeItemId>,
    ) {
        fn id_of(slot: &Option<OutfitItem>) -> Option<&WardrobeItemId> {
            slot.as_ref().and_then(|i| i.id.as_ref())
        }
        (id_of(&self.top), id_of(&self.bottom), id_of(&self.shoes))
    }
}

/// The bytes of an uploaded image, read before network submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Original file name, as submitted.
    pub file_name: String,
    /// Content type reported by the browser, if any.
    pub content_type: Option<String>,
}

/// A new wardrobe item, built from validated form input.
///
/// Submitted atomically as a single multipart request and then discarded.
#[derive(Debug, Clone)]
pub struct NewItem {
    /// Display name.
    pub name: String,
    /// Wardrobe slot.
    pub category: Category,
    /// Garment type.
    pub garment_type: GarmentType,
    /// Item color.
    pub color: String,
    /// Free-form description.
    pub description: String,
    /// Occasion the item suits.
    pub occasion: Occasion,
    /// Owner of the item.
    pub user_id: UserId,
    /// Image to attach.
    pub image: ImageUpload,
}

// =============================================================================
// Request / Response bodies
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub email: &'a Email,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignInResponse {
    pub msg: String,
    #[serde(default)]
    pub id: Option<UserId>,
}

impl SignInResponse {
    /// The user id, but only when the backend verified the account.
    ///
    /// Any other message means "no such user" and triggers sign-up.
    pub fn verified_id(self) -> Option<UserId> {
        if self.msg == VERIFIED_MSG { self.id } else { None }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SignUpRequest<'a> {
    pub email: &'a Email,
    pub name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignUpResponse {
    pub id: UserId,
}

#[derive(Debug, Serialize)]
pub(crate) struct OutfitsRequest<'a> {
    #[serde(rename = "userId")]
    pub user_id: &'a UserId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateOutfitsResponse {
    #[serde(default)]
    pub outfits: Vec<Outfit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RandomOutfitResponse {
    #[serde(default)]
    pub outfit: Option<Outfit>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateSelectedRequest<'a> {
    pub top: Option<&'a WardrobeItemId>,
    pub bottom: Option<&'a WardrobeItemId>,
    pub shoes: Option<&'a WardrobeItemId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_verified() {
        let resp: SignInResponse = serde_json::from_str(
            r#"{"msg": "User verified successfully", "id": "u-123"}"#,
        )
        .unwrap();
        assert_eq!(resp.verified_id(), Some(UserId::new("u-123")));
    }

    #[test]
    fn test_sign_in_unknown_user() {
        // Some backends echo an id even when unverified; it must be ignored.
        let resp: SignInResponse =
            serde_json::from_str(r#"{"msg": "User not found", "id": "u-123"}"#).unwrap();
        assert_eq!(resp.verified_id(), None);
    }

    #[test]
    fn test_sign_in_missing_id() {
        let resp: SignInResponse = serde_json::from_str(r#"{"msg": "User not found"}"#).unwrap();
        assert_eq!(resp.verified_id(), None);
    }

    #[test]
    fn test_outfit_tolerates_missing_slots() {
        let outfit: Outfit = serde_json::from_str(
            r#"{"top": {"id": "t1", "name": "Blue tee", "imageUrl": "http://img/t1.png"}}"#,
        )
        .unwrap();
        assert_eq!(outfit.top.as_ref().unwrap().name.as_deref(), Some("Blue tee"));
        assert!(outfit.bottom.is_none());
        assert!(outfit.shoes.is_none());
    }

    #[test]
    fn test_outfit_item_image_alias() {
        let item: OutfitItem = serde_json::from_str(r#"{"image": "http://img/x.png"}"#).unwrap();
        assert_eq!(item.image_url.as_deref(), Some("http://img/x.png"));
    }

    #[test]
    fn test_outfit_item_ids() {
        let outfit: Outfit = serde_json::from_str(
            r#"{"top": {"id": "t1"}, "bottom": {"name": "no id"}, "shoes": {"id": "s1"}}"#,
        )
        .unwrap();
        let (top, bottom, shoes) = outfit.item_ids();
        assert_eq!(top, Some(&WardrobeItemId::new("t1")));
        assert_eq!(bottom, None);
        assert_eq!(shoes, Some(&WardrobeItemId::new("s1")));
    }

    #[test]
    fn test_outfits_request_wire_name() {
        let user_id = UserId::new("u1");
        let body = serde_json::to_string(&OutfitsRequest { user_id: &user_id }).unwrap();
        assert_eq!(body, r#"{"userId":"u1"}"#);
    }

    #[test]
    fn test_generate_response_defaults_to_empty() {
        let resp: GenerateOutfitsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.outfits.is_empty());
    }

    #[test]
    fn test_random_response_defaults_to_none() {
        let resp: RandomOutfitResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.outfit.is_none());
    }

    #[test]
    fn test_update_selected_serializes_nulls() {
        let top = WardrobeItemId::new("t1");
        let body = serde_json::to_string(&UpdateSelectedRequest {
            top: Some(&top),
            bottom: None,
            shoes: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"top":"t1","bottom":null,"shoes":null}"#);
    }

    #[test]
    fn test_outfit_session_roundtrip() {
        // Outfits are stored in the session, so serialize -> deserialize must
        // preserve the shape exactly.
        let outfit: Outfit = serde_json::from_str(
            r#"{"top": {"id": "t1", "imageUrl": "u"}, "shoes": {"id": "s1", "color": "black"}}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&outfit).unwrap();
        let back: Outfit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outfit);
    }
}
