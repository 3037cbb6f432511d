//! Garment vocabulary shared with the wardrobe backend.
//!
//! The backend stores these as plain strings, so the serde spellings here
//! must match the wire values exactly (note the irregular "T-shirt").

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a garment enum from an unknown string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Which vocabulary was being parsed (e.g. "category").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Wardrobe slot a garment occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Top,
    Bottom,
    Shoe,
}

impl Category {
    /// All categories, in form-display order.
    pub const ALL: [Self; 3] = [Self::Top, Self::Bottom, Self::Shoe];

    /// The wire spelling of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Shoe => "Shoe",
        }
    }

    /// Parse a category from its wire spelling.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVariant`] for any other input.
    pub fn parse(s: &str) -> Result<Self, UnknownVariant> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specific kind of garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GarmentType {
    #[serde(rename = "T-shirt")]
    TShirt,
    Shirt,
    Pants,
    Jeans,
    Shoes,
}

impl GarmentType {
    /// All garment types, in form-display order.
    pub const ALL: [Self; 5] = [
        Self::TShirt,
        Self::Shirt,
        Self::Pants,
        Self::Jeans,
        Self::Shoes,
    ];

    /// The wire spelling of this garment type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TShirt => "T-shirt",
            Self::Shirt => "Shirt",
            Self::Pants => "Pants",
            Self::Jeans => "Jeans",
            Self::Shoes => "Shoes",
        }
    }

    /// Parse a garment type from its wire spelling.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVariant`] for any other input.
    pub fn parse(s: &str) -> Result<Self, UnknownVariant> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "garment type",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for GarmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occasion a garment is suited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occasion {
    Casual,
    Formal,
    Party,
}

impl Occasion {
    /// All occasions, in form-display order.
    pub const ALL: [Self; 3] = [Self::Casual, Self::Formal, Self::Party];

    /// The wire spelling of this occasion.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Casual => "Casual",
            Self::Formal => "Formal",
            Self::Party => "Party",
        }
    }

    /// Parse an occasion from its wire spelling.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownVariant`] for any other input.
    pub fn parse(s: &str) -> Result<Self, UnknownVariant> {
        Self::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "occasion",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for Occasion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(Category::parse(cat.as_str()).unwrap(), cat);
        }
        assert!(Category::parse("Hat").is_err());
    }

    #[test]
    fn test_garment_type_wire_spelling() {
        // The backend uses the irregular "T-shirt" spelling.
        assert_eq!(GarmentType::TShirt.as_str(), "T-shirt");
        assert_eq!(GarmentType::parse("T-shirt").unwrap(), GarmentType::TShirt);
        assert!(GarmentType::parse("Tshirt").is_err());
    }

    #[test]
    fn test_garment_type_serde_matches_as_str() {
        for ty in GarmentType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
        }
    }

    #[test]
    fn test_occasion_parse() {
        assert_eq!(Occasion::parse("Party").unwrap(), Occasion::Party);
        assert!(Occasion::parse("party").is_err());
    }

    #[test]
    fn test_unknown_variant_display() {
        let err = Category::parse("Scarf").unwrap_err();
        assert_eq!(err.to_string(), "unknown category: Scarf");
    }
}
