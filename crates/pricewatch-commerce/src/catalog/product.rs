//! Product and listing types.

use crate::ids::{BookmarkId, MemberId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closed category enumeration for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Food,
    Beauty,
    Health,
    Household,
    Digital,
    Fashion,
    Sports,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Beauty => "beauty",
            Category::Health => "health",
            Category::Household => "household",
            Category::Digital => "digital",
            Category::Fashion => "fashion",
            Category::Sports => "sports",
        }
    }

    /// Parse a category from its query-parameter form. Matching is exact
    /// modulo ASCII case; unknown strings are rejected, not defaulted.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "food" => Some(Category::Food),
            "beauty" => Some(Category::Beauty),
            "health" => Some(Category::Health),
            "household" => Some(Category::Household),
            "digital" => Some(Category::Digital),
            "fashion" => Some(Category::Fashion),
            "sports" => Some(Category::Sports),
            _ => None,
        }
    }
}

/// A product in the catalog.
///
/// Owned by the catalog and immutable once created; administrative
/// correction happens outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier. Cursor pagination orders by this.
    pub id: ProductId,
    /// Product name. Keyword search matches against this.
    pub name: String,
    /// Category this product belongs to.
    pub category: Category,
    /// When the product entered the catalog.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a product with an explicit identifier.
    pub fn new(id: ProductId, name: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match against the product name.
    pub fn name_contains(&self, keyword: &str) -> bool {
        self.name.to_lowercase().contains(&keyword.to_lowercase())
    }
}

/// A product enriched for listing: its lowest current offer plus the
/// vendor carrying it and an optional image reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductListing {
    /// The product.
    pub product: Product,
    /// Lowest current price across vendors.
    pub lowest_price: Money,
    /// Name of the vendor offering the lowest price.
    pub vendor_name: String,
    /// External URL of that vendor's offer.
    pub vendor_url: String,
    /// Promotion label on the winning offer, if any.
    pub promotion: Option<String>,
    /// Image reference from object storage, if the lookup succeeded.
    pub image_url: Option<String>,
}

/// A member's saved product. Sibling read path; no write API in this core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub member_id: MemberId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("digital"), Some(Category::Digital));
        assert_eq!(Category::parse("DIGITAL"), Some(Category::Digital));
        assert_eq!(Category::parse("gadgets"), None);
    }

    #[test]
    fn test_category_round_trip() {
        for c in [
            Category::Food,
            Category::Beauty,
            Category::Health,
            Category::Household,
            Category::Digital,
            Category::Fashion,
            Category::Sports,
        ] {
            assert_eq!(Category::parse(c.as_str()), Some(c));
        }
    }

    #[test]
    fn test_name_contains_case_insensitive() {
        let p = Product::new(ProductId::new(101), "iPhone", Category::Digital);
        assert!(p.name_contains("phone"));
        assert!(p.name_contains("PHONE"));
        assert!(!p.name_contains("tablet"));
    }
}
