//! Price history rows.

use crate::catalog::Vendor;
use crate::ids::{PriceId, ProductId, VendorId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A price fact tying one product to one vendor at a point in time.
///
/// Rows are written by an external ingestion process and never deleted,
/// so history accumulates. For a given (product, vendor) pair the row
/// with the greatest `updated_at` (ties broken by highest `id`) is the
/// authoritative current offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRecord {
    /// Unique row identifier, monotonically assigned on insert.
    pub id: PriceId,
    /// Product this offer is for.
    pub product_id: ProductId,
    /// Vendor making the offer.
    pub vendor_id: VendorId,
    /// Offer amount.
    pub amount: Money,
    /// Promotion label, if the offer is part of one.
    pub promotion: Option<String>,
    /// When the row was first written.
    pub created_at: DateTime<Utc>,
    /// When the row was last refreshed by ingestion.
    pub updated_at: DateTime<Utc>,
}

impl PriceRecord {
    /// Create a row stamped at a single instant.
    pub fn new(
        id: PriceId,
        product_id: ProductId,
        vendor_id: VendorId,
        amount: Money,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            vendor_id,
            amount,
            promotion: None,
            created_at: at,
            updated_at: at,
        }
    }

    /// Attach a promotion label.
    pub fn with_promotion(mut self, label: impl Into<String>) -> Self {
        self.promotion = Some(label.into());
        self
    }

    /// Whether this row supersedes `other` as the current offer for the
    /// same (product, vendor) pair.
    pub fn supersedes(&self, other: &PriceRecord) -> bool {
        (self.updated_at, self.id) > (other.updated_at, other.id)
    }
}

/// One vendor's current offer for a product, as shown in vendor listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorPrice {
    /// The vendor making the offer.
    pub vendor: Vendor,
    /// Current offer amount.
    pub amount: Money,
    /// Promotion label on the offer, if any.
    pub promotion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn row(id: u64, at: DateTime<Utc>) -> PriceRecord {
        PriceRecord::new(
            PriceId::new(id),
            ProductId::new(1),
            VendorId::new(1),
            Money::won(1000),
            at,
        )
    }

    #[test]
    fn test_supersedes_by_updated_at() {
        let now = Utc::now();
        let old = row(1, now - Duration::hours(2));
        let new = row(2, now);
        assert!(new.supersedes(&old));
        assert!(!old.supersedes(&new));
    }

    #[test]
    fn test_supersedes_tie_breaks_on_id() {
        let now = Utc::now();
        let a = row(1, now);
        let b = row(2, now);
        assert!(b.supersedes(&a));
        assert!(!a.supersedes(&b));
    }
}
