//! The catalog store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pricewatch_commerce::catalog::{Bookmark, Category, PriceRecord, Product, Vendor};
use pricewatch_commerce::ids::{MemberId, ProductId, VendorId};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A recorded product view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEvent {
    /// Product that was viewed.
    pub product_id: ProductId,
    /// When the view was counted.
    pub at: DateTime<Utc>,
}

/// Read queries (plus the view-event append) the comparison core needs.
///
/// Every paged query orders by ascending product id; `last_seen_id` is an
/// exclusive lower bound and `size` caps the page. The store returns raw
/// rows; result emptiness policy and price enrichment belong to the
/// caller.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Products whose name contains `keyword`, case-insensitively.
    async fn search_by_keyword(
        &self,
        keyword: &str,
        last_seen_id: Option<ProductId>,
        size: usize,
    ) -> Result<Vec<Product>, StoreError>;

    /// Products in `category` (exact match).
    async fn find_by_category(
        &self,
        category: Category,
        last_seen_id: Option<ProductId>,
        size: usize,
    ) -> Result<Vec<Product>, StoreError>;

    /// Exact-name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, StoreError>;

    /// Up to `count` products in arbitrary order.
    async fn find_random(&self, count: usize) -> Result<Vec<Product>, StoreError>;

    /// Up to `count` products carrying the cheapest current offers in
    /// the whole catalog, ordered by that offer ascending (ties toward
    /// lower product id). Products without any price rows are excluded.
    async fn find_lowest_priced(&self, count: usize) -> Result<Vec<Product>, StoreError>;

    /// Full price history for a product, all vendors, oldest first.
    async fn price_history(&self, product_id: ProductId) -> Result<Vec<PriceRecord>, StoreError>;

    /// Vendor lookup.
    async fn vendor(&self, id: VendorId) -> Result<Option<Vendor>, StoreError>;

    /// Append a view event and bump the product's counter. Returns the
    /// new total.
    async fn record_view(
        &self,
        product_id: ProductId,
        at: DateTime<Utc>,
    ) -> Result<u64, StoreError>;

    /// Per-product view counts for events recorded at or after `since`.
    async fn views_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(ProductId, u64)>, StoreError>;

    /// Product lookup by id.
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// A member's bookmarks. Sibling read path; unused by the search
    /// façade itself.
    async fn bookmarks_for_member(&self, member: MemberId)
        -> Result<Vec<Bookmark>, StoreError>;
}
