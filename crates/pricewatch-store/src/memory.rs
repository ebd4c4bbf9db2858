//! In-memory catalog store.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pricewatch_commerce::catalog::{Bookmark, Category, PriceRecord, Product, Vendor};
use pricewatch_commerce::ids::{MemberId, ProductId, VendorId};
use pricewatch_commerce::pricing;
use rand::seq::SliceRandom;

use crate::error::StoreError;
use crate::store::{CatalogStore, ViewEvent};

#[derive(Default)]
struct Inner {
    // BTreeMap keeps products in ascending-id order for cursor scans.
    products: BTreeMap<ProductId, Product>,
    vendors: HashMap<VendorId, Vendor>,
    prices: HashMap<ProductId, Vec<PriceRecord>>,
    views: Vec<ViewEvent>,
    view_counts: HashMap<ProductId, u64>,
    bookmarks: Vec<Bookmark>,
}

/// In-memory [`CatalogStore`] backed by a `RwLock`.
///
/// Suitable for tests and demos; a deployment would back the trait with
/// a database instead.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a product.
    pub fn add_product(&self, product: Product) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.products.insert(product.id, product);
    }

    /// Seed a vendor.
    pub fn add_vendor(&self, vendor: Vendor) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.vendors.insert(vendor.id, vendor);
    }

    /// Seed a price row. History accumulates; nothing is replaced.
    pub fn add_price(&self, row: PriceRecord) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.prices.entry(row.product_id).or_default().push(row);
    }

    /// Seed a bookmark.
    pub fn add_bookmark(&self, bookmark: Bookmark) {
        let mut inner = self.inner.write().expect("store lock poisoned");
        inner.bookmarks.push(bookmark);
    }

    fn page<F>(&self, last_seen_id: Option<ProductId>, size: usize, mut keep: F) -> Vec<Product>
    where
        F: FnMut(&Product) -> bool,
    {
        let inner = self.inner.read().expect("store lock poisoned");
        inner
            .products
            .values()
            .filter(|p| match last_seen_id {
                Some(cursor) => p.id > cursor,
                None => true,
            })
            .filter(|p| keep(p))
            .take(size)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn search_by_keyword(
        &self,
        keyword: &str,
        last_seen_id: Option<ProductId>,
        size: usize,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(self.page(last_seen_id, size, |p| p.name_contains(keyword)))
    }

    async fn find_by_category(
        &self,
        category: Category,
        last_seen_id: Option<ProductId>,
        size: usize,
    ) -> Result<Vec<Product>, StoreError> {
        Ok(self.page(last_seen_id, size, |p| p.category == category))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.products.values().find(|p| p.name == name).cloned())
    }

    async fn find_random(&self, count: usize) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        let all: Vec<&Product> = inner.products.values().collect();
        let picked = all
            .choose_multiple(&mut rand::thread_rng(), count)
            .map(|p| (*p).clone())
            .collect();
        Ok(picked)
    }

    async fn find_lowest_priced(&self, count: usize) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut priced: Vec<(u64, &Product)> = inner
            .products
            .values()
            .filter_map(|p| {
                let rows = inner.prices.get(&p.id)?;
                let best = pricing::lowest_price(rows)?;
                Some((best.amount.amount_minor, p))
            })
            .collect();
        priced.sort_by_key(|(amount, p)| (*amount, p.id));
        Ok(priced
            .into_iter()
            .take(count)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn price_history(&self, product_id: ProductId) -> Result<Vec<PriceRecord>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.prices.get(&product_id).cloned().unwrap_or_default())
    }

    async fn vendor(&self, id: VendorId) -> Result<Option<Vendor>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.vendors.get(&id).cloned())
    }

    async fn record_view(
        &self,
        product_id: ProductId,
        at: DateTime<Utc>,
    ) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().expect("store lock poisoned");
        if !inner.products.contains_key(&product_id) {
            return Err(StoreError::NotFound(format!("product {product_id}")));
        }
        inner.views.push(ViewEvent { product_id, at });
        let count = inner.view_counts.entry(product_id).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn views_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<(ProductId, u64)>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        let mut counts: BTreeMap<ProductId, u64> = BTreeMap::new();
        for event in inner.views.iter().filter(|e| e.at >= since) {
            *counts.entry(event.product_id).or_insert(0) += 1;
        }
        Ok(counts.into_iter().collect())
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner.products.get(&id).cloned())
    }

    async fn bookmarks_for_member(
        &self,
        member: MemberId,
    ) -> Result<Vec<Bookmark>, StoreError> {
        let inner = self.inner.read().expect("store lock poisoned");
        Ok(inner
            .bookmarks
            .iter()
            .filter(|b| b.member_id == member)
            .cloned()
            .collect())
    }
}
