//! The search facade: boundary operations of the comparison core.
//!
//! Every operation normalizes failures the same way the error taxonomy
//! prescribes: an error already carrying a boundary kind passes through
//! unchanged, anything else is re-classified to the operation's fallback
//! kind and logged. Searches additionally run under a hard wall-clock
//! deadline and a bounded concurrency limit; a timed-out search future
//! is dropped, which cancels the in-flight store call at its next await
//! instead of leaving unobserved work running.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use pricewatch_commerce::catalog::{Category, ProductListing, VendorPrice};
use pricewatch_commerce::ids::ProductId;
use pricewatch_commerce::pricing;
use pricewatch_commerce::CompareError;
use pricewatch_store::CatalogStore;
use tokio::sync::Semaphore;
use tokio::time::timeout;

use crate::config::SearchConfig;
use crate::images::ImageLookup;
use crate::paginate::{self, ProductFilter};
use crate::popular;
use crate::views::{ViewCounter, ViewReceipt, ViewTokenIssuer};

/// Trailing window for the popular-products ranking.
const POPULAR_WINDOW_HOURS: i64 = 1;

/// The comparison core's boundary surface.
pub struct SearchService {
    store: Arc<dyn CatalogStore>,
    images: Arc<dyn ImageLookup>,
    views: ViewCounter,
    limiter: Arc<Semaphore>,
    config: SearchConfig,
}

impl SearchService {
    /// Build a service over a store and image collaborator.
    pub fn new(
        store: Arc<dyn CatalogStore>,
        images: Arc<dyn ImageLookup>,
        config: SearchConfig,
    ) -> Self {
        let issuer = ViewTokenIssuer::new(config.token_key.clone(), config.view_token_ttl);
        Self {
            views: ViewCounter::new(store.clone(), issuer),
            limiter: Arc::new(Semaphore::new(config.max_concurrent_searches)),
            store,
            images,
            config,
        }
    }

    /// Keyword search with cursor pagination, under the hard deadline.
    ///
    /// Failures: [`CompareError::Timeout`] when the deadline passes,
    /// [`CompareError::NoResults`] for an empty first page or any
    /// unclassified failure on this path.
    pub async fn search(
        &self,
        keyword: &str,
        last_seen_id: Option<ProductId>,
        size: Option<usize>,
    ) -> Result<Vec<ProductListing>, CompareError> {
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|e| CompareError::Store(e.to_string()))?;

        let size = size.unwrap_or(self.config.default_page_size);
        let filter = ProductFilter::Keyword(keyword.to_string());
        let work = async {
            let mut listings =
                paginate::page(self.store.as_ref(), &filter, last_seen_id, size).await?;
            self.attach_images(&mut listings).await;
            Ok::<_, CompareError>(listings)
        };

        match timeout(self.config.search_timeout, work).await {
            Ok(Ok(listings)) => {
                tracing::info!(keyword, returned = listings.len(), outcome = "completed", "search");
                Ok(listings)
            }
            Ok(Err(e)) => {
                tracing::error!(keyword, outcome = "failed", error = %e, "search");
                Err(classify(e, CompareError::NoResults))
            }
            Err(_) => {
                let waited_ms = self.config.search_timeout.as_millis() as u64;
                tracing::error!(keyword, outcome = "timed_out", waited_ms, "search");
                Err(CompareError::Timeout { waited_ms })
            }
        }
    }

    /// Category listing with cursor pagination.
    pub async fn by_category(
        &self,
        category: Category,
        last_seen_id: Option<ProductId>,
        size: Option<usize>,
    ) -> Result<Vec<ProductListing>, CompareError> {
        let size = size.unwrap_or(self.config.default_page_size);
        let filter = ProductFilter::Category(category);
        let result = async {
            let mut listings =
                paginate::page(self.store.as_ref(), &filter, last_seen_id, size).await?;
            self.attach_images(&mut listings).await;
            Ok(listings)
        }
        .await;
        result.map_err(|e| {
            tracing::error!(category = category.as_str(), error = %e, "by_category");
            // This operation's empty-catalog failure kind is NotFound,
            // so the paginator's NoResults is remapped rather than
            // passed through.
            let e = match e {
                CompareError::NoResults(detail) => CompareError::ProductNotFound(detail),
                other => other,
            };
            classify(e, CompareError::ProductNotFound)
        })
    }

    /// The cheapest current offers across the whole catalog, one entry
    /// per product, cheapest first.
    pub async fn lowest_price_products(&self) -> Result<Vec<ProductListing>, CompareError> {
        let result = async {
            let products = self
                .store
                .find_lowest_priced(self.config.default_page_size)
                .await?;
            let mut listings = Vec::with_capacity(products.len());
            for product in products {
                if let Some(listing) =
                    paginate::listing_for(self.store.as_ref(), product).await?
                {
                    listings.push(listing);
                }
            }
            if listings.is_empty() {
                return Err(CompareError::ProductNotFound("no priced products".into()));
            }
            self.attach_images(&mut listings).await;
            Ok(listings)
        }
        .await;
        result.map_err(|e| {
            tracing::error!(error = %e, "lowest_price_products");
            classify(e, CompareError::ProductNotFound)
        })
    }

    /// The single-product path: lowest current price for the named
    /// product, counting the view through the client's cookie token.
    pub async fn lowest_price_by_name(
        &self,
        product_name: &str,
        incoming_token: Option<&str>,
    ) -> Result<(ProductListing, ViewReceipt), CompareError> {
        let result = async {
            let product = self
                .store
                .find_by_name(product_name)
                .await?
                .ok_or_else(|| CompareError::ProductNotFound(product_name.to_string()))?;
            let product_id = product.id;

            let mut listing = paginate::listing_for(self.store.as_ref(), product)
                .await?
                .ok_or_else(|| {
                    CompareError::ProductNotFound(format!("{product_name} has no current price"))
                })?;
            listing.image_url = self.images.image_url(product_name).await;

            let receipt = self
                .views
                .record_view(product_id, incoming_token, Utc::now())
                .await?;
            Ok((listing, receipt))
        }
        .await;
        result.map_err(|e| {
            tracing::error!(product_name, error = %e, "lowest_price_by_name");
            classify(e, CompareError::ProductNotFound)
        })
    }

    /// Every vendor's current offer for the named product.
    pub async fn vendors_for_product(
        &self,
        product_name: &str,
    ) -> Result<Vec<VendorPrice>, CompareError> {
        let result = async {
            let product = self
                .store
                .find_by_name(product_name)
                .await?
                .ok_or_else(|| CompareError::ProductNotFound(product_name.to_string()))?;

            let rows = self.store.price_history(product.id).await?;
            let mut offers = Vec::new();
            for row in pricing::current_offers(&rows) {
                if let Some(vendor) = self.store.vendor(row.vendor_id).await? {
                    offers.push(VendorPrice {
                        vendor,
                        amount: row.amount,
                        promotion: row.promotion.clone(),
                    });
                }
            }
            if offers.is_empty() {
                return Err(CompareError::VendorUrlNotFound(product_name.to_string()));
            }
            Ok(offers)
        }
        .await;
        result.map_err(|e| {
            tracing::error!(product_name, error = %e, "vendors_for_product");
            classify(e, CompareError::VendorUrlNotFound)
        })
    }

    /// A page-sized random selection, for recommendation slots.
    pub async fn random_products(&self) -> Result<Vec<ProductListing>, CompareError> {
        let result = async {
            let products = self.store.find_random(self.config.default_page_size).await?;
            let mut listings = Vec::with_capacity(products.len());
            for product in products {
                if let Some(listing) =
                    paginate::listing_for(self.store.as_ref(), product).await?
                {
                    listings.push(listing);
                }
            }
            if listings.is_empty() {
                return Err(CompareError::ProductNotFound("empty catalog".into()));
            }
            self.attach_images(&mut listings).await;
            Ok(listings)
        }
        .await;
        result.map_err(|e| {
            tracing::error!(error = %e, "random_products");
            classify(e, CompareError::ProductNotFound)
        })
    }

    /// Products ranked by views over the trailing hour.
    pub async fn popular_products(&self) -> Result<Vec<ProductListing>, CompareError> {
        let since = Utc::now() - ChronoDuration::hours(POPULAR_WINDOW_HOURS);
        let result = async {
            let ranked = popular::popular(self.store.as_ref(), since).await?;
            let mut listings = Vec::with_capacity(ranked.len());
            for (product, _count) in ranked {
                if let Some(listing) =
                    paginate::listing_for(self.store.as_ref(), product).await?
                {
                    listings.push(listing);
                }
            }
            if listings.is_empty() {
                return Err(CompareError::ProductNotFound("no recent views".into()));
            }
            self.attach_images(&mut listings).await;
            Ok(listings)
        }
        .await;
        result.map_err(|e| {
            tracing::error!(error = %e, "popular_products");
            classify(e, CompareError::ProductNotFound)
        })
    }

    async fn attach_images(&self, listings: &mut [ProductListing]) {
        let urls = futures::future::join_all(
            listings
                .iter()
                .map(|l| self.images.image_url(&l.product.name)),
        )
        .await;
        for (listing, url) in listings.iter_mut().zip(urls) {
            listing.image_url = url;
        }
    }
}

/// Pass classified errors through; re-classify everything else.
fn classify(e: CompareError, fallback: fn(String) -> CompareError) -> CompareError {
    if e.is_classified() {
        e
    } else {
        fallback(e.to_string())
    }
}
