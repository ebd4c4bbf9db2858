//! Cursor pagination over the catalog.
//!
//! Pages are keyed by "last seen id" rather than page number, so rows
//! inserted mid-scroll never shift earlier pages. Ordering is ascending
//! product id; the cursor is an exclusive lower bound.

use pricewatch_commerce::catalog::{Category, Product, ProductListing};
use pricewatch_commerce::ids::ProductId;
use pricewatch_commerce::pricing;
use pricewatch_commerce::CompareError;
use pricewatch_store::CatalogStore;

/// Filter selecting which products a page draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    /// Case-insensitive substring match on product name.
    Keyword(String),
    /// Exact category match.
    Category(Category),
}

impl ProductFilter {
    fn describe(&self) -> String {
        match self {
            ProductFilter::Keyword(k) => format!("keyword '{k}'"),
            ProductFilter::Category(c) => format!("category '{}'", c.as_str()),
        }
    }
}

/// Build the listing for one product: lowest current price plus the
/// winning vendor. `None` when the product has no price rows yet (the
/// ingestion side hasn't caught up); such products are omitted from
/// pages rather than listed without a price.
pub async fn listing_for(
    store: &dyn CatalogStore,
    product: Product,
) -> Result<Option<ProductListing>, CompareError> {
    let rows = store.price_history(product.id).await?;
    let Some(best) = pricing::lowest_price(&rows) else {
        return Ok(None);
    };
    let Some(vendor) = store.vendor(best.vendor_id).await? else {
        // Price row references a vendor the store no longer knows.
        tracing::warn!(
            product_id = product.id.value(),
            vendor_id = best.vendor_id.value(),
            "price row references unknown vendor, omitting product"
        );
        return Ok(None);
    };
    Ok(Some(ProductListing {
        product,
        lowest_price: best.amount,
        vendor_name: vendor.name,
        vendor_url: vendor.url,
        promotion: best.promotion.clone(),
        image_url: None,
    }))
}

/// Fetch one page of listings.
///
/// Returns at most `size` items in ascending-id order; a short or empty
/// page mid-scroll signals end of data. Because unpriced products are
/// omitted, the fetch refills from the store until the page is full or
/// the store itself runs dry — a short page is always a true end, never
/// an artifact of filtering. A *first* page (no cursor) with zero
/// matches is the exceptional case and fails with
/// [`CompareError::NoResults`].
pub async fn page(
    store: &dyn CatalogStore,
    filter: &ProductFilter,
    last_seen_id: Option<ProductId>,
    size: usize,
) -> Result<Vec<ProductListing>, CompareError> {
    if size == 0 {
        return Err(CompareError::Validation("page size must be positive".into()));
    }

    let mut listings = Vec::with_capacity(size);
    let mut cursor = last_seen_id;
    loop {
        let products = match filter {
            ProductFilter::Keyword(keyword) => {
                store.search_by_keyword(keyword, cursor, size).await?
            }
            ProductFilter::Category(category) => {
                store.find_by_category(*category, cursor, size).await?
            }
        };
        let raw_len = products.len();
        cursor = products.last().map(|p| p.id).or(cursor);

        for product in products {
            if let Some(listing) = listing_for(store, product).await? {
                listings.push(listing);
                if listings.len() == size {
                    break;
                }
            }
        }

        // A short raw page means the store is exhausted for this filter.
        if listings.len() == size || raw_len < size {
            break;
        }
    }

    if listings.is_empty() && last_seen_id.is_none() {
        return Err(CompareError::NoResults(filter.describe()));
    }
    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pricewatch_commerce::ids::{PriceId, VendorId};
    use pricewatch_commerce::money::Money;
    use pricewatch_commerce::catalog::{PriceRecord, Vendor};
    use pricewatch_store::MemoryStore;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        let now = Utc::now();
        store.add_vendor(Vendor::new(VendorId::new(1), "DealMart", "https://dealmart.example"));
        store.add_vendor(Vendor::new(VendorId::new(2), "ShopZone", "https://shopzone.example"));

        store.add_product(Product::new(ProductId::new(101), "iPhone", Category::Digital));
        store.add_product(Product::new(ProductId::new(102), "Phone X", Category::Digital));
        store.add_product(Product::new(
            ProductId::new(103),
            "Smartphone",
            Category::Digital,
        ));

        let mut price_id = 0;
        for pid in [101u64, 102, 103] {
            for (vendor, amount) in [(1u64, 900 + pid), (2, 800 + pid)] {
                price_id += 1;
                store.add_price(PriceRecord::new(
                    PriceId::new(price_id),
                    ProductId::new(pid),
                    VendorId::new(vendor),
                    Money::won(amount),
                    now - Duration::minutes(price_id as i64),
                ));
            }
        }
        store
    }

    #[tokio::test]
    async fn test_first_page_ascending_ids() {
        let store = seeded();
        let filter = ProductFilter::Keyword("phone".into());
        let page = page(&store, &filter, None, 2).await.unwrap();
        let ids: Vec<u64> = page.iter().map(|l| l.product.id.value()).collect();
        assert_eq!(ids, vec![101, 102]);
    }

    #[tokio::test]
    async fn test_page_is_idempotent() {
        let store = seeded();
        let filter = ProductFilter::Keyword("phone".into());
        let first = page(&store, &filter, Some(ProductId::new(101)), 10)
            .await
            .unwrap();
        let second = page(&store, &filter, Some(ProductId::new(101)), 10)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_listings_carry_lowest_price() {
        let store = seeded();
        let filter = ProductFilter::Keyword("iphone".into());
        let page = page(&store, &filter, None, 10).await.unwrap();
        assert_eq!(page.len(), 1);
        // Vendor 2 undercuts vendor 1 for every seeded product.
        assert_eq!(page[0].lowest_price, Money::won(800 + 101));
        assert_eq!(page[0].vendor_name, "ShopZone");
    }

    #[tokio::test]
    async fn test_first_page_with_no_matches_is_no_results() {
        let store = seeded();
        let filter = ProductFilter::Keyword("tablet".into());
        let err = page(&store, &filter, None, 10).await.unwrap_err();
        assert!(matches!(err, CompareError::NoResults(_)));
    }

    #[tokio::test]
    async fn test_cursor_at_max_id_yields_empty_page_not_error() {
        let store = seeded();
        let filter = ProductFilter::Keyword("phone".into());
        let page = page(&store, &filter, Some(ProductId::new(103)), 10)
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_category_filter() {
        let store = seeded();
        store.add_product(Product::new(ProductId::new(104), "Toaster", Category::Household));
        // No price rows yet: product is omitted, so the page comes back
        // empty even though the category matched.
        let filter = ProductFilter::Category(Category::Household);
        let err = page(&store, &filter, None, 10).await.unwrap_err();
        assert!(matches!(err, CompareError::NoResults(_)));
    }

    #[tokio::test]
    async fn test_unpriced_product_does_not_shorten_page() {
        // An unpriced product sits between two priced matches. The page
        // must refill past it: a short page means end-of-data to the
        // client, so stopping early would strand the later match.
        let store = MemoryStore::new();
        let now = Utc::now();
        store.add_vendor(Vendor::new(VendorId::new(1), "DealMart", "https://dealmart.example"));
        store.add_product(Product::new(ProductId::new(201), "Phone A", Category::Digital));
        store.add_product(Product::new(ProductId::new(202), "Phone B", Category::Digital));
        store.add_product(Product::new(ProductId::new(203), "Phone C", Category::Digital));
        for (price_id, pid) in [(1u64, 201u64), (2, 203)] {
            store.add_price(PriceRecord::new(
                PriceId::new(price_id),
                ProductId::new(pid),
                VendorId::new(1),
                Money::won(1000),
                now,
            ));
        }

        let filter = ProductFilter::Keyword("phone".into());
        let page = page(&store, &filter, None, 2).await.unwrap();
        let ids: Vec<u64> = page.iter().map(|l| l.product.id.value()).collect();
        assert_eq!(ids, vec![201, 203]);
    }

    #[tokio::test]
    async fn test_refill_stops_when_store_exhausted() {
        // Every match beyond the first is unpriced; the refill must
        // terminate on the store's short raw page, returning what it has.
        let store = MemoryStore::new();
        let now = Utc::now();
        store.add_vendor(Vendor::new(VendorId::new(1), "DealMart", "https://dealmart.example"));
        store.add_product(Product::new(ProductId::new(201), "Phone A", Category::Digital));
        store.add_product(Product::new(ProductId::new(202), "Phone B", Category::Digital));
        store.add_price(PriceRecord::new(
            PriceId::new(1),
            ProductId::new(201),
            VendorId::new(1),
            Money::won(1000),
            now,
        ));

        let filter = ProductFilter::Keyword("phone".into());
        let page = page(&store, &filter, None, 2).await.unwrap();
        let ids: Vec<u64> = page.iter().map(|l| l.product.id.value()).collect();
        assert_eq!(ids, vec![201]);
    }

    #[tokio::test]
    async fn test_zero_size_rejected() {
        let store = seeded();
        let filter = ProductFilter::Keyword("phone".into());
        let err = page(&store, &filter, None, 0).await.unwrap_err();
        assert!(matches!(err, CompareError::Validation(_)));
    }

    #[tokio::test]
    async fn test_strictly_increasing_ids_across_page() {
        let store = seeded();
        let filter = ProductFilter::Keyword("phone".into());
        let page = page(&store, &filter, None, 10).await.unwrap();
        let ids: Vec<u64> = page.iter().map(|l| l.product.id.value()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
