//! Popularity ranking over a trailing view window.

use chrono::{DateTime, Utc};
use pricewatch_commerce::catalog::Product;
use pricewatch_commerce::CompareError;
use pricewatch_store::CatalogStore;

/// Products ranked by view count within `[since, now]`, descending.
/// Ties break toward ascending product id so the ordering is
/// deterministic. Views older than `since` are excluded entirely.
pub async fn popular(
    store: &dyn CatalogStore,
    since: DateTime<Utc>,
) -> Result<Vec<(Product, u64)>, CompareError> {
    let mut counts = store.views_since(since).await?;
    counts.sort_by(|(a_id, a_count), (b_id, b_count)| {
        b_count.cmp(a_count).then(a_id.cmp(b_id))
    });

    let mut ranked = Vec::with_capacity(counts.len());
    for (product_id, count) in counts {
        // Views can outlive products removed by administrative
        // correction; skip those rather than failing the ranking.
        if let Some(product) = store.find_product(product_id).await? {
            ranked.push((product, count));
        }
    }
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pricewatch_commerce::catalog::Category;
    use pricewatch_commerce::ids::ProductId;
    use pricewatch_store::MemoryStore;

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for (id, name) in [(101u64, "iPhone"), (102, "Phone X"), (103, "Smartphone")] {
            store.add_product(Product::new(ProductId::new(id), name, Category::Digital));
        }
        store
    }

    #[tokio::test]
    async fn test_window_excludes_old_views() {
        let store = seeded();
        let now = Utc::now();
        let pid = ProductId::new(101);
        store.record_view(pid, now - Duration::hours(2)).await.unwrap();
        store.record_view(pid, now - Duration::minutes(30)).await.unwrap();

        let ranked = popular(&store, now - Duration::hours(1)).await.unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].1, 1);
    }

    #[tokio::test]
    async fn test_ordered_by_count_desc_then_id_asc() {
        let store = seeded();
        let now = Utc::now();
        for _ in 0..3 {
            store.record_view(ProductId::new(102), now).await.unwrap();
        }
        store.record_view(ProductId::new(101), now).await.unwrap();
        store.record_view(ProductId::new(103), now).await.unwrap();

        let ranked = popular(&store, now - Duration::hours(1)).await.unwrap();
        let ids: Vec<u64> = ranked.iter().map(|(p, _)| p.id.value()).collect();
        // 102 leads on count; 101 and 103 tie and fall back to id order.
        assert_eq!(ids, vec![102, 101, 103]);
    }

    #[tokio::test]
    async fn test_no_views_is_empty_ranking() {
        let store = seeded();
        let ranked = popular(&store, Utc::now() - Duration::hours(1)).await.unwrap();
        assert!(ranked.is_empty());
    }
}
