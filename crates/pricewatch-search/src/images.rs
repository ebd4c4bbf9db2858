//! Image-reference collaborator.
//!
//! Product images live in object storage owned by another service. The
//! facade only needs a URL per product name, and a missing or failed
//! lookup degrades to "no image" rather than failing the request, so the
//! trait is infallible: implementations swallow their own errors.

use std::collections::HashMap;

use async_trait::async_trait;

/// Image-reference lookup keyed by product name.
#[async_trait]
pub trait ImageLookup: Send + Sync {
    /// URL for the product's image, or `None` when absent or the
    /// backing store is unreachable.
    async fn image_url(&self, product_name: &str) -> Option<String>;
}

/// Lookup that never finds an image.
pub struct NoImages;

#[async_trait]
impl ImageLookup for NoImages {
    async fn image_url(&self, _product_name: &str) -> Option<String> {
        None
    }
}

/// Fixed name-to-URL mapping, for tests and demos.
pub struct StaticImages {
    urls: HashMap<String, String>,
}

impl StaticImages {
    pub fn new(urls: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            urls: urls.into_iter().collect(),
        }
    }
}

#[async_trait]
impl ImageLookup for StaticImages {
    async fn image_url(&self, product_name: &str) -> Option<String> {
        self.urls.get(product_name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_lookup() {
        let images = StaticImages::new([(
            "iPhone".to_string(),
            "https://img.example/iphone.jpg".to_string(),
        )]);
        assert_eq!(
            images.image_url("iPhone").await.as_deref(),
            Some("https://img.example/iphone.jpg")
        );
        assert_eq!(images.image_url("Toaster").await, None);
    }
}
