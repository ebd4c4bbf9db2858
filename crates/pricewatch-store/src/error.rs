//! Store error types.

use pricewatch_commerce::CompareError;
use thiserror::Error;

/// Errors surfaced by a catalog store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Backend failure (connection, query, corruption).
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<StoreError> for CompareError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(what) => CompareError::ProductNotFound(what),
            StoreError::Backend(detail) => CompareError::Store(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_product_not_found() {
        let e: CompareError = StoreError::NotFound("product 7".into()).into();
        assert!(matches!(e, CompareError::ProductNotFound(_)));
    }

    #[test]
    fn test_backend_maps_to_store() {
        let e: CompareError = StoreError::Backend("connection reset".into()).into();
        assert!(matches!(e, CompareError::Store(_)));
        assert!(!e.is_classified());
    }
}
