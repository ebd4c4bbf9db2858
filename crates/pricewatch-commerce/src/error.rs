//! Comparison error taxonomy.
//!
//! Every boundary operation fails with one of these kinds plus a
//! human-readable detail message. A failure already classified into a
//! kind is re-signaled unchanged up to the boundary; anything else is
//! re-classified at the component boundary and never leaked raw.

use thiserror::Error;

/// Errors that can occur in product-comparison operations.
#[derive(Error, Debug)]
pub enum CompareError {
    /// No matching product or current price.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A search yielded nothing on its first page.
    #[error("Search returned no results: {0}")]
    NoResults(String),

    /// A search exceeded its deadline.
    #[error("Search timed out after {waited_ms}ms")]
    Timeout { waited_ms: u64 },

    /// No vendor listing exists for the product.
    #[error("Vendor listing not found: {0}")]
    VendorUrlNotFound(String),

    /// Underlying catalog store failure.
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input at the boundary.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CompareError {
    /// Whether this error is one of the boundary kinds, as opposed to an
    /// internal failure awaiting re-classification.
    pub fn is_classified(&self) -> bool {
        matches!(
            self,
            CompareError::ProductNotFound(_)
                | CompareError::NoResults(_)
                | CompareError::Timeout { .. }
                | CompareError::VendorUrlNotFound(_)
        )
    }
}

impl From<serde_json::Error> for CompareError {
    fn from(e: serde_json::Error) -> Self {
        CompareError::Serialization(e.to_string())
    }
}
