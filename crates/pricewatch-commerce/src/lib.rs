//! Product-comparison domain types and logic for pricewatch.
//!
//! This crate provides the read-side domain model of a multi-vendor
//! price-comparison catalog:
//!
//! - **Catalog**: Products, vendors, price history rows
//! - **Pricing**: Lowest-current-price reduction across vendors
//! - **Errors**: The typed failure taxonomy shared by every read path
//!
//! Price rows are written by an external ingestion process; everything in
//! this crate treats the catalog as read-only.
//!
//! # Example
//!
//! ```rust,ignore
//! use pricewatch_commerce::prelude::*;
//!
//! let rows: Vec<PriceRecord> = store.price_history(product_id).await?;
//! if let Some(best) = pricing::lowest_price(&rows) {
//!     println!("best offer: {}", best.amount.display());
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod ids;
pub mod money;
pub mod pricing;

pub use error::CompareError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CompareError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::catalog::{
        Bookmark, Category, PriceRecord, Product, ProductListing, Vendor, VendorPrice,
    };

    pub use crate::pricing;
}
