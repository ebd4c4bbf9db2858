//! Search facade and query core for pricewatch.
//!
//! Orchestrates the read paths of the comparison backend:
//!
//! - **Paginate**: cursor pagination over keyword/category filters,
//!   enriched with each product's lowest current price
//! - **Views**: cookie-token deduplicated view counting
//! - **Popular**: view-count ranking over a trailing window
//! - **Facade**: the boundary operations, with a hard search timeout,
//!   bounded concurrency and uniform error classification

pub mod config;
pub mod facade;
pub mod images;
pub mod paginate;
pub mod popular;
pub mod views;

pub use config::SearchConfig;
pub use facade::SearchService;
pub use images::{ImageLookup, NoImages, StaticImages};
pub use paginate::ProductFilter;
pub use views::{ViewCounter, ViewReceipt, ViewTokenIssuer};
