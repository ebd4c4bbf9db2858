//! Catalog store interface for pricewatch.
//!
//! The query core treats persistence as an external collaborator: this
//! crate defines the [`CatalogStore`] trait covering the read queries the
//! core needs (plus the view-event append), and ships an in-memory
//! implementation used by tests and demos. A production deployment plugs
//! a database-backed implementation in behind the same trait.

pub mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{CatalogStore, ViewEvent};
