//! Catalog entities: products, vendors, price history.

mod price;
mod product;
mod vendor;

pub use price::{PriceRecord, VendorPrice};
pub use product::{Bookmark, Category, Product, ProductListing};
pub use vendor::Vendor;
