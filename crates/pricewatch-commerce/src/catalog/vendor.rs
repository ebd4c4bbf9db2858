//! Vendor type.

use crate::ids::VendorId;
use serde::{Deserialize, Serialize};

/// A vendor offering products. Many-to-many with products via price rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vendor {
    /// Unique vendor identifier.
    pub id: VendorId,
    /// Vendor display name.
    pub name: String,
    /// External reference to the vendor's storefront.
    pub url: String,
}

impl Vendor {
    pub fn new(id: VendorId, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: url.into(),
        }
    }
}
