//! Newtype IDs for type-safe identifiers.
//!
//! Identifiers are sequence-assigned integers (the ingestion side owns
//! assignment). Newtypes prevent accidentally mixing up different ID
//! kinds, e.g. passing a `VendorId` where a `ProductId` is expected, and
//! the derived ordering is what cursor pagination sorts by.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs over `u64`.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique numeric identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an ID from its numeric value.
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the numeric value.
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(VendorId);
define_id!(PriceId);
define_id!(MemberId);
define_id!(BookmarkId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_value() {
        let id = ProductId::new(101);
        assert_eq!(id.value(), 101);
    }

    #[test]
    fn test_id_ordering() {
        let a = ProductId::new(101);
        let b = ProductId::new(102);
        assert!(a < b);
    }

    #[test]
    fn test_id_from_u64() {
        let id: VendorId = 7.into();
        assert_eq!(id, VendorId::new(7));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", PriceId::new(42)), "42");
    }
}
