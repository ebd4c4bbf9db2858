//! Lowest-current-price reduction.
//!
//! Price history accumulates one row per vendor refresh, so "lowest
//! price" is a two-step reduction: select the latest row per vendor,
//! then take the minimum amount among those. Collapsing the two steps
//! into a single min over all history would resurrect stale offers.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::catalog::PriceRecord;
use crate::ids::VendorId;

/// Select the authoritative current row per vendor: greatest
/// `updated_at`, ties broken by highest row id.
pub fn current_offers(rows: &[PriceRecord]) -> Vec<&PriceRecord> {
    let mut latest: HashMap<VendorId, &PriceRecord> = HashMap::new();
    for row in rows {
        match latest.entry(row.vendor_id) {
            Entry::Occupied(mut held) => {
                if row.supersedes(held.get()) {
                    held.insert(row);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
        }
    }
    let mut offers: Vec<&PriceRecord> = latest.into_values().collect();
    // Deterministic output order for callers that list offers directly.
    offers.sort_by_key(|r| r.vendor_id);
    offers
}

/// The lowest current offer for a product, or `None` when the product
/// has no price rows at all.
///
/// Ties on amount break toward the lowest row id so repeated calls over
/// unchanged data pick the same winner.
pub fn lowest_price(rows: &[PriceRecord]) -> Option<&PriceRecord> {
    current_offers(rows)
        .into_iter()
        .min_by_key(|r| (r.amount.amount_minor, r.id))
}
