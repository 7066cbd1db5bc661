//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible store states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::store::MockStore;

/// Validate that every id in `ids` is unique
pub fn assert_unique_ids<'a, I>(collection: &str, ids: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for id in ids {
        debug_assert!(
            seen.insert(id),
            "Duplicate id {} in {} collection",
            id,
            collection
        );
    }
}

/// Validate the whole store after a mutation
pub fn assert_store_invariants(store: &MockStore) {
    assert_unique_ids("reservation", store.reservations.iter().map(|r| r.id.as_str()));
    assert_unique_ids("stall", store.stalls.iter().map(|s| s.id.as_str()));
    assert_unique_ids("vendor", store.vendors.iter().map(|v| v.id.as_str()));

    let mut business_ids = HashSet::new();
    for business in &store.businesses {
        debug_assert!(
            business_ids.insert(business.business_id),
            "Duplicate businessId {}",
            business.business_id
        );
    }

    for stall in &store.stalls {
        debug_assert!(
            !stall.is_reserved() || stall.publisher.is_some(),
            "Stall {} is reserved without a publisher",
            stall.id
        );
    }
}
