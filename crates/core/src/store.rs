//! In-memory store backing the mock API
//!
//! The store is constructed explicitly (seeded or empty) and owned by the
//! router. Nothing is persisted; dropping the store discards all changes.

use chrono::{SecondsFormat, Utc};
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::invariants::assert_store_invariants;
use crate::models::{
    Business, BusinessDraft, Dashboard, Profile, ProfileUpdate, Reservation, ReservationAction,
    ReservationStatus, Stall, Vendor, VendorDraft,
};
use crate::seed;

/// Process-local collections served by the mock API
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    pub profile: Option<Profile>,
    pub reservations: Vec<Reservation>,
    pub stalls: Vec<Stall>,
    pub vendors: Vec<Vendor>,
    pub businesses: Vec<Business>,
    pub dashboard: Dashboard,
}

impl MockStore {
    /// Store populated with the standard development data set
    pub fn seeded() -> Self {
        Self {
            profile: Some(seed::profile()),
            reservations: seed::reservations(),
            stalls: seed::stalls(),
            vendors: seed::vendors(),
            businesses: seed::businesses(),
            dashboard: seed::dashboard(),
        }
    }

    pub fn vendor(&self, id: &str) -> Option<&Vendor> {
        self.vendors.iter().find(|v| v.id == id)
    }

    pub fn stall(&self, id: &str) -> Option<&Stall> {
        self.stalls.iter().find(|s| s.id == id)
    }

    pub fn reservation(&self, id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Next business id: highest existing id plus one, or 1 when empty
    pub fn next_business_id(&self) -> u64 {
        self.businesses
            .iter()
            .map(|b| b.business_id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Next vendor id, derived from the collection length
    pub fn next_vendor_id(&self) -> String {
        format!("V{:03}", self.vendors.len() + 1)
    }

    /// Merge a partial update into the singleton profile
    #[instrument(skip(self, update))]
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<&Profile> {
        let profile = self
            .profile
            .as_mut()
            .ok_or_else(|| Error::NotFound("Profile not found".into()))?;
        update.apply_to(profile);
        Ok(profile)
    }

    /// Append a new business built from `draft`
    #[instrument(skip(self, draft))]
    pub fn add_business(&mut self, draft: BusinessDraft) -> Business {
        let business = Business {
            business_id: self.next_business_id(),
            name: draft.name.unwrap_or_default(),
            registration_number: draft.registration_number.unwrap_or_default(),
            contact_number: draft.contact_number.unwrap_or_default(),
            address: draft.address.unwrap_or_default(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            verified: false,
        };
        debug!(business_id = business.business_id, "Business created");

        self.businesses.push(business.clone());
        assert_store_invariants(self);
        business
    }

    /// Append a new vendor built from `draft`
    #[instrument(skip(self, draft))]
    pub fn add_vendor(&mut self, draft: VendorDraft) -> Vendor {
        let vendor = Vendor {
            id: self.next_vendor_id(),
            name: draft.name.unwrap_or_default(),
            contact: draft.contact.unwrap_or_default(),
            email: draft.email.unwrap_or_default(),
            stalls: draft.stalls.map(|s| s.normalize()).unwrap_or_default(),
            category: draft.category.unwrap_or_default(),
        };
        debug!(vendor_id = %vendor.id, "Vendor created");

        self.vendors.push(vendor.clone());
        assert_store_invariants(self);
        vendor
    }

    /// Reserve a stall for a vendor.
    ///
    /// The publisher is the vendor's name when the vendor exists, otherwise
    /// the raw vendor id (empty when none was given).
    #[instrument(skip(self))]
    pub fn assign_stall(&mut self, stall_id: &str, vendor_id: Option<&str>) -> Result<Stall> {
        let publisher = match vendor_id {
            Some(id) => self
                .vendor(id)
                .map(|v| v.name.clone())
                .unwrap_or_else(|| id.to_string()),
            None => String::new(),
        };

        let stall = self
            .stalls
            .iter_mut()
            .find(|s| s.id == stall_id)
            .ok_or_else(|| Error::NotFound("Stall not found".into()))?;
        stall.reserve(publisher);
        let stall = stall.clone();

        assert_store_invariants(self);
        Ok(stall)
    }

    /// Apply an admin decision to a reservation
    #[instrument(skip(self))]
    pub fn decide_reservation(
        &mut self,
        reservation_id: &str,
        action: ReservationAction,
    ) -> Result<Reservation> {
        let reservation = self.reservation_mut(reservation_id)?;
        match action {
            ReservationAction::Approve => {
                reservation.status = ReservationStatus::Confirmed;
                reservation.email_sent = true;
            }
            ReservationAction::Decline => {
                reservation.status = ReservationStatus::Declined;
            }
        }
        let reservation = reservation.clone();

        assert_store_invariants(self);
        Ok(reservation)
    }

    pub fn approve_reservation(&mut self, reservation_id: &str) -> Result<Reservation> {
        self.decide_reservation(reservation_id, ReservationAction::Approve)
    }

    pub fn decline_reservation(&mut self, reservation_id: &str) -> Result<Reservation> {
        self.decide_reservation(reservation_id, ReservationAction::Decline)
    }

    fn reservation_mut(&mut self, id: &str) -> Result<&mut Reservation> {
        self.reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound("Reservation not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StallList, StallStatus};

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Duplicate id R001")]
    fn test_decision_checks_invariants() {
        let mut store = MockStore::seeded();
        let copy = store.reservations[0].clone();
        store.reservations.push(copy);
        let _ = store.approve_reservation("R002");
    }

    #[test]
    fn test_next_business_id() {
        let mut store = MockStore::seeded();
        assert_eq!(store.next_business_id(), 3);

        store.businesses.clear();
        assert_eq!(store.next_business_id(), 1);
    }

    #[test]
    fn test_next_business_id_uses_max_not_len() {
        let mut store = MockStore::seeded();
        store.businesses[1].business_id = 10;
        assert_eq!(store.next_business_id(), 11);
    }

    #[test]
    fn test_add_business_defaults() {
        let mut store = MockStore::seeded();
        let business = store.add_business(BusinessDraft {
            name: Some("Acme".to_string()),
            ..Default::default()
        });

        assert_eq!(business.business_id, 3);
        assert_eq!(business.registration_number, "");
        assert!(!business.verified);
        assert!(business.created_at.ends_with('Z'));
        assert_eq!(store.businesses.len(), 3);
    }

    #[test]
    fn test_add_vendor_generates_sequential_id() {
        let mut store = MockStore::seeded();
        let vendor = store.add_vendor(VendorDraft {
            name: Some("Godage Publishers".to_string()),
            stalls: Some(StallList::Csv("C20,C21".to_string())),
            ..Default::default()
        });

        assert_eq!(vendor.id, "V003");
        assert_eq!(vendor.stalls, vec!["C20", "C21"]);
        assert_eq!(store.vendors.len(), 3);
    }

    #[test]
    fn test_assign_unknown_vendor_falls_back_to_id() {
        let mut store = MockStore::seeded();
        let stall = store.assign_stall("C01", Some("V999")).unwrap();

        assert_eq!(stall.status, StallStatus::Reserved);
        assert_eq!(stall.publisher.as_deref(), Some("V999"));
    }

    #[test]
    fn test_assign_missing_stall_leaves_store_unchanged() {
        let mut store = MockStore::seeded();
        let before = store.stalls.clone();

        let err = store.assign_stall("ZZZ", Some("V001")).unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(store.stalls, before);
    }

    #[test]
    fn test_decline_keeps_email_flag() {
        let mut store = MockStore::seeded();
        store.approve_reservation("R002").unwrap();
        let declined = store.decline_reservation("R002").unwrap();

        assert_eq!(declined.status, ReservationStatus::Declined);
        assert!(declined.email_sent);
    }

    #[test]
    fn test_empty_store_has_no_profile() {
        let mut store = MockStore::default();
        assert!(store.update_profile(ProfileUpdate::default()).is_err());
    }
}
