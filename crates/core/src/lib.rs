//! Book Fair Admin core library
//!
//! Models, seed data, the in-memory store and the mock endpoint router that
//! stands in for the reservation backend during development.

pub mod error;
pub mod invariants;
pub mod models;
pub mod profile;
pub mod router;
pub mod seed;
pub mod store;

pub use error::{Error, Result};
pub use models::*;
pub use profile::{derive_profile, derive_profile_at};
pub use router::{Method, MockRouter, Reply};
pub use store::MockStore;
