//! Data models for the book fair admin API

mod business;
mod dashboard;
mod profile;
mod reservation;
mod stall;
mod user;
mod vendor;

pub use business::*;
pub use dashboard::*;
pub use profile::*;
pub use reservation::*;
pub use stall::*;
pub use user::*;
pub use vendor::*;
