//! Page view models
//!
//! Every page follows the same cycle: `load` fetches on mount, a mutating
//! action swaps the returned entity into local state and then re-fetches.
//! A failed action leaves local state untouched.

pub mod auth;
pub mod businesses;
pub mod dashboard;
pub mod profile;
pub mod reservations;
pub mod stall_map;
pub mod vendors;

use std::fmt;

pub use auth::AuthError;
pub use businesses::BusinessesPage;
pub use dashboard::DashboardPage;
pub use profile::ProfilePage;
pub use reservations::ReservationsPage;
pub use stall_map::{StallCounts, StallMapPage};
pub use vendors::VendorsPage;

/// User-facing outcome of an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn from_result<T, E: fmt::Display>(
        result: &Result<T, E>,
        success: impl FnOnce(&T) -> String,
    ) -> Self {
        match result {
            Ok(value) => Notice::Success(success(value)),
            Err(e) => Notice::Error(e.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "✔ {}", msg),
            Notice::Error(msg) => write!(f, "✘ {}", msg),
        }
    }
}

/// Replace the item matching `same`, or append it
pub(crate) fn replace_or_push<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T) -> bool) {
    match items.iter_mut().find(|existing| same(existing)) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_or_push() {
        let mut items = vec![(1, "a"), (2, "b")];
        replace_or_push(&mut items, (2, "B"), |i| i.0 == 2);
        replace_or_push(&mut items, (3, "c"), |i| i.0 == 3);
        assert_eq!(items, vec![(1, "a"), (2, "B"), (3, "c")]);
    }

    #[test]
    fn test_notice_from_result() {
        let ok: Result<u32, String> = Ok(3);
        let err: Result<u32, String> = Err("Stall not found".to_string());

        assert_eq!(
            Notice::from_result(&ok, |n| format!("{} saved", n)),
            Notice::Success("3 saved".to_string())
        );
        let notice = Notice::from_result(&err, |_| String::new());
        assert!(notice.is_error());
        assert_eq!(notice.to_string(), "✘ Stall not found");
    }
}
