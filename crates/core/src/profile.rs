//! Profile derivation
//!
//! Maps an authenticated user onto the display profile shown on the admin
//! profile page. Pure apart from reading the clock in [`derive_profile`].

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::models::{Profile, User};

/// Employee id prefix for derived profiles
pub const EMPLOYEE_ID_PREFIX: &str = "CMBF";

/// Placeholder for fields the backend does not provide
pub const NOT_AVAILABLE: &str = "N/A";

const AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";

const DATE_FORMAT: &str = "%-m/%-d/%Y";
const DATE_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Derive a display profile, stamping `lastLogin` with the current local time
pub fn derive_profile(user: &User) -> Profile {
    derive_profile_at(user, Local::now().naive_local())
}

/// Derive a display profile as of `now` (local wall-clock time)
pub fn derive_profile_at(user: &User, now: NaiveDateTime) -> Profile {
    let mut tokens = user.name.split_whitespace();
    let first_name = tokens.next().unwrap_or(NOT_AVAILABLE).to_string();
    let rest: Vec<&str> = tokens.collect();
    let last_name = if rest.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        rest.join(" ")
    };

    Profile {
        employee_id: employee_id(user.user_id),
        first_name,
        last_name,
        email: or_not_available(&user.email),
        phone: or_not_available(&user.contact_number),
        address: NOT_AVAILABLE.to_string(),
        role: user.role.to_string(),
        dob: NOT_AVAILABLE.to_string(),
        nic: NOT_AVAILABLE.to_string(),
        joined: user
            .created_at
            .as_deref()
            .map(format_joined)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        last_login: now.format(DATE_TIME_FORMAT).to_string(),
        avatar: avatar_url(&initials(&user.name)),
        source_user_id: Some(user.user_id),
        source_genres: Some(user.genres.clone().unwrap_or_default()),
    }
}

/// `CMBF` followed by the id zero-padded to three digits
pub fn employee_id(user_id: u64) -> String {
    format!("{}{:03}", EMPLOYEE_ID_PREFIX, user_id)
}

/// First letter of every whitespace-separated word, upper-cased
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn avatar_url(initials: &str) -> String {
    format!(
        "{}?name={}&background=0D8ABC&color=fff",
        AVATAR_BASE_URL, initials
    )
}

fn or_not_available(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

/// Format a backend timestamp as a local date.
///
/// Accepts RFC 3339, naive ISO date-times (read as local time) and bare dates.
fn format_joined(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DATE_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(DATE_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DATE_FORMAT).to_string();
    }
    "Invalid Date".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn make_user(name: &str) -> User {
        User {
            user_id: 7,
            name: name.to_string(),
            email: "kamal@bookfair.lk".to_string(),
            contact_number: "0771234567".to_string(),
            role: UserRole::Admin,
            created_at: Some("2025-11-10T20:20:56.825578".to_string()),
            genres: None,
        }
    }

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 12)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_derive_full_name() {
        let profile = derive_profile_at(&make_user("Kamal  Nimal Silva"), fixed_now());

        assert_eq!(profile.employee_id, "CMBF007");
        assert_eq!(profile.first_name, "Kamal");
        assert_eq!(profile.last_name, "Nimal Silva");
        assert_eq!(profile.role, "admin");
        assert_eq!(profile.address, "N/A");
        assert_eq!(profile.dob, "N/A");
        assert_eq!(profile.nic, "N/A");
        assert_eq!(profile.joined, "11/10/2025");
        assert_eq!(profile.last_login, "11/12/2025, 2:05:09 PM");
        assert_eq!(
            profile.avatar,
            "https://ui-avatars.com/api/?name=KNS&background=0D8ABC&color=fff"
        );
        assert_eq!(profile.source_user_id, Some(7));
        assert_eq!(profile.source_genres, Some(Vec::new()));
    }

    #[test]
    fn test_derive_single_and_empty_name() {
        let single = derive_profile_at(&make_user("Kamal"), fixed_now());
        assert_eq!(single.first_name, "Kamal");
        assert_eq!(single.last_name, "N/A");

        let empty = derive_profile_at(&make_user(""), fixed_now());
        assert_eq!(empty.first_name, "N/A");
        assert_eq!(empty.last_name, "N/A");
    }

    #[test]
    fn test_missing_created_at() {
        let mut user = make_user("Kamal Silva");
        user.created_at = None;
        user.email = String::new();

        let profile = derive_profile_at(&user, fixed_now());
        assert_eq!(profile.joined, "N/A");
        assert_eq!(profile.email, "N/A");
    }

    #[test]
    fn test_employee_id_padding() {
        assert_eq!(employee_id(1), "CMBF001");
        assert_eq!(employee_id(1234), "CMBF1234");
    }

    #[test]
    fn test_initials_lowercase_name() {
        assert_eq!(initials("nuwan perera"), "NP");
    }
}
