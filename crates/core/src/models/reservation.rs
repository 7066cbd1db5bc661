//! Stall reservation model

use serde::{Deserialize, Serialize};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Declined,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Declined => "declined",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A publisher's reservation of one or more stalls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub publisher: String,
    pub contact: String,
    pub email: String,
    pub stalls: Vec<String>,
    pub genre: String,
    pub email_sent: bool,
    pub status: ReservationStatus,
    pub qr_code: String,
}

impl Reservation {
    /// Case-insensitive match on publisher, email or any stall id
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.publisher.to_lowercase().contains(&term)
            || self.email.to_lowercase().contains(&term)
            || self
                .stalls
                .iter()
                .any(|stall| stall.to_lowercase().contains(&term))
    }
}

/// Admin decision on a reservation, as named in the route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationAction {
    Approve,
    Decline,
}

impl ReservationAction {
    /// Parse the action token from a route segment.
    ///
    /// The decline token is `decline` even though the stored status is `declined`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "approve" => Some(ReservationAction::Approve),
            "decline" => Some(ReservationAction::Decline),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            ReservationAction::Approve => "approve",
            ReservationAction::Decline => "decline",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_tokens() {
        assert_eq!(
            ReservationAction::from_token("approve"),
            Some(ReservationAction::Approve)
        );
        assert_eq!(
            ReservationAction::from_token("decline"),
            Some(ReservationAction::Decline)
        );
        assert_eq!(ReservationAction::from_token("declined"), None);
    }

    #[test]
    fn test_matches_publisher_email_and_stalls() {
        let reservation = crate::seed::reservations().remove(2);
        assert!(reservation.matches("GODAGE"));
        assert!(reservation.matches("godagepublishers.lk"));
        assert!(reservation.matches("c21"));
        assert!(reservation.matches(""));
        assert!(!reservation.matches("Literature"));
        assert!(!reservation.matches("QR003"));
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ReservationStatus::Declined).unwrap();
        assert_eq!(json, "\"declined\"");
    }
}
