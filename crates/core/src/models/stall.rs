//! Stall model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StallSize {
    Small,
    Medium,
    Large,
}

impl StallSize {
    pub const ALL: [StallSize; 3] = [StallSize::Small, StallSize::Medium, StallSize::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            StallSize::Small => "small",
            StallSize::Medium => "medium",
            StallSize::Large => "large",
        }
    }
}

impl std::fmt::Display for StallSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StallStatus {
    Available,
    Reserved,
}

impl std::fmt::Display for StallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StallStatus::Available => f.write_str("available"),
            StallStatus::Reserved => f.write_str("reserved"),
        }
    }
}

/// A physical stall on the fair floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stall {
    pub id: String,
    pub size: StallSize,
    pub status: StallStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl Stall {
    pub fn available(id: &str, size: StallSize) -> Self {
        Self {
            id: id.to_string(),
            size,
            status: StallStatus::Available,
            publisher: None,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.status == StallStatus::Reserved
    }

    /// Reserve the stall for a publisher
    pub fn reserve(&mut self, publisher: String) {
        self.status = StallStatus::Reserved;
        self.publisher = Some(publisher);
    }
}

/// Body of a stall assignment request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StallAssignment {
    #[serde(default)]
    pub vendor_id: Option<String>,
}
