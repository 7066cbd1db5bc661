//! Vendor model

use serde::{Deserialize, Serialize};

/// A registered vendor and the stalls it holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub stalls: Vec<String>,
    pub category: String,
}

impl Vendor {
    /// Case-insensitive match on name, email or any stall id
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.email.to_lowercase().contains(&term)
            || self
                .stalls
                .iter()
                .any(|stall| stall.to_lowercase().contains(&term))
    }
}

/// Stall list as accepted on input: a JSON array or a comma-separated string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StallList {
    List(Vec<String>),
    Csv(String),
}

impl StallList {
    /// Trimmed, non-empty stall ids in input order
    pub fn normalize(self) -> Vec<String> {
        let items: Vec<String> = match self {
            StallList::List(items) => items,
            StallList::Csv(text) => text.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Body of a vendor creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub stalls: Option<StallList>,
    #[serde(default)]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_stalls_trimmed() {
        let list = StallList::Csv("A1, A2 ,".to_string());
        assert_eq!(list.normalize(), vec!["A1", "A2"]);
    }

    #[test]
    fn test_array_stalls_drop_blanks() {
        let draft: VendorDraft =
            serde_json::from_str(r#"{"stalls":[" B1", "", "B2"]}"#).unwrap();
        assert_eq!(draft.stalls.unwrap().normalize(), vec!["B1", "B2"]);
    }

    #[test]
    fn test_vendor_search() {
        let vendor = Vendor {
            id: "V001".to_string(),
            name: "Sarasavi Bookshop".to_string(),
            contact: String::new(),
            email: "info@sarasavi.lk".to_string(),
            stalls: vec!["A12".to_string()],
            category: String::new(),
        };
        assert!(vendor.matches("sarasavi"));
        assert!(vendor.matches("a12"));
        assert!(!vendor.matches("godage"));
    }
}
