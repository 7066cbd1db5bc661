//! Admin profile model

use serde::{Deserialize, Serialize};

/// Display profile of the signed-in administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub role: String,
    pub dob: String,
    pub nic: String,
    pub joined: String,
    pub last_login: String,
    pub avatar: String,
    /// Source user id, only present on profiles derived from a user
    #[serde(rename = "_userId", default, skip_serializing_if = "Option::is_none")]
    pub source_user_id: Option<u64>,
    /// Source user genres, only present on profiles derived from a user
    #[serde(rename = "_genres", default, skip_serializing_if = "Option::is_none")]
    pub source_genres: Option<Vec<String>>,
}

/// Partial profile update.
///
/// `employeeId` is immutable and is rejected along with any other unknown field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merge the present fields into `profile`
    pub fn apply_to(self, profile: &mut Profile) {
        let fields = [
            (self.first_name, &mut profile.first_name),
            (self.last_name, &mut profile.last_name),
            (self.email, &mut profile.email),
            (self.phone, &mut profile.phone),
            (self.address, &mut profile.address),
            (self.role, &mut profile.role),
            (self.dob, &mut profile.dob),
            (self.nic, &mut profile.nic),
            (self.joined, &mut profile.joined),
            (self.last_login, &mut profile.last_login),
            (self.avatar, &mut profile.avatar),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn test_update_rejects_employee_id() {
        let result: Result<ProfileUpdate, _> =
            serde_json::from_str(r#"{"employeeId":"CMBF999","firstName":"X"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_only_present_fields() {
        let mut profile = seed::profile();
        let update = ProfileUpdate {
            phone: Some("+94 71 000 0000".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut profile);

        assert_eq!(profile.phone, "+94 71 000 0000");
        assert_eq!(profile.first_name, "Nuwan");
        assert_eq!(profile.employee_id, "CMBF001");
    }

    #[test]
    fn test_seed_profile_omits_source_fields() {
        let json = serde_json::to_value(seed::profile()).unwrap();
        assert!(json.get("_userId").is_none());
        assert_eq!(json["employeeId"], "CMBF001");
    }
}
