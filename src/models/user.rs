//! Users of the network

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::Id;
use crate::storage::Record;

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    #[serde(rename = "_id")]
    pub id: Id,

    /// Everything else about the user
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// User fields other than the id.
///
/// Every field is optional. The same shape is accepted when a user is created
/// and when one is partially updated; absent fields are left out of the
/// stored document rather than written as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    /// personal, academic or professional
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// married, single or widowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined: Option<DateTime<Utc>>,
}

impl User {
    /// A new user with a fresh id. `joined` defaults to now.
    pub fn new(mut profile: UserProfile) -> Self {
        profile.joined.get_or_insert_with(Utc::now);
        Self {
            id: Id::new(),
            profile,
        }
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const DATE_FIELDS: &'static [&'static str] = &["dateOfBirth", "joined"];

    fn id(&self) -> &Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_serializes_flat_and_skips_missing_fields() {
        let user = User::new(UserProfile {
            username: Some("alice".into()),
            ..Default::default()
        });
        let value = serde_json::to_value(&user).unwrap();

        assert_eq!(value["_id"], json!(user.id.to_hex()));
        assert_eq!(value["username"], json!("alice"));
        assert!(value.get("email").is_none());
        assert!(value.get("joined").is_some());
    }

    #[test]
    fn test_profile_accepts_camel_case_body() {
        let profile: UserProfile = serde_json::from_value(json!({
            "username": "bob",
            "firstName": "Bob",
            "accountType": "PERSONAL"
        }))
        .unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Bob"));
        assert_eq!(profile.account_type.as_deref(), Some("PERSONAL"));
        assert_eq!(profile.joined, None);
    }
}
