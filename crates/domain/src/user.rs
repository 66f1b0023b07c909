//! Directory profile used to enrich user-related events.

use serde::{Deserialize, Serialize};

/// User profile resolved from the directory by opaque user id.
///
/// A lookup that does not resolve returns no profile at all rather than a
/// partially-empty record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Opaque user identifier, as known by the host.
    pub user_id: String,
    /// Primary email address, if set.
    pub email: Option<String>,
    /// Given name, if set.
    pub first_name: Option<String>,
    /// Family name, if set.
    pub last_name: Option<String>,
    /// Login name, if set.
    pub username: Option<String>,
    /// Names of the groups the user belongs to, in directory order.
    pub groups: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::UserProfile;

    #[test]
    fn deserializes_directory_response() {
        let profile: UserProfile = serde_json::from_value(json!({
            "userId": "u1",
            "email": "dev@example.test",
            "firstName": "Dana",
            "groups": ["admins", "devs"]
        }))
        .unwrap();

        assert_eq!(profile.user_id, "u1");
        assert_eq!(profile.email.as_deref(), Some("dev@example.test"));
        assert_eq!(profile.last_name, None);
        assert_eq!(profile.groups, vec!["admins", "devs"]);
    }
}
