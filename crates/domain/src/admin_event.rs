//! Administrative event shape emitted by the identity host.

use serde::{Deserialize, Serialize};

use crate::event::push_field;

/// Authentication context attached to an admin event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthDetails {
    /// Realm the acting user authenticated against.
    pub realm_id: Option<String>,
    /// Client application the action was performed through.
    pub client_id: Option<String>,
    /// Opaque identifier of the acting user.
    pub user_id: Option<String>,
    /// Caller IP address, if known.
    pub ip_address: Option<String>,
}

/// A record of an administrative change to a platform resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminEvent {
    /// Operation token: `CREATE`, `UPDATE`, `DELETE` or `ACTION`.
    pub operation_type: Option<String>,
    /// Authentication context of the acting user.
    pub auth_details: Option<AuthDetails>,
    /// Type label of the affected resource.
    pub resource_type: Option<String>,
    /// Slash-delimited addressable path of the affected resource.
    pub resource_path: Option<String>,
    /// Raw JSON-encoded snapshot of the resource's new state.
    pub representation: Option<String>,
    /// Error code, present only on failed operations.
    pub error: Option<String>,
}

impl AdminEvent {
    /// Renders one human-readable diagnostic line of `key=value` pairs.
    ///
    /// Absent values render as `null`, including the whole auth block
    /// when `auth_details` is missing.
    #[must_use]
    pub fn describe(&self) -> String {
        let auth = self.auth_details.as_ref();

        let mut line = String::new();
        push_field(&mut line, "operationType", self.operation_type.as_deref());
        push_field(
            &mut line,
            "realmId",
            auth.and_then(|details| details.realm_id.as_deref()),
        );
        push_field(
            &mut line,
            "clientId",
            auth.and_then(|details| details.client_id.as_deref()),
        );
        push_field(
            &mut line,
            "userId",
            auth.and_then(|details| details.user_id.as_deref()),
        );
        push_field(
            &mut line,
            "ipAddress",
            auth.and_then(|details| details.ip_address.as_deref()),
        );
        push_field(&mut line, "resourcePath", self.resource_path.as_deref());

        if let Some(error) = &self.error {
            push_field(&mut line, "error", Some(error));
        }

        line
    }
}
