//! Lifecycle event shape emitted by the identity host.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A non-administrative identity lifecycle event (login, logout,
/// registration, error, ...).
///
/// Every field is optional: the host populates only what the triggering
/// operation knows about. The shape is host-owned and read-only here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifecycleEvent {
    /// Stable event type token, e.g. `LOGIN` or `REGISTER`.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    /// Realm the event occurred in.
    pub realm_id: Option<String>,
    /// Client application that triggered the event.
    pub client_id: Option<String>,
    /// Opaque identifier of the subject the event concerns.
    pub user_id: Option<String>,
    /// Caller IP address, if known.
    pub ip_address: Option<String>,
    /// Error code, present only on failure events.
    pub error: Option<String>,
    /// Free-form detail entries, in host emission order.
    pub details: Option<Map<String, Value>>,
}

impl LifecycleEvent {
    /// Renders one human-readable diagnostic line of `key=value` pairs.
    ///
    /// Absent fixed fields render as `null`. A detail value containing a
    /// space is wrapped in single quotes so the line stays splittable on
    /// unquoted whitespace.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut line = String::new();
        push_field(&mut line, "type", self.event_type.as_deref());
        push_field(&mut line, "realmId", self.realm_id.as_deref());
        push_field(&mut line, "clientId", self.client_id.as_deref());
        push_field(&mut line, "userId", self.user_id.as_deref());
        push_field(&mut line, "ipAddress", self.ip_address.as_deref());

        if let Some(error) = &self.error {
            push_field(&mut line, "error", Some(error));
        }

        if let Some(details) = &self.details {
            for (key, value) in details {
                push_detail(&mut line, key, value);
            }
        }

        line
    }
}

/// Appends `, key=value` to a diagnostic line, rendering `None` as `null`.
pub(crate) fn push_field(line: &mut String, key: &str, value: Option<&str>) {
    if !line.is_empty() {
        line.push_str(", ");
    }
    line.push_str(key);
    line.push('=');
    line.push_str(value.unwrap_or("null"));
}

fn push_detail(line: &mut String, key: &str, value: &Value) {
    let text = match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_owned(),
        other => other.to_string(),
    };

    line.push_str(", ");
    line.push_str(key);
    if text.contains(' ') {
        line.push_str("='");
        line.push_str(&text);
        line.push('\'');
    } else {
        line.push('=');
        line.push_str(&text);
    }
}
