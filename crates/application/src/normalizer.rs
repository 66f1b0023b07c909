//! Normalization of host events into the canonical notification document.
//!
//! Two heterogeneous host shapes map onto one JSON vocabulary: scalar
//! fields become strings, absent optionals are omitted rather than
//! emitted as `null`, and only `userGroups`, `userAttributes` and
//! `representation` carry nested values.

use eventspout_core::{AppError, AppResult};
use eventspout_domain::{AdminEvent, LifecycleEvent, UserProfile};
use serde_json::{Map, Value};
use tracing::warn;

use crate::UserDirectory;

/// Marker `type` value distinguishing admin documents from lifecycle ones.
pub const ADMIN_EVENT_TYPE: &str = "ADMIN_EVENT";

/// Enrichment switches, fixed for the lifetime of a dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct EnrichmentOptions {
    /// Emit the `userGroups` array when the subject resolves.
    pub include_groups: bool,
    /// Emit the `userAttributes` object when the subject resolves.
    pub include_attributes: bool,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            include_groups: true,
            include_attributes: true,
        }
    }
}

/// Builds the canonical document for a lifecycle event.
///
/// Directory lookup is best-effort: a miss or a lookup failure skips
/// enrichment without failing the event. Detail entries are copied
/// verbatim as top-level string fields, key order preserved.
pub async fn normalize_event(
    event: &LifecycleEvent,
    directory: &dyn UserDirectory,
    options: EnrichmentOptions,
) -> Map<String, Value> {
    let mut document = Map::new();

    if let Some(event_type) = &event.event_type {
        insert_text(&mut document, "type", event_type);
    }
    if let Some(realm_id) = &event.realm_id {
        insert_text(&mut document, "realmId", realm_id);
    }
    if let Some(client_id) = &event.client_id {
        insert_text(&mut document, "clientId", client_id);
    }

    if let Some(user_id) = &event.user_id {
        match directory.find_user(user_id).await {
            Ok(Some(profile)) => {
                if options.include_groups {
                    document.insert(
                        "userGroups".to_owned(),
                        Value::Array(
                            profile.groups.iter().cloned().map(Value::String).collect(),
                        ),
                    );
                }
                if options.include_attributes {
                    document.insert(
                        "userAttributes".to_owned(),
                        Value::Object(user_attributes(&profile)),
                    );
                }
            }
            Ok(None) => {}
            Err(error) => {
                warn!(
                    user_id = %user_id,
                    error = %error,
                    "directory lookup failed, skipping enrichment"
                );
            }
        }
    }

    if let Some(ip_address) = &event.ip_address {
        insert_text(&mut document, "ipAddress", ip_address);
    }
    if let Some(error) = &event.error {
        insert_text(&mut document, "error", error);
    }

    if let Some(details) = &event.details {
        for (key, value) in details {
            document.insert(key.clone(), Value::String(detail_text(value)));
        }
    }

    document
}

/// Builds the canonical document for an admin event.
///
/// The `representation` body must be well-formed JSON when present; a
/// parse failure fails normalization for this event. It is only emitted
/// when `auth_details` is present, preserving the original emission
/// gating and field order.
pub fn normalize_admin_event(event: &AdminEvent) -> AppResult<Map<String, Value>> {
    let mut document = Map::new();

    insert_text(&mut document, "type", ADMIN_EVENT_TYPE);

    if let Some(operation_type) = &event.operation_type {
        insert_text(&mut document, "operationType", operation_type);
    }

    if let Some(auth) = &event.auth_details {
        if let Some(realm_id) = &auth.realm_id {
            insert_text(&mut document, "realmId", realm_id);
        }
        if let Some(client_id) = &auth.client_id {
            insert_text(&mut document, "clientId", client_id);
        }

        if let Some(representation) = &event.representation {
            let parsed: Value = serde_json::from_str(representation).map_err(|error| {
                AppError::Validation(format!(
                    "admin event representation is not valid JSON: {error}"
                ))
            })?;
            document.insert("representation".to_owned(), parsed);
        }

        if let Some(ip_address) = &auth.ip_address {
            insert_text(&mut document, "ipAddress", ip_address);
        }
    }

    if let Some(resource_type) = &event.resource_type {
        insert_text(&mut document, "resourceType", resource_type);
    }
    if let Some(resource_path) = &event.resource_path {
        insert_text(&mut document, "resourcePath", resource_path);
    }
    if let Some(error) = &event.error {
        insert_text(&mut document, "error", error);
    }

    Ok(document)
}

fn user_attributes(profile: &UserProfile) -> Map<String, Value> {
    let mut attributes = Map::new();
    insert_text(&mut attributes, "userId", &profile.user_id);
    if let Some(email) = &profile.email {
        insert_text(&mut attributes, "email", email);
    }
    if let Some(first_name) = &profile.first_name {
        insert_text(&mut attributes, "firstName", first_name);
    }
    if let Some(last_name) = &profile.last_name {
        insert_text(&mut attributes, "lastName", last_name);
    }
    if let Some(username) = &profile.username {
        insert_text(&mut attributes, "username", username);
    }
    attributes
}

fn insert_text(document: &mut Map<String, Value>, key: &str, value: &str) {
    document.insert(key.to_owned(), Value::String(value.to_owned()));
}

fn detail_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        // A null detail stays the literal string "null" for wire
        // compatibility with existing consumers.
        Value::Null => "null".to_owned(),
        other => other.to_string(),
    }
}
