//! Ports for directory lookup and outbound notification delivery.

use async_trait::async_trait;
use eventspout_core::AppResult;
use eventspout_domain::UserProfile;
use serde_json::{Map, Value};

/// Port for resolving user profiles from the identity directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user profile by opaque user id.
    ///
    /// Returns `Ok(None)` when the identifier does not resolve.
    async fn find_user(&self, user_id: &str) -> AppResult<Option<UserProfile>>;
}

/// Port for delivering one finished notification document.
///
/// Implementations make exactly one delivery attempt per call: no retry,
/// no buffering, no inspection of the response body.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Publishes one document to the configured sink.
    async fn publish(&self, document: &Map<String, Value>) -> AppResult<()>;
}
