//! HTTP implementation of the notification sink port.

use async_trait::async_trait;
use eventspout_application::NotificationSink;
use eventspout_core::{AppError, AppResult};
use serde_json::{Map, Value};

/// Header carrying the static API credential on every delivery.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Sink delivering documents as a single JSON POST to a fixed endpoint.
///
/// One attempt per call; any transport error or non-2xx status is a
/// publish error. The response body is read only to enrich the error
/// message, never interpreted.
pub struct HttpNotificationSink {
    http_client: reqwest::Client,
    base_url: Option<String>,
    api_key: String,
}

impl HttpNotificationSink {
    /// Creates a sink for a base URL and credential.
    ///
    /// `base_url` may be absent; delivery then fails per call rather than
    /// at startup, since the endpoint is provisioned independently of the
    /// host process.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: Option<String>, api_key: String) -> Self {
        Self {
            http_client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn publish(&self, document: &Map<String, Value>) -> AppResult<()> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| AppError::Publish("webhook base URL is not configured".to_owned()))?;

        let response = self
            .http_client
            .post(base_url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(document)
            .send()
            .await
            .map_err(|error| {
                AppError::Publish(format!("webhook delivery transport error: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(AppError::Publish(format!(
                "webhook endpoint returned status {}: {body}",
                status.as_u16()
            )));
        }

        Ok(())
    }
}
