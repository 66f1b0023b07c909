//! HTTP implementation of the user directory port.

use async_trait::async_trait;
use eventspout_application::UserDirectory;
use eventspout_core::{AppError, AppResult};
use eventspout_domain::UserProfile;

use crate::API_KEY_HEADER;

/// Directory adapter resolving user profiles over the platform's user API.
///
/// A `404` from the directory is a lookup miss, not an error; callers see
/// `Ok(None)` and skip enrichment.
pub struct HttpUserDirectory {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpUserDirectory {
    /// Creates a directory adapter for a base URL and credential.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: String, api_key: String) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
        }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn find_user(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        let endpoint = format!("{}/users/{user_id}", self.base_url);
        let response = self
            .http_client
            .get(endpoint)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .await
            .map_err(|error| {
                AppError::Internal(format!("directory lookup transport error: {error}"))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_owned());
            return Err(AppError::Internal(format!(
                "directory returned status {}: {body}",
                status.as_u16()
            )));
        }

        let profile = response.json::<UserProfile>().await.map_err(|error| {
            AppError::Internal(format!("failed to parse directory response body: {error}"))
        })?;

        Ok(Some(profile))
    }
}
