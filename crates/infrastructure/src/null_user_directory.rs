//! Directory stub used when no directory endpoint is configured.

use async_trait::async_trait;
use eventspout_application::UserDirectory;
use eventspout_core::AppResult;
use eventspout_domain::UserProfile;

/// Directory whose every lookup misses.
///
/// Wiring this in disables enrichment without special-casing the
/// normalizer.
#[derive(Debug, Default)]
pub struct NullUserDirectory;

impl NullUserDirectory {
    /// Creates the stub directory.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UserDirectory for NullUserDirectory {
    async fn find_user(&self, _user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use eventspout_application::UserDirectory;

    use super::NullUserDirectory;

    #[tokio::test]
    async fn every_lookup_misses() {
        let directory = NullUserDirectory::new();
        let result = directory.find_user("u1").await.unwrap();
        assert!(result.is_none());
    }
}
