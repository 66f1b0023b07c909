//! Event dispatch: admission, normalization, delivery.

use std::sync::Arc;

use eventspout_domain::{AdminEvent, EventFilter, LifecycleEvent};
use tracing::{error, info};

use crate::{
    EnrichmentOptions, NotificationSink, UserDirectory, normalize_admin_event, normalize_event,
};

/// Terminal outcome of one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Document delivered to the sink.
    Published,
    /// Event type not admitted by the filter.
    Skipped,
    /// Normalization or delivery failed; the failure was logged and dropped.
    Dropped,
}

/// Application service gluing filter, normalizer and sink together.
///
/// This is the error boundary of the system: normalization and delivery
/// failures are logged here and never escape, so one bad event cannot
/// affect the host or subsequent events. Each event is an independent,
/// terminating unit of work.
#[derive(Clone)]
pub struct DispatchService {
    directory: Arc<dyn UserDirectory>,
    sink: Arc<dyn NotificationSink>,
    filter: EventFilter,
    enrichment: EnrichmentOptions,
}

impl DispatchService {
    /// Creates a dispatcher over a directory, a sink and an admission filter.
    #[must_use]
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        sink: Arc<dyn NotificationSink>,
        filter: EventFilter,
        enrichment: EnrichmentOptions,
    ) -> Self {
        Self {
            directory,
            sink,
            filter,
            enrichment,
        }
    }

    /// Handles one lifecycle event from the host.
    pub async fn handle_event(&self, event: &LifecycleEvent) -> DispatchOutcome {
        info!("event occurred: {}", event.describe());

        if !self.filter.admits(event.event_type.as_deref()) {
            return DispatchOutcome::Skipped;
        }

        let document = normalize_event(event, self.directory.as_ref(), self.enrichment).await;

        match self.sink.publish(&document).await {
            Ok(()) => DispatchOutcome::Published,
            Err(publish_error) => {
                error!(error = %publish_error, "failed to publish lifecycle event notification");
                DispatchOutcome::Dropped
            }
        }
    }

    /// Handles one admin event from the host.
    pub async fn handle_admin_event(&self, event: &AdminEvent) -> DispatchOutcome {
        info!("admin event occurred: {}", event.describe());

        if !self.filter.admits(event.operation_type.as_deref()) {
            return DispatchOutcome::Skipped;
        }

        let document = match normalize_admin_event(event) {
            Ok(document) => document,
            Err(normalize_error) => {
                error!(error = %normalize_error, "failed to normalize admin event");
                return DispatchOutcome::Dropped;
            }
        };

        match self.sink.publish(&document).await {
            Ok(()) => DispatchOutcome::Published,
            Err(publish_error) => {
                error!(error = %publish_error, "failed to publish admin event notification");
                DispatchOutcome::Dropped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use eventspout_core::{AppError, AppResult};
    use eventspout_domain::{AdminEvent, AuthDetails, EventFilter, LifecycleEvent, UserProfile};
    use serde_json::{Map, Value, json};

    use super::{
        DispatchOutcome, DispatchService, EnrichmentOptions, NotificationSink, UserDirectory,
    };

    #[derive(Default)]
    struct MissDirectory;

    #[async_trait]
    impl UserDirectory for MissDirectory {
        async fn find_user(&self, _user_id: &str) -> AppResult<Option<UserProfile>> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        published: Mutex<Vec<Value>>,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn publish(&self, document: &Map<String, Value>) -> AppResult<()> {
            self.published
                .lock()
                .map_err(|lock_error| {
                    AppError::Internal(format!("failed to lock sink state: {lock_error}"))
                })?
                .push(Value::Object(document.clone()));
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl NotificationSink for FailingSink {
        async fn publish(&self, _document: &Map<String, Value>) -> AppResult<()> {
            Err(AppError::Publish(
                "webhook endpoint returned status 503".to_owned(),
            ))
        }
    }

    fn dispatcher_with(sink: Arc<dyn NotificationSink>, filter: EventFilter) -> DispatchService {
        DispatchService::new(
            Arc::new(MissDirectory),
            sink,
            filter,
            EnrichmentOptions::default(),
        )
    }

    fn typed_event(event_type: &str) -> LifecycleEvent {
        LifecycleEvent {
            event_type: Some(event_type.to_owned()),
            realm_id: Some("master".to_owned()),
            ..LifecycleEvent::default()
        }
    }

    #[tokio::test]
    async fn allow_list_rejects_unlisted_event_types() {
        let sink = Arc::new(RecordingSink::default());
        let service =
            dispatcher_with(sink.clone(), EventFilter::from_csv(Some("LOGIN,LOGOUT")));

        let outcome = service.handle_event(&typed_event("REGISTER")).await;

        assert_eq!(outcome, DispatchOutcome::Skipped);
        assert!(sink.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn allow_list_forwards_listed_event_types() {
        let sink = Arc::new(RecordingSink::default());
        let service =
            dispatcher_with(sink.clone(), EventFilter::from_csv(Some("LOGIN,LOGOUT")));

        let outcome = service.handle_event(&typed_event("LOGIN")).await;

        assert_eq!(outcome, DispatchOutcome::Published);
        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].get("type"), Some(&json!("LOGIN")));
    }

    #[tokio::test]
    async fn absent_allow_list_forwards_everything() {
        let sink = Arc::new(RecordingSink::default());
        let service = dispatcher_with(sink.clone(), EventFilter::allow_all());

        for event_type in ["LOGIN", "REGISTER", "CODE_TO_TOKEN"] {
            let outcome = service.handle_event(&typed_event(event_type)).await;
            assert_eq!(outcome, DispatchOutcome::Published);
        }

        assert_eq!(sink.published.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn publish_failure_is_swallowed() {
        let service = dispatcher_with(Arc::new(FailingSink), EventFilter::allow_all());

        let outcome = service.handle_event(&typed_event("LOGIN")).await;

        assert_eq!(outcome, DispatchOutcome::Dropped);
    }

    #[tokio::test]
    async fn admin_events_are_filtered_by_operation_type() {
        let sink = Arc::new(RecordingSink::default());
        let service = dispatcher_with(sink.clone(), EventFilter::from_csv(Some("DELETE")));

        let admitted = AdminEvent {
            operation_type: Some("DELETE".to_owned()),
            resource_path: Some("users/abc".to_owned()),
            ..AdminEvent::default()
        };
        let rejected = AdminEvent {
            operation_type: Some("CREATE".to_owned()),
            ..AdminEvent::default()
        };

        assert_eq!(
            service.handle_admin_event(&admitted).await,
            DispatchOutcome::Published
        );
        assert_eq!(
            service.handle_admin_event(&rejected).await,
            DispatchOutcome::Skipped
        );

        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(
            published[0],
            json!({
                "type": "ADMIN_EVENT",
                "operationType": "DELETE",
                "resourcePath": "users/abc"
            })
        );
    }

    #[tokio::test]
    async fn malformed_representation_is_dropped_before_the_sink() {
        let sink = Arc::new(RecordingSink::default());
        let service = dispatcher_with(sink.clone(), EventFilter::allow_all());

        let event = AdminEvent {
            operation_type: Some("UPDATE".to_owned()),
            auth_details: Some(AuthDetails::default()),
            representation: Some("{not json".to_owned()),
            ..AdminEvent::default()
        };

        let outcome = service.handle_admin_event(&event).await;

        assert_eq!(outcome, DispatchOutcome::Dropped);
        assert!(sink.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_event_does_not_affect_the_next_one() {
        let sink = Arc::new(RecordingSink::default());
        let service = dispatcher_with(sink.clone(), EventFilter::allow_all());

        let bad = AdminEvent {
            operation_type: Some("UPDATE".to_owned()),
            auth_details: Some(AuthDetails::default()),
            representation: Some("{not json".to_owned()),
            ..AdminEvent::default()
        };
        assert_eq!(
            service.handle_admin_event(&bad).await,
            DispatchOutcome::Dropped
        );

        assert_eq!(
            service.handle_event(&typed_event("LOGIN")).await,
            DispatchOutcome::Published
        );
        assert_eq!(sink.published.lock().unwrap().len(), 1);
    }
}
