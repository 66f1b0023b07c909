//! Application services and ports.

#![forbid(unsafe_code)]

mod dispatch_service;
mod normalizer;
mod notify_ports;

pub use dispatch_service::{DispatchOutcome, DispatchService};
pub use normalizer::{
    ADMIN_EVENT_TYPE, EnrichmentOptions, normalize_admin_event, normalize_event,
};
pub use notify_ports::{NotificationSink, UserDirectory};
