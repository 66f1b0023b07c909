//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_notification_sink;
mod http_user_directory;
mod null_user_directory;

pub use http_notification_sink::{API_KEY_HEADER, HttpNotificationSink};
pub use http_user_directory::HttpUserDirectory;
pub use null_user_directory::NullUserDirectory;
