//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod admin_event;
mod event;
mod filter;
mod user;

pub use admin_event::{AdminEvent, AuthDetails};
pub use event::LifecycleEvent;
pub use filter::EventFilter;
pub use user::UserProfile;
