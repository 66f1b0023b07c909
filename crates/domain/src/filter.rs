//! Admission filter over event type names.

use std::collections::BTreeSet;

/// Allow-list deciding which event types are forwarded at all.
///
/// An absent list admits every event type. With a list, membership is an
/// exact case-sensitive string match with no normalization. Built once at
/// startup and immutable afterward.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    allowed: Option<BTreeSet<String>>,
}

impl EventFilter {
    /// Creates a filter that admits every event type.
    #[must_use]
    pub fn allow_all() -> Self {
        Self { allowed: None }
    }

    /// Creates a filter that admits only the given event type names.
    pub fn allow_only(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            allowed: Some(names.into_iter().collect()),
        }
    }

    /// Parses a comma-separated allow-list value; `None` admits everything.
    ///
    /// Entries are split verbatim, without trimming or case folding.
    #[must_use]
    pub fn from_csv(raw: Option<&str>) -> Self {
        match raw {
            Some(csv) => Self::allow_only(csv.split(',').map(str::to_owned)),
            None => Self::allow_all(),
        }
    }

    /// Returns whether an event with this type name should be forwarded.
    ///
    /// An event without a type name cannot match a configured list and is
    /// rejected; without a list it is admitted like everything else.
    #[must_use]
    pub fn admits(&self, event_type: Option<&str>) -> bool {
        match (&self.allowed, event_type) {
            (None, _) => true,
            (Some(allowed), Some(name)) => allowed.contains(name),
            (Some(_), None) => false,
        }
    }
}
