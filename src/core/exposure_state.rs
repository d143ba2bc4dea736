//! Per-user exposure tracking
//!
//! This module provides the `UserExposureState` struct which remembers, for
//! each user, the most recent exposure seen while walking the timeline.
//!
//! An exposure whose value is empty is stored as an explicit "exposed to
//! nothing" marker instead of an empty string, so it stays distinguishable
//! from a user that was never exposed.

use crate::types::UserId;
use std::collections::HashMap;

/// Result of looking up a user's last exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExposureLookup<'a> {
    /// The user's latest exposure carried this value
    Exposed(&'a str),

    /// The user's latest exposure had an empty value
    EmptyExposure,

    /// No exposure has been seen for the user yet
    NeverExposed,
}

impl<'a> ExposureLookup<'a> {
    /// The value a sale should be credited to, if any
    pub fn attributable(self) -> Option<&'a str> {
        match self {
            ExposureLookup::Exposed(value) => Some(value),
            ExposureLookup::EmptyExposure | ExposureLookup::NeverExposed => None,
        }
    }
}

/// Last-seen exposure per user
///
/// Created empty at the start of a run and only ever written by exposure
/// events (last write wins).
#[derive(Debug, Default)]
pub struct UserExposureState {
    /// Map of user IDs to their latest exposure value (None = empty value)
    latest: HashMap<UserId, Option<String>>,
}

impl UserExposureState {
    /// Create a new state with no users
    pub fn new() -> Self {
        UserExposureState {
            latest: HashMap::new(),
        }
    }

    /// Record an exposure, overwriting any earlier one for the same user
    pub fn record(&mut self, user_id: &str, value: &str) {
        let value = (!value.is_empty()).then(|| value.to_string());
        match self.latest.get_mut(user_id) {
            Some(slot) => *slot = value,
            None => {
                self.latest.insert(user_id.to_string(), value);
            }
        }
    }

    /// Look up the latest exposure for a user
    pub fn lookup(&self, user_id: &str) -> ExposureLookup<'_> {
        match self.latest.get(user_id) {
            Some(Some(value)) => ExposureLookup::Exposed(value),
            Some(None) => ExposureLookup::EmptyExposure,
            None => ExposureLookup::NeverExposed,
        }
    }
}
