//! Event-related types for the attribution engine
//!
//! This module defines the unified event representation that both input
//! sources (ad exposures and sales) are loaded into before merging.

use chrono::NaiveDateTime;

/// User identifier
///
/// Opaque string, unique per user but repeated across that user's events.
pub type UserId = String;

/// Kinds of events that can appear on the merged timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A user was shown an advertisement
    ///
    /// The payload identifies the creative (ad id). Updates the user's
    /// last-seen exposure; never touches any aggregate.
    Exposure,

    /// A user made a purchase
    ///
    /// The payload is the sale amount as decimal text. Parsed only when the
    /// sale is attributed on the timeline walk.
    Sale,
}

impl EventKind {
    /// Label used in diagnostics to name the source this kind was loaded from
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Exposure => "exposure",
            EventKind::Sale => "sale",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single timestamped record from one of the input sources
///
/// Events are immutable once loaded: the engine only ever borrows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The user this event belongs to
    pub user_id: UserId,

    /// Second-resolution point in time, no timezone attached
    pub timestamp: NaiveDateTime,

    /// Whether this is an exposure or a sale
    pub kind: EventKind,

    /// Exposure value for exposures, amount text for sales
    pub payload: String,

    /// 1-based line in the originating source (header is line 1)
    pub line: u64,
}

impl Event {
    /// Create a new event
    pub fn new(
        user_id: impl Into<UserId>,
        timestamp: NaiveDateTime,
        kind: EventKind,
        payload: impl Into<String>,
        line: u64,
    ) -> Self {
        Event {
            user_id: user_id.into(),
            timestamp,
            kind,
            payload: payload.into(),
            line,
        }
    }
}
