//! Event type definitions for the event bus.
//!
//! Events are grouped by category. They are cloneable and serializable so
//! adapters can log or replay them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::{Mode, OverlayId, PendingOverlayId, RegistrationKind, SeatId};
use crate::geometry::Rectangle;

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Registration modes and pending drafts
    Registration(RegistrationEvent),
    /// Map navigation (pan/zoom) state
    Navigation(NavigationEvent),
    /// Seat selection and reservations
    Booking(BookingEvent),
    /// Backend failures surfaced to the user
    Error(ErrorEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Registration(_) => EventCategory::Registration,
            AppEvent::Navigation(_) => EventCategory::Navigation,
            AppEvent::Booking(_) => EventCategory::Booking,
            AppEvent::Error(_) => EventCategory::Error,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Registration(e) => e.description(),
            AppEvent::Navigation(e) => e.description(),
            AppEvent::Booking(e) => e.description(),
            AppEvent::Error(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Registration,
    Navigation,
    Booking,
    Error,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Registration => write!(f, "Registration"),
            EventCategory::Navigation => write!(f, "Navigation"),
            EventCategory::Booking => write!(f, "Booking"),
            EventCategory::Error => write!(f, "Error"),
        }
    }
}

/// Registration workflow events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistrationEvent {
    /// The active mode changed.
    ModeChanged {
        /// Mode before the change.
        from: Mode,
        /// Mode after the change.
        to: Mode,
    },
    /// A seat was targeted for registration.
    SeatTargeted {
        /// The targeted seat.
        seat_id: SeatId,
    },
    /// A seat received a pending rectangle.
    SeatRectPending {
        /// The seat.
        seat_id: SeatId,
        /// Its new pending rectangle.
        rect: Rectangle,
    },
    /// A pending overlay was drawn.
    OverlayDrafted {
        /// Local id of the draft.
        temp_id: PendingOverlayId,
        /// The drawn region.
        rect: Rectangle,
    },
    /// A pending overlay was renamed.
    OverlayRenamed {
        /// Local id of the draft.
        temp_id: PendingOverlayId,
        /// The new name.
        name: String,
    },
    /// Pending entries were thrown away.
    Discarded {
        /// Which collection.
        kind: RegistrationKind,
        /// How many entries were dropped.
        count: usize,
    },
    /// A confirm started.
    CommitStarted {
        /// Which collection.
        kind: RegistrationKind,
        /// Entries to persist.
        count: usize,
    },
    /// A confirm persisted everything.
    CommitFinished {
        /// Which collection.
        kind: RegistrationKind,
        /// Entries persisted.
        persisted: usize,
    },
    /// A confirm stopped on a backend failure.
    CommitFailed {
        /// Which collection.
        kind: RegistrationKind,
        /// Entries persisted before the failure.
        persisted: usize,
        /// Entries still pending.
        remaining: usize,
    },
}

impl RegistrationEvent {
    fn description(&self) -> String {
        match self {
            RegistrationEvent::ModeChanged { from, to } => format!("Mode: {} -> {}", from, to),
            RegistrationEvent::SeatTargeted { seat_id } => format!("Targeting seat {}", seat_id),
            RegistrationEvent::SeatRectPending { seat_id, rect } => {
                format!("Seat {} pending at {}", seat_id, rect)
            }
            RegistrationEvent::OverlayDrafted { temp_id, rect } => {
                format!("Overlay {} drafted at {}", temp_id, rect)
            }
            RegistrationEvent::OverlayRenamed { temp_id, name } => {
                format!("Overlay {} renamed to {:?}", temp_id, name)
            }
            RegistrationEvent::Discarded { kind, count } => {
                format!("Discarded {} pending {}", count, kind)
            }
            RegistrationEvent::CommitStarted { kind, count } => {
                format!("Committing {} {}", count, kind)
            }
            RegistrationEvent::CommitFinished { kind, persisted } => {
                format!("Committed {} {}", persisted, kind)
            }
            RegistrationEvent::CommitFailed {
                kind,
                persisted,
                remaining,
            } => format!(
                "Commit of {} failed: {} persisted, {} remaining",
                kind, persisted, remaining
            ),
        }
    }
}

/// Map navigation events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavigationEvent {
    /// Native pan/zoom gestures were switched off or on.
    SuppressionChanged {
        /// True while gestures are disabled.
        suppressed: bool,
    },
}

impl NavigationEvent {
    fn description(&self) -> String {
        match self {
            NavigationEvent::SuppressionChanged { suppressed: true } => {
                "Map navigation suppressed".to_string()
            }
            NavigationEvent::SuppressionChanged { suppressed: false } => {
                "Map navigation restored".to_string()
            }
        }
    }
}

/// Booking events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookingEvent {
    /// The viewed date changed.
    DateChanged {
        /// The new date.
        date: NaiveDate,
    },
    /// The seat selection changed.
    SelectionChanged {
        /// Seats now selected.
        selected: Vec<SeatId>,
    },
    /// Reservations were created.
    Reserved {
        /// The reserved seats.
        seat_ids: Vec<SeatId>,
        /// Reservation date.
        date: NaiveDate,
    },
    /// A reservation was cancelled.
    ReservationCancelled {
        /// The seat that was freed.
        seat_id: SeatId,
        /// Reservation date.
        date: NaiveDate,
    },
    /// An information overlay was deleted.
    OverlayRemoved {
        /// The deleted overlay.
        id: OverlayId,
    },
}

impl BookingEvent {
    fn description(&self) -> String {
        match self {
            BookingEvent::DateChanged { date } => format!("Date: {}", date),
            BookingEvent::SelectionChanged { selected } => {
                format!("{} seat(s) selected", selected.len())
            }
            BookingEvent::Reserved { seat_ids, date } => {
                format!("Reserved {} seat(s) on {}", seat_ids.len(), date)
            }
            BookingEvent::ReservationCancelled { seat_id, date } => {
                format!("Cancelled seat {} on {}", seat_id, date)
            }
            BookingEvent::OverlayRemoved { id } => format!("Removed overlay {}", id),
        }
    }
}

/// Error events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ErrorEvent {
    /// A backend call failed.
    Backend {
        /// What the core was doing.
        operation: String,
        /// The failure message.
        message: String,
    },
}

impl ErrorEvent {
    fn description(&self) -> String {
        match self {
            ErrorEvent::Backend { operation, message } => {
                format!("Backend error during {}: {}", operation, message)
            }
        }
    }
}
