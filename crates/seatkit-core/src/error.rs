//! Error handling for SeatKit
//!
//! Provides error types for every layer of the seat map:
//! - Backend errors (the persistence collaborator failed or rejected a call)
//! - Registration errors (an operation was invalid for the current mode)
//! - Commit errors (a confirm stopped part way through its backend calls)
//! - Booking errors (reservation workflow preconditions)
//!
//! All error types use `thiserror` for ergonomic error handling.

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::{Mode, OverlayId, PendingOverlayId, RegistrationKind, SeatId};

/// Backend error type
///
/// Returned by every `ReservationBackend` call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// No seat with this id exists
    #[error("Seat {0} not found")]
    SeatNotFound(SeatId),

    /// No overlay with this id exists
    #[error("Info overlay {0} not found")]
    OverlayNotFound(OverlayId),

    /// No reservation exists for the seat on that date
    #[error("No reservation for seat {seat_id} on {date}")]
    ReservationNotFound {
        /// The seat that was looked up.
        seat_id: SeatId,
        /// The date that was looked up.
        date: NaiveDate,
    },

    /// The request was malformed
    #[error("Invalid request: {reason}")]
    InvalidRequest {
        /// Why the backend rejected the request.
        reason: String,
    },

    /// The backend could not be reached
    #[error("Backend unavailable: {reason}")]
    Unavailable {
        /// Description of the outage.
        reason: String,
    },

    /// Generic backend error
    #[error("Backend error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Registration error type
///
/// Produced when a registration operation is not valid in the current state.
/// The state is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    /// Operation requires a different mode
    #[error("Operation requires {required} mode, current mode is {current}")]
    WrongMode {
        /// The mode the operation needs.
        required: Mode,
        /// The mode that is active.
        current: Mode,
    },

    /// Entering a mode while another one is active
    #[error("Cannot enter {requested} while {current} is active")]
    ModeBusy {
        /// The mode that is active.
        current: Mode,
        /// The mode that was requested.
        requested: Mode,
    },

    /// A seat rectangle was offered but no seat is targeted
    #[error("No seat selected for registration")]
    NoSeatTargeted,

    /// Seat id missing from the loaded seat list
    #[error("Seat {0} is not in the seat list")]
    UnknownSeat(SeatId),

    /// Confirm requested with nothing pending
    #[error("Nothing pending to confirm for {0}")]
    NothingPending(RegistrationKind),

    /// Some pending overlays have no name yet
    #[error("{count} pending overlay(s) still need a name")]
    UnnamedOverlays {
        /// Number of overlays with an empty name.
        count: usize,
    },

    /// A previous confirm is still running
    #[error("A {0} commit is already in flight")]
    CommitInFlight(RegistrationKind),

    /// No commit of this kind was started
    #[error("No {0} commit in flight")]
    NoCommitInFlight(RegistrationKind),

    /// The pending overlay does not exist
    #[error("Unknown pending overlay {0}")]
    UnknownPendingOverlay(PendingOverlayId),
}

/// Commit error type
///
/// A confirm persists entries one by one and stops at the first failure.
/// Entries persisted before the failure are no longer pending; the failed
/// entry and everything after it remain pending.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Commit of {kind} stopped after {persisted} of {total}: {source}")]
pub struct CommitError {
    /// Which collection was being committed.
    pub kind: RegistrationKind,
    /// Entries persisted before the failure.
    pub persisted: usize,
    /// Entries attempted in total.
    pub total: usize,
    /// The backend failure that stopped the commit.
    #[source]
    pub source: BackendError,
}

impl CommitError {
    /// Entries still pending after the failure.
    pub fn remaining(&self) -> usize {
        self.total - self.persisted
    }
}

/// Booking error type
///
/// Preconditions of the reservation workflow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    /// Reservation form used with no seats selected
    #[error("No seats selected")]
    EmptySelection,

    /// Reservation submitted without a name
    #[error("A name is required to reserve seats")]
    MissingName,

    /// Booking interaction while a registration mode is active
    #[error("Booking is disabled while {0} is active")]
    RegistrationActive(Mode),

    /// The reservation form is not open
    #[error("Reservation form is not open")]
    FormClosed,

    /// No reservation-detail dialog is open
    #[error("No reservation detail is open")]
    NoDetailOpen,

    /// No overlay is awaiting delete confirmation
    #[error("No overlay awaiting deletion")]
    NoOverlayPendingDelete,
}

/// Main error type for SeatKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Backend error
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Registration error
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Commit error
    #[error(transparent)]
    Commit(#[from] CommitError),

    /// Booking error
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error came from the backend, directly or via a commit
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Error::Backend(_) | Error::Commit(_))
    }

    /// Check if this is a rejected registration operation
    pub fn is_registration_error(&self) -> bool {
        matches!(self, Error::Registration(_))
    }

    /// Check if this is a booking precondition failure
    pub fn is_booking_error(&self) -> bool {
        matches!(self, Error::Booking(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for backend calls
pub type BackendResult<T> = std::result::Result<T, BackendError>;
